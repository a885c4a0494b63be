use crate::rules::schema::RuleBook;

/// Minimum indicator hits for extracted PDF text.
pub const MIN_TEXT_INDICATORS: usize = 1;
/// Minimum indicator hits for HTML and spreadsheet exports.
pub const MIN_TABLE_INDICATORS: usize = 3;

/// What the statement text says about itself.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StatementHeader {
    /// Detected issuing bank.
    pub bank: Option<String>,
    /// Indicator words found, in rulebook order.
    pub indicators: Vec<String>,
}

impl StatementHeader {
    pub fn looks_like_statement(&self, min_hits: usize) -> bool {
        self.indicators.len() >= min_hits
    }
}

/// Scan statement text for the rulebook's indicator words.
pub fn scan_header(text: &str, rules: &RuleBook) -> StatementHeader {
    let lower = text.to_lowercase();
    let mut header = StatementHeader::default();

    for indicator in &rules.statement_indicators {
        if !lower.contains(&indicator.text.to_lowercase()) {
            continue;
        }
        header.indicators.push(indicator.text.clone());
        if header.bank.is_none() {
            header.bank = indicator.bank.clone();
        }
    }

    header
}
