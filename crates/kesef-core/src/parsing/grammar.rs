use crate::model::{GrammarId, RawAmount, RawFields};
use regex::{Captures, Regex};
use std::sync::LazyLock;

/// A row grammar: a pure function from one raw line to its field tuple.
pub type Grammar = fn(&str) -> Option<RawFields>;

/// Grammars in priority order. The first match wins; each stamps its own
/// `GrammarId` on the fields it returns.
pub const GRAMMARS: &[Grammar] = &[
    balance_amount_description_date,
    balance_amount_reference_dates,
    currency_tagged,
    date_description_amount_balance,
];

// Statement descriptions: Hebrew, word characters and the punctuation banks
// use in abbreviations ("עמ.הישיר", "הע. אינטרנט", "פיקדון*"). No slashes, so
// a description can never swallow a trailing date.
const DESCRIPTION: &str = r#"[\p{Hebrew}\w\-\*\s\.'"]+?"#;
const UNSIGNED: &str = r"-?[\d,]+\.?\d*";
const SHORT_DATE: &str = r"\d{2}/\d{2}/\d{2}";

static BALANCE_AMOUNT_DESCRIPTION_DATE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(
        r"(?P<balance>{UNSIGNED})\s+(?P<amount>{UNSIGNED})\s+(?P<description>{DESCRIPTION})\s+(?P<date>{SHORT_DATE})\s*$"
    ))
    .expect("valid regex")
});

static BALANCE_AMOUNT_REFERENCE_DATES: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(
        r"(?P<balance>[\d,().\-]+)\s+(?P<amount>[\d,().\-]+)\s+(?P<reference>\S+)\s+(?P<description>.+?)\s+(?P<value_date>{SHORT_DATE})\s+(?P<date>{SHORT_DATE})\s*$"
    ))
    .expect("valid regex")
});

static CURRENCY_TAGGED: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(
        r"(?P<balance>{UNSIGNED})\s*[₪$]?\s+(?P<amount>{UNSIGNED})\s*[₪$]?\s+(?P<description>{DESCRIPTION})\s+(?P<date>{SHORT_DATE})\s*$"
    ))
    .expect("valid regex")
});

static DATE_DESCRIPTION_AMOUNT_BALANCE: LazyLock<Regex> = LazyLock::new(|| {
    let amount = r"[\-+(]?(?:\d{1,3}(?:,\d{3})+|\d+)(?:\.\d{1,2})?[)\-]?";
    Regex::new(&format!(
        r"(?P<date>\d{{1,2}}[/\-.]\d{{1,2}}[/\-.]\d{{2,4}})\s+(?P<description>.+?)\s+(?P<amount>{amount})\s+(?P<balance>{amount})\s*$"
    ))
    .expect("valid regex")
});

/// Try every grammar against `line` in priority order.
pub fn match_line(line: &str) -> Option<RawFields> {
    let line = line.trim();
    if line.is_empty() {
        return None;
    }
    GRAMMARS.iter().find_map(|grammar| grammar(line))
}

fn balance_amount_description_date(line: &str) -> Option<RawFields> {
    let caps = BALANCE_AMOUNT_DESCRIPTION_DATE.captures(line)?;
    Some(four_field(&caps, GrammarId::BalanceAmountDescriptionDate))
}

fn balance_amount_reference_dates(line: &str) -> Option<RawFields> {
    let caps = BALANCE_AMOUNT_REFERENCE_DATES.captures(line)?;
    Some(RawFields {
        grammar: GrammarId::BalanceAmountReferenceDates,
        date: field(&caps, "date"),
        value_date: Some(field(&caps, "value_date")),
        description: field(&caps, "description"),
        reference: Some(field(&caps, "reference")),
        amount: RawAmount::Single(field(&caps, "amount")),
        balance: field(&caps, "balance"),
    })
}

fn currency_tagged(line: &str) -> Option<RawFields> {
    let caps = CURRENCY_TAGGED.captures(line)?;
    Some(four_field(&caps, GrammarId::CurrencyTagged))
}

fn date_description_amount_balance(line: &str) -> Option<RawFields> {
    let caps = DATE_DESCRIPTION_AMOUNT_BALANCE.captures(line)?;
    Some(four_field(&caps, GrammarId::DateDescriptionAmountBalance))
}

fn four_field(caps: &Captures<'_>, grammar: GrammarId) -> RawFields {
    RawFields {
        grammar,
        date: field(caps, "date"),
        value_date: None,
        description: field(caps, "description"),
        reference: None,
        amount: RawAmount::Single(field(caps, "amount")),
        balance: field(caps, "balance"),
    }
}

fn field(caps: &Captures<'_>, name: &str) -> String {
    caps.name(name)
        .map(|m| m.as_str().trim().to_string())
        .unwrap_or_default()
}
