use crate::model::TransactionKind;
use serde::{Deserialize, Serialize};

/// Keyword tables that drive text repair, sign hints, classification and
/// categorization. Loaded once and shared by reference.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RuleBook {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    pub version: String,
    /// Category assigned when no keyword matches.
    pub fallback_category: String,
    /// Description given to table rows whose description cell is empty.
    #[serde(default = "default_description")]
    pub default_description: String,
    /// Ordered keyword -> category table. First substring hit wins.
    pub categories: Vec<CategoryRuleDef>,
    /// Descriptions containing any of these are Income even with a
    /// non-positive amount.
    #[serde(default)]
    pub income_keywords: Vec<String>,
    #[serde(default)]
    pub sign_hints: SignHints,
    #[serde(default)]
    pub sign_defaults: SignDefaults,
    /// Garbled raw descriptions and their readable form, in lookup order.
    #[serde(default)]
    pub translations: Vec<TranslationDef>,
    /// Reversed-suffix markers used to spot right-to-left text stored
    /// backwards.
    #[serde(default)]
    pub reversed_suffixes: Vec<String>,
    /// Words whose presence marks the input as a bank statement.
    #[serde(default)]
    pub statement_indicators: Vec<IndicatorDef>,
}

fn default_description() -> String {
    "תנועה".into()
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategoryRuleDef {
    pub keyword: String,
    pub category: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TranslationDef {
    pub raw: String,
    pub readable: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IndicatorDef {
    pub text: String,
    /// Set when the indicator names the issuing bank.
    #[serde(default)]
    pub bank: Option<String>,
}

/// Keywords used to sign the first row of a chronological statement.
/// Income is checked before expense.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SignHints {
    #[serde(default)]
    pub income: Vec<String>,
    #[serde(default)]
    pub expense: Vec<String>,
}

/// Kinds assumed when neither balances nor keywords settle a sign.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct SignDefaults {
    /// Oldest row of a newest-first statement, with nothing to compare to.
    pub no_predecessor: TransactionKind,
    /// First row of a chronological statement matching no sign hint.
    pub no_keyword: TransactionKind,
}

impl Default for SignDefaults {
    fn default() -> Self {
        Self {
            no_predecessor: TransactionKind::Expense,
            no_keyword: TransactionKind::Expense,
        }
    }
}
