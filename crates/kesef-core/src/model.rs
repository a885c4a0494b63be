use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Which row shape recognized a raw line or table row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GrammarId {
    /// balance, amount, description, date
    BalanceAmountDescriptionDate,
    /// balance, amount, reference, description, value date, date
    BalanceAmountReferenceDates,
    /// balance and amount with currency glyphs, description, date
    CurrencyTagged,
    /// date, description, amount, balance
    DateDescriptionAmountBalance,
    /// pre-split table row read through a column layout
    Columns,
}

impl GrammarId {
    /// Grammars whose descriptions come from naive PDF text extraction and
    /// may be stored right-to-left reversed.
    pub fn is_free_text(&self) -> bool {
        !matches!(self, GrammarId::Columns)
    }
}

impl fmt::Display for GrammarId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            GrammarId::BalanceAmountDescriptionDate => "balance-amount-description-date",
            GrammarId::BalanceAmountReferenceDates => "balance-amount-reference-description-dates",
            GrammarId::CurrencyTagged => "currency-tagged",
            GrammarId::DateDescriptionAmountBalance => "date-description-amount-balance",
            GrammarId::Columns => "columns",
        };
        write!(f, "{name}")
    }
}

/// Untyped field strings captured from one raw row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawFields {
    pub grammar: GrammarId,
    pub date: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value_date: Option<String>,
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reference: Option<String>,
    pub amount: RawAmount,
    pub balance: String,
}

/// The amount as the source presents it: one signed-or-unsigned field, or a
/// debit/credit column pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RawAmount {
    Single(String),
    DebitCredit { debit: String, credit: String },
}

/// A recognized row with typed date and numbers, before sign reconciliation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParsedRow {
    /// Position in the statement's presentation order.
    pub index: usize,
    pub grammar: GrammarId,
    pub date: NaiveDate,
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reference: Option<String>,
    /// Amount as printed. Sign is unreliable for free-text grammars.
    pub raw_amount: Decimal,
    pub balance: Decimal,
    /// Set when the source states the sign, as debit/credit columns do.
    #[serde(default)]
    pub sign_printed: bool,
}

/// How the sign of a reconciled amount was decided.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SignSource {
    /// Compared against the nearest older row with a different balance.
    BalanceDelta,
    /// Compared against the nearest older row with an earlier date.
    EarlierDate,
    /// Amount recomputed as the difference of consecutive balances.
    BalanceDifference,
    /// Description matched an income or expense hint keyword.
    Keyword,
    /// Taken from the source's debit/credit columns, or from a table
    /// amount when no older balance exists.
    Printed,
    /// No evidence; the configured default was applied.
    Fallback,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SignedRow {
    pub row: ParsedRow,
    pub amount: Decimal,
    pub sign_source: SignSource,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TransactionKind {
    Income,
    Expense,
}

impl fmt::Display for TransactionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TransactionKind::Income => write!(f, "Income"),
            TransactionKind::Expense => write!(f, "Expense"),
        }
    }
}

/// Canonical output record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    pub date: NaiveDate,
    pub description: String,
    /// Positive = credit/income, negative = debit/expense.
    pub amount: Decimal,
    /// Running balance after this transaction.
    pub balance: Decimal,
    pub category: String,
    pub kind: TransactionKind,
}

/// Ordering assumption handed to the sign reconciler.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RowOrdering {
    /// Presentation order is newest first; output keeps source order.
    #[default]
    NewestFirst,
    /// Rows are re-sorted ascending by date; output is chronological.
    Chronological,
}

impl fmt::Display for RowOrdering {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RowOrdering::NewestFirst => write!(f, "newest-first"),
            RowOrdering::Chronological => write!(f, "chronological"),
        }
    }
}

impl RowOrdering {
    pub fn from_str_loose(s: &str) -> Option<RowOrdering> {
        match s.trim().to_lowercase().as_str() {
            "newest-first" | "newest" | "reverse" | "desc" => Some(RowOrdering::NewestFirst),
            "chronological" | "oldest-first" | "asc" => Some(RowOrdering::Chronological),
            _ => None,
        }
    }
}

/// A non-fatal note surfaced alongside the transactions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PipelineWarning {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub row_index: Option<usize>,
    pub message: String,
}

/// Result of a full pipeline run over one statement.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NormalizedStatement {
    /// Bank named by the statement indicators, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bank: Option<String>,
    /// Order of `transactions`.
    pub ordering: RowOrdering,
    pub transactions: Vec<Transaction>,
    /// Rows that matched no grammar or had an unparseable date/amount.
    pub skipped_rows: usize,
    /// Records removed by validation.
    pub dropped_rows: usize,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub warnings: Vec<PipelineWarning>,
}
