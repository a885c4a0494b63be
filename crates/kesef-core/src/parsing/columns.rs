use crate::model::{GrammarId, RawAmount, RawFields};

/// Header labels seen in statement tables (Hebrew exports and English ones).
const HEADER_LABELS: &[&str] = &[
    "תאריך",
    "תאריך ערך",
    "תיאור",
    "אסמכתא",
    "חובה",
    "זכות",
    "יתרה",
    "בחובה",
    "בזכות",
    "היתרה בש\"ח",
    "סכום",
    "date",
    "value date",
    "description",
    "reference",
    "debit",
    "credit",
    "balance",
    "amount",
];

/// Detect if a table row is a header row rather than data.
pub fn is_header_row(cells: &[String]) -> bool {
    let count = cells
        .iter()
        .map(|c| c.trim().to_lowercase())
        .filter(|c| HEADER_LABELS.contains(&c.as_str()))
        .count();
    count >= 3
}

/// Where each field lives in a pre-split table row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnLayout {
    /// date, value date, description, reference, debit, credit, balance
    DebitCredit {
        date: usize,
        description: usize,
        reference: usize,
        debit: usize,
        credit: usize,
        balance: usize,
    },
    /// balance, amount, description, date
    BalanceAmount {
        balance: usize,
        amount: usize,
        description: usize,
        date: usize,
    },
}

impl ColumnLayout {
    /// The seven-column layout of Hebrew bank exports.
    pub const SEVEN_COLUMN: ColumnLayout = ColumnLayout::DebitCredit {
        date: 0,
        description: 2,
        reference: 3,
        debit: 4,
        credit: 5,
        balance: 6,
    };

    /// The four-column balance-first layout.
    pub const FOUR_COLUMN: ColumnLayout = ColumnLayout::BalanceAmount {
        balance: 0,
        amount: 1,
        description: 2,
        date: 3,
    };

    /// Pick a layout from the widest row in the table.
    pub fn detect(rows: &[Vec<String>]) -> ColumnLayout {
        let widest = rows.iter().map(|r| r.len()).max().unwrap_or(0);
        if widest >= 7 {
            ColumnLayout::SEVEN_COLUMN
        } else {
            ColumnLayout::FOUR_COLUMN
        }
    }

    fn min_width(&self) -> usize {
        match *self {
            ColumnLayout::DebitCredit {
                date,
                description,
                reference,
                debit,
                credit,
                balance,
            } => [date, description, reference, debit, credit, balance]
                .into_iter()
                .max()
                .unwrap_or(0)
                + 1,
            ColumnLayout::BalanceAmount {
                balance,
                amount,
                description,
                date,
            } => [balance, amount, description, date]
                .into_iter()
                .max()
                .unwrap_or(0)
                + 1,
        }
    }

    /// Read one data row. Returns None for short rows and header rows.
    pub fn read_row(&self, cells: &[String]) -> Option<RawFields> {
        if cells.len() < self.min_width() || is_header_row(cells) {
            return None;
        }
        let cell = |i: usize| cells[i].trim().to_string();

        let fields = match *self {
            ColumnLayout::DebitCredit {
                date,
                description,
                reference,
                debit,
                credit,
                balance,
            } => RawFields {
                grammar: GrammarId::Columns,
                date: cell(date),
                value_date: None,
                description: cell(description),
                reference: Some(cell(reference)).filter(|r| !r.is_empty()),
                amount: RawAmount::DebitCredit {
                    debit: cell(debit),
                    credit: cell(credit),
                },
                balance: cell(balance),
            },
            ColumnLayout::BalanceAmount {
                balance,
                amount,
                description,
                date,
            } => RawFields {
                grammar: GrammarId::Columns,
                date: cell(date),
                value_date: None,
                description: cell(description),
                reference: None,
                amount: RawAmount::Single(cell(amount)),
                balance: cell(balance),
            },
        };
        Some(fields)
    }
}
