use crate::model::Transaction;
use rust_decimal::Decimal;

/// Largest magnitude accepted for an amount or balance.
pub const MAX_MAGNITUDE: Decimal = Decimal::from_parts(1_000_000_000, 0, 0, false, 0);

#[derive(Debug, Clone, Default)]
pub struct ValidationReport {
    pub kept: Vec<Transaction>,
    pub dropped: usize,
}

/// Why a record would be dropped, if at all.
pub fn rejection(tx: &Transaction) -> Option<&'static str> {
    if tx.description.trim().is_empty() {
        Some("empty description")
    } else if tx.amount.abs() > MAX_MAGNITUDE {
        Some("amount out of range")
    } else if tx.balance.abs() > MAX_MAGNITUDE {
        Some("balance out of range")
    } else {
        None
    }
}

/// Drop implausible records. Survivors are passed through untouched.
pub fn validate(transactions: Vec<Transaction>) -> ValidationReport {
    let mut report = ValidationReport::default();

    for tx in transactions {
        match rejection(&tx) {
            None => report.kept.push(tx),
            Some(reason) => {
                log::debug!("dropped {} '{}': {}", tx.date, tx.description, reason);
                report.dropped += 1;
            }
        }
    }

    report
}
