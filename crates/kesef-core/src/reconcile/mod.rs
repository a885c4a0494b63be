//! Sign reconciliation.
//!
//! Free-text extraction loses the minus sign of debits, so the sign of each
//! amount is recovered from the running balance. How that works depends on
//! the presentation order, which the caller states up front.

mod backward;
mod forward;

use crate::model::{ParsedRow, PipelineWarning, RowOrdering, SignedRow};
use crate::rules::schema::RuleBook;

/// Signed rows plus notes about every sign that fell back to a default.
#[derive(Debug, Clone, Default)]
pub struct Reconciled {
    pub rows: Vec<SignedRow>,
    pub warnings: Vec<PipelineWarning>,
}

/// Assign a sign to every row under the given ordering assumption.
///
/// `NewestFirst` keeps the input order. `Chronological` returns the rows
/// sorted ascending by date, ties kept in input order.
pub fn reconcile(rows: Vec<ParsedRow>, ordering: RowOrdering, rules: &RuleBook) -> Reconciled {
    match ordering {
        RowOrdering::NewestFirst => backward::reconcile(rows, rules),
        RowOrdering::Chronological => forward::reconcile(rows, rules),
    }
}

/// Guess the presentation order from the first and last dates.
///
/// Never called by `reconcile`; callers opt in (the CLI's `--order auto`).
pub fn detect_ordering(rows: &[ParsedRow]) -> RowOrdering {
    match (rows.first(), rows.last()) {
        (Some(first), Some(last)) if first.date < last.date => RowOrdering::Chronological,
        _ => RowOrdering::NewestFirst,
    }
}
