use super::Reconciled;
use crate::model::{ParsedRow, PipelineWarning, SignSource, SignedRow, TransactionKind};
use crate::rules::schema::RuleBook;

/// Chronological statements: after a stable sort by date every amount is
/// the difference between consecutive balances. Rows whose sign the source
/// prints keep it. A row with no usable previous balance is signed from its
/// description.
pub(super) fn reconcile(mut rows: Vec<ParsedRow>, rules: &RuleBook) -> Reconciled {
    rows.sort_by_key(|r| r.date);

    let mut warnings = Vec::new();
    let mut signed: Vec<SignedRow> = Vec::with_capacity(rows.len());

    for row in rows {
        let difference = signed
            .last()
            .and_then(|prev| row.balance.checked_sub(prev.row.balance));

        let (amount, sign_source) = if row.sign_printed {
            (row.raw_amount, SignSource::Printed)
        } else if let Some(difference) = difference {
            (difference.round_dp(2), SignSource::BalanceDifference)
        } else if !row.grammar.is_free_text() {
            (row.raw_amount, SignSource::Printed)
        } else {
            let (kind, source) = match keyword_kind(&row.description, rules) {
                Some(kind) => (kind, SignSource::Keyword),
                None => {
                    let kind = rules.sign_defaults.no_keyword;
                    log::warn!(
                        "row '{}' has no usable previous balance and no sign hint, assuming {}",
                        row.description,
                        kind
                    );
                    warnings.push(PipelineWarning {
                        row_index: Some(row.index),
                        message: format!("no previous balance and no sign hint; assumed {kind}"),
                    });
                    (kind, SignSource::Fallback)
                }
            };
            let magnitude = row.raw_amount.abs();
            let amount = match kind {
                TransactionKind::Income => magnitude,
                TransactionKind::Expense => -magnitude,
            };
            (amount, source)
        };

        signed.push(SignedRow {
            row,
            amount,
            sign_source,
        });
    }

    Reconciled {
        rows: signed,
        warnings,
    }
}

/// Income hints are checked before expense hints; first hit wins.
fn keyword_kind(description: &str, rules: &RuleBook) -> Option<TransactionKind> {
    let hit = |list: &[String]| list.iter().any(|k| description.contains(k.as_str()));

    if hit(&rules.sign_hints.income) {
        Some(TransactionKind::Income)
    } else if hit(&rules.sign_hints.expense) {
        Some(TransactionKind::Expense)
    } else {
        None
    }
}
