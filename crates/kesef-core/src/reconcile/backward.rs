use super::Reconciled;
use crate::model::{ParsedRow, PipelineWarning, SignSource, SignedRow, TransactionKind};
use crate::rules::schema::RuleBook;
use rust_decimal::Decimal;

/// Newest-first statements: rows after `i` are older, so the balance
/// before row `i` is the first later balance that differs from it.
/// Rows whose sign the source prints keep it.
pub(super) fn reconcile(rows: Vec<ParsedRow>, rules: &RuleBook) -> Reconciled {
    let mut warnings = Vec::new();

    let decisions: Vec<(bool, SignSource)> = (0..rows.len())
        .map(|i| {
            let current = &rows[i];
            if current.sign_printed {
                return (current.raw_amount < Decimal::ZERO, SignSource::Printed);
            }
            let older = &rows[i + 1..];

            let delta = older
                .iter()
                .find(|o| o.balance != current.balance)
                .map(|o| (o, SignSource::BalanceDelta))
                .or_else(|| {
                    older
                        .iter()
                        .find(|o| o.date < current.date)
                        .map(|o| (o, SignSource::EarlierDate))
                })
                .and_then(|(older, source)| {
                    current
                        .balance
                        .checked_sub(older.balance)
                        .map(|delta| (delta, source))
                });

            match delta {
                Some((delta, source)) => (delta < Decimal::ZERO, source),
                None if !current.grammar.is_free_text() => {
                    (current.raw_amount < Decimal::ZERO, SignSource::Printed)
                }
                None => {
                    let kind = rules.sign_defaults.no_predecessor;
                    log::warn!(
                        "row {} ({}): no usable older balance, assuming {}",
                        current.index,
                        current.date,
                        kind
                    );
                    warnings.push(PipelineWarning {
                        row_index: Some(current.index),
                        message: format!("no usable older balance to compare against; assumed {kind}"),
                    });
                    (kind == TransactionKind::Expense, SignSource::Fallback)
                }
            }
        })
        .collect();

    let rows = rows
        .into_iter()
        .zip(decisions)
        .map(|(row, (negative, sign_source))| {
            let magnitude = row.raw_amount.abs();
            let amount = if negative { -magnitude } else { magnitude };
            SignedRow {
                row,
                amount,
                sign_source,
            }
        })
        .collect();

    Reconciled { rows, warnings }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reconcile::test_rows::row;
    use crate::rules::builtin::load_preset;
    use rust_decimal_macros::dec;

    #[test]
    fn test_balance_drop_is_debit() {
        let rules = load_preset("leumi").unwrap();
        let rows = vec![
            row(0, 12, "a", dec!(200), dec!(800)),
            row(1, 11, "b", dec!(0), dec!(1000)),
            row(2, 10, "c", dec!(500), dec!(1000)),
        ];
        let out = reconcile(rows, &rules);
        assert_eq!(out.rows[0].amount, dec!(-200));
        assert_eq!(out.rows[0].sign_source, SignSource::BalanceDelta);
    }

    #[test]
    fn test_balance_rise_is_credit() {
        let rules = load_preset("leumi").unwrap();
        let rows = vec![
            row(0, 12, "a", dec!(-300), dec!(1300)),
            row(1, 10, "b", dec!(50), dec!(1000)),
        ];
        let out = reconcile(rows, &rules);
        assert_eq!(out.rows[0].amount, dec!(300));
    }

    #[test]
    fn test_source_order_preserved() {
        let rules = load_preset("leumi").unwrap();
        let rows = vec![
            row(0, 12, "a", dec!(10), dec!(990)),
            row(1, 11, "b", dec!(10), dec!(1000)),
            row(2, 10, "c", dec!(10), dec!(1010)),
        ];
        let out = reconcile(rows, &rules);
        let order: Vec<usize> = out.rows.iter().map(|r| r.row.index).collect();
        assert_eq!(order, vec![0, 1, 2]);
    }

    #[test]
    fn test_equal_balance_uses_earlier_date() {
        let rules = load_preset("leumi").unwrap();
        let rows = vec![
            row(0, 12, "a", dec!(40), dec!(1000)),
            row(1, 10, "b", dec!(25), dec!(1000)),
        ];
        let out = reconcile(rows, &rules);
        assert_eq!(out.rows[0].sign_source, SignSource::EarlierDate);
        assert_eq!(out.rows[0].amount, dec!(40));
    }

    #[test]
    fn test_oldest_row_falls_back_and_warns() {
        let rules = load_preset("leumi").unwrap();
        let rows = vec![row(0, 10, "only", dec!(75), dec!(1000))];
        let out = reconcile(rows, &rules);
        assert_eq!(out.rows[0].amount, dec!(-75));
        assert_eq!(out.rows[0].sign_source, SignSource::Fallback);
        assert_eq!(out.warnings.len(), 1);
        assert_eq!(out.warnings[0].row_index, Some(0));
    }

    #[test]
    fn test_column_row_keeps_printed_sign() {
        use crate::model::GrammarId;

        let rules = load_preset("leumi").unwrap();
        let mut credit = row(0, 10, "only", dec!(75), dec!(1000));
        credit.grammar = GrammarId::Columns;
        let out = reconcile(vec![credit], &rules);
        assert_eq!(out.rows[0].amount, dec!(75));
        assert_eq!(out.rows[0].sign_source, SignSource::Printed);
        assert!(out.warnings.is_empty());
    }

    #[test]
    fn test_printed_debits_in_date_order() {
        let rules = load_preset("leumi").unwrap();
        let mut rows = vec![
            row(0, 1, "a", dec!(-80), dec!(1000)),
            row(1, 2, "b", dec!(-100), dec!(900)),
        ];
        for r in &mut rows {
            r.sign_printed = true;
        }
        let out = reconcile(rows, &rules);
        assert_eq!(out.rows[0].amount, dec!(-80));
        assert_eq!(out.rows[1].amount, dec!(-100));
        assert!(out.rows.iter().all(|r| r.sign_source == SignSource::Printed));
        assert!(out.warnings.is_empty());
    }

    #[test]
    fn test_extreme_balances_do_not_overflow() {
        let rules = load_preset("leumi").unwrap();
        let rows = vec![
            row(0, 12, "a", dec!(1), Decimal::MAX),
            row(1, 10, "b", dec!(1), Decimal::MIN),
        ];
        let out = reconcile(rows, &rules);
        assert_eq!(out.rows[0].sign_source, SignSource::Fallback);
        assert_eq!(out.rows[0].amount, dec!(-1));
        assert_eq!(out.warnings.len(), 2);
    }

    #[test]
    fn test_fallback_default_is_configurable() {
        let mut rules = load_preset("leumi").unwrap();
        rules.sign_defaults.no_predecessor = TransactionKind::Income;
        let out = reconcile(vec![row(0, 10, "only", dec!(75), dec!(1000))], &rules);
        assert_eq!(out.rows[0].amount, dec!(75));
    }
}
