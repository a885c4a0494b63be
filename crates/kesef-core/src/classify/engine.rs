use crate::model::{SignedRow, Transaction, TransactionKind};
use crate::rules::schema::RuleBook;
use rust_decimal::Decimal;

/// Income if the amount is positive or the description carries an income
/// keyword, otherwise Expense.
pub fn classify(description: &str, amount: Decimal, rules: &RuleBook) -> TransactionKind {
    if amount > Decimal::ZERO {
        return TransactionKind::Income;
    }
    if rules
        .income_keywords
        .iter()
        .any(|k| description.contains(k.as_str()))
    {
        return TransactionKind::Income;
    }
    TransactionKind::Expense
}

/// First category whose keyword occurs in the description, in table order.
pub fn categorize<'a>(description: &str, rules: &'a RuleBook) -> &'a str {
    rules
        .categories
        .iter()
        .find(|c| description.contains(c.keyword.as_str()))
        .map(|c| c.category.as_str())
        .unwrap_or(rules.fallback_category.as_str())
}

/// Attach kind and category to a reconciled row.
pub fn to_transaction(signed: SignedRow, rules: &RuleBook) -> Transaction {
    let kind = classify(&signed.row.description, signed.amount, rules);
    let category = categorize(&signed.row.description, rules).to_string();

    Transaction {
        date: signed.row.date,
        description: signed.row.description,
        amount: signed.amount,
        balance: signed.row.balance,
        category,
        kind,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::builtin::load_preset;
    use crate::rules::parse_rulebook_str;
    use rust_decimal_macros::dec;

    #[test]
    fn test_positive_amount_is_income() {
        let rules = load_preset("leumi").unwrap();
        assert_eq!(classify("סופר", dec!(12.5), &rules), TransactionKind::Income);
    }

    #[test]
    fn test_income_keyword_overrides_sign() {
        let rules = load_preset("leumi").unwrap();
        assert_eq!(
            classify("העברת משכורת", dec!(-100), &rules),
            TransactionKind::Income
        );
    }

    #[test]
    fn test_negative_without_keyword_is_expense() {
        let rules = load_preset("leumi").unwrap();
        assert_eq!(classify("סופר", dec!(-12.5), &rules), TransactionKind::Expense);
        assert_eq!(classify("סופר", Decimal::ZERO, &rules), TransactionKind::Expense);
    }

    #[test]
    fn test_first_category_wins() {
        let rules = parse_rulebook_str(
            r#"{
                "name": "t",
                "version": "1",
                "fallback_category": "other",
                "categories": [
                    { "keyword": "ביטוח", "category": "insurance" },
                    { "keyword": "הראל", "category": "harel" }
                ]
            }"#,
        )
        .unwrap();
        assert_eq!(categorize("הראל ביטוח", &rules), "insurance");
        assert_eq!(categorize("הראל", &rules), "harel");
        assert_eq!(categorize("מכולת", &rules), "other");
    }

    #[test]
    fn test_leumi_categories() {
        let rules = load_preset("leumi").unwrap();
        assert_eq!(categorize("מכבי-י", &rules), "ביטוח בריאות");
        assert_eq!(categorize("העברת משכורת", &rules), "הכנסות עבודה");
        assert_eq!(categorize("קפה ומאפה", &rules), "אחר");
    }

    #[test]
    fn test_to_transaction() {
        use crate::model::{GrammarId, ParsedRow, SignSource};
        use chrono::NaiveDate;

        let rules = load_preset("leumi").unwrap();
        let signed = SignedRow {
            row: ParsedRow {
                index: 0,
                grammar: GrammarId::BalanceAmountDescriptionDate,
                date: NaiveDate::from_ymd_opt(2024, 2, 1).unwrap(),
                description: "מכבי-י".into(),
                reference: None,
                raw_amount: dec!(80),
                balance: dec!(920),
                sign_printed: false,
            },
            amount: dec!(-80),
            sign_source: SignSource::BalanceDelta,
        };
        let tx = to_transaction(signed, &rules);
        assert_eq!(tx.kind, TransactionKind::Expense);
        assert_eq!(tx.category, "ביטוח בריאות");
        assert_eq!(tx.amount, dec!(-80));
        assert_eq!(tx.balance, dec!(920));
    }
}
