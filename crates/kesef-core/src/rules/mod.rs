pub mod builtin;
pub mod schema;

use crate::error::KesefError;
use schema::RuleBook;
use std::collections::HashSet;
use std::path::Path;

/// Load a rulebook from a JSON file.
pub fn load_rulebook(path: &Path) -> Result<RuleBook, KesefError> {
    let content = std::fs::read_to_string(path).map_err(|e| KesefError::RulebookLoad {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })?;
    parse_rulebook(&content, path)
}

/// Parse a rulebook from a JSON string.
pub fn parse_rulebook(json: &str, source: &Path) -> Result<RuleBook, KesefError> {
    let rulebook: RuleBook = serde_json::from_str(json).map_err(|e| KesefError::RulebookLoad {
        path: source.to_path_buf(),
        reason: e.to_string(),
    })?;
    validate_rulebook(&rulebook)?;
    Ok(rulebook)
}

/// Parse a rulebook from a JSON string (no file path context).
pub fn parse_rulebook_str(json: &str) -> Result<RuleBook, KesefError> {
    let rulebook: RuleBook = serde_json::from_str(json).map_err(KesefError::Json)?;
    validate_rulebook(&rulebook)?;
    Ok(rulebook)
}

/// Validate that a rulebook is well-formed.
pub fn validate_rulebook(rulebook: &RuleBook) -> Result<(), KesefError> {
    if rulebook.fallback_category.trim().is_empty() {
        return Err(KesefError::RulebookInvalid(
            "fallback_category must not be empty".into(),
        ));
    }
    if rulebook.default_description.trim().is_empty() {
        return Err(KesefError::RulebookInvalid(
            "default_description must not be empty".into(),
        ));
    }

    let mut seen = HashSet::new();
    for rule in &rulebook.categories {
        if rule.keyword.trim().is_empty() {
            return Err(KesefError::RulebookInvalid(format!(
                "category '{}' has an empty keyword",
                rule.category
            )));
        }
        if rule.category.trim().is_empty() {
            return Err(KesefError::RulebookInvalid(format!(
                "keyword '{}' maps to an empty category",
                rule.keyword
            )));
        }
        if !seen.insert(rule.keyword.as_str()) {
            return Err(KesefError::RulebookInvalid(format!(
                "keyword '{}' is listed twice in categories",
                rule.keyword
            )));
        }
    }

    let keyword_lists = [
        ("income_keywords", &rulebook.income_keywords),
        ("sign_hints.income", &rulebook.sign_hints.income),
        ("sign_hints.expense", &rulebook.sign_hints.expense),
        ("reversed_suffixes", &rulebook.reversed_suffixes),
    ];
    for (list_name, list) in keyword_lists {
        if list.iter().any(|k| k.trim().is_empty()) {
            return Err(KesefError::RulebookInvalid(format!(
                "{list_name} contains an empty entry"
            )));
        }
    }

    for t in &rulebook.translations {
        if t.raw.trim().is_empty() {
            return Err(KesefError::RulebookInvalid(format!(
                "translation to '{}' has an empty raw text",
                t.readable
            )));
        }
    }

    if rulebook
        .statement_indicators
        .iter()
        .any(|i| i.text.trim().is_empty())
    {
        return Err(KesefError::RulebookInvalid(
            "statement_indicators contains an empty entry".into(),
        ));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_valid_rulebook() {
        let json = r#"{
            "name": "Test",
            "version": "1.0",
            "fallback_category": "other",
            "categories": [
                { "keyword": "rent", "category": "Housing" }
            ],
            "income_keywords": ["salary"]
        }"#;
        let rb = parse_rulebook_str(json).unwrap();
        assert_eq!(rb.name, "Test");
        assert_eq!(rb.categories.len(), 1);
        assert!(rb.translations.is_empty());
        assert_eq!(rb.default_description, "תנועה");
        assert_eq!(
            rb.sign_defaults.no_predecessor,
            crate::model::TransactionKind::Expense
        );
    }

    #[test]
    fn test_empty_fallback_rejected() {
        let json = r#"{
            "name": "Bad",
            "version": "1.0",
            "fallback_category": " ",
            "categories": []
        }"#;
        assert!(parse_rulebook_str(json).is_err());
    }

    #[test]
    fn test_blank_default_description_rejected() {
        let json = r#"{
            "name": "Bad",
            "version": "1.0",
            "fallback_category": "other",
            "default_description": "",
            "categories": []
        }"#;
        assert!(parse_rulebook_str(json).is_err());
    }

    #[test]
    fn test_empty_keyword_rejected() {
        let json = r#"{
            "name": "Bad",
            "version": "1.0",
            "fallback_category": "other",
            "categories": [{ "keyword": "", "category": "Housing" }]
        }"#;
        assert!(parse_rulebook_str(json).is_err());
    }

    #[test]
    fn test_duplicate_keyword_rejected() {
        let json = r#"{
            "name": "Bad",
            "version": "1.0",
            "fallback_category": "other",
            "categories": [
                { "keyword": "rent", "category": "Housing" },
                { "keyword": "rent", "category": "Other" }
            ]
        }"#;
        assert!(parse_rulebook_str(json).is_err());
    }

    #[test]
    fn test_sign_defaults_override() {
        let json = r#"{
            "name": "Income-leaning",
            "version": "1.0",
            "fallback_category": "other",
            "categories": [],
            "sign_defaults": { "no_predecessor": "Income", "no_keyword": "Expense" }
        }"#;
        let rb = parse_rulebook_str(json).unwrap();
        assert_eq!(
            rb.sign_defaults.no_predecessor,
            crate::model::TransactionKind::Income
        );
    }
}
