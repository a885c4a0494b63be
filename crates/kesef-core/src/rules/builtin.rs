use crate::error::KesefError;
use crate::rules::schema::RuleBook;

const LEUMI_JSON: &str = include_str!("../../../../rules/leumi.json");

/// Available predefined rulebooks.
pub const PRESETS: &[&str] = &["leumi"];

/// Preset used when the caller names none.
pub const DEFAULT_PRESET: &str = "leumi";

/// Load a predefined rulebook by name.
pub fn load_preset(name: &str) -> Result<RuleBook, KesefError> {
    match name {
        "leumi" => {
            let rulebook: RuleBook = serde_json::from_str(LEUMI_JSON)?;
            Ok(rulebook)
        }
        _ => Err(KesefError::RulebookInvalid(format!(
            "unknown preset '{}'. Available: {}",
            name,
            PRESETS.join(", ")
        ))),
    }
}
