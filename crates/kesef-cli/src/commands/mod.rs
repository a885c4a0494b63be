pub mod convert;
pub mod parse;
pub mod rules;

use crate::InputArgs;
use kesef_core::error::KesefError;
use kesef_core::extraction::pdftotext::PdftotextExtractor;
use kesef_core::rules::builtin;
use kesef_core::rules::schema::RuleBook;
use kesef_core::{InputKind, ParsedStatement};
use std::path::Path;

/// The custom rulebook if one was given, otherwise the named preset.
pub fn load_rules(args: &InputArgs) -> Result<RuleBook, KesefError> {
    let rules = match &args.rules {
        Some(path) => kesef_core::rules::load_rulebook(path)?,
        None => builtin::load_preset(&args.preset)?,
    };
    log::debug!("using rulebook '{}' v{}", rules.name, rules.version);
    Ok(rules)
}

/// Read the input file and recognize its rows.
pub fn read_statement(
    input_file: &Path,
    rules: &RuleBook,
    force: bool,
) -> Result<ParsedStatement, KesefError> {
    let kind = InputKind::from_path(input_file)?;

    let size = std::fs::metadata(input_file)?.len();
    if size > kesef_core::MAX_INPUT_BYTES {
        return Err(KesefError::FileTooLarge {
            size,
            limit: kesef_core::MAX_INPUT_BYTES,
        });
    }

    let bytes = std::fs::read(input_file)?;
    let extractor = PdftotextExtractor::new();
    kesef_core::read_input(&bytes, kind, &extractor, rules, force)
}
