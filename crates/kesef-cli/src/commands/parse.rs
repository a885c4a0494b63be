use kesef_core::error::KesefError;
use std::path::PathBuf;

use crate::output;
use crate::InputArgs;

pub fn run(
    input_file: PathBuf,
    output_format: &str,
    output_file: Option<PathBuf>,
    args: &InputArgs,
) -> Result<(), KesefError> {
    let rules = super::load_rules(args)?;
    let parsed = super::read_statement(&input_file, &rules, args.force)?;

    match output_file {
        Some(path) => {
            // Always write JSON when saving to file
            let json = serde_json::to_string_pretty(&parsed)?;
            std::fs::write(&path, json)?;
            eprintln!(
                "Parsed {} row(s), written to {}",
                parsed.rows.rows.len(),
                path.display()
            );
            if !parsed.rows.skipped.is_empty() {
                eprintln!("  {} line(s) skipped during parsing", parsed.rows.skipped.len());
            }
        }
        None => {
            let output_str = match output_format {
                "json" => serde_json::to_string_pretty(&parsed)?,
                _ => output::table::format_parsed(&parsed),
            };
            println!("{output_str}");
        }
    }

    Ok(())
}
