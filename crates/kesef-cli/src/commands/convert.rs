use kesef_core::error::KesefError;
use kesef_core::model::RowOrdering;
use kesef_core::NormalizeOptions;
use std::fs::File;
use std::io::BufWriter;
use std::path::{Path, PathBuf};

use crate::output;
use crate::InputArgs;

pub fn run(
    input_file: PathBuf,
    output_file: Option<PathBuf>,
    order: &str,
    output_format: &str,
    args: &InputArgs,
) -> Result<(), KesefError> {
    let ordering = match order.trim().to_lowercase().as_str() {
        "auto" => None,
        other => Some(RowOrdering::from_str_loose(other).ok_or_else(|| {
            KesefError::UnsupportedInput(format!(
                "unknown order '{order}': use newest-first, chronological or auto"
            ))
        })?),
    };
    let options = NormalizeOptions {
        ordering,
        force: args.force,
    };

    let rules = super::load_rules(args)?;
    let parsed = super::read_statement(&input_file, &rules, options.force)?;
    let statement = kesef_core::normalize(parsed, &rules, &options)?;

    match output_format {
        "json" => match output_file {
            Some(path) => {
                std::fs::write(&path, serde_json::to_string_pretty(&statement)?)?;
                eprintln!("Wrote {}", path.display());
            }
            None => output::json::print(&statement)?,
        },
        "table" => output::table::print_statement(&statement),
        _ => {
            let path = output_file.unwrap_or_else(|| default_output_path(&input_file));
            let writer = BufWriter::new(File::create(&path)?);
            kesef_core::export::write_csv(writer, &statement.transactions)?;
            eprintln!("Wrote {}", path.display());
        }
    }

    output::table::print_summary(&statement);
    Ok(())
}

/// `statement.pdf` becomes `statement_transactions.csv` next to the input.
fn default_output_path(input_file: &Path) -> PathBuf {
    let stem = input_file
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "statement".into());
    input_file.with_file_name(format!("{stem}_transactions.csv"))
}
