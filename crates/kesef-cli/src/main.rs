mod commands;
mod output;

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "kesef",
    version,
    about = "Convert Hebrew bank statements (PDF, HTML, XLS) into clean transaction CSV"
)]
struct Cli {
    /// Log pipeline decisions (RUST_LOG overrides)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

/// Rulebook and parsing flags shared by `convert` and `parse`.
#[derive(clap::Args)]
struct InputArgs {
    /// Custom JSON rulebook (replaces the preset)
    #[arg(short, long = "rules", value_name = "FILE")]
    rules: Option<PathBuf>,

    /// Predefined rulebook
    #[arg(short, long = "preset", value_name = "NAME", default_value = "leumi")]
    preset: String,

    /// Process the input even if it does not look like a bank statement
    #[arg(long)]
    force: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Convert a statement into signed, categorized transactions
    Convert {
        /// Path to a PDF, text, HTML or spreadsheet statement
        input_file: PathBuf,

        /// Where to write the CSV (default: <input stem>_transactions.csv)
        output_file: Option<PathBuf>,

        /// Row order of the statement: newest-first (default), chronological or auto
        #[arg(long, default_value = "newest-first")]
        order: String,

        /// Output format: csv (default), json or table
        #[arg(short, long, default_value = "csv")]
        output: String,

        #[command(flatten)]
        input: InputArgs,
    },
    /// Show the rows recognized in a statement, before sign reconciliation
    Parse {
        /// Path to a PDF, text, HTML or spreadsheet statement
        input_file: PathBuf,

        /// Output format: table (default) or json
        #[arg(short, long, default_value = "table")]
        output: String,

        /// Write parsed output to a JSON file
        #[arg(short = 'O', long = "out", value_name = "FILE")]
        out: Option<PathBuf>,

        #[command(flatten)]
        input: InputArgs,
    },
    /// Manage and inspect rulebooks
    Rules {
        #[command(subcommand)]
        action: RulesAction,
    },
}

#[derive(Subcommand)]
enum RulesAction {
    /// List predefined rulebooks
    List,
    /// Explain a rulebook in plain language
    Explain {
        /// Preset name (e.g., "leumi")
        preset: String,
    },
    /// Print the JSON schema with field descriptions and example
    Schema,
    /// Validate a custom rulebook file
    Validate {
        /// Path to JSON rulebook file
        file: PathBuf,
    },
}

fn main() {
    let cli = Cli::parse();

    let level = if cli.verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();

    let result = match cli.command {
        Commands::Convert {
            input_file,
            output_file,
            order,
            output,
            input,
        } => commands::convert::run(input_file, output_file, &order, &output, &input),
        Commands::Parse {
            input_file,
            output,
            out,
            input,
        } => commands::parse::run(input_file, &output, out, &input),
        Commands::Rules { action } => match action {
            RulesAction::List => commands::rules::list(),
            RulesAction::Explain { preset } => commands::rules::explain(&preset),
            RulesAction::Schema => commands::rules::schema(),
            RulesAction::Validate { file } => commands::rules::validate(&file),
        },
    };

    if let Err(e) = result {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
