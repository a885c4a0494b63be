pub mod classify;
pub mod error;
pub mod export;
pub mod extraction;
pub mod model;
pub mod parsing;
pub mod reconcile;
pub mod rules;
pub mod validate;

use error::KesefError;
use extraction::PdfExtractor;
use model::{NormalizedStatement, RowOrdering};
use parsing::columns::ColumnLayout;
use parsing::header::{scan_header, StatementHeader, MIN_TABLE_INDICATORS, MIN_TEXT_INDICATORS};
use parsing::ParsedRows;
use rules::schema::RuleBook;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Inputs larger than this are refused before any parsing.
pub const MAX_INPUT_BYTES: u64 = 50 * 1024 * 1024;

/// Options for a pipeline run.
#[derive(Debug, Clone, Copy)]
pub struct NormalizeOptions {
    /// Presentation order of the rows. `None` guesses it from the first
    /// and last dates.
    pub ordering: Option<RowOrdering>,
    /// Skip the statement indicator check.
    pub force: bool,
}

impl Default for NormalizeOptions {
    fn default() -> Self {
        Self {
            ordering: Some(RowOrdering::NewestFirst),
            force: false,
        }
    }
}

/// Recognized rows of one statement, before sign reconciliation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ParsedStatement {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bank: Option<String>,
    #[serde(flatten)]
    pub rows: ParsedRows,
}

/// The kinds of file the pipeline reads.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputKind {
    Pdf,
    Text,
    Html,
    Spreadsheet,
}

impl InputKind {
    /// Decide the input kind from a file extension.
    pub fn from_path(path: &Path) -> Result<InputKind, KesefError> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or_default()
            .to_ascii_lowercase();

        match ext.as_str() {
            "pdf" => Ok(InputKind::Pdf),
            "txt" => Ok(InputKind::Text),
            "html" | "htm" => Ok(InputKind::Html),
            "xls" | "xlsx" | "xlsm" | "xlsb" | "ods" => Ok(InputKind::Spreadsheet),
            _ => Err(KesefError::UnsupportedInput(format!(
                "'{}': expected .pdf, .txt, .html, .xls or .xlsx",
                path.display()
            ))),
        }
    }
}

/// Read and recognize rows from raw file bytes of the given kind.
pub fn read_input(
    bytes: &[u8],
    kind: InputKind,
    extractor: &dyn PdfExtractor,
    rules: &RuleBook,
    force: bool,
) -> Result<ParsedStatement, KesefError> {
    match kind {
        InputKind::Pdf => read_pdf(bytes, extractor, rules, force),
        InputKind::Text => read_text(&String::from_utf8_lossy(bytes), rules, force),
        InputKind::Html => read_html(&String::from_utf8_lossy(bytes), rules, force),
        InputKind::Spreadsheet => read_spreadsheet(bytes, rules, force),
    }
}

/// Extract a PDF's text and recognize its rows.
pub fn read_pdf(
    pdf_bytes: &[u8],
    extractor: &dyn PdfExtractor,
    rules: &RuleBook,
    force: bool,
) -> Result<ParsedStatement, KesefError> {
    check_size(pdf_bytes.len())?;

    let pages = extractor.extract_pages(pdf_bytes)?;
    let lines: Vec<String> = pages.into_iter().flat_map(|p| p.lines).collect();
    if lines.iter().all(|l| l.trim().is_empty()) {
        return Err(KesefError::NoData(format!(
            "{} returned no text; the PDF may be scanned images",
            extractor.backend_name()
        )));
    }

    let header = check_statement(&lines.join("\n"), MIN_TEXT_INDICATORS, rules, force)?;
    let mut parsed = read_lines(&lines, rules);
    parsed.bank = header.bank;
    Ok(parsed)
}

/// Recognize rows in extracted statement text.
pub fn read_text(text: &str, rules: &RuleBook, force: bool) -> Result<ParsedStatement, KesefError> {
    check_size(text.len())?;
    if text.trim().is_empty() {
        return Err(KesefError::NoData("input text is empty".into()));
    }
    let header = check_statement(text, MIN_TEXT_INDICATORS, rules, force)?;

    let lines: Vec<&str> = text.lines().collect();
    let mut parsed = read_lines(&lines, rules);
    parsed.bank = header.bank;
    Ok(parsed)
}

/// Recognize rows in statement lines. No statement check is made.
pub fn read_lines<S: AsRef<str>>(lines: &[S], rules: &RuleBook) -> ParsedStatement {
    let text = lines
        .iter()
        .map(|l| l.as_ref())
        .collect::<Vec<_>>()
        .join("\n");

    ParsedStatement {
        bank: scan_header(&text, rules).bank,
        rows: parsing::parse_lines(lines, rules),
    }
}

/// Recognize rows in pre-split table rows. The column layout follows the
/// widest row. No statement check is made.
pub fn read_table(rows: &[Vec<String>], rules: &RuleBook) -> ParsedStatement {
    let layout = ColumnLayout::detect(rows);
    let text = rows
        .iter()
        .map(|r| r.join(" "))
        .collect::<Vec<_>>()
        .join("\n");

    ParsedStatement {
        bank: scan_header(&text, rules).bank,
        rows: parsing::parse_table(rows, layout, rules),
    }
}

/// Recognize rows in an HTML statement export.
pub fn read_html(html: &str, rules: &RuleBook, force: bool) -> Result<ParsedStatement, KesefError> {
    check_size(html.len())?;

    let header = check_statement(
        &extraction::html::document_text(html),
        MIN_TABLE_INDICATORS,
        rules,
        force,
    )?;
    let rows = extraction::html::extract_table_rows(html)?;

    let mut parsed = read_table(&rows, rules);
    parsed.bank = header.bank.or(parsed.bank);
    Ok(parsed)
}

/// Recognize rows in a spreadsheet export. HTML saved under a spreadsheet
/// extension is routed to the HTML reader.
pub fn read_spreadsheet(
    bytes: &[u8],
    rules: &RuleBook,
    force: bool,
) -> Result<ParsedStatement, KesefError> {
    check_size(bytes.len())?;

    if looks_like_html(bytes) {
        log::info!("spreadsheet input is HTML, reading it as a table export");
        return read_html(&String::from_utf8_lossy(bytes), rules, force);
    }

    let rows = extraction::spreadsheet::extract_sheet_rows(bytes)?;
    if rows.is_empty() {
        return Err(KesefError::NoData("first worksheet is empty".into()));
    }
    let text = rows
        .iter()
        .map(|r| r.join(" "))
        .collect::<Vec<_>>()
        .join("\n");
    check_statement(&text, MIN_TABLE_INDICATORS, rules, force)?;

    Ok(read_table(&rows, rules))
}

/// Reconcile, classify and validate recognized rows.
pub fn normalize(
    parsed: ParsedStatement,
    rules: &RuleBook,
    options: &NormalizeOptions,
) -> Result<NormalizedStatement, KesefError> {
    let ParsedStatement { bank, rows } = parsed;
    let skipped_rows = rows.skipped.len();

    if rows.rows.is_empty() {
        return Err(KesefError::NoTransactions(format!(
            "no line matched a known statement layout ({skipped_rows} skipped)"
        )));
    }
    log::info!(
        "recognized {} row(s), skipped {}",
        rows.rows.len(),
        skipped_rows
    );

    let ordering = options.ordering.unwrap_or_else(|| {
        let detected = reconcile::detect_ordering(&rows.rows);
        log::info!("detected {detected} row order");
        detected
    });

    let reconciled = reconcile::reconcile(rows.rows, ordering, rules);
    let transactions = reconciled
        .rows
        .into_iter()
        .map(|signed| classify::to_transaction(signed, rules))
        .collect();

    let report = validate::validate(transactions);
    if report.dropped > 0 {
        log::warn!("validation dropped {} record(s)", report.dropped);
    }
    if report.kept.is_empty() {
        return Err(KesefError::NoTransactions(format!(
            "all {} record(s) failed validation",
            report.dropped
        )));
    }
    log::info!("{} transaction(s) ready", report.kept.len());

    Ok(NormalizedStatement {
        bank,
        ordering,
        transactions: report.kept,
        skipped_rows,
        dropped_rows: report.dropped,
        warnings: reconciled.warnings,
    })
}

/// Full pipeline over a PDF.
pub fn normalize_pdf(
    pdf_bytes: &[u8],
    extractor: &dyn PdfExtractor,
    rules: &RuleBook,
    options: &NormalizeOptions,
) -> Result<NormalizedStatement, KesefError> {
    normalize(read_pdf(pdf_bytes, extractor, rules, options.force)?, rules, options)
}

/// Full pipeline over extracted statement text.
pub fn normalize_text(
    text: &str,
    rules: &RuleBook,
    options: &NormalizeOptions,
) -> Result<NormalizedStatement, KesefError> {
    normalize(read_text(text, rules, options.force)?, rules, options)
}

/// Full pipeline over statement lines.
pub fn normalize_lines<S: AsRef<str>>(
    lines: &[S],
    rules: &RuleBook,
    options: &NormalizeOptions,
) -> Result<NormalizedStatement, KesefError> {
    normalize(read_lines(lines, rules), rules, options)
}

/// Full pipeline over pre-split table rows.
pub fn normalize_table(
    rows: &[Vec<String>],
    rules: &RuleBook,
    options: &NormalizeOptions,
) -> Result<NormalizedStatement, KesefError> {
    normalize(read_table(rows, rules), rules, options)
}

/// Full pipeline over an HTML export.
pub fn normalize_html(
    html: &str,
    rules: &RuleBook,
    options: &NormalizeOptions,
) -> Result<NormalizedStatement, KesefError> {
    normalize(read_html(html, rules, options.force)?, rules, options)
}

/// Full pipeline over a spreadsheet export.
pub fn normalize_spreadsheet(
    bytes: &[u8],
    rules: &RuleBook,
    options: &NormalizeOptions,
) -> Result<NormalizedStatement, KesefError> {
    normalize(read_spreadsheet(bytes, rules, options.force)?, rules, options)
}

fn check_size(len: usize) -> Result<(), KesefError> {
    let size = len as u64;
    if size > MAX_INPUT_BYTES {
        return Err(KesefError::FileTooLarge {
            size,
            limit: MAX_INPUT_BYTES,
        });
    }
    Ok(())
}

fn check_statement(
    text: &str,
    min_hits: usize,
    rules: &RuleBook,
    force: bool,
) -> Result<StatementHeader, KesefError> {
    let header = scan_header(text, rules);
    if !header.looks_like_statement(min_hits) {
        if !force {
            return Err(KesefError::NotAStatement(format!(
                "found {} of {} required indicator word(s)",
                header.indicators.len(),
                min_hits
            )));
        }
        log::warn!("statement indicators not found, continuing because of --force");
    }
    if let Some(bank) = &header.bank {
        log::info!("detected bank: {bank}");
    }
    Ok(header)
}

fn looks_like_html(bytes: &[u8]) -> bool {
    let head = String::from_utf8_lossy(&bytes[..bytes.len().min(512)]).to_lowercase();
    let head = head.trim_start_matches('\u{feff}').trim_start();
    head.starts_with('<') && (head.contains("<html") || head.contains("<table") || head.starts_with("<!doctype"))
}
