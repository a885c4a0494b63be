pub mod columns;
pub mod dates;
pub mod direction;
pub mod grammar;
pub mod header;
pub mod values;

use crate::model::{ParsedRow, RawAmount, RawFields};
use crate::rules::schema::RuleBook;
use columns::ColumnLayout;
use dates::parse_date;
use direction::{repair, translate};
use grammar::match_line;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use values::{parse_amount, parse_cell_amount};

/// Rows recognized in one statement, in presentation order.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ParsedRows {
    pub rows: Vec<ParsedRow>,
    pub skipped: Vec<SkippedRow>,
}

/// A raw row that was dropped before reconciliation, and why.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SkippedRow {
    pub row_text: String,
    pub reason: String,
}

/// Run the grammar matcher and normalizers over free-text lines.
pub fn parse_lines<S: AsRef<str>>(lines: &[S], rules: &RuleBook) -> ParsedRows {
    let mut parsed = ParsedRows::default();

    for line in lines {
        let line = line.as_ref().trim();
        if line.is_empty() {
            continue;
        }

        let Some(fields) = match_line(line) else {
            parsed.skipped.push(SkippedRow {
                row_text: line.to_string(),
                reason: "no row grammar matched".into(),
            });
            continue;
        };

        log::debug!("matched {} grammar: {}", fields.grammar, line);
        push_row(&mut parsed, line, fields, rules);
    }

    parsed
}

/// Run the column layout and normalizers over pre-split table rows.
/// Header rows are dropped without counting as skipped.
pub fn parse_table(rows: &[Vec<String>], layout: ColumnLayout, rules: &RuleBook) -> ParsedRows {
    let mut parsed = ParsedRows::default();

    for cells in rows {
        if cells.iter().all(|c| c.trim().is_empty()) || columns::is_header_row(cells) {
            continue;
        }
        let row_text = cells.join(" | ");

        let Some(fields) = layout.read_row(cells) else {
            parsed.skipped.push(SkippedRow {
                row_text,
                reason: "row has fewer cells than the column layout".into(),
            });
            continue;
        };

        push_row(&mut parsed, &row_text, fields, rules);
    }

    parsed
}

fn push_row(parsed: &mut ParsedRows, row_text: &str, fields: RawFields, rules: &RuleBook) {
    let index = parsed.rows.len();
    match build_row(index, fields, rules) {
        Ok(row) => parsed.rows.push(row),
        Err(reason) => {
            log::debug!("skipped row '{}': {}", row_text, reason);
            parsed.skipped.push(SkippedRow {
                row_text: row_text.to_string(),
                reason,
            });
        }
    }
}

/// Normalize one matched field tuple into a typed row.
pub fn build_row(index: usize, fields: RawFields, rules: &RuleBook) -> Result<ParsedRow, String> {
    let date = parse_date(&fields.date).ok_or_else(|| format!("unparseable date '{}'", fields.date))?;

    let raw_amount = match &fields.amount {
        RawAmount::Single(s) => parse_amount(s).ok_or_else(|| format!("unparseable amount '{s}'"))?,
        RawAmount::DebitCredit { debit, credit } => debit_credit_amount(debit, credit)?,
    };

    let balance = parse_amount(&fields.balance)
        .ok_or_else(|| format!("unparseable balance '{}'", fields.balance))?;

    let sign_printed = matches!(fields.amount, RawAmount::DebitCredit { .. });

    let description = if fields.grammar.is_free_text() {
        repair(&fields.description, &rules.reversed_suffixes)
    } else if fields.description.trim().is_empty() {
        rules.default_description.clone()
    } else {
        fields.description.clone()
    };
    let description = translate(&description, &rules.translations);

    Ok(ParsedRow {
        index,
        grammar: fields.grammar,
        date,
        description,
        reference: fields.reference,
        raw_amount,
        balance,
        sign_printed,
    })
}

/// A debit shows as a negative amount, a credit as a positive one.
fn debit_credit_amount(debit: &str, credit: &str) -> Result<Decimal, String> {
    let debit = parse_cell_amount(debit).ok_or_else(|| format!("unparseable debit '{debit}'"))?;
    let credit = parse_cell_amount(credit).ok_or_else(|| format!("unparseable credit '{credit}'"))?;

    if !debit.is_zero() {
        Ok(-debit.abs())
    } else if !credit.is_zero() {
        Ok(credit.abs())
    } else {
        Err("neither debit nor credit carries an amount".into())
    }
}
