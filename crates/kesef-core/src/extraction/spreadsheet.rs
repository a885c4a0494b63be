use crate::error::KesefError;
use calamine::{Data, Reader};
use std::io::Cursor;

/// Cell texts of the first worksheet of a binary xls/xlsx export.
///
/// Date cells are written `dd/mm/yyyy` so they go through the same date
/// normalizer as text. Fully empty rows are dropped.
pub fn extract_sheet_rows(bytes: &[u8]) -> Result<Vec<Vec<String>>, KesefError> {
    let mut workbook = calamine::open_workbook_auto_from_rs(Cursor::new(bytes))
        .map_err(|e| KesefError::Extraction(format!("failed to open spreadsheet: {e}")))?;

    let range = workbook
        .worksheet_range_at(0)
        .ok_or_else(|| KesefError::NoData("spreadsheet has no worksheets".into()))?
        .map_err(|e| KesefError::Extraction(format!("failed to read first worksheet: {e}")))?;

    let rows: Vec<Vec<String>> = range
        .rows()
        .map(|row| row.iter().map(cell_text).collect::<Vec<_>>())
        .filter(|cells| cells.iter().any(|c| !c.is_empty()))
        .collect();

    log::debug!("worksheet has {} non-empty row(s)", rows.len());
    Ok(rows)
}

fn cell_text(cell: &Data) -> String {
    match cell {
        Data::String(s) => s.trim().to_string(),
        Data::Float(f) => format!("{f}"),
        Data::Int(i) => i.to_string(),
        Data::DateTime(dt) => dt
            .as_datetime()
            .map(|d| d.format("%d/%m/%Y").to_string())
            .unwrap_or_else(|| dt.to_string()),
        Data::DateTimeIso(s) => s.clone(),
        Data::Empty => String::new(),
        other => other.to_string(),
    }
}
