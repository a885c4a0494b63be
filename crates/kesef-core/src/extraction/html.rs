use crate::error::KesefError;
use crate::parsing::columns::is_header_row;
use scraper::{ElementRef, Html, Selector};
use std::sync::LazyLock;

static TABLE: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("table").expect("valid selector"));
static ROW: LazyLock<Selector> = LazyLock::new(|| Selector::parse("tr").expect("valid selector"));
static EXCEL_HEADER: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("td.xlHeader").expect("valid selector"));

/// Cell texts of the transaction table in an HTML statement export.
///
/// Bank "xls" downloads are often HTML saved with an Excel extension. The
/// transaction table is the first `<table>` holding a header row or cells
/// marked `xlHeader`. Rows with no text are dropped.
pub fn extract_table_rows(html: &str) -> Result<Vec<Vec<String>>, KesefError> {
    let doc = Html::parse_document(html);

    let table = doc
        .select(&TABLE)
        .find(|t| {
            t.select(&EXCEL_HEADER).next().is_some()
                || t.select(&ROW).any(|tr| is_header_row(&row_cells(tr)))
        })
        .ok_or_else(|| KesefError::NoData("no transaction table found in HTML".into()))?;

    let rows: Vec<Vec<String>> = table
        .select(&ROW)
        .map(row_cells)
        .filter(|cells| cells.iter().any(|c| !c.is_empty()))
        .collect();

    log::debug!("HTML table has {} non-empty row(s)", rows.len());
    Ok(rows)
}

/// The document's visible text, for statement indicator scanning.
pub fn document_text(html: &str) -> String {
    let doc = Html::parse_document(html);
    doc.root_element().text().collect::<Vec<_>>().join(" ")
}

fn row_cells(tr: ElementRef<'_>) -> Vec<String> {
    tr.children()
        .filter_map(ElementRef::wrap)
        .filter(|cell| {
            let name = cell.value().name();
            name.eq_ignore_ascii_case("td") || name.eq_ignore_ascii_case("th")
        })
        .map(|cell| normalize_ws(&cell.text().collect::<Vec<_>>().join(" ")))
        .collect()
}

fn normalize_ws(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}
