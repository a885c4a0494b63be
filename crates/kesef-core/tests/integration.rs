//! Integration tests for the normalize_* pipeline.
//!
//! Uses a MockExtractor that returns pre-built PageContent without
//! invoking pdftotext, so these tests run without poppler-utils.

use kesef_core::error::KesefError;
use kesef_core::export::write_csv;
use kesef_core::extraction::{PageContent, PdfExtractor};
use kesef_core::model::{RowOrdering, TransactionKind};
use kesef_core::rules::builtin::load_preset;
use kesef_core::{normalize_html, normalize_pdf, normalize_table, read_pdf, NormalizeOptions};
use rust_decimal_macros::dec;

struct MockExtractor {
    pages: Vec<PageContent>,
}

impl PdfExtractor for MockExtractor {
    fn extract_pages(&self, _pdf_bytes: &[u8]) -> Result<Vec<PageContent>, KesefError> {
        Ok(self.pages.clone())
    }

    fn backend_name(&self) -> &str {
        "mock"
    }
}

fn page(number: usize, lines: &[&str]) -> PageContent {
    PageContent {
        page_number: number,
        lines: lines.iter().map(|s| s.to_string()).collect(),
    }
}

// ---------------------------------------------------------------------------
// Newest-first statement with reversed Hebrew text, two pages
// ---------------------------------------------------------------------------
#[test]
fn newest_first_statement_signs_from_balance() {
    let rules = load_preset("leumi").unwrap();
    let extractor = MockExtractor {
        pages: vec![
            page(
                1,
                &[
                    "ימואל קנב",
                    "ןובשחב תועונת",
                    "  הרתי     םוכס     רואית     ךיראת",
                    "  4,870.50   80.00   י-יבכמ   15/03/24",
                    "  4,950.50   5,000.00   תרוכשמ תרבעה   10/03/24",
                ],
            ),
            page(
                2,
                &[
                    "  -49.50   1,249.50   י-יארשא יסיטרכ   02/03/24",
                    "  1,200.00   30.00   ק\"זוע תיבר   01/03/24",
                    "1 דומע",
                ],
            ),
        ],
    };

    let out = normalize_pdf(&[], &extractor, &rules, &NormalizeOptions::default()).unwrap();

    assert_eq!(out.bank.as_deref(), Some("Bank Leumi"));
    assert_eq!(out.ordering, RowOrdering::NewestFirst);
    assert_eq!(out.transactions.len(), 4);

    let maccabi = &out.transactions[0];
    assert_eq!(maccabi.description, "מכבי-י");
    assert_eq!(maccabi.amount, dec!(-80.00));
    assert_eq!(maccabi.category, "ביטוח בריאות");
    assert_eq!(maccabi.kind, TransactionKind::Expense);

    let salary = &out.transactions[1];
    assert_eq!(salary.description, "העברת משכורת");
    assert_eq!(salary.amount, dec!(5000.00));
    assert_eq!(salary.kind, TransactionKind::Income);
    assert_eq!(salary.category, "הכנסות עבודה");

    let cards = &out.transactions[2];
    assert_eq!(cards.description, "כרטיסי אשראי-י");
    assert_eq!(cards.amount, dec!(-1249.50));
    assert_eq!(cards.category, "כרטיסי אשראי");

    // Oldest row has nothing to compare to.
    assert_eq!(out.warnings.len(), 1);
    assert_eq!(out.transactions[3].amount, dec!(-30.00));
}

// ---------------------------------------------------------------------------
// Chronological ordering re-sorts and uses balance differences
// ---------------------------------------------------------------------------
#[test]
fn chronological_statement_uses_balance_differences() {
    let rules = load_preset("leumi").unwrap();
    let extractor = MockExtractor {
        pages: vec![page(
            1,
            &[
                "בנק לאומי",
                "1,150.00 50.00 מכבי 03/01/24",
                "1,000.00 1,000.00 העברת משכורת 01/01/24",
                "1,200.00 200.00 הפקדת מזומן 02/01/24",
            ],
        )],
    };
    let options = NormalizeOptions {
        ordering: Some(RowOrdering::Chronological),
        force: false,
    };

    let out = normalize_pdf(&[], &extractor, &rules, &options).unwrap();

    let dates: Vec<String> = out
        .transactions
        .iter()
        .map(|t| t.date.format("%d/%m").to_string())
        .collect();
    assert_eq!(dates, vec!["01/01", "02/01", "03/01"]);

    let amounts: Vec<_> = out.transactions.iter().map(|t| t.amount).collect();
    assert_eq!(amounts, vec![dec!(1000.00), dec!(200.00), dec!(-50.00)]);
    assert!(out.warnings.is_empty());
}

// ---------------------------------------------------------------------------
// Out-of-range records are dropped and counted
// ---------------------------------------------------------------------------
#[test]
fn implausible_amounts_dropped() {
    let rules = load_preset("leumi").unwrap();
    let extractor = MockExtractor {
        pages: vec![page(
            1,
            &[
                "תנועות בחשבון",
                "1,000.00 50.00 מכבי 03/01/24",
                "1,050.00 1,000,000,001.00 טעות 02/01/24",
                "1,050.00 20.00 עמלות 01/01/24",
            ],
        )],
    };

    let out = normalize_pdf(&[], &extractor, &rules, &NormalizeOptions::default()).unwrap();
    assert_eq!(out.transactions.len(), 2);
    assert_eq!(out.dropped_rows, 1);
}

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------
#[test]
fn empty_pdf_text_is_no_data() {
    let rules = load_preset("leumi").unwrap();
    let extractor = MockExtractor {
        pages: vec![page(1, &["", "   "])],
    };
    let err = normalize_pdf(&[], &extractor, &rules, &NormalizeOptions::default()).unwrap_err();
    assert!(matches!(err, KesefError::NoData(_)));
}

#[test]
fn unrelated_pdf_rejected_unless_forced() {
    let rules = load_preset("leumi").unwrap();
    let extractor = MockExtractor {
        pages: vec![page(1, &["Invoice #4411", "1,000.00 25.00 widgets 03/01/24"])],
    };

    let err = normalize_pdf(&[], &extractor, &rules, &NormalizeOptions::default()).unwrap_err();
    assert!(matches!(err, KesefError::NotAStatement(_)));

    let forced = NormalizeOptions {
        force: true,
        ..Default::default()
    };
    let out = normalize_pdf(&[], &extractor, &rules, &forced).unwrap();
    assert_eq!(out.transactions.len(), 1);
    assert_eq!(out.skipped_rows, 1);
}

#[test]
fn statement_without_rows_is_no_transactions() {
    let rules = load_preset("leumi").unwrap();
    let extractor = MockExtractor {
        pages: vec![page(1, &["בנק לאומי", "אין תנועות לתקופה זו"])],
    };
    let err = normalize_pdf(&[], &extractor, &rules, &NormalizeOptions::default()).unwrap_err();
    assert!(matches!(err, KesefError::NoTransactions(_)));
}

// ---------------------------------------------------------------------------
// Recognition without reconciliation
// ---------------------------------------------------------------------------
#[test]
fn read_pdf_reports_rows_and_skips() {
    let rules = load_preset("leumi").unwrap();
    let extractor = MockExtractor {
        pages: vec![page(
            1,
            &[
                "בנק לאומי",
                "12,450.30 1,200.00 120 העברת משכורת 09/03/24 10/03/24",
                "not a row",
            ],
        )],
    };
    let parsed = read_pdf(&[], &extractor, &rules, false).unwrap();
    assert_eq!(parsed.rows.rows.len(), 1);
    assert_eq!(parsed.rows.rows[0].reference.as_deref(), Some("120"));
    assert_eq!(parsed.rows.skipped.len(), 2);
}

// ---------------------------------------------------------------------------
// Table inputs
// ---------------------------------------------------------------------------
fn cells(values: &[&str]) -> Vec<String> {
    values.iter().map(|s| s.to_string()).collect()
}

#[test]
fn seven_column_table() {
    let rules = load_preset("leumi").unwrap();
    let rows = vec![
        cells(&["תאריך", "תאריך ערך", "תיאור", "אסמכתא", "בחובה", "בזכות", "היתרה בש\"ח"]),
        cells(&["05/02/24", "05/02/24", "מכבי", "11", "80.00", "", "5,920.00"]),
        cells(&["02/02/24", "02/02/24", "העברת משכורת", "12", "", "5,000.00", "6,000.00"]),
    ];

    let out = normalize_table(&rows, &rules, &NormalizeOptions::default()).unwrap();
    assert_eq!(out.transactions.len(), 2);
    assert_eq!(out.transactions[0].amount, dec!(-80.00));
    assert_eq!(out.transactions[0].balance, dec!(5920.00));
    assert_eq!(out.transactions[1].amount, dec!(5000.00));
    assert_eq!(out.transactions[1].kind, TransactionKind::Income);
    assert!(out.warnings.is_empty());
}

#[test]
fn html_export_to_csv() {
    let rules = load_preset("leumi").unwrap();
    let html = r#"<html><body>
<p>בנק לאומי - תנועות בחשבון</p>
<table>
<tr><td class="xlHeader">תאריך</td><td class="xlHeader">תאריך ערך</td><td class="xlHeader">תיאור</td>
<td class="xlHeader">אסמכתא</td><td class="xlHeader">בחובה</td><td class="xlHeader">בזכות</td>
<td class="xlHeader">היתרה בש"ח</td></tr>
<tr><td>05/02/2024</td><td>05/02/2024</td><td>הוראת קבע</td><td>7</td><td>1,200.00</td><td></td><td>3,800.00</td></tr>
<tr><td>01/02/2024</td><td>01/02/2024</td><td>רבית זכות</td><td>8</td><td></td><td>0.35</td><td>5,000.00</td></tr>
</table></body></html>"#;

    let out = normalize_html(html, &rules, &NormalizeOptions::default()).unwrap();
    assert_eq!(out.bank.as_deref(), Some("Bank Leumi"));
    assert_eq!(out.transactions[0].category, "תשלומים קבועים");
    assert_eq!(out.transactions[1].category, "רבית והכנסות");

    let mut buf = Vec::new();
    write_csv(&mut buf, &out.transactions).unwrap();
    let csv = String::from_utf8(buf).unwrap();
    assert_eq!(
        csv,
        "Date,Description,Amount,Balance\n\
         2024-02-05,הוראת קבע,-1200.00,3800.00\n\
         2024-02-01,רבית זכות,0.35,5000.00\n"
    );
}

#[test]
fn chronological_html_export_keeps_printed_debits() {
    let rules = load_preset("leumi").unwrap();
    let html = r#"<html><body>
<p>בנק לאומי - תנועות בחשבון</p>
<table>
<tr><td class="xlHeader">תאריך</td><td class="xlHeader">תאריך ערך</td><td class="xlHeader">תיאור</td>
<td class="xlHeader">אסמכתא</td><td class="xlHeader">בחובה</td><td class="xlHeader">בזכות</td>
<td class="xlHeader">היתרה בש"ח</td></tr>
<tr><td>01/02/2024</td><td>01/02/2024</td><td>הוראת קבע</td><td>7</td><td>80.00</td><td></td><td>1,000.00</td></tr>
<tr><td>02/02/2024</td><td>02/02/2024</td><td>עמלות</td><td>8</td><td>100.00</td><td></td><td>900.00</td></tr>
</table></body></html>"#;

    let out = normalize_html(html, &rules, &NormalizeOptions::default()).unwrap();
    let amounts: Vec<_> = out.transactions.iter().map(|t| t.amount).collect();
    assert_eq!(amounts, vec![dec!(-80.00), dec!(-100.00)]);
    assert!(out
        .transactions
        .iter()
        .all(|t| t.kind == TransactionKind::Expense));
    assert!(out.warnings.is_empty());
}

#[test]
fn table_row_without_description_is_kept() {
    let rules = load_preset("leumi").unwrap();
    let rows = vec![
        cells(&["תאריך", "תאריך ערך", "תיאור", "אסמכתא", "בחובה", "בזכות", "היתרה בש\"ח"]),
        cells(&["05/02/24", "05/02/24", "", "11", "80.00", "", "5,920.00"]),
    ];

    let out = normalize_table(&rows, &rules, &NormalizeOptions::default()).unwrap();
    assert_eq!(out.dropped_rows, 0);
    assert_eq!(out.transactions.len(), 1);
    assert_eq!(out.transactions[0].description, "תנועה");
    assert_eq!(out.transactions[0].amount, dec!(-80.00));
}
