use crate::error::KesefError;
use crate::model::Transaction;
use serde::Serialize;
use std::io::Write;

#[derive(Serialize)]
struct CsvRow<'a> {
    #[serde(rename = "Date")]
    date: String,
    #[serde(rename = "Description")]
    description: &'a str,
    #[serde(rename = "Amount")]
    amount: String,
    #[serde(rename = "Balance")]
    balance: String,
}

/// Write transactions as UTF-8 CSV with header `Date,Description,Amount,Balance`.
/// Dates are ISO, money has two decimals.
pub fn write_csv<W: Write>(w: W, transactions: &[Transaction]) -> Result<(), KesefError> {
    let mut wrt = csv::WriterBuilder::new().from_writer(w);

    for tx in transactions {
        wrt.serialize(CsvRow {
            date: tx.date.format("%Y-%m-%d").to_string(),
            description: &tx.description,
            amount: format!("{:.2}", tx.amount),
            balance: format!("{:.2}", tx.balance),
        })?;
    }
    if transactions.is_empty() {
        wrt.write_record(["Date", "Description", "Amount", "Balance"])?;
    }
    wrt.flush()?;
    Ok(())
}
