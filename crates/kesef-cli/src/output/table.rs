use kesef_core::model::NormalizedStatement;
use kesef_core::ParsedStatement;

pub fn print_statement(statement: &NormalizedStatement) {
    if let Some(ref bank) = statement.bank {
        println!("=== {} ({}) ===\n", bank, statement.ordering);
    } else {
        println!("=== Statement ({}) ===\n", statement.ordering);
    }

    let desc_width = statement
        .transactions
        .iter()
        .map(|t| t.description.chars().count())
        .max()
        .unwrap_or(11)
        .max(11);

    println!(
        "  {:<10}  {:<desc_width$}  {:>14}  {:>14}  {:<7}  Category",
        "Date", "Description", "Amount", "Balance", "Kind",
    );
    println!("  {}", "-".repeat(10 + desc_width + 14 + 14 + 7 + 18));

    for tx in &statement.transactions {
        println!(
            "  {:<10}  {:<desc_width$}  {:>14}  {:>14}  {:<7}  {}",
            tx.date.format("%Y-%m-%d").to_string(),
            tx.description,
            format!("{:.2}", tx.amount),
            format!("{:.2}", tx.balance),
            tx.kind.to_string(),
            tx.category,
        );
    }
    println!();
}

/// Counts and fallback warnings, on stderr so CSV/JSON stdout stays clean.
pub fn print_summary(statement: &NormalizedStatement) {
    eprintln!("{} transaction(s)", statement.transactions.len());
    if statement.skipped_rows > 0 {
        eprintln!("  {} line(s) skipped during parsing", statement.skipped_rows);
    }
    if statement.dropped_rows > 0 {
        eprintln!("  {} record(s) dropped by validation", statement.dropped_rows);
    }
    for w in &statement.warnings {
        match w.row_index {
            Some(i) => eprintln!("  warning (row {}): {}", i + 1, w.message),
            None => eprintln!("  warning: {}", w.message),
        }
    }
}

pub fn format_parsed(parsed: &ParsedStatement) -> String {
    let mut out = String::new();

    if let Some(ref bank) = parsed.bank {
        out.push_str(&format!("Bank: {bank}\n\n"));
    }

    for row in &parsed.rows.rows {
        out.push_str(&format!(
            "  {:>4}  {}  {:>14}  {:>14}  {}  [{}]\n",
            row.index + 1,
            row.date.format("%Y-%m-%d"),
            format!("{:.2}", row.raw_amount),
            format!("{:.2}", row.balance),
            row.description,
            row.grammar,
        ));
    }

    if !parsed.rows.skipped.is_empty() {
        out.push_str(&format!(
            "\n{} line(s) skipped:\n",
            parsed.rows.skipped.len()
        ));
        for s in &parsed.rows.skipped {
            out.push_str(&format!("  {}  ({})\n", s.row_text, s.reason));
        }
    }

    out
}
