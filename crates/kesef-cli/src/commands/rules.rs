use kesef_core::error::KesefError;
use kesef_core::rules::builtin;
use std::path::Path;

pub fn list() -> Result<(), KesefError> {
    println!("Available predefined rulebooks:\n");
    for name in builtin::PRESETS {
        let rb = builtin::load_preset(name)?;
        let default_marker = if *name == builtin::DEFAULT_PRESET {
            " [default]"
        } else {
            ""
        };
        println!("  {:<8} {} (v{}){}", name, rb.name, rb.version, default_marker);
        if let Some(ref desc) = rb.description {
            println!("           {}", desc);
        }
        println!();
    }
    Ok(())
}

pub fn explain(preset: &str) -> Result<(), KesefError> {
    let rb = builtin::load_preset(preset)?;

    println!("{} (version {})\n", rb.name, rb.version);

    if let Some(ref desc) = rb.description {
        println!("{}\n", desc);
    }

    println!(
        "Descriptions are matched against {} category keywords, first hit wins.",
        rb.categories.len()
    );
    println!("Unmatched descriptions fall into '{}'.", rb.fallback_category);
    println!(
        "Table rows with no description are named '{}'.\n",
        rb.default_description
    );

    let max_kw = rb
        .categories
        .iter()
        .map(|c| c.keyword.chars().count())
        .max()
        .unwrap_or(10);

    println!("  {:<width$}  Category", "Keyword", width = max_kw);
    println!("  {}", "-".repeat(max_kw + 20));
    for c in &rb.categories {
        println!("  {:<width$}  {}", c.keyword, c.category, width = max_kw);
    }
    println!();

    println!("Income keywords (a non-positive amount is still Income):");
    println!("  {}\n", rb.income_keywords.join(", "));

    println!("Sign hints for the first row of a chronological statement:");
    println!("  income:  {}", rb.sign_hints.income.join(", "));
    println!("  expense: {}", rb.sign_hints.expense.join(", "));
    println!(
        "  neither: {} (newest-first oldest row: {})\n",
        rb.sign_defaults.no_keyword, rb.sign_defaults.no_predecessor
    );

    println!(
        "{} description translations, reversed-text markers: {}",
        rb.translations.len(),
        rb.reversed_suffixes.join(" ")
    );
    println!(
        "{} statement indicator words\n",
        rb.statement_indicators.len()
    );

    Ok(())
}

pub fn schema() -> Result<(), KesefError> {
    print!(
        r#"JSON Rulebook Schema
====================

A rulebook holds every keyword table the pipeline uses. When you run
`kesef convert --rules FILE`, it replaces the built-in preset entirely.

Top-level fields:
  name              (string, required)  Human-readable name
  description       (string, optional)  What this rulebook is for
  version           (string, required)  Version identifier (e.g., "2025.1")
  fallback_category (string, required)  Category for unmatched descriptions
  default_description
                    (string, optional)  Description for table rows with an
                                        empty description cell (default "תנועה")
  categories        (array, required)   Ordered keyword -> category rules.
                                        The first keyword contained in a
                                        description decides its category.
  income_keywords   (array, optional)   Descriptions containing any of these
                                        are Income even with a negative amount
  sign_hints        (object, optional)  {{ "income": [...], "expense": [...] }}
                                        Signs the first row of a chronological
                                        statement. Income is checked first.
  sign_defaults     (object, optional)  Kinds assumed when nothing else decides:
                                        "no_predecessor" (newest-first oldest row)
                                        "no_keyword" (chronological first row)
                                        Values: "Income" or "Expense" (default)
  translations      (array, optional)   {{ "raw": ..., "readable": ... }} pairs that
                                        map garbled extractor output to text
  reversed_suffixes (array, optional)   Markers such as "י-" that reveal
                                        right-to-left text stored backwards
  statement_indicators
                    (array, optional)   {{ "text": ..., "bank": ... }} words that
                                        mark the input as a bank statement;
                                        "bank" names the issuer when present

Example:
{{
  "name": "My bank",
  "version": "1.0",
  "fallback_category": "Other",
  "categories": [
    {{ "keyword": "SALARY", "category": "Income" }},
    {{ "keyword": "RENT", "category": "Housing" }}
  ],
  "income_keywords": ["SALARY", "REFUND"],
  "sign_hints": {{ "income": ["SALARY"], "expense": ["CARD"] }},
  "statement_indicators": [
    {{ "text": "My Bank", "bank": "My Bank" }},
    {{ "text": "Balance" }}
  ]
}}
"#
    );
    Ok(())
}

pub fn validate(file: &Path) -> Result<(), KesefError> {
    let rb = kesef_core::rules::load_rulebook(file)?;

    println!("Rulebook '{}' (v{}) is valid.", rb.name, rb.version);
    println!("  Categories: {} keyword rules", rb.categories.len());
    println!("  Translations: {}", rb.translations.len());

    // Potential issues (warnings, not errors)
    let mut warnings = Vec::new();
    for (i, rule) in rb.categories.iter().enumerate() {
        if let Some(earlier) = rb.categories[..i]
            .iter()
            .find(|e| rule.keyword.contains(e.keyword.as_str()))
        {
            warnings.push(format!(
                "keyword '{}' can never match: earlier keyword '{}' is contained in it",
                rule.keyword, earlier.keyword
            ));
        }
    }
    if rb.statement_indicators.is_empty() {
        warnings.push("no statement_indicators: inputs need --force".into());
    }

    if !warnings.is_empty() {
        println!("\nWarnings:");
        for w in &warnings {
            println!("  - {}", w);
        }
    }

    Ok(())
}
