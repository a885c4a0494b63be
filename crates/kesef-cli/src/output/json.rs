use kesef_core::error::KesefError;
use kesef_core::model::NormalizedStatement;

pub fn print(statement: &NormalizedStatement) -> Result<(), KesefError> {
    let json = serde_json::to_string_pretty(statement)?;
    println!("{json}");
    Ok(())
}
