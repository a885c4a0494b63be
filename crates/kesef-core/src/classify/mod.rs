pub mod engine;

pub use engine::{categorize, classify, to_transaction};
