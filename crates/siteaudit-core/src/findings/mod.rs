pub mod model;
pub mod sink;

pub use model::{Finding, Severity};
pub use sink::FindingSink;
