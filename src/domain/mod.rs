pub mod condition;
pub mod report;
pub mod types;

pub use condition::*;
pub use report::*;
pub use types::*;
