// Application layer - the entry point any client (CLI, interactive prompt,
// batch import) goes through, plus rendering of summaries.

pub mod error;
pub mod reporting;
pub mod service;

pub use error::*;
pub use reporting::*;
pub use service::*;
