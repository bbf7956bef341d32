//! CLI command handlers. Each command is in its own file for clarity.

mod combine;
mod generate;
mod sanitize;

pub use combine::run_combine;
pub use generate::run_generate;
pub use sanitize::run_sanitize;
