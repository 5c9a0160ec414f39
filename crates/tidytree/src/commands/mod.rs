//! CLI command implementations

pub mod add;
pub mod clean;

pub use add::run_add;
pub use clean::run_clean;
