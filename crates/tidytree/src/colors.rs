//! Semantic color theme for consistent terminal output
//!
//! - `ACTIVE` => blue - headers, in-progress messages
//! - `SUCCESS` => green - completed removals, all-clear messages
//! - `WARNING` => yellow - degraded runs, stale listings
//! - `FAIL` => red - per-item removal failures

use std::sync::LazyLock;

use owo_colors::Style;

/// Semantic color definitions for terminal output
pub struct SemanticColors {
    /// Blue - headers, in-progress messages
    pub active: Style,
    /// Green - completed removals, all-clear messages
    pub success: Style,
    /// Yellow - degraded runs, stale listings
    pub warning: Style,
    /// Red - per-item removal failures
    pub fail: Style,
}

impl Default for SemanticColors {
    fn default() -> Self {
        Self {
            active: Style::new().blue(),
            success: Style::new().green(),
            warning: Style::new().yellow(),
            fail: Style::new().red(),
        }
    }
}

/// Global default theme
pub static COLORS: LazyLock<SemanticColors> = LazyLock::new(SemanticColors::default);
