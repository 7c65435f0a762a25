//! Semantic color theme for list and stats output
//!
//! - `ACTIVE` => cyan - group headers, chart bars
//! - `SUCCESS` => green - completed items, success messages
//! - `WARNING` => yellow - fallbacks and notices
//! - `MUTED` => dimmed - ids, checked item names

use std::sync::LazyLock;

use owo_colors::Style;

/// Semantic color definitions for terminal output
pub struct SemanticColors {
    pub active: Style,
    pub success: Style,
    pub warning: Style,
    pub muted: Style,
}

impl Default for SemanticColors {
    fn default() -> Self {
        Self {
            active: Style::new().cyan().bold(),
            success: Style::new().green(),
            warning: Style::new().yellow(),
            muted: Style::new().dimmed(),
        }
    }
}

/// Global default theme
pub static COLORS: LazyLock<SemanticColors> = LazyLock::new(SemanticColors::default);
