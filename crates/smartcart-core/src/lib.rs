//! smartcart-core: Core library for the smartcart shopping list
//!
//! This crate provides the item store, the categorizer client, and the pure
//! grouping and statistics views the front-end renders.

/// Core error types for smartcart operations
pub mod error;

/// Configuration handling
pub mod config;

/// Core data types (Item, Category, CategorizedItem)
pub mod types;

/// Persistent item store
pub mod store;

/// Remote categorization client
pub mod categorizer;

/// Grouped and sorted projection of the store
pub mod view;

/// Completion statistics and chart data
pub mod stats;

/// Key-based text lookup
pub mod i18n;

/// Interaction adapter trait for front-ends
pub mod interaction;

// Re-exports for convenience
pub use categorizer::{
    CategorizeOutcome, Categorizer, CompletionRequest, CompletionService, FallbackReason,
    GeminiClient, RecategorizeOutcome,
};
pub use config::{Config, find_project_root, resolve_storage_path};
pub use error::SmartcartError;
pub use i18n::{Translator, detect_locale, translate};
pub use stats::{ChartSlice, Stats, chart_slices};
pub use store::{FileStorage, ItemStore, MemoryStorage, Storage};
pub use types::{CategorizedItem, Category, Item};
pub use view::{CategoryGroup, group_items};
