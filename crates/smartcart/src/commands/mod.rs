//! CLI command implementations

pub mod add;
pub mod auto_sort;
pub mod categories;
pub mod clear;
pub mod init;
pub mod list;
pub mod remove;
pub mod stats;
pub mod toggle;

pub use add::{run_add, run_smart_add};
pub use auto_sort::run_auto_sort;
pub use categories::run_categories;
pub use clear::{run_clear, run_clear_completed};
pub use init::run_init;
pub use list::run_list;
pub use remove::run_remove;
pub use stats::run_stats;
pub use toggle::run_toggle;
