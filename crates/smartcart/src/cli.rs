//! CLI argument parsing with clap derive

use clap::{Parser, Subcommand};
use smartcart_core::Category;

const VERSION: &str = env!("CARGO_PKG_VERSION");

/// SmartCart - a shopping list that sorts itself
#[derive(Parser)]
#[command(name = "smartcart")]
#[command(version = VERSION)]
#[command(about = "A shopping list with AI-assisted categorization")]
#[command(long_about = "SmartCart keeps a shopping list grouped by aisle category.\n\nItems can be added by hand with a category, or typed as free text and split and categorized by a language model. Without an API key every command still works; smart-add simply keeps the text as one item under \"Other\".\n\nThe API key is read from the environment variable named in .smartcart/config.toml (API_KEY by default).")]
pub struct Cli {
    /// Increase output verbosity
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Suppress non-error output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Output in JSON format
    #[arg(long, global = true)]
    pub json: bool,

    /// Display language (e.g. en, es, de); defaults to config, then $LANG
    #[arg(long, global = true)]
    pub lang: Option<String>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Initialize a smartcart list in the current directory
    ///
    /// Creates .smartcart/ with a default config.toml and an empty list.
    #[command(long_about = "Initialize a smartcart list in the current directory.\n\nCreates:\n  .smartcart/config.toml   Categorizer and display settings\n  .smartcart/items.json    The shopping list")]
    Init {
        /// Rewrite config.toml in an existing .smartcart directory; the list is kept
        #[arg(long)]
        force: bool,
    },

    /// Add one item with an explicit category
    Add {
        /// Item name (multiple words are joined with spaces)
        #[arg(required = true, num_args = 1..)]
        name: Vec<String>,

        /// Category for the item
        #[arg(short, long, default_value = "Other", value_parser = parse_category)]
        category: Category,
    },

    /// Split free text into items and categorize them with AI
    ///
    /// Falls back to adding the text as one item under "Other" if the
    /// categorizer is unavailable.
    #[command(name = "smart-add")]
    SmartAdd {
        /// Free text, e.g. "milk, 2 apples and dish soap"
        #[arg(required = true, num_args = 1..)]
        text: Vec<String>,
    },

    /// Re-categorize every item on the list with AI
    #[command(name = "auto-sort")]
    AutoSort,

    /// Show the list grouped by category
    ///
    /// Unchecked items come first within each group.
    List,

    /// Check or uncheck an item
    Toggle {
        /// Item id or unique id prefix
        id: String,
    },

    /// Delete an item
    Remove {
        /// Item id or unique id prefix
        id: String,
    },

    /// Remove every item (asks for confirmation)
    Clear {
        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },

    /// Remove all checked items (asks for confirmation)
    #[command(name = "clear-completed")]
    ClearCompleted {
        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },

    /// Show completion progress and items per category
    Stats,

    /// List the canonical categories
    Categories,
}

impl Commands {
    /// Command name used in JSON envelopes
    pub fn name(&self) -> &'static str {
        match self {
            Commands::Init { .. } => "init",
            Commands::Add { .. } => "add",
            Commands::SmartAdd { .. } => "smart-add",
            Commands::AutoSort => "auto-sort",
            Commands::List => "list",
            Commands::Toggle { .. } => "toggle",
            Commands::Remove { .. } => "remove",
            Commands::Clear { .. } => "clear",
            Commands::ClearCompleted { .. } => "clear-completed",
            Commands::Stats => "stats",
            Commands::Categories => "categories",
        }
    }
}

/// Accept a canonical category, ignoring case
fn parse_category(value: &str) -> Result<Category, String> {
    Category::all()
        .iter()
        .copied()
        .find(|category| category.as_str().eq_ignore_ascii_case(value.trim()))
        .ok_or_else(|| {
            let names: Vec<&str> = Category::all().iter().map(Category::as_str).collect();
            format!("unknown category '{}' (expected one of: {})", value, names.join(", "))
        })
}

/// Get the command args for use in the application
pub fn parse() -> Cli {
    Cli::parse()
}
