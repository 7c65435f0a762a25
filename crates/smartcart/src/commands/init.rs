//! Implementation of the `smartcart init` command

use std::fs;
use std::path::Path;

use anyhow::Context as _;
use smartcart_core::SmartcartError;
use smartcart_core::config::{CONFIG_FILE_NAME, ITEMS_FILE_NAME, PROJECT_DIR_NAME};

use tracing::info;

use crate::context::OutputOptions;
use crate::output::{InitData, JsonResponse};

/// Default config.toml content
const DEFAULT_CONFIG: &str = r#"[storage]
# Items file, relative to this directory (default: "items.json")
# path = "items.json"

[categorizer]
# Environment variable holding the API key; unset means offline mode
api_key_env = "API_KEY"

# Model used for categorization
model = "gemini-2.5-flash"

# Generative language API base URL
endpoint = "https://generativelanguage.googleapis.com/v1beta"

# Request timeout in seconds
timeout_secs = 30

[ui]
# Display language: "en", "es", "de" (default: from $LANG)
# language = "en"
"#;

/// Run the init command.
///
/// With `force`, an existing `.smartcart/` gets a fresh config.toml while its
/// items.json is kept.
pub fn run_init(force: bool, output: OutputOptions) -> anyhow::Result<i32> {
    let project_dir = Path::new(PROJECT_DIR_NAME);

    if project_dir.exists() && !force {
        return Err(SmartcartError::AlreadyInitialized.into());
    }

    fs::create_dir_all(project_dir)
        .with_context(|| format!("failed to create {} directory", PROJECT_DIR_NAME))?;

    let config_path = project_dir.join(CONFIG_FILE_NAME);
    fs::write(&config_path, DEFAULT_CONFIG)
        .with_context(|| format!("failed to write {}", CONFIG_FILE_NAME))?;
    let mut files_created = vec![format!("{}/{}", PROJECT_DIR_NAME, CONFIG_FILE_NAME)];

    // --force resets the config only; an existing list is left alone
    let items_path = project_dir.join(ITEMS_FILE_NAME);
    if items_path.exists() {
        info!(path = %items_path.display(), "keeping existing item list");
    } else {
        fs::write(&items_path, "[]")
            .with_context(|| format!("failed to write {}", ITEMS_FILE_NAME))?;
        files_created.push(format!("{}/{}", PROJECT_DIR_NAME, ITEMS_FILE_NAME));
    }

    if output.json {
        JsonResponse::ok(
            "init",
            InitData {
                path: format!("{}/", PROJECT_DIR_NAME),
                files_created,
            },
        )
        .print();
    } else if !output.quiet {
        println!("Initialized {}/", PROJECT_DIR_NAME);
        for file in &files_created {
            println!("  Created: {}", file);
        }
    }

    Ok(0)
}
