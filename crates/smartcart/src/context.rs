//! Per-invocation application state
//!
//! Everything a command needs is built once here and passed down explicitly.

use std::path::PathBuf;

use anyhow::Context as _;
use smartcart_core::{
    Categorizer, Config, FallbackReason, FileStorage, ItemStore, Translator, find_project_root,
    resolve_storage_path,
};
use tracing::debug;

use crate::interaction::CliAdapter;

/// Output flags shared by every command
#[derive(Debug, Clone, Copy)]
pub struct OutputOptions {
    pub json: bool,
    pub quiet: bool,
}

/// State for one CLI session
pub struct AppContext {
    pub store: ItemStore<FileStorage>,
    pub categorizer: Categorizer,
    pub translator: Translator,
    pub adapter: CliAdapter,
    pub output: OutputOptions,
}

impl AppContext {
    /// Load config, open the list, and pick a display language
    pub fn load(lang: Option<&str>, output: OutputOptions) -> anyhow::Result<Self> {
        let project_root = find_project_root().ok();
        let config = match &project_root {
            Some(root) => Config::load_from_project(root)
                .with_context(|| format!("failed to load config under {}", root.display()))?,
            None => Config::default(),
        };

        let storage_path: PathBuf = resolve_storage_path(
            &config,
            project_root.as_deref(),
            dirs::data_dir().as_deref(),
        )?;
        let storage = FileStorage::new(storage_path);
        debug!(path = %storage.path().display(), "using item storage");

        let locale = lang
            .map(str::to_string)
            .or_else(|| config.ui.language.clone())
            .or_else(|| std::env::var("LANG").ok())
            .unwrap_or_default();

        let translator = Translator::new(&locale);
        debug!(requested = %locale, locale = translator.locale(), "display language");

        Ok(Self {
            store: ItemStore::load(storage),
            categorizer: Categorizer::from_config(&config.categorizer),
            translator,
            adapter: CliAdapter::new(output.quiet || output.json),
            output,
        })
    }

    /// Shorthand for [`Translator::t`]
    pub fn t(&self, key: &str) -> String {
        self.translator.t(key)
    }

    /// Shorthand for [`Translator::t_with`]
    pub fn t_with(&self, key: &str, params: &[(&str, &str)]) -> String {
        self.translator.t_with(key, params)
    }

    /// Localized label for a category identifier
    pub fn category_label(&self, category: &str) -> String {
        self.translator.t(&smartcart_core::types::category_key(category))
    }

    /// Localized description of why the categorizer fell back
    pub fn reason_text(&self, reason: &FallbackReason) -> String {
        self.t_with(
            reason.i18n_key(),
            &[("detail", reason.detail().unwrap_or_default())],
        )
    }

    /// True when human-readable output should be printed
    pub fn human(&self) -> bool {
        !self.output.json && !self.output.quiet
    }
}
