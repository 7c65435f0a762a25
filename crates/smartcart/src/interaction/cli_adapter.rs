//! CLI adapter implementation using dialoguer for prompts and indicatif for spinners

use std::collections::HashMap;
use std::fmt::Write as FmtWrite;
use std::io::{IsTerminal, Write};
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use console::Style;
use dialoguer::Confirm;
use dialoguer::theme::Theme;
use indicatif::{ProgressBar, ProgressStyle};
use owo_colors::OwoColorize;

use smartcart_core::interaction::{
    InteractionAdapter, InteractionError, InteractionResult, ProgressHandle,
};

/// Global flag to track if Ctrl+C was pressed
static CANCELLED: AtomicBool = AtomicBool::new(false);

fn is_cancelled() -> bool {
    CANCELLED.load(Ordering::SeqCst)
}

/// Set up the global Ctrl+C handler.
///
/// The first press marks the session cancelled; a second press exits.
pub fn setup_ctrl_c_handler() {
    static HANDLER_SET: AtomicBool = AtomicBool::new(false);

    if HANDLER_SET.swap(true, Ordering::SeqCst) {
        return;
    }

    if let Err(e) = ctrlc::set_handler(move || {
        if CANCELLED.swap(true, Ordering::SeqCst) {
            std::process::exit(130);
        }
        eprintln!();
    }) {
        tracing::warn!(error = %e, "could not set Ctrl+C handler");
    }
}

/// Confirm prompt theme
struct PromptTheme {
    prompt_style: Style,
    active_style: Style,
    hint_style: Style,
}

impl PromptTheme {
    fn new() -> Self {
        Self {
            prompt_style: Style::new().cyan().bold(),
            active_style: Style::new().cyan(),
            hint_style: Style::new().dim(),
        }
    }
}

impl Theme for PromptTheme {
    fn format_confirm_prompt(
        &self,
        f: &mut dyn FmtWrite,
        prompt: &str,
        default: Option<bool>,
    ) -> std::fmt::Result {
        let hint = match default {
            Some(true) => "(Y/n)",
            Some(false) => "(y/N)",
            None => "(y/n)",
        };
        write!(
            f,
            "{} {}",
            self.prompt_style.apply_to(format!("? {}", prompt)),
            self.hint_style.apply_to(hint)
        )
    }

    fn format_confirm_prompt_selection(
        &self,
        f: &mut dyn FmtWrite,
        prompt: &str,
        selection: Option<bool>,
    ) -> std::fmt::Result {
        let answer = match selection {
            Some(true) => "Yes",
            Some(false) => "No",
            None => "?",
        };
        write!(
            f,
            "{} {}",
            self.prompt_style.apply_to(format!("? {}", prompt)),
            self.active_style.apply_to(answer)
        )
    }
}

/// CLI adapter for terminal-based user interaction
pub struct CliAdapter {
    is_tty: bool,
    quiet: bool,
    progress_counter: AtomicU64,
    active_progress: Arc<Mutex<HashMap<u64, ProgressBar>>>,
}

impl CliAdapter {
    /// Create an adapter; `quiet` suppresses spinners and status lines
    pub fn new(quiet: bool) -> Self {
        Self::with_tty(std::io::stdin().is_terminal(), quiet)
    }

    pub fn with_tty(is_tty: bool, quiet: bool) -> Self {
        setup_ctrl_c_handler();
        Self {
            is_tty,
            quiet,
            progress_counter: AtomicU64::new(0),
            active_progress: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    #[allow(dead_code)]
    pub fn is_tty(&self) -> bool {
        self.is_tty
    }

    fn check_cancelled(&self) -> InteractionResult<()> {
        if is_cancelled() {
            Err(InteractionError::Cancelled)
        } else {
            Ok(())
        }
    }

    fn require_tty(&self) -> InteractionResult<()> {
        if !self.is_tty {
            Err(InteractionError::NonTty)
        } else {
            Ok(())
        }
    }

    fn convert_dialoguer_error(err: dialoguer::Error) -> InteractionError {
        InteractionError::Io(err.to_string())
    }
}

impl InteractionAdapter for CliAdapter {
    fn ask_confirm(&self, prompt: &str, default: bool) -> InteractionResult<bool> {
        self.require_tty()?;
        self.check_cancelled()?;

        let theme = PromptTheme::new();

        Confirm::with_theme(&theme)
            .with_prompt(prompt)
            .default(default)
            .interact()
            .map_err(Self::convert_dialoguer_error)
    }

    fn start_progress(&self, message: &str) -> ProgressHandle {
        let id = self.progress_counter.fetch_add(1, Ordering::SeqCst);

        let pb = if self.quiet {
            ProgressBar::hidden()
        } else {
            let pb = ProgressBar::new_spinner();
            pb.set_style(
                ProgressStyle::default_spinner()
                    .template("{spinner:.magenta} {msg} [{elapsed}]")
                    .unwrap_or_else(|_| ProgressStyle::default_spinner())
                    .tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏"),
            );
            pb.enable_steady_tick(Duration::from_millis(100));
            pb
        };
        pb.set_message(message.to_string());

        if let Ok(mut progress_map) = self.active_progress.lock() {
            progress_map.insert(id, pb);
        }

        ProgressHandle::new(id, message)
    }

    fn end_progress(&self, handle: ProgressHandle, success: bool) {
        let Ok(mut progress_map) = self.active_progress.lock() else {
            return;
        };
        let Some(pb) = progress_map.remove(&handle.id()) else {
            return;
        };

        let elapsed = format!("{:.1}s", pb.elapsed().as_secs_f64());
        pb.finish_and_clear();

        if self.quiet {
            return;
        }
        let msg = handle.message();
        if success {
            eprintln!("{} {} [{}]", "✓".green(), msg.green(), elapsed);
        } else {
            eprintln!("{} {} [{}]", "✗".yellow(), msg.yellow(), elapsed);
        }
    }

    fn print_info(&self, message: &str) {
        if self.quiet {
            return;
        }
        println!("{}", message);
        let _ = std::io::stdout().flush();
    }

    fn print_warning(&self, message: &str) {
        if self.quiet {
            return;
        }
        eprintln!("{} {}", "warning:".yellow().bold(), message.yellow());
        let _ = std::io::stderr().flush();
    }

    fn print_error(&self, message: &str) {
        eprintln!("{} {}", "error:".red().bold(), message.red().bold());
        let _ = std::io::stderr().flush();
    }

    fn print_success(&self, message: &str) {
        if self.quiet {
            return;
        }
        println!("{} {}", "✓".green(), message.green());
        let _ = std::io::stdout().flush();
    }

    fn print_header(&self, message: &str) {
        if self.quiet {
            return;
        }
        println!("{}", message.cyan().bold());
        let _ = std::io::stdout().flush();
    }
}
