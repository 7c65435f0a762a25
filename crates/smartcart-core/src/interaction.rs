//! Interaction adapter trait
//!
//! Front-ends implement [`InteractionAdapter`] to confirm destructive actions,
//! show progress while the categorizer is busy, and print status messages.

use std::fmt;

use crate::error::SmartcartError;

/// Errors from interactive prompts
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InteractionError {
    /// Prompt needs a terminal but stdin is not one
    NonTty,
    /// User pressed Ctrl+C
    Cancelled,
    /// Underlying terminal IO failed
    Io(String),
}

impl fmt::Display for InteractionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InteractionError::NonTty => write!(f, "not running in a terminal (use --yes)"),
            InteractionError::Cancelled => write!(f, "cancelled"),
            InteractionError::Io(message) => write!(f, "{}", message),
        }
    }
}

impl std::error::Error for InteractionError {}

impl From<InteractionError> for SmartcartError {
    fn from(err: InteractionError) -> Self {
        match err {
            InteractionError::Cancelled => SmartcartError::UserAborted,
            other => SmartcartError::Interaction(other.to_string()),
        }
    }
}

pub type InteractionResult<T> = Result<T, InteractionError>;

/// Token for a running progress indicator
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProgressHandle {
    id: u64,
    message: String,
}

impl ProgressHandle {
    pub fn new(id: u64, message: &str) -> Self {
        Self {
            id,
            message: message.to_string(),
        }
    }

    pub fn id(&self) -> u64 {
        self.id
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

/// User-facing interaction surface
pub trait InteractionAdapter {
    /// Ask a yes/no question
    fn ask_confirm(&self, prompt: &str, default: bool) -> InteractionResult<bool>;

    /// Start a spinner; must be paired with [`InteractionAdapter::end_progress`]
    fn start_progress(&self, message: &str) -> ProgressHandle;

    /// Stop a spinner, reporting success or failure
    fn end_progress(&self, handle: ProgressHandle, success: bool);

    fn print_info(&self, message: &str);
    fn print_warning(&self, message: &str);
    fn print_error(&self, message: &str);
    fn print_success(&self, message: &str);
    fn print_header(&self, message: &str);
}

/// Run `task` with a spinner shown for its whole duration.
///
/// The spinner is cleared whether the task succeeded or not; `succeeded`
/// decides how it is reported.
pub fn with_progress<A, T>(
    adapter: &A,
    message: &str,
    task: impl FnOnce() -> T,
    succeeded: impl FnOnce(&T) -> bool,
) -> T
where
    A: InteractionAdapter + ?Sized,
{
    let handle = adapter.start_progress(message);
    let result = task();
    adapter.end_progress(handle, succeeded(&result));
    result
}
