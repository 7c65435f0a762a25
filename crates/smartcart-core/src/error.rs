//! Error types for smartcart operations

use thiserror::Error;

/// Core error type for smartcart operations
#[derive(Error, Debug)]
pub enum SmartcartError {
    // === Project errors (E001-E002) ===
    /// E001: .smartcart directory not initialized
    #[error("E001: .smartcart directory not initialized (run `smartcart init`)")]
    NotInitialized,

    /// E002: .smartcart directory already exists
    #[error("E002: .smartcart directory already exists (use --force to overwrite)")]
    AlreadyInitialized,

    // === Item errors (E003-E005) ===
    /// E003: No item matches the given id
    #[error("E003: No item matches id: {id}")]
    ItemNotFound { id: String },

    /// E004: Id prefix matches more than one item
    #[error("E004: Id prefix is ambiguous: {prefix} ({matches} items match)")]
    AmbiguousId { prefix: String, matches: usize },

    /// E005: Item name is empty after trimming
    #[error("E005: Item name cannot be empty")]
    EmptyInput,

    // === IO and system errors ===
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration error
    #[error("configuration error: {0}")]
    Config(String),

    /// JSON serialization or parse error
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    // === Categorizer errors (E010-E011) ===
    /// E010: HTTP transport failure
    #[error("E010: Categorizer request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// E011: Service answered with a non-success status
    #[error("E011: Categorizer returned HTTP {status}: {body}")]
    ServiceStatus { status: u16, body: String },

    // === Interaction errors (E020-E021) ===
    /// E020: User declined a confirmation
    #[error("E020: Aborted by user")]
    UserAborted,

    /// E021: Interactive prompt failed
    #[error("E021: Interaction failed: {0}")]
    Interaction(String),
}

impl SmartcartError {
    /// Get the error code (e.g., "E001", "E003")
    pub fn code(&self) -> &'static str {
        match self {
            SmartcartError::NotInitialized => "E001",
            SmartcartError::AlreadyInitialized => "E002",
            SmartcartError::ItemNotFound { .. } => "E003",
            SmartcartError::AmbiguousId { .. } => "E004",
            SmartcartError::EmptyInput => "E005",
            SmartcartError::Io(_) => "E006",
            SmartcartError::Config(_) => "E007",
            SmartcartError::Serialization(_) => "E008",
            SmartcartError::Http(_) => "E010",
            SmartcartError::ServiceStatus { .. } => "E011",
            SmartcartError::UserAborted => "E020",
            SmartcartError::Interaction(_) => "E021",
        }
    }

    /// Get the exit code for this error type
    pub fn exit_code(&self) -> i32 {
        match self {
            SmartcartError::ItemNotFound { .. }
            | SmartcartError::AmbiguousId { .. }
            | SmartcartError::EmptyInput => 1, // Bad user input

            SmartcartError::Io(_) | SmartcartError::Serialization(_) => 2, // File errors

            SmartcartError::Config(_) => 4, // Configuration error

            SmartcartError::Http(_) | SmartcartError::ServiceStatus { .. } => 6, // Network

            SmartcartError::UserAborted | SmartcartError::Interaction(_) => 5,

            SmartcartError::NotInitialized | SmartcartError::AlreadyInitialized => 9,
        }
    }
}
