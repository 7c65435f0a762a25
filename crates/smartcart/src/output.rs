//! JSON output formatting

use serde::{Deserialize, Serialize};
use smartcart_core::{ChartSlice, Item, SmartcartError, Stats};

const SCHEMA_VERSION: &str = "1";

/// JSON response envelope
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JsonResponse<T> {
    /// Schema version for forward compatibility
    pub schema_version: String,
    /// Command that generated this response
    pub command: String,
    /// Status: "ok" or "error"
    pub status: String,
    /// Command-specific payload
    pub data: T,
    /// Errors and warnings
    pub issues: Vec<JsonIssue>,
}

impl<T> JsonResponse<T> {
    /// Create a successful response
    pub fn ok(command: &str, data: T) -> Self {
        Self {
            schema_version: SCHEMA_VERSION.to_string(),
            command: command.to_string(),
            status: "ok".to_string(),
            data,
            issues: vec![],
        }
    }

    /// Create a successful response with issues
    pub fn ok_with_issues(command: &str, data: T, issues: Vec<JsonIssue>) -> Self {
        Self {
            issues,
            ..Self::ok(command, data)
        }
    }

    /// Create an error response
    pub fn error(command: &str, data: T, issues: Vec<JsonIssue>) -> Self {
        Self {
            schema_version: SCHEMA_VERSION.to_string(),
            command: command.to_string(),
            status: "error".to_string(),
            data,
            issues,
        }
    }
}

impl<T: Serialize> JsonResponse<T> {
    /// Print as pretty JSON on stdout
    pub fn print(&self) {
        match serde_json::to_string_pretty(self) {
            Ok(json) => println!("{}", json),
            Err(e) => eprintln!("error: failed to serialize response: {}", e),
        }
    }
}

/// Issue object structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JsonIssue {
    /// Error/warning code (e.g., "E003")
    pub code: String,
    /// Severity level
    pub severity: String,
    /// Human-readable message
    pub message: String,
}

impl JsonIssue {
    pub fn warning(code: &str, message: impl Into<String>) -> Self {
        Self {
            code: code.to_string(),
            severity: "warning".to_string(),
            message: message.into(),
        }
    }
}

impl From<&SmartcartError> for JsonIssue {
    fn from(err: &SmartcartError) -> Self {
        Self {
            code: err.code().to_string(),
            severity: "error".to_string(),
            message: err.to_string(),
        }
    }
}

/// Data payload for init command
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InitData {
    /// Path to the created directory
    pub path: String,
    /// Files created
    pub files_created: Vec<String>,
}

/// Data payload for commands that add items
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AddData {
    pub items: Vec<Item>,
    /// True when the categorizer was unavailable and the input was kept as-is
    pub fallback: bool,
}

/// Data payload for commands that touch a single item
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ItemData {
    pub item: Item,
}

/// Data payload for auto-sort
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SortData {
    /// Number of items whose category changed
    pub changed: usize,
    /// False when the categorizer was unavailable
    pub categorized: bool,
}

/// Data payload for clear commands
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClearData {
    pub removed: usize,
    /// False when the user declined the confirmation
    pub confirmed: bool,
}

/// Data payload for list command
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListData {
    pub groups: Vec<GroupData>,
}

/// One category group for list output
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GroupData {
    /// Canonical category identifier
    pub category: String,
    /// Localized label
    pub label: String,
    pub items: Vec<Item>,
}

/// Data payload for stats command
#[derive(Debug, Clone, Serialize)]
pub struct StatsData {
    #[serde(flatten)]
    pub stats: Stats,
    pub chart: Vec<ChartSlice>,
}

/// Data payload for categories command
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategoriesData {
    pub categories: Vec<CategoryEntry>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategoryEntry {
    pub id: String,
    pub label: String,
}

/// Report a failed command in the requested format
pub fn print_error(command: &str, err: &anyhow::Error, json_output: bool) {
    if json_output {
        let issue = match err.downcast_ref::<SmartcartError>() {
            Some(e) => JsonIssue::from(e),
            None => JsonIssue {
                code: "E000".to_string(),
                severity: "error".to_string(),
                message: format!("{:#}", err),
            },
        };
        JsonResponse::error(command, serde_json::Value::Null, vec![issue]).print();
    } else {
        eprintln!("error: {:#}", err);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ok_envelope() {
        let response = JsonResponse::ok(
            "clear",
            ClearData {
                removed: 2,
                confirmed: true,
            },
        );
        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(json["schema_version"], "1");
        assert_eq!(json["status"], "ok");
        assert_eq!(json["data"]["removed"], 2);
        assert!(json["issues"].as_array().unwrap().is_empty());
    }

    #[test]
    fn test_issue_from_error() {
        let err = SmartcartError::ItemNotFound {
            id: "zz".to_string(),
        };
        let issue = JsonIssue::from(&err);
        assert_eq!(issue.code, "E003");
        assert_eq!(issue.severity, "error");
        assert!(issue.message.contains("zz"));
    }

    #[test]
    fn test_stats_data_flattens() {
        let data = StatsData {
            stats: Stats::compute(&[]),
            chart: vec![],
        };
        let json = serde_json::to_value(&data).unwrap();
        assert_eq!(json["total"], 0);
        assert_eq!(json["progress_percent"], 0);
    }
}
