//! Remote categorization client
//!
//! Classification is delegated to a text-completion service that accepts a
//! natural-language instruction plus a JSON response schema and returns a
//! JSON array of `{name, category}` objects. Every failure degrades to a
//! defined fallback: the literal input for [`Categorizer::parse_and_categorize`]
//! and "no change" for [`Categorizer::recategorize_batch`]. The outcome types
//! record which path was taken so callers can tell them apart.

use std::collections::{HashMap, HashSet};
use std::fmt;
use std::time::Duration;

use serde::Deserialize;
use serde_json::{Value, json};
use tracing::{debug, warn};

use crate::config::CategorizerConfig;
use crate::error::SmartcartError;
use crate::types::{CategorizedItem, Category};

/// A single request to the completion service
#[derive(Debug, Clone, PartialEq)]
pub struct CompletionRequest {
    /// Natural-language instruction
    pub prompt: String,
    /// JSON schema the response must follow
    pub response_schema: Value,
}

impl CompletionRequest {
    /// Request whose response must be an array of `{name, category}` objects
    pub fn categorized_items(prompt: String) -> Self {
        Self {
            prompt,
            response_schema: categorized_items_schema(),
        }
    }
}

/// The external text-completion boundary.
///
/// Returns the response text, or `None` when the service answered without any.
pub trait CompletionService {
    fn complete(&self, request: &CompletionRequest) -> Result<Option<String>, SmartcartError>;
}

/// Why a categorizer call fell back instead of using service output
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FallbackReason {
    /// No API key configured; no request was made
    MissingCredential,
    /// Nothing to categorize; no request was made
    EmptyInput,
    /// Service answered with an empty body
    EmptyResponse,
    /// Transport or HTTP status failure
    Service(String),
    /// Response body was not the expected JSON
    Malformed(String),
}

impl FallbackReason {
    /// Lookup key for a localized description; `{{detail}}` takes [`Self::detail`]
    pub fn i18n_key(&self) -> &'static str {
        match self {
            FallbackReason::MissingCredential => "reason.missingCredential",
            FallbackReason::EmptyInput => "reason.emptyInput",
            FallbackReason::EmptyResponse => "reason.emptyResponse",
            FallbackReason::Service(_) => "reason.service",
            FallbackReason::Malformed(_) => "reason.malformed",
        }
    }

    pub fn detail(&self) -> Option<&str> {
        match self {
            FallbackReason::Service(message) | FallbackReason::Malformed(message) => {
                Some(message.as_str())
            }
            _ => None,
        }
    }
}

impl fmt::Display for FallbackReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FallbackReason::MissingCredential => write!(f, "no API key configured"),
            FallbackReason::EmptyInput => write!(f, "nothing to categorize"),
            FallbackReason::EmptyResponse => write!(f, "empty response"),
            FallbackReason::Service(message) => write!(f, "service error: {}", message),
            FallbackReason::Malformed(message) => write!(f, "malformed response: {}", message),
        }
    }
}

/// Result of splitting and categorizing free text
#[derive(Debug, Clone, PartialEq)]
pub enum CategorizeOutcome {
    /// The service split and categorized the input
    Categorized(Vec<CategorizedItem>),
    /// The service was unavailable; `items` holds the input verbatim as "Other"
    Fallback {
        items: Vec<CategorizedItem>,
        reason: FallbackReason,
    },
}

impl CategorizeOutcome {
    fn fallback(input: &str, reason: FallbackReason) -> Self {
        CategorizeOutcome::Fallback {
            items: vec![CategorizedItem::new(input, Category::Other)],
            reason,
        }
    }

    pub fn items(&self) -> &[CategorizedItem] {
        match self {
            CategorizeOutcome::Categorized(items) => items,
            CategorizeOutcome::Fallback { items, .. } => items,
        }
    }

    pub fn into_items(self) -> Vec<CategorizedItem> {
        match self {
            CategorizeOutcome::Categorized(items) => items,
            CategorizeOutcome::Fallback { items, .. } => items,
        }
    }

    pub fn is_fallback(&self) -> bool {
        matches!(self, CategorizeOutcome::Fallback { .. })
    }
}

/// Result of re-categorizing a batch of names
#[derive(Debug, Clone, PartialEq)]
pub enum RecategorizeOutcome {
    /// Lowercased name to category, as assigned by the service
    Categorized(HashMap<String, String>),
    /// Nothing should change
    Unchanged { reason: FallbackReason },
}

impl RecategorizeOutcome {
    /// The mapping to apply; empty when unchanged
    pub fn into_mapping(self) -> HashMap<String, String> {
        match self {
            RecategorizeOutcome::Categorized(mapping) => mapping,
            RecategorizeOutcome::Unchanged { .. } => HashMap::new(),
        }
    }

    pub fn is_unchanged(&self) -> bool {
        matches!(self, RecategorizeOutcome::Unchanged { .. })
    }
}

/// Categorizer front for an optional completion service
pub struct Categorizer {
    service: Option<Box<dyn CompletionService>>,
}

impl Categorizer {
    pub fn new(service: Option<Box<dyn CompletionService>>) -> Self {
        Self { service }
    }

    /// Categorizer with no service; every call takes the fallback path
    pub fn offline() -> Self {
        Self { service: None }
    }

    pub fn with_service(service: impl CompletionService + 'static) -> Self {
        Self {
            service: Some(Box::new(service)),
        }
    }

    /// Build from configuration. A missing API key or a client that cannot be
    /// constructed yields an offline categorizer.
    pub fn from_config(config: &CategorizerConfig) -> Self {
        match GeminiClient::from_config(config) {
            Ok(Some(client)) => Self::with_service(client),
            Ok(None) => {
                debug!(env = %config.api_key_env, "no API key set, categorizer offline");
                Self::offline()
            }
            Err(e) => {
                warn!(error = %e, "failed to build categorizer client, categorizer offline");
                Self::offline()
            }
        }
    }

    pub fn is_configured(&self) -> bool {
        self.service.is_some()
    }

    /// Split free text into items and assign each a category.
    ///
    /// Never fails: any problem yields the input verbatim under "Other".
    pub fn parse_and_categorize(&self, input: &str) -> CategorizeOutcome {
        let Some(service) = &self.service else {
            debug!("no API key, returning input uncategorized");
            return CategorizeOutcome::fallback(input, FallbackReason::MissingCredential);
        };

        let request = CompletionRequest::categorized_items(split_prompt(input));
        match fetch_entries::<CategorizedItem>(service.as_ref(), &request) {
            Ok(items) => {
                debug!(count = items.len(), "categorized free text");
                CategorizeOutcome::Categorized(items)
            }
            Err(reason) => {
                warn!(%reason, "categorization failed, returning input uncategorized");
                CategorizeOutcome::fallback(input, reason)
            }
        }
    }

    /// Assign a category to each distinct name.
    ///
    /// The mapping is keyed by lowercased name. Entries with an empty name or
    /// category are dropped. Never fails: any problem yields `Unchanged`.
    pub fn recategorize_batch<S: AsRef<str>>(&self, names: &[S]) -> RecategorizeOutcome {
        let Some(service) = &self.service else {
            return RecategorizeOutcome::Unchanged {
                reason: FallbackReason::MissingCredential,
            };
        };

        let mut seen = HashSet::new();
        let names: Vec<&str> = names
            .iter()
            .map(|name| name.as_ref())
            .filter(|name| seen.insert(*name))
            .collect();
        if names.is_empty() {
            return RecategorizeOutcome::Unchanged {
                reason: FallbackReason::EmptyInput,
            };
        }

        let request = CompletionRequest::categorized_items(batch_prompt(&names));
        match fetch_entries::<BatchEntry>(service.as_ref(), &request) {
            Ok(entries) => {
                let mapping: HashMap<String, String> = entries
                    .into_iter()
                    .filter_map(|entry| match (entry.name, entry.category) {
                        (Some(name), Some(category))
                            if !name.is_empty() && !category.is_empty() =>
                        {
                            Some((name.to_lowercase(), category))
                        }
                        _ => None,
                    })
                    .collect();
                debug!(count = mapping.len(), "re-categorized names");
                RecategorizeOutcome::Categorized(mapping)
            }
            Err(reason) => {
                warn!(%reason, "re-categorization failed, leaving categories unchanged");
                RecategorizeOutcome::Unchanged { reason }
            }
        }
    }
}

/// Batch entries tolerate missing or null fields; those are filtered out
#[derive(Debug, Deserialize)]
struct BatchEntry {
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    category: Option<String>,
}

fn fetch_entries<T: for<'de> Deserialize<'de>>(
    service: &dyn CompletionService,
    request: &CompletionRequest,
) -> Result<Vec<T>, FallbackReason> {
    let text = service
        .complete(request)
        .map_err(|e| FallbackReason::Service(e.to_string()))?;
    let text = match text {
        Some(text) if !text.trim().is_empty() => text,
        _ => return Err(FallbackReason::EmptyResponse),
    };
    serde_json::from_str(&text).map_err(|e| FallbackReason::Malformed(e.to_string()))
}

fn category_list() -> String {
    Category::all()
        .iter()
        .map(Category::as_str)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Instruction for splitting and categorizing free text
pub fn split_prompt(input: &str) -> String {
    format!(
        "Analyze the following shopping list input: \"{input}\".\n\
         Split it into individual items if there are multiple (comma or space separated).\n\
         Assign the most appropriate category to each item from this list:\n\
         [{categories}].\n\
         If unclear, use \"{other}\".",
        categories = category_list(),
        other = Category::Other,
    )
}

/// Instruction for categorizing a batch of existing names
pub fn batch_prompt(names: &[&str]) -> String {
    let names_json = serde_json::to_string(names).unwrap_or_else(|_| "[]".to_string());
    format!(
        "You are a helpful shopping assistant.\n\
         The following shopping items need to be categorized correctly.\n\n\
         The allowed categories are: {categories}.\n\n\
         Items to categorize:\n\
         {names_json}\n\n\
         Return a JSON array of objects, each with a \"name\" (from the input list) \
         and a \"category\" (from the allowed list).\n\
         If a category is ambiguous, choose the best fit or \"{other}\".",
        categories = category_list(),
        other = Category::Other,
    )
}

/// Response schema: array of objects with required string `name` and `category`
pub fn categorized_items_schema() -> Value {
    json!({
        "type": "ARRAY",
        "items": {
            "type": "OBJECT",
            "properties": {
                "name": { "type": "STRING" },
                "category": { "type": "STRING" }
            },
            "required": ["name", "category"]
        }
    })
}

/// HTTP client for the Gemini `generateContent` endpoint
pub struct GeminiClient {
    http: reqwest::blocking::Client,
    endpoint: String,
    model: String,
    api_key: String,
}

impl GeminiClient {
    pub fn new(
        api_key: impl Into<String>,
        model: impl Into<String>,
        endpoint: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, SmartcartError> {
        let http = reqwest::blocking::Client::builder()
            .timeout(timeout)
            .build()?;
        Ok(Self {
            http,
            endpoint: endpoint.into(),
            model: model.into(),
            api_key: api_key.into(),
        })
    }

    /// Build a client when the configured API key is present
    pub fn from_config(config: &CategorizerConfig) -> Result<Option<Self>, SmartcartError> {
        let Some(api_key) = config.api_key() else {
            return Ok(None);
        };
        Self::new(
            api_key,
            &config.model,
            &config.endpoint,
            Duration::from_secs(config.timeout_secs),
        )
        .map(Some)
    }

    fn url(&self) -> String {
        format!(
            "{}/models/{}:generateContent",
            self.endpoint.trim_end_matches('/'),
            self.model
        )
    }
}

impl CompletionService for GeminiClient {
    fn complete(&self, request: &CompletionRequest) -> Result<Option<String>, SmartcartError> {
        debug!(model = %self.model, "sending categorizer request");
        let response = self
            .http
            .post(self.url())
            .header("x-goog-api-key", &self.api_key)
            .json(&request_body(request))
            .send()?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().unwrap_or_default();
            return Err(SmartcartError::ServiceStatus {
                status: status.as_u16(),
                body,
            });
        }

        let parsed: GenerateContentResponse = response.json()?;
        Ok(parsed.text())
    }
}

/// JSON body for a `generateContent` call
pub fn request_body(request: &CompletionRequest) -> Value {
    json!({
        "contents": [
            { "parts": [ { "text": request.prompt } ] }
        ],
        "generationConfig": {
            "responseMimeType": "application/json",
            "responseSchema": request.response_schema
        }
    })
}

#[derive(Debug, Default, Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Default, Deserialize)]
struct Candidate {
    #[serde(default)]
    content: Option<Content>,
}

#[derive(Debug, Default, Deserialize)]
struct Content {
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Debug, Default, Deserialize)]
struct Part {
    #[serde(default)]
    text: Option<String>,
}

impl GenerateContentResponse {
    /// Concatenated text of the first candidate, if it has any
    fn text(&self) -> Option<String> {
        let content = self.candidates.first()?.content.as_ref()?;
        let text: String = content
            .parts
            .iter()
            .filter_map(|part| part.text.as_deref())
            .collect();
        if text.is_empty() { None } else { Some(text) }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::{Cell, RefCell};
    use std::rc::Rc;

    /// Replays canned responses and counts calls
    struct ScriptedService {
        responses: RefCell<Vec<Result<Option<String>, SmartcartError>>>,
        calls: Rc<Cell<usize>>,
        last_prompt: Rc<RefCell<String>>,
    }

    impl ScriptedService {
        fn new(response: Result<Option<String>, SmartcartError>) -> Self {
            Self {
                responses: RefCell::new(vec![response]),
                calls: Rc::new(Cell::new(0)),
                last_prompt: Rc::new(RefCell::new(String::new())),
            }
        }
    }

    impl CompletionService for ScriptedService {
        fn complete(&self, request: &CompletionRequest) -> Result<Option<String>, SmartcartError> {
            self.calls.set(self.calls.get() + 1);
            *self.last_prompt.borrow_mut() = request.prompt.clone();
            self.responses
                .borrow_mut()
                .pop()
                .unwrap_or(Ok(None))
        }
    }

    fn scripted(
        response: Result<Option<String>, SmartcartError>,
    ) -> (Categorizer, Rc<Cell<usize>>, Rc<RefCell<String>>) {
        let service = ScriptedService::new(response);
        let calls = service.calls.clone();
        let prompt = service.last_prompt.clone();
        (Categorizer::with_service(service), calls, prompt)
    }

    #[test]
    fn test_offline_parse_returns_input_verbatim() {
        let categorizer = Categorizer::offline();
        let outcome = categorizer.parse_and_categorize("milk, bread");

        assert_eq!(
            outcome,
            CategorizeOutcome::Fallback {
                items: vec![CategorizedItem::new("milk, bread", "Other")],
                reason: FallbackReason::MissingCredential,
            }
        );
    }

    #[test]
    fn test_parse_success() {
        let (categorizer, calls, prompt) = scripted(Ok(Some(
            r#"[{"name":"milk","category":"Dairy & Eggs"},{"name":"bread","category":"Bakery"}]"#
                .to_string(),
        )));

        let outcome = categorizer.parse_and_categorize("milk, bread");

        assert!(!outcome.is_fallback());
        assert_eq!(
            outcome.into_items(),
            vec![
                CategorizedItem::new("milk", "Dairy & Eggs"),
                CategorizedItem::new("bread", "Bakery"),
            ]
        );
        assert_eq!(calls.get(), 1);
        assert!(prompt.borrow().contains("\"milk, bread\""));
        assert!(prompt.borrow().contains("Fruits & Vegetables, Meat & Fish"));
    }

    #[test]
    fn test_parse_accepts_non_canonical_category() {
        let (categorizer, _, _) = scripted(Ok(Some(
            r#"[{"name":"chips","category":"Snacks"}]"#.to_string(),
        )));
        let items = categorizer.parse_and_categorize("chips").into_items();
        assert_eq!(items[0].category, "Snacks");
    }

    #[test]
    fn test_parse_empty_response_falls_back() {
        let (categorizer, _, _) = scripted(Ok(None));
        let outcome = categorizer.parse_and_categorize("eggs");
        assert_eq!(
            outcome,
            CategorizeOutcome::Fallback {
                items: vec![CategorizedItem::new("eggs", "Other")],
                reason: FallbackReason::EmptyResponse,
            }
        );

        let (categorizer, _, _) = scripted(Ok(Some("   ".to_string())));
        assert!(categorizer.parse_and_categorize("eggs").is_fallback());
    }

    #[test]
    fn test_parse_malformed_response_falls_back() {
        let (categorizer, _, _) = scripted(Ok(Some("{\"oops\": true}".to_string())));
        let outcome = categorizer.parse_and_categorize("eggs");
        match outcome {
            CategorizeOutcome::Fallback {
                items,
                reason: FallbackReason::Malformed(_),
            } => assert_eq!(items, vec![CategorizedItem::new("eggs", "Other")]),
            other => panic!("expected malformed fallback, got {:?}", other),
        }
    }

    #[test]
    fn test_parse_service_error_falls_back() {
        let (categorizer, _, _) = scripted(Err(SmartcartError::ServiceStatus {
            status: 500,
            body: "boom".to_string(),
        }));
        let outcome = categorizer.parse_and_categorize("eggs");
        assert!(matches!(
            outcome,
            CategorizeOutcome::Fallback {
                reason: FallbackReason::Service(_),
                ..
            }
        ));
    }

    #[test]
    fn test_batch_empty_input_makes_no_call() {
        let (categorizer, calls, _) = scripted(Ok(Some("[]".to_string())));
        let names: [&str; 0] = [];
        let outcome = categorizer.recategorize_batch(&names);

        assert_eq!(
            outcome,
            RecategorizeOutcome::Unchanged {
                reason: FallbackReason::EmptyInput
            }
        );
        assert_eq!(calls.get(), 0);
    }

    #[test]
    fn test_batch_offline_is_unchanged() {
        let categorizer = Categorizer::offline();
        let outcome = categorizer.recategorize_batch(&["Milk"]);
        assert!(outcome.is_unchanged());
        assert!(outcome.into_mapping().is_empty());
    }

    #[test]
    fn test_batch_success_lowercases_and_filters() {
        let (categorizer, calls, prompt) = scripted(Ok(Some(
            r#"[
                {"name":"Milk","category":"Dairy & Eggs"},
                {"name":"Bread","category":""},
                {"name":"","category":"Bakery"},
                {"category":"Other"},
                {"name":"Soap","category":"Household"}
            ]"#
            .to_string(),
        )));

        let mapping = categorizer
            .recategorize_batch(&["Milk", "Bread", "Soap", "Milk"])
            .into_mapping();

        assert_eq!(calls.get(), 1);
        assert_eq!(mapping.len(), 2);
        assert_eq!(mapping.get("milk").map(String::as_str), Some("Dairy & Eggs"));
        assert_eq!(mapping.get("soap").map(String::as_str), Some("Household"));
        assert!(prompt.borrow().contains(r#"["Milk","Bread","Soap"]"#));
    }

    #[test]
    fn test_batch_failure_is_unchanged() {
        let (categorizer, _, _) = scripted(Ok(Some("not json".to_string())));
        let outcome = categorizer.recategorize_batch(&["Milk"]);
        assert!(matches!(
            outcome,
            RecategorizeOutcome::Unchanged {
                reason: FallbackReason::Malformed(_)
            }
        ));
    }

    #[test]
    fn test_from_config_without_key_is_offline() {
        let config = CategorizerConfig {
            api_key_env: "SMARTCART_TEST_KEY_THAT_IS_NEVER_SET".to_string(),
            ..CategorizerConfig::default()
        };
        assert!(!Categorizer::from_config(&config).is_configured());
    }

    #[test]
    fn test_request_body_shape() {
        let request = CompletionRequest::categorized_items("hello".to_string());
        let body = request_body(&request);
        assert_eq!(body["contents"][0]["parts"][0]["text"], "hello");
        assert_eq!(
            body["generationConfig"]["responseMimeType"],
            "application/json"
        );
        assert_eq!(
            body["generationConfig"]["responseSchema"]["items"]["required"],
            json!(["name", "category"])
        );
    }

    #[test]
    fn test_response_text_extraction() {
        let parsed: GenerateContentResponse = serde_json::from_str(
            r#"{"candidates":[{"content":{"parts":[{"text":"[{\"name\":"},{"text":"\"a\",\"category\":\"Other\"}]"}]}}]}"#,
        )
        .unwrap();
        assert_eq!(
            parsed.text().as_deref(),
            Some(r#"[{"name":"a","category":"Other"}]"#)
        );

        let empty: GenerateContentResponse = serde_json::from_str("{}").unwrap();
        assert!(empty.text().is_none());
    }

    #[test]
    fn test_url_trims_trailing_slash() {
        let client = GeminiClient::new(
            "key",
            "gemini-2.5-flash",
            "https://example.test/v1beta/",
            Duration::from_secs(5),
        )
        .unwrap();
        assert_eq!(
            client.url(),
            "https://example.test/v1beta/models/gemini-2.5-flash:generateContent"
        );
    }

    #[test]
    fn test_fallback_reason_display() {
        assert_eq!(
            FallbackReason::MissingCredential.to_string(),
            "no API key configured"
        );
        assert!(
            FallbackReason::Service("timeout".to_string())
                .to_string()
                .contains("timeout")
        );
    }

    #[test]
    fn test_fallback_reason_localizes_with_detail() {
        let translator = crate::i18n::Translator::new("es");
        let reason = FallbackReason::Malformed("expected value".to_string());
        let detail = reason.detail().unwrap_or_default();
        assert_eq!(
            translator.t_with(reason.i18n_key(), &[("detail", detail)]),
            "respuesta no válida: expected value"
        );
        assert_eq!(FallbackReason::EmptyResponse.detail(), None);
    }

    #[test]
    fn test_offline_parse_keeps_surrounding_whitespace() {
        let outcome = Categorizer::offline().parse_and_categorize("  milk, bread ");
        assert_eq!(outcome.items()[0].name, "  milk, bread ");
    }
}
