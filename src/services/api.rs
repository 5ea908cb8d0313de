//! HTTP façade for the analysis backend
//!
//! This is the only place that performs network I/O. It knows the base URL,
//! the endpoint paths and how to normalize the backend's loosely shaped
//! responses. Every request is attempted exactly once.

use crate::model::{
    CreateDatabaseConfig, DatabaseSetupResult, LineRange, LoadDatabaseConfig, PaginatedResponse,
    PaginationParams, ServerConfig, Snippet, SnippetListItem,
};
use reqwest::blocking::{Client, Response};
use reqwest::header::{ACCEPT, CONTENT_TYPE};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::sync::Arc;
use std::time::{Duration, Instant};
use thiserror::Error;

/// File name used when saving the export artifact
pub const EXPORT_FILE_NAME: &str = "analysis-results.json";

const DEFAULT_LOAD_MESSAGE: &str = "Database loaded successfully";

/// Content type browsers attach to a string body; the backend is known to accept it.
const PLAIN_TEXT: &str = "text/plain;charset=UTF-8";

/// Errors surfaced by the façade. The `Display` text is shown to the user.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Failed to connect to server: {0}")]
    Unreachable(String),

    #[error("Failed to connect to server: Server is not responding (Status: {0})")]
    Unhealthy(u16),

    #[error("HTTP error! status: {0}")]
    Status(u16),

    #[error("{0}")]
    Transport(#[from] reqwest::Error),

    #[error("Failed to parse server response")]
    Parse(#[source] serde_json::Error),

    #[error("Invalid response structure from server")]
    InvalidResponse,
}

/// Operations the controller needs from the backend
///
/// Implemented by [`ApiClient`] for real traffic and by a stub in tests.
pub trait AnalysisBackend: Send + Sync {
    /// Liveness probe
    fn check_health(&self) -> Result<(), ApiError>;

    fn create_database(&self, config: &CreateDatabaseConfig)
        -> Result<DatabaseSetupResult, ApiError>;

    /// Tolerant: transport and HTTP failures become `success: false`.
    fn load_database(&self, config: &LoadDatabaseConfig) -> DatabaseSetupResult;

    fn get_snippets_list(
        &self,
        params: PaginationParams,
    ) -> Result<PaginatedResponse<SnippetListItem>, ApiError>;

    fn submit_ranges(&self, ranges: &[LineRange]) -> Result<Vec<Snippet>, ApiError>;

    /// Opaque export artifact
    fn export_results(&self) -> Result<Vec<u8>, ApiError>;

    /// Raw file contents, one entry per line
    fn load_file(&self, file_path: &str) -> Result<Vec<String>, ApiError>;
}

/// Builds a backend for a server address chosen on the Connection Screen
pub type Connector =
    Arc<dyn Fn(&ServerConfig) -> Result<Arc<dyn AnalysisBackend>, ApiError> + Send + Sync>;

/// Connector producing real [`ApiClient`]s
pub fn http_connector(timeout: Duration) -> Connector {
    Arc::new(
        move |server: &ServerConfig| -> Result<Arc<dyn AnalysisBackend>, ApiError> {
            let client = ApiClient::new(server, timeout)?;
            Ok(Arc::new(client))
        },
    )
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct CreateDatabasePayload<'a> {
    directory: &'a str,
    min_number_of_instruction: u32,
}

#[derive(Serialize)]
struct AnalyzePayload<'a> {
    ranges: &'a [LineRange],
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct LoadFilePayload<'a> {
    file_path: &'a str,
}

#[derive(Deserialize)]
struct LoadFileResponse {
    content: String,
}

/// Blocking HTTP client bound to one backend address
pub struct ApiClient {
    client: Client,
    base_url: String,
}

impl ApiClient {
    pub fn new(server: &ServerConfig, timeout: Duration) -> Result<Self, ApiError> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            base_url: server.base_url(),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn ensure_success(response: Response) -> Result<Response, ApiError> {
        let status = response.status();
        if status.is_success() {
            Ok(response)
        } else {
            tracing::warn!(status = status.as_u16(), url = %response.url(), "backend returned error status");
            Err(ApiError::Status(status.as_u16()))
        }
    }
}

impl AnalysisBackend for ApiClient {
    fn check_health(&self) -> Result<(), ApiError> {
        let response = self
            .client
            .get(self.url("/health"))
            .send()
            .map_err(|e| ApiError::Unreachable(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(ApiError::Unhealthy(status.as_u16()));
        }
        Ok(())
    }

    fn create_database(
        &self,
        config: &CreateDatabaseConfig,
    ) -> Result<DatabaseSetupResult, ApiError> {
        let payload = CreateDatabasePayload {
            directory: &config.source_directory_path,
            min_number_of_instruction: config.min_amount_instructions,
        };
        let body = serde_json::to_string(&payload).map_err(ApiError::Parse)?;

        tracing::info!(directory = %config.source_directory_path, min = config.min_amount_instructions, "creating database");
        let response = self
            .client
            .post(self.url("/createdatabase"))
            .header(CONTENT_TYPE, PLAIN_TEXT)
            .body(body)
            .send()
            .inspect_err(|e| tracing::error!(error = %e, "error creating database"))?;

        let text = Self::ensure_success(response)?.text()?;
        serde_json::from_str(&text).map_err(ApiError::Parse)
    }

    fn load_database(&self, config: &LoadDatabaseConfig) -> DatabaseSetupResult {
        tracing::info!(path = %config.database_path, "loading database");
        let response = self
            .client
            .post(self.url("/loadexistingdb"))
            .header(CONTENT_TYPE, PLAIN_TEXT)
            .body(config.database_path.clone())
            .send();

        let response = match response {
            Ok(r) => r,
            Err(e) => {
                tracing::error!(error = %e, "error loading database");
                return DatabaseSetupResult::failed(e.to_string());
            }
        };

        let status = response.status();
        match response.text() {
            Ok(text) => interpret_load_response(status.as_u16(), status.is_success(), &text),
            Err(e) => DatabaseSetupResult::failed(e.to_string()),
        }
    }

    fn get_snippets_list(
        &self,
        params: PaginationParams,
    ) -> Result<PaginatedResponse<SnippetListItem>, ApiError> {
        let started = Instant::now();
        let url = self.url("/getsnippetslist");
        tracing::debug!(%url, "fetching snippets list");

        let response = self.client.get(&url).header(ACCEPT, "application/json").send()?;
        tracing::debug!(elapsed_ms = started.elapsed().as_millis() as u64, "network fetch finished");

        let response = Self::ensure_success(response)?;
        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .unwrap_or_default()
            .to_string();
        let body = response.text()?;

        let result = normalize_snippet_list(&body, params);
        match &result {
            Ok(list) => tracing::debug!(
                content_type = %content_type,
                bytes = body.len(),
                items = list.items.len(),
                elapsed_ms = started.elapsed().as_millis() as u64,
                "snippets list parsed"
            ),
            Err(e) => tracing::error!(error = %e, content_type = %content_type, "failed to parse snippets list"),
        }
        result
    }

    fn submit_ranges(&self, ranges: &[LineRange]) -> Result<Vec<Snippet>, ApiError> {
        let response = self
            .client
            .post(self.url("/analyze"))
            .json(&AnalyzePayload { ranges })
            .send()
            .inspect_err(|e| tracing::error!(error = %e, "error submitting ranges"))?;

        let text = Self::ensure_success(response)?.text()?;
        serde_json::from_str(&text).map_err(ApiError::Parse)
    }

    fn export_results(&self) -> Result<Vec<u8>, ApiError> {
        let response = self
            .client
            .get(self.url("/export"))
            .send()
            .inspect_err(|e| tracing::error!(error = %e, "error exporting results"))?;

        let bytes = Self::ensure_success(response)?.bytes()?;
        Ok(bytes.to_vec())
    }

    fn load_file(&self, file_path: &str) -> Result<Vec<String>, ApiError> {
        let response = self
            .client
            .post(self.url("/load-file"))
            .json(&LoadFilePayload { file_path })
            .send()
            .inspect_err(|e| tracing::error!(error = %e, "error loading file"))?;

        let text = Self::ensure_success(response)?.text()?;
        let data: LoadFileResponse = serde_json::from_str(&text).map_err(ApiError::Parse)?;
        Ok(split_lines(&data.content))
    }
}

/// Envelope as received, before the rows are read
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawEnvelope {
    items: Vec<Value>,
    total: u64,
    page: u32,
    page_size: u32,
}

/// Turn a `/getsnippetslist` body into the paginated envelope.
///
/// The body is parsed as JSON regardless of the declared content type.
/// A bare array is wrapped using the request's page parameters; an object
/// must already be an envelope and keeps its metadata. Rows that are not
/// objects are skipped; the rest keep their order.
pub fn normalize_snippet_list(
    body: &str,
    params: PaginationParams,
) -> Result<PaginatedResponse<SnippetListItem>, ApiError> {
    let value: Value = serde_json::from_str(body).map_err(ApiError::Parse)?;
    match value {
        Value::Array(rows) => Ok(PaginatedResponse::from_items(list_items(rows), params)),
        Value::Object(_) => {
            let raw: RawEnvelope =
                serde_json::from_value(value).map_err(|_| ApiError::InvalidResponse)?;
            Ok(PaginatedResponse {
                items: list_items(raw.items),
                total: raw.total,
                page: raw.page,
                page_size: raw.page_size,
            })
        }
        _ => Err(ApiError::InvalidResponse),
    }
}

fn list_items(rows: Vec<Value>) -> Vec<SnippetListItem> {
    let received = rows.len();
    let items: Vec<SnippetListItem> = rows
        .into_iter()
        .filter(Value::is_object)
        .filter_map(|row| serde_json::from_value(row).ok())
        .collect();
    if items.len() != received {
        tracing::warn!(received, kept = items.len(), "skipped malformed snippet rows");
    }
    items
}

/// Interpret a `/loadexistingdb` response.
///
/// Non-2xx: failure carrying the body text (or the status when empty).
/// 2xx: always success; the message comes from a JSON `message` field,
/// from the raw text when it is not JSON, or falls back to a default.
pub fn interpret_load_response(status: u16, is_success: bool, body: &str) -> DatabaseSetupResult {
    if !is_success {
        let message = if body.is_empty() {
            ApiError::Status(status).to_string()
        } else {
            body.to_string()
        };
        return DatabaseSetupResult::failed(message);
    }

    if body.trim().is_empty() {
        return DatabaseSetupResult::succeeded(DEFAULT_LOAD_MESSAGE);
    }

    match serde_json::from_str::<Value>(body) {
        Ok(data) => {
            let message = data
                .get("message")
                .and_then(Value::as_str)
                .filter(|m| !m.is_empty())
                .unwrap_or(DEFAULT_LOAD_MESSAGE);
            DatabaseSetupResult::succeeded(message)
        }
        Err(_) => DatabaseSetupResult::succeeded(body),
    }
}

fn split_lines(content: &str) -> Vec<String> {
    content.split('\n').map(str::to_string).collect()
}
