//! Data shapes exchanged with the analysis backend
//!
//! Field names follow the backend's JSON (camelCase) via serde renames.

use serde::{Deserialize, Deserializer, Serialize};
use thiserror::Error;

/// Input rejected before any network call is made
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Host and port are required")]
    MissingHostOrPort,
    #[error("Port must be a number between 1 and 65535")]
    PortOutOfRange,
    #[error("Path is required")]
    MissingPath,
}

/// Network address of the backend
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl ServerConfig {
    pub fn new(host: impl Into<String>, port: u16) -> Self {
        Self {
            host: host.into(),
            port,
        }
    }

    /// Validate raw form input into a server address.
    ///
    /// The port must be a plain integer in `1..=65535`; anything else
    /// (including `0`, `70000` or `50a`) is rejected.
    pub fn parse(host: &str, port: &str) -> Result<Self, ValidationError> {
        let host = host.trim();
        let port = port.trim();
        if host.is_empty() || port.is_empty() {
            return Err(ValidationError::MissingHostOrPort);
        }

        let port: i64 = port.parse().map_err(|_| ValidationError::PortOutOfRange)?;
        if !(1..=65535).contains(&port) {
            return Err(ValidationError::PortOutOfRange);
        }

        Ok(Self::new(host, port as u16))
    }

    pub fn base_url(&self) -> String {
        format!("http://{}:{}", self.host, self.port)
    }

    /// `host:port` for display
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Request to build a new database from a source tree
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateDatabaseConfig {
    pub source_directory_path: String,
    pub min_amount_instructions: u32,
}

/// Request to open a database the backend already has on disk
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadDatabaseConfig {
    pub database_path: String,
}

/// The two database operations are mutually exclusive by construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DatabaseRequest {
    Create(CreateDatabaseConfig),
    Load(LoadDatabaseConfig),
}

impl DatabaseRequest {
    pub fn path(&self) -> &str {
        match self {
            DatabaseRequest::Create(config) => &config.source_directory_path,
            DatabaseRequest::Load(config) => &config.database_path,
        }
    }
}

/// Outcome reported by the backend for create/load
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DatabaseSetupResult {
    pub success: bool,
    #[serde(default)]
    pub message: String,
}

impl DatabaseSetupResult {
    pub fn succeeded(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: message.into(),
        }
    }

    pub fn failed(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: message.into(),
        }
    }
}

/// One row of the results listing
///
/// Cells are read leniently: numbers and booleans are stringified and a
/// missing or null cell is empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SnippetListItem {
    #[serde(default, deserialize_with = "lenient_string")]
    pub snippet_id: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub file_name: String,
}

fn lenient_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match serde_json::Value::deserialize(deserializer)? {
        serde_json::Value::Null => String::new(),
        serde_json::Value::String(s) => s,
        other => other.to_string(),
    })
}

/// Full snippet detail as returned by `/analyze`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Snippet {
    pub id: String,
    pub file_name: String,
    pub instruction_count: u64,
    pub content: String,
    pub start_line: u64,
    pub end_line: u64,
}

/// Inclusive line span submitted to `/analyze`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LineRange {
    pub start_line: u64,
    pub end_line: u64,
}

/// A line span together with the text it covers
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MarkedRange {
    pub start_line: u64,
    pub end_line: u64,
    pub content: String,
}

impl From<&MarkedRange> for LineRange {
    fn from(range: &MarkedRange) -> Self {
        LineRange {
            start_line: range.start_line,
            end_line: range.end_line,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServerStatus {
    pub is_connected: bool,
    pub message: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaginationParams {
    pub page: u32,
    pub page_size: u32,
}

impl Default for PaginationParams {
    fn default() -> Self {
        Self {
            page: 1,
            page_size: 100,
        }
    }
}

/// Envelope for list endpoints
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaginatedResponse<T> {
    pub items: Vec<T>,
    pub total: u64,
    pub page: u32,
    pub page_size: u32,
}

impl<T> PaginatedResponse<T> {
    /// Wrap a bare sequence, taking page metadata from the request
    pub fn from_items(items: Vec<T>, params: PaginationParams) -> Self {
        Self {
            total: items.len() as u64,
            items,
            page: params.page,
            page_size: params.page_size,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_port_bounds() {
        assert_eq!(
            ServerConfig::parse("localhost", "5000"),
            Ok(ServerConfig::new("localhost", 5000))
        );
        assert!(ServerConfig::parse("localhost", "1").is_ok());
        assert!(ServerConfig::parse("localhost", "65535").is_ok());
        assert_eq!(
            ServerConfig::parse("localhost", "0"),
            Err(ValidationError::PortOutOfRange)
        );
        assert_eq!(
            ServerConfig::parse("localhost", "70000"),
            Err(ValidationError::PortOutOfRange)
        );
        assert_eq!(
            ServerConfig::parse("localhost", "-1"),
            Err(ValidationError::PortOutOfRange)
        );
    }

    #[test]
    fn test_port_must_be_an_integer() {
        assert_eq!(
            ServerConfig::parse("localhost", "50a"),
            Err(ValidationError::PortOutOfRange)
        );
        assert_eq!(
            ServerConfig::parse("localhost", "50.5"),
            Err(ValidationError::PortOutOfRange)
        );
    }

    #[test]
    fn test_missing_host_or_port() {
        assert_eq!(
            ServerConfig::parse("   ", "5000"),
            Err(ValidationError::MissingHostOrPort)
        );
        assert_eq!(
            ServerConfig::parse("localhost", ""),
            Err(ValidationError::MissingHostOrPort)
        );
    }

    #[test]
    fn test_base_url() {
        let config = ServerConfig::parse(" 10.0.0.2 ", "8080").unwrap();
        assert_eq!(config.base_url(), "http://10.0.0.2:8080");
        assert_eq!(config.address(), "10.0.0.2:8080");
    }

    #[test]
    fn test_envelope_from_items() {
        let items = vec![
            SnippetListItem {
                snippet_id: "1".to_string(),
                file_name: "a.c".to_string(),
            },
            SnippetListItem {
                snippet_id: "2".to_string(),
                file_name: "b.c".to_string(),
            },
        ];
        let envelope = PaginatedResponse::from_items(
            items.clone(),
            PaginationParams {
                page: 3,
                page_size: 25,
            },
        );
        assert_eq!(envelope.total, 2);
        assert_eq!(envelope.items, items);
        assert_eq!(envelope.page, 3);
        assert_eq!(envelope.page_size, 25);
    }

    #[test]
    fn test_snippet_list_item_uses_camel_case() {
        let item: SnippetListItem =
            serde_json::from_str(r#"{"snippetId":"s-1","fileName":"main.cpp"}"#).unwrap();
        assert_eq!(item.snippet_id, "s-1");
        assert_eq!(item.file_name, "main.cpp");
    }

    #[test]
    fn test_list_item_cells_are_stringified() {
        let item: SnippetListItem =
            serde_json::from_str(r#"{"snippetId":17,"fileName":null,"extra":true}"#).unwrap();
        assert_eq!(item.snippet_id, "17");
        assert_eq!(item.file_name, "");

        let item: SnippetListItem = serde_json::from_str(r#"{"fileName":"a.c"}"#).unwrap();
        assert_eq!(item.snippet_id, "");
        assert_eq!(item.file_name, "a.c");
    }

    #[test]
    fn test_setup_result_message_defaults_to_empty() {
        let result: DatabaseSetupResult = serde_json::from_str(r#"{"success":true}"#).unwrap();
        assert!(result.success);
        assert!(result.message.is_empty());
    }
}
