//! Model layer
//!
//! - `domain` - backend request/response shapes
//! - `tool` - analysis tool catalog
//! - `ui` - controller screen state
//! - `notice` - banner messages
//! - `modal` - overlay stack

pub mod domain;
pub mod modal;
pub mod notice;
pub mod tool;
pub mod ui;

pub use domain::{
    CreateDatabaseConfig, DatabaseRequest, DatabaseSetupResult, LineRange, LoadDatabaseConfig,
    MarkedRange, PaginatedResponse, PaginationParams, ServerConfig, ServerStatus, Snippet,
    SnippetListItem, ValidationError,
};
pub use notice::{Notice, Severity};
pub use tool::AnalysisTool;
pub use ui::AppState;
