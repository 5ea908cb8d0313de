//! Action enum - All possible application actions
//!
//! Components emit Actions in response to key events; the App applies them.

use crate::model::{AnalysisTool, DatabaseRequest, ServerConfig};
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    // ─────────────────────────────────────────────────────────────────────────
    // App Lifecycle
    // ─────────────────────────────────────────────────────────────────────────
    /// Regular tick; drains finished requests and expires notices
    Tick,
    /// Terminal was resized
    Resize(u16, u16),
    /// Quit without confirmation
    ForceQuit,

    // ─────────────────────────────────────────────────────────────────────────
    // Modals & Notices
    // ─────────────────────────────────────────────────────────────────────────
    OpenQuitDialog,
    OpenHelp,
    CloseModal,
    ConfirmModal,
    /// Hide the notice banner
    DismissNotice,

    // ─────────────────────────────────────────────────────────────────────────
    // Workflow
    // ─────────────────────────────────────────────────────────────────────────
    /// Validated address from the connection screen
    Connect(ServerConfig),
    SelectTool(AnalysisTool),
    SubmitDatabase(DatabaseRequest),
    /// Results screen -> database setup
    BackToDatabaseSetup,
    ExportResults,

    // ─────────────────────────────────────────────────────────────────────────
    // Scrolling
    // ─────────────────────────────────────────────────────────────────────────
    ScrollUp,
    ScrollDown,
    PageUp,
    PageDown,
    FirstItem,
    LastItem,
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Action::Tick => write!(f, "Tick"),
            Action::Resize(w, h) => write!(f, "Resize({}, {})", w, h),
            Action::ForceQuit => write!(f, "ForceQuit"),
            Action::OpenQuitDialog => write!(f, "OpenQuitDialog"),
            Action::OpenHelp => write!(f, "OpenHelp"),
            Action::CloseModal => write!(f, "CloseModal"),
            Action::ConfirmModal => write!(f, "ConfirmModal"),
            Action::DismissNotice => write!(f, "DismissNotice"),
            Action::Connect(server) => write!(f, "Connect({})", server.address()),
            Action::SelectTool(tool) => write!(f, "SelectTool({})", tool.id()),
            Action::SubmitDatabase(DatabaseRequest::Create(c)) => {
                write!(f, "SubmitDatabase(create {})", c.source_directory_path)
            }
            Action::SubmitDatabase(DatabaseRequest::Load(c)) => {
                write!(f, "SubmitDatabase(load {})", c.database_path)
            }
            Action::BackToDatabaseSetup => write!(f, "BackToDatabaseSetup"),
            Action::ExportResults => write!(f, "ExportResults"),
            Action::ScrollUp => write!(f, "ScrollUp"),
            Action::ScrollDown => write!(f, "ScrollDown"),
            Action::PageUp => write!(f, "PageUp"),
            Action::PageDown => write!(f, "PageDown"),
            Action::FirstItem => write!(f, "FirstItem"),
            Action::LastItem => write!(f, "LastItem"),
        }
    }
}
