//! Screen-level state of the controller

/// Which screen is visible. `ServerSetup` is initial; there is no terminal state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AppState {
    #[default]
    ServerSetup,
    ToolSelection,
    DatabaseSetup,
    FileAnalysis,
}

impl AppState {
    pub fn all() -> [AppState; 4] {
        [
            AppState::ServerSetup,
            AppState::ToolSelection,
            AppState::DatabaseSetup,
            AppState::FileAnalysis,
        ]
    }

    pub fn title(&self) -> &'static str {
        match self {
            AppState::ServerSetup => "Connect",
            AppState::ToolSelection => "Tool",
            AppState::DatabaseSetup => "Database",
            AppState::FileAnalysis => "Results",
        }
    }

    pub fn step_number(&self) -> usize {
        match self {
            AppState::ServerSetup => 1,
            AppState::ToolSelection => 2,
            AppState::DatabaseSetup => 3,
            AppState::FileAnalysis => 4,
        }
    }

    /// States in which the backend is polled for liveness
    pub fn is_polled(&self) -> bool {
        !matches!(self, AppState::ServerSetup)
    }
}
