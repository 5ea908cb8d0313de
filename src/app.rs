//! Root application component
//!
//! The App owns the screen state machine. Components turn keys into Actions;
//! the App applies them, hands network work to the request runner and
//! applies completions on `Tick`. Every state transition bumps `generation`,
//! so results that belong to a screen the user has left are ignored.

use crate::action::Action;
use crate::component::Component;
use crate::components::{
    calculate_screen_layout, draw_notice, draw_step_header, DatabaseSetupComponent,
    FileAnalysisComponent, HeaderContext, HelpDialog, QuitDialog, ServerSetupComponent,
    ToolSelectionComponent,
};
use crate::config::Config;
use crate::model::modal::{Modal, ModalStack};
use crate::model::{
    AnalysisTool, AppState, DatabaseRequest, DatabaseSetupResult, Notice, PaginationParams,
    ServerConfig,
};
use crate::services::export::format_size;
use crate::services::{
    save_artifact, AnalysisBackend, ApiError, Completion, Connector, HealthMonitor, Outcome,
    RequestRunner, EXPORT_FILE_NAME,
};
use anyhow::Result;
use chrono::{DateTime, Local};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{layout::Rect, Frame};
use std::sync::Arc;
use std::time::Instant;

/// Shown when the backend reports `success: false` without a message
const DATABASE_SETUP_FALLBACK: &str = "Failed to setup database";

// ═══════════════════════════════════════════════════════════════════════════════
// App Struct
// ═══════════════════════════════════════════════════════════════════════════════

pub struct App {
    /// Visible screen
    pub state: AppState,

    /// Bumped on every transition; tags outstanding requests
    pub generation: u64,

    pub config: Config,

    /// Builds a backend for the address entered on the connection screen
    connector: Connector,

    /// Session backend, present while connected
    backend: Option<Arc<dyn AnalysisBackend>>,

    /// Address of the session backend
    pub server: Option<ServerConfig>,

    /// Chosen on the tool picker; only displayed
    pub selected_tool: Option<AnalysisTool>,

    runner: RequestRunner,

    /// Running while in a polled state
    health: Option<HealthMonitor>,

    pub last_health_check: Option<DateTime<Local>>,

    /// Banner at the bottom of the screen
    pub notice: Option<Notice>,

    pub modals: ModalStack,

    pub should_quit: bool,

    // ─────────────────────────────────────────────────────────────────────────
    // Child Components
    // ─────────────────────────────────────────────────────────────────────────
    pub server_setup: ServerSetupComponent,
    pub tool_selection: ToolSelectionComponent,
    pub database_setup: DatabaseSetupComponent,
    pub file_analysis: FileAnalysisComponent,
    pub quit_dialog: QuitDialog,
    pub help_dialog: HelpDialog,
}

// ═══════════════════════════════════════════════════════════════════════════════
// App Implementation
// ═══════════════════════════════════════════════════════════════════════════════

impl App {
    pub fn new(config: Config, connector: Connector) -> App {
        App {
            state: AppState::ServerSetup,
            generation: 0,
            server_setup: ServerSetupComponent::new(&config.host, config.port),
            tool_selection: ToolSelectionComponent::new(),
            database_setup: DatabaseSetupComponent::new(config.min_amount_instructions),
            file_analysis: FileAnalysisComponent::new(),
            quit_dialog: QuitDialog,
            help_dialog: HelpDialog::default(),
            config,
            connector,
            backend: None,
            server: None,
            selected_tool: None,
            runner: RequestRunner::new(),
            health: None,
            last_health_check: None,
            notice: None,
            modals: ModalStack::new(),
            should_quit: false,
        }
    }

    pub fn is_connected(&self) -> bool {
        self.backend.is_some()
    }

    pub fn is_polling(&self) -> bool {
        self.health.as_ref().is_some_and(|h| h.is_running())
    }

    /// Leave the current screen and mount `to`
    fn transition(&mut self, to: AppState) {
        let from = self.state;
        self.generation += 1;
        if let Some(mut monitor) = self.health.take() {
            monitor.stop();
        }

        self.state = to;
        tracing::info!(?from, ?to, generation = self.generation, "state transition");
        self.mount(to);

        if to.is_polled() {
            if let Some(backend) = &self.backend {
                self.health = Some(HealthMonitor::start(
                    Arc::clone(backend),
                    self.config.health_check_interval(),
                    self.generation,
                    self.runner.sender(),
                ));
            }
        }
    }

    /// Fresh component for the entered screen
    fn mount(&mut self, state: AppState) {
        match state {
            AppState::ServerSetup => {
                self.server_setup = match &self.server {
                    Some(server) => ServerSetupComponent::new(&server.host, server.port),
                    None => ServerSetupComponent::new(&self.config.host, self.config.port),
                };
            }
            AppState::ToolSelection => {
                self.tool_selection = ToolSelectionComponent::new();
            }
            AppState::DatabaseSetup => {
                self.database_setup =
                    DatabaseSetupComponent::new(self.config.min_amount_instructions);
            }
            AppState::FileAnalysis => {
                self.file_analysis = FileAnalysisComponent::new();
                self.fetch_snippets();
            }
        }
    }

    /// Periodic probe failed: back to the connection screen
    fn demote(&mut self, error: &ApiError) {
        tracing::warn!(state = ?self.state, error = %error, "health check failed, disconnecting");
        self.backend = None;
        self.transition(AppState::ServerSetup);
        self.server = None;
        self.last_health_check = None;
        self.raise(Notice::lost_connection());
    }

    fn raise(&mut self, notice: Notice) {
        tracing::debug!(severity = ?notice.severity, message = %notice.message, "notice");
        self.notice = Some(notice);
    }

    fn clear_lost_connection(&mut self) {
        if self.notice.as_ref().is_some_and(|n| n.is_lost_connection()) {
            self.notice = None;
        }
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Requests
    // ─────────────────────────────────────────────────────────────────────────

    fn connect(&mut self, server: ServerConfig) {
        if self.state != AppState::ServerSetup {
            return;
        }
        tracing::info!(address = %server.address(), "connecting");
        let connector = Arc::clone(&self.connector);
        self.runner.spawn(self.generation, move || {
            let result = connector(&server).and_then(|backend| {
                backend.check_health()?;
                Ok(backend)
            });
            Outcome::Connected { server, result }
        });
    }

    fn submit_database(&mut self, request: DatabaseRequest) {
        if self.state != AppState::DatabaseSetup {
            return;
        }
        let Some(backend) = self.backend.clone() else {
            self.database_setup.submit_finished();
            return;
        };
        tracing::info!(path = %request.path(), "submitting database request");
        self.runner.spawn(self.generation, move || {
            let result = match &request {
                DatabaseRequest::Create(config) => backend.create_database(config),
                DatabaseRequest::Load(config) => Ok(backend.load_database(config)),
            };
            Outcome::DatabaseReady(result)
        });
    }

    fn fetch_snippets(&mut self) {
        let Some(backend) = self.backend.clone() else {
            self.file_analysis.listing_failed("Not connected");
            return;
        };
        let params = PaginationParams {
            page: 1,
            page_size: self.config.page_size,
        };
        self.runner.spawn(self.generation, move || {
            Outcome::SnippetsLoaded(backend.get_snippets_list(params))
        });
    }

    fn export(&mut self) {
        let Some(backend) = self.backend.clone() else {
            self.file_analysis.export_finished("Export failed: not connected");
            return;
        };
        self.runner.spawn(self.generation, move || {
            Outcome::Exported(backend.export_results())
        });
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Completions
    // ─────────────────────────────────────────────────────────────────────────

    fn drain_completions(&mut self) {
        for completion in self.runner.poll() {
            let Completion {
                generation,
                elapsed,
                outcome,
            } = completion;

            if outcome.is_screen_scoped() && generation != self.generation {
                tracing::debug!(
                    request = outcome.name(),
                    generation,
                    current = self.generation,
                    "dropping stale completion"
                );
                continue;
            }
            tracing::debug!(
                request = outcome.name(),
                elapsed_ms = elapsed.as_millis() as u64,
                "request finished"
            );
            self.apply(outcome);
        }
    }

    fn apply(&mut self, outcome: Outcome) {
        match outcome {
            Outcome::Connected { server, result } => match result {
                Ok(backend) => {
                    tracing::info!(address = %server.address(), "connected");
                    self.server_setup.reset_busy();
                    self.backend = Some(backend);
                    self.server = Some(server);
                    self.last_health_check = Some(Local::now());
                    self.clear_lost_connection();
                    self.transition(AppState::ToolSelection);
                }
                Err(e) => {
                    tracing::warn!(address = %server.address(), error = %e, "connection failed");
                    self.server_setup.connect_failed(e.to_string());
                }
            },
            Outcome::DatabaseReady(result) => {
                self.database_setup.submit_finished();
                match result {
                    Ok(DatabaseSetupResult { success: true, .. }) => {
                        self.transition(AppState::FileAnalysis);
                    }
                    Ok(DatabaseSetupResult { message, .. }) => {
                        let message = if message.is_empty() {
                            DATABASE_SETUP_FALLBACK.to_string()
                        } else {
                            message
                        };
                        self.raise(Notice::error(message));
                    }
                    Err(e) => {
                        tracing::error!(error = %e, "database setup failed");
                        self.raise(Notice::error(e.to_string()));
                    }
                }
            }
            Outcome::SnippetsLoaded(result) => match result {
                Ok(page) => {
                    tracing::info!(total = page.total, rows = page.items.len(), "snippets loaded");
                    self.file_analysis.set_listing(page);
                }
                Err(e) => {
                    tracing::error!(error = %e, "failed to load snippets");
                    self.file_analysis.listing_failed(e.to_string());
                }
            },
            Outcome::Exported(result) => {
                let saved = result.map_err(anyhow::Error::from).and_then(|bytes| {
                    save_artifact(&self.config.export_dir, EXPORT_FILE_NAME, &bytes)
                        .map(|path| (path, bytes.len()))
                });
                match saved {
                    Ok((path, size)) => {
                        let message =
                            format!("Exported {} to {}", format_size(size), path.display());
                        self.file_analysis.export_finished(message.clone());
                        self.raise(Notice::info(message));
                    }
                    Err(e) => {
                        tracing::error!(error = %e, "export failed");
                        self.file_analysis.export_finished("Export failed");
                        self.raise(Notice::error(format!("Export failed: {}", e)));
                    }
                }
            }
            Outcome::Health(result) => match result {
                Ok(()) => {
                    self.last_health_check = Some(Local::now());
                    self.clear_lost_connection();
                }
                Err(e) => {
                    if self.state.is_polled() {
                        self.demote(&e);
                    }
                }
            },
        }
    }

    fn expire_notice(&mut self, now: Instant) {
        let timeout = self.config.notice_timeout();
        if self.notice.as_ref().is_some_and(|n| n.is_expired(now, timeout)) {
            self.notice = None;
        }
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// Component Implementation
// ═══════════════════════════════════════════════════════════════════════════════

impl Component for App {
    fn handle_key_event(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            return Ok(Some(Action::ForceQuit));
        }

        if let Some(modal) = self.modals.top().cloned() {
            return match modal {
                Modal::QuitConfirm => self.quit_dialog.handle_key_event(key),
                Modal::Help => self.help_dialog.handle_key_event(key),
            };
        }

        if key.code == KeyCode::F(1) {
            return Ok(Some(Action::OpenHelp));
        }
        if key.code == KeyCode::Esc && self.notice.is_some() {
            return Ok(Some(Action::DismissNotice));
        }

        match self.state {
            AppState::ServerSetup => self.server_setup.handle_key_event(key),
            AppState::ToolSelection => self.tool_selection.handle_key_event(key),
            AppState::DatabaseSetup => self.database_setup.handle_key_event(key),
            AppState::FileAnalysis => self.file_analysis.handle_key_event(key),
        }
    }

    fn update(&mut self, action: Action) -> Result<Option<Action>> {
        match action {
            // ─────────────────────────────────────────────────────────────────
            // App Lifecycle
            // ─────────────────────────────────────────────────────────────────
            Action::Tick => {
                self.drain_completions();
                self.expire_notice(Instant::now());
            }
            Action::Resize(_, _) => {}
            Action::ForceQuit => {
                self.should_quit = true;
            }

            // ─────────────────────────────────────────────────────────────────
            // Modals & Notices
            // ─────────────────────────────────────────────────────────────────
            Action::OpenQuitDialog => self.modals.push(Modal::QuitConfirm),
            Action::OpenHelp => {
                self.help_dialog.scroll_offset = 0;
                self.modals.push(Modal::Help);
            }
            Action::CloseModal => {
                self.modals.pop();
            }
            Action::ConfirmModal => {
                if self.modals.pop() == Some(Modal::QuitConfirm) {
                    self.should_quit = true;
                }
            }
            Action::DismissNotice => self.notice = None,

            // ─────────────────────────────────────────────────────────────────
            // Workflow
            // ─────────────────────────────────────────────────────────────────
            Action::Connect(server) => self.connect(server),
            Action::SelectTool(tool) => {
                if self.state == AppState::ToolSelection && tool.is_available() {
                    tracing::info!(tool = tool.id(), "tool selected");
                    self.selected_tool = Some(tool);
                    self.transition(AppState::DatabaseSetup);
                }
            }
            Action::SubmitDatabase(request) => self.submit_database(request),
            Action::BackToDatabaseSetup => {
                if self.state == AppState::FileAnalysis {
                    self.transition(AppState::DatabaseSetup);
                }
            }
            Action::ExportResults => {
                if self.state == AppState::FileAnalysis {
                    self.export();
                }
            }

            // ─────────────────────────────────────────────────────────────────
            // Scrolling (delegate to the results screen)
            // ─────────────────────────────────────────────────────────────────
            Action::ScrollUp
            | Action::ScrollDown
            | Action::PageUp
            | Action::PageDown
            | Action::FirstItem
            | Action::LastItem => {
                if self.state == AppState::FileAnalysis {
                    return self.file_analysis.update(action);
                }
            }
        }
        Ok(None)
    }

    fn draw(&mut self, frame: &mut Frame, area: Rect) -> Result<()> {
        let layout = calculate_screen_layout(area, self.notice.is_some());

        let header = HeaderContext {
            state: self.state,
            server: self.server.as_ref(),
            tool: self.selected_tool,
            last_health_check: self.last_health_check,
        };
        draw_step_header(frame, layout.header, &header);

        match self.state {
            AppState::ServerSetup => self.server_setup.draw(frame, layout.body)?,
            AppState::ToolSelection => self.tool_selection.draw(frame, layout.body)?,
            AppState::DatabaseSetup => self.database_setup.draw(frame, layout.body)?,
            AppState::FileAnalysis => self.file_analysis.draw(frame, layout.body)?,
        }

        if let (Some(notice_area), Some(notice)) = (layout.notice, &self.notice) {
            draw_notice(frame, notice_area, notice);
        }

        if let Some(modal) = self.modals.top().cloned() {
            match modal {
                Modal::QuitConfirm => self.quit_dialog.draw(frame, area)?,
                Modal::Help => self.help_dialog.draw(frame, area)?,
            }
        }
        Ok(())
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// Tests
// ═══════════════════════════════════════════════════════════════════════════════
