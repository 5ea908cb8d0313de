//! UI Components
//!
//! One component per screen plus the dialogs drawn over them. Components
//! communicate through Actions rather than direct state mutation.

pub mod database_setup;
pub mod file_analysis;
pub mod help_dialog;
pub mod layout;
pub mod quit_dialog;
pub mod server_setup;
pub mod snippets_table;
pub mod status;
pub mod tool_selection;

pub use database_setup::DatabaseSetupComponent;
pub use file_analysis::FileAnalysisComponent;
pub use help_dialog::HelpDialog;
pub use layout::{calculate_screen_layout, centered_popup};
pub use quit_dialog::QuitDialog;
pub use server_setup::ServerSetupComponent;
pub use snippets_table::SnippetsTable;
pub use status::{draw_notice, draw_step_header, HeaderContext};
pub use tool_selection::ToolSelectionComponent;
