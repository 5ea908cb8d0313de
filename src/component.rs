//! Component trait - Interface for UI components
//!
//! Each screen and dialog encapsulates its own state, key handling and
//! rendering. Components never call the backend; they return Actions and the
//! App decides what to do with them.

use crate::action::Action;
use anyhow::Result;
use crossterm::event::KeyEvent;
use ratatui::{layout::Rect, Frame};

/// Trait for UI components
///
/// 1. `handle_key_event` - edit local state (text fields, focus) and/or
///    return an Action for the App
/// 2. `update` - apply an Action routed back from the App
/// 3. `draw` - render
pub trait Component {
    /// Called once after construction
    fn init(&mut self) -> Result<()> {
        Ok(())
    }

    fn handle_key_event(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        let _ = key;
        Ok(None)
    }

    /// Update component state based on an Action. May return a follow-up Action.
    fn update(&mut self, action: Action) -> Result<Option<Action>> {
        let _ = action;
        Ok(None)
    }

    /// Render into `area`. Should not change state beyond scroll clamping.
    fn draw(&mut self, frame: &mut Frame, area: Rect) -> Result<()>;
}
