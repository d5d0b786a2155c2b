//! Component trait - Interface for screens and dialogs
//!
//! Each screen or dialog owns its local state, turns keys into Actions and
//! draws itself. The App routes keys to whichever component is on top.

use crate::action::Action;
use anyhow::Result;
use crossterm::event::KeyEvent;
use ratatui::{layout::Rect, Frame};

/// Trait for UI components
///
/// 1. `handle_key_event` - local edits (typing into a field, moving focus)
///    happen here; anything the App must act on comes back as an Action
/// 2. `update` - apply an Action that concerns only this component
/// 3. `draw` - render into `area`
pub trait Component {
    fn handle_key_event(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        let _ = key;
        Ok(None)
    }

    fn update(&mut self, action: Action) -> Result<Option<Action>> {
        let _ = action;
        Ok(None)
    }

    fn draw(&mut self, frame: &mut Frame, area: Rect) -> Result<()>;
}
