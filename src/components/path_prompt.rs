//! File path prompt for patient import and export

use crate::action::Action;
use crate::component::Component;
use crate::components::form::{Form, FormEvent, FormField};
use crate::model::TransferKind;
use anyhow::Result;
use crossterm::event::KeyEvent;
use ratatui::{layout::Rect, Frame};

static PATH_FIELDS: [FormField<String>; 1] = [FormField {
    label: "CSV File",
    key: false,
    get: |path| path.clone(),
    set: |path, v| *path = v.trim().to_string(),
}];

pub struct PathPromptDialog {
    pub kind: TransferKind,
    form: Form<String>,
}

impl Default for PathPromptDialog {
    fn default() -> Self {
        Self {
            kind: TransferKind::Export,
            form: Form::new(&PATH_FIELDS, &String::new()),
        }
    }
}

impl PathPromptDialog {
    pub fn open(&mut self, kind: TransferKind, default_path: &str) {
        self.kind = kind;
        self.form = Form::new(&PATH_FIELDS, &default_path.to_string());
    }

    /// Entered path, trimmed
    pub fn path(&self) -> String {
        let mut path = String::new();
        self.form.apply(&mut path);
        path
    }
}

impl Component for PathPromptDialog {
    fn handle_key_event(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        let action = match self.form.handle_key(key) {
            FormEvent::Submit => Some(Action::SubmitModal),
            FormEvent::Cancel => Some(Action::CloseModal),
            FormEvent::Edited | FormEvent::Ignored => None,
        };
        Ok(action)
    }

    fn draw(&mut self, frame: &mut Frame, area: Rect) -> Result<()> {
        self.form.draw(frame, area, self.kind.title());
        Ok(())
    }
}
