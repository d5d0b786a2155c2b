//! Labelled text-entry forms
//!
//! A form is built from a static, ordered list of fields. Each field names its
//! label and how to read and write the matching value on the record being
//! edited.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};
use unicode_width::UnicodeWidthStr;

use super::centered_popup;

/// One labelled input bound to a field of `T`
pub struct FormField<T> {
    pub label: &'static str,
    /// Identifies the record; read-only once the record exists
    pub key: bool,
    pub get: fn(&T) -> String,
    pub set: fn(&mut T, &str),
}

/// Outcome of a key press on a form
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormEvent {
    Submit,
    Cancel,
    Edited,
    Ignored,
}

/// Editable values for a fixed list of fields
pub struct Form<T: 'static> {
    fields: &'static [FormField<T>],
    values: Vec<String>,
    locked: Vec<bool>,
    focus: usize,
}

impl<T: 'static> Form<T> {
    /// Form pre-filled from `source`, focus on the first field
    pub fn new(fields: &'static [FormField<T>], source: &T) -> Self {
        Self {
            fields,
            values: fields.iter().map(|f| (f.get)(source)).collect(),
            locked: vec![false; fields.len()],
            focus: 0,
        }
    }

    /// Make every key field read-only; focus skips them
    pub fn lock_keys(&mut self) {
        for (locked, field) in self.locked.iter_mut().zip(self.fields) {
            *locked = field.key;
        }
        if self.locked[self.focus] {
            self.focus_next();
        }
    }

    #[cfg(test)]
    pub fn value(&self, label: &str) -> Option<&str> {
        self.fields
            .iter()
            .position(|f| f.label == label)
            .map(|i| self.values[i].as_str())
    }

    #[cfg(test)]
    pub fn focused_label(&self) -> &'static str {
        self.fields[self.focus].label
    }

    /// Write every value back into `target`
    pub fn apply(&self, target: &mut T) {
        for (field, value) in self.fields.iter().zip(&self.values) {
            (field.set)(target, value);
        }
    }

    fn focus_next(&mut self) {
        let n = self.fields.len();
        for step in 1..=n {
            let i = (self.focus + step) % n;
            if !self.locked[i] {
                self.focus = i;
                return;
            }
        }
    }

    fn focus_prev(&mut self) {
        let n = self.fields.len();
        for step in 1..=n {
            let i = (self.focus + n - step) % n;
            if !self.locked[i] {
                self.focus = i;
                return;
            }
        }
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> FormEvent {
        match key.code {
            KeyCode::Enter => FormEvent::Submit,
            KeyCode::Esc => FormEvent::Cancel,
            KeyCode::Tab | KeyCode::Down => {
                self.focus_next();
                FormEvent::Ignored
            }
            KeyCode::BackTab | KeyCode::Up => {
                self.focus_prev();
                FormEvent::Ignored
            }
            _ if self.locked[self.focus] => FormEvent::Ignored,
            KeyCode::Char('u') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.values[self.focus].clear();
                FormEvent::Edited
            }
            KeyCode::Backspace => {
                self.values[self.focus].pop();
                FormEvent::Edited
            }
            KeyCode::Char(c) => {
                self.values[self.focus].push(c);
                FormEvent::Edited
            }
            _ => FormEvent::Ignored,
        }
    }

    /// Draw as a centered popup titled `title`
    pub fn draw(&self, frame: &mut Frame, area: Rect, title: &str) {
        let label_width = self
            .fields
            .iter()
            .map(|f| f.label.width())
            .max()
            .unwrap_or(0);

        let mut lines = vec![Line::from("")];
        for (i, field) in self.fields.iter().enumerate() {
            let focused = i == self.focus;
            let value_style = if self.locked[i] {
                Style::default().fg(Color::DarkGray)
            } else if focused {
                Style::default()
                    .fg(Color::White)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(Color::White)
            };
            let label = format!(
                "{}{}: ",
                " ".repeat(label_width - field.label.width()),
                field.label
            );
            lines.push(Line::from(vec![
                Span::styled(if focused { "▶ " } else { "  " }, Style::default().fg(Color::Cyan)),
                Span::styled(label, Style::default().fg(Color::Cyan)),
                Span::styled(
                    if focused {
                        format!("{}_", self.values[i])
                    } else {
                        self.values[i].clone()
                    },
                    value_style,
                ),
            ]));
        }
        lines.push(Line::from(""));
        lines.push(Line::from(vec![
            Span::styled(" Enter ", Style::default().fg(Color::Green).add_modifier(Modifier::BOLD)),
            Span::raw("Save  "),
            Span::styled(" Tab/↓ ", Style::default().fg(Color::Cyan)),
            Span::raw("Next  "),
            Span::styled(" ↑ ", Style::default().fg(Color::Cyan)),
            Span::raw("Prev  "),
            Span::styled(" Esc ", Style::default().fg(Color::Yellow)),
            Span::raw("Cancel"),
        ]));

        let popup_area = centered_popup(area, 64, lines.len() as u16 + 2);
        frame.render_widget(Clear, popup_area);
        let paragraph = Paragraph::new(lines).alignment(Alignment::Left).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Cyan))
                .title(format!(" {} ", title))
                .title_style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)),
        );
        frame.render_widget(paragraph, popup_area);
    }
}
