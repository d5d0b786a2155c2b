//! Blocking message box for errors and confirmations of success

use crate::action::Action;
use crate::component::Component;
use crate::components::{centered_popup, text_width};
use crate::model::Severity;
use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

/// Message currently shown; the App copies it in from the top `Modal::Message`
pub struct MessageDialog {
    pub severity: Severity,
    pub title: String,
    pub body: String,
}

impl Default for MessageDialog {
    fn default() -> Self {
        Self {
            severity: Severity::Info,
            title: String::new(),
            body: String::new(),
        }
    }
}

impl MessageDialog {
    pub fn show(&mut self, severity: Severity, title: &str, body: &str) {
        self.severity = severity;
        self.title = title.to_string();
        self.body = body.to_string();
    }
}

impl Component for MessageDialog {
    fn handle_key_event(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        let action = match key.code {
            KeyCode::Enter | KeyCode::Esc | KeyCode::Char(' ') | KeyCode::Char('q') => {
                Some(Action::CloseModal)
            }
            _ => None,
        };
        Ok(action)
    }

    fn draw(&mut self, frame: &mut Frame, area: Rect) -> Result<()> {
        let color = match self.severity {
            Severity::Info => Color::Green,
            Severity::Error => Color::Red,
        };
        let body_width = text_width(&self.body);
        let width = body_width.saturating_add(6).clamp(40, 80);
        let body_lines = (body_width / (width - 4)).saturating_add(1);
        let popup_area = centered_popup(area, width, body_lines.saturating_add(6));

        frame.render_widget(Clear, popup_area);

        let content = vec![
            Line::from(""),
            Line::from(Span::styled(
                self.body.as_str(),
                Style::default().fg(Color::White),
            )),
            Line::from(""),
            Line::from(vec![
                Span::styled(
                    " Enter ",
                    Style::default().fg(color).add_modifier(Modifier::BOLD),
                ),
                Span::raw("OK"),
            ]),
        ];

        let paragraph = Paragraph::new(content)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(color))
                    .title(format!(" {} ", self.title))
                    .title_style(Style::default().fg(color).add_modifier(Modifier::BOLD)),
            )
            .wrap(Wrap { trim: true })
            .alignment(Alignment::Center);

        frame.render_widget(paragraph, popup_area);
        Ok(())
    }
}
