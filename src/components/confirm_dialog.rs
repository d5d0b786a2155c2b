//! Yes/no confirmation dialog (quit, delete patient)

use crate::action::Action;
use crate::component::Component;
use crate::components::{centered_popup, text_width};
use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

/// Confirmation dialog; `y` submits, `n`/Esc closes
pub struct ConfirmDialog {
    pub title: String,
    pub question: String,
    /// Extra line under the question
    pub detail: Option<String>,
}

impl Default for ConfirmDialog {
    fn default() -> Self {
        Self::quit()
    }
}

impl ConfirmDialog {
    pub fn quit() -> Self {
        Self {
            title: "Quit?".to_string(),
            question: "Are you sure you want to quit?".to_string(),
            detail: None,
        }
    }

    /// Delete prompt; a non-zero visit count is shown under the question
    pub fn delete_patient(name: &str, visits: i64) -> Self {
        Self {
            title: "Confirm Delete".to_string(),
            question: format!("Are you sure you want to delete {}?", name),
            detail: (visits > 0).then(|| format!("{} visit(s) on record", visits)),
        }
    }
}

impl Component for ConfirmDialog {
    fn handle_key_event(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        let action = match key.code {
            KeyCode::Char('y') | KeyCode::Char('Y') => Some(Action::SubmitModal),
            KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => Some(Action::CloseModal),
            _ => None,
        };
        Ok(action)
    }

    fn draw(&mut self, frame: &mut Frame, area: Rect) -> Result<()> {
        let width = text_width(&self.question).saturating_add(6).clamp(40, 70);
        let height = if self.detail.is_some() { 8 } else { 7 };
        let popup_area = centered_popup(area, width, height);

        frame.render_widget(Clear, popup_area);

        let mut content = vec![
            Line::from(""),
            Line::from(Span::styled(
                self.question.as_str(),
                Style::default()
                    .fg(Color::White)
                    .add_modifier(Modifier::BOLD),
            )),
        ];
        if let Some(detail) = &self.detail {
            content.push(Line::from(Span::styled(
                detail.as_str(),
                Style::default().fg(Color::DarkGray),
            )));
        }
        content.extend([
            Line::from(""),
            Line::from(vec![
                Span::styled(
                    " y ",
                    Style::default()
                        .fg(Color::Green)
                        .add_modifier(Modifier::BOLD),
                ),
                Span::raw("Yes  "),
                Span::styled(
                    " n/Esc ",
                    Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
                ),
                Span::raw("No, cancel"),
            ]),
        ]);

        let paragraph = Paragraph::new(content)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(Color::Yellow))
                    .title(format!(" {} ", self.title))
                    .title_style(
                        Style::default()
                            .fg(Color::Yellow)
                            .add_modifier(Modifier::BOLD),
                    ),
            )
            .wrap(Wrap { trim: true })
            .alignment(ratatui::layout::Alignment::Center);

        frame.render_widget(paragraph, popup_area);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyModifiers;
    use ratatui::{backend::TestBackend, Terminal};

    #[test]
    fn test_delete_question() {
        let dialog = ConfirmDialog::delete_patient("Ann Lee", 0);
        assert_eq!(dialog.question, "Are you sure you want to delete Ann Lee?");
        assert_eq!(dialog.detail, None);

        let dialog = ConfirmDialog::delete_patient("Ann Lee", 2);
        assert_eq!(dialog.detail.as_deref(), Some("2 visit(s) on record"));
    }

    #[test]
    fn test_keys() {
        let mut dialog = ConfirmDialog::quit();
        let press = |d: &mut ConfirmDialog, c| {
            d.handle_key_event(KeyEvent::new(c, KeyModifiers::NONE)).unwrap()
        };
        assert_eq!(press(&mut dialog, KeyCode::Char('y')), Some(Action::SubmitModal));
        assert_eq!(press(&mut dialog, KeyCode::Esc), Some(Action::CloseModal));
        assert_eq!(press(&mut dialog, KeyCode::Char('x')), None);
    }

    #[test]
    fn test_draw_with_very_long_name() {
        let mut dialog = ConfirmDialog::delete_patient(&"A".repeat(70_000), 1);
        let mut terminal = Terminal::new(TestBackend::new(100, 30)).unwrap();
        terminal
            .draw(|frame| {
                let area = frame.area();
                dialog.draw(frame, area).unwrap();
            })
            .unwrap();
    }
}
