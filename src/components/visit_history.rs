//! Visit history window for one patient

use crate::action::Action;
use crate::component::Component;
use crate::components::{centered_popup, layout::inset};
use crate::db::{Database, DbResult};
use crate::model::{VisitRecord, VISIT_COLUMNS};
use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    layout::{Constraint, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Clear, Paragraph, Row, Table, TableState},
    Frame,
};

/// Visits of the patient whose window is open, newest first
#[derive(Default)]
pub struct VisitHistoryDialog {
    pub name: String,
    pub visits: Vec<VisitRecord>,
    table_state: TableState,
}

impl VisitHistoryDialog {
    /// Query the visits for `mrn`
    pub fn load(&mut self, db: &Database, mrn: &str, name: &str) -> DbResult<()> {
        self.visits = db.list_visits_for_patient(mrn)?;
        self.name = name.to_string();
        self.table_state
            .select(if self.visits.is_empty() { None } else { Some(0) });
        Ok(())
    }

    #[cfg(test)]
    pub fn selected_index(&self) -> Option<usize> {
        self.table_state.selected()
    }

    fn scroll_down(&mut self) {
        if let Some(i) = self.table_state.selected() {
            if i + 1 < self.visits.len() {
                self.table_state.select(Some(i + 1));
            }
        }
    }

    fn scroll_up(&mut self) {
        if let Some(i) = self.table_state.selected() {
            self.table_state.select(Some(i.saturating_sub(1)));
        }
    }
}

impl Component for VisitHistoryDialog {
    fn handle_key_event(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        let action = match key.code {
            KeyCode::Char('a') => Some(Action::OpenAddVisit),
            KeyCode::Char('j') | KeyCode::Down => Some(Action::ScrollDown),
            KeyCode::Char('k') | KeyCode::Up => Some(Action::ScrollUp),
            KeyCode::Char('q') | KeyCode::Esc => Some(Action::CloseModal),
            _ => None,
        };
        Ok(action)
    }

    fn update(&mut self, action: Action) -> Result<Option<Action>> {
        match action {
            Action::ScrollDown => self.scroll_down(),
            Action::ScrollUp => self.scroll_up(),
            _ => {}
        }
        Ok(None)
    }

    fn draw(&mut self, frame: &mut Frame, area: Rect) -> Result<()> {
        let popup_area = centered_popup(inset(area, 1), 140, 30);
        frame.render_widget(Clear, popup_area);

        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Cyan))
            .title(format!(" Visit History - {} ", self.name))
            .title_style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD))
            .title_bottom(Line::from(vec![
                Span::styled(" a ", Style::default().fg(Color::Green).add_modifier(Modifier::BOLD)),
                Span::raw("Add Visit  "),
                Span::styled(" j/k ", Style::default().fg(Color::Cyan)),
                Span::raw("Scroll  "),
                Span::styled(" Esc ", Style::default().fg(Color::Yellow)),
                Span::raw("Close "),
            ]));

        if self.visits.is_empty() {
            let paragraph = Paragraph::new(vec![
                Line::from(""),
                Line::from(Span::styled(
                    "No visits recorded",
                    Style::default().fg(Color::DarkGray),
                )),
            ])
            .alignment(ratatui::layout::Alignment::Center)
            .block(block);
            frame.render_widget(paragraph, popup_area);
            return Ok(());
        }

        let header = Row::new(VISIT_COLUMNS.iter().map(|h| {
            Cell::from(*h).style(
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD),
            )
        }));
        let rows = self
            .visits
            .iter()
            .map(|visit| Row::new(visit.cells()).style(Style::default().fg(Color::White)));
        let widths = [
            Constraint::Length(12),
            Constraint::Length(18),
            Constraint::Min(8),
            Constraint::Min(8),
            Constraint::Min(6),
            Constraint::Min(6),
            Constraint::Min(10),
            Constraint::Min(8),
            Constraint::Min(8),
        ];

        let table = Table::new(rows, widths)
            .header(header)
            .block(block)
            .highlight_style(Style::default().bg(Color::Blue).fg(Color::White))
            .highlight_symbol("▶ ");

        frame.render_stateful_widget(table, popup_area, &mut self.table_state);
        Ok(())
    }
}
