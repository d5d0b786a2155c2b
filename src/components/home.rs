//! Home component - Main application screen
//!
//! Displays the search bar, patient table, status line and key bar.
//! Owns the table cursor and the live search highlight.

use crate::action::Action;
use crate::component::Component;
use crate::components::{calculate_main_layout, text_width};
use crate::model::{Patient, PATIENT_COLUMNS};
use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
    layout::{Constraint, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Paragraph, Row, Table, TableState},
    Frame,
};

/// Widest a patient column grows before its cells are truncated
const MAX_COLUMN_WIDTH: u16 = 30;

// ═══════════════════════════════════════════════════════════════════════════════
// Search
// ═══════════════════════════════════════════════════════════════════════════════

/// Which rows match `query`.
///
/// A row matches when the lowercased query is a substring of any of its
/// lowercased column values. An empty query matches every row.
pub fn search_matches(patients: &[Patient], query: &str) -> Vec<bool> {
    let needle = query.to_lowercase();
    patients
        .iter()
        .map(|p| {
            p.columns()
                .iter()
                .any(|value| value.to_lowercase().contains(&needle))
        })
        .collect()
}

// ═══════════════════════════════════════════════════════════════════════════════
// Home Component
// ═══════════════════════════════════════════════════════════════════════════════

/// Home component for the patient list
pub struct HomeComponent {
    /// Table cursor
    pub table_state: TableState,

    /// Search query string
    pub search_query: String,

    /// Whether search mode is active
    pub search_mode: bool,

    /// Highlighted rows from the last search, one flag per patient
    pub matches: Option<Vec<bool>>,
}

impl Default for HomeComponent {
    fn default() -> Self {
        Self::new()
    }
}

impl HomeComponent {
    pub fn new() -> Self {
        Self {
            table_state: TableState::default(),
            search_query: String::new(),
            search_mode: false,
            matches: None,
        }
    }

    pub fn selected_index(&self) -> Option<usize> {
        self.table_state.selected()
    }

    /// Called after the patient list was reloaded.
    ///
    /// Highlights are dropped and the cursor is kept in range.
    pub fn rows_reloaded(&mut self, len: usize) {
        self.matches = None;
        match self.table_state.selected() {
            _ if len == 0 => self.table_state.select(None),
            Some(i) if i >= len => self.table_state.select(Some(len - 1)),
            None => self.table_state.select(Some(0)),
            Some(_) => {}
        }
    }

    /// Move the cursor to the patient with `mrn`
    pub fn select_mrn(&mut self, patients: &[Patient], mrn: &str) {
        if let Some(i) = patients.iter().position(|p| p.mrn == mrn) {
            self.table_state.select(Some(i));
        }
    }

    pub fn is_match(&self, index: usize) -> bool {
        self.matches
            .as_ref()
            .and_then(|m| m.get(index).copied())
            .unwrap_or(false)
    }

    pub fn match_count(&self) -> usize {
        self.matches
            .as_ref()
            .map_or(0, |m| m.iter().filter(|&&hit| hit).count())
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Navigation
    // ─────────────────────────────────────────────────────────────────────────

    /// Select next row, wrapping to the first
    pub fn next(&mut self, len: usize) {
        if len == 0 {
            return;
        }
        let next = match self.table_state.selected() {
            Some(i) if i + 1 < len => i + 1,
            _ => 0,
        };
        self.table_state.select(Some(next));
    }

    /// Select previous row, wrapping to the last
    pub fn previous(&mut self, len: usize) {
        if len == 0 {
            return;
        }
        let prev = match self.table_state.selected() {
            Some(i) if i > 0 => i - 1,
            _ => len - 1,
        };
        self.table_state.select(Some(prev));
    }

    pub fn select_first(&mut self, len: usize) {
        self.table_state.select(if len == 0 { None } else { Some(0) });
    }

    pub fn select_last(&mut self, len: usize) {
        self.table_state.select(len.checked_sub(1));
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Search
    // ─────────────────────────────────────────────────────────────────────────

    pub fn enter_search_mode(&mut self) {
        self.search_mode = true;
    }

    pub fn exit_search_mode(&mut self) {
        self.search_mode = false;
    }

    /// Add character to search query
    pub fn search_input(&mut self, c: char, patients: &[Patient]) {
        self.search_query.push(c);
        self.apply_search(patients);
    }

    /// Remove last character from search query
    pub fn search_backspace(&mut self, patients: &[Patient]) {
        self.search_query.pop();
        self.apply_search(patients);
    }

    /// Recompute highlights over the loaded rows and jump to the first match
    pub fn apply_search(&mut self, patients: &[Patient]) {
        if self.search_query.is_empty() {
            self.matches = None;
            return;
        }
        let matches = search_matches(patients, &self.search_query);
        if let Some(first) = matches.iter().position(|&hit| hit) {
            self.table_state.select(Some(first));
        }
        self.matches = Some(matches);
    }

    /// Key handling while the search bar has focus
    pub fn handle_search_key(&self, key: KeyEvent) -> Option<Action> {
        match key.code {
            KeyCode::Esc | KeyCode::Enter => Some(Action::ExitSearchMode),
            KeyCode::Backspace => Some(Action::SearchBackspace),
            KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
                Some(Action::SearchInput(c))
            }
            _ => None,
        }
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// Component Implementation
// ═══════════════════════════════════════════════════════════════════════════════

impl Component for HomeComponent {
    fn handle_key_event(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        if self.search_mode {
            return Ok(self.handle_search_key(key));
        }

        let action = match key.code {
            // Navigation
            KeyCode::Char('j') | KeyCode::Down => Some(Action::NextRow),
            KeyCode::Char('k') | KeyCode::Up => Some(Action::PrevRow),
            KeyCode::Char('g') | KeyCode::Home => Some(Action::FirstRow),
            KeyCode::Char('G') | KeyCode::End => Some(Action::LastRow),

            // Patient operations
            KeyCode::Char('r') => Some(Action::RefreshPatients),
            KeyCode::Char('a') => Some(Action::OpenAddPatient),
            KeyCode::Char('e') => Some(Action::OpenEditPatient),
            KeyCode::Char('d') => Some(Action::OpenDeletePatient),
            KeyCode::Char('v') | KeyCode::Enter => Some(Action::OpenVisitHistory),

            // Files
            KeyCode::Char('i') => Some(Action::OpenImport),
            KeyCode::Char('x') => Some(Action::OpenExport),
            KeyCode::Char('p') => Some(Action::OpenReport),

            // Search
            KeyCode::Char('/') => Some(Action::EnterSearchMode),

            KeyCode::Char('q') => Some(Action::OpenQuitDialog),
            _ => None,
        };
        Ok(action)
    }

    fn draw(&mut self, _frame: &mut Frame, _area: Rect) -> Result<()> {
        // Drawing is done through draw_home_screen which takes full context
        Ok(())
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// Rendering Functions
// ═══════════════════════════════════════════════════════════════════════════════

/// Context needed for rendering the home screen
pub struct HomeRenderContext<'a> {
    pub patients: &'a [Patient],
    pub database_path: &'a str,
    pub status_message: Option<&'a str>,
}

/// Draw the home screen
pub fn draw_home_screen(
    frame: &mut Frame,
    area: Rect,
    home: &mut HomeComponent,
    ctx: &HomeRenderContext,
) -> Result<()> {
    let layout = calculate_main_layout(area);

    render_search_bar(frame, layout.search, home);
    render_patient_table(frame, layout.table, home, ctx.patients);
    render_status_bar(frame, layout.status, home, ctx);
    render_help_bar(frame, layout.help, home);

    Ok(())
}

fn render_search_bar(frame: &mut Frame, area: Rect, home: &HomeComponent) {
    let border_color = if home.search_mode {
        Color::Yellow
    } else {
        Color::DarkGray
    };

    let mut spans = vec![Span::styled(
        if home.search_mode {
            format!("{}_", home.search_query)
        } else {
            home.search_query.clone()
        },
        Style::default().fg(Color::White),
    )];
    if home.matches.is_some() {
        spans.push(Span::styled(
            format!("  ({} matching)", home.match_count()),
            Style::default().fg(Color::Cyan),
        ));
    }

    let paragraph = Paragraph::new(Line::from(spans)).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(border_color))
            .title(" Search "),
    );
    frame.render_widget(paragraph, area);
}

/// Column widths sized to the widest header or value, capped
fn column_widths(patients: &[Patient]) -> [u16; 5] {
    let mut widths = PATIENT_COLUMNS.map(text_width);
    for patient in patients {
        for (width, value) in widths.iter_mut().zip(patient.columns()) {
            *width = (*width).max(text_width(value));
        }
    }
    widths.map(|w| w.min(MAX_COLUMN_WIDTH))
}

fn render_patient_table(
    frame: &mut Frame,
    area: Rect,
    home: &mut HomeComponent,
    patients: &[Patient],
) {
    let header = Row::new(PATIENT_COLUMNS.iter().map(|h| {
        Cell::from(*h).style(
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )
    }))
    .bottom_margin(1);

    let rows: Vec<Row> = patients
        .iter()
        .enumerate()
        .map(|(i, patient)| {
            let style = if home.is_match(i) {
                Style::default().fg(Color::Black).bg(Color::LightBlue)
            } else {
                Style::default().fg(Color::White)
            };
            Row::new(patient.columns().map(|v| Cell::from(v.to_string()))).style(style)
        })
        .collect();

    let widths = column_widths(patients).map(Constraint::Length);

    let table = Table::new(rows, widths)
        .header(header)
        .column_spacing(2)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Cyan))
                .title(format!(" Patients ({}) ", patients.len())),
        )
        .highlight_style(
            Style::default()
                .bg(Color::Blue)
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),
        )
        .highlight_symbol("▶ ");

    frame.render_stateful_widget(table, area, &mut home.table_state);
}

fn render_status_bar(
    frame: &mut Frame,
    area: Rect,
    home: &HomeComponent,
    ctx: &HomeRenderContext,
) {
    let mut spans = vec![
        Span::styled(
            format!(" {} ", ctx.database_path),
            Style::default()
                .fg(Color::Black)
                .bg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        ),
        Span::raw(" "),
    ];

    if let Some(patient) = home.selected_index().and_then(|i| ctx.patients.get(i)) {
        spans.push(Span::styled(
            patient.full_name(),
            Style::default()
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),
        ));
        spans.push(Span::styled(
            format!(" (MRN {})", patient.mrn),
            Style::default().fg(Color::DarkGray),
        ));
    }

    if let Some(status) = ctx.status_message {
        spans.push(Span::styled(
            format!("  {} ", status),
            Style::default().fg(Color::Yellow),
        ));
    }

    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

fn key_span(key: &str, color: Color) -> Span<'static> {
    Span::styled(
        format!(" {} ", key),
        Style::default().fg(color).add_modifier(Modifier::BOLD),
    )
}

fn render_help_bar(frame: &mut Frame, area: Rect, home: &HomeComponent) {
    let help_spans = if home.search_mode {
        vec![
            key_span("Esc/Enter", Color::Yellow),
            Span::raw("Done  "),
            key_span("Backspace", Color::Cyan),
            Span::raw("Delete"),
        ]
    } else {
        vec![
            key_span("q", Color::Yellow),
            Span::raw("Quit "),
            key_span("r", Color::Green),
            Span::raw("Refresh "),
            key_span("a", Color::Green),
            Span::raw("Add "),
            key_span("e", Color::Green),
            Span::raw("Edit "),
            key_span("d", Color::Red),
            Span::raw("Delete "),
            key_span("v", Color::Green),
            Span::raw("Visits "),
            key_span("i", Color::Cyan),
            Span::raw("Import "),
            key_span("x", Color::Cyan),
            Span::raw("Export "),
            key_span("p", Color::Cyan),
            Span::raw("Reports "),
            key_span("/", Color::Cyan),
            Span::raw("Search"),
        ]
    };

    let paragraph = Paragraph::new(Line::from(help_spans)).block(
        Block::default()
            .borders(Borders::TOP)
            .border_style(Style::default().fg(Color::DarkGray)),
    );
    frame.render_widget(paragraph, area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn patients() -> Vec<Patient> {
        vec![
            Patient::new("1", "Alice", "Smith", "30", "None"),
            Patient::new("2", "Bob", "Jones", "41", "Spanish"),
            Patient::new("3", "Carol", "SMITHERS", "", "None"),
        ]
    }

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn test_search_is_case_insensitive_over_any_column() {
        assert_eq!(search_matches(&patients(), "smith"), vec![true, false, true]);
        assert_eq!(search_matches(&patients(), "SPAN"), vec![false, true, false]);
        assert_eq!(search_matches(&patients(), "41"), vec![false, true, false]);
        assert_eq!(search_matches(&patients(), "zzz"), vec![false, false, false]);
    }

    #[test]
    fn test_search_input_jumps_to_first_match() {
        let rows = patients();
        let mut home = HomeComponent::new();
        home.select_first(rows.len());

        for c in "jones".chars() {
            home.search_input(c, &rows);
        }
        assert_eq!(home.selected_index(), Some(1));
        assert_eq!(home.match_count(), 1);
        assert!(home.is_match(1));
        assert!(!home.is_match(0));
    }

    #[test]
    fn test_no_match_keeps_cursor() {
        let rows = patients();
        let mut home = HomeComponent::new();
        home.select_last(rows.len());
        home.search_input('#', &rows);
        assert_eq!(home.selected_index(), Some(2));
        assert_eq!(home.match_count(), 0);
    }

    #[test]
    fn test_clearing_query_drops_highlight() {
        let rows = patients();
        let mut home = HomeComponent::new();
        home.search_input('a', &rows);
        assert!(home.matches.is_some());
        home.search_backspace(&rows);
        assert!(home.matches.is_none());
    }

    #[test]
    fn test_reload_clears_highlight_and_clamps_cursor() {
        let rows = patients();
        let mut home = HomeComponent::new();
        home.select_last(rows.len());
        home.search_input('b', &rows);

        home.rows_reloaded(1);
        assert!(home.matches.is_none());
        assert_eq!(home.selected_index(), Some(0));

        home.rows_reloaded(0);
        assert_eq!(home.selected_index(), None);
    }

    #[test]
    fn test_navigation_wraps() {
        let mut home = HomeComponent::new();
        home.next(3);
        assert_eq!(home.selected_index(), Some(0));
        home.previous(3);
        assert_eq!(home.selected_index(), Some(2));
        home.next(3);
        assert_eq!(home.selected_index(), Some(0));
        home.next(0);
        assert_eq!(home.selected_index(), Some(0));
    }

    #[test]
    fn test_select_mrn() {
        let rows = patients();
        let mut home = HomeComponent::new();
        home.select_mrn(&rows, "3");
        assert_eq!(home.selected_index(), Some(2));
    }

    #[test]
    fn test_key_bindings() {
        let mut home = HomeComponent::new();
        assert_eq!(
            home.handle_key_event(key(KeyCode::Char('a'))).unwrap(),
            Some(Action::OpenAddPatient)
        );
        assert_eq!(
            home.handle_key_event(key(KeyCode::Enter)).unwrap(),
            Some(Action::OpenVisitHistory)
        );
        assert_eq!(
            home.handle_key_event(key(KeyCode::Char('p'))).unwrap(),
            Some(Action::OpenReport)
        );

        home.enter_search_mode();
        assert_eq!(
            home.handle_key_event(key(KeyCode::Char('a'))).unwrap(),
            Some(Action::SearchInput('a'))
        );
        assert_eq!(
            home.handle_key_event(key(KeyCode::Esc)).unwrap(),
            Some(Action::ExitSearchMode)
        );
    }

    #[test]
    fn test_column_widths_are_capped() {
        let long = Patient::new("1", "A".repeat(50), "B", "", "None");
        let widths = column_widths(&[long]);
        assert_eq!(widths[0], 3);
        assert_eq!(widths[1], MAX_COLUMN_WIDTH);
        assert_eq!(widths[4], "Translator".len() as u16);
    }

    proptest! {
        #[test]
        fn prop_empty_query_matches_everything(names in prop::collection::vec("[a-zA-Z]{0,8}", 0..10)) {
            let rows: Vec<Patient> = names
                .iter()
                .enumerate()
                .map(|(i, n)| Patient::new(i.to_string(), n.as_str(), "", "", ""))
                .collect();
            prop_assert!(search_matches(&rows, "").iter().all(|&hit| hit));
        }

        #[test]
        fn prop_any_case_of_a_value_matches_its_row(
            first in "[a-zA-Z]{1,10}",
            start in 0usize..10,
            len in 1usize..10,
        ) {
            let rows = vec![Patient::new("m", first.as_str(), "", "", "")];
            let start = start.min(first.len() - 1);
            let end = (start + len).min(first.len());
            let slice = &first[start..end];
            prop_assert!(search_matches(&rows, &slice.to_uppercase())[0]);
            prop_assert!(search_matches(&rows, &slice.to_lowercase())[0]);
        }

        #[test]
        fn prop_match_vector_has_one_flag_per_row(count in 0usize..20, query in "[a-z]{0,3}") {
            let rows: Vec<Patient> = (0..count)
                .map(|i| Patient::new(i.to_string(), "x", "y", "", ""))
                .collect();
            prop_assert_eq!(search_matches(&rows, &query).len(), count);
        }
    }
}
