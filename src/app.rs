//! Root application component
//!
//! The App struct implements the Component trait, acting as the root component
//! that delegates event handling and rendering to child components.
//! Storage and file work goes through `db` and `services`; App only decides
//! which dialog to show with the result.

use crate::action::Action;
use crate::component::Component;
use crate::components::{
    draw_home_screen, ConfirmDialog, HomeComponent, HomeRenderContext, MessageDialog,
    PathPromptDialog, PatientFormDialog, PatientFormMode, ReportDialog, VisitFormDialog,
    VisitHistoryDialog,
};
use crate::config::Config;
use crate::db::{Database, DbError};
use crate::model::{DomainState, Modal, ModalStack, Patient, TransferKind};
use crate::services::{export_patients, generate_report, import_patients};
use anyhow::Result;
use chrono::{Local, NaiveDate};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{layout::Rect, Frame};
use std::path::Path;

// ═══════════════════════════════════════════════════════════════════════════════
// User-facing Messages
// ═══════════════════════════════════════════════════════════════════════════════

const PATIENT_REQUIRED: &str = "MRN, First Name, and Last Name are required.";
const VISIT_REQUIRED: &str = "Visit Date and Physician are required";
const MRN_NOT_UNIQUE: &str = "MRN must be unique.";
const HAS_VISITS: &str = "Cannot delete patient with visit history.";
const SELECT_PATIENT: &str = "Please select a patient.";
const PATH_REQUIRED: &str = "A file path is required.";

fn today() -> NaiveDate {
    Local::now().date_naive()
}

// ═══════════════════════════════════════════════════════════════════════════════
// App Struct
// ═══════════════════════════════════════════════════════════════════════════════

/// Main application state - coordinates between components
pub struct App {
    /// Domain state (patients and the database handle)
    pub domain: DomainState,

    /// Default file names for the prompts
    pub config: Config,

    /// Modal overlay stack
    pub modals: ModalStack,

    /// Flag to indicate the app should quit
    pub should_quit: bool,

    /// Result of the last successful operation, shown in the status line
    pub status_message: Option<String>,

    // ─────────────────────────────────────────────────────────────────────────
    // Child Components
    // ─────────────────────────────────────────────────────────────────────────
    pub home: HomeComponent,
    pub patient_form: PatientFormDialog,
    pub visit_history: VisitHistoryDialog,
    pub visit_form: VisitFormDialog,
    pub path_prompt: PathPromptDialog,
    pub report_dialog: ReportDialog,
    pub confirm_dialog: ConfirmDialog,
    pub message_dialog: MessageDialog,
}

impl App {
    /// App over `db` with the patient list loaded
    pub fn new(db: Database, config: Config) -> App {
        let mut app = App {
            domain: DomainState::new(db),
            config,
            modals: ModalStack::new(),
            should_quit: false,
            status_message: None,
            home: HomeComponent::new(),
            patient_form: PatientFormDialog::default(),
            visit_history: VisitHistoryDialog::default(),
            visit_form: VisitFormDialog::default(),
            path_prompt: PathPromptDialog::default(),
            report_dialog: ReportDialog::default(),
            confirm_dialog: ConfirmDialog::default(),
            message_dialog: MessageDialog::default(),
        };
        app.refresh_patients();
        app
    }

    /// Apply `action` and every follow-up action it produces
    pub fn dispatch(&mut self, action: Action) -> Result<()> {
        let mut current_action = Some(action);
        while let Some(a) = current_action {
            current_action = self.update(a)?;
        }
        Ok(())
    }

    fn show_error(&mut self, title: &str, body: impl Into<String>) {
        let body = body.into();
        tracing::warn!(title, %body, "showing error");
        self.modals.push(Modal::error(title, body));
    }

    fn show_info(&mut self, title: &str, body: impl Into<String>) {
        self.modals.push(Modal::info(title, body));
    }

    fn refresh_patients(&mut self) {
        match self.domain.reload_patients() {
            Ok(()) => self.home.rows_reloaded(self.domain.patients.len()),
            Err(e) => self.show_error("Database Error", e.to_string()),
        }
    }

    /// Patient under the cursor, or an info dialog asking for one
    fn require_selection(&mut self) -> Option<Patient> {
        let patient = self
            .home
            .selected_index()
            .and_then(|i| self.domain.patient(i))
            .cloned();
        if patient.is_none() {
            self.show_info("Select Patient", SELECT_PATIENT);
        }
        patient
    }

    /// Re-query the visit history window, if one is open
    fn reload_history(&mut self) {
        let Some((mrn, name)) = self
            .modals
            .open_history()
            .map(|(mrn, name)| (mrn.to_string(), name.to_string()))
        else {
            return;
        };
        if let Err(e) = self.visit_history.load(&self.domain.db, &mrn, &name) {
            self.show_error("Database Error", e.to_string());
        }
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Opening dialogs
    // ─────────────────────────────────────────────────────────────────────────

    fn open_edit_patient(&mut self) {
        let Some(selected) = self.require_selection() else {
            return;
        };
        match self.domain.db.get_patient(&selected.mrn) {
            Ok(Some(patient)) => {
                self.patient_form.open_edit(&patient);
                self.modals.push(Modal::PatientForm);
            }
            Ok(None) => {
                self.refresh_patients();
                self.show_error("Error", format!("Patient {} no longer exists.", selected.mrn));
            }
            Err(e) => self.show_error("Database Error", e.to_string()),
        }
    }

    fn open_delete_patient(&mut self) {
        let Some(patient) = self.require_selection() else {
            return;
        };
        match self.domain.db.count_visits(&patient.mrn) {
            Ok(visits) => {
                self.confirm_dialog = ConfirmDialog::delete_patient(&patient.full_name(), visits);
                self.modals.push(Modal::DeleteConfirm {
                    mrn: patient.mrn.clone(),
                    name: patient.full_name(),
                });
            }
            Err(e) => self.show_error("Database Error", e.to_string()),
        }
    }

    fn open_visit_history(&mut self) {
        let Some(patient) = self.require_selection() else {
            return;
        };
        let name = patient.full_name();
        match self.visit_history.load(&self.domain.db, &patient.mrn, &name) {
            Ok(()) => self.modals.push(Modal::VisitHistory {
                mrn: patient.mrn,
                name,
            }),
            Err(e) => self.show_error("Database Error", e.to_string()),
        }
    }

    fn open_add_visit(&mut self) {
        let Some(mrn) = self.modals.open_history().map(|(mrn, _)| mrn.to_string()) else {
            return;
        };
        self.visit_form.open(today());
        self.modals.push(Modal::VisitForm { mrn });
    }

    fn open_transfer(&mut self, kind: TransferKind) {
        self.path_prompt.open(kind, &self.config.export_path);
        self.modals.push(Modal::Transfer(kind));
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Submitting dialogs
    // ─────────────────────────────────────────────────────────────────────────

    fn submit_modal(&mut self) {
        let Some(modal) = self.modals.top().cloned() else {
            return;
        };
        match modal {
            Modal::QuitConfirm => self.should_quit = true,
            Modal::PatientForm => self.submit_patient_form(),
            Modal::DeleteConfirm { mrn, name } => {
                self.modals.pop();
                self.delete_patient(&mrn, &name);
            }
            Modal::VisitForm { mrn } => self.submit_visit_form(&mrn),
            Modal::Transfer(kind) => self.submit_transfer(kind),
            Modal::Report => self.submit_report(),
            Modal::VisitHistory { .. } | Modal::Message { .. } => {}
        }
    }

    fn submit_patient_form(&mut self) {
        let patient = self.patient_form.patient();
        if patient.missing_required().is_some() {
            self.show_error("Validation Error", PATIENT_REQUIRED);
            return;
        }

        let result = match self.patient_form.mode {
            PatientFormMode::Add => self.domain.db.add_patient(&patient),
            PatientFormMode::Edit => self.domain.db.update_patient(&patient),
        };
        match result {
            Ok(()) => {
                self.modals.pop();
                self.refresh_patients();
                self.home.select_mrn(&self.domain.patients, &patient.mrn);
                self.status_message = Some(format!("Saved patient {}", patient.mrn));
            }
            Err(DbError::DuplicateMrn(_)) => self.show_error("Error", MRN_NOT_UNIQUE),
            Err(DbError::Validation(_)) => self.show_error("Validation Error", PATIENT_REQUIRED),
            Err(e) => self.show_error("Database Error", e.to_string()),
        }
    }

    fn delete_patient(&mut self, mrn: &str, name: &str) {
        match self.domain.db.delete_patient(mrn) {
            Ok(()) => {
                self.refresh_patients();
                self.status_message = Some(format!("Deleted {}", name));
            }
            Err(DbError::HasVisits(_)) => self.show_error("Error", HAS_VISITS),
            Err(e) => self.show_error("Database Error", e.to_string()),
        }
    }

    fn submit_visit_form(&mut self, mrn: &str) {
        let draft = self.visit_form.draft();
        if draft.visit.missing_required().is_some() {
            self.show_error("Error", VISIT_REQUIRED);
            return;
        }

        match self
            .domain
            .db
            .add_visit_with_followup(mrn, &draft.visit, &draft.followup)
        {
            Ok(_) => {
                self.modals.pop();
                self.reload_history();
                self.status_message = Some(format!("Added visit for patient {}", mrn));
            }
            Err(DbError::Validation(_)) => self.show_error("Error", VISIT_REQUIRED),
            Err(e) => self.show_error("Database Error", e.to_string()),
        }
    }

    fn submit_transfer(&mut self, kind: TransferKind) {
        let path = self.path_prompt.path();
        if path.is_empty() {
            self.show_error("Error", PATH_REQUIRED);
            return;
        }
        self.modals.pop();

        let path = Path::new(&path);
        match kind {
            TransferKind::Import => {
                let result = import_patients(&self.domain.db, path);
                // Rows before a failure stay imported
                self.refresh_patients();
                match result {
                    Ok(count) => self.show_info(
                        "Success",
                        format!("Patients imported successfully! ({} rows)", count),
                    ),
                    Err(e) => self.show_error("Error", format!("Failed to import: {}", e)),
                }
            }
            TransferKind::Export => match export_patients(&self.domain.db, path) {
                Ok(count) => self.show_info(
                    "Success",
                    format!("Patients exported successfully! ({} rows)", count),
                ),
                Err(e) => self.show_error("Error", format!("Failed to export: {}", e)),
            },
        }
    }

    fn submit_report(&mut self) {
        let request = self.report_dialog.request();
        let range = match request.range() {
            Ok(range) => range,
            Err(msg) => {
                self.show_error("Error", msg);
                return;
            }
        };
        if request.output.is_empty() {
            self.show_error("Error", PATH_REQUIRED);
            return;
        }
        self.modals.pop();

        match generate_report(&self.domain.db, &range, Path::new(&request.output)) {
            Ok(count) => self.show_info(
                "Success",
                format!(
                    "Report generated successfully! {} visits written to {}",
                    count, request.output
                ),
            ),
            Err(e) => self.show_error("Error", format!("Failed to generate report: {}", e)),
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
            self.handle_modal_key_event(&modal, key)
        } else {
            self.home.handle_key_event(key)
        }
    }

    fn update(&mut self, action: Action) -> Result<Option<Action>> {
        tracing::trace!(%action, "update");
        match action {
            // ─────────────────────────────────────────────────────────────────
            // App Lifecycle
            // ─────────────────────────────────────────────────────────────────
            Action::ForceQuit => self.should_quit = true,
            Action::Resize(_, _) => {}

            // ─────────────────────────────────────────────────────────────────
            // Navigation (delegate to HomeComponent)
            // ─────────────────────────────────────────────────────────────────
            Action::NextRow => self.home.next(self.domain.patients.len()),
            Action::PrevRow => self.home.previous(self.domain.patients.len()),
            Action::FirstRow => self.home.select_first(self.domain.patients.len()),
            Action::LastRow => self.home.select_last(self.domain.patients.len()),

            // ─────────────────────────────────────────────────────────────────
            // Scrolling (delegate to VisitHistoryDialog)
            // ─────────────────────────────────────────────────────────────────
            Action::ScrollUp | Action::ScrollDown => {
                self.visit_history.update(action)?;
            }

            // ─────────────────────────────────────────────────────────────────
            // Search
            // ─────────────────────────────────────────────────────────────────
            Action::EnterSearchMode => self.home.enter_search_mode(),
            Action::ExitSearchMode => self.home.exit_search_mode(),
            Action::SearchInput(c) => self.home.search_input(c, &self.domain.patients),
            Action::SearchBackspace => self.home.search_backspace(&self.domain.patients),

            // ─────────────────────────────────────────────────────────────────
            // Patient Operations
            // ─────────────────────────────────────────────────────────────────
            Action::RefreshPatients => {
                self.refresh_patients();
                self.status_message = Some(format!("{} patients", self.domain.patients.len()));
            }
            Action::OpenAddPatient => {
                self.patient_form.open_add();
                self.modals.push(Modal::PatientForm);
            }
            Action::OpenEditPatient => self.open_edit_patient(),
            Action::OpenDeletePatient => self.open_delete_patient(),
            Action::OpenVisitHistory => self.open_visit_history(),
            Action::OpenAddVisit => self.open_add_visit(),

            // ─────────────────────────────────────────────────────────────────
            // Files
            // ─────────────────────────────────────────────────────────────────
            Action::OpenImport => self.open_transfer(TransferKind::Import),
            Action::OpenExport => self.open_transfer(TransferKind::Export),
            Action::OpenReport => {
                self.report_dialog.open(today(), &self.config.report_path);
                self.modals.push(Modal::Report);
            }

            // ─────────────────────────────────────────────────────────────────
            // Modals
            // ─────────────────────────────────────────────────────────────────
            Action::OpenQuitDialog => {
                self.confirm_dialog = ConfirmDialog::quit();
                self.modals.push(Modal::QuitConfirm);
            }
            Action::CloseModal => {
                self.modals.pop();
            }
            Action::SubmitModal => self.submit_modal(),
        }

        Ok(None)
    }

    fn draw(&mut self, frame: &mut Frame, area: Rect) -> Result<()> {
        let database_path = self.domain.db.path().display().to_string();
        let ctx = HomeRenderContext {
            patients: &self.domain.patients,
            database_path: &database_path,
            status_message: self.status_message.as_deref(),
        };
        draw_home_screen(frame, area, &mut self.home, &ctx)?;

        // Bottom to top, so the history window stays visible under its form
        let modals: Vec<Modal> = self.modals.iter().cloned().collect();
        for modal in &modals {
            self.draw_modal(frame, area, modal)?;
        }
        Ok(())
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// Helper Methods
// ═══════════════════════════════════════════════════════════════════════════════

impl App {
    fn handle_modal_key_event(&mut self, modal: &Modal, key: KeyEvent) -> Result<Option<Action>> {
        match modal {
            Modal::QuitConfirm | Modal::DeleteConfirm { .. } => {
                self.confirm_dialog.handle_key_event(key)
            }
            Modal::PatientForm => self.patient_form.handle_key_event(key),
            Modal::VisitHistory { .. } => self.visit_history.handle_key_event(key),
            Modal::VisitForm { .. } => self.visit_form.handle_key_event(key),
            Modal::Transfer(_) => self.path_prompt.handle_key_event(key),
            Modal::Report => self.report_dialog.handle_key_event(key),
            Modal::Message { .. } => self.message_dialog.handle_key_event(key),
        }
    }

    fn draw_modal(&mut self, frame: &mut Frame, area: Rect, modal: &Modal) -> Result<()> {
        match modal {
            Modal::QuitConfirm | Modal::DeleteConfirm { .. } => {
                self.confirm_dialog.draw(frame, area)?
            }
            Modal::PatientForm => self.patient_form.draw(frame, area)?,
            Modal::VisitHistory { .. } => self.visit_history.draw(frame, area)?,
            Modal::VisitForm { .. } => self.visit_form.draw(frame, area)?,
            Modal::Transfer(_) => self.path_prompt.draw(frame, area)?,
            Modal::Report => self.report_dialog.draw(frame, area)?,
            Modal::Message {
                severity,
                title,
                body,
            } => {
                self.message_dialog.show(*severity, title, body);
                self.message_dialog.draw(frame, area)?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::test_support::temp_db;
    use crate::model::{NewFollowup, NewVisit, Severity};
    use tempfile::TempDir;

    fn app() -> (TempDir, App) {
        let (dir, db) = temp_db();
        (dir, App::new(db, Config::default()))
    }

    fn press_key(app: &mut App, key: KeyEvent) {
        if let Some(action) = app.handle_key_event(key).unwrap() {
            app.dispatch(action).unwrap();
        }
    }

    fn press(app: &mut App, code: KeyCode) {
        press_key(app, KeyEvent::new(code, KeyModifiers::NONE));
    }

    fn type_str(app: &mut App, s: &str) {
        for c in s.chars() {
            press(app, KeyCode::Char(c));
        }
    }

    fn clear_field(app: &mut App) {
        press_key(app, KeyEvent::new(KeyCode::Char('u'), KeyModifiers::CONTROL));
    }

    fn top_message(app: &App) -> Option<(Severity, String)> {
        match app.modals.top() {
            Some(Modal::Message { severity, body, .. }) => Some((*severity, body.clone())),
            _ => None,
        }
    }

    fn add_patient_via_form(app: &mut App, mrn: &str, first: &str, last: &str) {
        press(app, KeyCode::Char('a'));
        type_str(app, mrn);
        press(app, KeyCode::Tab);
        type_str(app, first);
        press(app, KeyCode::Tab);
        type_str(app, last);
        press(app, KeyCode::Enter);
    }

    fn seed_patient_with_visit(app: &mut App) {
        let db = &app.domain.db;
        db.add_patient(&Patient::new("1", "Ann", "Lee", "40", "None")).unwrap();
        db.add_visit_with_followup("1", &NewVisit::new("2024-01-01", "Dr"), &NewFollowup::default())
            .unwrap();
        app.dispatch(Action::RefreshPatients).unwrap();
    }

    #[test]
    fn test_add_patient_through_form() {
        let (_dir, mut app) = app();
        add_patient_via_form(&mut app, "100", "Ann", "Lee");

        assert!(app.modals.is_empty());
        assert_eq!(app.domain.patients.len(), 1);
        assert_eq!(app.domain.patients[0].translator, "None");
        assert_eq!(app.home.selected_index(), Some(0));
    }

    #[test]
    fn test_missing_fields_keep_form_open() {
        let (_dir, mut app) = app();
        add_patient_via_form(&mut app, "100", "", "Lee");

        assert_eq!(top_message(&app), Some((Severity::Error, PATIENT_REQUIRED.to_string())));
        press(&mut app, KeyCode::Enter);
        assert_eq!(app.modals.top(), Some(&Modal::PatientForm));
        assert!(app.domain.patients.is_empty());
    }

    #[test]
    fn test_duplicate_mrn_message() {
        let (_dir, mut app) = app();
        add_patient_via_form(&mut app, "100", "Ann", "Lee");
        add_patient_via_form(&mut app, "100", "Bob", "Ray");

        assert_eq!(top_message(&app), Some((Severity::Error, MRN_NOT_UNIQUE.to_string())));
        assert_eq!(app.domain.patients.len(), 1);
    }

    #[test]
    fn test_edit_patient_keeps_mrn() {
        let (_dir, mut app) = app();
        add_patient_via_form(&mut app, "100", "Ann", "Lee");

        press(&mut app, KeyCode::Char('e'));
        assert_eq!(app.patient_form.mode, PatientFormMode::Edit);
        // Focus starts on First Name since MRN is locked
        clear_field(&mut app);
        type_str(&mut app, "Anne");
        press(&mut app, KeyCode::Enter);

        assert!(app.modals.is_empty());
        let stored = app.domain.db.get_patient("100").unwrap().unwrap();
        assert_eq!(stored.first_name, "Anne");
    }

    #[test]
    fn test_actions_without_selection_ask_for_patient() {
        let (_dir, mut app) = app();
        press(&mut app, KeyCode::Char('e'));
        assert_eq!(top_message(&app), Some((Severity::Info, SELECT_PATIENT.to_string())));
    }

    #[test]
    fn test_delete_patient_with_visits_is_refused() {
        let (_dir, mut app) = app();
        seed_patient_with_visit(&mut app);

        press(&mut app, KeyCode::Char('d'));
        assert_eq!(app.confirm_dialog.detail.as_deref(), Some("1 visit(s) on record"));
        press(&mut app, KeyCode::Char('y'));

        assert_eq!(top_message(&app), Some((Severity::Error, HAS_VISITS.to_string())));
        assert_eq!(app.domain.patients.len(), 1);
    }

    #[test]
    fn test_delete_patient_after_confirm() {
        let (_dir, mut app) = app();
        add_patient_via_form(&mut app, "100", "Ann", "Lee");

        press(&mut app, KeyCode::Char('d'));
        assert_eq!(
            app.confirm_dialog.question,
            "Are you sure you want to delete Ann Lee?"
        );
        press(&mut app, KeyCode::Char('n'));
        assert_eq!(app.domain.patients.len(), 1);

        press(&mut app, KeyCode::Char('d'));
        press(&mut app, KeyCode::Char('y'));
        assert!(app.modals.is_empty());
        assert!(app.domain.patients.is_empty());
    }

    #[test]
    fn test_add_visit_from_history() {
        let (_dir, mut app) = app();
        seed_patient_with_visit(&mut app);

        press(&mut app, KeyCode::Char('v'));
        assert_eq!(app.visit_history.visits.len(), 1);
        assert_eq!(app.visit_history.name, "Ann Lee");

        press(&mut app, KeyCode::Char('a'));
        clear_field(&mut app);
        type_str(&mut app, "2024-02-01");
        press(&mut app, KeyCode::Tab);
        type_str(&mut app, "Dr. Brown");
        press(&mut app, KeyCode::Enter);

        assert!(matches!(app.modals.top(), Some(Modal::VisitHistory { .. })));
        assert_eq!(app.visit_history.visits.len(), 2);
        assert_eq!(app.visit_history.visits[0].visit_date, "2024-02-01");
        assert_eq!(app.visit_history.visits[0].physician, "Dr. Brown");
        assert_eq!(app.visit_history.visits[0].opth, None);

        press(&mut app, KeyCode::Esc);
        assert!(app.modals.is_empty());
    }

    #[test]
    fn test_add_visit_keeps_free_text_date() {
        let (_dir, mut app) = app();
        seed_patient_with_visit(&mut app);

        press(&mut app, KeyCode::Char('v'));
        press(&mut app, KeyCode::Char('a'));
        clear_field(&mut app);
        type_str(&mut app, "01/15/2024");
        press(&mut app, KeyCode::Tab);
        type_str(&mut app, "Dr. X");
        press(&mut app, KeyCode::Enter);

        assert!(matches!(app.modals.top(), Some(Modal::VisitHistory { .. })));
        assert_eq!(app.domain.db.count_visits("1").unwrap(), 2);
        assert!(app
            .visit_history
            .visits
            .iter()
            .any(|v| v.visit_date == "01/15/2024" && v.physician == "Dr. X"));
    }

    #[test]
    fn test_add_visit_requires_physician() {
        let (_dir, mut app) = app();
        seed_patient_with_visit(&mut app);

        press(&mut app, KeyCode::Char('v'));
        press(&mut app, KeyCode::Char('a'));
        press(&mut app, KeyCode::Enter);

        assert_eq!(top_message(&app), Some((Severity::Error, VISIT_REQUIRED.to_string())));
        assert_eq!(app.domain.db.count_visits("1").unwrap(), 1);
    }

    #[test]
    fn test_export_then_import() {
        let (dir, mut app) = app();
        add_patient_via_form(&mut app, "100", "Ann", "Lee");
        let csv_path = dir.path().join("out.csv");
        app.config.export_path = csv_path.display().to_string();

        press(&mut app, KeyCode::Char('x'));
        assert_eq!(app.modals.top(), Some(&Modal::Transfer(TransferKind::Export)));
        press(&mut app, KeyCode::Enter);
        assert_eq!(top_message(&app).map(|(s, _)| s), Some(Severity::Info));
        press(&mut app, KeyCode::Enter);
        assert!(csv_path.exists());

        std::fs::write(
            &csv_path,
            "MRN,First Name,Last Name,Age,Translator\n100,Ann,Lee,41,None\n200,Bob,Ray,,Spanish\n",
        )
        .unwrap();
        press(&mut app, KeyCode::Char('i'));
        press(&mut app, KeyCode::Enter);

        assert_eq!(top_message(&app).map(|(s, _)| s), Some(Severity::Info));
        assert_eq!(app.domain.patients.len(), 2);
        assert_eq!(app.domain.db.get_patient("100").unwrap().unwrap().age, "41");
    }

    #[test]
    fn test_import_failure_message() {
        let (dir, mut app) = app();
        press(&mut app, KeyCode::Char('i'));
        clear_field(&mut app);
        type_str(&mut app, &dir.path().join("missing.csv").display().to_string());
        press(&mut app, KeyCode::Enter);

        let (severity, body) = top_message(&app).unwrap();
        assert_eq!(severity, Severity::Error);
        assert!(body.starts_with("Failed to import: "));
    }

    #[test]
    fn test_report_rejects_bad_date_and_writes_file() {
        let (dir, mut app) = app();
        seed_patient_with_visit(&mut app);
        let report_path = dir.path().join("report.csv");
        app.config.report_path = report_path.display().to_string();

        press(&mut app, KeyCode::Char('p'));
        clear_field(&mut app);
        type_str(&mut app, "2024-1-1x");
        press(&mut app, KeyCode::Enter);
        let (severity, body) = top_message(&app).unwrap();
        assert_eq!(severity, Severity::Error);
        assert!(body.starts_with("Start Date"));
        press(&mut app, KeyCode::Enter);
        assert_eq!(app.modals.top(), Some(&Modal::Report));

        clear_field(&mut app);
        type_str(&mut app, "2024-01-01");
        press(&mut app, KeyCode::Enter);
        assert_eq!(top_message(&app).map(|(s, _)| s), Some(Severity::Info));

        let contents = std::fs::read_to_string(&report_path).unwrap();
        assert_eq!(contents.lines().count(), 2);
    }

    #[test]
    fn test_search_highlights_rows() {
        let (_dir, mut app) = app();
        add_patient_via_form(&mut app, "100", "Ann", "Lee");
        add_patient_via_form(&mut app, "200", "Bob", "Ray");

        press(&mut app, KeyCode::Char('/'));
        type_str(&mut app, "RAY");
        assert_eq!(app.home.selected_index(), Some(1));
        assert_eq!(app.home.match_count(), 1);
        press(&mut app, KeyCode::Esc);
        assert!(!app.home.search_mode);

        press(&mut app, KeyCode::Char('r'));
        assert!(app.home.matches.is_none());
    }

    #[test]
    fn test_quit_confirmation() {
        let (_dir, mut app) = app();
        press(&mut app, KeyCode::Char('q'));
        assert_eq!(app.modals.top(), Some(&Modal::QuitConfirm));
        press(&mut app, KeyCode::Esc);
        assert!(!app.should_quit);

        press(&mut app, KeyCode::Char('q'));
        press(&mut app, KeyCode::Char('y'));
        assert!(app.should_quit);
    }

    #[test]
    fn test_ctrl_c_quits_from_any_modal() {
        let (_dir, mut app) = app();
        press(&mut app, KeyCode::Char('a'));
        press_key(&mut app, KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL));
        assert!(app.should_quit);
    }
}
