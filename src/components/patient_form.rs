//! Add/edit patient form

use crate::action::Action;
use crate::component::Component;
use crate::components::form::{Form, FormEvent, FormField};
use crate::model::Patient;
use anyhow::Result;
use crossterm::event::KeyEvent;
use ratatui::{layout::Rect, Frame};

static PATIENT_FIELDS: [FormField<Patient>; 5] = [
    FormField {
        label: "MRN",
        key: true,
        get: |p| p.mrn.clone(),
        set: |p, v| p.mrn = v.to_string(),
    },
    FormField {
        label: "First Name",
        key: false,
        get: |p| p.first_name.clone(),
        set: |p, v| p.first_name = v.to_string(),
    },
    FormField {
        label: "Last Name",
        key: false,
        get: |p| p.last_name.clone(),
        set: |p, v| p.last_name = v.to_string(),
    },
    FormField {
        label: "Age",
        key: false,
        get: |p| p.age.clone(),
        set: |p, v| p.age = v.to_string(),
    },
    FormField {
        label: "Translator",
        key: false,
        get: |p| p.translator.clone(),
        set: |p, v| p.translator = v.to_string(),
    },
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PatientFormMode {
    Add,
    Edit,
}

/// Patient form state, reset every time the form is opened
pub struct PatientFormDialog {
    pub mode: PatientFormMode,
    form: Form<Patient>,
}

impl Default for PatientFormDialog {
    fn default() -> Self {
        Self {
            mode: PatientFormMode::Add,
            form: Form::new(&PATIENT_FIELDS, &Patient::blank()),
        }
    }
}

impl PatientFormDialog {
    /// Empty form; Translator starts as "None"
    pub fn open_add(&mut self) {
        self.mode = PatientFormMode::Add;
        self.form = Form::new(&PATIENT_FIELDS, &Patient::blank());
    }

    /// Form filled from `patient` with the MRN locked
    pub fn open_edit(&mut self, patient: &Patient) {
        self.mode = PatientFormMode::Edit;
        self.form = Form::new(&PATIENT_FIELDS, patient);
        self.form.lock_keys();
    }

    /// Entered values, trimmed
    pub fn patient(&self) -> Patient {
        let mut patient = Patient::default();
        self.form.apply(&mut patient);
        patient.trimmed()
    }

    fn title(&self) -> &'static str {
        match self.mode {
            PatientFormMode::Add => "Add Patient",
            PatientFormMode::Edit => "Edit Patient",
        }
    }
}

impl Component for PatientFormDialog {
    fn handle_key_event(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        let action = match self.form.handle_key(key) {
            FormEvent::Submit => Some(Action::SubmitModal),
            FormEvent::Cancel => Some(Action::CloseModal),
            FormEvent::Edited | FormEvent::Ignored => None,
        };
        Ok(action)
    }

    fn draw(&mut self, frame: &mut Frame, area: Rect) -> Result<()> {
        self.form.draw(frame, area, self.title());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyCode, KeyModifiers};

    fn press(dialog: &mut PatientFormDialog, code: KeyCode) -> Option<Action> {
        dialog
            .handle_key_event(KeyEvent::new(code, KeyModifiers::NONE))
            .unwrap()
    }

    fn type_str(dialog: &mut PatientFormDialog, s: &str) {
        for c in s.chars() {
            press(dialog, KeyCode::Char(c));
        }
    }

    #[test]
    fn test_add_mode_defaults() {
        let mut dialog = PatientFormDialog::default();
        dialog.open_add();
        let patient = dialog.patient();
        assert_eq!(patient.translator, "None");
        assert_eq!(patient.mrn, "");
        assert_eq!(dialog.title(), "Add Patient");
    }

    #[test]
    fn test_typed_values_are_trimmed() {
        let mut dialog = PatientFormDialog::default();
        dialog.open_add();
        type_str(&mut dialog, " 100 ");
        press(&mut dialog, KeyCode::Tab);
        type_str(&mut dialog, "Ann");
        press(&mut dialog, KeyCode::Tab);
        type_str(&mut dialog, "Lee  ");

        let patient = dialog.patient();
        assert_eq!(patient.mrn, "100");
        assert_eq!(patient.first_name, "Ann");
        assert_eq!(patient.last_name, "Lee");
        assert_eq!(press(&mut dialog, KeyCode::Enter), Some(Action::SubmitModal));
    }

    #[test]
    fn test_edit_mode_locks_mrn() {
        let mut dialog = PatientFormDialog::default();
        dialog.open_edit(&Patient::new("7", "Ann", "Lee", "40", "None"));
        type_str(&mut dialog, "x");

        let patient = dialog.patient();
        assert_eq!(patient.mrn, "7");
        assert_eq!(patient.first_name, "Annx");
        assert_eq!(press(&mut dialog, KeyCode::Esc), Some(Action::CloseModal));
    }

    #[test]
    fn test_mrn_is_the_only_key_field() {
        let keys: Vec<&str> = PATIENT_FIELDS
            .iter()
            .filter(|f| f.key)
            .map(|f| f.label)
            .collect();
        assert_eq!(keys, vec!["MRN"]);
    }
}
