//! Add-visit form: the visit and its followup in one dialog

use crate::action::Action;
use crate::component::Component;
use crate::components::form::{Form, FormEvent, FormField};
use crate::model::{optional_field, NewFollowup, NewVisit, DATE_FORMAT};
use anyhow::Result;
use chrono::NaiveDate;
use crossterm::event::KeyEvent;
use ratatui::{layout::Rect, Frame};

/// Values entered on the add-visit form
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VisitDraft {
    pub visit: NewVisit,
    pub followup: NewFollowup,
}

fn text(value: &Option<String>) -> String {
    value.clone().unwrap_or_default()
}

static VISIT_FIELDS: [FormField<VisitDraft>; 9] = [
    FormField {
        label: "Visit Date (YYYY-MM-DD)",
        key: false,
        get: |d| d.visit.visit_date.clone(),
        set: |d, v| d.visit.visit_date = v.trim().to_string(),
    },
    FormField {
        label: "Physician",
        key: false,
        get: |d| d.visit.physician.clone(),
        set: |d, v| d.visit.physician = v.trim().to_string(),
    },
    FormField {
        label: "Last CX",
        key: false,
        get: |d| text(&d.visit.last_cx),
        set: |d, v| d.visit.last_cx = optional_field(v),
    },
    FormField {
        label: "Due Notes",
        key: false,
        get: |d| text(&d.visit.due_notes),
        set: |d, v| d.visit.due_notes = optional_field(v),
    },
    FormField {
        label: "OGTT",
        key: false,
        get: |d| text(&d.visit.ogtt),
        set: |d, v| d.visit.ogtt = optional_field(v),
    },
    FormField {
        label: "Opth",
        key: false,
        get: |d| text(&d.followup.opth),
        set: |d, v| d.followup.opth = optional_field(v),
    },
    FormField {
        label: "Modulator",
        key: false,
        get: |d| text(&d.followup.modulator),
        set: |d, v| d.followup.modulator = optional_field(v),
    },
    FormField {
        label: "PFT",
        key: false,
        get: |d| text(&d.followup.pft),
        set: |d, v| d.followup.pft = optional_field(v),
    },
    FormField {
        label: "Registry",
        key: false,
        get: |d| text(&d.followup.registry),
        set: |d, v| d.followup.registry = optional_field(v),
    },
];

/// Add-visit dialog state
pub struct VisitFormDialog {
    form: Form<VisitDraft>,
}

impl Default for VisitFormDialog {
    fn default() -> Self {
        Self {
            form: Form::new(&VISIT_FIELDS, &VisitDraft::default()),
        }
    }
}

impl VisitFormDialog {
    /// Fresh form with the visit date set to `today`
    pub fn open(&mut self, today: NaiveDate) {
        let draft = VisitDraft {
            visit: NewVisit::new(today.format(DATE_FORMAT).to_string(), ""),
            followup: NewFollowup::default(),
        };
        self.form = Form::new(&VISIT_FIELDS, &draft);
    }

    pub fn draft(&self) -> VisitDraft {
        let mut draft = VisitDraft::default();
        self.form.apply(&mut draft);
        draft
    }
}

impl Component for VisitFormDialog {
    fn handle_key_event(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        let action = match self.form.handle_key(key) {
            FormEvent::Submit => Some(Action::SubmitModal),
            FormEvent::Cancel => Some(Action::CloseModal),
            FormEvent::Edited | FormEvent::Ignored => None,
        };
        Ok(action)
    }

    fn draw(&mut self, frame: &mut Frame, area: Rect) -> Result<()> {
        self.form.draw(frame, area, "Add Visit");
        Ok(())
    }
}
