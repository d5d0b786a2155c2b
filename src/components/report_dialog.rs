//! Report dialog: date range and output file

use crate::action::Action;
use crate::component::Component;
use crate::components::form::{Form, FormEvent, FormField};
use crate::model::{ReportRange, DATE_FORMAT};
use anyhow::Result;
use chrono::NaiveDate;
use crossterm::event::KeyEvent;
use ratatui::{layout::Rect, Frame};

/// Values entered on the report dialog
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReportRequest {
    pub start: String,
    pub end: String,
    pub output: String,
}

impl ReportRequest {
    /// Validated date range
    pub fn range(&self) -> Result<ReportRange, String> {
        ReportRange::parse(&self.start, &self.end)
    }
}

static REPORT_FIELDS: [FormField<ReportRequest>; 3] = [
    FormField {
        label: "Start Date",
        key: false,
        get: |r| r.start.clone(),
        set: |r, v| r.start = v.trim().to_string(),
    },
    FormField {
        label: "End Date",
        key: false,
        get: |r| r.end.clone(),
        set: |r, v| r.end = v.trim().to_string(),
    },
    FormField {
        label: "Output File",
        key: false,
        get: |r| r.output.clone(),
        set: |r, v| r.output = v.trim().to_string(),
    },
];

pub struct ReportDialog {
    form: Form<ReportRequest>,
}

impl Default for ReportDialog {
    fn default() -> Self {
        Self {
            form: Form::new(&REPORT_FIELDS, &ReportRequest::default()),
        }
    }
}

impl ReportDialog {
    /// Both dates set to `today`
    pub fn open(&mut self, today: NaiveDate, output: &str) {
        let today = today.format(DATE_FORMAT).to_string();
        let request = ReportRequest {
            start: today.clone(),
            end: today,
            output: output.to_string(),
        };
        self.form = Form::new(&REPORT_FIELDS, &request);
    }

    pub fn request(&self) -> ReportRequest {
        let mut request = ReportRequest::default();
        self.form.apply(&mut request);
        request
    }
}

impl Component for ReportDialog {
    fn handle_key_event(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        let action = match self.form.handle_key(key) {
            FormEvent::Submit => Some(Action::SubmitModal),
            FormEvent::Cancel => Some(Action::CloseModal),
            FormEvent::Edited | FormEvent::Ignored => None,
        };
        Ok(action)
    }

    fn draw(&mut self, frame: &mut Frame, area: Rect) -> Result<()> {
        self.form.draw(frame, area, "Generate Report");
        Ok(())
    }
}
