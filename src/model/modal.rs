//! Modal stack for dialogs drawn over the patient list
//!
//! Each dialog the clinic screens can open is one variant; the stack keeps
//! them in the order they were opened and only the top one receives keys.

/// Which way a CSV transfer goes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransferKind {
    Import,
    Export,
}

impl TransferKind {
    pub fn title(&self) -> &'static str {
        match self {
            TransferKind::Import => "Import Patients",
            TransferKind::Export => "Export Patients",
        }
    }
}

/// Tone of a message dialog
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Info,
    Error,
}

/// A dialog displayed on top of the main screen
#[derive(Debug, Clone, PartialEq)]
pub enum Modal {
    /// Quit confirmation dialog
    QuitConfirm,
    /// Add or edit patient form (state lives in `PatientFormDialog`)
    PatientForm,
    /// Confirm deleting the selected patient
    DeleteConfirm { mrn: String, name: String },
    /// Visit history window for one patient
    VisitHistory { mrn: String, name: String },
    /// Add-visit form for the patient whose history is open
    VisitForm { mrn: String },
    /// File path prompt for import/export
    Transfer(TransferKind),
    /// Report date range and output file
    Report,
    /// Blocking message box
    Message {
        severity: Severity,
        title: String,
        body: String,
    },
}

impl Modal {
    pub fn error(title: impl Into<String>, body: impl Into<String>) -> Self {
        Modal::Message {
            severity: Severity::Error,
            title: title.into(),
            body: body.into(),
        }
    }

    pub fn info(title: impl Into<String>, body: impl Into<String>) -> Self {
        Modal::Message {
            severity: Severity::Info,
            title: title.into(),
            body: body.into(),
        }
    }
}

/// A stack of modal overlays
///
/// Modals are rendered from bottom to top, with only the top modal
/// receiving input events.
#[derive(Debug, Default)]
pub struct ModalStack {
    stack: Vec<Modal>,
}

impl ModalStack {
    pub fn new() -> Self {
        Self { stack: Vec::new() }
    }

    pub fn push(&mut self, modal: Modal) {
        self.stack.push(modal);
    }

    pub fn pop(&mut self) -> Option<Modal> {
        self.stack.pop()
    }

    pub fn top(&self) -> Option<&Modal> {
        self.stack.last()
    }

    /// Iterate bottom to top, for drawing
    pub fn iter(&self) -> impl Iterator<Item = &Modal> {
        self.stack.iter()
    }

    /// Nearest open visit history window, if any
    pub fn open_history(&self) -> Option<(&str, &str)> {
        self.stack.iter().rev().find_map(|m| match m {
            Modal::VisitHistory { mrn, name } => Some((mrn.as_str(), name.as_str())),
            _ => None,
        })
    }

    #[cfg(test)]
    pub fn is_empty(&self) -> bool {
        self.stack.is_empty()
    }

    #[cfg(test)]
    pub fn len(&self) -> usize {
        self.stack.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_modal_stack_push_pop() {
        let mut stack = ModalStack::new();
        assert!(stack.top().is_none());

        stack.push(Modal::QuitConfirm);
        stack.push(Modal::Report);
        assert_eq!(stack.len(), 2);

        assert_eq!(stack.pop(), Some(Modal::Report));
        assert_eq!(stack.pop(), Some(Modal::QuitConfirm));
        assert!(stack.is_empty());
    }

    #[test]
    fn test_open_history_finds_window_under_form() {
        let mut stack = ModalStack::new();
        assert_eq!(stack.open_history(), None);

        stack.push(Modal::VisitHistory {
            mrn: "1".into(),
            name: "A B".into(),
        });
        stack.push(Modal::VisitForm { mrn: "1".into() });
        stack.push(Modal::error("Error", "Visit Date and Physician are required"));

        assert_eq!(stack.open_history(), Some(("1", "A B")));
    }

    #[test]
    fn test_message_constructors() {
        match Modal::info("Success", "done") {
            Modal::Message { severity, title, .. } => {
                assert_eq!(severity, Severity::Info);
                assert_eq!(title, "Success");
            }
            other => panic!("unexpected modal {:?}", other),
        }
    }
}
