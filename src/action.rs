//! Action enum - All possible application actions
//!
//! Components turn key events into Actions; the App applies them to state.

use std::fmt;

/// All possible actions in the application
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    // ─────────────────────────────────────────────────────────────────────────
    // App Lifecycle
    // ─────────────────────────────────────────────────────────────────────────
    /// Terminal was resized
    Resize(u16, u16),
    /// Quit without confirmation
    ForceQuit,

    // ─────────────────────────────────────────────────────────────────────────
    // Patient Table Navigation
    // ─────────────────────────────────────────────────────────────────────────
    NextRow,
    PrevRow,
    FirstRow,
    LastRow,

    // ─────────────────────────────────────────────────────────────────────────
    // Scrolling (visit history)
    // ─────────────────────────────────────────────────────────────────────────
    ScrollUp,
    ScrollDown,

    // ─────────────────────────────────────────────────────────────────────────
    // Search
    // ─────────────────────────────────────────────────────────────────────────
    EnterSearchMode,
    ExitSearchMode,
    SearchInput(char),
    SearchBackspace,

    // ─────────────────────────────────────────────────────────────────────────
    // Patient Operations
    // ─────────────────────────────────────────────────────────────────────────
    /// Reload the patient list from the database
    RefreshPatients,
    OpenAddPatient,
    OpenEditPatient,
    /// Ask before deleting the selected patient
    OpenDeletePatient,
    OpenVisitHistory,
    OpenAddVisit,

    // ─────────────────────────────────────────────────────────────────────────
    // Files
    // ─────────────────────────────────────────────────────────────────────────
    OpenImport,
    OpenExport,
    OpenReport,

    // ─────────────────────────────────────────────────────────────────────────
    // Modals
    // ─────────────────────────────────────────────────────────────────────────
    OpenQuitDialog,
    /// Close the top modal
    CloseModal,
    /// Save/confirm the top modal
    SubmitModal,
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Action::Resize(w, h) => write!(f, "Resize({}, {})", w, h),
            Action::SearchInput(c) => write!(f, "SearchInput('{}')", c),
            other => write!(f, "{:?}", other),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        assert_eq!(Action::Resize(80, 24).to_string(), "Resize(80, 24)");
        assert_eq!(Action::SearchInput('x').to_string(), "SearchInput('x')");
        assert_eq!(Action::OpenReport.to_string(), "OpenReport");
    }
}
