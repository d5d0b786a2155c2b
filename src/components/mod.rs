//! UI Components
//!
//! Each component encapsulates its own state, event handling, and rendering logic.
//! Components communicate through Actions rather than direct state mutation.

pub mod confirm_dialog;
pub mod form;
pub mod home;
pub mod layout;
pub mod message_dialog;
pub mod path_prompt;
pub mod patient_form;
pub mod report_dialog;
pub mod visit_form;
pub mod visit_history;

pub use confirm_dialog::ConfirmDialog;
pub use home::{draw_home_screen, HomeComponent, HomeRenderContext};
pub use layout::{calculate_main_layout, centered_popup, text_width};
pub use message_dialog::MessageDialog;
pub use path_prompt::PathPromptDialog;
pub use patient_form::{PatientFormDialog, PatientFormMode};
pub use report_dialog::ReportDialog;
pub use visit_form::VisitFormDialog;
pub use visit_history::VisitHistoryDialog;
