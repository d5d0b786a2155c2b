//! Model layer - clinic records and application state
//!
//! - `Patient`, `NewVisit`/`NewFollowup`/`VisitRecord`, `ReportRow` - records
//! - `DomainState` - loaded data plus the database handle
//! - `ModalStack` - dialog overlay management

pub mod domain;
pub mod modal;
pub mod patient;
pub mod report;
pub mod visit;

pub use domain::DomainState;
pub use modal::{Modal, ModalStack, Severity, TransferKind};
pub use patient::{Patient, PATIENT_COLUMNS};
pub use report::{ReportRange, ReportRow, DATE_FORMAT, REPORT_COLUMNS};
pub use visit::{optional_field, NewFollowup, NewVisit, VisitRecord, VISIT_COLUMNS};
