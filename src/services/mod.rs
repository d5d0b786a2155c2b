//! File-level operations built on the database
//!
//! - CSV import/export of the patient roster
//! - Visit report generation
//! - Demonstration data seeding

pub mod demo;
pub mod report;
pub mod transfer;

pub use demo::seed_demo_data;
pub use report::generate_report;
pub use transfer::{export_patients, import_patients};
