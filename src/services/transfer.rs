//! CSV import and export of the patient roster

use crate::db::{upsert_patient, Database, DbError};
use crate::model::{Patient, PATIENT_COLUMNS};
use std::path::Path;
use thiserror::Error;

/// Errors from reading or writing transfer and report files
#[derive(Error, Debug)]
pub enum TransferError {
    #[error("{0}")]
    Io(#[from] std::io::Error),

    #[error("{0}")]
    Csv(#[from] csv::Error),

    #[error("line {line}: expected 5 columns, found {fields}")]
    Malformed { line: u64, fields: usize },

    #[error("{0}")]
    Db(#[from] DbError),
}

/// Write every patient to `path` under the fixed header row.
///
/// Returns the number of patients written.
pub fn export_patients(db: &Database, path: &Path) -> Result<usize, TransferError> {
    let patients = db.list_patients()?;
    let mut writer = csv::Writer::from_path(path)?;
    writer.write_record(PATIENT_COLUMNS)?;
    for patient in &patients {
        writer.write_record(patient.columns())?;
    }
    writer.flush()?;
    tracing::info!(count = patients.len(), path = %path.display(), "patients exported");
    Ok(patients.len())
}

/// Upsert every data line of `path` into Patients, skipping the first line.
///
/// Each row commits on its own: a bad line stops the import but rows read
/// before it stay saved.
pub fn import_patients(db: &Database, path: &Path) -> Result<usize, TransferError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_path(path)?;
    let conn = db.connect()?;

    let mut imported = 0;
    for result in reader.records() {
        let record = result?;
        let fields: Vec<&str> = record.iter().collect();
        let patient = Patient::from_columns(&fields).ok_or_else(|| TransferError::Malformed {
            line: record.position().map(|p| p.line()).unwrap_or_default(),
            fields: fields.len(),
        })?;
        upsert_patient(&conn, &patient)?;
        imported += 1;
    }

    tracing::info!(count = imported, path = %path.display(), "patients imported");
    Ok(imported)
}
