//! Patient database operations.

use rusqlite::{params, Connection, OptionalExtension, Row};

use super::{is_foreign_key_violation, is_unique_violation, Database, DbError, DbResult};
use crate::model::Patient;

const SELECT_PATIENT: &str =
    "SELECT mrn, first_name, last_name, age, translator FROM Patients";

fn patient_from_row(row: &Row<'_>) -> rusqlite::Result<Patient> {
    Ok(Patient {
        mrn: row.get(0)?,
        first_name: row.get(1)?,
        last_name: row.get(2)?,
        age: row.get(3)?,
        translator: row.get::<_, Option<String>>(4)?.unwrap_or_default(),
    })
}

fn validate(patient: &Patient) -> DbResult<()> {
    match patient.missing_required() {
        Some(field) => Err(DbError::Validation(field)),
        None => Ok(()),
    }
}

/// Insert a patient, replacing the fields of any existing row with the same MRN.
///
/// An existing row is updated in place, never deleted, so its visits keep
/// their parent.
pub fn upsert_patient(conn: &Connection, patient: &Patient) -> DbResult<()> {
    conn.execute(
        r#"
        INSERT INTO Patients (mrn, first_name, last_name, age, translator)
        VALUES (?1, ?2, ?3, ?4, ?5)
        ON CONFLICT(mrn) DO UPDATE SET
            first_name = excluded.first_name,
            last_name = excluded.last_name,
            age = excluded.age,
            translator = excluded.translator
        "#,
        params![
            patient.mrn,
            patient.first_name,
            patient.last_name,
            patient.age,
            patient.translator,
        ],
    )?;
    Ok(())
}

impl Database {
    /// All patients in database order.
    pub fn list_patients(&self) -> DbResult<Vec<Patient>> {
        tracing::debug!("listing patients");
        let conn = self.connect()?;
        let mut stmt = conn.prepare(SELECT_PATIENT)?;
        let rows = stmt.query_map([], patient_from_row)?;
        rows.collect::<Result<Vec<_>, _>>().map_err(Into::into)
    }

    /// Get a patient by MRN.
    pub fn get_patient(&self, mrn: &str) -> DbResult<Option<Patient>> {
        let conn = self.connect()?;
        conn.query_row(
            &format!("{} WHERE mrn = ?1", SELECT_PATIENT),
            [mrn],
            patient_from_row,
        )
        .optional()
        .map_err(Into::into)
    }

    /// Insert a new patient. Fails with `DuplicateMrn` if the MRN is taken.
    pub fn add_patient(&self, patient: &Patient) -> DbResult<()> {
        validate(patient)?;
        tracing::debug!(mrn = %patient.mrn, "adding patient");
        let conn = self.connect()?;
        conn.execute(
            r#"
            INSERT INTO Patients (mrn, first_name, last_name, age, translator)
            VALUES (?1, ?2, ?3, ?4, ?5)
            "#,
            params![
                patient.mrn,
                patient.first_name,
                patient.last_name,
                patient.age,
                patient.translator,
            ],
        )
        .map_err(|e| {
            if is_unique_violation(&e) {
                DbError::DuplicateMrn(patient.mrn.clone())
            } else {
                e.into()
            }
        })?;
        tracing::info!(mrn = %patient.mrn, "patient added");
        Ok(())
    }

    /// Overwrite every field but the MRN of an existing patient.
    pub fn update_patient(&self, patient: &Patient) -> DbResult<()> {
        validate(patient)?;
        tracing::debug!(mrn = %patient.mrn, "updating patient");
        let conn = self.connect()?;
        let rows_affected = conn.execute(
            r#"
            UPDATE Patients
            SET first_name = ?2, last_name = ?3, age = ?4, translator = ?5
            WHERE mrn = ?1
            "#,
            params![
                patient.mrn,
                patient.first_name,
                patient.last_name,
                patient.age,
                patient.translator,
            ],
        )?;
        if rows_affected == 0 {
            return Err(DbError::NotFound(format!("patient {}", patient.mrn)));
        }
        tracing::info!(mrn = %patient.mrn, "patient updated");
        Ok(())
    }

    /// Delete a patient. Refused with `HasVisits` while visits reference it.
    pub fn delete_patient(&self, mrn: &str) -> DbResult<()> {
        tracing::debug!(mrn, "deleting patient");
        let conn = self.connect()?;
        let rows_affected = conn
            .execute("DELETE FROM Patients WHERE mrn = ?1", [mrn])
            .map_err(|e| {
                if is_foreign_key_violation(&e) {
                    DbError::HasVisits(mrn.to_string())
                } else {
                    e.into()
                }
            })?;
        if rows_affected == 0 {
            return Err(DbError::NotFound(format!("patient {}", mrn)));
        }
        tracing::info!(mrn, "patient deleted");
        Ok(())
    }

    /// Number of visits recorded for a patient.
    pub fn count_visits(&self, mrn: &str) -> DbResult<i64> {
        let conn = self.connect()?;
        conn.query_row("SELECT COUNT(*) FROM Visits WHERE mrn = ?1", [mrn], |row| {
            row.get(0)
        })
        .map_err(Into::into)
    }
}
