//! Visit and followup database operations.

use rusqlite::params;

use super::{is_foreign_key_violation, Database, DbError, DbResult};
use crate::model::{NewFollowup, NewVisit, VisitRecord};

impl Database {
    /// Visit history for a patient, newest date first.
    ///
    /// Dates are text, so "newest" is lexicographic order.
    pub fn list_visits_for_patient(&self, mrn: &str) -> DbResult<Vec<VisitRecord>> {
        tracing::debug!(mrn, "listing visits");
        let conn = self.connect()?;
        let mut stmt = conn.prepare(
            r#"
            SELECT v.visit_date, v.physician, v.last_cx, v.due_notes, v.ogtt,
                   f.opth, f.modulator, f.pft, f.registry
            FROM Visits v
            LEFT JOIN Followups f ON v.visit_id = f.visit_id
            WHERE v.mrn = ?1
            ORDER BY v.visit_date DESC
            "#,
        )?;

        let rows = stmt.query_map([mrn], |row| {
            Ok(VisitRecord {
                visit_date: row.get(0)?,
                physician: row.get(1)?,
                last_cx: row.get(2)?,
                due_notes: row.get(3)?,
                ogtt: row.get(4)?,
                opth: row.get(5)?,
                modulator: row.get(6)?,
                pft: row.get(7)?,
                registry: row.get(8)?,
            })
        })?;

        rows.collect::<Result<Vec<_>, _>>().map_err(Into::into)
    }

    /// Record a visit and its followup in one transaction.
    ///
    /// Returns the new visit id. Nothing is written when validation or either
    /// insert fails.
    pub fn add_visit_with_followup(
        &self,
        mrn: &str,
        visit: &NewVisit,
        followup: &NewFollowup,
    ) -> DbResult<i64> {
        if let Some(field) = visit.missing_required() {
            return Err(DbError::Validation(field));
        }
        tracing::debug!(mrn, date = %visit.visit_date, "adding visit");

        let mut conn = self.connect()?;
        let tx = conn.transaction()?;

        tx.execute(
            r#"
            INSERT INTO Visits (mrn, visit_date, physician, last_cx, due_notes, ogtt)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6)
            "#,
            params![
                mrn,
                visit.visit_date,
                visit.physician,
                visit.last_cx,
                visit.due_notes,
                visit.ogtt,
            ],
        )
        .map_err(|e| {
            if is_foreign_key_violation(&e) {
                DbError::NotFound(format!("patient {}", mrn))
            } else {
                e.into()
            }
        })?;
        let visit_id = tx.last_insert_rowid();

        tx.execute(
            r#"
            INSERT INTO Followups (visit_id, opth, modulator, pft, registry)
            VALUES (?1, ?2, ?3, ?4, ?5)
            "#,
            params![
                visit_id,
                followup.opth,
                followup.modulator,
                followup.pft,
                followup.registry,
            ],
        )?;

        tx.commit()?;
        tracing::info!(mrn, visit_id, "visit added");
        Ok(visit_id)
    }
}
