//! Report query.

use super::{Database, DbResult};
use crate::model::{ReportRange, ReportRow};

impl Database {
    /// Visits dated within `range` (inclusive, compared as text) joined to
    /// their patient and followup, newest first.
    pub fn visit_report(&self, range: &ReportRange) -> DbResult<Vec<ReportRow>> {
        tracing::debug!(start = %range.start, end = %range.end, "running visit report");
        let conn = self.connect()?;
        let mut stmt = conn.prepare(
            r#"
            SELECT p.first_name, p.last_name, p.mrn, v.visit_date, v.physician,
                   f.opth, f.modulator, f.pft, f.registry
            FROM Patients p
            JOIN Visits v ON p.mrn = v.mrn
            LEFT JOIN Followups f ON v.visit_id = f.visit_id
            WHERE v.visit_date BETWEEN ?1 AND ?2
            ORDER BY v.visit_date DESC
            "#,
        )?;

        let rows = stmt.query_map([&range.start, &range.end], |row| {
            Ok(ReportRow {
                first_name: row.get(0)?,
                last_name: row.get(1)?,
                mrn: row.get(2)?,
                visit_date: row.get(3)?,
                physician: row.get(4)?,
                opth: row.get(5)?,
                modulator: row.get(6)?,
                pft: row.get(7)?,
                registry: row.get(8)?,
            })
        })?;

        rows.collect::<Result<Vec<_>, _>>().map_err(Into::into)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::test_support::temp_db;
    use crate::model::{NewFollowup, NewVisit, Patient};

    fn seeded() -> (tempfile::TempDir, Database) {
        let (dir, db) = temp_db();
        db.add_patient(&Patient::new("1", "Ann", "Lee", "30", "None"))
            .unwrap();
        db.add_patient(&Patient::new("2", "Bo", "Kim", "40", "Spanish"))
            .unwrap();
        let followup = NewFollowup {
            pft: Some("Normal".into()),
            ..Default::default()
        };
        for (mrn, date) in [("1", "2024-01-15"), ("2", "2024-03-01"), ("1", "2024-06-30")] {
            db.add_visit_with_followup(mrn, &NewVisit::new(date, "Dr. X"), &followup)
                .unwrap();
        }
        (dir, db)
    }

    #[test]
    fn test_range_is_inclusive_and_sorted() {
        let (_dir, db) = seeded();
        let rows = db
            .visit_report(&ReportRange::new("2024-01-15", "2024-03-01"))
            .unwrap();

        let dates: Vec<&str> = rows.iter().map(|r| r.visit_date.as_str()).collect();
        assert_eq!(dates, vec!["2024-03-01", "2024-01-15"]);
        assert_eq!(rows[0].first_name, "Bo");
        assert_eq!(rows[0].pft.as_deref(), Some("Normal"));
    }

    #[test]
    fn test_range_excluding_everything_is_empty() {
        let (_dir, db) = seeded();
        let rows = db
            .visit_report(&ReportRange::new("2025-01-01", "2025-12-31"))
            .unwrap();
        assert!(rows.is_empty());
    }
}
