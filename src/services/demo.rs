//! Demonstration data for trying the application out

use crate::db::{upsert_patient, Database, DbResult};
use crate::model::{Patient, DATE_FORMAT};
use chrono::{Duration, Local, NaiveDate};
use rusqlite::params;

const PATIENTS: [(&str, &str, &str, &str, &str); 10] = [
    ("12345", "John", "Doe", "25", "Spanish"),
    ("67890", "Jane", "Smith", "30", "None"),
    ("24680", "Bob", "Johnson", "45", "French"),
    ("13579", "Sarah", "Williams", "28", "Arabic"),
    ("86420", "Michael", "Brown", "35", "None"),
    ("97531", "Emily", "Davis", "22", "Spanish"),
    ("12346", "David", "Wilson", "40", "None"),
    ("67891", "Lisa", "Taylor", "33", "French"),
    ("24681", "James", "Anderson", "50", "None"),
    ("13580", "Jennifer", "Thomas", "27", "Spanish"),
];

const PHYSICIANS: [&str; 5] = ["Dr. Smith", "Dr. Jones", "Dr. Brown", "Dr. White", "Dr. Green"];
const CX_RESULTS: [&str; 2] = ["Positive", "Negative"];
const OGTT_RESULTS: [&str; 3] = ["Normal", "Abnormal", "Borderline"];
const YES_NO: [&str; 2] = ["Y", "N"];
const MODULATORS: [&str; 4] = ["Trikafta", "Kalydeco", "Symdeko", "None"];
const PFT_RESULTS: [&str; 4] = ["Normal", "Mild", "Moderate", "Severe"];

/// Visits span this many days back from `today`
const HISTORY_DAYS: i64 = 730;

/// Counts of rows written by `seed_demo_data`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DemoSummary {
    pub patients: usize,
    pub visits: usize,
}

fn pick<'a>(pool: &[&'a str], n: usize) -> &'a str {
    pool[n % pool.len()]
}

/// Replace all data with ten demo patients and their visit histories.
pub fn seed_demo_data(db: &Database) -> DbResult<DemoSummary> {
    seed_demo_data_as_of(db, Local::now().date_naive())
}

/// Same as `seed_demo_data`, with visit dates relative to `today`.
pub fn seed_demo_data_as_of(db: &Database, today: NaiveDate) -> DbResult<DemoSummary> {
    let mut conn = db.connect()?;
    let tx = conn.transaction()?;

    tx.execute_batch("DELETE FROM Followups; DELETE FROM Visits; DELETE FROM Patients;")?;

    let start = today - Duration::days(HISTORY_DAYS);
    let mut visits = 0;
    for (i, (mrn, first, last, age, translator)) in PATIENTS.iter().enumerate() {
        upsert_patient(&tx, &Patient::new(*mrn, *first, *last, *age, *translator))?;

        for j in 0..3 + i % 3 {
            let n = i * 7 + j * 3;
            let offset = ((i * 97 + j * 211) as i64) % (HISTORY_DAYS + 1);
            let date = (start + Duration::days(offset)).format(DATE_FORMAT).to_string();
            let due_notes = format!("Follow up in {} months", 1 + n % 12);

            tx.execute(
                r#"
                INSERT INTO Visits (mrn, visit_date, physician, last_cx, due_notes, ogtt)
                VALUES (?1, ?2, ?3, ?4, ?5, ?6)
                "#,
                params![
                    mrn,
                    date,
                    pick(&PHYSICIANS, n),
                    pick(&CX_RESULTS, n),
                    due_notes,
                    pick(&OGTT_RESULTS, n),
                ],
            )?;
            let visit_id = tx.last_insert_rowid();

            tx.execute(
                r#"
                INSERT INTO Followups (visit_id, opth, modulator, pft, registry)
                VALUES (?1, ?2, ?3, ?4, ?5)
                "#,
                params![
                    visit_id,
                    pick(&YES_NO, n),
                    pick(&MODULATORS, n),
                    pick(&PFT_RESULTS, n),
                    pick(&YES_NO, n + 1),
                ],
            )?;
            visits += 1;
        }
    }

    tx.commit()?;
    tracing::info!(patients = PATIENTS.len(), visits, "demo data seeded");
    Ok(DemoSummary {
        patients: PATIENTS.len(),
        visits,
    })
}
