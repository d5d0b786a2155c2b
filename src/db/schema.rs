//! Table definitions.

/// Idempotent schema: creates missing tables, never alters existing ones.
pub const SCHEMA: &str = r#"
CREATE TABLE IF NOT EXISTS Patients (
    mrn TEXT PRIMARY KEY,
    first_name TEXT NOT NULL,
    last_name TEXT NOT NULL,
    age TEXT NOT NULL,
    translator TEXT
);

CREATE TABLE IF NOT EXISTS Visits (
    visit_id INTEGER PRIMARY KEY AUTOINCREMENT,
    mrn TEXT NOT NULL,
    visit_date TEXT NOT NULL,
    physician TEXT NOT NULL,
    last_cx TEXT,
    due_notes TEXT,
    ogtt TEXT,
    FOREIGN KEY (mrn) REFERENCES Patients(mrn)
);

CREATE TABLE IF NOT EXISTS Followups (
    followup_id INTEGER PRIMARY KEY AUTOINCREMENT,
    visit_id INTEGER NOT NULL,
    opth TEXT,
    modulator TEXT,
    pft TEXT,
    registry TEXT,
    FOREIGN KEY (visit_id) REFERENCES Visits(visit_id)
);
"#;
