//! SQLite storage for patients, visits and followups.
//!
//! `Database` only remembers where the file lives. Every operation opens its
//! own connection and drops it before returning, so no connection state is
//! shared between operations.

mod patients;
mod reports;
mod schema;
mod visits;

pub use patients::upsert_patient;
pub use schema::SCHEMA;

use rusqlite::{ffi, Connection};
use std::os::raw::c_int;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Database errors.
#[derive(Error, Debug)]
pub enum DbError {
    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    #[error("{0} is required")]
    Validation(&'static str),

    #[error("MRN must be unique: {0} already exists")]
    DuplicateMrn(String),

    #[error("Cannot delete patient {0}: patient has visit history")]
    HasVisits(String),

    #[error("Record not found: {0}")]
    NotFound(String),
}

pub type DbResult<T> = Result<T, DbError>;

/// Handle to the clinic database file.
#[derive(Debug, Clone)]
pub struct Database {
    path: PathBuf,
}

impl Database {
    /// Open the database at `path`, creating the file and tables if needed.
    pub fn open<P: AsRef<Path>>(path: P) -> DbResult<Self> {
        let db = Self {
            path: path.as_ref().to_path_buf(),
        };
        db.initialize()?;
        tracing::info!(path = %db.path.display(), "database ready");
        Ok(db)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Open a fresh connection with foreign-key enforcement on.
    ///
    /// The connection closes when dropped.
    pub fn connect(&self) -> DbResult<Connection> {
        let conn = Connection::open(&self.path)?;
        conn.execute_batch("PRAGMA foreign_keys = ON;")?;
        Ok(conn)
    }

    /// Create the three tables if absent. Existing tables are left untouched.
    fn initialize(&self) -> DbResult<()> {
        let conn = self.connect()?;
        conn.execute_batch(SCHEMA)?;
        Ok(())
    }
}

/// Extended SQLite result code of a constraint failure, if `err` is one.
fn constraint_code(err: &rusqlite::Error) -> Option<c_int> {
    match err {
        rusqlite::Error::SqliteFailure(e, _) if e.code == ffi::ErrorCode::ConstraintViolation => {
            Some(e.extended_code)
        }
        _ => None,
    }
}

fn is_unique_violation(err: &rusqlite::Error) -> bool {
    matches!(
        constraint_code(err),
        Some(ffi::SQLITE_CONSTRAINT_PRIMARYKEY) | Some(ffi::SQLITE_CONSTRAINT_UNIQUE)
    )
}

fn is_foreign_key_violation(err: &rusqlite::Error) -> bool {
    constraint_code(err) == Some(ffi::SQLITE_CONSTRAINT_FOREIGNKEY)
}

#[cfg(test)]
pub(crate) mod test_support {
    use super::Database;
    use tempfile::TempDir;

    /// Database in a temp dir; keep the dir alive for the test's duration.
    pub fn temp_db() -> (TempDir, Database) {
        let dir = tempfile::tempdir().unwrap();
        let db = Database::open(dir.path().join("clinic_test.db")).unwrap();
        (dir, db)
    }
}

#[cfg(test)]
mod tests {
    use super::test_support::temp_db;
    use super::*;

    #[test]
    fn test_schema_initialized() {
        let (_dir, db) = temp_db();
        let conn = db.connect().unwrap();

        let tables: Vec<String> = conn
            .prepare("SELECT name FROM sqlite_master WHERE type='table' ORDER BY name")
            .unwrap()
            .query_map([], |row| row.get(0))
            .unwrap()
            .filter_map(|r| r.ok())
            .collect();

        assert!(tables.contains(&"Patients".to_string()));
        assert!(tables.contains(&"Visits".to_string()));
        assert!(tables.contains(&"Followups".to_string()));
    }

    #[test]
    fn test_reopen_keeps_data() {
        let (dir, db) = temp_db();
        db.connect()
            .unwrap()
            .execute(
                "INSERT INTO Patients (mrn, first_name, last_name, age, translator) VALUES ('1', 'A', 'B', '3', 'None')",
                [],
            )
            .unwrap();

        let reopened = Database::open(dir.path().join("clinic_test.db")).unwrap();
        assert_eq!(reopened.list_patients().unwrap().len(), 1);
    }

    #[test]
    fn test_foreign_keys_enforced() {
        let (_dir, db) = temp_db();
        let enabled: i64 = db
            .connect()
            .unwrap()
            .query_row("PRAGMA foreign_keys", [], |row| row.get(0))
            .unwrap();
        assert_eq!(enabled, 1);
    }
}
