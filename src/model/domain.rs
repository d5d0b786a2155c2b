//! Domain state - clinic data separate from UI concerns

use super::patient::Patient;
use crate::db::{Database, DbResult};

/// Data the screens render, plus the handle used to reload it
pub struct DomainState {
    /// Storage handle; every call opens its own connection
    pub db: Database,

    /// Patients as last loaded, in database order
    pub patients: Vec<Patient>,
}

impl DomainState {
    pub fn new(db: Database) -> Self {
        Self {
            db,
            patients: Vec::new(),
        }
    }

    /// Re-query the patient list
    pub fn reload_patients(&mut self) -> DbResult<()> {
        self.patients = self.db.list_patients()?;
        Ok(())
    }

    pub fn patient(&self, index: usize) -> Option<&Patient> {
        self.patients.get(index)
    }
}
