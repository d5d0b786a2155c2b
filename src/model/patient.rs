//! Patient demographics

/// Translator value used when none was entered
pub const NO_TRANSLATOR: &str = "None";

/// Column headers shared by the patient table and the CSV transfer format
pub const PATIENT_COLUMNS: [&str; 5] = ["MRN", "First Name", "Last Name", "Age", "Translator"];

/// A patient row, identified by its medical record number
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Patient {
    pub mrn: String,
    pub first_name: String,
    pub last_name: String,
    /// Stored as free text
    pub age: String,
    pub translator: String,
}

impl Patient {
    pub fn new(
        mrn: impl Into<String>,
        first_name: impl Into<String>,
        last_name: impl Into<String>,
        age: impl Into<String>,
        translator: impl Into<String>,
    ) -> Self {
        Self {
            mrn: mrn.into(),
            first_name: first_name.into(),
            last_name: last_name.into(),
            age: age.into(),
            translator: translator.into(),
        }
    }

    /// Blank patient for the add form
    pub fn blank() -> Self {
        Self {
            translator: NO_TRANSLATOR.to_string(),
            ..Default::default()
        }
    }

    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }

    /// Cell values in table/CSV column order
    pub fn columns(&self) -> [&str; 5] {
        [
            &self.mrn,
            &self.first_name,
            &self.last_name,
            &self.age,
            &self.translator,
        ]
    }

    /// Build a patient from a five-column record
    pub fn from_columns<S: AsRef<str>>(cols: &[S]) -> Option<Self> {
        match cols {
            [mrn, first, last, age, translator] => Some(Self::new(
                mrn.as_ref(),
                first.as_ref(),
                last.as_ref(),
                age.as_ref(),
                translator.as_ref(),
            )),
            _ => None,
        }
    }

    /// Trim every field the way the entry form does
    pub fn trimmed(&self) -> Self {
        Self::new(
            self.mrn.trim(),
            self.first_name.trim(),
            self.last_name.trim(),
            self.age.trim(),
            self.translator.trim(),
        )
    }

    /// Name of the first required field that is empty
    pub fn missing_required(&self) -> Option<&'static str> {
        if self.mrn.trim().is_empty() {
            Some("MRN")
        } else if self.first_name.trim().is_empty() {
            Some("First Name")
        } else if self.last_name.trim().is_empty() {
            Some("Last Name")
        } else {
            None
        }
    }
}
