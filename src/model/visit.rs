//! Visits and their followup records

/// Column headers for the visit history table
pub const VISIT_COLUMNS: [&str; 9] = [
    "Visit Date",
    "Physician",
    "Last CX",
    "Due Notes",
    "OGTT",
    "Opth",
    "Modulator",
    "PFT",
    "Registry",
];

/// Visit fields entered on the add-visit form
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NewVisit {
    pub visit_date: String,
    pub physician: String,
    pub last_cx: Option<String>,
    pub due_notes: Option<String>,
    pub ogtt: Option<String>,
}

impl NewVisit {
    pub fn new(visit_date: impl Into<String>, physician: impl Into<String>) -> Self {
        Self {
            visit_date: visit_date.into(),
            physician: physician.into(),
            ..Default::default()
        }
    }

    pub fn missing_required(&self) -> Option<&'static str> {
        if self.visit_date.trim().is_empty() {
            Some("Visit Date")
        } else if self.physician.trim().is_empty() {
            Some("Physician")
        } else {
            None
        }
    }
}

/// Followup fields saved alongside a new visit
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NewFollowup {
    pub opth: Option<String>,
    pub modulator: Option<String>,
    pub pft: Option<String>,
    pub registry: Option<String>,
}

/// One row of a patient's visit history (visit left-joined to its followup)
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VisitRecord {
    pub visit_date: String,
    pub physician: String,
    pub last_cx: Option<String>,
    pub due_notes: Option<String>,
    pub ogtt: Option<String>,
    pub opth: Option<String>,
    pub modulator: Option<String>,
    pub pft: Option<String>,
    pub registry: Option<String>,
}

impl VisitRecord {
    /// Display cells in `VISIT_COLUMNS` order, NULL shown as empty
    pub fn cells(&self) -> Vec<String> {
        let opt = |v: &Option<String>| v.clone().unwrap_or_default();
        vec![
            self.visit_date.clone(),
            self.physician.clone(),
            opt(&self.last_cx),
            opt(&self.due_notes),
            opt(&self.ogtt),
            opt(&self.opth),
            opt(&self.modulator),
            opt(&self.pft),
            opt(&self.registry),
        ]
    }
}

/// Map an entered value to a nullable column: empty means NULL
pub fn optional_field(value: &str) -> Option<String> {
    let value = value.trim();
    if value.is_empty() {
        None
    } else {
        Some(value.to_string())
    }
}
