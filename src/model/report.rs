//! Visit report rows

use chrono::NaiveDate;

/// Header row of the report file, in join-query column order
pub const REPORT_COLUMNS: [&str; 9] = [
    "first_name",
    "last_name",
    "mrn",
    "visit_date",
    "physician",
    "opth",
    "modulator",
    "pft",
    "registry",
];

/// Date format used for visit dates and report bounds
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// One matched visit in a report
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReportRow {
    pub first_name: String,
    pub last_name: String,
    pub mrn: String,
    pub visit_date: String,
    pub physician: String,
    pub opth: Option<String>,
    pub modulator: Option<String>,
    pub pft: Option<String>,
    pub registry: Option<String>,
}

impl ReportRow {
    pub fn cells(&self) -> [String; 9] {
        let opt = |v: &Option<String>| v.clone().unwrap_or_default();
        [
            self.first_name.clone(),
            self.last_name.clone(),
            self.mrn.clone(),
            self.visit_date.clone(),
            self.physician.clone(),
            opt(&self.opth),
            opt(&self.modulator),
            opt(&self.pft),
            opt(&self.registry),
        ]
    }
}

/// Inclusive date bounds for a report.
///
/// Bounds are kept as text: stored visit dates are untyped, so the filter is a
/// string comparison against them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportRange {
    pub start: String,
    pub end: String,
}

impl ReportRange {
    pub fn new(start: impl Into<String>, end: impl Into<String>) -> Self {
        Self {
            start: start.into(),
            end: end.into(),
        }
    }

    /// Build a range from user input, requiring `YYYY-MM-DD` dates
    pub fn parse(start: &str, end: &str) -> Result<Self, String> {
        let start = start.trim();
        let end = end.trim();
        for (label, value) in [("Start Date", start), ("End Date", end)] {
            NaiveDate::parse_from_str(value, DATE_FORMAT)
                .map_err(|_| format!("{} must be a date in YYYY-MM-DD format", label))?;
        }
        Ok(Self::new(start, end))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_range() {
        let range = ReportRange::parse(" 2024-01-01", "2024-12-31 ").unwrap();
        assert_eq!(range, ReportRange::new("2024-01-01", "2024-12-31"));
    }

    #[test]
    fn test_parse_rejects_bad_dates() {
        let err = ReportRange::parse("2024-13-01", "2024-12-31").unwrap_err();
        assert!(err.starts_with("Start Date"));
        let err = ReportRange::parse("2024-01-01", "yesterday").unwrap_err();
        assert!(err.starts_with("End Date"));
    }

    #[test]
    fn test_cells_order() {
        let row = ReportRow {
            first_name: "A".into(),
            last_name: "B".into(),
            mrn: "1".into(),
            visit_date: "2024-01-01".into(),
            physician: "Dr. X".into(),
            registry: Some("N".into()),
            ..Default::default()
        };
        let cells = row.cells();
        assert_eq!(cells[2], "1");
        assert_eq!(cells[5], "");
        assert_eq!(cells[8], "N");
    }
}
