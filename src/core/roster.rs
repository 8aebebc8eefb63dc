//! Section filtering and report ordering of the roster.

use crate::models::Student;
use std::cmp::Ordering;

/// Sentinel label selecting every section.
pub const ALL_SECTIONS: &str = "all";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SectionFilter {
    All,
    Named(String),
}

impl SectionFilter {
    /// `None`, blank input and `all` (any case) select every section.
    pub fn parse(label: Option<&str>) -> Self {
        match label.map(str::trim) {
            None | Some("") => SectionFilter::All,
            Some(l) if l.eq_ignore_ascii_case(ALL_SECTIONS) => SectionFilter::All,
            Some(l) => SectionFilter::Named(l.to_string()),
        }
    }

    pub fn matches(&self, student: &Student) -> bool {
        match self {
            SectionFilter::All => true,
            SectionFilter::Named(label) => student.in_section(label),
        }
    }

    /// Label used in file names and report titles.
    pub fn label(&self) -> &str {
        match self {
            SectionFilter::All => ALL_SECTIONS,
            SectionFilter::Named(label) => label,
        }
    }
}

/// A student at a fixed position in a report.
#[derive(Debug, Clone, PartialEq)]
pub struct RosterEntry {
    /// 1-based, re-assigned for every filter.
    pub roll_number: usize,
    pub student: Student,
}

/// Case-insensitive name order; equal names fall back to the id so the
/// order does not depend on how the store returned the students.
pub fn compare_by_name(a: &Student, b: &Student) -> Ordering {
    a.name
        .to_lowercase()
        .cmp(&b.name.to_lowercase())
        .then_with(|| a.id.cmp(&b.id))
}

/// Select the students of `filter`, sort them by name and number them.
pub fn build_roster(students: &[Student], filter: &SectionFilter) -> Vec<RosterEntry> {
    let mut selected: Vec<&Student> = students.iter().filter(|s| filter.matches(s)).collect();
    selected.sort_by(|a, b| compare_by_name(a, b));

    selected
        .into_iter()
        .enumerate()
        .map(|(i, s)| RosterEntry {
            roll_number: i + 1,
            student: s.clone(),
        })
        .collect()
}
