//! Per-section headcount for one day.

use crate::core::reconcile::DailyStatuses;
use crate::core::roster::SectionFilter;
use crate::errors::AppResult;
use crate::models::Student;
use serde::Serialize;
use std::collections::BTreeMap;
use std::path::Path;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct SectionSummary {
    pub section: String,
    pub total: usize,
    pub present: Vec<String>,
    pub absent: Vec<String>,
}

impl SectionSummary {
    pub fn attendance_rate(&self) -> String {
        if self.total == 0 {
            return "0.0%".to_string();
        }
        format!(
            "{:.1}%",
            self.present.len() as f64 / self.total as f64 * 100.0
        )
    }

    pub fn absentees_label(&self) -> String {
        if self.absent.is_empty() {
            "None".to_string()
        } else {
            self.absent.join(", ")
        }
    }
}

#[derive(Serialize)]
struct SummaryRow<'a> {
    #[serde(rename = "Section")]
    section: &'a str,
    #[serde(rename = "Total_Strength")]
    total: usize,
    #[serde(rename = "Present")]
    present: usize,
    #[serde(rename = "Absent")]
    absent: usize,
    #[serde(rename = "Attendance_Rate")]
    rate: String,
    #[serde(rename = "Absentees")]
    absentees: String,
}

fn sort_names(names: &mut [String]) {
    names.sort_by_key(|a| a.to_lowercase());
}

/// Group the day's statuses by section.
///
/// A student in several sections is counted in each of them. Sections are
/// ordered by label, names alphabetically.
pub fn summarize(
    students: &[Student],
    day: &DailyStatuses,
    filter: &SectionFilter,
) -> Vec<SectionSummary> {
    let mut by_section: BTreeMap<&str, SectionSummary> = BTreeMap::new();

    for s in students {
        let present = day.status_of(s.id).counts_as_present();

        for section in &s.sections {
            if let SectionFilter::Named(label) = filter
                && label != section
            {
                continue;
            }

            let entry = by_section
                .entry(section.as_str())
                .or_insert_with(|| SectionSummary {
                    section: section.clone(),
                    ..Default::default()
                });

            entry.total += 1;
            if present {
                entry.present.push(s.name.clone());
            } else {
                entry.absent.push(s.name.clone());
            }
        }
    }

    by_section
        .into_values()
        .map(|mut summary| {
            sort_names(&mut summary.present);
            sort_names(&mut summary.absent);
            summary
        })
        .collect()
}

/// (total, present, absent) over all summaries.
pub fn totals(summaries: &[SectionSummary]) -> (usize, usize, usize) {
    summaries.iter().fold((0, 0, 0), |(t, p, a), s| {
        (t + s.total, p + s.present.len(), a + s.absent.len())
    })
}

pub fn write_summary_csv(summaries: &[SectionSummary], path: &Path) -> AppResult<()> {
    let mut wtr = csv::Writer::from_path(path)?;

    // serde only emits the header together with the first row
    if summaries.is_empty() {
        wtr.write_record([
            "Section",
            "Total_Strength",
            "Present",
            "Absent",
            "Attendance_Rate",
            "Absentees",
        ])?;
    }

    for s in summaries {
        wtr.serialize(SummaryRow {
            section: &s.section,
            total: s.total,
            present: s.present.len(),
            absent: s.absent.len(),
            rate: s.attendance_rate(),
            absentees: s.absentees_label(),
        })?;
    }

    wtr.flush()?;
    Ok(())
}
