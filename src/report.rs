//! Presence/absence tallies derived from the attendance table.

use std::path::Path;

use serde::Serialize;

use crate::error::Result;
use crate::model::attendance::{AttendanceRecord, AttendanceStatus};
use crate::sheet::Sheet;

/// One summary row per (employee id, recorded name) pair. The name is part
/// of the grouping key, so an id whose denormalized name varies across
/// historical rows produces one row per variant.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AttendanceSummary {
    pub employee_id: String,
    pub employee_name: String,
    pub present: u32,
    pub absent: u32,
}

impl AttendanceSummary {
    /// Legacy report cell format.
    pub fn tally_text(&self) -> String {
        format!("Present: {}, Absent: {}", self.present, self.absent)
    }
}

/// Groups records by (id, name) in first-seen order and tallies statuses.
/// Pure function of its input.
pub fn summarize(records: &[AttendanceRecord]) -> Vec<AttendanceSummary> {
    let mut summaries: Vec<AttendanceSummary> = Vec::new();

    for record in records {
        let position = summaries.iter().position(|s| {
            s.employee_id == record.employee_id && s.employee_name == record.employee_name
        });
        let index = match position {
            Some(index) => index,
            None => {
                summaries.push(AttendanceSummary {
                    employee_id: record.employee_id.clone(),
                    employee_name: record.employee_name.clone(),
                    present: 0,
                    absent: 0,
                });
                summaries.len() - 1
            }
        };
        let summary = &mut summaries[index];

        match record.status {
            AttendanceStatus::Present => summary.present += 1,
            AttendanceStatus::Absent => summary.absent += 1,
        }
    }

    summaries
}

/// Writes the summary as a single-sheet table. Reads nothing and mutates
/// nothing besides `dest`.
pub fn export_summary(summary: &[AttendanceSummary], dest: &Path) -> Result<()> {
    let mut sheet = Sheet::new(
        "Report",
        &["Employee ID", "Employee Name", "Attendance Summary"],
    );
    for row in summary {
        sheet.push_row(vec![
            row.employee_id.clone(),
            row.employee_name.clone(),
            row.tally_text(),
        ]);
    }

    sheet.write(dest)?;
    Ok(())
}
