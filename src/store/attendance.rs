//! Attendance log: `attendance.csv`, a headered table that only ever grows.
//!
//! Each "mark attendance" action appends one batch (one row per roster
//! employee, all sharing a single stamp) after the existing rows. There is
//! no merge-by-key: marking the same day twice accumulates two full row
//! sets for that date.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::{info, warn};

use crate::config::Config;
use crate::error::{EmsError, Result};
use crate::model::attendance::{AttendanceRecord, AttendanceStatus};
use crate::sheet::{Sheet, split_line};

pub const COLUMNS: [&str; 5] = ["Date", "Time", "Employee ID", "Employee Name", "Status"];

pub struct AttendanceLog {
    path: PathBuf,
}

impl AttendanceLog {
    pub fn new(config: &Config) -> Self {
        Self {
            path: config.attendance_file(),
        }
    }

    pub fn from_path(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Appends one batch after the existing table and rewrites the table
    /// in full. The batch must be non-empty (an empty roster cannot be
    /// marked) and every record must carry the same date/time stamp.
    pub fn mark_batch(&self, records: &[AttendanceRecord]) -> Result<()> {
        let first = records.first().ok_or_else(|| {
            EmsError::Validation("no employees available to mark attendance".to_string())
        })?;
        if records
            .iter()
            .any(|r| r.date != first.date || r.time != first.time)
        {
            return Err(EmsError::Validation(
                "all records in a batch must share one date/time stamp".to_string(),
            ));
        }

        let mut table = self.query_all()?;
        table.extend_from_slice(records);
        self.rewrite(&table)?;

        info!(date = %first.date, rows = records.len(), "attendance batch recorded");
        Ok(())
    }

    /// The full table in on-disk order: oldest batches first, roster
    /// order within each batch. A missing table is empty.
    pub fn query_all(&self) -> Result<Vec<AttendanceRecord>> {
        if !self.path.exists() {
            return Ok(Vec::new());
        }

        let contents = fs::read_to_string(&self.path)?;
        let mut records = Vec::new();

        // First line is the header.
        for (line_no, line) in contents.lines().enumerate().skip(1) {
            if line.is_empty() {
                continue;
            }
            match self.decode_row(line, line_no + 1) {
                Some(record) => records.push(record),
                None => continue,
            }
        }

        Ok(records)
    }

    /// The rows belonging to one employee, order preserved. This filter is
    /// the only thing separating an employee's view from a manager's; the
    /// id must come from the active session.
    pub fn query_by_employee(&self, employee_id: &str) -> Result<Vec<AttendanceRecord>> {
        let mut records = self.query_all()?;
        records.retain(|r| r.employee_id == employee_id);
        Ok(records)
    }

    /// Copies the live table to `dest` byte for byte. The source is never
    /// mutated.
    pub fn export_copy(&self, dest: &Path) -> Result<()> {
        if !self.path.exists() {
            return Err(EmsError::NotFound(
                "no attendance data to export".to_string(),
            ));
        }
        fs::copy(&self.path, dest)?;
        Ok(())
    }

    /// Renders the full table as an export sheet.
    pub fn to_sheet(&self) -> Result<Sheet> {
        let mut sheet = Sheet::new("Attendance", &COLUMNS);
        for record in self.query_all()? {
            sheet.push_row(encode_row(&record));
        }
        Ok(sheet)
    }

    fn rewrite(&self, records: &[AttendanceRecord]) -> Result<()> {
        let mut sheet = Sheet::new("Attendance", &COLUMNS);
        for record in records {
            sheet.push_row(encode_row(record));
        }

        let temp_path = self.path.with_extension("tmp");
        sheet.write(&temp_path)?;
        fs::rename(&temp_path, &self.path)?;
        Ok(())
    }

    fn decode_row(&self, line: &str, line_no: usize) -> Option<AttendanceRecord> {
        let Ok([date, time, employee_id, employee_name, status]) =
            <[String; 5]>::try_from(split_line(line))
        else {
            warn!(
                path = %self.path.display(),
                line_no,
                "skipping malformed attendance row"
            );
            return None;
        };

        let Ok(status) = status.parse::<AttendanceStatus>() else {
            warn!(
                path = %self.path.display(),
                line_no,
                %status,
                "skipping attendance row with unknown status"
            );
            return None;
        };

        Some(AttendanceRecord {
            date,
            time,
            employee_id,
            employee_name,
            status,
        })
    }
}

fn encode_row(record: &AttendanceRecord) -> Vec<String> {
    vec![
        record.date.clone(),
        record.time.clone(),
        record.employee_id.clone(),
        record.employee_name.clone(),
        record.status.to_string(),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::attendance::{AttendanceStatus, BatchStamp, batch_for_roster};
    use crate::store::employees::EmployeeStore;

    fn log(dir: &tempfile::TempDir) -> AttendanceLog {
        AttendanceLog::from_path(dir.path().join("attendance.csv"))
    }

    fn record(id: &str, name: &str, status: AttendanceStatus) -> AttendanceRecord {
        AttendanceRecord {
            date: "01-02-2025".to_string(),
            time: "09:00:00".to_string(),
            employee_id: id.to_string(),
            employee_name: name.to_string(),
            status,
        }
    }

    #[test]
    fn empty_batch_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let err = log(&dir).mark_batch(&[]).unwrap_err();
        assert!(matches!(err, EmsError::Validation(_)));
    }

    #[test]
    fn mixed_stamps_are_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let mut second = record("E2", "Bob", AttendanceStatus::Absent);
        second.time = "09:00:01".to_string();

        let err = log(&dir)
            .mark_batch(&[record("E1", "Alice", AttendanceStatus::Present), second])
            .unwrap_err();
        assert!(matches!(err, EmsError::Validation(_)));
    }

    #[test]
    fn mark_batch_round_trips_as_table_suffix() {
        let dir = tempfile::tempdir().unwrap();
        let log = log(&dir);

        let first = vec![
            record("E1", "Alice", AttendanceStatus::Present),
            record("E2", "Bob", AttendanceStatus::Absent),
        ];
        log.mark_batch(&first).unwrap();

        let mut second = vec![
            record("E1", "Alice", AttendanceStatus::Absent),
            record("E2", "Bob", AttendanceStatus::Present),
        ];
        for r in &mut second {
            r.date = "02-02-2025".to_string();
        }
        log.mark_batch(&second).unwrap();

        let all = log.query_all().unwrap();
        assert_eq!(all.len(), 4);
        assert_eq!(&all[..2], &first[..]);
        assert_eq!(&all[2..], &second[..]);
    }

    #[test]
    fn remarking_a_date_accumulates_duplicates() {
        let dir = tempfile::tempdir().unwrap();
        let log = log(&dir);
        let batch = vec![record("E1", "Alice", AttendanceStatus::Present)];

        log.mark_batch(&batch).unwrap();
        log.mark_batch(&batch).unwrap();

        assert_eq!(log.query_all().unwrap().len(), 2);
    }

    #[test]
    fn query_by_employee_is_an_order_preserving_filter() {
        let dir = tempfile::tempdir().unwrap();
        let log = log(&dir);

        log.mark_batch(&[
            record("E1", "Alice", AttendanceStatus::Present),
            record("E2", "Bob", AttendanceStatus::Absent),
        ])
        .unwrap();

        let all = log.query_all().unwrap();
        let filtered = log.query_by_employee("E1").unwrap();
        let expected: Vec<_> = all
            .iter()
            .filter(|r| r.employee_id == "E1")
            .cloned()
            .collect();
        assert_eq!(filtered, expected);

        assert!(log.query_by_employee("E9").unwrap().is_empty());
    }

    #[test]
    fn query_all_of_missing_table_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        assert!(log(&dir).query_all().unwrap().is_empty());
    }

    #[test]
    fn export_copy_duplicates_without_mutating() {
        let dir = tempfile::tempdir().unwrap();
        let log = log(&dir);
        log.mark_batch(&[record("E1", "Alice", AttendanceStatus::Present)])
            .unwrap();

        let source = dir.path().join("attendance.csv");
        let dest = dir.path().join("export.csv");
        let before = fs::read(&source).unwrap();

        log.export_copy(&dest).unwrap();

        assert_eq!(fs::read(&source).unwrap(), before);
        assert_eq!(fs::read(&dest).unwrap(), before);
    }

    #[test]
    fn export_copy_of_missing_table_fails() {
        let dir = tempfile::tempdir().unwrap();
        let err = log(&dir)
            .export_copy(&dir.path().join("export.csv"))
            .unwrap_err();
        assert!(matches!(err, EmsError::NotFound(_)));
    }

    #[test]
    fn comma_in_name_survives_the_table() {
        let dir = tempfile::tempdir().unwrap();
        let log = log(&dir);

        log.mark_batch(&[record("E1", "Doe, Alice", AttendanceStatus::Present)])
            .unwrap();

        assert_eq!(log.query_all().unwrap()[0].employee_name, "Doe, Alice");
    }

    #[test]
    fn unknown_status_rows_are_skipped() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("attendance.csv");
        fs::write(
            &path,
            "Date,Time,Employee ID,Employee Name,Status\n\
             01-02-2025,09:00:00,E1,Alice,P\n\
             01-02-2025,09:00:00,E2,Bob,X\n",
        )
        .unwrap();

        let records = AttendanceLog::from_path(&path).query_all().unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].employee_id, "E1");
    }

    #[test]
    fn batch_for_roster_follows_roster_order() {
        let dir = tempfile::tempdir().unwrap();
        let employees = EmployeeStore::from_path(dir.path().join("employees.txt"));
        employees.add("E2", "Bob").unwrap();
        employees.add("E1", "Alice").unwrap();

        let roster = employees.load().unwrap();
        let stamp = BatchStamp {
            date: "01-02-2025".to_string(),
            time: "09:00:00".to_string(),
        };
        let batch = batch_for_roster(&roster, &stamp, |e| {
            if e.id == "E1" {
                AttendanceStatus::Absent
            } else {
                AttendanceStatus::Present
            }
        });

        assert_eq!(batch.len(), 2);
        assert_eq!(batch[0].employee_id, "E2");
        assert_eq!(batch[0].status, AttendanceStatus::Present);
        assert_eq!(batch[1].employee_id, "E1");
        assert_eq!(batch[1].status, AttendanceStatus::Absent);
        assert!(batch.iter().all(|r| r.date == stamp.date && r.time == stamp.time));
    }
}
