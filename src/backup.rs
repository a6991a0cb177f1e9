//! Snapshot, restore, clear and combined export of the three data stores.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::Local;
use tracing::{info, warn};

use crate::config::{ATTENDANCE_FILE, Config, EMPLOYEE_FILE, USER_FILE};
use crate::error::{EmsError, Result};
use crate::sheet::{Sheet, Workbook};
use crate::store::attendance::AttendanceLog;
use crate::store::employees::EmployeeStore;
use crate::store::users::UserStore;

const STORE_FILE_NAMES: [&str; 3] = [USER_FILE, EMPLOYEE_FILE, ATTENDANCE_FILE];

/// Explicit confirmation gate for destructive restores. The presentation
/// layer must collect the user's answer before calling `restore`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Confirmation {
    Confirmed,
    Cancelled,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RestoreOutcome {
    /// Live stores were overwritten; the caller must discard any session
    /// state, since roles and roster may have changed underneath it.
    Restored,
    Cancelled,
}

pub struct BackupManager {
    config: Config,
}

impl BackupManager {
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    /// Copies whichever store files exist into a fresh timestamp-named
    /// subfolder of `dest_dir` and returns its path. A failure partway
    /// leaves the copies made so far in place.
    pub fn backup(&self, dest_dir: &Path) -> Result<PathBuf> {
        let stamp = Local::now().format("%Y%m%d_%H%M%S");
        let backup_dir = dest_dir.join(format!("ems_backup_{stamp}"));
        fs::create_dir_all(&backup_dir)?;

        for (name, file) in STORE_FILE_NAMES.iter().zip(self.config.store_files()) {
            if !file.exists() {
                continue;
            }
            fs::copy(&file, backup_dir.join(name))?;
        }

        info!(backup_dir = %backup_dir.display(), "backup created");
        Ok(backup_dir)
    }

    /// Overwrites the live stores from `source_dir`. All three canonical
    /// files must be present in the source before anything is touched;
    /// a cancelled confirmation is a no-op.
    pub fn restore(&self, source_dir: &Path, confirmation: Confirmation) -> Result<RestoreOutcome> {
        let missing: Vec<String> = STORE_FILE_NAMES
            .iter()
            .filter(|name| !source_dir.join(name).exists())
            .map(|name| name.to_string())
            .collect();
        if !missing.is_empty() {
            return Err(EmsError::MissingFiles { missing });
        }

        if confirmation == Confirmation::Cancelled {
            return Ok(RestoreOutcome::Cancelled);
        }

        fs::create_dir_all(&self.config.data_dir)?;
        for (name, file) in STORE_FILE_NAMES.iter().zip(self.config.store_files()) {
            fs::copy(source_dir.join(name), &file)?;
        }

        info!(source_dir = %source_dir.display(), "data restored from backup");
        Ok(RestoreOutcome::Restored)
    }

    /// Deletes all three store files. Already-absent files are fine, so
    /// calling this twice is a no-op the second time.
    pub fn clear_all(&self) -> Result<()> {
        for file in self.config.store_files() {
            match fs::remove_file(&file) {
                Ok(()) => {}
                Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
                Err(e) => return Err(e.into()),
            }
        }

        info!("all store files cleared");
        Ok(())
    }

    /// Writes one combined artifact with a section per existing store:
    /// `Users`, `Employees`, `Attendance`. Absent stores are skipped, and
    /// the live stores are only read.
    pub fn export_all(&self, dest: &Path) -> Result<()> {
        let mut workbook = Workbook::new();

        if self.config.user_file().exists() {
            let users = UserStore::new(&self.config);
            let mut sheet = Sheet::new(
                "Users",
                &["Username", "Password", "Role", "Employee ID"],
            );
            for account in users.read_accounts()? {
                sheet.push_row(vec![
                    account.username,
                    account.password,
                    account.role.to_string(),
                    account.employee_id.unwrap_or_default(),
                ]);
            }
            workbook.push_sheet(sheet);
        }

        if self.config.employee_file().exists() {
            let employees = EmployeeStore::new(&self.config);
            let mut sheet = Sheet::new("Employees", &["Employee ID", "Employee Name"]);
            for employee in employees.load()?.iter() {
                sheet.push_row(vec![employee.id.clone(), employee.name.clone()]);
            }
            workbook.push_sheet(sheet);
        }

        if self.config.attendance_file().exists() {
            workbook.push_sheet(AttendanceLog::new(&self.config).to_sheet()?);
        }

        if workbook.is_empty() {
            warn!("export requested with no store files present");
        }
        workbook.write(dest)?;

        info!(dest = %dest.display(), "combined export written");
        Ok(())
    }
}
