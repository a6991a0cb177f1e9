use std::env;
use std::path::PathBuf;

use dotenvy::dotenv;

/// Canonical store file names inside the data directory.
pub const USER_FILE: &str = "users.txt";
pub const EMPLOYEE_FILE: &str = "employees.txt";
pub const ATTENDANCE_FILE: &str = "attendance.csv";

#[derive(Debug, Clone)]
pub struct Config {
    pub data_dir: PathBuf,
}

impl Config {
    pub fn from_env() -> Self {
        dotenv().ok();

        Self {
            data_dir: env::var("EMS_DATA_DIR")
                .unwrap_or_else(|_| ".".to_string())
                .into(),
        }
    }

    pub fn with_data_dir(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    pub fn user_file(&self) -> PathBuf {
        self.data_dir.join(USER_FILE)
    }

    pub fn employee_file(&self) -> PathBuf {
        self.data_dir.join(EMPLOYEE_FILE)
    }

    pub fn attendance_file(&self) -> PathBuf {
        self.data_dir.join(ATTENDANCE_FILE)
    }

    /// The three live store files, in backup/export order.
    pub fn store_files(&self) -> [PathBuf; 3] {
        [
            self.user_file(),
            self.employee_file(),
            self.attendance_file(),
        ]
    }
}
