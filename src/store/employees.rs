//! Roster store: `employees.txt`, one `id,name` line per employee.

use std::fs;
use std::fs::OpenOptions;
use std::io::Write;
use std::path::PathBuf;

use tracing::{debug, warn};

use crate::config::Config;
use crate::error::{EmsError, Result};
use crate::model::employee::Employee;

/// The roster as loaded: file order preserved.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Roster {
    entries: Vec<Employee>,
}

impl Roster {
    pub fn get(&self, id: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|e| e.id == id)
            .map(|e| e.name.as_str())
    }

    pub fn contains(&self, id: &str) -> bool {
        self.entries.iter().any(|e| e.id == id)
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Employee> {
        self.entries.iter()
    }
}

pub struct EmployeeStore {
    path: PathBuf,
}

impl EmployeeStore {
    pub fn new(config: &Config) -> Self {
        Self {
            path: config.employee_file(),
        }
    }

    pub fn from_path(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Loads the roster in file order. A missing file is an empty roster;
    /// lines without the id/name separator are skipped with a warning.
    pub fn load(&self) -> Result<Roster> {
        if !self.path.exists() {
            return Ok(Roster::default());
        }

        let contents = fs::read_to_string(&self.path)?;
        let mut entries = Vec::new();

        for (line_no, line) in contents.lines().enumerate() {
            if line.is_empty() {
                continue;
            }
            match line.split_once(',') {
                Some((id, name)) => entries.push(Employee {
                    id: id.to_string(),
                    name: name.to_string(),
                }),
                None => {
                    warn!(
                        path = %self.path.display(),
                        line_no = line_no + 1,
                        "skipping malformed roster line"
                    );
                }
            }
        }

        Ok(Roster { entries })
    }

    /// Appends one employee. The id must be new.
    pub fn add(&self, id: &str, name: &str) -> Result<()> {
        let id = id.trim();
        let name = name.trim();

        if id.is_empty() || name.is_empty() {
            return Err(EmsError::Validation(
                "employee id and name are required".to_string(),
            ));
        }
        if id.contains(',') {
            return Err(EmsError::Validation(
                "employee id must not contain `,`".to_string(),
            ));
        }
        if self.load()?.contains(id) {
            return Err(EmsError::DuplicateId(id.to_string()));
        }

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;
        writeln!(file, "{id},{name}")?;

        debug!(employee_id = %id, "employee added to roster");
        Ok(())
    }

    /// Removes one employee and rewrites the whole store from the
    /// remaining roster. Any external edit made since the load is lost.
    pub fn remove(&self, id: &str) -> Result<()> {
        let roster = self.load()?;
        if !roster.contains(id) {
            return Err(EmsError::NotFound(format!(
                "employee id `{id}` not found"
            )));
        }

        let mut contents = String::new();
        for employee in roster.iter().filter(|e| e.id != id) {
            contents.push_str(&format!("{},{}\n", employee.id, employee.name));
        }

        // Rewrite through a temp file so a failed write cannot truncate
        // the live store.
        let temp_path = self.path.with_extension("tmp");
        fs::write(&temp_path, contents)?;
        fs::rename(&temp_path, &self.path)?;

        debug!(employee_id = %id, "employee removed from roster");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store(dir: &tempfile::TempDir) -> EmployeeStore {
        EmployeeStore::from_path(dir.path().join("employees.txt"))
    }

    #[test]
    fn load_of_missing_file_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let roster = store(&dir).load().unwrap();
        assert!(roster.is_empty());
    }

    #[test]
    fn add_then_load_round_trips() {
        let dir = tempfile::tempdir().unwrap();
        let store = store(&dir);

        store.add("E1", "Alice").unwrap();
        store.add("E2", "Bob").unwrap();

        let roster = store.load().unwrap();
        assert_eq!(roster.len(), 2);
        assert_eq!(roster.get("E1"), Some("Alice"));
        assert_eq!(roster.get("E2"), Some("Bob"));
    }

    #[test]
    fn load_preserves_file_order() {
        let dir = tempfile::tempdir().unwrap();
        let store = store(&dir);

        store.add("E2", "Bob").unwrap();
        store.add("E1", "Alice").unwrap();

        let ids: Vec<_> = store.load().unwrap().iter().map(|e| e.id.clone()).collect();
        assert_eq!(ids, vec!["E2", "E1"]);
    }

    #[test]
    fn add_rejects_duplicate_id() {
        let dir = tempfile::tempdir().unwrap();
        let store = store(&dir);

        store.add("E1", "Alice").unwrap();
        let err = store.add("E1", "Alicia").unwrap_err();
        assert!(matches!(err, EmsError::DuplicateId(id) if id == "E1"));
    }

    #[test]
    fn add_rejects_blank_fields() {
        let dir = tempfile::tempdir().unwrap();
        let store = store(&dir);

        assert!(matches!(
            store.add("", "Alice"),
            Err(EmsError::Validation(_))
        ));
        assert!(matches!(store.add("E1", "  "), Err(EmsError::Validation(_))));
    }

    #[test]
    fn remove_unknown_id_fails() {
        let dir = tempfile::tempdir().unwrap();
        let store = store(&dir);

        store.add("E1", "Alice").unwrap();
        let err = store.remove("E9").unwrap_err();
        assert!(matches!(err, EmsError::NotFound(_)));
    }

    #[test]
    fn remove_rewrites_remaining_entries() {
        let dir = tempfile::tempdir().unwrap();
        let store = store(&dir);

        store.add("E1", "Alice").unwrap();
        store.add("E2", "Bob").unwrap();
        store.add("E3", "Carol").unwrap();
        store.remove("E2").unwrap();

        let roster = store.load().unwrap();
        assert_eq!(roster.len(), 2);
        assert!(!roster.contains("E2"));
        let ids: Vec<_> = roster.iter().map(|e| e.id.clone()).collect();
        assert_eq!(ids, vec!["E1", "E3"]);
    }

    #[test]
    fn malformed_lines_are_skipped() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("employees.txt");
        fs::write(&path, "E1,Alice\nno-separator-here\nE2,Bob\n").unwrap();

        let roster = EmployeeStore::from_path(&path).load().unwrap();
        assert_eq!(roster.len(), 2);
    }

    #[test]
    fn name_may_contain_commas() {
        let dir = tempfile::tempdir().unwrap();
        let store = store(&dir);

        store.add("E1", "Doe, Alice").unwrap();
        assert_eq!(store.load().unwrap().get("E1"), Some("Doe, Alice"));
    }
}
