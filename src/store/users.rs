//! Credential registry: `users.txt`, one `username,password,role,employee_id`
//! line per account. Append-only; accounts are never edited or deleted.

use std::fs;
use std::fs::OpenOptions;
use std::io::Write;
use std::path::PathBuf;

use tracing::{info, warn};

use crate::config::Config;
use crate::error::{EmsError, Result};
use crate::model::role::Role;
use crate::model::user::Account;
use crate::store::employees::Roster;

pub struct UserStore {
    path: PathBuf,
}

impl UserStore {
    pub fn new(config: &Config) -> Self {
        Self {
            path: config.user_file(),
        }
    }

    pub fn from_path(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Registers a new account. Employee accounts must reference an id
    /// present in `roster` at registration time; the link is not
    /// re-validated afterwards. Duplicate usernames are not rejected: a
    /// repeated registration appends a second record.
    pub fn register(
        &self,
        username: &str,
        password: &str,
        role: Role,
        employee_id: Option<&str>,
        roster: &Roster,
    ) -> Result<()> {
        let username = username.trim();
        let password = password.trim();

        if username.is_empty() || password.is_empty() {
            return Err(EmsError::Validation(
                "username and password are required".to_string(),
            ));
        }
        if username.contains(',') || password.contains(',') {
            return Err(EmsError::Validation(
                "username and password must not contain `,`".to_string(),
            ));
        }

        let employee_id = match role {
            Role::Manager => None,
            Role::Employee => {
                let id = employee_id
                    .map(str::trim)
                    .filter(|id| !id.is_empty())
                    .ok_or_else(|| {
                        EmsError::Validation(
                            "employee id is required for the employee role".to_string(),
                        )
                    })?;
                if !roster.contains(id) {
                    return Err(EmsError::NotFound(format!(
                        "employee id `{id}` not found in roster"
                    )));
                }
                Some(id)
            }
        };

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;
        writeln!(
            file,
            "{username},{password},{role},{}",
            employee_id.unwrap_or("")
        )?;

        info!(%username, %role, "account registered");
        Ok(())
    }

    /// Scans the registry in file order and returns the first account
    /// whose (username, password, role) triple matches exactly.
    /// Comparison is case-sensitive plaintext.
    pub fn authenticate(&self, username: &str, password: &str, role: Role) -> Result<Account> {
        if !self.path.exists() {
            return Err(EmsError::AuthFailure);
        }

        for account in self.read_accounts()? {
            if account.username == username
                && account.password == password
                && account.role == role
            {
                info!(%username, %role, "login successful");
                return Ok(account);
            }
        }

        info!(%username, "login rejected");
        Err(EmsError::AuthFailure)
    }

    pub(crate) fn read_accounts(&self) -> Result<Vec<Account>> {
        let contents = fs::read_to_string(&self.path)?;
        let mut accounts = Vec::new();

        for (line_no, line) in contents.lines().enumerate() {
            if line.is_empty() {
                continue;
            }
            let fields: Vec<&str> = line.split(',').collect();
            if fields.len() != 4 {
                warn!(
                    path = %self.path.display(),
                    line_no = line_no + 1,
                    "skipping malformed registry line"
                );
                continue;
            }

            let role = match fields[2].parse::<Role>() {
                Ok(role) => role,
                Err(_) => {
                    warn!(
                        path = %self.path.display(),
                        line_no = line_no + 1,
                        role = fields[2],
                        "skipping registry line with unknown role"
                    );
                    continue;
                }
            };

            accounts.push(Account {
                username: fields[0].to_string(),
                password: fields[1].to_string(),
                role,
                employee_id: match fields[3] {
                    "" => None,
                    id => Some(id.to_string()),
                },
            });
        }

        Ok(accounts)
    }
}
