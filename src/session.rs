//! Explicit session context. The presentation layer holds one of these per
//! login instead of ambient current-user state, and passes it into every
//! role-scoped operation.

use tracing::warn;

use crate::error::{EmsError, Result};
use crate::model::attendance::AttendanceRecord;
use crate::model::role::Role;
use crate::model::user::Account;
use crate::store::attendance::AttendanceLog;

#[derive(Debug, Clone, PartialEq)]
pub struct Session {
    pub username: String,
    pub role: Role,
    /// Present only if this login is linked to an employee record.
    pub employee_id: Option<String>,
}

impl Session {
    pub fn from_account(account: &Account) -> Self {
        Self {
            username: account.username.clone(),
            role: account.role,
            employee_id: account.employee_id.clone(),
        }
    }

    pub fn require_manager(&self) -> Result<()> {
        if self.role == Role::Manager {
            Ok(())
        } else {
            Err(EmsError::Validation("manager role required".to_string()))
        }
    }

    pub fn is_employee(&self) -> bool {
        self.role == Role::Employee
    }

    /// The role-scoped attendance view: managers see the whole table,
    /// employees only their own rows. An employee login with no linked
    /// employee id sees nothing.
    pub fn visible_attendance(&self, log: &AttendanceLog) -> Result<Vec<AttendanceRecord>> {
        match self.role {
            Role::Manager => log.query_all(),
            Role::Employee => match &self.employee_id {
                Some(id) => log.query_by_employee(id),
                None => {
                    warn!(username = %self.username, "employee session has no employee id");
                    Ok(Vec::new())
                }
            },
        }
    }
}
