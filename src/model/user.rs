use serde::{Deserialize, Serialize};

use crate::model::role::Role;

/// One line of the credential registry. Passwords are stored and compared
/// as plaintext; this mirrors the registry format, it is not an
/// authentication scheme.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Account {
    pub username: String,
    pub password: String,
    pub role: Role,
    /// Present only if this account is linked to an employee record.
    pub employee_id: Option<String>,
}
