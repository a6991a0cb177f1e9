use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumString};

/// Login role. The on-disk registry stores the lowercase token.
#[derive(
    Debug, Copy, Clone, Eq, PartialEq, Serialize, Deserialize, Display, EnumString,
)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Manager,
    Employee,
}
