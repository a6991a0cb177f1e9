use chrono::Local;
use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumString};

use crate::model::employee::Employee;
use crate::store::employees::Roster;

/// Attendance status token as stored in the table.
#[derive(
    Debug, Copy, Clone, Eq, PartialEq, Serialize, Deserialize, Display, EnumString,
)]
pub enum AttendanceStatus {
    #[strum(serialize = "P")]
    #[serde(rename = "P")]
    Present,
    #[strum(serialize = "A")]
    #[serde(rename = "A")]
    Absent,
}

/// One row of the attendance table. `employee_name` is a denormalized copy
/// taken at batch time; a later roster rename or removal does not rewrite
/// history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AttendanceRecord {
    /// DD-MM-YYYY
    pub date: String,
    /// HH:MM:SS
    pub time: String,
    pub employee_id: String,
    pub employee_name: String,
    pub status: AttendanceStatus,
}

/// Date/time captured once per marking session. Every record in a batch
/// carries the identical stamp.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BatchStamp {
    pub date: String,
    pub time: String,
}

impl BatchStamp {
    pub fn now() -> Self {
        let now = Local::now();
        Self {
            date: now.format("%d-%m-%Y").to_string(),
            time: now.format("%H:%M:%S").to_string(),
        }
    }
}

/// Builds the marking batch: exactly one record per roster entry, in
/// roster order, all sharing `stamp`. The presentation layer supplies the
/// per-employee status choice.
pub fn batch_for_roster(
    roster: &Roster,
    stamp: &BatchStamp,
    mut status_for: impl FnMut(&Employee) -> AttendanceStatus,
) -> Vec<AttendanceRecord> {
    roster
        .iter()
        .map(|employee| AttendanceRecord {
            date: stamp.date.clone(),
            time: stamp.time.clone(),
            employee_id: employee.id.clone(),
            employee_name: employee.name.clone(),
            status: status_for(employee),
        })
        .collect()
}
