//! Record-keeping engine for a single-desktop employee management tool:
//! credential registry, employee roster, append-only attendance log,
//! presence/absence reporting, and whole-directory backup/restore. The
//! presentation layer owns windows and session lifetime and calls into
//! these stores; everything here is synchronous, single-process, and
//! backed by three flat files in one data directory.

pub mod backup;
pub mod config;
pub mod error;
pub mod logging;
pub mod model;
pub mod report;
pub mod session;
pub mod sheet;
pub mod store;

pub use backup::{BackupManager, Confirmation, RestoreOutcome};
pub use config::Config;
pub use error::{EmsError, Result};
pub use model::attendance::{AttendanceRecord, AttendanceStatus, BatchStamp, batch_for_roster};
pub use model::employee::Employee;
pub use model::role::Role;
pub use model::user::Account;
pub use report::{AttendanceSummary, export_summary, summarize};
pub use session::Session;
pub use store::attendance::AttendanceLog;
pub use store::employees::{EmployeeStore, Roster};
pub use store::users::UserStore;
