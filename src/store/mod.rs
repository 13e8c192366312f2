//! Persistence for attendance records.
//!
//! Handlers only ever talk to [`AttendanceStore`]; the MySQL implementation
//! is the one wired up in `main`.

use async_trait::async_trait;
use chrono::NaiveDate;

use crate::model::attendance::{AttendanceRecord, NewAttendance};

#[cfg(test)]
pub mod memory;
pub mod mysql;

pub use mysql::MySqlAttendanceStore;

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("record {0} was inserted but could not be read back")]
    MissingAfterInsert(u64),
}

pub type StoreResult<T> = Result<T, StoreError>;

#[async_trait]
pub trait AttendanceStore: Send + Sync {
    /// Insert a record and return it with its generated id and timestamp.
    async fn create(&self, new: &NewAttendance) -> StoreResult<AttendanceRecord>;

    /// All records, newest date first, then newest insertion first.
    async fn get_all(&self) -> StoreResult<Vec<AttendanceRecord>>;

    async fn get_by_id(&self, id: u64) -> StoreResult<Option<AttendanceRecord>>;

    /// Remove a record. `None` means nothing matched, which is not an error.
    async fn delete(&self, id: u64) -> StoreResult<Option<AttendanceRecord>>;

    /// Case-insensitive substring match on employee name or employee id,
    /// ordered like [`AttendanceStore::get_all`].
    async fn search(&self, text: &str) -> StoreResult<Vec<AttendanceRecord>>;

    /// Records for exactly `date`, newest insertion first.
    async fn filter_by_date(&self, date: NaiveDate) -> StoreResult<Vec<AttendanceRecord>>;

    async fn count(&self) -> StoreResult<i64>;
}
