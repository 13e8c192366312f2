//! In-process store used by the handler tests.

use std::cmp::Reverse;
use std::sync::Mutex;

use async_trait::async_trait;
use chrono::{Duration, NaiveDate, TimeZone, Utc};

use super::{AttendanceStore, StoreError, StoreResult};
use crate::model::attendance::{AttendanceRecord, NewAttendance};

#[derive(Default)]
struct Inner {
    records: Vec<AttendanceRecord>,
    next_id: u64,
}

#[derive(Default)]
pub struct MemoryAttendanceStore {
    inner: Mutex<Inner>,
    unavailable: bool,
}

impl MemoryAttendanceStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// A store whose every call fails like an exhausted connection pool.
    pub fn unavailable() -> Self {
        Self {
            unavailable: true,
            ..Self::default()
        }
    }

    pub fn len(&self) -> usize {
        self.inner.lock().unwrap().records.len()
    }

    fn check(&self) -> StoreResult<()> {
        if self.unavailable {
            return Err(StoreError::Database(sqlx::Error::PoolTimedOut));
        }
        Ok(())
    }

    fn sorted(mut records: Vec<AttendanceRecord>) -> Vec<AttendanceRecord> {
        records.sort_by_key(|r| Reverse((r.date, r.created_at, r.id)));
        records
    }
}

#[async_trait]
impl AttendanceStore for MemoryAttendanceStore {
    async fn create(&self, new: &NewAttendance) -> StoreResult<AttendanceRecord> {
        self.check()?;
        let mut inner = self.inner.lock().unwrap();
        inner.next_id += 1;
        let id = inner.next_id;

        // Distinct, increasing timestamps so ordering is observable.
        let base = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        let record = AttendanceRecord {
            id,
            employee_name: new.employee_name.clone(),
            employee_id: new.employee_id.clone(),
            date: new.date,
            status: new.status,
            created_at: base + Duration::seconds(id as i64),
        };
        inner.records.push(record.clone());
        Ok(record)
    }

    async fn get_all(&self) -> StoreResult<Vec<AttendanceRecord>> {
        self.check()?;
        let records = self.inner.lock().unwrap().records.clone();
        Ok(Self::sorted(records))
    }

    async fn get_by_id(&self, id: u64) -> StoreResult<Option<AttendanceRecord>> {
        self.check()?;
        let inner = self.inner.lock().unwrap();
        Ok(inner.records.iter().find(|r| r.id == id).cloned())
    }

    async fn delete(&self, id: u64) -> StoreResult<Option<AttendanceRecord>> {
        self.check()?;
        let mut inner = self.inner.lock().unwrap();
        let position = inner.records.iter().position(|r| r.id == id);
        Ok(position.map(|i| inner.records.remove(i)))
    }

    async fn search(&self, text: &str) -> StoreResult<Vec<AttendanceRecord>> {
        self.check()?;
        let needle = text.to_lowercase();
        let records = self
            .inner
            .lock()
            .unwrap()
            .records
            .iter()
            .filter(|r| {
                r.employee_name.to_lowercase().contains(&needle)
                    || r.employee_id.to_lowercase().contains(&needle)
            })
            .cloned()
            .collect();
        Ok(Self::sorted(records))
    }

    async fn filter_by_date(&self, date: NaiveDate) -> StoreResult<Vec<AttendanceRecord>> {
        self.check()?;
        let records = self
            .inner
            .lock()
            .unwrap()
            .records
            .iter()
            .filter(|r| r.date == date)
            .cloned()
            .collect();
        Ok(Self::sorted(records))
    }

    async fn count(&self) -> StoreResult<i64> {
        self.check()?;
        Ok(self.len() as i64)
    }
}
