use async_trait::async_trait;
use chrono::NaiveDate;
use sqlx::MySqlPool;
use tracing::debug;

use super::{AttendanceStore, StoreError, StoreResult};
use crate::model::attendance::{AttendanceRecord, NewAttendance};

/// Column list for `attendance` queries.
const COLUMNS: &str = "id, employeeName, employeeID, date, status, created_at";

/// `id DESC` keeps rows inserted within the same second in insertion order.
const NEWEST_FIRST: &str = "ORDER BY date DESC, created_at DESC, id DESC";

pub struct MySqlAttendanceStore {
    pool: MySqlPool,
}

impl MySqlAttendanceStore {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }
}

/// Escape character for LIKE patterns. Not a backslash, so the SQL reads the
/// same with or without `NO_BACKSLASH_ESCAPES`.
const LIKE_ESCAPE: char = '!';

/// Build a LIKE pattern matching `text` as a literal, lowercased substring.
/// Pair with `ESCAPE '!'`.
pub(crate) fn like_pattern(text: &str) -> String {
    let mut pattern = String::with_capacity(text.len() + 2);
    pattern.push('%');
    for ch in text.to_lowercase().chars() {
        if matches!(ch, '%' | '_' | LIKE_ESCAPE) {
            pattern.push(LIKE_ESCAPE);
        }
        pattern.push(ch);
    }
    pattern.push('%');
    pattern
}

#[async_trait]
impl AttendanceStore for MySqlAttendanceStore {
    async fn create(&self, new: &NewAttendance) -> StoreResult<AttendanceRecord> {
        let result = sqlx::query(
            r#"
            INSERT INTO attendance (employeeName, employeeID, date, status)
            VALUES (?, ?, ?, ?)
            "#,
        )
        .bind(&new.employee_name)
        .bind(&new.employee_id)
        .bind(new.date)
        .bind(new.status.as_ref())
        .execute(&self.pool)
        .await?;

        let id = result.last_insert_id();
        debug!(id, "Inserted attendance record");

        self.get_by_id(id)
            .await?
            .ok_or(StoreError::MissingAfterInsert(id))
    }

    async fn get_all(&self) -> StoreResult<Vec<AttendanceRecord>> {
        let sql = format!("SELECT {COLUMNS} FROM attendance {NEWEST_FIRST}");
        let records = sqlx::query_as::<_, AttendanceRecord>(&sql)
            .fetch_all(&self.pool)
            .await?;
        Ok(records)
    }

    async fn get_by_id(&self, id: u64) -> StoreResult<Option<AttendanceRecord>> {
        let sql = format!("SELECT {COLUMNS} FROM attendance WHERE id = ?");
        let record = sqlx::query_as::<_, AttendanceRecord>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(record)
    }

    async fn delete(&self, id: u64) -> StoreResult<Option<AttendanceRecord>> {
        let Some(record) = self.get_by_id(id).await? else {
            return Ok(None);
        };

        let result = sqlx::query("DELETE FROM attendance WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;

        // Someone else deleted it between the two statements.
        if result.rows_affected() == 0 {
            return Ok(None);
        }

        Ok(Some(record))
    }

    async fn search(&self, text: &str) -> StoreResult<Vec<AttendanceRecord>> {
        let pattern = like_pattern(text);
        let sql = format!(
            "SELECT {COLUMNS} FROM attendance \
             WHERE LOWER(employeeName) LIKE ? ESCAPE '!' \
                OR LOWER(employeeID) LIKE ? ESCAPE '!' \
             {NEWEST_FIRST}"
        );
        debug!(sql = %sql, pattern = %pattern, "Searching attendance");

        let records = sqlx::query_as::<_, AttendanceRecord>(&sql)
            .bind(&pattern)
            .bind(&pattern)
            .fetch_all(&self.pool)
            .await?;
        Ok(records)
    }

    async fn filter_by_date(&self, date: NaiveDate) -> StoreResult<Vec<AttendanceRecord>> {
        let sql = format!(
            "SELECT {COLUMNS} FROM attendance WHERE date = ? ORDER BY created_at DESC, id DESC"
        );
        let records = sqlx::query_as::<_, AttendanceRecord>(&sql)
            .bind(date)
            .fetch_all(&self.pool)
            .await?;
        Ok(records)
    }

    async fn count(&self) -> StoreResult<i64> {
        let total = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM attendance")
            .fetch_one(&self.pool)
            .await?;
        Ok(total)
    }
}
