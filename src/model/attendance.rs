use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use strum_macros::{AsRefStr, Display, EnumString};
use utoipa::ToSchema;

/// Whether the employee showed up on the given day.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema, AsRefStr, Display, EnumString,
)]
pub enum AttendanceStatus {
    Present,
    Absent,
}

impl TryFrom<String> for AttendanceStatus {
    type Error = strum::ParseError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow, ToSchema)]
#[schema(
    example = json!({
        "id": 1,
        "employeeName": "Alice Smith",
        "employeeID": "EMP001",
        "date": "2024-01-15",
        "status": "Present",
        "created_at": "2024-01-15T09:00:00Z"
    })
)]
pub struct AttendanceRecord {
    #[schema(example = 1)]
    pub id: u64,

    #[serde(rename = "employeeName")]
    #[sqlx(rename = "employeeName")]
    #[schema(example = "Alice Smith")]
    pub employee_name: String,

    #[serde(rename = "employeeID")]
    #[sqlx(rename = "employeeID")]
    #[schema(example = "EMP001")]
    pub employee_id: String,

    #[schema(example = "2024-01-15", format = "date", value_type = String)]
    pub date: NaiveDate,

    #[sqlx(try_from = "String")]
    pub status: AttendanceStatus,

    #[schema(example = "2024-01-15T09:00:00Z", format = "date-time", value_type = String)]
    pub created_at: DateTime<Utc>,
}

/// A validated record waiting to be inserted. Only produced by
/// `CreateAttendance::validate`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewAttendance {
    pub employee_name: String,
    pub employee_id: String,
    pub date: NaiveDate,
    pub status: AttendanceStatus,
}
