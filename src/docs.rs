use crate::api::attendance::{CreateAttendance, CreatedResponse, DeletedResponse};
use crate::error::ErrorBody;
use crate::model::attendance::{AttendanceRecord, AttendanceStatus};
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Attendance Tracker API",
        version = "1.0.0",
        description = r#"
## Employee Attendance Tracker

Records whether an employee was **Present** or **Absent** on a given day.

### Key Features
- Mark attendance for an employee and date
- List every record, newest date first
- Search by employee name or employee ID (case-insensitive)
- Filter by a single date
- Delete a record

### Response Format
- JSON bodies throughout
- Errors use `{"error": "...", "details": "..."}`; `details` is omitted in production

---
Built with **Rust**, **Actix Web**, **SQLx**, and **Utoipa**.
"#,
    ),
    paths(
        crate::api::attendance::create_attendance,
        crate::api::attendance::list_attendance,
        crate::api::attendance::delete_attendance,
        crate::api::attendance::search_attendance,
        crate::api::attendance::filter_attendance,

        crate::api::health::health,
        crate::api::health::api_test
    ),
    components(
        schemas(
            AttendanceRecord,
            AttendanceStatus,
            CreateAttendance,
            CreatedResponse,
            DeletedResponse,
            ErrorBody
        )
    ),
    tags(
        (name = "Attendance", description = "Attendance record APIs"),
        (name = "Health", description = "Liveness checks"),
    )
)]
pub struct ApiDoc;
