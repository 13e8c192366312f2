use crate::{
    config::Config,
    error::{AppError, ValidationError},
    model::attendance::{AttendanceRecord, AttendanceStatus, NewAttendance},
    store::AttendanceStore,
};
use actix_web::{HttpResponse, web};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};
use utoipa::{IntoParams, ToSchema};

/// Body of `POST /attendance`. Every field is optional here so that a missing
/// field is reported by [`CreateAttendance::validate`] instead of the JSON
/// extractor.
#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
pub struct CreateAttendance {
    #[serde(rename = "employeeName")]
    #[schema(example = "Alice Smith")]
    pub employee_name: Option<String>,
    #[serde(rename = "employeeID")]
    #[schema(example = "EMP001")]
    pub employee_id: Option<String>,
    #[schema(example = "2024-01-15", format = "date")]
    pub date: Option<String>,
    #[schema(example = "Present")]
    pub status: Option<String>,
}

impl CreateAttendance {
    pub fn validate(self) -> Result<NewAttendance, ValidationError> {
        // Values are kept exactly as sent; only absent or empty ones are missing.
        fn present(value: Option<String>) -> Option<String> {
            value.filter(|v| !v.is_empty())
        }

        let employee_name = present(self.employee_name);
        let employee_id = present(self.employee_id);
        let date = present(self.date);
        let status = present(self.status);

        let missing: Vec<&'static str> = [
            ("employeeName", employee_name.is_none()),
            ("employeeID", employee_id.is_none()),
            ("date", date.is_none()),
            ("status", status.is_none()),
        ]
        .into_iter()
        .filter_map(|(field, absent)| absent.then_some(field))
        .collect();

        let (Some(employee_name), Some(employee_id), Some(date), Some(status)) =
            (employee_name, employee_id, date, status)
        else {
            return Err(ValidationError::MissingFields(missing));
        };

        let status = status
            .parse::<AttendanceStatus>()
            .map_err(|_| ValidationError::InvalidStatus(status))?;
        let date = parse_date(&date)?;

        Ok(NewAttendance {
            employee_name,
            employee_id,
            date,
            status,
        })
    }
}

fn parse_date(raw: &str) -> Result<NaiveDate, ValidationError> {
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .map_err(|_| ValidationError::InvalidDate(raw.to_string()))
}

fn blank(value: &Option<String>) -> bool {
    value.as_deref().is_none_or(|v| v.trim().is_empty())
}

#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct SearchQuery {
    /// Substring of the employee name or employee ID, case-insensitive
    pub query: Option<String>,
}

#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct DateFilter {
    /// Day to filter on, `YYYY-MM-DD`
    pub date: Option<String>,
}

#[derive(Serialize, ToSchema)]
pub struct CreatedResponse {
    #[schema(example = "Attendance marked successfully")]
    pub message: String,
    pub record: AttendanceRecord,
}

#[derive(Serialize, ToSchema)]
pub struct DeletedResponse {
    #[schema(example = "Attendance record deleted successfully")]
    pub message: String,
    #[serde(rename = "deletedRecord")]
    pub deleted_record: AttendanceRecord,
}

/// Mark attendance
#[utoipa::path(
    post,
    path = "/api/attendance",
    request_body = CreateAttendance,
    responses(
        (status = 201, description = "Attendance marked", body = CreatedResponse),
        (status = 400, description = "Missing or invalid field", body = crate::error::ErrorBody, example = json!({
            "error": "Status must be Present or Absent (got \"Late\")"
        })),
        (status = 500, description = "Storage failure", body = crate::error::ErrorBody)
    ),
    tag = "Attendance"
)]
pub async fn create_attendance(
    store: web::Data<dyn AttendanceStore>,
    config: web::Data<Config>,
    payload: web::Json<CreateAttendance>,
) -> Result<HttpResponse, AppError> {
    let new = payload.into_inner().validate().inspect_err(|e| {
        warn!(error = %e, "Rejected attendance payload");
    })?;

    let record = store
        .create(&new)
        .await
        .map_err(|e| AppError::storage("Failed to mark attendance", e, &config))?;

    info!(id = record.id, employee_id = %record.employee_id, date = %record.date, "Attendance marked");

    Ok(HttpResponse::Created().json(CreatedResponse {
        message: "Attendance marked successfully".to_string(),
        record,
    }))
}

/// List every attendance record
#[utoipa::path(
    get,
    path = "/api/attendance",
    responses(
        (status = 200, description = "Records, newest date first", body = [AttendanceRecord]),
        (status = 500, description = "Storage failure", body = crate::error::ErrorBody)
    ),
    tag = "Attendance"
)]
pub async fn list_attendance(
    store: web::Data<dyn AttendanceStore>,
    config: web::Data<Config>,
) -> Result<HttpResponse, AppError> {
    let records = store
        .get_all()
        .await
        .map_err(|e| AppError::storage("Failed to fetch attendance records", e, &config))?;

    debug!(count = records.len(), "Sending attendance records");
    Ok(HttpResponse::Ok().json(records))
}

/// Delete an attendance record
#[utoipa::path(
    delete,
    path = "/api/attendance/{id}",
    params(
        ("id" = u64, Path, description = "Attendance record ID")
    ),
    responses(
        (status = 200, description = "Record deleted", body = DeletedResponse),
        (status = 404, description = "No such record", body = crate::error::ErrorBody, example = json!({
            "error": "Attendance record not found"
        })),
        (status = 500, description = "Storage failure", body = crate::error::ErrorBody)
    ),
    tag = "Attendance"
)]
pub async fn delete_attendance(
    store: web::Data<dyn AttendanceStore>,
    config: web::Data<Config>,
    path: web::Path<u64>,
) -> Result<HttpResponse, AppError> {
    let id = path.into_inner();

    let deleted = store
        .delete(id)
        .await
        .map_err(|e| AppError::storage("Failed to delete attendance record", e, &config))?;

    match deleted {
        Some(record) => {
            info!(id, "Attendance record deleted");
            Ok(HttpResponse::Ok().json(DeletedResponse {
                message: "Attendance record deleted successfully".to_string(),
                deleted_record: record,
            }))
        }
        None => Err(AppError::NotFound("Attendance record not found")),
    }
}

/// Search by employee name or ID
#[utoipa::path(
    get,
    path = "/api/attendance/search",
    params(SearchQuery),
    responses(
        (status = 200, description = "Matching records; all records when the query is blank", body = [AttendanceRecord]),
        (status = 500, description = "Storage failure", body = crate::error::ErrorBody)
    ),
    tag = "Attendance"
)]
pub async fn search_attendance(
    store: web::Data<dyn AttendanceStore>,
    config: web::Data<Config>,
    query: web::Query<SearchQuery>,
) -> Result<HttpResponse, AppError> {
    let result = match query.query.as_deref() {
        Some(text) if !blank(&query.query) => store.search(text).await,
        _ => store.get_all().await,
    };

    let records = result
        .map_err(|e| AppError::storage("Failed to search attendance records", e, &config))?;

    debug!(query = ?query.query, count = records.len(), "Search results");
    Ok(HttpResponse::Ok().json(records))
}

/// Filter by date
#[utoipa::path(
    get,
    path = "/api/attendance/filter",
    params(DateFilter),
    responses(
        (status = 200, description = "Records on that day, newest first; all records when no date is given", body = [AttendanceRecord]),
        (status = 400, description = "Date is not YYYY-MM-DD", body = crate::error::ErrorBody),
        (status = 500, description = "Storage failure", body = crate::error::ErrorBody)
    ),
    tag = "Attendance"
)]
pub async fn filter_attendance(
    store: web::Data<dyn AttendanceStore>,
    config: web::Data<Config>,
    query: web::Query<DateFilter>,
) -> Result<HttpResponse, AppError> {
    let result = if blank(&query.date) {
        store.get_all().await
    } else {
        let raw = query.date.as_deref().unwrap_or_default().trim();
        store.filter_by_date(parse_date(raw)?).await
    };

    let records = result
        .map_err(|e| AppError::storage("Failed to filter attendance records", e, &config))?;

    debug!(date = ?query.date, count = records.len(), "Date filter results");
    Ok(HttpResponse::Ok().json(records))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn payload(name: &str, id: &str, date: &str, status: &str) -> CreateAttendance {
        CreateAttendance {
            employee_name: Some(name.into()),
            employee_id: Some(id.into()),
            date: Some(date.into()),
            status: Some(status.into()),
        }
    }

    #[test]
    fn valid_payload_becomes_new_attendance() {
        let new = payload("Alice Smith", "EMP001", "2024-01-15", "Present")
            .validate()
            .unwrap();

        assert_eq!(new.employee_name, "Alice Smith");
        assert_eq!(new.employee_id, "EMP001");
        assert_eq!(new.date, NaiveDate::from_ymd_opt(2024, 1, 15).unwrap());
        assert_eq!(new.status, AttendanceStatus::Present);
    }

    #[test]
    fn name_and_employee_id_are_kept_verbatim() {
        let new = payload(" Alice Smith ", "EMP001 ", "2024-01-15", "Absent")
            .validate()
            .unwrap();
        assert_eq!(new.employee_name, " Alice Smith ");
        assert_eq!(new.employee_id, "EMP001 ");

        let new = payload("  ", "\t", "2024-01-15", "Absent").validate().unwrap();
        assert_eq!(new.employee_name, "  ");
        assert_eq!(new.employee_id, "\t");
    }

    #[test]
    fn missing_and_empty_fields_are_reported() {
        let err = CreateAttendance {
            employee_name: Some("Alice".into()),
            employee_id: Some(String::new()),
            date: None,
            status: Some("Absent".into()),
        }
        .validate()
        .unwrap_err();

        assert_eq!(err, ValidationError::MissingFields(vec!["employeeID", "date"]));
    }

    #[test]
    fn empty_payload_lists_every_field() {
        let err = CreateAttendance::default().validate().unwrap_err();
        assert_eq!(
            err,
            ValidationError::MissingFields(vec!["employeeName", "employeeID", "date", "status"])
        );
    }

    #[test]
    fn unknown_status_is_rejected() {
        for status in ["Late", "present", "ABSENT"] {
            let err = payload("Alice", "EMP001", "2024-01-15", status)
                .validate()
                .unwrap_err();
            assert_eq!(err, ValidationError::InvalidStatus(status.to_string()));
        }
    }

    #[test]
    fn malformed_date_is_rejected() {
        let err = payload("Alice", "EMP001", "15/01/2024", "Present")
            .validate()
            .unwrap_err();
        assert_eq!(err, ValidationError::InvalidDate("15/01/2024".into()));

        assert!(payload("Alice", "EMP001", "2024-02-30", "Present").validate().is_err());
    }

    #[test]
    fn blank_treats_whitespace_as_absent() {
        assert!(blank(&None));
        assert!(blank(&Some(String::new())));
        assert!(blank(&Some("  \t".into())));
        assert!(!blank(&Some("ali".into())));
    }
}
