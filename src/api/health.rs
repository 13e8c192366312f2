use actix_web::{HttpResponse, Responder};
use chrono::Utc;
use serde_json::json;

/// Liveness probe
#[utoipa::path(
    get,
    path = "/health",
    responses(
        (status = 200, description = "Service is up", body = Object, example = json!({
            "status": "OK",
            "timestamp": "2024-01-15T09:00:00Z"
        }))
    ),
    tag = "Health"
)]
pub async fn health() -> impl Responder {
    HttpResponse::Ok().json(json!({
        "status": "OK",
        "timestamp": Utc::now()
    }))
}

/// Smoke-test route for the frontend
#[utoipa::path(
    get,
    path = "/api/test",
    responses(
        (status = 200, description = "Server is reachable", body = Object, example = json!({
            "message": "Server is working"
        }))
    ),
    tag = "Health"
)]
pub async fn api_test() -> impl Responder {
    HttpResponse::Ok().json(json!({
        "message": "Server is working"
    }))
}

/// Fallback for unmatched routes: lists what does exist.
pub fn route_not_found(available: &[String]) -> HttpResponse {
    HttpResponse::NotFound().json(json!({
        "error": "Route not found",
        "availableRoutes": available
    }))
}

/// Human-readable list of the routes served under `api_prefix`.
pub fn available_routes(api_prefix: &str) -> Vec<String> {
    [
        "GET /health".to_string(),
        format!("GET {api_prefix}/test"),
        format!("POST {api_prefix}/attendance"),
        format!("GET {api_prefix}/attendance"),
        format!("DELETE {api_prefix}/attendance/:id"),
        format!("GET {api_prefix}/attendance/search?query=<text>"),
        format!("GET {api_prefix}/attendance/filter?date=<YYYY-MM-DD>"),
    ]
    .into()
}
