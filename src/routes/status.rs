use axum::{Json, Router, routing::get};
use chrono::{DateTime, Utc};
use serde::Serialize;

pub fn routes() -> Router {
    Router::new().route("/api/v1/status", get(get_status))
}

#[derive(Debug, Serialize)]
struct Status {
    service: &'static str,
    version: &'static str,
    time: DateTime<Utc>,
}

async fn get_status() -> Json<Status> {
    Json(Status {
        service: env!("CARGO_PKG_NAME"),
        version: env!("CARGO_PKG_VERSION"),
        time: Utc::now(),
    })
}
