use axum::{http::StatusCode, response::Json};

use crate::models::RootResponse;

// GET /api/ - Liveness and version
pub async fn root() -> (StatusCode, Json<RootResponse>) {
    let response = RootResponse {
        message: "Sports Club API is running!".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    };

    (StatusCode::OK, Json(response))
}
