use axum::Json;

use crate::error::{AppError, AppResult};

static ENDPOINTS_JSON: &str = include_str!("../../endpoints.json");

pub async fn list_endpoints() -> AppResult<Json<serde_json::Value>> {
    let endpoints: serde_json::Value =
        serde_json::from_str(ENDPOINTS_JSON).map_err(|err| AppError::Internal(err.into()))?;
    Ok(Json(serde_json::json!({ "endpoints": endpoints })))
}
