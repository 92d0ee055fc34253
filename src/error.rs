use axum::{http::StatusCode, response::IntoResponse, Json};
use serde::Serialize;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("bad request")]
    BadRequest,
    #[error("not found")]
    NotFound,
    #[error("internal server error")]
    Internal(#[from] anyhow::Error),
}

#[derive(Serialize)]
struct ErrorBody {
    msg: &'static str,
}

impl IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        let (status, msg) = match self {
            AppError::BadRequest => (StatusCode::BAD_REQUEST, "Bad request"),
            AppError::NotFound => (StatusCode::NOT_FOUND, "Not found"),
            AppError::Internal(err) => {
                tracing::error!(error = ?err, "internal server error");
                (StatusCode::INTERNAL_SERVER_ERROR, "Internal server error")
            }
        };

        (status, Json(ErrorBody { msg })).into_response()
    }
}

impl From<sqlx::Error> for AppError {
    fn from(err: sqlx::Error) -> Self {
        if matches!(err, sqlx::Error::RowNotFound) {
            return AppError::NotFound;
        }

        let mapped = err
            .as_database_error()
            .and_then(|db| db.code())
            .and_then(|code| classify_db_code(&code));

        match mapped {
            Some(app_err) => app_err,
            None => AppError::Internal(err.into()),
        }
    }
}

// Constraint violations raised by PostgreSQL carry SQLSTATE codes: not-null
// (23502) and invalid text representation (22P02) mean the client sent a
// malformed row, a foreign key violation (23503) means it referenced a row
// that does not exist.
fn classify_db_code(code: &str) -> Option<AppError> {
    match code {
        "23502" | "22P02" => Some(AppError::BadRequest),
        "23503" => Some(AppError::NotFound),
        _ => None,
    }
}

pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_null_violation_is_bad_request() {
        assert!(matches!(
            classify_db_code("23502"),
            Some(AppError::BadRequest)
        ));
    }

    #[test]
    fn invalid_text_representation_is_bad_request() {
        assert!(matches!(
            classify_db_code("22P02"),
            Some(AppError::BadRequest)
        ));
    }

    #[test]
    fn foreign_key_violation_is_not_found() {
        assert!(matches!(classify_db_code("23503"), Some(AppError::NotFound)));
    }

    #[test]
    fn unknown_codes_are_not_mapped() {
        assert!(classify_db_code("40001").is_none());
        assert!(classify_db_code("").is_none());
    }
}
