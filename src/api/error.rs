use crate::application::LibraryError;
use axum::{
    Json,
    extract::rejection::{JsonRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};

use super::types::ErrorResponse;

/// API層のエラー型
///
/// アプリケーション層のエラーをラップし、HTTPレスポンスへのマッピングを提供する。
#[derive(Debug)]
pub struct ApiError(LibraryError);

impl From<LibraryError> for ApiError {
    fn from(err: LibraryError) -> Self {
        ApiError(err)
    }
}

/// リクエストボディの形式不正は入力値の不備として扱う
impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError(LibraryError::ValidationError(rejection.body_text()))
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let message = self.0.to_string();
        let (status, error_type) = match self.0 {
            // 400 Bad Request - 入力値の不備
            LibraryError::ValidationError(_) => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR"),

            // 404 Not Found - リクエストされたリソースが存在しない
            LibraryError::NotFound(_) => (StatusCode::NOT_FOUND, "BOOK_NOT_FOUND"),
            LibraryError::NoActiveLoan { .. } => (StatusCode::NOT_FOUND, "NO_ACTIVE_LOAN"),

            // 409 Conflict - ID重複
            LibraryError::DuplicateId(_) => (StatusCode::CONFLICT, "DUPLICATE_ID"),

            // 422 Unprocessable Entity - 在庫のビジネスルール違反
            LibraryError::BookUnavailable(_) => {
                (StatusCode::UNPROCESSABLE_ENTITY, "BOOK_UNAVAILABLE")
            }
            LibraryError::Exhausted(_) => (StatusCode::UNPROCESSABLE_ENTITY, "EXHAUSTED"),
            LibraryError::CopyCountOverflow(_) => {
                (StatusCode::UNPROCESSABLE_ENTITY, "COPY_COUNT_OVERFLOW")
            }

            // 500 Internal Server Error - システム障害
            // 内部エラーの詳細はログに記録し、クライアントには一般的なメッセージのみを返す
            LibraryError::ExportError(ref e) => {
                tracing::error!("Export error: {}", e);
                let body = Json(ErrorResponse::new(
                    "EXPORT_ERROR",
                    "Failed to export catalog",
                ));
                return (StatusCode::INTERNAL_SERVER_ERROR, body).into_response();
            }
        };

        tracing::warn!(error = error_type, "{}", message);
        let body = Json(ErrorResponse::new(error_type, message));
        (status, body).into_response()
    }
}

/// クエリハンドラー用のエラー型
#[derive(Debug)]
pub enum QueryError {
    BadRequest(String),
}

impl From<QueryRejection> for QueryError {
    fn from(rejection: QueryRejection) -> Self {
        QueryError::BadRequest(rejection.body_text())
    }
}

impl IntoResponse for QueryError {
    fn into_response(self) -> Response {
        let (status, error_type, message) = match self {
            QueryError::BadRequest(msg) => (StatusCode::BAD_REQUEST, "BAD_REQUEST", msg),
        };

        let body = Json(ErrorResponse::new(error_type, message));
        (status, body).into_response()
    }
}
