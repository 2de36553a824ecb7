use crate::application::{ErrorKind, ReservationError};
use crate::domain::ValidationError;
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};

use super::types::ErrorResponse;

/// API層のエラー型
///
/// アプリケーション層のエラーをラップし、HTTPレスポンスへのマッピングを提供する。
#[derive(Debug)]
pub struct ApiError(ReservationError);

impl From<ReservationError> for ApiError {
    fn from(err: ReservationError) -> Self {
        ApiError(err)
    }
}

impl From<ValidationError> for ApiError {
    fn from(err: ValidationError) -> Self {
        ApiError(ReservationError::Validation(err))
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match self.0.kind() {
            // 422 Unprocessable Entity - 入力値の検証エラー
            ErrorKind::Validation => StatusCode::UNPROCESSABLE_ENTITY,
            // 404 Not Found - 参照先が存在しない
            ErrorKind::NotFound => StatusCode::NOT_FOUND,
            // 409 Conflict - 衣装が既に貸出中
            ErrorKind::Conflict => StatusCode::CONFLICT,
            // 500 Internal Server Error - システム障害
            ErrorKind::Internal => StatusCode::INTERNAL_SERVER_ERROR,
        };

        let (error_type, message) = match &self.0 {
            ReservationError::Validation(e) => ("VALIDATION_ERROR", e.to_string()),
            ReservationError::ReservationNotFound(_) => {
                ("RESERVATION_NOT_FOUND", self.0.to_string())
            }
            ReservationError::CostumeNotFound(_) => ("COSTUME_NOT_FOUND", self.0.to_string()),
            ReservationError::ClientNotFound(_) => ("CLIENT_NOT_FOUND", self.0.to_string()),
            ReservationError::AccountNotFound => ("ACCOUNT_NOT_FOUND", self.0.to_string()),
            ReservationError::CostumeUnavailable(_) => {
                ("COSTUME_UNAVAILABLE", self.0.to_string())
            }

            // 内部エラーの詳細はログに記録し、クライアントには一般的なメッセージのみを返す
            ReservationError::StoreError(e) => {
                tracing::error!("Store error: {}", e);
                (
                    "STORE_ERROR",
                    "Failed to access reservation store".to_string(),
                )
            }
            ReservationError::AccountDirectoryError(e) => {
                tracing::error!("Account directory error: {}", e);
                (
                    "ACCOUNT_DIRECTORY_ERROR",
                    "Account directory error".to_string(),
                )
            }
        };

        let body = Json(ErrorResponse::new(error_type, message));
        (status, body).into_response()
    }
}
