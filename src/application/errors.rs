use crate::domain::{ClientId, CostumeId, ReservationId, ValidationError};
use crate::ports::StoreError;
use thiserror::Error;

/// 予約管理アプリケーション層のエラー
#[derive(Debug, Error)]
pub enum ReservationError {
    /// 入力値が不正
    #[error("Validation failed: {0}")]
    Validation(#[from] ValidationError),

    /// 衣装が存在しない
    #[error("Costume {0} not found")]
    CostumeNotFound(CostumeId),

    /// 顧客が存在しない
    #[error("Client {0} not found")]
    ClientNotFound(ClientId),

    /// 予約者アカウントが存在しない
    #[error("Account not found")]
    AccountNotFound,

    /// 予約が見つからない
    #[error("Reservation {0} not found")]
    ReservationNotFound(ReservationId),

    /// 衣装が既に貸出中
    #[error("Costume {0} is not available")]
    CostumeUnavailable(CostumeId),

    /// ストアのエラー
    #[error("Store error")]
    StoreError(#[source] StoreError),

    /// AccountDirectoryのエラー
    #[error("Account directory error")]
    AccountDirectoryError(#[source] StoreError),
}

/// エラーの分類
///
/// API境界でHTTPステータスを決めるために使用する。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Validation,
    NotFound,
    Conflict,
    Internal,
}

impl ReservationError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            ReservationError::Validation(_) => ErrorKind::Validation,
            ReservationError::CostumeNotFound(_)
            | ReservationError::ClientNotFound(_)
            | ReservationError::AccountNotFound
            | ReservationError::ReservationNotFound(_) => ErrorKind::NotFound,
            ReservationError::CostumeUnavailable(_) => ErrorKind::Conflict,
            ReservationError::StoreError(_) | ReservationError::AccountDirectoryError(_) => {
                ErrorKind::Internal
            }
        }
    }
}

/// アプリケーション層の Result型
pub type Result<T> = std::result::Result<T, ReservationError>;
