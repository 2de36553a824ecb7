use chrono::NaiveDate;
use rust_decimal::Decimal;
use thiserror::Error;

/// 入力値の検証エラー
///
/// 不正・欠落・範囲外の入力。API境界で422にマッピングされる。
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// 終了日が開始日より後でない
    #[error("end date {end} must be after start date {start}")]
    EndDateNotAfterStartDate { start: NaiveDate, end: NaiveDate },

    /// メールアドレスの構文が不正
    #[error("invalid email address: {0:?}")]
    InvalidEmail(String),

    /// 顧客名が空
    #[error("client name must not be empty")]
    EmptyName,

    /// 金額が負
    #[error("price must not be negative: {0}")]
    NegativePrice(Decimal),

    /// 金額が上限を超える
    #[error("amount exceeds the maximum of {max}: {amount}")]
    AmountTooLarge { amount: Decimal, max: Decimal },

    /// 未知の予約ステータス
    #[error("invalid reservation status: {0:?}")]
    InvalidStatus(String),

    /// 更新でcancelledは指定できない（取り消し操作を使う）
    #[error("status cannot be set to cancelled by an update; cancel the reservation instead")]
    CancelledByUpdate,
}

/// 予約作成のエラー（ドメイン層）
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BookCostumeError {
    /// 衣装が既に貸出中
    #[error("costume is not available")]
    CostumeUnavailable,

    /// 合計金額が計算できない
    #[error(transparent)]
    Validation(#[from] ValidationError),
}
