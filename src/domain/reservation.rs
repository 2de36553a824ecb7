use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use super::{
    BookCostumeError, ClientId, Costume, CostumeId, Money, ReservationId, ValidationError,
    pricing,
};

/// 予約ステータス
///
/// pending → confirmed → completed の遷移は外部（手動）で行う。
/// このコンテキストが強制するのは作成時の pending のみ。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ReservationStatus {
    /// 受付済み（初期状態）
    #[default]
    Pending,
    /// 確定
    Confirmed,
    /// 返却完了
    Completed,
    /// 取消
    Cancelled,
}

impl ReservationStatus {
    /// 文字列表現を取得する
    pub fn as_str(&self) -> &'static str {
        match self {
            ReservationStatus::Pending => "pending",
            ReservationStatus::Confirmed => "confirmed",
            ReservationStatus::Completed => "completed",
            ReservationStatus::Cancelled => "cancelled",
        }
    }
}

impl std::str::FromStr for ReservationStatus {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(ReservationStatus::Pending),
            "confirmed" => Ok(ReservationStatus::Confirmed),
            "completed" => Ok(ReservationStatus::Completed),
            "cancelled" => Ok(ReservationStatus::Cancelled),
            _ => Err(ValidationError::InvalidStatus(s.to_string())),
        }
    }
}

/// 貸出期間
///
/// 不変条件：終了日（含まない）は開始日より後。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RentalPeriod {
    start_date: NaiveDate,
    end_date: NaiveDate,
}

impl RentalPeriod {
    pub fn new(start_date: NaiveDate, end_date: NaiveDate) -> Result<Self, ValidationError> {
        if end_date <= start_date {
            return Err(ValidationError::EndDateNotAfterStartDate {
                start: start_date,
                end: end_date,
            });
        }
        Ok(Self {
            start_date,
            end_date,
        })
    }

    pub fn start_date(&self) -> NaiveDate {
        self.start_date
    }

    pub fn end_date(&self) -> NaiveDate {
        self.end_date
    }
}

/// Reservation集約 - 1着の衣装の1回の予約
///
/// 顧客と衣装はIDで参照するのみで、所有しない。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reservation {
    // 識別子
    pub reservation_id: ReservationId,

    // 他の集約への参照（IDのみ）
    pub client_id: ClientId,
    pub costume_id: CostumeId,

    // 予約内容
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub total_price: Money,
    pub status: ReservationStatus,

    // 監査情報
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// 予約の部分更新
///
/// 合計金額は再計算しない。日付を変える呼び出し側は別途金額を扱うこと。
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReservationPatch {
    pub status: Option<ReservationStatus>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
}

impl ReservationPatch {
    pub fn is_empty(&self) -> bool {
        self.status.is_none() && self.start_date.is_none() && self.end_date.is_none()
    }
}

/// 純粋関数：衣装を予約する
///
/// ビジネスルール：
/// - 貸出中の衣装は予約できない
/// - 合計金額は日数 × 1日あたりの料金
/// - 状態はpending
///
/// 副作用なし。新しいReservationを返す。在庫フラグの更新は呼び出し側の責務。
pub fn book_costume(
    client_id: ClientId,
    costume: &Costume,
    period: RentalPeriod,
    booked_at: DateTime<Utc>,
) -> Result<Reservation, BookCostumeError> {
    if !costume.is_bookable() {
        return Err(BookCostumeError::CostumeUnavailable);
    }

    let total_price = pricing::total_for_period(costume.price_per_day, &period)?;

    Ok(Reservation {
        reservation_id: ReservationId::new(),
        client_id,
        costume_id: costume.costume_id,
        start_date: period.start_date(),
        end_date: period.end_date(),
        total_price,
        status: ReservationStatus::Pending,
        created_at: booked_at,
        updated_at: booked_at,
    })
}

/// 純粋関数：部分更新を適用する
///
/// 更新後の期間も終了日 > 開始日を満たす必要がある。
/// cancelledへの変更は受け付けない。取り消しは在庫を戻す取り消し操作で行う。
/// 合計金額と在庫には触れない。
pub fn apply_patch(
    reservation: &Reservation,
    patch: &ReservationPatch,
    updated_at: DateTime<Utc>,
) -> Result<Reservation, ValidationError> {
    if patch.status == Some(ReservationStatus::Cancelled) {
        return Err(ValidationError::CancelledByUpdate);
    }

    let start_date = patch.start_date.unwrap_or(reservation.start_date);
    let end_date = patch.end_date.unwrap_or(reservation.end_date);
    let period = RentalPeriod::new(start_date, end_date)?;

    Ok(Reservation {
        start_date: period.start_date(),
        end_date: period.end_date(),
        status: patch.status.unwrap_or(reservation.status),
        updated_at,
        ..reservation.clone()
    })
}
