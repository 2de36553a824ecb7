use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::{ClientContact, CostumeId, ReservationId, ReservationPatch, UserId};

/// コマンド：衣装を予約する
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateReservation {
    pub user_id: Option<UserId>,
    pub costume_id: CostumeId,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub contact: ClientContact,
}

/// コマンド：予約を部分更新する
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdateReservation {
    pub reservation_id: ReservationId,
    pub patch: ReservationPatch,
}

/// コマンド：予約を取り消す
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CancelReservation {
    pub reservation_id: ReservationId,
}
