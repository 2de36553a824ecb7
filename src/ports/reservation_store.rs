use crate::domain::{ClientId, Reservation, ReservationId, ReservationStatus};
use async_trait::async_trait;

pub type Result<T> = std::result::Result<T, Box<dyn std::error::Error + Send + Sync>>;

/// 予約ストアポート
///
/// 一覧は常に挿入順で返す。
#[async_trait]
pub trait ReservationStore: Send + Sync {
    /// 新しい予約を保存する
    async fn insert_reservation(&self, reservation: &Reservation) -> Result<()>;

    /// IDで予約を取得する
    async fn get_reservation(&self, reservation_id: ReservationId) -> Result<Option<Reservation>>;

    /// 既存の予約を上書きする
    ///
    /// 予約が存在しない場合は`false`を返す。
    async fn update_reservation(&self, reservation: &Reservation) -> Result<bool>;

    /// 予約を削除する
    ///
    /// 予約が存在しない場合は`false`を返す。
    async fn delete_reservation(&self, reservation_id: ReservationId) -> Result<bool>;

    /// 全予約の一覧（ステータスで絞り込み可能）
    async fn list_reservations(&self, status: Option<ReservationStatus>) -> Result<Vec<Reservation>>;

    /// 顧客の予約一覧
    async fn list_reservations_by_client(&self, client_id: ClientId) -> Result<Vec<Reservation>>;
}
