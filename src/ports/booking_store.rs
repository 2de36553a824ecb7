use async_trait::async_trait;

use super::{ClientDirectory, InventoryStore, ReservationStore};

pub type Result<T> = std::result::Result<T, Box<dyn std::error::Error + Send + Sync>>;

/// 予約トランザクション
///
/// 在庫・顧客・予約の3つのストアを1つの原子的な単位として扱う。
/// `commit`せずにドロップした場合、すべての変更は破棄される。
#[async_trait]
pub trait BookingTransaction: InventoryStore + ClientDirectory + ReservationStore {
    /// 変更を確定する
    async fn commit(self: Box<Self>) -> Result<()>;
}

/// 予約ストアポート（Unit of Work）
///
/// 予約台帳の各操作は、ここで開始した1つのトランザクション内で実行される。
#[async_trait]
pub trait BookingStore: Send + Sync {
    /// トランザクションを開始する
    async fn begin(&self) -> Result<Box<dyn BookingTransaction>>;
}
