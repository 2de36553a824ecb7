use crate::domain::{Costume, CostumeId};
use async_trait::async_trait;

pub type Result<T> = std::result::Result<T, Box<dyn std::error::Error + Send + Sync>>;

/// 在庫ストアポート
///
/// 衣装の読み取りと、貸出可能フラグの書き込みを抽象化する。
/// 予約台帳が変更するのは`available`フラグのみ。
#[async_trait]
pub trait InventoryStore: Send + Sync {
    /// IDで衣装を取得する
    async fn get_costume(&self, costume_id: CostumeId) -> Result<Option<Costume>>;

    /// IDで衣装を取得し、トランザクション終了まで行をロックする
    ///
    /// 予約作成時に、同じ衣装への並行予約を直列化するために使用される。
    async fn get_costume_for_update(&self, costume_id: CostumeId) -> Result<Option<Costume>>;

    /// 貸出可能フラグを無条件に書き込む
    ///
    /// 衣装が存在しない場合は`false`を返す。重複予約のチェックは行わない。
    async fn set_availability(&self, costume_id: CostumeId, available: bool) -> Result<bool>;

    /// 貸出可能フラグを true → false に切り替える（compare-and-set）
    ///
    /// 既に false だった場合、または衣装が存在しない場合は`false`を返す。
    async fn claim(&self, costume_id: CostumeId) -> Result<bool>;

    /// 貸出可能な衣装の一覧
    async fn list_available(&self) -> Result<Vec<Costume>>;

    /// カテゴリで絞り込んだ衣装の一覧
    async fn list_by_category(&self, category: &str) -> Result<Vec<Costume>>;
}
