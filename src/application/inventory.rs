use crate::domain::{Costume, CostumeId};
use crate::ports::InventoryStore;

use super::dependencies::ServiceDependencies;
use super::errors::{ReservationError, Result};

/// IDで衣装を取得する
///
/// # エラー
/// - CostumeNotFound: 衣装が存在しない
pub async fn get_costume<S>(store: &S, costume_id: CostumeId) -> Result<Costume>
where
    S: InventoryStore + ?Sized,
{
    store
        .get_costume(costume_id)
        .await
        .map_err(ReservationError::StoreError)?
        .ok_or(ReservationError::CostumeNotFound(costume_id))
}

/// 貸出可能フラグを書き込む
///
/// 無条件の書き込み。重複予約のチェックは予約台帳の責務。
pub async fn set_availability<S>(store: &S, costume_id: CostumeId, available: bool) -> Result<()>
where
    S: InventoryStore + ?Sized,
{
    let found = store
        .set_availability(costume_id, available)
        .await
        .map_err(ReservationError::StoreError)?;

    if !found {
        return Err(ReservationError::CostumeNotFound(costume_id));
    }

    tracing::debug!(%costume_id, available, "Costume availability updated");
    Ok(())
}

/// 衣装を1件取得する（読み取り専用トランザクション）
pub async fn load_costume(deps: &ServiceDependencies, costume_id: CostumeId) -> Result<Costume> {
    let tx = deps.begin().await?;
    get_costume(&*tx, costume_id).await
}

/// 貸出可能な衣装の一覧
pub async fn list_available_costumes(deps: &ServiceDependencies) -> Result<Vec<Costume>> {
    let tx = deps.begin().await?;
    tx.list_available()
        .await
        .map_err(ReservationError::StoreError)
}

/// カテゴリで絞り込んだ衣装の一覧
pub async fn list_costumes_by_category(
    deps: &ServiceDependencies,
    category: &str,
) -> Result<Vec<Costume>> {
    let tx = deps.begin().await?;
    tx.list_by_category(category)
        .await
        .map_err(ReservationError::StoreError)
}
