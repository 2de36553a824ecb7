use crate::domain::{
    self, BookCostumeError, Client, ClientId, Costume, Reservation, ReservationId,
    ReservationStatus, commands::*,
};
use crate::ports::BookingTransaction;
use chrono::Utc;

use crate::application::client_directory::resolve_client;
use crate::application::dependencies::ServiceDependencies;
use crate::application::errors::{ReservationError, Result};
use crate::application::inventory::{get_costume, set_availability};

/// 予約と、その参照先の顧客・衣装
///
/// APIレスポンスで顧客と衣装を埋め込むために使用する。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReservationDetails {
    pub reservation: Reservation,
    pub client: Client,
    pub costume: Costume,
}

/// 予約の参照先を同じトランザクション内で読み込む
async fn load_details(
    tx: &dyn BookingTransaction,
    reservation: Reservation,
) -> Result<ReservationDetails> {
    let client = tx
        .get_client(reservation.client_id)
        .await
        .map_err(ReservationError::StoreError)?
        .ok_or(ReservationError::ClientNotFound(reservation.client_id))?;

    let costume = get_costume(tx, reservation.costume_id).await?;

    Ok(ReservationDetails {
        reservation,
        client,
        costume,
    })
}

async fn load_all_details(
    tx: &dyn BookingTransaction,
    reservations: Vec<Reservation>,
) -> Result<Vec<ReservationDetails>> {
    let mut details = Vec::with_capacity(reservations.len());
    for reservation in reservations {
        details.push(load_details(tx, reservation).await?);
    }
    Ok(details)
}

/// 衣装を予約する
///
/// ビジネスルール：
/// - 終了日が開始日より後であること
/// - 予約者アカウントが指定された場合は存在すること
/// - 衣装が存在し、貸出可能であること
/// - 顧客はメールアドレスで解決する（未登録なら登録）
/// - 合計金額は日数 × 1日あたりの料金
///
/// # 一貫性保証
///
/// 手順2〜6は1つのトランザクション内で実行される。
/// 衣装の行はロックされ、貸出可能フラグは compare-and-set で切り替えるため、
/// 同じ衣装への並行予約はどちらか一方のみが成功し、他方は`CostumeUnavailable`になる。
/// 途中で失敗した場合、顧客の登録も含めてすべて破棄される。
///
/// # 戻り値
/// 作成された予約（顧客と衣装を含む）
#[tracing::instrument(skip(deps, cmd), fields(costume_id = %cmd.costume_id))]
pub async fn create_reservation(
    deps: &ServiceDependencies,
    cmd: CreateReservation,
) -> Result<ReservationDetails> {
    let now = Utc::now();

    // 1. 日付の検証（I/Oの前に失敗させる）
    let period = domain::RentalPeriod::new(cmd.start_date, cmd.end_date)?;

    if let Some(user_id) = cmd.user_id {
        let exists = deps
            .account_directory
            .exists(user_id)
            .await
            .map_err(ReservationError::AccountDirectoryError)?;

        if !exists {
            return Err(ReservationError::AccountNotFound);
        }
    }

    let tx = deps.begin().await?;

    // 2. 衣装をロックして取得
    let costume = tx
        .get_costume_for_update(cmd.costume_id)
        .await
        .map_err(ReservationError::StoreError)?
        .ok_or(ReservationError::CostumeNotFound(cmd.costume_id))?;

    if !costume.is_bookable() {
        tracing::warn!("Costume is already reserved");
        return Err(ReservationError::CostumeUnavailable(costume.costume_id));
    }

    // 3. 顧客の解決（連絡先の検証を含む）
    let client = resolve_client(&*tx, &cmd.contact, now).await?;

    // 4. 金額計算（ドメイン層の純粋関数）
    let reservation = domain::book_costume(client.client_id, &costume, period, now).map_err(
        |e| match e {
            BookCostumeError::CostumeUnavailable => {
                ReservationError::CostumeUnavailable(costume.costume_id)
            }
            BookCostumeError::Validation(e) => ReservationError::Validation(e),
        },
    )?;

    // 5. 予約を保存
    tx.insert_reservation(&reservation)
        .await
        .map_err(ReservationError::StoreError)?;

    // 6. 衣装を貸出中にする
    let claimed = tx
        .claim(costume.costume_id)
        .await
        .map_err(ReservationError::StoreError)?;

    if !claimed {
        tracing::warn!("Costume was claimed by a concurrent reservation");
        return Err(ReservationError::CostumeUnavailable(costume.costume_id));
    }

    tx.commit().await.map_err(ReservationError::StoreError)?;

    tracing::info!(
        reservation_id = %reservation.reservation_id,
        client_id = %client.client_id,
        total_price = %reservation.total_price,
        "Reservation created"
    );

    Ok(ReservationDetails {
        reservation,
        client,
        costume: Costume {
            available: false,
            ..costume
        },
    })
}

/// 予約を部分更新する
///
/// ステータスと日付を変更できる。
/// 合計金額は再計算せず、在庫にも触れない（日付を変える場合は呼び出し側が金額を扱う）。
#[tracing::instrument(skip(deps, cmd), fields(reservation_id = %cmd.reservation_id))]
pub async fn update_reservation(
    deps: &ServiceDependencies,
    cmd: UpdateReservation,
) -> Result<ReservationDetails> {
    let tx = deps.begin().await?;

    let current = tx
        .get_reservation(cmd.reservation_id)
        .await
        .map_err(ReservationError::StoreError)?
        .ok_or(ReservationError::ReservationNotFound(cmd.reservation_id))?;

    if cmd.patch.is_empty() {
        return load_details(&*tx, current).await;
    }

    let updated = domain::apply_patch(&current, &cmd.patch, Utc::now())?;

    let found = tx
        .update_reservation(&updated)
        .await
        .map_err(ReservationError::StoreError)?;
    if !found {
        return Err(ReservationError::ReservationNotFound(cmd.reservation_id));
    }

    let details = load_details(&*tx, updated).await?;
    tx.commit().await.map_err(ReservationError::StoreError)?;

    tracing::info!(status = details.reservation.status.as_str(), "Reservation updated");
    Ok(details)
}

/// 予約を取り消す
///
/// 衣装を貸出可能に戻し、予約レコードを削除する（履歴は残さない）。
/// 両方の書き込みは1つのトランザクションで確定する。
///
/// # 戻り値
/// 削除された予約
#[tracing::instrument(skip(deps, cmd), fields(reservation_id = %cmd.reservation_id))]
pub async fn cancel_reservation(
    deps: &ServiceDependencies,
    cmd: CancelReservation,
) -> Result<Reservation> {
    let tx = deps.begin().await?;

    // 1. 予約を取得
    let reservation = tx
        .get_reservation(cmd.reservation_id)
        .await
        .map_err(ReservationError::StoreError)?
        .ok_or(ReservationError::ReservationNotFound(cmd.reservation_id))?;

    // 2. 衣装を貸出可能に戻す
    set_availability(&*tx, reservation.costume_id, true).await?;

    // 3. 予約を削除
    let deleted = tx
        .delete_reservation(reservation.reservation_id)
        .await
        .map_err(ReservationError::StoreError)?;
    if !deleted {
        return Err(ReservationError::ReservationNotFound(cmd.reservation_id));
    }

    tx.commit().await.map_err(ReservationError::StoreError)?;

    tracing::info!(costume_id = %reservation.costume_id, "Reservation cancelled");
    Ok(reservation)
}

/// IDで予約を取得する
pub async fn get_reservation(
    deps: &ServiceDependencies,
    reservation_id: ReservationId,
) -> Result<ReservationDetails> {
    let tx = deps.begin().await?;

    let reservation = tx
        .get_reservation(reservation_id)
        .await
        .map_err(ReservationError::StoreError)?
        .ok_or(ReservationError::ReservationNotFound(reservation_id))?;

    load_details(&*tx, reservation).await
}

/// 予約一覧（挿入順）
///
/// ステータスが指定された場合はそのステータスの予約のみ返す。
pub async fn list_reservations(
    deps: &ServiceDependencies,
    status: Option<ReservationStatus>,
) -> Result<Vec<ReservationDetails>> {
    let tx = deps.begin().await?;

    let reservations = tx
        .list_reservations(status)
        .await
        .map_err(ReservationError::StoreError)?;

    load_all_details(&*tx, reservations).await
}

/// 顧客の予約一覧（挿入順）
///
/// 呼び出し時点のスナップショットを返す。
pub async fn list_by_client(
    deps: &ServiceDependencies,
    client_id: ClientId,
) -> Result<Vec<ReservationDetails>> {
    let tx = deps.begin().await?;

    let reservations = tx
        .list_reservations_by_client(client_id)
        .await
        .map_err(ReservationError::StoreError)?;

    load_all_details(&*tx, reservations).await
}
