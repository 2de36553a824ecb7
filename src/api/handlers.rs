use crate::application::ServiceDependencies;
use crate::application::inventory::{list_available_costumes, list_costumes_by_category};
use crate::application::reservation::{
    cancel_reservation as execute_cancel_reservation,
    create_reservation as execute_create_reservation, get_reservation as execute_get_reservation,
    list_by_client, list_reservations as execute_list_reservations,
    update_reservation as execute_update_reservation,
};
use crate::domain::commands::{CancelReservation, UpdateReservation};
use crate::domain::{ClientId, ReservationId};
use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use std::sync::Arc;
use uuid::Uuid;

use super::{
    error::ApiError,
    types::{
        CostumeResponse, CreateReservationRequest, ListReservationsQuery, MessageResponse,
        ReservationResponse, UpdateReservationRequest, parse_status_filter,
    },
};

// ============================================================================
// State
// ============================================================================

/// ハンドラー間で共有されるアプリケーション状態
#[derive(Clone)]
pub struct AppState {
    pub service_deps: ServiceDependencies,
}

// ============================================================================
// Command handlers (POST / PUT / DELETE)
// ============================================================================

/// POST /reservations - 新しい予約を作成
///
/// 顧客をメールアドレスで解決し、合計金額を計算して予約を保存する。
/// 衣装は貸出中になる。
///
/// 強制されるビジネスルール:
/// - 終了日が開始日より後であること（422）
/// - 衣装が存在すること（404）
/// - 衣装が貸出可能であること（409）
pub async fn create_reservation(
    State(state): State<Arc<AppState>>,
    Json(req): Json<CreateReservationRequest>,
) -> Result<(StatusCode, Json<ReservationResponse>), ApiError> {
    let details = execute_create_reservation(&state.service_deps, req.to_command()).await?;

    Ok((StatusCode::CREATED, Json(ReservationResponse::from(details))))
}

/// PUT /reservations/:id - 予約を部分更新
///
/// 合計金額は再計算しない。
pub async fn update_reservation(
    State(state): State<Arc<AppState>>,
    Path(reservation_id): Path<Uuid>,
    Json(req): Json<UpdateReservationRequest>,
) -> Result<Json<ReservationResponse>, ApiError> {
    let cmd = UpdateReservation {
        reservation_id: ReservationId::from_uuid(reservation_id),
        patch: req.to_patch()?,
    };

    let details = execute_update_reservation(&state.service_deps, cmd).await?;

    Ok(Json(ReservationResponse::from(details)))
}

/// DELETE /reservations/:id - 予約を取り消す
///
/// 衣装を貸出可能に戻し、予約を削除する。
pub async fn cancel_reservation(
    State(state): State<Arc<AppState>>,
    Path(reservation_id): Path<Uuid>,
) -> Result<Json<MessageResponse>, ApiError> {
    let cmd = CancelReservation {
        reservation_id: ReservationId::from_uuid(reservation_id),
    };

    execute_cancel_reservation(&state.service_deps, cmd).await?;

    Ok(Json(MessageResponse::new("Reservation cancelled")))
}

// ============================================================================
// Query handlers (GET)
// ============================================================================

/// GET /reservations - 予約一覧（?status= で絞り込み可能）
pub async fn list_reservations(
    State(state): State<Arc<AppState>>,
    Query(query): Query<ListReservationsQuery>,
) -> Result<Json<Vec<ReservationResponse>>, ApiError> {
    let status = parse_status_filter(query.status.as_deref())?;

    let reservations = execute_list_reservations(&state.service_deps, status).await?;

    Ok(Json(
        reservations
            .into_iter()
            .map(ReservationResponse::from)
            .collect(),
    ))
}

/// GET /reservations/:id - 予約詳細をIDで取得
pub async fn get_reservation(
    State(state): State<Arc<AppState>>,
    Path(reservation_id): Path<Uuid>,
) -> Result<Json<ReservationResponse>, ApiError> {
    let details =
        execute_get_reservation(&state.service_deps, ReservationId::from_uuid(reservation_id))
            .await?;

    Ok(Json(ReservationResponse::from(details)))
}

/// GET /reservations/user/:user_id - 顧客の予約一覧
///
/// 該当がなければ空の配列を返す。
pub async fn list_reservations_by_client(
    State(state): State<Arc<AppState>>,
    Path(client_id): Path<Uuid>,
) -> Result<Json<Vec<ReservationResponse>>, ApiError> {
    let reservations =
        list_by_client(&state.service_deps, ClientId::from_uuid(client_id)).await?;

    Ok(Json(
        reservations
            .into_iter()
            .map(ReservationResponse::from)
            .collect(),
    ))
}

/// GET /costumes/available - 貸出可能な衣装一覧
pub async fn list_available(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<CostumeResponse>>, ApiError> {
    let costumes = list_available_costumes(&state.service_deps).await?;

    Ok(Json(costumes.into_iter().map(CostumeResponse::from).collect()))
}

/// GET /costumes/category/:category - カテゴリ別の衣装一覧
pub async fn list_by_category(
    State(state): State<Arc<AppState>>,
    Path(category): Path<String>,
) -> Result<Json<Vec<CostumeResponse>>, ApiError> {
    let costumes = list_costumes_by_category(&state.service_deps, &category).await?;

    Ok(Json(costumes.into_iter().map(CostumeResponse::from).collect()))
}
