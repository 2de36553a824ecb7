use axum::body::Body;
use axum::http::{Request, StatusCode};
use costume_rental::adapters::mock::AccountDirectory as MockAccountDirectory;
use costume_rental::api::handlers::AppState;
use costume_rental::api::router::create_router;
use costume_rental::api::types::*;
use costume_rental::domain::{Costume, CostumeId};
use rust_decimal_macros::dec;
use serde_json::{Value, json};
use std::sync::Arc;
use tower::ServiceExt;
use uuid::Uuid;

mod common;
use common::{create_costume, setup_in_memory};

// ============================================================================
// E2Eテスト用のヘルパー関数
// ============================================================================

/// E2Eテスト用のアプリケーションセットアップ
///
/// インメモリストアと実際のAPIルーターを使用する。
fn setup_e2e_app(costumes: Vec<Costume>) -> axum::Router {
    let (service_deps, _store) =
        setup_in_memory(costumes, Arc::new(MockAccountDirectory::permissive()));

    create_router(Arc::new(AppState { service_deps }))
}

/// リクエストを送信し、ステータスとJSONボディを返す
async fn send(app: &axum::Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(json) => builder
            .header("content-type", "application/json")
            .body(Body::from(serde_json::to_string(&json).unwrap()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();

    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or(Value::String(
            String::from_utf8_lossy(&bytes).into_owned(),
        ))
    };

    (status, value)
}

fn reservation_request(costume_id: CostumeId, email: &str) -> Value {
    json!({
        "costume_id": costume_id.value(),
        "start_date": "2025-01-15",
        "end_date": "2025-01-18",
        "client_name": "Ann",
        "client_email": email,
        "client_phone": "555-0100",
        "client_address": "1 Main St",
    })
}

// ============================================================================
// E2Eテスト: 正常系フロー
// ============================================================================

#[tokio::test]
async fn test_e2e_full_reservation_flow() {
    // Arrange
    let pirate = create_costume("Pirate", "Adventure", dec!(25.00));
    let costume_id = pirate.costume_id;
    let app = setup_e2e_app(vec![pirate]);

    // Step 1: 予約作成（POST /reservations）
    let (status, body) = send(
        &app,
        "POST",
        "/reservations",
        Some(reservation_request(costume_id, "Ann@Example.com")),
    )
    .await;

    assert_eq!(status, StatusCode::CREATED);
    let created: ReservationResponse = serde_json::from_value(body).unwrap();
    assert_eq!(created.total_price, dec!(75.00));
    assert_eq!(created.status, "pending");
    assert_eq!(created.client.email, "ann@example.com");
    assert_eq!(created.costume.costume_id, costume_id.value());
    assert!(!created.costume.available);

    // Step 2: 予約詳細取得（GET /reservations/:id）
    let (status, body) = send(
        &app,
        "GET",
        &format!("/reservations/{}", created.reservation_id),
        None,
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    let fetched: ReservationResponse = serde_json::from_value(body).unwrap();
    assert_eq!(fetched.reservation_id, created.reservation_id);
    assert_eq!(fetched.client.client_id, created.client_id);

    // Step 3: 顧客別一覧（GET /reservations/user/:user_id）
    let (status, body) = send(
        &app,
        "GET",
        &format!("/reservations/user/{}", created.client_id),
        None,
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    let listed: Vec<ReservationResponse> = serde_json::from_value(body).unwrap();
    assert_eq!(listed.len(), 1);

    // Step 4: 貸出中の衣装は一覧に出ない（GET /costumes/available）
    let (status, body) = send(&app, "GET", "/costumes/available", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!([]));

    // Step 5: 取り消し（DELETE /reservations/:id）
    let (status, body) = send(
        &app,
        "DELETE",
        &format!("/reservations/{}", created.reservation_id),
        None,
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "message": "Reservation cancelled" }));

    // 取り消し後は取得できない
    let (status, body) = send(
        &app,
        "GET",
        &format!("/reservations/{}", created.reservation_id),
        None,
    )
    .await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "RESERVATION_NOT_FOUND");

    // 衣装は再び貸出可能
    let (_, body) = send(&app, "GET", "/costumes/available", None).await;
    let available: Vec<CostumeResponse> = serde_json::from_value(body).unwrap();
    assert_eq!(available.len(), 1);
    assert!(available[0].available);
}

#[tokio::test]
async fn test_e2e_update_reservation() {
    let pirate = create_costume("Pirate", "Adventure", dec!(25.00));
    let costume_id = pirate.costume_id;
    let app = setup_e2e_app(vec![pirate]);

    let (_, body) = send(
        &app,
        "POST",
        "/reservations",
        Some(reservation_request(costume_id, "ann@example.com")),
    )
    .await;
    let created: ReservationResponse = serde_json::from_value(body).unwrap();

    let (status, body) = send(
        &app,
        "PUT",
        &format!("/reservations/{}", created.reservation_id),
        Some(json!({ "status": "confirmed", "end_date": "2025-01-20" })),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    let updated: ReservationResponse = serde_json::from_value(body).unwrap();
    assert_eq!(updated.status, "confirmed");
    assert_eq!(updated.end_date.to_string(), "2025-01-20");
    assert_eq!(updated.total_price, dec!(75.00));

    // cancelledは取り消し操作でのみ設定できる
    let (status, body) = send(
        &app,
        "PUT",
        &format!("/reservations/{}", created.reservation_id),
        Some(json!({ "status": "cancelled" })),
    )
    .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["error"], "VALIDATION_ERROR");

    // ステータスで絞り込み
    let (status, body) = send(&app, "GET", "/reservations?status=confirmed", None).await;
    assert_eq!(status, StatusCode::OK);
    let confirmed: Vec<ReservationResponse> = serde_json::from_value(body).unwrap();
    assert_eq!(confirmed.len(), 1);

    let (_, body) = send(&app, "GET", "/reservations?status=pending", None).await;
    assert_eq!(body, json!([]));
}

#[tokio::test]
async fn test_e2e_costumes_by_category() {
    let app = setup_e2e_app(vec![
        create_costume("Pirate", "Adventure", dec!(25.00)),
        create_costume("Witch", "Halloween", dec!(10.00)),
    ]);

    let (status, body) = send(&app, "GET", "/costumes/category/halloween", None).await;

    assert_eq!(status, StatusCode::OK);
    let costumes: Vec<CostumeResponse> = serde_json::from_value(body).unwrap();
    assert_eq!(costumes.len(), 1);
    assert_eq!(costumes[0].name, "Witch");
    assert_eq!(costumes[0].price_per_day, dec!(10.00));
}

#[tokio::test]
async fn test_e2e_health_check() {
    let app = setup_e2e_app(vec![]);

    let (status, body) = send(&app, "GET", "/health", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, Value::String("OK".to_string()));
}

// ============================================================================
// E2Eテスト: エラーケース
// ============================================================================

#[tokio::test]
async fn test_e2e_conflict_when_costume_already_reserved() {
    let pirate = create_costume("Pirate", "Adventure", dec!(25.00));
    let costume_id = pirate.costume_id;
    let app = setup_e2e_app(vec![pirate]);

    let (status, _) = send(
        &app,
        "POST",
        "/reservations",
        Some(reservation_request(costume_id, "ann@example.com")),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, body) = send(
        &app,
        "POST",
        "/reservations",
        Some(reservation_request(costume_id, "bob@example.com")),
    )
    .await;

    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["error"], "COSTUME_UNAVAILABLE");
}

#[tokio::test]
async fn test_e2e_validation_errors() {
    let pirate = create_costume("Pirate", "Adventure", dec!(25.00));
    let costume_id = pirate.costume_id;
    let app = setup_e2e_app(vec![pirate]);

    // 終了日 == 開始日
    let mut request = reservation_request(costume_id, "ann@example.com");
    request["end_date"] = json!("2025-01-15");
    let (status, body) = send(&app, "POST", "/reservations", Some(request)).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["error"], "VALIDATION_ERROR");

    // 不正なメールアドレス
    let (status, body) = send(
        &app,
        "POST",
        "/reservations",
        Some(reservation_request(costume_id, "not-an-email")),
    )
    .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["error"], "VALIDATION_ERROR");

    // 不正なステータスフィルタ
    let (status, body) = send(&app, "GET", "/reservations?status=lost", None).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["error"], "VALIDATION_ERROR");

    // 合計金額が上限を超える期間
    let mut request = reservation_request(costume_id, "ann@example.com");
    request["start_date"] = json!("2025-01-01");
    request["end_date"] = json!("9999-12-31");
    let (status, body) = send(&app, "POST", "/reservations", Some(request)).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["error"], "VALIDATION_ERROR");

    // 検証エラーの後も衣装は貸出可能
    let (_, body) = send(&app, "GET", "/costumes/available", None).await;
    assert_eq!(body.as_array().map(Vec::len), Some(1));
}

#[tokio::test]
async fn test_e2e_not_found_errors() {
    let app = setup_e2e_app(vec![]);

    let (status, body) = send(
        &app,
        "POST",
        "/reservations",
        Some(reservation_request(CostumeId::new(), "ann@example.com")),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "COSTUME_NOT_FOUND");

    let unknown = Uuid::new_v4();
    let (status, _) = send(
        &app,
        "PUT",
        &format!("/reservations/{}", unknown),
        Some(json!({ "status": "completed" })),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = send(&app, "DELETE", &format!("/reservations/{}", unknown), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    // 未知の顧客は空配列
    let (status, body) = send(&app, "GET", &format!("/reservations/user/{}", unknown), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!([]));
}
