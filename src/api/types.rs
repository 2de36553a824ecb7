use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::application::reservation::ReservationDetails;
use crate::domain::commands::CreateReservation;
use crate::domain::{
    Client, ClientContact, Costume, CostumeId, ReservationPatch, ReservationStatus, UserId,
    ValidationError,
};

/// 予約作成リクエスト（POST /reservations）
///
/// 日付は時刻を含まないISO形式（YYYY-MM-DD）。
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateReservationRequest {
    #[serde(default)]
    pub user_id: Option<Uuid>,
    pub costume_id: Uuid,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub client_name: String,
    pub client_email: String,
    pub client_phone: String,
    pub client_address: String,
}

impl CreateReservationRequest {
    pub fn to_command(&self) -> CreateReservation {
        CreateReservation {
            user_id: self.user_id.map(UserId::from_uuid),
            costume_id: CostumeId::from_uuid(self.costume_id),
            start_date: self.start_date,
            end_date: self.end_date,
            contact: ClientContact {
                name: self.client_name.clone(),
                email: self.client_email.clone(),
                phone: self.client_phone.clone(),
                address: self.client_address.clone(),
            },
        }
    }
}

/// 予約更新リクエスト（PUT /reservations/:id）
///
/// 指定したフィールドのみ変更する。金額は再計算しない。
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateReservationRequest {
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub start_date: Option<NaiveDate>,
    #[serde(default)]
    pub end_date: Option<NaiveDate>,
}

impl UpdateReservationRequest {
    /// 未知のステータスは検証エラー
    pub fn to_patch(&self) -> Result<ReservationPatch, ValidationError> {
        Ok(ReservationPatch {
            status: parse_status_filter(self.status.as_deref())?,
            start_date: self.start_date,
            end_date: self.end_date,
        })
    }
}

/// 予約一覧取得のクエリパラメータ
#[derive(Debug, Default, Deserialize)]
pub struct ListReservationsQuery {
    /// ステータスでフィルタリング
    pub status: Option<String>,
}

/// 顧客レスポンス
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClientResponse {
    pub client_id: Uuid,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub address: String,
    pub created_at: DateTime<Utc>,
}

impl From<Client> for ClientResponse {
    fn from(client: Client) -> Self {
        Self {
            client_id: client.client_id.value(),
            name: client.name,
            email: client.email.into(),
            phone: client.phone,
            address: client.address,
            created_at: client.created_at,
        }
    }
}

/// 衣装レスポンス
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CostumeResponse {
    pub costume_id: Uuid,
    pub name: String,
    pub description: String,
    pub price_per_day: Decimal,
    pub image: Option<String>,
    pub category: String,
    pub size: String,
    pub available: bool,
}

impl From<Costume> for CostumeResponse {
    fn from(costume: Costume) -> Self {
        Self {
            costume_id: costume.costume_id.value(),
            name: costume.name,
            description: costume.description,
            price_per_day: costume.price_per_day.amount(),
            image: costume.image,
            category: costume.category,
            size: costume.size,
            available: costume.available,
        }
    }
}

/// 予約レスポンス（顧客と衣装を埋め込む）
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReservationResponse {
    pub reservation_id: Uuid,
    pub client_id: Uuid,
    pub costume_id: Uuid,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub total_price: Decimal,
    pub status: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub client: ClientResponse,
    pub costume: CostumeResponse,
}

impl From<ReservationDetails> for ReservationResponse {
    fn from(details: ReservationDetails) -> Self {
        let ReservationDetails {
            reservation,
            client,
            costume,
        } = details;

        Self {
            reservation_id: reservation.reservation_id.value(),
            client_id: reservation.client_id.value(),
            costume_id: reservation.costume_id.value(),
            start_date: reservation.start_date,
            end_date: reservation.end_date,
            total_price: reservation.total_price.amount(),
            status: reservation.status.as_str().to_string(),
            created_at: reservation.created_at,
            updated_at: reservation.updated_at,
            client: ClientResponse::from(client),
            costume: CostumeResponse::from(costume),
        }
    }
}

/// メッセージのみのレスポンス
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// エラーレスポンス
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            message: message.into(),
        }
    }
}

/// ステータスクエリパラメータのパースとバリデーション
pub fn parse_status_filter(
    status: Option<&str>,
) -> Result<Option<ReservationStatus>, ValidationError> {
    status
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::parse::<ReservationStatus>)
        .transpose()
}
