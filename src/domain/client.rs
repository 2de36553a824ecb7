use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{ClientId, Email, ValidationError};

/// 顧客
///
/// メールアドレスで一意。最初に登録された名前・電話・住所が保持され、
/// 同じメールアドレスの後続リクエストでは上書きされない。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Client {
    pub client_id: ClientId,
    pub name: String,
    pub email: Email,
    pub phone: String,
    pub address: String,
    pub created_at: DateTime<Utc>,
}

/// 予約リクエストに含まれる顧客の連絡先（未検証）
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientContact {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub address: String,
}

/// 純粋関数：連絡先を検証する
///
/// 正規化したメールアドレスを返す。
pub fn validate_contact(contact: &ClientContact) -> Result<Email, ValidationError> {
    let email = Email::parse(&contact.email)?;
    if contact.name.trim().is_empty() {
        return Err(ValidationError::EmptyName);
    }
    Ok(email)
}

/// 純粋関数：新しい顧客を登録する
///
/// 副作用なし。永続化はアプリケーション層が行う。
pub fn register_client(
    contact: &ClientContact,
    registered_at: DateTime<Utc>,
) -> Result<Client, ValidationError> {
    let email = validate_contact(contact)?;

    Ok(Client {
        client_id: ClientId::new(),
        name: contact.name.trim().to_string(),
        email,
        phone: contact.phone.trim().to_string(),
        address: contact.address.trim().to_string(),
        created_at: registered_at,
    })
}
