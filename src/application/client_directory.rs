use crate::domain::{self, Client, ClientContact};
use crate::ports::ClientDirectory;
use chrono::{DateTime, Utc};

use super::errors::{ReservationError, Result};

/// 連絡先から顧客を解決する
///
/// ビジネスルール：
/// - メールアドレスが構文的に正しいこと
/// - 名前が空でないこと
/// - 未登録のメールアドレスなら新規登録する
/// - 登録済みなら既存の顧客をそのまま返す（名前・電話・住所は上書きしない）
///
/// 副作用は最大1回の登録のみ。
pub async fn resolve_client<D>(
    directory: &D,
    contact: &ClientContact,
    now: DateTime<Utc>,
) -> Result<Client>
where
    D: ClientDirectory + ?Sized,
{
    let email = domain::validate_contact(contact)?;

    if let Some(existing) = directory
        .find_by_email(&email)
        .await
        .map_err(ReservationError::StoreError)?
    {
        tracing::debug!(client_id = %existing.client_id, "Resolved existing client");
        return Ok(existing);
    }

    let candidate = domain::register_client(contact, now)?;
    let client = directory
        .insert_if_absent(candidate)
        .await
        .map_err(ReservationError::StoreError)?;

    tracing::info!(client_id = %client.client_id, "Registered client");
    Ok(client)
}
