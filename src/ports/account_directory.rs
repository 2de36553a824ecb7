use crate::domain::UserId;
use async_trait::async_trait;

pub type Result<T> = std::result::Result<T, Box<dyn std::error::Error + Send + Sync>>;

/// アカウントディレクトリポート
///
/// 予約コンテキストと認証コンテキストの境界を維持する。
/// 予約コンテキストはUserIDのみを知り、アカウントの詳細は知らない。
#[async_trait]
pub trait AccountDirectory: Send + Sync {
    /// アカウントが存在するか確認する
    async fn exists(&self, user_id: UserId) -> Result<bool>;
}
