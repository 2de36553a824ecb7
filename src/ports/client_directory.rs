use crate::domain::{Client, ClientId, Email};
use async_trait::async_trait;

pub type Result<T> = std::result::Result<T, Box<dyn std::error::Error + Send + Sync>>;

/// 顧客ディレクトリポート
///
/// 顧客はメールアドレスで一意。
#[async_trait]
pub trait ClientDirectory: Send + Sync {
    /// メールアドレスで顧客を検索する
    async fn find_by_email(&self, email: &Email) -> Result<Option<Client>>;

    /// IDで顧客を取得する
    async fn get_client(&self, client_id: ClientId) -> Result<Option<Client>>;

    /// 同じメールアドレスの顧客が存在しなければ登録する
    ///
    /// 保存されている顧客を返す。既存の場合は既存レコードを変更せずに返す
    /// （先に書いた方が勝つ）。
    async fn insert_if_absent(&self, client: Client) -> Result<Client>;
}
