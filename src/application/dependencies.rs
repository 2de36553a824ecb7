use crate::ports::{AccountDirectory, BookingStore, BookingTransaction};
use std::sync::Arc;

use super::errors::{ReservationError, Result};

/// サービスの依存関係
///
/// データ構造として定義し、振る舞いは持たない。
/// アプリケーション層の関数に明示的に渡される。
#[derive(Clone)]
pub struct ServiceDependencies {
    pub booking_store: Arc<dyn BookingStore>,
    pub account_directory: Arc<dyn AccountDirectory>,
}

impl ServiceDependencies {
    /// トランザクションを開始する
    pub(crate) async fn begin(&self) -> Result<Box<dyn BookingTransaction>> {
        self.booking_store
            .begin()
            .await
            .map_err(ReservationError::StoreError)
    }
}
