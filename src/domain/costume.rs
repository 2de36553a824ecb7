use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{CostumeId, Money};

/// 衣装（貸出対象の物品）
///
/// 不変条件：`available` が false なのは、有効な予約が存在するときに限る。
/// フラグは1つだけなので、1着につき有効な予約は最大1件しか表現できない。
///
/// 作成・編集は在庫管理側の責務。予約コンテキストが変更するのは
/// `available` フラグのみ。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Costume {
    pub costume_id: CostumeId,
    pub name: String,
    pub description: String,
    pub price_per_day: Money,
    #[serde(default)]
    pub image: Option<String>,
    pub category: String,
    pub size: String,
    #[serde(default = "default_available")]
    pub available: bool,
    #[serde(default = "Utc::now")]
    pub created_at: DateTime<Utc>,
    #[serde(default = "Utc::now")]
    pub updated_at: DateTime<Utc>,
}

fn default_available() -> bool {
    true
}

impl Costume {
    /// 貸出可能か
    pub fn is_bookable(&self) -> bool {
        self.available
    }

    /// カテゴリが一致するか（大文字小文字を区別しない）
    pub fn in_category(&self, category: &str) -> bool {
        self.category.eq_ignore_ascii_case(category.trim())
    }
}
