use chrono::NaiveDate;

use super::{Money, RentalPeriod, ValidationError};

/// 最低貸出日数
pub const MIN_RENTAL_DAYS: u32 = 1;

/// 純粋関数：貸出期間の日数
///
/// 終了日は含まない（2025-01-15〜2025-01-18 は3日）。
/// 日付単位なので端数は発生しないが、最低1日として扱う。
pub fn rental_days(period: &RentalPeriod) -> u32 {
    let days = (period.end_date() - period.start_date()).num_days();
    u32::try_from(days).unwrap_or(u32::MAX).max(MIN_RENTAL_DAYS)
}

/// 純粋関数：合計金額を計算する
///
/// 合計 = 日数 × 1日あたりの料金
///
/// # エラー
/// - 終了日が開始日以前の場合は`ValidationError::EndDateNotAfterStartDate`
/// - 合計が`Money::max_amount()`を超える場合は`ValidationError::AmountTooLarge`
pub fn compute_total(
    price_per_day: Money,
    start_date: NaiveDate,
    end_date: NaiveDate,
) -> Result<Money, ValidationError> {
    let period = RentalPeriod::new(start_date, end_date)?;
    total_for_period(price_per_day, &period)
}

/// 検証済みの期間に対する合計金額
pub fn total_for_period(
    price_per_day: Money,
    period: &RentalPeriod,
) -> Result<Money, ValidationError> {
    price_per_day.times(rental_days(period))
}
