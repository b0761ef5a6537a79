use crate::category::{Category, UPPER_BONUS_THRESHOLD, UPPER_BONUS_VALUE};
use crate::sheet::ScoreSheet;

/// Recompute every derived total of a sheet from its entries. Unfilled
/// categories contribute 0. Idempotent: recomputing an already consistent
/// sheet leaves it unchanged.
pub fn recompute(sheet: &mut ScoreSheet) {
    let upper: u16 = Category::UPPER
        .iter()
        .filter_map(|c| sheet.entries.get(c))
        .map(|e| e.points())
        .sum();
    let lower: u16 = Category::LOWER
        .iter()
        .filter_map(|c| sheet.entries.get(c))
        .map(|e| e.points())
        .sum();

    sheet.upper_total = upper;
    sheet.upper_bonus = if upper >= UPPER_BONUS_THRESHOLD {
        UPPER_BONUS_VALUE
    } else {
        0
    };
    sheet.lower_total = lower;
    sheet.grand_total = sheet.upper_total + sheet.upper_bonus + sheet.lower_total;
}
