use crate::category::{Category, COMBO_SUM_MAX, COMBO_SUM_MIN};
use crate::sheet::ScoreSheet;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("category already filled")]
    AlreadyFilled,
    #[error("crossed entries must carry zero points, got {0}")]
    CrossedNonZero(u16),
    #[error("{value} is not a multiple of {face} in 0..={max}")]
    NotAFaceMultiple { face: u8, max: u16, value: u16 },
    #[error("{value} is neither 0 nor the fixed {expected} points")]
    FixedPointMismatch { expected: u16, value: u16 },
    #[error("{value} is outside the dice-sum range 5..=30")]
    SumOutOfRange { value: u16 },
}

/// Category-specific admissibility check for a proposed entry. Pure: no
/// state is touched, the sheet is only consulted for already-filled cells.
pub fn check(
    category: Category,
    value: u16,
    is_crossed: bool,
    sheet: &ScoreSheet,
) -> Result<(), ValidationError> {
    if sheet.is_filled(category) {
        return Err(ValidationError::AlreadyFilled);
    }
    if is_crossed {
        if value != 0 {
            return Err(ValidationError::CrossedNonZero(value));
        }
        return Ok(());
    }
    if let Some(face) = category.face_value() {
        let face16 = face as u16;
        let max = 5 * face16;
        if value % face16 != 0 || value > max {
            return Err(ValidationError::NotAFaceMultiple { face, max, value });
        }
        return Ok(());
    }
    if let Some(expected) = category.fixed_points() {
        if value != 0 && value != expected {
            return Err(ValidationError::FixedPointMismatch { expected, value });
        }
        return Ok(());
    }
    // ThreeOfAKind / FourOfAKind / Chance: any plausible five-dice sum, or 0.
    if value != 0 && !(COMBO_SUM_MIN..=COMBO_SUM_MAX).contains(&value) {
        return Err(ValidationError::SumOutOfRange { value });
    }
    Ok(())
}
