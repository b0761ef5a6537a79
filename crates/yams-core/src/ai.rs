use rand::Rng;

use crate::category::{Category, UPPER_BONUS_THRESHOLD};
use crate::engine::GameState;
use crate::player::{AiDifficulty, Player};
use crate::sheet::ScoreSheet;
use crate::validate;

/// A bot's turn: the same (category, value, crossed) triple a human would
/// submit, flowing through the same validator and engine path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Decision {
    pub category: Category,
    pub value: u16,
    pub is_crossed: bool,
}

/// Pick a category and a plausible score for the bot's turn. Pure with
/// respect to the game state: nothing is mutated here.
///
/// Contract: the returned category is open on the player's sheet and the
/// value passes the validator. The AI never simulates dice; it fabricates
/// a value from per-category candidate tables within the legal range.
pub fn decide(state: &GameState, player: &Player, rng: &mut impl Rng) -> Decision {
    let sheet = &state.sheets[&player.id];
    let difficulty = player.difficulty().unwrap_or(AiDifficulty::Easy);
    let open = sheet.open_categories();
    if open.is_empty() {
        // Shouldn't happen: the engine completes the game before this.
        return Decision {
            category: Category::Chance,
            value: 0,
            is_crossed: true,
        };
    }

    let decision = match difficulty {
        AiDifficulty::Easy => easy_decision(&open, rng),
        AiDifficulty::Normal => normal_decision(sheet, &open, rng),
        AiDifficulty::Hard => hard_decision(sheet, &open),
    };
    debug_assert!(
        validate::check(decision.category, decision.value, decision.is_crossed, sheet).is_ok(),
        "AI produced an inadmissible decision: {:?}",
        decision
    );
    decision
}

/// Easy: uniformly random open category, candidate-table value.
fn easy_decision(open: &[Category], rng: &mut impl Rng) -> Decision {
    let category = open[rng.gen_range(0..open.len())];
    let value = synthesize_value(category, rng);
    Decision {
        category,
        value,
        is_crossed: value == 0,
    }
}

/// Normal: while the bonus is still reachable, greedily fill the highest
/// open upper category at a mid-to-high multiplier; otherwise play random.
fn normal_decision(sheet: &ScoreSheet, open: &[Category], rng: &mut impl Rng) -> Decision {
    if sheet.upper_total < UPPER_BONUS_THRESHOLD {
        if let Some(category) = highest_open_upper(open) {
            let face = category.face_value().unwrap_or(1) as u16;
            return Decision {
                category,
                value: rng.gen_range(2..=5) * face,
                is_crossed: false,
            };
        }
    }
    easy_decision(open, rng)
}

/// Hard: chase the bonus at maximum value when the upper total sits in
/// 40..63, otherwise take the best-ranked open category at its optimal
/// synthesized score.
fn hard_decision(sheet: &ScoreSheet, open: &[Category]) -> Decision {
    if (40..UPPER_BONUS_THRESHOLD).contains(&sheet.upper_total) {
        if let Some(category) = highest_open_upper(open) {
            let face = category.face_value().unwrap_or(1) as u16;
            return Decision {
                category,
                value: 5 * face,
                is_crossed: false,
            };
        }
    }
    let category = open
        .iter()
        .copied()
        .max_by_key(|c| desirability(*c))
        .unwrap_or(Category::Chance);
    Decision {
        category,
        value: optimal_value(category),
        is_crossed: false,
    }
}

fn highest_open_upper(open: &[Category]) -> Option<Category> {
    open.iter()
        .filter(|c| c.is_upper())
        .max_by_key(|c| c.face_value().unwrap_or(0))
        .copied()
}

/// Fixed desirability ranking for the hard strategy. Lower-section
/// combinations outrank the upper section; upper categories rank by face.
fn desirability(category: Category) -> u16 {
    match category {
        Category::Yams => 100,
        Category::LargeStraight => 90,
        Category::FullHouse => 80,
        Category::FourOfAKind => 70,
        Category::SmallStraight => 60,
        Category::ThreeOfAKind => 50,
        Category::Chance => 40,
        upper => upper.face_value().unwrap_or(0) as u16,
    }
}

/// The score the hard strategy pretends to have rolled for a category.
fn optimal_value(category: Category) -> u16 {
    if let Some(face) = category.face_value() {
        return 5 * face as u16;
    }
    if let Some(fixed) = category.fixed_points() {
        return fixed;
    }
    match category {
        Category::ThreeOfAKind => 25,
        Category::FourOfAKind => 28,
        Category::Chance => 20,
        _ => 0,
    }
}

/// Per-category candidate scores for the random strategies. Upper values
/// are face multiples; combination sums stay inside the five-dice range.
fn synthesize_value(category: Category, rng: &mut impl Rng) -> u16 {
    if let Some(face) = category.face_value() {
        return rng.gen_range(0..=5) * face as u16;
    }
    if let Some(fixed) = category.fixed_points() {
        // All-or-nothing combinations usually miss.
        return if rng.gen_bool(0.35) { fixed } else { 0 };
    }
    let candidates: &[u16] = match category {
        Category::ThreeOfAKind => &[0, 11, 14, 17, 20, 23],
        Category::FourOfAKind => &[0, 12, 16, 20, 24, 28],
        Category::Chance => &[8, 12, 15, 18, 21, 25],
        _ => &[0],
    };
    candidates[rng.gen_range(0..candidates.len())]
}
