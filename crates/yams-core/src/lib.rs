//! Turn-based scoring engine for Yams (Yahtzee-style) games: category
//! catalog, score validation, per-player sheets with derived totals, the
//! turn state machine, bot decision strategies, and the feedback tier
//! resolver consumed by rendering/audio/haptics layers.

pub mod ai;
pub mod category;
pub mod engine;
pub mod feedback;
pub mod player;
pub mod sheet;
pub mod totals;
pub mod validate;

pub use category::{Category, Section};
pub use engine::{Accepted, GameError, GameState, GameSummary};
pub use feedback::{EffectFlags, FeedbackContext, FeedbackProfile, Intensity};
pub use player::{AiDifficulty, Player, PlayerKind};
pub use sheet::{ScoreEntry, ScoreSheet};
pub use validate::ValidationError;
