use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use uuid::Uuid;

use crate::category::{Category, UPPER_BONUS_VALUE};
use crate::feedback::{self, FeedbackContext, FeedbackProfile};
use crate::player::Player;
use crate::sheet::{ScoreEntry, ScoreSheet};
use crate::validate::{self, ValidationError};

pub const TOTAL_TURNS: u8 = 13;
pub const MAX_PLAYERS: usize = 6;

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum GameError {
    #[error("not your turn")]
    NotYourTurn,
    #[error("player is not seated in this game")]
    UnknownPlayer,
    #[error("game is already complete")]
    GameComplete,
    #[error("no players seated")]
    NoPlayers,
    #[error("too many players (max {MAX_PLAYERS})")]
    TooManyPlayers,
    #[error(transparent)]
    Rejected(#[from] ValidationError),
}

/// Result of an accepted submission: what was written, the celebration
/// descriptor for it, and the final summary once the last cell fills.
#[derive(Debug, Clone, PartialEq)]
pub struct Accepted {
    pub category: Category,
    pub entry: ScoreEntry,
    pub bonus_earned: bool,
    pub feedback: FeedbackProfile,
    pub summary: Option<GameSummary>,
}

/// Outbound game-complete payload for the history/progression collaborators.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameSummary {
    pub winner: Uuid,
    pub totals: Vec<(Uuid, u16)>,
    pub completed_at: DateTime<Utc>,
}

/// Whole-game state. Single writer (this engine); everything else gets a
/// read-only view. Mutated exactly once per accepted submission, terminal
/// once every sheet is full.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    pub players: Vec<Player>,
    pub sheets: HashMap<Uuid, ScoreSheet>,
    pub current_turn: u8,
    pub total_turns: u8,
    pub current_player_index: usize,
    pub is_game_complete: bool,
    pub started_at: DateTime<Utc>,
    pub completed_at: Option<DateTime<Utc>>,
}

impl GameState {
    pub fn new(players: Vec<Player>) -> Result<Self, GameError> {
        if players.is_empty() {
            return Err(GameError::NoPlayers);
        }
        if players.len() > MAX_PLAYERS {
            return Err(GameError::TooManyPlayers);
        }
        let sheets = players.iter().map(|p| (p.id, ScoreSheet::new())).collect();
        Ok(Self {
            players,
            sheets,
            current_turn: 1,
            total_turns: TOTAL_TURNS,
            current_player_index: 0,
            is_game_complete: false,
            started_at: Utc::now(),
            completed_at: None,
        })
    }

    pub fn current_player(&self) -> &Player {
        &self.players[self.current_player_index]
    }

    pub fn sheet(&self, player_id: Uuid) -> Option<&ScoreSheet> {
        self.sheets.get(&player_id)
    }

    /// Apply one validated submission for the active player.
    ///
    /// Rejections (wrong player, inadmissible value) leave the state
    /// untouched; once validation passes, the write, total recompute,
    /// advance and completion check are atomic from the caller's view.
    pub fn submit(
        &mut self,
        player_id: Uuid,
        category: Category,
        value: u16,
        is_crossed: bool,
    ) -> Result<Accepted, GameError> {
        if self.is_game_complete {
            return Err(GameError::GameComplete);
        }
        if !self.sheets.contains_key(&player_id) {
            return Err(GameError::UnknownPlayer);
        }
        if self.current_player().id != player_id {
            return Err(GameError::NotYourTurn);
        }

        let entry = if is_crossed {
            ScoreEntry::crossed(self.current_turn)
        } else {
            ScoreEntry::scored(value, self.current_turn)
        };

        let (bonus_earned, is_first_score) = {
            let sheet = self
                .sheets
                .get_mut(&player_id)
                .ok_or(GameError::UnknownPlayer)?;
            validate::check(category, value, is_crossed, sheet)?;
            let is_first_score = sheet.filled_count() == 0;
            let old_bonus = sheet.upper_bonus;
            sheet.set(category, entry);
            (
                old_bonus == 0 && sheet.upper_bonus == UPPER_BONUS_VALUE,
                is_first_score,
            )
        };

        let ctx = FeedbackContext {
            bonus_earned,
            is_crossed,
            is_first_score,
        };
        let feedback = feedback::resolve(category, entry.points(), &ctx);

        self.current_player_index = (self.current_player_index + 1) % self.players.len();
        if self.current_player_index == 0 {
            self.current_turn += 1;
        }

        let all_complete = self
            .players
            .iter()
            .all(|p| self.sheets.get(&p.id).is_some_and(|s| s.is_complete()));
        let summary = if all_complete {
            self.is_game_complete = true;
            self.completed_at = Some(Utc::now());
            self.summary()
        } else {
            None
        };

        Ok(Accepted {
            category,
            entry,
            bonus_earned,
            feedback,
            summary,
        })
    }

    /// Winner of a finished game; ties go to the earliest player in turn
    /// order. `None` while the game is still running.
    pub fn winner(&self) -> Option<&Player> {
        if !self.is_game_complete {
            return None;
        }
        let mut best: Option<(&Player, u16)> = None;
        for player in &self.players {
            let total = self
                .sheets
                .get(&player.id)
                .map(|s| s.grand_total)
                .unwrap_or(0);
            let better = match best {
                None => true,
                Some((_, best_total)) => total > best_total,
            };
            if better {
                best = Some((player, total));
            }
        }
        best.map(|(player, _)| player)
    }

    pub fn summary(&self) -> Option<GameSummary> {
        let winner = self.winner()?;
        Some(GameSummary {
            winner: winner.id,
            totals: self
                .players
                .iter()
                .map(|p| {
                    let total = self.sheets.get(&p.id).map(|s| s.grand_total).unwrap_or(0);
                    (p.id, total)
                })
                .collect(),
            completed_at: self.completed_at.unwrap_or_else(Utc::now),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validate::ValidationError;

    fn make_players(n: usize) -> Vec<Player> {
        (0..n)
            .map(|i| Player::human(Uuid::new_v4(), format!("Player{}", i + 1), "#ffffff"))
            .collect()
    }

    /// A legal non-zero value for any category.
    fn plausible_value(category: Category) -> u16 {
        if let Some(face) = category.face_value() {
            face as u16 * 3
        } else if let Some(fixed) = category.fixed_points() {
            fixed
        } else {
            20
        }
    }

    #[test]
    fn test_new_rejects_empty_and_oversized_games() {
        assert!(matches!(
            GameState::new(vec![]),
            Err(GameError::NoPlayers)
        ));
        assert!(matches!(
            GameState::new(make_players(7)),
            Err(GameError::TooManyPlayers)
        ));
        assert!(GameState::new(make_players(1)).is_ok());
        assert!(GameState::new(make_players(6)).is_ok());
    }

    #[test]
    fn test_fresh_game_state() {
        let game = GameState::new(make_players(2)).unwrap();
        assert_eq!(game.current_turn, 1);
        assert_eq!(game.total_turns, 13);
        assert_eq!(game.current_player_index, 0);
        assert!(!game.is_game_complete);
        assert!(game.completed_at.is_none());
        assert!(game.winner().is_none());
    }

    #[test]
    fn test_wrong_player_rejected_without_mutation() {
        let players = make_players(2);
        let p2 = players[1].id;
        let mut game = GameState::new(players).unwrap();

        let err = game.submit(p2, Category::Chance, 20, false);
        assert!(matches!(err, Err(GameError::NotYourTurn)));
        assert_eq!(game.current_turn, 1);
        assert_eq!(game.current_player_index, 0);
        assert_eq!(game.sheets[&p2].filled_count(), 0);
    }

    #[test]
    fn test_unknown_player_rejected() {
        let mut game = GameState::new(make_players(2)).unwrap();
        let stranger = Uuid::new_v4();
        assert!(matches!(
            game.submit(stranger, Category::Chance, 20, false),
            Err(GameError::UnknownPlayer)
        ));
    }

    #[test]
    fn test_invalid_value_rejected_without_mutation() {
        let players = make_players(2);
        let p1 = players[0].id;
        let mut game = GameState::new(players).unwrap();

        // 18 is not a multiple of 4 in 0..=20.
        let err = game.submit(p1, Category::Fours, 18, false);
        assert_eq!(
            err,
            Err(GameError::Rejected(ValidationError::NotAFaceMultiple {
                face: 4,
                max: 20,
                value: 18
            }))
        );
        assert_eq!(game.current_player_index, 0);
        assert_eq!(game.sheets[&p1].filled_count(), 0);
    }

    #[test]
    fn test_accepted_submission_advances_turn() {
        let players = make_players(2);
        let (p1, p2) = (players[0].id, players[1].id);
        let mut game = GameState::new(players).unwrap();

        let accepted = game.submit(p1, Category::Sixes, 18, false).unwrap();
        assert_eq!(accepted.entry.value, Some(18));
        assert_eq!(accepted.entry.turn, 1);
        assert_eq!(game.current_player_index, 1);
        assert_eq!(game.current_turn, 1);

        // Second player closes the round; the turn counter increments.
        game.submit(p2, Category::Chance, 22, false).unwrap();
        assert_eq!(game.current_player_index, 0);
        assert_eq!(game.current_turn, 2);
    }

    #[test]
    fn test_bonus_earned_flows_into_feedback() {
        let players = make_players(1);
        let p1 = players[0].id;
        let mut game = GameState::new(players).unwrap();

        // Upper total 35 before the decisive entry.
        game.submit(p1, Category::Fours, 20, false).unwrap();
        game.submit(p1, Category::Fives, 15, false).unwrap();
        let before = game.sheets[&p1].grand_total;
        assert_eq!(game.sheets[&p1].upper_total, 35);

        // Sixes at 30 pushes the upper total to 65: bonus flips 0 -> 35.
        let accepted = game.submit(p1, Category::Sixes, 30, false).unwrap();
        assert!(accepted.bonus_earned);
        assert_eq!(accepted.feedback.tier_name, "upper-bonus");
        assert_eq!(game.sheets[&p1].upper_bonus, 35);
        assert_eq!(game.sheets[&p1].grand_total, before + 30 + 35);
    }

    #[test]
    fn test_crossed_category_scores_zero() {
        let players = make_players(2);
        let p1 = players[0].id;
        let mut game = GameState::new(players).unwrap();

        let accepted = game.submit(p1, Category::Yams, 0, true).unwrap();
        assert!(accepted.entry.is_crossed);
        assert_eq!(accepted.feedback.tier_name, "crossed");
        assert_eq!(game.sheets[&p1].lower_total, 0);
        assert_eq!(game.sheets[&p1].grand_total, 0);
    }

    #[test]
    fn test_full_two_player_game() {
        let players = make_players(2);
        let ids = [players[0].id, players[1].id];
        let mut game = GameState::new(players).unwrap();

        let mut last_turn = 0;
        for category in Category::ALL {
            for id in ids {
                assert!(game.current_turn >= last_turn, "turn counter went backwards");
                last_turn = game.current_turn;
                game.submit(id, category, plausible_value(category), false)
                    .unwrap();
            }
        }

        assert!(game.is_game_complete);
        assert!(game.completed_at.is_some());
        for id in ids {
            assert!(game.sheets[&id].is_complete());
        }
        // Identical sheets: the tie goes to the first player in turn order.
        assert_eq!(game.winner().map(|p| p.id), Some(ids[0]));

        let summary = game.summary().unwrap();
        assert_eq!(summary.winner, ids[0]);
        assert_eq!(summary.totals.len(), 2);
        assert_eq!(summary.totals[0].1, summary.totals[1].1);
    }

    #[test]
    fn test_higher_total_wins() {
        let players = make_players(2);
        let ids = [players[0].id, players[1].id];
        let mut game = GameState::new(players).unwrap();

        for category in Category::ALL {
            // Player 1 crosses everything, player 2 scores.
            game.submit(ids[0], category, 0, true).unwrap();
            game.submit(ids[1], category, plausible_value(category), false)
                .unwrap();
        }

        assert!(game.is_game_complete);
        assert_eq!(game.winner().map(|p| p.id), Some(ids[1]));
    }

    #[test]
    fn test_completed_game_rejects_submissions() {
        let players = make_players(1);
        let p1 = players[0].id;
        let mut game = GameState::new(players).unwrap();

        for category in Category::ALL {
            game.submit(p1, category, 0, true).unwrap();
        }
        assert!(game.is_game_complete);
        assert!(matches!(
            game.submit(p1, Category::Chance, 20, false),
            Err(GameError::GameComplete)
        ));
    }

    #[test]
    fn test_summary_emitted_on_final_submission_only() {
        let players = make_players(1);
        let p1 = players[0].id;
        let mut game = GameState::new(players).unwrap();

        for (i, category) in Category::ALL.iter().enumerate() {
            let accepted = game.submit(p1, *category, 0, true).unwrap();
            if i < 12 {
                assert!(accepted.summary.is_none());
            } else {
                assert!(accepted.summary.is_some());
            }
        }
    }

    #[test]
    fn test_entry_records_turn_number() {
        let players = make_players(2);
        let ids = [players[0].id, players[1].id];
        let mut game = GameState::new(players).unwrap();

        game.submit(ids[0], Category::Ones, 3, false).unwrap();
        game.submit(ids[1], Category::Ones, 2, false).unwrap();
        game.submit(ids[0], Category::Twos, 6, false).unwrap();

        assert_eq!(game.sheets[&ids[0]].entry(Category::Ones).map(|e| e.turn), Some(1));
        assert_eq!(game.sheets[&ids[0]].entry(Category::Twos).map(|e| e.turn), Some(2));
    }

    #[test]
    fn test_state_snapshot_round_trip() {
        let players = make_players(3);
        let p1 = players[0].id;
        let mut game = GameState::new(players).unwrap();
        game.submit(p1, Category::Fives, 20, false).unwrap();

        let json = serde_json::to_string(&game).unwrap();
        let restored: GameState = serde_json::from_str(&json).unwrap();
        assert_eq!(restored.players.len(), 3);
        assert_eq!(restored.current_player_index, 1);
        assert_eq!(restored.sheets[&p1].upper_total, 20);
    }
}
