use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AiDifficulty {
    Easy,
    Normal,
    Hard,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PlayerKind {
    Human,
    Bot { difficulty: AiDifficulty },
}

/// A seated player. Immutable once the game starts; the mutable scoring
/// state lives in the engine's sheets, keyed by `id`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    pub id: Uuid,
    pub name: String,
    pub color: String,
    pub kind: PlayerKind,
}

impl Player {
    pub fn human(id: Uuid, name: impl Into<String>, color: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            color: color.into(),
            kind: PlayerKind::Human,
        }
    }

    pub fn bot(
        id: Uuid,
        name: impl Into<String>,
        color: impl Into<String>,
        difficulty: AiDifficulty,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            color: color.into(),
            kind: PlayerKind::Bot { difficulty },
        }
    }

    pub fn is_ai(&self) -> bool {
        matches!(self.kind, PlayerKind::Bot { .. })
    }

    pub fn difficulty(&self) -> Option<AiDifficulty> {
        match self.kind {
            PlayerKind::Bot { difficulty } => Some(difficulty),
            PlayerKind::Human => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_human_has_no_difficulty() {
        let p = Player::human(Uuid::new_v4(), "Alice", "#ff0000");
        assert!(!p.is_ai());
        assert_eq!(p.difficulty(), None);
    }

    #[test]
    fn test_bot_difficulty() {
        let p = Player::bot(Uuid::new_v4(), "Bot Alpha", "#00ff00", AiDifficulty::Hard);
        assert!(p.is_ai());
        assert_eq!(p.difficulty(), Some(AiDifficulty::Hard));
    }
}
