use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::category::Category;
use crate::totals;

/// One recorded cell of a score sheet. A crossed entry always carries
/// `value = Some(0)`: the player forfeited the category for zero points.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreEntry {
    pub value: Option<u16>,
    pub is_crossed: bool,
    /// 1-based turn on which the entry was written.
    pub turn: u8,
}

impl ScoreEntry {
    pub fn scored(value: u16, turn: u8) -> Self {
        Self {
            value: Some(value),
            is_crossed: false,
            turn,
        }
    }

    pub fn crossed(turn: u8) -> Self {
        Self {
            value: Some(0),
            is_crossed: true,
            turn,
        }
    }

    pub fn points(&self) -> u16 {
        self.value.unwrap_or(0)
    }
}

/// Per-player score sheet: one entry per filled category plus derived
/// totals. Totals are recomputed on every write and are never stale.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoreSheet {
    pub entries: HashMap<Category, ScoreEntry>,
    pub upper_total: u16,
    pub upper_bonus: u16,
    pub lower_total: u16,
    pub grand_total: u16,
}

impl ScoreSheet {
    pub fn new() -> Self {
        Self {
            entries: HashMap::new(),
            upper_total: 0,
            upper_bonus: 0,
            lower_total: 0,
            grand_total: 0,
        }
    }

    pub fn entry(&self, category: Category) -> Option<&ScoreEntry> {
        self.entries.get(&category)
    }

    pub fn is_filled(&self, category: Category) -> bool {
        self.entries.contains_key(&category)
    }

    pub fn filled_count(&self) -> usize {
        self.entries.len()
    }

    pub fn is_complete(&self) -> bool {
        self.entries.len() == Category::ALL.len()
    }

    pub fn open_categories(&self) -> Vec<Category> {
        Category::ALL
            .iter()
            .filter(|c| !self.is_filled(**c))
            .copied()
            .collect()
    }

    /// Write an entry and bring the derived totals up to date.
    pub fn set(&mut self, category: Category, entry: ScoreEntry) {
        self.entries.insert(category, entry);
        totals::recompute(self);
    }
}

impl Default for ScoreSheet {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_sheet() {
        let sheet = ScoreSheet::new();
        assert_eq!(sheet.grand_total, 0);
        assert_eq!(sheet.upper_total, 0);
        assert_eq!(sheet.upper_bonus, 0);
        assert!(!sheet.is_complete());
        assert_eq!(sheet.open_categories().len(), 13);
    }

    #[test]
    fn test_set_updates_totals() {
        let mut sheet = ScoreSheet::new();
        sheet.set(Category::Threes, ScoreEntry::scored(9, 1));
        sheet.set(Category::Chance, ScoreEntry::scored(22, 2));
        assert_eq!(sheet.upper_total, 9);
        assert_eq!(sheet.lower_total, 22);
        assert_eq!(sheet.grand_total, 31);
    }

    #[test]
    fn test_crossed_entry_is_zero() {
        let mut sheet = ScoreSheet::new();
        sheet.set(Category::Yams, ScoreEntry::crossed(4));
        let entry = sheet.entry(Category::Yams).copied();
        assert_eq!(
            entry,
            Some(ScoreEntry {
                value: Some(0),
                is_crossed: true,
                turn: 4
            })
        );
        assert_eq!(sheet.lower_total, 0);
        assert_eq!(sheet.grand_total, 0);
    }

    #[test]
    fn test_complete_sheet() {
        let mut sheet = ScoreSheet::new();
        for (i, cat) in Category::ALL.iter().enumerate() {
            sheet.set(*cat, ScoreEntry::scored(5, i as u8 + 1));
        }
        assert!(sheet.is_complete());
        assert!(sheet.open_categories().is_empty());
    }

    #[test]
    fn test_open_categories_shrink() {
        let mut sheet = ScoreSheet::new();
        sheet.set(Category::Ones, ScoreEntry::scored(3, 1));
        sheet.set(Category::Yams, ScoreEntry::scored(50, 2));
        let open = sheet.open_categories();
        assert_eq!(open.len(), 11);
        assert!(!open.contains(&Category::Ones));
        assert!(!open.contains(&Category::Yams));
    }
}
