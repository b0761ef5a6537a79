use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Section {
    Upper,
    Lower,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    // Upper section
    Ones,
    Twos,
    Threes,
    Fours,
    Fives,
    Sixes,
    // Lower section
    ThreeOfAKind,
    FourOfAKind,
    FullHouse,
    SmallStraight,
    LargeStraight,
    Yams,
    Chance,
}

impl Category {
    pub const ALL: [Category; 13] = [
        Category::Ones,
        Category::Twos,
        Category::Threes,
        Category::Fours,
        Category::Fives,
        Category::Sixes,
        Category::ThreeOfAKind,
        Category::FourOfAKind,
        Category::FullHouse,
        Category::SmallStraight,
        Category::LargeStraight,
        Category::Yams,
        Category::Chance,
    ];

    pub const UPPER: [Category; 6] = [
        Category::Ones,
        Category::Twos,
        Category::Threes,
        Category::Fours,
        Category::Fives,
        Category::Sixes,
    ];

    pub const LOWER: [Category; 7] = [
        Category::ThreeOfAKind,
        Category::FourOfAKind,
        Category::FullHouse,
        Category::SmallStraight,
        Category::LargeStraight,
        Category::Yams,
        Category::Chance,
    ];

    pub fn section(&self) -> Section {
        if self.is_upper() {
            Section::Upper
        } else {
            Section::Lower
        }
    }

    pub fn is_upper(&self) -> bool {
        matches!(
            self,
            Category::Ones
                | Category::Twos
                | Category::Threes
                | Category::Fours
                | Category::Fives
                | Category::Sixes
        )
    }

    /// Die face counted by an upper category, `None` for the lower section.
    pub fn face_value(&self) -> Option<u8> {
        match self {
            Category::Ones => Some(1),
            Category::Twos => Some(2),
            Category::Threes => Some(3),
            Category::Fours => Some(4),
            Category::Fives => Some(5),
            Category::Sixes => Some(6),
            _ => None,
        }
    }

    /// All-or-nothing point value for the fixed combination categories.
    pub fn fixed_points(&self) -> Option<u16> {
        match self {
            Category::FullHouse => Some(25),
            Category::SmallStraight => Some(30),
            Category::LargeStraight => Some(40),
            Category::Yams => Some(50),
            _ => None,
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Category::Ones => "Ones",
            Category::Twos => "Twos",
            Category::Threes => "Threes",
            Category::Fours => "Fours",
            Category::Fives => "Fives",
            Category::Sixes => "Sixes",
            Category::ThreeOfAKind => "3 of a Kind",
            Category::FourOfAKind => "4 of a Kind",
            Category::FullHouse => "Full House",
            Category::SmallStraight => "Sm. Straight",
            Category::LargeStraight => "Lg. Straight",
            Category::Yams => "YAMS",
            Category::Chance => "Chance",
        }
    }
}

pub fn by_section(section: Section) -> &'static [Category] {
    match section {
        Section::Upper => &Category::UPPER,
        Section::Lower => &Category::LOWER,
    }
}

pub const UPPER_BONUS_THRESHOLD: u16 = 63;
pub const UPPER_BONUS_VALUE: u16 = 35;

/// Legal range for the free-sum categories (3/4 of a kind, chance):
/// the sum of five dice showing 1..=6.
pub const COMBO_SUM_MIN: u16 = 5;
pub const COMBO_SUM_MAX: u16 = 30;
