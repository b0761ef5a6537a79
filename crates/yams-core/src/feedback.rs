use serde::Serialize;

use crate::category::Category;

/// Ordinal celebration intensity, weakest first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
pub enum Intensity {
    Minimal,
    Standard,
    Good,
    Excellent,
    Epic,
    Legendary,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct EffectFlags {
    pub confetti: bool,
    pub particles: bool,
    pub glow: bool,
    pub flash: bool,
    pub modal: bool,
}

/// Abstract celebration descriptor handed to the rendering/audio/haptics
/// collaborators. Produced fresh per scoring event, never stored or read
/// back by the engine.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FeedbackProfile {
    pub tier_name: &'static str,
    pub intensity: Intensity,
    pub effects: EffectFlags,
    pub message: Option<String>,
    pub duration_ms: u32,
    pub particle_count: u16,
    pub glow_radius: f32,
}

/// Context the turn engine attaches to an accepted entry.
#[derive(Debug, Clone, Copy, Default)]
pub struct FeedbackContext {
    pub bonus_earned: bool,
    pub is_crossed: bool,
    pub is_first_score: bool,
}

const NO_EFFECTS: EffectFlags = EffectFlags {
    confetti: false,
    particles: false,
    glow: false,
    flash: false,
    modal: false,
};

const ALL_EFFECTS: EffectFlags = EffectFlags {
    confetti: true,
    particles: true,
    glow: true,
    flash: true,
    modal: true,
};

// -- Ratio tiers (upper section) --
//
// Effect magnitudes interpolate linearly between the floor and ceiling of
// the band the ratio lands in, so 10/15 on Threes renders bigger than
// 12/20 on Fours even though both are "good".

struct RatioTier {
    floor: f32,
    ceil: f32,
    tier_name: &'static str,
    intensity: Intensity,
    effects: EffectFlags,
    duration_ms: (u32, u32),
    particles: (u16, u16),
    glow: (f32, f32),
}

const RATIO_TIERS: [RatioTier; 4] = [
    RatioTier {
        floor: 0.8,
        ceil: 1.0,
        tier_name: "excellent",
        intensity: Intensity::Excellent,
        effects: EffectFlags {
            particles: true,
            glow: true,
            flash: true,
            ..NO_EFFECTS
        },
        duration_ms: (1400, 1800),
        particles: (45, 70),
        glow: (0.7, 1.0),
    },
    RatioTier {
        floor: 0.6,
        ceil: 0.8,
        tier_name: "good",
        intensity: Intensity::Good,
        effects: EffectFlags {
            particles: true,
            glow: true,
            ..NO_EFFECTS
        },
        duration_ms: (1000, 1400),
        particles: (25, 45),
        glow: (0.4, 0.7),
    },
    RatioTier {
        floor: 0.4,
        ceil: 0.6,
        tier_name: "standard",
        intensity: Intensity::Standard,
        effects: EffectFlags {
            particles: true,
            ..NO_EFFECTS
        },
        duration_ms: (700, 1000),
        particles: (10, 25),
        glow: (0.2, 0.4),
    },
    RatioTier {
        floor: 0.0,
        ceil: 0.4,
        tier_name: "minimal",
        intensity: Intensity::Minimal,
        effects: NO_EFFECTS,
        duration_ms: (500, 700),
        particles: (0, 10),
        glow: (0.0, 0.2),
    },
];

// -- Score brackets (free-sum categories) --

struct BracketTier {
    min_score: u16,
    tier_name: &'static str,
    intensity: Intensity,
    effects: EffectFlags,
    duration_ms: u32,
    particles: u16,
    glow: f32,
}

const CHANCE_BRACKETS: [BracketTier; 6] = [
    BracketTier {
        min_score: 28,
        tier_name: "ultra-lucky",
        intensity: Intensity::Epic,
        effects: EffectFlags {
            confetti: true,
            particles: true,
            glow: true,
            ..NO_EFFECTS
        },
        duration_ms: 2400,
        particles: 85,
        glow: 1.0,
    },
    BracketTier {
        min_score: 25,
        tier_name: "lucky",
        intensity: Intensity::Excellent,
        effects: EffectFlags {
            particles: true,
            glow: true,
            flash: true,
            ..NO_EFFECTS
        },
        duration_ms: 1800,
        particles: 60,
        glow: 0.8,
    },
    BracketTier {
        min_score: 20,
        tier_name: "very-good",
        intensity: Intensity::Good,
        effects: EffectFlags {
            particles: true,
            glow: true,
            ..NO_EFFECTS
        },
        duration_ms: 1400,
        particles: 40,
        glow: 0.6,
    },
    BracketTier {
        min_score: 15,
        tier_name: "good",
        intensity: Intensity::Good,
        effects: EffectFlags {
            particles: true,
            ..NO_EFFECTS
        },
        duration_ms: 1100,
        particles: 25,
        glow: 0.4,
    },
    BracketTier {
        min_score: 10,
        tier_name: "decent",
        intensity: Intensity::Standard,
        effects: EffectFlags {
            particles: true,
            ..NO_EFFECTS
        },
        duration_ms: 800,
        particles: 12,
        glow: 0.2,
    },
    BracketTier {
        min_score: 0,
        tier_name: "standard",
        intensity: Intensity::Standard,
        effects: NO_EFFECTS,
        duration_ms: 600,
        particles: 0,
        glow: 0.0,
    },
];

const THREE_KIND_BRACKETS: [BracketTier; 4] = [
    BracketTier {
        min_score: 25,
        tier_name: "high-set",
        intensity: Intensity::Excellent,
        effects: EffectFlags {
            particles: true,
            glow: true,
            flash: true,
            ..NO_EFFECTS
        },
        duration_ms: 1800,
        particles: 55,
        glow: 0.8,
    },
    BracketTier {
        min_score: 20,
        tier_name: "good-set",
        intensity: Intensity::Good,
        effects: EffectFlags {
            particles: true,
            glow: true,
            ..NO_EFFECTS
        },
        duration_ms: 1300,
        particles: 35,
        glow: 0.5,
    },
    BracketTier {
        min_score: 13,
        tier_name: "set",
        intensity: Intensity::Standard,
        effects: EffectFlags {
            particles: true,
            ..NO_EFFECTS
        },
        duration_ms: 900,
        particles: 15,
        glow: 0.3,
    },
    BracketTier {
        min_score: 0,
        tier_name: "low-set",
        intensity: Intensity::Minimal,
        effects: NO_EFFECTS,
        duration_ms: 600,
        particles: 0,
        glow: 0.0,
    },
];

const FOUR_KIND_BRACKETS: [BracketTier; 4] = [
    BracketTier {
        min_score: 25,
        tier_name: "high-quad",
        intensity: Intensity::Epic,
        effects: EffectFlags {
            confetti: true,
            particles: true,
            glow: true,
            ..NO_EFFECTS
        },
        duration_ms: 2200,
        particles: 75,
        glow: 1.0,
    },
    BracketTier {
        min_score: 18,
        tier_name: "good-quad",
        intensity: Intensity::Excellent,
        effects: EffectFlags {
            particles: true,
            glow: true,
            flash: true,
            ..NO_EFFECTS
        },
        duration_ms: 1600,
        particles: 50,
        glow: 0.7,
    },
    BracketTier {
        min_score: 12,
        tier_name: "quad",
        intensity: Intensity::Good,
        effects: EffectFlags {
            particles: true,
            glow: true,
            ..NO_EFFECTS
        },
        duration_ms: 1200,
        particles: 30,
        glow: 0.5,
    },
    BracketTier {
        min_score: 0,
        tier_name: "low-quad",
        intensity: Intensity::Standard,
        effects: EffectFlags {
            particles: true,
            ..NO_EFFECTS
        },
        duration_ms: 800,
        particles: 12,
        glow: 0.2,
    },
];

/// Map an accepted scoring event to a celebration descriptor. Pure and
/// reproducible: identical inputs yield structurally identical profiles.
pub fn resolve(category: Category, score: u16, ctx: &FeedbackContext) -> FeedbackProfile {
    let mut profile = resolve_inner(category, score, ctx);
    if ctx.is_first_score && profile.message.is_none() {
        profile.message = Some("First score!".into());
    }
    profile
}

fn resolve_inner(category: Category, score: u16, ctx: &FeedbackContext) -> FeedbackProfile {
    // The 63+ bonus outranks whatever the category itself would produce.
    if ctx.bonus_earned {
        return bonus_profile();
    }
    if score == 0 {
        return crossed_profile();
    }
    if let Some(face) = category.face_value() {
        let max = 5 * face as u16;
        if score >= max {
            return ultra_profile();
        }
        return ratio_profile(score as f32 / max as f32);
    }
    if let Some(profile) = fixed_combo_profile(category) {
        return profile;
    }
    match category {
        Category::ThreeOfAKind => bracket_profile(&THREE_KIND_BRACKETS, score),
        Category::FourOfAKind => bracket_profile(&FOUR_KIND_BRACKETS, score),
        Category::Chance => bracket_profile(&CHANCE_BRACKETS, score),
        // Unknown combination: never block scoring over a celebration.
        _ => neutral_profile(),
    }
}

fn ratio_profile(ratio: f32) -> FeedbackProfile {
    let tier = RATIO_TIERS
        .iter()
        .find(|t| ratio >= t.floor)
        .unwrap_or(&RATIO_TIERS[RATIO_TIERS.len() - 1]);
    let span = tier.ceil - tier.floor;
    let t = if span > 0.0 {
        ((ratio - tier.floor) / span).clamp(0.0, 1.0)
    } else {
        0.0
    };
    FeedbackProfile {
        tier_name: tier.tier_name,
        intensity: tier.intensity,
        effects: tier.effects,
        message: None,
        duration_ms: lerp_u32(tier.duration_ms.0, tier.duration_ms.1, t),
        particle_count: lerp_u16(tier.particles.0, tier.particles.1, t),
        glow_radius: lerp_f32(tier.glow.0, tier.glow.1, t),
    }
}

fn bracket_profile(brackets: &[BracketTier], score: u16) -> FeedbackProfile {
    brackets
        .iter()
        .find(|b| score >= b.min_score)
        .map(|b| FeedbackProfile {
            tier_name: b.tier_name,
            intensity: b.intensity,
            effects: b.effects,
            message: None,
            duration_ms: b.duration_ms,
            particle_count: b.particles,
            glow_radius: b.glow,
        })
        .unwrap_or_else(neutral_profile)
}

fn fixed_combo_profile(category: Category) -> Option<FeedbackProfile> {
    let profile = match category {
        Category::FullHouse => FeedbackProfile {
            tier_name: "full-house",
            intensity: Intensity::Epic,
            effects: EffectFlags {
                confetti: true,
                particles: true,
                glow: true,
                ..NO_EFFECTS
            },
            message: Some("Full House!".into()),
            duration_ms: 2200,
            particle_count: 80,
            glow_radius: 1.0,
        },
        Category::SmallStraight => FeedbackProfile {
            tier_name: "small-straight",
            intensity: Intensity::Epic,
            effects: EffectFlags {
                confetti: true,
                particles: true,
                ..NO_EFFECTS
            },
            message: Some("Small Straight!".into()),
            duration_ms: 2000,
            particle_count: 70,
            glow_radius: 0.8,
        },
        Category::LargeStraight => FeedbackProfile {
            tier_name: "large-straight",
            intensity: Intensity::Epic,
            effects: EffectFlags {
                confetti: true,
                particles: true,
                glow: true,
                flash: true,
                ..NO_EFFECTS
            },
            message: Some("Large Straight!".into()),
            duration_ms: 2600,
            particle_count: 100,
            glow_radius: 1.1,
        },
        Category::Yams => FeedbackProfile {
            tier_name: "yams",
            intensity: Intensity::Legendary,
            effects: ALL_EFFECTS,
            message: Some("YAMS!".into()),
            duration_ms: 3500,
            particle_count: 150,
            glow_radius: 1.5,
        },
        _ => return None,
    };
    Some(profile)
}

fn bonus_profile() -> FeedbackProfile {
    FeedbackProfile {
        tier_name: "upper-bonus",
        intensity: Intensity::Legendary,
        effects: ALL_EFFECTS,
        message: Some("Upper bonus +35!".into()),
        duration_ms: 3000,
        particle_count: 120,
        glow_radius: 1.3,
    }
}

fn crossed_profile() -> FeedbackProfile {
    FeedbackProfile {
        tier_name: "crossed",
        intensity: Intensity::Minimal,
        effects: NO_EFFECTS,
        message: None,
        duration_ms: 400,
        particle_count: 0,
        glow_radius: 0.0,
    }
}

fn ultra_profile() -> FeedbackProfile {
    FeedbackProfile {
        tier_name: "ultra",
        intensity: Intensity::Epic,
        effects: EffectFlags {
            confetti: true,
            particles: true,
            glow: true,
            flash: true,
            ..NO_EFFECTS
        },
        message: Some("Maximum!".into()),
        duration_ms: 2500,
        particle_count: 90,
        glow_radius: 1.2,
    }
}

fn neutral_profile() -> FeedbackProfile {
    FeedbackProfile {
        tier_name: "neutral",
        intensity: Intensity::Minimal,
        effects: NO_EFFECTS,
        message: None,
        duration_ms: 400,
        particle_count: 0,
        glow_radius: 0.0,
    }
}

fn lerp_u32(lo: u32, hi: u32, t: f32) -> u32 {
    lo + ((hi - lo) as f32 * t).round() as u32
}

fn lerp_u16(lo: u16, hi: u16, t: f32) -> u16 {
    lo + ((hi - lo) as f32 * t).round() as u16
}

fn lerp_f32(lo: f32, hi: f32, t: f32) -> f32 {
    lo + (hi - lo) * t
}
