use clap::{Parser, ValueEnum};
use rand::rngs::StdRng;
use rand::SeedableRng;
use uuid::Uuid;

use yams_core::ai;
use yams_core::{AiDifficulty, GameState, Player};

const BOT_NAMES: [&str; 6] = [
    "Bot Alpha",
    "Bot Beta",
    "Bot Gamma",
    "Bot Delta",
    "Bot Epsilon",
    "Bot Zeta",
];
const BOT_COLORS: [&str; 6] = [
    "#e74c3c", "#3498db", "#2ecc71", "#f1c40f", "#9b59b6", "#e67e22",
];

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Difficulty {
    Easy,
    Normal,
    Hard,
}

impl From<Difficulty> for AiDifficulty {
    fn from(d: Difficulty) -> Self {
        match d {
            Difficulty::Easy => AiDifficulty::Easy,
            Difficulty::Normal => AiDifficulty::Normal,
            Difficulty::Hard => AiDifficulty::Hard,
        }
    }
}

/// Yams engine runner - simulates bot-vs-bot games through the scoring
/// engine and logs accepted entries with their feedback tiers.
#[derive(Parser, Debug)]
#[command(name = "yams-cli", version, about)]
struct Args {
    /// Number of bot players (2-6)
    #[arg(short, long, default_value_t = 2)]
    bots: usize,

    /// Bot difficulty
    #[arg(short, long, value_enum, default_value_t = Difficulty::Normal)]
    difficulty: Difficulty,

    /// RNG seed for reproducible games
    #[arg(short, long)]
    seed: Option<u64>,

    /// Number of games to simulate
    #[arg(short, long, default_value_t = 1)]
    games: u32,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "yams_cli=info,yams_core=info".into()),
        )
        .init();

    let args = Args::parse();
    let mut rng = match args.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    for game_no in 1..=args.games {
        run_game(game_no, &args, &mut rng)?;
    }
    Ok(())
}

fn run_game(game_no: u32, args: &Args, rng: &mut StdRng) -> anyhow::Result<()> {
    let players: Vec<Player> = (0..args.bots)
        .map(|i| {
            Player::bot(
                Uuid::new_v4(),
                BOT_NAMES[i % BOT_NAMES.len()],
                BOT_COLORS[i % BOT_COLORS.len()],
                args.difficulty.into(),
            )
        })
        .collect();

    let mut game = GameState::new(players)?;
    tracing::info!(game_no, bots = args.bots, "game started");

    while !game.is_game_complete {
        let player = game.current_player().clone();
        let decision = ai::decide(&game, &player, rng);
        let accepted = game.submit(
            player.id,
            decision.category,
            decision.value,
            decision.is_crossed,
        )?;

        tracing::info!(
            turn = accepted.entry.turn,
            player = %player.name,
            category = accepted.category.display_name(),
            value = accepted.entry.points(),
            crossed = accepted.entry.is_crossed,
            tier = accepted.feedback.tier_name,
            "entry accepted"
        );
        if accepted.bonus_earned {
            tracing::info!(player = %player.name, "upper bonus earned (+35)");
        }

        if let Some(summary) = accepted.summary {
            println!("\nGame {game_no} final scores:");
            for (id, total) in &summary.totals {
                let name = game
                    .players
                    .iter()
                    .find(|p| p.id == *id)
                    .map(|p| p.name.as_str())
                    .unwrap_or("?");
                println!("  {name:<12} {total:>4}");
            }
            let winner = game
                .players
                .iter()
                .find(|p| p.id == summary.winner)
                .map(|p| p.name.as_str())
                .unwrap_or("?");
            println!("  Winner: {winner}\n");
        }
    }
    Ok(())
}
