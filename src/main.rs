//! bg-rollout: rank backgammon moves by Monte Carlo rollouts.
//!
//! ## Usage
//!
//! - `bg-rollout` - Roll for player A from the standard layout and rank the moves
//! - `bg-rollout --dice 3,1 --trials 200` - Rank a specific roll
//! - `bg-rollout --layout stacked --side b` - Use the stacked layout, B to move
//!
//! Set `RUST_LOG=debug` to see per-worker tallies and failures.

use anyhow::{bail, Context, Result};
use clap::{Parser, ValueEnum};

use bg_rollout::core::{Layout, Roll, Side};
use bg_rollout::render::BoardView;
use bg_rollout::rollout::{ParallelEvaluator, RolloutConfig};

/// Rank backgammon moves by parallel Monte Carlo rollouts
#[derive(Parser)]
#[command(name = "bg-rollout")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Rollouts per candidate move
    #[arg(long, env = "BG_TRIALS", default_value_t = 50)]
    trials: u32,

    /// Turn ceiling per rollout
    #[arg(long, env = "BG_MAX_TURNS", default_value_t = 300)]
    max_turns: u32,

    /// Master seed
    #[arg(long, default_value_t = 42)]
    seed: u64,

    /// Roll to evaluate, e.g. `3,5`; rolled from the seed when omitted
    #[arg(long)]
    dice: Option<String>,

    /// Starting layout
    #[arg(long, value_enum, default_value_t = LayoutArg::Standard)]
    layout: LayoutArg,

    /// Side to move
    #[arg(long, value_enum, default_value_t = SideArg::A)]
    side: SideArg,

    /// Number of ranked candidates to print
    #[arg(long, default_value_t = 5)]
    top: usize,
}

#[derive(Clone, Copy, ValueEnum)]
enum LayoutArg {
    Standard,
    Stacked,
}

#[derive(Clone, Copy, ValueEnum)]
enum SideArg {
    A,
    B,
}

fn parse_dice(text: &str) -> Result<Roll> {
    let values: Vec<u8> = text
        .split(',')
        .map(|part| part.trim().parse::<u8>())
        .collect::<std::result::Result<_, _>>()
        .with_context(|| format!("dice must look like `3,5`, got `{text}`"))?;

    match values.as_slice() {
        &[a, b] if (1..=6).contains(&a) && (1..=6).contains(&b) => Ok(Roll::new(a, b)),
        _ => bail!("dice must be two values in 1..=6, got `{text}`"),
    }
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    let layout = match cli.layout {
        LayoutArg::Standard => Layout::standard(),
        LayoutArg::Stacked => Layout::stacked(),
    };
    let mover = match cli.side {
        SideArg::A => Side::A,
        SideArg::B => Side::B,
    };

    let config = RolloutConfig::default()
        .with_trials(cli.trials)
        .with_max_turns(cli.max_turns)
        .with_seed(cli.seed)
        .with_layout(layout.clone());
    let mut evaluator = ParallelEvaluator::new(config)?;

    let position = evaluator.opening_position();
    println!("bg-rollout: {} layout, {mover} to move\n", layout.name);
    println!("{}", BoardView::new(&position).with_layout(&layout));

    let evaluation = match cli.dice.as_deref() {
        Some(text) => evaluator.evaluate_with_roll(&position, parse_dice(text)?, mover),
        None => evaluator.evaluate_opening(mover),
    };

    println!(
        "Roll {}: {} candidates, {} trials each, {:.0} rollouts/s\n",
        evaluation.roll,
        evaluation.stats.candidates,
        cli.trials,
        evaluation.stats.rollouts_per_second()
    );

    for (rank, entry) in evaluation.ranked.iter().take(cli.top).enumerate() {
        println!(
            "#{} candidate {}: score {:.3} (W {} / L {} / D {})",
            rank + 1,
            entry.index,
            entry.score,
            entry.tally.wins,
            entry.tally.losses,
            entry.tally.draws
        );
        println!("{}", BoardView::new(&entry.position).with_layout(&layout));
    }

    for failure in &evaluation.failures {
        println!("excluded: {failure}");
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_dice() {
        assert_eq!(parse_dice("3,5").unwrap(), Roll::new(3, 5));
        assert_eq!(parse_dice(" 6 , 6 ").unwrap(), Roll::new(6, 6));
        assert!(parse_dice("0,3").is_err());
        assert!(parse_dice("3").is_err());
        assert!(parse_dice("a,b").is_err());
    }
}
