use anyhow::Context as _;
use gridfall_engine::RandomPieceSource;
use gridfall_evaluator::{FEATURE_COUNT, MoveSelector, Playout};

/// Hand-tuned weight vector in selector order: landing height, complete
/// lines, row transitions, column transitions, holes, wells.
const DEFAULT_WEIGHTS: [f64; FEATURE_COUNT] = [
    -2.767_447_860_967_22,
    7.109_539_166_236_581,
    -2.247_678_467_329_565_3,
    -7.486_601_242_281_183,
    -10.0,
    -2.764_426_870_478_78,
];

#[derive(Debug, Clone, clap::Args)]
pub(crate) struct PlayArg {
    /// Number of games to play
    #[arg(long, default_value_t = 50)]
    games: usize,
    /// Move cutoff per game
    #[arg(long, default_value_t = 10_000_000)]
    cutoff: usize,
    /// Six comma-separated feature weights (landing height, lines, row
    /// transitions, column transitions, holes, wells)
    #[arg(long, value_delimiter = ',', allow_negative_numbers = true)]
    weights: Option<Vec<f64>>,
}

pub(crate) fn run(arg: &PlayArg) -> anyhow::Result<()> {
    anyhow::ensure!(arg.games > 0, "at least one game is required");

    let weights = match &arg.weights {
        Some(values) => values
            .as_slice()
            .try_into()
            .context("exactly six weights are required")?,
        None => DEFAULT_WEIGHTS,
    };
    let selector = MoveSelector::new(weights);
    let playout = Playout::new(arg.cutoff);

    println!("iteration;score");
    let mut total = 0;
    for iteration in 0..arg.games {
        let mut source = RandomPieceSource::new();
        let result = playout.play(&selector, &mut source);
        println!("{iteration};{}", result.cleared_rows);
        total += result.cleared_rows;
    }

    #[expect(clippy::cast_precision_loss)]
    let average = total as f64 / arg.games as f64;
    println!("average;{average}");
    Ok(())
}
