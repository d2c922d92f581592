use anyhow::{Context, Result};
use clap::Parser;
use sokoiro_core::{Level, Observation, PuzzleEngine};
use std::path::PathBuf;

mod replay;

#[derive(Parser, Debug)]
#[command(version, about = "Replay a move script against a color-matching push puzzle", long_about = None)]
struct Args {
    /// What log level to use
    #[command(flatten)]
    verbose: clap_verbosity_flag::Verbosity,

    /// Level file to load instead of the built-in sample room
    #[arg(short, long)]
    level: Option<PathBuf>,

    /// Moves to play: U, D, L, R, and Z to undo
    #[arg(short, long, default_value = "")]
    moves: String,

    /// Print the final state as JSON instead of a board
    #[arg(long)]
    json: bool,
}

fn load_level(path: Option<&PathBuf>) -> Result<Level> {
    let Some(path) = path else {
        return Ok(Level::sample());
    };
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("Could not read level {}", path.display()))?;
    text.parse::<Level>()
        .with_context(|| format!("Could not parse level {}", path.display()))
}

fn main() -> Result<()> {
    let args = Args::parse();
    env_logger::Builder::new()
        .filter_level(args.verbose.log_level_filter())
        .init();

    let steps = replay::parse_script(&args.moves)?;
    let mut engine = PuzzleEngine::new(load_level(args.level.as_ref())?);
    log::debug!("loaded {}x{} level", engine.grid().size().0, engine.grid().size().1);

    for (index, step) in steps.into_iter().enumerate() {
        match replay::play(&mut engine, step) {
            Some(outcome) => log::info!("{}: {:?} {}", index + 1, step, replay::describe(outcome)),
            None => log::info!("{}: nothing to undo", index + 1),
        }
    }

    if args.json {
        let observation = Observation::from_engine(&engine);
        println!("{}", serde_json::to_string_pretty(&observation)?);
    } else {
        println!("{engine}");
        println!(
            "moves: {}  pushes: {}  covered: {}/{}  {}",
            engine.move_count(),
            engine.push_count(),
            engine.total_satisfied(),
            engine.grid().total_targets(),
            if engine.is_solved() { "solved" } else { "unsolved" }
        );
    }
    Ok(())
}
