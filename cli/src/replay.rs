use anyhow::{Result, bail};
use sokoiro_core::{Direction, MoveOutcome, PuzzleEngine};

const UNDO: char = 'Z';

/// One step of a replay script.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum Step {
    Move(Direction),
    Undo,
}

/// Parses `U`, `D`, `L`, `R` moves and `Z` undos, ignoring case and whitespace.
pub fn parse_script(script: &str) -> Result<Vec<Step>> {
    script
        .chars()
        .filter(|symbol| !symbol.is_whitespace())
        .map(|symbol| match Direction::from_symbol(symbol) {
            Some(direction) => Ok(Step::Move(direction)),
            None if symbol.to_ascii_uppercase() == UNDO => Ok(Step::Undo),
            None => bail!("unknown step {symbol:?} in move script"),
        })
        .collect()
}

/// Plays one step and lets it settle right away, since nothing is animated here.
pub fn play(engine: &mut PuzzleEngine, step: Step) -> Option<MoveOutcome> {
    let outcome = match step {
        Step::Move(direction) => Some(engine.request_move(direction)),
        Step::Undo => engine.undo(),
    };
    engine.settle();
    outcome
}

pub fn describe(outcome: MoveOutcome) -> String {
    match outcome {
        MoveOutcome::Rejected(reason) => format!("rejected ({reason:?})"),
        MoveOutcome::PlayerMoved { from, to } => format!("player {from:?} -> {to:?}"),
        MoveOutcome::PlayerAndBoxMoved {
            player_from,
            player_to,
            box_id,
            box_from,
            box_to,
        } => format!(
            "player {player_from:?} -> {player_to:?}, box {} {box_from:?} -> {box_to:?}",
            box_id.0
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sokoiro_core::Level;

    #[test]
    fn parse_script_reads_moves_and_undos() {
        let steps = parse_script("Ll u\nZr").unwrap();

        assert_eq!(
            steps,
            [
                Step::Move(Direction::Left),
                Step::Move(Direction::Left),
                Step::Move(Direction::Up),
                Step::Undo,
                Step::Move(Direction::Right),
            ]
        );
        assert!(parse_script("LX").is_err());
    }

    #[test]
    fn play_settles_every_step() {
        let mut engine = PuzzleEngine::new(Level::sample());

        for step in parse_script("LL").unwrap() {
            assert!(play(&mut engine, step).is_some_and(MoveOutcome::has_update));
            assert!(!engine.is_move_in_progress());
        }
        assert!(engine.is_solved());

        assert!(play(&mut engine, Step::Undo).is_some_and(MoveOutcome::is_push));
        assert!(!engine.is_solved());
        assert_eq!(
            play(&mut engine, Step::Move(Direction::Up)),
            Some(MoveOutcome::PlayerMoved { from: (6, 3), to: (6, 2) })
        );
    }

    #[test]
    fn describe_names_the_box() {
        let mut engine = PuzzleEngine::new(Level::sample());
        play(&mut engine, Step::Move(Direction::Left));
        let outcome = play(&mut engine, Step::Move(Direction::Left)).unwrap();

        assert_eq!(
            describe(outcome),
            "player (6, 3) -> (5, 3), box 0 (5, 3) -> (4, 3)"
        );
    }
}
