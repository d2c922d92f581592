use thiserror::Error;

#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("Coordinates outside of the grid")]
    OutOfBounds,
    #[error("Level rows are empty or not all the same width")]
    InvalidBoardShape,
    #[error("Level does not fit in the coordinate range")]
    LevelTooLarge,
    #[error("Unknown tile {0:?} in level")]
    UnknownTile(char),
    #[error("Level has no player")]
    MissingPlayer,
    #[error("Level has more than one player")]
    MultiplePlayers,
    #[error("Wall cell marked as a target")]
    TargetOnWall,
    #[error("Entity placed on a wall")]
    EntityOnWall,
    #[error("Two entities placed on the same cell")]
    OverlappingEntities,
}

pub type Result<T> = core::result::Result<T, GameError>;
