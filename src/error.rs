use thiserror::Error;

use crate::cards::Card;

#[derive(Error, Debug)]
pub enum OddsError {
    #[error("Invalid rank: {0}")]
    InvalidRank(char),

    #[error("Invalid suit: {0}")]
    InvalidSuit(char),

    #[error("Invalid card format: {0}")]
    InvalidCardFormat(String),

    #[error("Duplicate card: {0}")]
    DuplicateCard(Card),

    #[error("Player {player} must hold two known cards or two unknown cards")]
    InvalidHoleCardCount { player: usize },

    #[error("Only one hand may be unknown, got {0}")]
    MultipleUnknownHands(usize),

    #[error("Board must have 0, 3, 4 or 5 cards, got {0}")]
    InvalidBoardLength(usize),

    #[error("Need at least one hand")]
    NotEnoughPlayers,

    #[error("Need at least {need} cards, got {got}")]
    NotEnoughCards { need: usize, got: usize },

    #[error("Can evaluate at most {max} cards, got {got}")]
    TooManyCards { max: usize, got: usize },

    #[error("Cannot deal {requested} cards, only {available} remaining")]
    NotEnoughDeck { requested: usize, available: usize },

    #[error("Number of simulations must be positive")]
    InvalidSimulationCount,

    #[error("Number of workers must be positive")]
    InvalidWorkerCount,

    #[error("No trials were run")]
    EmptySimulation,

    #[error("Internal invariant violated: {0}")]
    InternalInvariantViolation(String),

    #[error("Worker pool error: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type OddsResult<T> = Result<T, OddsError>;
