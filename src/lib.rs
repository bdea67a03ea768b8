pub mod cards;
pub mod cli;
pub mod display;
pub mod enumeration;
pub mod error;
pub mod hand_evaluator;
pub mod input;
pub mod report;
pub mod simulation;

pub use cards::{parse_board, parse_card, Card, Deck, HolePair, Rank, Suit};
pub use enumeration::{BoardStrategy, Enumeration};
pub use error::{OddsError, OddsResult};
pub use hand_evaluator::{evaluate_cards, evaluate_hand, BoardSummary, HandCategory, HandStrength};
pub use report::{Equity, OddsReport};
pub use simulation::{calculate_odds, simulate, SimulationConfig, Tally};
