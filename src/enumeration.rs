//! Which boards and opponent hands a run visits.
//!
//! A known flop or turn is completed exhaustively; an empty board is sampled.
//! A single unknown hand adds an outer loop over every pair left in the deck,
//! and each candidate pair gets its own inner board loop.

use std::fmt;
use std::iter::{Copied, Skip, StepBy};
use std::slice::Iter;

use itertools::structs::Combinations;
use itertools::Itertools;
use rand::seq::SliceRandom;
use rand::Rng;

use crate::cards::{Card, Deck, HolePair};
use crate::error::{OddsError, OddsResult};

pub const BOARD_SIZE: usize = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BoardStrategy {
    /// Every unordered set of `needed` cards from the deck, once each.
    Exhaustive { needed: usize },
    /// `samples` independent draws of five cards.
    Random { samples: usize },
}

impl BoardStrategy {
    pub fn select(board_len: usize, samples: usize) -> OddsResult<BoardStrategy> {
        match board_len {
            0 => Ok(BoardStrategy::Random { samples }),
            3 | 4 | 5 => Ok(BoardStrategy::Exhaustive {
                needed: BOARD_SIZE - board_len,
            }),
            n => Err(OddsError::InvalidBoardLength(n)),
        }
    }

    pub fn needed(&self) -> usize {
        match *self {
            BoardStrategy::Exhaustive { needed } => needed,
            BoardStrategy::Random { .. } => BOARD_SIZE,
        }
    }

    /// Completions produced from a deck of `deck_len` cards.
    pub fn completions(&self, deck_len: usize) -> u64 {
        match *self {
            BoardStrategy::Exhaustive { needed } => binomial(deck_len, needed),
            BoardStrategy::Random { samples } => samples as u64,
        }
    }

    /// One shard's slice of the completions drawn from `deck`.
    pub fn draws<'a, R: Rng>(&self, deck: &'a [Card], shard: Shard, rng: &'a mut R) -> Draws<'a, R> {
        match *self {
            BoardStrategy::Exhaustive { needed } => Draws::Exhaustive(
                deck.iter()
                    .copied()
                    .combinations(needed)
                    .skip(shard.index)
                    .step_by(shard.count),
            ),
            BoardStrategy::Random { samples } => Draws::Random {
                deck,
                rng,
                left: shard.quota(samples),
            },
        }
    }
}

impl fmt::Display for BoardStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BoardStrategy::Exhaustive { needed } => write!(f, "exhaustive ({} to come)", needed),
            BoardStrategy::Random { samples } => write!(f, "random ({} boards)", samples),
        }
    }
}

type Subsets<'a> = StepBy<Skip<Combinations<Copied<Iter<'a, Card>>>>>;

/// Lazy sequence of the cards that complete a board.
pub enum Draws<'a, R> {
    Exhaustive(Subsets<'a>),
    Random {
        deck: &'a [Card],
        rng: &'a mut R,
        left: usize,
    },
}

impl<R: Rng> Iterator for Draws<'_, R> {
    type Item = Vec<Card>;

    fn next(&mut self) -> Option<Vec<Card>> {
        match self {
            Draws::Exhaustive(combos) => combos.next(),
            Draws::Random { deck, rng, left } => {
                if *left == 0 {
                    return None;
                }
                *left -= 1;
                Some(deck.choose_multiple(&mut **rng, BOARD_SIZE).copied().collect())
            }
        }
    }
}

/// Worker `index` of `count`: takes items `index, index + count, ...`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Shard {
    pub index: usize,
    pub count: usize,
}

impl Shard {
    pub fn new(index: usize, count: usize) -> Shard {
        debug_assert!(index < count);
        Shard { index, count }
    }

    pub fn whole() -> Shard {
        Shard { index: 0, count: 1 }
    }

    /// This shard's share of `total` interchangeable items.
    pub fn quota(&self, total: usize) -> usize {
        total / self.count + usize::from(self.index < total % self.count)
    }
}

/// Validated description of a run: who holds what, the known board, the deck
/// left over and how the rest of the board gets filled.
#[derive(Debug, Clone)]
pub struct Enumeration {
    hands: Vec<HolePair>,
    board: Vec<Card>,
    deck: Deck,
    strategy: BoardStrategy,
    unknown: Option<usize>,
}

impl Enumeration {
    pub fn new(hands: &[HolePair], board: &[Card], samples: usize) -> OddsResult<Enumeration> {
        if hands.is_empty() {
            return Err(OddsError::NotEnoughPlayers);
        }
        if samples == 0 {
            return Err(OddsError::InvalidSimulationCount);
        }
        let unknown_count = hands.iter().filter(|h| h.is_unknown()).count();
        if unknown_count > 1 {
            return Err(OddsError::MultipleUnknownHands(unknown_count));
        }
        let strategy = BoardStrategy::select(board.len(), samples)?;

        let mut dealt: Vec<Card> = hands
            .iter()
            .filter_map(HolePair::cards)
            .flat_map(|(a, b)| [a, b])
            .collect();
        dealt.extend_from_slice(board);
        let deck = Deck::remaining(&dealt)?;

        let requested = strategy.needed() + 2 * unknown_count;
        if requested > deck.len() {
            return Err(OddsError::NotEnoughDeck {
                requested,
                available: deck.len(),
            });
        }

        Ok(Enumeration {
            hands: hands.to_vec(),
            board: board.to_vec(),
            deck,
            strategy,
            unknown: hands.iter().position(HolePair::is_unknown),
        })
    }

    pub fn hands(&self) -> &[HolePair] {
        &self.hands
    }

    pub fn board(&self) -> &[Card] {
        &self.board
    }

    pub fn deck(&self) -> &Deck {
        &self.deck
    }

    pub fn strategy(&self) -> BoardStrategy {
        self.strategy
    }

    /// Seat of the unknown hand, if there is one.
    pub fn unknown_seat(&self) -> Option<usize> {
        self.unknown
    }

    pub fn num_players(&self) -> usize {
        self.hands.len()
    }

    /// One shard's slice of every pair the unknown hand could be.
    pub fn opponent_pairs(&self, shard: Shard) -> impl Iterator<Item = (Card, Card)> + '_ {
        self.deck
            .cards
            .iter()
            .copied()
            .tuple_combinations()
            .skip(shard.index)
            .step_by(shard.count)
    }

    /// Concrete pairs for every seat, `candidate` standing in for the unknown
    /// hand. `None` if a seat is still unknown.
    pub fn seat(&self, candidate: Option<(Card, Card)>) -> Option<Vec<(Card, Card)>> {
        self.hands
            .iter()
            .map(|hand| hand.cards().or(candidate))
            .collect()
    }

    /// Exact number of trials a full run evaluates.
    pub fn trial_count(&self) -> u64 {
        let deck_len = self.deck.len();
        match self.unknown {
            Some(_) => binomial(deck_len, 2) * self.strategy.completions(deck_len - 2),
            None => self.strategy.completions(deck_len),
        }
    }
}

/// The known board plus `drawn`, as exactly five cards.
pub fn complete_board(given: &[Card], drawn: &[Card]) -> OddsResult<[Card; BOARD_SIZE]> {
    given
        .iter()
        .chain(drawn)
        .copied()
        .collect::<Vec<Card>>()
        .try_into()
        .map_err(|cards: Vec<Card>| {
            OddsError::InternalInvariantViolation(format!("board completed to {} cards", cards.len()))
        })
}

pub fn binomial(n: usize, k: usize) -> u64 {
    if k > n {
        return 0;
    }
    let k = k.min(n - k);
    (0..k).fold(1u64, |acc, i| acc * (n - i) as u64 / (i + 1) as u64)
}
