use std::cmp::Ordering;
use std::num::NonZeroUsize;
use std::ops::{AddAssign, Index, IndexMut};
use std::time::Instant;

use itertools::Itertools;
use rand::rngs::StdRng;
use rand::SeedableRng;
use rayon::prelude::*;
use rayon::ThreadPoolBuilder;
use serde::Serialize;

use crate::cards::{Card, HolePair};
use crate::enumeration::{complete_board, Enumeration, Shard, BOARD_SIZE};
use crate::error::{OddsError, OddsResult};
use crate::hand_evaluator::{BoardSummary, HandCategory, HandStrength, ALL_CATEGORIES};
use crate::report::OddsReport;

/// Boards sampled per run (or per candidate opponent hand) when the board is
/// empty.
pub const DEFAULT_SIMULATIONS: usize = 200;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SimulationConfig {
    pub simulations: usize,
    pub workers: usize,
    /// Fixes the random boards; worker `i` draws from `seed + i`.
    pub seed: Option<u64>,
}

impl SimulationConfig {
    pub fn new(simulations: usize, workers: usize) -> Self {
        SimulationConfig {
            simulations,
            workers,
            seed: None,
        }
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn validate(&self) -> OddsResult<()> {
        if self.simulations == 0 {
            return Err(OddsError::InvalidSimulationCount);
        }
        if self.workers == 0 {
            return Err(OddsError::InvalidWorkerCount);
        }
        Ok(())
    }
}

impl Default for SimulationConfig {
    fn default() -> Self {
        SimulationConfig::new(DEFAULT_SIMULATIONS, default_workers())
    }
}

pub fn default_workers() -> usize {
    std::thread::available_parallelism()
        .map(NonZeroUsize::get)
        .unwrap_or(1)
}

/// How often each hand category came up for one player.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct CategoryCounts([u64; 9]);

impl CategoryCounts {
    pub fn total(&self) -> u64 {
        self.0.iter().sum()
    }

    pub fn iter(&self) -> impl Iterator<Item = (HandCategory, u64)> + '_ {
        ALL_CATEGORIES.iter().map(move |&c| (c, self[c]))
    }
}

impl Index<HandCategory> for CategoryCounts {
    type Output = u64;

    fn index(&self, category: HandCategory) -> &u64 {
        &self.0[category.index()]
    }
}

impl IndexMut<HandCategory> for CategoryCounts {
    fn index_mut(&mut self, category: HandCategory) -> &mut u64 {
        &mut self.0[category.index()]
    }
}

impl AddAssign for CategoryCounts {
    fn add_assign(&mut self, rhs: Self) {
        for (a, b) in self.0.iter_mut().zip(rhs.0) {
            *a += b;
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Showdown {
    Winner(usize),
    Tie,
}

/// Outcome of one trial: a unique best key wins, an exact tie at the top
/// is a tie. `None` with no players.
pub fn showdown<I>(strengths: I) -> Option<Showdown>
where
    I: IntoIterator<Item = HandStrength>,
{
    let mut best: Option<(HandStrength, usize)> = None;
    let mut tied = false;
    for (seat, strength) in strengths.into_iter().enumerate() {
        match best {
            None => best = Some((strength, seat)),
            Some((top, _)) => match strength.cmp(&top) {
                Ordering::Greater => {
                    best = Some((strength, seat));
                    tied = false;
                }
                Ordering::Equal => tied = true,
                Ordering::Less => {}
            },
        }
    }
    best.map(|(_, seat)| if tied { Showdown::Tie } else { Showdown::Winner(seat) })
}

/// Counters owned by a single worker for the whole run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tally {
    wins: Vec<u64>,
    ties: u64,
    categories: Vec<CategoryCounts>,
    trials: u64,
}

impl Tally {
    pub fn new(num_players: usize) -> Self {
        Tally {
            wins: vec![0; num_players],
            ties: 0,
            categories: vec![CategoryCounts::default(); num_players],
            trials: 0,
        }
    }

    pub fn num_players(&self) -> usize {
        self.wins.len()
    }

    pub fn wins(&self, seat: usize) -> u64 {
        self.wins[seat]
    }

    pub fn ties(&self) -> u64 {
        self.ties
    }

    pub fn categories(&self, seat: usize) -> &CategoryCounts {
        &self.categories[seat]
    }

    pub fn trials(&self) -> u64 {
        self.trials
    }

    fn record(&mut self, outcome: Showdown) {
        match outcome {
            Showdown::Winner(seat) => self.wins[seat] += 1,
            Showdown::Tie => self.ties += 1,
        }
        self.trials += 1;
    }
}

impl AddAssign for Tally {
    fn add_assign(&mut self, rhs: Self) {
        for (a, b) in self.wins.iter_mut().zip(rhs.wins) {
            *a += b;
        }
        for (a, b) in self.categories.iter_mut().zip(rhs.categories) {
            *a += b;
        }
        self.ties += rhs.ties;
        self.trials += rhs.trials;
    }
}

/// One complete deal: five board cards and every player's pocket.
#[derive(Debug, Clone, Copy)]
pub struct Trial<'a> {
    board: [Card; BOARD_SIZE],
    hands: &'a [(Card, Card)],
}

impl<'a> Trial<'a> {
    pub fn new(board: [Card; BOARD_SIZE], hands: &'a [(Card, Card)]) -> OddsResult<Self> {
        let mut seen = 0u64;
        for card in board.iter().chain(hands.iter().flat_map(|(a, b)| [a, b])) {
            if seen & card.bit() != 0 {
                return Err(OddsError::InternalInvariantViolation(format!(
                    "{} dealt twice",
                    card
                )));
            }
            seen |= card.bit();
        }
        Ok(Trial { board, hands })
    }

    pub fn board(&self) -> &[Card; BOARD_SIZE] {
        &self.board
    }

    /// Evaluates every hand against the shared board summary and books the
    /// result into `tally`.
    pub fn play(&self, tally: &mut Tally) {
        let summary = BoardSummary::new(&self.board);
        let categories = &mut tally.categories;
        let outcome = showdown(self.hands.iter().enumerate().map(|(seat, &hole)| {
            let strength = summary.evaluate(hole);
            categories[seat][strength.category] += 1;
            strength
        }));
        if let Some(outcome) = outcome {
            tally.record(outcome);
        }
    }
}

fn worker_rng(seed: Option<u64>, index: usize) -> StdRng {
    match seed {
        Some(seed) => StdRng::seed_from_u64(seed.wrapping_add(index as u64)),
        None => StdRng::from_entropy(),
    }
}

fn play_draw(given: &[Card], drawn: &[Card], hands: &[(Card, Card)], tally: &mut Tally) -> OddsResult<()> {
    let board = complete_board(given, drawn)?;
    Trial::new(board, hands)?.play(tally);
    Ok(())
}

fn seated(enumeration: &Enumeration, candidate: Option<(Card, Card)>) -> OddsResult<Vec<(Card, Card)>> {
    enumeration.seat(candidate).ok_or_else(|| {
        OddsError::InternalInvariantViolation("a seat has no cards".to_string())
    })
}

/// Runs one worker's shard to completion.
fn run_worker(enumeration: &Enumeration, config: &SimulationConfig, shard: Shard) -> OddsResult<Tally> {
    let mut tally = Tally::new(enumeration.num_players());
    let mut rng = worker_rng(config.seed, shard.index);
    let strategy = enumeration.strategy();
    let given = enumeration.board();

    match enumeration.unknown_seat() {
        Some(_) => {
            for candidate in enumeration.opponent_pairs(shard) {
                let hands = seated(enumeration, Some(candidate))?;
                let deck = enumeration.deck().without(candidate);
                for drawn in strategy.draws(&deck.cards, Shard::whole(), &mut rng) {
                    play_draw(given, &drawn, &hands, &mut tally)?;
                }
            }
        }
        None => {
            let hands = seated(enumeration, None)?;
            for drawn in strategy.draws(&enumeration.deck().cards, shard, &mut rng) {
                play_draw(given, &drawn, &hands, &mut tally)?;
            }
        }
    }

    log::debug!("worker {:<3} finished {} trials", shard.index, tally.trials);
    Ok(tally)
}

/// Runs every trial of `enumeration` on a pool of `config.workers` threads
/// and sums the per-worker tallies.
pub fn simulate(enumeration: &Enumeration, config: &SimulationConfig) -> OddsResult<Tally> {
    config.validate()?;
    let expected = enumeration.trial_count();
    log::info!(
        "{} players, board [{}], {}, {} trials on {} workers",
        enumeration.num_players(),
        enumeration.board().iter().join(" "),
        enumeration.strategy(),
        expected,
        config.workers,
    );

    let start = Instant::now();
    let pool = ThreadPoolBuilder::new().num_threads(config.workers).build()?;
    let tallies: Vec<Tally> = pool.install(|| {
        (0..config.workers)
            .into_par_iter()
            .map(|index| run_worker(enumeration, config, Shard::new(index, config.workers)))
            .collect::<OddsResult<Vec<Tally>>>()
    })?;

    let mut total = Tally::new(enumeration.num_players());
    for tally in tallies {
        total += tally;
    }

    if total.trials != expected {
        return Err(OddsError::InternalInvariantViolation(format!(
            "ran {} trials, expected {}",
            total.trials, expected
        )));
    }
    log::info!(
        "finished {} trials in {:.3}s",
        total.trials,
        start.elapsed().as_secs_f64()
    );
    Ok(total)
}

/// Validates the hands and board, runs the simulation and summarizes it.
pub fn calculate_odds(hands: &[HolePair], board: &[Card], config: &SimulationConfig) -> OddsResult<OddsReport> {
    config.validate()?;
    let enumeration = Enumeration::new(hands, board, config.simulations)?;
    let tally = simulate(&enumeration, config)?;
    OddsReport::from_tally(hands, board, &tally)
}
