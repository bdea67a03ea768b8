use std::fmt;

use serde::Serialize;

use crate::cards::{Card, HolePair};
use crate::error::{OddsError, OddsResult};
use crate::hand_evaluator::HandCategory;
use crate::simulation::{CategoryCounts, Tally};

/// Percentages are kept in hundredths of a percent so the three outcomes
/// always add up to exactly 100.
const SCALE: u64 = 10_000;

fn hundredths(count: u64, total: u64) -> u64 {
    (count * SCALE + total / 2) / total
}

fn percent(hundredths: u64) -> f64 {
    hundredths as f64 / 100.0
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Equity {
    pub win: f64,
    pub lose: f64,
    pub tie: f64,
}

impl Equity {
    fn from_counts(wins: u64, ties: u64, total: u64) -> Self {
        let win = hundredths(wins, total);
        let tie = hundredths(ties, total).min(SCALE - win);
        Equity {
            win: percent(win),
            lose: percent(SCALE - win - tie),
            tie: percent(tie),
        }
    }

    /// Pot share: wins plus half the ties.
    pub fn equity(&self) -> f64 {
        self.win + self.tie / 2.0
    }
}

impl fmt::Display for Equity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Win {:.2}% | Tie {:.2}% | Lose {:.2}%",
            self.win, self.tie, self.lose,
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CategoryOdds {
    pub category: HandCategory,
    pub probability: f64,
}

/// All nine categories, most likely first. Equal probabilities list the
/// stronger category first.
pub fn rank_categories(counts: &CategoryCounts, total: u64) -> Vec<CategoryOdds> {
    let mut ranked: Vec<(HandCategory, u64)> = counts.iter().collect();
    ranked.sort_by(|a, b| b.1.cmp(&a.1).then(b.0.cmp(&a.0)));
    ranked
        .into_iter()
        .map(|(category, count)| CategoryOdds {
            category,
            probability: percent(hundredths(count, total)),
        })
        .collect()
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlayerOdds {
    pub hand: String,
    pub odds: Equity,
    pub hand_odds: Vec<CategoryOdds>,
}

/// Final, immutable summary of a run.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OddsReport {
    pub players: Vec<PlayerOdds>,
    pub board: Vec<Card>,
    pub trials: u64,
}

/// The first player's view against the second, the shape the heads-up
/// calculator has always reported.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HeadsUp<'a> {
    pub game_odds: Equity,
    pub player: &'a [CategoryOdds],
    pub opponent: &'a [CategoryOdds],
}

impl OddsReport {
    pub fn from_tally(hands: &[HolePair], board: &[Card], tally: &Tally) -> OddsResult<Self> {
        let total = tally.trials();
        if total == 0 {
            return Err(OddsError::EmptySimulation);
        }

        let players = hands
            .iter()
            .enumerate()
            .map(|(seat, hand)| PlayerOdds {
                hand: hand.to_string(),
                odds: Equity::from_counts(tally.wins(seat), tally.ties(), total),
                hand_odds: rank_categories(tally.categories(seat), total),
            })
            .collect();

        Ok(OddsReport {
            players,
            board: board.to_vec(),
            trials: total,
        })
    }

    pub fn heads_up(&self) -> Option<HeadsUp<'_>> {
        match self.players.as_slice() {
            [player, opponent, ..] => Some(HeadsUp {
                game_odds: player.odds,
                player: &player.hand_odds,
                opponent: &opponent.hand_odds,
            }),
            _ => None,
        }
    }

    pub fn to_json(&self) -> OddsResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
