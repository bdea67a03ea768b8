use std::cmp::Ordering;
use std::fmt;

use serde::Serialize;

use crate::cards::{card_mask, Card, Rank, Suit, ALL_SUITS};
use crate::error::{OddsError, OddsResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum HandCategory {
    HighCard = 0,
    OnePair = 1,
    TwoPair = 2,
    ThreeOfAKind = 3,
    Straight = 4,
    Flush = 5,
    FullHouse = 6,
    FourOfAKind = 7,
    StraightFlush = 8,
}

pub const ALL_CATEGORIES: [HandCategory; 9] = [
    HandCategory::HighCard,
    HandCategory::OnePair,
    HandCategory::TwoPair,
    HandCategory::ThreeOfAKind,
    HandCategory::Straight,
    HandCategory::Flush,
    HandCategory::FullHouse,
    HandCategory::FourOfAKind,
    HandCategory::StraightFlush,
];

impl HandCategory {
    pub fn index(self) -> usize {
        self as usize
    }

    /// Number of ranks that make up the tie-break tuple.
    fn key_len(self) -> usize {
        match self {
            HandCategory::StraightFlush | HandCategory::Straight => 1,
            HandCategory::FourOfAKind | HandCategory::FullHouse => 2,
            HandCategory::ThreeOfAKind | HandCategory::TwoPair => 3,
            HandCategory::OnePair => 4,
            HandCategory::Flush | HandCategory::HighCard => 5,
        }
    }
}

impl fmt::Display for HandCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HandCategory::HighCard => write!(f, "High Card"),
            HandCategory::OnePair => write!(f, "One Pair"),
            HandCategory::TwoPair => write!(f, "Two Pair"),
            HandCategory::ThreeOfAKind => write!(f, "Three of a Kind"),
            HandCategory::Straight => write!(f, "Straight"),
            HandCategory::Flush => write!(f, "Flush"),
            HandCategory::FullHouse => write!(f, "Full House"),
            HandCategory::FourOfAKind => write!(f, "Four of a Kind"),
            HandCategory::StraightFlush => write!(f, "Straight Flush"),
        }
    }
}

/// Strength key of the best five cards: category first, then the tie-break
/// ranks. Unused tie-break slots stay zero so the derived ordering is a plain
/// lexicographic comparison.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct HandStrength {
    pub category: HandCategory,
    ranks: [u8; 5],
}

impl HandStrength {
    pub fn new(category: HandCategory, kickers: &[u8]) -> Self {
        let mut ranks = [0u8; 5];
        let n = kickers.len().min(category.key_len());
        ranks[..n].copy_from_slice(&kickers[..n]);
        HandStrength { category, ranks }
    }

    pub fn kickers(&self) -> &[u8] {
        &self.ranks[..self.category.key_len()]
    }
}

impl fmt::Display for HandStrength {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.category)
    }
}

const WHEEL: u16 = 0b1_0000_0000_1111;
const RUN: u16 = 0b1_1111;

/// Top card of the highest five-rank run in `mask`, ace-low wheel last.
fn straight_high(mask: u16) -> Option<u8> {
    for top in (4..13).rev() {
        let run = RUN << (top - 4);
        if mask & run == run {
            return Some(top as u8 + 2);
        }
    }
    if mask & WHEEL == WHEEL {
        return Some(5);
    }
    None
}

struct KeyBuilder {
    ranks: [u8; 5],
    len: usize,
}

impl KeyBuilder {
    fn new() -> Self {
        KeyBuilder {
            ranks: [0; 5],
            len: 0,
        }
    }

    fn push(mut self, value: u8) -> Self {
        self.ranks[self.len] = value;
        self.len += 1;
        self
    }

    /// Appends the `n` highest ranks set in `mask`.
    fn push_top(mut self, mask: u16, n: usize) -> Self {
        let mut taken = 0;
        for i in (0..13).rev() {
            if taken == n {
                break;
            }
            if mask & (1 << i) != 0 {
                self = self.push(i as u8 + 2);
                taken += 1;
            }
        }
        self
    }

    fn finish(self, category: HandCategory) -> HandStrength {
        HandStrength::new(category, &self.ranks[..self.len])
    }
}

/// Rank and suit counts over a set of cards.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Histogram {
    ranks: [u8; 13],
    suits: [u8; 4],
    suited: [u16; 4],
    present: u16,
}

impl Histogram {
    pub fn from_cards(cards: &[Card]) -> Self {
        let mut histogram = Histogram::default();
        for &card in cards {
            histogram.add(card);
        }
        histogram
    }

    pub fn add(&mut self, card: Card) {
        let r = card.rank.index();
        let s = card.suit.index();
        self.ranks[r] += 1;
        self.suits[s] += 1;
        self.suited[s] |= 1 << r;
        self.present |= 1 << r;
    }

    pub fn rank_count(&self, rank: Rank) -> u8 {
        self.ranks[rank.index()]
    }

    pub fn suit_count(&self, suit: Suit) -> u8 {
        self.suits[suit.index()]
    }

    /// Highest rank index held at least `n` times, skipping `skip`.
    fn highest_of(&self, n: u8, skip: Option<usize>) -> Option<usize> {
        (0..13)
            .rev()
            .find(|&i| self.ranks[i] >= n && Some(i) != skip)
    }

    /// Detects categories strongest first, stopping at the first one that
    /// holds. Only `flush_suit` is checked for flushes.
    fn classify(&self, flush_suit: Option<usize>) -> HandStrength {
        let flush = flush_suit
            .filter(|&s| self.suits[s] >= 5)
            .map(|s| self.suited[s]);

        if let Some(high) = flush.and_then(straight_high) {
            return KeyBuilder::new().push(high).finish(HandCategory::StraightFlush);
        }

        if let Some(quad) = self.highest_of(4, None) {
            return KeyBuilder::new()
                .push(quad as u8 + 2)
                .push_top(self.present & !(1 << quad), 1)
                .finish(HandCategory::FourOfAKind);
        }

        let trips = self.highest_of(3, None);
        if let Some(t) = trips {
            if let Some(p) = self.highest_of(2, Some(t)) {
                return KeyBuilder::new()
                    .push(t as u8 + 2)
                    .push(p as u8 + 2)
                    .finish(HandCategory::FullHouse);
            }
        }

        if let Some(mask) = flush {
            return KeyBuilder::new().push_top(mask, 5).finish(HandCategory::Flush);
        }

        if let Some(high) = straight_high(self.present) {
            return KeyBuilder::new().push(high).finish(HandCategory::Straight);
        }

        if let Some(t) = trips {
            return KeyBuilder::new()
                .push(t as u8 + 2)
                .push_top(self.present & !(1 << t), 2)
                .finish(HandCategory::ThreeOfAKind);
        }

        if let Some(high) = self.highest_of(2, None) {
            if let Some(low) = self.highest_of(2, Some(high)) {
                return KeyBuilder::new()
                    .push(high as u8 + 2)
                    .push(low as u8 + 2)
                    .push_top(self.present & !(1 << high) & !(1 << low), 1)
                    .finish(HandCategory::TwoPair);
            }
            return KeyBuilder::new()
                .push(high as u8 + 2)
                .push_top(self.present & !(1 << high), 3)
                .finish(HandCategory::OnePair);
        }

        KeyBuilder::new().push_top(self.present, 5).finish(HandCategory::HighCard)
    }
}

/// Per-board precomputation shared by every player in a trial.
#[derive(Debug, Clone, Copy)]
pub struct BoardSummary {
    histogram: Histogram,
    max_suit: Option<Suit>,
}

impl BoardSummary {
    pub fn new(board: &[Card; 5]) -> Self {
        let histogram = Histogram::from_cards(board);
        // With two hole cards to come, a flush needs three of a suit here.
        let max_suit = ALL_SUITS
            .iter()
            .copied()
            .max_by_key(|s| histogram.suit_count(*s))
            .filter(|s| histogram.suit_count(*s) >= 3);
        BoardSummary {
            histogram,
            max_suit,
        }
    }

    pub fn histogram(&self) -> &Histogram {
        &self.histogram
    }

    /// The only suit a flush can come in, if any.
    pub fn max_suit(&self) -> Option<Suit> {
        self.max_suit
    }

    pub fn evaluate(&self, hole: (Card, Card)) -> HandStrength {
        let mut seven = self.histogram;
        seven.add(hole.0);
        seven.add(hole.1);
        seven.classify(self.max_suit.map(Suit::index))
    }
}

/// Best five-card strength of 5 to 7 distinct cards.
pub fn evaluate_cards(cards: &[Card]) -> OddsResult<HandStrength> {
    if cards.len() < 5 {
        return Err(OddsError::NotEnoughCards {
            need: 5,
            got: cards.len(),
        });
    }
    if cards.len() > 7 {
        return Err(OddsError::TooManyCards {
            max: 7,
            got: cards.len(),
        });
    }
    card_mask(cards).map_err(OddsError::DuplicateCard)?;

    let histogram = Histogram::from_cards(cards);
    let flush_suit = (0..4).find(|&s| histogram.suits[s] >= 5);
    Ok(histogram.classify(flush_suit))
}

pub fn evaluate_hand(hole_cards: &[Card], board: &[Card]) -> OddsResult<HandStrength> {
    let mut all_cards: Vec<Card> = Vec::with_capacity(hole_cards.len() + board.len());
    all_cards.extend_from_slice(hole_cards);
    all_cards.extend_from_slice(board);
    evaluate_cards(&all_cards)
}

pub fn compare_hands(hand1: &[Card], hand2: &[Card], board: &[Card]) -> OddsResult<Ordering> {
    let r1 = evaluate_hand(hand1, board)?;
    let r2 = evaluate_hand(hand2, board)?;
    Ok(r1.cmp(&r2))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::full_deck;
    use itertools::Itertools;
    use rand::rngs::StdRng;
    use rand::seq::SliceRandom;
    use rand::SeedableRng;

    /// Straightforward scoring of exactly five cards.
    fn score_five(cards: &[Card]) -> HandStrength {
        let mut values: Vec<u8> = cards.iter().map(|c| c.value()).collect();
        values.sort_unstable_by(|a, b| b.cmp(a));
        let flush = cards.windows(2).all(|w| w[0].suit == w[1].suit);
        let unique: Vec<u8> = values.iter().copied().dedup().collect();
        let straight = if unique.len() == 5 && unique[0] - unique[4] == 4 {
            Some(unique[0])
        } else if unique == [14, 5, 4, 3, 2] {
            Some(5)
        } else {
            None
        };

        let mut groups: Vec<(usize, u8)> = values
            .iter()
            .copied()
            .dedup_with_count()
            .collect();
        groups.sort_by(|a, b| b.0.cmp(&a.0).then(b.1.cmp(&a.1)));
        let by_group: Vec<u8> = groups.iter().map(|g| g.1).collect();

        match (flush, straight, groups[0].0, groups.get(1).map(|g| g.0)) {
            (true, Some(high), _, _) => HandStrength::new(HandCategory::StraightFlush, &[high]),
            (_, _, 4, _) => HandStrength::new(HandCategory::FourOfAKind, &by_group),
            (_, _, 3, Some(2)) => HandStrength::new(HandCategory::FullHouse, &by_group),
            (true, None, _, _) => HandStrength::new(HandCategory::Flush, &values),
            (false, Some(high), _, _) => HandStrength::new(HandCategory::Straight, &[high]),
            (_, _, 3, _) => HandStrength::new(HandCategory::ThreeOfAKind, &by_group),
            (_, _, 2, Some(2)) => HandStrength::new(HandCategory::TwoPair, &by_group),
            (_, _, 2, _) => HandStrength::new(HandCategory::OnePair, &by_group),
            _ => HandStrength::new(HandCategory::HighCard, &values),
        }
    }

    fn best_of(cards: &[Card]) -> HandStrength {
        cards
            .iter()
            .copied()
            .combinations(5)
            .map(|five| score_five(&five))
            .max()
            .unwrap()
    }

    #[test]
    fn test_histogram_matches_best_of_21() {
        let mut rng = StdRng::seed_from_u64(7);
        let mut deck = full_deck().to_vec();
        for _ in 0..5000 {
            deck.shuffle(&mut rng);
            let board: [Card; 5] = [deck[0], deck[1], deck[2], deck[3], deck[4]];
            let hole = (deck[5], deck[6]);
            let fast = BoardSummary::new(&board).evaluate(hole);
            assert_eq!(fast, best_of(&deck[..7]), "cards: {:?}", &deck[..7]);
        }
    }

    #[test]
    fn test_six_cards_match_best_of_6() {
        let mut rng = StdRng::seed_from_u64(11);
        let mut deck = full_deck().to_vec();
        for _ in 0..1000 {
            deck.shuffle(&mut rng);
            assert_eq!(evaluate_cards(&deck[..6]).unwrap(), best_of(&deck[..6]));
        }
    }

    #[test]
    fn test_straight_high() {
        assert_eq!(straight_high(0b1_1111_0000_0000), Some(14));
        assert_eq!(straight_high(WHEEL), Some(5));
        assert_eq!(straight_high(WHEEL | 0b10000), Some(6));
        assert_eq!(straight_high(0b1_0101_0101_0101), None);
    }
}
