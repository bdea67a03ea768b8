use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;

use once_cell::sync::Lazy;
use serde::{Serialize, Serializer};

use crate::error::{OddsError, OddsResult};

pub const RANKS_STR: &str = "23456789TJQKA";
pub const SUITS_STR: &str = "shdc";
pub const UNKNOWN_CARD: &str = "?";

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Rank {
    Two = 2,
    Three = 3,
    Four = 4,
    Five = 5,
    Six = 6,
    Seven = 7,
    Eight = 8,
    Nine = 9,
    Ten = 10,
    Jack = 11,
    Queen = 12,
    King = 13,
    Ace = 14,
}

impl Rank {
    pub fn from_char(c: char) -> OddsResult<Rank> {
        match c {
            '2' => Ok(Rank::Two),
            '3' => Ok(Rank::Three),
            '4' => Ok(Rank::Four),
            '5' => Ok(Rank::Five),
            '6' => Ok(Rank::Six),
            '7' => Ok(Rank::Seven),
            '8' => Ok(Rank::Eight),
            '9' => Ok(Rank::Nine),
            'T' => Ok(Rank::Ten),
            'J' => Ok(Rank::Jack),
            'Q' => Ok(Rank::Queen),
            'K' => Ok(Rank::King),
            'A' => Ok(Rank::Ace),
            _ => Err(OddsError::InvalidRank(c)),
        }
    }

    pub fn to_char(self) -> char {
        match self {
            Rank::Two => '2',
            Rank::Three => '3',
            Rank::Four => '4',
            Rank::Five => '5',
            Rank::Six => '6',
            Rank::Seven => '7',
            Rank::Eight => '8',
            Rank::Nine => '9',
            Rank::Ten => 'T',
            Rank::Jack => 'J',
            Rank::Queen => 'Q',
            Rank::King => 'K',
            Rank::Ace => 'A',
        }
    }

    /// Ordinal value, 2 through 14.
    pub fn value(self) -> u8 {
        self as u8
    }

    /// Histogram bucket, 0 (deuce) through 12 (ace).
    pub fn index(self) -> usize {
        self as usize - 2
    }
}

pub const ALL_RANKS: [Rank; 13] = [
    Rank::Two,
    Rank::Three,
    Rank::Four,
    Rank::Five,
    Rank::Six,
    Rank::Seven,
    Rank::Eight,
    Rank::Nine,
    Rank::Ten,
    Rank::Jack,
    Rank::Queen,
    Rank::King,
    Rank::Ace,
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Suit {
    Spades,
    Hearts,
    Diamonds,
    Clubs,
}

impl Suit {
    pub fn from_char(c: char) -> OddsResult<Suit> {
        match c.to_ascii_lowercase() {
            's' => Ok(Suit::Spades),
            'h' => Ok(Suit::Hearts),
            'd' => Ok(Suit::Diamonds),
            'c' => Ok(Suit::Clubs),
            _ => Err(OddsError::InvalidSuit(c)),
        }
    }

    pub fn to_char(self) -> char {
        match self {
            Suit::Spades => 's',
            Suit::Hearts => 'h',
            Suit::Diamonds => 'd',
            Suit::Clubs => 'c',
        }
    }

    pub fn symbol(self) -> &'static str {
        match self {
            Suit::Spades => "\u{2660}",
            Suit::Hearts => "\u{2665}",
            Suit::Diamonds => "\u{2666}",
            Suit::Clubs => "\u{2663}",
        }
    }

    pub fn index(self) -> usize {
        self as usize
    }
}

pub const ALL_SUITS: [Suit; 4] = [Suit::Spades, Suit::Hearts, Suit::Diamonds, Suit::Clubs];

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Card {
    pub rank: Rank,
    pub suit: Suit,
}

impl Card {
    pub fn new(rank: Rank, suit: Suit) -> Card {
        Card { rank, suit }
    }

    pub fn value(&self) -> u8 {
        self.rank.value()
    }

    /// Unique slot in 0..52, used for bitmask bookkeeping.
    pub fn index(&self) -> usize {
        self.rank.index() * 4 + self.suit.index()
    }

    pub fn bit(&self) -> u64 {
        1u64 << self.index()
    }

    pub fn pretty(&self) -> String {
        format!("{}{}", self.rank.to_char(), self.suit.symbol())
    }
}

impl fmt::Display for Card {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.rank.to_char(), self.suit.to_char())
    }
}

impl FromStr for Card {
    type Err = OddsError;

    fn from_str(s: &str) -> OddsResult<Card> {
        parse_card(s)
    }
}

impl Serialize for Card {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

static FULL_DECK: Lazy<Vec<Card>> = Lazy::new(|| {
    ALL_RANKS
        .iter()
        .flat_map(|&r| ALL_SUITS.iter().map(move |&s| Card::new(r, s)))
        .collect()
});

pub fn full_deck() -> &'static [Card] {
    &FULL_DECK
}

/// Bitmask of `cards`, or the first card that appears twice.
pub fn card_mask(cards: &[Card]) -> Result<u64, Card> {
    let mut mask = 0u64;
    for card in cards {
        if mask & card.bit() != 0 {
            return Err(*card);
        }
        mask |= card.bit();
    }
    Ok(mask)
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Deck {
    pub cards: Vec<Card>,
}

impl Deck {
    pub fn full() -> Deck {
        Deck {
            cards: FULL_DECK.clone(),
        }
    }

    /// The 52-card universe minus `excluded`.
    pub fn remaining(excluded: &[Card]) -> OddsResult<Deck> {
        let mut seen = HashSet::with_capacity(excluded.len());
        for &card in excluded {
            if !seen.insert(card) {
                return Err(OddsError::DuplicateCard(card));
            }
        }
        let cards = FULL_DECK
            .iter()
            .copied()
            .filter(|c| !seen.contains(c))
            .collect();
        Ok(Deck { cards })
    }

    /// A copy of this deck with the two cards of `pair` taken out.
    pub fn without(&self, pair: (Card, Card)) -> Deck {
        let cards = self
            .cards
            .iter()
            .copied()
            .filter(|&c| c != pair.0 && c != pair.1)
            .collect();
        Deck { cards }
    }

    pub fn contains(&self, card: &Card) -> bool {
        self.cards.contains(card)
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }
}

/// A player's pocket cards. `Unknown` stands for a hidden hand that gets
/// enumerated over every pair still in the deck.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HolePair {
    Known(Card, Card),
    Unknown,
}

impl HolePair {
    pub fn cards(&self) -> Option<(Card, Card)> {
        match *self {
            HolePair::Known(a, b) => Some((a, b)),
            HolePair::Unknown => None,
        }
    }

    pub fn is_unknown(&self) -> bool {
        matches!(self, HolePair::Unknown)
    }
}

impl fmt::Display for HolePair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HolePair::Known(a, b) => write!(f, "{}{}", a, b),
            HolePair::Unknown => write!(f, "??"),
        }
    }
}

pub fn parse_card(notation: &str) -> OddsResult<Card> {
    let notation = notation.trim();
    let chars: Vec<char> = notation.chars().collect();
    if chars.len() != 2 {
        return Err(OddsError::InvalidCardFormat(notation.to_string()));
    }
    let rank = Rank::from_char(chars[0].to_ascii_uppercase())
        .map_err(|_| OddsError::InvalidCardFormat(notation.to_string()))?;
    let suit = Suit::from_char(chars[1])
        .map_err(|_| OddsError::InvalidCardFormat(notation.to_string()))?;
    Ok(Card::new(rank, suit))
}

/// Parses a run of 2-character codes, with or without separators: "AsKd5c",
/// "As Kd 5c" or "As,Kd,5c".
pub fn parse_board(notation: &str) -> OddsResult<Vec<Card>> {
    let notation = notation.trim().replace([' ', ','], "");
    let chars: Vec<char> = notation.chars().collect();
    if chars.len() % 2 != 0 {
        return Err(OddsError::InvalidCardFormat(notation));
    }
    chars
        .chunks(2)
        .map(|pair| parse_card(&pair.iter().collect::<String>()))
        .collect()
}
