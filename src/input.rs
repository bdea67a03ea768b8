//! Turns raw card tokens into validated hands and a board.
//!
//! Hands are given as a flat list of card codes, two per player, where `?`
//! marks an unknown card. Unknown cards must come in pairs and only one player
//! may be unknown. A token may also hold several cards (`AsKs`, `??`).

use crate::cards::{card_mask, parse_card, Card, HolePair, UNKNOWN_CARD};
use crate::error::{OddsError, OddsResult};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Scenario {
    pub hands: Vec<HolePair>,
    pub board: Vec<Card>,
}

/// Splits run-together tokens (`AsKs`, `Js3cQs`, `??`) into single codes.
fn card_tokens<S: AsRef<str>>(tokens: &[S]) -> Vec<String> {
    tokens
        .iter()
        .flat_map(|t| {
            let chars: Vec<char> = t
                .as_ref()
                .chars()
                .filter(|c| !c.is_whitespace() && *c != ',')
                .collect();
            if chars.iter().all(|&c| c == '?') {
                chars.iter().map(|c| c.to_string()).collect()
            } else if chars.len() > 2 && chars.len() % 2 == 0 {
                chars.chunks(2).map(|p| p.iter().collect::<String>()).collect()
            } else {
                vec![chars.iter().collect::<String>()]
            }
        })
        .collect()
}

fn parse_slot(token: &str) -> OddsResult<Option<Card>> {
    if token == UNKNOWN_CARD {
        Ok(None)
    } else {
        parse_card(token).map(Some)
    }
}

pub fn parse_hands<S: AsRef<str>>(tokens: &[S]) -> OddsResult<Vec<HolePair>> {
    let tokens = card_tokens(tokens);
    if tokens.is_empty() {
        return Err(OddsError::NotEnoughPlayers);
    }
    if tokens.len() % 2 != 0 {
        return Err(OddsError::InvalidHoleCardCount {
            player: tokens.len() / 2,
        });
    }

    let mut hands = Vec::with_capacity(tokens.len() / 2);
    for (player, pair) in tokens.chunks(2).enumerate() {
        let hand = match (parse_slot(&pair[0])?, parse_slot(&pair[1])?) {
            (Some(a), Some(b)) => HolePair::Known(a, b),
            (None, None) => HolePair::Unknown,
            _ => return Err(OddsError::InvalidHoleCardCount { player }),
        };
        hands.push(hand);
    }

    let unknown = hands.iter().filter(|h| h.is_unknown()).count();
    if unknown > 1 {
        return Err(OddsError::MultipleUnknownHands(unknown));
    }
    Ok(hands)
}

pub fn parse_board_tokens<S: AsRef<str>>(tokens: &[S]) -> OddsResult<Vec<Card>> {
    let board = card_tokens(tokens)
        .iter()
        .map(|t| parse_card(t))
        .collect::<OddsResult<Vec<Card>>>()?;
    match board.len() {
        0 | 3 | 4 | 5 => Ok(board),
        n => Err(OddsError::InvalidBoardLength(n)),
    }
}

impl Scenario {
    pub fn parse<H: AsRef<str>, B: AsRef<str>>(hand_tokens: &[H], board_tokens: &[B]) -> OddsResult<Scenario> {
        let hands = parse_hands(hand_tokens)?;
        let board = parse_board_tokens(board_tokens)?;

        let mut dealt: Vec<Card> = hands
            .iter()
            .filter_map(HolePair::cards)
            .flat_map(|(a, b)| [a, b])
            .collect();
        dealt.extend_from_slice(&board);
        card_mask(&dealt).map_err(OddsError::DuplicateCard)?;

        Ok(Scenario { hands, board })
    }
}
