use std::cmp::Ordering;

use holdem_odds::cards::*;
use holdem_odds::hand_evaluator::*;

fn c(notation: &str) -> Card {
    parse_card(notation).unwrap()
}

fn board5(notation: &str) -> [Card; 5] {
    parse_board(notation).unwrap().try_into().unwrap()
}

#[test]
fn test_royal_flush_is_top_straight_flush() {
    let hole = vec![c("As"), c("Ks")];
    let board = parse_board("QsTsJs2h3d").unwrap();
    let result = evaluate_hand(&hole, &board).unwrap();
    assert_eq!(result.category, HandCategory::StraightFlush);
    assert_eq!(result.kickers(), &[14]);
}

#[test]
fn test_straight_flush() {
    let hole = vec![c("9h"), c("8h")];
    let board = parse_board("7h6h5hAcKd").unwrap();
    let result = evaluate_hand(&hole, &board).unwrap();
    assert_eq!(result.category, HandCategory::StraightFlush);
    assert_eq!(result.kickers(), &[9]);
}

#[test]
fn test_steel_wheel() {
    let hole = vec![c("Ad"), c("2d")];
    let board = parse_board("3d4d5dKcKh").unwrap();
    let result = evaluate_hand(&hole, &board).unwrap();
    assert_eq!(result.category, HandCategory::StraightFlush);
    assert_eq!(result.kickers(), &[5]);
}

#[test]
fn test_four_of_a_kind() {
    let hole = vec![c("Ks"), c("Kh")];
    let board = parse_board("KdKc5s2h3d").unwrap();
    let result = evaluate_hand(&hole, &board).unwrap();
    assert_eq!(result.category, HandCategory::FourOfAKind);
    assert_eq!(result.kickers(), &[13, 5]);
}

#[test]
fn test_full_house() {
    let hole = vec![c("As"), c("Ah")];
    let board = parse_board("AdKsKh2c3d").unwrap();
    let result = evaluate_hand(&hole, &board).unwrap();
    assert_eq!(result.category, HandCategory::FullHouse);
    assert_eq!(result.kickers(), &[14, 13]);
}

#[test]
fn test_two_trips_make_full_house() {
    let hole = vec![c("9s"), c("9h")];
    let board = parse_board("9d4s4h4c2d").unwrap();
    let result = evaluate_hand(&hole, &board).unwrap();
    assert_eq!(result.category, HandCategory::FullHouse);
    assert_eq!(result.kickers(), &[9, 4]);
}

#[test]
fn test_flush_uses_top_five_suited() {
    let hole = vec![c("As"), c("Ts")];
    let board = parse_board("8s5s2s3sQh").unwrap();
    let result = evaluate_hand(&hole, &board).unwrap();
    assert_eq!(result.category, HandCategory::Flush);
    assert_eq!(result.kickers(), &[14, 10, 8, 5, 3]);
}

#[test]
fn test_straight() {
    let hole = vec![c("9s"), c("8h")];
    let board = parse_board("7d6c5sAhKd").unwrap();
    let result = evaluate_hand(&hole, &board).unwrap();
    assert_eq!(result.category, HandCategory::Straight);
    assert_eq!(result.kickers(), &[9]);
}

#[test]
fn test_wheel() {
    let hole = vec![c("As"), c("2h")];
    let board = parse_board("3d4c5sKhQd").unwrap();
    let result = evaluate_hand(&hole, &board).unwrap();
    assert_eq!(result.category, HandCategory::Straight);
    assert_eq!(result.kickers(), &[5]);
}

#[test]
fn test_six_high_beats_wheel() {
    let board = parse_board("3d4c5sKhQd").unwrap();
    assert_eq!(
        compare_hands(&[c("6s"), c("2h")], &[c("As"), c("2d")], &board).unwrap(),
        Ordering::Greater
    );
}

#[test]
fn test_three_of_a_kind() {
    let hole = vec![c("Qs"), c("Qh")];
    let board = parse_board("Qd7s3h2cKd").unwrap();
    let result = evaluate_hand(&hole, &board).unwrap();
    assert_eq!(result.category, HandCategory::ThreeOfAKind);
    assert_eq!(result.kickers(), &[12, 13, 7]);
}

#[test]
fn test_two_pair() {
    let hole = vec![c("As"), c("Kh")];
    let board = parse_board("AdKs5c2h3d").unwrap();
    let result = evaluate_hand(&hole, &board).unwrap();
    assert_eq!(result.category, HandCategory::TwoPair);
    assert_eq!(result.kickers(), &[14, 13, 5]);
}

#[test]
fn test_three_pairs_keep_best_two() {
    let hole = vec![c("6s"), c("6h")];
    let board = parse_board("AdAs5c5h2d").unwrap();
    let result = evaluate_hand(&hole, &board).unwrap();
    assert_eq!(result.category, HandCategory::TwoPair);
    assert_eq!(result.kickers(), &[14, 6, 5]);
}

#[test]
fn test_one_pair() {
    let hole = vec![c("As"), c("Ah")];
    let board = parse_board("Kd7s3c2h5d").unwrap();
    let result = evaluate_hand(&hole, &board).unwrap();
    assert_eq!(result.category, HandCategory::OnePair);
    assert_eq!(result.kickers(), &[14, 13, 7, 5]);
}

#[test]
fn test_high_card() {
    let hole = vec![c("As"), c("Kh")];
    let board = parse_board("Qd9s3c2h5d").unwrap();
    let result = evaluate_hand(&hole, &board).unwrap();
    assert_eq!(result.category, HandCategory::HighCard);
    assert_eq!(result.kickers(), &[14, 13, 12, 9, 5]);
}

#[test]
fn test_five_and_six_cards() {
    let five = evaluate_cards(&parse_board("As Ah Kd 7s 3c").unwrap()).unwrap();
    assert_eq!(five.category, HandCategory::OnePair);
    let six = evaluate_cards(&parse_board("As Ah Kd 7s 3c 7d").unwrap()).unwrap();
    assert_eq!(six.category, HandCategory::TwoPair);
}

#[test]
fn test_card_count_limits() {
    assert!(evaluate_hand(&[c("As"), c("Kh")], &[c("Qd")]).is_err());
    let eight = parse_board("As Ah Kd 7s 3c 7d 2c 4h").unwrap();
    assert!(evaluate_cards(&eight).is_err());
}

#[test]
fn test_duplicate_cards_rejected() {
    assert!(evaluate_hand(&[c("As"), c("As")], &parse_board("Kd7s3c").unwrap()).is_err());
}

#[test]
fn test_board_summary_matches_direct_evaluation() {
    let board = board5("7h 6h 5h Ac Kd");
    let summary = BoardSummary::new(&board);
    for hole in [(c("9h"), c("8h")), (c("As"), c("Ad")), (c("2h"), c("3c"))] {
        assert_eq!(
            summary.evaluate(hole),
            evaluate_hand(&[hole.0, hole.1], &board).unwrap()
        );
    }
}

#[test]
fn test_board_summary_histograms() {
    let summary = BoardSummary::new(&board5("7h 6h 5h 7c Kd"));
    assert_eq!(summary.histogram().rank_count(Rank::Seven), 2);
    assert_eq!(summary.histogram().suit_count(Suit::Hearts), 3);
    assert_eq!(summary.max_suit(), Some(Suit::Hearts));

    let rainbow = BoardSummary::new(&board5("7h 6s 5d 7c Kd"));
    assert_eq!(rainbow.max_suit(), None);
}

#[test]
fn test_evaluation_is_idempotent() {
    let board = board5("Js 3c Qs 9d 9s");
    let summary = BoardSummary::new(&board);
    let hole = (c("As"), c("Ks"));
    let first = summary.evaluate(hole);
    for _ in 0..10 {
        assert_eq!(summary.evaluate(hole), first);
        assert_eq!(BoardSummary::new(&board).evaluate(hole), first);
    }
}

#[test]
fn test_category_order_on_shared_board() {
    // One board, a ladder of hands from high card up to a straight flush.
    let board = board5("9h Th Jh 2c 2d");
    let summary = BoardSummary::new(&board);
    let ladder = [
        ((c("3s"), c("5c")), HandCategory::OnePair),
        ((c("9s"), c("3c")), HandCategory::TwoPair),
        ((c("2s"), c("5c")), HandCategory::ThreeOfAKind),
        ((c("Qs"), c("Kc")), HandCategory::Straight),
        ((c("3h"), c("5h")), HandCategory::Flush),
        ((c("2s"), c("9s")), HandCategory::FullHouse),
        ((c("2s"), c("2h")), HandCategory::FourOfAKind),
        ((c("Qh"), c("Kh")), HandCategory::StraightFlush),
    ];
    let strengths: Vec<HandStrength> = ladder.iter().map(|(hole, _)| summary.evaluate(*hole)).collect();
    for ((_, expected), strength) in ladder.iter().zip(&strengths) {
        assert_eq!(strength.category, *expected);
    }
    for pair in strengths.windows(2) {
        assert!(pair[0] < pair[1], "{:?} should lose to {:?}", pair[0], pair[1]);
    }
}

#[test]
fn test_kicker_decides() {
    let board = parse_board("As5d8cTh3d").unwrap();
    assert_eq!(
        compare_hands(&[c("Ad"), c("Kh")], &[c("Ah"), c("Qd")], &board).unwrap(),
        Ordering::Greater
    );
}

#[test]
fn test_board_plays_for_both() {
    let board = parse_board("AsKdQhJsTs").unwrap();
    assert_eq!(
        compare_hands(&[c("2h"), c("3d")], &[c("4h"), c("5d")], &board).unwrap(),
        Ordering::Equal
    );
}

#[test]
fn test_strength_ordering() {
    let high = HandStrength::new(HandCategory::HighCard, &[14, 13, 12, 11, 9]);
    let pair = HandStrength::new(HandCategory::OnePair, &[2, 5, 4, 3]);
    assert!(pair > high);
    let better = HandStrength::new(HandCategory::OnePair, &[14, 13, 12, 11]);
    let worse = HandStrength::new(HandCategory::OnePair, &[14, 13, 12, 10]);
    assert!(better > worse);
}

#[test]
fn test_category_display() {
    assert_eq!(HandCategory::StraightFlush.to_string(), "Straight Flush");
    assert_eq!(HandCategory::ThreeOfAKind.to_string(), "Three of a Kind");
    assert_eq!(ALL_CATEGORIES.len(), 9);
}
