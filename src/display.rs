use colored::Colorize;
use comfy_table::{Cell, CellAlignment, ContentArrangement, Table};

use crate::cards::{Card, Suit};
use crate::report::{CategoryOdds, OddsReport, PlayerOdds};

/// Horizontal bar for a percentage in 0..=100.
pub fn equity_bar(pct: f64, width: usize) -> String {
    let filled = ((pct / 100.0) * width as f64).round().clamp(0.0, width as f64) as usize;
    let bar: String = "\u{2588}".repeat(filled) + &"\u{2591}".repeat(width - filled);
    let label = format!("{:.2}%", pct);

    if pct >= 60.0 {
        format!("{} {}", bar.green(), label)
    } else if pct >= 40.0 {
        format!("{} {}", bar.yellow(), label)
    } else {
        format!("{} {}", bar.red(), label)
    }
}

pub fn board_display(cards: &[Card]) -> String {
    if cards.is_empty() {
        return "(none)".dimmed().to_string();
    }
    cards
        .iter()
        .map(|card| {
            let text = card.pretty();
            match card.suit {
                Suit::Spades => text.white().to_string(),
                Suit::Hearts => text.red().to_string(),
                Suit::Diamonds => text.blue().to_string(),
                Suit::Clubs => text.green().to_string(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

pub fn outcome_table(players: &[PlayerOdds]) -> String {
    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec![
        Cell::new("Hand"),
        Cell::new("Win").set_alignment(CellAlignment::Right),
        Cell::new("Tie").set_alignment(CellAlignment::Right),
        Cell::new("Lose").set_alignment(CellAlignment::Right),
        Cell::new("Equity").set_alignment(CellAlignment::Right),
    ]);

    for player in players {
        table.add_row(vec![
            Cell::new(player.hand.bold().to_string()),
            Cell::new(format!("{:.2}%", player.odds.win)).set_alignment(CellAlignment::Right),
            Cell::new(format!("{:.2}%", player.odds.tie)).set_alignment(CellAlignment::Right),
            Cell::new(format!("{:.2}%", player.odds.lose)).set_alignment(CellAlignment::Right),
            Cell::new(format!("{:.2}%", player.odds.equity()).bold().to_string())
                .set_alignment(CellAlignment::Right),
        ]);
    }

    table.to_string()
}

pub fn category_table(hand: &str, hand_odds: &[CategoryOdds]) -> String {
    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec![
        Cell::new(hand.bold().to_string()),
        Cell::new("Probability").set_alignment(CellAlignment::Right),
    ]);

    for entry in hand_odds {
        let pct = format!("{:.2}%", entry.probability);
        let pct = if entry.probability > 0.0 {
            pct
        } else {
            pct.dimmed().to_string()
        };
        table.add_row(vec![
            Cell::new(entry.category.to_string()),
            Cell::new(pct).set_alignment(CellAlignment::Right),
        ]);
    }

    table.to_string()
}

pub fn print_report(report: &OddsReport) {
    println!();
    println!("  {} {}", "Board:".bold(), board_display(&report.board));
    println!("  {} {}", "Trials:".bold(), report.trials);
    println!();

    for player in &report.players {
        println!("  {:<6} {}", player.hand, equity_bar(player.odds.equity(), 30));
    }
    println!();
    println!("{}", outcome_table(&report.players));

    for player in &report.players {
        println!();
        println!("{}", category_table(&player.hand, &player.hand_odds));
    }
    println!();
}

pub fn print_error(msg: &str) {
    eprintln!("{} {}", "Error:".red().bold(), msg);
}
