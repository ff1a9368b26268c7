//! Combat table.
//!
//! Outcomes are looked up, not derived from rank order: the spy topples the
//! general, the mine stops everything but the plane and the engineer, and the
//! cavalry beats the engineer that outranks it.

use crate::types::Rank;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BattleResult {
    Lose,
    Win,
    Draw,
}

use BattleResult::{Draw as D, Lose as L, Win as W};

/// Attacker (row) against defender (column) for every rank except the flag.
const TABLE: [[BattleResult; 15]; 15] = [
    [D, W, W, W, W, W, W, W, W, W, W, W, W, L, L],
    [L, D, W, W, W, W, W, W, W, W, W, W, W, W, L],
    [L, L, D, W, W, W, W, W, W, W, W, W, W, W, L],
    [L, L, L, D, W, W, W, W, W, W, W, W, W, W, W],
    [L, L, L, L, D, W, W, W, W, W, W, W, W, W, L],
    [L, L, L, L, L, D, W, W, W, W, W, W, W, W, L],
    [L, L, L, L, L, L, D, W, W, W, W, W, W, W, L],
    [L, L, L, L, L, L, L, D, W, W, W, W, W, W, L],
    [L, L, L, L, L, L, L, L, D, W, W, W, W, W, L],
    [L, L, L, L, L, L, L, L, L, D, W, W, W, W, L],
    [L, L, L, L, L, L, L, L, L, L, D, W, W, W, L],
    [L, L, L, L, L, L, L, L, L, L, L, D, L, W, W],
    [L, L, L, L, L, L, L, L, L, L, L, W, D, W, L],
    [W, L, L, L, L, L, L, L, L, L, L, L, L, D, L],
    [W, W, W, L, W, W, W, W, W, W, W, L, W, W, D],
];

/// Result for `attacker` striking `defender` head-on.
///
/// The flag has no strength of its own: attacking it always wins here, and
/// a flag never attacks. Guarded flags are resolved by the board, which
/// knows who stands behind them.
pub fn fight(attacker: Rank, defender: Rank) -> BattleResult {
    match (attacker, defender) {
        (Rank::Flag, _) => BattleResult::Lose,
        (_, Rank::Flag) => BattleResult::Win,
        _ => TABLE[attacker.idx()][defender.idx()],
    }
}

/// Whether `rank` would defeat `defender` head-on.
pub fn defeats(rank: Rank, defender: Rank) -> bool {
    fight(rank, defender) == BattleResult::Win
}

#[cfg(test)]
#[path = "battle_tests.rs"]
mod battle_tests;
