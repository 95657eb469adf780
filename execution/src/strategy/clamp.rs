//! Per-leg clamping and the bankroll check.

use serde::{Deserialize, Serialize};
use wheelhouse_types::{BetKind, BetLimits, WagerRequest};

/// What to do when the clamped legs cost more than the bankroll.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ShortfallPolicy {
    /// Place nothing this spin.
    #[default]
    Skip,
    /// Bet `floor(bankroll / legs)` per leg, re-clamped.
    SpreadEvenly,
}

/// Clamp one leg into `[lower_bound(kind), max]`.
pub fn clamp(amount: u64, kind: BetKind, limits: &BetLimits) -> u64 {
    amount.min(limits.max()).max(limits.lower_bound(kind))
}

/// Clamp every leg independently.
pub fn clamp_all(wagers: &mut [WagerRequest], limits: &BetLimits) {
    for wager in wagers.iter_mut() {
        wager.amount = clamp(wager.amount, wager.kind(), limits);
    }
}

fn total(wagers: &[WagerRequest]) -> u64 {
    wagers
        .iter()
        .fold(0u64, |total, wager| total.saturating_add(wager.amount))
}

/// Verify the clamped legs fit in `bankroll`, applying `policy` if not.
///
/// Never returns a partial subset of legs: either every leg is placed or none.
pub fn fit_bankroll(
    mut wagers: Vec<WagerRequest>,
    bankroll: u64,
    limits: &BetLimits,
    policy: ShortfallPolicy,
) -> Vec<WagerRequest> {
    if total(&wagers) <= bankroll {
        return wagers;
    }
    match policy {
        ShortfallPolicy::Skip => Vec::new(),
        ShortfallPolicy::SpreadEvenly => {
            let share = bankroll / wagers.len() as u64;
            for wager in wagers.iter_mut() {
                wager.amount = clamp(wager.amount.min(share), wager.kind(), limits);
            }
            if total(&wagers) <= bankroll {
                wagers
            } else {
                Vec::new()
            }
        }
    }
}
