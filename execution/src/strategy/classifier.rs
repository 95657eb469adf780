//! Outcome classification.
//!
//! Turns the wagers that were live on the previous spin and the resolved spin
//! into a typed outcome plus the signed net result. Payouts are the standard
//! single-zero ratios (see [wheelhouse_types::BetKind::payout]).

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use wheelhouse_types::{SpinRecord, WagerRequest};

/// Typed result of a spin for a set of wagers.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Outcome {
    /// Net result is positive.
    Win,
    /// At least one leg paid but the net result is not positive. Holds the ladder.
    PartialWin,
    /// Neutral by strategy policy. Holds the ladder.
    Push,
    /// No leg paid.
    Loss,
}

/// Which otherwise-losing results a strategy treats as neutral.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PushPolicy {
    /// Pockets where a loss or partial win counts as a push.
    #[serde(default)]
    pub sector: BTreeSet<u8>,
    /// Count an exact break-even (a leg paid, net zero) as a push.
    #[serde(default)]
    pub break_even: bool,
}

impl PushPolicy {
    pub fn sector(pockets: impl IntoIterator<Item = u8>) -> Self {
        Self {
            sector: pockets.into_iter().collect(),
            break_even: false,
        }
    }
}

/// Classified result of one spin.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Classification {
    pub outcome: Outcome,
    pub staked: u64,
    /// Total returned to the player (stakes of winning legs plus winnings).
    pub returned: u64,
    /// `returned - staked`.
    pub net: i64,
}

fn clamp_i64(value: i128) -> i64 {
    value.clamp(i64::MIN as i128, i64::MAX as i128) as i64
}

/// Classify `wagers` against `spin`.
///
/// Returns `None` when nothing was staked (no bet was live on this spin).
pub fn classify(
    wagers: &[WagerRequest],
    spin: &SpinRecord,
    push: &PushPolicy,
) -> Option<Classification> {
    let staked = wagers
        .iter()
        .fold(0u64, |total, wager| total.saturating_add(wager.amount));
    if staked == 0 {
        return None;
    }
    let returned = wagers
        .iter()
        .fold(0u64, |total, wager| total.saturating_add(wager.settle(spin.number())));
    let net = clamp_i64(returned as i128 - staked as i128);

    let mut outcome = if net > 0 {
        Outcome::Win
    } else if returned > 0 {
        if net == 0 && push.break_even {
            Outcome::Push
        } else {
            Outcome::PartialWin
        }
    } else {
        Outcome::Loss
    };
    if matches!(outcome, Outcome::Loss | Outcome::PartialWin)
        && push.sector.contains(&spin.number())
    {
        outcome = Outcome::Push;
    }

    Some(Classification {
        outcome,
        staked,
        returned,
        net,
    })
}
