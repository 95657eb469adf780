use super::{Bet, WagerRequest};
use serde::{Deserialize, Serialize};

/// Whether a strategy is staking real money this spin.
#[repr(u8)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Mode {
    /// Placing real wagers.
    #[default]
    Active = 0,
    /// Waiting for an entry trigger; outcomes are tracked against shadow wagers.
    Virtual = 1,
    /// Paused after repeated losses; outcomes are tracked against shadow wagers.
    Skipping = 2,
}

impl TryFrom<u8> for Mode {
    type Error = u8;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Mode::Active),
            1 => Ok(Mode::Virtual),
            2 => Ok(Mode::Skipping),
            other => Err(other),
        }
    }
}

/// Session bankroll bookkeeping used to gate "reset to base" transitions.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionWatermark {
    pub starting_bankroll: u64,
    pub high_water_mark: u64,
}

impl SessionWatermark {
    pub fn new(bankroll: u64) -> Self {
        Self {
            starting_bankroll: bankroll,
            high_water_mark: bankroll,
        }
    }

    /// Record a bankroll observation. Returns true when it sets a new high.
    ///
    /// The mark never decreases.
    pub fn observe(&mut self, bankroll: u64) -> bool {
        if bankroll > self.high_water_mark {
            self.high_water_mark = bankroll;
            true
        } else {
            false
        }
    }
}

/// Persistent per-strategy record threaded through every call.
///
/// The host treats this as opaque: it stores it (JSON via serde, or the
/// binary codec) and hands it back unchanged on the next call.
/// `StrategyState::default()` is the uninitialised state a host passes on the
/// first call.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StrategyState {
    pub initialized: bool,
    pub level: usize,
    pub watermark: SessionWatermark,
    pub mode: Mode,
    /// Positions currently targeted (resolved dynamic targets).
    pub coverage: Vec<Bet>,
    pub consecutive_losses: u32,
    pub consecutive_wins: u32,
    /// Wagers returned on the previous call; classified on the next one.
    pub last_wagers: Vec<WagerRequest>,
    /// Wagers that would have been placed while virtual or skipping.
    pub shadow_wagers: Vec<WagerRequest>,
    /// Progress toward the entry trigger.
    pub gate_run: u32,
    /// Sector region of the last spin counted by a repeat trigger.
    pub gate_sector: Option<u8>,
    /// Spins observed since initialisation.
    pub spins_observed: u64,
}

impl StrategyState {
    /// Fresh state for a session starting at `bankroll`.
    pub fn new(bankroll: u64, mode: Mode) -> Self {
        Self {
            initialized: true,
            watermark: SessionWatermark::new(bankroll),
            mode,
            ..Self::default()
        }
    }

    /// Total currently staked.
    pub fn staked(&self) -> u64 {
        self.last_wagers
            .iter()
            .fold(0u64, |total, wager| total.saturating_add(wager.amount))
    }
}
