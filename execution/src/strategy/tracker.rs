//! Virtual and skip shadow tracking.
//!
//! Both modes classify a wager set that is never staked. The entry gate holds
//! a strategy in `Virtual` until a run of matching spins; the skip policy moves
//! an active strategy into `Skipping` after a losing streak.

use super::classifier::Outcome;
use serde::{Deserialize, Serialize};
use wheelhouse_types::{Sector, SpinRecord};

/// What extends the entry gate's run.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Trigger {
    /// The shadow wager set would have lost.
    Misses,
    /// The shadow wager set would have won.
    Hits,
    /// Consecutive spins landed in the same region of a sector.
    Repeat(Sector),
}

/// "Wait for trigger" gating.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntryGate {
    pub trigger: Trigger,
    pub run_length: u32,
    /// Return to `Virtual` after a real win.
    #[serde(default)]
    pub rearm_on_win: bool,
}

impl EntryGate {
    /// Feed one spin into the gate. Returns true when the gate opens, in which
    /// case the run is cleared.
    ///
    /// `shadow` is the classification of the shadow wager set (if any was
    /// built); a spin with nothing to classify leaves outcome triggers as-is.
    pub fn observe(
        &self,
        run: &mut u32,
        last_sector: &mut Option<u8>,
        spin: &SpinRecord,
        shadow: Option<Outcome>,
    ) -> bool {
        match self.trigger {
            Trigger::Misses => match shadow {
                Some(Outcome::Loss) => *run = run.saturating_add(1),
                Some(_) => *run = 0,
                None => {}
            },
            Trigger::Hits => match shadow {
                Some(Outcome::Win) => *run = run.saturating_add(1),
                Some(_) => *run = 0,
                None => {}
            },
            Trigger::Repeat(sector) => match sector.locate(spin.number()) {
                None => {
                    *run = 0;
                    *last_sector = None;
                }
                Some(region) if *last_sector == Some(region) => *run = run.saturating_add(1),
                Some(region) => {
                    *run = 1;
                    *last_sector = Some(region);
                }
            },
        }
        if *run >= self.run_length {
            *run = 0;
            *last_sector = None;
            return true;
        }
        false
    }
}

/// "Pause after repeated losses".
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkipPolicy {
    pub after_losses: u32,
}

impl SkipPolicy {
    pub fn should_skip(&self, consecutive_losses: u32) -> bool {
        consecutive_losses >= self.after_losses
    }
}
