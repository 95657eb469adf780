//! Reference host for wheelhouse strategies.
//!
//! Owns everything the strategy runtime leaves to its host: the wheel, the
//! bankroll ledger, payout settlement and diagnostics plumbing.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha20Rng;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};
use wheelhouse_execution::{DiagnosticSink, Runtime, StrategyRng};
use wheelhouse_types::{roulette::MAX_NUMBER, SpinRecord, StrategyState, WagerRequest};

pub mod config;
pub mod sink;

pub use config::{Config, ConfigError, StrategySource, TableConfig, ValidatedConfig};
pub use sink::{FileSink, Writer};

/// Seeded single-zero wheel.
pub struct Wheel {
    rng: ChaCha20Rng,
}

impl Wheel {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: ChaCha20Rng::seed_from_u64(seed),
        }
    }

    pub fn spin(&mut self) -> SpinRecord {
        let number = self.rng.gen_range(0..=MAX_NUMBER);
        SpinRecord::new(number).expect("wheel only produces pockets on the board")
    }
}

/// Summary of a finished session.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Report {
    pub strategy: String,
    pub spins: u64,
    pub wagers_placed: u64,
    pub total_staked: u64,
    pub starting_bankroll: u64,
    pub final_bankroll: u64,
    pub peak_bankroll: u64,
    pub max_level: usize,
    /// Spins on which the strategy placed nothing.
    pub spins_skipped: u64,
    /// The bankroll fell below the table minimum.
    pub busted: bool,
}

/// Drives one strategy against a wheel.
pub struct Simulator {
    runtime: Runtime,
    wheel: Wheel,
    history: Vec<SpinRecord>,
    bankroll: u64,
    state: StrategyState,
    report: Report,
}

impl Simulator {
    pub fn new(runtime: Runtime, bankroll: u64, seed: u64) -> Self {
        let report = Report {
            strategy: runtime.name().to_string(),
            starting_bankroll: bankroll,
            final_bankroll: bankroll,
            peak_bankroll: bankroll,
            ..Report::default()
        };
        Self {
            runtime,
            wheel: Wheel::new(seed),
            history: Vec::new(),
            bankroll,
            state: StrategyState::default(),
            report,
        }
    }

    pub fn bankroll(&self) -> u64 {
        self.bankroll
    }

    pub fn state(&self) -> &StrategyState {
        &self.state
    }

    pub fn history(&self) -> &[SpinRecord] {
        &self.history
    }

    /// Ask for wagers, spin, and settle. Returns the wagers and the result.
    pub fn step(&mut self, sink: &dyn DiagnosticSink) -> (Vec<WagerRequest>, SpinRecord) {
        let mut rng = StrategyRng::new(self.runtime.definition().seed, self.history.len() as u64);
        let wagers = self.runtime.decide_and_report(
            &self.history,
            self.bankroll,
            &mut self.state,
            &mut rng,
            sink,
        );

        let staked = wagers
            .iter()
            .fold(0u64, |total, wager| total.saturating_add(wager.amount));
        let spin = self.wheel.spin();
        let returned = wagers
            .iter()
            .fold(0u64, |total, wager| total.saturating_add(wager.settle(spin.number())));
        self.bankroll = self.bankroll.saturating_sub(staked).saturating_add(returned);
        self.history.push(spin);

        self.report.spins += 1;
        if wagers.is_empty() {
            self.report.spins_skipped += 1;
        } else {
            self.report.wagers_placed += wagers.len() as u64;
            self.report.total_staked = self.report.total_staked.saturating_add(staked);
        }
        self.report.max_level = self.report.max_level.max(self.state.level);
        self.report.peak_bankroll = self.report.peak_bankroll.max(self.bankroll);
        self.report.final_bankroll = self.bankroll;
        debug!(
            spin = self.history.len(),
            number = spin.number(),
            staked,
            returned,
            bankroll = self.bankroll,
            "settled"
        );
        (wagers, spin)
    }

    /// Play up to `spins` spins, stopping early once the bankroll cannot cover
    /// the table minimum.
    pub fn run(mut self, spins: u64, sink: &dyn DiagnosticSink) -> Report {
        let minimum = self.runtime.limits().min();
        for _ in 0..spins {
            if self.bankroll < minimum {
                self.report.busted = true;
                break;
            }
            self.step(sink);
        }
        info!(
            strategy = %self.report.strategy,
            spins = self.report.spins,
            final_bankroll = self.report.final_bankroll,
            peak_bankroll = self.report.peak_bankroll,
            busted = self.report.busted,
            "session finished"
        );
        self.report
    }
}

#[cfg(test)]
mod tests;
