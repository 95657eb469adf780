use crate::{
    strategy::sink::{DiagnosticSink, SpinDiagnostic},
    Runtime,
};
use std::sync::Mutex;
use wheelhouse_types::{BetLimits, SpinRecord, StrategyState, WagerRequest};

/// Creates the `{ min: 1, min_outside: 5, max: 500 }` table used across tests
pub fn table_limits() -> BetLimits {
    BetLimits::new(1, 5, 500).expect("valid limits")
}

/// Creates spin records for a sequence of pockets
pub fn spins(numbers: &[u8]) -> Vec<SpinRecord> {
    numbers
        .iter()
        .map(|number| SpinRecord::new(*number).expect("pocket on the board"))
        .collect()
}

/// Sink that keeps every diagnostic in memory.
#[derive(Default)]
pub struct RecordingSink {
    records: Mutex<Vec<SpinDiagnostic>>,
}

impl RecordingSink {
    pub fn take(&self) -> Vec<SpinDiagnostic> {
        std::mem::take(&mut *self.records.lock().unwrap())
    }
}

impl DiagnosticSink for RecordingSink {
    fn record(&self, diagnostic: &SpinDiagnostic) {
        self.records.lock().unwrap().push(diagnostic.clone());
    }
}

/// Minimal host: keeps the history and bankroll and settles wagers against
/// scripted spins.
pub struct Table {
    pub history: Vec<SpinRecord>,
    pub bankroll: u64,
    pub state: StrategyState,
}

impl Table {
    pub fn new(bankroll: u64) -> Self {
        Self {
            history: Vec::new(),
            bankroll,
            state: StrategyState::default(),
        }
    }

    /// Asks the strategy for the next wagers
    pub fn decide(&mut self, runtime: &Runtime) -> Vec<WagerRequest> {
        runtime.decide_seeded(&self.history, self.bankroll, &mut self.state)
    }

    /// Settles wagers against `number` and records the spin
    pub fn settle(&mut self, wagers: &[WagerRequest], number: u8) {
        let staked: u64 = wagers.iter().map(|wager| wager.amount).sum();
        assert!(staked <= self.bankroll, "overdraw: {staked} > {}", self.bankroll);
        let returned: u64 = wagers.iter().map(|wager| wager.settle(number)).sum();
        self.bankroll = self.bankroll - staked + returned;
        self.history.extend(spins(&[number]));
    }

    /// Plays scripted spins, returning the wagers placed on each
    pub fn play(&mut self, runtime: &Runtime, numbers: &[u8]) -> Vec<Vec<WagerRequest>> {
        numbers
            .iter()
            .map(|number| {
                let wagers = self.decide(runtime);
                self.settle(&wagers, *number);
                wagers
            })
            .collect()
    }
}
