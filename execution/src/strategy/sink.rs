//! Best-effort diagnostics.
//!
//! Sinks are handed a [SpinDiagnostic] only after the wager list is final and
//! must not block. Failures stay inside the sink.

use super::{classifier::Outcome, runtime::Decision};
use serde::{Deserialize, Serialize};
use tracing::debug;
use wheelhouse_types::{Mode, SpinRecord, StrategyState, WagerRequest};

/// One decision, as recorded by a sink.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpinDiagnostic {
    pub strategy: String,
    /// Number of resolved spins the decision saw.
    pub spin: u64,
    /// Newest resolved pocket, if any.
    pub number: Option<u8>,
    pub bankroll: u64,
    pub outcome: Option<Outcome>,
    pub net: i64,
    pub level: usize,
    pub mode: Mode,
    pub reset: bool,
    pub wagers: Vec<WagerRequest>,
}

impl SpinDiagnostic {
    pub fn new(
        strategy: &str,
        history: &[SpinRecord],
        bankroll: u64,
        state: &StrategyState,
        decision: &Decision,
    ) -> Self {
        Self {
            strategy: strategy.to_string(),
            spin: history.len() as u64,
            number: history.last().map(SpinRecord::number),
            bankroll,
            outcome: decision.outcome,
            net: decision.net,
            level: state.level,
            mode: state.mode,
            reset: decision.reset,
            wagers: decision.wagers.clone(),
        }
    }

    pub fn staked(&self) -> u64 {
        self.wagers
            .iter()
            .fold(0u64, |total, wager| total.saturating_add(wager.amount))
    }
}

/// Receives diagnostics from [crate::Runtime::decide_and_report].
pub trait DiagnosticSink {
    fn record(&self, diagnostic: &SpinDiagnostic);
}

/// Emits each diagnostic as a `tracing` event.
#[derive(Clone, Copy, Debug, Default)]
pub struct TracingSink;

impl DiagnosticSink for TracingSink {
    fn record(&self, diagnostic: &SpinDiagnostic) {
        debug!(
            strategy = %diagnostic.strategy,
            spin = diagnostic.spin,
            number = ?diagnostic.number,
            bankroll = diagnostic.bankroll,
            outcome = ?diagnostic.outcome,
            net = diagnostic.net,
            level = diagnostic.level,
            mode = ?diagnostic.mode,
            reset = diagnostic.reset,
            staked = diagnostic.staked(),
            "spin"
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        mocks::{spins, table_limits, RecordingSink},
        presets, Runtime, StrategyRng,
    };

    #[test]
    fn test_report_matches_returned_wagers() {
        let runtime = Runtime::new(presets::preset("martingale-red").unwrap(), table_limits()).unwrap();
        let sink = RecordingSink::default();
        let mut state = StrategyState::default();

        let first = runtime.decide_and_report(&[], 1000, &mut state, &mut StrategyRng::new(0, 0), &sink);
        let history = spins(&[2]);
        let second =
            runtime.decide_and_report(&history, 995, &mut state, &mut StrategyRng::new(0, 1), &sink);

        let recorded = sink.take();
        assert_eq!(recorded.len(), 2);
        assert_eq!(recorded[0].wagers, first);
        assert_eq!(recorded[0].number, None);
        assert_eq!(recorded[1].wagers, second);
        assert_eq!(recorded[1].number, Some(2));
        assert_eq!(recorded[1].outcome, Some(Outcome::Loss));
        assert_eq!(recorded[1].net, -5);
        assert_eq!(recorded[1].level, 1);
        assert_eq!(recorded[1].staked(), 10);
    }

    #[test]
    fn test_tracing_sink_records() {
        let diagnostic = SpinDiagnostic {
            strategy: "noop".to_string(),
            spin: 0,
            number: None,
            bankroll: 0,
            outcome: None,
            net: 0,
            level: 0,
            mode: Mode::Active,
            reset: false,
            wagers: Vec::new(),
        };
        TracingSink.record(&diagnostic);
    }
}
