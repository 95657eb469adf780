//! Wheelhouse strategy runtime.
//!
//! A host simulator resolves spins and keeps the bankroll; once per spin it
//! calls [Runtime::decide] with the spin history, the current bankroll and the
//! strategy's persistent [wheelhouse_types::StrategyState], and gets back the
//! wagers for the next spin.
//!
//! ## Determinism requirements
//! - No wall-clock time and no I/O on the decision path.
//! - Position selection only draws from the injected `RngCore`; the default
//!   [StrategyRng] is derived from the strategy seed and the spin index.
//! - Diagnostics are emitted only after the wager list is final.
//!
//! ## Minimal host loop (example)
//! ```rust,ignore
//! use wheelhouse_execution::{presets, Runtime};
//! use wheelhouse_types::{BetLimits, SpinRecord, StrategyState};
//!
//! let limits = BetLimits::new(1, 5, 500)?;
//! let runtime = Runtime::new(presets::preset("martingale-red").unwrap(), limits)?;
//! let mut state = StrategyState::default();
//! let mut history = Vec::new();
//! let wagers = runtime.decide_seeded(&history, 1_000, &mut state);
//! // ... host spins, settles `wagers`, pushes the result ...
//! history.push(SpinRecord::new(17)?);
//! let next = runtime.decide_seeded(&history, 995, &mut state);
//! ```

pub mod strategy;

#[cfg(any(test, feature = "mocks"))]
pub mod mocks;

pub use strategy::{
    classifier::{classify, Classification, Outcome, PushPolicy},
    clamp::{clamp, clamp_all, fit_bankroll, ShortfallPolicy},
    ladder::{
        Cleared, Ladder, LadderConfig, LadderStep, LevelSpec, LevelTable, OverflowPolicy,
        Transition,
    },
    presets,
    runtime::{Decision, DefinitionError, Runtime, StrategyDefinition},
    shape::{BetShape, LegSpec, Reselect, Target, Unit},
    sink::{DiagnosticSink, SpinDiagnostic, TracingSink},
    tracker::{EntryGate, SkipPolicy, Trigger},
    from_yaml, StrategyRng,
};
