//! Strategy runtime.
//!
//! Per call, in order:
//! 1. Initialise the state on the first call (or an empty history).
//! 2. Classify `last_wagers` against the newest spin.
//! 3. Raise the high-water mark, resetting the ladder on a new high.
//! 4. Otherwise advance the ladder and the virtual/skip tracker.
//! 5. Resolve the level's shape and size its legs.
//! 6. Clamp every leg.
//! 7. Check the total against the bankroll.
//! 8. Persist `last_wagers` and return them.

use super::{
    clamp::{clamp_all, fit_bankroll, ShortfallPolicy},
    classifier::{classify, Outcome, PushPolicy},
    ladder::{Ladder, LadderConfig, LadderStep},
    shape::{BetShape, Reselect, Unit},
    sink::{DiagnosticSink, SpinDiagnostic},
    tracker::{EntryGate, SkipPolicy},
    StrategyRng,
};
use rand::RngCore;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, warn};
use wheelhouse_types::{BetKind, BetLimits, Mode, SpinRecord, StrategyState, WagerRequest};

/// Error raised when a strategy definition cannot be run.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DefinitionError {
    #[error("ladder has no levels")]
    EmptyLadder,
    #[error("level {level} has a zero multiplier")]
    ZeroMultiplier { level: usize },
    #[error("recycle target {target} is beyond the top level {max_level}")]
    RecycleOutOfRange { target: usize, max_level: usize },
    #[error("tiered threshold {threshold} is beyond the top level {max_level}")]
    TieredThreshold { threshold: usize, max_level: usize },
    #[error("tiered recovery needs at least one win")]
    ZeroWinsRequired,
    #[error("losses_per_step must be > 0")]
    ZeroLossesPerStep,
    #[error("shape has no legs")]
    EmptyShape,
    #[error("shape has {legs} legs (max {max})")]
    TooManyLegs { legs: usize, max: usize },
    #[error("leg {leg} has zero weight")]
    ZeroWeight { leg: usize },
    #[error("leg {leg} has a zero lookback")]
    ZeroLookback { leg: usize },
    #[error("not enough {kind:?} positions for every leg")]
    NotEnoughCandidates { kind: BetKind },
    #[error("fixed unit must be > 0")]
    ZeroUnit,
    #[error("entry gate run length must be > 0")]
    ZeroRunLength,
    #[error("skip threshold must be > 0")]
    ZeroSkipThreshold,
}

fn default_reset_on_new_high() -> bool {
    true
}

/// A strategy expressed as configuration.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct StrategyDefinition {
    pub name: String,
    #[serde(default)]
    pub unit: Unit,
    /// Base shape; levels may override it.
    pub shape: BetShape,
    pub ladder: LadderConfig,
    #[serde(default)]
    pub push: PushPolicy,
    /// Start in `Virtual` and wait for a trigger.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub entry: Option<EntryGate>,
    /// Pause after a losing streak.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub skip: Option<SkipPolicy>,
    #[serde(default = "default_reset_on_new_high")]
    pub reset_on_new_high: bool,
    #[serde(default)]
    pub shortfall: ShortfallPolicy,
    /// Seed for [Runtime::decide_seeded].
    #[serde(default)]
    pub seed: u64,
}

impl StrategyDefinition {
    /// Load a definition written with single-key-map enums (see [super::from_yaml]).
    pub fn from_yaml(yaml: &str) -> Result<Self, serde_yaml::Error> {
        super::from_yaml(yaml)
    }
}

/// Everything a single call decided.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Decision {
    pub wagers: Vec<WagerRequest>,
    /// Outcome of the real wagers from the previous call.
    pub outcome: Option<Outcome>,
    pub net: i64,
    /// The high-water mark reset the ladder.
    pub reset: bool,
    /// Outcome of the shadow wagers (virtual or skipping).
    pub shadow_outcome: Option<Outcome>,
}

/// A validated strategy bound to table limits.
#[derive(Clone, Debug)]
pub struct Runtime {
    definition: StrategyDefinition,
    ladder: Ladder,
    limits: BetLimits,
}

impl Runtime {
    pub fn new(definition: StrategyDefinition, limits: BetLimits) -> Result<Self, DefinitionError> {
        if definition.unit == Unit::Fixed(0) {
            return Err(DefinitionError::ZeroUnit);
        }
        definition.shape.validate()?;
        let ladder = Ladder::new(definition.ladder.clone())?;
        for spec in ladder.levels() {
            if let Some(shape) = &spec.shape {
                shape.validate()?;
            }
        }
        if matches!(definition.entry, Some(gate) if gate.run_length == 0) {
            return Err(DefinitionError::ZeroRunLength);
        }
        if matches!(definition.skip, Some(skip) if skip.after_losses == 0) {
            return Err(DefinitionError::ZeroSkipThreshold);
        }
        Ok(Self {
            definition,
            ladder,
            limits,
        })
    }

    pub fn name(&self) -> &str {
        &self.definition.name
    }

    pub fn definition(&self) -> &StrategyDefinition {
        &self.definition
    }

    pub fn ladder(&self) -> &Ladder {
        &self.ladder
    }

    pub fn limits(&self) -> &BetLimits {
        &self.limits
    }

    /// Wagers for the next spin. An empty list means "no bet this spin".
    pub fn decide<R: RngCore>(
        &self,
        history: &[SpinRecord],
        bankroll: u64,
        state: &mut StrategyState,
        rng: &mut R,
    ) -> Vec<WagerRequest> {
        self.step(history, bankroll, state, rng).wagers
    }

    /// [Runtime::decide] with a [StrategyRng] derived from the strategy seed
    /// and the history length.
    pub fn decide_seeded(
        &self,
        history: &[SpinRecord],
        bankroll: u64,
        state: &mut StrategyState,
    ) -> Vec<WagerRequest> {
        let mut rng = StrategyRng::new(self.definition.seed, history.len() as u64);
        self.decide(history, bankroll, state, &mut rng)
    }

    /// [Runtime::decide], then hand a diagnostic to `sink` once the wager list
    /// is final.
    pub fn decide_and_report<R: RngCore>(
        &self,
        history: &[SpinRecord],
        bankroll: u64,
        state: &mut StrategyState,
        rng: &mut R,
        sink: &dyn DiagnosticSink,
    ) -> Vec<WagerRequest> {
        let decision = self.step(history, bankroll, state, rng);
        sink.record(&SpinDiagnostic::new(
            self.name(),
            history,
            bankroll,
            state,
            &decision,
        ));
        decision.wagers
    }

    /// Run one call and return everything it decided.
    pub fn step<R: RngCore>(
        &self,
        history: &[SpinRecord],
        bankroll: u64,
        state: &mut StrategyState,
        rng: &mut R,
    ) -> Decision {
        let mut decision = Decision::default();
        match history.last() {
            Some(spin) if state.initialized => self.observe(spin, bankroll, state, &mut decision),
            _ => {
                let mode = if self.definition.entry.is_some() {
                    Mode::Virtual
                } else {
                    Mode::Active
                };
                *state = StrategyState::new(bankroll, mode);
                debug!(strategy = %self.name(), bankroll, ?mode, "initialised strategy state");
            }
        }
        decision.wagers = self.build(history, bankroll, state, rng);
        debug!(
            strategy = %self.name(),
            spin = history.len(),
            bankroll,
            level = state.level,
            mode = ?state.mode,
            outcome = ?decision.outcome,
            net = decision.net,
            reset = decision.reset,
            legs = decision.wagers.len(),
            staked = state.staked(),
            "decided wagers"
        );
        decision
    }

    /// Steps 2-4: classify, watermark, ladder and tracker.
    fn observe(
        &self,
        spin: &SpinRecord,
        bankroll: u64,
        state: &mut StrategyState,
        decision: &mut Decision,
    ) {
        let level = self.ladder.clamp_level(state.level);
        if level != state.level {
            warn!(
                strategy = %self.name(),
                persisted = state.level,
                clamped = level,
                "persisted level out of range"
            );
            state.level = level;
        }
        state.spins_observed = state.spins_observed.saturating_add(1);

        let real = classify(&state.last_wagers, spin, &self.definition.push);
        decision.outcome = real.map(|c| c.outcome);
        decision.net = real.map_or(0, |c| c.net);

        let recovered = bankroll > state.watermark.high_water_mark;
        if state.watermark.observe(bankroll) && self.definition.reset_on_new_high {
            apply_step(state, LadderStep::base());
            state.coverage.clear();
            decision.reset = true;
        }

        match state.mode {
            Mode::Active => self.observe_active(state, decision, recovered),
            Mode::Skipping => {
                if decision.reset {
                    state.mode = Mode::Active;
                    return;
                }
                let shadow = classify(&state.shadow_wagers, spin, &self.definition.push);
                decision.shadow_outcome = shadow.map(|c| c.outcome);
                if decision.shadow_outcome == Some(Outcome::Win) {
                    self.advance(state, Outcome::Win, recovered);
                    state.mode = Mode::Active;
                }
            }
            Mode::Virtual => {
                let shadow = classify(&state.shadow_wagers, spin, &self.definition.push);
                decision.shadow_outcome = shadow.map(|c| c.outcome);
                let opened = match &self.definition.entry {
                    Some(gate) => gate.observe(
                        &mut state.gate_run,
                        &mut state.gate_sector,
                        spin,
                        decision.shadow_outcome,
                    ),
                    None => true,
                };
                if opened {
                    state.mode = Mode::Active;
                }
            }
        }
    }

    fn observe_active(&self, state: &mut StrategyState, decision: &Decision, recovered: bool) {
        let Some(outcome) = decision.outcome else {
            return;
        };
        if !decision.reset {
            self.advance(state, outcome, recovered);
        }
        match outcome {
            Outcome::Loss => {
                if matches!(self.definition.skip, Some(skip) if skip.should_skip(state.consecutive_losses))
                {
                    state.mode = Mode::Skipping;
                }
            }
            Outcome::Win => {
                if matches!(self.definition.entry, Some(gate) if gate.rearm_on_win) {
                    state.mode = Mode::Virtual;
                    state.gate_run = 0;
                    state.gate_sector = None;
                }
            }
            Outcome::Push | Outcome::PartialWin => {}
        }
    }

    fn advance(&self, state: &mut StrategyState, outcome: Outcome, recovered: bool) {
        let previous = state.level;
        let next = self.ladder.advance(ladder_step(state), outcome, recovered);
        apply_step(state, next);
        if next.level == 0 && (outcome == Outcome::Win || previous != 0) {
            state.coverage.clear();
        }
    }

    /// Steps 5-8: shape, clamp, bankroll check, persist.
    fn build<R: RngCore>(
        &self,
        history: &[SpinRecord],
        bankroll: u64,
        state: &mut StrategyState,
        rng: &mut R,
    ) -> Vec<WagerRequest> {
        let spec = self.ladder.level(state.level);
        let shape: &BetShape = spec.shape.as_ref().unwrap_or(&self.definition.shape);
        let reuse = shape.reselect == Reselect::OnReset;
        let planned = match shape.resolve(history, rng, &state.coverage, reuse) {
            Some(coverage) => {
                let mut wagers =
                    shape.size(&coverage, self.definition.unit, spec.multiplier, &self.limits);
                clamp_all(&mut wagers, &self.limits);
                state.coverage = coverage;
                wagers
            }
            None => Vec::new(),
        };

        if state.mode != Mode::Active {
            state.shadow_wagers = planned;
            state.last_wagers.clear();
            return Vec::new();
        }
        state.shadow_wagers.clear();
        let wagers = fit_bankroll(planned, bankroll, &self.limits, self.definition.shortfall);
        state.last_wagers = wagers.clone();
        wagers
    }
}

fn ladder_step(state: &StrategyState) -> LadderStep {
    LadderStep {
        level: state.level,
        consecutive_wins: state.consecutive_wins,
        consecutive_losses: state.consecutive_losses,
    }
}

fn apply_step(state: &mut StrategyState, step: LadderStep) {
    state.level = step.level;
    state.consecutive_wins = step.consecutive_wins;
    state.consecutive_losses = step.consecutive_losses;
}
