//! Progression ladders.
//!
//! A ladder is a finite ordered list of [LevelSpec]s plus the rules that move
//! between them. Level tables are generated from a declarative [LevelTable] so
//! Martingale, D'Alembert, Fibonacci and hand-written sequences share one
//! state machine:
//!
//! | Table | Multiplier at level `n` |
//! |---|---|
//! | `Linear { start, increment }` | `start + increment * n` |
//! | `Geometric { factor }` | `factor ^ n` |
//! | `Recurrence { first, second }` | `s[n] = s[n-1] + s[n-2]` |
//! | `Sequence(v)` | `v[n]` |
//! | `Levels(v)` | `v[n].multiplier`, optional per-level shape |

use super::{classifier::Outcome, runtime::DefinitionError, shape::BetShape};
use serde::{Deserialize, Serialize};
use std::iter::successors;

/// One rung of a ladder.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LevelSpec {
    /// Applied to the unit of every leg.
    pub multiplier: u64,
    /// Overrides the strategy's base shape at this level.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shape: Option<BetShape>,
}

impl LevelSpec {
    pub fn new(multiplier: u64) -> Self {
        Self {
            multiplier,
            shape: None,
        }
    }
}

/// Declarative level table.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LevelTable {
    Linear {
        start: u64,
        increment: u64,
        levels: usize,
    },
    Geometric {
        factor: u64,
        levels: usize,
    },
    Recurrence {
        first: u64,
        second: u64,
        levels: usize,
    },
    Sequence(Vec<u64>),
    Levels(Vec<LevelSpec>),
}

impl LevelTable {
    /// Expand the table into concrete levels (saturating on overflow).
    pub fn expand(&self) -> Vec<LevelSpec> {
        match self {
            LevelTable::Linear {
                start,
                increment,
                levels,
            } => (0..*levels as u64)
                .map(|n| LevelSpec::new(start.saturating_add(increment.saturating_mul(n))))
                .collect(),
            LevelTable::Geometric { factor, levels } => {
                successors(Some(1u64), |m| Some(m.saturating_mul(*factor)))
                    .take(*levels)
                    .map(LevelSpec::new)
                    .collect()
            }
            LevelTable::Recurrence {
                first,
                second,
                levels,
            } => successors(Some((*first, *second)), |(a, b)| {
                Some((*b, a.saturating_add(*b)))
            })
            .take(*levels)
            .map(|(a, _)| LevelSpec::new(a))
            .collect(),
            LevelTable::Sequence(values) => values.iter().copied().map(LevelSpec::new).collect(),
            LevelTable::Levels(levels) => levels.clone(),
        }
    }
}

/// What a win does to the level.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Transition {
    /// Any win resets to level 0.
    ResetOnWin,
    /// A win resets only once the bankroll is above the high-water mark.
    ResetOnRecovery,
    /// Below `threshold` a win resets. At or above it, `wins_required`
    /// consecutive wins are needed before the ladder clears.
    Tiered {
        threshold: usize,
        wins_required: u32,
        cleared: Cleared,
    },
}

/// How a tiered ladder clears after enough consecutive wins.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Cleared {
    Reset,
    StepDown,
}

/// What a loss at the top level does.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OverflowPolicy {
    /// Stay at the top level.
    Cap,
    /// Stop-loss back to level 0.
    Reset,
    /// Drop back to an intermediate level.
    RecycleTo(usize),
}

fn default_losses_per_step() -> u32 {
    1
}

/// Ladder configuration as declared by a strategy.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LadderConfig {
    pub table: LevelTable,
    pub transition: Transition,
    /// Required: there is no sensible default.
    pub overflow: OverflowPolicy,
    /// Consecutive losses needed per escalation.
    #[serde(default = "default_losses_per_step")]
    pub losses_per_step: u32,
}

/// Position on the ladder plus the streak counters that drive it.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct LadderStep {
    pub level: usize,
    pub consecutive_wins: u32,
    pub consecutive_losses: u32,
}

impl LadderStep {
    pub fn base() -> Self {
        Self::default()
    }
}

/// A validated ladder.
#[derive(Clone, Debug)]
pub struct Ladder {
    levels: Vec<LevelSpec>,
    transition: Transition,
    overflow: OverflowPolicy,
    losses_per_step: u32,
}

impl Ladder {
    pub fn new(config: LadderConfig) -> Result<Self, DefinitionError> {
        let levels = config.table.expand();
        if levels.is_empty() {
            return Err(DefinitionError::EmptyLadder);
        }
        if let Some(level) = levels.iter().position(|spec| spec.multiplier == 0) {
            return Err(DefinitionError::ZeroMultiplier { level });
        }
        if config.losses_per_step == 0 {
            return Err(DefinitionError::ZeroLossesPerStep);
        }
        let max_level = levels.len() - 1;
        if let OverflowPolicy::RecycleTo(target) = config.overflow {
            if target > max_level {
                return Err(DefinitionError::RecycleOutOfRange { target, max_level });
            }
        }
        if let Transition::Tiered {
            threshold,
            wins_required,
            ..
        } = config.transition
        {
            if threshold > max_level {
                return Err(DefinitionError::TieredThreshold {
                    threshold,
                    max_level,
                });
            }
            if wins_required == 0 {
                return Err(DefinitionError::ZeroWinsRequired);
            }
        }
        Ok(Self {
            levels,
            transition: config.transition,
            overflow: config.overflow,
            losses_per_step: config.losses_per_step,
        })
    }

    pub fn level_count(&self) -> usize {
        self.levels.len()
    }

    pub fn max_level(&self) -> usize {
        self.levels.len() - 1
    }

    pub fn levels(&self) -> &[LevelSpec] {
        &self.levels
    }

    /// Clamp a (possibly stale) persisted level into range.
    pub fn clamp_level(&self, level: usize) -> usize {
        level.min(self.max_level())
    }

    /// Level spec at `level`, clamped into range.
    pub fn level(&self, level: usize) -> &LevelSpec {
        &self.levels[self.clamp_level(level)]
    }

    /// Apply one outcome.
    ///
    /// `recovered` is whether the bankroll is above the high-water mark, used
    /// by [Transition::ResetOnRecovery].
    pub fn advance(&self, step: LadderStep, outcome: Outcome, recovered: bool) -> LadderStep {
        let mut next = LadderStep {
            level: self.clamp_level(step.level),
            ..step
        };
        match outcome {
            Outcome::Push | Outcome::PartialWin => next,
            Outcome::Loss => {
                next.consecutive_wins = 0;
                next.consecutive_losses = next.consecutive_losses.saturating_add(1);
                if next.consecutive_losses % self.losses_per_step == 0 {
                    next.level = self.escalate(next.level);
                }
                next
            }
            Outcome::Win => {
                next.consecutive_losses = 0;
                next.consecutive_wins = next.consecutive_wins.saturating_add(1);
                match self.transition {
                    Transition::ResetOnWin => LadderStep::base(),
                    Transition::ResetOnRecovery if recovered => LadderStep::base(),
                    Transition::ResetOnRecovery => next,
                    Transition::Tiered {
                        threshold,
                        wins_required,
                        cleared,
                    } => {
                        if next.level < threshold {
                            return LadderStep::base();
                        }
                        if next.consecutive_wins < wins_required {
                            return next;
                        }
                        next.consecutive_wins = 0;
                        next.level = match cleared {
                            Cleared::Reset => 0,
                            Cleared::StepDown => next.level.saturating_sub(1),
                        };
                        next
                    }
                }
            }
        }
    }

    fn escalate(&self, level: usize) -> usize {
        if level < self.max_level() {
            return level + 1;
        }
        match self.overflow {
            OverflowPolicy::Cap => self.max_level(),
            OverflowPolicy::Reset => 0,
            OverflowPolicy::RecycleTo(target) => target,
        }
    }
}
