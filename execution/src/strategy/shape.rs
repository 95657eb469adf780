//! Bet shapes: which positions a strategy targets and how legs are weighted.
//!
//! A shape is a list of legs. Each leg names a [Target], either a fixed
//! position or a rule that resolves to one (random pick, follow the last
//! result, hottest or coldest region over a lookback). Resolved positions are
//! kept in `StrategyState::coverage` and reused according to [Reselect].

use super::runtime::DefinitionError;
use rand::{Rng, RngCore};
use serde::{Deserialize, Serialize};
use wheelhouse_types::{
    roulette::{all_corners, all_lines, all_splits, all_streets, MAX_LEGS, MAX_NUMBER},
    Bet, BetKind, BetLimits, EvenMoney, Sector, SpinRecord, WagerRequest,
};

/// Base stake of one leg before the level multiplier and leg weight.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Unit {
    /// The table minimum for the leg's kind (`min` or `min_outside`).
    #[default]
    TableMin,
    Fixed(u64),
}

impl Unit {
    pub fn amount(&self, kind: BetKind, limits: &BetLimits) -> u64 {
        match self {
            Unit::TableMin => limits.lower_bound(kind),
            Unit::Fixed(amount) => *amount,
        }
    }
}

/// Where a leg is placed.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Target {
    Fixed(Bet),
    /// A random position of this kind not excluded and not already chosen.
    Random(BetKind),
    /// The region of the sector the last spin landed in.
    FollowLast(Sector),
    /// The region hit most often over the last `lookback` spins.
    Hot { sector: Sector, lookback: usize },
    /// The region hit least often over the last `lookback` spins.
    Cold { sector: Sector, lookback: usize },
}

impl Target {
    /// Bet kind this target resolves to.
    pub fn kind(&self) -> BetKind {
        match self {
            Target::Fixed(bet) => bet.kind(),
            Target::Random(kind) => *kind,
            Target::FollowLast(sector)
            | Target::Hot { sector, .. }
            | Target::Cold { sector, .. } => sector_kind(*sector),
        }
    }

    fn accepts(&self, bet: &Bet, excluded: &[Bet]) -> bool {
        match self {
            Target::Fixed(fixed) => fixed == bet,
            Target::Random(kind) => bet.kind() == *kind && !excluded.contains(bet),
            Target::FollowLast(sector)
            | Target::Hot { sector, .. }
            | Target::Cold { sector, .. } => {
                (1..=sector.regions()).any(|region| Bet::for_sector(*sector, region) == Ok(*bet))
            }
        }
    }
}

fn sector_kind(sector: Sector) -> BetKind {
    match sector {
        Sector::Dozen => BetKind::Dozen,
        Sector::Column => BetKind::Column,
        Sector::Color | Sector::Parity | Sector::Half => BetKind::EvenMoney,
    }
}

fn default_weight() -> u64 {
    1
}

/// One leg of a shape.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LegSpec {
    pub target: Target,
    /// Multiplies the unit for this leg.
    #[serde(default = "default_weight")]
    pub weight: u64,
}

impl LegSpec {
    pub fn new(target: Target) -> Self {
        Self { target, weight: 1 }
    }

    pub fn weighted(target: Target, weight: u64) -> Self {
        Self { target, weight }
    }
}

/// When dynamic targets are re-resolved.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Reselect {
    EverySpin,
    /// Keep the current coverage until the ladder resets.
    #[default]
    OnReset,
}

/// Positions and weights of a wager set.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BetShape {
    pub legs: Vec<LegSpec>,
    #[serde(default)]
    pub reselect: Reselect,
    /// Positions random targets never pick.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub excluded: Vec<Bet>,
}

impl BetShape {
    pub fn new(legs: Vec<LegSpec>) -> Self {
        Self {
            legs,
            reselect: Reselect::default(),
            excluded: Vec::new(),
        }
    }

    /// Single fixed leg of weight 1.
    pub fn single(bet: Bet) -> Self {
        Self::new(vec![LegSpec::new(Target::Fixed(bet))])
    }

    pub fn validate(&self) -> Result<(), DefinitionError> {
        if self.legs.is_empty() {
            return Err(DefinitionError::EmptyShape);
        }
        if self.legs.len() > MAX_LEGS {
            return Err(DefinitionError::TooManyLegs {
                legs: self.legs.len(),
                max: MAX_LEGS,
            });
        }
        for (leg, spec) in self.legs.iter().enumerate() {
            if spec.weight == 0 {
                return Err(DefinitionError::ZeroWeight { leg });
            }
            match spec.target {
                Target::Hot { lookback: 0, .. } | Target::Cold { lookback: 0, .. } => {
                    return Err(DefinitionError::ZeroLookback { leg });
                }
                Target::Random(kind) => {
                    let wanted = self
                        .legs
                        .iter()
                        .filter(|other| other.target == Target::Random(kind))
                        .count();
                    let available = candidates(kind)
                        .into_iter()
                        .filter(|bet| !self.excluded.contains(bet))
                        .count();
                    if wanted > available {
                        return Err(DefinitionError::NotEnoughCandidates { kind });
                    }
                }
                Target::Hot { sector, .. } | Target::Cold { sector, .. } => {
                    let wanted = self
                        .legs
                        .iter()
                        .filter(|other| match other.target {
                            Target::Hot { sector: s, .. } | Target::Cold { sector: s, .. } => {
                                s == sector
                            }
                            _ => false,
                        })
                        .count();
                    if wanted > sector.regions() as usize {
                        return Err(DefinitionError::NotEnoughCandidates {
                            kind: sector_kind(sector),
                        });
                    }
                }
                Target::Fixed(_) | Target::FollowLast(_) => {}
            }
        }
        Ok(())
    }

    /// Whether a persisted coverage set still matches this shape.
    pub fn fits(&self, coverage: &[Bet]) -> bool {
        coverage.len() == self.legs.len()
            && self
                .legs
                .iter()
                .zip(coverage)
                .all(|(leg, bet)| leg.target.accepts(bet, &self.excluded))
    }

    /// Resolve every leg to a position.
    ///
    /// With `reuse`, a `previous` coverage that still fits is returned as-is.
    /// Returns `None` when history is insufficient (empty, a zero for a
    /// follow-the-last target, or shorter than a lookback).
    pub fn resolve<R: RngCore>(
        &self,
        history: &[SpinRecord],
        rng: &mut R,
        previous: &[Bet],
        reuse: bool,
    ) -> Option<Vec<Bet>> {
        if reuse && self.fits(previous) {
            return Some(previous.to_vec());
        }
        let mut chosen: Vec<Bet> = Vec::with_capacity(self.legs.len());
        for leg in &self.legs {
            let bet = match leg.target {
                Target::Fixed(bet) => bet,
                Target::Random(kind) => {
                    let pool: Vec<Bet> = candidates(kind)
                        .into_iter()
                        .filter(|bet| !self.excluded.contains(bet) && !chosen.contains(bet))
                        .collect();
                    if pool.is_empty() {
                        return None;
                    }
                    pool[rng.gen_range(0..pool.len())]
                }
                Target::FollowLast(sector) => {
                    let last = history.last()?;
                    let region = sector.locate(last.number())?;
                    Bet::for_sector(sector, region).ok()?
                }
                Target::Hot { sector, lookback } => {
                    rank(history, sector, lookback, &chosen, Temperature::Hot)?
                }
                Target::Cold { sector, lookback } => {
                    rank(history, sector, lookback, &chosen, Temperature::Cold)?
                }
            };
            chosen.push(bet);
        }
        Some(chosen)
    }

    /// Size resolved legs: `unit(kind) * multiplier * weight`, saturating.
    pub fn size(
        &self,
        coverage: &[Bet],
        unit: Unit,
        multiplier: u64,
        limits: &BetLimits,
    ) -> Vec<WagerRequest> {
        self.legs
            .iter()
            .zip(coverage)
            .map(|(leg, bet)| {
                let amount = unit
                    .amount(bet.kind(), limits)
                    .saturating_mul(multiplier)
                    .saturating_mul(leg.weight);
                WagerRequest::new(*bet, amount)
            })
            .collect()
    }
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum Temperature {
    Hot,
    Cold,
}

/// Pick the hottest or coldest region over the last `lookback` spins,
/// skipping regions already chosen. Ties go to the lowest region.
fn rank(
    history: &[SpinRecord],
    sector: Sector,
    lookback: usize,
    chosen: &[Bet],
    temperature: Temperature,
) -> Option<Bet> {
    if lookback == 0 || history.len() < lookback {
        return None;
    }
    let mut counts = [0usize; 4];
    for spin in &history[history.len() - lookback..] {
        if let Some(region) = sector.locate(spin.number()) {
            counts[region as usize] += 1;
        }
    }
    let mut best: Option<(usize, Bet)> = None;
    for region in 1..=sector.regions() {
        let Ok(bet) = Bet::for_sector(sector, region) else {
            continue;
        };
        if chosen.contains(&bet) {
            continue;
        }
        let count = counts[region as usize];
        let better = match (best, temperature) {
            (None, _) => true,
            (Some((current, _)), Temperature::Hot) => count > current,
            (Some((current, _)), Temperature::Cold) => count < current,
        };
        if better {
            best = Some((count, bet));
        }
    }
    best.map(|(_, bet)| bet)
}

/// Every position of a kind, in board order.
pub fn candidates(kind: BetKind) -> Vec<Bet> {
    match kind {
        BetKind::Straight => (0..=MAX_NUMBER).map(Bet::Straight).collect(),
        BetKind::Split => all_splits().map(Bet::Split).collect(),
        BetKind::Street => all_streets().map(Bet::Street).collect(),
        BetKind::Corner => all_corners().map(Bet::Corner).collect(),
        BetKind::Line => all_lines().map(Bet::Line).collect(),
        BetKind::Column => (1..=3).map(Bet::Column).collect(),
        BetKind::Dozen => (1..=3).map(Bet::Dozen).collect(),
        BetKind::EvenMoney => [
            EvenMoney::Red,
            EvenMoney::Black,
            EvenMoney::Odd,
            EvenMoney::Even,
            EvenMoney::Low,
            EvenMoney::High,
        ]
        .into_iter()
        .map(Bet::EvenMoney)
        .collect(),
    }
}
