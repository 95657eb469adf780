//! Common types used throughout wheelhouse.
//!
//! Everything a host simulator and a strategy runtime exchange lives here: the
//! board layout, wager requests, resolved spins, table limits and the
//! persistent strategy state. The runtime itself lives in `wheelhouse-execution`.

pub mod roulette;

pub use roulette::{
    Bet, BetKind, BetLimits, Color, EvenMoney, LayoutError, LimitsError, Mode, Sector,
    SessionWatermark, SpinRecord, StrategyState, WagerRequest,
};
