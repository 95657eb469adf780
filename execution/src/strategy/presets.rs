//! Named strategies expressed purely as definitions.

use super::{
    clamp::ShortfallPolicy,
    classifier::PushPolicy,
    ladder::{Cleared, LadderConfig, LevelTable, OverflowPolicy, Transition},
    runtime::StrategyDefinition,
    shape::{BetShape, LegSpec, Reselect, Target, Unit},
    tracker::{EntryGate, SkipPolicy, Trigger},
};
use wheelhouse_types::{Bet, BetKind, EvenMoney, Sector};

/// Every preset name, in catalogue order.
pub const PRESETS: [&str; 10] = [
    "martingale-red",
    "grand-martingale-black",
    "dalembert-even",
    "fibonacci-dozens",
    "dozen-hedge",
    "tiered-columns",
    "random-corners",
    "wait-for-three",
    "cold-dozen",
    "skip-after-three",
];

fn ladder(table: LevelTable, transition: Transition, overflow: OverflowPolicy) -> LadderConfig {
    LadderConfig {
        table,
        transition,
        overflow,
        losses_per_step: 1,
    }
}

fn definition(name: &str, shape: BetShape, ladder: LadderConfig) -> StrategyDefinition {
    StrategyDefinition {
        name: name.to_string(),
        unit: Unit::TableMin,
        shape,
        ladder,
        push: PushPolicy::default(),
        entry: None,
        skip: None,
        reset_on_new_high: true,
        shortfall: ShortfallPolicy::Skip,
        seed: 0,
    }
}

fn fixed(bets: &[Bet]) -> BetShape {
    BetShape::new(
        bets.iter()
            .map(|bet| LegSpec::new(Target::Fixed(*bet)))
            .collect(),
    )
}

fn martingale(levels: usize) -> LevelTable {
    LevelTable::Geometric { factor: 2, levels }
}

/// Look up a preset by name.
pub fn preset(name: &str) -> Option<StrategyDefinition> {
    let preset = match name {
        "martingale-red" => definition(
            name,
            BetShape::single(Bet::EvenMoney(EvenMoney::Red)),
            ladder(martingale(8), Transition::ResetOnWin, OverflowPolicy::Reset),
        ),
        "grand-martingale-black" => definition(
            name,
            BetShape::single(Bet::EvenMoney(EvenMoney::Black)),
            ladder(martingale(8), Transition::ResetOnRecovery, OverflowPolicy::Cap),
        ),
        "dalembert-even" => definition(
            name,
            BetShape::single(Bet::EvenMoney(EvenMoney::Even)),
            ladder(
                LevelTable::Linear {
                    start: 1,
                    increment: 1,
                    levels: 20,
                },
                Transition::ResetOnWin,
                OverflowPolicy::Cap,
            ),
        ),
        "fibonacci-dozens" => definition(
            name,
            fixed(&[Bet::Dozen(1), Bet::Dozen(2)]),
            ladder(
                LevelTable::Recurrence {
                    first: 1,
                    second: 1,
                    levels: 12,
                },
                Transition::ResetOnWin,
                OverflowPolicy::Reset,
            ),
        ),
        "dozen-hedge" => StrategyDefinition {
            push: PushPolicy::sector([25, 26, 27]),
            ..definition(
                name,
                fixed(&[Bet::Dozen(1), Bet::Dozen(2)]),
                ladder(
                    LevelTable::Sequence(vec![1, 3, 9, 27]),
                    Transition::ResetOnWin,
                    OverflowPolicy::Reset,
                ),
            )
        },
        "tiered-columns" => definition(
            name,
            BetShape::new(vec![
                LegSpec::new(Target::Fixed(Bet::Column(3))),
                LegSpec::weighted(Target::Fixed(Bet::EvenMoney(EvenMoney::Black)), 2),
            ]),
            ladder(
                LevelTable::Sequence(vec![1, 2, 4, 8, 16]),
                Transition::Tiered {
                    threshold: 2,
                    wins_required: 2,
                    cleared: Cleared::StepDown,
                },
                OverflowPolicy::RecycleTo(2),
            ),
        ),
        "random-corners" => definition(
            name,
            BetShape {
                legs: vec![LegSpec::new(Target::Random(BetKind::Corner)); 3],
                reselect: Reselect::OnReset,
                excluded: Vec::new(),
            },
            ladder(
                LevelTable::Linear {
                    start: 1,
                    increment: 1,
                    levels: 10,
                },
                Transition::ResetOnWin,
                OverflowPolicy::Cap,
            ),
        ),
        "wait-for-three" => StrategyDefinition {
            entry: Some(EntryGate {
                trigger: Trigger::Repeat(Sector::Dozen),
                run_length: 3,
                rearm_on_win: true,
            }),
            ..definition(
                name,
                BetShape {
                    legs: vec![
                        LegSpec::new(Target::Cold {
                            sector: Sector::Dozen,
                            lookback: 3,
                        });
                        2
                    ],
                    reselect: Reselect::EverySpin,
                    excluded: Vec::new(),
                },
                ladder(
                    LevelTable::Sequence(vec![1, 3, 9]),
                    Transition::ResetOnWin,
                    OverflowPolicy::Reset,
                ),
            )
        },
        "cold-dozen" => definition(
            name,
            BetShape::new(vec![LegSpec::new(Target::Cold {
                sector: Sector::Dozen,
                lookback: 37,
            })]),
            ladder(
                LevelTable::Sequence(vec![1, 1, 2, 3, 4, 6, 9, 14]),
                Transition::ResetOnWin,
                OverflowPolicy::Cap,
            ),
        ),
        "skip-after-three" => StrategyDefinition {
            skip: Some(SkipPolicy { after_losses: 3 }),
            ..definition(
                name,
                BetShape::single(Bet::EvenMoney(EvenMoney::Odd)),
                ladder(martingale(8), Transition::ResetOnWin, OverflowPolicy::Reset),
            )
        },
        _ => return None,
    };
    Some(preset)
}
