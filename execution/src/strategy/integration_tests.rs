use super::*;
use crate::{
    mocks::{spins, table_limits, Table},
    presets::{preset, PRESETS},
    Outcome, Runtime, StrategyDefinition, Unit,
};
use proptest::prelude::*;
use wheelhouse_types::{Bet, EvenMoney, Mode, StrategyState, WagerRequest};

fn load(name: &str) -> Runtime {
    Runtime::new(preset(name).unwrap(), table_limits()).unwrap()
}

#[test]
fn test_martingale_red_doubles_after_black() {
    let runtime = load("martingale-red");
    let mut table = Table::new(1000);

    let first = table.decide(&runtime);
    assert_eq!(
        first,
        vec![WagerRequest::new(Bet::EvenMoney(EvenMoney::Red), 5)]
    );
    table.settle(&first, 17);
    assert_eq!(table.bankroll, 995);

    let second = table.decide(&runtime);
    assert_eq!(
        second,
        vec![WagerRequest::new(Bet::EvenMoney(EvenMoney::Red), 10)]
    );
    assert_eq!(table.state.level, 1);
}

#[test]
fn test_martingale_overflow_resets() {
    let runtime = load("martingale-red");
    let mut table = Table::new(10_000);
    // Eight blacks exhaust the eight-level ladder
    let placed = table.play(&runtime, &[2, 4, 6, 8, 10, 11, 13, 15]);
    let amounts: Vec<u64> = placed.iter().map(|w| w[0].amount).collect();
    assert_eq!(amounts, vec![5, 10, 20, 40, 80, 160, 320, 500]);
    assert_eq!(table.decide(&runtime)[0].amount, 5);
    assert_eq!(table.state.level, 0);
}

#[test]
fn test_dozen_hedge_push_holds() {
    let definition = StrategyDefinition {
        unit: Unit::Fixed(10),
        ..preset("dozen-hedge").unwrap()
    };
    let runtime = Runtime::new(definition, table_limits()).unwrap();
    let mut table = Table::new(1000);

    // A loss in the third dozen (outside the push sector) escalates
    let first = table.decide(&runtime);
    table.settle(&first, 30);
    let before = table.decide(&runtime);
    assert_eq!(table.state.level, 1);
    assert_eq!(
        before,
        vec![
            WagerRequest::new(Bet::Dozen(1), 30),
            WagerRequest::new(Bet::Dozen(2), 30),
        ]
    );

    // 26 is uncovered but inside the push sector
    table.settle(&before, 26);
    let decision = runtime.step(
        &table.history,
        table.bankroll,
        &mut table.state,
        &mut StrategyRng::new(0, table.history.len() as u64),
    );
    assert_eq!(decision.outcome, Some(Outcome::Push));
    assert_eq!(table.state.level, 1);
    assert_eq!(decision.wagers, before);
}

#[test]
fn test_bankroll_shortfall_skips() {
    let definition = StrategyDefinition {
        unit: Unit::Fixed(150),
        ..preset("fibonacci-dozens").unwrap()
    };
    let runtime = Runtime::new(definition, table_limits()).unwrap();
    let mut state = StrategyState::default();
    assert!(runtime.decide_seeded(&[], 250, &mut state).is_empty());
    assert!(state.last_wagers.is_empty());

    // With enough bankroll the same total is placed
    let mut state = StrategyState::default();
    let wagers = runtime.decide_seeded(&[], 300, &mut state);
    assert_eq!(wagers.iter().map(|w| w.amount).sum::<u64>(), 300);
}

#[test]
fn test_reset_on_new_high() {
    let runtime = load("dalembert-even");
    let mut table = Table::new(100);
    // Three odd results: 5 + 10 + 15 lost, the last one not yet classified
    table.play(&runtime, &[1, 3, 5]);
    assert_eq!(table.bankroll, 70);
    assert_eq!(table.state.level, 2);

    // The host tops the bankroll up above the mark: the reset beats the loss
    let decision = runtime.step(
        &table.history,
        150,
        &mut table.state,
        &mut StrategyRng::new(0, 3),
    );
    assert_eq!(decision.outcome, Some(Outcome::Loss));
    assert!(decision.reset);
    assert_eq!(table.state.level, 0);
    assert_eq!(table.state.consecutive_losses, 0);
    assert_eq!(table.state.watermark.high_water_mark, 150);
    assert_eq!(table.state.watermark.starting_bankroll, 100);
    assert_eq!(decision.wagers[0].amount, 5);
}

#[test]
fn test_tiered_columns() {
    let definition = StrategyDefinition {
        reset_on_new_high: false,
        ..preset("tiered-columns").unwrap()
    };
    let runtime = Runtime::new(definition, table_limits()).unwrap();
    let mut table = Table::new(5000);
    // 1 is red and in the first column: both legs lose three times
    table.play(&runtime, &[1, 1, 1, 6]);
    assert_eq!(table.state.level, 3);

    // 6 is black and in the third column: one win is not enough above the threshold
    table.play(&runtime, &[6]);
    assert_eq!(table.state.level, 3);
    assert_eq!(table.state.consecutive_wins, 1);

    // The second steps down
    table.decide(&runtime);
    assert_eq!(table.state.level, 2);
    assert_eq!(table.state.consecutive_wins, 0);
}

#[test]
fn test_random_corners_are_seeded_and_kept_until_reset() {
    let runtime = load("random-corners");
    let mut a = StrategyState::default();
    let mut b = StrategyState::default();
    let first = runtime.decide_seeded(&[], 1000, &mut a);
    assert_eq!(first, runtime.decide_seeded(&[], 1000, &mut b));
    assert_eq!(first.len(), 3);

    // Coverage survives a loss
    let mut table = Table::new(1000);
    let first = table.decide(&runtime);
    let miss = (0..=36u8)
        .find(|n| !first.iter().any(|w| w.bet.covers(*n)))
        .unwrap();
    table.settle(&first, miss);
    let second = table.decide(&runtime);
    let bets = |w: &[WagerRequest]| w.iter().map(|w| w.bet).collect::<Vec<Bet>>();
    assert_eq!(bets(&first), bets(&second));
    assert_eq!(second[0].amount, 2);
}

#[test]
fn test_wait_for_three_gates_entry() {
    let runtime = load("wait-for-three");
    let mut table = Table::new(1000);
    let placed = table.play(&runtime, &[1, 2, 3]);
    assert!(placed.iter().all(|w| w.is_empty()));
    assert_eq!(table.state.mode, Mode::Virtual);
    assert_eq!(table.state.gate_run, 2);

    // Third spin in the first dozen opens the gate; the coldest dozens are 2 and 3
    let wagers = table.decide(&runtime);
    assert_eq!(table.state.mode, Mode::Active);
    assert_eq!(
        wagers,
        vec![
            WagerRequest::new(Bet::Dozen(2), 5),
            WagerRequest::new(Bet::Dozen(3), 5),
        ]
    );
}

#[test]
fn test_cold_dozen_needs_37_spins() {
    let runtime = load("cold-dozen");
    let mut table = Table::new(1000);
    let numbers: Vec<u8> = (0..37).map(|i| (i % 24) + 1).collect();
    let placed = table.play(&runtime, &numbers);
    assert!(placed.iter().all(|w| w.is_empty()));
    assert_eq!(
        table.decide(&runtime),
        vec![WagerRequest::new(Bet::Dozen(3), 5)]
    );
}

#[test]
fn test_skip_continuity_matches_active_ladder() {
    let runtime = load("skip-after-three");
    let ladder = runtime.ladder();
    let mut table = Table::new(1000);
    // Evens lose the odd bet: 5, 10 and 20 staked, then skipping
    let placed = table.play(&runtime, &[2, 4, 6, 8]);
    assert!(placed[3].is_empty());
    assert_eq!(table.state.mode, Mode::Skipping);
    assert_eq!(table.bankroll, 965);
    let entry = ladder::LadderStep {
        level: table.state.level,
        consecutive_wins: table.state.consecutive_wins,
        consecutive_losses: table.state.consecutive_losses,
    };
    assert_eq!(entry.level, 3);

    // Hypothetical losses are neither staked nor escalated
    let placed = table.play(&runtime, &[10, 0, 7]);
    assert!(placed.iter().all(|w| w.is_empty()));
    assert_eq!(table.bankroll, 965);
    assert_eq!(table.state.level, entry.level);
    assert_eq!(table.state.shadow_wagers[0].amount, 40);

    // The hypothetical win lands where an active win from the entry step would
    let wagers = table.decide(&runtime);
    let expected = ladder.advance(entry, Outcome::Win, false);
    assert_eq!(table.state.mode, Mode::Active);
    assert_eq!(table.state.level, expected.level);
    assert_eq!(table.state.consecutive_losses, expected.consecutive_losses);
    assert_eq!(wagers[0].amount, 5);
}

#[test]
fn test_state_persists_through_json_and_codec() {
    use commonware_codec::{DecodeExt, Encode};

    let runtime = load("martingale-red");
    let mut table = Table::new(1000);
    table.play(&runtime, &[2, 4]);

    let json = serde_json::to_string(&table.state).unwrap();
    let mut from_json: StrategyState = serde_json::from_str(&json).unwrap();
    let mut from_codec = StrategyState::decode(table.state.encode()).unwrap();

    let history = table.history.clone();
    let expected = table.decide(&runtime);
    assert_eq!(
        runtime.decide_seeded(&history, 985, &mut from_json),
        expected
    );
    assert_eq!(
        runtime.decide_seeded(&history, 985, &mut from_codec),
        expected
    );
}

fn any_preset() -> impl Strategy<Value = &'static str> {
    prop::sample::select(PRESETS.to_vec())
}

proptest! {
    #[test]
    fn prop_never_overdraws(
        name in any_preset(),
        numbers in prop::collection::vec(0u8..=36, 1..120),
        bankroll in 1u64..2_000,
    ) {
        let runtime = load(name);
        let limits = *runtime.limits();
        let mut table = Table::new(bankroll);
        for number in numbers {
            let wagers = table.decide(&runtime);
            let staked: u64 = wagers.iter().map(|w| w.amount).sum();
            prop_assert!(staked <= table.bankroll);
            for wager in &wagers {
                prop_assert!(wager.amount >= limits.lower_bound(wager.kind()));
                prop_assert!(wager.amount <= limits.max());
            }
            table.settle(&wagers, number);
        }
    }

    #[test]
    fn prop_decisions_are_deterministic(
        name in any_preset(),
        numbers in prop::collection::vec(0u8..=36, 0..60),
        bankroll in 100u64..5_000,
    ) {
        let runtime = load(name);
        let history = spins(&numbers);
        let mut a = StrategyState::new(1000, Mode::Active);
        a.level = 2;
        a.last_wagers = vec![WagerRequest::new(Bet::Dozen(1), 5)];
        let mut b = a.clone();
        let first = runtime.decide_seeded(&history, bankroll, &mut a);
        let second = runtime.decide_seeded(&history, bankroll, &mut b);
        prop_assert_eq!(first, second);
        prop_assert_eq!(a, b);
    }

    #[test]
    fn prop_new_high_resets_ladder(
        numbers in prop::collection::vec(1u8..=36, 1..40),
    ) {
        let runtime = load("fibonacci-dozens");
        let mut table = Table::new(1000);
        table.play(&runtime, &numbers);
        let bankroll = table.state.watermark.high_water_mark.max(table.bankroll) + 1;
        let history = table.history.clone();
        runtime.decide_seeded(&history, bankroll, &mut table.state);
        prop_assert_eq!(table.state.level, 0);
        prop_assert_eq!(table.state.watermark.high_water_mark, bankroll);
    }
}
