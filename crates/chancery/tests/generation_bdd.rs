//! Behavioural tests for seeded generation.
//!
//! These scenarios cover replay under equal seeds, the Luhn worked example,
//! collection sampling and the bounded failure modes.

// `expect` is idiomatic in test code for failing fast on precondition violations.
#![expect(
    clippy::expect_used,
    reason = "test code uses expect for clear failure messages"
)]

use std::collections::BTreeSet;

use chancery::sampling::{IntegerRange, NormalOptions};
use chancery::{Chance, ChanceError, ErrorKind, luhn_calculate};
use rstest::fixture;
use rstest_bdd::Slot;
use rstest_bdd_macros::{ScenarioState, given, scenario, then, when};
use serde_json::{Value, json};

const WORKED_EXAMPLE: &str = "7992739871";
const POOL: [i64; 5] = [1, 2, 3, 4, 5];

/// Test world holding the instance under test and the values it produced.
#[derive(Default, ScenarioState)]
struct World {
    chance: Slot<Chance>,
    first_draws: Slot<Vec<i64>>,
    second_draws: Slot<Vec<i64>>,
    check_digit: Slot<u8>,
    picks: Slot<Vec<i64>>,
    rolls: Slot<Vec<Value>>,
    failure: Slot<ChanceError>,
}

impl World {
    fn chance(&self) -> Chance {
        self.chance.get().expect("chance instance should be set")
    }

    fn failure(&self) -> ChanceError {
        self.failure.get().expect("a failure should be recorded")
    }

    fn record<T>(&self, result: Result<T, ChanceError>) {
        if let Err(err) = result {
            self.failure.set(err);
        }
    }
}

#[fixture]
fn world() -> World {
    World::default()
}

fn draw_three(chance: &mut Chance) -> Vec<i64> {
    (0..3)
        .map(|_| chance.integer(IntegerRange::new(1, 10)).expect("valid range"))
        .collect()
}

// ============================================================================
// Given steps
// ============================================================================

#[given("a chance instance seeded with {seed:u64}")]
fn a_chance_instance_seeded_with(world: &World, seed: u64) {
    world.chance.set(Chance::seeded(seed));
}

#[given("a dice mixin is registered")]
fn a_dice_mixin_is_registered(world: &World) {
    let mut chance = world.chance();
    chance.mixin("dice", |instance, _| {
        let roll = instance.integer(IntegerRange::new(1, 6))?;
        Ok(json!(roll))
    });
    world.chance.set(chance);
}

// ============================================================================
// When steps
// ============================================================================

#[when("three integers between 1 and 10 are drawn")]
fn three_integers_are_drawn(world: &World) {
    let mut chance = world.chance();
    world.first_draws.set(draw_three(&mut chance));
    world.chance.set(chance);
}

#[when("a fresh instance seeded with {seed:u64} draws three integers between 1 and 10")]
fn a_fresh_instance_draws_three_integers(world: &World, seed: u64) {
    let mut fresh = Chance::seeded(seed);
    world.second_draws.set(draw_three(&mut fresh));
}

#[when("the Luhn check digit of the worked example is calculated")]
fn the_luhn_check_digit_is_calculated(world: &World) {
    let digit = luhn_calculate(WORKED_EXAMPLE).expect("digits only");
    world.check_digit.set(digit);
}

#[when("five values are picked from the pool one to five")]
fn five_values_are_picked(world: &World) {
    let mut chance = world.chance();
    let picks = chance.pickset(&POOL, POOL.len()).expect("count fits the pool");
    world.picks.set(picks);
}

#[when("a normal pool value is drawn from an empty pool")]
fn a_normal_pool_value_is_drawn_from_an_empty_pool(world: &World) {
    let mut chance = world.chance();
    let empty: [i64; 0] = [];
    world.record(chance.normal_pool(NormalOptions::default(), &empty));
}

#[when("five unique values are requested from a generator with three outcomes")]
fn five_unique_values_are_requested(world: &World) {
    let mut chance = world.chance();
    world.record(chance.unique(5, |instance| instance.integer(IntegerRange::new(1, 3))));
}

#[when("a file extension is requested for an unknown category")]
fn a_file_extension_is_requested_for_an_unknown_category(world: &World) {
    let mut chance = world.chance();
    world.record(chance.file_extension(Some("nonexistent")));
}

#[when("the dice generator is called twenty times")]
fn the_dice_generator_is_called(world: &World) {
    let mut chance = world.chance();
    let rolls = (0..20)
        .map(|_| chance.call("dice", &Value::Null).expect("dice is registered"))
        .collect();
    world.rolls.set(rolls);
}

// ============================================================================
// Then steps
// ============================================================================

#[then("both sequences are identical")]
fn both_sequences_are_identical(world: &World) {
    let first = world.first_draws.get().expect("first draws should be set");
    let second = world.second_draws.get().expect("second draws should be set");
    assert_eq!(first.len(), 3);
    assert_eq!(first, second, "equal seeds should replay equal values");
}

#[then("the check digit is {digit:u8}")]
fn the_check_digit_is(world: &World, digit: u8) {
    assert_eq!(world.check_digit.get(), Some(digit));
}

#[then("the picks are a permutation of the pool")]
fn the_picks_are_a_permutation(world: &World) {
    let picks = world.picks.get().expect("picks should be set");
    let distinct: BTreeSet<i64> = picks.iter().copied().collect();
    assert_eq!(picks.len(), POOL.len());
    assert_eq!(distinct, POOL.into_iter().collect::<BTreeSet<_>>());
}

#[then("the call fails with a range error")]
fn the_call_fails_with_a_range_error(world: &World) {
    let err = world.failure();
    assert_eq!(err.kind(), ErrorKind::Range, "unexpected error: {err:?}");
}

#[then("the error reports unique exhaustion")]
fn the_error_reports_unique_exhaustion(world: &World) {
    match world.failure() {
        ChanceError::UniqueExhausted {
            requested: 5,
            collected: 3,
            ..
        } => {}
        other => panic!("Expected UniqueExhausted, got: {other:?}"),
    }
}

#[then("the error message lists the built-in categories")]
fn the_error_message_lists_the_built_in_categories(world: &World) {
    assert_eq!(
        world.failure().to_string(),
        "unknown file type 'nonexistent'; expected one of: raster, vector, 3d, document"
    );
}

#[then("every roll is between 1 and 6")]
fn every_roll_is_between_1_and_6(world: &World) {
    let rolls = world.rolls.get().expect("rolls should be set");
    assert_eq!(rolls.len(), 20);
    for roll in rolls {
        let value = roll.as_i64().expect("integer roll");
        assert!((1..=6).contains(&value), "roll out of range: {value}");
    }
}

// ============================================================================
// Scenario bindings
// ============================================================================

#[scenario(
    path = "tests/features/generation.feature",
    name = "Seeded instances replay integer sequences"
)]
fn seeded_instances_replay_integer_sequences(world: World) {
    let _ = world;
}

#[scenario(
    path = "tests/features/generation.feature",
    name = "Luhn check digit for the worked example"
)]
fn luhn_check_digit_for_the_worked_example(world: World) {
    let _ = world;
}

#[scenario(
    path = "tests/features/generation.feature",
    name = "Picking a full set yields a permutation"
)]
fn picking_a_full_set_yields_a_permutation(world: World) {
    let _ = world;
}

#[scenario(
    path = "tests/features/generation.feature",
    name = "Normal pool sampling from an empty pool fails"
)]
fn normal_pool_sampling_from_an_empty_pool_fails(world: World) {
    let _ = world;
}

#[scenario(
    path = "tests/features/generation.feature",
    name = "Unique sampling gives up on a small domain"
)]
fn unique_sampling_gives_up_on_a_small_domain(world: World) {
    let _ = world;
}

#[scenario(
    path = "tests/features/generation.feature",
    name = "Unknown file categories list the permitted ones"
)]
fn unknown_file_categories_list_the_permitted_ones(world: World) {
    let _ = world;
}

#[scenario(
    path = "tests/features/generation.feature",
    name = "Mixins are callable by name"
)]
fn mixins_are_callable_by_name(world: World) {
    let _ = world;
}
