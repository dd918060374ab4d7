use proptest::prelude::*;
use crate::{BasicDice, Bonus, Operation, RollResult, SolveMode, TargetedBonus, UnifiedDice};


pub(crate) fn basic_dice_strategy() -> impl Strategy<Value = BasicDice> {
    (1u64..=100, -1000i64..=1000, -1000i64..=1000)
        .prop_map(|(count, start, end)| BasicDice::new(count, start, end).unwrap())
}

/// An operation with an operand it can always apply to small values.
///
/// Operands are non-negative quarters so they display and parse back exactly.
/// Divisors are never zero and exponents are small integers.
pub(crate) fn operand_strategy() -> impl Strategy<Value = (Operation, f64)> {
    prop::sample::select(Operation::ALL.to_vec())
        .prop_flat_map(|operation| {
            let operand = match operation {
                Operation::Power => (0u32..=2).prop_map(f64::from).boxed(),
                Operation::Divide => (1u32..=400).prop_map(|n| n as f64 / 4.0).boxed(),
                _ => (0u32..=400).prop_map(|n| n as f64 / 4.0).boxed(),
            };

            operand.prop_map(move |value| (operation, value))
        })
}

pub(crate) fn bonus_strategy() -> impl Strategy<Value = Bonus> {
    operand_strategy().prop_map(|(operation, value)| Bonus::new(operation, value))
}

pub(crate) fn targeted_bonus_strategy() -> impl Strategy<Value = TargetedBonus> {
    (
        prop::collection::btree_set(1usize..=20, 1..4),
        prop::collection::vec(operand_strategy(), 1..=3)
    ).prop_map(|(positions, operations)| TargetedBonus::new(positions, operations).unwrap())
}

/// Rolls whose every solve stays finite.
pub(crate) fn unified_dice_strategy() -> impl Strategy<Value = UnifiedDice> {
    (
        (1u64..=50, -20i64..=20, -20i64..=20),
        prop::collection::vec(bonus_strategy(), 0..=2),
        prop::option::of(targeted_bonus_strategy())
    ).prop_map(|((count, start, end), bonuses, targeted)| {
        let dice = BasicDice::new(count, start, end).unwrap();
        let targeted: Vec<TargetedBonus> = targeted.into_iter().collect();

        let unnamed = UnifiedDice::new("", dice, bonuses.clone(), targeted.clone());
        UnifiedDice::new(unnamed.to_string(), dice, bonuses, targeted)
    })
}

pub(crate) fn roll_result_strategy() -> impl Strategy<Value = RollResult> {
    (
        unified_dice_strategy(),
        prop::sample::select(vec![SolveMode::Random, SolveMode::Max, SolveMode::Min])
    ).prop_map(|(dice, mode)| dice.solve(mode).unwrap())
}
