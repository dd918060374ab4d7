use proptest::prelude::*;


pub(crate) fn operator_strategy() -> impl Strategy<Value = &'static str> {
    prop_oneof![Just("+"), Just("-"), Just("*"), Just("/"), Just("**")]
}

pub(crate) fn number_strategy() -> impl Strategy<Value = String> {
    prop_oneof![
        3 => (1u16..=1000).prop_map(|n| n.to_string()),
        1 => (0u16..=100, 1u8..=99).prop_map(|(whole, frac)| format!("{whole}.{frac:02}")),
    ]
}

pub(crate) fn dice_strategy() -> impl Strategy<Value = String> {
    (
        prop::option::of(1u16..=100),
        prop::option::of((1u16..=1000, prop::option::of(0u16..=1000)))
    ).prop_map(|(count, range)| {
        let count = count.map(|n| n.to_string()).unwrap_or_default();

        match range {
            None => format!("{count}d"),
            Some((end, None)) => format!("{count}d{end}"),
            Some((start, Some(end))) => format!("{count}d{start}:{end}"),
        }
    })
}

pub(crate) fn bonus_strategy() -> impl Strategy<Value = String> {
    (operator_strategy(), number_strategy(), any::<bool>())
        .prop_map(|(op, value, spaced)| {
            if spaced {
                format!(" {op} {value}")
            } else {
                format!("{op}{value}")
            }
        })
}

pub(crate) fn targeted_strategy() -> impl Strategy<Value = String> {
    (
        prop::collection::vec(1u8..=20, 1..4),
        prop::collection::vec((operator_strategy(), number_strategy()), 1..4)
    ).prop_map(|(positions, operations)| {
        let positions: Vec<String> = positions.iter().map(ToString::to_string).collect();
        let operations: String = operations.iter()
            .map(|(op, value)| format!("{op}{value}"))
            .collect();

        format!("i{}:{operations}", positions.join(","))
    })
}

/// Well-formed notation: optional dice, a bonus chain, then targeted segments.
pub(crate) fn notation_strategy() -> impl Strategy<Value = String> {
    (
        prop::option::of(dice_strategy()),
        prop::collection::vec(bonus_strategy(), 0..5),
        prop::collection::vec(targeted_strategy(), 0..3),
        any::<bool>()
    ).prop_map(|(dice, bonuses, targeted, trailing)| {
        // a lone bonus like `-5` would read as a plain integer
        let mut notation = match dice {
            Some(dice) => dice,
            None if targeted.is_empty() => "d".to_string(),
            None => String::new(),
        };
        notation.push_str(&bonuses.concat());

        if !targeted.is_empty() {
            notation.push(' ');
            notation.push_str(&targeted.join(";"));
            if trailing {
                notation.push(';');
            }
        }

        notation
    })
}
