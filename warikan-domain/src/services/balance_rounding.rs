//! Whole-unit rounding of exact balances under a zero-sum constraint.
//!
//! Balances are first rounded independently. The rounded values can miss
//! zero by a few units, so the residue is handed back one unit at a time to
//! the participants whose rounding favoured them most. Each final value stays
//! within one unit of its exact balance.

use std::{fmt, str::FromStr};

use crate::{model::Money, services::balance_calculator::ExactBalance};
use rust_decimal::{Decimal, RoundingStrategy, prelude::ToPrimitive};
use thiserror::Error;

/// Rounding mode for balance quantization.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum RoundingMode {
    /// Round half away from zero (e.g., 0.5 -> 1, -0.5 -> -1).
    #[default]
    HalfUp,
    /// Round half to nearest even number (banker's rounding).
    HalfEven,
}

impl RoundingMode {
    fn strategy(self) -> RoundingStrategy {
        match self {
            RoundingMode::HalfUp => RoundingStrategy::MidpointAwayFromZero,
            RoundingMode::HalfEven => RoundingStrategy::MidpointNearestEven,
        }
    }
}

impl fmt::Display for RoundingMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RoundingMode::HalfUp => f.write_str("half-up"),
            RoundingMode::HalfEven => f.write_str("half-even"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown rounding mode '{0}' (expected half-up or half-even)")]
pub struct UnknownRoundingMode(pub String);

impl FromStr for RoundingMode {
    type Err = UnknownRoundingMode;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().replace('_', "-").as_str() {
            "half-up" => Ok(RoundingMode::HalfUp),
            "half-even" => Ok(RoundingMode::HalfEven),
            _ => Err(UnknownRoundingMode(s.to_owned())),
        }
    }
}

/// Rounds `balances` to whole units so that the result sums to exactly zero.
///
/// The output is index-aligned with `balances`. Adjustment candidates are
/// ranked by how much rounding moved them in the direction of the residue,
/// then by name, so the result does not depend on input order beyond names.
pub fn quantize_balances(balances: &[ExactBalance], mode: RoundingMode) -> Vec<Money> {
    let strategy = mode.strategy();

    let mut entries: Vec<(i64, Decimal)> = balances
        .iter()
        .map(|entry| {
            let rounded = entry.balance.round_dp_with_strategy(0, strategy);
            (to_units(rounded), rounded - entry.balance)
        })
        .collect();

    let residue: i128 = entries.iter().map(|(units, _)| i128::from(*units)).sum();

    if residue != 0 {
        let adjustment_count = usize::try_from(residue.unsigned_abs()).unwrap_or(usize::MAX);
        let theoretical_upper_bound = balances.len() / 2 + 1;
        if adjustment_count > theoretical_upper_bound {
            tracing::warn!(
                adjustment_count,
                theoretical_upper_bound,
                member_count = balances.len(),
                rounding_mode = %mode,
                "Rounding residue exceeds nearest-rounding bound"
            );
        }

        let mut ranked: Vec<usize> = (0..entries.len()).collect();
        ranked.sort_by(|&a, &b| {
            let (diff_a, diff_b) = (entries[a].1, entries[b].1);
            let by_diff = if residue > 0 {
                diff_b.cmp(&diff_a)
            } else {
                diff_a.cmp(&diff_b)
            };
            by_diff.then_with(|| balances[a].name.cmp(&balances[b].name))
        });

        let step = if residue > 0 { -1 } else { 1 };
        let selected: Vec<usize> = ranked.into_iter().take(adjustment_count).collect();
        for &idx in &selected {
            entries[idx].0 += step;
        }

        tracing::debug!(
            residue,
            adjustment_count,
            selected = ?selected
                .iter()
                .map(|&idx| balances[idx].name.as_str())
                .collect::<Vec<_>>(),
            rounding_mode = %mode,
            "Balance rounding residue repaired"
        );
    }

    debug_assert_eq!(
        entries.iter().map(|(units, _)| i128::from(*units)).sum::<i128>(),
        0,
        "quantized balances must sum to zero"
    );

    entries
        .into_iter()
        .map(|(units, _)| Money::from_i64(units))
        .collect()
}

fn to_units(rounded: Decimal) -> i64 {
    rounded.to_i64().unwrap_or_else(|| {
        if rounded.is_sign_negative() {
            i64::MIN
        } else {
            i64::MAX
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::ParticipantName;
    use rstest::rstest;
    use std::str::FromStr;

    fn exact(raw: &[(&str, &str)]) -> Vec<ExactBalance> {
        raw.iter()
            .map(|(name, balance)| ExactBalance {
                name: ParticipantName::parse(name).expect("valid name"),
                paid: Money::ZERO,
                balance: Decimal::from_str(balance).expect("valid decimal"),
            })
            .collect()
    }

    fn units(values: &[Money]) -> Vec<i64> {
        values.iter().map(|money| money.amount()).collect()
    }

    #[rstest]
    #[case::already_whole(&[("A", "500"), ("B", "-500")], RoundingMode::HalfUp, &[500, -500])]
    #[case::half_up_midpoints(&[("A", "0.5"), ("B", "-0.5")], RoundingMode::HalfUp, &[1, -1])]
    #[case::half_even_midpoints(&[("A", "0.5"), ("B", "-0.5")], RoundingMode::HalfEven, &[0, 0])]
    #[case::residue_taken_from_largest_gain(
        &[("A", "0.6"), ("B", "0.6"), ("C", "-1.2")],
        RoundingMode::HalfUp,
        &[0, 1, -1]
    )]
    #[case::residue_given_to_largest_loss(
        &[("A", "-0.6"), ("B", "-0.6"), ("C", "1.2")],
        RoundingMode::HalfUp,
        &[0, -1, 1]
    )]
    fn quantizes_to_zero_sum(
        #[case] raw: &[(&str, &str)],
        #[case] mode: RoundingMode,
        #[case] expected: &[i64],
    ) {
        let quantized = quantize_balances(&exact(raw), mode);
        assert_eq!(units(&quantized), expected);
        assert_eq!(quantized.iter().sum::<Money>(), Money::ZERO);
    }

    #[test]
    fn ties_are_broken_by_name() {
        // Every entry loses 0.25 to rounding; the missing unit goes to "A"
        // even though it is not listed first.
        let raw = [("C", "0.25"), ("A", "0.25"), ("B", "0.25"), ("D", "-0.75")];
        let quantized = quantize_balances(&exact(&raw), RoundingMode::HalfUp);
        assert_eq!(quantized.iter().sum::<Money>(), Money::ZERO);
        assert_eq!(units(&quantized), vec![0, 1, 0, -1]);
    }

    #[test]
    fn stays_within_one_unit_of_exact() {
        let raw = [
            ("A", "666.6666666666666666666666667"),
            ("B", "-333.3333333333333333333333333"),
            ("C", "-333.3333333333333333333333333"),
        ];
        let balances = exact(&raw);
        let quantized = quantize_balances(&balances, RoundingMode::HalfUp);

        assert_eq!(quantized.iter().sum::<Money>(), Money::ZERO);
        for (money, entry) in quantized.iter().zip(&balances) {
            assert!((money.as_decimal() - entry.balance).abs() < Decimal::ONE);
        }
    }

    #[rstest]
    #[case::hyphen("half-up", RoundingMode::HalfUp)]
    #[case::underscore("HALF_EVEN", RoundingMode::HalfEven)]
    #[case::padded(" half-even ", RoundingMode::HalfEven)]
    fn parses_rounding_mode(#[case] raw: &str, #[case] expected: RoundingMode) {
        assert_eq!(raw.parse::<RoundingMode>(), Ok(expected));
    }

    #[test]
    fn rejects_unknown_rounding_mode() {
        assert_eq!(
            "ceiling".parse::<RoundingMode>(),
            Err(UnknownRoundingMode("ceiling".to_owned()))
        );
    }
}
