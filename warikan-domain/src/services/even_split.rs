use crate::model::Money;
use thiserror::Error;

/// Cash-friendly rounding unit for JPY splits.
pub const DEFAULT_SPLIT_UNIT: i64 = 100;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EvenSplitError {
    #[error("total must be positive (got {total})")]
    NonPositiveTotal { total: i64 },
    #[error("number of people must be at least 1")]
    NoPeople,
    #[error("rounding unit must be positive (got {unit})")]
    InvalidUnit { unit: i64 },
    #[error("split amount exceeds the supported range")]
    Overflow,
}

/// Split of a single bill where everyone hands over the same rounded amount.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct EvenSplit {
    pub total: Money,
    pub people: u32,
    pub unit: Money,
    /// Share rounded up to a multiple of `unit`.
    pub per_person: Money,
    pub collected: Money,
    /// `collected - total`, never negative.
    pub surplus: Money,
}

impl EvenSplit {
    pub fn calculate(total: i64, people: u32, unit: i64) -> Result<Self, EvenSplitError> {
        if total <= 0 {
            return Err(EvenSplitError::NonPositiveTotal { total });
        }
        if people == 0 {
            return Err(EvenSplitError::NoPeople);
        }
        if unit <= 0 {
            return Err(EvenSplitError::InvalidUnit { unit });
        }

        let divisor = i64::from(people)
            .checked_mul(unit)
            .ok_or(EvenSplitError::Overflow)?;
        let units_each = (total - 1) / divisor + 1;
        let per_person = units_each
            .checked_mul(unit)
            .ok_or(EvenSplitError::Overflow)?;
        let collected = per_person
            .checked_mul(i64::from(people))
            .ok_or(EvenSplitError::Overflow)?;

        Ok(Self {
            total: Money::from_i64(total),
            people,
            unit: Money::from_i64(unit),
            per_person: Money::from_i64(per_person),
            collected: Money::from_i64(collected),
            surplus: Money::from_i64(collected - total),
        })
    }
}
