use std::{
    borrow::Borrow,
    fmt,
    iter::Sum,
    ops::{Add, AddAssign, Neg, Sub, SubAssign},
    str::FromStr,
};

use rust_decimal::{Decimal, prelude::ToPrimitive};
use thiserror::Error;

/// Amount in the currency's minor unit (1 yen for JPY).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Money(i64);

impl Money {
    pub const ZERO: Self = Self(0);

    pub fn zero() -> Self {
        Self::ZERO
    }

    pub fn from_i64(value: i64) -> Self {
        Self(value)
    }

    pub fn amount(self) -> i64 {
        self.0
    }

    pub fn abs(self) -> Self {
        Self(self.0.abs())
    }

    pub fn is_zero(self) -> bool {
        self.0 == 0
    }

    pub fn is_positive(self) -> bool {
        self.0 > 0
    }

    pub fn signum(self) -> i64 {
        self.0.signum()
    }

    pub fn checked_add(self, rhs: Self) -> Option<Self> {
        self.0.checked_add(rhs.0).map(Self)
    }

    pub fn checked_mul(self, factor: i64) -> Option<Self> {
        self.0.checked_mul(factor).map(Self)
    }

    pub fn as_decimal(self) -> Decimal {
        Decimal::from(self.0)
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl Add for Money {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        Self(self.0 + rhs.0)
    }
}

impl AddAssign for Money {
    fn add_assign(&mut self, rhs: Self) {
        self.0 += rhs.0;
    }
}

impl Sub for Money {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self::Output {
        Self(self.0 - rhs.0)
    }
}

impl SubAssign for Money {
    fn sub_assign(&mut self, rhs: Self) {
        self.0 -= rhs.0;
    }
}

impl Neg for Money {
    type Output = Self;

    fn neg(self) -> Self::Output {
        Self(-self.0)
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::ZERO, Add::add)
    }
}

impl<'a> Sum<&'a Money> for Money {
    fn sum<I: Iterator<Item = &'a Money>>(iter: I) -> Self {
        iter.copied().sum()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NameError {
    #[error("participant name must not be empty")]
    Empty,
}

/// Case-sensitive participant name, stored trimmed.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ParticipantName(String);

impl ParticipantName {
    pub fn parse(raw: &str) -> Result<Self, NameError> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(NameError::Empty);
        }
        Ok(Self(trimmed.to_owned()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl FromStr for ParticipantName {
    type Err = NameError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl Borrow<str> for ParticipantName {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for ParticipantName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl PartialEq<str> for ParticipantName {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl PartialEq<&str> for ParticipantName {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

impl fmt::Display for ParticipantName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InvalidPaymentError {
    #[error("payer must not be empty")]
    EmptyPayer,
    #[error("payment amount must be positive (got {amount})")]
    NonPositiveAmount { amount: i64 },
}

/// A single expenditure made by one participant on behalf of the group.
///
/// Construction validates the boundary rules, so every `Payment` the engine
/// sees has a non-empty payer and a positive amount.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Payment {
    payer: ParticipantName,
    amount: Money,
    memo: String,
}

impl Payment {
    pub fn try_new(
        payer: &str,
        amount: i64,
        memo: impl Into<String>,
    ) -> Result<Self, InvalidPaymentError> {
        let payer = ParticipantName::parse(payer).map_err(|_| InvalidPaymentError::EmptyPayer)?;
        Self::for_participant(payer, amount, memo)
    }

    pub fn for_participant(
        payer: ParticipantName,
        amount: i64,
        memo: impl Into<String>,
    ) -> Result<Self, InvalidPaymentError> {
        if amount <= 0 {
            return Err(InvalidPaymentError::NonPositiveAmount { amount });
        }
        Ok(Self {
            payer,
            amount: Money::from_i64(amount),
            memo: memo.into(),
        })
    }

    pub fn payer(&self) -> &ParticipantName {
        &self.payer
    }

    pub fn amount(&self) -> Money {
        self.amount
    }

    pub fn memo(&self) -> &str {
        &self.memo
    }
}

/// Recommended payment from a net debtor to a net creditor.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Transfer {
    pub from: ParticipantName,
    pub to: ParticipantName,
    pub amount: Money,
}

/// Total spending divided evenly across participants, kept exact.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FairShare(Decimal);

impl FairShare {
    pub fn new(total: Money, participant_count: usize) -> Option<Self> {
        if participant_count == 0 {
            return None;
        }
        total
            .as_decimal()
            .checked_div(Decimal::from(participant_count))
            .map(Self)
    }

    pub fn exact(self) -> Decimal {
        self.0
    }

    /// Share rounded up to the next whole unit, as shown to users.
    pub fn ceil(self) -> Money {
        Money::from_i64(self.0.ceil().to_i64().unwrap_or(i64::MAX))
    }

    pub fn is_whole(self) -> bool {
        self.0.fract().is_zero()
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ParticipantBalance {
    pub name: ParticipantName,
    pub paid: Money,
    /// `paid - fair share`, before quantization.
    pub exact: Decimal,
    /// Whole-unit balance used for transfer generation.
    pub balance: Money,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Settlement {
    pub total_spent: Money,
    pub fair_share: FairShare,
    pub balances: Vec<ParticipantBalance>,
    pub transfers: Vec<Transfer>,
}

impl Settlement {
    pub fn participant_count(&self) -> usize {
        self.balances.len()
    }

    /// `true` when nobody owes anything.
    pub fn is_settled(&self) -> bool {
        self.transfers.is_empty()
    }

    pub fn transferred_total(&self) -> Money {
        self.transfers.iter().map(|transfer| transfer.amount).sum()
    }
}
