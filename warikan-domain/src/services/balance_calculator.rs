use crate::model::{FairShare, Money, ParticipantName, Payment};
use fxhash::FxHashMap;
use rust_decimal::Decimal;
use thiserror::Error;

/// Input that cannot be settled. Distinct from a settlement with no transfers.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PreconditionError {
    #[error("settlement needs at least 2 participants (got {count})")]
    TooFewParticipants { count: usize },
    #[error("settlement needs at least one payment")]
    NoPayments,
    #[error("payment references unknown participant '{payer}'")]
    UnknownPayer { payer: ParticipantName },
    #[error("payment total exceeds the supported range")]
    TotalOverflow,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ExactBalance {
    pub name: ParticipantName,
    pub paid: Money,
    pub balance: Decimal,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BalanceSheet {
    pub total_spent: Money,
    pub fair_share: FairShare,
    /// Ordered by participant name.
    pub balances: Vec<ExactBalance>,
}

impl BalanceSheet {
    /// Residue of `Σ balance`; nonzero only by decimal division error.
    pub fn imbalance(&self) -> Decimal {
        self.balances.iter().map(|entry| entry.balance).sum()
    }
}

/// Per-participant balance calculation
pub struct BalanceCalculator;

impl BalanceCalculator {
    /// Computes `paid - fair share` for every participant.
    ///
    /// Duplicate names collapse, so the caller may pass any iteration of the
    /// roster. Every payer must be one of `participants`.
    pub fn calculate<'a, I>(
        &self,
        participants: I,
        payments: &[Payment],
    ) -> Result<BalanceSheet, PreconditionError>
    where
        I: IntoIterator<Item = &'a ParticipantName>,
    {
        let mut names: Vec<&ParticipantName> = participants.into_iter().collect();
        names.sort_unstable();
        names.dedup();

        if names.len() < 2 {
            return Err(PreconditionError::TooFewParticipants { count: names.len() });
        }
        if payments.is_empty() {
            return Err(PreconditionError::NoPayments);
        }

        let mut paid: FxHashMap<&str, Money> = names
            .iter()
            .map(|name| (name.as_str(), Money::ZERO))
            .collect();
        let mut total_spent = Money::ZERO;

        for payment in payments {
            let Some(entry) = paid.get_mut(payment.payer().as_str()) else {
                return Err(PreconditionError::UnknownPayer {
                    payer: payment.payer().clone(),
                });
            };
            *entry = entry
                .checked_add(payment.amount())
                .ok_or(PreconditionError::TotalOverflow)?;
            total_spent = total_spent
                .checked_add(payment.amount())
                .ok_or(PreconditionError::TotalOverflow)?;
        }

        let fair_share =
            FairShare::new(total_spent, names.len()).ok_or(PreconditionError::TotalOverflow)?;

        let balances = names
            .into_iter()
            .map(|name| {
                let paid = paid.get(name.as_str()).copied().unwrap_or(Money::ZERO);
                ExactBalance {
                    name: name.clone(),
                    paid,
                    balance: paid.as_decimal() - fair_share.exact(),
                }
            })
            .collect();

        Ok(BalanceSheet {
            total_spent,
            fair_share,
            balances,
        })
    }
}
