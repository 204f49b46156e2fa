use std::{cmp::Ordering, collections::BinaryHeap};

use crate::{
    model::{Money, ParticipantBalance, ParticipantName, Payment, Settlement, Transfer},
    services::{
        BalanceCalculator, PreconditionError,
        balance_rounding::{RoundingMode, quantize_balances},
    },
};

/// Greedy settlement of equal-share expenses.
///
/// Stateless: every call reads the roster and payment log it is given and
/// returns a fresh [`Settlement`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SettlementEngine {
    rounding_mode: RoundingMode,
}

impl SettlementEngine {
    pub fn new(rounding_mode: RoundingMode) -> Self {
        Self { rounding_mode }
    }

    pub fn rounding_mode(&self) -> RoundingMode {
        self.rounding_mode
    }

    /// Computes balances and the transfers that bring all of them to zero.
    ///
    /// # Errors
    /// [`PreconditionError`] when fewer than two participants are given, the
    /// payment list is empty, or a payer is not among `participants`.
    pub fn settle<'a, I>(
        &self,
        participants: I,
        payments: &[Payment],
    ) -> Result<Settlement, PreconditionError>
    where
        I: IntoIterator<Item = &'a ParticipantName>,
    {
        let sheet = BalanceCalculator.calculate(participants, payments)?;
        let quantized = quantize_balances(&sheet.balances, self.rounding_mode);

        let balances: Vec<ParticipantBalance> = sheet
            .balances
            .into_iter()
            .zip(quantized)
            .map(|(exact, balance)| ParticipantBalance {
                name: exact.name,
                paid: exact.paid,
                exact: exact.balance,
                balance,
            })
            .collect();

        let transfers = plan_transfers(&balances);

        tracing::debug!(
            participant_count = balances.len(),
            payment_count = payments.len(),
            total_spent = %sheet.total_spent,
            fair_share = %sheet.fair_share.exact(),
            transfer_count = transfers.len(),
            rounding_mode = %self.rounding_mode,
            "Settlement computed"
        );

        Ok(Settlement {
            total_spent: sheet.total_spent,
            fair_share: sheet.fair_share,
            balances,
            transfers,
        })
    }
}

/// Transfers only, with the default rounding mode.
pub fn settle<'a, I>(
    participants: I,
    payments: &[Payment],
) -> Result<Vec<Transfer>, PreconditionError>
where
    I: IntoIterator<Item = &'a ParticipantName>,
{
    SettlementEngine::default()
        .settle(participants, payments)
        .map(|settlement| settlement.transfers)
}

/// Outstanding amount of one side. Max-heap order: largest amount first,
/// then the lexicographically smallest name.
#[derive(Debug, PartialEq, Eq)]
struct Outstanding<'a> {
    amount: Money,
    name: &'a ParticipantName,
}

impl Ord for Outstanding<'_> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.amount
            .cmp(&other.amount)
            .then_with(|| other.name.cmp(self.name))
    }
}

impl PartialOrd for Outstanding<'_> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

fn plan_transfers(balances: &[ParticipantBalance]) -> Vec<Transfer> {
    let mut debtors = BinaryHeap::new();
    let mut creditors = BinaryHeap::new();
    for entry in balances {
        match entry.balance.signum() {
            -1 => debtors.push(Outstanding {
                amount: -entry.balance,
                name: &entry.name,
            }),
            1 => creditors.push(Outstanding {
                amount: entry.balance,
                name: &entry.name,
            }),
            _ => {}
        }
    }

    let mut transfers = Vec::with_capacity(debtors.len().max(creditors.len()));
    while let (Some(mut debtor), Some(mut creditor)) = (debtors.pop(), creditors.pop()) {
        let amount = debtor.amount.min(creditor.amount);
        transfers.push(Transfer {
            from: debtor.name.clone(),
            to: creditor.name.clone(),
            amount,
        });

        debtor.amount -= amount;
        creditor.amount -= amount;
        if debtor.amount.is_positive() {
            debtors.push(debtor);
        }
        if creditor.amount.is_positive() {
            creditors.push(creditor);
        }
    }

    debug_assert!(
        debtors.is_empty() && creditors.is_empty(),
        "quantized balances must resolve completely"
    );

    transfers
}
