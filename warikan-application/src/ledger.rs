use indexmap::IndexSet;
use warikan_domain::{
    FairShare, Money, ParticipantName, Payment, PreconditionError, Settlement, SettlementEngine,
};

use crate::error::LedgerError;

/// Participant roster and payment log of one session.
///
/// Participants keep registration order. Payments keep entry order and are
/// addressed by 0-based index. A payment's payer is always registered:
/// removing a participant drops their payments with them. The log total
/// always fits in [`Money`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Ledger {
    roster: IndexSet<ParticipantName>,
    payments: Vec<Payment>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemovedParticipant {
    pub name: ParticipantName,
    pub removed_payments: Vec<Payment>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LedgerSummary {
    pub total_spent: Money,
    pub payment_count: usize,
    /// `None` while the roster is empty.
    pub fair_share: Option<FairShare>,
    /// Amount paid by each participant, in registration order.
    pub paid: Vec<(ParticipantName, Money)>,
}

impl Ledger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn participants(&self) -> impl ExactSizeIterator<Item = &ParticipantName> + '_ {
        self.roster.iter()
    }

    pub fn participant_count(&self) -> usize {
        self.roster.len()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.roster.contains(name.trim())
    }

    pub fn payments(&self) -> &[Payment] {
        &self.payments
    }

    /// Registers every name or none of them.
    pub fn register_participants(
        &mut self,
        raw_names: &[&str],
    ) -> Result<Vec<ParticipantName>, LedgerError> {
        let mut pending: Vec<ParticipantName> = Vec::with_capacity(raw_names.len());
        for raw in raw_names {
            let name = ParticipantName::parse(raw)?;
            if self.roster.contains(&name) || pending.contains(&name) {
                return Err(LedgerError::DuplicateParticipant { name });
            }
            pending.push(name);
        }

        self.roster.extend(pending.iter().cloned());
        tracing::debug!(
            added = pending.len(),
            participant_count = self.roster.len(),
            "Participants registered"
        );
        Ok(pending)
    }

    pub fn register_participant(&mut self, raw: &str) -> Result<&ParticipantName, LedgerError> {
        self.register_participants(&[raw])?;
        Ok(&self.roster[self.roster.len() - 1])
    }

    /// Removes a participant together with every payment they made.
    pub fn remove_participant(&mut self, raw: &str) -> Result<RemovedParticipant, LedgerError> {
        let Some(name) = self.roster.shift_take(raw.trim()) else {
            return Err(LedgerError::UnknownParticipant {
                name: raw.trim().to_owned(),
            });
        };

        let (removed_payments, kept): (Vec<Payment>, Vec<Payment>) =
            std::mem::take(&mut self.payments)
                .into_iter()
                .partition(|payment| payment.payer() == &name);
        self.payments = kept;

        tracing::debug!(
            participant = %name,
            removed_payments = removed_payments.len(),
            "Participant removed"
        );

        Ok(RemovedParticipant {
            name,
            removed_payments,
        })
    }

    /// Appends a payment and returns its index.
    pub fn record_payment(
        &mut self,
        payer: &str,
        amount: i64,
        memo: &str,
    ) -> Result<usize, LedgerError> {
        let payment = self.validated_payment(payer, amount, memo, None)?;
        self.payments.push(payment);
        Ok(self.payments.len() - 1)
    }

    /// Replaces the payment at `index` and returns the previous one.
    pub fn edit_payment(
        &mut self,
        index: usize,
        payer: &str,
        amount: i64,
        memo: &str,
    ) -> Result<Payment, LedgerError> {
        self.check_index(index)?;
        let payment = self.validated_payment(payer, amount, memo, Some(index))?;
        Ok(std::mem::replace(&mut self.payments[index], payment))
    }

    pub fn delete_payment(&mut self, index: usize) -> Result<Payment, LedgerError> {
        self.check_index(index)?;
        Ok(self.payments.remove(index))
    }

    /// Empties the payment log and returns how many entries were dropped.
    pub fn clear_payments(&mut self) -> usize {
        let cleared = self.payments.len();
        self.payments.clear();
        cleared
    }

    pub fn total_spent(&self) -> Money {
        self.payments.iter().map(Payment::amount).sum()
    }

    pub fn summary(&self) -> LedgerSummary {
        let paid = self
            .roster
            .iter()
            .map(|name| {
                let amount = self
                    .payments
                    .iter()
                    .filter(|payment| payment.payer() == name)
                    .map(Payment::amount)
                    .sum();
                (name.clone(), amount)
            })
            .collect();
        let total_spent = self.total_spent();

        LedgerSummary {
            total_spent,
            payment_count: self.payments.len(),
            fair_share: FairShare::new(total_spent, self.roster.len()),
            paid,
        }
    }

    pub fn settle(&self, engine: &SettlementEngine) -> Result<Settlement, PreconditionError> {
        engine.settle(&self.roster, &self.payments)
    }

    fn validated_payment(
        &self,
        payer: &str,
        amount: i64,
        memo: &str,
        replacing: Option<usize>,
    ) -> Result<Payment, LedgerError> {
        let payment = Payment::try_new(payer, amount, memo.trim())?;
        if !self.roster.contains(payment.payer()) {
            return Err(LedgerError::UnknownParticipant {
                name: payment.payer().to_string(),
            });
        }

        self.payments
            .iter()
            .enumerate()
            .filter(|(index, _)| Some(*index) != replacing)
            .try_fold(payment.amount(), |total, (_, other)| total.checked_add(other.amount()))
            .ok_or(LedgerError::TotalOverflow)?;
        Ok(payment)
    }

    fn check_index(&self, index: usize) -> Result<(), LedgerError> {
        if index < self.payments.len() {
            Ok(())
        } else {
            Err(LedgerError::PaymentIndexOutOfRange {
                index,
                len: self.payments.len(),
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::{fixture, rstest};
    use warikan_domain::{InvalidPaymentError, NameError};

    #[fixture]
    fn ledger() -> Ledger {
        let mut ledger = Ledger::new();
        ledger
            .register_participants(&["A", "B", "C"])
            .expect("registration failed");
        ledger
    }

    fn payers(ledger: &Ledger) -> Vec<&str> {
        ledger
            .payments()
            .iter()
            .map(|payment| payment.payer().as_str())
            .collect()
    }

    #[rstest]
    fn keeps_registration_order(ledger: Ledger) {
        let names: Vec<&str> = ledger.participants().map(ParticipantName::as_str).collect();
        assert_eq!(names, vec!["A", "B", "C"]);
    }

    #[rstest]
    #[case::existing(&["B"], "B")]
    #[case::same_batch(&["D", "D"], "D")]
    #[case::trimmed(&[" C "], "C")]
    fn rejects_duplicates(mut ledger: Ledger, #[case] names: &[&str], #[case] duplicate: &str) {
        let result = ledger.register_participants(names);
        assert_eq!(
            result,
            Err(LedgerError::DuplicateParticipant {
                name: ParticipantName::parse(duplicate).expect("valid name"),
            })
        );
        assert_eq!(ledger.participant_count(), 3);
    }

    #[rstest]
    fn batch_registration_is_atomic(mut ledger: Ledger) {
        let result = ledger.register_participants(&["D", " "]);
        assert_eq!(result, Err(LedgerError::InvalidName(NameError::Empty)));
        assert!(!ledger.contains("D"));
    }

    #[rstest]
    fn names_are_case_sensitive(mut ledger: Ledger) {
        let added = ledger.register_participant("a").expect("distinct name");
        assert_eq!(added, &"a");
        assert_eq!(ledger.participant_count(), 4);
    }

    #[rstest]
    fn removing_participant_cascades_payments(mut ledger: Ledger) {
        ledger.record_payment("A", 100, "").expect("valid payment");
        ledger.record_payment("B", 200, "taxi").expect("valid payment");
        ledger.record_payment("C", 300, "").expect("valid payment");
        ledger.record_payment("B", 400, "").expect("valid payment");

        let removed = ledger.remove_participant("B").expect("registered");

        assert_eq!(removed.name, "B");
        let removed_amounts: Vec<i64> = removed
            .removed_payments
            .iter()
            .map(|payment| payment.amount().amount())
            .collect();
        assert_eq!(removed_amounts, vec![200, 400]);
        assert_eq!(payers(&ledger), vec!["A", "C"]);
        assert!(!ledger.contains("B"));
    }

    #[rstest]
    fn removing_unknown_participant_fails(mut ledger: Ledger) {
        assert_eq!(
            ledger.remove_participant("Z"),
            Err(LedgerError::UnknownParticipant {
                name: "Z".to_owned()
            })
        );
    }

    #[rstest]
    #[case::zero(
        "A",
        0,
        LedgerError::InvalidPayment(InvalidPaymentError::NonPositiveAmount { amount: 0 })
    )]
    #[case::negative(
        "A",
        -1,
        LedgerError::InvalidPayment(InvalidPaymentError::NonPositiveAmount { amount: -1 })
    )]
    #[case::empty_payer("  ", 100, LedgerError::InvalidPayment(InvalidPaymentError::EmptyPayer))]
    #[case::unregistered("Z", 100, LedgerError::UnknownParticipant { name: "Z".to_owned() })]
    fn rejects_invalid_payments(
        mut ledger: Ledger,
        #[case] payer: &str,
        #[case] amount: i64,
        #[case] expected: LedgerError,
    ) {
        assert_eq!(ledger.record_payment(payer, amount, ""), Err(expected));
        assert!(ledger.payments().is_empty());
    }

    #[rstest]
    fn edits_and_deletes_by_index(mut ledger: Ledger) {
        ledger.record_payment("A", 100, "lunch").expect("valid payment");
        ledger.record_payment("B", 200, "").expect("valid payment");

        let previous = ledger.edit_payment(0, "C", 150, "dinner").expect("in range");
        assert_eq!(previous.payer(), &"A");
        assert_eq!(ledger.payments()[0].memo(), "dinner");

        let deleted = ledger.delete_payment(1).expect("in range");
        assert_eq!(deleted.amount(), Money::from_i64(200));
        assert_eq!(payers(&ledger), vec!["C"]);

        assert_eq!(
            ledger.delete_payment(1),
            Err(LedgerError::PaymentIndexOutOfRange { index: 1, len: 1 })
        );
    }

    #[rstest]
    fn failed_edit_keeps_original(mut ledger: Ledger) {
        ledger.record_payment("A", 100, "").expect("valid payment");
        let result = ledger.edit_payment(0, "A", 0, "");
        assert!(matches!(result, Err(LedgerError::InvalidPayment(_))));
        assert_eq!(ledger.payments()[0].amount(), Money::from_i64(100));
    }

    #[rstest]
    fn rejects_payment_that_overflows_total(mut ledger: Ledger) {
        ledger.record_payment("A", i64::MAX, "").expect("valid payment");

        assert_eq!(ledger.record_payment("B", 1, ""), Err(LedgerError::TotalOverflow));
        assert_eq!(ledger.payments().len(), 1);

        let summary = ledger.summary();
        assert_eq!(summary.total_spent, Money::from_i64(i64::MAX));
        assert_eq!(summary.paid[0].1, Money::from_i64(i64::MAX));
    }

    #[rstest]
    fn edit_checks_total_without_replaced_payment(mut ledger: Ledger) {
        ledger.record_payment("A", i64::MAX - 10, "").expect("valid payment");
        ledger.record_payment("B", 10, "").expect("valid payment");

        assert_eq!(ledger.edit_payment(1, "B", 11, ""), Err(LedgerError::TotalOverflow));
        ledger.edit_payment(0, "C", i64::MAX - 10, "").expect("same total");
        assert_eq!(ledger.summary().total_spent, Money::from_i64(i64::MAX));
    }

    #[rstest]
    fn summary_reports_paid_per_participant(mut ledger: Ledger) {
        ledger.record_payment("A", 600, "").expect("valid payment");
        ledger.record_payment("C", 300, "").expect("valid payment");
        ledger.record_payment("A", 300, "").expect("valid payment");

        let summary = ledger.summary();

        assert_eq!(summary.total_spent, Money::from_i64(1200));
        assert_eq!(summary.payment_count, 3);
        assert_eq!(
            summary.fair_share.map(FairShare::ceil),
            Some(Money::from_i64(400))
        );
        let paid: Vec<(&str, i64)> = summary
            .paid
            .iter()
            .map(|(name, money)| (name.as_str(), money.amount()))
            .collect();
        assert_eq!(paid, vec![("A", 900), ("B", 0), ("C", 300)]);
    }

    #[rstest]
    fn clear_payments_keeps_roster(mut ledger: Ledger) {
        ledger.record_payment("A", 600, "").expect("valid payment");
        assert_eq!(ledger.clear_payments(), 1);
        assert!(ledger.payments().is_empty());
        assert_eq!(ledger.participant_count(), 3);
    }

    #[rstest]
    fn settles_through_engine(mut ledger: Ledger) {
        ledger.record_payment("A", 900, "").expect("valid payment");
        let settlement = ledger
            .settle(&SettlementEngine::default())
            .expect("settleable");
        assert_eq!(settlement.transfers.len(), 2);
        assert_eq!(settlement.transferred_total(), Money::from_i64(600));
    }

    #[test]
    fn empty_ledger_cannot_settle() {
        let ledger = Ledger::new();
        assert_eq!(
            ledger.settle(&SettlementEngine::default()),
            Err(PreconditionError::TooFewParticipants { count: 0 })
        );
        assert_eq!(ledger.summary().fair_share, None);
    }
}
