use proptest::prelude::*;
use rust_decimal::Decimal;
use warikan_domain::{
    Money, ParticipantName, Payment, PreconditionError, RoundingMode, Settlement,
    SettlementEngine,
};

const NAMES: [&str; 8] = ["A", "B", "C", "D", "E", "F", "G", "H"];

fn roster(count: usize) -> Vec<ParticipantName> {
    NAMES[..count]
        .iter()
        .map(|name| ParticipantName::parse(name).expect("valid name"))
        .collect()
}

fn build_payments(
    participant_count: usize,
    amounts: &[i64],
    payer_indexes: &[usize],
) -> Vec<Payment> {
    amounts
        .iter()
        .zip(payer_indexes)
        .map(|(amount, payer_idx)| {
            Payment::try_new(NAMES[payer_idx % participant_count], *amount, "")
                .expect("valid payment")
        })
        .collect()
}

fn settle_with(
    mode: RoundingMode,
    participant_count: usize,
    amounts: &[i64],
    payer_indexes: &[usize],
) -> Settlement {
    SettlementEngine::new(mode)
        .settle(
            &roster(participant_count),
            &build_payments(participant_count, amounts, payer_indexes),
        )
        .expect("settlement failed")
}

fn rounding_mode() -> impl Strategy<Value = RoundingMode> {
    prop_oneof![Just(RoundingMode::HalfUp), Just(RoundingMode::HalfEven)]
}

proptest! {
    #[test]
    fn balances_sum_to_zero(
        participant_count in 2usize..=8,
        amounts in prop::collection::vec(1i64..=100_000, 1..=30),
        payer_indexes in prop::collection::vec(0usize..8, 30),
        mode in rounding_mode(),
    ) {
        let settlement = settle_with(mode, participant_count, &amounts, &payer_indexes);

        let rounded: Money = settlement.balances.iter().map(|b| b.balance).sum();
        prop_assert_eq!(rounded, Money::ZERO);

        let exact: Decimal = settlement.balances.iter().map(|b| b.exact).sum();
        prop_assert!(exact.abs() < Decimal::new(1, 20));

        for balance in &settlement.balances {
            prop_assert!((balance.balance.as_decimal() - balance.exact).abs() < Decimal::ONE);
        }
    }

    #[test]
    fn transfers_conserve_debt(
        participant_count in 2usize..=8,
        amounts in prop::collection::vec(1i64..=100_000, 1..=30),
        payer_indexes in prop::collection::vec(0usize..8, 30),
        mode in rounding_mode(),
    ) {
        let settlement = settle_with(mode, participant_count, &amounts, &payer_indexes);

        let owed: Money = settlement
            .balances
            .iter()
            .filter(|b| b.balance.signum() < 0)
            .map(|b| -b.balance)
            .sum();
        let due: Money = settlement
            .balances
            .iter()
            .filter(|b| b.balance.signum() > 0)
            .map(|b| b.balance)
            .sum();
        prop_assert_eq!(settlement.transferred_total(), owed);
        prop_assert_eq!(owed, due);
    }

    #[test]
    fn transfers_are_bounded_and_well_formed(
        participant_count in 2usize..=8,
        amounts in prop::collection::vec(1i64..=100_000, 1..=30),
        payer_indexes in prop::collection::vec(0usize..8, 30),
    ) {
        let settlement = settle_with(
            RoundingMode::HalfUp,
            participant_count,
            &amounts,
            &payer_indexes,
        );

        prop_assert!(settlement.transfers.len() < participant_count);
        for transfer in &settlement.transfers {
            prop_assert!(transfer.amount.is_positive());
            prop_assert_ne!(&transfer.from, &transfer.to);
        }
    }

    #[test]
    fn applying_transfers_clears_every_balance(
        participant_count in 2usize..=8,
        amounts in prop::collection::vec(1i64..=100_000, 1..=30),
        payer_indexes in prop::collection::vec(0usize..8, 30),
    ) {
        let settlement = settle_with(
            RoundingMode::HalfUp,
            participant_count,
            &amounts,
            &payer_indexes,
        );

        for balance in &settlement.balances {
            let sent: Money = settlement
                .transfers
                .iter()
                .filter(|t| t.from == balance.name)
                .map(|t| t.amount)
                .sum();
            let received: Money = settlement
                .transfers
                .iter()
                .filter(|t| t.to == balance.name)
                .map(|t| t.amount)
                .sum();
            prop_assert_eq!(balance.balance + sent - received, Money::ZERO);
        }
    }

    #[test]
    fn equal_payments_need_no_transfers(
        participant_count in 2usize..=8,
        share in 1i64..=50_000,
    ) {
        let amounts = vec![share; participant_count];
        let payer_indexes: Vec<usize> = (0..participant_count).collect();
        let settlement = settle_with(
            RoundingMode::HalfUp,
            participant_count,
            &amounts,
            &payer_indexes,
        );

        prop_assert!(settlement.is_settled());
        prop_assert!(settlement.balances.iter().all(|b| b.balance.is_zero()));
    }

    #[test]
    fn result_is_deterministic_under_roster_permutation(
        participant_count in 2usize..=8,
        amounts in prop::collection::vec(1i64..=100_000, 1..=30),
        payer_indexes in prop::collection::vec(0usize..8, 30),
    ) {
        let payments = build_payments(participant_count, &amounts, &payer_indexes);
        let forward = roster(participant_count);
        let reversed: Vec<ParticipantName> = forward.iter().rev().cloned().collect();

        let engine = SettlementEngine::default();
        let lhs = engine.settle(&forward, &payments).expect("settlement failed");
        let rhs = engine.settle(&reversed, &payments).expect("settlement failed");
        prop_assert_eq!(lhs, rhs);
    }
}

#[test]
fn removed_payer_must_not_be_settled() {
    let participants = roster(2);
    let payments = vec![
        Payment::try_new("A", 100, "").expect("valid payment"),
        Payment::try_new("C", 100, "").expect("valid payment"),
    ];

    let result = SettlementEngine::default().settle(&participants, &payments);

    assert!(matches!(
        result,
        Err(PreconditionError::UnknownPayer { payer }) if payer == "C"
    ));
}
