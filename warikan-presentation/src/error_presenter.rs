use warikan_application::{LedgerError, ScriptParseError};
use warikan_domain::{EvenSplitError, InvalidPaymentError, NameError, PreconditionError};
use warikan_i18n as i18n;

pub fn format_ledger_error(error: &LedgerError) -> String {
    match error {
        LedgerError::InvalidName(NameError::Empty) => i18n::EMPTY_NAME.to_string(),
        LedgerError::DuplicateParticipant { name } => i18n::duplicate_participant(name),
        LedgerError::UnknownParticipant { name } => i18n::unknown_participant(name),
        LedgerError::InvalidPayment(InvalidPaymentError::EmptyPayer) => {
            i18n::EMPTY_PAYER.to_string()
        }
        LedgerError::InvalidPayment(InvalidPaymentError::NonPositiveAmount { amount }) => {
            i18n::non_positive_amount(*amount)
        }
        LedgerError::PaymentIndexOutOfRange { index, len } => {
            i18n::payment_not_found(index + 1, *len)
        }
        LedgerError::TotalOverflow => i18n::TOTAL_OVERFLOW.to_string(),
    }
}

pub fn format_precondition_error(error: &PreconditionError) -> String {
    match error {
        PreconditionError::TooFewParticipants { count } => i18n::too_few_participants(*count),
        PreconditionError::NoPayments => i18n::NO_PAYMENTS_TO_SETTLE.to_string(),
        PreconditionError::UnknownPayer { payer } => i18n::unknown_payer(payer),
        PreconditionError::TotalOverflow => i18n::TOTAL_OVERFLOW.to_string(),
    }
}

pub fn format_even_split_error(error: &EvenSplitError) -> String {
    match error {
        EvenSplitError::NonPositiveTotal { total } => i18n::split_non_positive_total(*total),
        EvenSplitError::NoPeople => i18n::SPLIT_NO_PEOPLE.to_string(),
        EvenSplitError::InvalidUnit { unit } => i18n::split_invalid_unit(*unit),
        EvenSplitError::Overflow => i18n::SPLIT_OVERFLOW.to_string(),
    }
}

pub fn format_script_parse_error(error: ScriptParseError) -> String {
    match error {
        ScriptParseError::SyntaxError { line, detail } => {
            i18n::syntax_error(line, detail).to_string()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use warikan_domain::ParticipantName;

    fn name(raw: &str) -> ParticipantName {
        ParticipantName::parse(raw).expect("valid name")
    }

    #[rstest]
    #[case::duplicate(LedgerError::DuplicateParticipant { name: name("Alice") }, "Alice")]
    #[case::unknown(LedgerError::UnknownParticipant { name: "Zed".to_string() }, "Zed")]
    #[case::amount(
        LedgerError::InvalidPayment(InvalidPaymentError::NonPositiveAmount { amount: -500 }),
        "-500"
    )]
    #[case::position(LedgerError::PaymentIndexOutOfRange { index: 4, len: 2 }, "#5")]
    #[case::overflow(LedgerError::TotalOverflow, i18n::TOTAL_OVERFLOW)]
    fn ledger_errors_mention_the_offending_value(
        #[case] error: LedgerError,
        #[case] expected: &str,
    ) {
        let message = format_ledger_error(&error);
        assert!(message.contains(expected), "{message}");
    }

    #[rstest]
    #[case::too_few(PreconditionError::TooFewParticipants { count: 1 }, "1")]
    #[case::unknown_payer(PreconditionError::UnknownPayer { payer: name("Bob") }, "Bob")]
    #[case::no_payments(PreconditionError::NoPayments, i18n::NO_PAYMENTS_TO_SETTLE)]
    fn precondition_errors_are_localized(
        #[case] error: PreconditionError,
        #[case] expected: &str,
    ) {
        assert!(format_precondition_error(&error).contains(expected));
    }

    #[rstest]
    #[case::total(EvenSplitError::NonPositiveTotal { total: 0 }, "0")]
    #[case::unit(EvenSplitError::InvalidUnit { unit: -1 }, "-1")]
    #[case::people(EvenSplitError::NoPeople, i18n::SPLIT_NO_PEOPLE)]
    fn split_errors_are_localized(#[case] error: EvenSplitError, #[case] expected: &str) {
        assert!(format_even_split_error(&error).contains(expected));
    }

    #[test]
    fn syntax_error_includes_line_and_detail() {
        let message = format_script_parse_error(ScriptParseError::SyntaxError {
            line: 7,
            detail: "unexpected input: ???".to_string(),
        });
        assert!(message.contains('7'));
        assert!(message.contains("???"));
    }
}
