use crate::{
    error_presenter::{format_even_split_error, format_ledger_error, format_precondition_error},
    format::format_currency,
    ledger_presenter::LedgerPresenter,
    settlement_presenter::SettlementPresenter,
};
use warikan_application::{CommandOutcome, ExecutedCommand};
use warikan_i18n as i18n;

pub struct OutcomePresenter;

impl OutcomePresenter {
    /// User-facing text for one executed command. Failures carry the line
    /// number so a script run stays traceable.
    pub fn render(executed: &ExecutedCommand) -> String {
        match &executed.outcome {
            CommandOutcome::Rejected(err) => {
                i18n::at_line(executed.line, format_ledger_error(err))
            }
            CommandOutcome::SettlementUnavailable(err) => {
                i18n::at_line(executed.line, format_precondition_error(err))
            }
            CommandOutcome::EvenSplitRejected(err) => {
                i18n::at_line(executed.line, format_even_split_error(err))
            }
            outcome => Self::render_outcome(outcome),
        }
    }

    pub fn render_outcome(outcome: &CommandOutcome) -> String {
        match outcome {
            CommandOutcome::ParticipantsAdded(names) => {
                let joined = names
                    .iter()
                    .map(|name| name.as_str())
                    .collect::<Vec<_>>()
                    .join(", ");
                i18n::participants_added(joined)
            }
            CommandOutcome::ParticipantRemoved(removed) => {
                i18n::participant_removed(&removed.name, removed.removed_payments.len())
            }
            CommandOutcome::PaymentRecorded { position, payment } => i18n::payment_recorded(
                *position,
                payment.payer(),
                format_currency(payment.amount()),
            ),
            CommandOutcome::PaymentEdited {
                position, current, ..
            } => i18n::payment_edited(
                *position,
                current.payer(),
                format_currency(current.amount()),
            ),
            CommandOutcome::PaymentDeleted { position, .. } => i18n::payment_deleted(*position),
            CommandOutcome::PaymentsListed(payments) => LedgerPresenter::render_payments(payments),
            CommandOutcome::Summary(summary) => LedgerPresenter::render_summary(summary),
            CommandOutcome::Settled(settlement) => {
                SettlementPresenter::render(settlement).to_text()
            }
            CommandOutcome::EvenSplit(split) => i18n::even_split(
                split.people,
                format_currency(split.per_person),
                format_currency(split.collected),
                format_currency(split.surplus),
            ),
            CommandOutcome::Reset { cleared } => i18n::payments_cleared(*cleared),
            CommandOutcome::Rejected(err) => format_ledger_error(err),
            CommandOutcome::SettlementUnavailable(err) => format_precondition_error(err),
            CommandOutcome::EvenSplitRejected(err) => format_even_split_error(err),
        }
    }
}
