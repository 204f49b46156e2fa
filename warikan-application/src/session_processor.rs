use crate::{
    error::{LedgerError, ScriptParseError},
    ledger::{Ledger, LedgerSummary, RemovedParticipant},
    model::{Command, PaymentDraft, Script},
    ports::CommandParser,
};
use warikan_domain::{
    DEFAULT_SPLIT_UNIT, EvenSplit, EvenSplitError, ParticipantName, Payment, PreconditionError,
    Settlement, SettlementEngine,
};

/// Result of executing one command against a [`Ledger`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommandOutcome {
    ParticipantsAdded(Vec<ParticipantName>),
    ParticipantRemoved(RemovedParticipant),
    PaymentRecorded {
        position: usize,
        payment: Payment,
    },
    PaymentEdited {
        position: usize,
        previous: Payment,
        current: Payment,
    },
    PaymentDeleted {
        position: usize,
        payment: Payment,
    },
    PaymentsListed(Vec<Payment>),
    Summary(LedgerSummary),
    Settled(Settlement),
    SettlementUnavailable(PreconditionError),
    EvenSplit(EvenSplit),
    EvenSplitRejected(EvenSplitError),
    Reset {
        cleared: usize,
    },
    Rejected(LedgerError),
}

impl CommandOutcome {
    pub fn is_failure(&self) -> bool {
        matches!(
            self,
            CommandOutcome::Rejected(_)
                | CommandOutcome::SettlementUnavailable(_)
                | CommandOutcome::EvenSplitRejected(_)
        )
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExecutedCommand {
    pub line: usize,
    pub outcome: CommandOutcome,
}

#[derive(Clone, Copy)]
pub struct SessionProcessor<'a> {
    parser: &'a dyn CommandParser,
    engine: SettlementEngine,
    split_unit: i64,
}

impl<'a> SessionProcessor<'a> {
    pub fn new(parser: &'a dyn CommandParser, engine: SettlementEngine) -> Self {
        Self {
            parser,
            engine,
            split_unit: DEFAULT_SPLIT_UNIT,
        }
    }

    pub fn with_split_unit(mut self, split_unit: i64) -> Self {
        self.split_unit = split_unit;
        self
    }

    pub fn engine(&self) -> SettlementEngine {
        self.engine
    }

    pub fn parse_script<'b>(&self, content: &'b str) -> Result<Script<'b>, ScriptParseError> {
        self.parser.parse(content)
    }

    /// Executes every command of `script` in order. Rejected commands leave
    /// the ledger untouched and execution continues with the next line.
    pub fn run_script(&self, ledger: &mut Ledger, script: &Script<'_>) -> Vec<ExecutedCommand> {
        script
            .commands()
            .iter()
            .map(|entry| {
                let outcome = self.execute(ledger, &entry.command);
                if outcome.is_failure() {
                    tracing::warn!(line = entry.line, outcome = ?outcome, "Command rejected");
                }
                ExecutedCommand {
                    line: entry.line,
                    outcome,
                }
            })
            .collect()
    }

    /// Parses and runs `content`. Nothing is executed when parsing fails.
    pub fn run(
        &self,
        ledger: &mut Ledger,
        content: &str,
    ) -> Result<Vec<ExecutedCommand>, ScriptParseError> {
        let script = self.parse_script(content)?;
        Ok(self.run_script(ledger, &script))
    }

    pub fn execute(&self, ledger: &mut Ledger, command: &Command<'_>) -> CommandOutcome {
        match command {
            Command::AddParticipants(names) => ledger
                .register_participants(names)
                .map_or_else(CommandOutcome::Rejected, CommandOutcome::ParticipantsAdded),
            Command::RemoveParticipant(name) => ledger
                .remove_participant(name)
                .map_or_else(CommandOutcome::Rejected, CommandOutcome::ParticipantRemoved),
            Command::RecordPayment(PaymentDraft {
                payer,
                amount,
                memo,
            }) => match ledger.record_payment(payer, *amount, memo) {
                Ok(index) => CommandOutcome::PaymentRecorded {
                    position: index + 1,
                    payment: ledger.payments()[index].clone(),
                },
                Err(err) => CommandOutcome::Rejected(err),
            },
            Command::EditPayment { position, draft } => {
                let index = payment_index(ledger, *position);
                match ledger.edit_payment(index, draft.payer, draft.amount, draft.memo) {
                    Ok(previous) => CommandOutcome::PaymentEdited {
                        position: *position,
                        previous,
                        current: ledger.payments()[index].clone(),
                    },
                    Err(err) => CommandOutcome::Rejected(err),
                }
            }
            Command::DeletePayment { position } => {
                match ledger.delete_payment(payment_index(ledger, *position)) {
                    Ok(payment) => CommandOutcome::PaymentDeleted {
                        position: *position,
                        payment,
                    },
                    Err(err) => CommandOutcome::Rejected(err),
                }
            }
            Command::ListPayments => CommandOutcome::PaymentsListed(ledger.payments().to_vec()),
            Command::Summary => CommandOutcome::Summary(ledger.summary()),
            Command::Settle => match ledger.settle(&self.engine) {
                Ok(settlement) => CommandOutcome::Settled(settlement),
                Err(err) => CommandOutcome::SettlementUnavailable(err),
            },
            Command::EvenSplit { total, people } => {
                match EvenSplit::calculate(*total, *people, self.split_unit) {
                    Ok(split) => CommandOutcome::EvenSplit(split),
                    Err(err) => CommandOutcome::EvenSplitRejected(err),
                }
            }
            Command::Reset => CommandOutcome::Reset {
                cleared: ledger.clear_payments(),
            },
        }
    }
}

/// 1-based position to index; position 0 maps past the end so the ledger
/// reports it as out of range.
fn payment_index(ledger: &Ledger, position: usize) -> usize {
    position
        .checked_sub(1)
        .unwrap_or_else(|| ledger.payments().len())
}
