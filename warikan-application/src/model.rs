/// Unvalidated payment as typed by the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PaymentDraft<'a> {
    pub payer: &'a str,
    pub amount: i64,
    pub memo: &'a str,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command<'a> {
    AddParticipants(Vec<&'a str>),
    RemoveParticipant(&'a str),
    RecordPayment(PaymentDraft<'a>),
    /// `position` is 1-based, as shown in payment listings.
    EditPayment {
        position: usize,
        draft: PaymentDraft<'a>,
    },
    DeletePayment {
        position: usize,
    },
    ListPayments,
    Summary,
    Settle,
    EvenSplit {
        total: i64,
        people: u32,
    },
    Reset,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandWithLine<'a> {
    pub line: usize,
    pub command: Command<'a>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Script<'a> {
    commands: Vec<CommandWithLine<'a>>,
}

impl<'a> Script<'a> {
    pub fn new(commands: Vec<CommandWithLine<'a>>) -> Self {
        Self { commands }
    }

    pub fn commands(&self) -> &[CommandWithLine<'a>] {
        &self.commands
    }

    pub fn into_commands(self) -> Vec<CommandWithLine<'a>> {
        self.commands
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }
}
