use warikan_application::{
    Command, CommandParser, CommandWithLine, PaymentDraft, Script, ScriptParseError,
};
use warikan_parser::{
    Command as ParserCommand, ParseError, PaymentLine, Statement as ParserStatement,
    StatementWithLine, parse_program,
};

#[derive(Default, Clone, Copy)]
pub struct WarikanCommandParser;

impl CommandParser for WarikanCommandParser {
    fn parse<'a>(&self, content: &'a str) -> Result<Script<'a>, ScriptParseError> {
        let program = parse_program(content).map_err(|err| match err {
            ParseError::SyntaxError { line, detail } => {
                ScriptParseError::SyntaxError { line, detail }
            }
        })?;

        let commands = program
            .statements
            .into_iter()
            .map(|StatementWithLine { line, statement }| CommandWithLine {
                line,
                command: to_command(statement),
            })
            .collect();

        Ok(Script::new(commands))
    }
}

fn to_command(statement: ParserStatement<'_>) -> Command<'_> {
    match statement {
        ParserStatement::Add(names) => Command::AddParticipants(names),
        ParserStatement::Remove(name) => Command::RemoveParticipant(name),
        ParserStatement::Payment(payment) => Command::RecordPayment(to_draft(payment)),
        ParserStatement::Edit { position, payment } => Command::EditPayment {
            position,
            draft: to_draft(payment),
        },
        ParserStatement::Delete { position } => Command::DeletePayment { position },
        ParserStatement::Command(command) => match command {
            ParserCommand::Payments => Command::ListPayments,
            ParserCommand::Summary => Command::Summary,
            ParserCommand::Settle => Command::Settle,
            ParserCommand::Split { total, people } => Command::EvenSplit { total, people },
            ParserCommand::Reset => Command::Reset,
        },
    }
}

fn to_draft(payment: PaymentLine<'_>) -> PaymentDraft<'_> {
    PaymentDraft {
        payer: payment.payer,
        amount: payment.amount,
        memo: payment.memo.unwrap_or_default(),
    }
}
