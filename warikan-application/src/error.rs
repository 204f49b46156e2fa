use thiserror::Error;
use warikan_domain::{InvalidPaymentError, NameError, ParticipantName};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LedgerError {
    #[error(transparent)]
    InvalidName(#[from] NameError),
    #[error("participant '{name}' is already registered")]
    DuplicateParticipant { name: ParticipantName },
    #[error("participant '{name}' is not registered")]
    UnknownParticipant { name: String },
    #[error(transparent)]
    InvalidPayment(#[from] InvalidPaymentError),
    #[error("payment #{} does not exist ({len} recorded)", .index + 1)]
    PaymentIndexOutOfRange { index: usize, len: usize },
    #[error("payment total exceeds the supported range")]
    TotalOverflow,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ScriptParseError {
    #[error("Syntax error at line {line}: {detail}")]
    SyntaxError { line: usize, detail: String },
}

impl ScriptParseError {
    pub fn line(&self) -> usize {
        match self {
            ScriptParseError::SyntaxError { line, .. } => *line,
        }
    }
}
