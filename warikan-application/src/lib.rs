#![warn(clippy::uninlined_format_args)]

pub mod error;
pub mod ledger;
pub mod model;
pub mod ports;
pub mod session_processor;

pub use error::{LedgerError, ScriptParseError};
pub use ledger::{Ledger, LedgerSummary, RemovedParticipant};
pub use model::{Command, CommandWithLine, PaymentDraft, Script};
pub use ports::CommandParser;
pub use session_processor::{CommandOutcome, ExecutedCommand, SessionProcessor};
