#![warn(clippy::uninlined_format_args)]

pub mod model;
pub mod services;

pub use model::{
    FairShare, InvalidPaymentError, Money, NameError, ParticipantBalance, ParticipantName,
    Payment, Settlement, Transfer,
};
pub use services::{
    BalanceCalculator, BalanceSheet, DEFAULT_SPLIT_UNIT, EvenSplit, EvenSplitError, ExactBalance,
    PreconditionError, RoundingMode, SettlementEngine, UnknownRoundingMode, quantize_balances,
    settle,
};
