pub mod balance_calculator;
pub mod balance_rounding;
pub mod even_split;
pub mod settlement_engine;

pub use balance_calculator::{BalanceCalculator, BalanceSheet, ExactBalance, PreconditionError};
pub use balance_rounding::{RoundingMode, UnknownRoundingMode, quantize_balances};
pub use even_split::{DEFAULT_SPLIT_UNIT, EvenSplit, EvenSplitError};
pub use settlement_engine::{SettlementEngine, settle};
