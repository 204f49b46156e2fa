#![warn(clippy::uninlined_format_args)]

pub mod error_presenter;
pub mod format;
pub mod ledger_presenter;
pub mod outcome_presenter;
pub mod settlement_presenter;
pub mod text_table;

pub use error_presenter::{
    format_even_split_error, format_ledger_error, format_precondition_error,
    format_script_parse_error,
};
pub use ledger_presenter::LedgerPresenter;
pub use outcome_presenter::OutcomePresenter;
pub use settlement_presenter::{SettlementPresenter, SettlementView};
