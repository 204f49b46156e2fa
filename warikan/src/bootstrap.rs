use crate::interpreter::{CliResult, Interpreter};
use std::{env, fs, io};
use thiserror::Error;
use tracing_subscriber::EnvFilter;
use warikan_application::SessionProcessor;
use warikan_domain::{DEFAULT_SPLIT_UNIT, RoundingMode, SettlementEngine, UnknownRoundingMode};
use warikan_infrastructure::WarikanCommandParser;

const ROUNDING_MODE_VAR: &str = "WARIKAN_ROUNDING_MODE";
const SPLIT_UNIT_VAR: &str = "WARIKAN_SPLIT_UNIT";

static PARSER: WarikanCommandParser = WarikanCommandParser;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("WARIKAN_ROUNDING_MODE: {0}")]
    RoundingMode(#[from] UnknownRoundingMode),
    #[error("WARIKAN_SPLIT_UNIT must be a positive integer (got '{value}')")]
    SplitUnit { value: String },
}

/// Runtime settings read from the environment (and `.env`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AppConfig {
    pub rounding_mode: RoundingMode,
    pub split_unit: i64,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            rounding_mode: RoundingMode::default(),
            split_unit: DEFAULT_SPLIT_UNIT,
        }
    }
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        let _ = dotenvy::dotenv();
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let mut config = Self::default();

        if let Some(raw) = lookup(ROUNDING_MODE_VAR) {
            config.rounding_mode = raw.parse()?;
        }
        if let Some(raw) = lookup(SPLIT_UNIT_VAR) {
            config.split_unit = raw
                .trim()
                .parse::<i64>()
                .ok()
                .filter(|unit| *unit > 0)
                .ok_or(ConfigError::SplitUnit { value: raw })?;
        }

        Ok(config)
    }
}

/// Logs go to stderr so command output on stdout stays clean.
pub fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("error"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

pub fn run() -> CliResult<()> {
    init_logging();

    let config = AppConfig::from_env().map_err(|err| err.to_string())?;
    tracing::debug!(
        rounding_mode = %config.rounding_mode,
        split_unit = config.split_unit,
        "Configuration loaded"
    );

    let processor = SessionProcessor::new(&PARSER, SettlementEngine::new(config.rounding_mode))
        .with_split_unit(config.split_unit);
    let mut interpreter = Interpreter::new(processor);
    let mut stdout = io::stdout().lock();

    match env::args().nth(1) {
        Some(path) if path != "-" => {
            let source = fs::read_to_string(&path)
                .map_err(|err| format!("Failed to read '{path}': {err}"))?;
            tracing::info!(path = %path, "Running script");
            interpreter.run_source(&source, &mut stdout)
        }
        _ => interpreter.run_interactive(io::stdin().lock(), &mut stdout),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn lookup<'a>(vars: &'a [(&'a str, &'a str)]) -> impl Fn(&str) -> Option<String> + 'a {
        move |key: &str| {
            vars.iter()
                .find(|(name, _)| *name == key)
                .map(|(_, value)| value.to_string())
        }
    }

    #[test]
    fn defaults_when_unset() {
        assert_eq!(AppConfig::from_lookup(lookup(&[])), Ok(AppConfig::default()));
        assert_eq!(AppConfig::default().split_unit, 100);
    }

    #[rstest]
    #[case::half_even("half-even", RoundingMode::HalfEven)]
    #[case::underscore("HALF_UP", RoundingMode::HalfUp)]
    fn reads_rounding_mode(#[case] raw: &str, #[case] expected: RoundingMode) {
        let vars = [(ROUNDING_MODE_VAR, raw)];
        let config = AppConfig::from_lookup(lookup(&vars)).expect("valid config");
        assert_eq!(config.rounding_mode, expected);
    }

    #[rstest]
    #[case::yen("1", 1)]
    #[case::padded(" 500 ", 500)]
    fn reads_split_unit(#[case] raw: &str, #[case] expected: i64) {
        let vars = [(SPLIT_UNIT_VAR, raw)];
        let config = AppConfig::from_lookup(lookup(&vars)).expect("valid config");
        assert_eq!(config.split_unit, expected);
    }

    #[rstest]
    #[case::zero("0")]
    #[case::negative("-100")]
    #[case::text("hundred")]
    fn rejects_invalid_split_unit(#[case] raw: &str) {
        let vars = [(SPLIT_UNIT_VAR, raw)];
        assert_eq!(
            AppConfig::from_lookup(lookup(&vars)),
            Err(ConfigError::SplitUnit {
                value: raw.to_string()
            })
        );
    }

    #[test]
    fn rejects_unknown_rounding_mode() {
        let vars = [(ROUNDING_MODE_VAR, "banker")];
        let err = AppConfig::from_lookup(lookup(&vars)).expect_err("invalid mode");
        assert!(matches!(err, ConfigError::RoundingMode(_)));
        assert!(err.to_string().starts_with(ROUNDING_MODE_VAR));
    }
}
