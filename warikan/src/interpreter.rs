use std::{
    borrow::Cow,
    io::{BufRead, Write},
};
use warikan_application::{ExecutedCommand, Ledger, ScriptParseError, SessionProcessor};
use warikan_presentation::{OutcomePresenter, format_script_parse_error};

pub type CliResult<T> = Result<T, Cow<'static, str>>;

/// Drives a [`SessionProcessor`] over one ledger, writing rendered outcomes.
pub struct Interpreter<'a> {
    processor: SessionProcessor<'a>,
    ledger: Ledger,
}

impl<'a> Interpreter<'a> {
    pub fn new(processor: SessionProcessor<'a>) -> Self {
        Self {
            processor,
            ledger: Ledger::new(),
        }
    }

    /// Runs a whole script. A syntax error anywhere aborts before any
    /// command runs; rejected commands are reported and skipped.
    pub fn run_source(&mut self, source: &str, out: &mut impl Write) -> CliResult<()> {
        let executed = self
            .processor
            .run(&mut self.ledger, source)
            .map_err(|err| Cow::Owned(format_script_parse_error(err)))?;

        let failures = executed
            .iter()
            .filter(|entry| entry.outcome.is_failure())
            .count();
        tracing::debug!(
            commands = executed.len(),
            failures,
            participants = self.ledger.participant_count(),
            payments = self.ledger.payments().len(),
            "Script finished"
        );

        write_outcomes(out, &executed)
    }

    /// Line-by-line session. Every error, syntax errors included, is
    /// reported and the session continues.
    pub fn run_interactive(&mut self, input: impl BufRead, out: &mut impl Write) -> CliResult<()> {
        for (idx, line) in input.lines().enumerate() {
            let line = line.map_err(|err| format!("Failed to read input: {err}"))?;
            let line_number = idx + 1;

            match self.processor.run(&mut self.ledger, &line) {
                Ok(executed) => {
                    let executed: Vec<ExecutedCommand> = executed
                        .into_iter()
                        .map(|entry| ExecutedCommand {
                            line: line_number,
                            ..entry
                        })
                        .collect();
                    write_outcomes(out, &executed)?;
                }
                Err(ScriptParseError::SyntaxError { detail, .. }) => {
                    let message = format_script_parse_error(ScriptParseError::SyntaxError {
                        line: line_number,
                        detail,
                    });
                    writeln!(out, "{message}")
                        .map_err(|err| format!("Failed to write output: {err}"))?;
                }
            }
        }

        Ok(())
    }

    #[cfg(test)]
    fn ledger(&self) -> &Ledger {
        &self.ledger
    }
}

fn write_outcomes(out: &mut impl Write, executed: &[ExecutedCommand]) -> CliResult<()> {
    for entry in executed {
        writeln!(out, "{}", OutcomePresenter::render(entry))
            .map_err(|err| format!("Failed to write output: {err}"))?;
    }
    out.flush()
        .map_err(|err| format!("Failed to write output: {err}"))?;
    Ok(())
}
