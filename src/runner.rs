use crate::error::LoxError;
use crate::evaluator::Evaluator;
use crate::lexer::Lexer;
use crate::parser::Parser;
use std::io;

/// What happened during one run, for the driver's exit-code mapping.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunOutcome {
    pub had_error: bool,
    pub had_runtime_error: bool,
}

/// Push one block of source text through the whole pipeline.
///
/// Lexical errors are all reported and scanning still yields a complete
/// token sequence; the parse runs regardless, but evaluation is skipped
/// once any lex or parse error has been reported.
pub fn run(source: &str, filename: Option<&str>, pretty: bool) -> RunOutcome {
    let mut outcome = RunOutcome::default();

    let (tokens, lex_errors) = Lexer::new(source.to_string()).scan_tokens();
    for error in &lex_errors {
        report(error, source, filename, pretty);
        outcome.had_error = true;
    }

    let program = match Parser::new(tokens).parse() {
        Ok(program) => program,
        Err(error) => {
            report(&error, source, filename, pretty);
            outcome.had_error = true;
            return outcome;
        }
    };

    if outcome.had_error {
        return outcome;
    }

    let evaluator = Evaluator::new();
    if let Err(error) = evaluator.evaluate_program(&program, &mut io::stdout()) {
        report(&error, source, filename, pretty);
        outcome.had_runtime_error = true;
    }

    outcome
}

fn report(error: &LoxError, source: &str, filename: Option<&str>, pretty: bool) {
    if pretty {
        error.report(source, filename);
    } else {
        eprintln!("{}", error);
    }
}
