use ariadne::{Color, Fmt, Label, Report, ReportKind, Source};
use std::fmt;

/// Byte range into the source text, used for annotated diagnostics.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Span {
    pub start: usize,
    pub end: usize,
}

impl Span {
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    pub fn single(pos: usize) -> Self {
        Self {
            start: pos,
            end: pos + 1,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ErrorKind {
    Lex,
    Parse,
    Runtime,
}

/// A diagnostic produced by any pipeline stage.
///
/// `line` is the 1-based source line the error is attributed to; `location`
/// is the parser's " at end" / " at 'lexeme'" wording and is empty for
/// lexical and runtime errors. The `Display` impl renders the plain
/// driver-facing format; `report` renders an annotated source excerpt.
#[derive(Debug, Clone, PartialEq)]
pub struct LoxError {
    pub kind: ErrorKind,
    pub span: Span,
    pub line: usize,
    pub location: String,
    pub message: String,
}

impl LoxError {
    pub fn lex(span: Span, line: usize, message: impl Into<String>) -> Self {
        Self {
            kind: ErrorKind::Lex,
            span,
            line,
            location: String::new(),
            message: message.into(),
        }
    }

    pub fn parse(span: Span, line: usize, location: String, message: impl Into<String>) -> Self {
        Self {
            kind: ErrorKind::Parse,
            span,
            line,
            location,
            message: message.into(),
        }
    }

    pub fn runtime(span: Span, line: usize, message: impl Into<String>) -> Self {
        Self {
            kind: ErrorKind::Runtime,
            span,
            line,
            location: String::new(),
            message: message.into(),
        }
    }

    /// Print a rich report with the offending source span highlighted.
    pub fn report(&self, source: &str, filename: Option<&str>) {
        let filename = filename.unwrap_or("<repl>");

        let color = match self.kind {
            ErrorKind::Lex => Color::Red,
            ErrorKind::Parse => Color::Yellow,
            ErrorKind::Runtime => Color::Magenta,
        };

        let kind_str = match self.kind {
            ErrorKind::Lex => "Lexical Error",
            ErrorKind::Parse => "Syntax Error",
            ErrorKind::Runtime => "Runtime Error",
        };

        Report::build(ReportKind::Error, filename, self.span.start)
            .with_message(format!("{}: {}", kind_str.fg(color), self.message))
            .with_label(
                Label::new((filename, self.span.start..self.span.end))
                    .with_message(&self.message)
                    .with_color(color),
            )
            .finish()
            .eprint((filename, Source::from(source)))
            .ok();
    }
}

impl fmt::Display for LoxError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self.kind {
            ErrorKind::Lex | ErrorKind::Parse => {
                write!(
                    f,
                    "[line {}] Error{}: {}",
                    self.line, self.location, self.message
                )
            }
            ErrorKind::Runtime => write!(f, "{}\n[line {}]", self.message, self.line),
        }
    }
}

impl std::error::Error for LoxError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lex_error_plain_format() {
        let error = LoxError::lex(Span::single(3), 1, "Unexpected character");
        assert_eq!(error.to_string(), "[line 1] Error: Unexpected character");
    }

    #[test]
    fn parse_error_plain_format_includes_location() {
        let error = LoxError::parse(
            Span::single(8),
            2,
            " at '}'".to_string(),
            "Expected expression",
        );
        assert_eq!(
            error.to_string(),
            "[line 2] Error at '}': Expected expression"
        );

        let at_end = LoxError::parse(
            Span::single(8),
            2,
            " at end".to_string(),
            "Expect ';' after value.",
        );
        assert_eq!(
            at_end.to_string(),
            "[line 2] Error at end: Expect ';' after value."
        );
    }

    #[test]
    fn runtime_error_plain_format_is_two_lines() {
        let error = LoxError::runtime(Span::single(0), 4, "Operands must be numbers.");
        assert_eq!(error.to_string(), "Operands must be numbers.\n[line 4]");
    }
}
