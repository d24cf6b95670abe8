use std::result;
use thiserror::Error;

pub type Result<T> = result::Result<T, Error>;

#[derive(Debug, Error, PartialEq, Clone)]
#[non_exhaustive]
pub enum ErrorKind {
    #[error("Unexpected character: {0}")]
    UnexpectedCharacter(char),
    #[error("Unterminated string")]
    UnterminatedString,
}

#[derive(Debug, Error, PartialEq, Clone)]
#[error("[line {line}] Error: {kind}")]
pub struct Error {
    line: usize,
    kind: ErrorKind,
}

impl Error {
    pub fn unexpected_character(line: usize, c: char) -> Error {
        Error { line, kind: ErrorKind::UnexpectedCharacter(c) }
    }

    pub fn unterminated_string(line: usize) -> Error {
        Error { line, kind: ErrorKind::UnterminatedString }
    }

    pub fn kind(&self) -> &ErrorKind {
        &self.kind
    }

    pub fn line(&self) -> usize {
        self.line
    }

    /// The message without the line prefix.
    pub fn message(&self) -> String {
        self.kind.to_string()
    }
}

/// Receives lexical errors as the scanner finds them.
///
/// Scanning never stops because of a report; a sink sees every error in the
/// source, in document order.
pub trait Reporter {
    fn report(&mut self, error: Error);
}

impl Reporter for Vec<Error> {
    fn report(&mut self, error: Error) {
        self.push(error);
    }
}

impl<R: Reporter + ?Sized> Reporter for &mut R {
    fn report(&mut self, error: Error) {
        (**self).report(error);
    }
}

/// Adapts a `(line, message)` callback into a [`Reporter`].
pub struct FnReporter<F>(pub F);

impl<F: FnMut(usize, &str)> Reporter for FnReporter<F> {
    fn report(&mut self, error: Error) {
        (self.0)(error.line(), &error.message());
    }
}
