//! Lexical analysis for Lox source text.
//!
//! [`scan`] turns a whole source string into a `Vec<Token>` ending in one
//! `EndOfFile` token. Lexical errors never stop the scan; they are handed to a
//! [`Reporter`] as they are found.

pub mod error;
pub mod printer;
pub mod scanner;
pub mod token;

pub use crate::error::{Error, ErrorKind, FnReporter, Reporter, Result};
pub use crate::scanner::Scanner;
pub use crate::token::{Literal, Token, TokenKind};

pub fn scan<R: Reporter>(source: &str, reporter: R) -> Vec<Token> {
    Scanner::new(source).scan_tokens(reporter)
}
