use crate::{
    error::{Error, Reporter, Result},
    token::{Literal, Token, TokenKind},
};
use peekmore::{PeekMore, PeekMoreIterator};
use std::{iter::FusedIterator, str::Chars};
use tracing::{debug, instrument};

/// Single pass scanner over one source string.
///
/// As an iterator it yields tokens and lexical errors in document order and
/// finishes with exactly one `EndOfFile` token.
pub struct Scanner<'a> {
    source: &'a str,
    src: PeekMoreIterator<Chars<'a>>,
    start: usize,
    current: usize,
    start_line: usize,
    line: usize,
    finished: bool,
}

impl <'a> Iterator for Scanner<'a> {
    type Item = Result<Token>;

    fn next(&mut self) -> Option<Result<Token>> {
        loop {
            self.start = self.current;
            self.start_line = self.line;

            let next_char = match self.advance() {
                Some(c) => c,
                None => break,
            };
            if let Some(token) = self.next_token(next_char) {
                return Some(token);
            }
        }

        if self.finished {
            return None;
        }
        self.finished = true;
        Some(Ok(Token::end_of_file(self.line)))
    }
}

impl <'a> FusedIterator for Scanner<'a> {}

impl <'a> Scanner<'a> {
    pub fn new(source: &'a str) -> Self {
        Self {
            source,
            src: source.chars().peekmore(),
            start: 0,
            current: 0,
            start_line: 1,
            line: 1,
            finished: false,
        }
    }

    /// Scans the whole source, handing every lexical error to `reporter`.
    /// The returned tokens always end with `EndOfFile`.
    #[instrument(level = "debug", skip_all, fields(bytes = self.source.len()))]
    pub fn scan_tokens<R: Reporter>(self, mut reporter: R) -> Vec<Token> {
        let mut tokens = Vec::new();
        let mut errors = 0usize;

        for result in self {
            match result {
                Ok(token) => tokens.push(token),
                Err(e) => {
                    debug!(line = e.line(), error = %e.kind(), "lexical error");
                    errors += 1;
                    reporter.report(e);
                },
            }
        }

        debug!(tokens = tokens.len(), errors, "scan finished");
        tokens
    }

    fn next_token(&mut self, c: char) -> Option<Result<Token>> {
        use TokenKind::*;
        match c {
            '(' => Some(Ok(self.token(LeftParen))),
            ')' => Some(Ok(self.token(RightParen))),
            '{' => Some(Ok(self.token(LeftBrace))),
            '}' => Some(Ok(self.token(RightBrace))),
            ',' => Some(Ok(self.token(Comma))),
            '.' => Some(Ok(self.token(Dot))),
            '-' => Some(Ok(self.token(Minus))),
            '+' => Some(Ok(self.token(Plus))),
            ';' => Some(Ok(self.token(Semicolon))),
            '*' => Some(Ok(self.token(Star))),
            '!' => Some(Ok(self.either('=', BangEqual, Bang))),
            '=' => Some(Ok(self.either('=', EqualEqual, Equal))),
            '<' => Some(Ok(self.either('=', LessEqual, Less))),
            '>' => Some(Ok(self.either('=', GreaterEqual, Greater))),
            '/' => {
                if self.does_next_match('/') { // comment runs to end of line
                    self.advance_while(|n| n != '\n');
                    None
                } else {
                    Some(Ok(self.token(Slash)))
                }
            },
            // newlines are counted in `advance`
            ' ' | '\r' | '\t' | '\n' => None,
            '"' => Some(self.extract_string()),
            c if is_digit(c) => Some(Ok(self.extract_number())),
            c if can_start_identifier(c) => Some(Ok(self.extract_identifier())),
            c => Some(Err(Error::unexpected_character(self.line, c))),
        }
    }

    fn extract_string(&mut self) -> Result<Token> {
        self.advance_while(|n| n != '"');

        match self.advance() {
            None => Err(Error::unterminated_string(self.line)),
            Some(_) => { // must be the closing quote
                let value = &self.source[self.start + 1..self.current - 1];
                Ok(self.literal(TokenKind::String, Literal::String(value.to_string())))
            },
        }
    }

    fn extract_number(&mut self) -> Token {
        self.advance_while(is_digit);

        if self.peek() == Some('.') && self.peek_next().map_or(false, is_digit) {
            self.advance();
            self.advance_while(is_digit);
        }

        // digits with an optional fraction always parse
        let value = self.lexeme().parse().unwrap_or(f64::NAN);
        self.literal(TokenKind::Number, Literal::Number(value))
    }

    fn extract_identifier(&mut self) -> Token {
        self.advance_while(is_part_of_valid_identifier);

        let kind = TokenKind::keyword(self.lexeme()).unwrap_or(TokenKind::Identifier);
        self.token(kind)
    }

    fn either(&mut self, expected: char, matched: TokenKind, otherwise: TokenKind) -> Token {
        let kind = if self.does_next_match(expected) { matched } else { otherwise };
        self.token(kind)
    }

    fn token(&self, kind: TokenKind) -> Token {
        Token {
            kind,
            lexeme: self.lexeme().to_string(),
            literal: None,
            line: self.start_line,
        }
    }

    fn literal(&self, kind: TokenKind, literal: Literal) -> Token {
        Token { literal: Some(literal), ..self.token(kind) }
    }

    fn lexeme(&self) -> &'a str {
        &self.source[self.start..self.current]
    }

    fn advance(&mut self) -> Option<char> {
        let c = self.src.next()?;
        self.current += c.len_utf8();
        if c == '\n' {
            self.line += 1;
        }
        Some(c)
    }

    fn peek(&mut self) -> Option<char> {
        self.src.peek().copied()
    }

    fn peek_next(&mut self) -> Option<char> {
        self.src.peek_nth(1).copied()
    }

    fn does_next_match(&mut self, c: char) -> bool {
        if self.peek() == Some(c) {
            self.advance();
            true
        } else {
            false
        }
    }

    fn advance_while(&mut self, should_continue: impl Fn(char) -> bool) {
        while self.peek().map_or(false, &should_continue) {
            self.advance();
        }
    }
}

fn is_digit(c: char) -> bool {
    c.is_ascii_digit()
}

fn can_start_identifier(c: char) -> bool {
    c.is_ascii_alphabetic() || c == '_'
}

fn is_part_of_valid_identifier(c: char) -> bool {
    can_start_identifier(c) || is_digit(c)
}
