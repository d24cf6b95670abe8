use crate::token::Token;

/// Renders one token per line as `line KIND lexeme literal`.
pub fn print(tokens: &[Token]) -> String {
    let mut printer = TokenPrinter { out: String::new() };
    for token in tokens {
        printer.line(token);
    }
    printer.out
}

struct TokenPrinter {
    out: String,
}

impl TokenPrinter {
    fn line(&mut self, token: &Token) {
        let literal = match &token.literal {
            Some(literal) => format!(" {}", literal),
            None => String::new(),
        };
        let s = format!("{:>4} {:<13} {}{}", token.line, token.kind, token.lexeme, literal);
        self.out.push_str(escape_line_breaks(&s).trim_end());
        self.out.push('\n');
    }
}

// multi-line strings must stay on one listing line
fn escape_line_breaks(s: &str) -> String {
    s.replace('\r', "\\r").replace('\n', "\\n")
}
