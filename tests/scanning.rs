use lox_scan::{scan, Error, ErrorKind, FnReporter, Literal, Scanner, Token, TokenKind};
use std::thread;

const PROGRAM: &str = r#"// fibonacci
fun fib(n) {
  if (n <= 1) return n;
  return fib(n - 2) + fib(n - 1);
}

var greeting = "hello,
world";
print fib(10) >= 55.0 and greeting != nil;
"#;

fn kinds(tokens: &[Token]) -> Vec<TokenKind> {
    tokens.iter().map(Token::kind).collect()
}

#[test]
fn scans_a_whole_program() {
    use TokenKind::*;

    let mut errors: Vec<Error> = Vec::new();
    let tokens = scan(PROGRAM, &mut errors);

    assert!(errors.is_empty());
    assert_eq!(
        vec![
            Fun, Identifier, LeftParen, Identifier, RightParen, LeftBrace,
            If, LeftParen, Identifier, LessEqual, Number, RightParen, Return, Identifier, Semicolon,
            Return, Identifier, LeftParen, Identifier, Minus, Number, RightParen, Plus,
            Identifier, LeftParen, Identifier, Minus, Number, RightParen, Semicolon,
            RightBrace,
            Var, Identifier, Equal, String, Semicolon,
            Print, Identifier, LeftParen, Number, RightParen, GreaterEqual, Number,
            And, Identifier, BangEqual, Nil, Semicolon,
            EndOfFile,
        ],
        kinds(&tokens),
    );

    let greeting = tokens.iter().find(|t| t.kind() == String).unwrap();
    assert_eq!(Some(&Literal::String("hello,\nworld".into())), greeting.literal());
    assert_eq!(7, greeting.line());

    let print = tokens.iter().find(|t| t.kind() == Print).unwrap();
    assert_eq!(9, print.line());

    assert_eq!(10, tokens.last().unwrap().line());
}

#[test]
fn lexemes_reassemble_the_source_without_trivia() {
    let source = "var  x=1.5;// note\nprint(x !=\t2);";
    let tokens = scan(source, Vec::<Error>::new());
    let joined: String = tokens.iter().map(Token::lexeme).collect();
    assert_eq!("varx=1.5;print(x!=2);", joined);
}

#[test]
fn callback_sink_sees_every_error_with_its_line() {
    let mut reports = Vec::new();
    let tokens = scan(
        "a ~ b\n| c\n\"never closed",
        FnReporter(|line: usize, message: &str| reports.push((line, message.to_owned()))),
    );

    assert_eq!(
        vec![TokenKind::Identifier, TokenKind::Identifier, TokenKind::Identifier, TokenKind::EndOfFile],
        kinds(&tokens),
    );
    assert_eq!(
        vec![
            (1, "Unexpected character: ~".to_owned()),
            (2, "Unexpected character: |".to_owned()),
            (3, "Unterminated string".to_owned()),
        ],
        reports,
    );
}

#[test]
fn unterminated_string_yields_single_diagnostic() {
    let mut errors: Vec<Error> = Vec::new();
    let tokens = scan("\"abc", &mut errors);

    assert_eq!(0, tokens.iter().filter(|t| t.kind() == TokenKind::String).count());
    assert_eq!(vec![TokenKind::EndOfFile], kinds(&tokens));
    assert_eq!(1, errors.len());
    assert_eq!(&ErrorKind::UnterminatedString, errors[0].kind());
}

#[test]
fn streaming_and_collecting_agree() {
    let streamed: Vec<Token> = Scanner::new(PROGRAM).filter_map(Result::ok).collect();
    assert_eq!(scan(PROGRAM, Vec::<Error>::new()), streamed);
}

#[test]
fn independent_scans_run_in_parallel() {
    let handles: Vec<_> = (0..4)
        .map(|i| {
            thread::spawn(move || {
                let source = format!("var x{} = {};\n", i, i).repeat(100);
                scan(&source, Vec::<Error>::new())
            })
        })
        .collect();

    for handle in handles {
        let tokens = handle.join().unwrap();
        assert_eq!(5 * 100 + 1, tokens.len());
        assert_eq!(101, tokens.last().unwrap().line());
    }
}
