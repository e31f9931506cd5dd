use macaque::lexer::Lexer;
use macaque::token::TokenKind;
use proptest::prelude::*;

fn check(input: &str, expected: &[(TokenKind, &str)]) {
    let mut lexer = Lexer::new(input);
    for (index, (kind, literal)) in expected.iter().enumerate() {
        let token = lexer.next_token();
        assert_eq!(
            token.kind, *kind,
            "token {index}: wrong kind (literal {:?})",
            token.literal
        );
        assert_eq!(token.literal.as_str(), *literal, "token {index}: wrong literal");
    }
    assert_eq!(lexer.next_token().kind, TokenKind::Eof);
}

#[test]
fn lexes_the_whole_surface() {
    let input = r#"let five = 5;
let ten = 10;

let add = fn(x, y) {
  x + y;
};

let result = add(five, ten);
!-/*5;
5 < 10 > 5;

if (5 < 10) {
	return true;
} else {
	return false;
}

10 == 10;
10 != 9;
"foobar"
"foo bar"
[1, 2];
{"foo": "bar"}
"#;

    use TokenKind::*;
    check(
        input,
        &[
            (Let, "let"),
            (Ident, "five"),
            (Assign, "="),
            (Int, "5"),
            (Semicolon, ";"),
            (Let, "let"),
            (Ident, "ten"),
            (Assign, "="),
            (Int, "10"),
            (Semicolon, ";"),
            (Let, "let"),
            (Ident, "add"),
            (Assign, "="),
            (Function, "fn"),
            (LeftParenthesis, "("),
            (Ident, "x"),
            (Comma, ","),
            (Ident, "y"),
            (RightParenthesis, ")"),
            (LeftBrace, "{"),
            (Ident, "x"),
            (Plus, "+"),
            (Ident, "y"),
            (Semicolon, ";"),
            (RightBrace, "}"),
            (Semicolon, ";"),
            (Let, "let"),
            (Ident, "result"),
            (Assign, "="),
            (Ident, "add"),
            (LeftParenthesis, "("),
            (Ident, "five"),
            (Comma, ","),
            (Ident, "ten"),
            (RightParenthesis, ")"),
            (Semicolon, ";"),
            (Bang, "!"),
            (Minus, "-"),
            (Slash, "/"),
            (Asterisk, "*"),
            (Int, "5"),
            (Semicolon, ";"),
            (Int, "5"),
            (LessThan, "<"),
            (Int, "10"),
            (GreaterThan, ">"),
            (Int, "5"),
            (Semicolon, ";"),
            (If, "if"),
            (LeftParenthesis, "("),
            (Int, "5"),
            (LessThan, "<"),
            (Int, "10"),
            (RightParenthesis, ")"),
            (LeftBrace, "{"),
            (Return, "return"),
            (True, "true"),
            (Semicolon, ";"),
            (RightBrace, "}"),
            (Else, "else"),
            (LeftBrace, "{"),
            (Return, "return"),
            (False, "false"),
            (Semicolon, ";"),
            (RightBrace, "}"),
            (Int, "10"),
            (Equal, "=="),
            (Int, "10"),
            (Semicolon, ";"),
            (Int, "10"),
            (NotEqual, "!="),
            (Int, "9"),
            (Semicolon, ";"),
            (String, "foobar"),
            (String, "foo bar"),
            (LeftBracket, "["),
            (Int, "1"),
            (Comma, ","),
            (Int, "2"),
            (RightBracket, "]"),
            (Semicolon, ";"),
            (LeftBrace, "{"),
            (String, "foo"),
            (Colon, ":"),
            (String, "bar"),
            (RightBrace, "}"),
        ],
    );
}

#[test]
fn eof_is_idempotent() {
    let mut lexer = Lexer::new("5;");
    assert_eq!(lexer.next_token().kind, TokenKind::Int);
    assert_eq!(lexer.next_token().kind, TokenKind::Semicolon);
    for _ in 0..4 {
        let token = lexer.next_token();
        assert_eq!(token.kind, TokenKind::Eof);
        assert_eq!(token.literal.as_str(), "");
    }
}

#[test]
fn unknown_characters_are_illegal_tokens() {
    let mut lexer = Lexer::new("@ #");
    let token = lexer.next_token();
    assert_eq!(token.kind, TokenKind::Illegal);
    assert_eq!(token.literal.as_str(), "@");
    let token = lexer.next_token();
    assert_eq!(token.kind, TokenKind::Illegal);
    assert_eq!(token.literal.as_str(), "#");
    assert_eq!(lexer.next_token().kind, TokenKind::Eof);
}

#[test]
fn minus_is_never_part_of_an_integer_literal() {
    let mut lexer = Lexer::new("-42");
    assert_eq!(lexer.next_token().kind, TokenKind::Minus);
    let token = lexer.next_token();
    assert_eq!(token.kind, TokenKind::Int);
    assert_eq!(token.literal.as_str(), "42");
}

#[test]
fn identifiers_are_letters_and_underscores_only() {
    // A digit ends the identifier: "a0" is two tokens, not one name.
    check(
        "a0 foo_bar _x",
        &[
            (TokenKind::Ident, "a"),
            (TokenKind::Int, "0"),
            (TokenKind::Ident, "foo_bar"),
            (TokenKind::Ident, "_x"),
        ],
    );
}

#[test]
fn unterminated_string_runs_to_end_of_input() {
    let mut lexer = Lexer::new("\"abc");
    let token = lexer.next_token();
    assert_eq!(token.kind, TokenKind::String);
    assert_eq!(token.literal.as_str(), "abc");
    assert_eq!(lexer.next_token().kind, TokenKind::Eof);
}

#[test]
fn tokens_know_their_line() {
    let mut lexer = Lexer::new("let x = 5;\nlet y = 10;");
    let mut last_line = 0;
    loop {
        let token = lexer.next_token();
        if token.is_eof() {
            break;
        }
        last_line = token.line;
    }
    assert_eq!(last_line, 2);
}

fn symbol_strategy() -> impl Strategy<Value = String> {
    prop::sample::select(vec![
        "==", "!=", "=", "+", "-", "!", "*", "/", "<", ">", ",", ";", ":", "(", ")", "{", "}",
        "[", "]",
    ])
    .prop_map(String::from)
}

fn keyword_strategy() -> impl Strategy<Value = String> {
    prop::sample::select(vec!["fn", "let", "true", "false", "if", "else", "return"])
        .prop_map(String::from)
}

fn identifier_strategy() -> impl Strategy<Value = String> {
    "[a-zA-Z_]{1,12}"
}

fn integer_strategy() -> impl Strategy<Value = String> {
    "[0-9]{1,18}"
}

fn string_literal_strategy() -> impl Strategy<Value = String> {
    "\"[a-z0-9 ]{0,10}\""
}

fn token_sequence_strategy() -> impl Strategy<Value = Vec<String>> {
    const MIN_TOKEN_COUNT: usize = 1;
    const MAX_TOKEN_COUNT: usize = 100;
    prop::collection::vec(
        prop_oneof![
            symbol_strategy(),
            keyword_strategy(),
            identifier_strategy(),
            integer_strategy(),
            string_literal_strategy(),
        ],
        MIN_TOKEN_COUNT..MAX_TOKEN_COUNT,
    )
}

proptest! {
    #[test]
    fn lexer_terminates_with_one_token_per_lexeme(input in token_sequence_strategy()) {
        // Add 1 to include the EOF token.
        let expected_num_tokens = input.len() + 1;
        let input = input.join(" ");
        let mut lexer = Lexer::new(&input);
        let mut num_tokens = 0;
        loop {
            num_tokens += 1;
            let token = lexer.next_token();
            prop_assert!(token.kind != TokenKind::Illegal);
            if token.is_eof() {
                break;
            }
        }
        prop_assert_eq!(num_tokens, expected_num_tokens);
        // And the lexer stays at EOF afterwards.
        prop_assert!(lexer.next_token().is_eof());
    }

    #[test]
    fn lexer_never_gets_stuck(input in "\\PC*") {
        let mut lexer = Lexer::new(&input);
        for _ in 0..(input.len() + 1) {
            if lexer.next_token().is_eof() {
                return Ok(());
            }
        }
        prop_assert!(lexer.next_token().is_eof(), "lexer emitted more tokens than bytes");
    }
}
