use super::*;

fn tokens(input: &str) -> Vec<Token> {
    let mut t = Tokenizer::new(input);
    let mut out = Vec::new();
    loop {
        let tok = t.next_token().unwrap();
        if tok == Token::Eof {
            return out;
        }
        out.push(tok);
    }
}

#[test]
fn separators_are_transparent() {
    assert_eq!(
        tokens(" M 1,2\t,\n3 "),
        vec![
            Token::Command("M".to_string()),
            Token::Number(1.0),
            Token::Number(2.0),
            Token::Number(3.0),
        ]
    );
}

#[test]
fn numbers_support_sign_fraction_and_exponent() {
    assert_eq!(
        tokens("-1.5 +2 3e2 4.5E-1 -7e+1"),
        vec![
            Token::Number(-1.5),
            Token::Number(2.0),
            Token::Number(300.0),
            Token::Number(0.45),
            Token::Number(-70.0),
        ]
    );
}

#[test]
fn numbers_without_separators_split_on_sign_and_second_dot() {
    assert_eq!(
        tokens("10-20.5.25"),
        vec![
            Token::Number(10.0),
            Token::Number(-20.5),
            Token::Number(0.25),
        ]
    );
}

#[test]
fn exponent_marker_without_digits_is_left_as_command() {
    assert_eq!(
        tokens("3em"),
        vec![Token::Number(3.0), Token::Command("em".to_string())]
    );
}

#[test]
fn command_is_a_maximal_alphabetic_run() {
    assert_eq!(
        tokens("rotate(45)"),
        vec![
            Token::Command("rotate".to_string()),
            Token::Char('('),
            Token::Number(45.0),
            Token::Char(')'),
        ]
    );
}

#[test]
fn lone_sign_is_a_malformed_number() {
    let mut t = Tokenizer::new("M -, 3");
    assert_eq!(t.read_command().unwrap(), "M");
    let err = t.read_float().unwrap_err();
    assert_eq!(
        err,
        TokenizerError::MalformedNumber {
            literal: "-".to_string(),
            offset: 2,
        }
    );
}

#[test]
fn read_float_reports_what_was_found() {
    let mut t = Tokenizer::new("  L");
    let err = t.read_float().unwrap_err();
    assert_eq!(
        err.to_string(),
        "expected a number at offset 2, found command \"L\""
    );
}

#[test]
fn read_command_fails_at_end_of_input() {
    let mut t = Tokenizer::new("   ");
    let err = t.read_command().unwrap_err();
    assert!(matches!(err, TokenizerError::Expected { offset: 3, .. }));
}

#[test]
fn expect_checks_the_character() {
    let mut t = Tokenizer::new("( )");
    t.expect('(').unwrap();
    assert!(t.expect('(').is_err());
}

#[test]
fn peek_does_not_consume() {
    let mut t = Tokenizer::new("5 L");
    assert!(t.next_is_number().unwrap());
    assert!(t.next_is_number().unwrap());
    assert_eq!(t.read_float().unwrap(), 5.0);
    assert!(!t.next_is_number().unwrap());
    assert_eq!(t.read_command().unwrap(), "L");
    assert!(t.is_eof().unwrap());
}

#[test]
fn next_is_char_consumes_only_on_match() {
    let mut t = Tokenizer::new("( 1");
    assert!(!t.next_is_char(')').unwrap());
    assert!(t.next_is_char('(').unwrap());
    assert_eq!(t.read_float().unwrap(), 1.0);
}

#[test]
fn offset_points_at_next_token() {
    let mut t = Tokenizer::new("M  10");
    t.read_command().unwrap();
    assert_eq!(t.offset(), 3);
    t.peek().unwrap();
    assert_eq!(t.offset(), 3);
}
