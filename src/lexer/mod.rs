use crate::token::{Span, Token, TokenKind, KEYWORD_HASHMAP};
use compact_str::ToCompactString;

/// Scanner over an immutable source buffer.
///
/// `next_token` never fails: unrecognized characters become `Illegal` tokens
/// and the end of input is reported as an `Eof` token forever after.
#[derive(Debug)]
pub struct Lexer<'src> {
    source: &'src str,
    /// Byte offset of `current`.
    position: usize,
    /// Byte offset one past `current`.
    read_position: usize,
    current: Option<char>,
    line: u32,
}

impl<'src> Lexer<'src> {
    pub fn new(source: &'src str) -> Self {
        let mut lexer = Self {
            source,
            position: 0,
            read_position: 0,
            current: None,
            line: 1,
        };
        lexer.read_char();
        lexer
    }

    fn read_char(&mut self) {
        if let Some('\n') = self.current {
            self.line += 1;
        }
        self.position = self.read_position;
        self.current = self.source[self.read_position..].chars().next();
        if let Some(c) = self.current {
            self.read_position += c.len_utf8();
        }
    }

    fn peek_char(&self) -> Option<char> {
        self.source[self.read_position..].chars().next()
    }

    fn skip_whitespace(&mut self) {
        while matches!(self.current, Some(' ' | '\t' | '\n' | '\r')) {
            self.read_char();
        }
    }

    pub fn next_token(&mut self) -> Token {
        self.skip_whitespace();

        let start = self.position;
        let line = self.line;

        let Some(c) = self.current else {
            return self.make_token(TokenKind::Eof, start, line);
        };

        let kind = match c {
            '=' => {
                if self.peek_char() == Some('=') {
                    self.read_char();
                    TokenKind::Equal
                } else {
                    TokenKind::Assign
                }
            }
            '!' => {
                if self.peek_char() == Some('=') {
                    self.read_char();
                    TokenKind::NotEqual
                } else {
                    TokenKind::Bang
                }
            }
            '+' => TokenKind::Plus,
            '-' => TokenKind::Minus,
            '*' => TokenKind::Asterisk,
            '/' => TokenKind::Slash,
            '<' => TokenKind::LessThan,
            '>' => TokenKind::GreaterThan,
            ',' => TokenKind::Comma,
            ';' => TokenKind::Semicolon,
            ':' => TokenKind::Colon,
            '(' => TokenKind::LeftParenthesis,
            ')' => TokenKind::RightParenthesis,
            '{' => TokenKind::LeftBrace,
            '}' => TokenKind::RightBrace,
            '[' => TokenKind::LeftBracket,
            ']' => TokenKind::RightBracket,
            '"' => return self.read_string(start, line),
            c if is_identifier_char(c) => return self.read_identifier(start, line),
            c if c.is_ascii_digit() => return self.read_number(start, line),
            _ => TokenKind::Illegal,
        };

        self.read_char();
        self.make_token(kind, start, line)
    }

    /// A maximal run of ASCII letters or underscores, checked against the
    /// keyword table.
    fn read_identifier(&mut self, start: usize, line: u32) -> Token {
        while self.current.is_some_and(is_identifier_char) {
            self.read_char();
        }
        let literal = &self.source[start..self.position];
        let kind = KEYWORD_HASHMAP
            .get(literal)
            .copied()
            .unwrap_or(TokenKind::Ident);
        self.make_token(kind, start, line)
    }

    /// A maximal run of ASCII digits. A leading minus is never part of the
    /// literal; negation is the prefix operator's job.
    fn read_number(&mut self, start: usize, line: u32) -> Token {
        while self.current.is_some_and(|c| c.is_ascii_digit()) {
            self.read_char();
        }
        self.make_token(TokenKind::Int, start, line)
    }

    /// Everything between `"` and the next `"` or end of input, verbatim.
    /// No escape sequences.
    fn read_string(&mut self, start: usize, line: u32) -> Token {
        self.read_char();
        let content_start = self.position;
        while !matches!(self.current, Some('"') | None) {
            self.read_char();
        }
        let content = &self.source[content_start..self.position];
        if self.current.is_some() {
            self.read_char();
        }
        Token {
            kind: TokenKind::String,
            literal: content.to_compact_string(),
            span: Span {
                start: start as u32,
                length: (self.position - start) as u32,
            },
            line,
        }
    }

    fn make_token(&self, kind: TokenKind, start: usize, line: u32) -> Token {
        let literal = &self.source[start..self.position];
        Token {
            kind,
            literal: literal.to_compact_string(),
            span: Span {
                start: start as u32,
                length: (self.position - start) as u32,
            },
            line,
        }
    }
}

fn is_identifier_char(c: char) -> bool {
    c.is_ascii_alphabetic() || c == '_'
}
