//! Scanner for Pretzel
//!
//! Converts source code into a stream of tokens. Positions are 1-based and
//! every token is built through [`Token::new`], which derives its end from
//! the start position and the raw text.

use log::{debug, trace};

use crate::frontend::token::{Token, TokenKind};
use crate::utils::{Error, Position, Result};

/// The scanner state
pub struct Scanner {
    /// Source code as chars
    source: Vec<char>,
    /// Current index into `source`
    pos: usize,
    /// Index where the current token starts
    start: usize,
    /// Position of `pos`
    position: Position,
    /// Position of `start`
    start_position: Position,
}

impl Scanner {
    /// Create a new scanner for the given source code
    pub fn new(source: &str) -> Self {
        Self {
            source: source.chars().collect(),
            pos: 0,
            start: 0,
            position: Position::start(),
            start_position: Position::start(),
        }
    }

    fn peek(&self) -> Option<char> {
        self.source.get(self.pos).copied()
    }

    fn peek_next(&self) -> Option<char> {
        self.source.get(self.pos + 1).copied()
    }

    fn advance(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.pos += 1;
        if c == '\n' {
            self.position.line += 1;
            self.position.column = 1;
        } else {
            self.position.column += 1;
        }
        Some(c)
    }

    /// Check if we've reached the end of input
    pub fn is_at_end(&self) -> bool {
        self.pos >= self.source.len()
    }

    /// Position of the next unread character
    pub fn position(&self) -> Position {
        self.position
    }

    fn begin(&mut self) {
        self.start = self.pos;
        self.start_position = self.position;
    }

    fn make_token(&self, kind: TokenKind) -> Token {
        let text: String = self.source[self.start..self.pos].iter().collect();
        let token = Token::new(kind, text, self.start_position.line, self.start_position.column);
        debug_assert_eq!(token.end(), self.position);
        debug_assert!(token.is_well_formed(), "{}", token);
        trace!("{}", token);
        token
    }

    /// Skip whitespace and line comments
    fn skip_whitespace(&mut self) {
        while let Some(c) = self.peek() {
            match c {
                ' ' | '\t' | '\r' | '\n' => {
                    self.advance();
                }
                '/' if self.peek_next() == Some('/') => {
                    while let Some(c) = self.peek() {
                        if c == '\n' {
                            break;
                        }
                        self.advance();
                    }
                }
                _ => break,
            }
        }
    }

    /// Longest operator or delimiter spelling at the current position
    fn match_symbol(&self) -> Option<TokenKind> {
        let rest = &self.source[self.pos..];
        TokenKind::ALL
            .into_iter()
            .filter(|kind| kind.is_symbol())
            .filter_map(|kind| kind.value().map(|spelling| (kind, spelling)))
            .filter(|(_, spelling)| {
                spelling.chars().count() <= rest.len()
                    && spelling.chars().zip(rest.iter()).all(|(a, &b)| a == b)
            })
            .max_by_key(|(_, spelling)| spelling.len())
            .map(|(kind, _)| kind)
    }

    fn read_identifier(&mut self) -> Token {
        while let Some(c) = self.peek() {
            if c.is_alphanumeric() || c == '_' {
                self.advance();
            } else {
                break;
            }
        }

        let text: String = self.source[self.start..self.pos].iter().collect();
        let kind = TokenKind::keyword_from_str(&text).unwrap_or(TokenKind::Identifier);
        self.make_token(kind)
    }

    /// Digits, optionally followed by `.` and more digits
    fn read_number(&mut self) -> Token {
        self.skip_digits();

        if self.peek() == Some('.') && self.peek_next().map_or(false, |c| c.is_ascii_digit()) {
            self.advance(); // consume '.'
            self.skip_digits();
            return self.make_token(TokenKind::RealLiteral);
        }

        self.make_token(TokenKind::DecimalLiteral)
    }

    fn skip_digits(&mut self) {
        while self.peek().map_or(false, |c| c.is_ascii_digit()) {
            self.advance();
        }
    }

    /// Read a string literal. The token keeps the quotes and escapes as
    /// written and may span several lines. Only `\n \r \b \t \\ \"` are
    /// valid escapes.
    fn read_string(&mut self) -> Result<Token> {
        self.advance(); // consume opening quote

        loop {
            let escape_position = self.position;
            match self.advance() {
                Some('"') => break,
                Some('\\') => match self.advance() {
                    Some('n' | 'r' | 'b' | 't' | '\\' | '"') => {}
                    Some(ch) => {
                        return Err(Error::IllegalEscape {
                            ch,
                            position: escape_position,
                        })
                    }
                    None => return Err(self.unterminated_string()),
                },
                Some(_) => {}
                None => return Err(self.unterminated_string()),
            }
        }

        Ok(self.make_token(TokenKind::StringLiteral))
    }

    fn unterminated_string(&self) -> Error {
        Error::UnterminatedString {
            position: self.start_position,
        }
    }

    /// Get the next token
    pub fn next_token(&mut self) -> Result<Token> {
        self.skip_whitespace();
        self.begin();

        let Some(c) = self.peek() else {
            let token = Token::eof(self.position);
            trace!("{}", token);
            return Ok(token);
        };

        if c.is_alphabetic() || c == '_' {
            return Ok(self.read_identifier());
        }

        if c.is_ascii_digit() {
            return Ok(self.read_number());
        }

        if c == '"' {
            return self.read_string();
        }

        if let Some(kind) = self.match_symbol() {
            let width = kind.value().map_or(0, |spelling| spelling.chars().count());
            for _ in 0..width {
                self.advance();
            }
            return Ok(self.make_token(kind));
        }

        Err(Error::UnexpectedCharacter {
            ch: c,
            position: self.start_position,
        })
    }

    /// Tokenize the entire source. The result always ends with a single EOF
    /// token; the first lexical error stops scanning.
    pub fn tokenize(&mut self) -> Result<Vec<Token>> {
        let mut tokens = Vec::new();
        loop {
            let token = self.next_token()?;
            let is_eof = token.kind() == TokenKind::Eof;
            tokens.push(token);
            if is_eof {
                break;
            }
        }
        debug!("scanned {} tokens", tokens.len());
        Ok(tokens)
    }
}

/// Scan `source` into a complete token stream
pub fn scan(source: &str) -> Result<Vec<Token>> {
    Scanner::new(source).tokenize()
}
