//! Token definitions for Pretzel
//!
//! A [`Token`] is an immutable value: its kind, the exact source text it
//! covers and the span of that text. The end of the span is derived from the
//! start position and the text when the token is built.

use crate::utils::{Position, Span};
use serde::Serialize;
use std::fmt;

/// A token produced by the scanner
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Token {
    kind: TokenKind,
    text: String,
    span: Span,
}

impl Token {
    /// Build a token starting at `start_line`/`start_column`.
    ///
    /// Never fails. A constant kind paired with text other than its spelling
    /// is a caller bug and is not checked here, see [`Token::is_well_formed`].
    pub fn new(kind: TokenKind, text: impl Into<String>, start_line: usize, start_column: usize) -> Self {
        let text = text.into();
        let span = Span::of_text(Position::new(start_line, start_column), &text);
        Self { kind, text, span }
    }

    pub fn eof(position: Position) -> Self {
        Self::new(TokenKind::Eof, "", position.line, position.column)
    }

    pub fn kind(&self) -> TokenKind {
        self.kind
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn start_line(&self) -> usize {
        self.span.start.line
    }

    pub fn start_column(&self) -> usize {
        self.span.start.column
    }

    pub fn end_line(&self) -> usize {
        self.span.end.line
    }

    pub fn end_column(&self) -> usize {
        self.span.end.column
    }

    pub fn start(&self) -> Position {
        self.span.start
    }

    /// One past the last character
    pub fn end(&self) -> Position {
        self.span.end
    }

    pub fn span(&self) -> Span {
        self.span
    }

    /// Whether the text agrees with the kind: constant kinds must carry their
    /// spelling, data kinds must carry some text.
    pub fn is_well_formed(&self) -> bool {
        match self.kind.value() {
            Some(spelling) => self.text == spelling,
            None => !self.text.is_empty(),
        }
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Token{{text='{}', startLine={}, startColumn={}, endLine={}, endColumn={}, kind={}}}",
            self.text,
            self.start_line(),
            self.start_column(),
            self.end_line(),
            self.end_column(),
            self.kind,
        )
    }
}

/// Token kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TokenKind {
    // ============ Operators ============
    /// !
    Bang,
    /// !=
    BangEqual,
    /// =
    Equal,
    /// ==
    EqualEqual,
    /// +
    Plus,
    /// ++
    PlusPlus,
    /// +=
    PlusEqual,
    /// -
    Minus,
    /// --
    MinusMinus,
    /// -=
    MinusEqual,
    /// *
    Multiply,
    /// **
    PowerOf,
    /// *=
    MultiplyEqual,
    /// **=
    PowerOfEqual,
    /// /
    Divide,
    /// /=
    DivideEqual,
    /// %
    Modulo,
    /// %=
    ModuloEqual,
    /// &
    BitwiseAnd,
    /// &&
    LogicalAnd,
    /// |
    BitwiseOr,
    /// ||
    LogicalOr,
    /// ^
    BitwiseXor,
    /// ~
    BitwiseNegate,

    // ============ Delimiters ============
    /// (
    OpenParen,
    /// )
    CloseParen,
    /// {
    OpenBrace,
    /// }
    CloseBrace,
    /// [
    OpenBracket,
    /// ]
    CloseBracket,

    // ============ Identifiers and Literals ============
    StringLiteral,
    Identifier,
    DecimalLiteral,
    RealLiteral,

    // ============ Keywords ============
    /// yes
    KwYes,
    /// no
    KwNo,
    /// none
    KwNone,
    /// func
    KwFunc,
    /// let
    KwLet,
    /// return
    KwReturn,

    // ============ Special ============
    /// End of input, spelled as the empty string
    Eof,
}

impl TokenKind {
    /// Every kind, in declaration order
    pub const ALL: [TokenKind; 41] = [
        TokenKind::Bang,
        TokenKind::BangEqual,
        TokenKind::Equal,
        TokenKind::EqualEqual,
        TokenKind::Plus,
        TokenKind::PlusPlus,
        TokenKind::PlusEqual,
        TokenKind::Minus,
        TokenKind::MinusMinus,
        TokenKind::MinusEqual,
        TokenKind::Multiply,
        TokenKind::PowerOf,
        TokenKind::MultiplyEqual,
        TokenKind::PowerOfEqual,
        TokenKind::Divide,
        TokenKind::DivideEqual,
        TokenKind::Modulo,
        TokenKind::ModuloEqual,
        TokenKind::BitwiseAnd,
        TokenKind::LogicalAnd,
        TokenKind::BitwiseOr,
        TokenKind::LogicalOr,
        TokenKind::BitwiseXor,
        TokenKind::BitwiseNegate,
        TokenKind::OpenParen,
        TokenKind::CloseParen,
        TokenKind::OpenBrace,
        TokenKind::CloseBrace,
        TokenKind::OpenBracket,
        TokenKind::CloseBracket,
        TokenKind::StringLiteral,
        TokenKind::Identifier,
        TokenKind::DecimalLiteral,
        TokenKind::RealLiteral,
        TokenKind::KwYes,
        TokenKind::KwNo,
        TokenKind::KwNone,
        TokenKind::KwFunc,
        TokenKind::KwLet,
        TokenKind::KwReturn,
        TokenKind::Eof,
    ];

    /// The canonical spelling, or `None` for kinds whose text varies per token
    pub fn value(self) -> Option<&'static str> {
        let spelling = match self {
            TokenKind::Bang => "!",
            TokenKind::BangEqual => "!=",
            TokenKind::Equal => "=",
            TokenKind::EqualEqual => "==",
            TokenKind::Plus => "+",
            TokenKind::PlusPlus => "++",
            TokenKind::PlusEqual => "+=",
            TokenKind::Minus => "-",
            TokenKind::MinusMinus => "--",
            TokenKind::MinusEqual => "-=",
            TokenKind::Multiply => "*",
            TokenKind::PowerOf => "**",
            TokenKind::MultiplyEqual => "*=",
            TokenKind::PowerOfEqual => "**=",
            TokenKind::Divide => "/",
            TokenKind::DivideEqual => "/=",
            TokenKind::Modulo => "%",
            TokenKind::ModuloEqual => "%=",
            TokenKind::BitwiseAnd => "&",
            TokenKind::LogicalAnd => "&&",
            TokenKind::BitwiseOr => "|",
            TokenKind::LogicalOr => "||",
            TokenKind::BitwiseXor => "^",
            TokenKind::BitwiseNegate => "~",
            TokenKind::OpenParen => "(",
            TokenKind::CloseParen => ")",
            TokenKind::OpenBrace => "{",
            TokenKind::CloseBrace => "}",
            TokenKind::OpenBracket => "[",
            TokenKind::CloseBracket => "]",
            TokenKind::StringLiteral
            | TokenKind::Identifier
            | TokenKind::DecimalLiteral
            | TokenKind::RealLiteral => return None,
            TokenKind::KwYes => "yes",
            TokenKind::KwNo => "no",
            TokenKind::KwNone => "none",
            TokenKind::KwFunc => "func",
            TokenKind::KwLet => "let",
            TokenKind::KwReturn => "return",
            TokenKind::Eof => "",
        };
        Some(spelling)
    }

    /// Check if this kind has one canonical spelling
    pub fn is_constant(self) -> bool {
        self.value().is_some()
    }

    /// Check if this token is a keyword
    pub fn is_keyword(self) -> bool {
        matches!(
            self,
            TokenKind::KwYes
                | TokenKind::KwNo
                | TokenKind::KwNone
                | TokenKind::KwFunc
                | TokenKind::KwLet
                | TokenKind::KwReturn
        )
    }

    /// Operators and delimiters: constant, non-empty and not a keyword
    pub fn is_symbol(self) -> bool {
        self.is_constant() && !self.is_keyword() && self != TokenKind::Eof
    }

    /// Try to convert an identifier to a keyword
    pub fn keyword_from_str(s: &str) -> Option<TokenKind> {
        match s {
            "yes" => Some(TokenKind::KwYes),
            "no" => Some(TokenKind::KwNo),
            "none" => Some(TokenKind::KwNone),
            "func" => Some(TokenKind::KwFunc),
            "let" => Some(TokenKind::KwLet),
            "return" => Some(TokenKind::KwReturn),
            _ => None,
        }
    }

    /// Upper snake case name, e.g. `POWER_OF_EQUAL`
    pub fn name(self) -> &'static str {
        match self {
            TokenKind::Bang => "BANG",
            TokenKind::BangEqual => "BANG_EQUAL",
            TokenKind::Equal => "EQUAL",
            TokenKind::EqualEqual => "EQUAL_EQUAL",
            TokenKind::Plus => "PLUS",
            TokenKind::PlusPlus => "PLUS_PLUS",
            TokenKind::PlusEqual => "PLUS_EQUAL",
            TokenKind::Minus => "MINUS",
            TokenKind::MinusMinus => "MINUS_MINUS",
            TokenKind::MinusEqual => "MINUS_EQUAL",
            TokenKind::Multiply => "MULTIPLY",
            TokenKind::PowerOf => "POWER_OF",
            TokenKind::MultiplyEqual => "MULTIPLY_EQUAL",
            TokenKind::PowerOfEqual => "POWER_OF_EQUAL",
            TokenKind::Divide => "DIVIDE",
            TokenKind::DivideEqual => "DIVIDE_EQUAL",
            TokenKind::Modulo => "MODULO",
            TokenKind::ModuloEqual => "MODULO_EQUAL",
            TokenKind::BitwiseAnd => "BITWISE_AND",
            TokenKind::LogicalAnd => "LOGICAL_AND",
            TokenKind::BitwiseOr => "BITWISE_OR",
            TokenKind::LogicalOr => "LOGICAL_OR",
            TokenKind::BitwiseXor => "BITWISE_XOR",
            TokenKind::BitwiseNegate => "BITWISE_NEGATE",
            TokenKind::OpenParen => "OPEN_PAREN",
            TokenKind::CloseParen => "CLOSE_PAREN",
            TokenKind::OpenBrace => "OPEN_BRACE",
            TokenKind::CloseBrace => "CLOSE_BRACE",
            TokenKind::OpenBracket => "OPEN_BRACKET",
            TokenKind::CloseBracket => "CLOSE_BRACKET",
            TokenKind::StringLiteral => "STRING_LITERAL",
            TokenKind::Identifier => "IDENTIFIER",
            TokenKind::DecimalLiteral => "DECIMAL_LITERAL",
            TokenKind::RealLiteral => "REAL_LITERAL",
            TokenKind::KwYes => "KW_YES",
            TokenKind::KwNo => "KW_NO",
            TokenKind::KwNone => "KW_NONE",
            TokenKind::KwFunc => "KW_FUNC",
            TokenKind::KwLet => "KW_LET",
            TokenKind::KwReturn => "KW_RETURN",
            TokenKind::Eof => "EOF",
        }
    }

    /// One row of the kind table: the name, then the quoted spelling or
    /// `<data>` for kinds without one
    pub fn table_entry(self) -> String {
        match self.value() {
            Some(spelling) => format!("{:<16} '{}'", self, spelling),
            None => format!("{:<16} <data>", self),
        }
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::collections::hash_map::DefaultHasher;
    use std::collections::HashSet;
    use std::hash::{Hash, Hasher};

    fn hash_of(token: &Token) -> u64 {
        let mut hasher = DefaultHasher::new();
        token.hash(&mut hasher);
        hasher.finish()
    }

    #[test]
    fn test_operator_token() {
        let token = Token::new(TokenKind::Plus, "+", 1, 1);
        assert_eq!((token.end_line(), token.end_column()), (1, 2));
    }

    #[test]
    fn test_multi_line_string_literal() {
        let token = Token::new(TokenKind::StringLiteral, "\"a\nb\"", 3, 5);
        assert_eq!(token.start(), Position::new(3, 5));
        assert_eq!(token.end(), Position::new(4, 3));
    }

    #[test]
    fn test_eof_token() {
        let token = Token::new(TokenKind::Eof, "", 10, 1);
        assert_eq!(token.end(), Position::new(10, 1));
        assert_eq!(token, Token::eof(Position::new(10, 1)));
        assert_eq!(token.start(), token.end());
    }

    #[test]
    fn test_identifier_token() {
        let token = Token::new(TokenKind::Identifier, "foo", 2, 4);
        assert_eq!(token.text(), "foo");
        assert_eq!(token.kind(), TokenKind::Identifier);
        assert_eq!((token.end_line(), token.end_column()), (2, 7));
    }

    #[test]
    fn test_single_line_end() {
        for text in ["", "x", "return", "12.5", "\"no newline\""] {
            let token = Token::new(TokenKind::Identifier, text, 6, 9);
            assert_eq!(token.end_line(), 6);
            assert_eq!(token.end_column(), 9 + text.chars().count());
        }
    }

    #[test]
    fn test_line_count_matches_newlines() {
        for text in ["\"\"", "\"\n\"", "\"\n\n\n\"", "\"a\nb\nc\""] {
            let token = Token::new(TokenKind::StringLiteral, text, 4, 2);
            let newlines = text.matches('\n').count();
            assert_eq!(token.end_line() - token.start_line(), newlines);
        }
    }

    #[test]
    fn test_multi_line_column_ignores_start_column() {
        let a = Token::new(TokenKind::StringLiteral, "\"first\nlast\"", 1, 1);
        let b = Token::new(TokenKind::StringLiteral, "\"x\nlast\"", 1, 30);
        assert_eq!(a.end_column(), b.end_column());
        // `last"` occupies columns 1..=5, the end is exclusive
        assert_eq!(a.end_column(), 6);
    }

    #[test]
    fn test_structural_equality_and_hash() {
        let a = Token::new(TokenKind::Identifier, "foo", 2, 4);
        let b = Token::new(TokenKind::Identifier, String::from("foo"), 2, 4);
        assert_eq!(a, b);
        assert_eq!(hash_of(&a), hash_of(&b));

        let mut set = HashSet::new();
        set.insert(a.clone());
        assert!(set.contains(&b));
    }

    #[test]
    fn test_any_field_change_breaks_equality() {
        let base = Token::new(TokenKind::Identifier, "foo", 2, 4);
        assert_ne!(base, Token::new(TokenKind::Identifier, "fo", 2, 4));
        assert_ne!(base, Token::new(TokenKind::Identifier, "foo", 3, 4));
        assert_ne!(base, Token::new(TokenKind::Identifier, "foo", 2, 5));
        assert_ne!(base, Token::new(TokenKind::Identifier, "fo\no", 2, 4));
    }

    #[test]
    fn test_swapped_kind_is_unequal() {
        let a = Token::new(TokenKind::Identifier, "let", 1, 1);
        let b = Token::new(TokenKind::KwLet, "let", 1, 1);
        assert_eq!(a.span(), b.span());
        assert_ne!(a, b);
    }

    #[test]
    fn test_constant_partition() {
        for kind in TokenKind::ALL {
            match kind {
                TokenKind::StringLiteral
                | TokenKind::Identifier
                | TokenKind::DecimalLiteral
                | TokenKind::RealLiteral => {
                    assert!(!kind.is_constant(), "{kind} should carry data");
                    assert_eq!(kind.value(), None);
                }
                TokenKind::Eof => {
                    assert!(kind.is_constant());
                    assert_eq!(kind.value(), Some(""));
                }
                _ => {
                    assert!(kind.is_constant(), "{kind} should be constant");
                    assert!(!kind.value().unwrap_or_default().is_empty());
                }
            }
        }
    }

    #[test]
    fn test_all_is_complete_and_unique() {
        let kinds: HashSet<_> = TokenKind::ALL.iter().copied().collect();
        assert_eq!(kinds.len(), TokenKind::ALL.len());

        let names: HashSet<_> = TokenKind::ALL.iter().map(|k| k.name()).collect();
        assert_eq!(names.len(), TokenKind::ALL.len());

        let spellings: Vec<_> = TokenKind::ALL.iter().filter_map(|k| k.value()).collect();
        let unique: HashSet<_> = spellings.iter().collect();
        assert_eq!(unique.len(), spellings.len());
    }

    #[test]
    fn test_keywords() {
        for kind in TokenKind::ALL.into_iter().filter(|k| k.is_keyword()) {
            let spelling = kind.value().unwrap_or_default();
            assert_eq!(TokenKind::keyword_from_str(spelling), Some(kind));
            assert!(!kind.is_symbol());
        }
        assert_eq!(TokenKind::keyword_from_str("fn"), None);
        assert_eq!(TokenKind::keyword_from_str("Let"), None);
    }

    #[test]
    fn test_classification() {
        assert!(TokenKind::PowerOfEqual.is_symbol());
        assert!(TokenKind::OpenBracket.is_symbol());
        assert!(!TokenKind::Eof.is_symbol());
    }

    #[test]
    fn test_table_entry() {
        assert_eq!(TokenKind::PowerOfEqual.table_entry(), "POWER_OF_EQUAL   '**='");
        assert_eq!(TokenKind::Identifier.table_entry(), "IDENTIFIER       <data>");
        assert_eq!(TokenKind::Eof.table_entry(), "EOF              ''");
        assert_eq!(TokenKind::KwReturn.table_entry(), "KW_RETURN        'return'");
    }

    #[test]
    fn test_well_formed() {
        assert!(Token::new(TokenKind::PowerOfEqual, "**=", 1, 1).is_well_formed());
        assert!(Token::new(TokenKind::Eof, "", 1, 1).is_well_formed());
        assert!(Token::new(TokenKind::Identifier, "x", 1, 1).is_well_formed());
        assert!(!Token::new(TokenKind::Plus, "-", 1, 1).is_well_formed());
        assert!(!Token::new(TokenKind::Identifier, "", 1, 1).is_well_formed());
    }

    #[test]
    fn test_display() {
        let token = Token::new(TokenKind::KwFunc, "func", 1, 3);
        assert_eq!(
            token.to_string(),
            "Token{text='func', startLine=1, startColumn=3, endLine=1, endColumn=7, kind=KW_FUNC}"
        );
    }

    #[test]
    fn test_serialize() {
        let token = Token::new(TokenKind::PowerOf, "**", 1, 1);
        let json = serde_json::to_value(&token).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "kind": "POWER_OF",
                "text": "**",
                "span": {
                    "start": { "line": 1, "column": 1 },
                    "end": { "line": 1, "column": 3 }
                }
            })
        );
    }

    #[test]
    fn test_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Token>();
        assert_send_sync::<TokenKind>();
    }
}
