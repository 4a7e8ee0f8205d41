//! Pretzel compiler front-end
//!
//! Lexical tokens with derived source spans, the token-kind table, and the
//! scanner that produces them.

pub mod frontend;
pub mod utils;

pub use frontend::scanner::{scan, Scanner};
pub use frontend::token::{Token, TokenKind};
pub use utils::{Error, Position, Result, Span};
