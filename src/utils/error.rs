//! Error handling for the Pretzel scanner

use crate::utils::Position;
use thiserror::Error;

/// Result type alias
pub type Result<T> = std::result::Result<T, Error>;

/// Scanner error
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    #[error("Unexpected character: {ch:?}")]
    UnexpectedCharacter { ch: char, position: Position },

    #[error("Unterminated string literal")]
    UnterminatedString { position: Position },

    #[error("Illegal escape character: {ch:?}")]
    IllegalEscape { ch: char, position: Position },
}

impl Error {
    /// Get the position associated with this error
    pub fn position(&self) -> Position {
        match self {
            Self::UnexpectedCharacter { position, .. } => *position,
            Self::UnterminatedString { position } => *position,
            Self::IllegalEscape { position, .. } => *position,
        }
    }

    /// One-line diagnostic, `error at L:C: message`
    pub fn report(&self) -> String {
        format!("error at {}: {}", self.position(), self)
    }
}
