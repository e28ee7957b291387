use serde::Serialize;

/// Errors produced while turning interface text into resolved signatures.
///
/// No source position is carried: the grammar's diagnostics are
/// positionless at this scale. Messages name the expectation that failed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, thiserror::Error)]
pub enum IdlError {
    /// The lexer ran off the end of the input inside a quoted string.
    #[error("lex error: {message}")]
    Lex { message: String },

    /// An expected token, symbol, or identifier was absent.
    #[error("parse error: {message}")]
    Parse { message: String },
}

impl IdlError {
    pub fn lex(message: impl Into<String>) -> Self {
        IdlError::Lex {
            message: message.into(),
        }
    }

    pub fn parse(message: impl Into<String>) -> Self {
        IdlError::Parse {
            message: message.into(),
        }
    }
}
