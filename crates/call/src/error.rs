use serde::Serialize;

/// Errors produced while preparing a call or presenting a reply.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, thiserror::Error)]
pub enum CallError {
    /// No literal grammar rule matched the element text.
    #[error("unsupported argument literal: {text}")]
    UnsupportedLiteral { text: String },

    /// The literal count does not match the method's argument count.
    #[error("method expects {expected} argument(s), {actual} provided")]
    ArgCountMismatch { expected: usize, actual: usize },

    /// Surfaced verbatim from the binary codec.
    #[error("encode error: {0}")]
    Encode(String),

    /// Surfaced verbatim from the binary codec.
    #[error("decode error: {0}")]
    Decode(String),
}
