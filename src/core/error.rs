use std::io;
use thiserror::Error;

/// Custom error types for trinet
#[derive(Error, Debug)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("Radio channel unavailable: {0}")]
    ChannelUnavailable(String),

    #[error("Frame validation error: {0}")]
    FrameValidation(String),

    #[error("Field {index} parse error: {reason}")]
    FieldParse {
        /// Wire position of the offending token
        index: usize,
        reason: String,
    },

    #[error("Transmit error: {0}")]
    Transmit(String),

    #[error("Configuration error: {0}")]
    Config(String),
}

/// Result type alias using our custom Error type
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Creates a new channel-unavailable error
    pub fn channel_unavailable(msg: impl Into<String>) -> Self {
        Error::ChannelUnavailable(msg.into())
    }

    /// Creates a new frame validation error
    pub fn frame(msg: impl Into<String>) -> Self {
        Error::FrameValidation(msg.into())
    }

    /// Creates a new field parse error
    pub fn field_parse(index: usize, reason: impl Into<String>) -> Self {
        Error::FieldParse {
            index,
            reason: reason.into(),
        }
    }

    /// Creates a new transmit error
    pub fn transmit(msg: impl Into<String>) -> Self {
        Error::Transmit(msg.into())
    }

    /// Creates a new configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        Error::Config(msg.into())
    }

    /// Whether the receive path should discard the offending frame and
    /// carry on, as opposed to halting the link
    pub fn is_discard(&self) -> bool {
        matches!(self, Error::FrameValidation(_) | Error::FieldParse { .. })
    }
}
