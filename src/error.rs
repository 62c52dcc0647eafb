//! Error taxonomy
//!
//! Only programming errors surface here. Calls made in the wrong phase are
//! silently ignored by the session and never produce a `GameError`.

use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GameError {
    /// A value outside its enumerated domain (lane index, symbol name, letter, ...)
    InvalidArgument { what: &'static str, value: String },
    /// Settings could not be read or parsed
    Config(String),
}

impl GameError {
    pub fn invalid(what: &'static str, value: impl fmt::Display) -> Self {
        GameError::InvalidArgument {
            what,
            value: value.to_string(),
        }
    }
}

impl fmt::Display for GameError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GameError::InvalidArgument { what, value } => {
                write!(f, "invalid {}: {:?}", what, value)
            }
            GameError::Config(msg) => write!(f, "config error: {}", msg),
        }
    }
}

impl std::error::Error for GameError {}

impl From<serde_json::Error> for GameError {
    fn from(e: serde_json::Error) -> Self {
        GameError::Config(e.to_string())
    }
}
