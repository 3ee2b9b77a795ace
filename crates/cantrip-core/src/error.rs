use thiserror::Error;

pub const ERROR_TAG: &str = "\x1b[31m[ERROR]\x1b[0m";
pub const WARN_TAG: &str = "\x1b[33m[WARN]\x1b[0m";

/// Error kinds surfaced by the console subsystem.
///
/// `Exit` is not a failure: it is the session-end signal raised by the
/// `.exit`/`.quit` commands and consumed by the loop, never printed.
#[derive(Error, Debug)]
pub enum CantripError {
    #[error("{0}")]
    Config(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("{0}")]
    Validation(String),

    #[error("{0}")]
    Script(String),

    #[error("exit requested")]
    Exit,
}

impl CantripError {
    pub fn config(message: impl Into<String>) -> Self {
        CantripError::Config(message.into())
    }

    pub fn validation(message: impl Into<String>) -> Self {
        CantripError::Validation(message.into())
    }

    pub fn script(message: impl Into<String>) -> Self {
        CantripError::Script(message.into())
    }

    pub fn is_exit(&self) -> bool {
        matches!(self, CantripError::Exit)
    }
}
