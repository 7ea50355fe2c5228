//! Error types for the logging facade

pub type Result<T> = std::result::Result<T, LoggerError>;

#[derive(Debug, thiserror::Error)]
pub enum LoggerError {
    /// Hook install failure
    #[error("hook '{name}' install failed: {message}")]
    HookInstall { name: String, message: String },

    /// Hook run failure (error return or panic)
    #[error("hook '{name}' run failed: {message}")]
    HookRun { name: String, message: String },

    /// Invalid configuration with details
    #[error("invalid configuration for {component}: {message}")]
    InvalidConfiguration { component: String, message: String },

    /// Console sink failure
    #[error("console write failed: {0}")]
    ConsoleWrite(String),

    /// JSON serialization error
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    /// Generic IO error
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    /// Generic error
    #[error("{0}")]
    Other(String),
}

impl LoggerError {
    /// Create a hook install error
    pub fn hook_install(name: impl Into<String>, message: impl Into<String>) -> Self {
        LoggerError::HookInstall {
            name: name.into(),
            message: message.into(),
        }
    }

    /// Create a hook run error
    pub fn hook_run(name: impl Into<String>, message: impl Into<String>) -> Self {
        LoggerError::HookRun {
            name: name.into(),
            message: message.into(),
        }
    }

    /// Create an invalid configuration error
    pub fn config(component: impl Into<String>, message: impl Into<String>) -> Self {
        LoggerError::InvalidConfiguration {
            component: component.into(),
            message: message.into(),
        }
    }

    /// Create a console write error
    pub fn console<S: Into<String>>(msg: S) -> Self {
        LoggerError::ConsoleWrite(msg.into())
    }

    /// Create a generic error
    pub fn other<S: Into<String>>(msg: S) -> Self {
        LoggerError::Other(msg.into())
    }
}
