use serde_json::Value;
use thiserror::Error;

/// Failure of a single native call, as seen by the caller of the bridge.
///
/// `Rejected` carries whatever the native layer reported, untouched. The other
/// variants are the only errors the bridge produces on its own.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum NativeCallError {
    #[error("native call rejected: {0}")]
    Rejected(Value),

    #[error("no native handler registered for '{target}'")]
    HandlerUnavailable { target: String },

    #[error("native handler '{target}' does not support action '{action}'")]
    InvalidAction { target: String, action: String },

    #[error("native handler '{target}' dropped the callback for '{action}' without answering")]
    CallbackDropped { target: String, action: String },
}

impl NativeCallError {
    /// The payload the native layer rejected with, if it was a native rejection.
    pub fn payload(&self) -> Option<&Value> {
        match self {
            NativeCallError::Rejected(payload) => Some(payload),
            _ => None,
        }
    }
}

/// Errors raised by a sound backend inside the native plugin.
#[derive(Error, Debug)]
pub enum AudioError {
    #[error("Failed to load audio file: {path}")]
    LoadFailed {
        path: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    #[error("Failed to decode audio format")]
    DecodeFailed(#[source] Box<dyn std::error::Error + Send + Sync>),

    #[error("Failed to initialize audio output stream")]
    StreamInitFailed(#[source] Box<dyn std::error::Error + Send + Sync>),

    #[error("Audio playback failed")]
    PlaybackFailed(#[source] Box<dyn std::error::Error + Send + Sync>),

    #[error("Failed to start native sound worker")]
    WorkerSpawnFailed(#[source] std::io::Error),

    #[error("Native sound worker stopped during startup")]
    WorkerStopped,
}

impl AudioError {
    /// This error and its sources joined with `": "`, for native result messages
    pub fn describe(&self) -> String {
        let mut message = self.to_string();
        let mut source = std::error::Error::source(self);
        while let Some(err) = source {
            message.push_str(": ");
            message.push_str(&err.to_string());
            source = std::error::Error::source(err);
        }
        message
    }
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to load configuration from {path}")]
    LoadFailed {
        path: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    #[error("Failed to save configuration to {path}")]
    SaveFailed {
        path: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    #[error("Invalid configuration: {0}")]
    Invalid(String),

    #[error("Failed to create config directory: {path}")]
    DirectoryCreationFailed {
        path: String,
        #[source]
        source: std::io::Error,
    },
}
