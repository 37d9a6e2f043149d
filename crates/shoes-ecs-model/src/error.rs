use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("must set {key}")]
    MissingConfiguration { key: &'static str },
}

impl ConfigError {
    /// Name of the configuration key that caused the error.
    pub fn key(&self) -> &'static str {
        match self {
            ConfigError::MissingConfiguration { key } => key,
        }
    }
}

pub type ConfigResult<T> = Result<T, ConfigError>;
