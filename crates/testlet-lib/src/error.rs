use std::path::PathBuf;
use thiserror::Error;

use crate::value::Kind;

#[derive(Error, Debug)]
pub enum HarnessError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("Config file not found: {0}")]
    ConfigNotFound(PathBuf),

    #[error("Invalid config: {0}")]
    InvalidConfig(String),

    #[error("Invalid {kind} value: {input:?}")]
    InvalidValue { kind: Kind, input: String },
}

pub type Result<T> = std::result::Result<T, HarnessError>;
