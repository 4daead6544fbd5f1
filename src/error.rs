//! Error handling and custom error types
//!
//! Provides unified error handling across the crate using thiserror. The
//! filter callbacks themselves never fail: an unresolvable size degrades to a
//! "no image" `None`, so only configuration loading can produce an error.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Environment variable error: {0}")]
    EnvVar(#[from] dotenvy::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
