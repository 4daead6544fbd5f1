//! Data models and structures
//!
//! Defines the transient value types flowing through the image filter points
//! and the crate configuration. Nothing here is persisted: every value is
//! constructed, used, and discarded within one pipeline invocation.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Media library identifier, opaque to this crate. It is only ever used as a
/// hash seed for cache-busting; the attachment content is never dereferenced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AttachmentId(pub u64);

impl fmt::Display for AttachmentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// A registered size-table entry. Dimensions are always positive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dimensions {
    pub width: u32,
    pub height: u32,
}

impl Dimensions {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }
}

/// The size a caller requested: either a name registered with the host
/// ("thumbnail", "large", ...) or an explicit pixel pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ImageSize {
    Named(String),
    Explicit { width: u32, height: u32 },
}

impl ImageSize {
    pub fn named(name: impl Into<String>) -> Self {
        Self::Named(name.into())
    }

    pub fn explicit(width: u32, height: u32) -> Self {
        Self::Explicit { width, height }
    }
}

/// Resolved image source handed back to the rendering pipeline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageDescriptor {
    pub url: String,
    pub width: u32,
    pub height: u32,
    pub is_intermediate: bool,
}

impl ImageDescriptor {
    pub fn new(url: String, width: u32, height: u32, is_intermediate: bool) -> Self {
        Self {
            url,
            width,
            height,
            is_intermediate,
        }
    }
}

/// Crate configuration. The hostname is the only knob: everything else about
/// the placeholder URL format is fixed by the img.pizza contract.
#[derive(Debug, Clone)]
pub struct PlaceholderConfig {
    pub host: String,
}

pub const DEFAULT_PLACEHOLDER_HOST: &str = "img.pizza";

impl Default for PlaceholderConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_PLACEHOLDER_HOST.to_string(),
        }
    }
}

impl PlaceholderConfig {
    pub fn new(host: impl Into<String>) -> crate::Result<Self> {
        let host = host.into();
        if host.is_empty() {
            return Err(crate::Error::Config(
                "placeholder host must not be empty".to_string(),
            ));
        }
        if host.contains('/') || host.contains("://") {
            return Err(crate::Error::Config(format!(
                "placeholder host '{}' must be a bare hostname",
                host
            )));
        }
        Ok(Self { host })
    }

    pub fn from_env() -> crate::Result<Self> {
        if let Err(e) = dotenvy::dotenv() {
            // A missing .env file is fine; a malformed one is not.
            if !e.not_found() {
                return Err(e.into());
            }
        }

        match std::env::var("PLACEHOLDER_HOST") {
            Ok(host) => Self::new(host),
            Err(_) => Ok(Self::default()),
        }
    }
}
