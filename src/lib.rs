//! Pizza placeholders for CMS development builds
//!
//! Intercepts the host's image-rendering filter points and substitutes
//! img.pizza placeholder URLs sized to the originally requested dimensions,
//! so design mockups have images before any real media exists.

pub mod error;
pub mod hooks;
pub mod models;
pub mod registry;
pub mod service;

pub use error::{Error, Result};
