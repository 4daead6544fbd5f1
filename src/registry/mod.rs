//! Read-only view of the host's registered image sizes
//!
//! The host owns the size tables (builtin size options, additionally
//! registered custom sizes); this crate only queries them. The trait is
//! injected into [`crate::service::PlaceholderImageService`] so the service
//! stays independent of any ambient global state and is testable in isolation.

pub mod memory;

pub use memory::InMemorySizeRegistry;

use crate::models::Dimensions;

pub trait SizeRegistry: Send + Sync {
    /// Names of all registered intermediate sizes, builtin and custom.
    fn intermediate_size_names(&self) -> Vec<String>;

    /// Dimensions for an additionally-registered custom size.
    fn additional_size(&self, name: &str) -> Option<Dimensions>;

    /// A host-wide numeric option, e.g. `thumbnail_size_w`.
    fn option_u32(&self, name: &str) -> Option<u32>;
}
