//! Placeholder substitution service
//!
//! The whole core lives here: always report that a featured image exists,
//! resolve whatever size the caller asked for against the host's size tables,
//! and hand back an img.pizza URL carrying those dimensions plus a
//! cache-busting hash. Every operation is synchronous and performs no I/O;
//! the actual image fetch happens later in a browser.

use crate::models::{AttachmentId, Dimensions, ImageDescriptor, ImageSize, PlaceholderConfig};
use crate::registry::SizeRegistry;
use sha2::{Digest, Sha256};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tracing::debug;

/// Size names whose dimensions live in host-wide numeric options rather than
/// the additional-size table.
const BUILTIN_SIZE_NAMES: [&str; 3] = ["thumbnail", "medium", "large"];

pub struct PlaceholderImageService {
    registry: Arc<dyn SizeRegistry>,
    host: String,
    installed: AtomicBool,
}

impl PlaceholderImageService {
    pub fn new(config: PlaceholderConfig, registry: Arc<dyn SizeRegistry>) -> Self {
        Self {
            registry,
            host: config.host,
            installed: AtomicBool::new(false),
        }
    }

    /// Flip the install guard. Returns `true` on the first call only, so hook
    /// registration happens at most once per service instance.
    pub(crate) fn try_mark_installed(&self) -> bool {
        !self.installed.swap(true, Ordering::Relaxed)
    }

    /// The featured-image-presence override. Downstream rendering code skips
    /// posts without a thumbnail, so during development every post claims one.
    pub fn has_featured_image(&self) -> bool {
        true
    }

    /// Replacement markup for a rendered featured image. All the host hands us
    /// besides `size` is irrelevant: the placeholder carries no attachment
    /// context, so each render gets a fresh hash. Returns an empty string when
    /// no dimensions are resolvable, which the host treats the same as a post
    /// with no thumbnail.
    pub fn render_featured_image_html(&self, size: &ImageSize) -> String {
        let dimensions = match size {
            ImageSize::Named(name) => self.resolve_named_size(name),
            ImageSize::Explicit { width, height } => Some(Dimensions::new(*width, *height)),
        };

        match dimensions {
            Some(dims) => {
                let url = self.placeholder_url(dims.width, dims.height, None);
                debug!(size = ?size, url = %url, "substituted featured image");
                format!(
                    "<img src=\"{}\" width=\"{}\" height=\"{}\" alt=\"\" />",
                    url, dims.width, dims.height
                )
            }
            None => {
                debug!(size = ?size, "featured image size unresolvable, emitting nothing");
                String::new()
            }
        }
    }

    /// Replacement for the attachment-source resolution point. `None` is the
    /// "no image available" sentinel the pipeline expects; it is the only
    /// failure mode and is never logged as an error.
    pub fn resolve_attachment_image_source(
        &self,
        existing: Option<&ImageDescriptor>,
        attachment: Option<AttachmentId>,
        size: &ImageSize,
        _is_icon: bool,
    ) -> Option<ImageDescriptor> {
        if let Some(existing) = existing {
            let url = self.placeholder_url(existing.width, existing.height, attachment);
            debug!(attachment = ?attachment, url = %url, "replaced existing image source");
            return Some(ImageDescriptor { url, ..existing.clone() });
        }

        let dims = match size {
            ImageSize::Named(name) => self.resolve_named_size(name)?,
            ImageSize::Explicit { width, height } => Dimensions::new(*width, *height),
        };

        let url = self.placeholder_url(dims.width, dims.height, attachment);
        debug!(attachment = ?attachment, url = %url, "built placeholder image source");
        Some(ImageDescriptor::new(url, dims.width, dims.height, true))
    }

    /// Resolve a registered size name to dimensions. `"full"` aliases
    /// `"large"`; builtin names read the `{name}_size_w`/`{name}_size_h`
    /// options, anything else hits the additional-size table. No match, or a
    /// registered name with missing or zero dimensions, yields `None`.
    pub fn resolve_named_size(&self, name: &str) -> Option<Dimensions> {
        let name = if name == "full" { "large" } else { name };

        for registered in self.registry.intermediate_size_names() {
            if registered != name {
                continue;
            }

            let dims = if BUILTIN_SIZE_NAMES.contains(&registered.as_str()) {
                let width = self.registry.option_u32(&format!("{}_size_w", registered))?;
                let height = self.registry.option_u32(&format!("{}_size_h", registered))?;
                Dimensions::new(width, height)
            } else {
                self.registry.additional_size(&registered)?
            };

            if dims.width == 0 || dims.height == 0 {
                return None;
            }
            return Some(dims);
        }

        None
    }

    /// Format the placeholder URL. The exact shape is the img.pizza contract:
    /// `https://{host}/{width}/{height}?{hash}`.
    pub fn placeholder_url(
        &self,
        width: u32,
        height: u32,
        attachment: Option<AttachmentId>,
    ) -> String {
        format!(
            "https://{}/{}/{}?{}",
            self.host,
            width,
            height,
            self.derive_hash(attachment)
        )
    }

    /// Cache-busting digest. Seeded by the attachment so the same attachment
    /// keeps the same placeholder across renders; with no attachment each call
    /// hashes a fresh random value instead.
    pub fn derive_hash(&self, attachment: Option<AttachmentId>) -> String {
        let digest = match attachment {
            Some(id) => Sha256::digest(format!("attachment:{}", id).as_bytes()),
            None => Sha256::digest(rand::random::<u64>().to_le_bytes()),
        };
        hex::encode(digest)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::InMemorySizeRegistry;
    use pretty_assertions::assert_eq;

    fn service() -> PlaceholderImageService {
        let registry = InMemorySizeRegistry::with_host_defaults()
            .with_additional_size("hero", 1600, 600)
            .with_orphan_name("broken");
        PlaceholderImageService::new(PlaceholderConfig::default(), Arc::new(registry))
    }

    fn expected_hash(seed: &str) -> String {
        hex::encode(Sha256::digest(seed.as_bytes()))
    }

    #[test]
    fn test_derive_hash_is_deterministic_per_attachment() {
        let service = service();
        let first = service.derive_hash(Some(AttachmentId(42)));
        let second = service.derive_hash(Some(AttachmentId(42)));

        assert_eq!(first, second);
        assert_eq!(first, expected_hash("attachment:42"));
    }

    #[test]
    fn test_derive_hash_without_attachment_varies() {
        let service = service();
        assert_ne!(service.derive_hash(None), service.derive_hash(None));
    }

    #[test]
    fn test_hash_is_lowercase_hex() {
        let service = service();
        let hash = service.derive_hash(Some(AttachmentId(7)));

        assert_eq!(hash.len(), 64);
        assert!(hash.chars().all(|c| c.is_ascii_hexdigit() && !c.is_ascii_uppercase()));
    }

    #[test]
    fn test_placeholder_url_format() {
        let service = service();
        let url = service.placeholder_url(300, 200, Some(AttachmentId(42)));

        assert_eq!(
            url,
            format!("https://img.pizza/300/200?{}", expected_hash("attachment:42"))
        );
    }

    #[test]
    fn test_placeholder_url_respects_configured_host() {
        let config = PlaceholderConfig::new("placeholder.test").unwrap();
        let service = PlaceholderImageService::new(
            config,
            Arc::new(InMemorySizeRegistry::with_host_defaults()),
        );

        let url = service.placeholder_url(10, 20, None);
        assert!(url.starts_with("https://placeholder.test/10/20?"));
    }

    #[test]
    fn test_full_aliases_large() {
        let service = service();
        assert_eq!(
            service.resolve_named_size("full"),
            service.resolve_named_size("large")
        );
        assert_eq!(
            service.resolve_named_size("full"),
            Some(Dimensions::new(1024, 1024))
        );
    }

    #[test]
    fn test_resolve_named_size_builtin_and_additional() {
        let service = service();
        assert_eq!(
            service.resolve_named_size("thumbnail"),
            Some(Dimensions::new(150, 150))
        );
        assert_eq!(
            service.resolve_named_size("hero"),
            Some(Dimensions::new(1600, 600))
        );
    }

    #[test]
    fn test_resolve_named_size_unregistered() {
        let service = service();
        assert_eq!(service.resolve_named_size("nonexistent_size_name"), None);
    }

    #[test]
    fn test_resolve_named_size_registered_without_dimensions() {
        let service = service();
        assert_eq!(service.resolve_named_size("broken"), None);
    }

    #[test]
    fn test_resolve_source_preserves_existing_dimensions() {
        let service = service();
        let existing = ImageDescriptor::new("https://cdn.example.com/real.jpg".into(), 300, 200, false);

        let result = service
            .resolve_attachment_image_source(
                Some(&existing),
                Some(AttachmentId(42)),
                &ImageSize::named("large"),
                false,
            )
            .unwrap();

        assert_eq!(result.width, 300);
        assert_eq!(result.height, 200);
        assert!(!result.is_intermediate);
        assert_eq!(
            result.url,
            format!("https://img.pizza/300/200?{}", expected_hash("attachment:42"))
        );
    }

    #[test]
    fn test_resolve_source_explicit_pair() {
        let service = service();

        let result = service
            .resolve_attachment_image_source(None, None, &ImageSize::explicit(150, 150), false)
            .unwrap();

        assert_eq!(result.width, 150);
        assert_eq!(result.height, 150);
        assert!(result.is_intermediate);
        assert!(result.url.starts_with("https://img.pizza/150/150?"));
    }

    #[test]
    fn test_resolve_source_unknown_name_is_none() {
        let service = service();

        let result = service.resolve_attachment_image_source(
            None,
            Some(AttachmentId(1)),
            &ImageSize::named("nonexistent_size_name"),
            false,
        );

        assert_eq!(result, None);
    }

    #[test]
    fn test_render_featured_image_html() {
        let service = service();
        let html = service.render_featured_image_html(&ImageSize::named("thumbnail"));

        assert!(html.starts_with("<img src=\"https://img.pizza/150/150?"));
        assert!(html.contains("width=\"150\""));
        assert!(html.contains("height=\"150\""));
        assert!(html.ends_with("alt=\"\" />"));
    }

    #[test]
    fn test_render_featured_image_html_unresolvable_emits_nothing() {
        let service = service();
        assert_eq!(
            service.render_featured_image_html(&ImageSize::named("nonexistent_size_name")),
            ""
        );
    }

    #[test]
    fn test_has_featured_image_always_true() {
        assert!(service().has_featured_image());
    }

    #[test]
    fn test_install_guard_flips_once() {
        let service = service();
        assert!(service.try_mark_installed());
        assert!(!service.try_mark_installed());
    }
}
