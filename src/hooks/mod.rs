//! Host pipeline integration
//!
//! Models the three filter extension points this plugin hooks into and
//! provides [`install`], the one-time entry point the host-integration layer
//! calls at startup. Filters are boxed closures registered with the host;
//! the host invokes them synchronously inside its own rendering pipeline.

pub mod memory;

pub use memory::InMemoryPipeline;

use crate::models::{AttachmentId, ImageDescriptor, ImageSize};
use crate::service::PlaceholderImageService;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::debug;

/// Content item identifier in the host CMS.
pub type PostId = u64;

/// Extra markup attributes the host passes through the featured-image point.
pub type ImageAttributes = HashMap<String, String>;

/// "Does a featured image exist for this post" value filter.
pub type HasFeaturedImageFilter = Box<dyn Fn(bool, PostId) -> bool + Send + Sync>;

/// "Render featured-image markup" value filter.
pub type FeaturedImageHtmlFilter = Box<
    dyn Fn(String, PostId, Option<AttachmentId>, ImageSize, ImageAttributes) -> String
        + Send
        + Sync,
>;

/// "Resolve attachment image source" value filter. `None` is the definite
/// "no image available" sentinel.
pub type AttachmentImageSourceFilter = Box<
    dyn Fn(Option<ImageDescriptor>, Option<AttachmentId>, ImageSize, bool) -> Option<ImageDescriptor>
        + Send
        + Sync,
>;

/// The slice of the host's rendering pipeline this plugin touches.
pub trait HostPipeline {
    /// Whether the current request is an administrative/editing context.
    /// Placeholders must never appear in the editing UI.
    fn is_admin_context(&self) -> bool;

    fn filter_has_featured_image(&mut self, filter: HasFeaturedImageFilter);
    fn filter_featured_image_html(&mut self, filter: FeaturedImageHtmlFilter);
    fn filter_attachment_image_source(&mut self, filter: AttachmentImageSourceFilter);
}

/// Register the placeholder filters with the host. Called once at startup by
/// the host-integration layer; a repeat call, or any call in an admin
/// context, registers nothing and returns `false`.
pub fn install(service: Arc<PlaceholderImageService>, pipeline: &mut dyn HostPipeline) -> bool {
    if pipeline.is_admin_context() {
        debug!("admin context, leaving real images untouched");
        return false;
    }
    if !service.try_mark_installed() {
        debug!("placeholder filters already installed, skipping");
        return false;
    }

    pipeline.filter_has_featured_image(Box::new({
        let service = Arc::clone(&service);
        move |_exists, _post_id| service.has_featured_image()
    }));

    pipeline.filter_featured_image_html(Box::new({
        let service = Arc::clone(&service);
        move |_html, _post_id, _thumbnail_id, size, _attributes| {
            service.render_featured_image_html(&size)
        }
    }));

    pipeline.filter_attachment_image_source(Box::new(
        move |existing, attachment, size, is_icon| {
            service.resolve_attachment_image_source(existing.as_ref(), attachment, &size, is_icon)
        },
    ));

    debug!("placeholder filters installed");
    true
}
