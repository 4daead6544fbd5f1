use super::{
    AttachmentImageSourceFilter, FeaturedImageHtmlFilter, HasFeaturedImageFilter, HostPipeline,
    ImageAttributes, PostId,
};
use crate::models::{AttachmentId, ImageDescriptor, ImageSize};

/// In-memory host pipeline for tests and the demo binary. Applies registered
/// filters in registration order, seeding each chain with the host-default
/// value, the way the real host's filter dispatch does.
#[derive(Default)]
pub struct InMemoryPipeline {
    admin_context: bool,
    has_featured_image: Vec<HasFeaturedImageFilter>,
    featured_image_html: Vec<FeaturedImageHtmlFilter>,
    attachment_image_source: Vec<AttachmentImageSourceFilter>,
}

impl InMemoryPipeline {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_admin_context(mut self) -> Self {
        self.admin_context = true;
        self
    }

    pub fn registered_filter_count(&self) -> usize {
        self.has_featured_image.len()
            + self.featured_image_html.len()
            + self.attachment_image_source.len()
    }

    /// Host-side dispatch: does this post have a featured image? `exists` is
    /// what the media library actually says.
    pub fn apply_has_featured_image(&self, exists: bool, post_id: PostId) -> bool {
        self.has_featured_image
            .iter()
            .fold(exists, |value, filter| filter(value, post_id))
    }

    /// Host-side dispatch: featured-image markup for a post.
    pub fn apply_featured_image_html(
        &self,
        html: String,
        post_id: PostId,
        thumbnail_id: Option<AttachmentId>,
        size: &ImageSize,
        attributes: &ImageAttributes,
    ) -> String {
        self.featured_image_html.iter().fold(html, |value, filter| {
            filter(value, post_id, thumbnail_id, size.clone(), attributes.clone())
        })
    }

    /// Host-side dispatch: resolve an attachment's image source.
    pub fn apply_attachment_image_source(
        &self,
        existing: Option<ImageDescriptor>,
        attachment: Option<AttachmentId>,
        size: &ImageSize,
        is_icon: bool,
    ) -> Option<ImageDescriptor> {
        self.attachment_image_source
            .iter()
            .fold(existing, |value, filter| {
                filter(value, attachment, size.clone(), is_icon)
            })
    }
}

impl HostPipeline for InMemoryPipeline {
    fn is_admin_context(&self) -> bool {
        self.admin_context
    }

    fn filter_has_featured_image(&mut self, filter: HasFeaturedImageFilter) {
        self.has_featured_image.push(filter);
    }

    fn filter_featured_image_html(&mut self, filter: FeaturedImageHtmlFilter) {
        self.featured_image_html.push(filter);
    }

    fn filter_attachment_image_source(&mut self, filter: AttachmentImageSourceFilter) {
        self.attachment_image_source.push(filter);
    }
}
