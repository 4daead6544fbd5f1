use anyhow::Result;
use clap::Parser;
use pizza_placeholders::hooks::{self, ImageAttributes, InMemoryPipeline};
use pizza_placeholders::models::{AttachmentId, ImageSize, PlaceholderConfig};
use pizza_placeholders::registry::InMemorySizeRegistry;
use pizza_placeholders::service::PlaceholderImageService;
use std::sync::Arc;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Debug, Parser)]
#[command(name = "pizza-placeholders")]
#[command(about = "Preview placeholder substitution against an in-memory host")]
struct CliArgs {
    /// Requested size: a registered name (thumbnail, medium, large, full,
    /// hero) or explicit WIDTHxHEIGHT pixels.
    #[arg(value_name = "SIZE", default_value = "large", value_parser = parse_size_arg)]
    size: ImageSize,

    /// Attachment ID to seed the cache-busting hash with.
    #[arg(long, value_name = "ID")]
    attachment: Option<u64>,
}

fn parse_size_arg(input: &str) -> std::result::Result<ImageSize, String> {
    if let Some((w, h)) = input.split_once('x') {
        if let (Ok(width), Ok(height)) = (w.parse::<u32>(), h.parse::<u32>()) {
            if width == 0 || height == 0 {
                return Err(format!("Invalid size '{}'. Dimensions must be positive", input));
            }
            return Ok(ImageSize::explicit(width, height));
        }
    }
    if input.is_empty() {
        return Err("Size must be a name or WIDTHxHEIGHT".to_string());
    }
    Ok(ImageSize::named(input))
}

fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "pizza_placeholders=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let args = CliArgs::parse();

    let config = match PlaceholderConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            error!("Failed to load configuration: {}", e);
            std::process::exit(1);
        }
    };
    info!(host = %config.host, "Starting placeholder preview");

    // A stand-in for the real host: stock sizes plus one custom theme size.
    let registry = InMemorySizeRegistry::with_host_defaults()
        .with_additional_size("hero", 1600, 600);
    let service = Arc::new(PlaceholderImageService::new(config, Arc::new(registry)));

    let mut pipeline = InMemoryPipeline::new();
    if !hooks::install(service, &mut pipeline) {
        error!("Placeholder filters were not installed");
        std::process::exit(1);
    }

    let attachment = args.attachment.map(AttachmentId);

    println!(
        "has featured image: {}",
        pipeline.apply_has_featured_image(false, 1)
    );

    let html = pipeline.apply_featured_image_html(
        String::new(),
        1,
        None,
        &args.size,
        &ImageAttributes::new(),
    );
    if html.is_empty() {
        println!("featured image markup: (size unresolvable, nothing emitted)");
    } else {
        println!("featured image markup: {}", html);
    }

    match pipeline.apply_attachment_image_source(None, attachment, &args.size, false) {
        Some(descriptor) => println!(
            "attachment source: {}",
            serde_json::to_string_pretty(&descriptor)?
        ),
        None => println!("attachment source: none (host renders its own fallback)"),
    }

    Ok(())
}
