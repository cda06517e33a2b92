use anyhow::{Context, Result};
use chrono::Local;
use clap::Parser;
use std::path::PathBuf;

use feedwall::feed::{EmptyFallback, FeedLoader, FeedSource};
use feedwall::render::HtmlView;
use feedwall::{Config, Gallery, GalleryOptions};

#[derive(Parser, Debug)]
#[command(name = "feedwall", about = "Render an article feed into a filterable card gallery")]
struct Args {
    /// Config file (TOML); missing file means defaults
    #[arg(long, value_name = "FILE", default_value = "feedwall.toml")]
    config: PathBuf,

    /// Feed URL or path, overrides the config file
    #[arg(long, value_name = "SOURCE")]
    feed: Option<String>,

    /// Where to write the generated page
    #[arg(long, short, value_name = "FILE", default_value = "index.html")]
    out: PathBuf,

    /// Pre-select a filter ("all" or a category key)
    #[arg(long, value_name = "KEY")]
    filter: Option<String>,

    /// Escape feed text and neutralize unsafe links
    #[arg(long)]
    escape: bool,

    /// Open the generated page in the default browser
    #[arg(long)]
    open: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing for debug logging
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let args = Args::parse();

    let mut config = Config::load(&args.config)
        .with_context(|| format!("Failed to load config from {}", args.config.display()))?;
    if let Some(feed) = args.feed {
        config.feed = feed;
    }
    if args.escape {
        config.escape_content = true;
    }

    let source: FeedSource = config
        .feed
        .parse()
        .with_context(|| format!("Invalid feed source: {}", config.feed))?;

    let options = GalleryOptions {
        new_badge_days: config.new_badge_days,
        default_excerpt: config.default_excerpt.clone(),
        timings: config.timings(),
        ..GalleryOptions::new(Local::now().naive_local())
    };
    let view = HtmlView::with_catalog_filters(config.content_policy())
        .with_container_id(config.container_id.clone());

    let mut gallery =
        Gallery::load(&FeedLoader::new(source), &EmptyFallback, view, &options).await;

    if let Some(filter) = &args.filter {
        match gallery.view().find_button(filter) {
            Some(button) => {
                gallery.click(button, tokio::time::Instant::now());
                gallery.settle();
            }
            None => {
                tracing::warn!(filter = %filter, "No filter button with this key");
                eprintln!("Warning: unknown filter '{}', showing all articles", filter);
            }
        }
    }

    let page = gallery.view().render_page(&config.page_title);
    tokio::fs::write(&args.out, page)
        .await
        .with_context(|| format!("Failed to write {}", args.out.display()))?;
    println!(
        "Wrote {} articles to {}",
        gallery.articles().len(),
        args.out.display()
    );

    if args.open {
        open::that(&args.out)
            .with_context(|| format!("Failed to open {}", args.out.display()))?;
    }

    Ok(())
}
