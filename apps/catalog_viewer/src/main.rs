use std::{
    io::{self, IsTerminal},
    path::PathBuf,
    sync::Arc,
    time::Duration,
};

use anyhow::{bail, Context, Result};
use catalog_client::RemoteCatalogClient;
use catalog_ui::{HttpImageLoader, RowLayout, ScreenController, ScreenState};
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

mod config;
mod console;

use config::{load_settings, DEFAULT_CONFIG_FILE};
use console::ConsoleListView;

#[derive(Parser, Debug)]
struct Args {
    #[arg(long, default_value = DEFAULT_CONFIG_FILE)]
    config: PathBuf,
    #[arg(long)]
    base_url: Option<String>,
    #[arg(long)]
    locale: Option<String>,
    /// Seconds to wait for the catalog and then for row images.
    #[arg(long, default_value_t = 30)]
    wait_secs: u64,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(io::stderr)
        .init();

    let args = Args::parse();
    let mut settings = load_settings(&args.config)?;
    if let Some(base_url) = args.base_url {
        settings.base_url = base_url;
    }
    if let Some(locale) = args.locale {
        settings.locale = locale;
    }
    let wait = Duration::from_secs(args.wait_secs);

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .context("failed to build async runtime")?;

    let layout = RowLayout::default();
    let (image_width, image_height) =
        layout.image_box_px(settings.screen_width_px, settings.density);
    let endpoint = settings.endpoint();
    let url = endpoint.request_url()?;
    info!(%url, "loading catalog");

    let source = Arc::new(RemoteCatalogClient::new(endpoint));
    let loader = Arc::new(
        HttpImageLoader::new(runtime.handle().clone()).with_target_box(image_width, image_height),
    );
    let view = ConsoleListView::new(io::stdout(), layout).with_ansi(io::stdout().is_terminal());
    let mut screen = ScreenController::new(view, source, loader, runtime.handle().clone());

    screen.start();
    match screen.pump_until_settled(wait).clone() {
        ScreenState::Loaded { row_count } => {
            info!(row_count, "catalog shown");
            screen.view_mut().report_images(wait)?;
            Ok(())
        }
        ScreenState::Failed { reason, .. } => bail!("catalog unavailable: {reason}"),
        other => bail!("catalog not loaded after {wait:?} (state: {other:?})"),
    }
}
