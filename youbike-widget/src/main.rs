use std::sync::Arc;

use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

use youbike_widget::config::AppConfig;
use youbike_widget::feed::{ConfiguredFeed, FeedClient, FeedConfig, MockFeed};
use youbike_widget::location::ConfiguredLocation;
use youbike_widget::refresh::Refresher;
use youbike_widget::store::JsonFileStore;
use youbike_widget::web::{AppState, create_router};

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    if let Err(e) = run().await {
        error!(error = %e, "youbike-widget exited");
        std::process::exit(1);
    }
}

async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let config = AppConfig::from_env()?;

    let feed = match &config.feed_file {
        Some(path) => {
            info!(path = %path.display(), "serving stations from file");
            ConfiguredFeed::from(MockFeed::new(path)?)
        }
        None => {
            let client = FeedClient::new(FeedConfig::new(&config.api_url))?;
            info!(url = client.url(), "fetching stations from live feed");
            ConfiguredFeed::from(client)
        }
    };

    if config.device_location.is_none() {
        warn!("DEVICE_LOCATION not set, showing favorites only");
    }

    let store = JsonFileStore::new(config.snapshot_path.clone());
    info!(path = %store.path().display(), "persisting widget snapshot");

    let refresher = Arc::new(Refresher::new(
        feed,
        ConfiguredLocation::from(config.device_location),
        store,
        config.ranking.clone(),
    ));

    // Background refresh; the first cycle runs immediately
    let background = Arc::clone(&refresher);
    let interval = config.refresh_interval;
    tokio::spawn(async move {
        background.run_periodic(interval).await;
    });

    let state = AppState::new(refresher, config.language);
    let app = create_router(state, &config.static_dir);

    let listener = tokio::net::TcpListener::bind(config.bind_addr).await?;
    info!(
        addr = %config.bind_addr,
        favorites = config.ranking.favorite_ids.len(),
        max_nearest = config.ranking.max_nearest,
        refresh_minutes = interval.as_secs() / 60,
        "YouBike widget listening"
    );

    axum::serve(listener, app).await?;
    Ok(())
}
