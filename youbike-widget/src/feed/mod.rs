//! YouBike station feed.
//!
//! Fetches the city's immediate-availability feed and decodes it into
//! [`Station`]s. The fetch is retried once; there is no caching.

mod client;
mod dto;
mod error;
mod mock;
mod search;

use std::future::Future;

use crate::domain::Station;

pub use client::{DEFAULT_FEED_URL, FeedClient, FeedConfig, HttpTransport, Transport};
pub use dto::{StationDto, decode_stations};
pub use error::FetchError;
pub use mock::MockFeed;
pub use search::search_stations;

/// Anything that can produce the current station list.
///
/// This abstraction lets the refresh cycle run against the live feed or
/// canned data.
pub trait StationSource {
    fn fetch_stations(&self) -> impl Future<Output = Result<Vec<Station>, FetchError>> + Send;
}

/// The live feed or a file, chosen at startup.
#[derive(Debug, Clone)]
pub enum ConfiguredFeed {
    Live(FeedClient),
    File(MockFeed),
}

impl StationSource for ConfiguredFeed {
    async fn fetch_stations(&self) -> Result<Vec<Station>, FetchError> {
        match self {
            ConfiguredFeed::Live(client) => client.fetch_stations().await,
            ConfiguredFeed::File(feed) => feed.fetch_stations().await,
        }
    }
}

impl From<FeedClient> for ConfiguredFeed {
    fn from(client: FeedClient) -> Self {
        ConfiguredFeed::Live(client)
    }
}

impl From<MockFeed> for ConfiguredFeed {
    fn from(feed: MockFeed) -> Self {
        ConfiguredFeed::File(feed)
    }
}
