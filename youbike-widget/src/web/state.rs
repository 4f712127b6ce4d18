//! Application state for the web layer.

use std::sync::Arc;

use crate::domain::Language;
use crate::feed::ConfiguredFeed;
use crate::location::ConfiguredLocation;
use crate::refresh::Refresher;
use crate::store::JsonFileStore;

/// The refresher as wired up by the binary.
pub type WidgetRefresher = Refresher<ConfiguredFeed, ConfiguredLocation, JsonFileStore>;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    /// Refresh cycle, also the way in to the feed and the snapshot store
    pub refresher: Arc<WidgetRefresher>,

    /// Which station names to render
    pub language: Language,
}

impl AppState {
    pub fn new(refresher: Arc<WidgetRefresher>, language: Language) -> Self {
        Self {
            refresher,
            language,
        }
    }
}
