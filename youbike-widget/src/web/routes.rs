//! HTTP route handlers.

use std::path::Path;

use askama::Template;
use axum::{
    Json, Router,
    extract::{Query, State},
    http::{HeaderMap, StatusCode, header},
    response::{Html, IntoResponse, Redirect, Response},
    routing::{get, post},
};
use tower_http::services::ServeDir;
use tracing::{error, warn};

use crate::feed::{FetchError, StationSource, search_stations};
use crate::refresh::RefreshError;
use crate::store::{SnapshotStore, StoreError};

use super::dto::*;
use super::state::AppState;
use super::templates::*;

/// Create the application router.
///
/// `static_dir` is the path to the static assets directory.
pub fn create_router(state: AppState, static_dir: impl AsRef<Path>) -> Router {
    Router::new()
        .route("/", get(widget_page))
        .route("/health", get(health))
        .route("/api/snapshot", get(snapshot))
        .route("/api/stations/search", get(station_search))
        .route("/refresh", post(refresh))
        .nest_service("/static", ServeDir::new(static_dir))
        .with_state(state)
}

/// Health check endpoint.
async fn health() -> &'static str {
    "ok"
}

/// The widget, rendered from the stored snapshot.
async fn widget_page(State(state): State<AppState>) -> Result<Response, AppError> {
    let stored = state.refresher.store().load().await?;
    let template = WidgetTemplate {
        view: WidgetView::from_snapshot(stored.as_ref(), state.language),
    };
    let html = template.render().map_err(|e| AppError::Internal {
        message: format!("Template error: {e}"),
    })?;
    Ok(Html(html).into_response())
}

/// The stored snapshot as JSON.
async fn snapshot(State(state): State<AppState>) -> Result<Response, AppError> {
    match state.refresher.store().load().await? {
        Some(snapshot) => Ok(Json(snapshot).into_response()),
        None => Err(AppError::NotFound {
            message: "No snapshot yet".to_string(),
        }),
    }
}

/// Run a refresh cycle now.
///
/// Browsers are sent back to the widget, which shows any failure from the
/// stored snapshot. API clients get the new snapshot or the error.
async fn refresh(State(state): State<AppState>, headers: HeaderMap) -> Result<Response, AppError> {
    let result = state.refresher.refresh_once().await;

    if accepts_html(&headers) {
        if let Err(e) = &result {
            warn!(error = %e, "manual refresh failed");
        }
        return Ok(Redirect::to("/").into_response());
    }

    Ok(Json(result?).into_response())
}

/// Search live stations by id or name.
async fn station_search(
    State(state): State<AppState>,
    Query(req): Query<StationSearchRequest>,
) -> Result<Json<StationSearchResponse>, AppError> {
    let all = state.refresher.source().fetch_stations().await?;

    let stations = search_stations(&all, &req.q, req.effective_limit())
        .into_iter()
        .map(|s| StationSearchResult::from_station(s, state.language))
        .collect();

    Ok(Json(StationSearchResponse { stations }))
}

/// Check if request accepts HTML.
fn accepts_html(headers: &HeaderMap) -> bool {
    headers
        .get(header::ACCEPT)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|accept| accept.contains("text/html"))
}

/// Application error type.
#[derive(Debug)]
pub enum AppError {
    NotFound { message: String },
    BadGateway { message: String },
    Internal { message: String },
}

impl From<FetchError> for AppError {
    fn from(e: FetchError) -> Self {
        AppError::BadGateway {
            message: e.to_string(),
        }
    }
}

impl From<StoreError> for AppError {
    fn from(e: StoreError) -> Self {
        AppError::Internal {
            message: e.to_string(),
        }
    }
}

impl From<RefreshError> for AppError {
    fn from(e: RefreshError) -> Self {
        match e {
            RefreshError::Fetch(e) => e.into(),
            RefreshError::Store(e) => e.into(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            AppError::NotFound { message } => (StatusCode::NOT_FOUND, message),
            AppError::BadGateway { message } => (StatusCode::BAD_GATEWAY, message),
            AppError::Internal { message } => (StatusCode::INTERNAL_SERVER_ERROR, message),
        };

        if status.is_server_error() {
            error!(status = status.as_u16(), error = %message, "request failed");
        }

        (status, Json(ErrorResponse { error: message })).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::time::Duration;

    use axum::http::HeaderValue;

    use crate::domain::{Coordinates, Language, Station, StationId};
    use crate::feed::{ConfiguredFeed, FeedClient, FeedConfig, MockFeed};
    use crate::location::ConfiguredLocation;
    use crate::ranking::RankingConfig;
    use crate::refresh::Refresher;
    use crate::store::JsonFileStore;

    fn station(id: &str, latitude: f64) -> Station {
        Station {
            id: StationId::new(id),
            name_zh: format!("YouBike2.0_站{id}"),
            name_en: format!("YouBike2.0_Station {id}"),
            coordinates: Coordinates::new(latitude, 121.5).unwrap(),
            available_rent_bikes: 2,
            available_return_bikes: 8,
            active: true,
            updated_at: "2025-01-20 10:15:03".to_string(),
        }
    }

    fn state_with(feed: impl Into<ConfiguredFeed>, dir: &tempfile::TempDir) -> AppState {
        let refresher = Refresher::new(
            feed.into(),
            ConfiguredLocation::from(Some(Coordinates::new(25.0, 121.5).unwrap())),
            JsonFileStore::new(dir.path().join("snapshot.json")),
            RankingConfig::new(vec![StationId::new("fav")], 2),
        );
        AppState::new(Arc::new(refresher), Language::English)
    }

    fn html_headers() -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(header::ACCEPT, HeaderValue::from_static("text/html"));
        headers
    }

    #[test]
    fn detects_html_clients() {
        assert!(accepts_html(&html_headers()));
        assert!(!accepts_html(&HeaderMap::new()));
    }

    #[test]
    fn error_statuses() {
        let fetch = AppError::from(FetchError::Transport("down".into())).into_response();
        assert_eq!(fetch.status(), StatusCode::BAD_GATEWAY);

        let missing = AppError::NotFound {
            message: "nope".into(),
        }
        .into_response();
        assert_eq!(missing.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn snapshot_is_not_found_before_first_refresh() {
        let dir = tempfile::tempdir().unwrap();
        let state = state_with(MockFeed::from_stations(vec![station("fav", 25.01)]), &dir);

        let result = snapshot(State(state)).await;
        assert!(matches!(result, Err(AppError::NotFound { .. })));
    }

    #[tokio::test]
    async fn api_refresh_returns_snapshot_and_persists_it() {
        let dir = tempfile::tempdir().unwrap();
        let state = state_with(
            MockFeed::from_stations(vec![station("fav", 25.01), station("near", 25.001)]),
            &dir,
        );

        let response = refresh(State(state.clone()), HeaderMap::new()).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let stored = snapshot(State(state)).await.unwrap();
        assert_eq!(stored.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn browser_refresh_redirects_even_on_failure() {
        let dir = tempfile::tempdir().unwrap();
        // Nothing listens on the discard port
        let config = FeedConfig::new("http://127.0.0.1:9/feed.json")
            .with_timeout(2)
            .with_retry_delay(Duration::ZERO);
        let state = state_with(FeedClient::new(config).unwrap(), &dir);

        let response = refresh(State(state.clone()), html_headers()).await.unwrap();
        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(response.headers()[header::LOCATION], "/");

        let api = refresh(State(state.clone()), HeaderMap::new()).await;
        assert!(matches!(api, Err(AppError::BadGateway { .. })));

        let stored = state.refresher.store().load().await.unwrap().unwrap();
        assert!(stored.error.unwrap().starts_with("更新失敗: "));
    }

    #[tokio::test]
    async fn widget_page_renders_after_refresh() {
        let dir = tempfile::tempdir().unwrap();
        let state = state_with(MockFeed::from_stations(vec![station("fav", 25.01)]), &dir);

        let loading = widget_page(State(state.clone())).await.unwrap();
        assert_eq!(loading.status(), StatusCode::OK);

        state.refresher.refresh_once().await.unwrap();
        let page = widget_page(State(state)).await.unwrap();
        assert_eq!(page.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn search_matches_english_names() {
        let dir = tempfile::tempdir().unwrap();
        let state = state_with(
            MockFeed::from_stations(vec![station("fav", 25.01), station("other", 25.02)]),
            &dir,
        );

        let Json(response) = station_search(
            State(state),
            Query(StationSearchRequest {
                q: "station FAV".into(),
                limit: None,
            }),
        )
        .await
        .unwrap();

        assert_eq!(response.stations.len(), 1);
        assert_eq!(response.stations[0].id, "fav");
        assert_eq!(response.stations[0].name, "Station fav");
    }
}
