//! Web layer: the widget page, a JSON snapshot API and a manual refresh.

mod dto;
mod routes;
mod state;
pub mod templates;

pub use dto::*;
pub use routes::create_router;
pub use state::{AppState, WidgetRefresher};
pub use templates::*;
