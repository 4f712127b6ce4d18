//! Domain types for the station widget.
//!
//! Validated data only: coordinates are range-checked at construction and
//! distances are either known or explicitly absent.

mod coordinates;
mod ranked;
mod snapshot;
mod station;

pub use coordinates::{Coordinates, InvalidCoordinates};
pub use ranked::{Placement, RankedStation};
pub use snapshot::WidgetSnapshot;
pub use station::{ACTIVE_STATUS, Language, Station, StationId};
