//! Device location providers.
//!
//! An unavailable location is not a failure: the refresh carries on with
//! favorites only.

use std::future::Future;

use crate::domain::Coordinates;

/// Why a location read failed.
#[derive(Debug, Clone, thiserror::Error)]
pub enum LocationError {
    /// The provider is not allowed to report a position
    #[error("location permission denied")]
    PermissionDenied,
}

/// Source of the device's current position.
pub trait LocationProvider {
    /// `Ok(None)` means "no fix available", which callers treat the same as
    /// an error: rank without a location.
    fn current_location(
        &self,
    ) -> impl Future<Output = Result<Option<Coordinates>, LocationError>> + Send;
}

/// Always reports the same configured position.
#[derive(Debug, Clone, Copy)]
pub struct FixedLocation(pub Coordinates);

impl LocationProvider for FixedLocation {
    async fn current_location(&self) -> Result<Option<Coordinates>, LocationError> {
        Ok(Some(self.0))
    }
}

/// Never has a position.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoLocation;

impl LocationProvider for NoLocation {
    async fn current_location(&self) -> Result<Option<Coordinates>, LocationError> {
        Ok(None)
    }
}

/// Either of the above, chosen at startup from configuration.
#[derive(Debug, Clone, Copy)]
pub enum ConfiguredLocation {
    Fixed(FixedLocation),
    None(NoLocation),
}

impl From<Option<Coordinates>> for ConfiguredLocation {
    fn from(location: Option<Coordinates>) -> Self {
        match location {
            Some(c) => ConfiguredLocation::Fixed(FixedLocation(c)),
            None => ConfiguredLocation::None(NoLocation),
        }
    }
}

impl LocationProvider for ConfiguredLocation {
    async fn current_location(&self) -> Result<Option<Coordinates>, LocationError> {
        match self {
            ConfiguredLocation::Fixed(p) => p.current_location().await,
            ConfiguredLocation::None(p) => p.current_location().await,
        }
    }
}
