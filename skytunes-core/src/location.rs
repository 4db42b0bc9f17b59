//! Location collaborator trait.

use crate::error::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// A geographic position.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinates {
    #[must_use]
    pub const fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }
}

impl std::fmt::Display for Coordinates {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({:.4}, {:.4})", self.latitude, self.longitude)
    }
}

/// Trait for location sources that supply the device's current position.
///
/// Implementations wrap a platform location service. A permission denial is
/// reported as [`CoreError::LocationDenied`](crate::CoreError::LocationDenied);
/// any other failure as
/// [`CoreError::LocationUnavailable`](crate::CoreError::LocationUnavailable).
/// The core treats both as terminal until the caller explicitly retries.
#[async_trait]
pub trait LocationSource: Send + Sync {
    /// Returns a human-readable name for this source.
    fn name(&self) -> &'static str;

    /// Get the current position.
    ///
    /// # Errors
    ///
    /// Returns an error when permission is denied or the position cannot be
    /// determined.
    async fn current_position(&self) -> Result<Coordinates>;
}

/// A location source pinned to fixed coordinates.
///
/// Useful for hosts without a platform location service.
#[derive(Debug, Clone, Copy)]
pub struct FixedLocation {
    coordinates: Coordinates,
}

impl FixedLocation {
    #[must_use]
    pub const fn new(coordinates: Coordinates) -> Self {
        Self { coordinates }
    }
}

#[async_trait]
impl LocationSource for FixedLocation {
    fn name(&self) -> &'static str {
        "fixed"
    }

    async fn current_position(&self) -> Result<Coordinates> {
        Ok(self.coordinates)
    }
}
