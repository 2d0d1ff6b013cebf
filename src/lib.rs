//! opsboard: headless core of a live operations dashboard.
//!
//! The crate lays out geo markers so coincident points stay distinguishable,
//! resolves chart series with graceful fallbacks, and keeps list views fresh
//! from bus notifications without overlapping reloads. Drawing, transport and
//! data access are injected through traits.

pub mod api;
pub mod core;
pub mod error;
pub mod live;
pub mod render;
pub mod telemetry;

pub use api::{Dashboard, MapCard, MapCardConfig};
pub use crate::core::{GeoLayout, GeoPoint, PlacedMarker, place};
pub use error::{DashboardError, DashboardResult};
pub use live::{LiveInvalidationCoordinator, LiveRefreshConfig};
