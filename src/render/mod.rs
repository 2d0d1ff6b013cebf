mod frame;
mod null_surface;
mod primitives;

pub use frame::{ChartFrame, MapFrame, MapSetup, TileLayer};
pub use null_surface::{NullChartSurface, NullMapSurface};
pub use primitives::{CHART_PALETTE, Color, palette_for};

use crate::error::DashboardResult;

/// Contract implemented by any map drawing backend.
///
/// Backends receive fully materialized frames so marker placement and
/// viewport decisions stay out of drawing code.
pub trait MapSurface {
    fn mount(&mut self, setup: &MapSetup) -> DashboardResult<()>;
    /// Replaces all markers with the frame's markers and applies its viewport.
    fn render(&mut self, frame: &MapFrame) -> DashboardResult<()>;
    /// Asks the backend to re-measure its container after mounting.
    fn invalidate_size(&mut self) {}
}

/// Contract implemented by any chart drawing backend.
pub trait ChartSurface {
    fn draw(&mut self, frame: &ChartFrame) -> DashboardResult<()>;
}
