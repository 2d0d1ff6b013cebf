use crate::error::DashboardResult;
use crate::render::{ChartFrame, ChartSurface, MapFrame, MapSetup, MapSurface};

/// Headless map surface used by tests and hosts without a drawing backend.
///
/// It validates what it receives and remembers the last scene so callers can
/// inspect it.
#[derive(Debug, Default)]
pub struct NullMapSurface {
    pub setup: Option<MapSetup>,
    pub last_frame: Option<MapFrame>,
    pub render_count: usize,
    pub size_invalidations: usize,
}

impl NullMapSurface {
    #[must_use]
    pub fn marker_count(&self) -> usize {
        self.last_frame.as_ref().map_or(0, |frame| frame.markers.len())
    }
}

impl MapSurface for NullMapSurface {
    fn mount(&mut self, setup: &MapSetup) -> DashboardResult<()> {
        setup.validate()?;
        self.setup = Some(setup.clone());
        Ok(())
    }

    fn render(&mut self, frame: &MapFrame) -> DashboardResult<()> {
        frame.validate()?;
        self.last_frame = Some(frame.clone());
        self.render_count += 1;
        Ok(())
    }

    fn invalidate_size(&mut self) {
        self.size_invalidations += 1;
    }
}

/// Headless chart surface; keeps the last drawn frame.
#[derive(Debug, Default)]
pub struct NullChartSurface {
    pub last_frame: Option<ChartFrame>,
    pub draw_count: usize,
}

impl ChartSurface for NullChartSurface {
    fn draw(&mut self, frame: &ChartFrame) -> DashboardResult<()> {
        frame.validate()?;
        self.last_frame = Some(frame.clone());
        self.draw_count += 1;
        Ok(())
    }
}
