use tracing::debug;

use crate::core::{ChartProps, ChartSeries};
use crate::error::DashboardResult;
use crate::render::{ChartFrame, ChartSurface};

/// Chart widget with explicit lifecycle: `initialize`, `on_input`, `dispose`.
#[derive(Debug)]
pub struct ChartCard<S: ChartSurface> {
    props: ChartProps,
    surface: Option<S>,
}

impl<S: ChartSurface> ChartCard<S> {
    #[must_use]
    pub fn new(props: ChartProps) -> Self {
        Self {
            props,
            surface: None,
        }
    }

    #[must_use]
    pub fn props(&self) -> &ChartProps {
        &self.props
    }

    #[must_use]
    pub fn surface(&self) -> Option<&S> {
        self.surface.as_ref()
    }

    #[must_use]
    pub fn is_mounted(&self) -> bool {
        self.surface.is_some()
    }

    #[must_use]
    pub fn frame(&self) -> ChartFrame {
        ChartFrame::new(
            self.props.kind.clone(),
            self.props.title.clone(),
            ChartSeries::from_props(&self.props),
        )
    }

    /// Draws on `surface`; a missing surface is a no-op returning `Ok(false)`.
    pub fn initialize(&mut self, surface: Option<S>) -> DashboardResult<bool> {
        let Some(mut surface) = surface else {
            debug!(title = %self.props.title, "chart surface unavailable, skipping draw");
            return Ok(false);
        };
        surface.draw(&self.frame())?;
        self.surface = Some(surface);
        Ok(true)
    }

    /// Replaces the props; redraws when mounted.
    pub fn on_input(&mut self, props: ChartProps) -> DashboardResult<bool> {
        self.props = props;
        let frame = self.frame();
        match self.surface.as_mut() {
            Some(surface) => {
                surface.draw(&frame)?;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    /// Releases the surface. Idempotent.
    pub fn dispose(&mut self) -> Option<S> {
        self.surface.take()
    }
}
