use tracing::{debug, trace};

use crate::core::{GeoLayout, GeoPoint, ViewportFitPolicy, fit_viewport, place};
use crate::error::DashboardResult;
use crate::render::{MapFrame, MapSetup, MapSurface};

use super::MapCardConfig;

/// Map widget with explicit lifecycle: `initialize`, `on_input`, `dispose`.
///
/// Every render recomputes the layout from scratch and replaces all markers.
#[derive(Debug)]
pub struct MapCard<S: MapSurface> {
    title: String,
    points: Vec<GeoPoint>,
    config: MapCardConfig,
    surface: Option<S>,
    layout: GeoLayout,
}

impl<S: MapSurface> MapCard<S> {
    pub fn new(
        title: impl Into<String>,
        points: Vec<GeoPoint>,
        config: MapCardConfig,
    ) -> DashboardResult<Self> {
        config.validate()?;
        Ok(Self {
            title: title.into(),
            points,
            config,
            surface: None,
            layout: GeoLayout::default(),
        })
    }

    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    #[must_use]
    pub fn points(&self) -> &[GeoPoint] {
        &self.points
    }

    /// Layout produced by the most recent render.
    #[must_use]
    pub fn layout(&self) -> &GeoLayout {
        &self.layout
    }

    #[must_use]
    pub fn surface(&self) -> Option<&S> {
        self.surface.as_ref()
    }

    #[must_use]
    pub fn is_mounted(&self) -> bool {
        self.surface.is_some()
    }

    /// Initial view: the first valid point, or the configured world view.
    #[must_use]
    pub fn setup(&self) -> MapSetup {
        let (center, zoom) = match self.points.iter().find(|point| point.is_valid()) {
            Some(first) => (first.position(), self.config.first_point_zoom),
            None => (self.config.default_center, self.config.default_zoom),
        };
        MapSetup {
            center,
            zoom,
            tile_layer: self.config.tile_layer.clone(),
            zoom_control: self.config.zoom_control,
            scroll_wheel_zoom: self.config.scroll_wheel_zoom,
            prefer_canvas: self.config.prefer_canvas,
        }
    }

    /// Mounts on `surface` and draws the current points.
    ///
    /// A missing surface is not an error: nothing is drawn and `Ok(false)` is
    /// returned so the host can retry on its next lifecycle opportunity.
    pub fn initialize(&mut self, surface: Option<S>) -> DashboardResult<bool> {
        let Some(mut surface) = surface else {
            debug!(title = %self.title, "map surface unavailable, skipping mount");
            return Ok(false);
        };

        surface.mount(&self.setup())?;
        self.layout = draw_markers(&mut surface, &self.points, self.config.fit)?;
        surface.invalidate_size();
        self.surface = Some(surface);
        Ok(true)
    }

    /// Replaces the points; redraws when mounted. Returns whether a draw happened.
    pub fn on_input(&mut self, points: Vec<GeoPoint>) -> DashboardResult<bool> {
        self.points = points;
        let Some(surface) = self.surface.as_mut() else {
            return Ok(false);
        };
        self.layout = draw_markers(surface, &self.points, self.config.fit)?;
        Ok(true)
    }

    /// Releases the surface. Idempotent; later inputs are stored but not drawn.
    pub fn dispose(&mut self) -> Option<S> {
        self.surface.take()
    }
}

fn draw_markers<S: MapSurface>(
    surface: &mut S,
    points: &[GeoPoint],
    fit: ViewportFitPolicy,
) -> DashboardResult<GeoLayout> {
    let layout = place(points);
    let frame = MapFrame {
        markers: layout.markers.clone(),
        viewport: fit_viewport(&layout.bounds, fit),
    };
    trace!(
        markers = frame.markers.len(),
        dropped = points.len() - frame.markers.len(),
        stacked = layout.stacked_cluster_count(),
        "rendering map markers"
    );
    surface.render(&frame)?;
    Ok(layout)
}
