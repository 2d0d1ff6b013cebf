use serde::{Deserialize, Serialize};

use crate::core::{ChartSeries, LatLng, PlacedMarker, ViewportFit};
use crate::error::{DashboardError, DashboardResult};
use crate::render::{Color, palette_for};

/// Base tile layer drawn under the markers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TileLayer {
    pub url_template: String,
    pub max_zoom: u8,
    pub attribution: String,
}

/// One-time map mount description.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MapSetup {
    pub center: LatLng,
    pub zoom: u8,
    pub tile_layer: TileLayer,
    pub zoom_control: bool,
    pub scroll_wheel_zoom: bool,
    pub prefer_canvas: bool,
}

impl MapSetup {
    pub fn validate(&self) -> DashboardResult<()> {
        if !self.center.is_finite() {
            return Err(DashboardError::InvalidData(
                "map center must be finite".to_owned(),
            ));
        }
        if self.tile_layer.url_template.is_empty() {
            return Err(DashboardError::InvalidData(
                "tile layer url must not be empty".to_owned(),
            ));
        }
        Ok(())
    }
}

/// Full marker scene for one map draw pass.
///
/// Surfaces clear every previously drawn marker before applying a frame.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MapFrame {
    pub markers: Vec<PlacedMarker>,
    pub viewport: ViewportFit,
}

impl MapFrame {
    pub fn validate(&self) -> DashboardResult<()> {
        if self.markers.iter().any(|marker| !marker.position().is_finite()) {
            return Err(DashboardError::InvalidData(
                "marker coordinates must be finite".to_owned(),
            ));
        }
        if let ViewportFit::Center { center, .. } = &self.viewport {
            if !center.is_finite() {
                return Err(DashboardError::InvalidData(
                    "viewport center must be finite".to_owned(),
                ));
            }
        }
        Ok(())
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.markers.is_empty()
    }
}

/// Single-dataset chart scene.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartFrame {
    pub kind: String,
    pub title: String,
    pub series: ChartSeries,
    pub colors: Vec<Color>,
}

impl ChartFrame {
    #[must_use]
    pub fn new(kind: impl Into<String>, title: impl Into<String>, series: ChartSeries) -> Self {
        let colors = palette_for(series.len());
        Self {
            kind: kind.into(),
            title: title.into(),
            series,
            colors,
        }
    }

    pub fn validate(&self) -> DashboardResult<()> {
        if self.kind.is_empty() {
            return Err(DashboardError::InvalidData(
                "chart type must not be empty".to_owned(),
            ));
        }
        if self.series.values.iter().any(|value| !value.is_finite()) {
            return Err(DashboardError::InvalidData(
                "chart values must be finite".to_owned(),
            ));
        }
        for color in &self.colors {
            color.validate()?;
        }
        Ok(())
    }
}
