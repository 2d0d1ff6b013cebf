use serde::{Deserialize, Serialize};

use crate::core::{LatLng, ViewportFitPolicy};
use crate::error::{DashboardError, DashboardResult};
use crate::render::TileLayer;

/// Map card bootstrap configuration.
///
/// This type is serializable so host applications can persist/load map setup
/// without inventing their own ad-hoc format.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MapCardConfig {
    /// World-view center used when there is no point to center on.
    #[serde(default = "default_center")]
    pub default_center: LatLng,
    #[serde(default = "default_world_zoom")]
    pub default_zoom: u8,
    /// Initial zoom when the first valid point is used as center.
    #[serde(default = "default_first_point_zoom")]
    pub first_point_zoom: u8,
    #[serde(default)]
    pub fit: ViewportFitPolicy,
    #[serde(default = "default_tile_layer")]
    pub tile_layer: TileLayer,
    #[serde(default = "default_enabled")]
    pub zoom_control: bool,
    #[serde(default = "default_enabled")]
    pub scroll_wheel_zoom: bool,
    #[serde(default = "default_enabled")]
    pub prefer_canvas: bool,
}

impl Default for MapCardConfig {
    fn default() -> Self {
        Self {
            default_center: default_center(),
            default_zoom: default_world_zoom(),
            first_point_zoom: default_first_point_zoom(),
            fit: ViewportFitPolicy::default(),
            tile_layer: default_tile_layer(),
            zoom_control: true,
            scroll_wheel_zoom: true,
            prefer_canvas: true,
        }
    }
}

impl MapCardConfig {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the world-view center and zoom.
    #[must_use]
    pub fn with_default_view(mut self, center: LatLng, zoom: u8) -> Self {
        self.default_center = center;
        self.default_zoom = zoom;
        self
    }

    /// Sets fit-to-bounds padding, zoom cap and single-point zoom.
    #[must_use]
    pub fn with_fit_policy(mut self, fit: ViewportFitPolicy) -> Self {
        self.fit = fit;
        self
    }

    #[must_use]
    pub fn with_tile_layer(mut self, tile_layer: TileLayer) -> Self {
        self.tile_layer = tile_layer;
        self
    }

    pub fn validate(&self) -> DashboardResult<()> {
        if !self.default_center.is_finite() {
            return Err(DashboardError::InvalidConfig(
                "default map center must be finite".to_owned(),
            ));
        }
        if self.tile_layer.url_template.is_empty() {
            return Err(DashboardError::InvalidConfig(
                "tile layer url must not be empty".to_owned(),
            ));
        }
        let max_zoom = self.tile_layer.max_zoom;
        for (zoom, name) in [
            (self.default_zoom, "default_zoom"),
            (self.first_point_zoom, "first_point_zoom"),
            (self.fit.max_zoom, "fit.max_zoom"),
            (self.fit.single_point_zoom, "fit.single_point_zoom"),
        ] {
            if zoom > max_zoom {
                return Err(DashboardError::InvalidConfig(format!(
                    "map config `{name}` ({zoom}) exceeds tile max zoom {max_zoom}"
                )));
            }
        }
        Ok(())
    }

    /// Serializes config to pretty JSON for debug/config files.
    pub fn to_json_pretty(&self) -> DashboardResult<String> {
        serde_json::to_string_pretty(self)
            .map_err(|e| DashboardError::InvalidConfig(format!("failed to serialize config: {e}")))
    }

    /// Deserializes and validates config from JSON.
    pub fn from_json_str(input: &str) -> DashboardResult<Self> {
        let config: Self = serde_json::from_str(input)
            .map_err(|e| DashboardError::InvalidConfig(format!("failed to parse config: {e}")))?;
        config.validate()?;
        Ok(config)
    }
}

fn default_center() -> LatLng {
    LatLng::new(25.2048, 55.2708)
}

fn default_world_zoom() -> u8 {
    3
}

fn default_first_point_zoom() -> u8 {
    5
}

fn default_tile_layer() -> TileLayer {
    TileLayer {
        url_template: "https://{s}.tile.openstreetmap.org/{z}/{x}/{y}.png".to_owned(),
        max_zoom: 18,
        attribution: "&copy; OpenStreetMap contributors".to_owned(),
    }
}

fn default_enabled() -> bool {
    true
}

#[cfg(test)]
mod tests {
    use super::MapCardConfig;
    use crate::core::ViewportFitPolicy;
    use crate::error::DashboardError;

    #[test]
    fn json_round_trip_preserves_custom_fit() {
        let config = MapCardConfig::new().with_fit_policy(ViewportFitPolicy {
            padding_px: (12, 12),
            max_zoom: 10,
            single_point_zoom: 7,
        });
        let json = config.to_json_pretty().expect("serialize");
        assert_eq!(MapCardConfig::from_json_str(&json).expect("parse"), config);
    }

    #[test]
    fn empty_object_yields_defaults() {
        let config = MapCardConfig::from_json_str("{}").expect("parse");
        assert_eq!(config, MapCardConfig::default());
        assert_eq!(config.tile_layer.max_zoom, 18);
    }

    #[test]
    fn zoom_above_tile_limit_is_rejected() {
        let mut config = MapCardConfig::default();
        config.fit.max_zoom = 19;
        assert!(matches!(
            config.validate(),
            Err(DashboardError::InvalidConfig(_))
        ));
    }
}
