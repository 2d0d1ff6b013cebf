use indexmap::IndexMap;
use ordered_float::OrderedFloat;
use serde::{Deserialize, Serialize};

use crate::core::types::{GeoPoint, LatLng};

/// Radial distance (degrees) of the first displaced duplicate.
pub const JITTER_STEP_DEGREES: f64 = 0.00025;
/// Angle increment (radians) between consecutive duplicates.
pub const JITTER_ANGLE_STEP_RADIANS: f64 = 1.8;

/// Exact coordinate identity used to detect coincident points.
///
/// No rounding is applied. `-0.0` and `0.0` compare equal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CoordinateKey {
    lat: OrderedFloat<f64>,
    lng: OrderedFloat<f64>,
}

impl CoordinateKey {
    #[must_use]
    pub fn new(lat: f64, lng: f64) -> Self {
        Self {
            lat: OrderedFloat(lat),
            lng: OrderedFloat(lng),
        }
    }

    #[must_use]
    pub fn position(self) -> LatLng {
        LatLng::new(self.lat.0, self.lng.0)
    }
}

/// Marker ready to be drawn, derived from one valid [`GeoPoint`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlacedMarker {
    pub lat: f64,
    pub lng: f64,
    pub status: String,
    /// 0-based index among points sharing the same exact coordinate.
    pub occurrence: usize,
}

impl PlacedMarker {
    #[must_use]
    pub fn position(&self) -> LatLng {
        LatLng::new(self.lat, self.lng)
    }

    #[must_use]
    pub fn popup_text(&self) -> String {
        format!("Status: {}", self.status)
    }
}

/// Output of [`place`].
#[derive(Debug, Clone, PartialEq, Default)]
pub struct GeoLayout {
    pub markers: Vec<PlacedMarker>,
    /// Placed positions in marker order, used for viewport fitting.
    pub bounds: Vec<LatLng>,
    /// Occurrence count per exact coordinate, in first-encounter order.
    pub clusters: IndexMap<CoordinateKey, usize>,
}

impl GeoLayout {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.markers.is_empty()
    }

    /// Number of coordinates shared by more than one point.
    #[must_use]
    pub fn stacked_cluster_count(&self) -> usize {
        self.clusters.values().filter(|count| **count > 1).count()
    }
}

/// Offset `(d_lat, d_lng)` applied to the `occurrence`-th point at a coordinate.
///
/// Occurrence 0 stays in place; later ones walk a spiral whose radius grows
/// with `sqrt(occurrence)`.
#[must_use]
pub fn jitter_offset(occurrence: usize) -> (f64, f64) {
    if occurrence == 0 {
        return (0.0, 0.0);
    }
    let step = occurrence as f64;
    let jitter = JITTER_STEP_DEGREES * step.sqrt();
    let angle = step * JITTER_ANGLE_STEP_RADIANS;
    (jitter * angle.cos(), jitter * angle.sin())
}

/// Spreads coincident map points into a deterministic spiral.
///
/// Points with a non-finite coordinate are dropped. Output order follows
/// input order, and the result depends only on that order.
#[must_use]
pub fn place(points: &[GeoPoint]) -> GeoLayout {
    let mut layout = GeoLayout {
        markers: Vec::with_capacity(points.len()),
        bounds: Vec::with_capacity(points.len()),
        clusters: IndexMap::new(),
    };

    for point in points.iter().filter(|point| point.is_valid()) {
        let counter = layout
            .clusters
            .entry(CoordinateKey::new(point.lat, point.lng))
            .or_insert(0);
        let occurrence = *counter;
        *counter += 1;

        let (d_lat, d_lng) = jitter_offset(occurrence);
        let marker = PlacedMarker {
            lat: point.lat + d_lat,
            lng: point.lng + d_lng,
            status: point.status_or_unknown().to_owned(),
            occurrence,
        };
        layout.bounds.push(marker.position());
        layout.markers.push(marker);
    }

    layout
}

/// How a map viewport should react to a fresh set of bounds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ViewportFit {
    FitBounds {
        bounds: Vec<LatLng>,
        padding_px: (u32, u32),
        max_zoom: u8,
    },
    Center {
        center: LatLng,
        zoom: u8,
    },
    /// Leave the current view untouched.
    Keep,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ViewportFitPolicy {
    pub padding_px: (u32, u32),
    pub max_zoom: u8,
    pub single_point_zoom: u8,
}

impl Default for ViewportFitPolicy {
    fn default() -> Self {
        Self {
            padding_px: (24, 24),
            max_zoom: 8,
            single_point_zoom: 6,
        }
    }
}

#[must_use]
pub fn fit_viewport(bounds: &[LatLng], policy: ViewportFitPolicy) -> ViewportFit {
    match bounds {
        [] => ViewportFit::Keep,
        [single] => ViewportFit::Center {
            center: *single,
            zoom: policy.single_point_zoom,
        },
        _ => ViewportFit::FitBounds {
            bounds: bounds.to_vec(),
            padding_px: policy.padding_px,
            max_zoom: policy.max_zoom,
        },
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::{
        CoordinateKey, JITTER_STEP_DEGREES, ViewportFit, ViewportFitPolicy, fit_viewport,
        jitter_offset, place,
    };
    use crate::core::types::{GeoPoint, LatLng};

    #[test]
    fn first_occurrence_has_no_offset() {
        assert_eq!(jitter_offset(0), (0.0, 0.0));
    }

    #[test]
    fn offset_radius_follows_sqrt_of_occurrence() {
        for occurrence in 1..6 {
            let (d_lat, d_lng) = jitter_offset(occurrence);
            let radius = d_lat.hypot(d_lng);
            assert_relative_eq!(
                radius,
                JITTER_STEP_DEGREES * (occurrence as f64).sqrt(),
                max_relative = 1e-12
            );
        }
    }

    #[test]
    fn signed_zero_shares_a_key() {
        assert_eq!(CoordinateKey::new(0.0, 1.0), CoordinateKey::new(-0.0, 1.0));

        let layout = place(&[GeoPoint::new(0.0, 1.0), GeoPoint::new(-0.0, 1.0)]);
        assert_eq!(layout.clusters.len(), 1);
        assert_eq!(layout.markers[1].occurrence, 1);
    }

    #[test]
    fn clusters_keep_first_encounter_order() {
        let layout = place(&[
            GeoPoint::new(3.0, 3.0),
            GeoPoint::new(1.0, 1.0),
            GeoPoint::new(3.0, 3.0),
        ]);
        let keys: Vec<LatLng> = layout.clusters.keys().map(|key| key.position()).collect();
        assert_eq!(keys, vec![LatLng::new(3.0, 3.0), LatLng::new(1.0, 1.0)]);
        assert_eq!(layout.stacked_cluster_count(), 1);
    }

    #[test]
    fn viewport_fit_depends_on_bound_count() {
        let policy = ViewportFitPolicy::default();
        assert_eq!(fit_viewport(&[], policy), ViewportFit::Keep);
        assert_eq!(
            fit_viewport(&[LatLng::new(1.0, 2.0)], policy),
            ViewportFit::Center {
                center: LatLng::new(1.0, 2.0),
                zoom: 6
            }
        );
        let many = [LatLng::new(1.0, 2.0), LatLng::new(3.0, 4.0)];
        assert_eq!(
            fit_viewport(&many, policy),
            ViewportFit::FitBounds {
                bounds: many.to_vec(),
                padding_px: (24, 24),
                max_zoom: 8
            }
        );
    }
}
