pub mod chart_series;
pub mod geo_cluster;
pub mod metrics;
pub mod primitives;
pub mod types;

pub use chart_series::{ChartProps, ChartSeries, DEFAULT_DATASET_LABEL, FALLBACK_LABELS};
pub use geo_cluster::{
    CoordinateKey, GeoLayout, JITTER_ANGLE_STEP_RADIANS, JITTER_STEP_DEGREES, PlacedMarker,
    ViewportFit, ViewportFitPolicy, fit_viewport, jitter_offset, place,
};
pub use metrics::{
    CODE_LOG_MODEL, CODES_MODEL, DashboardMetrics, DomainFilter, DrillDown, KpiCard, ListAction,
    MetricsQuery, OFFER_LEAD_MODEL, kpi_cards,
};
pub use primitives::{coerce_coordinate, coerce_number, finite_or_zero, label_text};
pub use types::{GeoPoint, LatLng, UNKNOWN_STATUS};
