use futures::future::LocalBoxFuture;
use tracing::debug;

use crate::core::{ChartProps, DashboardMetrics, GeoPoint, KpiCard, MetricsQuery, kpi_cards};
use crate::error::DashboardResult;
use crate::render::{ChartSurface, MapSurface};

use super::{ChartCard, MapCard, MapCardConfig};

/// Provider of the dashboard's counters and map points.
///
/// Implementations must be idempotent; the dashboard calls them once at
/// startup.
pub trait MetricsSource {
    fn fetch_metrics(
        &self,
        query: &MetricsQuery,
    ) -> LocalBoxFuture<'_, DashboardResult<DashboardMetrics>>;
}

/// Dashboard state assembled from one metrics fetch.
#[derive(Debug, Clone, PartialEq)]
pub struct Dashboard {
    metrics: DashboardMetrics,
    query: MetricsQuery,
}

impl Dashboard {
    /// Fetches metrics once and builds the dashboard state.
    pub async fn load<M>(source: &M, query: MetricsQuery) -> DashboardResult<Self>
    where
        M: MetricsSource + ?Sized,
    {
        query.log_window()?;
        let metrics = source.fetch_metrics(&query).await?;
        debug!(
            total_codes = metrics.total_codes,
            total_logs = metrics.total_logs,
            map_points = metrics.map_points.len(),
            "dashboard metrics loaded"
        );
        Ok(Self { metrics, query })
    }

    #[must_use]
    pub fn from_metrics(metrics: DashboardMetrics) -> Self {
        Self {
            metrics,
            query: MetricsQuery::unbounded(),
        }
    }

    #[must_use]
    pub fn metrics(&self) -> &DashboardMetrics {
        &self.metrics
    }

    #[must_use]
    pub fn query(&self) -> MetricsQuery {
        self.query
    }

    #[must_use]
    pub fn map_points(&self) -> &[GeoPoint] {
        &self.metrics.map_points
    }

    #[must_use]
    pub fn kpi_cards(&self) -> Vec<KpiCard> {
        kpi_cards(&self.metrics)
    }

    /// Validated / rejected / pending / total log counts, via the fallback series.
    #[must_use]
    pub fn log_status_chart(&self) -> ChartProps {
        let m = &self.metrics;
        ChartProps::new("bar", "Validation Logs").with_counters(
            m.total_validated_logs as f64,
            m.total_rejected_logs as f64,
            m.total_pending_logs as f64,
            m.total_logs as f64,
        )
    }

    #[must_use]
    pub fn code_status_chart(&self) -> ChartProps {
        let m = &self.metrics;
        ChartProps::new("doughnut", "Code Status").with_series(
            ["Active", "Inactive", "Pending"],
            [m.total_active, m.total_inactive, m.total_pending],
        )
    }

    #[must_use]
    pub fn search_performance_chart(&self) -> ChartProps {
        let m = &self.metrics;
        ChartProps::new("bar", "Search Performance")
            .with_series(["Success", "Failed"], [m.total_success, m.total_fail])
    }

    pub fn map_card<S: MapSurface>(&self, config: MapCardConfig) -> DashboardResult<MapCard<S>> {
        MapCard::new("Search Locations", self.metrics.map_points.clone(), config)
    }

    #[must_use]
    pub fn chart_card<S: ChartSurface>(&self, props: ChartProps) -> ChartCard<S> {
        ChartCard::new(props)
    }
}
