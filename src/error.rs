use thiserror::Error;

pub type DashboardResult<T> = Result<T, DashboardError>;

#[derive(Debug, Error)]
pub enum DashboardError {
    #[error("invalid config: {0}")]
    InvalidConfig(String),

    #[error("invalid data: {0}")]
    InvalidData(String),

    #[error("invalid metrics window: date_from={date_from} is after date_to={date_to}")]
    InvalidQuery {
        date_from: chrono::DateTime<chrono::Utc>,
        date_to: chrono::DateTime<chrono::Utc>,
    },

    #[error("reload failed: {0}")]
    Reload(String),

    #[error("surface failure: {0}")]
    Surface(String),

    #[error("metrics fetch failed: {0}")]
    MetricsFetch(String),
}
