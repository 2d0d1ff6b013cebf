use indexmap::IndexSet;
use serde::{Deserialize, Serialize};

use crate::core::{CODE_LOG_MODEL, CODES_MODEL, OFFER_LEAD_MODEL};
use crate::error::{DashboardError, DashboardResult};

/// Channel on which record changes are announced.
pub const DEFAULT_REFRESH_CHANNEL: &str = "secret_codes_refresh";

/// Live refresh configuration for one coordinator.
///
/// Serializable so hosts can keep it alongside their view configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LiveRefreshConfig {
    #[serde(default = "default_channel")]
    pub channel: String,
    /// Collections whose change events are worth a reload.
    #[serde(default = "default_interesting_models")]
    pub interesting_models: IndexSet<String>,
}

impl Default for LiveRefreshConfig {
    fn default() -> Self {
        Self {
            channel: default_channel(),
            interesting_models: default_interesting_models(),
        }
    }
}

impl LiveRefreshConfig {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_channel(mut self, channel: impl Into<String>) -> Self {
        self.channel = channel.into();
        self
    }

    #[must_use]
    pub fn with_interesting_models<I, S>(mut self, models: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.interesting_models = models.into_iter().map(Into::into).collect();
        self
    }

    #[must_use]
    pub fn is_interesting(&self, model: &str) -> bool {
        self.interesting_models.contains(model)
    }

    pub fn validate(&self) -> DashboardResult<()> {
        if self.channel.trim().is_empty() {
            return Err(DashboardError::InvalidConfig(
                "live refresh channel must not be empty".to_owned(),
            ));
        }
        if self.interesting_models.iter().any(|model| model.is_empty()) {
            return Err(DashboardError::InvalidConfig(
                "interesting model names must not be empty".to_owned(),
            ));
        }
        Ok(())
    }

    pub fn from_json_str(input: &str) -> DashboardResult<Self> {
        let config: Self = serde_json::from_str(input).map_err(|e| {
            DashboardError::InvalidConfig(format!("failed to parse live refresh config: {e}"))
        })?;
        config.validate()?;
        Ok(config)
    }
}

fn default_channel() -> String {
    DEFAULT_REFRESH_CHANNEL.to_owned()
}

fn default_interesting_models() -> IndexSet<String> {
    [CODE_LOG_MODEL, CODES_MODEL, OFFER_LEAD_MODEL]
        .into_iter()
        .map(str::to_owned)
        .collect()
}
