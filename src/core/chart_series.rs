use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::core::primitives::{
    deserialize_counter, deserialize_optional_labels, deserialize_optional_sequence,
    finite_f64_or_zero, finite_or_zero,
};

/// Category labels used when no custom series is supplied.
pub const FALLBACK_LABELS: [&str; 4] = ["Validated", "Rejected", "Pending", "Total"];
/// Dataset label used when the chart title is empty.
pub const DEFAULT_DATASET_LABEL: &str = "Metrics";

/// Input of a chart card.
///
/// `labels` and `values` form a custom series only when both are arrays;
/// otherwise the four scalar counters feed [`FALLBACK_LABELS`]. Labels of any
/// JSON type decode to their text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartProps {
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub title: String,
    #[serde(
        default,
        deserialize_with = "deserialize_optional_labels",
        skip_serializing_if = "Option::is_none"
    )]
    pub labels: Option<Vec<String>>,
    #[serde(
        default,
        deserialize_with = "deserialize_optional_sequence",
        skip_serializing_if = "Option::is_none"
    )]
    pub values: Option<Vec<Value>>,
    #[serde(default, deserialize_with = "deserialize_counter")]
    pub success: f64,
    #[serde(default, deserialize_with = "deserialize_counter")]
    pub cancelled: f64,
    #[serde(default, deserialize_with = "deserialize_counter")]
    pub open: f64,
    #[serde(default, deserialize_with = "deserialize_counter")]
    pub all: f64,
}

impl ChartProps {
    #[must_use]
    pub fn new(kind: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            kind: kind.into(),
            title: title.into(),
            labels: None,
            values: None,
            success: 0.0,
            cancelled: 0.0,
            open: 0.0,
            all: 0.0,
        }
    }

    #[must_use]
    pub fn with_counters(mut self, success: f64, cancelled: f64, open: f64, all: f64) -> Self {
        self.success = success;
        self.cancelled = cancelled;
        self.open = open;
        self.all = all;
        self
    }

    #[must_use]
    pub fn with_series<L, V>(mut self, labels: L, values: V) -> Self
    where
        L: IntoIterator,
        L::Item: Into<String>,
        V: IntoIterator,
        V::Item: Into<Value>,
    {
        self.labels = Some(labels.into_iter().map(Into::into).collect());
        self.values = Some(values.into_iter().map(Into::into).collect());
        self
    }

    #[must_use]
    pub fn has_custom_series(&self) -> bool {
        self.labels.is_some() && self.values.is_some()
    }
}

/// Resolved labels and numeric values for one dataset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartSeries {
    pub dataset_label: String,
    pub labels: Vec<String>,
    pub values: Vec<f64>,
}

impl ChartSeries {
    #[must_use]
    pub fn from_props(props: &ChartProps) -> Self {
        let dataset_label = if props.title.is_empty() {
            DEFAULT_DATASET_LABEL.to_owned()
        } else {
            props.title.clone()
        };

        match (&props.labels, &props.values) {
            (Some(labels), Some(values)) => Self {
                dataset_label,
                labels: labels.clone(),
                values: values.iter().map(finite_or_zero).collect(),
            },
            _ => Self {
                dataset_label,
                labels: FALLBACK_LABELS.iter().map(|label| (*label).to_owned()).collect(),
                values: [props.success, props.cancelled, props.open, props.all]
                    .into_iter()
                    .map(finite_f64_or_zero)
                    .collect(),
            },
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.labels.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }
}
