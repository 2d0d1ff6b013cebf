use chrono::{DateTime, Utc};
use indexmap::IndexMap;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::core::primitives::deserialize_int_counter;
use crate::core::types::GeoPoint;
use crate::error::{DashboardError, DashboardResult};

/// Collection holding the codes themselves.
pub const CODES_MODEL: &str = "secret_codes";
/// Collection holding code validation log entries.
pub const CODE_LOG_MODEL: &str = "secret_code_log";
/// Collection holding offer-lead records.
pub const OFFER_LEAD_MODEL: &str = "product_offer_lead";

/// Flat counter record returned by the metrics fetch.
///
/// Every field defaults so that a partial payload overwrites only what it
/// carries, starting from an all-zero state. Counters coerce leniently and
/// unusable map point entries are skipped, so one bad field never rejects
/// the payload.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct DashboardMetrics {
    #[serde(deserialize_with = "deserialize_int_counter")]
    pub total_codes: i64,
    #[serde(deserialize_with = "deserialize_int_counter")]
    pub total_active: i64,
    #[serde(deserialize_with = "deserialize_int_counter")]
    pub total_inactive: i64,
    #[serde(deserialize_with = "deserialize_int_counter")]
    pub total_validated: i64,
    #[serde(deserialize_with = "deserialize_int_counter")]
    pub total_pending: i64,
    #[serde(deserialize_with = "deserialize_int_counter")]
    pub total_success: i64,
    #[serde(deserialize_with = "deserialize_int_counter")]
    pub total_fail: i64,
    #[serde(deserialize_with = "deserialize_int_counter")]
    pub total_offer_leads: i64,
    #[serde(deserialize_with = "deserialize_int_counter")]
    pub total_subscribed: i64,
    #[serde(deserialize_with = "deserialize_int_counter")]
    pub total_search_locations: i64,
    #[serde(deserialize_with = "deserialize_int_counter")]
    pub total_logs: i64,
    #[serde(deserialize_with = "deserialize_int_counter")]
    pub total_validated_logs: i64,
    #[serde(deserialize_with = "deserialize_int_counter")]
    pub total_rejected_logs: i64,
    #[serde(deserialize_with = "deserialize_int_counter")]
    pub total_pending_logs: i64,
    #[serde(deserialize_with = "deserialize_map_points")]
    pub map_points: Vec<GeoPoint>,
    /// Counters this crate does not name, kept in payload order.
    #[serde(flatten)]
    pub extra: IndexMap<String, Value>,
}

impl DashboardMetrics {
    pub fn from_json_str(input: &str) -> DashboardResult<Self> {
        serde_json::from_str(input).map_err(|e| {
            DashboardError::InvalidData(format!("failed to parse metrics payload: {e}"))
        })
    }

    pub fn to_json_pretty(&self) -> DashboardResult<String> {
        serde_json::to_string_pretty(self).map_err(|e| {
            DashboardError::InvalidData(format!("failed to serialize metrics payload: {e}"))
        })
    }

    /// Looks up a counter by payload key, including unnamed extras.
    #[must_use]
    pub fn counter(&self, key: &str) -> Option<i64> {
        let value = match key {
            "total_codes" => self.total_codes,
            "total_active" => self.total_active,
            "total_inactive" => self.total_inactive,
            "total_validated" => self.total_validated,
            "total_pending" => self.total_pending,
            "total_success" => self.total_success,
            "total_fail" => self.total_fail,
            "total_offer_leads" => self.total_offer_leads,
            "total_subscribed" => self.total_subscribed,
            "total_search_locations" => self.total_search_locations,
            "total_logs" => self.total_logs,
            "total_validated_logs" => self.total_validated_logs,
            "total_rejected_logs" => self.total_rejected_logs,
            "total_pending_logs" => self.total_pending_logs,
            other => return self.extra.get(other).and_then(Value::as_i64),
        };
        Some(value)
    }
}

fn deserialize_map_points<'de, D>(deserializer: D) -> Result<Vec<GeoPoint>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    let Value::Array(items) = value else {
        return Ok(Vec::new());
    };
    Ok(items
        .into_iter()
        .filter_map(|item| serde_json::from_value(item).ok())
        .collect())
}

/// Optional creation-date window applied to log counters and map points.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct MetricsQuery {
    #[serde(default)]
    pub date_from: Option<DateTime<Utc>>,
    #[serde(default)]
    pub date_to: Option<DateTime<Utc>>,
}

impl MetricsQuery {
    #[must_use]
    pub fn unbounded() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn between(date_from: DateTime<Utc>, date_to: DateTime<Utc>) -> Self {
        Self {
            date_from: Some(date_from),
            date_to: Some(date_to),
        }
    }

    /// Returns the window to apply. A half-open query applies no window.
    pub fn log_window(self) -> DashboardResult<Option<(DateTime<Utc>, DateTime<Utc>)>> {
        match (self.date_from, self.date_to) {
            (Some(date_from), Some(date_to)) => {
                if date_from > date_to {
                    return Err(DashboardError::InvalidQuery { date_from, date_to });
                }
                Ok(Some((date_from, date_to)))
            }
            _ => Ok(None),
        }
    }
}

/// One term of a list-view filter, e.g. `status = active`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DomainFilter {
    pub field: String,
    pub operator: String,
    pub value: Value,
}

impl DomainFilter {
    #[must_use]
    pub fn eq(field: impl Into<String>, value: impl Into<Value>) -> Self {
        Self {
            field: field.into(),
            operator: "=".to_owned(),
            value: value.into(),
        }
    }
}

/// Window action opening a filtered list of records.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ListAction {
    #[serde(rename = "type")]
    pub kind: String,
    pub name: String,
    pub res_model: String,
    pub view_mode: String,
    pub domain: Vec<DomainFilter>,
    pub target: String,
}

impl ListAction {
    #[must_use]
    pub fn details(res_model: impl Into<String>, domain: Vec<DomainFilter>) -> Self {
        Self {
            kind: "ir.actions.act_window".to_owned(),
            name: "Details".to_owned(),
            res_model: res_model.into(),
            view_mode: "tree,form".to_owned(),
            domain,
            target: "current".to_owned(),
        }
    }
}

/// Drill-down targets reachable from clickable KPI cards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DrillDown {
    AllCodes,
    ActiveCodes,
    PendingCodes,
    OfferLeads,
}

impl DrillDown {
    #[must_use]
    pub fn action(self) -> ListAction {
        match self {
            Self::AllCodes => ListAction::details(CODES_MODEL, Vec::new()),
            Self::ActiveCodes => {
                ListAction::details(CODES_MODEL, vec![DomainFilter::eq("status", "active")])
            }
            Self::PendingCodes => ListAction::details(
                CODES_MODEL,
                vec![DomainFilter::eq("validate_status", "pending")],
            ),
            Self::OfferLeads => ListAction::details(OFFER_LEAD_MODEL, Vec::new()),
        }
    }
}

/// One KPI card: a named counter and an optional drill-down.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KpiCard {
    pub key: String,
    pub title: String,
    pub value: i64,
    pub drill_down: Option<DrillDown>,
}

const KPI_CATALOG: [(&str, &str, Option<DrillDown>); 14] = [
    ("total_codes", "Total Codes", Some(DrillDown::AllCodes)),
    ("total_active", "Active Codes", Some(DrillDown::ActiveCodes)),
    ("total_inactive", "Inactive Codes", None),
    ("total_validated", "Validated Codes", None),
    ("total_pending", "Pending Codes", Some(DrillDown::PendingCodes)),
    ("total_success", "Successful Searches", None),
    ("total_fail", "Failed Searches", None),
    ("total_offer_leads", "Offer Leads", Some(DrillDown::OfferLeads)),
    ("total_subscribed", "Subscriptions", None),
    ("total_search_locations", "Search Locations", None),
    ("total_logs", "Validation Logs", None),
    ("total_validated_logs", "Validated Logs", None),
    ("total_rejected_logs", "Rejected Logs", None),
    ("total_pending_logs", "Pending Logs", None),
];

/// Builds the KPI cards in display order.
#[must_use]
pub fn kpi_cards(metrics: &DashboardMetrics) -> Vec<KpiCard> {
    KPI_CATALOG
        .iter()
        .map(|(key, title, drill_down)| KpiCard {
            key: (*key).to_owned(),
            title: (*title).to_owned(),
            value: metrics.counter(key).unwrap_or(0),
            drill_down: *drill_down,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};

    use super::{DashboardMetrics, DrillDown, MetricsQuery, OFFER_LEAD_MODEL, kpi_cards};
    use crate::error::DashboardError;

    #[test]
    fn partial_payload_defaults_to_zero() {
        let metrics = DashboardMetrics::from_json_str(
            r#"{"total_codes": 12, "total_logs": 4, "custom_gauge": 9, "map_points": []}"#,
        )
        .expect("decode metrics");

        assert_eq!(metrics.total_codes, 12);
        assert_eq!(metrics.total_active, 0);
        assert_eq!(metrics.counter("total_logs"), Some(4));
        assert_eq!(metrics.counter("custom_gauge"), Some(9));
        assert_eq!(metrics.counter("missing"), None);
    }

    #[test]
    fn loose_counters_and_points_do_not_reject_payload() {
        let metrics = DashboardMetrics::from_json_str(
            r#"{
                "total_codes": "12",
                "total_active": null,
                "total_logs": 4.9,
                "total_fail": "many",
                "map_points": [{"lat": 1, "lng": 2}, null, 7, {"lat": 3, "lng": 4}]
            }"#,
        )
        .expect("decode metrics");

        assert_eq!(metrics.total_codes, 12);
        assert_eq!(metrics.total_active, 0);
        assert_eq!(metrics.total_logs, 4);
        assert_eq!(metrics.total_fail, 0);
        assert_eq!(metrics.map_points.len(), 2);
        assert_eq!(metrics.map_points[1].lat, 3.0);
    }

    #[test]
    fn non_array_map_points_read_as_empty() {
        let metrics = DashboardMetrics::from_json_str(r#"{"total_codes": 2, "map_points": false}"#)
            .expect("decode metrics");
        assert!(metrics.map_points.is_empty());
        assert_eq!(metrics.total_codes, 2);
    }

    #[test]
    fn malformed_payload_is_invalid_data() {
        let err = DashboardMetrics::from_json_str("[1, 2").expect_err("must fail");
        assert!(matches!(err, DashboardError::InvalidData(_)));
    }

    #[test]
    fn half_open_query_applies_no_window() {
        let from = Utc.with_ymd_and_hms(2026, 1, 1, 0, 0, 0).unwrap();
        let query = MetricsQuery {
            date_from: Some(from),
            date_to: None,
        };
        assert_eq!(query.log_window().expect("window"), None);
    }

    #[test]
    fn inverted_query_is_rejected() {
        let from = Utc.with_ymd_and_hms(2026, 2, 1, 0, 0, 0).unwrap();
        let to = Utc.with_ymd_and_hms(2026, 1, 1, 0, 0, 0).unwrap();
        let err = MetricsQuery::between(from, to)
            .log_window()
            .expect_err("inverted window");
        assert!(matches!(err, DashboardError::InvalidQuery { .. }));
    }

    #[test]
    fn kpi_catalog_reads_counters_in_order() {
        let metrics = DashboardMetrics {
            total_codes: 10,
            total_offer_leads: 3,
            ..DashboardMetrics::default()
        };
        let cards = kpi_cards(&metrics);

        assert_eq!(cards.len(), 14);
        assert_eq!(cards[0].key, "total_codes");
        assert_eq!(cards[0].value, 10);
        let leads = cards
            .iter()
            .find(|card| card.key == "total_offer_leads")
            .expect("leads card");
        assert_eq!(leads.value, 3);
        assert_eq!(leads.drill_down, Some(DrillDown::OfferLeads));
        assert_eq!(DrillDown::OfferLeads.action().res_model, OFFER_LEAD_MODEL);
    }
}
