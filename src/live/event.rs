use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Change notification delivered on a bus channel.
///
/// `model` and `model_name` are interchangeable identifiers of the affected
/// collection; any other payload fields are kept in `extra`.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct NotificationEvent {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model_name: Option<String>,
    #[serde(flatten)]
    pub extra: IndexMap<String, Value>,
}

impl NotificationEvent {
    /// Event that names no collection.
    #[must_use]
    pub fn untargeted() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn for_model(model: impl Into<String>) -> Self {
        Self {
            model: Some(model.into()),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn for_model_name(model_name: impl Into<String>) -> Self {
        Self {
            model_name: Some(model_name.into()),
            ..Self::default()
        }
    }

    /// `model`, else `model_name`; empty strings count as absent.
    #[must_use]
    pub fn model_identifier(&self) -> Option<&str> {
        self.model
            .as_deref()
            .filter(|model| !model.is_empty())
            .or_else(|| self.model_name.as_deref().filter(|name| !name.is_empty()))
    }
}

#[cfg(test)]
mod tests {
    use super::NotificationEvent;

    #[test]
    fn model_takes_precedence_over_model_name() {
        let event = NotificationEvent {
            model: Some("secret_codes".to_owned()),
            model_name: Some("product_offer_lead".to_owned()),
            ..NotificationEvent::default()
        };
        assert_eq!(event.model_identifier(), Some("secret_codes"));
    }

    #[test]
    fn empty_model_falls_back_to_model_name() {
        let event = NotificationEvent {
            model: Some(String::new()),
            model_name: Some("secret_code_log".to_owned()),
            ..NotificationEvent::default()
        };
        assert_eq!(event.model_identifier(), Some("secret_code_log"));
        assert_eq!(NotificationEvent::untargeted().model_identifier(), None);
    }

    #[test]
    fn payload_decoding_keeps_extra_fields() {
        let event: NotificationEvent =
            serde_json::from_str(r#"{"model": "secret_codes", "ids": [1, 2]}"#)
                .expect("decode event");
        assert_eq!(event.model_identifier(), Some("secret_codes"));
        assert!(event.extra.contains_key("ids"));
    }
}
