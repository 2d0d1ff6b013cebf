use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// Loose numeric coercion for payload values.
///
/// Numbers pass through, numeric strings are parsed after trimming and
/// booleans map to `1`/`0`. Everything else (null, empty or non-numeric
/// strings, arrays, objects) yields `None`, as do non-finite results.
#[must_use]
pub fn coerce_number(value: &Value) -> Option<f64> {
    let number = match value {
        Value::Number(number) => number.as_f64()?,
        Value::String(text) => {
            let trimmed = text.trim();
            if trimmed.is_empty() {
                return None;
            }
            trimmed.parse::<f64>().ok()?
        }
        Value::Bool(flag) => f64::from(u8::from(*flag)),
        Value::Null | Value::Array(_) | Value::Object(_) => return None,
    };
    number.is_finite().then_some(number)
}

/// Coerces to a finite number, falling back to `0.0`.
#[must_use]
pub fn finite_or_zero(value: &Value) -> f64 {
    coerce_number(value).unwrap_or(0.0)
}

/// Same as [`finite_or_zero`] for values that are already `f64`.
#[must_use]
pub fn finite_f64_or_zero(value: f64) -> f64 {
    if value.is_finite() { value } else { 0.0 }
}

/// Coordinate coercion: like [`coerce_number`], but `null` and blank strings
/// read as `0.0`. Anything else that does not coerce yields `NaN`.
#[must_use]
pub fn coerce_coordinate(value: &Value) -> f64 {
    match value {
        Value::Null => 0.0,
        Value::String(text) if text.trim().is_empty() => 0.0,
        other => coerce_number(other).unwrap_or(f64::NAN),
    }
}

/// Deserializes a present coordinate field; see [`coerce_coordinate`].
pub(crate) fn deserialize_coordinate<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(coerce_coordinate(&value))
}

/// Deserializes a numeric counter leniently; unusable input becomes `0`.
pub(crate) fn deserialize_counter<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(finite_or_zero(&value))
}

/// Integer counter variant of [`deserialize_counter`]; fractions truncate.
pub(crate) fn deserialize_int_counter<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(coerce_number(&value).map_or(0, |number| number as i64))
}

/// Keeps a JSON array as-is; any other value reads as absent.
pub(crate) fn deserialize_optional_sequence<'de, D>(
    deserializer: D,
) -> Result<Option<Vec<Value>>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(match value {
        Value::Array(items) => Some(items),
        _ => None,
    })
}

/// Text shown for a label of any JSON type.
#[must_use]
pub fn label_text(value: &Value) -> String {
    match value {
        Value::String(text) => text.clone(),
        Value::Number(number) => match number.as_i64() {
            Some(integer) => integer.to_string(),
            None => number.to_string(),
        },
        other => other.to_string(),
    }
}

/// Array of labels of any JSON type, rendered to text; non-arrays are absent.
pub(crate) fn deserialize_optional_labels<'de, D>(
    deserializer: D,
) -> Result<Option<Vec<String>>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(deserialize_optional_sequence(deserializer)?
        .map(|items| items.iter().map(label_text).collect()))
}

/// Accepts a non-empty string; any other JSON value (e.g. `false`) is absent.
pub(crate) fn deserialize_optional_label<'de, D>(
    deserializer: D,
) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(match value {
        Value::String(text) if !text.is_empty() => Some(text),
        _ => None,
    })
}

pub(crate) fn nan() -> f64 {
    f64::NAN
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::{coerce_coordinate, coerce_number, finite_f64_or_zero, finite_or_zero, label_text};

    #[test]
    fn numbers_and_numeric_strings_coerce() {
        assert_eq!(coerce_number(&json!(25.2)), Some(25.2));
        assert_eq!(coerce_number(&json!(" 55.27 ")), Some(55.27));
        assert_eq!(coerce_number(&json!(true)), Some(1.0));
        assert_eq!(coerce_number(&json!(false)), Some(0.0));
    }

    #[test]
    fn unusable_values_do_not_coerce() {
        assert_eq!(coerce_number(&json!(null)), None);
        assert_eq!(coerce_number(&json!("")), None);
        assert_eq!(coerce_number(&json!("north")), None);
        assert_eq!(coerce_number(&json!("inf")), None);
        assert_eq!(coerce_number(&json!("NaN")), None);
        assert_eq!(coerce_number(&json!([1])), None);
        assert_eq!(coerce_number(&json!({"lat": 1})), None);
    }

    #[test]
    fn zero_fallback_applies_to_failures_only() {
        assert_eq!(finite_or_zero(&json!("7")), 7.0);
        assert_eq!(finite_or_zero(&json!("seven")), 0.0);
        assert_eq!(finite_f64_or_zero(f64::INFINITY), 0.0);
        assert_eq!(finite_f64_or_zero(-3.5), -3.5);
    }

    #[test]
    fn blank_coordinates_read_as_zero() {
        assert_eq!(coerce_coordinate(&json!(null)), 0.0);
        assert_eq!(coerce_coordinate(&json!("")), 0.0);
        assert_eq!(coerce_coordinate(&json!("  ")), 0.0);
        assert_eq!(coerce_coordinate(&json!("12.5")), 12.5);
        assert!(coerce_coordinate(&json!("north")).is_nan());
        assert!(coerce_coordinate(&json!({"lat": 1})).is_nan());
    }

    #[test]
    fn labels_render_any_json_value() {
        assert_eq!(label_text(&json!("Q1")), "Q1");
        assert_eq!(label_text(&json!(2024)), "2024");
        assert_eq!(label_text(&json!(1.5)), "1.5");
        assert_eq!(label_text(&json!(true)), "true");
        assert_eq!(label_text(&json!(null)), "null");
    }
}
