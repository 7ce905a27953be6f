//! Forgiving deserializers for values written by older frontends.
//!
//! Saved views have been persisted by form inputs that kept every bound as a
//! string (`""` for "no bound") and by later clients that send numbers. Both
//! shapes must decode to the same typed criteria.

use serde::de::{Deserialize, Deserializer, Error as _};
use serde_json::Value;

use crate::types::{FilterCriteria, SortConfig};

/// `null`, missing, or any non-string scalar becomes `""`.
pub(crate) fn string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<Value>::deserialize(deserializer)? {
        Some(Value::String(s)) => s,
        Some(Value::Number(n)) => n.to_string(),
        _ => String::new(),
    })
}

/// Accepts text or numbers; `null` stays `None`.
pub(crate) fn opt_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<Value>::deserialize(deserializer)? {
        Some(Value::String(s)) => Some(s),
        Some(Value::Number(n)) => Some(n.to_string()),
        _ => None,
    })
}

/// Numeric bound that may arrive as a number, a numeric string, `""` or `null`.
///
/// Anything else decodes to no bound with a warning, so one bad stored view
/// does not fail the whole list.
pub(crate) fn opt_i32<'de, D>(deserializer: D) -> Result<Option<i32>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    let year = match &value {
        None | Some(Value::Null) => return Ok(None),
        Some(Value::Number(n)) => n
            .as_i64()
            .or_else(|| n.as_f64().map(|f| f.trunc() as i64))
            .and_then(|v| i32::try_from(v).ok()),
        Some(Value::String(s)) if s.trim().is_empty() => return Ok(None),
        Some(Value::String(s)) => s.trim().parse::<i32>().ok(),
        Some(_) => None,
    };
    if year.is_none() {
        tracing::warn!(bound = ?value, "Unrecognised year bound, ignoring it");
    }
    Ok(year)
}

/// Like [`opt_i32`] but for fractional rating bounds.
pub(crate) fn opt_f64<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    let rating = match &value {
        None | Some(Value::Null) => return Ok(None),
        Some(Value::Number(n)) => n.as_f64(),
        Some(Value::String(s)) if s.trim().is_empty() => return Ok(None),
        Some(Value::String(s)) => s.trim().parse::<f64>().ok().filter(|r| r.is_finite()),
        Some(_) => None,
    };
    if rating.is_none() {
        tracing::warn!(bound = ?value, "Unrecognised rating bound, ignoring it");
    }
    Ok(rating)
}

/// Id list that may be an array of numbers/numeric strings, `""` or `null`.
pub(crate) fn id_list<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: From<i64>,
{
    match Option::<Value>::deserialize(deserializer)? {
        Some(Value::Array(items)) => items
            .into_iter()
            .map(|item| match item {
                Value::Number(n) => n
                    .as_i64()
                    .map(T::from)
                    .ok_or_else(|| D::Error::custom(format!("invalid id: {n}"))),
                Value::String(s) => s
                    .trim()
                    .parse::<i64>()
                    .map(T::from)
                    .map_err(|_| D::Error::custom(format!("invalid id: {s:?}"))),
                // Select widgets store `{value, label}` pairs.
                Value::Object(map) => map
                    .get("value")
                    .and_then(Value::as_i64)
                    .map(T::from)
                    .ok_or_else(|| D::Error::custom("option without numeric value")),
                other => Err(D::Error::custom(format!("invalid id: {other}"))),
            })
            .collect(),
        _ => Ok(Vec::new()),
    }
}

/// Date that is dropped when it does not parse as `YYYY-MM-DD`.
pub(crate) fn opt_date<'de, D>(deserializer: D) -> Result<Option<chrono::NaiveDate>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<Value>::deserialize(deserializer)? {
        Some(Value::String(s)) => {
            let day = s.get(..10).unwrap_or(s.as_str());
            chrono::NaiveDate::parse_from_str(day, "%Y-%m-%d").ok()
        }
        _ => None,
    })
}

/// Stored filter object; `null` means "no filters".
pub(crate) fn filters<'de, D>(deserializer: D) -> Result<FilterCriteria, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<FilterCriteria>::deserialize(deserializer)?.unwrap_or_default())
}

/// Stored sort; `null` or an unknown key falls back to the default order.
pub(crate) fn sort_config<'de, D>(deserializer: D) -> Result<SortConfig, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<Value>::deserialize(deserializer)? {
        None | Some(Value::Null) => Ok(SortConfig::default()),
        Some(value) => match serde_json::from_value::<SortConfig>(value.clone()) {
            Ok(sort) => Ok(sort),
            Err(e) => {
                tracing::warn!(sorting = %value, error = %e, "Unrecognised stored sort, using default");
                Ok(SortConfig::default())
            }
        },
    }
}
