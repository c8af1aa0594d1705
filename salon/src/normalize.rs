//! Normalization of raw response payloads into domain types.
//!
//! Timestamps arrive as integers, floats or numeric strings depending on the
//! endpoint. Everything leaving this module carries `starts_at` as epoch
//! milliseconds.

use crate::error::NormalizeError;
use crate::types::{Appointment, Customer};
use serde_json::Value;

const STARTS_AT: &str = "startsAt";

/// Split a customer-history payload into the customer and their appointments
///
/// Expects `{ "customer": { ...fields, "appointments": [ ... ] } }`.
///
/// # Errors
///
/// Returns [`NormalizeError`] if the customer is missing, the appointments
/// are not a list, or any appointment has an unusable `startsAt`.
///
/// # Example
///
/// ```
/// use salon::normalize::normalize_customer_payload;
/// use serde_json::json;
///
/// let (_, appointments) = normalize_customer_payload(json!({
///     "customer": { "id": 123, "appointments": [{ "startsAt": "123" }] }
/// }))
/// .unwrap();
/// assert_eq!(appointments[0].starts_at, 123);
/// ```
pub fn normalize_customer_payload(data: Value) -> Result<(Customer, Vec<Appointment>), NormalizeError> {
    let Value::Object(mut root) = data else {
        return Err(NormalizeError::MissingCustomer);
    };
    let Some(Value::Object(mut customer)) = root.remove("customer") else {
        return Err(NormalizeError::MissingCustomer);
    };

    let appointments = normalize_appointments(customer.remove("appointments").unwrap_or(Value::Null))?;
    let customer = serde_json::from_value(Value::Object(customer))
        .map_err(|e| NormalizeError::Malformed(e.to_string()))?;

    Ok((customer, appointments))
}

/// Normalize a JSON list of appointment records
///
/// # Errors
///
/// Returns [`NormalizeError::NotAList`] if `list` is not an array, or the
/// first per-record error encountered.
pub fn normalize_appointments(list: Value) -> Result<Vec<Appointment>, NormalizeError> {
    let Value::Array(records) = list else {
        return Err(NormalizeError::NotAList {
            field: "appointments",
        });
    };

    records
        .into_iter()
        .enumerate()
        .map(|(index, record)| normalize_appointment(index, record))
        .collect()
}

fn normalize_appointment(index: usize, record: Value) -> Result<Appointment, NormalizeError> {
    let Value::Object(mut fields) = record else {
        return Err(NormalizeError::Malformed(format!(
            "appointment {index} is not an object"
        )));
    };

    let millis = match fields.get(STARTS_AT) {
        None | Some(Value::Null) => return Err(NormalizeError::MissingStartsAt { index }),
        Some(raw) => coerce_millis(raw).ok_or_else(|| NormalizeError::InvalidStartsAt {
            index,
            value: raw.to_string(),
        })?,
    };
    fields.insert(STARTS_AT.to_string(), Value::from(millis));

    serde_json::from_value(Value::Object(fields)).map_err(|e| NormalizeError::Malformed(e.to_string()))
}

/// Coerce a JSON timestamp to epoch milliseconds
///
/// Fractional milliseconds are truncated toward zero.
#[must_use]
pub fn coerce_millis(raw: &Value) -> Option<i64> {
    match raw {
        Value::Number(number) => number
            .as_i64()
            .or_else(|| number.as_f64().and_then(float_millis)),
        Value::String(text) => {
            let text = text.trim();
            text.parse::<i64>()
                .ok()
                .or_else(|| text.parse::<f64>().ok().and_then(float_millis))
        },
        _ => None,
    }
}

#[allow(clippy::cast_possible_truncation)] // truncation is the intended rounding
fn float_millis(value: f64) -> Option<i64> {
    value.is_finite().then(|| value.trunc() as i64)
}
