//! Domain types shared by every screen of the salon client.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifier of a customer as the backend or a route supplies it
///
/// Numbers and strings are both accepted and kept as given, so a numeric id
/// is sent back to the backend as a number.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CustomerId {
    /// A numeric id
    Number(serde_json::Number),
    /// A string id, such as a route segment
    Text(String),
}

impl fmt::Display for CustomerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(id) => write!(f, "{id}"),
            Self::Text(id) => f.write_str(id),
        }
    }
}

impl From<&str> for CustomerId {
    fn from(id: &str) -> Self {
        Self::Text(id.to_string())
    }
}

impl From<String> for CustomerId {
    fn from(id: String) -> Self {
        Self::Text(id)
    }
}

impl From<u64> for CustomerId {
    fn from(id: u64) -> Self {
        Self::Number(id.into())
    }
}

/// A salon customer
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Customer {
    /// Backend id; absent for a customer that has not been saved yet
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<CustomerId>,
    /// First name
    #[serde(default)]
    pub first_name: String,
    /// Last name
    #[serde(default)]
    pub last_name: String,
    /// Phone number, free text
    #[serde(default)]
    pub phone_number: String,
}

impl Customer {
    /// "First Last"
    #[must_use]
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

/// A booked appointment
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Appointment {
    /// Start time, milliseconds since the Unix epoch
    pub starts_at: i64,
    /// Stylist name
    #[serde(default)]
    pub stylist: String,
    /// Booked service
    #[serde(default)]
    pub service: String,
    /// Free-form notes
    #[serde(default)]
    pub notes: String,
    /// Customer the appointment is for, when the backend includes it
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub customer: Option<Customer>,
}

impl Appointment {
    /// Creates an appointment without customer details
    #[must_use]
    pub fn new(
        starts_at: i64,
        stylist: impl Into<String>,
        service: impl Into<String>,
        notes: impl Into<String>,
    ) -> Self {
        Self {
            starts_at,
            stylist: stylist.into(),
            service: service.into(),
            notes: notes.into(),
            customer: None,
        }
    }
}

/// Lifecycle of a remote request
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RequestStatus {
    /// Nothing requested yet
    #[default]
    Unstarted,
    /// A request is in flight
    Submitting,
    /// The last request succeeded
    Successful,
    /// The last request failed
    Failed,
}

impl fmt::Display for RequestStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unstarted => write!(f, "UNSTARTED"),
            Self::Submitting => write!(f, "SUBMITTING"),
            Self::Successful => write!(f, "SUCCESSFUL"),
            Self::Failed => write!(f, "FAILED"),
        }
    }
}

/// Sequence number of a request issued by a slice
///
/// Status actions carry the id of the request they belong to; only the most
/// recently issued id may change state.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct RequestId(u64);

impl RequestId {
    /// Creates a request id from its sequence number
    #[must_use]
    pub const fn new(sequence: u64) -> Self {
        Self(sequence)
    }

    /// The id issued after this one
    #[must_use]
    pub const fn next(self) -> Self {
        Self(self.0.wrapping_add(1))
    }

    /// Returns the sequence number
    #[must_use]
    pub const fn value(self) -> u64 {
        self.0
    }
}

impl fmt::Display for RequestId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;
    use serde_json::json;

    #[test]
    fn customer_id_keeps_the_scalar_it_was_given() {
        let from_number: CustomerId = serde_json::from_value(json!(123)).unwrap();
        let from_string: CustomerId = serde_json::from_value(json!("123")).unwrap();

        assert_eq!(from_number, CustomerId::from(123));
        assert_eq!(from_string, CustomerId::from("123"));
        assert_eq!(serde_json::to_value(&from_number).unwrap(), json!(123));
        assert_eq!(serde_json::to_value(&from_string).unwrap(), json!("123"));
        assert_eq!(from_number.to_string(), from_string.to_string());
    }

    #[test]
    fn customer_reads_camel_case_fields() {
        let customer: Customer = serde_json::from_value(json!({
            "id": 7,
            "firstName": "Ashley",
            "lastName": "Jones",
            "phoneNumber": "123"
        }))
        .unwrap();

        assert_eq!(customer.id, Some(CustomerId::from(7)));
        assert_eq!(customer.full_name(), "Ashley Jones");
        assert_eq!(customer.phone_number, "123");
    }

    #[test]
    fn default_status_is_unstarted() {
        assert_eq!(RequestStatus::default(), RequestStatus::Unstarted);
        assert_eq!(RequestStatus::Submitting.to_string(), "SUBMITTING");
    }

    #[test]
    fn request_ids_increase() {
        let first = RequestId::default().next();
        assert!(first.next() > first);
        assert_eq!(first.value(), 1);
    }
}
