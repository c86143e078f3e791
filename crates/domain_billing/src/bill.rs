//! Bill records
//!
//! A bill is a loosely-shaped document: four named fields the analytics
//! depend on plus whatever else the caller chose to send. The extra fields
//! are kept verbatim and flattened back into the document when listed.

use serde::Serialize;
use serde_json::{Map, Value};

use core_kernel::BillId;

use crate::coercion::to_number;
use crate::error::BillingError;
use crate::statistics::cost_per_unit;
use crate::validation::{fields_with_nul, missing_bill_fields, RequiredFieldPolicy};

/// Document key of the generated identifier
pub const ID_FIELD: &str = "_id";
pub const PROVIDER_FIELD: &str = "provider";
pub const CITY_FIELD: &str = "city";
pub const UNITS_FIELD: &str = "unitsConsumed";
pub const AMOUNT_FIELD: &str = "totalAmount";

/// A persisted bill
///
/// Immutable once stored. `cost_per_unit` is derived on read and never
/// persisted.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BillRecord {
    #[serde(rename = "_id")]
    pub id: BillId,
    pub provider: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    pub units_consumed: f64,
    pub total_amount: f64,
    /// Caller-supplied fields with no meaning to the analytics
    #[serde(flatten)]
    pub attributes: Map<String, Value>,
}

impl BillRecord {
    /// Cost of one unit on this bill
    pub fn cost_per_unit(&self) -> f64 {
        cost_per_unit(self.total_amount, self.units_consumed)
    }

    /// Whether this bill belongs to the peer group of `provider` in `city`
    ///
    /// Exact, case-sensitive match on both fields.
    pub fn is_peer_of(&self, provider: &str, city: &str) -> bool {
        self.provider == provider && self.city.as_deref() == Some(city)
    }
}

/// A validated bill that has not been stored yet
#[derive(Debug, Clone, PartialEq)]
pub struct NewBill {
    pub provider: String,
    pub city: Option<String>,
    pub units_consumed: f64,
    pub total_amount: f64,
    pub attributes: Map<String, Value>,
}

impl NewBill {
    /// Creates a bill with no extra attributes
    pub fn new(
        provider: impl Into<String>,
        city: Option<String>,
        units_consumed: f64,
        total_amount: f64,
    ) -> Self {
        Self {
            provider: provider.into(),
            city,
            units_consumed,
            total_amount,
            attributes: Map::new(),
        }
    }

    /// Validates and normalizes a caller-supplied document
    ///
    /// Required fields are checked under `policy`. The numeric fields are
    /// coerced, never rejected: unreadable input becomes NaN. A non-string
    /// `city` is kept as an ordinary attribute and the bill then has no city
    /// for peer matching. A caller-supplied `_id` is dropped.
    ///
    /// # Errors
    ///
    /// `BillingError::MissingField` listing every missing field, including
    /// when the candidate is not a JSON object at all.
    /// `BillingError::UnsupportedText` listing every field holding U+0000.
    pub fn from_candidate(
        candidate: &Value,
        policy: RequiredFieldPolicy,
    ) -> Result<Self, BillingError> {
        let Some(document) = candidate.as_object() else {
            return Err(BillingError::MissingField(
                missing_bill_fields(&Map::new(), policy),
            ));
        };

        let missing = missing_bill_fields(document, policy);
        if !missing.is_empty() {
            return Err(BillingError::MissingField(missing));
        }

        let mut attributes = document.clone();
        attributes.remove(ID_FIELD);

        let with_nul = fields_with_nul(&attributes);
        if !with_nul.is_empty() {
            return Err(BillingError::UnsupportedText(with_nul));
        }

        let provider = match attributes.remove(PROVIDER_FIELD) {
            Some(Value::String(s)) => s,
            Some(other) => other.to_string(),
            None => String::new(),
        };
        let units_consumed = attributes
            .remove(UNITS_FIELD)
            .map(|v| to_number(&v))
            .unwrap_or(f64::NAN);
        let total_amount = attributes
            .remove(AMOUNT_FIELD)
            .map(|v| to_number(&v))
            .unwrap_or(f64::NAN);
        let city = match attributes.remove(CITY_FIELD) {
            Some(Value::String(s)) => Some(s),
            Some(other) => {
                attributes.insert(CITY_FIELD.to_string(), other);
                None
            }
            None => None,
        };

        Ok(Self {
            provider,
            city,
            units_consumed,
            total_amount,
            attributes,
        })
    }

    /// Adds an extra attribute
    pub fn with_attribute(mut self, key: impl Into<String>, value: Value) -> Self {
        self.attributes.insert(key.into(), value);
        self
    }

    /// Cost of one unit on this bill
    pub fn cost_per_unit(&self) -> f64 {
        cost_per_unit(self.total_amount, self.units_consumed)
    }

    /// Attaches the store-assigned identifier
    pub fn into_record(self, id: BillId) -> BillRecord {
        BillRecord {
            id,
            provider: self.provider,
            city: self.city,
            units_consumed: self.units_consumed,
            total_amount: self.total_amount,
            attributes: self.attributes,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_candidate_coerces_numeric_strings() {
        let candidate = json!({
            "provider": "PowerCo",
            "city": "Springfield",
            "unitsConsumed": "250",
            "totalAmount": "87.5",
            "billingMonth": "2024-03"
        });

        let bill = NewBill::from_candidate(&candidate, RequiredFieldPolicy::Truthy).unwrap();
        assert_eq!(bill.provider, "PowerCo");
        assert_eq!(bill.city.as_deref(), Some("Springfield"));
        assert_eq!(bill.units_consumed, 250.0);
        assert_eq!(bill.total_amount, 87.5);
        assert_eq!(bill.attributes.get("billingMonth"), Some(&json!("2024-03")));
        assert!(!bill.attributes.contains_key("unitsConsumed"));
    }

    #[test]
    fn test_candidate_keeps_garbage_as_nan() {
        let candidate = json!({"provider": "P", "unitsConsumed": "lots", "totalAmount": 10});
        let bill = NewBill::from_candidate(&candidate, RequiredFieldPolicy::Truthy).unwrap();
        assert!(bill.units_consumed.is_nan());
        assert!(bill.cost_per_unit().is_nan());
    }

    #[test]
    fn test_candidate_drops_caller_id_and_keeps_odd_city() {
        let candidate = json!({
            "_id": "mine",
            "provider": 7,
            "city": 42,
            "unitsConsumed": 1,
            "totalAmount": 2
        });
        let bill = NewBill::from_candidate(&candidate, RequiredFieldPolicy::Truthy).unwrap();
        assert_eq!(bill.provider, "7");
        assert_eq!(bill.city, None);
        assert_eq!(bill.attributes.get("city"), Some(&json!(42)));
        assert!(!bill.attributes.contains_key("_id"));
    }

    #[test]
    fn test_non_object_candidate_is_missing_everything() {
        let err = NewBill::from_candidate(&json!([1, 2]), RequiredFieldPolicy::Truthy).unwrap_err();
        match err {
            BillingError::MissingField(fields) => {
                assert_eq!(fields, vec!["provider", "totalAmount", "unitsConsumed"]);
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_candidate_with_nul_text_is_rejected() {
        let candidate = json!({
            "provider": "PowerCo",
            "city": "Spring\u{0}field",
            "unitsConsumed": 1,
            "totalAmount": 2,
            "notes": ["fine", {"deep": "x\u{0}"}]
        });
        let err = NewBill::from_candidate(&candidate, RequiredFieldPolicy::Truthy).unwrap_err();
        match err {
            BillingError::UnsupportedText(fields) => assert_eq!(fields, vec!["city", "notes"]),
            other => panic!("unexpected error: {other:?}"),
        }

        let ignored_id = json!({
            "_id": "\u{0}",
            "provider": "P",
            "unitsConsumed": 1,
            "totalAmount": 2
        });
        assert!(NewBill::from_candidate(&ignored_id, RequiredFieldPolicy::Truthy).is_ok());
    }

    #[test]
    fn test_record_serializes_flat_document() {
        let id = BillId::new();
        let record = NewBill::new("PowerCo", Some("Springfield".into()), 10.0, 100.0)
            .with_attribute("meter", json!("M-1"))
            .into_record(id);

        let doc = serde_json::to_value(&record).unwrap();
        assert_eq!(doc["_id"], json!(id.as_uuid().to_string()));
        assert_eq!(doc["provider"], json!("PowerCo"));
        assert_eq!(doc["city"], json!("Springfield"));
        assert_eq!(doc["unitsConsumed"], json!(10.0));
        assert_eq!(doc["totalAmount"], json!(100.0));
        assert_eq!(doc["meter"], json!("M-1"));
        assert_eq!(record.cost_per_unit(), 10.0);
    }

    #[test]
    fn test_peer_match_is_exact() {
        let record = NewBill::new("PowerCo", Some("Springfield".into()), 1.0, 1.0)
            .into_record(BillId::new());
        assert!(record.is_peer_of("PowerCo", "Springfield"));
        assert!(!record.is_peer_of("powerco", "Springfield"));
        assert!(!record.is_peer_of("PowerCo", "springfield "));

        let no_city = NewBill::new("PowerCo", None, 1.0, 1.0).into_record(BillId::new());
        assert!(!no_city.is_peer_of("PowerCo", ""));
    }
}
