//! Required-field checks for incoming bills and comparison queries

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::bill::{AMOUNT_FIELD, PROVIDER_FIELD, UNITS_FIELD};
use crate::coercion::{is_truthy, parse_number};
use crate::error::BillingError;

/// Fields a bill must carry, in the order they are reported
pub const REQUIRED_BILL_FIELDS: [&str; 3] = [PROVIDER_FIELD, AMOUNT_FIELD, UNITS_FIELD];

/// How "missing" is decided for required bill fields
///
/// `Truthy` treats a numeric `0` (and `false`) as missing, so a bill with
/// zero units or a zero amount is rejected. `Present` accepts zeros and only
/// rejects absent, `null` or empty-string values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RequiredFieldPolicy {
    #[default]
    Truthy,
    Present,
}

impl RequiredFieldPolicy {
    /// Whether `value` satisfies a required field under this policy
    pub fn accepts(&self, value: Option<&Value>) -> bool {
        match (self, value) {
            (_, None) => false,
            (RequiredFieldPolicy::Truthy, Some(v)) => is_truthy(v),
            (RequiredFieldPolicy::Present, Some(Value::Null)) => false,
            (RequiredFieldPolicy::Present, Some(Value::String(s))) => !s.is_empty(),
            (RequiredFieldPolicy::Present, Some(_)) => true,
        }
    }
}

impl fmt::Display for RequiredFieldPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RequiredFieldPolicy::Truthy => f.write_str("truthy"),
            RequiredFieldPolicy::Present => f.write_str("present"),
        }
    }
}

impl FromStr for RequiredFieldPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "truthy" => Ok(RequiredFieldPolicy::Truthy),
            "present" => Ok(RequiredFieldPolicy::Present),
            other => Err(format!(
                "unknown required field policy '{other}', expected 'truthy' or 'present'"
            )),
        }
    }
}

/// Lists the required bill fields `document` fails to provide
pub fn missing_bill_fields(
    document: &Map<String, Value>,
    policy: RequiredFieldPolicy,
) -> Vec<String> {
    REQUIRED_BILL_FIELDS
        .iter()
        .filter(|field| !policy.accepts(document.get(**field)))
        .map(|field| field.to_string())
        .collect()
}

/// Lists the fields of `document` whose key or text anywhere inside holds U+0000
pub fn fields_with_nul(document: &Map<String, Value>) -> Vec<String> {
    document
        .iter()
        .filter(|(key, value)| key.contains('\0') || value_has_nul(value))
        .map(|(key, _)| key.clone())
        .collect()
}

fn value_has_nul(value: &Value) -> bool {
    match value {
        Value::String(s) => s.contains('\0'),
        Value::Array(items) => items.iter().any(value_has_nul),
        Value::Object(map) => map
            .iter()
            .any(|(key, inner)| key.contains('\0') || value_has_nul(inner)),
        _ => false,
    }
}

/// Raw comparison parameters as they arrive from a query string
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ComparisonRequest {
    pub provider: Option<String>,
    pub city: Option<String>,
    pub units: Option<String>,
    pub amount: Option<String>,
}

impl ComparisonRequest {
    /// Creates a request with every parameter set
    pub fn new(
        provider: impl Into<String>,
        city: impl Into<String>,
        units: impl Into<String>,
        amount: impl Into<String>,
    ) -> Self {
        Self {
            provider: Some(provider.into()),
            city: Some(city.into()),
            units: Some(units.into()),
            amount: Some(amount.into()),
        }
    }

    /// Checks every parameter is present and non-empty, then coerces the numbers
    ///
    /// `"0"` is a present value; it coerces to zero and the resulting
    /// cost-per-unit may be NaN or Infinity.
    ///
    /// # Errors
    ///
    /// `BillingError::MissingParameter` listing every absent or empty parameter,
    /// or `BillingError::UnsupportedText` if `provider` or `city` holds U+0000.
    pub fn validate(self) -> Result<PeerQuery, BillingError> {
        fn take(value: Option<String>, name: &str, missing: &mut Vec<String>) -> String {
            match value {
                Some(v) if !v.is_empty() => v,
                _ => {
                    missing.push(name.to_string());
                    String::new()
                }
            }
        }

        let mut missing = Vec::new();
        let provider = take(self.provider, "provider", &mut missing);
        let city = take(self.city, "city", &mut missing);
        let units = take(self.units, "units", &mut missing);
        let amount = take(self.amount, "amount", &mut missing);

        if !missing.is_empty() {
            return Err(BillingError::MissingParameter(missing));
        }

        let with_nul: Vec<String> = [("provider", &provider), ("city", &city)]
            .into_iter()
            .filter(|(_, value)| value.contains('\0'))
            .map(|(name, _)| name.to_string())
            .collect();
        if !with_nul.is_empty() {
            return Err(BillingError::UnsupportedText(with_nul));
        }

        Ok(PeerQuery {
            provider,
            city,
            units: parse_number(&units),
            amount: parse_number(&amount),
        })
    }
}

/// A validated comparison: whose peers to look at and the caller's own bill
#[derive(Debug, Clone, PartialEq)]
pub struct PeerQuery {
    pub provider: String,
    pub city: String,
    pub units: f64,
    pub amount: f64,
}
