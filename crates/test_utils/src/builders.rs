//! Test Data Builders
//!
//! Builds insert documents the way a client would send them, so tests only
//! spell out the fields they care about.

use serde_json::{Map, Value};

use domain_billing::bill::{AMOUNT_FIELD, CITY_FIELD, PROVIDER_FIELD, UNITS_FIELD};

use crate::fixtures::{CITY, PROVIDER};

/// Builder for bill candidate documents
///
/// Defaults to a complete, valid bill of 100 units for 25.
#[derive(Debug, Clone)]
pub struct BillCandidateBuilder {
    fields: Map<String, Value>,
}

impl Default for BillCandidateBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl BillCandidateBuilder {
    /// Creates a new builder with default values
    pub fn new() -> Self {
        let mut fields = Map::new();
        fields.insert(PROVIDER_FIELD.to_string(), Value::from(PROVIDER));
        fields.insert(CITY_FIELD.to_string(), Value::from(CITY));
        fields.insert(UNITS_FIELD.to_string(), Value::from(100));
        fields.insert(AMOUNT_FIELD.to_string(), Value::from(25));
        Self { fields }
    }

    /// Sets the provider
    pub fn with_provider(self, provider: impl Into<Value>) -> Self {
        self.with_field(PROVIDER_FIELD, provider)
    }

    /// Sets the city
    pub fn with_city(self, city: impl Into<Value>) -> Self {
        self.with_field(CITY_FIELD, city)
    }

    /// Sets the units consumed, as a number or a numeric string
    pub fn with_units(self, units: impl Into<Value>) -> Self {
        self.with_field(UNITS_FIELD, units)
    }

    /// Sets the total amount, as a number or a numeric string
    pub fn with_amount(self, amount: impl Into<Value>) -> Self {
        self.with_field(AMOUNT_FIELD, amount)
    }

    /// Sets any field
    pub fn with_field(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.fields.insert(key.into(), value.into());
        self
    }

    /// Removes a field entirely
    pub fn without(mut self, key: &str) -> Self {
        self.fields.remove(key);
        self
    }

    /// Builds the JSON document
    pub fn build(self) -> Value {
        Value::Object(self.fields)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use domain_billing::{NewBill, RequiredFieldPolicy};

    #[test]
    fn test_default_candidate_is_valid() {
        let bill = NewBill::from_candidate(
            &BillCandidateBuilder::new().build(),
            RequiredFieldPolicy::Truthy,
        )
        .unwrap();
        assert_eq!(bill.cost_per_unit(), 0.25);
    }

    #[test]
    fn test_without_removes_field() {
        let candidate = BillCandidateBuilder::new().without(CITY_FIELD).build();
        assert!(candidate.get(CITY_FIELD).is_none());
        assert_eq!(candidate[PROVIDER_FIELD], Value::from(PROVIDER));
    }
}
