//! Property-Based Test Generators
//!
//! Provides proptest strategies for bills and the loosely-typed documents
//! clients send.

use proptest::prelude::*;
use serde_json::{json, Value};

use domain_billing::NewBill;

/// Strategy for generating provider names from a small pool, so groups collide
pub fn provider_strategy() -> impl Strategy<Value = String> {
    prop_oneof![
        Just("PowerCo".to_string()),
        Just("GridWest".to_string()),
        Just("AquaFlow".to_string()),
        Just("GasWorks".to_string()),
    ]
}

/// Strategy for generating city names from a small pool
pub fn city_strategy() -> impl Strategy<Value = String> {
    prop_oneof![
        Just("Springfield".to_string()),
        Just("Shelbyville".to_string()),
        Just("Capital City".to_string()),
    ]
}

/// Strategy for generating strictly positive units consumed
pub fn units_strategy() -> impl Strategy<Value = f64> {
    0.5f64..10_000.0
}

/// Strategy for generating strictly positive amounts
pub fn amount_strategy() -> impl Strategy<Value = f64> {
    0.01f64..5_000.0
}

/// Strategy for generating bills with finite, positive costs
pub fn new_bill_strategy() -> impl Strategy<Value = NewBill> {
    (
        provider_strategy(),
        prop::option::weighted(0.9, city_strategy()),
        units_strategy(),
        amount_strategy(),
    )
        .prop_map(|(provider, city, units, amount)| NewBill::new(provider, city, units, amount))
}

/// Strategy for generating a number the way a client might send it
///
/// Either a JSON number or its decimal string form.
pub fn loose_number_strategy(inner: impl Strategy<Value = f64>) -> impl Strategy<Value = Value> {
    (inner, any::<bool>()).prop_map(|(n, as_text)| {
        if as_text {
            Value::String(n.to_string())
        } else {
            json!(n)
        }
    })
}

/// Strategy for generating complete insert documents
pub fn bill_candidate_strategy() -> impl Strategy<Value = Value> {
    (
        provider_strategy(),
        city_strategy(),
        loose_number_strategy(units_strategy()),
        loose_number_strategy(amount_strategy()),
    )
        .prop_map(|(provider, city, units, amount)| {
            json!({
                "provider": provider,
                "city": city,
                "unitsConsumed": units,
                "totalAmount": amount
            })
        })
}
