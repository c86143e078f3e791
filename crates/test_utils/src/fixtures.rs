//! Pre-built Test Fixtures
//!
//! Consistent, predictable bills shared by unit and integration tests.

use serde_json::{json, Value};

use domain_billing::{MockBillStore, NewBill};

/// Provider used by most fixtures
pub const PROVIDER: &str = "PowerCo";
/// City used by most fixtures
pub const CITY: &str = "Springfield";

/// Fixture for bills
pub struct BillFixtures;

impl BillFixtures {
    /// Two peers in the same provider and city, costing 10 and 15 per unit
    pub fn peer_pair() -> Vec<NewBill> {
        vec![
            NewBill::new(PROVIDER, Some(CITY.to_string()), 10.0, 100.0),
            NewBill::new(PROVIDER, Some(CITY.to_string()), 20.0, 300.0),
        ]
    }

    /// Bills spread over several providers and cities
    ///
    /// Per-provider counts: PowerCo 3, GridWest 2, AquaFlow 1.
    pub fn mixed() -> Vec<NewBill> {
        let mut bills = Self::peer_pair();
        bills.extend([
            NewBill::new(PROVIDER, Some("Shelbyville".to_string()), 50.0, 75.0),
            NewBill::new("GridWest", Some(CITY.to_string()), 40.0, 60.0),
            NewBill::new("GridWest", None, 8.0, 20.0),
            NewBill::new("AquaFlow", Some(CITY.to_string()), 1000.0, 35.0)
                .with_attribute("meter", json!("W-17")),
        ]);
        bills
    }

    /// A bill whose cost-per-unit is NaN
    pub fn zero_over_zero() -> NewBill {
        NewBill::new(PROVIDER, Some(CITY.to_string()), 0.0, 0.0)
    }

    /// A bill whose cost-per-unit is +Infinity
    pub fn free_units() -> NewBill {
        NewBill::new(PROVIDER, Some(CITY.to_string()), 0.0, 12.0)
    }

    /// A mock store pre-loaded with [`Self::peer_pair`]
    pub async fn peer_store() -> MockBillStore {
        MockBillStore::with_bills(Self::peer_pair()).await
    }
}

/// Fixture for request documents
pub struct RequestFixtures;

impl RequestFixtures {
    /// A complete insert document with numeric strings and an extra field
    pub fn complete_candidate() -> Value {
        json!({
            "provider": PROVIDER,
            "city": CITY,
            "unitsConsumed": "250",
            "totalAmount": "87.50",
            "billingMonth": "2024-03"
        })
    }

    /// An insert document with no amount
    pub fn candidate_without_amount() -> Value {
        json!({
            "provider": PROVIDER,
            "city": CITY,
            "unitsConsumed": 250
        })
    }
}
