//! PostgreSQL bill store integration tests
//!
//! Each test starts its own container. Run with `--ignored` where Docker is
//! available.

use serde_json::json;

use core_kernel::HealthCheckable;
use domain_billing::{BillStore, MockBillStore, NewBill};
use test_utils::{
    assert_cost_approx_eq, assert_peer_statistics_approx_eq, assert_provider_counts_eq,
    create_isolated_test_database, BillFixtures, CITY, PROVIDER,
};

async fn load(store: &dyn BillStore, bills: Vec<NewBill>) {
    for bill in bills {
        store.insert_one(bill).await.unwrap();
    }
}

#[tokio::test]
#[ignore = "requires Docker"]
async fn test_insert_and_list_in_order() {
    let db = create_isolated_test_database().await.unwrap();
    let store = db.bill_store();

    let first = store
        .insert_one(
            NewBill::new(PROVIDER, Some(CITY.to_string()), 10.0, 100.0)
                .with_attribute("billingMonth", json!("2024-03")),
        )
        .await
        .unwrap();
    let second = store
        .insert_one(NewBill::new("GridWest", None, 4.0, 2.0))
        .await
        .unwrap();

    let bills = store.find_all().await.unwrap();
    assert_eq!(bills.len(), 2);
    assert_eq!(bills[0].id, first);
    assert_eq!(bills[1].id, second);
    assert_eq!(bills[0].attributes.get("billingMonth"), Some(&json!("2024-03")));
    assert_eq!(bills[1].city, None);
}

#[tokio::test]
#[ignore = "requires Docker"]
async fn test_aggregates_match_in_memory_store() {
    let db = create_isolated_test_database().await.unwrap();
    let store = db.bill_store();
    load(&store, BillFixtures::mixed()).await;
    let mock = MockBillStore::with_bills(BillFixtures::mixed()).await;

    let summary = store.summary_statistics().await.unwrap();
    let expected = mock.summary_statistics().await.unwrap();
    assert_eq!(summary.total_bills, expected.total_bills);
    assert_cost_approx_eq(summary.overall_average_cost, expected.overall_average_cost, 1e-9);

    let counts = store.provider_counts().await.unwrap();
    assert_provider_counts_eq(&counts, &[("PowerCo", 3), ("GridWest", 2), ("AquaFlow", 1)]);

    let peers = store.peer_statistics(PROVIDER, CITY).await.unwrap().unwrap();
    let expected_peers = mock.peer_statistics(PROVIDER, CITY).await.unwrap().unwrap();
    assert_peer_statistics_approx_eq(&peers, &expected_peers);
    assert_eq!(peers.count, 2);
    assert_cost_approx_eq(peers.average_cost_per_unit, 12.5, 1e-12);
}

#[tokio::test]
#[ignore = "requires Docker"]
async fn test_empty_store() {
    let db = create_isolated_test_database().await.unwrap();
    let store = db.bill_store();

    let summary = store.summary_statistics().await.unwrap();
    assert_eq!(summary.total_bills, 0);
    assert_eq!(summary.overall_average_cost, 0.0);
    assert!(store.provider_counts().await.unwrap().is_empty());
    assert!(store.peer_statistics(PROVIDER, CITY).await.unwrap().is_none());
}

#[tokio::test]
#[ignore = "requires Docker"]
async fn test_zero_units_follow_ieee_division() {
    let db = create_isolated_test_database().await.unwrap();
    let store = db.bill_store();
    let mut bills = BillFixtures::peer_pair();
    bills.push(BillFixtures::zero_over_zero());
    bills.push(BillFixtures::free_units());
    load(&store, bills.clone()).await;
    let mock = MockBillStore::with_bills(bills).await;

    let summary = store.summary_statistics().await.unwrap();
    assert_eq!(summary.total_bills, 4);
    assert!(summary.overall_average_cost.is_nan());

    let peers = store.peer_statistics(PROVIDER, CITY).await.unwrap().unwrap();
    let expected = mock.peer_statistics(PROVIDER, CITY).await.unwrap().unwrap();
    assert_peer_statistics_approx_eq(&peers, &expected);
    assert_eq!(peers.min_cost_per_unit, 10.0);
    assert_eq!(peers.max_cost_per_unit, f64::INFINITY);
}

#[tokio::test]
#[ignore = "requires Docker"]
async fn test_extreme_costs_match_in_memory_store() {
    let db = create_isolated_test_database().await.unwrap();
    let store = db.bill_store();
    let peers_only = vec![
        NewBill::new(PROVIDER, Some(CITY.to_string()), 1.0, 1e160),
        NewBill::new(PROVIDER, Some(CITY.to_string()), 1.0, 3e160),
    ];
    load(&store, peers_only.clone()).await;

    let summary = store.summary_statistics().await.unwrap();
    assert_eq!(summary.total_bills, 2);
    assert_cost_approx_eq(summary.overall_average_cost, 2e160, 1e-12);

    let mut bills = peers_only;
    bills.push(NewBill::new("GridWest", None, 1e-300, 1e300));
    store
        .insert_one(NewBill::new("GridWest", None, 1e-300, 1e300))
        .await
        .unwrap();
    let mock = MockBillStore::with_bills(bills).await;

    let summary = store.summary_statistics().await.unwrap();
    let expected = mock.summary_statistics().await.unwrap();
    assert_eq!(summary.total_bills, 3);
    assert_eq!(summary.overall_average_cost, f64::INFINITY);
    assert_cost_approx_eq(summary.overall_average_cost, expected.overall_average_cost, 1e-12);

    let peers = store.peer_statistics(PROVIDER, CITY).await.unwrap().unwrap();
    let expected_peers = mock.peer_statistics(PROVIDER, CITY).await.unwrap().unwrap();
    assert_peer_statistics_approx_eq(&peers, &expected_peers);
    assert_cost_approx_eq(peers.average_cost_per_unit, 2e160, 1e-12);
    assert_eq!(peers.min_cost_per_unit, 1e160);
    assert_eq!(peers.max_cost_per_unit, 3e160);
}

#[tokio::test]
#[ignore = "requires Docker"]
async fn test_peer_match_is_exact_and_clear_data_resets() {
    let db = create_isolated_test_database().await.unwrap();
    let store = db.bill_store();
    load(&store, BillFixtures::peer_pair()).await;

    assert!(store.peer_statistics("powerco", CITY).await.unwrap().is_none());
    assert!(store.peer_statistics(PROVIDER, "Springfield ").await.unwrap().is_none());
    assert!(store.health_check().await.is_operational());

    db.clear_data().await.unwrap();
    assert!(store.find_all().await.unwrap().is_empty());
}
