//! Tests for core_kernel identifiers

use core_kernel::BillId;
use uuid::Uuid;

#[test]
fn test_bill_id_prefix() {
    assert_eq!(BillId::prefix(), "BILL");
}

#[test]
fn test_default_ids_are_unique() {
    let a = BillId::default();
    let b = BillId::default();
    assert_ne!(a, b);
}

#[test]
fn test_uuid_conversion() {
    let uuid = Uuid::new_v4();
    let id = BillId::from(uuid);
    let back: Uuid = id.into();
    assert_eq!(uuid, back);
    assert_eq!(BillId::from_uuid(uuid).as_uuid(), &uuid);
}

#[test]
fn test_invalid_id_fails_to_parse() {
    assert!("BILL-not-a-uuid".parse::<BillId>().is_err());
}
