//! Tests for MCR orders and prefix filter list validation.

use rstest::rstest;

use crate::error::ApiError;
use crate::product::ProvisioningStatus;

use super::{
    AddressFamily, Mcr, McrOrder, NewPrefixFilterList, PrefixAction, PrefixFilterList,
    PrefixListEntry, prefix_list_path, prefix_lists_path,
};

fn order() -> McrOrder {
    McrOrder {
        name: String::from("core-router"),
        location_id: 5,
        speed_mbps: 5_000,
        term_months: 12,
        asn: Some(64_512),
    }
}

fn entry(prefix: &str, ge: Option<u8>, le: Option<u8>) -> PrefixListEntry {
    PrefixListEntry {
        action: PrefixAction::Permit,
        prefix: prefix.to_owned(),
        ge,
        le,
    }
}

fn list(family: AddressFamily, entries: Vec<PrefixListEntry>) -> NewPrefixFilterList {
    NewPrefixFilterList {
        description: String::from("advertised-routes"),
        address_family: family,
        entries,
    }
}

#[test]
fn valid_order_passes_validation() {
    assert!(order().validate().is_ok());
}

#[test]
fn unsupported_speed_is_rejected() {
    let mut invalid = order();
    invalid.speed_mbps = 40_000;
    let err = invalid.validate().expect_err("speed should be rejected");
    assert!(matches!(err, ApiError::Validation(_)));
}

#[test]
fn valid_prefix_list_passes_validation() {
    let valid = list(
        AddressFamily::Ipv4,
        vec![
            entry("10.0.0.0/8", Some(16), Some(24)),
            entry("192.0.2.0/24", None, None),
        ],
    );
    assert!(valid.validate().is_ok());
}

#[rstest]
#[case::empty_description("", vec![entry("10.0.0.0/8", None, None)])]
#[case::no_entries("routes", vec![])]
#[case::blank_prefix("routes", vec![entry("  ", None, None)])]
#[case::inverted_range("routes", vec![entry("10.0.0.0/8", Some(24), Some(16))])]
#[case::le_beyond_family("routes", vec![entry("10.0.0.0/8", None, Some(64))])]
fn invalid_prefix_lists_are_rejected(
    #[case] description: &str,
    #[case] entries: Vec<PrefixListEntry>,
) {
    let invalid = NewPrefixFilterList {
        description: description.to_owned(),
        address_family: AddressFamily::Ipv4,
        entries,
    };
    assert!(invalid.validate().is_err());
}

#[test]
fn ipv6_ranges_allow_longer_prefixes() {
    let valid = list(
        AddressFamily::Ipv6,
        vec![entry("2001:db8::/32", Some(48), Some(64))],
    );
    assert!(valid.validate().is_ok());
}

#[test]
fn prefix_list_paths_are_scoped_to_the_router() {
    assert_eq!(
        prefix_lists_path("mcr-1"),
        "/v2/product/mcr2/mcr-1/prefixLists"
    );
    assert_eq!(
        prefix_list_path("mcr-1", 42),
        "/v2/product/mcr2/mcr-1/prefixLists/42"
    );
}

#[test]
fn entry_serializes_wire_shape() {
    let json = serde_json::to_value(entry("10.0.0.0/8", Some(16), None))
        .unwrap_or_else(|err| panic!("serialize: {err}"));
    assert_eq!(
        json.get("action").and_then(serde_json::Value::as_str),
        Some("permit")
    );
    assert_eq!(json.get("ge").and_then(serde_json::Value::as_u64), Some(16));
    assert!(json.get("le").is_none());
}

#[test]
fn stored_list_decodes_without_entries() {
    let body = r#"{"id":7,"description":"advertised-routes","addressFamily":"IPv4"}"#;
    let stored: PrefixFilterList =
        serde_json::from_str(body).unwrap_or_else(|err| panic!("decode list: {err}"));
    assert_eq!(stored.id, 7);
    assert!(stored.entries.is_empty());
}

#[test]
fn sparse_mcr_snapshot_decodes_with_defaults() {
    let mcr: Mcr = serde_json::from_str(r#"{"productUid":"mcr-1"}"#)
        .unwrap_or_else(|err| panic!("decode sparse mcr: {err}"));
    assert_eq!(mcr.provisioning_status, ProvisioningStatus::New);
    assert_eq!(mcr.asn, None);
}
