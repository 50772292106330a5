//! Contract Test: Creating subdomain records
//!
//! Constraints verified:
//! - Invalid input is rejected before any client call
//! - A record is created only when the lookup reports none exists
//! - An existing record of the same name and type blocks creation
//! - The change request carries name, address, derived type and TTL
//! - Client errors from the write are returned unchanged

mod common;

use common::*;
use deens_core::{ChangeRecord, DnsEditor, Error, RecordEditor, RecordType};
use std::net::IpAddr;
use std::sync::Arc;

fn ip(text: &str) -> Option<IpAddr> {
    Some(text.parse().unwrap())
}

#[tokio::test]
async fn invalid_parameters_make_no_client_calls() {
    let inputs: Vec<(&str, &str, Option<IpAddr>)> = vec![
        ("example.com", " - ", ip("::1")),
        ("example.com", "-", ip("::1")),
        ("", "", ip("::1")),
        (" ", " ", ip("::1")),
        ("example.com", "www", None),
    ];

    for (domain, subdomain, address) in inputs {
        let client = Arc::new(MockDnsClient::new());
        let editor = DnsEditor::with_client(client.clone());

        let err = editor
            .create_subdomain(domain, subdomain, 600, address)
            .await
            .unwrap_err();

        assert!(
            err.is_validation(),
            "create_subdomain({domain:?}, {subdomain:?}, 600, {address:?}) should be a validation error, got {err:?}"
        );
        assert!(client.calls().is_empty(), "No client call expected for invalid input");
    }
}

#[tokio::test]
async fn missing_record_is_created() {
    let client = Arc::new(MockDnsClient::new().with_records(vec![record(
        1,
        "mail",
        "A",
        "192.0.2.1",
        600,
    )]));
    let editor = DnsEditor::with_client(client.clone());

    editor
        .create_subdomain("example.com", "www", 3600, ip("::1"))
        .await
        .expect("create succeeds");

    assert_eq!(
        client.write_calls(),
        vec![ClientCall::Create {
            domain: "example.com".to_string(),
            change: ChangeRecord {
                name: "www".to_string(),
                value: "::1".to_string(),
                record_type: "AAAA".to_string(),
                ttl: "3600".to_string(),
            },
        }]
    );
}

#[tokio::test]
async fn ipv4_address_creates_a_record() {
    let client = Arc::new(MockDnsClient::new());
    let editor = DnsEditor::with_client(client.clone());

    editor
        .create_subdomain("example.com", "", 600, ip("127.0.0.1"))
        .await
        .unwrap();

    match client.write_calls().as_slice() {
        [ClientCall::Create { change, .. }] => {
            assert_eq!(change.record_type, "A");
            assert_eq!(change.value, "127.0.0.1");
            assert_eq!(change.name, "");
            assert_eq!(change.ttl, "600");
        }
        other => panic!("Expected one create call, got {other:?}"),
    }
}

#[tokio::test]
async fn existing_record_blocks_creation() {
    let client = Arc::new(MockDnsClient::new().with_records(vec![record(
        7,
        "www",
        "AAAA",
        "::2",
        600,
    )]));
    let editor = DnsEditor::with_client(client.clone());

    let err = editor
        .create_subdomain("example.com", "www", 600, ip("::1"))
        .await
        .unwrap_err();

    assert!(matches!(err, Error::AlreadyExists(_)), "got {err:?}");
    assert!(client.write_calls().is_empty(), "Nothing may be created");
}

#[tokio::test]
async fn record_of_other_type_does_not_block_creation() {
    // An A record for www must not prevent creating the AAAA record
    let client = Arc::new(MockDnsClient::new().with_records(vec![record(
        7,
        "www",
        "A",
        "192.0.2.1",
        600,
    )]));
    let editor = DnsEditor::with_client(client.clone());

    editor
        .create_subdomain("example.com", "www", 600, ip("::1"))
        .await
        .unwrap();

    assert_eq!(client.write_calls().len(), 1);
}

#[tokio::test]
async fn lookup_uses_type_derived_from_address() {
    let client = Arc::new(MockDnsClient::new());
    let locator = Arc::new(StubLocator::not_found());
    let editor = DnsEditor::new(client.clone(), locator.clone());

    editor
        .create_subdomain("example.com", "www", 600, ip("::1"))
        .await
        .unwrap();

    assert_eq!(
        locator.requested(),
        vec![("example.com".to_string(), "www".to_string(), RecordType::Aaaa)]
    );
}

#[tokio::test]
async fn found_record_from_locator_blocks_creation() {
    let client = Arc::new(MockDnsClient::new());
    let locator = Arc::new(StubLocator::found(Default::default()));
    let editor = DnsEditor::new(client.clone(), locator);

    let err = editor
        .create_subdomain("example.com", "www", 600, ip("::1"))
        .await
        .unwrap_err();

    assert!(err.is_conflict(), "got {err:?}");
    assert!(client.calls().is_empty());
}

#[tokio::test]
async fn failing_lookup_is_not_mistaken_for_absence() {
    let client = Arc::new(MockDnsClient::new().failing_reads("Unable to fetch DNS records"));
    let editor = DnsEditor::with_client(client.clone());

    let err = editor
        .create_subdomain("example.com", "www", 600, ip("::1"))
        .await
        .unwrap_err();

    assert!(err.is_provider(), "got {err:?}");
    assert!(client.write_calls().is_empty(), "Nothing may be created blindly");
}

#[tokio::test]
async fn client_create_error_is_returned() {
    let client = Arc::new(MockDnsClient::new().failing_writes("Failed to create record"));
    let editor = DnsEditor::with_client(client.clone());

    let err = editor
        .create_subdomain("example.com", "www", 600, ip("::1"))
        .await
        .unwrap_err();

    match err {
        Error::Provider { message, .. } => assert_eq!(message, "Failed to create record"),
        other => panic!("Expected the client's error, got {other:?}"),
    }
    assert_eq!(client.write_calls().len(), 1);
}
