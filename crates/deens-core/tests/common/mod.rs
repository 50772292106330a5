//! Test doubles and common utilities for contract tests
//!
//! This module provides minimal test doubles that record how the core talks
//! to the DNS client without any network access.

#![allow(dead_code)]

use deens_core::error::{Error, Result};
use deens_core::traits::{
    ChangeRecord, DnsClient, Domain, Record, RecordLocator, RecordType,
};
use std::sync::Mutex;

/// A call received by [`MockDnsClient`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClientCall {
    ListDomains,
    ListRecords {
        domain: String,
    },
    Create {
        domain: String,
        change: ChangeRecord,
    },
    Update {
        domain: String,
        record_id: u64,
        change: ChangeRecord,
    },
    Delete {
        domain: String,
        record_id: u64,
    },
}

/// A DnsClient with canned responses that records every call
pub struct MockDnsClient {
    domains: Vec<Domain>,
    records: Vec<Record>,
    read_error: Option<String>,
    write_error: Option<String>,
    calls: Mutex<Vec<ClientCall>>,
}

impl MockDnsClient {
    pub fn new() -> Self {
        Self {
            domains: Vec::new(),
            records: Vec::new(),
            read_error: None,
            write_error: None,
            calls: Mutex::new(Vec::new()),
        }
    }

    /// Records returned by `list_records` (for any domain)
    pub fn with_records(mut self, records: Vec<Record>) -> Self {
        self.records = records;
        self
    }

    /// Domains returned by `list_domains`
    pub fn with_domains(mut self, names: &[&str]) -> Self {
        self.domains = names
            .iter()
            .enumerate()
            .map(|(i, name)| Domain {
                id: i as u64 + 1,
                name: name.to_string(),
            })
            .collect();
        self
    }

    /// Make `list_domains` and `list_records` fail
    pub fn failing_reads(mut self, message: &str) -> Self {
        self.read_error = Some(message.to_string());
        self
    }

    /// Make create/update/delete fail
    pub fn failing_writes(mut self, message: &str) -> Self {
        self.write_error = Some(message.to_string());
        self
    }

    /// All calls received so far
    pub fn calls(&self) -> Vec<ClientCall> {
        self.calls.lock().unwrap().clone()
    }

    /// Calls that would have changed records
    pub fn write_calls(&self) -> Vec<ClientCall> {
        self.calls()
            .into_iter()
            .filter(|call| {
                !matches!(call, ClientCall::ListDomains | ClientCall::ListRecords { .. })
            })
            .collect()
    }

    fn record(&self, call: ClientCall) {
        self.calls.lock().unwrap().push(call);
    }

    fn read_result(&self) -> Result<()> {
        match &self.read_error {
            Some(message) => Err(Error::provider("mock", message.clone())),
            None => Ok(()),
        }
    }

    fn write_result(&self) -> Result<()> {
        match &self.write_error {
            Some(message) => Err(Error::provider("mock", message.clone())),
            None => Ok(()),
        }
    }
}

#[async_trait::async_trait]
impl DnsClient for MockDnsClient {
    async fn list_domains(&self) -> Result<Vec<Domain>> {
        self.record(ClientCall::ListDomains);
        self.read_result()?;
        Ok(self.domains.clone())
    }

    async fn list_records(&self, domain: &str) -> Result<Vec<Record>> {
        self.record(ClientCall::ListRecords {
            domain: domain.to_string(),
        });
        self.read_result()?;
        Ok(self.records.clone())
    }

    async fn create_record(&self, domain: &str, change: &ChangeRecord) -> Result<u64> {
        self.record(ClientCall::Create {
            domain: domain.to_string(),
            change: change.clone(),
        });
        self.write_result()?;
        Ok(1000)
    }

    async fn update_record(&self, domain: &str, record_id: u64, change: &ChangeRecord) -> Result<u64> {
        self.record(ClientCall::Update {
            domain: domain.to_string(),
            record_id,
            change: change.clone(),
        });
        self.write_result()?;
        Ok(record_id)
    }

    async fn delete_record(&self, domain: &str, record_id: u64) -> Result<()> {
        self.record(ClientCall::Delete {
            domain: domain.to_string(),
            record_id,
        });
        self.write_result()
    }

    fn provider_name(&self) -> &'static str {
        "mock"
    }
}

/// What [`StubLocator::get_subdomain_record`] answers
pub enum Lookup {
    Found(Record),
    NotFound,
    Fails(String),
}

/// A RecordLocator with a fixed answer for subdomain lookups
pub struct StubLocator {
    lookup: Lookup,
    requested: Mutex<Vec<(String, String, RecordType)>>,
}

impl StubLocator {
    pub fn found(record: Record) -> Self {
        Self::with(Lookup::Found(record))
    }

    pub fn not_found() -> Self {
        Self::with(Lookup::NotFound)
    }

    pub fn failing(message: &str) -> Self {
        Self::with(Lookup::Fails(message.to_string()))
    }

    fn with(lookup: Lookup) -> Self {
        Self {
            lookup,
            requested: Mutex::new(Vec::new()),
        }
    }

    /// (domain, subdomain, type) of every lookup so far
    pub fn requested(&self) -> Vec<(String, String, RecordType)> {
        self.requested.lock().unwrap().clone()
    }
}

#[async_trait::async_trait]
impl RecordLocator for StubLocator {
    async fn list_domain_names(&self) -> Result<Vec<String>> {
        Ok(Vec::new())
    }

    async fn list_domain_records(&self, _domain: &str) -> Result<Vec<Record>> {
        Ok(Vec::new())
    }

    async fn get_subdomain_record(
        &self,
        domain: &str,
        subdomain: &str,
        record_type: RecordType,
    ) -> Result<Record> {
        self.requested
            .lock()
            .unwrap()
            .push((domain.to_string(), subdomain.to_string(), record_type));

        match &self.lookup {
            Lookup::Found(record) => Ok(record.clone()),
            Lookup::NotFound => Err(Error::not_found(format!("{subdomain}.{domain}"))),
            Lookup::Fails(message) => Err(Error::provider("mock", message.clone())),
        }
    }

    async fn list_subdomain_records(&self, _domain: &str, _subdomain: &str) -> Result<Vec<Record>> {
        Ok(Vec::new())
    }
}

/// Shorthand for a record fixture
pub fn record(id: u64, name: &str, record_type: &str, content: &str, ttl: u32) -> Record {
    Record {
        id,
        name: name.to_string(),
        content: content.to_string(),
        record_type: record_type.to_string(),
        ttl,
    }
}
