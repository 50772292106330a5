// # DNSimple DNS Client
//
// This crate provides the DNSimple implementation of `DnsClient` for deens.
//
// ## Behavior
//
// - One HTTP request per trait call, no retries and no caching
// - HTTP timeout of 30 seconds
// - Status mapping: 401/403 → Authentication, 429 → RateLimited,
//   anything else unsuccessful → Provider (404 included)
// - Dry-run mode performs reads but only logs writes
//
// ## Security Requirements
//
// - API token NEVER appears in logs or Debug output
// - Credentials are validated before the client is built
//
// ## API Reference
//
// DNSimple API v1, authenticated with `X-DNSimple-Token: <email>:<token>`:
//
// - List domains: GET `/domains`
// - List records: GET `/domains/:domain/records`
// - Create record: POST `/domains/:domain/records`
// - Update record: PUT `/domains/:domain/records/:id`
// - Delete record: DELETE `/domains/:domain/records/:id`

use async_trait::async_trait;
use deens_core::config::ProviderConfig;
use deens_core::traits::{ChangeRecord, DnsClient, DnsClientFactory, Domain, Record};
use deens_core::{ApiCredentials, ClientRegistry, Error, Result};
use reqwest::{Method, RequestBuilder, Response, StatusCode, Url};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// DNSimple API v1 base URL
pub const DEFAULT_API_BASE: &str = "https://api.dnsimple.com/v1";

/// Default HTTP timeout for API requests (30 seconds)
const DEFAULT_HTTP_TIMEOUT: Duration = Duration::from_secs(30);

/// Authentication header used by API v1
const TOKEN_HEADER: &str = "X-DNSimple-Token";

const PROVIDER_NAME: &str = "dnsimple";

/// `{"domain": {...}}` list element
#[derive(Deserialize)]
struct DomainEnvelope {
    domain: Domain,
}

/// `{"record": {...}}` list element and create/update response
#[derive(Deserialize)]
struct RecordEnvelope {
    record: Record,
}

/// `{"record": {...}}` create/update request body
#[derive(Serialize)]
struct ChangeEnvelope<'a> {
    record: &'a ChangeRecord,
}

/// DNSimple DNS client
///
/// # Dry-Run Mode
///
/// When `dry_run` is true, the client will:
/// - Perform all GET requests (domains, records)
/// - Log the intended POST/PUT/DELETE
/// - **NOT** modify any record
pub struct DnsimpleClient {
    /// Account e-mail and API token
    /// ⚠️ NEVER log the token
    credentials: ApiCredentials,

    /// API base URL
    base_url: Url,

    /// HTTP client for API requests
    client: reqwest::Client,

    /// Dry-run mode: if true, perform reads but skip writes
    dry_run: bool,
}

// Custom Debug implementation that hides the API token
impl std::fmt::Debug for DnsimpleClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DnsimpleClient")
            .field("email", &self.credentials.email())
            .field("token", &"<REDACTED>")
            .field("base_url", &self.base_url)
            .field("dry_run", &self.dry_run)
            .finish()
    }
}

impl DnsimpleClient {
    /// Create a new DNSimple client
    ///
    /// # Parameters
    ///
    /// - `credentials`: Account e-mail address and API token
    /// - `base_url`: API endpoint, [`DEFAULT_API_BASE`] when `None`
    /// - `dry_run`: If true, perform reads but skip writes
    pub fn new(credentials: ApiCredentials, base_url: Option<String>, dry_run: bool) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(DEFAULT_HTTP_TIMEOUT)
            .build()
            .map_err(|e| Error::http(format!("Unable to create DNSimple client: {e}")))?;

        let base_url = base_url.unwrap_or_else(|| DEFAULT_API_BASE.to_string());
        let base_url = Url::parse(&base_url)
            .map_err(|e| Error::config(format!("Invalid DNSimple API URL {base_url:?}: {e}")))?;
        if base_url.cannot_be_a_base() {
            return Err(Error::config(format!(
                "DNSimple API URL cannot have path segments: {base_url}"
            )));
        }

        Ok(Self {
            credentials,
            base_url,
            client,
            dry_run,
        })
    }

    /// API base URL in use
    pub fn base_url(&self) -> &str {
        self.base_url.as_str()
    }

    /// True if writes are only logged
    pub fn is_dry_run(&self) -> bool {
        self.dry_run
    }

    /// API URL for the given path segments
    ///
    /// Each segment is percent-encoded, so a domain name can never add
    /// path segments, a query or a fragment.
    fn endpoint(&self, segments: &[&str]) -> Result<Url> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| {
                Error::config(format!(
                    "DNSimple API URL cannot have path segments: {}",
                    self.base_url
                ))
            })?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    fn request(&self, method: Method, url: Url) -> RequestBuilder {
        tracing::debug!("{} {}", method, url);

        self.client
            .request(method, url)
            .header(
                TOKEN_HEADER,
                format!("{}:{}", self.credentials.email(), self.credentials.token()),
            )
            .header("Accept", "application/json")
    }

    /// Send a request and turn unsuccessful statuses into errors
    async fn send(&self, request: RequestBuilder, action: &str) -> Result<Response> {
        let response = request
            .send()
            .await
            .map_err(|e| Error::http(format!("{action}: HTTP request failed: {e}")))?;

        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let error_text = response
            .text()
            .await
            .unwrap_or_else(|_| "Unable to read error response".to_string());

        Err(status_error(status, action, &error_text))
    }

    async fn read_json<T: DeserializeOwned>(response: Response, action: &str) -> Result<T> {
        response
            .json()
            .await
            .map_err(|e| Error::provider(PROVIDER_NAME, format!("{action}: failed to parse response: {e}")))
    }
}

/// Map an unsuccessful HTTP status to an error
fn status_error(status: StatusCode, action: &str, body: &str) -> Error {
    match status.as_u16() {
        401 | 403 => Error::auth(format!(
            "{action}: invalid e-mail address or API token. Status: {status}"
        )),
        429 => Error::rate_limited(format!(
            "{action}: rate limit exceeded, retry later. Status: {status}"
        )),
        500..=599 => Error::provider(
            PROVIDER_NAME,
            format!("{action}: DNSimple server error (transient): {status} - {body}"),
        ),
        _ => Error::provider(PROVIDER_NAME, format!("{action}: {status} - {body}")),
    }
}

#[async_trait]
impl DnsClient for DnsimpleClient {
    async fn list_domains(&self) -> Result<Vec<Domain>> {
        let action = "Unable to fetch domains";
        let url = self.endpoint(&["domains"])?;
        let response = self.send(self.request(Method::GET, url), action).await?;
        let domains: Vec<DomainEnvelope> = Self::read_json(response, action).await?;

        tracing::debug!("Fetched {} domains", domains.len());
        Ok(domains.into_iter().map(|d| d.domain).collect())
    }

    async fn list_records(&self, domain: &str) -> Result<Vec<Record>> {
        let action = format!("Unable to fetch DNS records for {domain}");
        let url = self.endpoint(&["domains", domain, "records"])?;
        let response = self.send(self.request(Method::GET, url), &action).await?;
        let records: Vec<RecordEnvelope> = Self::read_json(response, &action).await?;

        tracing::debug!("Fetched {} records for {}", records.len(), domain);
        Ok(records.into_iter().map(|r| r.record).collect())
    }

    async fn create_record(&self, domain: &str, change: &ChangeRecord) -> Result<u64> {
        let url = self.endpoint(&["domains", domain, "records"])?;

        if self.dry_run {
            tracing::warn!(
                "[DRY-RUN] Would POST {} with payload: {}",
                url,
                serde_json::json!({ "record": change })
            );
            return Ok(0);
        }

        let action = format!("Failed to create {} record {:?} in {domain}", change.record_type, change.name);
        let request = self
            .request(Method::POST, url)
            .json(&ChangeEnvelope { record: change });
        let response = self.send(request, &action).await?;
        let created: RecordEnvelope = Self::read_json(response, &action).await?;

        Ok(created.record.id)
    }

    async fn update_record(&self, domain: &str, record_id: u64, change: &ChangeRecord) -> Result<u64> {
        let id = record_id.to_string();
        let url = self.endpoint(&["domains", domain, "records", &id])?;

        if self.dry_run {
            tracing::warn!(
                "[DRY-RUN] Would PUT {} with payload: {}",
                url,
                serde_json::json!({ "record": change })
            );
            return Ok(record_id);
        }

        let action = format!("Failed to update record {record_id} in {domain}");
        let request = self
            .request(Method::PUT, url)
            .json(&ChangeEnvelope { record: change });
        let response = self.send(request, &action).await?;
        let updated: RecordEnvelope = Self::read_json(response, &action).await?;

        Ok(updated.record.id)
    }

    async fn delete_record(&self, domain: &str, record_id: u64) -> Result<()> {
        let id = record_id.to_string();
        let url = self.endpoint(&["domains", domain, "records", &id])?;

        if self.dry_run {
            tracing::warn!("[DRY-RUN] Would DELETE {}", url);
            return Ok(());
        }

        let action = format!("Failed to delete record {record_id} in {domain}");
        self.send(self.request(Method::DELETE, url), &action)
            .await?;

        Ok(())
    }

    fn provider_name(&self) -> &'static str {
        PROVIDER_NAME
    }
}

/// Factory for creating DNSimple clients
pub struct DnsimpleFactory;

impl DnsClientFactory for DnsimpleFactory {
    fn create(&self, config: &ProviderConfig) -> Result<Box<dyn DnsClient>> {
        match config {
            ProviderConfig::Dnsimple {
                email,
                token,
                base_url,
                dry_run,
            } => {
                config.validate()?;
                let credentials = ApiCredentials::new(email.clone(), token.clone())?;

                if *dry_run {
                    tracing::warn!("DNSimple client running in DRY-RUN mode - no changes will be made");
                }

                Ok(Box::new(DnsimpleClient::new(
                    credentials,
                    base_url.clone(),
                    *dry_run,
                )?))
            }
            _ => Err(Error::config("Invalid config for DNSimple provider")),
        }
    }
}

/// Register the DNSimple client with a registry
///
/// # Example
///
/// ```rust
/// use deens_core::ClientRegistry;
///
/// let registry = ClientRegistry::new();
/// deens_provider_dnsimple::register(&registry);
/// assert!(registry.has_provider("dnsimple"));
/// ```
pub fn register(registry: &ClientRegistry) {
    registry.register_factory(PROVIDER_NAME, Box::new(DnsimpleFactory));
}
