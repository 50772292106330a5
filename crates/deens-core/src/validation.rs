//! Input validation shared by the record editor and credentials
//!
//! These checks only keep garbage away from the provider; they are not a
//! full RFC 1035 validation.

use regex::Regex;
use std::net::IpAddr;
use std::sync::LazyLock;

use crate::traits::RecordType;

/// Maximum length of a domain name
pub const MAX_DOMAIN_LEN: usize = 255;

/// Maximum length of a subdomain name (all labels and dots)
pub const MAX_SUBDOMAIN_LEN: usize = 253;

/// Maximum length of a single label
pub const MAX_LABEL_LEN: usize = 63;

/// One subdomain label: alphanumeric at both ends, hyphens allowed inside
static LABEL_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?:[A-Za-z0-9][A-Za-z0-9\-]{0,61}[A-Za-z0-9]|[A-Za-z0-9])$")
        .expect("label pattern is a valid regex")
});

/// True if the text is empty or contains only whitespace
pub fn is_blank(text: &str) -> bool {
    text.trim().is_empty()
}

/// True if the domain name is non-blank and at most 255 characters long
pub fn is_valid_domain(domain: &str) -> bool {
    domain.len() <= MAX_DOMAIN_LEN && !is_blank(domain)
}

/// True if the subdomain name is acceptable
///
/// The empty string stands for the bare domain and is valid. Otherwise every
/// dot-separated label must be 1-63 characters of `[A-Za-z0-9-]` without a
/// leading or trailing hyphen, and the whole name at most 253 characters.
pub fn is_valid_subdomain(subdomain: &str) -> bool {
    if subdomain.is_empty() {
        return true;
    }

    if subdomain.len() > MAX_SUBDOMAIN_LEN {
        return false;
    }

    subdomain
        .split('.')
        .all(|label| label.len() <= MAX_LABEL_LEN && LABEL_PATTERN.is_match(label))
}

/// The record type matching the address family of `ip`
pub fn record_type_for_ip(ip: IpAddr) -> RecordType {
    RecordType::for_ip(ip)
}

/// The textual form of `ip` as stored in record content
///
/// IPv4-mapped IPv6 addresses are written in dotted IPv4 form so the content
/// agrees with the derived "A" record type.
pub fn address_string(ip: IpAddr) -> String {
    ip.to_canonical().to_string()
}

/// Fully qualified name for log and error messages
pub(crate) fn fqdn(subdomain: &str, domain: &str) -> String {
    if subdomain.is_empty() {
        domain.to_string()
    } else {
        format!("{subdomain}.{domain}")
    }
}
