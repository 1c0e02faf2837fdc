//! Normalization of raw [`BusinessRecord`]s into exportable [`Lead`]s.

use leadfinder_core::BusinessRecord;
use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};

use crate::platforms::other_platforms;

const MAPS_SEARCH_BASE: &str = "https://www.google.com/maps/search/?api=1&query=";

/// Characters escaped by JavaScript's `encodeURIComponent`.
const URI_COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

/// A deduplicated business retained for export.
///
/// All display fields are plain strings; absent source values become `""`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Lead {
    pub identity_key: String,
    pub name: String,
    pub address: String,
    pub phone: String,
    pub rating: String,
    pub review_count: String,
    /// Comma-separated platform labels found in the listed website.
    pub other_platforms: String,
    pub maps_search_url: String,
}

impl Lead {
    /// Build a lead from a raw record, computing its identity key.
    #[must_use]
    pub fn from_record(record: &BusinessRecord) -> Self {
        Self::with_identity(identity_key(record), record)
    }

    pub(crate) fn with_identity(identity_key: String, record: &BusinessRecord) -> Self {
        let name = record.name.clone().unwrap_or_default();
        let address = record.address.clone().unwrap_or_default();
        let maps_search_url = maps_search_url(&name, &address);

        Self {
            identity_key,
            phone: record.phone.clone().unwrap_or_default(),
            rating: record.rating.map(|r| r.to_string()).unwrap_or_default(),
            review_count: record
                .review_count
                .map(|n| n.to_string())
                .unwrap_or_default(),
            other_platforms: other_platforms(record.website_url.as_deref()),
            maps_search_url,
            name,
            address,
        }
    }
}

/// Compute the deduplication key for a record.
///
/// Uses the directory's external id when present, otherwise
/// `trim(name)::trim(address)`. A record with neither gets a random token so
/// that it is kept but never collides with another record.
#[must_use]
pub fn identity_key(record: &BusinessRecord) -> String {
    if let Some(id) = record.external_id.as_deref().filter(|id| !id.is_empty()) {
        return id.to_string();
    }

    let name = record.name.as_deref().unwrap_or("").trim();
    let address = record.address.as_deref().unwrap_or("").trim();
    if name.is_empty() && address.is_empty() {
        return format!("anon-{}", uuid::Uuid::new_v4());
    }

    format!("{name}::{address}")
}

/// Build a text-search deep link for a business.
///
/// The query is the non-empty parts of `name` and `address` joined by a space.
/// Returns `""` when both are empty.
#[must_use]
pub fn maps_search_url(name: &str, address: &str) -> String {
    let query = [name, address]
        .into_iter()
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join(" ");

    if query.is_empty() {
        return String::new();
    }

    format!(
        "{MAPS_SEARCH_BASE}{}",
        utf8_percent_encode(&query, URI_COMPONENT)
    )
}
