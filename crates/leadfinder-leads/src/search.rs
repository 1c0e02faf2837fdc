//! Rules for running a single search: scan gating, radius limits, result
//! filtering, and the per-search summary.

use std::collections::HashSet;

use leadfinder_core::BusinessRecord;

use crate::classify::has_independent_website;
use crate::error::LeadsError;
use crate::scans::{ScanCounter, ScanStorage};
use crate::store::LeadStore;

const METERS_PER_MILE: f64 = 1609.34;

pub const DEFAULT_RADIUS_MILES: f64 = 5.0;
pub const MAX_RADIUS_MILES: f64 = 10.0;

/// Upper bound on place-details lookups per search.
pub const MAX_PLACES_TO_CHECK: usize = 15;

#[must_use]
pub fn miles_to_meters(miles: f64) -> f64 {
    miles * METERS_PER_MILE
}

#[must_use]
pub fn meters_to_miles(meters: f64) -> f64 {
    meters / METERS_PER_MILE
}

/// Optional narrowing applied to search results.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct SearchFilters {
    pub require_phone: bool,
    /// Minimum star rating; `0.0` disables the filter.
    pub min_rating: f64,
}

/// Reasons a search is not started.
#[derive(Debug, thiserror::Error)]
pub enum SearchRefused {
    #[error("You have used all of your scans. Thank you for trying Local Lead Finder!")]
    OutOfScans,

    #[error("Please enter a business category (e.g. plumbers, restaurants).")]
    MissingKeyword,

    #[error(transparent)]
    Storage(#[from] LeadsError),
}

/// An accepted search, with one scan already charged.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchPlan {
    pub keyword: String,
    pub radius_meters: f64,
    /// `true` when the requested radius exceeded the maximum.
    pub radius_clamped: bool,
}

/// Validate a search request and charge one scan for it.
///
/// Checks run in order: remaining scans, keyword, radius. The scan is only
/// consumed once every check has passed.
///
/// # Errors
///
/// Returns [`SearchRefused::OutOfScans`] when the allowance is used up,
/// [`SearchRefused::MissingKeyword`] for a blank keyword, and
/// [`SearchRefused::Storage`] when the new count cannot be persisted.
pub fn begin_search<S: ScanStorage>(
    counter: &mut ScanCounter<S>,
    keyword: &str,
    radius_meters: f64,
) -> Result<SearchPlan, SearchRefused> {
    if counter.is_exhausted() {
        return Err(SearchRefused::OutOfScans);
    }

    let keyword = keyword.trim();
    if keyword.is_empty() {
        return Err(SearchRefused::MissingKeyword);
    }

    let max_radius = miles_to_meters(MAX_RADIUS_MILES);
    let radius_clamped = radius_meters > max_radius;
    let radius_meters = radius_meters.min(max_radius);

    if !counter.consume()? {
        return Err(SearchRefused::OutOfScans);
    }

    tracing::info!(
        keyword,
        radius_miles = meters_to_miles(radius_meters),
        radius_clamped,
        remaining = counter.remaining(),
        "search started"
    );

    Ok(SearchPlan {
        keyword: keyword.to_string(),
        radius_meters,
        radius_clamped,
    })
}

/// What happened to a place-details record handed to a [`SearchSession`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Disposition {
    /// Surfaced as a result and newly stored as a lead.
    Added,
    /// Surfaced as a result; the lead was already stored.
    Duplicate,
    FilteredNoPhone,
    FilteredHasWebsite,
}

/// Per-search state: ids already seen and result counts.
#[derive(Debug, Default)]
pub struct SearchSession {
    filters: SearchFilters,
    seen_ids: HashSet<String>,
    results: usize,
}

impl SearchSession {
    #[must_use]
    pub fn new(filters: SearchFilters) -> Self {
        Self {
            filters,
            ..Self::default()
        }
    }

    /// Choose which nearby-search results deserve a details lookup.
    ///
    /// Drops results under the minimum rating (unrated results pass), results
    /// without an external id, and ids already seen in this search, then keeps
    /// at most [`MAX_PLACES_TO_CHECK`].
    pub fn select_candidates(&mut self, nearby: Vec<BusinessRecord>) -> Vec<BusinessRecord> {
        let found = nearby.len();
        let mut selected = Vec::new();

        for place in nearby {
            if self.filters.min_rating > 0.0
                && place.rating.is_some_and(|r| r < self.filters.min_rating)
            {
                continue;
            }
            let Some(id) = place.external_id.as_deref() else {
                continue;
            };
            if !self.seen_ids.insert(id.to_string()) {
                continue;
            }
            selected.push(place);
        }

        let eligible = selected.len();
        selected.truncate(MAX_PLACES_TO_CHECK);
        tracing::debug!(found, eligible, checking = selected.len(), "selected candidates");
        selected
    }

    /// Apply the result filters to a details record and store it if it passes.
    pub fn accept_details(&mut self, record: &BusinessRecord, store: &mut LeadStore) -> Disposition {
        if self.filters.require_phone && !record.has_phone() {
            tracing::debug!(name = ?record.name, "filtered: no phone");
            return Disposition::FilteredNoPhone;
        }

        if has_independent_website(record.website_url.as_deref()) {
            tracing::debug!(name = ?record.name, "filtered: has website");
            return Disposition::FilteredHasWebsite;
        }

        self.results += 1;

        if store.add_lead(record) {
            Disposition::Added
        } else {
            Disposition::Duplicate
        }
    }

    #[must_use]
    pub fn results(&self) -> usize {
        self.results
    }

    /// Results without an independent website.
    ///
    /// Equal to [`results`](Self::results): records with their own site are
    /// filtered out before they count as results.
    #[must_use]
    pub fn no_real_website(&self) -> usize {
        self.results
    }

    /// One-line summary of this search's results.
    #[must_use]
    pub fn summary(&self) -> String {
        if self.results == 0 {
            return "No businesses found for this search.".to_string();
        }

        format!(
            "Found {} businesses • {} with no real website.",
            self.results,
            self.no_real_website()
        )
    }
}

#[cfg(test)]
#[path = "search_test.rs"]
mod tests;
