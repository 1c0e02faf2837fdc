//! In-memory, insertion-ordered collection of distinct leads.

use std::collections::HashSet;

use leadfinder_core::BusinessRecord;

use crate::export::build_csv;
use crate::lead::{identity_key, Lead};

/// Accumulates distinct [`Lead`]s across searches.
///
/// The first record seen for an identity key wins; later records with the same
/// key are dropped. Nothing is removed until [`LeadStore::clear`].
#[derive(Debug, Default)]
pub struct LeadStore {
    leads: Vec<Lead>,
    keys: HashSet<String>,
}

impl LeadStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Normalize and store a record unless its identity key is already present.
    ///
    /// Returns `true` when a new lead was inserted.
    pub fn add_lead(&mut self, record: &BusinessRecord) -> bool {
        let key = identity_key(record);
        if key.is_empty() {
            return false;
        }

        if self.keys.contains(&key) {
            tracing::debug!(identity_key = %key, name = ?record.name, "skipping duplicate lead");
            return false;
        }

        let lead = Lead::with_identity(key.clone(), record);
        self.keys.insert(key);
        tracing::debug!(name = %lead.name, total = self.leads.len() + 1, "added lead");
        self.leads.push(lead);
        true
    }

    /// Remove every stored lead.
    pub fn clear(&mut self) {
        self.leads.clear();
        self.keys.clear();
    }

    #[must_use]
    pub fn count(&self) -> usize {
        self.leads.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.leads.is_empty()
    }

    /// Stored leads in insertion order.
    pub fn leads(&self) -> impl Iterator<Item = &Lead> {
        self.leads.iter()
    }

    /// Serialize all leads to the spreadsheet CSV format.
    ///
    /// An empty store yields only the header row.
    #[must_use]
    pub fn export_delimited(&self) -> String {
        build_csv(&self.leads)
    }
}
