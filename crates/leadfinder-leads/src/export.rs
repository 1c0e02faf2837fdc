//! CSV serialization of leads and export packaging.

use crate::lead::Lead;
use crate::store::LeadStore;

pub const CSV_HEADER: [&str; 7] = [
    "Name",
    "Address",
    "Phone",
    "Rating",
    "Reviews",
    "Other Platforms",
    "Google Maps",
];

pub const DEFAULT_EXPORT_FILENAME: &str = "leads.csv";
pub const CSV_MIME_TYPE: &str = "text/csv;charset=utf-8";

/// Errors that prevent an export from being offered.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ExportError {
    #[error("No leads to export yet. Run a search first.")]
    NoLeads,
}

/// A ready-to-save export payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportFile {
    pub filename: String,
    pub mime_type: &'static str,
    pub body: String,
    pub lead_count: usize,
}

impl ExportFile {
    /// Confirmation shown after the file has been written.
    #[must_use]
    pub fn success_message(&self) -> String {
        format!(
            "Successfully exported {} unique leads to {}",
            self.lead_count, self.filename
        )
    }
}

/// Package the store's leads for download.
///
/// `filename` defaults to [`DEFAULT_EXPORT_FILENAME`].
///
/// # Errors
///
/// Returns [`ExportError::NoLeads`] when the store is empty.
pub fn prepare_export(store: &LeadStore, filename: Option<&str>) -> Result<ExportFile, ExportError> {
    if store.is_empty() {
        return Err(ExportError::NoLeads);
    }

    Ok(ExportFile {
        filename: filename.unwrap_or(DEFAULT_EXPORT_FILENAME).to_string(),
        mime_type: CSV_MIME_TYPE,
        body: store.export_delimited(),
        lead_count: store.count(),
    })
}

/// Escape a single CSV field.
///
/// Line breaks are normalized to `\n`. Fields containing a double quote, comma,
/// space, or newline are quoted with inner quotes doubled. Quoting on a bare
/// space is wider than RFC 4180 and is kept for compatibility with existing
/// exports.
#[must_use]
pub fn csv_escape(value: &str) -> String {
    let s = value.replace("\r\n", "\n").replace('\r', "\n");
    if s.contains(['"', ',', ' ', '\n']) {
        format!("\"{}\"", s.replace('"', "\"\""))
    } else {
        s
    }
}

/// Spreadsheet formula that renders the maps link as the text "Maps".
fn maps_formula(url: &str) -> String {
    if url.is_empty() {
        String::new()
    } else {
        format!("=HYPERLINK(\"{url}\",\"Maps\")")
    }
}

/// Render leads as CRLF-separated CSV with a header row and no trailing newline.
#[must_use]
pub fn build_csv(leads: &[Lead]) -> String {
    let mut rows = Vec::with_capacity(leads.len() + 1);
    rows.push(CSV_HEADER.join(","));

    for lead in leads {
        let formula = maps_formula(&lead.maps_search_url);
        let fields = [
            lead.name.as_str(),
            lead.address.as_str(),
            lead.phone.as_str(),
            lead.rating.as_str(),
            lead.review_count.as_str(),
            lead.other_platforms.as_str(),
            formula.as_str(),
        ];
        rows.push(
            fields
                .iter()
                .map(|f| csv_escape(f))
                .collect::<Vec<_>>()
                .join(","),
        );
    }

    rows.join("\r\n")
}

#[cfg(test)]
#[path = "export_test.rs"]
mod tests;
