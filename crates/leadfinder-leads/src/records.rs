//! Parsing of place-details payloads into [`BusinessRecord`]s.

use leadfinder_core::BusinessRecord;
use serde::Deserialize;

use crate::error::LeadsError;

/// Accepted payload shapes: a bare array, a nearby-search envelope
/// (`{"results": [...]}`), a details envelope (`{"result": {...}}`), or a
/// single record object.
#[derive(Deserialize)]
#[serde(untagged)]
enum RecordsPayload {
    Many(Vec<BusinessRecord>),
    Results { results: Vec<BusinessRecord> },
    Details { result: BusinessRecord },
    One(BusinessRecord),
}

/// Parse place-details JSON into records.
///
/// `context` names the input (usually a file path) for error messages.
///
/// # Errors
///
/// Returns [`LeadsError::Records`] when `json` matches none of the accepted shapes.
pub fn parse_records(json: &str, context: &str) -> Result<Vec<BusinessRecord>, LeadsError> {
    let payload: RecordsPayload =
        serde_json::from_str(json).map_err(|source| LeadsError::Records {
            context: context.to_string(),
            source,
        })?;

    Ok(match payload {
        RecordsPayload::Many(records) | RecordsPayload::Results { results: records } => records,
        RecordsPayload::Details { result } | RecordsPayload::One(result) => vec![result],
    })
}
