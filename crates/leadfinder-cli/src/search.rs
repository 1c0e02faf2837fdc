//! `search` command: runs searches over place-details files and exports leads.

use std::path::{Path, PathBuf};

use leadfinder_leads::search::miles_to_meters;
use leadfinder_leads::{
    begin_search, parse_records, prepare_export, ExportError, LeadStore, ScanCounter,
    ScanStorage, SearchFilters, SearchRefused, SearchSession,
};

pub(crate) struct SearchArgs<'a> {
    pub keyword: &'a str,
    pub inputs: &'a [PathBuf],
    pub radius_miles: f64,
    pub min_rating: f64,
    pub require_phone: bool,
    pub output: Option<&'a Path>,
}

/// Run one search per input file, accumulating leads into a single store.
///
/// Each input charges one scan. When scans run out, the remaining inputs are
/// skipped and whatever was collected so far is still exported.
///
/// # Errors
///
/// Returns an error if an input cannot be read or parsed, the scan count
/// cannot be persisted, or the CSV cannot be written.
pub(crate) fn run_search<S: ScanStorage>(
    counter: &mut ScanCounter<S>,
    args: &SearchArgs<'_>,
) -> anyhow::Result<LeadStore> {
    let filters = SearchFilters {
        require_phone: args.require_phone,
        min_rating: args.min_rating,
    };
    let mut store = LeadStore::new();

    for input in args.inputs {
        let plan = match begin_search(counter, args.keyword, miles_to_meters(args.radius_miles)) {
            Ok(plan) => plan,
            Err(refused @ (SearchRefused::OutOfScans | SearchRefused::MissingKeyword)) => {
                println!("{refused}");
                break;
            }
            Err(SearchRefused::Storage(e)) => return Err(e.into()),
        };
        if plan.radius_clamped {
            println!("Maximum radius is 10 miles. Radius has been adjusted.");
        }

        let content = std::fs::read_to_string(input)
            .map_err(|e| anyhow::anyhow!("failed to read {}: {e}", input.display()))?;
        let records = parse_records(&content, &input.display().to_string())?;

        let mut session = SearchSession::new(filters);
        for candidate in session.select_candidates(records) {
            session.accept_details(&candidate, &mut store);
        }

        println!("{}: {}", input.display(), session.summary());
    }

    println!("{} unique leads • {}", store.count(), counter.label());

    if let Some(path) = args.output {
        write_export(&store, path)?;
    }

    Ok(store)
}

fn write_export(store: &LeadStore, path: &Path) -> anyhow::Result<()> {
    let filename = path
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or("leads.csv");

    match prepare_export(store, Some(filename)) {
        Ok(file) => {
            std::fs::write(path, &file.body)
                .map_err(|e| anyhow::anyhow!("failed to write {}: {e}", path.display()))?;
            tracing::info!(path = %path.display(), leads = file.lead_count, "wrote export");
            println!("{}", file.success_message());
        }
        Err(ExportError::NoLeads) => {
            tracing::warn!("export skipped: no leads");
            println!("{}", ExportError::NoLeads);
        }
    }

    Ok(())
}
