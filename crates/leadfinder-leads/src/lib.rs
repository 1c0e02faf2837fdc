pub mod classify;
pub mod error;
pub mod export;
pub mod lead;
pub mod platforms;
pub mod records;
pub mod scans;
pub mod search;
pub mod store;

pub use classify::{classify, has_independent_website, WebsiteClass};
pub use error::LeadsError;
pub use export::{prepare_export, ExportError, ExportFile};
pub use lead::Lead;
pub use platforms::other_platforms;
pub use records::parse_records;
pub use scans::{FileStorage, MemoryStorage, ScanCounter, ScanStorage};
pub use search::{begin_search, SearchFilters, SearchPlan, SearchRefused, SearchSession};
pub use store::LeadStore;
