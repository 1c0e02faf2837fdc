use thiserror::Error;

#[derive(Debug, Error)]
pub enum LeadsError {
    #[error("storage I/O error at {path}: {source}")]
    StorageIo {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("storage file {path} is not a JSON object of strings: {source}")]
    StorageFormat {
        path: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid record input for {context}: {source}")]
    Records {
        context: String,
        #[source]
        source: serde_json::Error,
    },
}
