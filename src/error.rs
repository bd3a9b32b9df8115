use thiserror::Error;

/// Failure of a single request against the catalog service.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("request to {url} failed: {source}")]
    Transport {
        url:    String,
        #[source]
        source: reqwest::Error,
    },
    #[error("{url} answered with status {status}")]
    Status { url: String, status: u16 },
    #[error("malformed response from {url}: {message}")]
    Decode { url: String, message: String },
}

impl FetchError {
    /// HTTP status of the response, if one was received.
    pub fn status(&self) -> Option<u16> {
        match self {
            FetchError::Transport { source, .. } => source.status().map(|s| s.as_u16()),
            FetchError::Status { status, .. } => Some(*status),
            FetchError::Decode { .. } => None,
        }
    }

    pub fn is_not_found(&self) -> bool {
        self.status() == Some(404)
    }
}

#[derive(Debug, Error)]
pub enum ResolutionError {
    /// Neither the work nor the book endpoint knows the identifier.
    #[error("no work or book found for {id}")]
    NotFound { id: String },
    #[error("book refers to work {work_key}, which could not be loaded: {source}")]
    ParentWork {
        work_key: String,
        #[source]
        source:   FetchError,
    },
}

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("could not write storage slot {slot}: {source}")]
    Io {
        slot:   String,
        #[source]
        source: std::io::Error,
    },
    #[error("could not serialize favourites: {0}")]
    Encode(#[from] serde_json::Error),
}
