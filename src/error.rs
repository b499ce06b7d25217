use std::io;
use std::path::PathBuf;

/// Errors that abort a probe run. Everything else degrades to partial output.
#[derive(Debug, thiserror::Error)]
pub enum ProbeError {
    #[error("unable to read BVH file {path:?}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("unable to write name map to {path:?}")]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("unable to serialize name map")]
    Json(#[from] serde_json::Error),
}
