//! Errors that abort the pipeline immediately rather than being collected
//! (spec.md §7: "`Io` and `Oom` are fatal immediately").

use std::path::PathBuf;

/// A fatal, non-recoverable failure. Unlike [`crate::Diagnostic`], these
/// never accumulate in a [`crate::Queue`] — the stage that hits one returns
/// `Err` directly and the pipeline unwinds.
#[derive(thiserror::Error, Debug)]
pub enum FatalError {
    #[error("failed to read `{path}`: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("allocation failure")]
    Oom,
}
