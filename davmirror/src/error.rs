use std::path::PathBuf;

use remotefs::RemoteError;
use thiserror::Error;

pub type MirrorResult<T> = Result<T, MirrorError>;

/// Errors raised while resolving a share URL or mirroring a remote tree.
///
/// There is no retry policy anywhere: every error aborts the traversal of
/// the current share immediately.
#[derive(Debug, Error)]
pub enum MirrorError {
    /// The input could not be parsed as a URL at all.
    #[error("invalid url: {0}")]
    InvalidUrl(#[from] url::ParseError),
    /// The URL is well-formed but matches neither known share-link shape.
    /// Carries the original URL for diagnostics.
    #[error("unsupported url: {0}")]
    UnsupportedUrl(String),
    /// A stat, list or read-stream call against the remote failed.
    #[error("remote error: {0}")]
    Remote(#[from] RemoteError),
    /// Creating a directory or opening/writing/closing a local file failed.
    #[error("local i/o error: {0}")]
    LocalIo(#[from] std::io::Error),
    /// A remote path could not be rebased against the share root.
    #[error("remote path {path} is not under {base}")]
    Rebase { base: PathBuf, path: PathBuf },
}
