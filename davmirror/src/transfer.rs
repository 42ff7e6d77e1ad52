
use std::fs::{self, File};
use std::io;
use std::path::Path;

use remotefs::{RemoteError, RemoteErrorType, RemoteFs};

use crate::error::MirrorResult;

/// Download a single remote file to `local_path`, returning the number of
/// bytes copied.
///
/// Parent directories are created as needed; an existing destination file is
/// truncated, so re-running a mirror overwrites stale content in place.
///
/// Both the local handle and the remote stream are released on every exit
/// path. When the copy fails, the remote stream is drained before being
/// handed back, so the transport is free to reuse the connection, and the
/// copy error wins over any error from closing the stream.
pub fn download(
    remote: &mut dyn RemoteFs,
    remote_path: &Path,
    local_path: &Path,
) -> MirrorResult<u64> {
    if let Some(parent) = local_path.parent() {
        fs::create_dir_all(parent)?;
    }
    let mut local = File::create(local_path)?;

    match remote.open(remote_path) {
        Ok(mut reader) => {
            let copied = io::copy(&mut reader, &mut local);
            if copied.is_err() {
                // leave no pending body on the wire
                let _ = io::copy(&mut reader, &mut io::sink());
            }
            let closed = remote.on_read(reader);

            let copied = copied?;
            closed?;
            // surface write-back failures that a plain drop would swallow
            local.sync_all()?;

            Ok(copied)
        }
        Err(RemoteError {
            kind: RemoteErrorType::UnsupportedFeature,
            ..
        }) => {
            // transports without stream support transfer into the writer themselves
            debug!("{} does not support streams", remote_path.display());
            Ok(remote.open_file(remote_path, Box::new(local))?)
        }
        Err(err) => Err(err.into()),
    }
}
