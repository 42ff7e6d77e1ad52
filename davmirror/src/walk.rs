
use std::path::Path;

use remotefs::{File, RemoteFs};

use crate::error::MirrorResult;

/// Walk the remote tree rooted at `path` depth-first, invoking `visit` for
/// every non-directory entry.
///
/// The root is stated once; children are recursed into with the metadata
/// already returned by the directory listing, so no extra stat call is made
/// per entry. Entries are visited in the order the remote returns them.
///
/// The remote client is passed back to `visit` so the visitor can issue
/// further calls, such as opening a read stream, on the same connection.
///
/// A listed child whose path equals the directory being listed is skipped,
/// so transports that echo the collection itself in its listing do not
/// recurse forever.
///
/// The first error from a stat call, a listing or the visitor itself stops
/// the walk and propagates; there is no partial-failure aggregation.
pub fn walk<F>(remote: &mut dyn RemoteFs, path: &Path, visit: &mut F) -> MirrorResult<()>
where
    F: FnMut(&mut dyn RemoteFs, &File) -> MirrorResult<()>,
{
    let root = remote.stat(path)?;

    walk_entry(remote, &root, visit)
}

fn walk_entry<F>(remote: &mut dyn RemoteFs, entry: &File, visit: &mut F) -> MirrorResult<()>
where
    F: FnMut(&mut dyn RemoteFs, &File) -> MirrorResult<()>,
{
    if !entry.is_dir() {
        return visit(remote, entry);
    }

    debug!("listing {}", entry.path.display());
    let children = remote.list_dir(&entry.path)?;

    for child in &children {
        // some transports echo the listed collection among its own children
        if child.path == entry.path {
            continue;
        }
        walk_entry(remote, child, visit)?;
    }

    Ok(())
}
