#![crate_name = "davmirror"]
#![crate_type = "lib"]

//! # davmirror
//!
//! Mirror a remote WebDAV directory tree, such as a Nextcloud share, to
//! local disk, preserving the relative structure.
//!
//! ## Get started
//!
//! First of all you need to add **davmirror** to your project dependencies:
//!
//! ```toml
//! davmirror = "^0.1.0"
//! ```
//!
//! Resolve a share URL with [`resolve`], then hand the resolved root and a
//! [`Layout`] to [`mirror`] together with any [`RemoteFs`] client pointed at
//! the resolved endpoint:
//!
//! ```rust,no_run
//! use remotefs_webdav::WebDAVFs;
//!
//! # fn main() -> Result<(), davmirror::MirrorError> {
//! let share = davmirror::resolve("https://cloud.example.com/index.php/apps/files?dir=/Documents")?;
//! let mut remote = WebDAVFs::new(&share.endpoint, "alice", "secret");
//! let layout = davmirror::Layout::new("downloads".as_ref(), "alice", &share.root);
//! davmirror::mirror(&mut remote, &share.root, &layout)?;
//! # Ok(())
//! # }
//! ```
//!
//! these features are supported:
//!
//! - `no-log`: disable logging. By default, this library will log via the `log` crate.
//!

#[macro_use]
extern crate log;

mod error;
mod layout;
mod share;
mod transfer;
mod walk;

use std::path::Path;

use remotefs::RemoteFs;

pub use self::error::{MirrorError, MirrorResult};
pub use self::layout::Layout;
pub use self::share::{resolve, ResolvedShare};
pub use self::transfer::download;
pub use self::walk::walk;

/// Mirror the remote tree rooted at `root` to local disk.
///
/// Every non-directory entry below `root` is downloaded, one at a time in
/// listing order, to the destination computed by `layout`. The first error
/// from the remote, the local filesystem or the path mapping aborts the
/// mirror; files downloaded before the failure are left in place.
pub fn mirror(remote: &mut dyn RemoteFs, root: &Path, layout: &Layout) -> MirrorResult<()> {
    walk(remote, root, &mut |remote, file| {
        let dest = layout.local_path(&file.path)?;
        info!("{} -> {}", file.path.display(), dest.display());
        transfer::download(remote, &file.path, &dest).map(|_| ())
    })
}
