
use std::path::PathBuf;

use url::Url;

use crate::error::{MirrorError, MirrorResult};

/// Path of the WebDAV mount inside a Nextcloud instance.
const WEBDAV_MOUNT: &str = "/remote.php/webdav";

/// Path markers identifying the browser-facing files app, in precedence order.
const FILES_APP_MARKERS: [&str; 2] = ["/index.php/apps/files", "/apps/files"];

/// A share URL resolved to its WebDAV endpoint and traversal root.
///
/// Both values are derived once per input URL and are immutable thereafter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedShare {
    /// Base URL of the WebDAV service. Never carries a query string.
    pub endpoint: String,
    /// Path inside the WebDAV namespace to start the traversal from.
    ///
    /// `/` or `.` for a whole-namespace share, otherwise the directory or
    /// file the share points at.
    pub root: PathBuf,
}

/// Resolve a Nextcloud share URL to the WebDAV endpoint serving it and the
/// root path to mirror.
///
/// Two URL shapes are supported:
///
/// - browser links to the files app, e.g.
///   `https://host/index.php/apps/files?dir=/Documents` (or the shorter
///   `/apps/files` form): the `dir` query parameter becomes the root,
///   lexically cleaned, defaulting to `.` when absent;
/// - direct WebDAV URLs, e.g. `https://host/remote.php/webdav/Documents`:
///   everything after the mount becomes the root, unchanged. The mount must
///   not sit at the very start of the path, since a Nextcloud instance is
///   always served under some host-relative prefix.
///
/// Anything else fails with [`MirrorError::UnsupportedUrl`].
pub fn resolve(raw: &str) -> MirrorResult<ResolvedShare> {
    let mut url = Url::parse(raw)?;
    let path = url.path().to_string();

    if let Some(i) = FILES_APP_MARKERS.iter().find_map(|marker| path.find(marker)) {
        let dir = url
            .query_pairs()
            .find(|(key, _)| key == "dir")
            .map(|(_, value)| value.into_owned())
            .unwrap_or_default();

        url.set_query(None);
        url.set_path(&format!("{}{}", &path[..i], WEBDAV_MOUNT));
        debug!("resolved files-app url to {url}");

        return Ok(ResolvedShare {
            endpoint: url.to_string(),
            root: PathBuf::from(clean(&dir)),
        });
    }

    match path.find(WEBDAV_MOUNT) {
        // a path starting with the mount has no host-relative prefix
        Some(i) if i > 0 => {
            let mount_end = i + WEBDAV_MOUNT.len();
            let root = path[mount_end..].to_string();

            url.set_query(None);
            url.set_path(&path[..mount_end]);
            debug!("resolved webdav url to {url}");

            Ok(ResolvedShare {
                endpoint: url.to_string(),
                root: if root.is_empty() {
                    PathBuf::from("/")
                } else {
                    PathBuf::from(root)
                },
            })
        }
        _ => Err(MirrorError::UnsupportedUrl(raw.to_string())),
    }
}

/// Lexically normalize a slash-separated path: collapse duplicate slashes
/// and resolve `.` and `..` segments.
///
/// An empty path cleans to `.`, so an absent `dir` parameter maps to the
/// whole-namespace root.
fn clean(path: &str) -> String {
    let rooted = path.starts_with('/');
    let mut segments: Vec<&str> = Vec::new();

    for segment in path.split('/') {
        match segment {
            "" | "." => {}
            ".." => {
                if segments.last().is_some_and(|last| *last != "..") {
                    segments.pop();
                } else if !rooted {
                    segments.push("..");
                }
            }
            segment => segments.push(segment),
        }
    }

    let joined = segments.join("/");
    match (rooted, joined.is_empty()) {
        (true, true) => "/".to_string(),
        (true, false) => format!("/{joined}"),
        (false, true) => ".".to_string(),
        (false, false) => joined,
    }
}
