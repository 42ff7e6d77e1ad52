
use std::path::{Path, PathBuf};

use crate::error::{MirrorError, MirrorResult};

/// Maps remote paths to local destinations for one resolved share.
///
/// The mapping policy is fixed once per input URL:
///
/// - a whole-namespace share (root `/` or `.`) lands under
///   `output/username/...`, so several shares mirrored into the same output
///   directory cannot collide;
/// - any other share is rebased against the *parent* of its root, so the
///   shared directory's own name becomes the top-level local folder, while
///   a share pointing straight at a single file maps to a bare file in the
///   output directory with no wrapping folder.
#[derive(Debug, Clone)]
pub struct Layout {
    output: PathBuf,
    username: String,
    root: PathBuf,
}

impl Layout {
    pub fn new(output: &Path, username: &str, root: &Path) -> Self {
        Self {
            output: output.to_path_buf(),
            username: username.to_string(),
            root: root.to_path_buf(),
        }
    }

    /// Whether the share root covers the whole WebDAV namespace.
    fn is_whole_namespace(&self) -> bool {
        self.root == Path::new("/") || self.root == Path::new(".")
    }

    /// Compute the local destination for a remote file.
    ///
    /// Fails with [`MirrorError::Rebase`] when the remote path does not sit
    /// under the root's parent; no fallback mapping is attempted.
    pub fn local_path(&self, remote: &Path) -> MirrorResult<PathBuf> {
        if self.is_whole_namespace() {
            let rel = remote
                .strip_prefix("/")
                .or_else(|_| remote.strip_prefix("."))
                .unwrap_or(remote);
            return Ok(self.output.join(&self.username).join(rel));
        }

        let base = self.root.parent().unwrap_or_else(|| Path::new("/"));
        let rel = remote.strip_prefix(base).map_err(|_| MirrorError::Rebase {
            base: base.to_path_buf(),
            path: remote.to_path_buf(),
        })?;

        if rel.as_os_str().is_empty() {
            // the share pointed straight at a single file
            let name = remote.file_name().ok_or_else(|| MirrorError::Rebase {
                base: base.to_path_buf(),
                path: remote.to_path_buf(),
            })?;
            return Ok(self.output.join(name));
        }

        Ok(self.output.join(rel))
    }
}
