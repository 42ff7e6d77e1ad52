use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use davmirror::Layout;
use pretty_assertions::assert_eq;
use remotefs::fs::{Metadata, UnixPex};
use remotefs::{RemoteError, RemoteErrorType, RemoteFs};
use remotefs_memory::{node, Inode, MemoryFs, Node, Tree};
use tempfile::TempDir;

fn setup_remote() -> Box<dyn RemoteFs> {
    let _ = env_logger::builder().is_test(true).try_init();

    let tree = Tree::new(node!(
        PathBuf::from("/"),
        Inode::dir(0, 0, UnixPex::from(0o755)),
    ));

    let mut fs = MemoryFs::new(tree);
    fs.connect().expect("Failed to connect to fs");

    Box::new(fs) as Box<dyn RemoteFs>
}

/// Make file on the remote fs at `path` with `content`
///
/// If the stems in the path do not exist, they will be created.
fn make_file_at(remote: &mut Box<dyn RemoteFs>, path: &Path, content: &[u8]) {
    let parent_dir = path.parent().expect("Path has no parent");
    make_dir_at(remote, parent_dir);

    let reader = io::Cursor::new(content.to_vec());

    remote
        .create_file(
            path,
            &Metadata::default().size(content.len() as u64),
            Box::new(reader),
        )
        .expect("Failed to create file");
}

/// Make directory on the remote fs at `path`
///
/// All the stems in the path will be created if they do not exist.
fn make_dir_at(remote: &mut Box<dyn RemoteFs>, path: &Path) {
    let mut abs_path = Path::new("/").to_path_buf();
    for stem in path.iter() {
        abs_path.push(stem);
        // never create_dir the root itself
        if abs_path == Path::new("/") {
            continue;
        }
        match remote.create_dir(&abs_path, UnixPex::from(0o755)) {
            Ok(_)
            | Err(RemoteError {
                kind: RemoteErrorType::DirectoryAlreadyExists,
                ..
            }) => {}
            Err(err) => panic!("Failed to create directory: {err}"),
        }
    }
}

#[test]
fn test_should_mirror_whole_namespace_under_username() {
    let mut remote = setup_remote();
    make_file_at(&mut remote, Path::new("/docs/a.txt"), b"alpha");
    make_file_at(&mut remote, Path::new("/b.txt"), b"bravo");

    let out = TempDir::new().expect("Failed to create tempdir");
    let root = Path::new("/");
    let layout = Layout::new(out.path(), "alice", root);

    davmirror::mirror(remote.as_mut(), root, &layout).expect("mirror should succeed");

    assert_eq!(
        fs::read(out.path().join("alice/docs/a.txt")).expect("file should exist"),
        b"alpha"
    );
    assert_eq!(
        fs::read(out.path().join("alice/b.txt")).expect("file should exist"),
        b"bravo"
    );
}

#[test]
fn test_should_mirror_subtree_named_after_root() {
    let mut remote = setup_remote();
    make_file_at(&mut remote, Path::new("/shared/reports/q1.csv"), b"1,2,3");
    make_file_at(&mut remote, Path::new("/shared/reports/2024/q2.csv"), b"4,5,6");
    make_file_at(&mut remote, Path::new("/shared/other.txt"), b"not mirrored");

    let out = TempDir::new().expect("Failed to create tempdir");
    let root = Path::new("/shared/reports");
    let layout = Layout::new(out.path(), "alice", root);

    davmirror::mirror(remote.as_mut(), root, &layout).expect("mirror should succeed");

    assert_eq!(
        fs::read(out.path().join("reports/q1.csv")).expect("file should exist"),
        b"1,2,3"
    );
    assert_eq!(
        fs::read(out.path().join("reports/2024/q2.csv")).expect("file should exist"),
        b"4,5,6"
    );
    // entries outside the share root are never visited
    assert!(!out.path().join("other.txt").exists());
    assert!(!out.path().join("shared").exists());
}

#[test]
fn test_should_mirror_single_file_share_flattened() {
    let mut remote = setup_remote();
    make_file_at(&mut remote, Path::new("/shared/report.pdf"), b"%PDF");

    let out = TempDir::new().expect("Failed to create tempdir");
    let root = Path::new("/shared/report.pdf");
    let layout = Layout::new(out.path(), "alice", root);

    davmirror::mirror(remote.as_mut(), root, &layout).expect("mirror should succeed");

    assert_eq!(
        fs::read(out.path().join("report.pdf")).expect("file should exist"),
        b"%PDF"
    );
    assert!(!out.path().join("shared").exists());
}

#[test]
fn test_should_overwrite_stale_content_on_second_run() {
    let mut remote = setup_remote();
    make_file_at(&mut remote, Path::new("/docs/a.txt"), b"first version, longer");

    let out = TempDir::new().expect("Failed to create tempdir");
    let root = Path::new("/docs");
    let layout = Layout::new(out.path(), "alice", root);

    davmirror::mirror(remote.as_mut(), root, &layout).expect("mirror should succeed");
    assert_eq!(
        fs::read(out.path().join("docs/a.txt")).expect("file should exist"),
        b"first version, longer"
    );

    // remote content changes between runs
    make_file_at(&mut remote, Path::new("/docs/a.txt"), b"second");

    davmirror::mirror(remote.as_mut(), root, &layout).expect("mirror should succeed");
    assert_eq!(
        fs::read(out.path().join("docs/a.txt")).expect("file should exist"),
        b"second"
    );
}

#[test]
fn test_should_keep_earlier_downloads_on_failure() {
    let mut remote = setup_remote();
    make_file_at(&mut remote, Path::new("/docs/a.txt"), b"alpha");
    make_file_at(&mut remote, Path::new("/docs/b.txt"), b"bravo");

    let out = TempDir::new().expect("Failed to create tempdir");
    let root = Path::new("/docs");
    let layout = Layout::new(out.path(), "alice", root);

    // fail the walk at the second file by downloading manually
    let mut downloaded = 0usize;
    let result = davmirror::walk(remote.as_mut(), root, &mut |remote, file| {
        if downloaded == 1 {
            return Err(davmirror::MirrorError::LocalIo(io::Error::new(
                io::ErrorKind::Other,
                "disk full",
            )));
        }
        downloaded += 1;
        davmirror::download(remote, &file.path, &layout.local_path(&file.path)?).map(|_| ())
    });

    assert!(result.is_err());
    // the file downloaded before the failure is still on disk
    assert_eq!(downloaded, 1);
    let survivors: Vec<PathBuf> = fs::read_dir(out.path().join("docs"))
        .expect("docs dir should exist")
        .map(|entry| entry.expect("readable entry").path())
        .collect();
    assert_eq!(survivors.len(), 1);
}
