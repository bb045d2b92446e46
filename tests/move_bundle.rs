use assert_fs::prelude::*;
use assert_fs::TempDir;
use std::fs;

use sidematter::{move_bundle, resolve, SidematterError, TransferOptions};

fn bundle(dir: &TempDir) {
    dir.child("in/doc.md").write_str("body").unwrap();
    dir.child("in/doc.meta.yaml").write_str("title: t\n").unwrap();
    dir.child("in/doc.assets/sub/a.bin").write_binary(b"abc").unwrap();
}

#[test]
fn move_relocates_all_three_paths() {
    let dir = TempDir::new().unwrap();
    bundle(&dir);

    let src = resolve(dir.child("in/doc.md").path(), false).unwrap();
    let dest = move_bundle(dir.child("in/doc.md").path(), dir.child("out/new.md").path(), &TransferOptions::default())
        .unwrap();

    for p in src.path_list() {
        assert!(!p.exists(), "source path still present: {}", p.display());
    }
    for p in dest.path_list() {
        assert!(p.exists(), "destination path missing: {}", p.display());
    }
    assert_eq!(dest.path_list().len(), 3);
    assert_eq!(fs::read(dir.child("out/new.assets/sub/a.bin").path()).unwrap(), b"abc");
}

#[test]
fn move_without_parents_fails_before_touching_source() {
    let dir = TempDir::new().unwrap();
    bundle(&dir);
    let opts = TransferOptions {
        make_parents: false,
        ..TransferOptions::default()
    };

    let err = move_bundle(dir.child("in/doc.md").path(), dir.child("missing/new.md").path(), &opts).unwrap_err();
    assert!(err.is_not_found());
    assert!(matches!(err, SidematterError::ParentMissing(_)));
    assert_eq!(resolve(dir.child("in/doc.md").path(), false).unwrap().path_list().len(), 3);
    assert!(dir.child("in/doc.md").path().exists());
}

#[test]
fn move_with_assets_disabled_leaves_assets_behind() {
    let dir = TempDir::new().unwrap();
    bundle(&dir);
    let opts = TransferOptions {
        assets: false,
        ..TransferOptions::default()
    };

    let dest = move_bundle(dir.child("in/doc.md").path(), dir.child("in/moved.md").path(), &opts).unwrap();
    assert!(dest.assets_dir().is_none());
    assert!(dir.child("in/doc.assets/sub/a.bin").path().exists());
    assert!(dir.child("in/moved.meta.yaml").path().exists());
    assert!(!dir.child("in/doc.md").path().exists());
}

#[test]
fn move_onto_existing_assets_merges() {
    let dir = TempDir::new().unwrap();
    bundle(&dir);
    dir.child("out/new.assets/old.txt").write_str("old").unwrap();

    move_bundle(dir.child("in/doc.md").path(), dir.child("out/new.md").path(), &TransferOptions::default()).unwrap();
    assert!(dir.child("out/new.assets/old.txt").path().exists());
    assert!(dir.child("out/new.assets/sub/a.bin").path().exists());
    assert!(!dir.child("in/doc.assets").path().exists());
}

fn flat_bundle(dir: &TempDir) {
    dir.child("doc.md").write_str("body").unwrap();
    dir.child("doc.meta.yaml").write_str("title: t\n").unwrap();
    dir.child("doc.assets/image.png").write_binary(b"png").unwrap();
}

#[test]
fn move_to_same_stem_keeps_shared_sidecars() {
    let dir = TempDir::new().unwrap();
    flat_bundle(&dir);

    let dest = move_bundle(dir.child("doc.md").path(), dir.child("doc.txt").path(), &TransferOptions::default())
        .unwrap();

    assert_eq!(dest.path_list().len(), 3);
    for p in dest.path_list() {
        assert!(p.exists(), "destination path missing: {}", p.display());
    }
    assert_eq!(fs::read(dir.child("doc.assets/image.png").path()).unwrap(), b"png");
    assert_eq!(fs::read_to_string(dir.child("doc.meta.yaml").path()).unwrap(), "title: t\n");
    assert_eq!(fs::read_to_string(dir.child("doc.txt").path()).unwrap(), "body");
    assert!(!dir.child("doc.md").path().exists());
}

#[test]
fn move_onto_itself_changes_nothing() {
    let dir = TempDir::new().unwrap();
    flat_bundle(&dir);
    let primary = dir.child("doc.md");

    move_bundle(primary.path(), primary.path(), &TransferOptions::default()).unwrap();
    let dotted = dir.path().join(".").join("doc.md");
    move_bundle(primary.path(), &dotted, &TransferOptions::default()).unwrap();

    assert_eq!(fs::read_to_string(primary.path()).unwrap(), "body");
    assert_eq!(fs::read(dir.child("doc.assets/image.png").path()).unwrap(), b"png");
    assert_eq!(resolve(primary.path(), false).unwrap().path_list().len(), 3);
}
