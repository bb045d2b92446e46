use std::fs;
use std::io;
use tempfile::tempdir;

use sidematter::fs_ops::{
    copy_file_atomic, copy_tree, move_dir, move_file, remove_dir_if_exists, remove_file_if_exists,
    write_atomic, CopyOptions,
};

#[test]
fn copy_then_move_then_remove_file() {
    let td = tempdir().unwrap();
    let a = td.path().join("a.txt");
    let b = td.path().join("nested/b.txt");
    let c = td.path().join("other/c.txt");
    fs::write(&a, "payload").unwrap();

    assert_eq!(copy_file_atomic(&a, &b, CopyOptions::default()).unwrap(), 7);
    move_file(&b, &c, true).unwrap();
    assert!(!b.exists());
    assert_eq!(fs::read_to_string(&c).unwrap(), "payload");

    assert!(remove_file_if_exists(&c).unwrap());
    assert!(!remove_file_if_exists(&c).unwrap());
}

#[test]
fn preserve_metadata_keeps_mtime() {
    let td = tempdir().unwrap();
    let src = td.path().join("src");
    let dst = td.path().join("dst");
    fs::write(&src, "x").unwrap();
    let old = filetime::FileTime::from_unix_time(1_600_000_000, 0);
    filetime::set_file_mtime(&src, old).unwrap();

    let opts = CopyOptions {
        preserve_metadata: true,
        ..CopyOptions::default()
    };
    copy_file_atomic(&src, &dst, opts).unwrap();
    let got = filetime::FileTime::from_last_modification_time(&fs::metadata(&dst).unwrap());
    assert_eq!(got.unix_seconds(), old.unix_seconds());
}

#[test]
fn copy_tree_many_files_in_parallel() {
    let td = tempdir().unwrap();
    let src = td.path().join("src");
    for i in 0..50 {
        let p = src.join(format!("d{}/f{i}.txt", i % 5));
        fs::create_dir_all(p.parent().unwrap()).unwrap();
        fs::write(&p, i.to_string()).unwrap();
    }

    let dst = td.path().join("dst");
    assert_eq!(copy_tree(&src, &dst, CopyOptions::default()).unwrap(), 50);
    assert_eq!(fs::read_to_string(dst.join("d3/f13.txt")).unwrap(), "13");
}

#[test]
fn move_dir_and_remove_dir() {
    let td = tempdir().unwrap();
    let src = td.path().join("x.assets");
    fs::create_dir_all(src.join("inner")).unwrap();
    fs::write(src.join("inner/file"), "f").unwrap();

    let dst = td.path().join("y.assets");
    move_dir(&src, &dst, false).unwrap();
    assert!(!src.exists());
    assert!(remove_dir_if_exists(&dst).unwrap());
    assert!(!remove_dir_if_exists(&dst).unwrap());
}

#[test]
fn write_atomic_respects_make_parents() {
    let td = tempdir().unwrap();
    let p = td.path().join("missing/out.json");
    let err = write_atomic(&p, b"{}", false).unwrap_err();
    assert_eq!(err.kind(), io::ErrorKind::NotFound);
    write_atomic(&p, b"{}", true).unwrap();
    assert_eq!(fs::read(&p).unwrap(), b"{}");
}
