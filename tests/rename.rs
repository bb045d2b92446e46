use assert_fs::prelude::*;
use assert_fs::TempDir;
use std::path::Path;

use sidematter::{resolve, MetadataFormat};

#[test]
fn renamed_as_does_not_probe_destination() {
    let dir = TempDir::new().unwrap();
    dir.child("src/doc.md").write_str("body").unwrap();
    dir.child("src/doc.meta.json").write_str(r#"{"k":"v"}"#).unwrap();
    // Destination already carries sidecars the source lacks.
    dir.child("dst/copy.meta.yaml").write_str("other: 1\n").unwrap();
    dir.child("dst/copy.assets").create_dir_all().unwrap();

    let src = resolve(dir.child("src/doc.md").path(), true).unwrap();
    let dst = src.renamed_as(dir.child("dst/copy.md").path());

    assert_eq!(dst.meta_format(), Some(MetadataFormat::Json));
    assert_eq!(dst.meta_path(), Some(dir.child("dst/copy.meta.json").path()));
    assert!(dst.assets_dir().is_none());
    assert_eq!(dst.path_list().len(), 2);
    assert_eq!(dst.parsed_meta(), src.parsed_meta());
}

#[test]
fn renamed_as_changes_stem_not_extension_rules() {
    let dir = TempDir::new().unwrap();
    dir.child("a.tar.gz").write_str("x").unwrap();
    dir.child("a.tar.assets").create_dir_all().unwrap();

    let src = resolve(dir.child("a.tar.gz").path(), false).unwrap();
    assert!(src.assets_dir().is_some());

    let dst = src.renamed_as("out/b.zip");
    assert_eq!(dst.primary(), Path::new("out/b.zip"));
    assert_eq!(dst.assets_dir(), Some(Path::new("out/b.assets")));
    assert!(!Path::new("out").exists());
}
