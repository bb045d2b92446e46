use assert_fs::prelude::*;
use assert_fs::TempDir;

use sidematter::prelude::*;

#[test]
fn prelude_covers_common_workflow() -> Result<()> {
    let dir = TempDir::new().unwrap();
    dir.child("a.md").write_str("a").unwrap();
    dir.child("a.meta.json").write_str(r#"{"n": 1}"#).unwrap();

    let res: Resolution = Resolver::new(MetaPrecedence::YamlFirst).resolve(dir.child("a.md").path(), true)?;
    assert_eq!(res.meta_format(), Some(MetadataFormat::Json));

    let moved = move_bundle(dir.child("a.md").path(), dir.child("b.md").path(), &TransferOptions::default())?;
    assert_eq!(moved.path_list().len(), 2);
    copy_bundle(dir.child("b.md").path(), dir.child("c.md").path(), &TransferOptions::default())?;
    remove_bundle(dir.child("b.md").path(), RemovalPolicy::Strict)?;

    assert!(resolve(dir.child("b.md").path(), false)?.meta_path().is_none());
    assert!(resolve(dir.child("c.md").path(), false)?.meta_path().is_some());
    Ok(())
}
