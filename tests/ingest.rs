mod common;

use common::{write_corrupt_shortcut, write_shortcut, FixtureResolver, StubIcons};
use lnk_launcher::icon::placeholder;
use lnk_launcher::ingest::{ensure_apps_root, ingest, DEFAULT_CATEGORIES};
use std::fs;
use std::path::PathBuf;
use tempfile::tempdir;

#[test]
fn resolves_shortcut_into_category_record() {
    let dir = tempdir().unwrap();
    let root = dir.path().join("apps");
    let lnk = write_shortcut(&root, "办公软件", "calc", r"C:\Windows\System32\calc.exe");

    let catalog = ingest(&root, &FixtureResolver, &StubIcons, 1.0);

    let category = catalog.category("办公软件").expect("category present");
    assert_eq!(category.apps.len(), 1);
    let record = &category.apps[0];
    assert_eq!(record.name, "calc");
    assert_eq!(record.category, "办公软件");
    assert_eq!(record.shortcut_path, lnk);
    assert_eq!(record.target_path, PathBuf::from(r"C:\Windows\System32\calc.exe"));
    assert_eq!(record.arguments, None);
    assert_eq!(record.icon, placeholder(1.0));
}

#[test]
fn arguments_and_working_dir_are_kept() {
    let dir = tempdir().unwrap();
    let root = dir.path().join("apps");
    let cat = root.join("dev");
    fs::create_dir_all(&cat).unwrap();
    fs::write(
        cat.join("code.lnk"),
        "target=C:/tools/code.exe\nargs=--new-window\ndir=C:/src\n",
    )
    .unwrap();

    let catalog = ingest(&root, &FixtureResolver, &StubIcons, 1.0);
    let record = &catalog.category("dev").unwrap().apps[0];
    assert_eq!(record.arguments.as_deref(), Some("--new-window"));
    assert_eq!(record.working_dir, Some(PathBuf::from("C:/src")));
}

#[test]
fn ingestion_is_idempotent() {
    let dir = tempdir().unwrap();
    let root = dir.path().join("apps");
    write_shortcut(&root, "tools", "a", "C:/a.exe");
    write_shortcut(&root, "tools", "b", "C:/b.exe");
    write_shortcut(&root, "web", "browser", "C:/browser.exe");

    let first = ingest(&root, &FixtureResolver, &StubIcons, 1.0);
    let second = ingest(&root, &FixtureResolver, &StubIcons, 1.0);
    assert_eq!(first, second);
    assert_eq!(first.len(), 3);
}

#[test]
fn category_with_only_broken_shortcuts_is_omitted() {
    let dir = tempdir().unwrap();
    let root = dir.path().join("apps");
    write_corrupt_shortcut(&root, "broken", "one");
    write_corrupt_shortcut(&root, "broken", "two");
    write_shortcut(&root, "fine", "ok", "C:/ok.exe");
    write_corrupt_shortcut(&root, "fine", "bad");

    let catalog = ingest(&root, &FixtureResolver, &StubIcons, 1.0);
    assert!(catalog.category("broken").is_none());
    let fine = catalog.category("fine").unwrap();
    assert_eq!(fine.apps.len(), 1);
    assert_eq!(fine.apps[0].name, "ok");
}

#[test]
fn non_shortcut_files_and_nested_dirs_are_ignored() {
    let dir = tempdir().unwrap();
    let root = dir.path().join("apps");
    write_shortcut(&root, "tools", "calc", "C:/calc.exe");
    fs::write(root.join("tools").join("readme.txt"), "target=C:/x.exe").unwrap();
    write_shortcut(&root.join("tools"), "nested", "deep", "C:/deep.exe");
    fs::write(root.join("loose.lnk"), "target=C:/loose.exe").unwrap();

    let catalog = ingest(&root, &FixtureResolver, &StubIcons, 1.0);
    assert_eq!(catalog.categories().len(), 1);
    let names: Vec<_> = catalog.apps().map(|a| a.name.as_str()).collect();
    assert_eq!(names, vec!["calc"]);
}

#[test]
fn missing_root_is_created_with_default_categories() {
    let dir = tempdir().unwrap();
    let root = dir.path().join("apps");

    let catalog = ingest(&root, &FixtureResolver, &StubIcons, 1.0);
    assert!(catalog.is_empty());
    for name in DEFAULT_CATEGORIES {
        assert!(root.join(name).is_dir(), "missing default category {name}");
    }
    assert!(!ensure_apps_root(&root).unwrap());
}

#[test]
fn icons_are_resolved_at_requested_scale() {
    let dir = tempdir().unwrap();
    let root = dir.path().join("apps");
    write_shortcut(&root, "tools", "calc", "C:/calc.exe");

    let catalog = ingest(&root, &FixtureResolver, &StubIcons, 1.5);
    assert_eq!(catalog.apps().next().unwrap().icon.dimensions(), (96, 96));
}
