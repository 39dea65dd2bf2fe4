use lnk_launcher::icon::{icon_size, placeholder, IconResolver, SystemIconResolver};
use tempfile::tempdir;

#[test]
fn nonexistent_target_yields_placeholder() {
    let dir = tempdir().unwrap();
    let missing = dir.path().join("missing.exe");
    for scale in [0.5, 1.0, 1.3, 2.0] {
        let img = SystemIconResolver.resolve(&missing, scale);
        assert_eq!(img, placeholder(scale));
    }
}

#[test]
fn file_without_icon_yields_placeholder() {
    let dir = tempdir().unwrap();
    let file = dir.path().join("plain.exe");
    std::fs::write(&file, b"not a PE image").unwrap();
    assert_eq!(SystemIconResolver.resolve(&file, 1.0), placeholder(1.0));
}

#[test]
fn placeholder_is_deterministic_and_sized_by_zoom() {
    assert_eq!(placeholder(1.0), placeholder(1.0));
    assert_eq!(icon_size(1.0), 64);
    assert_eq!(icon_size(0.5), 32);
    assert_eq!(icon_size(1.2), 76);
    assert_eq!(placeholder(1.2).dimensions(), (76, 76));
    assert!(placeholder(1.0).pixels().any(|p| p[3] == 0));
}
