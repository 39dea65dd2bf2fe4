use lnk_launcher::settings::ViewConfig;
use std::fs;
use tempfile::tempdir;

#[test]
fn save_then_load_round_trips() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("profile").join("config.json");
    let cfg = ViewConfig {
        position: (40, -20),
        size: (1280, 800),
        scale_factor: 1.3,
        ..ViewConfig::default()
    };
    cfg.save(&path).unwrap();

    let loaded = ViewConfig::load(&path);
    assert_eq!(loaded.position, (40, -20));
    assert_eq!(loaded.size, (1280, 800));
    assert_eq!(loaded.scale_factor, 1.3);
}

#[test]
fn out_of_range_scale_is_clamped() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("config.json");
    fs::write(&path, r#"{"position":[1,2],"size":[300,200],"scaleFactor":7.5}"#).unwrap();
    assert_eq!(ViewConfig::load(&path).scale_factor, 2.0);

    let cfg = ViewConfig {
        scale_factor: 0.1,
        ..ViewConfig::default()
    };
    cfg.save(&path).unwrap();
    assert_eq!(ViewConfig::load(&path).scale_factor, 0.5);
}

#[test]
fn missing_file_gives_defaults() {
    let dir = tempdir().unwrap();
    let cfg = ViewConfig::load(dir.path().join("nope.json"));
    assert_eq!(cfg, ViewConfig::default());
    assert_eq!(cfg.size, (1000, 700));
    assert_eq!(cfg.scale_factor, 1.0);
}

#[test]
fn malformed_file_gives_defaults() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("config.json");
    fs::write(&path, "{ not json").unwrap();
    assert_eq!(ViewConfig::load(&path), ViewConfig::default());
    assert!(ViewConfig::try_load(&path).is_err());

    fs::write(&path, r#"{"position":"left"}"#).unwrap();
    assert_eq!(ViewConfig::load(&path), ViewConfig::default());
}

#[test]
fn file_written_by_older_version_still_loads() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("config.json");
    fs::write(&path, r#"{"pos":[10,20],"size":[900,600],"scale_factor":0.8}"#).unwrap();
    let cfg = ViewConfig::load(&path);
    assert_eq!(cfg.position, (10, 20));
    assert_eq!(cfg.scale_factor, 0.8);
}
