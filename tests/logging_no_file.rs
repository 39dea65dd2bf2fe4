use std::{thread::sleep, time::Duration};

use tempfile::tempdir;

// Own test binary: the global subscriber is installed once per process.
#[test]
fn init_without_file_creates_no_log() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("logs").join("launcher.log");

    lnk_launcher::logging::init(false, None);
    tracing::info!("test");

    sleep(Duration::from_millis(100));

    assert!(!path.exists(), "log file should not be created");
    assert!(!dir.path().join("logs").exists());
}
