#![allow(dead_code)]

use lnk_launcher::icon::{placeholder, IconResolver, RasterImage};
use lnk_launcher::shortcut::{ShortcutInfo, ShortcutResolver};
use std::path::{Path, PathBuf};

/// Reads `key=value` fixture files standing in for real shell links:
///
/// ```text
/// target=C:\Windows\System32\calc.exe
/// args=--flag
/// dir=C:\Windows
/// ```
///
/// A file without a `target` line fails to resolve.
pub struct FixtureResolver;

impl ShortcutResolver for FixtureResolver {
    fn resolve(&self, shortcut: &Path) -> anyhow::Result<ShortcutInfo> {
        let content = std::fs::read_to_string(shortcut)?;
        let mut target = None;
        let mut arguments = None;
        let mut working_dir = None;
        for line in content.lines() {
            match line.split_once('=') {
                Some(("target", v)) => target = Some(PathBuf::from(v)),
                Some(("args", v)) => arguments = Some(v.to_string()),
                Some(("dir", v)) => working_dir = Some(PathBuf::from(v)),
                _ => {}
            }
        }
        let target = target.ok_or_else(|| anyhow::anyhow!("corrupt shortcut"))?;
        Ok(ShortcutInfo {
            target,
            arguments,
            working_dir,
        })
    }
}

/// Returns the placeholder for every target, without touching the OS.
pub struct StubIcons;

impl IconResolver for StubIcons {
    fn resolve(&self, _executable: &Path, scale: f32) -> RasterImage {
        placeholder(scale)
    }
}

/// Write a fixture shortcut at `root/category/name.lnk` pointing at `target`.
pub fn write_shortcut(root: &Path, category: &str, name: &str, target: &str) -> PathBuf {
    let dir = root.join(category);
    std::fs::create_dir_all(&dir).unwrap();
    let path = dir.join(format!("{name}.lnk"));
    std::fs::write(&path, format!("target={target}\n")).unwrap();
    path
}

/// Write a shortcut that the fixture resolver rejects.
pub fn write_corrupt_shortcut(root: &Path, category: &str, name: &str) -> PathBuf {
    let dir = root.join(category);
    std::fs::create_dir_all(&dir).unwrap();
    let path = dir.join(format!("{name}.lnk"));
    std::fs::write(&path, b"\x00garbage").unwrap();
    path
}
