use crate::layout::clamp_zoom;
use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Directory scanned for category folders.
pub const APPS_ROOT: &str = "apps";
/// Window geometry and zoom, written on shutdown.
pub const CONFIG_FILE: &str = "profile/config.json";
/// Newline separated list of favourite shortcut paths.
pub const FAVORITES_FILE: &str = "favorites.txt";
/// Timestamped record of every error shown to the user.
pub const TOAST_LOG_FILE: &str = "toast.log";

/// Locations of everything the launcher reads or writes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppPaths {
    pub apps_root: PathBuf,
    pub config_file: PathBuf,
    pub favorites_file: PathBuf,
    pub toast_log: PathBuf,
}

impl Default for AppPaths {
    fn default() -> Self {
        Self::in_dir(Path::new(""))
    }
}

impl AppPaths {
    /// Lay out the default file names below `base`.
    pub fn in_dir(base: &Path) -> Self {
        Self {
            apps_root: base.join(APPS_ROOT),
            config_file: base.join(CONFIG_FILE),
            favorites_file: base.join(FAVORITES_FILE),
            toast_log: base.join(TOAST_LOG_FILE),
        }
    }
}

/// Persisted window geometry and zoom factor.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ViewConfig {
    /// Outer window position in screen points.
    #[serde(default = "default_position", alias = "pos")]
    pub position: (i32, i32),
    /// Inner window size in points.
    #[serde(default = "default_size")]
    pub size: (i32, i32),
    /// Zoom applied to icons, grid spacing and fonts.
    #[serde(default = "default_scale", alias = "scale_factor")]
    pub scale_factor: f32,
    /// Initialise the logger at debug level and honour `RUST_LOG`.
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub debug_logging: bool,
    /// Mirror log output to this file.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub log_file: Option<PathBuf>,
}

fn default_position() -> (i32, i32) {
    (100, 100)
}

fn default_size() -> (i32, i32) {
    (1000, 700)
}

fn default_scale() -> f32 {
    1.0
}

impl Default for ViewConfig {
    fn default() -> Self {
        Self {
            position: default_position(),
            size: default_size(),
            scale_factor: default_scale(),
            debug_logging: false,
            log_file: None,
        }
    }
}

impl ViewConfig {
    /// Load the config at `path`.
    ///
    /// A missing file yields the defaults. A file that cannot be read or
    /// parsed is logged and also yields the defaults; startup never fails
    /// because of it.
    pub fn load(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        match Self::try_load(path) {
            Ok(Some(cfg)) => cfg,
            Ok(None) => Self::default(),
            Err(e) => {
                tracing::error!(path = %path.display(), error = %e, "failed to load view config; using defaults");
                Self::default()
            }
        }
    }

    /// Like [`ViewConfig::load`] but surfaces read and parse errors.
    /// `Ok(None)` means there is no saved config yet.
    pub fn try_load(path: &Path) -> anyhow::Result<Option<Self>> {
        let content = match std::fs::read_to_string(path) {
            Ok(c) => c,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };
        if content.trim().is_empty() {
            return Ok(None);
        }
        let mut cfg: Self = serde_json::from_str(&content)?;
        cfg.scale_factor = clamp_zoom(cfg.scale_factor);
        if cfg.size.0 <= 0 || cfg.size.1 <= 0 {
            tracing::warn!(size = ?cfg.size, "ignoring non-positive window size");
            cfg.size = default_size();
        }
        Ok(Some(cfg))
    }

    /// Write the config to `path`, creating its parent directory if needed.
    pub fn save(&self, path: impl AsRef<Path>) -> anyhow::Result<()> {
        let path = path.as_ref();
        if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
            std::fs::create_dir_all(dir)
                .with_context(|| format!("creating {}", dir.display()))?;
        }
        let mut out = self.clone();
        out.scale_factor = clamp_zoom(out.scale_factor);
        let json = serde_json::to_string_pretty(&out)?;
        std::fs::write(path, json).with_context(|| format!("writing {}", path.display()))?;
        Ok(())
    }
}
