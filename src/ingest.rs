use crate::catalog::{AppRecord, Catalog, Category};
use crate::icon::IconResolver;
use crate::shortcut::{is_shortcut, ShortcutResolver};
use std::path::Path;
use walkdir::WalkDir;

/// Category folders created alongside a fresh apps root.
pub const DEFAULT_CATEGORIES: &[&str] = &["办公软件", "浏览器", "开发工具", "娱乐"];

/// Create `root` and the default category folders if `root` does not exist.
///
/// Returns `true` when the tree had to be created.
pub fn ensure_apps_root(root: &Path) -> anyhow::Result<bool> {
    if root.exists() {
        return Ok(false);
    }
    std::fs::create_dir_all(root)?;
    for name in DEFAULT_CATEGORIES {
        std::fs::create_dir_all(root.join(name))?;
    }
    tracing::info!(root = %root.display(), "created apps directory with default categories");
    Ok(true)
}

/// Scan `root` and build a [`Catalog`].
///
/// Every immediate subdirectory is a category and every `.lnk` file directly
/// inside it a candidate record. Shortcuts that fail to resolve are logged
/// and skipped; categories left without records are omitted. Icons are
/// resolved at `scale`.
pub fn ingest(
    root: &Path,
    shortcuts: &dyn ShortcutResolver,
    icons: &dyn IconResolver,
    scale: f32,
) -> Catalog {
    if let Err(e) = ensure_apps_root(root) {
        tracing::error!(root = %root.display(), error = %e, "failed to create apps directory");
        return Catalog::default();
    }

    let mut categories = Vec::new();
    for entry in WalkDir::new(root).min_depth(1).max_depth(1) {
        let entry = match entry {
            Ok(e) => e,
            Err(e) => {
                tracing::error!(root = %root.display(), error = %e, "failed to read directory entry");
                continue;
            }
        };
        if !entry.file_type().is_dir() {
            continue;
        }
        let name = entry.file_name().to_string_lossy().into_owned();
        let apps = ingest_category(entry.path(), &name, shortcuts, icons, scale);
        tracing::debug!(category = %name, count = apps.len(), "scanned category");
        categories.push(Category { name, apps });
    }

    let catalog = Catalog::new(categories);
    tracing::info!(
        categories = catalog.categories().len(),
        apps = catalog.len(),
        "catalog loaded"
    );
    catalog
}

fn ingest_category(
    dir: &Path,
    category: &str,
    shortcuts: &dyn ShortcutResolver,
    icons: &dyn IconResolver,
    scale: f32,
) -> Vec<AppRecord> {
    let mut apps = Vec::new();
    for entry in WalkDir::new(dir).min_depth(1).max_depth(1) {
        let entry = match entry {
            Ok(e) => e,
            Err(e) => {
                tracing::error!(path = %dir.display(), error = %e, "failed to read directory entry");
                continue;
            }
        };
        let path = entry.path();
        if !entry.file_type().is_file() || !is_shortcut(path) {
            continue;
        }
        let info = match shortcuts.resolve(path) {
            Ok(info) if !info.target.as_os_str().is_empty() => info,
            Ok(_) => {
                tracing::error!(path = %path.display(), "shortcut has no target; skipping");
                continue;
            }
            Err(e) => {
                tracing::error!(path = %path.display(), error = %e, "failed to resolve shortcut; skipping");
                continue;
            }
        };
        let name = path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default();
        let icon = icons.resolve(&info.target, scale);
        apps.push(AppRecord {
            name,
            shortcut_path: path.to_path_buf(),
            target_path: info.target,
            arguments: info.arguments,
            working_dir: info.working_dir,
            category: category.to_string(),
            icon,
        });
    }
    apps
}
