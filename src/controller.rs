use crate::catalog::{AppRecord, Catalog};
use crate::favorites::FavoritesSet;
use crate::icon::IconResolver;
use crate::ingest::ingest;
use crate::launcher;
use crate::layout::{self, CategoryLayout, DEFAULT_ZOOM};
use crate::settings::{AppPaths, ViewConfig};
use crate::shortcut::ShortcutResolver;
use anyhow::{anyhow, bail, Context};
use std::path::{Path, PathBuf};

/// A user request, addressed to a record by its shortcut path.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Search(String),
    ZoomIn,
    ZoomOut,
    ZoomReset,
    /// Wheel movement while Ctrl is held; only the sign matters.
    ZoomWheel(f32),
    Refresh,
    Launch(PathBuf),
    Rename { path: PathBuf, new_name: String },
    ToggleFavorite(PathBuf),
    Remove(PathBuf),
}

/// What changed as a result of a [`Command`].
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    /// Nothing the view depends on changed.
    Unchanged,
    /// Query or zoom changed; lay out again.
    Relayout,
    /// The catalog was rebuilt and cached icons are stale.
    Reloaded,
    Launched,
    Renamed { old: PathBuf, new: PathBuf },
    Favorite { path: PathBuf, favorite: bool },
}

/// Everything the launcher window shows or persists.
pub struct AppState {
    pub paths: AppPaths,
    catalog: Catalog,
    favorites: FavoritesSet,
    view: ViewConfig,
    query: String,
    shortcuts: Box<dyn ShortcutResolver>,
    icons: Box<dyn IconResolver>,
    saved: bool,
}

impl AppState {
    /// Load favourites and scan the apps root.
    pub fn new(
        paths: AppPaths,
        view: ViewConfig,
        shortcuts: Box<dyn ShortcutResolver>,
        icons: Box<dyn IconResolver>,
    ) -> Self {
        let favorites = FavoritesSet::load(&paths.favorites_file);
        let mut state = Self {
            paths,
            catalog: Catalog::default(),
            favorites,
            view,
            query: String::new(),
            shortcuts,
            icons,
            saved: false,
        };
        state.view.scale_factor = layout::clamp_zoom(state.view.scale_factor);
        state.refresh();
        state
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn favorites(&self) -> &FavoritesSet {
        &self.favorites
    }

    pub fn view(&self) -> &ViewConfig {
        &self.view
    }

    pub fn zoom(&self) -> f32 {
        self.view.scale_factor
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn is_favorite(&self, record: &AppRecord) -> bool {
        self.favorites.contains(&path_key(&record.shortcut_path))
    }

    /// Records matching the active query, or `None` when no filter applies.
    pub fn filtered(&self) -> Option<Vec<&AppRecord>> {
        self.catalog.search(&self.query)
    }

    /// Layout of whatever is currently visible at `viewport_width`.
    pub fn visible_layout(&self, viewport_width: f32) -> Vec<CategoryLayout<'_>> {
        let zoom = self.zoom();
        match self.filtered() {
            Some(records) => layout::layout_records(records, viewport_width, zoom),
            None => layout::layout(&self.catalog, viewport_width, zoom),
        }
    }

    /// Rebuild the catalog from disk.
    pub fn refresh(&mut self) {
        self.catalog = ingest(
            &self.paths.apps_root,
            self.shortcuts.as_ref(),
            self.icons.as_ref(),
            self.view.scale_factor,
        );
    }

    /// Perform `cmd`. Errors leave the state as it was before the command.
    pub fn apply(&mut self, cmd: Command) -> anyhow::Result<Outcome> {
        match cmd {
            Command::Search(q) => {
                if q == self.query {
                    return Ok(Outcome::Unchanged);
                }
                self.query = q;
                Ok(Outcome::Relayout)
            }
            Command::ZoomIn => Ok(self.set_zoom(layout::step_zoom(self.zoom(), 1))),
            Command::ZoomOut => Ok(self.set_zoom(layout::step_zoom(self.zoom(), -1))),
            Command::ZoomReset => Ok(self.set_zoom(DEFAULT_ZOOM)),
            Command::ZoomWheel(delta) => {
                let steps = if delta > 0.0 {
                    1
                } else if delta < 0.0 {
                    -1
                } else {
                    return Ok(Outcome::Unchanged);
                };
                Ok(self.set_zoom(layout::step_zoom(self.zoom(), steps)))
            }
            Command::Refresh => {
                self.refresh();
                Ok(Outcome::Reloaded)
            }
            Command::Launch(path) => {
                let record = self.record(&path)?;
                launcher::launch(record)?;
                Ok(Outcome::Launched)
            }
            Command::Rename { path, new_name } => self.rename(&path, &new_name),
            Command::ToggleFavorite(path) => self.toggle_favorite(&path),
            Command::Remove(path) => self.remove(&path),
        }
    }

    fn record(&self, path: &Path) -> anyhow::Result<&AppRecord> {
        self.catalog
            .find(path)
            .ok_or_else(|| anyhow!("no application for {}", path.display()))
    }

    fn set_zoom(&mut self, zoom: f32) -> Outcome {
        let zoom = layout::clamp_zoom(zoom);
        if zoom == self.view.scale_factor {
            return Outcome::Unchanged;
        }
        tracing::debug!(zoom, "zoom changed");
        self.view.scale_factor = zoom;
        Outcome::Relayout
    }

    fn rename(&mut self, path: &Path, new_name: &str) -> anyhow::Result<Outcome> {
        let record = self.record(path)?;
        let new_name = new_name.trim();
        if new_name.is_empty() {
            bail!("name must not be empty");
        }
        if new_name.contains(['/', '\\']) {
            bail!("name must not contain path separators");
        }
        if new_name == record.name {
            bail!("name is unchanged");
        }

        let mut file_name = new_name.to_string();
        if let Some(ext) = path.extension() {
            file_name.push('.');
            file_name.push_str(&ext.to_string_lossy());
        }
        let new_path = path.with_file_name(file_name);
        if new_path.exists() && !same_file(path, &new_path) {
            bail!("{} already exists", new_path.display());
        }
        std::fs::rename(path, &new_path).with_context(|| {
            format!("failed to rename {} to {}", path.display(), new_path.display())
        })?;
        tracing::info!(from = %path.display(), to = %new_path.display(), "renamed shortcut");

        if let Some(record) = self.catalog.find_mut(path) {
            record.name = new_name.to_string();
            record.shortcut_path = new_path.clone();
        }
        if self.favorites.rename(&path_key(path), &path_key(&new_path)) {
            if let Err(e) = self.favorites.save(&self.paths.favorites_file) {
                tracing::error!(error = %e, "failed to persist favorites after rename");
            }
        }
        Ok(Outcome::Renamed {
            old: path.to_path_buf(),
            new: new_path,
        })
    }

    fn toggle_favorite(&mut self, path: &Path) -> anyhow::Result<Outcome> {
        self.record(path)?;
        let key = path_key(path);
        let favorite = self.favorites.toggle(&key);
        if let Err(e) = self.favorites.save(&self.paths.favorites_file) {
            self.favorites.toggle(&key);
            return Err(e);
        }
        Ok(Outcome::Favorite {
            path: path.to_path_buf(),
            favorite,
        })
    }

    fn remove(&mut self, path: &Path) -> anyhow::Result<Outcome> {
        self.record(path)?;
        std::fs::remove_file(path)
            .with_context(|| format!("failed to delete {}", path.display()))?;
        tracing::info!(path = %path.display(), "removed shortcut");
        let key = path_key(path);
        if self.favorites.contains(&key) {
            self.favorites.toggle(&key);
            if let Err(e) = self.favorites.save(&self.paths.favorites_file) {
                tracing::error!(error = %e, "failed to persist favorites after remove");
            }
        }
        self.refresh();
        Ok(Outcome::Reloaded)
    }

    /// Record the final window geometry and write the view config. Only the
    /// first call writes; later calls do nothing.
    pub fn shutdown(&mut self, position: (i32, i32), size: (i32, i32)) -> anyhow::Result<()> {
        if self.saved {
            return Ok(());
        }
        self.saved = true;
        self.view.position = position;
        if size.0 > 0 && size.1 > 0 {
            self.view.size = size;
        }
        self.view.save(&self.paths.config_file)?;
        tracing::info!(path = %self.paths.config_file.display(), "saved view config");
        Ok(())
    }
}

fn path_key(path: &Path) -> String {
    path.to_string_lossy().into_owned()
}

/// True when both paths name one file on disk. On case-insensitive file
/// systems a case-only rename targets the source itself.
fn same_file(a: &Path, b: &Path) -> bool {
    match (std::fs::canonicalize(a), std::fs::canonicalize(b)) {
        (Ok(a), Ok(b)) => a == b,
        _ => false,
    }
}
