use crate::icon::RasterImage;
use std::path::{Path, PathBuf};

/// One launchable shortcut.
#[derive(Debug, Clone, PartialEq)]
pub struct AppRecord {
    /// Shortcut file name without its extension.
    pub name: String,
    /// Shortcut file; unique across the catalog.
    pub shortcut_path: PathBuf,
    pub target_path: PathBuf,
    pub arguments: Option<String>,
    pub working_dir: Option<PathBuf>,
    /// Name of the folder the shortcut was found in.
    pub category: String,
    pub icon: RasterImage,
}

impl AppRecord {
    /// Case-insensitive substring match against the display name.
    pub fn matches(&self, query_lc: &str) -> bool {
        self.name.to_lowercase().contains(query_lc)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Category {
    pub name: String,
    /// Records in directory enumeration order.
    pub apps: Vec<AppRecord>,
}

/// Every category that yielded at least one record during the last scan.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Catalog {
    categories: Vec<Category>,
}

impl Catalog {
    /// Build a catalog, dropping categories without records.
    pub fn new(categories: Vec<Category>) -> Self {
        Self {
            categories: categories
                .into_iter()
                .filter(|c| !c.apps.is_empty())
                .collect(),
        }
    }

    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    pub fn category(&self, name: &str) -> Option<&Category> {
        self.categories.iter().find(|c| c.name == name)
    }

    /// All records, category by category.
    pub fn apps(&self) -> impl Iterator<Item = &AppRecord> {
        self.categories.iter().flat_map(|c| c.apps.iter())
    }

    pub fn find(&self, shortcut: &Path) -> Option<&AppRecord> {
        self.apps().find(|a| a.shortcut_path == shortcut)
    }

    pub fn find_mut(&mut self, shortcut: &Path) -> Option<&mut AppRecord> {
        self.categories
            .iter_mut()
            .flat_map(|c| c.apps.iter_mut())
            .find(|a| a.shortcut_path == shortcut)
    }

    /// Records whose name contains `query`, ignoring case. A blank query
    /// yields `None`, meaning no filter is active.
    pub fn search(&self, query: &str) -> Option<Vec<&AppRecord>> {
        let q = query.trim();
        if q.is_empty() {
            return None;
        }
        let q = q.to_lowercase();
        Some(self.apps().filter(|a| a.matches(&q)).collect())
    }

    pub fn len(&self) -> usize {
        self.categories.iter().map(|c| c.apps.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(category: &str, name: &str) -> AppRecord {
        AppRecord {
            name: name.into(),
            shortcut_path: PathBuf::from(format!("apps/{category}/{name}.lnk")),
            target_path: PathBuf::from(format!("C:/bin/{name}.exe")),
            arguments: None,
            working_dir: None,
            category: category.into(),
            icon: RasterImage::new(1, 1),
        }
    }

    #[test]
    fn empty_categories_are_dropped() {
        let catalog = Catalog::new(vec![
            Category {
                name: "empty".into(),
                apps: Vec::new(),
            },
            Category {
                name: "tools".into(),
                apps: vec![record("tools", "Calc")],
            },
        ]);
        assert_eq!(catalog.categories().len(), 1);
        assert!(catalog.category("empty").is_none());
        assert_eq!(catalog.len(), 1);
    }

    #[test]
    fn search_is_case_insensitive_substring() {
        let catalog = Catalog::new(vec![Category {
            name: "tools".into(),
            apps: vec![record("tools", "Calculator"), record("tools", "Notepad")],
        }]);
        let hits = catalog.search("CALC").unwrap();
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].name, "Calculator");
        assert!(catalog.search("   ").is_none());
        assert!(catalog.search("zzz").unwrap().is_empty());
    }

    #[test]
    fn find_by_shortcut_path() {
        let mut catalog = Catalog::new(vec![Category {
            name: "tools".into(),
            apps: vec![record("tools", "Calc")],
        }]);
        let path = PathBuf::from("apps/tools/Calc.lnk");
        assert_eq!(catalog.find(&path).map(|a| a.name.as_str()), Some("Calc"));
        catalog.find_mut(&path).unwrap().name = "Other".into();
        assert_eq!(catalog.find(&path).unwrap().name, "Other");
    }
}
