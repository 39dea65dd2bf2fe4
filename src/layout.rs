use crate::catalog::{AppRecord, Catalog};
use std::collections::BTreeMap;

/// Width of one grid cell at zoom 1.0.
pub const BASE_ITEM_WIDTH: f32 = 160.0;
pub const MIN_ZOOM: f32 = 0.5;
pub const MAX_ZOOM: f32 = 2.0;
pub const DEFAULT_ZOOM: f32 = 1.0;
/// Zoom change per key press or wheel notch.
pub const ZOOM_STEP: f32 = 0.1;

/// Clamp `zoom` into `[MIN_ZOOM, MAX_ZOOM]`; non-finite input maps to the default.
pub fn clamp_zoom(zoom: f32) -> f32 {
    if zoom.is_finite() {
        zoom.clamp(MIN_ZOOM, MAX_ZOOM)
    } else {
        DEFAULT_ZOOM
    }
}

/// Apply `steps` zoom increments (negative to zoom out) and clamp.
///
/// The result is rounded to one decimal so repeated steps land on exact
/// tenths.
pub fn step_zoom(zoom: f32, steps: i32) -> f32 {
    let next = clamp_zoom(zoom) + ZOOM_STEP * steps as f32;
    clamp_zoom((next * 10.0).round() / 10.0)
}

/// Number of grid columns that fit `viewport_width` at `zoom`; at least one.
pub fn column_count(viewport_width: f32, zoom: f32) -> usize {
    let width = if viewport_width.is_finite() {
        viewport_width.max(0.0)
    } else {
        0.0
    };
    let cell = BASE_ITEM_WIDTH * clamp_zoom(zoom);
    ((width / cell).floor() as usize).max(1)
}

/// Pixel sizes derived from the zoom factor.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Metrics {
    pub icon: f32,
    pub button_min_width: f32,
    pub button_max_width: f32,
    pub button_height: f32,
    pub spacing: f32,
    pub item_font: f32,
    pub heading_font: f32,
}

impl Metrics {
    pub fn for_zoom(zoom: f32) -> Self {
        let z = clamp_zoom(zoom);
        Self {
            icon: 64.0 * z,
            button_min_width: 120.0 * z,
            button_max_width: 140.0 * z,
            button_height: 140.0 * z,
            spacing: 15.0 * z,
            item_font: 12.0 * z,
            heading_font: 14.0 * z,
        }
    }
}

/// A record and its cell in its category grid.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridItem<'a> {
    pub record: &'a AppRecord,
    pub row: usize,
    pub col: usize,
}

/// One category heading followed by its own grid.
#[derive(Debug, Clone, PartialEq)]
pub struct CategoryLayout<'a> {
    pub name: &'a str,
    pub columns: usize,
    pub items: Vec<GridItem<'a>>,
}

impl CategoryLayout<'_> {
    pub fn rows(&self) -> usize {
        self.items.len().div_ceil(self.columns)
    }
}

/// Lay out the whole catalog.
pub fn layout(catalog: &Catalog, viewport_width: f32, zoom: f32) -> Vec<CategoryLayout<'_>> {
    layout_records(catalog.apps(), viewport_width, zoom)
}

/// Lay out an arbitrary set of records, typically a search result.
///
/// Records are grouped by their category, groups are sorted by name and each
/// group keeps the order in which its records were supplied. Row and column
/// restart at zero for every group.
pub fn layout_records<'a>(
    records: impl IntoIterator<Item = &'a AppRecord>,
    viewport_width: f32,
    zoom: f32,
) -> Vec<CategoryLayout<'a>> {
    let columns = column_count(viewport_width, zoom);
    let mut groups: BTreeMap<&'a str, Vec<&'a AppRecord>> = BTreeMap::new();
    for record in records {
        groups.entry(record.category.as_str()).or_default().push(record);
    }
    groups
        .into_iter()
        .map(|(name, records)| CategoryLayout {
            name,
            columns,
            items: records
                .into_iter()
                .enumerate()
                .map(|(i, record)| GridItem {
                    record,
                    row: i / columns,
                    col: i % columns,
                })
                .collect(),
        })
        .collect()
}
