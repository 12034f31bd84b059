// Copyright (c) 2024-2025 Pixelbrowse Contributors
// Licensed under the MIT License. See LICENSE file for details.

//! Adaptive two-column grid layout.
//!
//! Pure computation, no rendering. Items are packed masonry-style: each new
//! item goes to the currently shorter column, so columns stay visually
//! balanced. Slots are realized incrementally and cached; callers ask for a
//! visible window and the engine materializes only enough of the prefix to
//! cover it, so arbitrarily large item lists never lay out eagerly.

use crate::browse::BrowseState;
use crate::types::{LoadState, MediaItem};

/// Fixed column count of the browsing grid.
pub const COLUMN_COUNT: usize = 2;

/// Grid box width as a fraction of the viewport width.
pub const GRID_WIDTH_FRACTION: f32 = 0.45;

/// Detail box maximum size as a fraction of the viewport width.
pub const DETAIL_WIDTH_FRACTION: f32 = 0.92;

/// Number of placeholder boxes shown while a fetch is in flight.
pub const PLACEHOLDER_COUNT: usize = 4;

/// Vertical and horizontal gap between boxes.
pub const ITEM_SPACING: f32 = 10.0;

/// Aspect-fit a box into a square of side `max`.
///
/// For intrinsic ratio `r = w/h`: when `r >= 1` the width is pinned to `max`
/// and the height follows; when `r < 1` the height is pinned to `max` and
/// the width follows. Unknown or degenerate dimensions yield a `max` square.
/// The larger of the two resulting dimensions never exceeds `max`.
pub fn aspect_fit(width: Option<u32>, height: Option<u32>, max: f32) -> (f32, f32) {
    let ratio = match (width, height) {
        (Some(w), Some(h)) if w > 0 && h > 0 => w as f32 / h as f32,
        _ => return (max, max),
    };
    if ratio >= 1.0 {
        (max, max / ratio)
    } else {
        (max * ratio, max)
    }
}

/// Box dimensions of one grid cell: width is always the column width, height
/// follows the intrinsic ratio, square when unknown.
pub fn grid_box(item: &MediaItem, box_width: f32) -> (f32, f32) {
    match item.aspect_ratio() {
        Some(ratio) if ratio > 0.0 => (box_width, box_width / ratio),
        _ => (box_width, box_width),
    }
}

/// A realized grid cell: which item goes where, at what size.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Slot {
    /// Index into the item list.
    pub index: usize,
    /// Column this slot was packed into (0-based, left to right).
    pub column: usize,
    /// Left edge, relative to the grid origin.
    pub x: f32,
    /// Top edge, relative to the grid origin.
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Slot {
    /// Whether this slot's vertical extent intersects `[top, bottom)`.
    pub fn intersects(&self, top: f32, bottom: f32) -> bool {
        self.y < bottom && self.y + self.height > top
    }
}

/// Incremental masonry layout over a fixed item list.
#[derive(Debug, Clone)]
pub struct GridLayout {
    items: Vec<MediaItem>,
    box_width: f32,
    spacing: f32,
    /// Realized prefix of the layout, in item order.
    slots: Vec<Slot>,
    /// Running height of each column, including trailing spacing.
    column_heights: [f32; COLUMN_COUNT],
}

impl GridLayout {
    /// Lay out `items` for a viewport of the given width. Nothing is
    /// realized until a slot is requested.
    pub fn new(items: Vec<MediaItem>, viewport_width: f32) -> Self {
        Self {
            items,
            box_width: viewport_width * GRID_WIDTH_FRACTION,
            spacing: ITEM_SPACING,
            slots: Vec::new(),
            column_heights: [0.0; COLUMN_COUNT],
        }
    }

    /// Total number of items in the layout.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Returns true when the layout holds no items.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Number of slots realized so far.
    pub fn realized(&self) -> usize {
        self.slots.len()
    }

    /// The item backing a slot.
    pub fn item(&self, index: usize) -> Option<&MediaItem> {
        self.items.get(index)
    }

    /// Column width of this layout.
    pub fn box_width(&self) -> f32 {
        self.box_width
    }

    /// Realize the next unplaced item, if any.
    fn realize_next(&mut self) -> Option<Slot> {
        let index = self.slots.len();
        let item = self.items.get(index)?;
        let (width, height) = grid_box(item, self.box_width);

        // Shorter column receives the next item; ties go left.
        let column = self
            .column_heights
            .iter()
            .enumerate()
            .min_by(|(_, a), (_, b)| a.total_cmp(b))
            .map(|(i, _)| i)
            .unwrap_or(0);

        let slot = Slot {
            index,
            column,
            x: column as f32 * (self.box_width + self.spacing),
            y: self.column_heights[column],
            width,
            height,
        };
        self.column_heights[column] += height + self.spacing;
        self.slots.push(slot);
        Some(slot)
    }

    /// Realize slots up to (and including) `index`, bounded by the item
    /// count.
    pub fn ensure_realized(&mut self, index: usize) {
        while self.slots.len() <= index {
            if self.realize_next().is_none() {
                break;
            }
        }
    }

    /// The slot for one item, realizing the prefix on demand.
    pub fn slot(&mut self, index: usize) -> Option<Slot> {
        self.ensure_realized(index);
        self.slots.get(index).copied()
    }

    /// Slots intersecting the viewport window `[scroll_offset,
    /// scroll_offset + viewport_height)`, widened by `overscan` on both
    /// sides.
    ///
    /// Realizes only enough of the prefix to cover the window: once the
    /// shortest column has grown past the window bottom, no later item can
    /// intersect it.
    pub fn visible_slots(
        &mut self,
        scroll_offset: f32,
        viewport_height: f32,
        overscan: f32,
    ) -> Vec<Slot> {
        let top = (scroll_offset - overscan).max(0.0);
        let bottom = scroll_offset + viewport_height + overscan;

        while self.slots.len() < self.items.len() {
            let shortest = self
                .column_heights
                .iter()
                .fold(f32::INFINITY, |a, &b| a.min(b));
            if shortest >= bottom {
                break;
            }
            if self.realize_next().is_none() {
                break;
            }
        }

        self.slots
            .iter()
            .filter(|s| s.intersects(top, bottom))
            .copied()
            .collect()
    }

    /// Height of the tallest column over the realized prefix, without
    /// trailing spacing.
    pub fn content_height(&self) -> f32 {
        let max = self
            .column_heights
            .iter()
            .fold(0.0_f32, |a, &b| a.max(b));
        (max - self.spacing).max(0.0)
    }
}

/// What the grid area should display for a given browse state.
#[derive(Debug, Clone)]
pub enum GridView {
    /// Fetch in flight: a fixed number of default-sized placeholder boxes.
    Placeholders(Vec<Slot>),
    /// Fetch failed: the error text, shown instead of any boxes.
    Error(String),
    /// Nothing to show: message naming the active category.
    Empty(String),
    /// Items to lay out.
    Grid(GridLayout),
}

impl GridView {
    /// Project the browse state into grid content.
    pub fn from_state(state: &BrowseState, viewport_width: f32) -> Self {
        match state.load_state() {
            LoadState::Loading => Self::Placeholders(placeholder_slots(viewport_width)),
            LoadState::Error(msg) => Self::Error(msg.clone()),
            _ if state.items().is_empty() => Self::Empty(format!(
                "No images found for \"{}\"",
                state.active_category()
            )),
            _ => Self::Grid(GridLayout::new(state.items().to_vec(), viewport_width)),
        }
    }
}

/// Placeholder boxes shown while loading: default (square) size, packed like
/// real items.
fn placeholder_slots(viewport_width: f32) -> Vec<Slot> {
    let placeholders = vec![MediaItem::new(""); PLACEHOLDER_COUNT];
    let mut layout = GridLayout::new(placeholders, viewport_width);
    layout.ensure_realized(PLACEHOLDER_COUNT - 1);
    layout.slots
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::CatalogConfig;

    const VIEWPORT: f32 = 400.0;

    fn square_items(n: usize) -> Vec<MediaItem> {
        (0..n)
            .map(|i| MediaItem::new(format!("https://example.com/upload/{}.jpg", i)))
            .collect()
    }

    #[test]
    fn test_aspect_fit_landscape() {
        // r >= 1: width pinned to max.
        let (w, h) = aspect_fit(Some(1600), Some(900), 368.0);
        assert!((w - 368.0).abs() < 1e-3);
        assert!((h - 368.0 / (1600.0 / 900.0)).abs() < 1e-3);
    }

    #[test]
    fn test_aspect_fit_portrait() {
        // r < 1: height pinned to max, width = height * r.
        let (w, h) = aspect_fit(Some(900), Some(1600), 368.0);
        assert!((h - 368.0).abs() < 1e-3);
        assert!((w - 368.0 * (900.0 / 1600.0)).abs() < 1e-3);
    }

    #[test]
    fn test_aspect_fit_unknown_is_square() {
        assert_eq!(aspect_fit(None, None, 368.0), (368.0, 368.0));
        assert_eq!(aspect_fit(Some(100), None, 368.0), (368.0, 368.0));
        assert_eq!(aspect_fit(Some(0), Some(10), 368.0), (368.0, 368.0));
    }

    #[test]
    fn test_aspect_fit_never_exceeds_max() {
        for (w, h) in [(3000, 13), (13, 3000), (500, 500), (1, 1)] {
            let (fw, fh) = aspect_fit(Some(w), Some(h), 368.0);
            assert!(fw <= 368.0 + 1e-3);
            assert!(fh <= 368.0 + 1e-3);
        }
    }

    #[test]
    fn test_grid_box_width_is_constant_fraction() {
        let box_width = VIEWPORT * GRID_WIDTH_FRACTION;
        let wide = MediaItem::with_dimensions("u", 1600, 800);
        let (w, h) = grid_box(&wide, box_width);
        assert_eq!(w, box_width);
        assert!((h - box_width / 2.0).abs() < 1e-3);

        let unknown = MediaItem::new("u");
        assert_eq!(grid_box(&unknown, box_width), (box_width, box_width));
    }

    #[test]
    fn test_exactly_two_columns_any_count() {
        for n in [0usize, 1, 1000] {
            let mut layout = GridLayout::new(square_items(n), VIEWPORT);
            layout.ensure_realized(n.saturating_sub(1));
            for i in 0..layout.realized() {
                let slot = layout.slot(i).unwrap();
                assert!(slot.column < COLUMN_COUNT);
            }
        }
    }

    #[test]
    fn test_masonry_shorter_column_receives_next() {
        // One tall portrait item in column 0, then squares: the squares
        // should stack in column 1 until it catches up.
        let mut items = vec![MediaItem::with_dimensions("tall", 500, 2000)];
        items.extend(square_items(3));
        let mut layout = GridLayout::new(items, VIEWPORT);
        assert_eq!(layout.slot(0).unwrap().column, 0);
        assert_eq!(layout.slot(1).unwrap().column, 1);
        assert_eq!(layout.slot(2).unwrap().column, 1);
        assert_eq!(layout.slot(3).unwrap().column, 1);
    }

    #[test]
    fn test_first_item_tie_goes_left() {
        let mut layout = GridLayout::new(square_items(2), VIEWPORT);
        assert_eq!(layout.slot(0).unwrap().column, 0);
        assert_eq!(layout.slot(1).unwrap().column, 1);
    }

    #[test]
    fn test_no_overlapping_intervals_within_columns() {
        let mut items = Vec::new();
        for i in 0..60u32 {
            // Mix of ratios to vary heights.
            items.push(MediaItem::with_dimensions(
                format!("u{}", i),
                400 + (i % 7) * 100,
                400 + (i % 5) * 150,
            ));
        }
        let n = items.len();
        let mut layout = GridLayout::new(items, VIEWPORT);
        layout.ensure_realized(n - 1);

        for column in 0..COLUMN_COUNT {
            let mut intervals: Vec<(f32, f32)> = (0..n)
                .filter_map(|i| layout.slot(i))
                .filter(|s| s.column == column)
                .map(|s| (s.y, s.y + s.height))
                .collect();
            intervals.sort_by(|a, b| a.0.total_cmp(&b.0));
            for pair in intervals.windows(2) {
                assert!(pair[0].1 <= pair[1].0 + 1e-3, "overlap in column {}", column);
            }
        }
    }

    #[test]
    fn test_visible_window_does_not_realize_everything() {
        let mut layout = GridLayout::new(square_items(1000), VIEWPORT);
        let visible = layout.visible_slots(0.0, 800.0, 100.0);
        assert!(!visible.is_empty());
        assert!(layout.realized() < 50, "realized {}", layout.realized());
        // All returned slots intersect the widened window.
        for slot in &visible {
            assert!(slot.intersects(0.0, 900.0));
        }
    }

    #[test]
    fn test_scrolling_realizes_more() {
        let mut layout = GridLayout::new(square_items(1000), VIEWPORT);
        layout.visible_slots(0.0, 800.0, 100.0);
        let before = layout.realized();
        let deep = layout.visible_slots(5000.0, 800.0, 100.0);
        assert!(layout.realized() > before);
        assert!(!deep.is_empty());
    }

    fn browse(categories: &[&str]) -> BrowseState {
        BrowseState::new(&CatalogConfig {
            host: "https://example.com/image".to_string(),
            categories: categories.iter().map(|c| c.to_string()).collect(),
        })
    }

    #[test]
    fn test_view_placeholders_while_loading() {
        let mut state = browse(&["Wallpaper", "Nature"]);
        state.begin_fetch();
        match GridView::from_state(&state, VIEWPORT) {
            GridView::Placeholders(slots) => {
                assert_eq!(slots.len(), PLACEHOLDER_COUNT);
                let expected = VIEWPORT * GRID_WIDTH_FRACTION;
                for slot in slots {
                    assert_eq!((slot.width, slot.height), (expected, expected));
                }
            }
            other => panic!("expected placeholders, got {:?}", other),
        }
    }

    #[test]
    fn test_view_error_text() {
        let mut state = browse(&["Wallpaper"]);
        let token = state.begin_fetch();
        state.complete_fetch(token, Err(crate::catalog::CatalogError::Status(503)));
        match GridView::from_state(&state, VIEWPORT) {
            GridView::Error(msg) => assert!(msg.contains("503")),
            other => panic!("expected error view, got {:?}", other),
        }
    }

    #[test]
    fn test_view_empty_names_category() {
        let mut state = browse(&["Wallpaper", "Nature"]);
        state.select("Nature");
        let token = state.begin_fetch();
        state.complete_fetch(token, Ok(vec![]));
        match GridView::from_state(&state, VIEWPORT) {
            GridView::Empty(msg) => assert!(msg.contains("Nature")),
            other => panic!("expected empty view, got {:?}", other),
        }
    }

    #[test]
    fn test_view_grid_when_loaded() {
        let mut state = browse(&["Wallpaper"]);
        let token = state.begin_fetch();
        state.complete_fetch(token, Ok(square_items(5)));
        match GridView::from_state(&state, VIEWPORT) {
            GridView::Grid(layout) => assert_eq!(layout.len(), 5),
            other => panic!("expected grid, got {:?}", other),
        }
    }
}
