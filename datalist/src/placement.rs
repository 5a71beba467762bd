//! Panel placement relative to the bound input.
//!
//! The panel floats next to the input it was opened from:
//! - on short viewports it is pinned over (almost) the whole screen
//! - it opens below the input by default
//! - it flips above the input when the input sits in the lower half of the
//!   viewport
//!
//! Placement is derived state. It is recomputed from the input geometry and
//! the viewport on every show and resize, and never stored elsewhere.

use datadom::{Rect, Viewport};

use crate::config::DataListConfig;

/// Which rule produced a placement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PlacementMode {
    /// Directly below the anchor.
    #[default]
    Below,
    /// Directly above the anchor, growing upwards.
    Above,
    /// Fixed over the viewport, used on short screens.
    Pinned,
}

/// CSS-like positioning scheme of the panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Positioning {
    /// Positioned in document coordinates.
    #[default]
    Absolute,
    /// Positioned in viewport coordinates.
    Fixed,
}

/// Computed panel geometry, in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Placement {
    pub mode: PlacementMode,
    pub positioning: Positioning,
    /// Offset of the panel's top edge. Unset when anchored by its bottom edge.
    pub top: Option<f32>,
    /// Offset of the panel's bottom edge from the bottom of the viewport.
    pub bottom: Option<f32>,
    pub left: f32,
    pub width: f32,
    /// Explicit height, only set when pinned.
    pub height: Option<f32>,
    pub max_height: f32,
}

impl Placement {
    /// Whether the panel covers the viewport instead of following the anchor.
    pub fn is_pinned(&self) -> bool {
        self.mode == PlacementMode::Pinned
    }

    /// Compute a placement with the thresholds from `config`.
    pub fn compute(anchor: Rect, viewport: Viewport, config: &DataListConfig) -> Self {
        place(anchor, viewport, config.compact_viewport_height, config.viewport_gap)
    }
}

/// Compute a placement with the default thresholds.
///
/// Pure: identical inputs always produce identical placements.
///
/// # Example
///
/// ```
/// # use datalist::{compute_placement, PlacementMode};
/// # use datadom::Rect;
/// let anchor = Rect::new(20.0, 100.0, 240.0, 32.0);
/// assert_eq!(compute_placement(anchor, 800.0, 0.0).mode, PlacementMode::Below);
/// assert_eq!(compute_placement(anchor, 400.0, 0.0).mode, PlacementMode::Pinned);
/// ```
pub fn compute_placement(anchor: Rect, viewport_height: f32, scroll_y: f32) -> Placement {
    let config = DataListConfig::default();
    let viewport = Viewport::new(0.0, viewport_height).scrolled(scroll_y);
    place(anchor, viewport, config.compact_viewport_height, config.viewport_gap)
}

fn place(anchor: Rect, viewport: Viewport, compact_height: f32, gap: f32) -> Placement {
    let viewport_height = viewport.height;
    // Short screens: pin over the viewport, ignoring the anchor's vertical position
    if viewport_height < compact_height {
        let height = (viewport_height - 2.0 * gap).max(0.0);
        return Placement {
            mode: PlacementMode::Pinned,
            positioning: Positioning::Fixed,
            top: Some(gap),
            bottom: Some(gap),
            left: anchor.left(),
            width: anchor.width,
            height: Some(height),
            max_height: height,
        };
    }

    // Lower half: grow upwards from the anchor's top edge
    if anchor.top() > viewport.midpoint() {
        let top_in_document = anchor.top() + viewport.scroll_y;
        return Placement {
            mode: PlacementMode::Above,
            positioning: Positioning::Absolute,
            top: None,
            bottom: Some(viewport_height - top_in_document),
            left: anchor.left(),
            width: anchor.width,
            height: None,
            max_height: (top_in_document - gap).max(0.0),
        };
    }

    // Below the anchor's bottom edge; scroll does not apply here
    Placement {
        mode: PlacementMode::Below,
        positioning: Positioning::Absolute,
        top: Some(anchor.bottom()),
        bottom: None,
        left: anchor.left(),
        width: anchor.width,
        height: None,
        max_height: (viewport_height - anchor.bottom() - gap).max(0.0),
    }
}
