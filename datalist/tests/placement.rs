use datadom::{Rect, Viewport};
use datalist::{DataListConfig, Placement, PlacementMode, Positioning, compute_placement};

fn anchor_at(top: f32) -> Rect {
    Rect::new(20.0, top, 240.0, 32.0)
}

// ============================================================================
// Rule priority
// ============================================================================

#[test]
fn test_short_viewport_pins_regardless_of_anchor() {
    for top in [10.0, 200.0, 390.0] {
        let placement = compute_placement(anchor_at(top), 400.0, 0.0);
        assert_eq!(placement.mode, PlacementMode::Pinned);
        assert!(placement.is_pinned());
        assert_eq!(placement.positioning, Positioning::Fixed);
        assert_eq!(placement.top, Some(8.0));
        assert_eq!(placement.bottom, Some(8.0));
        assert_eq!(placement.height, Some(384.0));
        assert_eq!(placement.max_height, 384.0);
    }
}

#[test]
fn test_lower_half_flips_above() {
    let placement = compute_placement(anchor_at(700.0), 800.0, 0.0);
    assert_eq!(placement.mode, PlacementMode::Above);
    assert_eq!(placement.top, None);
    assert_eq!(placement.bottom, Some(100.0));
    assert_eq!(placement.max_height, 692.0);
    assert_eq!(placement.left, 20.0);
    assert_eq!(placement.width, 240.0);
}

#[test]
fn test_upper_half_opens_below() {
    let placement = compute_placement(anchor_at(100.0), 800.0, 0.0);
    assert_eq!(placement.mode, PlacementMode::Below);
    assert_eq!(placement.positioning, Positioning::Absolute);
    assert_eq!(placement.top, Some(132.0));
    assert_eq!(placement.bottom, None);
    assert_eq!(placement.left, 20.0);
    assert_eq!(placement.width, 240.0);
    assert_eq!(placement.max_height, 660.0);
}

#[test]
fn test_threshold_boundaries() {
    // exactly at the compact threshold is not compact
    assert_eq!(compute_placement(anchor_at(100.0), 450.0, 0.0).mode, PlacementMode::Below);
    // exactly at the midpoint is not past it
    assert_eq!(compute_placement(anchor_at(400.0), 800.0, 0.0).mode, PlacementMode::Below);
    assert_eq!(compute_placement(anchor_at(400.5), 800.0, 0.0).mode, PlacementMode::Above);
}

// ============================================================================
// Geometry details
// ============================================================================

#[test]
fn test_scroll_offset_only_moves_flipped_panel() {
    let below = compute_placement(anchor_at(100.0), 800.0, 300.0);
    assert_eq!(below.mode, PlacementMode::Below);
    assert_eq!(below.top, Some(132.0));
    assert_eq!(below.max_height, 660.0);

    let above = compute_placement(anchor_at(700.0), 800.0, 250.0);
    assert_eq!(above.bottom, Some(-150.0));
    assert_eq!(above.max_height, 942.0);
}

#[test]
fn test_flip_uses_viewport_midpoint() {
    let config = DataListConfig::default();
    let viewport = Viewport::new(1024.0, 900.0).scrolled(120.0);
    let at_midpoint = Placement::compute(anchor_at(viewport.midpoint()), viewport, &config);
    assert_eq!(at_midpoint.mode, PlacementMode::Below);
    let past_midpoint = Placement::compute(anchor_at(viewport.midpoint() + 1.0), viewport, &config);
    assert_eq!(past_midpoint.mode, PlacementMode::Above);
}

#[test]
fn test_max_height_never_negative() {
    let placement = compute_placement(Rect::new(0.0, 380.0, 100.0, 500.0), 800.0, 0.0);
    assert_eq!(placement.mode, PlacementMode::Below);
    assert_eq!(placement.max_height, 0.0);
}

#[test]
fn test_placement_is_pure() {
    let a = compute_placement(anchor_at(321.0), 768.0, 42.0);
    let b = compute_placement(anchor_at(321.0), 768.0, 42.0);
    assert_eq!(a, b);
}

#[test]
fn test_config_thresholds() {
    let config = DataListConfig::new().compact_viewport_height(300.0);
    let viewport = Viewport::new(1024.0, 400.0);
    let placement = Placement::compute(anchor_at(50.0), viewport, &config);
    assert_eq!(placement.mode, PlacementMode::Below);

    let viewport = Viewport::new(1024.0, 299.0);
    let placement = Placement::compute(anchor_at(50.0), viewport, &config);
    assert_eq!(placement.mode, PlacementMode::Pinned);
}
