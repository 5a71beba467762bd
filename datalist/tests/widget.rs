use datadom::{Document, Element, Origin, Rect, Viewport};
use datalist::{DataList, DataListConfig, DataListError, PlacementMode, SourceItem, Visibility};

fn attached(identifier: &str) -> DataList {
    let mut list = DataList::new(identifier);
    list.attach();
    list
}

fn document() -> Document {
    let root = Element::box_()
        .id("root")
        .child(Element::input().id("hidden-one").list("nums").hidden(true))
        .child(Element::input().id("visible-one").list("nums"))
        .child(Element::input().id("unrelated").list("other").value("keep"));
    Document::new(root, Viewport::new(1024.0, 768.0))
}

// ============================================================================
// Rows
// ============================================================================

#[test]
fn test_populate_replaces_rows() {
    let mut list = attached("nums");
    let items = vec![SourceItem::new("1"), SourceItem::new("2")];
    list.populate_from_source(items.clone());
    list.populate_from_source(items);
    assert_eq!(list.len(), 2);
    assert_eq!(list.visible_values(), vec!["1", "2"]);
}

#[test]
fn test_add_rows_keep_call_order() {
    let mut list = attached("nums");
    list.add_row("b", None, None);
    list.add_row("a", Some("Alpha"), Some("first letter"));
    list.add_rows(["c", "d"]);

    let values: Vec<&str> = list.rows().iter().map(|r| r.value()).collect();
    assert_eq!(values, vec!["b", "a", "c", "d"]);
    assert_eq!(list.row(1).unwrap().label(), "Alpha");
    assert_eq!(list.row(1).unwrap().detail(), Some("first letter"));
    assert_eq!(list.row(0).unwrap().label(), "b");
    assert_eq!(list.last_visible(), Some(3));
}

#[test]
fn test_remove_and_clear_rows() {
    let mut list = attached("nums");
    list.add_rows(["a", "b", "c"]);

    assert_eq!(list.remove_row(1).map(|r| r.value().to_string()), Some("b".to_string()));
    assert!(list.remove_row(5).is_none());
    assert_eq!(list.visible_values(), vec!["a", "c"]);
    assert!(list.row(1).unwrap().has_no_border_bottom());

    list.clear_rows();
    assert!(list.is_empty());
    assert_eq!(list.last_visible(), None);
}

// ============================================================================
// Guards
// ============================================================================

#[test]
fn test_filter_is_noop_when_detached() {
    let mut list = DataList::new("nums");
    list.add_rows(["1", "2"]);
    assert!(!list.filter("1"));
    assert_eq!(list.visible_values(), vec!["1", "2"]);
}

#[test]
fn test_filter_is_noop_without_rows() {
    let mut list = attached("nums");
    assert!(!list.filter("x"));
}

#[test]
fn test_show_and_place_need_attachment() {
    let mut list = DataList::new("nums");
    list.show();
    assert_eq!(list.visibility(), Visibility::Hidden);

    let config = DataListConfig::default();
    let placed = list.place(
        "input",
        Rect::new(0.0, 0.0, 100.0, 20.0),
        Viewport::new(800.0, 800.0),
        &config,
    );
    assert!(placed.is_none());
    assert!(list.placement().is_none());
}

#[test]
fn test_detach_hides() {
    let mut list = attached("nums");
    list.show();
    list.detach();
    assert!(!list.is_attached());
    assert_eq!(list.visibility(), Visibility::Hidden);
}

#[test]
fn test_empty_identifier_is_missing() {
    let list = DataList::new("");
    assert_eq!(list.identifier(), None);
}

// ============================================================================
// Placement
// ============================================================================

#[test]
fn test_place_records_anchor() {
    let mut list = attached("nums");
    let config = DataListConfig::default();
    list.place(
        "visible-one",
        Rect::new(10.0, 600.0, 200.0, 30.0),
        Viewport::new(1024.0, 768.0),
        &config,
    );
    assert_eq!(list.anchor(), Some("visible-one"));
    assert_eq!(list.placement().map(|p| p.mode), Some(PlacementMode::Above));
}

// ============================================================================
// Selection
// ============================================================================

#[test]
fn test_select_row_round_trip() {
    let mut doc = document();
    let mut list = attached("nums");
    list.add_rows(["7", "42"]);
    list.show();

    list.select_row(1, &mut doc).unwrap();

    for input in ["hidden-one", "visible-one"] {
        assert_eq!(doc.get(input).unwrap().value, "42");
        let notifications = doc.notifications_for(input);
        assert_eq!(notifications.len(), 1);
        assert_eq!(notifications[0].origin, Origin::Synthetic);
        assert_eq!(notifications[0].value, "42");
    }
    assert_eq!(doc.get("unrelated").unwrap().value, "keep");
    assert!(doc.notifications_for("unrelated").is_empty());

    // the hidden input is skipped when moving focus
    assert_eq!(doc.focused(), Some("visible-one"));
    assert_eq!(list.visibility(), Visibility::Hidden);
}

#[test]
fn test_select_row_out_of_range() {
    let mut doc = document();
    let mut list = attached("nums");
    list.add_row("1", None, None);
    list.show();

    let err = list.select_row(3, &mut doc).unwrap_err();
    assert!(matches!(err, DataListError::RowOutOfRange { index: 3, len: 1 }));
    assert!(list.is_visible());
    assert!(doc.notifications().is_empty());
}

#[test]
fn test_select_row_requires_attachment_and_identifier() {
    let mut doc = document();

    let mut detached = DataList::new("nums");
    detached.add_row("1", None, None);
    assert!(matches!(
        detached.select_row(0, &mut doc),
        Err(DataListError::Detached(_))
    ));

    let mut unnamed = DataList::with_identifier(None);
    unnamed.attach();
    unnamed.add_row("1", None, None);
    assert!(matches!(
        unnamed.select_row(0, &mut doc),
        Err(DataListError::MissingIdentifier)
    ));
}

#[test]
fn test_dirty_tracking() {
    let mut list = attached("nums");
    assert!(list.is_dirty());
    list.clear_dirty();
    assert!(!list.is_dirty());

    list.show();
    assert!(list.is_dirty());
    list.clear_dirty();

    // hiding a hidden panel is not a change
    list.hide();
    list.clear_dirty();
    list.hide();
    assert!(!list.is_dirty());
}
