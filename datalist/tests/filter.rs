use datalist::{DataList, Row, SourceItem, substring_filter};

fn rows() -> Vec<Row> {
    vec![
        Row::new("de", Some("Germany".into()), Some("Berlin".into())),
        Row::new("fr", Some("France".into()), Some("Paris".into())),
        Row::new("it", Some("Italy".into()), None),
        Row::new("x-42", None, None),
    ]
}

fn expected(query: &str, rows: &[Row]) -> Vec<bool> {
    let q = query.to_lowercase();
    rows.iter()
        .map(|r| r.text().to_lowercase().contains(&q) || r.value().to_lowercase().contains(&q))
        .collect()
}

fn attached(items: Vec<SourceItem>) -> DataList {
    let mut list = DataList::new("countries");
    list.attach();
    list.populate_from_source(items);
    list
}

// ============================================================================
// Matching
// ============================================================================

#[test]
fn test_empty_query_matches_everything() {
    let rows = rows();
    let result = substring_filter("", &rows);
    assert_eq!(result.visible, vec![true; 4]);
    assert_eq!(result.last_visible, Some(3));
}

#[test]
fn test_visible_set_matches_definition() {
    let rows = rows();
    for query in ["", "a", "AN", "berlin", "fr", "x-4", "IT", "ceB", "zzz", "nyB"] {
        let result = substring_filter(query, &rows);
        assert_eq!(result.visible, expected(query, &rows), "query {query:?}");
    }
}

#[test]
fn test_matches_raw_value() {
    let rows = rows();
    // "de" only appears in the value of the first row
    let result = substring_filter("DE", &rows);
    assert_eq!(result.visible, vec![true, false, false, false]);
}

#[test]
fn test_matches_across_label_and_detail() {
    let rows = rows();
    // label "Germany" directly followed by detail "Berlin"
    let result = substring_filter("yber", &rows);
    assert_eq!(result.visible, vec![true, false, false, false]);
}

#[test]
fn test_no_match() {
    let rows = rows();
    let result = substring_filter("zzz", &rows);
    assert!(result.is_empty());
    assert_eq!(result.count(), 0);
    assert_eq!(result.last_visible, None);
}

// ============================================================================
// Last visible marker
// ============================================================================

#[test]
fn test_single_marker_on_last_visible_row() {
    let mut list = attached(vec![
        ("de", "Germany", "Berlin").into(),
        ("fr", "France", "Paris").into(),
        ("it", "Italy").into(),
        "x-42".into(),
    ]);

    for query in ["", "a", "r", "ger", "zzz", "Y"] {
        list.filter(query);
        let marked: Vec<usize> = list
            .rows()
            .iter()
            .enumerate()
            .filter(|(_, r)| r.has_no_border_bottom())
            .map(|(i, _)| i)
            .collect();
        let last = list.rows().iter().rposition(|r| !r.is_hidden());
        match last {
            Some(index) => assert_eq!(marked, vec![index], "query {query:?}"),
            None => assert!(marked.is_empty(), "query {query:?}"),
        }
        assert_eq!(list.last_visible(), last);
    }
}

#[test]
fn test_marker_skips_hidden_tail() {
    let mut list = attached(vec![
        ("a", "Alpha").into(),
        ("b", "Beta").into(),
        ("c", "Gamma").into(),
    ]);
    // "et" only matches Beta, so the marker moves off the last row
    list.filter("et");
    assert_eq!(list.last_visible(), Some(1));
    assert!(list.rows()[1].has_no_border_bottom());
    assert!(!list.rows()[2].has_no_border_bottom());
}

#[test]
fn test_empty_result_suppresses_panel() {
    let mut list = attached(vec![("a", "Alpha").into()]);
    list.show();
    list.filter("zzz");
    assert!(list.is_visible());
    assert!(list.is_suppressed());
    assert!(!list.is_panel_shown());

    list.filter("alp");
    assert!(!list.is_suppressed());
    assert!(list.is_panel_shown());
}
