//! Case-insensitive substring filtering.

use crate::row::Row;

/// Outcome of filtering a row set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterResult {
    /// Visibility per row, in row order.
    pub visible: Vec<bool>,
    /// Index of the last visible row, if any.
    pub last_visible: Option<usize>,
}

impl FilterResult {
    pub fn is_empty(&self) -> bool {
        self.last_visible.is_none()
    }

    /// Number of visible rows.
    pub fn count(&self) -> usize {
        self.visible.iter().filter(|v| **v).count()
    }
}

/// Does `row` match an already lowercased query?
///
/// The row's rendered text is checked first, then its raw value.
pub fn row_matches(needle: &str, row: &Row) -> bool {
    row.text().to_lowercase().contains(needle) || row.value().to_lowercase().contains(needle)
}

/// Filter rows by `query`.
///
/// Linear scan; an empty query matches every row.
///
/// # Example
///
/// ```
/// # use datalist::{Row, substring_filter};
/// let rows = vec![
///     Row::new("de", Some("Germany".into()), None),
///     Row::new("fr", Some("France".into()), None),
/// ];
/// let result = substring_filter("GER", &rows);
/// assert_eq!(result.visible, vec![true, false]);
/// assert_eq!(result.last_visible, Some(0));
/// ```
pub fn substring_filter(query: &str, rows: &[Row]) -> FilterResult {
    let needle = query.to_lowercase();
    let mut last_visible = None;

    let visible = rows
        .iter()
        .enumerate()
        .map(|(index, row)| {
            let visible = row_matches(&needle, row);
            if visible {
                last_visible = Some(index);
            }
            visible
        })
        .collect();

    FilterResult {
        visible,
        last_visible,
    }
}
