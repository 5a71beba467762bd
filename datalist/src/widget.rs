//! Data-list widget instance: rows, filtering, placement and selection.

use std::sync::atomic::{AtomicU64, Ordering};

use datadom::{Origin, Rect, Viewport};
use log::{debug, warn};

use crate::config::DataListConfig;
use crate::error::{DataListError, Result};
use crate::filter::substring_filter;
use crate::host::Host;
use crate::placement::Placement;
use crate::row::{Row, SourceItem};

/// Unique identifier for a widget instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct InstanceId(u64);

impl InstanceId {
    fn new() -> Self {
        static COUNTER: AtomicU64 = AtomicU64::new(0);
        Self(COUNTER.fetch_add(1, Ordering::SeqCst))
    }
}

impl std::fmt::Display for InstanceId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "__datalist_{}", self.0)
    }
}

/// Open/closed state of the panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Visibility {
    #[default]
    Hidden,
    Visible,
}

/// A searchable dropdown attached to every input bound to its identifier.
///
/// The panel is either [`Visibility::Hidden`] or [`Visibility::Visible`]. A
/// visible panel whose last filter matched nothing is *suppressed*: it stays
/// logically open but is not drawn until a later filter matches again.
///
/// # Example
///
/// ```
/// # use datalist::DataList;
/// let mut list = DataList::new("colors");
/// list.attach();
/// list.add_row("red", None, None);
/// list.add_row("green", Some("Green"), Some("like grass"));
///
/// list.show();
/// list.filter("GRASS");
/// assert_eq!(list.visible_values(), vec!["green"]);
/// ```
#[derive(Debug)]
pub struct DataList {
    id: InstanceId,
    /// Correlates the widget with bound inputs. `None` leaves it inert.
    identifier: Option<String>,
    /// Host element in the document, if mounted from markup.
    element: Option<String>,
    rows: Vec<Row>,
    visibility: Visibility,
    /// Index of the last visible row.
    last_visible: Option<usize>,
    placement: Option<Placement>,
    /// Input the panel was last placed against.
    anchor: Option<String>,
    attached: bool,
    dirty: bool,
}

impl DataList {
    /// Create a detached widget for `identifier`.
    pub fn new(identifier: impl Into<String>) -> Self {
        let identifier = identifier.into();
        Self::with_identifier((!identifier.is_empty()).then_some(identifier))
    }

    /// Create a detached widget that may lack an identifier.
    pub fn with_identifier(identifier: Option<String>) -> Self {
        Self {
            id: InstanceId::new(),
            identifier: identifier.filter(|id| !id.is_empty()),
            element: None,
            rows: Vec::new(),
            visibility: Visibility::Hidden,
            last_visible: None,
            placement: None,
            anchor: None,
            attached: false,
            dirty: false,
        }
    }

    /// Remember the document element hosting this widget.
    pub fn with_element(mut self, element: impl Into<String>) -> Self {
        self.element = Some(element.into());
        self
    }

    pub fn id(&self) -> InstanceId {
        self.id
    }

    pub fn identifier(&self) -> Option<&str> {
        self.identifier.as_deref()
    }

    pub fn element(&self) -> Option<&str> {
        self.element.as_deref()
    }

    /// Name used in log lines.
    pub(crate) fn log_name(&self) -> &str {
        self.identifier.as_deref().unwrap_or("<unnamed>")
    }

    // -------------------------------------------------------------------------
    // Lifecycle
    // -------------------------------------------------------------------------

    pub fn is_attached(&self) -> bool {
        self.attached
    }

    /// Mark the widget as part of the document.
    ///
    /// A widget without identifier attaches fine but stays inert.
    pub fn attach(&mut self) {
        if self.identifier.is_none() {
            warn!("[datalist] {} does not have a target id set; it will stay inert", self.id);
        }
        self.attached = true;
        self.dirty = true;
    }

    /// Take the widget out of the document. It ends up hidden.
    pub fn detach(&mut self) {
        self.attached = false;
        self.visibility = Visibility::Hidden;
        self.dirty = true;
    }

    // -------------------------------------------------------------------------
    // Rows
    // -------------------------------------------------------------------------

    /// Replace every row with `items`, in order.
    pub fn populate_from_source<I, T>(&mut self, items: I)
    where
        I: IntoIterator<Item = T>,
        T: Into<SourceItem>,
    {
        self.rows.clear();
        self.add_rows(items);
        debug!("[datalist] {} populated with {} rows", self.log_name(), self.rows.len());
    }

    /// Append one row.
    pub fn add_row(&mut self, value: impl Into<String>, label: Option<&str>, detail: Option<&str>) {
        self.rows.push(Row::new(
            value,
            label.map(str::to_string),
            detail.map(str::to_string),
        ));
        self.refresh_last_visible();
    }

    /// Append rows in iteration order.
    pub fn add_rows<I, T>(&mut self, items: I)
    where
        I: IntoIterator<Item = T>,
        T: Into<SourceItem>,
    {
        self.rows
            .extend(items.into_iter().map(|item| Row::from(item.into())));
        self.refresh_last_visible();
    }

    /// Remove the row at `index`, returning it.
    pub fn remove_row(&mut self, index: usize) -> Option<Row> {
        if index >= self.rows.len() {
            return None;
        }
        let row = self.rows.remove(index);
        self.refresh_last_visible();
        Some(row)
    }

    /// Remove every row.
    pub fn clear_rows(&mut self) {
        self.rows.clear();
        self.refresh_last_visible();
    }

    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    pub fn row(&self, index: usize) -> Option<&Row> {
        self.rows.get(index)
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Values of the rows not filtered out, in display order.
    pub fn visible_values(&self) -> Vec<&str> {
        self.rows
            .iter()
            .filter(|row| !row.hidden)
            .map(Row::value)
            .collect()
    }

    /// Index of the last visible row, the one drawn without a bottom border.
    pub fn last_visible(&self) -> Option<usize> {
        self.last_visible
    }

    fn refresh_last_visible(&mut self) {
        self.last_visible = self.rows.iter().rposition(|row| !row.hidden);
        for (index, row) in self.rows.iter_mut().enumerate() {
            row.no_border_bottom = Some(index) == self.last_visible;
        }
        self.dirty = true;
    }

    // -------------------------------------------------------------------------
    // Filtering
    // -------------------------------------------------------------------------

    /// Show only rows whose text or value contains `query`, ignoring case.
    ///
    /// Returns false without touching anything when the widget is detached or
    /// has no rows.
    pub fn filter(&mut self, query: &str) -> bool {
        if !self.attached || self.rows.is_empty() {
            return false;
        }

        let result = substring_filter(query, &self.rows);
        for (row, visible) in self.rows.iter_mut().zip(&result.visible) {
            row.hidden = !visible;
        }
        self.refresh_last_visible();

        debug!(
            "[datalist] {} filter {:?}: {}/{} rows visible",
            self.log_name(),
            query,
            result.count(),
            self.rows.len()
        );
        true
    }

    // -------------------------------------------------------------------------
    // Visibility
    // -------------------------------------------------------------------------

    pub fn visibility(&self) -> Visibility {
        self.visibility
    }

    pub fn is_visible(&self) -> bool {
        self.visibility == Visibility::Visible
    }

    /// Open the panel. No-op while detached.
    pub fn show(&mut self) {
        if self.attached && self.visibility != Visibility::Visible {
            debug!("[datalist] {} shown", self.log_name());
            self.visibility = Visibility::Visible;
            self.dirty = true;
        }
    }

    /// Close the panel.
    pub fn hide(&mut self) {
        if self.visibility != Visibility::Hidden {
            debug!("[datalist] {} hidden", self.log_name());
            self.visibility = Visibility::Hidden;
            self.dirty = true;
        }
    }

    /// Open but with no matching row to draw.
    pub fn is_suppressed(&self) -> bool {
        self.is_visible() && self.last_visible.is_none()
    }

    /// Whether the panel is actually drawn.
    pub fn is_panel_shown(&self) -> bool {
        self.is_visible() && self.last_visible.is_some()
    }

    // -------------------------------------------------------------------------
    // Placement
    // -------------------------------------------------------------------------

    pub fn placement(&self) -> Option<&Placement> {
        self.placement.as_ref()
    }

    pub fn anchor(&self) -> Option<&str> {
        self.anchor.as_deref()
    }

    /// Recompute placement against the input `anchor_id` with bounding box
    /// `anchor`. No-op while detached.
    pub fn place(
        &mut self,
        anchor_id: &str,
        anchor: Rect,
        viewport: Viewport,
        config: &DataListConfig,
    ) -> Option<&Placement> {
        if !self.attached {
            return None;
        }
        let placement = Placement::compute(anchor, viewport, config);
        debug!(
            "[datalist] {} placed {:?} against {}",
            self.log_name(),
            placement.mode,
            anchor_id
        );
        self.placement = Some(placement);
        self.anchor = Some(anchor_id.to_string());
        self.dirty = true;
        self.placement.as_ref()
    }

    // -------------------------------------------------------------------------
    // Selection
    // -------------------------------------------------------------------------

    /// Choose the row at `index`.
    ///
    /// Writes the row value into every bound input, raises one synthetic
    /// change on each, focuses the first visible one and closes the panel.
    pub fn select_row<H: Host + ?Sized>(&mut self, index: usize, host: &mut H) -> Result<()> {
        if !self.attached {
            return Err(DataListError::Detached(self.id));
        }
        let value = self
            .rows
            .get(index)
            .map(|row| row.value().to_string())
            .ok_or(DataListError::RowOutOfRange {
                index,
                len: self.rows.len(),
            })?;
        let identifier = self
            .identifier
            .clone()
            .ok_or(DataListError::MissingIdentifier)?;

        let targets = host.bound_inputs(&identifier);
        for input in &targets {
            host.set_input_value(input, &value)?;
            host.raise_change(input, Origin::Synthetic)?;
        }

        if let Some(visible) = targets.iter().find(|input| !host.is_hidden(input)) {
            host.focus(visible);
        }

        debug!(
            "[datalist] {} selected {:?} into {} input(s)",
            identifier,
            value,
            targets.len()
        );
        self.hide();
        Ok(())
    }

    // -------------------------------------------------------------------------
    // Dirty tracking
    // -------------------------------------------------------------------------

    /// Check if the widget changed since the last [`clear_dirty`](Self::clear_dirty).
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    pub fn clear_dirty(&mut self) {
        self.dirty = false;
    }
}
