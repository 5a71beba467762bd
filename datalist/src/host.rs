//! The seam between the widget core and the document it lives in.

use datadom::{Document, ListenerKind, Origin, Rect, Tag, Viewport};

use crate::error::{DataListError, Result};
use crate::row::SourceItem;

/// Capabilities the widget needs from its host document.
///
/// Elements are addressed by ID. A *bound input* is an input whose `list`
/// attribute names a widget identifier.
pub trait Host {
    /// IDs of the inputs bound to `list`, in document order.
    fn bound_inputs(&self, list: &str) -> Vec<String>;

    /// The bound input that is `target` or an ancestor of it, as
    /// `(input id, list identifier)`.
    fn closest_bound_input(&self, target: &str) -> Option<(String, String)>;

    /// Identifier declared by a widget host element, if any.
    fn widget_identifier(&self, element: &str) -> Option<String>;

    /// Declarative rows of the widget host element.
    fn source_items(&self, element: &str) -> Vec<SourceItem>;

    fn input_value(&self, input: &str) -> Option<String>;

    fn set_input_value(&mut self, input: &str, value: &str) -> Result<()>;

    /// Raise a change notification on `input` carrying its current value.
    fn raise_change(&mut self, input: &str, origin: Origin) -> Result<()>;

    fn is_hidden(&self, element: &str) -> bool;

    /// Move focus to `element`. Returns true if it took focus.
    fn focus(&mut self, element: &str) -> bool;

    fn has_focus(&self, element: &str) -> bool;

    /// Viewport-relative bounding box of `element`.
    fn anchor_rect(&self, element: &str) -> Option<Rect>;

    fn viewport(&self) -> Viewport;

    fn install_listener(&mut self, kind: ListenerKind);
}

impl Host for Document {
    fn bound_inputs(&self, list: &str) -> Vec<String> {
        Document::bound_inputs(self, list)
            .into_iter()
            .map(|input| input.id.clone())
            .collect()
    }

    fn closest_bound_input(&self, target: &str) -> Option<(String, String)> {
        let input = Document::closest_bound_input(self, target)?;
        let list = input.list_target()?;
        Some((input.id.clone(), list.to_string()))
    }

    fn widget_identifier(&self, element: &str) -> Option<String> {
        self.get(element)
            .filter(|e| e.tag == Tag::DataList)
            .and_then(|e| e.get_attr("id"))
            .filter(|id| !id.is_empty())
            .map(str::to_string)
    }

    fn source_items(&self, element: &str) -> Vec<SourceItem> {
        self.list_options(element)
            .into_iter()
            .map(|option| {
                SourceItem::from_option(&option.value, option.get_attr("label"), &option.text_content())
            })
            .collect()
    }

    fn input_value(&self, input: &str) -> Option<String> {
        self.get(input).map(|e| e.value.clone())
    }

    fn set_input_value(&mut self, input: &str, value: &str) -> Result<()> {
        if self.set_value(input, value) {
            Ok(())
        } else {
            Err(DataListError::ElementNotFound(input.to_string()))
        }
    }

    fn raise_change(&mut self, input: &str, origin: Origin) -> Result<()> {
        self.dispatch_change(input, origin)
            .map(|_| ())
            .ok_or_else(|| DataListError::ElementNotFound(input.to_string()))
    }

    fn is_hidden(&self, element: &str) -> bool {
        self.get(element).map(|e| e.hidden).unwrap_or(true)
    }

    fn focus(&mut self, element: &str) -> bool {
        Document::focus(self, element) || self.is_focused(element)
    }

    fn has_focus(&self, element: &str) -> bool {
        self.is_focused(element)
    }

    fn anchor_rect(&self, element: &str) -> Option<Rect> {
        self.get(element).map(|e| e.rect)
    }

    fn viewport(&self) -> Viewport {
        Document::viewport(self)
    }

    fn install_listener(&mut self, kind: ListenerKind) {
        self.add_listener(kind);
    }
}
