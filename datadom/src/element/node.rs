use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};

use crate::layout::Rect;

static NEXT_ID: AtomicU64 = AtomicU64::new(0);

fn generate_id(prefix: &str) -> String {
    let id = NEXT_ID.fetch_add(1, Ordering::Relaxed);
    format!("{prefix}-{id}")
}

/// Element kinds the host document knows about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Tag {
    #[default]
    Box,
    Text,
    Input,
    /// Host element of a data-list widget. Its `id` is the widget identifier.
    DataList,
    /// Declarative row descriptor, child of a `DataList`.
    Option,
}

#[derive(Debug, Clone)]
pub struct Element {
    // Identity
    pub id: String,
    pub tag: Tag,
    pub attributes: HashMap<String, String>,

    // Content
    /// Current value (inputs and options).
    pub value: String,
    /// Own text content, excluding children.
    pub text: String,
    pub children: Vec<Element>,

    // Geometry, relative to the viewport
    pub rect: Rect,

    // State
    pub hidden: bool,
    pub focusable: bool,
}

impl Default for Element {
    fn default() -> Self {
        Self {
            id: generate_id("el"),
            tag: Tag::Box,
            attributes: HashMap::new(),
            value: String::new(),
            text: String::new(),
            children: Vec::new(),
            rect: Rect::default(),
            hidden: false,
            focusable: false,
        }
    }
}

impl Element {
    pub fn box_() -> Self {
        Self {
            id: generate_id("box"),
            ..Default::default()
        }
    }

    pub fn text(content: impl Into<String>) -> Self {
        Self {
            id: generate_id("text"),
            tag: Tag::Text,
            text: content.into(),
            ..Default::default()
        }
    }

    /// Create a focusable text input.
    pub fn input() -> Self {
        Self {
            id: generate_id("input"),
            tag: Tag::Input,
            focusable: true,
            ..Default::default()
        }
    }

    /// Create a data-list host element. `id` doubles as the widget identifier
    /// and is mirrored into the `id` attribute.
    pub fn data_list(id: impl Into<String>) -> Self {
        let id = id.into();
        Self {
            id: id.clone(),
            tag: Tag::DataList,
            focusable: true,
            ..Default::default()
        }
        .attr("id", id)
    }

    /// Create a data-list host element without an `id` attribute.
    pub fn anonymous_data_list() -> Self {
        Self {
            id: generate_id("datalist"),
            tag: Tag::DataList,
            focusable: true,
            ..Default::default()
        }
    }

    /// Create a row descriptor with the given value.
    pub fn option(value: impl Into<String>) -> Self {
        Self {
            id: generate_id("option"),
            tag: Tag::Option,
            value: value.into(),
            ..Default::default()
        }
    }

    // Identity
    pub fn id(mut self, id: impl Into<String>) -> Self {
        self.id = id.into();
        self
    }

    pub fn attr(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.insert(name.into(), value.into());
        self
    }

    /// Declare the data-list this input is bound to.
    pub fn list(self, target: impl Into<String>) -> Self {
        self.attr("list", target)
    }

    /// Set the `label` attribute of an option.
    pub fn label(self, label: impl Into<String>) -> Self {
        self.attr("label", label)
    }

    // Content
    pub fn value(mut self, value: impl Into<String>) -> Self {
        self.value = value.into();
        self
    }

    pub fn content(mut self, text: impl Into<String>) -> Self {
        self.text = text.into();
        self
    }

    pub fn child(mut self, child: Element) -> Self {
        self.children.push(child);
        self
    }

    // Geometry
    pub fn rect(mut self, rect: Rect) -> Self {
        self.rect = rect;
        self
    }

    // State
    pub fn hidden(mut self, hidden: bool) -> Self {
        self.hidden = hidden;
        self
    }

    // Accessors
    pub fn get_attr(&self, name: &str) -> Option<&str> {
        self.attributes.get(name).map(String::as_str)
    }

    /// The data-list identifier this element is bound to, if it is an input
    /// carrying a non-empty `list` attribute.
    pub fn list_target(&self) -> Option<&str> {
        if self.tag != Tag::Input {
            return None;
        }
        self.get_attr("list").filter(|target| !target.is_empty())
    }

    /// Concatenated text of this element and all descendants, in document order.
    pub fn text_content(&self) -> String {
        let mut out = self.text.clone();
        for child in &self.children {
            out.push_str(&child.text_content());
        }
        out
    }
}
