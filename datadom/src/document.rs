use crate::element::{closest, find_element, find_element_mut, walk, Element, Tag};
use crate::focus::FocusState;
use crate::layout::Viewport;

/// Where a value change came from.
///
/// Widgets that write into inputs raise `Synthetic` changes so that routers
/// listening for keystrokes can tell them apart from real typing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Origin {
    User,
    Synthetic,
}

/// A change notification raised on an input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub target: String,
    pub value: String,
    pub origin: Origin,
}

/// Delegated listener kinds a widget router can install on the document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ListenerKind {
    Activate,
    Change,
    BlurSettle,
    Resize,
}

/// In-memory host document: an element tree plus focus, viewport and the
/// log of change notifications raised on its inputs.
#[derive(Debug)]
pub struct Document {
    root: Element,
    focus: FocusState,
    viewport: Viewport,
    notifications: Vec<Notification>,
    listeners: Vec<ListenerKind>,
}

impl Document {
    pub fn new(root: Element, viewport: Viewport) -> Self {
        Self {
            root,
            focus: FocusState::new(),
            viewport,
            notifications: Vec::new(),
            listeners: Vec::new(),
        }
    }

    pub fn root(&self) -> &Element {
        &self.root
    }

    pub fn get(&self, id: &str) -> Option<&Element> {
        find_element(&self.root, id)
    }

    pub fn get_mut(&mut self, id: &str) -> Option<&mut Element> {
        find_element_mut(&mut self.root, id)
    }

    // -------------------------------------------------------------------------
    // Tree mutation
    // -------------------------------------------------------------------------

    /// Append `child` to the element `parent_id`.
    /// Returns false if the parent does not exist.
    pub fn append_child(&mut self, parent_id: &str, child: Element) -> bool {
        match self.get_mut(parent_id) {
            Some(parent) => {
                parent.children.push(child);
                true
            }
            None => false,
        }
    }

    /// Detach the element `id` (and its subtree) from the tree.
    pub fn remove(&mut self, id: &str) -> Option<Element> {
        let removed = remove_from(&mut self.root, id);
        if removed.is_some() && self.focus.is_focused(id) {
            self.focus.blur();
        }
        removed
    }

    pub fn set_hidden(&mut self, id: &str, hidden: bool) -> bool {
        match self.get_mut(id) {
            Some(element) => {
                element.hidden = hidden;
                true
            }
            None => false,
        }
    }

    // -------------------------------------------------------------------------
    // Inputs
    // -------------------------------------------------------------------------

    /// All inputs whose `list` attribute equals `list_id`, in document order.
    pub fn bound_inputs(&self, list_id: &str) -> Vec<&Element> {
        walk(&self.root)
            .into_iter()
            .filter(|element| element.list_target() == Some(list_id))
            .collect()
    }

    /// The bound input that is `id` itself or an ancestor of it.
    pub fn closest_bound_input(&self, id: &str) -> Option<&Element> {
        closest(&self.root, id, |element| element.list_target().is_some())
    }

    /// Overwrite an input's value without raising a notification.
    pub fn set_value(&mut self, id: &str, value: impl Into<String>) -> bool {
        match self.get_mut(id) {
            Some(element) => {
                element.value = value.into();
                true
            }
            None => false,
        }
    }

    /// Simulate the user typing `value` into the input `id`.
    ///
    /// Returns the raised notification so a caller can forward it to a router.
    pub fn type_text(&mut self, id: &str, value: impl Into<String>) -> Option<Notification> {
        let value = value.into();
        if !self.set_value(id, value.clone()) {
            return None;
        }
        Some(self.notify(id, value, Origin::User))
    }

    /// Raise a change notification on `id` carrying its current value.
    pub fn dispatch_change(&mut self, id: &str, origin: Origin) -> Option<Notification> {
        let value = self.get(id)?.value.clone();
        Some(self.notify(id, value, origin))
    }

    fn notify(&mut self, id: &str, value: String, origin: Origin) -> Notification {
        let notification = Notification {
            target: id.to_string(),
            value,
            origin,
        };
        log::trace!("[document] change on {id} ({origin:?})");
        self.notifications.push(notification.clone());
        notification
    }

    /// Every notification raised so far, oldest first.
    pub fn notifications(&self) -> &[Notification] {
        &self.notifications
    }

    /// Notifications raised on one element.
    pub fn notifications_for(&self, id: &str) -> Vec<&Notification> {
        self.notifications
            .iter()
            .filter(|n| n.target == id)
            .collect()
    }

    /// Drain the notification log.
    pub fn take_notifications(&mut self) -> Vec<Notification> {
        std::mem::take(&mut self.notifications)
    }

    // -------------------------------------------------------------------------
    // Data-list markup
    // -------------------------------------------------------------------------

    /// Leading `option` children of the data-list host `list_id`.
    /// Reading stops at the first child that is not an option.
    pub fn list_options(&self, list_id: &str) -> Vec<&Element> {
        let Some(host) = self.get(list_id).filter(|e| e.tag == Tag::DataList) else {
            return Vec::new();
        };
        host.children
            .iter()
            .take_while(|child| child.tag == Tag::Option)
            .collect()
    }

    // -------------------------------------------------------------------------
    // Focus
    // -------------------------------------------------------------------------

    pub fn focused(&self) -> Option<&str> {
        self.focus.focused()
    }

    pub fn is_focused(&self, id: &str) -> bool {
        self.focus.is_focused(id)
    }

    /// Focus an element. Fails for unknown, hidden or non-focusable elements.
    /// Returns true if focus changed.
    pub fn focus(&mut self, id: &str) -> bool {
        let focusable = self
            .get(id)
            .map(|e| e.focusable && !e.hidden)
            .unwrap_or(false);
        if !focusable {
            log::debug!("[document] refusing to focus {id}");
            return false;
        }
        self.focus.focus(id)
    }

    pub fn blur(&mut self) -> Option<String> {
        let old = self.focus.focused().map(str::to_string);
        self.focus.blur();
        old
    }

    /// Move focus to the next focusable element (Tab).
    /// Returns `(previously_focused, newly_focused)` if focus moved.
    pub fn tab(&mut self) -> Option<(Option<String>, String)> {
        let old = self.focus.focused().map(str::to_string);
        let new = self.focus.focus_next(&self.root)?;
        Some((old, new))
    }

    // -------------------------------------------------------------------------
    // Viewport & listeners
    // -------------------------------------------------------------------------

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn set_viewport(&mut self, viewport: Viewport) {
        self.viewport = viewport;
    }

    pub fn add_listener(&mut self, kind: ListenerKind) {
        log::debug!("[document] listener installed: {kind:?}");
        self.listeners.push(kind);
    }

    pub fn listeners(&self) -> &[ListenerKind] {
        &self.listeners
    }
}

fn remove_from(element: &mut Element, id: &str) -> Option<Element> {
    if let Some(index) = element.children.iter().position(|c| c.id == id) {
        return Some(element.children.remove(index));
    }
    element
        .children
        .iter_mut()
        .find_map(|child| remove_from(child, id))
}
