pub mod document;
pub mod element;
pub mod focus;
pub mod layout;

pub use document::{Document, ListenerKind, Notification, Origin};
pub use element::{closest, find_element, find_element_mut, Element, Tag};
pub use focus::FocusState;
pub use layout::{Rect, Viewport};
