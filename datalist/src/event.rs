use datadom::{Notification, Origin};

use crate::widget::InstanceId;

/// Events consumed by the router.
///
/// Document events carry the ID of the element they originated from; panel
/// events name the widget instance and the row under the pointer, if any.
#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    /// Pointer activation (click) on a document element.
    Click { target: String },
    /// Value change on a document element.
    Input {
        target: String,
        value: String,
        origin: Origin,
    },
    /// Document element lost focus.
    FocusOut { target: String },
    /// Viewport resized. Placement reads the viewport when the throttle fires,
    /// not from this event.
    Resize { width: f32, height: f32 },
    /// Pointer pressed inside a panel.
    PanelPointerDown { instance: InstanceId, row: Option<usize> },
    /// Touch started inside a panel.
    PanelTouchStart { instance: InstanceId, row: Option<usize> },
    /// Pointer activation inside a panel.
    PanelClick { instance: InstanceId, row: Option<usize> },
}

impl Event {
    pub fn kind(&self) -> EventKind {
        match self {
            Event::Click { .. } => EventKind::Click,
            Event::Input { .. } => EventKind::Input,
            Event::FocusOut { .. } => EventKind::FocusOut,
            Event::Resize { .. } => EventKind::Resize,
            Event::PanelPointerDown { .. } => EventKind::PanelPointerDown,
            Event::PanelTouchStart { .. } => EventKind::PanelTouchStart,
            Event::PanelClick { .. } => EventKind::PanelClick,
        }
    }

    /// A user keystroke on `target`.
    pub fn typed(target: impl Into<String>, value: impl Into<String>) -> Self {
        Event::Input {
            target: target.into(),
            value: value.into(),
            origin: Origin::User,
        }
    }
}

impl From<Notification> for Event {
    fn from(notification: Notification) -> Self {
        Event::Input {
            target: notification.target,
            value: notification.value,
            origin: notification.origin,
        }
    }
}

/// Event discriminant, used for logging at handler boundaries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    Click,
    Input,
    FocusOut,
    Resize,
    PanelPointerDown,
    PanelTouchStart,
    PanelClick,
    Timer,
}

impl EventKind {
    pub fn name(self) -> &'static str {
        match self {
            EventKind::Click => "click",
            EventKind::Input => "input",
            EventKind::FocusOut => "focusout",
            EventKind::Resize => "resize",
            EventKind::PanelPointerDown => "panel-pointerdown",
            EventKind::PanelTouchStart => "panel-touchstart",
            EventKind::PanelClick => "panel-click",
            EventKind::Timer => "timer",
        }
    }
}

impl std::fmt::Display for EventKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}
