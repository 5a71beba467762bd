//! Searchable dropdown list widget core.
//!
//! A [`DataList`] owns a set of rows and a floating panel that opens next to
//! any input bound to the widget's identifier. A [`Router`] serves all widgets
//! of one document: it routes pointer, keystroke, focus and resize events to
//! the matching widgets and runs the shared debounce/settle/throttle timers.
//! The document itself is reached through the [`Host`] trait, implemented for
//! [`datadom::Document`].

pub mod config;
pub mod error;
pub mod event;
pub mod filter;
pub mod host;
pub mod placement;
pub mod registry;
pub mod router;
pub mod row;
pub mod runtime;
pub mod timers;
pub mod widget;

pub use config::DataListConfig;
pub use error::{DataListError, Result};
pub use event::{Event, EventKind};
pub use filter::{FilterResult, substring_filter};
pub use host::Host;
pub use placement::{Placement, PlacementMode, Positioning, compute_placement};
pub use registry::Registry;
pub use router::Router;
pub use row::{Row, SourceItem};
pub use runtime::TokioClock;
pub use timers::{Clock, FilterRequest, Fired, ManualClock, PendingTimers, SystemClock, TimerSlot};
pub use widget::{DataList, InstanceId, Visibility};

pub mod prelude {
    pub use crate::{
        DataList, DataListConfig, Event, Host, InstanceId, ManualClock, Router, SourceItem,
        Visibility,
    };
    pub use datadom::{Document, Element, Origin, Rect, Viewport};
}
