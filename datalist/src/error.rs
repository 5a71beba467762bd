//! Error types for the data-list widget.

use std::any::Any;

use thiserror::Error;

use crate::widget::InstanceId;

/// Errors raised by widget operations and event handlers.
///
/// None of these are fatal: the router logs them at the handler boundary and
/// the affected widget degrades to hidden/inert.
#[derive(Debug, Error)]
pub enum DataListError {
    /// The widget host element carries no identifier.
    #[error("data-list does not have a target id set")]
    MissingIdentifier,

    /// A referenced host element does not exist (anymore).
    #[error("element '{0}' not found in the host document")]
    ElementNotFound(String),

    /// The instance is not registered with the router.
    #[error("no data-list instance {0}")]
    UnknownInstance(InstanceId),

    /// A row index was outside the current row set.
    #[error("row {index} out of range ({len} rows)")]
    RowOutOfRange {
        /// Requested index.
        index: usize,
        /// Number of rows at the time of the request.
        len: usize,
    },

    /// The instance has been detached from the document.
    #[error("data-list instance {0} is detached")]
    Detached(InstanceId),

    /// Configuration failed validation.
    #[error("invalid data-list configuration: {0}")]
    InvalidConfig(String),

    /// Configuration JSON was malformed.
    #[error("malformed data-list configuration")]
    ConfigJson(#[from] serde_json::Error),

    /// An event handler panicked.
    #[error("handler '{handler}' panicked: {message}")]
    HandlerPanicked {
        /// Name of the handler that panicked.
        handler: &'static str,
        /// Panic message extracted from the payload.
        message: String,
    },
}

/// Result alias used throughout the crate.
pub type Result<T, E = DataListError> = std::result::Result<T, E>;

/// Extract a human-readable message from a panic payload.
///
/// Panics carry either `&str` or `String` payloads; anything else falls back
/// to a generic message.
pub fn extract_panic_message(panic: &Box<dyn Any + Send>) -> String {
    if let Some(s) = panic.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = panic.downcast_ref::<String>() {
        s.clone()
    } else {
        "Unknown panic".to_string()
    }
}
