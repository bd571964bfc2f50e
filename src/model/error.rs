//! Error types for scrollstick.
//!
//! Errors are layered with `thiserror`, composing via `?` and `From`:
//!
//! - [`AppError`] - Top-level error returned by the binary
//!   - [`ConfigError`] - Config file could not be read or parsed
//!   - [`ScenarioError`] - Scenario file could not be loaded or replayed
//!   - [`LoggingError`] - Tracing subscriber setup failed
//! - [`StickError`] - A sticky instance could not be attached or evaluated
//!   - [`HostError`] - The host rejected a query or command
//!
//! The core never panics on bad host state: every host call returns a
//! `Result` and failures surface as [`StickError::Host`].

use super::geometry::ElementId;
use crate::config::ConfigError;
use crate::logging::LoggingError;
use crate::scenario::ScenarioError;
use thiserror::Error;

/// Top-level application error.
#[derive(Debug, Error)]
pub enum AppError {
    /// Configuration could not be loaded.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Scenario could not be loaded or replayed.
    #[error("Scenario error: {0}")]
    Scenario(#[from] ScenarioError),

    /// Logging could not be initialized.
    #[error("Logging error: {0}")]
    Logging(#[from] LoggingError),

    /// Writing the report failed.
    #[error("Output error: {0}")]
    Output(#[from] std::io::Error),
}

/// Failures reported by a [`Host`](crate::host::Host).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HostError {
    /// The host does not know this element.
    ///
    /// Usually the element was removed from the document while an instance
    /// still referenced it.
    #[error("Unknown element {0}")]
    UnknownElement(ElementId),

    /// The element has no parent, so it cannot be wrapped.
    #[error("Element {0} is detached (no parent)")]
    Detached(ElementId),
}

/// Failures attaching or driving a sticky instance.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StickError {
    /// The target has no parent and no `stick_within` container was given.
    #[error("No container for {target}: pass stick_within or attach the target to a parent")]
    NoContainer {
        /// The target element.
        target: ElementId,
    },

    /// A host query or command failed.
    #[error("Host error: {0}")]
    Host(#[from] HostError),
}
