//! Domain model types (pure).
//!
//! All types in this module are plain data: CSS values, geometry,
//! options, events and errors. Nothing here talks to a host.

pub mod css;
pub mod error;
pub mod event;
pub mod geometry;
pub mod options;

// Re-export for convenience
pub use css::{CssPosition, CssTop, Declaration};
pub use error::{AppError, HostError, StickError};
pub use event::{StickDetail, StickEvent};
pub use geometry::{ElementId, Rect};
pub use options::{Direction, InvalidDirection, StickOptions, TopSpacing, DEFAULT_STICKY_CLASS};
