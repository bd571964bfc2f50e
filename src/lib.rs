//! scrollstick
//!
//! Keeps an element stuck to the top of the viewport while its container
//! scrolls past, and reconciles the element's inline style with the
//! fewest possible writes.
//!
//! The library follows a Pure Core / Impure Shell split: the stickiness
//! decision and style planning in [`stick`] are pure functions, the
//! [`stick::Stick`] instance is thin stateful glue, and every DOM access goes
//! through the [`host::Host`] trait. [`host::SimHost`] is an in-memory page
//! used by the [`scenario`] replayer and the tests.

pub mod config;
pub mod host;
pub mod logging;
pub mod model;
pub mod scenario;
pub mod stick;
