//! Sticking: the pure decision, style reconciliation, and the per-element
//! glue that drives both through a [`Host`](crate::host::Host).

pub mod evaluate;
pub mod instance;
pub mod update_style;

pub use evaluate::{evaluate_stick, Evaluation, Measurements, ScrollMotion, StickFilter};
pub use instance::{Stick, Tick, Transition};
pub use update_style::{apply_style_change, plan_style_update, update_style, StyleChange};
