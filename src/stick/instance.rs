//! A sticky element bound to a host.
//!
//! [`Stick`] owns the per-element state (original inline style, last applied
//! values, last scroll offset) and turns each scroll or resize notification
//! into one evaluation plus the minimal host writes.

use super::evaluate::{evaluate_stick, Evaluation, Measurements, ScrollMotion, StickFilter};
use super::update_style::{update_style, StyleChange};
use crate::host::Host;
use crate::model::{
    CssPosition, CssTop, ElementId, HostError, StickDetail, StickError, StickEvent, StickOptions,
    TopSpacing,
};
use serde::Serialize;
use std::fmt;
use tracing::debug;

/// Change in stuck state produced by one tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Transition {
    /// Became stuck.
    Stuck,
    /// Stopped being stuck.
    Unstuck,
    /// Stuck state did not change.
    Unchanged,
}

/// Outcome of one evaluation tick.
#[derive(Debug, Clone, PartialEq)]
pub struct Tick {
    /// Raw evaluation result.
    pub evaluation: Evaluation,
    /// Stuck-state change.
    pub transition: Transition,
    /// Style writes that were issued.
    pub style_change: StyleChange,
}

type SecondaryAction = Box<dyn FnMut(&StickDetail)>;

/// A sticky element.
pub struct Stick {
    target: ElementId,
    container: ElementId,
    wrapper: ElementId,
    guard: Option<ElementId>,
    options: StickOptions,
    original_position: CssPosition,
    original_top: CssTop,
    initialized: bool,
    stuck: bool,
    position: CssPosition,
    top: CssTop,
    last_scroll_y: f64,
    initial_tick: Option<Tick>,
    secondary_action: Option<SecondaryAction>,
}

impl fmt::Debug for Stick {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Stick")
            .field("target", &self.target)
            .field("container", &self.container)
            .field("wrapper", &self.wrapper)
            .field("initialized", &self.initialized)
            .field("stuck", &self.stuck)
            .field("position", &self.position)
            .field("top", &self.top)
            .finish_non_exhaustive()
    }
}

impl Stick {
    /// Make `target` sticky and initialize it.
    ///
    /// The container defaults to the target's parent, resolved before any
    /// guard wrapper is inserted. The target's inline `position` and `top`
    /// are cached so they can be restored when it unsticks. Initialization
    /// evaluates once, so a page loaded mid-scroll sticks immediately.
    ///
    /// # Errors
    ///
    /// [`StickError::NoContainer`] when there is neither a `stick_within`
    /// option nor a parent, or any host failure.
    pub fn attach<H: Host + ?Sized>(
        host: &mut H,
        target: ElementId,
        options: StickOptions,
    ) -> Result<Self, StickError> {
        let container = match options.stick_within {
            Some(container) => container,
            None => host
                .parent(target)?
                .ok_or(StickError::NoContainer { target })?,
        };

        let original_position = CssPosition::parse(
            host.style_property(target, "position")?
                .as_deref()
                .unwrap_or_default(),
        );
        let original_top = CssTop::parse(
            host.style_property(target, "top")?
                .as_deref()
                .unwrap_or_default(),
        );

        let (wrapper, guard) = if options.guard_height {
            let guard = host.insert_guard_wrapper(target)?;
            set_guard_height(host, guard, target)?;
            (guard, Some(guard))
        } else {
            let parent = host.parent(target)?.ok_or(HostError::Detached(target))?;
            (parent, None)
        };

        let mut stick = Self {
            target,
            container,
            wrapper,
            guard,
            options,
            position: original_position.clone(),
            top: original_top.clone(),
            original_position,
            original_top,
            initialized: false,
            stuck: false,
            last_scroll_y: host.scroll_y(),
            initial_tick: None,
            secondary_action: None,
        };
        stick.initial_tick = stick.init(host)?;
        Ok(stick)
    }

    /// Run `action` after every evaluation with that tick's detail.
    pub fn with_secondary_action(mut self, action: impl FnMut(&StickDetail) + 'static) -> Self {
        self.secondary_action = Some(Box::new(action));
        self
    }

    /// Attach listeners and evaluate. Re-initializes when already initialized.
    ///
    /// Returns the tick produced by the initial evaluation.
    pub fn init<H: Host + ?Sized>(&mut self, host: &mut H) -> Result<Option<Tick>, StickError> {
        if self.initialized {
            self.destroy(host)?;
        }

        host.dispatch(self.target, &StickEvent::BeforeInit);
        host.set_listening(self.target, true);
        self.initialized = true;
        let tick = self.set_style(host)?;
        host.dispatch(self.target, &StickEvent::AfterInit);

        debug!(element = %self.target, container = %self.container, "stick initialized");
        Ok(tick)
    }

    /// Restore the original style, remove classes and detach listeners.
    pub fn destroy<H: Host + ?Sized>(&mut self, host: &mut H) -> Result<(), StickError> {
        if !self.initialized {
            return Ok(());
        }

        host.dispatch(self.target, &StickEvent::BeforeDestroy);
        self.unset_style(host)?;
        host.set_listening(self.target, false);
        host.dispatch(self.target, &StickEvent::AfterDestroy);
        self.initialized = false;

        debug!(element = %self.target, "stick destroyed");
        Ok(())
    }

    /// Evaluate after a scroll.
    ///
    /// Returns `None` when the instance is not initialized.
    pub fn on_scroll<H: Host + ?Sized>(&mut self, host: &mut H) -> Result<Option<Tick>, StickError> {
        if !self.initialized {
            return Ok(None);
        }

        let was_sticky = self.stuck;
        let last_position = self.position.clone();
        let last_top = self.top.clone();
        let y = host.scroll_y();

        let measurements = self.measure(host)?;
        let evaluation = evaluate_stick(
            &measurements,
            ScrollMotion::new(self.last_scroll_y, y),
            StickFilter {
                delta: self.options.delta,
                direction: self.options.direction,
            },
            was_sticky,
        );
        self.last_scroll_y = y;

        let (new_position, new_top) = if evaluation.make_sticky {
            (evaluation.position.clone(), CssTop::Px(evaluation.top))
        } else {
            (self.original_position.clone(), self.original_top.clone())
        };
        let detail = StickDetail {
            was_sticky,
            is_sticky: evaluation.make_sticky,
            last_position: last_position.clone(),
            new_position: new_position.clone(),
            last_top: last_top.clone(),
            new_top: new_top.clone(),
            stick_within: self.container,
            stick_after: self.options.stick_after,
            top_spacing: self.options.top_spacing,
            delta: self.options.delta,
            direction: self.options.direction,
        };

        let target = self.target;
        let (transition, style_change) = match (was_sticky, evaluation.make_sticky) {
            (false, true) => {
                host.dispatch(target, &StickEvent::BeforeStick(detail.clone()));
                let change =
                    update_style(host, target, &last_position, &new_position, &last_top, &new_top)?;
                host.add_class(target, &self.options.sticky_class)?;
                host.dispatch(target, &StickEvent::AfterStick(detail.clone()));
                debug!(element = %target, y, position = %new_position, top = %new_top, "stuck");
                (Transition::Stuck, change)
            }
            (true, false) => {
                host.dispatch(target, &StickEvent::BeforeUnstick(detail.clone()));
                let change =
                    update_style(host, target, &last_position, &new_position, &last_top, &new_top)?;
                host.remove_class(target, &self.options.sticky_class)?;
                host.dispatch(target, &StickEvent::AfterUnstick(detail.clone()));
                debug!(element = %target, y, "unstuck");
                (Transition::Unstuck, change)
            }
            (true, true) => {
                let change =
                    update_style(host, target, &last_position, &new_position, &last_top, &new_top)?;
                (Transition::Unchanged, change)
            }
            (false, false) => (Transition::Unchanged, StyleChange::None),
        };

        self.stuck = evaluation.make_sticky;
        self.position = new_position;
        self.top = new_top;

        if let Some(action) = self.secondary_action.as_mut() {
            action(&detail);
        }

        Ok(Some(Tick {
            evaluation,
            transition,
            style_change,
        }))
    }

    /// Re-measure after a resize: restore the original style, refresh the
    /// guard height and evaluate again.
    ///
    /// Debouncing is the host's job; call this once the resize settles.
    pub fn on_resize<H: Host + ?Sized>(&mut self, host: &mut H) -> Result<Option<Tick>, StickError> {
        self.unset_style(host)?;
        self.set_style(host)
    }

    /// Whether the target is currently stuck.
    pub fn is_sticky(&self) -> bool {
        self.stuck
    }

    /// Tick from the evaluation performed while attaching.
    pub fn initial_tick(&self) -> Option<&Tick> {
        self.initial_tick.as_ref()
    }

    /// Whether listeners are attached.
    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    /// The sticky element.
    pub fn target(&self) -> ElementId {
        self.target
    }

    /// Container bounding the stick.
    pub fn container(&self) -> ElementId {
        self.container
    }

    /// The target's wrapper: the guard element, or its parent without one.
    pub fn wrapper(&self) -> ElementId {
        self.wrapper
    }

    /// The guard element, when `guard_height` is on.
    pub fn guard(&self) -> Option<ElementId> {
        self.guard
    }

    /// Options this instance was attached with.
    pub fn options(&self) -> &StickOptions {
        &self.options
    }

    fn measure<H: Host + ?Sized>(&self, host: &H) -> Result<Measurements, HostError> {
        let candidate = self.options.stick_after.unwrap_or(self.wrapper);
        let top_limit = if host.offset_top(candidate)? >= host.offset_top(self.container)? {
            candidate
        } else {
            self.container
        };

        let distance = match self.options.top_spacing {
            TopSpacing::Fixed(px) => px,
            TopSpacing::Element(element) => host.bounding_rect(element)?.bottom,
        };

        Ok(Measurements {
            target: host.bounding_rect(self.target)?,
            wrapper_top: host.bounding_rect(self.wrapper)?.top,
            container_bottom: host.bounding_rect(self.container)?.bottom,
            top_limit_top: host.bounding_rect(top_limit)?.top,
            distance,
        })
    }

    fn set_style<H: Host + ?Sized>(&mut self, host: &mut H) -> Result<Option<Tick>, StickError> {
        if !self.initialized {
            return Ok(None);
        }
        if let Some(guard) = self.guard {
            set_guard_height(host, guard, self.target)?;
        }
        self.on_scroll(host)
    }

    fn unset_style<H: Host + ?Sized>(&mut self, host: &mut H) -> Result<(), StickError> {
        update_style(
            host,
            self.target,
            &self.position,
            &self.original_position,
            &self.top,
            &self.original_top,
        )?;
        host.remove_class(self.target, &self.options.sticky_class)?;
        if let Some(guard) = self.guard {
            host.set_style_property(guard, "height", None)?;
        }
        self.position = self.original_position.clone();
        self.top = self.original_top.clone();
        self.stuck = false;
        Ok(())
    }
}

fn set_guard_height<H: Host + ?Sized>(
    host: &mut H,
    guard: ElementId,
    target: ElementId,
) -> Result<(), HostError> {
    let height = CssTop::Px(host.offset_height(target)?).to_css();
    host.set_style_property(guard, "height", height.as_deref())
}

#[cfg(test)]
#[path = "instance_tests.rs"]
mod tests;
