//! In-memory page model implementing [`Host`].
//!
//! Elements have a document-space top and a height; their bounding rect is
//! derived from the current scroll offset and their own inline
//! `position`/`top`, which is enough to replay sticking without a browser.
//! Every command and event is recorded for inspection.

use super::Host;
use crate::model::css::{parse_declarations, serialize_declarations};
use crate::model::{CssPosition, CssTop, Declaration, ElementId, HostError, Rect, StickEvent};
use std::collections::BTreeSet;

/// A command received from the sticky core.
#[derive(Debug, Clone, PartialEq)]
pub enum HostCommand {
    /// Full inline style rewrite.
    SetCssText {
        /// Element written.
        element: ElementId,
        /// New style text.
        css_text: String,
    },
    /// Single property write (`None` removes).
    SetStyleProperty {
        /// Element written.
        element: ElementId,
        /// Property name.
        property: String,
        /// New value.
        value: Option<String>,
    },
    /// Class added.
    AddClass {
        /// Element written.
        element: ElementId,
        /// Class name.
        class: String,
    },
    /// Class removed.
    RemoveClass {
        /// Element written.
        element: ElementId,
        /// Class name.
        class: String,
    },
    /// Guard wrapper inserted around a target.
    InsertGuardWrapper {
        /// Wrapped element.
        target: ElementId,
        /// New wrapper.
        wrapper: ElementId,
    },
    /// Scroll/resize listeners attached or detached.
    SetListening {
        /// Target element.
        target: ElementId,
        /// Whether listeners are now attached.
        listening: bool,
    },
}

#[derive(Debug, Clone)]
struct SimElement {
    name: String,
    parent: Option<ElementId>,
    document_top: f64,
    height: f64,
    style: Vec<Declaration>,
    classes: Vec<String>,
}

impl SimElement {
    fn declared(&self, property: &str) -> Option<&str> {
        self.style
            .iter()
            .rev()
            .find(|d| d.is(property))
            .map(|d| d.value.as_str())
    }
}

/// Simulated page.
#[derive(Debug, Default)]
pub struct SimHost {
    elements: Vec<SimElement>,
    scroll_y: f64,
    listening: BTreeSet<ElementId>,
    commands: Vec<HostCommand>,
    events: Vec<(ElementId, StickEvent)>,
}

impl SimHost {
    /// Empty page scrolled to the top.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an element laid out at `document_top` with the given height.
    pub fn add_element(
        &mut self,
        name: impl Into<String>,
        parent: Option<ElementId>,
        document_top: f64,
        height: f64,
    ) -> ElementId {
        let id = ElementId::new(self.elements.len());
        self.elements.push(SimElement {
            name: name.into(),
            parent,
            document_top,
            height,
            style: Vec::new(),
            classes: Vec::new(),
        });
        id
    }

    /// Set the window scroll offset.
    pub fn scroll_to(&mut self, y: f64) {
        self.scroll_y = y;
    }

    /// Change an element's layout height (content reflow).
    pub fn resize_element(&mut self, element: ElementId, height: f64) -> Result<(), HostError> {
        self.element_mut(element)?.height = height;
        Ok(())
    }

    /// Name of an element.
    pub fn name(&self, element: ElementId) -> Result<&str, HostError> {
        Ok(self.element(element)?.name.as_str())
    }

    /// Class list of an element.
    pub fn classes(&self, element: ElementId) -> Result<&[String], HostError> {
        Ok(&self.element(element)?.classes)
    }

    /// Whether an element carries `class`.
    pub fn has_class(&self, element: ElementId, class: &str) -> bool {
        self.element(element)
            .map(|e| e.classes.iter().any(|c| c == class))
            .unwrap_or(false)
    }

    /// Whether listeners are attached for `target`.
    pub fn is_listening(&self, target: ElementId) -> bool {
        self.listening.contains(&target)
    }

    /// Commands received so far.
    pub fn commands(&self) -> &[HostCommand] {
        &self.commands
    }

    /// Drain recorded commands.
    pub fn take_commands(&mut self) -> Vec<HostCommand> {
        std::mem::take(&mut self.commands)
    }

    /// Events dispatched so far.
    pub fn events(&self) -> &[(ElementId, StickEvent)] {
        &self.events
    }

    /// Drain recorded events, keeping only their names.
    pub fn take_event_names(&mut self) -> Vec<&'static str> {
        std::mem::take(&mut self.events)
            .into_iter()
            .map(|(_, event)| event.name())
            .collect()
    }

    fn element(&self, element: ElementId) -> Result<&SimElement, HostError> {
        self.elements
            .get(element.get())
            .ok_or(HostError::UnknownElement(element))
    }

    fn element_mut(&mut self, element: ElementId) -> Result<&mut SimElement, HostError> {
        self.elements
            .get_mut(element.get())
            .ok_or(HostError::UnknownElement(element))
    }

    fn layout_height(element: &SimElement) -> f64 {
        match element.declared("height").map(CssTop::parse) {
            Some(CssTop::Px(height)) => height,
            _ => element.height,
        }
    }
}

impl Host for SimHost {
    fn scroll_y(&self) -> f64 {
        self.scroll_y
    }

    fn parent(&self, element: ElementId) -> Result<Option<ElementId>, HostError> {
        Ok(self.element(element)?.parent)
    }

    fn bounding_rect(&self, element: ElementId) -> Result<Rect, HostError> {
        let el = self.element(element)?;
        let offset = match el.declared("top").map(CssTop::parse) {
            Some(CssTop::Px(px)) => px,
            _ => 0.0,
        };
        let position = el.declared("position").map(CssPosition::parse);
        let top = match position {
            Some(CssPosition::Fixed) => offset,
            Some(CssPosition::Relative) => el.document_top + offset - self.scroll_y,
            _ => el.document_top - self.scroll_y,
        };
        Ok(Rect::from_top_height(top, Self::layout_height(el)))
    }

    fn offset_top(&self, element: ElementId) -> Result<f64, HostError> {
        Ok(self.element(element)?.document_top)
    }

    fn offset_height(&self, element: ElementId) -> Result<f64, HostError> {
        Ok(Self::layout_height(self.element(element)?))
    }

    fn style_property(
        &self,
        element: ElementId,
        property: &str,
    ) -> Result<Option<String>, HostError> {
        Ok(self.element(element)?.declared(property).map(str::to_string))
    }

    fn css_text(&self, element: ElementId) -> Result<String, HostError> {
        Ok(serialize_declarations(&self.element(element)?.style))
    }

    fn set_css_text(&mut self, element: ElementId, css_text: &str) -> Result<(), HostError> {
        self.element_mut(element)?.style = parse_declarations(css_text);
        self.commands.push(HostCommand::SetCssText {
            element,
            css_text: css_text.to_string(),
        });
        Ok(())
    }

    fn set_style_property(
        &mut self,
        element: ElementId,
        property: &str,
        value: Option<&str>,
    ) -> Result<(), HostError> {
        let style = &mut self.element_mut(element)?.style;
        match value {
            Some(value) => match style.iter().position(|d| d.is(property)) {
                Some(index) => {
                    style[index].value = value.to_string();
                    let mut seen = false;
                    style.retain(|d| {
                        if !d.is(property) {
                            return true;
                        }
                        let keep = !seen;
                        seen = true;
                        keep
                    });
                }
                None => style.push(Declaration::new(property, value)),
            },
            None => style.retain(|d| !d.is(property)),
        }
        self.commands.push(HostCommand::SetStyleProperty {
            element,
            property: property.to_string(),
            value: value.map(str::to_string),
        });
        Ok(())
    }

    fn add_class(&mut self, element: ElementId, class: &str) -> Result<(), HostError> {
        let classes = &mut self.element_mut(element)?.classes;
        if !classes.iter().any(|c| c == class) {
            classes.push(class.to_string());
        }
        self.commands.push(HostCommand::AddClass {
            element,
            class: class.to_string(),
        });
        Ok(())
    }

    fn remove_class(&mut self, element: ElementId, class: &str) -> Result<(), HostError> {
        self.element_mut(element)?.classes.retain(|c| c != class);
        self.commands.push(HostCommand::RemoveClass {
            element,
            class: class.to_string(),
        });
        Ok(())
    }

    fn insert_guard_wrapper(&mut self, target: ElementId) -> Result<ElementId, HostError> {
        let el = self.element(target)?;
        let parent = el.parent.ok_or(HostError::Detached(target))?;
        let name = format!("{}-guard", el.name);
        let (document_top, height) = (el.document_top, el.height);

        let wrapper = self.add_element(name, Some(parent), document_top, height);
        self.element_mut(target)?.parent = Some(wrapper);
        self.commands
            .push(HostCommand::InsertGuardWrapper { target, wrapper });
        Ok(wrapper)
    }

    fn set_listening(&mut self, target: ElementId, listening: bool) {
        if listening {
            self.listening.insert(target);
        } else {
            self.listening.remove(&target);
        }
        self.commands
            .push(HostCommand::SetListening { target, listening });
    }

    fn dispatch(&mut self, target: ElementId, event: &StickEvent) {
        self.events.push((target, event.clone()));
    }
}

#[cfg(test)]
#[path = "sim_tests.rs"]
mod tests;
