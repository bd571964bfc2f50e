//! Minimal style reconciliation.
//!
//! Given the last applied and the newly evaluated `position`/`top`, emit the
//! fewest host writes that bring the inline style up to date: nothing when
//! both match, a single property write when one differs, and one `cssText`
//! rewrite when both differ so the browser restyles once.

use crate::host::Host;
use crate::model::css::{parse_declarations, serialize_declarations};
use crate::model::{CssPosition, CssTop, Declaration, ElementId, HostError};

/// Planned style change for one reconciliation.
#[derive(Debug, Clone, PartialEq)]
pub enum StyleChange {
    /// Inline style is already up to date.
    None,
    /// Only `position` differs.
    Position(CssPosition),
    /// Only `top` differs.
    Top(CssTop),
    /// Both differ: rewrite the whole inline style at once.
    Both {
        /// New `position`.
        position: CssPosition,
        /// New `top`.
        top: CssTop,
    },
}

/// Compare last and new values and pick the smallest change.
pub fn plan_style_update(
    last_position: &CssPosition,
    new_position: &CssPosition,
    last_top: &CssTop,
    new_top: &CssTop,
) -> StyleChange {
    let change_position = last_position != new_position;
    let change_top = last_top != new_top;

    match (change_position, change_top) {
        (true, true) => StyleChange::Both {
            position: new_position.clone(),
            top: new_top.clone(),
        },
        (true, false) => StyleChange::Position(new_position.clone()),
        (false, true) => StyleChange::Top(new_top.clone()),
        (false, false) => StyleChange::None,
    }
}

/// Rebuild inline style text with `position` and `top` leading.
///
/// Existing `position`/`top` declarations are dropped (exact property
/// match, so `margin-top` and friends survive). Unset values are omitted.
pub fn rewrite_css_text(css_text: &str, position: &CssPosition, top: &CssTop) -> String {
    let mut declarations = Vec::new();
    if let Some(position) = position.as_css() {
        declarations.push(Declaration::new("position", position));
    }
    if let Some(top) = top.to_css() {
        declarations.push(Declaration::new("top", top));
    }
    declarations.extend(
        parse_declarations(css_text)
            .into_iter()
            .filter(|d| !d.is("position") && !d.is("top")),
    );
    serialize_declarations(&declarations)
}

/// Issue the host writes for a planned change.
pub fn apply_style_change<H: Host + ?Sized>(
    host: &mut H,
    element: ElementId,
    change: &StyleChange,
) -> Result<(), HostError> {
    match change {
        StyleChange::None => Ok(()),
        StyleChange::Position(position) => {
            host.set_style_property(element, "position", position.as_css())
        }
        StyleChange::Top(top) => host.set_style_property(element, "top", top.to_css().as_deref()),
        StyleChange::Both { position, top } => {
            let current = host.css_text(element)?;
            host.set_css_text(element, &rewrite_css_text(&current, position, top))
        }
    }
}

/// Plan and apply in one step, returning what was done.
pub fn update_style<H: Host + ?Sized>(
    host: &mut H,
    element: ElementId,
    last_position: &CssPosition,
    new_position: &CssPosition,
    last_top: &CssTop,
    new_top: &CssTop,
) -> Result<StyleChange, HostError> {
    let change = plan_style_update(last_position, new_position, last_top, new_top);
    apply_style_change(host, element, &change)?;
    Ok(change)
}

#[cfg(test)]
#[path = "update_style_tests.rs"]
mod tests;
