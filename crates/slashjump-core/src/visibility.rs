//! Geometry/visibility oracle.
//!
//! Pure functions of the live tree: no caching, no side effects. Both
//! checks re-read layout at call time so rapid repeated triggers always
//! see current geometry.

use crate::dom::{Dom, NodeId};

/// Collapsed/clipped elements report sub-pixel boxes; anything at or
/// below this extent is treated as not rendered.
const MIN_EXTENT: f32 = 1.0;

/// Whether `node` is presently visible and interactable.
///
/// False when the element is disabled, `aria-hidden`, or carries the
/// `hidden` attribute; when any self-or-ancestor computed style is
/// `display: none`, `visibility: hidden`, or fully transparent; or when
/// the rendered box has no meaningful extent.
pub fn is_visible(dom: &dyn Dom, node: NodeId) -> bool {
    if dom.attribute(node, "disabled").is_some() {
        return false;
    }
    if dom.attribute(node, "aria-hidden").as_deref() == Some("true") {
        return false;
    }
    if dom.attribute(node, "hidden").is_some() {
        return false;
    }

    let mut current = Some(node);
    while let Some(n) = current {
        let style = dom.computed_style(n);
        if style.display == "none" || style.visibility == "hidden" || style.opacity == 0.0 {
            return false;
        }
        current = dom.parent(n);
    }

    let rect = dom.bounding_rect(node);
    rect.width > MIN_EXTENT && rect.height > MIN_EXTENT
}

/// Whether `node`'s bounding box lies fully within the viewport.
///
/// Only consulted to decide if focusing needs a scroll first; never used
/// to filter candidates.
pub fn is_in_viewport(dom: &dyn Dom, node: NodeId) -> bool {
    let rect = dom.bounding_rect(node);
    let vp = dom.viewport();
    rect.x >= 0.0 && rect.y >= 0.0 && rect.right() <= vp.width && rect.bottom() <= vp.height
}
