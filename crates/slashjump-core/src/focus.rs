//! Focus-and-select action.
//!
//! Focus is the primary guarantee; scrolling and selection are
//! best-effort refinements. Nothing in here propagates an error to the
//! caller.

use tracing::debug;

use crate::dom::{Dom, NodeId};
use crate::visibility::is_in_viewport;

/// Focus `node` without disturbing scroll if the host allows it, bring
/// it into view when it is not fully visible, then pre-select its
/// current content so typing replaces it.
pub fn focus_and_select(dom: &mut dyn Dom, node: NodeId) {
    if let Err(err) = dom.focus(node, true) {
        debug!(node, error = %err, "scroll-suppressed focus failed, retrying plain");
        if let Err(err) = dom.focus(node, false) {
            debug!(node, error = %err, "focus failed");
            return;
        }
    }

    if !is_in_viewport(dom, node) {
        if let Err(err) = dom.scroll_into_view_center(node) {
            debug!(node, error = %err, "scroll into view failed");
        }
    }

    if let Err(err) = dom.select_all(node) {
        debug!(node, error = %err, "native select unavailable, using selection range");
        if let Some(value) = dom.value(node) {
            let len = value.chars().count() as u32;
            if let Err(err) = dom.set_selection_range(node, 0, len) {
                debug!(node, error = %err, "selection failed");
            }
        }
    }
}
