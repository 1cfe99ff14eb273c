//! Eligibility classifier: is an element a plausible text-entry search
//! field at all?

use crate::dom::{Dom, NodeId};

/// Input types that accept free text. Everything else (password,
/// checkbox, radio, file, hidden, submit, button, ...) is rejected so a
/// loose attribute pattern can never select a non-text control.
const TEXT_INPUT_TYPES: [&str; 5] = ["search", "text", "url", "tel", "email"];

/// Whether `node` is a single-line text-entry field or a textarea.
pub fn is_searchy_input(dom: &dyn Dom, node: NodeId) -> bool {
    match dom.tag_name(node).to_ascii_lowercase().as_str() {
        "textarea" => true,
        "input" => {
            let declared = dom
                .attribute(node, "type")
                .unwrap_or_else(|| "text".to_string())
                .to_ascii_lowercase();
            TEXT_INPUT_TYPES.contains(&declared.as_str())
        }
        _ => false,
    }
}
