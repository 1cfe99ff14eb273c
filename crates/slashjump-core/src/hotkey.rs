//! Key-event boundary.
//!
//! The host dispatches every capture-phase keydown here; the engine acts
//! only on a plain `/` pressed outside any editable context, and marks
//! the event consumed only when it actually focused something, so the
//! page never loses a keystroke to a failed discovery.

use crate::dom::{Dom, NodeId};
use crate::engine::Engine;
use crate::focus::focus_and_select;

const EDITABLE_SELECTOR: &str = "input, textarea, [contenteditable='true']";
const EDITABLE_ROLES: [&str; 3] = ["textbox", "combobox", "searchbox"];

/// A keydown as seen by the host's listener. `default_prevented` and
/// `propagation_stopped` are read back by the host to suppress the
/// page's own handling.
#[derive(Debug, Clone)]
pub struct KeyEvent {
    pub key: String,
    pub ctrl: bool,
    pub meta: bool,
    pub alt: bool,
    pub shift: bool,
    pub default_prevented: bool,
    pub propagation_stopped: bool,
    /// Element the event was dispatched to, when any.
    pub target: Option<NodeId>,
}

impl KeyEvent {
    /// A modifier-free keydown.
    pub fn plain(key: &str, target: Option<NodeId>) -> Self {
        KeyEvent {
            key: key.to_string(),
            ctrl: false,
            meta: false,
            alt: false,
            shift: false,
            default_prevented: false,
            propagation_stopped: false,
            target,
        }
    }

    pub fn with_shift(mut self) -> Self {
        self.shift = true;
        self
    }

    pub fn with_ctrl(mut self) -> Self {
        self.ctrl = true;
        self
    }

    pub fn with_meta(mut self) -> Self {
        self.meta = true;
        self
    }

    pub fn with_alt(mut self) -> Self {
        self.alt = true;
        self
    }

    fn has_modifiers(&self) -> bool {
        self.ctrl || self.meta || self.alt || self.shift
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyOutcome {
    /// The search input was resolved and focused; the event was consumed.
    Focused(NodeId),
    /// The event did not qualify or nothing was found; the page sees it
    /// untouched.
    Ignored,
}

/// Whether `node` sits in an editable context: an input/textarea/
/// contenteditable, or under an element with an editable ARIA role.
pub fn is_editable_target(dom: &dyn Dom, node: NodeId) -> bool {
    if dom.closest(node, EDITABLE_SELECTOR).is_some() {
        return true;
    }
    EDITABLE_ROLES
        .iter()
        .any(|role| dom.closest(node, &format!("[role='{role}']")).is_some())
}

pub(crate) fn handle_keydown(
    engine: &Engine,
    dom: &mut dyn Dom,
    event: &mut KeyEvent,
) -> KeyOutcome {
    if event.default_prevented {
        return KeyOutcome::Ignored;
    }
    if dom.design_mode() {
        return KeyOutcome::Ignored;
    }
    // Plain '/' only; shift stays off so '?' never triggers.
    if event.key != "/" || event.has_modifiers() {
        return KeyOutcome::Ignored;
    }
    if let Some(target) = event.target {
        if is_editable_target(dom, target) {
            return KeyOutcome::Ignored;
        }
    }

    match engine.find_search_input(dom) {
        Some(node) => {
            event.default_prevented = true;
            event.propagation_stopped = true;
            focus_and_select(dom, node);
            KeyOutcome::Focused(node)
        }
        None => KeyOutcome::Ignored,
    }
}
