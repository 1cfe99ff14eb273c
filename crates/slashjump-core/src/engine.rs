//! Discovery orchestrator and public surface.

use tracing::debug;

use crate::adapters::AdapterRegistry;
use crate::dom::{Dom, NodeId};
use crate::focus::focus_and_select;
use crate::hotkey::{handle_keydown, KeyEvent, KeyOutcome};
use crate::scanner::find_generic;

/// Two-tier discovery: site adapters first, generic heuristics second.
///
/// Holds only the adapter registry; every invocation re-resolves against
/// the live document, so repeated triggers are independent and
/// idempotent on an unchanged page.
pub struct Engine {
    registry: AdapterRegistry,
}

impl Engine {
    /// Engine with the builtin adapter table.
    pub fn new() -> Self {
        Engine {
            registry: AdapterRegistry::builtin(),
        }
    }

    pub fn with_registry(registry: AdapterRegistry) -> Self {
        Engine { registry }
    }

    pub fn registry(&self) -> &AdapterRegistry {
        &self.registry
    }

    pub fn registry_mut(&mut self) -> &mut AdapterRegistry {
        &mut self.registry
    }

    /// Resolve the page's most plausible primary search input.
    ///
    /// A matched adapter rule is authoritative and skips the generic scan
    /// entirely, even if a better generic match might exist. The generic
    /// scan covers the light document only; shadow descent is adapter
    /// opt-in.
    pub fn find_search_input(&self, dom: &mut dyn Dom) -> Option<NodeId> {
        if let Some(node) = self.registry.find_site_specific(dom) {
            return Some(node);
        }
        debug!("no adapter result, running generic scan");
        find_generic(dom)
    }

    /// The one exposed entry point: find the search input and move focus
    /// and selection into it. A silent no-op when nothing is found.
    pub fn focus_search(&self, dom: &mut dyn Dom) -> bool {
        match self.find_search_input(dom) {
            Some(node) => {
                focus_and_select(dom, node);
                true
            }
            None => false,
        }
    }

    /// Run the key-event boundary: qualify `event`, discover, focus, and
    /// consume the event on success.
    pub fn on_keydown(&self, dom: &mut dyn Dom, event: &mut KeyEvent) -> KeyOutcome {
        handle_keydown(self, dom, event)
    }
}

impl Default for Engine {
    fn default() -> Self {
        Engine::new()
    }
}
