//! Host-side key wiring.
//!
//! The harness owns what the engine must not: the one-time listener
//! attachment and the decision to forward capture-phase keydowns. The
//! attach guard is idempotent, so re-running page setup never doubles
//! the listener.

use tracing::debug;

use slashjump_core::hotkey::{KeyEvent, KeyOutcome};
use slashjump_core::Engine;

use crate::page::Page;

pub struct KeyHarness {
    engine: Engine,
    attached: bool,
}

impl KeyHarness {
    pub fn new(engine: Engine) -> Self {
        KeyHarness {
            engine,
            attached: false,
        }
    }

    /// Attach-if-not-already-attached; returns whether this call did the
    /// attaching.
    pub fn attach(&mut self) -> bool {
        if self.attached {
            debug!("key listener already attached");
            return false;
        }
        self.attached = true;
        true
    }

    pub fn is_attached(&self) -> bool {
        self.attached
    }

    pub fn engine(&self) -> &Engine {
        &self.engine
    }

    /// Forward a keydown to the engine, as the capture-phase listener
    /// would. Unattached harnesses drop events on the floor.
    pub fn keydown(&self, page: &mut Page, event: &mut KeyEvent) -> KeyOutcome {
        if !self.attached {
            return KeyOutcome::Ignored;
        }
        self.engine.on_keydown(page, event)
    }
}
