//! Search-input discovery engine.
//!
//! Given the live document of an arbitrary page, resolve the single
//! element that most plausibly is the page's primary search input and
//! move keyboard focus and selection into it. Discovery is two-tiered:
//! hand-authored site adapter rules first, a generic weighted-score scan
//! second. The host document is abstracted behind the [`dom::Dom`]
//! trait; `slashjump-page` provides an in-memory implementation.

pub mod adapters;
pub mod dom;
pub mod eligibility;
pub mod engine;
pub mod focus;
pub mod hotkey;
pub mod query;
pub mod scanner;
pub mod visibility;

#[cfg(test)]
pub(crate) mod testutil;

pub use adapters::{AdapterPack, AdapterRegistry, AdapterRule, HostPredicate, PackError, Strategy};
pub use dom::{Dom, DomError, NodeId, Rect, RootId, Style, Viewport};
pub use engine::Engine;
pub use focus::focus_and_select;
pub use hotkey::{KeyEvent, KeyOutcome};
