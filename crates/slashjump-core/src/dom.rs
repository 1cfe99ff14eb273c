use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Opaque handle to an element in the live document tree.
///
/// Handles are owned by the host document; the engine never caches them
/// across invocations and re-resolves from scratch on every trigger.
pub type NodeId = u32;

/// Opaque handle to a traversal root: the document itself or an open
/// shadow tree attached to some element.
pub type RootId = u32;

#[derive(Debug, Error, Clone)]
pub enum DomError {
    #[error("Node {0} not found")]
    NodeNotFound(NodeId),

    #[error("Node {0} is stale (removed from the document)")]
    Stale(NodeId),

    #[error("Traversal root {0} is restricted")]
    RestrictedRoot(RootId),

    #[error("Invalid selector: {0}")]
    InvalidSelector(String),

    #[error("Not supported: {0}")]
    NotSupported(&'static str),

    #[error("Host error: {0}")]
    Host(String),
}

/// Viewport-relative bounding geometry, as the host's layout reports it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }
}

/// Current extents of the browsing surface.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

/// The slice of computed style the engine consults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Style {
    pub display: String,
    pub visibility: String,
    pub opacity: f32,
}

impl Default for Style {
    fn default() -> Self {
        Style {
            display: "block".to_string(),
            visibility: "visible".to_string(),
            opacity: 1.0,
        }
    }
}

/// The host document boundary.
///
/// Everything the engine knows about a page flows through this trait:
/// selector queries, attribute and geometry reads, shadow-root exposure,
/// and the handful of actions discovery may perform (invoking a declared
/// search affordance, focusing, selecting). Implementations must reflect
/// the live tree at call time; the engine holds no state between calls.
///
/// All methods are synchronous. Discovery runs to completion inside the
/// handling of a single key event, with no suspension points.
pub trait Dom {
    /// Hostname of the page's location, used for adapter matching.
    fn hostname(&self) -> String;

    fn viewport(&self) -> Viewport;

    /// Whether the whole document is in a rich-edit mode.
    fn design_mode(&self) -> bool {
        false
    }

    fn document_root(&self) -> RootId;

    /// All elements matching `selector` within `root`, in document order,
    /// without descending into shadow trees.
    fn query_selector_all(&self, root: RootId, selector: &str) -> Result<Vec<NodeId>, DomError>;

    /// The open shadow tree attached to `node`, if any. Closed trees are
    /// reported as `None`; hosts that refuse the read return an error,
    /// which callers treat as "skip this subtree".
    fn shadow_root(&self, node: NodeId) -> Result<Option<RootId>, DomError>;

    /// Nearest self-or-ancestor matching `selector`, within `node`'s tree.
    fn closest(&self, node: NodeId, selector: &str) -> Option<NodeId>;

    fn parent(&self, node: NodeId) -> Option<NodeId>;

    fn tag_name(&self, node: NodeId) -> String;

    fn attribute(&self, node: NodeId, name: &str) -> Option<String>;

    fn computed_style(&self, node: NodeId) -> Style;

    fn bounding_rect(&self, node: NodeId) -> Rect;

    /// Current textual value for value-bearing controls.
    fn value(&self, node: NodeId) -> Option<String>;

    fn click(&mut self, node: NodeId) -> Result<(), DomError>;

    /// Force a synchronous layout pass so an immediately following query
    /// observes current geometry. Not a delay.
    fn force_reflow(&mut self);

    /// Move keyboard focus to `node`. Hosts that cannot honor
    /// `prevent_scroll` return `DomError::NotSupported`; callers retry
    /// without suppression.
    fn focus(&mut self, node: NodeId, prevent_scroll: bool) -> Result<(), DomError>;

    fn scroll_into_view_center(&mut self, node: NodeId) -> Result<(), DomError>;

    /// Native select-all for controls that support it.
    fn select_all(&mut self, node: NodeId) -> Result<(), DomError>;

    fn set_selection_range(&mut self, node: NodeId, start: u32, end: u32)
        -> Result<(), DomError>;
}
