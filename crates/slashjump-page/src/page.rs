//! The in-memory page: an arena of elements across a document tree and
//! any number of shadow trees, implementing the engine's `Dom` boundary.
//!
//! Interaction state (focus, selection, clicks, scrolls) is recorded so
//! tests can assert on what the engine did. Switches exist to simulate
//! host quirks: missing `preventScroll` support, missing native select,
//! and traversal-restricted subtrees.

use std::collections::HashMap;

use tracing::debug;

use slashjump_core::dom::{Dom, DomError, NodeId, Rect, RootId, Style, Viewport};

use crate::node::{El, ShadowMode};
use crate::selector::SelectorList;

const DEFAULT_RECT: Rect = Rect {
    x: 10.0,
    y: 10.0,
    width: 160.0,
    height: 24.0,
};

#[derive(Debug)]
struct NodeData {
    tag: String,
    attrs: HashMap<String, String>,
    style: Style,
    rect: Rect,
    value: Option<String>,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
    shadow: Option<(ShadowMode, RootId)>,
}

#[derive(Debug, Default)]
struct Root {
    children: Vec<NodeId>,
    poisoned: bool,
}

#[derive(Debug, Clone)]
enum ClickAction {
    SetDisplay { target: NodeId, value: String },
    SetAttr { target: NodeId, name: String, value: String },
}

pub struct Page {
    hostname: String,
    viewport: Viewport,
    design_mode: bool,
    nodes: Vec<NodeData>,
    roots: Vec<Root>,
    click_actions: HashMap<NodeId, Vec<ClickAction>>,
    supports_prevent_scroll: bool,
    supports_native_select: bool,
    focused: Option<NodeId>,
    selection: Option<(NodeId, u32, u32)>,
    focus_calls: Vec<(NodeId, bool)>,
    clicks: Vec<NodeId>,
    scrolls: Vec<NodeId>,
    reflows: usize,
}

impl Page {
    pub fn new(hostname: &str, viewport_width: f32, viewport_height: f32) -> Self {
        Page {
            hostname: hostname.to_string(),
            viewport: Viewport {
                width: viewport_width,
                height: viewport_height,
            },
            design_mode: false,
            nodes: Vec::new(),
            roots: vec![Root::default()],
            click_actions: HashMap::new(),
            supports_prevent_scroll: true,
            supports_native_select: true,
            focused: None,
            selection: None,
            focus_calls: Vec::new(),
            clicks: Vec::new(),
            scrolls: Vec::new(),
            reflows: 0,
        }
    }

    /// Append an element tree to the document root; returns its node id.
    pub fn append(&mut self, el: El) -> NodeId {
        self.insert(el, 0, None)
    }

    fn insert(&mut self, el: El, tree: RootId, parent: Option<NodeId>) -> NodeId {
        let id = self.nodes.len() as NodeId;
        let mut style = Style::default();
        if let Some(display) = &el.display {
            style.display = display.clone();
        }
        if let Some(visibility) = &el.visibility {
            style.visibility = visibility.clone();
        }
        if let Some(opacity) = el.opacity {
            style.opacity = opacity;
        }
        self.nodes.push(NodeData {
            tag: el.tag.clone(),
            attrs: el.attrs.iter().cloned().collect(),
            style,
            rect: el.rect.unwrap_or(DEFAULT_RECT),
            value: el.value.clone(),
            parent,
            children: Vec::new(),
            shadow: None,
        });
        match parent {
            Some(p) => self.nodes[p as usize].children.push(id),
            None => self.roots[tree as usize].children.push(id),
        }

        for child in el.children {
            self.insert(child, tree, Some(id));
        }

        if let Some((mode, shadow_children)) = el.shadow {
            let shadow_root = self.roots.len() as RootId;
            self.roots.push(Root::default());
            self.nodes[id as usize].shadow = Some((mode, shadow_root));
            for child in shadow_children {
                self.insert(child, shadow_root, None);
            }
        }

        id
    }

    // ============================================================
    // Test scaffolding
    // ============================================================

    pub fn set_design_mode(&mut self, on: bool) {
        self.design_mode = on;
    }

    /// Simulate a host whose focus call rejects scroll suppression.
    pub fn set_supports_prevent_scroll(&mut self, supported: bool) {
        self.supports_prevent_scroll = supported;
    }

    /// Simulate a control without a native select-all.
    pub fn set_supports_native_select(&mut self, supported: bool) {
        self.supports_native_select = supported;
    }

    /// Make traversal of `host`'s shadow tree fail, as an
    /// access-restricted root would.
    pub fn poison_shadow(&mut self, host: NodeId) {
        if let Some((_, root)) = self.nodes[host as usize].shadow {
            self.roots[root as usize].poisoned = true;
        }
    }

    /// Clicking `clicked` changes `target`'s computed display.
    pub fn on_click_set_display(&mut self, clicked: NodeId, target: NodeId, value: &str) {
        self.click_actions
            .entry(clicked)
            .or_default()
            .push(ClickAction::SetDisplay {
                target,
                value: value.to_string(),
            });
    }

    /// Clicking `clicked` sets an attribute on `target`.
    pub fn on_click_set_attr(&mut self, clicked: NodeId, target: NodeId, name: &str, value: &str) {
        self.click_actions
            .entry(clicked)
            .or_default()
            .push(ClickAction::SetAttr {
                target,
                name: name.to_string(),
                value: value.to_string(),
            });
    }

    /// Lookup by `id` attribute, across the document and all shadow trees.
    pub fn by_id(&self, id: &str) -> Option<NodeId> {
        (0..self.nodes.len() as NodeId)
            .find(|&n| self.nodes[n as usize].attrs.get("id").map(String::as_str) == Some(id))
    }

    pub fn focused(&self) -> Option<NodeId> {
        self.focused
    }

    pub fn selection(&self) -> Option<(NodeId, u32, u32)> {
        self.selection
    }

    pub fn focus_calls(&self) -> &[(NodeId, bool)] {
        &self.focus_calls
    }

    pub fn clicks(&self) -> &[NodeId] {
        &self.clicks
    }

    pub fn scrolls(&self) -> &[NodeId] {
        &self.scrolls
    }

    pub fn reflows(&self) -> usize {
        self.reflows
    }

    // ============================================================
    // Accessors for the selector matcher
    // ============================================================

    pub(crate) fn tag_of(&self, node: NodeId) -> &str {
        &self.nodes[node as usize].tag
    }

    pub(crate) fn attr_of(&self, node: NodeId, name: &str) -> Option<String> {
        self.nodes[node as usize].attrs.get(name).cloned()
    }

    pub(crate) fn parent_of(&self, node: NodeId) -> Option<NodeId> {
        self.nodes[node as usize].parent
    }

    fn collect_matches(
        &self,
        list: &SelectorList,
        nodes: &[NodeId],
        out: &mut Vec<NodeId>,
    ) {
        for &node in nodes {
            if list.matches(self, node) {
                out.push(node);
            }
            let children = self.nodes[node as usize].children.clone();
            self.collect_matches(list, &children, out);
        }
    }
}

impl Dom for Page {
    fn hostname(&self) -> String {
        self.hostname.clone()
    }

    fn viewport(&self) -> Viewport {
        self.viewport
    }

    fn design_mode(&self) -> bool {
        self.design_mode
    }

    fn document_root(&self) -> RootId {
        0
    }

    fn query_selector_all(&self, root: RootId, selector: &str) -> Result<Vec<NodeId>, DomError> {
        let root_data = self
            .roots
            .get(root as usize)
            .ok_or(DomError::RestrictedRoot(root))?;
        if root_data.poisoned {
            return Err(DomError::RestrictedRoot(root));
        }
        let list = SelectorList::parse(selector)?;
        let mut out = Vec::new();
        self.collect_matches(&list, &root_data.children, &mut out);
        Ok(out)
    }

    fn shadow_root(&self, node: NodeId) -> Result<Option<RootId>, DomError> {
        match self.nodes[node as usize].shadow {
            Some((ShadowMode::Open, root)) => Ok(Some(root)),
            // Closed encapsulation is simply not exposed.
            Some((ShadowMode::Closed, _)) | None => Ok(None),
        }
    }

    fn closest(&self, node: NodeId, selector: &str) -> Option<NodeId> {
        let list = SelectorList::parse(selector).ok()?;
        let mut current = Some(node);
        while let Some(n) = current {
            if list.matches(self, n) {
                return Some(n);
            }
            current = self.parent_of(n);
        }
        None
    }

    fn parent(&self, node: NodeId) -> Option<NodeId> {
        self.parent_of(node)
    }

    fn tag_name(&self, node: NodeId) -> String {
        self.nodes[node as usize].tag.clone()
    }

    fn attribute(&self, node: NodeId, name: &str) -> Option<String> {
        self.attr_of(node, name)
    }

    fn computed_style(&self, node: NodeId) -> Style {
        self.nodes[node as usize].style.clone()
    }

    fn bounding_rect(&self, node: NodeId) -> Rect {
        self.nodes[node as usize].rect
    }

    fn value(&self, node: NodeId) -> Option<String> {
        self.nodes[node as usize].value.clone()
    }

    fn click(&mut self, node: NodeId) -> Result<(), DomError> {
        self.clicks.push(node);
        if let Some(actions) = self.click_actions.get(&node).cloned() {
            for action in actions {
                match action {
                    ClickAction::SetDisplay { target, value } => {
                        debug!(node, target, display = %value, "click effect");
                        self.nodes[target as usize].style.display = value;
                    }
                    ClickAction::SetAttr {
                        target,
                        name,
                        value,
                    } => {
                        self.nodes[target as usize].attrs.insert(name, value);
                    }
                }
            }
        }
        Ok(())
    }

    fn force_reflow(&mut self) {
        self.reflows += 1;
    }

    fn focus(&mut self, node: NodeId, prevent_scroll: bool) -> Result<(), DomError> {
        self.focus_calls.push((node, prevent_scroll));
        if prevent_scroll && !self.supports_prevent_scroll {
            return Err(DomError::NotSupported("focus with prevent_scroll"));
        }
        self.focused = Some(node);
        Ok(())
    }

    fn scroll_into_view_center(&mut self, node: NodeId) -> Result<(), DomError> {
        self.scrolls.push(node);
        Ok(())
    }

    fn select_all(&mut self, node: NodeId) -> Result<(), DomError> {
        if !self.supports_native_select {
            return Err(DomError::NotSupported("native select"));
        }
        match self.nodes[node as usize].tag.as_str() {
            "input" | "textarea" => {
                let len = self.nodes[node as usize]
                    .value
                    .as_ref()
                    .map(|v| v.chars().count() as u32)
                    .unwrap_or(0);
                self.selection = Some((node, 0, len));
                Ok(())
            }
            _ => Err(DomError::NotSupported("native select")),
        }
    }

    fn set_selection_range(
        &mut self,
        node: NodeId,
        start: u32,
        end: u32,
    ) -> Result<(), DomError> {
        self.selection = Some((node, start, end));
        Ok(())
    }
}
