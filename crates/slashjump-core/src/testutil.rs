//! Canned in-crate document stub for unit tests.
//!
//! Answers selector queries from a routing table instead of matching
//! selectors for real; scenario coverage against a full page model lives
//! in the `slashjump-page` test suite.

use std::collections::HashMap;

use crate::dom::{Dom, DomError, NodeId, Rect, RootId, Style, Viewport};

#[derive(Debug, Default)]
pub(crate) struct StubElement {
    pub tag: String,
    pub attrs: HashMap<String, String>,
    pub rect: Option<Rect>,
    pub style: Style,
    pub parent: Option<NodeId>,
    /// Selectors for which `closest` reports a hit on this element.
    pub closest_hits: Vec<String>,
    pub value: Option<String>,
}

#[derive(Debug, Default)]
pub(crate) struct StubDom {
    pub hostname: String,
    pub viewport: Viewport,
    pub design_mode: bool,
    pub elements: Vec<StubElement>,
    /// selector -> matches, for queries against the document root.
    pub routes: HashMap<String, Vec<NodeId>>,
    pub clicks: Vec<NodeId>,
}

impl StubDom {
    pub fn new(hostname: &str) -> Self {
        StubDom {
            hostname: hostname.to_string(),
            viewport: Viewport {
                width: 1280.0,
                height: 800.0,
            },
            ..Default::default()
        }
    }

    pub fn add_element(&mut self, tag: &str) -> NodeId {
        let id = self.elements.len() as NodeId;
        self.elements.push(StubElement {
            tag: tag.to_string(),
            ..Default::default()
        });
        id
    }

    pub fn add_input(&mut self, declared_type: &str) -> NodeId {
        let id = self.add_element("input");
        self.set_attr(id, "type", declared_type);
        id
    }

    fn elem_mut(&mut self, node: NodeId) -> &mut StubElement {
        &mut self.elements[node as usize]
    }

    fn elem(&self, node: NodeId) -> &StubElement {
        &self.elements[node as usize]
    }

    pub fn set_attr(&mut self, node: NodeId, name: &str, value: &str) {
        self.elem_mut(node)
            .attrs
            .insert(name.to_string(), value.to_string());
    }

    pub fn set_rect(&mut self, node: NodeId, x: f32, y: f32, width: f32, height: f32) {
        self.elem_mut(node).rect = Some(Rect {
            x,
            y,
            width,
            height,
        });
    }

    pub fn set_display(&mut self, node: NodeId, display: &str) {
        self.elem_mut(node).style.display = display.to_string();
    }

    pub fn set_opacity(&mut self, node: NodeId, opacity: f32) {
        self.elem_mut(node).style.opacity = opacity;
    }

    pub fn set_parent(&mut self, node: NodeId, parent: NodeId) {
        self.elem_mut(node).parent = Some(parent);
    }

    /// Route `selector` to a fixed match list for document-root queries.
    pub fn route(&mut self, selector: &str, nodes: &[NodeId]) {
        self.routes.insert(selector.to_string(), nodes.to_vec());
    }

    /// Make `closest(node, selector)` report a hit.
    pub fn mark_closest(&mut self, node: NodeId, selector: &str) {
        self.elem_mut(node).closest_hits.push(selector.to_string());
    }
}

impl Dom for StubDom {
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

    fn query_selector_all(&self, _root: RootId, selector: &str) -> Result<Vec<NodeId>, DomError> {
        Ok(self.routes.get(selector).cloned().unwrap_or_default())
    }

    fn shadow_root(&self, _node: NodeId) -> Result<Option<RootId>, DomError> {
        Ok(None)
    }

    fn closest(&self, node: NodeId, selector: &str) -> Option<NodeId> {
        let mut current = Some(node);
        while let Some(n) = current {
            if self.elem(n).closest_hits.iter().any(|s| s == selector) {
                return Some(n);
            }
            current = self.elem(n).parent;
        }
        None
    }

    fn parent(&self, node: NodeId) -> Option<NodeId> {
        self.elem(node).parent
    }

    fn tag_name(&self, node: NodeId) -> String {
        self.elem(node).tag.clone()
    }

    fn attribute(&self, node: NodeId, name: &str) -> Option<String> {
        self.elem(node).attrs.get(name).cloned()
    }

    fn computed_style(&self, node: NodeId) -> Style {
        self.elem(node).style.clone()
    }

    fn bounding_rect(&self, node: NodeId) -> Rect {
        self.elem(node).rect.unwrap_or(Rect {
            x: 20.0,
            y: 20.0,
            width: 160.0,
            height: 24.0,
        })
    }

    fn value(&self, node: NodeId) -> Option<String> {
        self.elem(node).value.clone()
    }

    fn click(&mut self, node: NodeId) -> Result<(), DomError> {
        self.clicks.push(node);
        Ok(())
    }

    fn force_reflow(&mut self) {}

    fn focus(&mut self, _node: NodeId, _prevent_scroll: bool) -> Result<(), DomError> {
        Ok(())
    }

    fn scroll_into_view_center(&mut self, _node: NodeId) -> Result<(), DomError> {
        Ok(())
    }

    fn select_all(&mut self, _node: NodeId) -> Result<(), DomError> {
        Ok(())
    }

    fn set_selection_range(
        &mut self,
        _node: NodeId,
        _start: u32,
        _end: u32,
    ) -> Result<(), DomError> {
        Ok(())
    }
}
