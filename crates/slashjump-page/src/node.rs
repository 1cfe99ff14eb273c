//! Declarative element fixtures.
//!
//! An [`El`] describes one element and its subtree; [`crate::Page`]
//! materializes it into the arena and hands back node ids.

use slashjump_core::dom::Rect;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShadowMode {
    Open,
    Closed,
}

/// One element to insert, with children and an optional shadow tree.
#[derive(Debug, Clone)]
pub struct El {
    pub(crate) tag: String,
    pub(crate) attrs: Vec<(String, String)>,
    pub(crate) display: Option<String>,
    pub(crate) visibility: Option<String>,
    pub(crate) opacity: Option<f32>,
    pub(crate) rect: Option<Rect>,
    pub(crate) value: Option<String>,
    pub(crate) children: Vec<El>,
    pub(crate) shadow: Option<(ShadowMode, Vec<El>)>,
}

impl El {
    pub fn new(tag: &str) -> Self {
        El {
            tag: tag.to_ascii_lowercase(),
            attrs: Vec::new(),
            display: None,
            visibility: None,
            opacity: None,
            rect: None,
            value: None,
            children: Vec::new(),
            shadow: None,
        }
    }

    /// `<input type="...">` shorthand.
    pub fn input(declared_type: &str) -> Self {
        El::new("input").attr("type", declared_type)
    }

    pub fn attr(mut self, name: &str, value: &str) -> Self {
        self.attrs.push((name.to_string(), value.to_string()));
        self
    }

    pub fn id(self, value: &str) -> Self {
        self.attr("id", value)
    }

    pub fn display(mut self, value: &str) -> Self {
        self.display = Some(value.to_string());
        self
    }

    pub fn visibility(mut self, value: &str) -> Self {
        self.visibility = Some(value.to_string());
        self
    }

    pub fn opacity(mut self, value: f32) -> Self {
        self.opacity = Some(value);
        self
    }

    pub fn rect(mut self, x: f32, y: f32, width: f32, height: f32) -> Self {
        self.rect = Some(Rect {
            x,
            y,
            width,
            height,
        });
        self
    }

    pub fn value(mut self, value: &str) -> Self {
        self.value = Some(value.to_string());
        self
    }

    pub fn child(mut self, child: El) -> Self {
        self.children.push(child);
        self
    }

    /// Attach an open shadow tree.
    pub fn shadow(mut self, children: Vec<El>) -> Self {
        self.shadow = Some((ShadowMode::Open, children));
        self
    }

    /// Attach a closed shadow tree; outside traversal cannot see into it.
    pub fn closed_shadow(mut self, children: Vec<El>) -> Self {
        self.shadow = Some((ShadowMode::Closed, children));
        self
    }
}
