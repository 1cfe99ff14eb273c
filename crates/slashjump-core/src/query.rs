//! Deep tree query: selector collection across the document and every
//! open shadow tree.
//!
//! Traversal failures are strictly local. A root that refuses
//! enumeration (closed encapsulation, access restriction) is skipped and
//! the rest of the query proceeds; nothing here ever propagates an error.

use std::collections::HashSet;

use tracing::debug;

use crate::dom::{Dom, NodeId, RootId};
use crate::eligibility::is_searchy_input;
use crate::visibility::is_visible;

/// Shadow roots are tree-structured by platform contract, so cycles are
/// impossible; the bound is purely defensive.
const MAX_SHADOW_DEPTH: usize = 32;

/// Union of all matches for `selectors` in the document and every
/// reachable open shadow tree, deduplicated, in first-encounter order.
///
/// Order carries no meaning beyond "first visible and eligible wins" for
/// callers that iterate it.
pub fn query_all_deep(dom: &dyn Dom, selectors: &[&str]) -> Vec<NodeId> {
    let mut out = Vec::new();
    let mut seen = HashSet::new();
    collect_root(dom, dom.document_root(), selectors, &mut out, &mut seen, 0);
    out
}

fn collect_root(
    dom: &dyn Dom,
    root: RootId,
    selectors: &[&str],
    out: &mut Vec<NodeId>,
    seen: &mut HashSet<NodeId>,
    depth: usize,
) {
    if depth >= MAX_SHADOW_DEPTH {
        return;
    }

    for selector in selectors {
        match dom.query_selector_all(root, selector) {
            Ok(nodes) => {
                for node in nodes {
                    if seen.insert(node) {
                        out.push(node);
                    }
                }
            }
            Err(err) => {
                debug!(root, error = %err, "deep query skipped restricted root");
                return;
            }
        }
    }

    let hosts = match dom.query_selector_all(root, "*") {
        Ok(nodes) => nodes,
        Err(err) => {
            debug!(root, error = %err, "deep query could not enumerate root");
            return;
        }
    };
    for host in hosts {
        match dom.shadow_root(host) {
            Ok(Some(inner)) => collect_root(dom, inner, selectors, out, seen, depth + 1),
            Ok(None) => {}
            Err(err) => {
                debug!(host, error = %err, "shadow root read failed, skipping host");
            }
        }
    }
}

/// First visible and eligible match, evaluating `selectors` in order
/// against the light document only.
pub fn pick_first_visible(dom: &dyn Dom, selectors: &[&str]) -> Option<NodeId> {
    let root = dom.document_root();
    for selector in selectors {
        let nodes = match dom.query_selector_all(root, selector) {
            Ok(nodes) => nodes,
            Err(err) => {
                debug!(selector = *selector, error = %err, "selector query failed");
                continue;
            }
        };
        for node in nodes {
            if is_visible(dom, node) && is_searchy_input(dom, node) {
                return Some(node);
            }
        }
    }
    None
}

/// First visible and eligible match across the document and open shadow
/// trees.
pub fn pick_first_visible_deep(dom: &dyn Dom, selectors: &[&str]) -> Option<NodeId> {
    query_all_deep(dom, selectors)
        .into_iter()
        .find(|&node| is_visible(dom, node) && is_searchy_input(dom, node))
}
