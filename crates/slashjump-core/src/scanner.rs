//! Generic heuristic scanner and scorer.
//!
//! When no adapter rule applies, every candidate matching a broad
//! selector list is gathered from the light document and ranked with an
//! additive weighted score. The weights are empirically tuned; their
//! relative order is the contract, the absolute values are tunable.

use std::collections::HashSet;

use tracing::trace;

use crate::dom::{Dom, NodeId};
use crate::eligibility::is_searchy_input;
use crate::visibility::is_visible;

/// Broad patterns for pages without a site adapter, strongest signals
/// first. Scan order doubles as the tie-breaking order.
pub(crate) const CANDIDATE_SELECTORS: &[&str] = &[
    // Strong semantic indicators
    "[role='search'] input[type='search']",
    "form[role='search'] input[type='search']",
    "input[role='searchbox']",
    "input[type='search']",
    // Common names/ids/classes
    "input[name='q']",
    "input[name*='search' i]",
    "input[id*='search' i]",
    "input[class*='search' i]",
    // ARIA and placeholders
    "[role='search'] input",
    "form[role='search'] input",
    "input[aria-label*='search' i]",
    "input[placeholder*='search' i]",
    // Common ids
    "#search, #search-box, #searchbox, #search-field, #search-query, #search-input",
    // Occasionally a textarea is used
    "textarea[aria-label*='search' i]",
];

const SEARCH_CONTAINER: &str = "[role='search'], form[role='search']";

/// Scan the light document and return the highest-scoring visible,
/// eligible candidate; first-encountered wins exact ties.
pub fn find_generic(dom: &dyn Dom) -> Option<NodeId> {
    let root = dom.document_root();
    let mut candidates = Vec::new();
    let mut seen = HashSet::new();

    for selector in CANDIDATE_SELECTORS {
        let Ok(nodes) = dom.query_selector_all(root, selector) else {
            continue;
        };
        for node in nodes {
            if seen.insert(node) && is_visible(dom, node) && is_searchy_input(dom, node) {
                candidates.push(node);
            }
        }
    }

    let mut best: Option<(NodeId, f32)> = None;
    for node in candidates {
        let score = score_candidate(dom, node);
        trace!(node, score, "candidate scored");
        match best {
            Some((_, top)) if score <= top => {}
            _ => best = Some((node, score)),
        }
    }
    best.map(|(node, _)| node)
}

/// Additive score; every criterion is independent.
pub fn score_candidate(dom: &dyn Dom, node: NodeId) -> f32 {
    let attr = |name: &str| {
        dom.attribute(node, name)
            .unwrap_or_default()
            .to_lowercase()
    };

    let mut score = 0.0_f32;
    if attr("type") == "search" {
        score += 5.0;
    }
    let name = attr("name");
    if name == "q" {
        score += 4.0;
    }
    if name.contains("search") {
        score += 3.0;
    }
    if attr("id").contains("search") {
        score += 3.0;
    }
    if attr("aria-label").contains("search") {
        score += 3.0;
    }
    if attr("placeholder").contains("search") {
        score += 3.0;
    }
    if attr("class").contains("search") {
        score += 2.0;
    }
    if dom.closest(node, SEARCH_CONTAINER).is_some() {
        score += 4.0;
    }
    score + positional_bias(dom, node)
}

/// Up to +2 for placement near the top-left of the viewport, where
/// primary search fields usually sit.
fn positional_bias(dom: &dyn Dom, node: NodeId) -> f32 {
    let rect = dom.bounding_rect(node);
    let vp = dom.viewport();
    let y = rect.y.max(0.0) / vp.height.max(1.0);
    let x = rect.x.max(0.0) / vp.width.max(1.0);
    (2.0 - (y * 2.0 + x)).max(0.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testutil::StubDom;

    #[test]
    fn attribute_signals_accumulate() {
        let mut dom = StubDom::new("example.com");
        let n = dom.add_input("search");
        dom.set_attr(n, "name", "q");
        dom.set_attr(n, "placeholder", "Search");
        dom.set_rect(n, 0.0, 0.0, 160.0, 24.0);
        dom.mark_closest(n, SEARCH_CONTAINER);

        // type=search 5 + name=q 4 + placeholder 3 + container 4 + bias 2
        let score = score_candidate(&dom, n);
        assert!((score - 18.0).abs() < f32::EPSILON);
    }

    #[test]
    fn name_q_does_not_double_count_as_search_substring() {
        let mut dom = StubDom::new("example.com");
        let n = dom.add_input("text");
        dom.set_attr(n, "name", "q");
        dom.set_rect(n, 0.0, 800.0, 160.0, 24.0);

        let score = score_candidate(&dom, n);
        assert!((score - 4.0).abs() < f32::EPSILON);
    }

    #[test]
    fn positional_bias_decays_toward_bottom_right() {
        let mut dom = StubDom::new("example.com");
        let top_left = dom.add_input("text");
        dom.set_rect(top_left, 0.0, 0.0, 160.0, 24.0);
        let bottom = dom.add_input("text");
        dom.set_rect(bottom, 0.0, 800.0, 160.0, 24.0);

        assert!(score_candidate(&dom, top_left) > score_candidate(&dom, bottom));
        assert!((score_candidate(&dom, bottom) - 0.0).abs() < f32::EPSILON);
    }

    #[test]
    fn highest_score_wins_first_seen_breaks_ties() {
        let mut dom = StubDom::new("example.com");
        let weak = dom.add_input("text");
        dom.set_attr(weak, "class", "filter");
        dom.set_rect(weak, 0.0, 800.0, 160.0, 24.0);
        let strong = dom.add_input("search");
        dom.set_attr(strong, "name", "q");
        dom.set_rect(strong, 0.0, 800.0, 160.0, 24.0);
        let twin = dom.add_input("search");
        dom.set_attr(twin, "name", "q");
        dom.set_rect(twin, 0.0, 800.0, 160.0, 24.0);

        dom.route("input[type='search']", &[strong, twin]);
        dom.route("input[name='q']", &[strong, twin]);
        dom.route("input[class*='search' i]", &[]);
        // weak only matches a later selector; give it one.
        dom.route("input[placeholder*='search' i]", &[weak]);

        assert_eq!(find_generic(&dom), Some(strong));
    }

    #[test]
    fn empty_candidate_set_yields_none() {
        let dom = StubDom::new("example.com");
        assert_eq!(find_generic(&dom), None);
    }
}
