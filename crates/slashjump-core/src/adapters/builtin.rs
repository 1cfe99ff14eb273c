//! The builtin adapter table.
//!
//! One entry per site where the generic scanner is known to misfire or
//! come up empty. Order is priority order. Selector lists are evaluated
//! against the light document; sites that render their search field
//! inside shadow trees or behind a toggle get a custom finder instead.

use lazy_static::lazy_static;
use regex::Regex;
use tracing::debug;

use super::{AdapterRule, HostPredicate, Strategy};
use crate::dom::{Dom, NodeId};
use crate::eligibility::is_searchy_input;
use crate::query::{pick_first_visible, pick_first_visible_deep};
use crate::visibility::is_visible;

lazy_static! {
    static ref BUILTIN_RULES: Vec<AdapterRule> = build_rules();
}

pub(super) fn builtin_rules() -> Vec<AdapterRule> {
    BUILTIN_RULES.clone()
}

fn rule(name: &str, domain: &str, selectors: &[&str]) -> AdapterRule {
    AdapterRule {
        name: name.to_string(),
        host: HostPredicate::domain(domain),
        strategy: Strategy::Selectors(selectors.iter().map(|s| s.to_string()).collect()),
    }
}

fn pattern_rule(name: &str, pattern: &str, selectors: &[&str]) -> AdapterRule {
    AdapterRule {
        name: name.to_string(),
        host: HostPredicate::Pattern(Regex::new(pattern).expect("builtin host pattern")),
        strategy: Strategy::Selectors(selectors.iter().map(|s| s.to_string()).collect()),
    }
}

fn custom(name: &str, domain: &str, finder: fn(&mut dyn Dom) -> Option<NodeId>) -> AdapterRule {
    AdapterRule {
        name: name.to_string(),
        host: HostPredicate::domain(domain),
        strategy: Strategy::Custom(finder),
    }
}

fn build_rules() -> Vec<AdapterRule> {
    vec![
        // Extension stores render their search UI inside shadow trees.
        custom(
            "chrome-web-store",
            "chromewebstore.google.com",
            find_chrome_web_store,
        ),
        custom(
            "edge-addons",
            "microsoftedge.microsoft.com",
            find_edge_addons,
        ),
        pattern_rule(
            "amazon",
            r"(^|\.)amazon\.",
            &[
                "#twotabsearchtextbox",
                "#nav-bb-search",
                "form[name='site-search'] input[type='search']",
            ],
        ),
        rule(
            "linkedin",
            "linkedin.com",
            &[
                "input.search-global-typeahead__input",
                "input.search-global-typeahead__search-input",
                "input[placeholder*='Search' i][role='combobox']",
                "header input[placeholder*='Search' i]",
            ],
        ),
        rule(
            "reddit",
            "reddit.com",
            &["#header-search-bar", "input[placeholder*='Search' i]"],
        ),
        rule(
            "bilibili",
            "bilibili.com",
            &[
                "#nav-searchform input[type='text']",
                "input.nav-search-input",
                "input#search-keyword",
                "input[placeholder*='搜索']",
                "input[placeholder*='Search' i]",
            ],
        ),
        rule(
            "shein",
            "shein.com",
            &[
                "input#searchInput",
                "input[name='keywords']",
                "input[name='q']",
                "input[type='search']",
                "input[placeholder*='Search' i]",
            ],
        ),
        // The field only exists after the nav search toggle opens it.
        custom("apple", "apple.com", find_apple),
        rule(
            "tiktok",
            "tiktok.com",
            &[
                "input[data-e2e='search-user-input']",
                "form[role='search'] input[type='search']",
                "input[placeholder*='Search' i]",
            ],
        ),
        rule(
            "pinterest",
            "pinterest.com",
            &[
                "input[data-test-id='search-box-input']",
                "input[name='q']",
                "input[placeholder*='Search' i]",
            ],
        ),
        rule(
            "imdb",
            "imdb.com",
            &[
                "input#suggestion-search",
                "form[action*='/find'] input[type='text']",
                "form[action*='/find'] input[type='search']",
                "input[aria-label*='Search IMDb' i]",
                "input[placeholder*='Search IMDb' i]",
                "header input[name='q']",
            ],
        ),
        pattern_rule(
            "aliexpress",
            r"(^|\.)aliexpress\.",
            &[
                "input#search-key",
                "input#search-words",
                "input[name='SearchText']",
                "form[role='search'] input[type='search']",
                "input[aria-label*='Search' i]",
                "input[placeholder*='Search' i]",
            ],
        ),
        rule(
            "eporner",
            "eporner.com",
            &[
                "form#search_form input[type='text']",
                "input#query",
                "input[name='q']",
                "input[type='search']",
                "header input[placeholder*='Search' i]",
            ],
        ),
        rule(
            "homedepot",
            "homedepot.com",
            &[
                "input#headerSearch",
                "input#SearchBox",
                "input[name='keyword']",
                "form[role='search'] input[type='search']",
                "input[placeholder*='Search' i]",
            ],
        ),
        rule(
            "realtor-ca",
            "realtor.ca",
            &[
                "input#homeSearch",
                "input[name='searchText']",
                "input[aria-label*='Search' i]",
                "input[placeholder*='Search' i]",
                "form[role='search'] input[type='search']",
            ],
        ),
        rule(
            "costco",
            "costco.com",
            &[
                "input#search-field",
                "input[name='keyword']",
                "form[role='search'] input[type='search']",
                "input[placeholder*='Search' i]",
            ],
        ),
        rule(
            "meteomedia",
            "meteomedia.com",
            &[
                "input#search",
                "input[name='search']",
                "form[role='search'] input[type='search']",
                "input[aria-label*='Recherche' i]",
                "input[placeholder*='Recherche' i]",
                "input[placeholder*='Search' i]",
            ],
        ),
        rule(
            "ebay",
            "ebay.com",
            &[
                "#gh-ac",
                "input[name='_nkw']",
                "form[role='search'] input[type='search']",
                "input[placeholder*='Search' i]",
            ],
        ),
        rule(
            "weather",
            "weather.com",
            &[
                "#LocationSearch_input",
                "form[role='search'] input[type='search']",
                "input[aria-label*='Search' i]",
                "input[placeholder*='Search' i]",
            ],
        ),
        rule(
            "fandom",
            "fandom.com",
            &[
                "#searchInput",
                "input[name='search']",
                "input[name='query']",
                "form[role='search'] input[type='search']",
                "input[placeholder*='Search' i]",
            ],
        ),
        rule(
            "pornhub",
            "pornhub.com",
            &[
                "input#search",
                "input#searchInput",
                "input#search-input",
                "input#searchBar",
                "input[name='search']",
                "input[type='search']",
                "header input[placeholder*='Search' i]",
            ],
        ),
        rule(
            "xvideos",
            "xvideos.com",
            &[
                "input#search-input",
                "input[name='k']",
                "input[name='q']",
                "input[type='search']",
                "header input[placeholder*='Search' i]",
            ],
        ),
        rule(
            "xhamster",
            "xhamster.com",
            &[
                "input[name='q']",
                "input#search-input",
                "input[type='search']",
                "header input[placeholder*='Search' i]",
            ],
        ),
        rule(
            "xnxx",
            "xnxx.com",
            &[
                "input#search-input",
                "input[name='search']",
                "input[name='k']",
                "input[name='q']",
                "input[type='search']",
                "header input[placeholder*='Search' i]",
            ],
        ),
        rule(
            "wikipedia",
            "wikipedia.org",
            &["#searchInput", "input[name='search']"],
        ),
        rule(
            "stackoverflow",
            "stackoverflow.com",
            &["input.s-input[name='q']", "input[name='q']"],
        ),
    ]
}

// ============================================================
// Custom finders
// ============================================================

const STORE_LIGHT: &[&str] = &[
    "[role='search'] input[type='search']",
    "form[role='search'] input[type='search']",
    "input[role='searchbox']",
    "input[type='search']",
    "input[aria-label*='search' i]",
    "input[placeholder*='search' i]",
];

const STORE_DEEP: &[&str] = &[
    "[role='search'] input[type='search']",
    "form[role='search'] input[type='search']",
    "input[role='searchbox']",
    "input[type='search']",
    "input[name='q']",
    "input[name*='search' i]",
    "input[id*='search' i]",
    "input[class*='search' i]",
    "input[aria-label*='search' i]",
    "input[placeholder*='search' i]",
    "#search, #search-box, #searchbox, #search-field, #search-query, #search-input",
];

/// Obvious light-document cases first, then a descent through open
/// shadow roots for the store's componentized header.
fn find_chrome_web_store(dom: &mut dyn Dom) -> Option<NodeId> {
    if let Some(node) = pick_first_visible(dom, STORE_LIGHT) {
        return Some(node);
    }
    pick_first_visible_deep(dom, STORE_DEEP)
}

const EDGE_LIGHT: &[&str] = &[
    "[role='search'] input[type='search']",
    "form[role='search'] input[type='search']",
    "input[role='searchbox']",
    "input[type='search']",
    "input[name='q']",
    "input[aria-label*='search' i]",
    "input[placeholder*='search' i]",
    "input[placeholder*='extensions' i]",
];

const EDGE_DEEP: &[&str] = &[
    "[role='search'] input[type='search']",
    "form[role='search'] input[type='search']",
    "input[role='searchbox']",
    "input[type='search']",
    "input[name='q']",
    "input[name*='search' i]",
    "input[id*='search' i]",
    "input[class*='search' i]",
    "input[aria-label*='search' i]",
    "input[placeholder*='search' i]",
    "input[placeholder*='extensions' i]",
    "#search, #search-box, #searchbox, #search-field, #search-query, #search-input",
];

fn find_edge_addons(dom: &mut dyn Dom) -> Option<NodeId> {
    if let Some(node) = pick_first_visible(dom, EDGE_LIGHT) {
        return Some(node);
    }
    pick_first_visible_deep(dom, EDGE_DEEP)
}

const APPLE_FIELD: &[&str] = &[
    "#ac-gn-searchform-input",
    "form#ac-gn-searchform input[type='search']",
    ".ac-gn-searchform input[type='search']",
];

const APPLE_OPENER: &str = "button.ac-gn-link-search, a#ac-gn-link-search, .ac-gn-link-search, \
     button[aria-label*='Search' i], [data-analytics-title='open-search']";

fn apple_query_field(dom: &dyn Dom) -> Option<NodeId> {
    let root = dom.document_root();
    for selector in APPLE_FIELD {
        if let Ok(nodes) = dom.query_selector_all(root, selector) {
            if let Some(&node) = nodes.first() {
                return Some(node);
            }
        }
    }
    None
}

/// Two-phase finder: the search field exists but stays hidden until the
/// nav search toggle opens it. Click the toggle, force a layout pass and
/// re-query.
fn find_apple(dom: &mut dyn Dom) -> Option<NodeId> {
    let mut field = apple_query_field(dom);
    if let Some(node) = field {
        if is_visible(dom, node) {
            return Some(node);
        }
    }

    let opener = dom
        .query_selector_all(dom.document_root(), APPLE_OPENER)
        .ok()
        .and_then(|nodes| nodes.first().copied());
    if let Some(opener) = opener {
        if let Err(err) = dom.click(opener) {
            debug!(error = %err, "search toggle click failed");
        }
        dom.force_reflow();
        field = apple_query_field(dom);
        if let Some(node) = field {
            if is_visible(dom, node) {
                return Some(node);
            }
        }
    }

    field.filter(|&node| is_searchy_input(dom, node))
}
