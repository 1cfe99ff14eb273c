//! Site adapter registry.
//!
//! Hand-authored, hostname-scoped discovery strategies that override the
//! generic heuristics on sites whose search field lives somewhere the
//! scanner cannot reliably find (shadow trees, toggled search overlays,
//! unsemantic markup). Rules are tried in fixed priority order and the
//! first hostname match is authoritative: if its strategy yields nothing,
//! control falls through to the generic scanner, never to a later rule.

mod builtin;
mod pack;

pub use pack::{AdapterPack, PackError, PackRule};

use regex::Regex;
use tracing::debug;

use crate::dom::{Dom, NodeId};
use crate::query::pick_first_visible;

/// Hostname predicate for one adapter rule.
#[derive(Debug, Clone)]
pub enum HostPredicate {
    /// The registered domain and any of its subdomains, case-insensitive.
    Domain(String),
    /// Arbitrary hostname pattern, matched against the lowercased host.
    /// Used for rules that span every regional TLD (`(^|\.)amazon\.`).
    Pattern(Regex),
}

impl HostPredicate {
    pub fn domain(registered: &str) -> Self {
        HostPredicate::Domain(registered.to_ascii_lowercase())
    }

    pub fn matches(&self, hostname: &str) -> bool {
        let host = hostname.to_ascii_lowercase();
        match self {
            HostPredicate::Domain(domain) => match host.strip_suffix(domain.as_str()) {
                Some("") => true,
                Some(prefix) => prefix.ends_with('.'),
                None => false,
            },
            HostPredicate::Pattern(pattern) => pattern.is_match(&host),
        }
    }
}

/// Procedure run by a page-specific custom finder. May query, invoke a
/// declared "open search" affordance, force a reflow and re-query.
pub type CustomFinder = fn(&mut dyn Dom) -> Option<NodeId>;

/// The discovery strategy an adapter rule declares; exactly one kind per
/// rule, dispatched by a single match at invocation time.
#[derive(Debug, Clone)]
pub enum Strategy {
    /// Selector queries evaluated in order against the light document;
    /// first visible and eligible match wins.
    Selectors(Vec<String>),
    /// Multi-step procedure, for sites where a plain selector list is not
    /// enough.
    Custom(CustomFinder),
}

#[derive(Debug, Clone)]
pub struct AdapterRule {
    pub name: String,
    pub host: HostPredicate,
    pub strategy: Strategy,
}

/// Ordered rule list; earlier rules take priority.
#[derive(Debug, Clone, Default)]
pub struct AdapterRegistry {
    rules: Vec<AdapterRule>,
}

impl AdapterRegistry {
    /// The hand-authored builtin table.
    pub fn builtin() -> Self {
        AdapterRegistry {
            rules: builtin::builtin_rules(),
        }
    }

    pub fn empty() -> Self {
        AdapterRegistry::default()
    }

    pub fn with_rules(rules: Vec<AdapterRule>) -> Self {
        AdapterRegistry { rules }
    }

    pub fn push(&mut self, rule: AdapterRule) {
        self.rules.push(rule);
    }

    /// Append a pack's rules after everything already registered.
    /// Builtins keep priority; within the pack, file order is priority
    /// order.
    pub fn extend_from_pack(&mut self, pack: AdapterPack) -> Result<(), PackError> {
        self.rules.extend(pack.into_rules()?);
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Run the first rule whose host predicate matches the page hostname.
    ///
    /// Returns `None` when no rule matches or the matched rule's strategy
    /// yields nothing; later rules are never consulted either way.
    pub fn find_site_specific(&self, dom: &mut dyn Dom) -> Option<NodeId> {
        let hostname = dom.hostname();
        let rule = self.rules.iter().find(|r| r.host.matches(&hostname))?;
        debug!(rule = %rule.name, hostname = %hostname, "adapter rule matched");

        let found = match &rule.strategy {
            Strategy::Selectors(selectors) => {
                let refs: Vec<&str> = selectors.iter().map(String::as_str).collect();
                pick_first_visible(dom, &refs)
            }
            Strategy::Custom(finder) => finder(dom),
        };
        if found.is_none() {
            debug!(rule = %rule.name, "adapter strategy yielded nothing");
        }
        found
    }
}
