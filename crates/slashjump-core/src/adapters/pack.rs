//! YAML adapter packs.
//!
//! Selector-list rules can be described as data and appended to the
//! registry at construction time. Custom finders are code-only and have
//! no pack representation.

use std::path::Path;

use regex::Regex;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::{AdapterRule, HostPredicate, Strategy};

#[derive(Debug, Error)]
pub enum PackError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML parse error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Invalid rule '{name}': {reason}")]
    InvalidRule { name: String, reason: String },
}

/// One pack document: metadata plus an ordered rule list.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdapterPack {
    pub pack: String,
    pub version: String,
    #[serde(default)]
    pub description: Option<String>,
    pub rules: Vec<PackRule>,
}

/// A selector-list rule as written in YAML. Exactly one of `domain`
/// (suffix match) or `host_pattern` (regex over the lowercased hostname)
/// must be present.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PackRule {
    pub name: String,
    #[serde(default)]
    pub domain: Option<String>,
    #[serde(default)]
    pub host_pattern: Option<String>,
    pub selectors: Vec<String>,
}

impl AdapterPack {
    pub fn parse(content: &str) -> Result<Self, PackError> {
        Ok(serde_yaml::from_str(content)?)
    }

    pub fn load_path(path: &Path) -> Result<Self, PackError> {
        Self::parse(&std::fs::read_to_string(path)?)
    }

    /// Validate and convert every rule, preserving file order.
    pub fn into_rules(self) -> Result<Vec<AdapterRule>, PackError> {
        self.rules.into_iter().map(PackRule::into_rule).collect()
    }
}

impl PackRule {
    fn into_rule(self) -> Result<AdapterRule, PackError> {
        let invalid = |name: &str, reason: &str| PackError::InvalidRule {
            name: name.to_string(),
            reason: reason.to_string(),
        };

        if self.selectors.is_empty() {
            return Err(invalid(&self.name, "empty selector list"));
        }

        let host = match (&self.domain, &self.host_pattern) {
            (Some(domain), None) => HostPredicate::domain(domain),
            (None, Some(pattern)) => HostPredicate::Pattern(
                Regex::new(pattern)
                    .map_err(|e| invalid(&self.name, &format!("bad host pattern: {e}")))?,
            ),
            _ => {
                return Err(invalid(
                    &self.name,
                    "exactly one of domain or host_pattern required",
                ))
            }
        };

        Ok(AdapterRule {
            name: self.name,
            host,
            strategy: Strategy::Selectors(self.selectors),
        })
    }
}
