//! Selector matching for the page model.
//!
//! Covers the vocabulary the engine actually queries with: compound
//! selectors (tag, `#id`, `.class`, attribute tests with `=`/`*=` and an
//! optional `i` flag), comma groups, and the descendant combinator.
//! Matching stays within a single tree; shadow boundaries are never
//! crossed, exactly like the platform primitive this stands in for.

use slashjump_core::dom::{DomError, NodeId};

use crate::page::Page;

#[derive(Debug, Clone)]
pub(crate) struct SelectorList {
    complexes: Vec<ComplexSelector>,
}

#[derive(Debug, Clone)]
struct ComplexSelector {
    /// Left-to-right; the last compound is the subject.
    compounds: Vec<Compound>,
}

#[derive(Debug, Clone, Default)]
struct Compound {
    tag: Option<String>,
    id: Option<String>,
    classes: Vec<String>,
    attrs: Vec<AttrTest>,
}

#[derive(Debug, Clone)]
struct AttrTest {
    name: String,
    op: AttrOp,
    value: String,
    case_insensitive: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum AttrOp {
    Exists,
    Equals,
    Contains,
}

impl SelectorList {
    pub fn parse(input: &str) -> Result<Self, DomError> {
        let invalid = || DomError::InvalidSelector(input.to_string());
        let mut complexes = Vec::new();
        for group in split_outside_brackets(input, ',') {
            let group = group.trim();
            if group.is_empty() {
                return Err(invalid());
            }
            complexes.push(ComplexSelector::parse(group).ok_or_else(invalid)?);
        }
        if complexes.is_empty() {
            return Err(invalid());
        }
        Ok(SelectorList { complexes })
    }

    pub fn matches(&self, page: &Page, node: NodeId) -> bool {
        self.complexes.iter().any(|c| c.matches(page, node))
    }
}

impl ComplexSelector {
    fn parse(input: &str) -> Option<Self> {
        let mut compounds = Vec::new();
        for part in split_outside_brackets(input, ' ') {
            let part = part.trim();
            if part.is_empty() {
                continue;
            }
            compounds.push(Compound::parse(part)?);
        }
        if compounds.is_empty() {
            return None;
        }
        Some(ComplexSelector { compounds })
    }

    fn matches(&self, page: &Page, node: NodeId) -> bool {
        let (subject, ancestors) = self
            .compounds
            .split_last()
            .expect("complex selector has at least one compound");
        if !subject.matches(page, node) {
            return false;
        }
        // Descendant combinators only, so greedy nearest-ancestor
        // matching is exact.
        let mut current = page.parent_of(node);
        for compound in ancestors.iter().rev() {
            loop {
                let Some(n) = current else {
                    return false;
                };
                current = page.parent_of(n);
                if compound.matches(page, n) {
                    break;
                }
            }
        }
        true
    }
}

impl Compound {
    fn parse(input: &str) -> Option<Self> {
        let chars: Vec<char> = input.chars().collect();
        let mut compound = Compound::default();
        let mut i = 0;
        let mut any = false;

        if i < chars.len() && chars[i] == '*' {
            i += 1;
            any = true;
        } else if i < chars.len() && chars[i].is_ascii_alphabetic() {
            let mut tag = String::new();
            while i < chars.len() && is_ident_char(chars[i]) {
                tag.push(chars[i]);
                i += 1;
            }
            compound.tag = Some(tag.to_ascii_lowercase());
            any = true;
        }

        while i < chars.len() {
            match chars[i] {
                '#' => {
                    i += 1;
                    let ident = read_ident(&chars, &mut i)?;
                    compound.id = Some(ident);
                    any = true;
                }
                '.' => {
                    i += 1;
                    let ident = read_ident(&chars, &mut i)?;
                    compound.classes.push(ident);
                    any = true;
                }
                '[' => {
                    i += 1;
                    let test = parse_attr_test(&chars, &mut i)?;
                    compound.attrs.push(test);
                    any = true;
                }
                _ => return None,
            }
        }

        any.then_some(compound)
    }

    fn matches(&self, page: &Page, node: NodeId) -> bool {
        if let Some(tag) = &self.tag {
            if page.tag_of(node) != *tag {
                return false;
            }
        }
        if let Some(id) = &self.id {
            if page.attr_of(node, "id").as_deref() != Some(id.as_str()) {
                return false;
            }
        }
        if !self.classes.is_empty() {
            let class_attr = page.attr_of(node, "class").unwrap_or_default();
            let present: Vec<&str> = class_attr.split_whitespace().collect();
            if !self.classes.iter().all(|c| present.contains(&c.as_str())) {
                return false;
            }
        }
        self.attrs.iter().all(|test| test.matches(page, node))
    }
}

impl AttrTest {
    fn matches(&self, page: &Page, node: NodeId) -> bool {
        let Some(actual) = page.attr_of(node, &self.name) else {
            return false;
        };
        match self.op {
            AttrOp::Exists => true,
            AttrOp::Equals => {
                if self.case_insensitive {
                    actual.eq_ignore_ascii_case(&self.value)
                } else {
                    actual == self.value
                }
            }
            AttrOp::Contains => {
                if self.case_insensitive {
                    actual.to_lowercase().contains(&self.value.to_lowercase())
                } else {
                    actual.contains(&self.value)
                }
            }
        }
    }
}

fn is_ident_char(c: char) -> bool {
    c.is_alphanumeric() || c == '-' || c == '_'
}

fn read_ident(chars: &[char], i: &mut usize) -> Option<String> {
    let start = *i;
    while *i < chars.len() && is_ident_char(chars[*i]) {
        *i += 1;
    }
    (*i > start).then(|| chars[start..*i].iter().collect())
}

/// Parse the inside of `[...]`, cursor positioned just past `[`.
fn parse_attr_test(chars: &[char], i: &mut usize) -> Option<AttrTest> {
    let name = read_ident(chars, i)?;

    skip_spaces(chars, i);
    if *i < chars.len() && chars[*i] == ']' {
        *i += 1;
        return Some(AttrTest {
            name,
            op: AttrOp::Exists,
            value: String::new(),
            case_insensitive: false,
        });
    }

    let op = match chars.get(*i) {
        Some('=') => {
            *i += 1;
            AttrOp::Equals
        }
        Some('*') if chars.get(*i + 1) == Some(&'=') => {
            *i += 2;
            AttrOp::Contains
        }
        _ => return None,
    };

    skip_spaces(chars, i);
    let value = read_attr_value(chars, i)?;

    skip_spaces(chars, i);
    let mut case_insensitive = false;
    if let Some(c) = chars.get(*i) {
        if c.eq_ignore_ascii_case(&'i') {
            case_insensitive = true;
            *i += 1;
            skip_spaces(chars, i);
        }
    }

    if chars.get(*i) != Some(&']') {
        return None;
    }
    *i += 1;
    Some(AttrTest {
        name,
        op,
        value,
        case_insensitive,
    })
}

fn read_attr_value(chars: &[char], i: &mut usize) -> Option<String> {
    match chars.get(*i) {
        Some(&quote) if quote == '\'' || quote == '"' => {
            *i += 1;
            let start = *i;
            while *i < chars.len() && chars[*i] != quote {
                *i += 1;
            }
            if *i >= chars.len() {
                return None;
            }
            let value: String = chars[start..*i].iter().collect();
            *i += 1;
            Some(value)
        }
        Some(_) => {
            let start = *i;
            while *i < chars.len() && chars[*i] != ']' && !chars[*i].is_whitespace() {
                *i += 1;
            }
            (*i > start).then(|| chars[start..*i].iter().collect())
        }
        None => None,
    }
}

fn skip_spaces(chars: &[char], i: &mut usize) {
    while *i < chars.len() && chars[*i].is_whitespace() {
        *i += 1;
    }
}

/// Split on `delimiter` outside `[...]` and quotes.
fn split_outside_brackets(input: &str, delimiter: char) -> Vec<String> {
    let mut parts = Vec::new();
    let mut current = String::new();
    let mut bracket_depth = 0usize;
    let mut quote: Option<char> = None;

    for c in input.chars() {
        if let Some(q) = quote {
            current.push(c);
            if c == q {
                quote = None;
            }
            continue;
        }
        match c {
            '\'' | '"' => {
                quote = Some(c);
                current.push(c);
            }
            '[' => {
                bracket_depth += 1;
                current.push(c);
            }
            ']' => {
                bracket_depth = bracket_depth.saturating_sub(1);
                current.push(c);
            }
            _ if c == delimiter && bracket_depth == 0 => {
                parts.push(std::mem::take(&mut current));
            }
            _ => current.push(c),
        }
    }
    parts.push(current);
    parts
}
