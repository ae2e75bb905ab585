//! Minimal CSS selector querying over [`DomNode`] trees.
//! Supports: tag, .class, #id, [attr] / [attr="value"], and the
//! descendant (space) and child (>) combinators — the subset the
//! review-extraction selectors need.

use super::{DomNode, NodeType};

/// A parsed selector: compound segments joined by combinators.
#[derive(Debug, Clone)]
pub struct Selector {
    segments: Vec<Compound>,
    /// `combinators[i]` joins `segments[i]` and `segments[i + 1]`.
    combinators: Vec<Combinator>,
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum Combinator {
    Descendant,
    Child,
}

/// One segment of a selector chain, e.g. `span.X43Kjb` or `[jsname="fbQN7e"]`.
#[derive(Debug, Clone, Default)]
struct Compound {
    tag: Option<String>,
    id: Option<String>,
    classes: Vec<String>,
    attrs: Vec<(String, Option<String>)>,
}

impl Compound {
    fn is_empty(&self) -> bool {
        self.tag.is_none() && self.id.is_none() && self.classes.is_empty() && self.attrs.is_empty()
    }
}

impl Selector {
    /// Parse a selector string. Returns None for empty or malformed input.
    pub fn parse(input: &str) -> Option<Selector> {
        let mut segments = Vec::new();
        let mut combinators = Vec::new();
        let mut chars = input.trim().chars().peekable();

        loop {
            let compound = parse_compound(&mut chars)?;
            if compound.is_empty() {
                return None;
            }
            segments.push(compound);

            skip_whitespace(&mut chars);
            match chars.peek() {
                None => break,
                Some('>') => {
                    chars.next();
                    skip_whitespace(&mut chars);
                    combinators.push(Combinator::Child);
                }
                Some(_) => combinators.push(Combinator::Descendant),
            }
        }

        Some(Selector {
            segments,
            combinators,
        })
    }
}

fn parse_compound(chars: &mut std::iter::Peekable<std::str::Chars>) -> Option<Compound> {
    let mut compound = Compound::default();

    while let Some(&ch) = chars.peek() {
        match ch {
            '.' => {
                chars.next();
                let class_name = read_ident(chars);
                if class_name.is_empty() {
                    return None;
                }
                compound.classes.push(class_name);
            }
            '#' => {
                chars.next();
                let id_name = read_ident(chars);
                if id_name.is_empty() {
                    return None;
                }
                compound.id = Some(id_name);
            }
            '[' => {
                chars.next();
                let mut attr = String::new();
                let mut value = None;
                while let Some(&c) = chars.peek() {
                    if c == ']' {
                        chars.next();
                        break;
                    }
                    if c == '=' {
                        chars.next();
                        let mut val = String::new();
                        let quote = chars.peek().copied();
                        if quote == Some('"') || quote == Some('\'') {
                            chars.next();
                            while let Some(&vc) = chars.peek() {
                                chars.next();
                                if Some(vc) == quote {
                                    break;
                                }
                                val.push(vc);
                            }
                        } else {
                            while let Some(&vc) = chars.peek() {
                                if vc == ']' {
                                    break;
                                }
                                val.push(vc);
                                chars.next();
                            }
                        }
                        value = Some(val);
                    } else {
                        attr.push(c);
                        chars.next();
                    }
                }
                if attr.trim().is_empty() {
                    return None;
                }
                compound.attrs.push((attr.trim().to_string(), value));
            }
            c if c.is_alphanumeric() || c == '-' || c == '_' => {
                if compound.tag.is_some() {
                    return None;
                }
                compound.tag = Some(read_ident(chars).to_lowercase());
            }
            _ => break, // whitespace or '>' ends the compound
        }
    }

    Some(compound)
}

fn read_ident(chars: &mut std::iter::Peekable<std::str::Chars>) -> String {
    let mut name = String::new();
    while let Some(&c) = chars.peek() {
        if c.is_alphanumeric() || c == '-' || c == '_' {
            name.push(c);
            chars.next();
        } else {
            break;
        }
    }
    name
}

fn skip_whitespace(chars: &mut std::iter::Peekable<std::str::Chars>) {
    while let Some(&c) = chars.peek() {
        if c.is_whitespace() {
            chars.next();
        } else {
            break;
        }
    }
}

/// Collect all elements under `root` matching `selector`, in document order.
pub fn select_all<'a>(root: &'a DomNode, selector: &Selector) -> Vec<&'a DomNode> {
    let mut out = Vec::new();
    let mut ancestors: Vec<&'a DomNode> = Vec::new();
    walk(root, selector, &mut ancestors, &mut out);
    out
}

fn walk<'a>(
    node: &'a DomNode,
    selector: &Selector,
    ancestors: &mut Vec<&'a DomNode>,
    out: &mut Vec<&'a DomNode>,
) {
    if node.node_type == NodeType::Element {
        if matches(selector, node, ancestors) {
            out.push(node);
        }
        ancestors.push(node);
        for child in &node.children {
            walk(child, selector, ancestors, out);
        }
        ancestors.pop();
    } else {
        for child in &node.children {
            walk(child, selector, ancestors, out);
        }
    }
}

/// Check a selector against an element, walking segments right to left
/// through the element's ancestry.
fn matches(selector: &Selector, node: &DomNode, ancestors: &[&DomNode]) -> bool {
    let Some((last, rest)) = selector.segments.split_last() else {
        return false;
    };
    if !compound_matches(last, node) {
        return false;
    }
    match_prefix(rest, &selector.combinators, ancestors)
}

fn match_prefix(segments: &[Compound], combinators: &[Combinator], ancestors: &[&DomNode]) -> bool {
    let Some((last, rest)) = segments.split_last() else {
        return true;
    };
    // The combinator joining `last` to the segment on its right
    match combinators[segments.len() - 1] {
        Combinator::Child => match ancestors.split_last() {
            Some((&parent, rest_anc)) => {
                compound_matches(last, parent) && match_prefix(rest, combinators, rest_anc)
            }
            None => false,
        },
        Combinator::Descendant => (0..ancestors.len()).rev().any(|i| {
            compound_matches(last, ancestors[i]) && match_prefix(rest, combinators, &ancestors[..i])
        }),
    }
}

fn compound_matches(compound: &Compound, node: &DomNode) -> bool {
    if let Some(tag) = &compound.tag {
        if node.tag.to_lowercase() != *tag {
            return false;
        }
    }
    if let Some(id) = &compound.id {
        if node.get_attr("id") != Some(id.as_str()) {
            return false;
        }
    }
    if !compound.classes.is_empty() {
        let classes = node.get_attr("class").unwrap_or("");
        for wanted in &compound.classes {
            if !classes.split_whitespace().any(|c| c == wanted) {
                return false;
            }
        }
    }
    for (name, expected) in &compound.attrs {
        match expected {
            Some(value) => {
                if node.get_attr(name) != Some(value.as_str()) {
                    return false;
                }
            }
            None => {
                if node.get_attr(name).is_none() {
                    return false;
                }
            }
        }
    }
    true
}
