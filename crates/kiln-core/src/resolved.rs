//! Resolved component trees.
//!
//! A resolved tree has the same shape as the [`ComponentNode`](crate::ComponentNode)
//! it came from, but every placeholder string has been replaced by a
//! [`PropertyReference`] into the owning component's interface.

use indexmap::IndexMap;
use serde_json::Value;
use std::fmt;

/// Which half of a component's input a reference points into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    /// A CSS variable declared under `styleMap`.
    Style,
    /// A field declared under `data`.
    Data,
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Style => write!(f, "styleMap"),
            Self::Data => write!(f, "data"),
        }
    }
}

/// A placeholder bound to a declared property.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PropertyReference {
    pub category: Category,
    /// Canonical key: the declared field or CSS variable name.
    pub key: String,
    /// The string the tree actually contained.
    pub surface: String,
    /// Written as `var(--name)` rather than a bare placeholder.
    pub css_var_syntax: bool,
}

impl PropertyReference {
    pub fn style(key: impl Into<String>, surface: impl Into<String>) -> Self {
        Self {
            category: Category::Style,
            key: key.into(),
            surface: surface.into(),
            css_var_syntax: false,
        }
    }

    pub fn data(key: impl Into<String>, surface: impl Into<String>) -> Self {
        Self {
            category: Category::Data,
            key: key.into(),
            surface: surface.into(),
            css_var_syntax: false,
        }
    }
}

impl fmt::Display for PropertyReference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.category, self.key)
    }
}

/// A value in a resolved tree.
#[derive(Debug, Clone, PartialEq)]
pub enum ResolvedValue {
    /// A JSON scalar (string, number, bool or null) taken as-is.
    Literal(Value),
    /// A placeholder bound to a declared property.
    Reference(PropertyReference),
    Array(Vec<ResolvedValue>),
    Object(IndexMap<String, ResolvedValue>),
}

impl ResolvedValue {
    pub fn as_reference(&self) -> Option<&PropertyReference> {
        match self {
            ResolvedValue::Reference(r) => Some(r),
            _ => None,
        }
    }

    pub fn as_literal(&self) -> Option<&Value> {
        match self {
            ResolvedValue::Literal(v) => Some(v),
            _ => None,
        }
    }

    pub fn is_reference(&self) -> bool {
        matches!(self, ResolvedValue::Reference(_))
    }
}

/// Ordered map of resolved values.
pub type ResolvedMap = IndexMap<String, ResolvedValue>;

/// A node of a resolved component tree.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedNode {
    pub node_type: String,
    pub props: ResolvedMap,
    pub style_map: ResolvedMap,
    pub data: ResolvedMap,
    pub children: ResolvedChildren,
    /// Present on the root of a component only.
    pub forwarding: Option<Forwarding>,
}

/// Children of a resolved node, keeping the shape of the input.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum ResolvedChildren {
    #[default]
    None,
    One(Box<ResolvedNode>),
    Many(Vec<ResolvedNode>),
}

/// What the root element forwards from the generated component's own input.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Forwarding {
    /// Declared style fields passed through as inline CSS variables.
    pub style_fields: Vec<String>,
}

impl ResolvedNode {
    pub fn is_root(&self) -> bool {
        self.forwarding.is_some()
    }

    /// Iterate over the direct children.
    pub fn child_nodes(&self) -> std::slice::Iter<'_, ResolvedNode> {
        match &self.children {
            ResolvedChildren::None => Default::default(),
            ResolvedChildren::One(node) => std::slice::from_ref(&**node).iter(),
            ResolvedChildren::Many(nodes) => nodes.iter(),
        }
    }

    /// Visit every node depth-first, pre-order.
    pub fn walk<'a>(&'a self, visit: &mut impl FnMut(&'a ResolvedNode)) {
        visit(self);
        for child in self.child_nodes() {
            child.walk(visit);
        }
    }

    /// Every property reference in this subtree, in traversal order.
    pub fn references(&self) -> Vec<&PropertyReference> {
        let mut refs = Vec::new();
        self.walk(&mut |node| {
            for map in [&node.props, &node.style_map, &node.data] {
                for value in map.values() {
                    collect_references(value, &mut refs);
                }
            }
        });
        refs
    }
}

fn collect_references<'a>(value: &'a ResolvedValue, refs: &mut Vec<&'a PropertyReference>) {
    match value {
        ResolvedValue::Reference(r) => refs.push(r),
        ResolvedValue::Array(items) => items.iter().for_each(|v| collect_references(v, refs)),
        ResolvedValue::Object(map) => map.values().for_each(|v| collect_references(v, refs)),
        ResolvedValue::Literal(_) => {}
    }
}
