//! Tree resolution.
//!
//! Replaces placeholder strings in a component tree with property references.

use kiln_core::{
    Children, ComponentInterface, ComponentNode, Forwarding, ResolvedChildren, ResolvedMap,
    ResolvedNode, ResolvedValue, ValueMap,
};
use serde_json::Value;

use crate::placeholders::PlaceholderIndex;

/// Resolve a component's definition tree.
///
/// The returned root carries a [`Forwarding`] marker listing the declared
/// style fields it passes through.
pub fn resolve_component(
    node: &ComponentNode,
    interface: &ComponentInterface,
    index: &PlaceholderIndex,
) -> ResolvedNode {
    let resolver = TreeResolver::new(index);
    let mut root = resolver.resolve_node(node);
    root.forwarding = Some(Forwarding {
        style_fields: interface.style_field_names().map(str::to_string).collect(),
    });
    root
}

/// Resolve a single JSON value.
pub fn resolve_value(value: &Value, index: &PlaceholderIndex) -> ResolvedValue {
    TreeResolver::new(index).resolve_value(value)
}

struct TreeResolver<'a> {
    index: &'a PlaceholderIndex,
}

impl<'a> TreeResolver<'a> {
    fn new(index: &'a PlaceholderIndex) -> Self {
        Self { index }
    }

    fn resolve_node(&self, node: &ComponentNode) -> ResolvedNode {
        ResolvedNode {
            node_type: node.node_type.clone(),
            props: self.resolve_map(&node.props),
            style_map: self.resolve_map(&node.style_map),
            data: self.resolve_map(&node.data),
            children: match &node.children {
                None => ResolvedChildren::None,
                Some(Children::One(child)) => ResolvedChildren::One(Box::new(self.resolve_node(child))),
                Some(Children::Many(children)) => {
                    ResolvedChildren::Many(children.iter().map(|c| self.resolve_node(c)).collect())
                }
            },
            forwarding: None,
        }
    }

    fn resolve_map(&self, map: &ValueMap) -> ResolvedMap {
        map.iter()
            .map(|(k, v)| (k.clone(), self.resolve_value(v)))
            .collect()
    }

    fn resolve_value(&self, value: &Value) -> ResolvedValue {
        match value {
            Value::String(s) => match self.index.resolve_str(s) {
                Some(reference) => ResolvedValue::Reference(reference),
                None => ResolvedValue::Literal(value.clone()),
            },
            Value::Array(items) => ResolvedValue::Array(items.iter().map(|v| self.resolve_value(v)).collect()),
            Value::Object(map) => ResolvedValue::Object(
                map.iter()
                    .map(|(k, v)| (k.clone(), self.resolve_value(v)))
                    .collect(),
            ),
            scalar => ResolvedValue::Literal(scalar.clone()),
        }
    }
}
