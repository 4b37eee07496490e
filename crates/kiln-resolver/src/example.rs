//! Example overlays.
//!
//! A node's `example` supplies concrete sample values for preview stories.
//! Merging applies the overlays; comparing the merged tree with the plain one
//! recovers a sample value for each placeholder.

use indexmap::IndexMap;
use kiln_core::{Category, Children, ComponentNode, ValueMap};
use serde_json::Value;

use crate::placeholders::PlaceholderIndex;

/// Apply every `example` overlay in a tree.
///
/// `styleMap` and `data` are shallow-merged with the overlay winning, overlay
/// `children` replace the node's own, and the result carries no `example`.
pub fn merge_example(node: &ComponentNode) -> ComponentNode {
    let mut merged = ComponentNode {
        example: None,
        ..node.clone()
    };

    let mut children = node.children.as_ref();
    if let Some(example) = &node.example {
        if let Some(style) = &example.style_map {
            overlay(&mut merged.style_map, style);
        }
        if let Some(data) = &example.data {
            overlay(&mut merged.data, data);
        }
        if example.children.is_some() {
            children = example.children.as_ref();
        }
    }

    merged.children = children.map(merge_children);
    merged
}

fn overlay(target: &mut ValueMap, source: &ValueMap) {
    for (key, value) in source {
        target.insert(key.clone(), value.clone());
    }
}

fn merge_children(children: &Children) -> Children {
    match children {
        Children::One(child) => Children::One(Box::new(merge_example(child))),
        Children::Many(nodes) => Children::Many(nodes.iter().map(merge_example).collect()),
    }
}

/// Sample values recovered per declared property.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ExampleValues {
    /// CSS variable name -> sample value.
    pub style: IndexMap<String, Value>,
    /// Data field name -> sample value.
    pub data: IndexMap<String, Value>,
}

impl ExampleValues {
    pub fn is_empty(&self) -> bool {
        self.style.is_empty() && self.data.is_empty()
    }

    pub fn get(&self, category: Category, key: &str) -> Option<&Value> {
        match category {
            Category::Style => self.style.get(key),
            Category::Data => self.data.get(key),
        }
    }

    fn record(&mut self, category: Category, key: &str, value: &Value) {
        let target = match category {
            Category::Style => &mut self.style,
            Category::Data => &mut self.data,
        };
        if !target.contains_key(key) {
            target.insert(key.to_string(), value.clone());
        }
    }
}

/// Walk `base` and `merged` in lockstep and collect, per declared property,
/// the first merged value sitting where `base` held a placeholder.
///
/// Only `styleMap` and `data` entries are compared. Children are paired by
/// position; extra children on either side are ignored.
pub fn find_example_values(
    base: &ComponentNode,
    merged: &ComponentNode,
    index: &PlaceholderIndex,
) -> ExampleValues {
    let mut values = ExampleValues::default();
    collect_values(base, merged, index, &mut values);
    values
}

fn collect_values(
    base: &ComponentNode,
    merged: &ComponentNode,
    index: &PlaceholderIndex,
    values: &mut ExampleValues,
) {
    for (base_map, merged_map) in [(&base.style_map, &merged.style_map), (&base.data, &merged.data)] {
        for (key, base_value) in base_map {
            let (Value::String(placeholder), Some(sample)) = (base_value, merged_map.get(key)) else {
                continue;
            };
            if let Some(reference) = index.resolve_str(placeholder) {
                values.record(reference.category, &reference.key, sample);
            }
        }
    }

    for (b, m) in base.child_nodes().zip(merged.child_nodes()) {
        collect_values(b, m, index, values);
    }
}
