//! Component tree nodes as read from JSON definition files.

use indexmap::{IndexMap, IndexSet};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// An ordered JSON object, keyed the way the definition file spells it.
pub type ValueMap = IndexMap<String, Value>;

/// One node of a component definition tree.
///
/// ```json
/// {
///   "type": "Container",
///   "styleMap": { "backgroundColor": "--button-bg-color" },
///   "children": [{ "type": "Text", "data": { "content": "buttonContent" } }]
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComponentNode {
    /// Name of the component this node instantiates.
    #[serde(rename = "type")]
    pub node_type: String,
    /// Extra element attributes.
    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub props: ValueMap,
    /// Style properties; values may be literals or placeholders.
    #[serde(default, rename = "styleMap", skip_serializing_if = "IndexMap::is_empty")]
    pub style_map: ValueMap,
    /// Data fields; `content` is the text content of the element.
    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub data: ValueMap,
    /// Nested nodes.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub children: Option<Children>,
    /// Sample values used by preview stories only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub example: Option<Box<ExampleOverlay>>,
}

/// The `children` field: an array, or a single node.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Children {
    Many(Vec<ComponentNode>),
    One(Box<ComponentNode>),
}

/// An `example` overlay, shaped like a node without a `type`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ExampleOverlay {
    #[serde(default, rename = "styleMap", skip_serializing_if = "Option::is_none")]
    pub style_map: Option<ValueMap>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<ValueMap>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub children: Option<Children>,
}

impl ComponentNode {
    /// Create a node of the given type with no properties.
    pub fn new(node_type: impl Into<String>) -> Self {
        Self {
            node_type: node_type.into(),
            props: IndexMap::new(),
            style_map: IndexMap::new(),
            data: IndexMap::new(),
            children: None,
            example: None,
        }
    }

    /// Parse a node from JSON text.
    pub fn from_json(source: &str) -> serde_json::Result<Self> {
        serde_json::from_str(source)
    }

    /// Add a style property.
    pub fn with_style(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.style_map.insert(key.into(), value.into());
        self
    }

    /// Add a data field.
    pub fn with_data(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.data.insert(key.into(), value.into());
        self
    }

    /// Add an element attribute.
    pub fn with_prop(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.props.insert(key.into(), value.into());
        self
    }

    /// Append a child, turning `children` into an array if needed.
    pub fn with_child(mut self, child: ComponentNode) -> Self {
        self.children = match self.children.take() {
            None => Some(Children::Many(vec![child])),
            Some(Children::Many(mut nodes)) => {
                nodes.push(child);
                Some(Children::Many(nodes))
            }
            Some(Children::One(first)) => Some(Children::Many(vec![*first, child])),
        };
        self
    }

    /// Iterate over the direct children, whichever shape they have.
    pub fn child_nodes(&self) -> impl Iterator<Item = &ComponentNode> {
        self.children.iter().flat_map(Children::iter)
    }

    /// Collect every distinct `type` used in this tree, in first-seen order.
    pub fn component_types(&self) -> IndexSet<String> {
        let mut types = IndexSet::new();
        collect_types(self, &mut types);
        types
    }
}

fn collect_types(node: &ComponentNode, types: &mut IndexSet<String>) {
    if !node.node_type.is_empty() {
        types.insert(node.node_type.clone());
    }
    for child in node.child_nodes() {
        collect_types(child, types);
    }
}

impl Children {
    /// Iterate over the contained nodes.
    pub fn iter(&self) -> std::slice::Iter<'_, ComponentNode> {
        match self {
            Children::Many(nodes) => nodes.iter(),
            Children::One(node) => std::slice::from_ref(&**node).iter(),
        }
    }

    /// Number of contained nodes.
    pub fn len(&self) -> usize {
        match self {
            Children::Many(nodes) => nodes.len(),
            Children::One(_) => 1,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
