//! Class names and stylesheet rules.
//!
//! Class names are derived from a node's position alone: the root is
//! `<component>-root`, an array child is `<parent>-<parentType>-<index>` and
//! a single non-array child is `<parent>-<parentType>`.

use indexmap::IndexMap;
use kiln_core::{ResolvedChildren, ResolvedNode};
use smallvec::SmallVec;
use std::fmt;

use crate::style::{style_declarations, Declaration};

/// Position of a node: child indices from the root.
pub type NodePath = SmallVec<[usize; 8]>;

/// Node path -> class name for one component.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClassAssignment {
    classes: IndexMap<NodePath, String>,
}

impl ClassAssignment {
    pub fn get(&self, path: &[usize]) -> Option<&str> {
        self.classes.get(path).map(String::as_str)
    }

    /// Class names in pre-order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.classes.values().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.classes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.classes.is_empty()
    }
}

/// Assign a class name to every node of a component tree.
pub fn assign_classes(component: &str, root: &ResolvedNode) -> ClassAssignment {
    let mut assignment = ClassAssignment::default();
    let mut path = NodePath::new();
    assign(root, format!("{}-root", component.to_lowercase()), &mut path, &mut assignment);
    assignment
}

fn assign(node: &ResolvedNode, class: String, path: &mut NodePath, out: &mut ClassAssignment) {
    let prefix = format!("{}-{}", class, node.node_type.to_lowercase());
    out.classes.insert(path.clone(), class);

    match &node.children {
        ResolvedChildren::None => {}
        ResolvedChildren::One(child) => {
            path.push(0);
            assign(child, prefix, path, out);
            path.pop();
        }
        ResolvedChildren::Many(children) => {
            for (i, child) in children.iter().enumerate() {
                path.push(i);
                assign(child, format!("{}-{}", prefix, i), path, out);
                path.pop();
            }
        }
    }
}

/// One `.class { ... }` block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CssRule {
    pub class: String,
    pub declarations: Vec<Declaration>,
}

impl fmt::Display for CssRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, ".{} {{", self.class)?;
        for declaration in &self.declarations {
            writeln!(f, "  {}", declaration)?;
        }
        writeln!(f, "}}")
    }
}

/// The rules of one component, in tree order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Stylesheet {
    pub rules: Vec<CssRule>,
}

impl Stylesheet {
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Rules separated by a blank line.
    pub fn to_css(&self) -> String {
        self.rules
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join("\n")
    }
}

/// Collect a rule for every node that has at least one declaration.
pub fn build_stylesheet(root: &ResolvedNode, classes: &ClassAssignment) -> Stylesheet {
    let mut rules = Vec::new();
    let mut path = NodePath::new();
    collect_rules(root, classes, &mut path, &mut rules);
    Stylesheet { rules }
}

fn collect_rules(node: &ResolvedNode, classes: &ClassAssignment, path: &mut NodePath, rules: &mut Vec<CssRule>) {
    let declarations = style_declarations(&node.style_map);
    if !declarations.is_empty() {
        if let Some(class) = classes.get(path.as_slice()) {
            rules.push(CssRule {
                class: class.to_string(),
                declarations,
            });
        }
    }
    for (i, child) in node.child_nodes().enumerate() {
        path.push(i);
        collect_rules(child, classes, path, rules);
        path.pop();
    }
}
