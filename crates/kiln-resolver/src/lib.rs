//! Placeholder resolution for kiln component trees.
//!
//! This crate resolves:
//! - Surface forms of declared fields (`button-bg-color`, `buttonBgColor`,
//!   `breadcrumb-1`) to the declared property
//! - Placeholder strings in a tree to typed property references
//! - Example overlays used by preview stories

mod example;
mod placeholders;
mod tree;

pub use example::{find_example_values, merge_example, ExampleValues};
pub use placeholders::{build_index, Binding, Collision, CollisionPolicy, PlaceholderIndex};
pub use tree::{resolve_component, resolve_value};

use kiln_core::{ComponentInterface, ComponentNode, ResolveError, ResolvedNode};

/// Build the index for `interface` and resolve `node` against it.
pub fn resolve(
    node: &ComponentNode,
    interface: &ComponentInterface,
    policy: CollisionPolicy,
) -> Result<ResolvedNode, ResolveError> {
    let index = build_index(interface, policy)?;
    Ok(resolve_component(node, interface, &index))
}
