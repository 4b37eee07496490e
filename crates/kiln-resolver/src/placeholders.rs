//! Placeholder index construction.
//!
//! Maps every accepted spelling of a declared field to the field itself.

use indexmap::IndexMap;
use kiln_core::{
    naming::{camel_to_kebab, kebab_to_camel, numbered_to_kebab},
    Category, ComponentInterface, PropertyReference, ResolveError,
};
use regex::Regex;
use std::fmt;
use std::sync::OnceLock;
use tracing::warn;

/// What to do when two declared fields share a surface form.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum CollisionPolicy {
    /// Keep the later registration and log a warning.
    #[default]
    LastWriteWins,
    /// Fail on the first collision.
    Strict,
}

/// The declared property a surface form stands for.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Binding {
    pub category: Category,
    pub key: String,
}

impl fmt::Display for Binding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.category, self.key)
    }
}

/// A surface form claimed by two different declared properties.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Collision {
    pub surface: String,
    pub previous: Binding,
    pub current: Binding,
}

/// Surface form -> declared property, for one component.
#[derive(Debug, Clone, Default)]
pub struct PlaceholderIndex {
    entries: IndexMap<String, Binding>,
    collisions: Vec<Collision>,
}

impl PlaceholderIndex {
    pub fn get(&self, surface: &str) -> Option<&Binding> {
        self.entries.get(surface)
    }

    pub fn contains(&self, surface: &str) -> bool {
        self.entries.contains_key(surface)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Surface forms in registration order.
    pub fn surfaces(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    /// Collisions seen while building, in order.
    pub fn collisions(&self) -> &[Collision] {
        &self.collisions
    }

    /// Resolve a string leaf.
    ///
    /// A direct surface form wins; otherwise `var(--name)` resolves when
    /// `--name` is a surface form.
    pub fn resolve_str(&self, value: &str) -> Option<PropertyReference> {
        if let Some(binding) = self.get(value) {
            return Some(reference(binding, value, false));
        }
        let name = css_var_name(value)?;
        self.get(name).map(|binding| reference(binding, value, true))
    }
}

fn reference(binding: &Binding, surface: &str, css_var_syntax: bool) -> PropertyReference {
    PropertyReference {
        category: binding.category,
        key: binding.key.clone(),
        surface: surface.to_string(),
        css_var_syntax,
    }
}

/// `var(--name)` -> `--name`.
fn css_var_name(value: &str) -> Option<&str> {
    static CSS_VAR: OnceLock<Regex> = OnceLock::new();
    let re = CSS_VAR.get_or_init(|| Regex::new(r"^var\((--[^)]+)\)$").expect("valid regex"));
    re.captures(value)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
}

/// Build the placeholder index for one component.
///
/// Style fields are registered first, then data fields, each in declaration
/// order.
pub fn build_index(
    interface: &ComponentInterface,
    policy: CollisionPolicy,
) -> Result<PlaceholderIndex, ResolveError> {
    let mut builder = IndexBuilder::new(&interface.name, policy);

    for field in interface.style_field_names() {
        let binding = Binding {
            category: Category::Style,
            key: field.to_string(),
        };
        builder.register(field, &binding)?;
        if let Some(bare) = field.strip_prefix("--") {
            builder.register(bare, &binding)?;
            let camel = kebab_to_camel(bare);
            if camel != bare {
                builder.register(&camel, &binding)?;
            }
        }
    }

    for field in interface.data_field_names() {
        let binding = Binding {
            category: Category::Data,
            key: field.to_string(),
        };
        builder.register(field, &binding)?;
        builder.register(&camel_to_kebab(field), &binding)?;
        if let Some(numbered) = numbered_to_kebab(field) {
            builder.register(&numbered, &binding)?;
        }
    }

    Ok(builder.index)
}

struct IndexBuilder<'a> {
    component: &'a str,
    policy: CollisionPolicy,
    index: PlaceholderIndex,
}

impl<'a> IndexBuilder<'a> {
    fn new(component: &'a str, policy: CollisionPolicy) -> Self {
        Self {
            component,
            policy,
            index: PlaceholderIndex::default(),
        }
    }

    fn register(&mut self, surface: &str, binding: &Binding) -> Result<(), ResolveError> {
        let previous = self
            .index
            .entries
            .insert(surface.to_string(), binding.clone());

        match previous {
            Some(previous) if previous != *binding => {
                if self.policy == CollisionPolicy::Strict {
                    return Err(ResolveError::PlaceholderCollision {
                        component: self.component.to_string(),
                        surface: surface.to_string(),
                        previous: previous.to_string(),
                        current: binding.to_string(),
                    });
                }
                warn!(
                    component = self.component,
                    surface,
                    previous = %previous,
                    current = %binding,
                    "placeholder surface form claimed by two fields, keeping the later one"
                );
                self.index.collisions.push(Collision {
                    surface: surface.to_string(),
                    previous,
                    current: binding.clone(),
                });
            }
            _ => {}
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn button() -> ComponentInterface {
        ComponentInterface::empty("Button")
            .with_style_field("--button-bg-color", "string")
            .with_data_field("buttonContent", "string")
    }

    #[test]
    fn test_style_field_surface_forms() {
        let index = build_index(&button(), CollisionPolicy::default()).unwrap();
        for surface in ["--button-bg-color", "button-bg-color", "buttonBgColor"] {
            let binding = index.get(surface).unwrap();
            assert_eq!(binding.category, Category::Style);
            assert_eq!(binding.key, "--button-bg-color");
        }
    }

    #[test]
    fn test_data_field_surface_forms() {
        let index = build_index(&button(), CollisionPolicy::default()).unwrap();
        for surface in ["buttonContent", "button-content"] {
            let binding = index.get(surface).unwrap();
            assert_eq!(binding.category, Category::Data);
            assert_eq!(binding.key, "buttonContent");
        }
    }

    #[test]
    fn test_numbered_data_field() {
        let iface = ComponentInterface::empty("Breadcrumbs").with_data_field("breadcrumb1", "string");
        let index = build_index(&iface, CollisionPolicy::default()).unwrap();
        assert_eq!(index.get("breadcrumb-1").unwrap().key, "breadcrumb1");
        assert_eq!(index.len(), 2);
    }

    #[test]
    fn test_style_field_without_prefix_registers_only_itself() {
        let iface = ComponentInterface::empty("Odd").with_style_field("accent-color", "string");
        let index = build_index(&iface, CollisionPolicy::default()).unwrap();
        assert_eq!(index.surfaces().collect::<Vec<_>>(), vec!["accent-color"]);
    }

    #[test]
    fn test_single_word_style_field_has_no_camel_alias() {
        let iface = ComponentInterface::empty("Box").with_style_field("--gap", "string");
        let index = build_index(&iface, CollisionPolicy::default()).unwrap();
        assert_eq!(index.surfaces().collect::<Vec<_>>(), vec!["--gap", "gap"]);
    }

    #[test]
    fn test_resolve_css_var_syntax() {
        let index = build_index(&button(), CollisionPolicy::default()).unwrap();
        let reference = index.resolve_str("var(--button-bg-color)").unwrap();
        assert!(reference.css_var_syntax);
        assert_eq!(reference.key, "--button-bg-color");
        assert_eq!(reference.surface, "var(--button-bg-color)");

        assert!(index.resolve_str("var(--unknown)").is_none());
        assert!(index.resolve_str("#0066cc").is_none());
    }

    #[test]
    fn test_collision_last_write_wins() {
        let iface = ComponentInterface::empty("Clash")
            .with_style_field("--title", "string")
            .with_data_field("title", "string");
        let index = build_index(&iface, CollisionPolicy::LastWriteWins).unwrap();

        let binding = index.get("title").unwrap();
        assert_eq!(binding.category, Category::Data);
        assert_eq!(index.collisions().len(), 1);
        assert_eq!(index.collisions()[0].surface, "title");
        assert_eq!(index.collisions()[0].previous.key, "--title");
    }

    #[test]
    fn test_collision_strict_fails() {
        let iface = ComponentInterface::empty("Clash")
            .with_style_field("--title", "string")
            .with_data_field("title", "string");
        let err = build_index(&iface, CollisionPolicy::Strict).unwrap_err();
        match err {
            ResolveError::PlaceholderCollision { component, surface, .. } => {
                assert_eq!(component, "Clash");
                assert_eq!(surface, "title");
            }
        }
    }

    #[test]
    fn test_reregistering_same_binding_is_not_a_collision() {
        let iface = ComponentInterface::empty("Card").with_data_field("title", "string");
        let index = build_index(&iface, CollisionPolicy::Strict).unwrap();
        assert!(index.collisions().is_empty());
        assert_eq!(index.len(), 1);
    }

    proptest! {
        #[test]
        fn data_fields_resolve_to_themselves(
            fields in proptest::collection::vec("[a-z]{1,6}([A-Z][a-z]{1,5}){0,3}[0-9]{0,2}", 1..6)
        ) {
            let iface = fields.iter().fold(ComponentInterface::empty("Any"), |iface, f| {
                iface.with_data_field(f.as_str(), "string")
            });
            let index = build_index(&iface, CollisionPolicy::LastWriteWins).unwrap();
            for field in &fields {
                let reference = index.resolve_str(field).unwrap();
                prop_assert_eq!(reference.category, Category::Data);
                prop_assert_eq!(&reference.key, field);
            }
        }

        #[test]
        fn style_fields_resolve_from_every_form(
            field in "[a-z]{1,6}(-[a-z]{1,6}){0,3}"
        ) {
            let css_var = format!("--{}", field);
            let iface = ComponentInterface::empty("Any").with_style_field(css_var.as_str(), "string");
            let index = build_index(&iface, CollisionPolicy::Strict).unwrap();

            for surface in [css_var.clone(), field.clone(), kebab_to_camel(&field)] {
                let reference = index.resolve_str(&surface).unwrap();
                prop_assert_eq!(reference.category, Category::Style);
                prop_assert_eq!(&reference.key, &css_var);
            }
        }
    }
}
