//! Component source emission.
//!
//! Serializes a resolved tree into a `.tsx` module: imports, an optional
//! props interface, and an exported arrow component returning the JSX.

use kiln_core::{Category, ComponentInterface, PropertyReference, ResolvedNode, ResolvedValue};
use serde_json::Value;

use crate::classes::{assign_classes, build_stylesheet, ClassAssignment, NodePath};
use crate::js;
use crate::options::{GeneratorOptions, StyleMode};
use crate::style::inline_style_entries;

/// Generated source for one component.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComponentSource {
    pub name: String,
    /// Contents of `<Name>.tsx`.
    pub tsx: String,
    /// Contents of `<Name>.css`, when the component has any rule.
    pub css: Option<String>,
}

/// Generate the source and stylesheet of one component.
pub fn generate_component_source(
    name: &str,
    interface: &ComponentInterface,
    root: &ResolvedNode,
    options: &GeneratorOptions,
) -> ComponentSource {
    let classes = match options.style_mode {
        StyleMode::Class => Some(assign_classes(name, root)),
        StyleMode::Inline => None,
    };
    let css = classes
        .as_ref()
        .map(|classes| build_stylesheet(root, classes))
        .filter(|sheet| !sheet.is_empty())
        .map(|sheet| sheet.to_css());

    let emitter = ComponentEmitter {
        name,
        interface,
        options,
        classes: classes.as_ref(),
    };
    let tsx = emitter.module(root, css.is_some());

    ComponentSource {
        name: name.to_string(),
        tsx,
        css,
    }
}

struct ComponentEmitter<'a> {
    name: &'a str,
    interface: &'a ComponentInterface,
    options: &'a GeneratorOptions,
    classes: Option<&'a ClassAssignment>,
}

impl<'a> ComponentEmitter<'a> {
    fn module(&self, root: &ResolvedNode, has_css: bool) -> String {
        let mut lines = vec!["import React from 'react';".to_string()];

        let mut types = Vec::new();
        root.walk(&mut |node| {
            if !node.node_type.is_empty() {
                types.push(node.node_type.as_str());
            }
        });
        types.sort_unstable();
        types.dedup();
        for ty in types {
            lines.push(format!(
                "import {{ {} }} from '{}/{}';",
                ty, self.options.components_import_path, ty
            ));
        }

        if has_css {
            lines.push(format!("import './{}.css';", self.name));
        }
        lines.push(String::new());

        let has_interface = self.interface.has_fields()
            || self.interface.accepts_children
            || self.options.is_container(&root.node_type);

        if has_interface {
            self.interface_block(&mut lines);
            lines.push(String::new());
            lines.push(format!("export const {} = (props: {}) => (", self.name, self.name));
        } else {
            lines.push(format!(
                "export const {} = (props: {{ children?: React.ReactNode }}) => (",
                self.name
            ));
        }

        let mut path = NodePath::new();
        lines.push(format!("  {}", self.element(root, &mut path)));
        lines.push(");".to_string());

        let mut out = lines.join("\n");
        out.push('\n');
        out
    }

    fn interface_block(&self, lines: &mut Vec<String>) {
        lines.push(format!("interface {} {{", self.name));

        if let Some(fields) = self.interface.style_fields.as_ref().filter(|f| !f.is_empty()) {
            lines.push("  styleMap: {".to_string());
            for (name, ty) in fields {
                lines.push(format!("    {}: {};", js::quote(name), ty));
            }
            lines.push("  };".to_string());
        }

        if let Some(fields) = self.interface.data_fields.as_ref().filter(|f| !f.is_empty()) {
            lines.push("  data: {".to_string());
            for (name, ty) in fields {
                lines.push(format!("    {}: {};", js::property_key(name), ty));
            }
            lines.push("  };".to_string());
        }

        lines.push("  children?: React.ReactNode;".to_string());
        lines.push("}".to_string());
    }

    fn element(&self, node: &ResolvedNode, path: &mut NodePath) -> String {
        let mut attrs: Vec<String> = node
            .props
            .iter()
            .filter_map(|(key, value)| prop_attribute(key, value))
            .collect();

        if let Some(style) = self.style_attribute(node) {
            attrs.push(style);
        }
        if let Some(class) = self.classes.and_then(|c| c.get(path.as_slice())) {
            attrs.push(format!("className=\"{}\"", class));
        }
        if !node.data.is_empty() {
            let data = js::object(node.data.iter().map(|(k, v)| (k, expr(v))));
            attrs.push(format!("data={{{}}}", data));
        }

        let mut inner = String::new();
        if let Some(content) = node.data.get("content") {
            inner.push_str(&content_text(content));
        }
        for (i, child) in node.child_nodes().enumerate() {
            path.push(i);
            inner.push_str(&self.element(child, path));
            path.pop();
        }
        if node.is_root() {
            inner.push_str("{props.children}");
        }

        let ty = &node.node_type;
        if attrs.is_empty() {
            format!("<{}>{}</{}>", ty, inner, ty)
        } else {
            format!("<{} {}>{}</{}>", ty, attrs.join(" "), inner, ty)
        }
    }

    /// Inline styles (inline mode) followed by the root's pass-through CSS
    /// variables.
    fn style_attribute(&self, node: &ResolvedNode) -> Option<String> {
        let mut entries = match self.options.style_mode {
            StyleMode::Inline => inline_style_entries(&node.style_map),
            StyleMode::Class => Vec::new(),
        };
        if let Some(forwarding) = &node.forwarding {
            entries.extend(
                forwarding
                    .style_fields
                    .iter()
                    .map(|field| (field.clone(), js::optional_member("props.styleMap", field))),
            );
        }
        if entries.is_empty() {
            return None;
        }
        Some(format!("style={{{}}}", js::object(entries)))
    }
}

fn prop_attribute(key: &str, value: &ResolvedValue) -> Option<String> {
    match value {
        ResolvedValue::Literal(Value::Bool(true)) => Some(key.to_string()),
        ResolvedValue::Literal(Value::Bool(false)) => None,
        _ => Some(format!("{}={{{}}}", key, expr(value))),
    }
}

fn reference_expr(reference: &PropertyReference) -> String {
    match reference.category {
        Category::Style => js::optional_member("props.styleMap", &reference.key),
        Category::Data => js::optional_member("props.data", &reference.key),
    }
}

/// A resolved value as a JavaScript expression.
fn expr(value: &ResolvedValue) -> String {
    match value {
        ResolvedValue::Literal(v) => js::literal(v),
        ResolvedValue::Reference(r) => reference_expr(r),
        ResolvedValue::Array(items) => format!("[{}]", items.iter().map(expr).collect::<Vec<_>>().join(", ")),
        ResolvedValue::Object(map) => js::object(map.iter().map(|(k, v)| (k, expr(v)))),
    }
}

/// Element text for a `data.content` value.
fn content_text(value: &ResolvedValue) -> String {
    match value {
        ResolvedValue::Reference(r) => format!("{{{}}}", reference_expr(r)),
        ResolvedValue::Literal(Value::String(s)) if s.contains(['{', '}', '<', '>']) => {
            format!("{{{}}}", js::quote(s))
        }
        ResolvedValue::Literal(Value::String(s)) => s.clone(),
        ResolvedValue::Literal(Value::Number(n)) => js::format_number(n),
        _ => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kiln_core::{Children, ComponentNode};
    use kiln_resolver::{resolve, CollisionPolicy};
    use serde_json::json;

    fn button_interface() -> ComponentInterface {
        ComponentInterface::empty("Button")
            .with_style_field("--button-bg-color", "string")
            .with_data_field("buttonContent", "string")
    }

    fn button_tree() -> ComponentNode {
        ComponentNode::from_json(
            r#"{
                "type": "Container",
                "styleMap": { "backgroundColor": "--button-bg-color" },
                "children": [{ "type": "Text", "data": { "content": "buttonContent" } }]
            }"#,
        )
        .unwrap()
    }

    fn generate(name: &str, iface: &ComponentInterface, node: &ComponentNode, options: &GeneratorOptions) -> ComponentSource {
        let root = resolve(node, iface, CollisionPolicy::Strict).unwrap();
        generate_component_source(name, iface, &root, options)
    }

    #[test]
    fn test_button_component() {
        let source = generate("Button", &button_interface(), &button_tree(), &GeneratorOptions::default());

        insta::assert_snapshot!(source.tsx, @r###"
        import React from 'react';
        import { Container } from '../components/Container';
        import { Text } from '../components/Text';
        import './Button.css';

        interface Button {
          styleMap: {
            "--button-bg-color": string;
          };
          data: {
            buttonContent: string;
          };
          children?: React.ReactNode;
        }

        export const Button = (props: Button) => (
          <Container style={{ "--button-bg-color": props.styleMap?.["--button-bg-color"] }} className="button-root"><Text className="button-root-container-0" data={{ content: props.data?.buttonContent }}>{props.data?.buttonContent}</Text>{props.children}</Container>
        );
        "###);

        assert_eq!(
            source.css.as_deref(),
            Some(".button-root {\n  background-color: var(--button-bg-color);\n}\n")
        );
    }

    #[test]
    fn test_component_without_interface() {
        let mut options = GeneratorOptions::default();
        options.container_types.clear();
        let node = ComponentNode::new("Banner").with_data("content", "Sale");
        let source = generate("Promo", &ComponentInterface::empty("Promo"), &node, &options);

        assert!(!source.tsx.contains("interface Promo"));
        assert!(source
            .tsx
            .contains("export const Promo = (props: { children?: React.ReactNode }) => ("));
        assert!(source
            .tsx
            .contains(r#"<Banner className="promo-root" data={{ content: "Sale" }}>Sale{props.children}</Banner>"#));
        assert!(source.css.is_none());
        assert!(!source.tsx.contains(".css"));
    }

    #[test]
    fn test_container_root_gets_interface() {
        let node = ComponentNode::new("Grid");
        let source = generate("Page", &ComponentInterface::empty("Page"), &node, &GeneratorOptions::default());
        assert!(source
            .tsx
            .contains("interface Page {\n  children?: React.ReactNode;\n}\n\nexport const Page = (props: Page) => ("));
    }

    #[test]
    fn test_prop_attributes() {
        let iface = ComponentInterface::empty("Card")
            .with_style_field("--card-accent", "string")
            .with_data_field("cardImageSrc", "string");
        let node = ComponentNode::new("Image")
            .with_prop("src", "card-image-src")
            .with_prop("tint", "card-accent")
            .with_prop("alt", "A \"quoted\" alt")
            .with_prop("lazy", true)
            .with_prop("hidden", false)
            .with_prop("width", 120);
        let source = generate("Card", &iface, &node, &GeneratorOptions::default());

        assert!(source.tsx.contains(
            r#"<Image src={props.data?.cardImageSrc} tint={props.styleMap?.["--card-accent"]} alt={"A \"quoted\" alt"} lazy width={120} style="#
        ));
        assert!(!source.tsx.contains("hidden"));
    }

    #[test]
    fn test_content_with_markup_is_an_expression() {
        let node = ComponentNode::new("Text").with_data("content", "a < b {ok}");
        let source = generate("Note", &ComponentInterface::empty("Note"), &node, &GeneratorOptions::default());
        assert!(source.tsx.contains(r#">{"a < b {ok}"}{props.children}</Text>"#));
    }

    #[test]
    fn test_numeric_content() {
        let node = ComponentNode::new("Text").with_data("content", json!(42));
        let source = generate("Count", &ComponentInterface::empty("Count"), &node, &GeneratorOptions::default());
        assert!(source.tsx.contains(">42{props.children}</Text>"));
    }

    #[test]
    fn test_inline_style_mode() {
        let options = GeneratorOptions {
            style_mode: StyleMode::Inline,
            ..GeneratorOptions::default()
        };
        let tree = button_tree().with_style("padding", 12);
        let source = generate("Button", &button_interface(), &tree, &options);

        assert!(source.css.is_none());
        assert!(!source.tsx.contains("className"));
        assert!(!source.tsx.contains("import './Button.css';"));
        assert!(source.tsx.contains(
            r#"<Container style={{ backgroundColor: "var(--button-bg-color)", padding: 12, "--button-bg-color": props.styleMap?.["--button-bg-color"] }}>"#
        ));
    }

    #[test]
    fn test_inline_mode_data_only_root() {
        let options = GeneratorOptions {
            style_mode: StyleMode::Inline,
            ..GeneratorOptions::default()
        };
        let iface = ComponentInterface::empty("Label").with_data_field("labelText", "string");
        let node = ComponentNode::new("Text")
            .with_style("color", "red")
            .with_data("content", "labelText");
        let source = generate("Label", &iface, &node, &options);

        assert!(source.css.is_none());
        assert!(source.tsx.contains("interface Label {\n  data: {\n    labelText: string;\n  };\n"));
        assert!(source.tsx.contains(
            r#"<Text style={{ color: "red" }} data={{ content: props.data?.labelText }}>{props.data?.labelText}{props.children}</Text>"#
        ));
        assert!(!source.tsx.contains("props.styleMap"));
    }

    #[test]
    fn test_scalar_child() {
        let mut node = ComponentNode::new("Container").with_style("padding", 4);
        node.children = Some(Children::One(Box::new(
            ComponentNode::new("Text").with_style("color", "red").with_data("content", "Hi"),
        )));
        let source = generate("Tag", &ComponentInterface::empty("Tag"), &node, &GeneratorOptions::default());

        assert!(source.tsx.contains(r#"<Text className="tag-root-container" data={{ content: "Hi" }}>Hi</Text>"#));
        let css = source.css.unwrap();
        assert!(css.contains(".tag-root-container {\n  color: red;\n}\n"));
        assert!(css.starts_with(".tag-root {\n  padding: 4px;\n}\n\n"));
    }

    #[test]
    fn test_generation_is_deterministic() {
        let options = GeneratorOptions::default();
        let a = generate("Button", &button_interface(), &button_tree(), &options);
        let b = generate("Button", &button_interface(), &button_tree(), &options);
        assert_eq!(a, b);
    }
}
