//! Preview story generation.
//!
//! Stories are built from the tree with its `example` overlays applied. The
//! sample values found where the plain tree held placeholders become the
//! story's `args`; a container without declared fields instead renders its
//! example children directly.
//!
//! `Renderer.stories.tsx` feeds the dispatch module one record per generated
//! component, filled with the same sample values.

use indexmap::IndexMap;
use kiln_core::{ComponentInterface, ComponentNode, InterfaceTable};
use kiln_resolver::{
    build_index, find_example_values, merge_example, CollisionPolicy, ExampleValues, PlaceholderIndex,
};
use serde::Serialize;
use serde_json::{Map, Value};

use crate::dispatch::RenderItem;
use crate::error::Result;
use crate::js;
use crate::options::GeneratorOptions;
use crate::templates::TemplateEngine;

pub(crate) const TEMPLATE_NAME: &str = "story";

pub(crate) const TEMPLATE: &str = r#"import React from "react";
import type { Meta, StoryObj } from "@storybook/react";
{{imports}}

const meta: Meta<typeof {{name}}> = {
  title: "Generated/{{name}}",
  component: {{name}},
  tags: ["autodocs"],
};
export default meta;

type Story = StoryObj<typeof {{name}}>;

export const Default: Story = {
{{body}}
};
"#;

pub(crate) const RENDERER_TEMPLATE_NAME: &str = "renderer-story";

pub(crate) const RENDERER_TEMPLATE: &str = r#"import React from "react";
import type { Meta, StoryObj } from "@storybook/react";
import { Renderer } from './Renderer';
import type { ComponentData } from './Renderer';

const meta: Meta<typeof Renderer> = {
  title: "Generated/Renderer",
  component: Renderer,
  tags: ["autodocs"],
};
export default meta;

type Story = StoryObj<typeof Renderer>;

export const Default: Story = {
  args: {
    data: [
{{records}}
    ] as ComponentData[],
  },
};
"#;

#[derive(Serialize)]
struct StoryData<'a> {
    name: &'a str,
    imports: String,
    body: String,
}

/// Everything a story needs about one component.
pub struct StoryInput<'a> {
    pub name: &'a str,
    pub node: &'a ComponentNode,
    pub interface: &'a ComponentInterface,
    pub index: &'a PlaceholderIndex,
    /// Whether `<Name>.css` was generated.
    pub has_css: bool,
}

/// Generate `<Name>.stories.tsx`.
pub fn generate_story(engine: &TemplateEngine<'_>, input: &StoryInput<'_>, options: &GeneratorOptions) -> Result<String> {
    let merged = merge_example(input.node);
    let values = find_example_values(input.node, &merged, input.index);

    let mut imports = vec![format!("import {{ {} }} from './{}';", input.name, input.name)];

    let body = if let Some(args) = args_body(input.interface, &values) {
        args
    } else if !input.interface.has_fields()
        && options.is_container(&merged.node_type)
        && merged.child_nodes().next().is_some()
    {
        let mut types: Vec<String> = merged.component_types().into_iter().collect();
        types.sort_unstable();
        imports.extend(types.iter().map(|ty| {
            format!("import {{ {} }} from '{}/{}';", ty, options.components_import_path, ty)
        }));
        render_body(input.name, &merged)
    } else {
        "  args: {},".to_string()
    };

    if input.has_css {
        imports.push(format!("import './{}.css';", input.name));
    }

    engine.render(
        TEMPLATE_NAME,
        &StoryData {
            name: input.name,
            imports: imports.join("\n"),
            body,
        },
    )
}

/// `args` with the sample value of every declared field that has one, in
/// declaration order. `None` when no field has a sample.
fn args_body(interface: &ComponentInterface, values: &ExampleValues) -> Option<String> {
    if values.is_empty() {
        return None;
    }

    let mut lines = vec!["  args: {".to_string()];
    let style: Vec<_> = interface
        .style_field_names()
        .filter_map(|name| values.style.get(name).map(|v| (name, js::literal(v))))
        .collect();
    if !style.is_empty() {
        lines.push(format!("    styleMap: {},", js::object(style)));
    }
    let data: Vec<_> = interface
        .data_field_names()
        .filter_map(|name| values.data.get(name).map(|v| (name, js::literal(v))))
        .collect();
    if !data.is_empty() {
        lines.push(format!("    data: {},", js::object(data)));
    }
    lines.push("  },".to_string());
    Some(lines.join("\n"))
}

fn render_body(name: &str, merged: &ComponentNode) -> String {
    let mut lines = vec!["  render: () => (".to_string(), format!("    <{}>", name)];
    lines.extend(merged.child_nodes().map(|child| format!("      {}", node_jsx(child))));
    lines.push(format!("    </{}>", name));
    lines.push("  ),".to_string());
    lines.join("\n")
}

/// A plain (unresolved) node as JSX with literal attributes.
fn node_jsx(node: &ComponentNode) -> String {
    let mut tag = node.node_type.clone();
    for (key, value) in &node.props {
        tag.push_str(&format!(" {}={{{}}}", key, js::literal(value)));
    }
    for (attr, map) in [("styleMap", &node.style_map), ("data", &node.data)] {
        if !map.is_empty() {
            tag.push_str(&format!(" {}={{{}}}", attr, map_literal(map)));
        }
    }

    let inner: String = node.child_nodes().map(node_jsx).collect();
    if inner.is_empty() {
        format!("<{} />", tag)
    } else {
        format!("<{}>{}</{}>", tag, inner, node.node_type)
    }
}

fn map_literal<'v>(entries: impl IntoIterator<Item = (&'v String, &'v Value)>) -> String {
    js::object(entries.into_iter().map(|(k, v)| (k, js::literal(v))))
}

/// Builds the sample records of `Renderer.stories.tsx`.
pub struct RendererStoryBuilder<'a> {
    interfaces: &'a InterfaceTable,
    /// Names of every generated component.
    generated: &'a [String],
    policy: CollisionPolicy,
}

impl<'a> RendererStoryBuilder<'a> {
    pub fn new(interfaces: &'a InterfaceTable, generated: &'a [String], policy: CollisionPolicy) -> Self {
        Self {
            interfaces,
            generated,
            policy,
        }
    }

    /// The record for one component: its sample `styleMap` / `data` values
    /// and, when it accepts content, the generated components nested in its
    /// example children.
    pub fn record(&self, name: &str, node: &ComponentNode) -> Result<RenderItem> {
        let interface = self.interfaces.get_or_empty(name);
        let index = build_index(&interface, self.policy)?;
        let merged = merge_example(node);
        let values = find_example_values(node, &merged, &index);

        let mut item = RenderItem::new(name);
        item.style_map = sample_map(interface.style_field_names(), &values.style);
        item.data = sample_map(interface.data_field_names(), &values.data);

        if interface.accepts_children {
            let mut children = Vec::new();
            for child in merged.child_nodes() {
                self.collect_generated(child, &mut children)?;
            }
            if !children.is_empty() {
                item.children = Some(children);
            }
        }
        Ok(item)
    }

    /// Generated components in `node`, looking through plain nodes.
    fn collect_generated(&self, node: &ComponentNode, out: &mut Vec<RenderItem>) -> Result<()> {
        if self.generated.iter().any(|name| *name == node.node_type) {
            out.push(self.record(&node.node_type, node)?);
            return Ok(());
        }
        for child in node.child_nodes() {
            self.collect_generated(child, out)?;
        }
        Ok(())
    }
}

fn sample_map<'n>(
    names: impl Iterator<Item = &'n str>,
    samples: &IndexMap<String, Value>,
) -> Option<Map<String, Value>> {
    let map: Map<String, Value> = names
        .filter_map(|name| samples.get(name).map(|v| (name.to_string(), v.clone())))
        .collect();
    (!map.is_empty()).then_some(map)
}

#[derive(Serialize)]
struct RendererStoryData {
    records: String,
}

/// Generate `Renderer.stories.tsx` from one record per component.
pub fn generate_renderer_story(engine: &TemplateEngine<'_>, records: &[RenderItem]) -> Result<String> {
    let mut lines = Vec::new();
    for record in records {
        record_lines(record, 6, &mut lines);
    }
    engine.render(
        RENDERER_TEMPLATE_NAME,
        &RendererStoryData {
            records: lines.join("\n"),
        },
    )
}

fn record_lines(record: &RenderItem, indent: usize, lines: &mut Vec<String>) {
    let pad = " ".repeat(indent);
    lines.push(format!("{}{{", pad));
    lines.push(format!("{}  component: {},", pad, js::quote(&record.component)));
    if let Some(style_map) = &record.style_map {
        lines.push(format!("{}  styleMap: {},", pad, map_literal(style_map)));
    }
    if let Some(data) = &record.data {
        lines.push(format!("{}  data: {},", pad, map_literal(data)));
    }
    if let Some(children) = &record.children {
        lines.push(format!("{}  children: [", pad));
        for child in children {
            record_lines(child, indent + 4, lines);
        }
        lines.push(format!("{}  ],", pad));
    }
    lines.push(format!("{}}},", pad));
}
