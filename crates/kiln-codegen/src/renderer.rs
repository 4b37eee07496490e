//! The `Renderer.tsx` dispatch module.
//!
//! Imports every generated component, registers each under its lowercase
//! name and exposes a recursive `renderComponent` over composition records.

use serde::Serialize;

use crate::error::Result;
use crate::templates::TemplateEngine;

pub(crate) const TEMPLATE_NAME: &str = "renderer";

pub(crate) const TEMPLATE: &str = r#"import React from 'react';
{{imports}}

const componentMap: Record<string, React.ComponentType<any>> = {
{{registry}}
};

export interface ComponentData {
  component: string;
  styleMap?: Record<string, any>;
  data?: Record<string, any>;
  children?: ComponentData[];
}

export interface RendererProps {
  data: ComponentData[];
}

export function renderComponent(item: ComponentData): React.ReactNode {
  const { component, styleMap, data, children } = item;
  const Component = componentMap[component.toLowerCase()];

  if (!Component) {
    console.warn(`Component "${component}" not found in component map`);
    return null;
  }

  const props: Record<string, unknown> = {};
  if (styleMap) {
    props.styleMap = styleMap;
  }
  if (data) {
    props.data = data;
  }

  if (Array.isArray(children) && children.length > 0) {
    return (
      <Component {...props}>
        {children.map((child, index) => (
          <React.Fragment key={index}>{renderComponent(child)}</React.Fragment>
        ))}
      </Component>
    );
  }

  return <Component {...props} />;
}

export const Renderer = (props: RendererProps) => {
  const { data } = props;
  if (!Array.isArray(data)) {
    return null;
  }

  return (
    <>
      {data.map((item, index) => (
        <React.Fragment key={index}>{renderComponent(item)}</React.Fragment>
      ))}
    </>
  );
};
"#;

#[derive(Serialize)]
struct RendererData {
    imports: String,
    registry: String,
}

/// Render the dispatch module for the given components. Imports and registry
/// entries are sorted by name.
pub fn generate_renderer(engine: &TemplateEngine<'_>, components: &[String], has_stylesheet: bool) -> Result<String> {
    let mut components: Vec<&String> = components.iter().collect();
    components.sort();
    components.dedup();

    let mut imports = Vec::with_capacity(components.len() + 1);
    if has_stylesheet {
        imports.push("import './style.css';".to_string());
    }
    imports.extend(
        components
            .iter()
            .map(|name| format!("import {{ {} }} from './{}';", name, name)),
    );

    let registry = components
        .iter()
        .map(|name| format!("  {}: {},", crate::js::quote(&name.to_lowercase()), name))
        .collect::<Vec<_>>()
        .join("\n");

    engine.render(
        TEMPLATE_NAME,
        &RendererData {
            imports: imports.join("\n"),
            registry,
        },
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn render(components: &[&str], has_stylesheet: bool) -> String {
        let engine = TemplateEngine::with_builtin_templates().unwrap();
        let names: Vec<String> = components.iter().map(|s| s.to_string()).collect();
        generate_renderer(&engine, &names, has_stylesheet).unwrap()
    }

    #[test]
    fn test_imports_and_registry() {
        let out = render(&["Button", "NavigationBar"], true);
        assert!(out.starts_with(
            "import React from 'react';\nimport './style.css';\nimport { Button } from './Button';\nimport { NavigationBar } from './NavigationBar';\n\n"
        ));
        assert!(out.contains(
            "const componentMap: Record<string, React.ComponentType<any>> = {\n  \"button\": Button,\n  \"navigationbar\": NavigationBar,\n};"
        ));
    }

    #[test]
    fn test_unknown_names_warn_and_return_null() {
        let out = render(&["Card"], false);
        assert!(!out.contains("style.css"));
        assert!(out.contains("componentMap[component.toLowerCase()]"));
        assert!(out.contains("console.warn(`Component \"${component}\" not found in component map`);\n    return null;"));
        assert!(out.contains("{renderComponent(child)}"));
    }

    #[test]
    fn test_registry_is_sorted() {
        let out = render(&["Label", "Button", "Card"], false);
        assert!(out.contains(
            "import { Button } from './Button';\nimport { Card } from './Card';\nimport { Label } from './Label';\n"
        ));
        assert!(out.contains("  \"button\": Button,\n  \"card\": Card,\n  \"label\": Label,\n};"));
    }

    #[test]
    fn test_non_array_data_renders_nothing() {
        let out = render(&["Button"], false);
        assert!(out.contains(
            "  const { data } = props;\n  if (!Array.isArray(data)) {\n    return null;\n  }\n"
        ));
        assert!(out.contains("      {data.map((item, index) => ("));
    }
}
