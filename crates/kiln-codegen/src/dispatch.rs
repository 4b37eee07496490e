//! Generation-time counterpart of the `Renderer.tsx` registry.
//!
//! Lets a composition (an ordered list of `{ component, styleMap?, data?,
//! children? }` records) be checked against the generated components and
//! pre-rendered to JSX without a JavaScript runtime.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::warn;

use crate::js;

/// One record of a composition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RenderItem {
    pub component: String,
    #[serde(rename = "styleMap", default, skip_serializing_if = "Option::is_none")]
    pub style_map: Option<Map<String, Value>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<Map<String, Value>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub children: Option<Vec<RenderItem>>,
}

impl RenderItem {
    pub fn new(component: impl Into<String>) -> Self {
        Self {
            component: component.into(),
            style_map: None,
            data: None,
            children: None,
        }
    }

    pub fn with_child(mut self, child: RenderItem) -> Self {
        self.children.get_or_insert_with(Vec::new).push(child);
        self
    }
}

/// A record whose component was found in the registry.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderedElement {
    /// Canonical component name, as registered.
    pub component: String,
    pub style_map: Option<Map<String, Value>>,
    pub data: Option<Map<String, Value>>,
    pub children: Vec<RenderedElement>,
}

/// Case-insensitive component registry.
#[derive(Debug, Clone, Default)]
pub struct Dispatcher {
    registry: IndexMap<String, String>,
}

impl Dispatcher {
    pub fn new<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let registry = names
            .into_iter()
            .map(|name| {
                let name = name.into();
                (name.to_lowercase(), name)
            })
            .collect();
        Self { registry }
    }

    pub fn contains(&self, component: &str) -> bool {
        self.registry.contains_key(&component.to_lowercase())
    }

    /// Canonical name for `component`, ignoring case.
    pub fn resolve(&self, component: &str) -> Option<&str> {
        self.registry.get(&component.to_lowercase()).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.registry.len()
    }

    pub fn is_empty(&self) -> bool {
        self.registry.is_empty()
    }

    /// Render a list of records. Unknown components are logged and skipped;
    /// their siblings are still rendered.
    pub fn render(&self, items: &[RenderItem]) -> Vec<RenderedElement> {
        items.iter().filter_map(|item| self.render_item(item)).collect()
    }

    fn render_item(&self, item: &RenderItem) -> Option<RenderedElement> {
        let Some(component) = self.resolve(&item.component) else {
            warn!(component = %item.component, "component not found in registry");
            return None;
        };

        let children = item
            .children
            .as_deref()
            .map(|children| self.render(children))
            .unwrap_or_default();

        Some(RenderedElement {
            component: component.to_string(),
            style_map: item.style_map.clone(),
            data: item.data.clone(),
            children,
        })
    }

    /// Render a list of records to JSX, one top-level element per line.
    pub fn to_jsx(&self, items: &[RenderItem]) -> String {
        self.render(items)
            .iter()
            .map(element_jsx)
            .collect::<Vec<_>>()
            .join("\n")
    }
}

fn element_jsx(element: &RenderedElement) -> String {
    let mut tag = element.component.clone();
    if let Some(style_map) = &element.style_map {
        tag.push_str(&format!(" styleMap={{{}}}", js::literal(&Value::Object(style_map.clone()))));
    }
    if let Some(data) = &element.data {
        tag.push_str(&format!(" data={{{}}}", js::literal(&Value::Object(data.clone()))));
    }

    if element.children.is_empty() {
        return format!("<{} />", tag);
    }
    let inner: String = element.children.iter().map(element_jsx).collect();
    format!("<{}>{}</{}>", tag, inner, element.component)
}
