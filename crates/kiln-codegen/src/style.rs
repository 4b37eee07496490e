//! Style emission.
//!
//! Turns a node's resolved `styleMap` into CSS declarations, or into the
//! entries of a JSX inline style object.

use kiln_core::{
    naming::{camel_to_kebab, kebab_to_camel},
    Category, PropertyReference, ResolvedMap, ResolvedValue,
};
use serde_json::Value;
use std::fmt;

use crate::js;

/// Keys that have no textual CSS equivalent and are dropped.
const DROPPED_KEYS: &[&str] = &[
    "shadowOffset",
    "shadowOffsetX",
    "shadowOffsetY",
    "shadowColor",
    "shadowOpacity",
    "shadowRadius",
    "elevation",
    "numberOfLines",
];

/// Properties whose numeric values take no unit.
const UNITLESS_KEYS: &[&str] = &[
    "opacity",
    "zIndex",
    "fontWeight",
    "lineHeight",
    "flex",
    "flexGrow",
    "flexShrink",
    "order",
];

/// Axis shorthands and the two physical properties each expands to.
fn axis_expansion(key: &str) -> Option<[&'static str; 2]> {
    match key {
        "marginHorizontal" => Some(["marginLeft", "marginRight"]),
        "marginVertical" => Some(["marginTop", "marginBottom"]),
        "paddingHorizontal" => Some(["paddingLeft", "paddingRight"]),
        "paddingVertical" => Some(["paddingTop", "paddingBottom"]),
        _ => None,
    }
}

/// A single `property: value;` line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Declaration {
    pub property: String,
    pub value: String,
}

impl fmt::Display for Declaration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {};", self.property, self.value)
    }
}

/// A style entry after shorthand expansion: the property name as written
/// (or produced by expansion), the source key, and the value.
struct StyleEntry<'a> {
    name: &'a str,
    key: &'a str,
    value: &'a ResolvedValue,
}

fn style_entries(style_map: &ResolvedMap) -> Vec<StyleEntry<'_>> {
    let mut entries = Vec::with_capacity(style_map.len());
    for (key, value) in style_map {
        let key = key.as_str();
        if let Some(axes) = axis_expansion(key) {
            entries.extend(axes.into_iter().map(|name| StyleEntry { name, key, value }));
            continue;
        }
        if DROPPED_KEYS.contains(&key) {
            continue;
        }
        entries.push(StyleEntry { name: key, key, value });
    }
    entries
}

fn is_unitless(key: &str) -> bool {
    UNITLESS_KEYS.contains(&key) || UNITLESS_KEYS.contains(&kebab_to_camel(key).as_str())
}

/// CSS declarations for a resolved style map, in key order.
pub fn style_declarations(style_map: &ResolvedMap) -> Vec<Declaration> {
    style_entries(style_map)
        .into_iter()
        .filter_map(|entry| {
            css_value(entry.value, entry.key).map(|value| Declaration {
                property: camel_to_kebab(entry.name),
                value,
            })
        })
        .collect()
}

/// The CSS text for one value, or `None` when the value has no CSS form.
pub fn css_value(value: &ResolvedValue, key: &str) -> Option<String> {
    match value {
        ResolvedValue::Reference(reference) => Some(match reference.category {
            Category::Style => format!("var({})", reference.key),
            Category::Data => reference.surface.clone(),
        }),
        ResolvedValue::Literal(Value::String(s)) => Some(s.clone()),
        ResolvedValue::Literal(Value::Number(n)) => {
            let number = js::format_number(n);
            Some(if is_unitless(key) { number } else { format!("{}px", number) })
        }
        ResolvedValue::Literal(Value::Bool(b)) => Some(b.to_string()),
        ResolvedValue::Literal(_) | ResolvedValue::Array(_) | ResolvedValue::Object(_) => None,
    }
}

/// Entries of a JSX inline style object: camelCase key and JS expression.
///
/// Style references become `"var(--key)"` strings, data references read
/// the component's `data` input, and literals are printed as JSON. The same
/// shorthand expansion and dropped keys apply as for CSS.
pub fn inline_style_entries(style_map: &ResolvedMap) -> Vec<(String, String)> {
    style_entries(style_map)
        .into_iter()
        .filter_map(|entry| {
            let value = match entry.value {
                ResolvedValue::Reference(reference) => reference_expr(reference),
                ResolvedValue::Literal(Value::Null) => return None,
                ResolvedValue::Literal(v) => js::literal(v),
                ResolvedValue::Array(_) | ResolvedValue::Object(_) => return None,
            };
            Some((kebab_to_camel(entry.name), value))
        })
        .collect()
}

fn reference_expr(reference: &PropertyReference) -> String {
    match reference.category {
        Category::Style => js::quote(&format!("var({})", reference.key)),
        Category::Data => js::optional_member("props.data", &reference.key),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kiln_core::PropertyReference;
    use serde_json::json;

    fn literal_map(value: Value) -> ResolvedMap {
        let Value::Object(map) = value else {
            panic!("expected an object");
        };
        map.into_iter()
            .map(|(k, v)| (k, ResolvedValue::Literal(v)))
            .collect()
    }

    fn lines(style_map: &ResolvedMap) -> Vec<String> {
        style_declarations(style_map).iter().map(ToString::to_string).collect()
    }

    #[test]
    fn test_margin_horizontal_expands() {
        let map = literal_map(json!({ "marginHorizontal": 16 }));
        assert_eq!(lines(&map), vec!["margin-left: 16px;", "margin-right: 16px;"]);
    }

    #[test]
    fn test_vertical_padding_expands() {
        let map = literal_map(json!({ "paddingVertical": "1rem" }));
        assert_eq!(lines(&map), vec!["padding-top: 1rem;", "padding-bottom: 1rem;"]);
    }

    #[test]
    fn test_opacity_is_unitless() {
        let map = literal_map(json!({ "opacity": 0.5, "zIndex": 3, "z-index": 4, "width": 120 }));
        assert_eq!(
            lines(&map),
            vec!["opacity: 0.5;", "z-index: 3;", "z-index: 4;", "width: 120px;"]
        );
    }

    #[test]
    fn test_dropped_keys() {
        let map = literal_map(json!({
            "shadowColor": "#000",
            "shadowOffset": { "width": 0, "height": 2 },
            "elevation": 4,
            "numberOfLines": 2,
            "color": "#333333"
        }));
        assert_eq!(lines(&map), vec!["color: #333333;"]);
    }

    #[test]
    fn test_non_css_values_are_skipped() {
        let map = literal_map(json!({ "a": null, "b": [1, 2], "c": { "d": 1 }, "visible": true }));
        assert_eq!(lines(&map), vec!["visible: true;"]);
    }

    #[test]
    fn test_references() {
        let mut map = ResolvedMap::new();
        map.insert(
            "backgroundColor".into(),
            ResolvedValue::Reference(PropertyReference::style("--button-bg-color", "button-bg-color")),
        );
        map.insert(
            "fontFamily".into(),
            ResolvedValue::Reference(PropertyReference::data("fontName", "font-name")),
        );
        assert_eq!(
            lines(&map),
            vec!["background-color: var(--button-bg-color);", "font-family: font-name;"]
        );
    }

    #[test]
    fn test_inline_entries() {
        let mut map = literal_map(json!({ "marginHorizontal": 8, "font-size": 14, "shadowRadius": 2 }));
        map.insert(
            "color".into(),
            ResolvedValue::Reference(PropertyReference::style("--text-color", "textColor")),
        );
        map.insert(
            "fontFamily".into(),
            ResolvedValue::Reference(PropertyReference::data("fontName", "fontName")),
        );
        let entries = inline_style_entries(&map);
        let expected: Vec<(String, String)> = vec![
            ("marginLeft".into(), "8".into()),
            ("marginRight".into(), "8".into()),
            ("fontSize".into(), "14".into()),
            ("color".into(), r#""var(--text-color)""#.into()),
            ("fontFamily".into(), "props.data?.fontName".into()),
        ];
        assert_eq!(entries, expected);
    }
}
