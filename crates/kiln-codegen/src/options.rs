//! Generator configuration.

use kiln_resolver::CollisionPolicy;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::Result;

/// How node styles reach the generated markup.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StyleMode {
    /// Per-node class names plus a stylesheet per component.
    #[default]
    Class,
    /// JSX inline style objects; no stylesheets.
    Inline,
}

/// Options for a generation run.
///
/// Every field has a default, so a config file only needs the fields it
/// changes:
///
/// ```json
/// { "input_dir": "examples", "style_mode": "inline", "stories": false }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorOptions {
    /// Directory of `*.json` component definitions.
    pub input_dir: PathBuf,
    /// Type-declaration file with the component interfaces.
    pub types_file: PathBuf,
    /// Where generated files are written.
    pub output_dir: PathBuf,
    /// Import path of the base components, relative to the output directory.
    pub components_import_path: String,
    /// Root types that always get a props interface.
    pub container_types: Vec<String>,
    pub style_mode: StyleMode,
    /// Generate `<Name>.stories.tsx` files.
    pub stories: bool,
    /// Skip component definitions that fail to parse instead of aborting.
    pub keep_going: bool,
    /// Fail when two declared fields share a placeholder spelling.
    pub strict_placeholders: bool,
}

impl Default for GeneratorOptions {
    fn default() -> Self {
        Self {
            input_dir: PathBuf::from("components"),
            types_file: PathBuf::from("components/types.d.ts"),
            output_dir: PathBuf::from("generated"),
            components_import_path: "../components".to_string(),
            container_types: ["Grid", "Container", "Text", "Image"]
                .into_iter()
                .map(String::from)
                .collect(),
            style_mode: StyleMode::Class,
            stories: true,
            keep_going: false,
            strict_placeholders: false,
        }
    }
}

impl GeneratorOptions {
    /// Load options from a JSON file; missing fields take their defaults.
    pub fn from_json_file(path: &Path) -> Result<Self> {
        let source = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&source)?)
    }

    pub fn collision_policy(&self) -> CollisionPolicy {
        if self.strict_placeholders {
            CollisionPolicy::Strict
        } else {
            CollisionPolicy::LastWriteWins
        }
    }

    pub fn is_container(&self, node_type: &str) -> bool {
        self.container_types.iter().any(|t| t == node_type)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_config_keeps_defaults() {
        let options: GeneratorOptions =
            serde_json::from_str(r#"{ "style_mode": "inline", "strict_placeholders": true }"#).unwrap();
        assert_eq!(options.style_mode, StyleMode::Inline);
        assert_eq!(options.collision_policy(), CollisionPolicy::Strict);
        assert_eq!(options.input_dir, PathBuf::from("components"));
        assert!(options.is_container("Grid"));
        assert!(options.stories);
    }

    #[test]
    fn test_unknown_style_mode_is_rejected() {
        let result: serde_json::Result<GeneratorOptions> = serde_json::from_str(r#"{ "style_mode": "tailwind" }"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_from_json_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("kiln.json");
        std::fs::write(&path, r#"{ "output_dir": "out", "container_types": ["Stack"] }"#).unwrap();

        let options = GeneratorOptions::from_json_file(&path).unwrap();
        assert_eq!(options.output_dir, PathBuf::from("out"));
        assert!(options.is_container("Stack"));
        assert!(!options.is_container("Grid"));
    }
}
