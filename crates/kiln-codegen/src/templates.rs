//! Template engine for the aggregate artifacts.

use crate::error::{CodegenError, Result};
use handlebars::Handlebars;
use serde::Serialize;

/// Template engine using Handlebars.
///
/// Output is source code, so HTML escaping is disabled.
pub struct TemplateEngine<'a> {
    handlebars: Handlebars<'a>,
}

impl<'a> TemplateEngine<'a> {
    /// Create a new template engine.
    pub fn new() -> Self {
        let mut handlebars = Handlebars::new();
        handlebars.register_escape_fn(handlebars::no_escape);
        handlebars.set_strict_mode(true);
        Self { handlebars }
    }

    /// Create an engine with the renderer and story templates registered.
    pub fn with_builtin_templates() -> Result<Self> {
        let mut engine = Self::new();
        engine.register_template(crate::renderer::TEMPLATE_NAME, crate::renderer::TEMPLATE)?;
        engine.register_template(crate::stories::TEMPLATE_NAME, crate::stories::TEMPLATE)?;
        engine.register_template(
            crate::stories::RENDERER_TEMPLATE_NAME,
            crate::stories::RENDERER_TEMPLATE,
        )?;
        Ok(engine)
    }

    /// Register a template.
    pub fn register_template(&mut self, name: &str, template: &str) -> Result<()> {
        self.handlebars
            .register_template_string(name, template)
            .map_err(CodegenError::InvalidTemplate)?;
        Ok(())
    }

    #[cfg(test)]
    pub(crate) fn has_template(&self, name: &str) -> bool {
        self.handlebars.has_template(name)
    }

    /// Render a template.
    pub fn render<T: Serialize>(&self, name: &str, data: &T) -> Result<String> {
        self.handlebars
            .render(name, data)
            .map_err(CodegenError::TemplateError)
    }

    /// Render a template string directly.
    #[cfg(test)]
    pub(crate) fn render_string<T: Serialize>(&self, template: &str, data: &T) -> Result<String> {
        self.handlebars
            .render_template(template, data)
            .map_err(CodegenError::TemplateError)
    }
}

impl<'a> Default for TemplateEngine<'a> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_render_simple() {
        let mut engine = TemplateEngine::new();
        engine.register_template("hello", "Hello, {{name}}!").unwrap();

        let result = engine.render("hello", &json!({"name": "World"})).unwrap();
        assert_eq!(result, "Hello, World!");
    }

    #[test]
    fn test_source_text_is_not_escaped() {
        let engine = TemplateEngine::new();
        let result = engine
            .render_string("{{code}}", &json!({"code": "<Text data={{ a: \"b\" }} />"}))
            .unwrap();
        assert_eq!(result, "<Text data={{ a: \"b\" }} />");
    }

    #[test]
    fn test_missing_variable_is_an_error() {
        let engine = TemplateEngine::new();
        let result = engine.render_string("{{missing}}", &json!({}));
        assert!(matches!(result, Err(CodegenError::TemplateError(_))));
    }

    #[test]
    fn test_builtin_templates_register() {
        let engine = TemplateEngine::with_builtin_templates().unwrap();
        assert!(engine.has_template(crate::renderer::TEMPLATE_NAME));
        assert!(engine.has_template(crate::stories::TEMPLATE_NAME));
        assert!(engine.has_template(crate::stories::RENDERER_TEMPLATE_NAME));
    }

    #[test]
    fn test_unregistered_template_is_an_error() {
        let engine = TemplateEngine::new();
        assert!(!engine.has_template("renderer"));
        let result = engine.render("renderer", &json!({}));
        assert!(matches!(result, Err(CodegenError::TemplateError(_))));
    }

    #[test]
    fn test_invalid_template() {
        let mut engine = TemplateEngine::new();
        let result = engine.register_template("broken", "{{#if}}");
        assert!(matches!(result, Err(CodegenError::InvalidTemplate(_))));
    }
}
