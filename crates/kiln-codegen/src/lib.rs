//! Source generation for kiln components.
//!
//! Turns resolved component trees into:
//! - `<Name>.tsx` component modules
//! - `<Name>.css` stylesheets with structural class names
//! - a combined `style.css` and a `Renderer.tsx` dispatch module
//! - `<Name>.stories.tsx` preview stories and a `Renderer.stories.tsx`
//!   composition of every component's samples
//!
//! # Example
//!
//! ```no_run
//! use kiln_codegen::{run, GeneratorOptions};
//!
//! let project = run(GeneratorOptions::default())?;
//! println!("wrote {} files", project.len());
//! # Ok::<(), kiln_codegen::CodegenError>(())
//! ```

pub mod classes;
pub mod component;
pub mod dispatch;
pub mod error;
mod js;
pub mod options;
pub mod pipeline;
pub mod project;
pub mod renderer;
pub mod stories;
pub mod style;
pub mod templates;

pub use classes::{assign_classes, build_stylesheet, ClassAssignment, CssRule, Stylesheet};
pub use component::{generate_component_source, ComponentSource};
pub use dispatch::{Dispatcher, RenderItem, RenderedElement};
pub use error::{CodegenError, Result};
pub use options::{GeneratorOptions, StyleMode};
pub use pipeline::{
    load_inputs, run, ComponentInput, ComponentReport, GeneratedComponent, GenerationContext,
};
pub use project::{GeneratedFile, GeneratedProject};
pub use renderer::generate_renderer;
pub use stories::{generate_renderer_story, generate_story, RendererStoryBuilder, StoryInput};
pub use style::{css_value, inline_style_entries, style_declarations, Declaration};
pub use templates::TemplateEngine;
