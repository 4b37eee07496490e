//! Generation runs.
//!
//! A [`GenerationContext`] owns everything a run shares: options, the
//! interface table read from the declaration file and the template engine.
//! Components are generated independently and in parallel; the aggregate
//! stylesheet, dispatch module and its story are assembled afterwards in
//! input order.

use kiln_core::{naming::component_name_from_file_stem, ComponentNode, InterfaceTable, ParseError};
use kiln_parser::read_interfaces;
use kiln_resolver::{build_index, resolve_component, Collision, CollisionPolicy};
use rayon::prelude::*;
use std::path::{Path, PathBuf};
use tracing::{debug, error, info, warn};

use crate::component::{generate_component_source, ComponentSource};
use crate::dispatch::Dispatcher;
use crate::error::Result;
use crate::options::GeneratorOptions;
use crate::project::GeneratedProject;
use crate::renderer::generate_renderer;
use crate::stories::{generate_renderer_story, generate_story, RendererStoryBuilder, StoryInput};
use crate::templates::TemplateEngine;

/// A parsed component definition.
#[derive(Debug, Clone)]
pub struct ComponentInput {
    /// Component name, derived from the file stem.
    pub name: String,
    pub path: PathBuf,
    pub node: ComponentNode,
}

impl ComponentInput {
    pub fn new(name: impl Into<String>, node: ComponentNode) -> Self {
        let name = name.into();
        let path = PathBuf::from(format!("{}.json", name));
        Self { name, path, node }
    }
}

/// Generated artifacts of one component.
#[derive(Debug, Clone)]
pub struct GeneratedComponent {
    pub source: ComponentSource,
    pub story: Option<String>,
}

/// What `check` found for one component.
#[derive(Debug, Clone)]
pub struct ComponentReport {
    pub name: String,
    /// Whether the declaration file declares this component.
    pub declared: bool,
    /// Placeholders that resolved to a declared property.
    pub references: usize,
    pub collisions: Vec<Collision>,
}

/// Shared state of one generation run.
pub struct GenerationContext<'a> {
    options: GeneratorOptions,
    interfaces: InterfaceTable,
    engine: TemplateEngine<'a>,
}

impl<'a> GenerationContext<'a> {
    /// Create a context, reading interfaces from `options.types_file`.
    pub fn new(options: GeneratorOptions) -> Result<Self> {
        let interfaces = read_interfaces(&options.types_file)?;
        info!(
            path = %options.types_file.display(),
            interfaces = interfaces.len(),
            "loaded interface declarations"
        );
        Self::with_interfaces(options, interfaces)
    }

    /// Create a context with an already built interface table.
    pub fn with_interfaces(options: GeneratorOptions, interfaces: InterfaceTable) -> Result<Self> {
        Ok(Self {
            options,
            interfaces,
            engine: TemplateEngine::with_builtin_templates()?,
        })
    }

    pub fn options(&self) -> &GeneratorOptions {
        &self.options
    }

    pub fn interfaces(&self) -> &InterfaceTable {
        &self.interfaces
    }

    /// Read and parse every `*.json` definition in the input directory, in
    /// file-name order.
    pub fn load_inputs(&self) -> Result<Vec<ComponentInput>> {
        load_inputs(&self.options.input_dir, self.options.keep_going)
    }

    /// Resolve and emit one component.
    pub fn generate_component(&self, input: &ComponentInput) -> Result<GeneratedComponent> {
        let interface = self.interfaces.get_or_empty(&input.name);
        let index = build_index(&interface, self.options.collision_policy())?;
        let root = resolve_component(&input.node, &interface, &index);
        let source = generate_component_source(&input.name, &interface, &root, &self.options);

        let story = if self.options.stories {
            let story_input = StoryInput {
                name: &input.name,
                node: &input.node,
                interface: &interface,
                index: &index,
                has_css: source.css.is_some(),
            };
            Some(generate_story(&self.engine, &story_input, &self.options)?)
        } else {
            None
        };

        debug!(component = %input.name, references = root.references().len(), "generated component");
        Ok(GeneratedComponent { source, story })
    }

    /// Generate every artifact for `inputs`. Nothing is written.
    pub fn generate(&self, inputs: &[ComponentInput]) -> Result<GeneratedProject> {
        let components = inputs
            .par_iter()
            .map(|input| self.generate_component(input))
            .collect::<Result<Vec<_>>>()?;

        let mut project = GeneratedProject::default();
        if components.is_empty() {
            return Ok(project);
        }

        let mut sheets = Vec::new();
        for component in &components {
            let name = &component.source.name;
            project.push(format!("{}.tsx", name), component.source.tsx.clone());
            if let Some(css) = &component.source.css {
                project.push(format!("{}.css", name), css.clone());
                sheets.push(format!("/* {} */\n{}\n", name, css));
            }
            if let Some(story) = &component.story {
                project.push(format!("{}.stories.tsx", name), story.clone());
            }
        }

        project.push("style.css", sheets.join("\n"));

        let names: Vec<String> = components.iter().map(|c| c.source.name.clone()).collect();
        let renderer = generate_renderer(&self.engine, &names, !sheets.is_empty())?;
        project.push("Renderer.tsx", renderer);

        if self.options.stories {
            let builder = RendererStoryBuilder::new(&self.interfaces, &names, self.options.collision_policy());
            let records = inputs
                .iter()
                .map(|input| builder.record(&input.name, &input.node))
                .collect::<Result<Vec<_>>>()?;
            project.push("Renderer.stories.tsx", generate_renderer_story(&self.engine, &records)?);
        }

        Ok(project)
    }

    /// A dispatcher over the given components.
    pub fn dispatcher(&self, inputs: &[ComponentInput]) -> Dispatcher {
        Dispatcher::new(inputs.iter().map(|input| input.name.clone()))
    }

    /// Resolve every input without emitting anything, reporting collisions
    /// and reference counts. Collisions are collected, never fatal.
    pub fn check(&self, inputs: &[ComponentInput]) -> Result<Vec<ComponentReport>> {
        inputs
            .iter()
            .map(|input| {
                let interface = self.interfaces.get_or_empty(&input.name);
                let index = build_index(&interface, CollisionPolicy::LastWriteWins)?;
                let root = resolve_component(&input.node, &interface, &index);
                Ok(ComponentReport {
                    name: input.name.clone(),
                    declared: self.interfaces.contains(&input.name),
                    references: root.references().len(),
                    collisions: index.collisions().to_vec(),
                })
            })
            .collect()
    }
}

/// Parse every `*.json` file in `dir`, sorted by file name.
///
/// All files are parsed before anything is generated. A malformed file aborts
/// the run unless `keep_going` is set, in which case it is logged and skipped.
/// Stems that map to the same component name keep the later file.
pub fn load_inputs(dir: &Path, keep_going: bool) -> Result<Vec<ComponentInput>> {
    let io_error = |source| ParseError::Io {
        path: dir.to_path_buf(),
        source,
    };

    let mut paths = Vec::new();
    for entry in std::fs::read_dir(dir).map_err(io_error)? {
        let path = entry.map_err(io_error)?.path();
        if path.is_file() && path.extension().is_some_and(|ext| ext == "json") {
            paths.push(path);
        }
    }
    paths.sort();

    let mut inputs = Vec::with_capacity(paths.len());
    for path in paths {
        match parse_input(&path) {
            Ok(input) => match inputs.iter().position(|seen: &ComponentInput| seen.name == input.name) {
                Some(pos) => {
                    warn!(
                        component = %input.name,
                        replaced = %inputs[pos].path.display(),
                        path = %input.path.display(),
                        "duplicate component name"
                    );
                    inputs[pos] = input;
                }
                None => inputs.push(input),
            },
            Err(err) if keep_going => {
                error!(path = %path.display(), error = %err, "skipping component definition");
            }
            Err(err) => return Err(err.into()),
        }
    }

    if inputs.is_empty() {
        warn!(dir = %dir.display(), "no component definitions found");
    }
    Ok(inputs)
}

fn parse_input(path: &Path) -> std::result::Result<ComponentInput, ParseError> {
    let source = std::fs::read_to_string(path).map_err(|source| ParseError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let node = ComponentNode::from_json(&source).map_err(|source| ParseError::InvalidComponent {
        path: path.to_path_buf(),
        source,
    })?;
    let stem = path.file_stem().and_then(|s| s.to_str()).unwrap_or_default();
    Ok(ComponentInput {
        name: component_name_from_file_stem(stem),
        path: path.to_path_buf(),
        node,
    })
}

/// Load, generate and write everything `options` describes.
pub fn run(options: GeneratorOptions) -> Result<GeneratedProject> {
    let context = GenerationContext::new(options)?;
    let inputs = context.load_inputs()?;
    let project = context.generate(&inputs)?;
    project.write_to(&context.options.output_dir)?;
    info!(
        components = inputs.len(),
        files = project.len(),
        output = %context.options.output_dir.display(),
        "generation complete"
    );
    Ok(project)
}
