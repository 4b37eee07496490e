//! kiln CLI tool.

use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use clap::{Args, Parser, Subcommand, ValueEnum};
use kiln_codegen::{GenerationContext, GeneratorOptions, RenderItem, StyleMode};
use tracing::warn;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "kiln")]
#[command(author, version, about = "Generate React components from declarative JSON trees", long_about = None)]
struct Cli {
    /// Log at debug level
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate components, stylesheets, the renderer and stories
    Generate {
        #[command(flatten)]
        inputs: InputArgs,

        /// Output directory
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// How node styles are emitted
        #[arg(long, value_enum)]
        style_mode: Option<StyleModeArg>,

        /// Do not generate stories
        #[arg(long)]
        no_stories: bool,

        /// Skip malformed component definitions instead of aborting
        #[arg(long)]
        keep_going: bool,
    },

    /// Resolve every component and report placeholder problems without writing
    Check {
        #[command(flatten)]
        inputs: InputArgs,
    },

    /// Pre-render a composition (a JSON list of component records) to JSX
    Render {
        /// Composition file
        composition: PathBuf,

        #[command(flatten)]
        inputs: InputArgs,
    },
}

#[derive(Args)]
struct InputArgs {
    /// JSON options file; flags override its values
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Directory of component definition files
    #[arg(short, long)]
    input: Option<PathBuf>,

    /// Type-declaration file with the component interfaces
    #[arg(short, long)]
    types: Option<PathBuf>,

    /// Fail when two declared fields share a placeholder spelling
    #[arg(long)]
    strict: bool,
}

#[derive(Clone, Copy, ValueEnum)]
enum StyleModeArg {
    Class,
    Inline,
}

impl From<StyleModeArg> for StyleMode {
    fn from(arg: StyleModeArg) -> Self {
        match arg {
            StyleModeArg::Class => StyleMode::Class,
            StyleModeArg::Inline => StyleMode::Inline,
        }
    }
}

impl InputArgs {
    fn options(&self) -> Result<GeneratorOptions> {
        let mut options = match &self.config {
            Some(path) => GeneratorOptions::from_json_file(path)
                .with_context(|| format!("failed to load config {}", path.display()))?,
            None => GeneratorOptions::default(),
        };
        if let Some(input) = &self.input {
            options.input_dir = input.clone();
        }
        if let Some(types) = &self.types {
            options.types_file = types.clone();
        }
        if self.strict {
            options.strict_placeholders = true;
        }
        Ok(options)
    }
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Commands::Generate {
            inputs,
            output,
            style_mode,
            no_stories,
            keep_going,
        } => {
            let mut options = inputs.options()?;
            if let Some(output) = output {
                options.output_dir = output;
            }
            if let Some(mode) = style_mode {
                options.style_mode = mode.into();
            }
            if no_stories {
                options.stories = false;
            }
            if keep_going {
                options.keep_going = true;
            }
            run_generate(options)
        }
        Commands::Check { inputs } => run_check(inputs.options()?),
        Commands::Render { composition, inputs } => run_render(&composition, inputs.options()?),
    }
}

fn run_generate(options: GeneratorOptions) -> Result<()> {
    let output = options.output_dir.clone();
    let project = kiln_codegen::run(options)?;

    println!("Generated {} files to {}", project.len(), output.display());
    for path in project.paths() {
        println!("  - {}", path);
    }
    Ok(())
}

fn run_check(options: GeneratorOptions) -> Result<()> {
    let strict = options.strict_placeholders;
    let context = GenerationContext::new(options)?;
    let inputs = context.load_inputs()?;
    let reports = context.check(&inputs)?;

    let mut collisions = 0;
    for report in &reports {
        let status = if report.declared { "declared" } else { "undeclared" };
        println!("{} ({}, {} references)", report.name, status, report.references);
        for collision in &report.collisions {
            println!(
                "    '{}' maps to both {} and {}",
                collision.surface, collision.previous, collision.current
            );
        }
        collisions += report.collisions.len();
    }

    println!("{} components, {} placeholder collisions", reports.len(), collisions);
    if strict && collisions > 0 {
        bail!("placeholder collisions found");
    }
    Ok(())
}

fn run_render(composition: &Path, options: GeneratorOptions) -> Result<()> {
    let source = std::fs::read_to_string(composition)
        .with_context(|| format!("failed to read {}", composition.display()))?;
    let items: Vec<RenderItem> = serde_json::from_str(&source)
        .with_context(|| format!("invalid composition {}", composition.display()))?;

    let context = GenerationContext::new(options)?;
    let inputs = context.load_inputs()?;
    let dispatcher = context.dispatcher(&inputs);
    if dispatcher.is_empty() {
        warn!("no components to dispatch to");
    }

    println!("{}", dispatcher.to_jsx(&items));
    Ok(())
}
