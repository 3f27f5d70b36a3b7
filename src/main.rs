//! shacl2code CLI entrypoint
//! Parses command-line arguments and dispatches to a language renderer.
#![deny(unsafe_code)]

// Internal imports (std, crate)
use shacl2code::core::model::Model;
use shacl2code::core::templates::TemplateDir;
use shacl2code::lang::Language;
use std::path::{Path, PathBuf};

// External imports (alphabetized)
use anyhow::Context;
use clap::Parser;
use tracing::{Level, error, info};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "shacl2code")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Custom template directory (must contain `lang/` and `common/`)
    #[arg(long, global = true)]
    template_dir: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(clap::Subcommand, Debug)]
pub enum Commands {
    /// Render a model into the selected language
    Generate {
        /// Path to the model (JSON, or YAML with a .yaml/.yml extension)
        #[arg(short, long)]
        input: PathBuf,
        #[command(subcommand)]
        language: Language,
    },
    /// List the available output languages
    List,
}

fn main() -> anyhow::Result<()> {
    // Initialize logging from RUST_LOG, INFO by default; stdout is reserved for output
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::default().add_directive(Level::INFO.into()));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.command {
        Commands::Generate { input, language } => {
            generate(&input, language, cli.template_dir.as_deref())?
        }
        Commands::List => list_languages(),
    }
    Ok(())
}

/// Load the model and run it through the renderer of `language`
fn generate(input: &Path, language: Language, template_dir: Option<&Path>) -> anyhow::Result<()> {
    info!("Generating {} output from {}", language.name(), input.display());

    let templates = TemplateDir::discover(template_dir).context("Failed to locate templates")?;

    let model = Model::from_path(input)
        .with_context(|| format!("Failed to load model from {}", input.display()))?;

    let name = language.name();
    let renderer = language
        .into_renderer(&templates)
        .with_context(|| format!("Failed to set up the {name} renderer"))?;

    if let Err(e) = renderer.render(&model) {
        error!("Rendering {} output failed: {}", name, e);
        return Err(e).with_context(|| format!("Failed to render {name} output"));
    }

    info!("Finished {} output -> {}", name, renderer.output());
    Ok(())
}

fn list_languages() {
    println!("Available languages:");
    for (name, about) in Language::available() {
        println!("  {name:<12} {about}");
    }
}
