//! Language renderers.
//!
//! Every target language implements [`Renderer`]: it owns the arguments it was
//! invoked with (at least an [`OutputArgs`]), names its template, and can add
//! helpers and render parameters. Rendering itself is shared and lives in the
//! provided [`Renderer::render`] method.
//!
//! The set of languages is the [`Language`] subcommand enum; adding a language
//! means adding a variant and mapping it in [`Language::into_renderer`].

pub mod jsonschema;
pub mod markdown;
pub mod template;

use clap::{Args, Subcommand};
use serde_json::{Map, Value as JsonValue};
use tracing::debug;

use crate::core::error::Result;
use crate::core::model::Model;
use crate::core::output::OutputFile;
use crate::core::templates::{Helpers, TemplateDir, TemplateLocator, TemplateRenderer};

pub use jsonschema::{JsonSchemaArgs, JsonSchemaRender};
pub use markdown::{MarkdownArgs, MarkdownRender};
pub use template::{TemplateArgs, TemplateRender};

/// Arguments shared by every language
#[derive(Args, Debug, Clone)]
pub struct OutputArgs {
    /// Output file or '-' for stdout
    #[arg(short, long)]
    pub output: OutputFile,
}

/// Contract implemented by every language renderer
pub trait Renderer {
    /// Where the generated text goes
    fn output(&self) -> &OutputFile;

    /// Template to render and where to look for it
    fn template(&self) -> &TemplateLocator;

    /// Extra globals and functions for the template scope
    fn extra_env(&self) -> Helpers {
        Helpers::new()
    }

    /// Extra render parameters
    fn additional_render_args(&self) -> Map<String, JsonValue> {
        Map::new()
    }

    /// Render `model` through this language's template
    fn render(&self, model: &Model) -> Result<()> {
        debug!(
            template = %self.template().name(),
            output = %self.output(),
            "Dispatching render"
        );
        TemplateRenderer::new(self.template().clone())
            .with_extra_env(self.extra_env())
            .with_render_args(self.additional_render_args())
            .render(model, self.output())
    }
}

/// Registered target languages
#[derive(Subcommand, Debug, Clone)]
pub enum Language {
    /// Render a user-supplied Tera template
    Tera(TemplateArgs),
    /// JSON Schema definitions for every class and enumeration
    Jsonschema(JsonSchemaArgs),
    /// Markdown reference documentation with class hierarchies
    Markdown(MarkdownArgs),
}

impl Language {
    /// Name the language is registered under
    pub fn name(&self) -> &'static str {
        match self {
            Self::Tera(_) => "tera",
            Self::Jsonschema(_) => "jsonschema",
            Self::Markdown(_) => "markdown",
        }
    }

    /// Build the renderer for this language
    pub fn into_renderer(self, templates: &TemplateDir) -> Result<Box<dyn Renderer>> {
        debug!("Constructing renderer for language: {}", self.name());
        let renderer: Box<dyn Renderer> = match self {
            Self::Tera(args) => Box::new(TemplateRender::new(args, templates)?),
            Self::Jsonschema(args) => Box::new(JsonSchemaRender::new(args, templates)),
            Self::Markdown(args) => Box::new(MarkdownRender::new(args, templates)),
        };
        Ok(renderer)
    }

    /// Names and descriptions of every registered language
    pub fn available() -> Vec<(String, String)> {
        Self::augment_subcommands(clap::Command::new("languages"))
            .get_subcommands()
            .map(|cmd| {
                let about = cmd.get_about().map(|a| a.to_string()).unwrap_or_default();
                (cmd.get_name().to_string(), about)
            })
            .collect()
    }
}
