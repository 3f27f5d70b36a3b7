//! Renderer for user-supplied Tera templates

use std::path::PathBuf;

use clap::Args;
use serde_json::{Map, Value as JsonValue};

use super::{OutputArgs, Renderer};
use crate::core::error::{Error, Result};
use crate::core::output::OutputFile;
use crate::core::templates::{TemplateDir, TemplateLocator};

#[derive(Args, Debug, Clone)]
pub struct TemplateArgs {
    #[command(flatten)]
    pub output: OutputArgs,
    /// Template file to render
    #[arg(short, long)]
    pub template: PathBuf,
    /// Extra render parameter as KEY=VALUE (repeatable)
    #[arg(long = "arg", value_name = "KEY=VALUE")]
    pub args: Vec<String>,
}

/// Renders any template file; its own directory is searched before the common one
pub struct TemplateRender {
    output: OutputFile,
    template: TemplateLocator,
    render_args: Map<String, JsonValue>,
}

impl TemplateRender {
    pub fn new(args: TemplateArgs, templates: &TemplateDir) -> Result<Self> {
        let template = templates.locate(&args.template)?;
        let render_args = parse_render_args(&args.args)?;
        Ok(Self {
            output: args.output.output,
            template,
            render_args,
        })
    }
}

impl Renderer for TemplateRender {
    fn output(&self) -> &OutputFile {
        &self.output
    }

    fn template(&self) -> &TemplateLocator {
        &self.template
    }

    fn additional_render_args(&self) -> Map<String, JsonValue> {
        self.render_args.clone()
    }
}

fn parse_render_args(raw: &[String]) -> Result<Map<String, JsonValue>> {
    let mut args = Map::new();
    for entry in raw {
        let (key, value) = entry
            .split_once('=')
            .filter(|(key, _)| !key.is_empty())
            .ok_or_else(|| Error::config(format!("Render argument must be KEY=VALUE, got '{entry}'")))?;
        args.insert(key.to_string(), JsonValue::from(value));
    }
    Ok(args)
}
