//! Markdown documentation renderer

use std::collections::HashMap;

use clap::Args;
use serde_json::{Map, Value as JsonValue};

use super::{OutputArgs, Renderer};
use crate::core::output::OutputFile;
use crate::core::templates::{Helper, Helpers, TemplateDir, TemplateLocator};
use crate::core::utils::{local_name, to_anchor};

/// Built-in template rendered by this language
pub const TEMPLATE: &str = "markdown.tera";

#[derive(Args, Debug, Clone)]
pub struct MarkdownArgs {
    #[command(flatten)]
    pub output: OutputArgs,
    /// Document title
    #[arg(long, default_value = "Model Reference")]
    pub title: String,
}

pub struct MarkdownRender {
    args: MarkdownArgs,
    template: TemplateLocator,
}

impl MarkdownRender {
    pub fn new(args: MarkdownArgs, templates: &TemplateDir) -> Self {
        Self {
            args,
            template: templates.builtin(TEMPLATE),
        }
    }
}

impl Renderer for MarkdownRender {
    fn output(&self) -> &OutputFile {
        &self.args.output.output
    }

    fn template(&self) -> &TemplateLocator {
        &self.template
    }

    fn extra_env(&self) -> Helpers {
        let mut env = Helpers::new();
        env.insert(
            "anchor".to_string(),
            Helper::function(|args: &HashMap<String, JsonValue>| -> tera::Result<JsonValue> {
                let text = string_arg(args, "text", "anchor")?;
                Ok(JsonValue::from(to_anchor(text)))
            }),
        );
        env.insert(
            "local_name".to_string(),
            Helper::function(|args: &HashMap<String, JsonValue>| -> tera::Result<JsonValue> {
                let iri = string_arg(args, "iri", "local_name")?;
                Ok(JsonValue::from(local_name(iri)))
            }),
        );
        env
    }

    fn additional_render_args(&self) -> Map<String, JsonValue> {
        let mut args = Map::new();
        args.insert("title".to_string(), JsonValue::from(self.args.title.clone()));
        args
    }
}

fn string_arg<'a>(
    args: &'a HashMap<String, JsonValue>,
    key: &str,
    function: &str,
) -> tera::Result<&'a str> {
    args.get(key)
        .and_then(JsonValue::as_str)
        .ok_or_else(|| tera::Error::msg(format!("`{function}` requires a string `{key}` argument")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::model::{Class, Enum, Model};
    use crate::core::templates::TemplateRenderer;
    use serde_json::json;
    use std::path::PathBuf;

    fn renderer() -> MarkdownRender {
        MarkdownRender::new(
            MarkdownArgs {
                output: OutputArgs {
                    output: OutputFile::Stdout,
                },
                title: "SPDX Model".to_string(),
            },
            &TemplateDir::from_root(PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("templates")),
        )
    }

    fn render(model: &Model) -> String {
        let md = renderer();
        TemplateRenderer::new(md.template().clone())
            .with_extra_env(md.extra_env())
            .with_render_args(md.additional_render_args())
            .render_to_string(model)
            .unwrap()
    }

    #[test]
    fn test_documents_derivation_closure() {
        let model = Model::new(
            vec![
                Class::new("http://ex.com/A").with_derived(["http://ex.com/C", "http://ex.com/B"]),
                Class::new("http://ex.com/B").with_derived(["http://ex.com/D"]),
                Class::new("http://ex.com/C"),
                Class::new("http://ex.com/D")
                    .with_attribute("comment", json!("The deepest class.")),
            ],
            vec![Enum::new("http://ex.com/Color")],
            JsonValue::Null,
        );

        let text = render(&model);

        assert!(text.starts_with("<!-- This file was automatically generated by "));
        assert!(text.contains("# SPDX Model"));
        assert!(text.contains("- [A](#a)"));
        assert!(text.contains("### D"));
        assert!(text.contains("The deepest class."));
        assert!(text.contains("- `http://ex.com/Color`"));

        let a_section = &text[text.find("### A").unwrap()..text.find("### B").unwrap()];
        let b = a_section.find("- [B](#b)").unwrap();
        let c = a_section.find("- [C](#c)").unwrap();
        let d = a_section.find("- [D](#d)").unwrap();
        assert!(b < c && c < d);
        assert!(text.ends_with('\n'));
    }

    #[test]
    fn test_empty_model_renders_title_only() {
        let text = render(&Model::default());
        assert!(text.contains("# SPDX Model"));
        assert!(!text.contains("## Classes"));
        assert!(!text.contains("## Enumerations"));
    }
}
