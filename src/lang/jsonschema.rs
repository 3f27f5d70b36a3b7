//! JSON Schema renderer

use clap::Args;
use serde_json::{Map, Value as JsonValue};

use super::{OutputArgs, Renderer};
use crate::core::output::OutputFile;
use crate::core::templates::{Helper, Helpers, TemplateDir, TemplateLocator};

/// Built-in template rendered by this language
pub const TEMPLATE: &str = "jsonschema.tera";

/// Dialect announced in the generated `$schema`
pub const SCHEMA_DRAFT: &str = "https://json-schema.org/draft/2020-12/schema";

#[derive(Args, Debug, Clone)]
pub struct JsonSchemaArgs {
    #[command(flatten)]
    pub output: OutputArgs,
    /// Value of the schema's `$id`
    #[arg(long)]
    pub schema_id: Option<String>,
    /// Value of the schema's `title`
    #[arg(long)]
    pub schema_title: Option<String>,
}

pub struct JsonSchemaRender {
    args: JsonSchemaArgs,
    template: TemplateLocator,
}

impl JsonSchemaRender {
    pub fn new(args: JsonSchemaArgs, templates: &TemplateDir) -> Self {
        Self {
            args,
            template: templates.builtin(TEMPLATE),
        }
    }
}

impl Renderer for JsonSchemaRender {
    fn output(&self) -> &OutputFile {
        &self.args.output.output
    }

    fn template(&self) -> &TemplateLocator {
        &self.template
    }

    fn extra_env(&self) -> Helpers {
        let mut env = Helpers::new();
        env.insert("SCHEMA_DRAFT".to_string(), Helper::value(SCHEMA_DRAFT));
        env
    }

    fn additional_render_args(&self) -> Map<String, JsonValue> {
        let mut args = Map::new();
        args.insert("schema_id".to_string(), self.args.schema_id.clone().into());
        args.insert("schema_title".to_string(), self.args.schema_title.clone().into());
        args
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::error::Error;
    use crate::core::model::{Class, Enum, Model};
    use serde_json::json;
    use std::path::PathBuf;
    use tempfile::TempDir;

    fn builtin_templates() -> TemplateDir {
        TemplateDir::from_root(PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("templates"))
    }

    fn render_to(out_dir: &TempDir, schema_id: Option<&str>, model: &Model) -> crate::Result<JsonValue> {
        let out_path = out_dir.path().join("schema.json");
        let renderer = JsonSchemaRender::new(
            JsonSchemaArgs {
                output: OutputArgs {
                    output: OutputFile::Path(out_path.clone()),
                },
                schema_id: schema_id.map(str::to_owned),
                schema_title: Some("Example".to_string()),
            },
            &builtin_templates(),
        );
        renderer.render(model)?;
        let text = std::fs::read_to_string(out_path)?;
        Ok(serde_json::from_str(&text)?)
    }

    #[test]
    fn test_renders_valid_json_schema() {
        let out_dir = TempDir::new().unwrap();
        let model = Model::new(
            vec![
                Class::new("http://example.com/ns#Element").with_derived(["http://example.com/ns#Agent"]),
                Class::new("http://example.com/ns#Agent").with_derived(["http://example.com/ns#Person"]),
                Class::new("http://example.com/ns#Person"),
            ],
            vec![Enum::new("http://example.com/ns#Color").with_attribute("values", json!(["red", "green"]))],
            JsonValue::Null,
        );

        let schema = render_to(&out_dir, Some("https://example.com/schema.json"), &model).unwrap();

        assert_eq!(schema["$schema"], json!(SCHEMA_DRAFT));
        assert_eq!(schema["$id"], json!("https://example.com/schema.json"));
        assert_eq!(schema["title"], json!("Example"));
        assert_eq!(
            schema["$defs"]["Element"]["x-derived"],
            json!(["http://example.com/ns#Agent", "http://example.com/ns#Person"])
        );
        assert_eq!(schema["$defs"]["Person"]["x-derived"], json!([]));
        assert_eq!(schema["$defs"]["Color"]["enum"], json!(["red", "green"]));
    }

    #[test]
    fn test_optional_id_is_omitted() {
        let out_dir = TempDir::new().unwrap();
        let model = Model::new(vec![Class::new("http://example.com/A")], vec![], JsonValue::Null);

        let schema = render_to(&out_dir, None, &model).unwrap();
        assert!(schema.get("$id").is_none());
        assert_eq!(schema["$defs"]["A"]["x-iri"], json!("http://example.com/A"));
    }

    #[test]
    fn test_repeated_local_name_aborts() {
        let out_dir = TempDir::new().unwrap();
        let model = Model::new(
            vec![
                Class::new("http://a.example/ns#Thing"),
                Class::new("http://b.example/ns#Thing"),
            ],
            vec![],
            JsonValue::Null,
        );

        let err = render_to(&out_dir, None, &model).unwrap_err();
        assert!(matches!(err, Error::TemplateAbort(ref m) if m.contains("unique local names")));
        assert!(!out_dir.path().join("schema.json").exists());
    }

    #[test]
    fn test_enum_sharing_class_local_name_aborts() {
        let out_dir = TempDir::new().unwrap();
        let model = Model::new(
            vec![Class::new("http://example.com/ns#Color")],
            vec![Enum::new("http://example.com/vocab/Color")],
            JsonValue::Null,
        );

        let err = render_to(&out_dir, None, &model).unwrap_err();
        assert!(matches!(err, Error::TemplateAbort(_)));
    }

    #[test]
    fn test_local_names_differing_in_case_are_kept() {
        let out_dir = TempDir::new().unwrap();
        let model = Model::new(
            vec![
                Class::new("http://example.com/ns#thing"),
                Class::new("http://example.com/ns#Thing"),
            ],
            vec![],
            JsonValue::Null,
        );

        let schema = render_to(&out_dir, None, &model).unwrap();
        assert_eq!(schema["$defs"].as_object().unwrap().len(), 2);
    }

    #[test]
    fn test_empty_model_aborts() {
        let out_dir = TempDir::new().unwrap();
        let err = render_to(&out_dir, None, &Model::default()).unwrap_err();
        assert!(matches!(err, Error::TemplateAbort(ref m) if m.contains("at least one class")));
        assert!(!out_dir.path().join("schema.json").exists());
    }
}
