//! Tera-based template renderer
//!
//! One [`TemplateRenderer`] performs exactly one templating pass:
//!
//! 1. **Loading**: the template files directly inside each search directory
//!    are parsed into a fresh Tera instance; earlier directories shadow later
//!    ones and unrelated files that fail to load are skipped
//! 2. **Scope**: renderer extras, the fixed helper functions and the domain
//!    constants are injected
//! 3. **Rendering**: the model views, the context and the disclaimer are passed
//!    as render parameters and the whole text is rendered into memory
//! 4. **Writing**: the text gets a trailing newline if it lacks one and is
//!    written through the [`OutputFile`]
//!
//! Nothing is written when rendering fails, so a destination is only touched
//! by a render that completed.

use std::collections::{BTreeMap, HashMap};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use serde_json::{Map, Value as JsonValue};
use tera::{Context, Template, Tera};
use tracing::{debug, error, info, warn};

use super::dir::TemplateLocator;
use super::helpers::{
    FaultSlot, Helper, Helpers, RESERVED_NAMES, SH, SHACL2CODE, register_builtin_functions,
};
use crate::core::error::{Error, Result};
use crate::core::model::Model;
use crate::core::object_list::ObjectList;
use crate::core::output::OutputFile;

/// Extensions of the files picked up as templates in every search directory
pub const TEMPLATE_EXTENSIONS: &[&str] = &["tera", "j2", "jinja"];

/// Renders one template against a [`Model`]
#[derive(Debug, Clone)]
pub struct TemplateRenderer {
    locator: TemplateLocator,
    extra_env: Helpers,
    render_args: Map<String, JsonValue>,
}

impl TemplateRenderer {
    pub fn new(locator: TemplateLocator) -> Self {
        Self {
            locator,
            extra_env: Helpers::new(),
            render_args: Map::new(),
        }
    }

    /// Additional globals and functions for the template scope
    pub fn with_extra_env(mut self, extra_env: Helpers) -> Self {
        self.extra_env = extra_env;
        self
    }

    /// Additional render parameters
    pub fn with_render_args(mut self, render_args: Map<String, JsonValue>) -> Self {
        self.render_args = render_args;
        self
    }

    /// Render `model` and write the result to `output`
    pub fn render(&self, model: &Model, output: &OutputFile) -> Result<()> {
        let text = self.render_to_string(model)?;

        output.write_with(|w| w.write_all(text.as_bytes()))?;

        info!(
            template = %self.locator.name(),
            output = %output,
            bytes = text.len(),
            "Rendered template"
        );
        Ok(())
    }

    /// Render `model` into memory, normalizing the trailing newline
    pub fn render_to_string(&self, model: &Model) -> Result<String> {
        let mut tera = self.load_templates()?;
        let classes = ObjectList::new(&model.classes);
        let enums = ObjectList::new(&model.enums);
        let fault = FaultSlot::default();

        let mut context = Context::new();

        // Renderer extras go in first so the fixed scope always wins
        for (name, helper) in &self.extra_env {
            warn_on_collision(name, "helper");
            match helper {
                Helper::Value(value) => context.insert(name, value),
                Helper::Function(function) => {
                    let function = Arc::clone(function);
                    tera.register_function(name, move |args: &HashMap<String, JsonValue>| {
                        function.call(args)
                    });
                }
            }
        }

        register_builtin_functions(&mut tera, &classes, &enums, &fault);
        context.insert("SHACL2CODE", SHACL2CODE);
        context.insert("SH", SH);

        context.insert("disclaimer", &disclaimer());
        context.insert("enums", &enums);
        context.insert("classes", &classes);
        context.insert("context", &model.context);
        for (name, value) in &self.render_args {
            warn_on_collision(name, "render argument");
            context.insert(name, value);
        }

        debug!(
            template = %self.locator.name(),
            classes = classes.len(),
            enums = enums.len(),
            "Rendering template"
        );

        let rendered = tera.render(self.locator.name(), &context).map_err(|e| {
            // A helper failure is more precise than the wrapping Tera error
            match fault.take() {
                Some(fault) => {
                    error!("Template '{}' failed: {}", self.locator.name(), fault);
                    fault
                }
                None => {
                    error!("Template rendering failed for '{}': {:?}", self.locator.name(), e);
                    Error::Template(e)
                }
            }
        })?;

        Ok(ensure_trailing_newline(rendered))
    }

    /// Load the templates of every search directory into one Tera instance.
    ///
    /// Directories are scanned without recursing and the first directory
    /// containing a name wins. Files other than the requested template that
    /// cannot be read or parsed, or that depend on a template which is not
    /// loaded, are skipped with a warning.
    fn load_templates(&self) -> Result<Tera> {
        let requested = self.locator.name();
        let mut candidates: BTreeMap<String, PathBuf> = BTreeMap::new();
        for dir in self.locator.search_path() {
            if !dir.is_dir() {
                debug!("Skipping missing template directory: {}", dir.display());
                continue;
            }
            debug!("Scanning template directory: {}", dir.display());
            for (name, path) in template_files(dir)? {
                candidates.entry(name).or_insert(path);
            }
        }

        if !candidates.contains_key(requested) {
            error!(
                "Template '{}' not found, available: {:?}",
                requested,
                candidates.keys().collect::<Vec<_>>()
            );
            return Err(Error::TemplateNotFound {
                name: requested.to_string(),
                search_path: self.locator.search_path().to_vec(),
            });
        }

        let mut parsed = BTreeMap::new();
        for (name, path) in candidates {
            match parse_template(&name, &path) {
                Ok(template) => {
                    parsed.insert(name, (path, template));
                }
                Err(e) if name == requested => {
                    error!("Template '{}' failed to load: {}", name, e);
                    return Err(e);
                }
                Err(e) => warn!("Skipping template {}: {}", path.display(), e),
            }
        }

        // Drop siblings whose parent or macro file is missing, until stable
        loop {
            let broken: Vec<String> = parsed
                .iter()
                .filter(|(name, _)| name.as_str() != requested)
                .filter(|(_, (_, template))| {
                    template
                        .parent
                        .iter()
                        .chain(template.imported_macro_files.iter().map(|(file, _)| file))
                        .any(|dependency| !parsed.contains_key(dependency))
                })
                .map(|(name, _)| name.clone())
                .collect();
            if broken.is_empty() {
                break;
            }
            for name in broken {
                warn!("Skipping template '{}': it depends on a template that is not loaded", name);
                parsed.remove(&name);
            }
        }

        let mut tera = Tera::default();
        tera.add_template_files(
            parsed
                .iter()
                .map(|(name, (path, _))| (path.as_path(), Some(name.as_str()))),
        )
        .map_err(|e| {
            error!("Template '{}' failed to load: {:?}", requested, e);
            Error::Template(e)
        })?;
        tera.autoescape_on(vec![]);

        Ok(tera)
    }
}

/// The generated-file warning, naming the running program
pub fn disclaimer() -> String {
    let program = std::env::args_os()
        .next()
        .as_deref()
        .map(Path::new)
        .and_then(Path::file_name)
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| env!("CARGO_PKG_NAME").to_string());

    format!("This file was automatically generated by {program}. DO NOT MANUALLY MODIFY IT")
}

/// Append a `\n` unless `text` already ends with one
pub fn ensure_trailing_newline(mut text: String) -> String {
    if !text.ends_with('\n') {
        text.push('\n');
    }
    text
}

/// Template files directly inside `dir`, keyed by file name and sorted
fn template_files(dir: &Path) -> Result<Vec<(String, PathBuf)>> {
    let mut files = Vec::new();
    for entry in std::fs::read_dir(dir)? {
        let path = entry?.path();
        let is_template = path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| TEMPLATE_EXTENSIONS.contains(&ext));
        if !is_template || !path.is_file() {
            continue;
        }
        // Tera names and reads templates by UTF-8 path
        match (
            path.file_name().and_then(|n| n.to_str()),
            path.to_str().is_some(),
        ) {
            (Some(name), true) => files.push((name.to_string(), path.clone())),
            _ => warn!("Skipping template with non UTF-8 path: {}", path.display()),
        }
    }
    files.sort();
    Ok(files)
}

/// Read and parse one template without resolving what it extends or imports
fn parse_template(name: &str, path: &Path) -> Result<Template> {
    let content = std::fs::read_to_string(path)?;
    Template::new(name, path.to_str().map(str::to_owned), &content).map_err(|e| {
        Error::Template(tera::Error::chain(format!("Failed to parse {:?}", path), e))
    })
}

fn warn_on_collision(name: &str, what: &str) {
    if RESERVED_NAMES.contains(&name) {
        warn!("Renderer {} '{}' collides with a built-in template name", what, name);
    }
}
