//! Object model consumed by the renderers.
//!
//! The model is produced upstream from a SHACL shape graph and is treated as
//! read-only here. Only the attributes the pipeline needs (`id`,
//! `derived_ids`) are typed; everything else the model builder emits is kept
//! verbatim and handed to templates as-is.

use std::collections::BTreeSet;
use std::path::Path;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value as JsonValue};
use tracing::debug;

use crate::core::error::Result;

/// Anything that can be looked up by a unique identifier
pub trait Identified {
    /// Kind name used in lookup errors
    const KIND: &'static str;

    fn id(&self) -> &str;
}

/// A class of the model
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Class {
    /// Unique, stable identifier (usually the shape IRI)
    #[serde(alias = "_id")]
    pub id: String,
    /// Identifiers of the classes that directly derive from this one
    #[serde(default)]
    pub derived_ids: BTreeSet<String>,
    /// Remaining attributes, passed through to templates untouched
    #[serde(flatten)]
    pub attributes: Map<String, JsonValue>,
}

impl Class {
    pub fn new<S: Into<String>>(id: S) -> Self {
        Self {
            id: id.into(),
            derived_ids: BTreeSet::new(),
            attributes: Map::new(),
        }
    }

    /// Builder-style helper to declare direct subclasses
    pub fn with_derived<I, S>(mut self, ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.derived_ids.extend(ids.into_iter().map(Into::into));
        self
    }

    /// Builder-style helper to attach an opaque attribute
    pub fn with_attribute<S: Into<String>>(mut self, key: S, value: JsonValue) -> Self {
        self.attributes.insert(key.into(), value);
        self
    }
}

impl Identified for Class {
    const KIND: &'static str = "Class";

    fn id(&self) -> &str {
        &self.id
    }
}

/// An enumeration of the model
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Enum {
    #[serde(alias = "_id")]
    pub id: String,
    #[serde(flatten)]
    pub attributes: Map<String, JsonValue>,
}

impl Enum {
    pub fn new<S: Into<String>>(id: S) -> Self {
        Self {
            id: id.into(),
            attributes: Map::new(),
        }
    }

    pub fn with_attribute<S: Into<String>>(mut self, key: S, value: JsonValue) -> Self {
        self.attributes.insert(key.into(), value);
        self
    }
}

impl Identified for Enum {
    const KIND: &'static str = "Enum";

    fn id(&self) -> &str {
        &self.id
    }
}

/// Root value handed to a renderer
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Model {
    #[serde(default)]
    pub classes: Vec<Class>,
    #[serde(default)]
    pub enums: Vec<Enum>,
    /// Serialization context (prefix and namespace mappings); never inspected here
    #[serde(default)]
    pub context: JsonValue,
}

impl Model {
    pub fn new(classes: Vec<Class>, enums: Vec<Enum>, context: JsonValue) -> Self {
        Self {
            classes,
            enums,
            context,
        }
    }

    /// Load a model document from disk.
    ///
    /// Files ending in `.yaml` or `.yml` are parsed as YAML, anything else as JSON.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        debug!("Loading model from {}", path.display());

        let content = std::fs::read_to_string(path)?;
        let model: Model = if is_yaml_path(path) {
            serde_yaml::from_str(&content)?
        } else {
            serde_json::from_str(&content)?
        };

        debug!(
            classes = model.classes.len(),
            enums = model.enums.len(),
            "Loaded model"
        );
        Ok(model)
    }
}

/// `.yaml` and `.yml` files, in any letter case, hold YAML; anything else JSON
fn is_yaml_path(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("yaml") || ext.eq_ignore_ascii_case("yml"))
}
