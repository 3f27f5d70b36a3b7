//! Functions and constants injected into every template scope.
//!
//! Template helpers cannot return a typed [`Error`] through Tera, so failures
//! are parked in a [`FaultSlot`] and the renderer reports them in place of the
//! generic template error once the render unwinds.

use std::collections::{BTreeMap, HashMap};
use std::sync::{Arc, Mutex};

use serde_json::Value as JsonValue;
use tera::{Function, Tera};

use crate::core::derive;
use crate::core::error::Error;
use crate::core::model::{Class, Enum, Identified};
use crate::core::object_list::ObjectList;

/// Namespace of the shacl2code annotation vocabulary
pub const SHACL2CODE: &str = "https://jpewdev.github.io/shacl2code/schema#";

/// Namespace of the W3C SHACL vocabulary
pub const SH: &str = "http://www.w3.org/ns/shacl#";

/// Names every template can rely on; extras using them are reported as collisions
pub const RESERVED_NAMES: &[&str] = &[
    "abort",
    "get_all_derived",
    "get_class",
    "get_enum",
    "SHACL2CODE",
    "SH",
    "disclaimer",
    "classes",
    "enums",
    "context",
];

/// A value or function a renderer adds to the template scope
#[derive(Clone)]
pub enum Helper {
    /// Exposed as a global variable
    Value(JsonValue),
    /// Exposed as a callable function
    Function(Arc<dyn Function>),
}

impl Helper {
    pub fn value(value: impl Into<JsonValue>) -> Self {
        Self::Value(value.into())
    }

    pub fn function<F: Function + 'static>(f: F) -> Self {
        Self::Function(Arc::new(f))
    }
}

impl std::fmt::Debug for Helper {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Value(v) => f.debug_tuple("Value").field(v).finish(),
            Self::Function(_) => f.write_str("Function(..)"),
        }
    }
}

/// Extra helpers keyed by the name they are exposed under
pub type Helpers = BTreeMap<String, Helper>;

/// First helper failure of a render pass
#[derive(Debug, Clone, Default)]
pub struct FaultSlot(Arc<Mutex<Option<Error>>>);

impl FaultSlot {
    /// Record `error` unless an earlier fault is already stored, and return
    /// the message Tera should carry.
    pub fn raise(&self, error: Error) -> tera::Error {
        let message = error.to_string();
        if let Ok(mut slot) = self.0.lock() {
            if slot.is_none() {
                *slot = Some(error);
            }
        }
        tera::Error::msg(message)
    }

    pub fn take(&self) -> Option<Error> {
        self.0.lock().ok().and_then(|mut slot| slot.take())
    }
}

/// Register the fixed helper functions on `tera`
pub fn register_builtin_functions(
    tera: &mut Tera,
    classes: &ObjectList<Class>,
    enums: &ObjectList<Enum>,
    fault: &FaultSlot,
) {
    let slot = fault.clone();
    tera.register_function(
        "abort",
        move |args: &HashMap<String, JsonValue>| -> tera::Result<JsonValue> {
            let message = match args.get("message") {
                Some(JsonValue::String(s)) => s.clone(),
                Some(other) => other.to_string(),
                None => "Template aborted".to_string(),
            };
            Err(slot.raise(Error::abort(message)))
        },
    );

    let slot = fault.clone();
    let all = classes.clone();
    tera.register_function(
        "get_all_derived",
        move |args: &HashMap<String, JsonValue>| -> tera::Result<JsonValue> {
            let id = id_argument(args, "class", "get_all_derived")?;
            let class = all.get(&id).map_err(|e| slot.raise(e))?;
            let derived = derive::get_all_derived(class, &all).map_err(|e| slot.raise(e))?;
            Ok(JsonValue::from(derived))
        },
    );

    tera.register_function("get_class", lookup_function(classes.clone(), fault.clone()));
    tera.register_function("get_enum", lookup_function(enums.clone(), fault.clone()));
}

fn lookup_function<T>(
    list: ObjectList<T>,
    slot: FaultSlot,
) -> impl Fn(&HashMap<String, JsonValue>) -> tera::Result<JsonValue> + Send + Sync + 'static
where
    T: Identified + serde::Serialize + Send + Sync + 'static,
{
    move |args: &HashMap<String, JsonValue>| {
        let id = id_argument(args, "id", "lookup")?;
        let object = list.get(&id).map_err(|e| slot.raise(e))?;
        Ok(tera::to_value(object)?)
    }
}

/// Accept either an identifier string or an object carrying an `id`
fn id_argument(
    args: &HashMap<String, JsonValue>,
    key: &str,
    function: &str,
) -> tera::Result<String> {
    match args.get(key) {
        Some(JsonValue::String(id)) => Ok(id.clone()),
        Some(JsonValue::Object(map)) => map
            .get("id")
            .and_then(JsonValue::as_str)
            .map(str::to_owned)
            .ok_or_else(|| {
                tera::Error::msg(format!("`{function}`: `{key}` object has no string `id`"))
            }),
        Some(other) => Err(tera::Error::msg(format!(
            "`{function}`: `{key}` must be an identifier or an object, got {other}"
        ))),
        None => Err(tera::Error::msg(format!(
            "`{function}` requires a `{key}` argument"
        ))),
    }
}
