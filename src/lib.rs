//! shacl2code library
//!
//! Renders an object model built from a SHACL shape graph into source code
//! bindings through Tera templates. The [`core`] module holds the rendering
//! pipeline (model views, derivation resolver, template renderer, output sink)
//! and [`lang`] holds the per-language renderers built on top of it.
#![deny(unsafe_code)]

pub mod core;
pub mod lang;

pub use crate::core::error::{Error, Result};
pub use crate::core::model::{Class, Enum, Model};
pub use crate::lang::Renderer;
