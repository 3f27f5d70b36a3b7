//! Template system for code generation.
//!
//! This module locates templates, builds the scope every template is rendered
//! with, and runs a single Tera pass over a [`Model`](crate::core::model::Model).
//!
//! The template system supports:
//! - A built-in template tree (`lang/` per-language templates, `common/` shared ones)
//! - An ordered search path where the first directory containing a name wins
//! - Fixed helper functions (`abort`, `get_all_derived`, `get_class`, `get_enum`)
//! - Renderer-specific helpers and render parameters

pub mod dir;
pub mod helpers;
pub mod renderer;

pub use dir::*;
pub use helpers::{Helper, Helpers, SH, SHACL2CODE};
pub use renderer::*;
