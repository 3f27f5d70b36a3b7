//! Rendering pipeline shared by every language.
//!
//! The model is exposed through read-only [`object_list::ObjectList`] views,
//! derivation closures come from [`derive`], and [`templates`] turns both into
//! text written through an [`output::OutputFile`].

pub mod derive;
pub mod error;
pub mod model;
pub mod object_list;
pub mod output;
pub mod templates;
pub mod utils;

pub use error::{Error, Result};
