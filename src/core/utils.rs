//! String helpers shared by the language renderers

use once_cell::sync::Lazy;
use regex::Regex;

static NON_SLUG_CHARS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[^a-z0-9]+").expect("slug pattern is valid"));

/// Returns the local part of an IRI: whatever follows the last `#` or `/`.
///
/// # Examples
/// ```
/// use shacl2code::core::utils::local_name;
///
/// assert_eq!(local_name("http://www.w3.org/ns/shacl#NodeShape"), "NodeShape");
/// assert_eq!(local_name("https://spdx.org/rdf/3.0.1/terms/Core/Element"), "Element");
/// assert_eq!(local_name("Element"), "Element");
/// ```
pub fn local_name(iri: &str) -> &str {
    iri.rsplit(['#', '/'])
        .find(|part| !part.is_empty())
        .unwrap_or(iri)
}

/// Converts text into a Markdown heading anchor.
///
/// Lowercases the input and collapses every run of characters outside
/// `[a-z0-9]` into a single `-`.
///
/// # Examples
/// ```
/// use shacl2code::core::utils::to_anchor;
///
/// assert_eq!(to_anchor("Core/Element"), "core-element");
/// assert_eq!(to_anchor("  Software Package  "), "software-package");
/// ```
pub fn to_anchor(text: &str) -> String {
    let lower = text.to_lowercase();
    NON_SLUG_CHARS
        .replace_all(&lower, "-")
        .trim_matches('-')
        .to_string()
}
