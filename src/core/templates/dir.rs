//! Template directory resolution and template search paths

use std::io;
use std::path::{Path, PathBuf};

use tracing::{debug, error, info};

use crate::core::error::{Error, Result};

/// Environment variable overriding the built-in template root
pub const TEMPLATE_DIR_ENV: &str = "SHACL2CODE_TEMPLATE_DIR";

/// Sub-directory holding the per-language templates
pub const LANG_DIR: &str = "lang";

/// Sub-directory holding templates shared by every renderer
pub const COMMON_DIR: &str = "common";

/// Trait for reading template configuration, allowing dependency injection for testing
pub trait TemplateConfigReader {
    fn get_template_dir(&self) -> Option<String>;
}

/// Production implementation that reads from environment variables
pub struct EnvTemplateConfigReader;

impl TemplateConfigReader for EnvTemplateConfigReader {
    fn get_template_dir(&self) -> Option<String> {
        std::env::var(TEMPLATE_DIR_ENV).ok()
    }
}

/// Mock implementation for testing with controlled values
#[cfg(test)]
pub struct MockTemplateConfigReader(Option<String>);

#[cfg(test)]
impl MockTemplateConfigReader {
    pub fn new(template_dir: Option<String>) -> Self {
        Self(template_dir)
    }
}

#[cfg(test)]
impl TemplateConfigReader for MockTemplateConfigReader {
    fn get_template_dir(&self) -> Option<String> {
        self.0.clone()
    }
}

/// Names a template and the ordered directories it may be found in.
///
/// The first directory that contains a template with that name wins.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TemplateLocator {
    name: String,
    search_path: Vec<PathBuf>,
}

impl TemplateLocator {
    pub fn new<S: Into<String>>(name: S, search_path: Vec<PathBuf>) -> Self {
        Self {
            name: name.into(),
            search_path,
        }
    }

    /// Template name, relative to the directory it is found in
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn search_path(&self) -> &[PathBuf] {
        &self.search_path
    }
}

/// The root of the built-in template tree
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TemplateDir {
    root: PathBuf,
}

impl TemplateDir {
    /// Use `root` as the template tree without any discovery
    pub fn from_root(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Discover the template tree.
    ///
    /// Resolution order:
    /// 1. `custom_dir` (CLI `--template-dir`), used as-is
    /// 2. `SHACL2CODE_TEMPLATE_DIR` environment variable
    /// 3. a `templates/` directory in one of the standard locations
    pub fn discover(custom_dir: Option<&Path>) -> io::Result<Self> {
        Self::discover_with_config(custom_dir, &EnvTemplateConfigReader)
    }

    /// Discover the template tree with a custom config reader (for testing)
    pub fn discover_with_config(
        custom_dir: Option<&Path>,
        config_reader: &dyn TemplateConfigReader,
    ) -> io::Result<Self> {
        if let Some(dir) = custom_dir {
            debug!("Using custom template directory: {}", dir.display());
            if !dir.is_dir() {
                error!("Custom template directory not found: {}", dir.display());
                return Err(io::Error::new(
                    io::ErrorKind::NotFound,
                    format!("Template directory not found: {}", dir.display()),
                ));
            }
            return Ok(Self::from_root(dir));
        }

        debug!("Auto-discovering template directory...");
        let root = Self::find_template_base_dir_with_config(config_reader).ok_or_else(|| {
            error!("Could not find template directory in any standard location");
            io::Error::new(
                io::ErrorKind::NotFound,
                "Could not find template directory in any standard location",
            )
        })?;

        info!("Using template directory: {}", root.display());
        Ok(Self::from_root(root))
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Directory of the built-in per-language templates
    pub fn lang_dir(&self) -> PathBuf {
        self.root.join(LANG_DIR)
    }

    /// Fallback directory searched after a renderer's own directory
    pub fn common_dir(&self) -> PathBuf {
        self.root.join(COMMON_DIR)
    }

    /// Locator for a template shipped in the `lang` directory
    pub fn builtin(&self, name: &str) -> TemplateLocator {
        TemplateLocator::new(name, vec![self.lang_dir(), self.common_dir()])
    }

    /// Locator for a template file supplied by the user.
    ///
    /// The file's own directory is searched first, then the common directory.
    pub fn locate(&self, template: &Path) -> Result<TemplateLocator> {
        let name = template
            .file_name()
            .and_then(|n| n.to_str())
            .ok_or_else(|| {
                Error::config(format!("Invalid template path: {}", template.display()))
            })?;

        let parent = match template.parent() {
            Some(p) if !p.as_os_str().is_empty() => p.to_path_buf(),
            _ => PathBuf::from("."),
        };

        debug!(
            "Template '{}' will be searched in {} then {}",
            name,
            parent.display(),
            self.common_dir().display()
        );
        Ok(TemplateLocator::new(name, vec![parent, self.common_dir()]))
    }

    fn find_template_base_dir_with_config(
        config_reader: &dyn TemplateConfigReader,
    ) -> Option<PathBuf> {
        // 1. Check environment variable via config reader
        if let Some(dir) = config_reader.get_template_dir() {
            let path = PathBuf::from(dir);
            if path.is_dir() {
                debug!("Template directory from {}: {}", TEMPLATE_DIR_ENV, path.display());
                return Some(path);
            }
            debug!(
                "{} points to a missing directory, ignoring: {}",
                TEMPLATE_DIR_ENV,
                path.display()
            );
        }

        // 2. Check standard locations in order of preference
        Self::get_template_search_locations()
            .into_iter()
            .map(|location| location.join("templates"))
            .find(|candidate| {
                debug!("Checking template location: {}", candidate.display());
                candidate.is_dir()
            })
    }

    /// Get list of locations to search for templates
    fn get_template_search_locations() -> Vec<PathBuf> {
        let mut locations = Vec::new();

        // Executable directory and its parent
        if let Ok(exe_path) = std::env::current_exe() {
            if let Some(exe_dir) = exe_path.parent() {
                if let Ok(exe_dir_abs) = exe_dir.canonicalize() {
                    locations.push(exe_dir_abs.clone());
                    if let Some(parent_dir) = exe_dir_abs.parent() {
                        locations.push(parent_dir.to_path_buf());
                    }
                }
            }
        }

        if let Ok(current_dir) = std::env::current_dir() {
            locations.push(current_dir);
        }

        // Crate root, for development builds
        locations.push(PathBuf::from(env!("CARGO_MANIFEST_DIR")));

        if let Some(config_dir) = dirs::config_dir() {
            locations.push(config_dir.join("shacl2code"));
        }

        locations
    }
}
