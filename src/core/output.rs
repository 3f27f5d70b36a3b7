//! Output sink for generated text

use std::convert::Infallible;
use std::fmt;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;
use std::str::FromStr;

use tracing::{debug, error};

/// Destination value meaning "write to standard output"
pub const STDOUT_SENTINEL: &str = "-";

/// Where generated text is written
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutputFile {
    /// The process's standard output stream. Never closed by the sink.
    Stdout,
    /// A file, created or truncated on open
    Path(PathBuf),
}

impl OutputFile {
    pub fn is_stdout(&self) -> bool {
        matches!(self, Self::Stdout)
    }

    /// Open the destination, hand a writer to `f`, then release the destination.
    ///
    /// A file is flushed and closed on every exit path, including when `f`
    /// fails. Standard output is flushed but stays open.
    pub fn write_with<F, T>(&self, f: F) -> io::Result<T>
    where
        F: FnOnce(&mut dyn Write) -> io::Result<T>,
    {
        match self {
            Self::Stdout => {
                let stdout = io::stdout();
                let mut handle = stdout.lock();
                let result = f(&mut handle)?;
                handle.flush()?;
                Ok(result)
            }
            Self::Path(path) => {
                debug!("Opening output file: {}", path.display());
                let file = File::create(path).map_err(|e| {
                    error!(path = %path.display(), error = %e, "Failed to open output file");
                    e
                })?;
                // Dropping the writer closes the file, also on the error path
                let mut writer = BufWriter::new(file);
                let result = f(&mut writer)?;
                writer.flush()?;
                Ok(result)
            }
        }
    }
}

impl FromStr for OutputFile {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s == STDOUT_SENTINEL {
            Ok(Self::Stdout)
        } else {
            Ok(Self::Path(PathBuf::from(s)))
        }
    }
}

impl fmt::Display for OutputFile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Stdout => write!(f, "<stdout>"),
            Self::Path(path) => write!(f, "{}", path.display()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_parse_stdout_sentinel() {
        assert_eq!("-".parse::<OutputFile>().unwrap(), OutputFile::Stdout);
        assert!(OutputFile::Stdout.is_stdout());
    }

    #[test]
    fn test_parse_path() {
        let output: OutputFile = "out/bindings.py".parse().unwrap();
        assert_eq!(output, OutputFile::Path(PathBuf::from("out/bindings.py")));
        assert!(!output.is_stdout());
    }

    #[test]
    fn test_write_to_file() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let path = temp_dir.path().join("model.py");
        let output = OutputFile::Path(path.clone());

        output
            .write_with(|w| w.write_all(b"class Person:\n    pass\n"))
            .unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        assert_eq!(content, "class Person:\n    pass\n");
    }

    #[test]
    fn test_write_truncates_existing_file() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let path = temp_dir.path().join("out.txt");
        std::fs::write(&path, "old content that is longer").unwrap();

        OutputFile::Path(path.clone())
            .write_with(|w| w.write_all(b"new\n"))
            .unwrap();

        assert_eq!(std::fs::read_to_string(&path).unwrap(), "new\n");
    }

    #[test]
    fn test_file_released_when_writer_fails() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let path = temp_dir.path().join("partial.txt");
        let output = OutputFile::Path(path.clone());

        let result: io::Result<()> = output.write_with(|w| {
            w.write_all(b"partial")?;
            Err(io::Error::other("boom"))
        });
        assert!(result.is_err());

        // The handle was dropped, so the file can be reopened and rewritten
        output.write_with(|w| w.write_all(b"complete\n")).unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "complete\n");
    }

    #[test]
    fn test_missing_parent_directory_is_io_error() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let output = OutputFile::Path(temp_dir.path().join("missing/dir/out.txt"));
        let result = output.write_with(|w| w.write_all(b"x"));
        assert_eq!(result.unwrap_err().kind(), io::ErrorKind::NotFound);
    }

    #[test]
    fn test_stdout_stays_usable_after_write() {
        OutputFile::Stdout.write_with(|w| w.write_all(b"")).unwrap();
        OutputFile::Stdout.write_with(|w| w.write_all(b"")).unwrap();
    }
}
