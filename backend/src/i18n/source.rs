//! Where primary catalog files come from.

use std::fmt;
use std::io;
use std::marker::PhantomData;
use std::path::{Path, PathBuf};

use rust_embed::RustEmbed;

/// A readable collection of catalog files addressed by relative path.
pub trait CatalogSource: Send + Sync {
    /// Read the whole file at `name`. Missing files yield
    /// `io::ErrorKind::NotFound`.
    fn open(&self, name: &str) -> io::Result<Vec<u8>>;

    /// Short label used in error messages and logs.
    fn describe(&self) -> String;
}

/// Catalog files in a directory on the local filesystem.
#[derive(Debug, Clone)]
pub struct DirectorySource {
    root: PathBuf,
}

impl DirectorySource {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }
}

impl CatalogSource for DirectorySource {
    fn open(&self, name: &str) -> io::Result<Vec<u8>> {
        std::fs::read(self.root.join(name))
    }

    fn describe(&self) -> String {
        format!("local directory {}", self.root.display())
    }
}

/// Catalog files compiled into the binary with `#[derive(RustEmbed)]`.
///
/// ```rust,ignore
/// #[derive(rust_embed::RustEmbed)]
/// #[folder = "locales/"]
/// struct Locales;
///
/// let i18n = I18n::with_source(options, EmbeddedSource::<Locales>::new())?;
/// ```
pub struct EmbeddedSource<E> {
    _assets: PhantomData<fn() -> E>,
}

impl<E: RustEmbed> EmbeddedSource<E> {
    pub fn new() -> Self {
        Self { _assets: PhantomData }
    }
}

impl<E: RustEmbed> Default for EmbeddedSource<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E> fmt::Debug for EmbeddedSource<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EmbeddedSource").field("assets", &std::any::type_name::<E>()).finish()
    }
}

impl<E: RustEmbed> CatalogSource for EmbeddedSource<E> {
    fn open(&self, name: &str) -> io::Result<Vec<u8>> {
        E::get(name).map(|file| file.data.into_owned()).ok_or_else(|| {
            io::Error::new(io::ErrorKind::NotFound, format!("open {}: file does not exist", name))
        })
    }

    fn describe(&self) -> String {
        "embedded files".to_string()
    }
}

/// Whether `path` exists and is a regular file rather than a directory.
pub(crate) fn is_file(path: &Path) -> bool {
    std::fs::metadata(path).map(|meta| meta.is_file()).unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(RustEmbed)]
    #[folder = "testdata/primary/"]
    struct Primary;

    #[test]
    fn test_directory_source_reads_file() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("locale_en-US.ini"), "greeting = Hi\n").unwrap();

        let source = DirectorySource::new(dir.path());
        assert_eq!(source.open("locale_en-US.ini").unwrap(), b"greeting = Hi\n");
    }

    #[test]
    fn test_directory_source_missing_file() {
        let source = DirectorySource::new("404");
        let err = source.open("locale_en-US.ini").unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::NotFound);
        assert_eq!(source.describe(), "local directory 404");
    }

    #[test]
    fn test_embedded_source() {
        let source = EmbeddedSource::<Primary>::new();
        let data = source.open("locale_en-US.ini").unwrap();
        assert!(String::from_utf8(data).unwrap().contains("greeting"));

        let err = source.open("locale_it-IT.ini").unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::NotFound);
        assert_eq!(err.to_string(), "open locale_it-IT.ini: file does not exist");
    }

    #[test]
    fn test_is_file() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("locale_en-US.ini");
        std::fs::write(&file, "").unwrap();

        assert!(is_file(&file));
        assert!(!is_file(dir.path()));
        assert!(!is_file(&dir.path().join("missing.ini")));
    }
}
