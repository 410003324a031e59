// Author: KeiraOMG0
// License: GPL-3.0-or-later

use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use crate::ast::Document;
use crate::formatter;
use crate::{KerError, json, parser};

mod access;
mod conversion;

/// A parsed `.ker` (or JSON) document with typed, dotted-path access.
#[derive(Debug, Clone, PartialEq)]
pub struct KerConfig {
    document: Document,
    source: Option<PathBuf>,
}

impl KerConfig {
    /// Load a config file. Files ending in `.json` go through the JSON
    /// bridge, everything else is parsed as `.ker`.
    ///
    /// # Example
    /// ```no_run
    /// # use ker::KerConfig;
    /// let config = KerConfig::from_file("app.ker")?;
    /// let port: u16 = config.get("server.port")?;
    /// # Ok::<(), ker::KerError>(())
    /// ```
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, KerError> {
        let path_ref = path.as_ref();
        let content = fs::read_to_string(path_ref).map_err(|e| KerError::FileError {
            message: format!("Failed to read file: {}", e),
            path: path_ref.display().to_string(),
            hint: Some("Check that the file exists and is readable".into()),
            code: Some(301),
        })?;

        let document = if is_json_path(path_ref) {
            json::from_json_str(&content)?
        } else {
            parser::parse_document(&content)?
        };

        tracing::debug!(path = %path_ref.display(), keys = document.len(), "loaded config");
        Ok(Self {
            document,
            source: Some(path_ref.to_path_buf()),
        })
    }

    /// Parse a config from `.ker` text (no file I/O).
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(content: &str) -> Result<Self, KerError> {
        Ok(Self::from_document(parser::parse_document(content)?))
    }

    pub fn from_json_str(content: &str) -> Result<Self, KerError> {
        Ok(Self::from_document(json::from_json_str(content)?))
    }

    pub fn from_document(document: Document) -> Self {
        Self {
            document,
            source: None,
        }
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    pub fn into_document(self) -> Document {
        self.document
    }

    /// Path the config was loaded from, if any.
    pub fn source(&self) -> Option<&Path> {
        self.source.as_deref()
    }

    /// Canonical `.ker` text.
    pub fn to_ker_string(&self) -> String {
        formatter::format_document(&self.document)
    }

    pub fn to_json_string(&self, indent: usize) -> String {
        json::to_json_string(&self.document, indent)
    }

    /// Write the config back out: JSON for `.json` paths, canonical `.ker` otherwise.
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<(), KerError> {
        let path_ref = path.as_ref();
        let text = if is_json_path(path_ref) {
            let mut text = self.to_json_string(2);
            text.push('\n');
            text
        } else {
            self.to_ker_string()
        };
        fs::write(path_ref, text)
            .map_err(|e| KerError::file_error(format!("Failed to write file: {}", e), path_ref.display().to_string()))
    }
}

impl FromStr for KerConfig {
    type Err = KerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        KerConfig::from_str(s)
    }
}

fn is_json_path(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("json"))
}
