// Author: KeiraOMG0
// License: GPL-3.0-or-later

//! File-level helpers for reading, writing and converting documents.

use std::fs;
use std::path::Path;

use crate::ast::Document;
use crate::{KerError, formatter, json, parser};

/// Parse `.ker` text into a document.
pub fn loads(text: &str) -> Result<Document, KerError> {
    parser::parse_document(text)
}

/// Render a document as canonical `.ker` text.
pub fn dumps(doc: &Document) -> String {
    formatter::format_document(doc)
}

/// Read and parse a `.ker` file.
///
/// # Examples
/// ```no_run
/// use ker::export;
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let doc = export::load("config.ker")?;
/// println!("{} top-level keys", doc.len());
/// # Ok(())
/// # }
/// ```
pub fn load<P: AsRef<Path>>(path: P) -> Result<Document, KerError> {
    loads(&read_file(path.as_ref())?)
}

/// Write a document to `path` as canonical `.ker` text.
pub fn dump<P: AsRef<Path>>(doc: &Document, path: P) -> Result<(), KerError> {
    write_file(path.as_ref(), &dumps(doc))
}

/// Read a JSON file into a document.
pub fn load_json<P: AsRef<Path>>(path: P) -> Result<Document, KerError> {
    json::from_json_str(&read_file(path.as_ref())?)
}

/// Convert a `.ker` file to an indented JSON file.
///
/// # Errors
/// Returns `FileError` if either file cannot be accessed, or the parser's
/// error if the input is not valid `.ker`.
pub fn ker_to_json<P, Q>(ker_path: P, json_path: Q, indent: usize) -> Result<(), KerError>
where
    P: AsRef<Path>,
    Q: AsRef<Path>,
{
    let doc = load(ker_path.as_ref())?;
    let mut text = json::to_json_string(&doc, indent);
    text.push('\n');
    tracing::debug!(
        from = %ker_path.as_ref().display(),
        to = %json_path.as_ref().display(),
        "converted ker to json"
    );
    write_file(json_path.as_ref(), &text)
}

/// Convert a JSON file to a canonical `.ker` file.
pub fn json_to_ker<P, Q>(json_path: P, ker_path: Q) -> Result<(), KerError>
where
    P: AsRef<Path>,
    Q: AsRef<Path>,
{
    let doc = load_json(json_path.as_ref())?;
    tracing::debug!(
        from = %json_path.as_ref().display(),
        to = %ker_path.as_ref().display(),
        "converted json to ker"
    );
    dump(&doc, ker_path)
}

fn read_file(path: &Path) -> Result<String, KerError> {
    fs::read_to_string(path).map_err(|e| {
        KerError::file_error(format!("Failed to read file: {}", e), path.display().to_string())
    })
}

fn write_file(path: &Path, text: &str) -> Result<(), KerError> {
    fs::write(path, text).map_err(|e| {
        KerError::file_error(format!("Failed to write file: {}", e), path.display().to_string())
    })
}
