// Author: KeiraOMG0
// License: GPL-3.0-or-later

//! Reading, writing and canonicalizing `.ker` configuration files.
//!
//! ```
//! let doc = ker::parse_document("server { port = 8080 }")?;
//! assert_eq!(ker::format_document(&doc), "server {\n    port = 8080\n}\n");
//! assert_eq!(ker::to_json_value(&doc)["server"]["port"], 8080);
//! # Ok::<(), ker::KerError>(())
//! ```

pub mod ast;
pub mod config;
pub mod error;
pub mod export;
pub mod formatter;
pub mod json;
pub mod lexer;
pub mod parser;

pub use ast::{Block, Document, Number, Value};
pub use config::KerConfig;
pub use error::KerError;
pub use formatter::{FormatOptions, format_document, format_document_with};
pub use json::{from_json_str, from_json_value, to_json_string, to_json_value};
pub use parser::parse_document;
