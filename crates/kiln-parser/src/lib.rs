//! Interface extraction for kiln.
//!
//! Reads TypeScript-style type declarations and pulls out, per component,
//! the declared `styleMap` CSS variables, `data` fields and whether the
//! component accepts nested content. Only that narrow declaration shape is
//! understood; this is not a TypeScript parser.

mod grammar;
mod lexer;

pub use grammar::parse;
pub use lexer::{tokenize, Token, TokenKind};

use kiln_core::{InterfaceTable, ParseError};
use std::io::ErrorKind;
use std::path::Path;

/// Extract interfaces from declaration text.
///
/// # Example
///
/// ```
/// use kiln_parser::extract_interfaces;
///
/// let table = extract_interfaces(r#"
/// interface Button {
///   styleMap: { "--button-bg-color": string; };
///   data: { buttonContent: string; };
/// }
/// "#);
///
/// let button = table.get("Button").unwrap();
/// assert!(button.has_style_fields());
/// ```
pub fn extract_interfaces(source: &str) -> InterfaceTable {
    parse(source)
}

/// Read and extract interfaces from a declaration file.
///
/// A missing file yields an empty table; other read failures are errors.
pub fn read_interfaces(path: &Path) -> Result<InterfaceTable, ParseError> {
    match std::fs::read_to_string(path) {
        Ok(source) => {
            let table = parse(&source);
            tracing::debug!(path = %path.display(), count = table.len(), "extracted interfaces");
            Ok(table)
        }
        Err(err) if err.kind() == ErrorKind::NotFound => {
            tracing::debug!(path = %path.display(), "no declaration file, using empty interfaces");
            Ok(InterfaceTable::new())
        }
        Err(source) => Err(ParseError::Io {
            path: path.to_path_buf(),
            source,
        }),
    }
}
