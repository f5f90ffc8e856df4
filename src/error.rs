//! Error types for the wg2pinyin library.
//!
//! Every failure is a variant of [`Wg2PyError`]. Variants are grouped by the
//! family they belong to, and [`Wg2PyError::kind`] collapses them onto a small
//! [`ErrorKind`] so a command-line shell can map each family to its own exit
//! code without matching on every variant.
//!
//! The token matcher itself never fails: text it does not recognise is
//! emitted unchanged. Errors only come from building a lexicon or
//! configuration, opening a document, and writing the result.

use std::path::PathBuf;
use thiserror::Error;

/// Coarse classification of a [`Wg2PyError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Malformed or conflicting lexicon tables, or an invalid configuration.
    Configuration,
    /// The source is missing, unreadable, or not a usable DOCX container.
    DocumentFormat,
    /// The destination could not be written.
    Io,
    /// A bug in this crate.
    Internal,
}

impl ErrorKind {
    /// Process exit code used by the CLI for this kind of failure.
    pub fn exit_code(self) -> u8 {
        match self {
            ErrorKind::Configuration => 2,
            ErrorKind::DocumentFormat => 3,
            ErrorKind::Io => 4,
            ErrorKind::Internal => 1,
        }
    }
}

/// All errors returned by the wg2pinyin library.
#[derive(Debug, Error)]
pub enum Wg2PyError {
    // ── Lexicon / configuration errors ────────────────────────────────────
    /// The same key appears twice in one table.
    #[error("Duplicate key '{key}' in the {table} table")]
    DuplicateKey { table: &'static str, key: String },

    /// The same key maps to two different values across tables.
    #[error("Key '{key}' maps to both '{first}' and '{second}'")]
    ConflictingKey {
        key: String,
        first: String,
        second: String,
    },

    /// A table entry is malformed.
    #[error("Invalid entry '{key}' in the {table} table: {reason}")]
    InvalidEntry {
        table: &'static str,
        key: String,
        reason: String,
    },

    /// Strict lexicon: a value is itself a key that converts to something else.
    #[error("Value '{value}' of key '{key}' is itself a key with a different conversion")]
    NonIdempotentEntry { key: String, value: String },

    /// Builder validation failed.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    // ── Document errors ───────────────────────────────────────────────────
    /// Source file was not found at the given path.
    #[error("Document not found: '{path}'\nCheck the path exists and is readable.")]
    FileNotFound { path: PathBuf },

    /// Process does not have read permission on the source file.
    #[error("Permission denied reading '{path}'\nTry: chmod +r {path:?}")]
    PermissionDenied { path: PathBuf },

    /// The file exists but is not a ZIP container.
    #[error("File is not a valid .docx document: '{path}'\nFirst bytes: {magic:?}")]
    NotADocx { path: PathBuf, magic: [u8; 4] },

    /// The ZIP container is damaged.
    #[error("Document '{path}' is corrupt: {source}")]
    CorruptArchive {
        path: PathBuf,
        #[source]
        source: zip::result::ZipError,
    },

    /// A part every Word document must contain is absent.
    #[error("Document '{path}' has no '{part}' part")]
    MissingPart { path: PathBuf, part: String },

    /// An XML part could not be parsed.
    #[error("Malformed XML in '{part}': {detail}")]
    MalformedXml { part: String, detail: String },

    /// Text boxes are nested deeper than the configured limit.
    #[error("Text boxes in '{part}' are nested deeper than {limit} levels")]
    NestingTooDeep { part: String, limit: usize },

    // ── I/O errors ────────────────────────────────────────────────────────
    /// Could not create or write the output document.
    #[error("Failed to write output file '{path}': {source}")]
    OutputWriteFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The destination is the source file; conversion never writes in place.
    #[error("Refusing to overwrite the source document '{path}'\nChoose a different output path.")]
    InPlaceWrite { path: PathBuf },

    // ── Catch-all ─────────────────────────────────────────────────────────
    /// Unexpected internal error.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl Wg2PyError {
    /// Classify this error into one of the failure families.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Wg2PyError::DuplicateKey { .. }
            | Wg2PyError::ConflictingKey { .. }
            | Wg2PyError::InvalidEntry { .. }
            | Wg2PyError::NonIdempotentEntry { .. }
            | Wg2PyError::InvalidConfig(_) => ErrorKind::Configuration,

            Wg2PyError::FileNotFound { .. }
            | Wg2PyError::PermissionDenied { .. }
            | Wg2PyError::NotADocx { .. }
            | Wg2PyError::CorruptArchive { .. }
            | Wg2PyError::MissingPart { .. }
            | Wg2PyError::MalformedXml { .. }
            | Wg2PyError::NestingTooDeep { .. } => ErrorKind::DocumentFormat,

            Wg2PyError::OutputWriteFailed { .. } | Wg2PyError::InPlaceWrite { .. } => ErrorKind::Io,

            Wg2PyError::Internal(_) => ErrorKind::Internal,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn duplicate_key_display() {
        let e = Wg2PyError::DuplicateKey {
            table: "syllable",
            key: "ch'ing".into(),
        };
        let msg = e.to_string();
        assert!(msg.contains("ch'ing"), "got: {msg}");
        assert!(msg.contains("syllable"), "got: {msg}");
        assert_eq!(e.kind(), ErrorKind::Configuration);
    }

    #[test]
    fn not_a_docx_is_document_format() {
        let e = Wg2PyError::NotADocx {
            path: "notes.txt".into(),
            magic: *b"%PDF",
        };
        assert_eq!(e.kind(), ErrorKind::DocumentFormat);
        assert!(e.to_string().contains("notes.txt"));
    }

    #[test]
    fn write_failure_is_io() {
        let e = Wg2PyError::OutputWriteFailed {
            path: "/readonly/out.docx".into(),
            source: std::io::Error::from(std::io::ErrorKind::PermissionDenied),
        };
        assert_eq!(e.kind(), ErrorKind::Io);
        assert!(e.to_string().contains("/readonly/out.docx"));
    }

    #[test]
    fn nesting_display() {
        let e = Wg2PyError::NestingTooDeep {
            part: "word/document.xml".into(),
            limit: 4,
        };
        assert!(e.to_string().contains("4 levels"));
    }

    #[test]
    fn exit_codes_are_distinct() {
        let codes = [
            ErrorKind::Configuration.exit_code(),
            ErrorKind::DocumentFormat.exit_code(),
            ErrorKind::Io.exit_code(),
            ErrorKind::Internal.exit_code(),
        ];
        for (i, a) in codes.iter().enumerate() {
            for b in &codes[i + 1..] {
                assert_ne!(a, b);
            }
            assert_ne!(*a, 0);
        }
    }
}
