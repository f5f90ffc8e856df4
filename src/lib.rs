//! # wg2pinyin
//!
//! Convert Wade-Giles romanised Chinese to Hanyu Pinyin, in plain text or
//! inside Word (`.docx`) documents.
//!
//! ## Why this crate?
//!
//! Older scholarship and archives spell Chinese names the Wade-Giles way
//! (`Mao Tse-tung`, `Ch'ing`, `Peking`). A naive find-and-replace either
//! misses aspirated syllables or mangles English words that happen to be
//! valid syllables ("to", "lung", "tang"). This crate tokenises text, looks
//! tokens up in validated tables, keeps common English words unless they are
//! capitalised, projects the source case onto the replacement, and merges
//! hyphenated given names (`Tse-tung` → `Zedong`). In documents, only the text
//! of each run changes; formatting and every other byte of the file survive.
//!
//! ## Pipeline Overview
//!
//! ```text
//! .docx
//!  │
//!  ├─ 1. Open     ZIP magic check, load entries, parse text parts (quick-xml)
//!  ├─ 2. Walk     body runs + text-box runs (+ headers/footers) in reading order
//!  ├─ 3. Match    artifact repair → tokens → compounds → postal / syllable lookup
//!  ├─ 4. Write    new text into the same runs
//!  └─ 5. Save     atomic write of `<name>_pinyin.docx`
//! ```
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use wg2pinyin::{ConversionConfig, Converter};
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let converter = Converter::new(ConversionConfig::default())?;
//!     assert_eq!(converter.convert_text("Ch'ing dynasty"), "Qing dynasty");
//!
//!     let output = converter.convert_document("history.docx", None)?;
//!     eprintln!("{} of {} runs changed → {}",
//!         output.stats.changed_nodes,
//!         output.stats.total_nodes(),
//!         output.output_path.display());
//!     Ok(())
//! }
//! ```
//!
//! ## Feature Flags
//!
//! | Feature | Default | Description |
//! |---------|---------|-------------|
//! | `cli`   | on      | Enables the `wg2pinyin` binary (clap + anyhow + tracing-subscriber + indicatif) |
//!
//! Disable `cli` when using only the library:
//! ```toml
//! wg2pinyin = { version = "0.1", default-features = false }
//! ```
//!
//! ## Aggressive mode
//!
//! | Input | default | `aggressive` |
//! |-------|---------|--------------|
//! | `to market` | `to market` | `duo market` |
//! | `To` | `Duo` | `Duo` |
//! | `I` | `I` | `Yi` |
//!
//! Use it for text known to be entirely romanised Chinese.

// ── Modules ──────────────────────────────────────────────────────────────

pub mod config;
pub mod convert;
pub mod document;
pub mod error;
pub mod lexicon;
pub mod matcher;
pub mod output;
pub mod progress;

// ── Re-exports ───────────────────────────────────────────────────────────

pub use config::{ConversionConfig, ConversionConfigBuilder};
pub use convert::{
    convert_document, convert_text, default_output_path, standard_lexicon, Converter,
};
pub use document::{DocumentNode, DocxDocument, PartKind};
pub use error::{ErrorKind, Wg2PyError};
pub use lexicon::{ArtifactRule, Lexicon, LexiconBuilder};
pub use matcher::TokenMatcher;
pub use output::{ConversionOutput, ConversionStats};
pub use progress::{ConversionProgressCallback, NoopProgressCallback, ProgressCallback};
