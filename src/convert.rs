//! Conversion entry points.
//!
//! [`Converter`] is the reusable form: it owns a shared [`Lexicon`] and a
//! [`ConversionConfig`] and can run any number of text or document
//! conversions. The free functions [`convert_text`] and [`convert_document`]
//! build a converter with the built-in tables for one-off calls.
//!
//! A document run is a single synchronous pass:
//!
//! ```text
//!  open ─► walk ─► for each text node: get_text ─► matcher ─► set_text ─► save
//! ```
//!
//! Nothing is written until every node has been converted, so a document that
//! fails to open or walk never produces partial output, and the source file
//! is never modified.

use crate::config::ConversionConfig;
use crate::document::walker::{self, WalkOptions};
use crate::document::{DocxDocument, PartKind};
use crate::error::Wg2PyError;
use crate::lexicon::Lexicon;
use crate::matcher::TokenMatcher;
use crate::output::{ConversionOutput, ConversionStats};
use once_cell::sync::OnceCell;
use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, info};

static STANDARD_LEXICON: OnceCell<Arc<Lexicon>> = OnceCell::new();

/// The built-in Wade-Giles tables, built and validated on first use.
pub fn standard_lexicon() -> Result<Arc<Lexicon>, Wg2PyError> {
    STANDARD_LEXICON
        .get_or_try_init(|| Lexicon::standard().map(Arc::new))
        .cloned()
}

/// A configured converter. Cheap to clone; the lexicon is shared.
#[derive(Debug, Clone)]
pub struct Converter {
    lexicon: Arc<Lexicon>,
    config: ConversionConfig,
}

impl Converter {
    /// Converter using the built-in tables.
    pub fn new(config: ConversionConfig) -> Result<Self, Wg2PyError> {
        Ok(Self::with_lexicon(standard_lexicon()?, config))
    }

    /// Converter using a caller-supplied lexicon.
    pub fn with_lexicon(lexicon: Arc<Lexicon>, config: ConversionConfig) -> Self {
        Self { lexicon, config }
    }

    pub fn lexicon(&self) -> &Lexicon {
        &self.lexicon
    }

    pub fn config(&self) -> &ConversionConfig {
        &self.config
    }

    /// Convert a plain string. Never fails; unrecognised text is returned as is.
    pub fn convert_text(&self, text: &str) -> String {
        TokenMatcher::new(&self.lexicon).convert(text, self.config.aggressive)
    }

    /// Convert every text node of the document at `source` and write the
    /// result to `dest`, or next to the source with the configured suffix.
    ///
    /// # Errors
    /// - [`ErrorKind::DocumentFormat`](crate::ErrorKind::DocumentFormat) when
    ///   the source is missing, unreadable, or not a well-formed `.docx`
    /// - [`ErrorKind::Io`](crate::ErrorKind::Io) when the destination cannot
    ///   be written or is the source file itself
    pub fn convert_document(
        &self,
        source: impl AsRef<Path>,
        dest: Option<&Path>,
    ) -> Result<ConversionOutput, Wg2PyError> {
        let started = Instant::now();
        let source = source.as_ref();
        let dest = match dest {
            Some(p) => p.to_path_buf(),
            None => default_output_path(source, &self.config.output_suffix),
        };
        info!("Converting {} → {}", source.display(), dest.display());

        let mut doc = DocxDocument::open(source, self.config.include_headers_footers)?;
        if is_same_file(source, &dest) {
            return Err(Wg2PyError::InPlaceWrite { path: dest });
        }

        let nodes = walker::enumerate(&doc, WalkOptions::from(&self.config))?;
        let total = nodes.len();
        if let Some(ref cb) = self.config.progress_callback {
            cb.on_conversion_start(total);
        }

        let matcher = TokenMatcher::new(&self.lexicon);
        let mut stats = ConversionStats::default();
        for (i, node) in nodes.iter().enumerate() {
            match (node.kind, node.is_nested()) {
                (PartKind::Header | PartKind::Footer, _) => stats.header_footer_nodes += 1,
                (PartKind::MainDocument, true) => stats.nested_nodes += 1,
                (PartKind::MainDocument, false) => stats.body_nodes += 1,
            }

            let original = doc.get_text(node).unwrap_or_default();
            let converted = matcher.convert(original, self.config.aggressive);
            let changed = converted != original;
            if changed {
                doc.set_text(node, converted)?;
                stats.changed_nodes += 1;
            }

            if let Some(ref cb) = self.config.progress_callback {
                cb.on_node_converted(i + 1, total, changed);
            }
        }
        debug!(
            "{} body, {} nested, {} header/footer nodes; {} changed",
            stats.body_nodes, stats.nested_nodes, stats.header_footer_nodes, stats.changed_nodes
        );

        doc.save(&dest)?;
        stats.total_duration_ms = started.elapsed().as_millis() as u64;

        info!(
            "Conversion complete: {}/{} nodes changed, {}ms",
            stats.changed_nodes, total, stats.total_duration_ms
        );
        if let Some(ref cb) = self.config.progress_callback {
            cb.on_conversion_complete(total, stats.changed_nodes);
        }

        Ok(ConversionOutput {
            output_path: dest,
            stats,
        })
    }
}

/// Convert a plain string with the built-in tables.
///
/// # Example
/// ```rust
/// assert_eq!(wg2pinyin::convert_text("Mao Tse-tung", false).unwrap(), "Mao Zedong");
/// ```
pub fn convert_text(text: &str, aggressive: bool) -> Result<String, Wg2PyError> {
    let lexicon = standard_lexicon()?;
    Ok(TokenMatcher::new(&lexicon).convert(text, aggressive))
}

/// Convert a document with the built-in tables and default settings.
/// Returns the path written.
pub fn convert_document(
    source: impl AsRef<Path>,
    dest: Option<&Path>,
    aggressive: bool,
) -> Result<PathBuf, Wg2PyError> {
    let config = ConversionConfig {
        aggressive,
        ..ConversionConfig::default()
    };
    Converter::new(config)?
        .convert_document(source, dest)
        .map(|out| out.output_path)
}

/// `dir/report.docx` → `dir/report<suffix>.docx`.
pub fn default_output_path(source: &Path, suffix: &str) -> PathBuf {
    let mut name: OsString = source.file_stem().unwrap_or_default().to_os_string();
    name.push(suffix);
    if let Some(ext) = source.extension() {
        name.push(".");
        name.push(ext);
    }
    source.with_file_name(name)
}

fn is_same_file(a: &Path, b: &Path) -> bool {
    match (std::fs::canonicalize(a), std::fs::canonicalize(b)) {
        (Ok(a), Ok(b)) => a == b,
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::fixtures::*;
    use crate::progress::ConversionProgressCallback;
    use std::sync::Mutex;
    use tempfile::TempDir;

    fn write_fixture(dir: &TempDir, name: &str, body: &str) -> PathBuf {
        let path = dir.path().join(name);
        let xml = document_xml(body);
        std::fs::write(&path, docx(&[("word/document.xml", xml.as_str())])).unwrap();
        path
    }

    fn texts_of(path: &Path) -> Vec<String> {
        let doc = DocxDocument::open(path, false).unwrap();
        walker::enumerate(&doc, WalkOptions::from(&ConversionConfig::default()))
            .unwrap()
            .iter()
            .filter_map(|n| doc.get_text(n).map(str::to_string))
            .collect()
    }

    #[test]
    fn default_output_path_inserts_suffix() {
        assert_eq!(
            default_output_path(Path::new("/tmp/report.docx"), "_pinyin"),
            PathBuf::from("/tmp/report_pinyin.docx")
        );
        assert_eq!(
            default_output_path(Path::new("notes"), "_py"),
            PathBuf::from("notes_py")
        );
        assert_eq!(
            default_output_path(Path::new("a.b.docx"), "_pinyin"),
            PathBuf::from("a.b_pinyin.docx")
        );
    }

    #[test]
    fn free_convert_text() {
        assert_eq!(convert_text("Peking", false).unwrap(), "Beijing");
        assert_eq!(convert_text("to", true).unwrap(), "duo");
    }

    #[test]
    fn converts_document_with_default_output_path() {
        let dir = TempDir::new().unwrap();
        let body = format!(
            "{}{}",
            paragraph("Chiang left Nanking."),
            text_box(&paragraph("Mao Tse-tung"))
        );
        let source = write_fixture(&dir, "history.docx", &body);

        let converter = Converter::new(ConversionConfig::default()).unwrap();
        let out = converter.convert_document(&source, None).unwrap();

        assert_eq!(out.output_path, dir.path().join("history_pinyin.docx"));
        assert_eq!(out.stats.body_nodes, 1);
        assert_eq!(out.stats.nested_nodes, 1);
        assert_eq!(out.stats.changed_nodes, 2);
        assert_eq!(
            texts_of(&out.output_path),
            vec!["Jiang left Nanjing.", "Mao Zedong"]
        );
        // Source untouched.
        assert_eq!(
            texts_of(&source),
            vec!["Chiang left Nanking.", "Mao Tse-tung"]
        );
    }

    #[test]
    fn byte_order_mark_part_round_trips() {
        let dir = TempDir::new().unwrap();
        let source = dir.path().join("bom.docx");
        let xml = format!("\u{feff}{}", document_xml(&paragraph("Chou Enlai ok")));
        std::fs::write(&source, docx(&[("word/document.xml", xml.as_str())])).unwrap();

        let out = convert_document(&source, None, false).unwrap();
        assert_eq!(texts_of(&out), vec!["Zhou Enlai ok"]);
    }

    #[test]
    fn refuses_in_place_conversion() {
        let dir = TempDir::new().unwrap();
        let source = write_fixture(&dir, "same.docx", &paragraph("Peking"));
        let before = std::fs::read(&source).unwrap();

        let err = convert_document(&source, Some(source.as_path()), false).unwrap_err();
        assert!(matches!(err, Wg2PyError::InPlaceWrite { .. }));
        assert_eq!(std::fs::read(&source).unwrap(), before);
    }

    #[test]
    fn not_a_docx_writes_nothing() {
        let dir = TempDir::new().unwrap();
        let source = dir.path().join("fake.docx");
        std::fs::write(&source, b"plain text, not a zip").unwrap();

        let err = convert_document(&source, None, false).unwrap_err();
        assert_eq!(err.kind(), crate::ErrorKind::DocumentFormat);
        assert!(!dir.path().join("fake_pinyin.docx").exists());
    }

    #[derive(Default)]
    struct Recorder {
        events: Mutex<Vec<String>>,
    }

    impl ConversionProgressCallback for Recorder {
        fn on_conversion_start(&self, total_nodes: usize) {
            self.events.lock().unwrap().push(format!("start {total_nodes}"));
        }
        fn on_node_converted(&self, index: usize, total: usize, changed: bool) {
            self.events
                .lock()
                .unwrap()
                .push(format!("node {index}/{total} {changed}"));
        }
        fn on_conversion_complete(&self, total_nodes: usize, changed_nodes: usize) {
            self.events
                .lock()
                .unwrap()
                .push(format!("done {changed_nodes}/{total_nodes}"));
        }
    }

    #[test]
    fn progress_events_in_order() {
        let dir = TempDir::new().unwrap();
        let body = format!("{}{}", paragraph("Hello"), paragraph("Peking"));
        let source = write_fixture(&dir, "p.docx", &body);

        let recorder = Arc::new(Recorder::default());
        let config = ConversionConfig::builder()
            .progress_callback(recorder.clone() as Arc<dyn ConversionProgressCallback>)
            .build()
            .unwrap();
        Converter::new(config)
            .unwrap()
            .convert_document(&source, None)
            .unwrap();

        assert_eq!(
            *recorder.events.lock().unwrap(),
            vec!["start 2", "node 1/2 false", "node 2/2 true", "done 1/2"]
        );
    }

    #[test]
    fn custom_lexicon_is_used() {
        let lexicon = Lexicon::builder().syllable("ch'ing", "qing").build().unwrap();
        let converter = Converter::with_lexicon(Arc::new(lexicon), ConversionConfig::default());
        assert_eq!(converter.convert_text("Ch'ing and Peking"), "Qing and Peking");
    }

    #[test]
    fn standard_lexicon_is_shared() {
        let a = standard_lexicon().unwrap();
        let b = standard_lexicon().unwrap();
        assert!(Arc::ptr_eq(&a, &b));
    }
}
