//! DOCX container: open, per-node text access, and atomic save.
//!
//! A `.docx` file is a ZIP archive of XML parts. [`DocxDocument`] loads every
//! entry, parses the parts that carry convertible text into an
//! [`arena::XmlTree`], and on save writes the archive back entry for entry,
//! re-serialising only the parts whose text actually changed.
//!
//! ```text
//!  open(path) ─► magic check ─► ZipArchive ─► entries[] ─► XmlTree per part
//!                                                              │
//!                       walker::enumerate ◄────────────────────┘
//!                               │
//!                  get_text / set_text (orchestrator)
//!                               │
//!  save(dest) ◄── ZipWriter ◄── XmlTree::serialize (changed parts only)
//! ```

pub mod arena;
pub mod walker;

use crate::error::Wg2PyError;
use arena::{NodeId, XmlTree};
use once_cell::sync::Lazy;
use regex::Regex;
use std::fs::File;
use std::io::{Cursor, Read, Seek, SeekFrom, Write};
use std::path::{Path, PathBuf};
use tracing::debug;
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipArchive, ZipWriter};

/// The part every Word document must contain.
pub const MAIN_DOCUMENT_PART: &str = "word/document.xml";

const ZIP_MAGIC: &[u8; 4] = b"PK\x03\x04";

static RE_HEADER_FOOTER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^word/(header|footer)\d*\.xml$").unwrap());

/// Role of an XML part within the document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PartKind {
    MainDocument,
    Header,
    Footer,
}

impl PartKind {
    fn of(name: &str) -> Option<Self> {
        if name == MAIN_DOCUMENT_PART {
            return Some(PartKind::MainDocument);
        }
        let caps = RE_HEADER_FOOTER.captures(name)?;
        match &caps[1] {
            "header" => Some(PartKind::Header),
            _ => Some(PartKind::Footer),
        }
    }
}

/// A text-bearing leaf found by the walker.
///
/// Identifies the node only; text is read and written through
/// [`DocxDocument::get_text`] and [`DocxDocument::set_text`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DocumentNode {
    /// Index into [`DocxDocument::parts`].
    pub part: usize,
    pub kind: PartKind,
    pub node: NodeId,
    /// Number of text boxes enclosing the run; 0 for ordinary paragraphs.
    pub container_depth: usize,
}

impl DocumentNode {
    /// True for runs inside a text box.
    pub fn is_nested(&self) -> bool {
        self.container_depth > 0
    }
}

/// One parsed XML part.
#[derive(Debug, Clone)]
pub struct XmlPart {
    pub name: String,
    pub kind: PartKind,
    pub tree: XmlTree,
    entry: usize,
}

#[derive(Debug, Clone)]
struct Entry {
    name: String,
    data: Vec<u8>,
    compression: CompressionMethod,
    last_modified: Option<zip::DateTime>,
    is_dir: bool,
}

/// An opened `.docx` document.
#[derive(Debug, Clone)]
pub struct DocxDocument {
    path: PathBuf,
    entries: Vec<Entry>,
    parts: Vec<XmlPart>,
}

impl DocxDocument {
    /// Open and parse the document at `path`.
    ///
    /// Header and footer parts are only parsed when `include_headers_footers`
    /// is set, so a damaged header cannot fail a body-only conversion.
    pub fn open(path: impl AsRef<Path>, include_headers_footers: bool) -> Result<Self, Wg2PyError> {
        let path = path.as_ref().to_path_buf();

        if !path.exists() {
            return Err(Wg2PyError::FileNotFound { path });
        }
        let mut file = match File::open(&path) {
            Ok(f) => f,
            Err(e) if e.kind() == std::io::ErrorKind::PermissionDenied => {
                return Err(Wg2PyError::PermissionDenied { path });
            }
            Err(_) => return Err(Wg2PyError::FileNotFound { path }),
        };

        Self::from_reader(&mut file, path, include_headers_footers)
    }

    /// Parse a document from any seekable reader. `path` is used for error
    /// messages and as [`Self::path`].
    pub fn from_reader<R: Read + Seek>(
        mut reader: R,
        path: impl Into<PathBuf>,
        include_headers_footers: bool,
    ) -> Result<Self, Wg2PyError> {
        let path = path.into();
        let corrupt = |path: &Path, source: zip::result::ZipError| Wg2PyError::CorruptArchive {
            path: path.to_path_buf(),
            source,
        };

        let mut magic = [0u8; 4];
        let read = read_prefix(&mut reader, &mut magic)
            .and_then(|n| reader.seek(SeekFrom::Start(0)).map(|_| n))
            .map_err(|e| corrupt(&path, e.into()))?;
        if read < magic.len() || &magic != ZIP_MAGIC {
            return Err(Wg2PyError::NotADocx { path, magic });
        }

        let mut archive = ZipArchive::new(reader).map_err(|e| corrupt(&path, e))?;
        let mut entries = Vec::with_capacity(archive.len());
        let mut parts = Vec::new();

        for i in 0..archive.len() {
            let mut file = archive.by_index(i).map_err(|e| corrupt(&path, e))?;
            let name = file.name().to_string();
            let mut data = Vec::with_capacity(file.size() as usize);
            file.read_to_end(&mut data)
                .map_err(|e| corrupt(&path, e.into()))?;

            let kind = PartKind::of(&name)
                .filter(|k| include_headers_footers || *k == PartKind::MainDocument);
            if let Some(kind) = kind {
                let tree = XmlTree::parse(&name, &data)?;
                debug!("Parsed {} ({} text nodes)", name, tree.text_count());
                parts.push(XmlPart {
                    name: name.clone(),
                    kind,
                    tree,
                    entry: entries.len(),
                });
            }

            entries.push(Entry {
                is_dir: file.is_dir(),
                compression: file.compression(),
                last_modified: file.last_modified(),
                name,
                data,
            });
        }

        if !parts.iter().any(|p| p.kind == PartKind::MainDocument) {
            return Err(Wg2PyError::MissingPart {
                path,
                part: MAIN_DOCUMENT_PART.to_string(),
            });
        }

        debug!(
            "Opened {}: {} entries, {} text parts",
            path.display(),
            entries.len(),
            parts.len()
        );
        Ok(Self {
            path,
            entries,
            parts,
        })
    }

    /// Path the document was opened from.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Parsed text parts, in archive order.
    pub fn parts(&self) -> &[XmlPart] {
        &self.parts
    }

    /// Names of every archive entry, in archive order.
    pub fn entry_names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|e| e.name.as_str())
    }

    /// Current text of `node`.
    pub fn get_text(&self, node: &DocumentNode) -> Option<&str> {
        self.parts.get(node.part)?.tree.text(node.node)
    }

    /// Replace the text of `node`. Formatting and every other attribute of
    /// the run are left untouched.
    pub fn set_text(&mut self, node: &DocumentNode, text: String) -> Result<(), Wg2PyError> {
        let updated = self
            .parts
            .get_mut(node.part)
            .is_some_and(|p| p.tree.set_text(node.node, text));
        if updated {
            Ok(())
        } else {
            Err(Wg2PyError::Internal(format!(
                "node {:?} in part {} is not a text node",
                node.node, node.part
            )))
        }
    }

    /// Serialise the archive to `writer`.
    pub fn write_to<W: Write + Seek>(&self, writer: W) -> zip::result::ZipResult<W> {
        let mut zip = ZipWriter::new(writer);
        for (index, entry) in self.entries.iter().enumerate() {
            let method = match entry.compression {
                CompressionMethod::Stored => CompressionMethod::Stored,
                _ => CompressionMethod::Deflated,
            };
            let mut options = SimpleFileOptions::default().compression_method(method);
            if let Some(modified) = entry.last_modified {
                options = options.last_modified_time(modified);
            }

            if entry.is_dir {
                zip.add_directory(entry.name.as_str(), options)?;
                continue;
            }
            zip.start_file(entry.name.as_str(), options)?;
            match self.parts.iter().find(|p| p.entry == index) {
                Some(part) if part.tree.is_modified() => {
                    zip.write_all(&part.tree.serialize(&entry.data))?;
                }
                _ => zip.write_all(&entry.data)?,
            }
        }
        zip.finish()
    }

    /// Serialise the archive to memory.
    pub fn to_bytes(&self) -> zip::result::ZipResult<Vec<u8>> {
        Ok(self.write_to(Cursor::new(Vec::new()))?.into_inner())
    }

    /// Write the document to `dest` atomically.
    ///
    /// The archive is written to a temporary file next to `dest` and renamed
    /// over it, so a failed save never leaves a truncated document behind.
    /// Missing parent directories are created.
    pub fn save(&self, dest: impl AsRef<Path>) -> Result<(), Wg2PyError> {
        let dest = dest.as_ref();
        let write_failed = |source: std::io::Error| Wg2PyError::OutputWriteFailed {
            path: dest.to_path_buf(),
            source,
        };

        let dir = match dest.parent() {
            Some(p) if !p.as_os_str().is_empty() => p.to_path_buf(),
            _ => PathBuf::from("."),
        };
        std::fs::create_dir_all(&dir).map_err(write_failed)?;

        let mut tmp = tempfile::NamedTempFile::new_in(&dir).map_err(write_failed)?;
        self.write_to(tmp.as_file_mut())
            .map_err(|e| write_failed(std::io::Error::other(e)))?;
        tmp.as_file().sync_all().map_err(write_failed)?;
        tmp.persist(dest).map_err(|e| write_failed(e.error))?;

        debug!("Saved {}", dest.display());
        Ok(())
    }
}

/// Read up to `buf.len()` bytes, stopping early only at end of input.
fn read_prefix<R: Read>(reader: &mut R, buf: &mut [u8]) -> std::io::Result<usize> {
    let mut filled = 0;
    while filled < buf.len() {
        match reader.read(&mut buf[filled..]) {
            Ok(0) => break,
            Ok(n) => filled += n,
            Err(e) if e.kind() == std::io::ErrorKind::Interrupted => {}
            Err(e) => return Err(e),
        }
    }
    Ok(filled)
}

#[cfg(test)]
pub(crate) mod fixtures {
    //! In-memory DOCX archives for unit tests.

    use std::io::{Cursor, Write};
    use zip::write::SimpleFileOptions;
    use zip::{CompressionMethod, ZipWriter};

    pub const W_NS: &str = "http://schemas.openxmlformats.org/wordprocessingml/2006/main";

    /// Wrap body XML in a `w:document` element.
    pub fn document_xml(body: &str) -> String {
        format!(
            r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?><w:document xmlns:w="{W_NS}"><w:body>{body}</w:body></w:document>"#
        )
    }

    pub fn paragraph(text: &str) -> String {
        format!(r#"<w:p><w:r><w:rPr><w:i/></w:rPr><w:t xml:space="preserve">{text}</w:t></w:r></w:p>"#)
    }

    pub fn text_box(inner: &str) -> String {
        format!(
            r#"<w:p><w:r><w:pict><v:shape><v:textbox><w:txbxContent>{inner}</w:txbxContent></v:textbox></v:shape></w:pict></w:r></w:p>"#
        )
    }

    /// Build an archive from `(name, contents)` pairs.
    pub fn docx(parts: &[(&str, &str)]) -> Vec<u8> {
        let mut zip = ZipWriter::new(Cursor::new(Vec::new()));
        let options = SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);
        for (name, data) in parts {
            zip.start_file(*name, options).unwrap();
            zip.write_all(data.as_bytes()).unwrap();
        }
        zip.finish().unwrap().into_inner()
    }
}

#[cfg(test)]
mod tests {
    use super::fixtures::*;
    use super::*;

    fn open_bytes(bytes: Vec<u8>, hf: bool) -> Result<DocxDocument, Wg2PyError> {
        DocxDocument::from_reader(Cursor::new(bytes), "test.docx", hf)
    }

    #[test]
    fn classifies_parts_by_name() {
        assert_eq!(PartKind::of("word/document.xml"), Some(PartKind::MainDocument));
        assert_eq!(PartKind::of("word/header1.xml"), Some(PartKind::Header));
        assert_eq!(PartKind::of("word/footer.xml"), Some(PartKind::Footer));
        assert_eq!(PartKind::of("word/styles.xml"), None);
        assert_eq!(PartKind::of("word/_rels/header1.xml.rels"), None);
    }

    #[test]
    fn rejects_non_zip_input() {
        let err = open_bytes(b"%PDF-1.7 not a docx".to_vec(), false).unwrap_err();
        match err {
            Wg2PyError::NotADocx { magic, .. } => assert_eq!(&magic, b"%PDF"),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn rejects_tiny_input() {
        let err = open_bytes(b"PK".to_vec(), false).unwrap_err();
        assert!(matches!(err, Wg2PyError::NotADocx { .. }));
    }

    #[test]
    fn rejects_truncated_archive() {
        let mut bytes = docx(&[("word/document.xml", document_xml(&paragraph("x")).as_str())]);
        bytes.truncate(bytes.len() / 2);
        let err = open_bytes(bytes, false).unwrap_err();
        assert!(matches!(err, Wg2PyError::CorruptArchive { .. }), "got {err:?}");
    }

    #[test]
    fn requires_main_document_part() {
        let bytes = docx(&[("word/styles.xml", "<w:styles/>")]);
        let err = open_bytes(bytes, false).unwrap_err();
        assert!(matches!(err, Wg2PyError::MissingPart { .. }));
    }

    #[test]
    fn header_parts_loaded_only_on_request() {
        let bytes = docx(&[
            ("word/document.xml", document_xml(&paragraph("body")).as_str()),
            ("word/header1.xml", "<w:hdr><w:p><w:r><w:t>Peking</w:t></w:r></w:p></w:hdr>"),
        ]);
        assert_eq!(open_bytes(bytes.clone(), false).unwrap().parts().len(), 1);
        assert_eq!(open_bytes(bytes, true).unwrap().parts().len(), 2);
    }

    #[test]
    fn malformed_header_ignored_when_out_of_scope() {
        let bytes = docx(&[
            ("word/document.xml", document_xml(&paragraph("body")).as_str()),
            ("word/footer1.xml", "<w:ftr><w:p>"),
        ]);
        assert!(open_bytes(bytes.clone(), false).is_ok());
        assert!(matches!(
            open_bytes(bytes, true).unwrap_err(),
            Wg2PyError::MalformedXml { .. }
        ));
    }

    #[test]
    fn unchanged_document_round_trips_entries() {
        let body = document_xml(&paragraph("Mao Tse-tung"));
        let bytes = docx(&[
            ("[Content_Types].xml", "<Types/>"),
            ("word/document.xml", body.as_str()),
            ("word/media/image1.png", "\u{89}PNG"),
        ]);
        let doc = open_bytes(bytes, false).unwrap();
        let saved = open_bytes(doc.to_bytes().unwrap(), false).unwrap();
        assert_eq!(
            saved.entry_names().collect::<Vec<_>>(),
            vec!["[Content_Types].xml", "word/document.xml", "word/media/image1.png"]
        );
        assert_eq!(saved.entries[1].data, body.as_bytes());
        assert_eq!(saved.entries[2].data, "\u{89}PNG".as_bytes());
    }

    #[test]
    fn save_is_atomic_and_creates_directories() {
        let dir = tempfile::TempDir::new().unwrap();
        let bytes = docx(&[("word/document.xml", document_xml(&paragraph("x")).as_str())]);
        let doc = open_bytes(bytes, false).unwrap();
        let dest = dir.path().join("nested/out.docx");
        doc.save(&dest).unwrap();
        assert!(dest.exists());
        let leftovers: Vec<_> = std::fs::read_dir(dest.parent().unwrap())
            .unwrap()
            .filter_map(|e| e.ok())
            .filter(|e| e.path() != dest)
            .collect();
        assert!(leftovers.is_empty(), "temp file left behind");
    }

    #[test]
    fn open_missing_file() {
        let err = DocxDocument::open("/definitely/not/here.docx", false).unwrap_err();
        assert!(matches!(err, Wg2PyError::FileNotFound { .. }));
    }
}
