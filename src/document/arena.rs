//! Arena-indexed element tree for one WordprocessingML part.
//!
//! The tree keeps only what the walker needs: element names, parent/child
//! links and, for every `w:t` run, the byte span of its content in the source
//! part. Attributes, formatting and everything else stay in the raw bytes,
//! which [`XmlTree::serialize`] copies through untouched except where a text
//! span has been given a new value.

use crate::error::Wg2PyError;
use quick_xml::Reader;
use quick_xml::escape::{partial_escape, unescape};
use quick_xml::events::Event;
use std::ops::Range;

/// Element that carries run text.
pub const TEXT_ELEMENT: &str = "w:t";

/// quick-xml drops a leading byte-order mark without counting it in
/// `buffer_position`, so it is stripped before parsing and spans are shifted.
const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

/// Index of a node in an [`XmlTree`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub u32);

/// Run text plus its location in the source part.
#[derive(Debug, Clone)]
pub struct TextLeaf {
    /// Byte range of the escaped content between `<w:t ...>` and `</w:t>`.
    pub span: Range<usize>,
    /// Unescaped source text.
    pub original: String,
    /// New text assigned by [`XmlTree::set_text`], if any.
    pub replacement: Option<String>,
}

#[derive(Debug, Clone)]
pub enum NodeData {
    /// Synthetic root above the part's document element.
    Root,
    /// Element, by qualified name as written in the part (`w:p`, `w:txbxContent`).
    Element(String),
    /// Content of a `w:t` element.
    Text(TextLeaf),
}

#[derive(Debug, Clone)]
pub struct Node {
    pub data: NodeData,
    pub parent: Option<NodeId>,
    pub children: Vec<NodeId>,
}

/// Parsed element tree of one XML part.
#[derive(Debug, Clone)]
pub struct XmlTree {
    nodes: Vec<Node>,
}

impl XmlTree {
    pub const ROOT: NodeId = NodeId(0);

    /// Parse `xml`; `part` names the archive entry in error messages.
    pub fn parse(part: &str, xml: &[u8]) -> Result<Self, Wg2PyError> {
        let malformed = |detail: String| Wg2PyError::MalformedXml {
            part: part.to_string(),
            detail,
        };

        let mut tree = Self {
            nodes: vec![Node {
                data: NodeData::Root,
                parent: None,
                children: Vec::new(),
            }],
        };
        let mut open = vec![Self::ROOT];
        // Start of the content of the `w:t` currently open, if any.
        let mut text_start: Option<usize> = None;
        // CDATA inside a run is left as it is.
        let mut opaque = false;

        let offset = if xml.starts_with(UTF8_BOM) {
            UTF8_BOM.len()
        } else {
            0
        };
        let mut reader = Reader::from_reader(&xml[offset..]);
        loop {
            let before = offset + reader.buffer_position() as usize;
            match reader.read_event() {
                Ok(Event::Start(e)) => {
                    let name = String::from_utf8_lossy(e.name().as_ref()).into_owned();
                    let is_text = name == TEXT_ELEMENT;
                    let parent = *open.last().unwrap_or(&Self::ROOT);
                    let id = tree.push(parent, NodeData::Element(name));
                    open.push(id);
                    if is_text {
                        text_start = Some(offset + reader.buffer_position() as usize);
                        opaque = false;
                    }
                }
                Ok(Event::Empty(e)) => {
                    let name = String::from_utf8_lossy(e.name().as_ref()).into_owned();
                    let parent = *open.last().unwrap_or(&Self::ROOT);
                    tree.push(parent, NodeData::Element(name));
                }
                Ok(Event::CData(_)) if text_start.is_some() => opaque = true,
                Ok(Event::End(e)) => {
                    let element = open.pop().unwrap_or(Self::ROOT);
                    if e.name().as_ref() == TEXT_ELEMENT.as_bytes() {
                        if let Some(start) = text_start.take() {
                            if !opaque {
                                let span = start..before;
                                let raw = std::str::from_utf8(&xml[span.clone()])
                                    .map_err(|e| malformed(format!("text at byte {start}: {e}")))?;
                                let original = unescape(raw)
                                    .map_err(|e| malformed(format!("text at byte {start}: {e}")))?
                                    .into_owned();
                                tree.push(
                                    element,
                                    NodeData::Text(TextLeaf {
                                        span,
                                        original,
                                        replacement: None,
                                    }),
                                );
                            }
                        }
                    }
                }
                Ok(Event::Eof) => break,
                Err(e) => {
                    return Err(malformed(format!(
                        "{e} at byte {}",
                        offset + reader.error_position() as usize
                    )));
                }
                _ => {}
            }
        }

        if open.len() > 1 {
            return Err(malformed(format!("{} unclosed element(s)", open.len() - 1)));
        }
        Ok(tree)
    }

    fn push(&mut self, parent: NodeId, data: NodeData) -> NodeId {
        let id = NodeId(self.nodes.len() as u32);
        self.nodes.push(Node {
            data,
            parent: Some(parent),
            children: Vec::new(),
        });
        self.nodes[parent.0 as usize].children.push(id);
        id
    }

    pub fn node(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.0 as usize)
    }

    pub fn children(&self, id: NodeId) -> &[NodeId] {
        self.node(id)
            .map(|n| n.children.as_slice())
            .unwrap_or_default()
    }

    /// Qualified name of an element node.
    pub fn element_name(&self, id: NodeId) -> Option<&str> {
        match &self.node(id)?.data {
            NodeData::Element(name) => Some(name),
            _ => None,
        }
    }

    /// Current text of a text node: the replacement if set, else the original.
    pub fn text(&self, id: NodeId) -> Option<&str> {
        match &self.node(id)?.data {
            NodeData::Text(leaf) => Some(leaf.replacement.as_deref().unwrap_or(&leaf.original)),
            _ => None,
        }
    }

    /// Assign new text to a text node. Returns false if `id` is not one.
    pub fn set_text(&mut self, id: NodeId, text: String) -> bool {
        match self.nodes.get_mut(id.0 as usize).map(|n| &mut n.data) {
            Some(NodeData::Text(leaf)) => {
                leaf.replacement = (text != leaf.original).then_some(text);
                true
            }
            _ => false,
        }
    }

    /// True if any text node differs from the source.
    pub fn is_modified(&self) -> bool {
        self.leaves().any(|leaf| leaf.replacement.is_some())
    }

    /// Number of text nodes in the part.
    pub fn text_count(&self) -> usize {
        self.leaves().count()
    }

    fn leaves(&self) -> impl Iterator<Item = &TextLeaf> {
        self.nodes.iter().filter_map(|n| match &n.data {
            NodeData::Text(leaf) => Some(leaf),
            _ => None,
        })
    }

    /// Rebuild the part from `source` (the bytes it was parsed from),
    /// splicing in escaped replacement text.
    pub fn serialize(&self, source: &[u8]) -> Vec<u8> {
        let mut out = Vec::with_capacity(source.len() + source.len() / 16);
        let mut cursor = 0;
        // Nodes are allocated in document order, so spans are ascending.
        for leaf in self.leaves() {
            let Some(replacement) = &leaf.replacement else {
                continue;
            };
            out.extend_from_slice(&source[cursor..leaf.span.start]);
            out.extend_from_slice(partial_escape(replacement.as_str()).as_bytes());
            cursor = leaf.span.end;
        }
        out.extend_from_slice(&source[cursor..]);
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PART: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<w:document xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main"><w:body><w:p><w:r><w:rPr><w:b/></w:rPr><w:t xml:space="preserve">Mao &amp; Chou </w:t></w:r><w:r><w:t/></w:r></w:p></w:body></w:document>"#;

    fn text_ids(tree: &XmlTree) -> Vec<NodeId> {
        (0..tree.nodes.len() as u32)
            .map(NodeId)
            .filter(|&id| tree.text(id).is_some())
            .collect()
    }

    #[test]
    fn records_unescaped_run_text() {
        let tree = XmlTree::parse("word/document.xml", PART.as_bytes()).unwrap();
        let ids = text_ids(&tree);
        assert_eq!(ids.len(), 1, "empty <w:t/> has no text node");
        assert_eq!(tree.text(ids[0]), Some("Mao & Chou "));
        let parent = tree.node(ids[0]).and_then(|n| n.parent).unwrap();
        assert_eq!(tree.element_name(parent), Some("w:t"));
    }

    #[test]
    fn unchanged_tree_serialises_byte_identical() {
        let tree = XmlTree::parse("word/document.xml", PART.as_bytes()).unwrap();
        assert!(!tree.is_modified());
        assert_eq!(tree.serialize(PART.as_bytes()), PART.as_bytes());
    }

    #[test]
    fn splices_escaped_replacement_only() {
        let mut tree = XmlTree::parse("word/document.xml", PART.as_bytes()).unwrap();
        let id = text_ids(&tree)[0];
        assert!(tree.set_text(id, "Mao & Zhou <1>".into()));
        assert!(tree.is_modified());
        let out = String::from_utf8(tree.serialize(PART.as_bytes())).unwrap();
        let expected = PART.replace("Mao &amp; Chou ", "Mao &amp; Zhou &lt;1&gt;");
        assert_eq!(out, expected);
    }

    #[test]
    fn setting_original_text_is_not_a_change() {
        let mut tree = XmlTree::parse("word/document.xml", PART.as_bytes()).unwrap();
        let id = text_ids(&tree)[0];
        tree.set_text(id, "Mao & Chou ".into());
        assert!(!tree.is_modified());
    }

    #[test]
    fn set_text_on_element_is_rejected() {
        let mut tree = XmlTree::parse("word/document.xml", PART.as_bytes()).unwrap();
        assert!(!tree.set_text(XmlTree::ROOT, "x".into()));
    }

    #[test]
    fn byte_order_mark_keeps_spans_aligned() {
        let part = format!("\u{feff}{PART}");
        let mut tree = XmlTree::parse("word/document.xml", part.as_bytes()).unwrap();
        let id = text_ids(&tree)[0];
        assert_eq!(tree.text(id), Some("Mao & Chou "));

        tree.set_text(id, "Mao & Zhou".into());
        let out = tree.serialize(part.as_bytes());
        assert_eq!(
            String::from_utf8(out.clone()).unwrap(),
            part.replace("Mao &amp; Chou ", "Mao &amp; Zhou")
        );

        let reparsed = XmlTree::parse("word/document.xml", &out).unwrap();
        let ids = text_ids(&reparsed);
        assert_eq!(reparsed.text(ids[0]), Some("Mao & Zhou"));
    }

    #[test]
    fn mismatched_tags_are_malformed() {
        let err = XmlTree::parse("word/document.xml", b"<w:document><w:body></w:p></w:document>")
            .unwrap_err();
        assert!(matches!(err, Wg2PyError::MalformedXml { .. }), "got {err:?}");
    }

    #[test]
    fn unclosed_elements_are_malformed() {
        let err = XmlTree::parse("word/document.xml", b"<w:document><w:body>").unwrap_err();
        assert!(matches!(err, Wg2PyError::MalformedXml { .. }), "got {err:?}");
    }
}
