//! Enumeration of text-bearing runs in reading order.
//!
//! Traversal is an explicit-stack pre-order walk over the arena, so deeply
//! nested text boxes cannot overflow the call stack; the nesting depth is
//! still capped by [`WalkOptions::max_container_depth`].

use super::arena::{NodeData, NodeId, XmlTree};
use super::{DocumentNode, DocxDocument, PartKind};
use crate::config::ConversionConfig;
use crate::error::Wg2PyError;
use tracing::{debug, warn};

/// Element whose descendants are text-box content.
pub const TEXT_BOX_ELEMENT: &str = "w:txbxContent";

const BODY_ELEMENT: &str = "w:body";

/// What the walker visits.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WalkOptions {
    pub include_headers_footers: bool,
    pub max_container_depth: usize,
}

impl From<&ConversionConfig> for WalkOptions {
    fn from(config: &ConversionConfig) -> Self {
        Self {
            include_headers_footers: config.include_headers_footers,
            max_container_depth: config.max_container_depth,
        }
    }
}

/// Every text node of `doc` in document order: the main body first
/// (paragraphs, tables and text boxes interleaved as they appear), then
/// header and footer parts in archive order when requested.
pub fn enumerate(
    doc: &DocxDocument,
    options: WalkOptions,
) -> Result<Vec<DocumentNode>, Wg2PyError> {
    let mut nodes = Vec::new();

    let mut ordered: Vec<usize> = (0..doc.parts().len()).collect();
    ordered.sort_by_key(|&i| doc.parts()[i].kind != PartKind::MainDocument);

    let mut header_footer_parts = 0;
    for index in ordered {
        let part = &doc.parts()[index];
        if part.kind != PartKind::MainDocument {
            if !options.include_headers_footers {
                continue;
            }
            header_footer_parts += 1;
        }

        let start = match part.kind {
            PartKind::MainDocument => find_element(&part.tree, BODY_ELEMENT),
            PartKind::Header | PartKind::Footer => Some(XmlTree::ROOT),
        };
        let Some(start) = start else {
            warn!("{} has no {} element", part.name, BODY_ELEMENT);
            continue;
        };

        let before = nodes.len();
        walk_part(&part.tree, start, options.max_container_depth, |node, depth| {
            nodes.push(DocumentNode {
                part: index,
                kind: part.kind,
                node,
                container_depth: depth,
            });
        })
        .map_err(|limit| Wg2PyError::NestingTooDeep {
            part: part.name.clone(),
            limit,
        })?;
        debug!("{}: {} text nodes", part.name, nodes.len() - before);
    }

    if options.include_headers_footers && header_footer_parts == 0 {
        warn!("Headers and footers requested but the document has none");
    }
    Ok(nodes)
}

/// Pre-order walk from `start`, calling `visit` with each text node and the
/// number of text boxes around it. Fails with the limit when exceeded.
fn walk_part(
    tree: &XmlTree,
    start: NodeId,
    max_depth: usize,
    mut visit: impl FnMut(NodeId, usize),
) -> Result<(), usize> {
    let mut stack = vec![(start, 0usize)];
    while let Some((id, depth)) = stack.pop() {
        let Some(node) = tree.node(id) else {
            continue;
        };
        let child_depth = match &node.data {
            NodeData::Text(_) => {
                visit(id, depth);
                continue;
            }
            NodeData::Element(name) if name == TEXT_BOX_ELEMENT => depth + 1,
            _ => depth,
        };
        if child_depth > max_depth {
            return Err(max_depth);
        }
        stack.extend(node.children.iter().rev().map(|&child| (child, child_depth)));
    }
    Ok(())
}

fn find_element(tree: &XmlTree, name: &str) -> Option<NodeId> {
    let mut stack = vec![XmlTree::ROOT];
    while let Some(id) = stack.pop() {
        if tree.element_name(id) == Some(name) {
            return Some(id);
        }
        stack.extend(tree.children(id).iter().rev());
    }
    None
}
