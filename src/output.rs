//! Result types returned by document conversion.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Outcome of a successful [`crate::convert::Converter::convert_document`] call.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConversionOutput {
    /// Where the converted document was written.
    pub output_path: PathBuf,
    pub stats: ConversionStats,
}

/// Counters for one conversion run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConversionStats {
    /// Text nodes in body paragraphs (tables included).
    pub body_nodes: usize,
    /// Text nodes inside text boxes, at any nesting depth.
    pub nested_nodes: usize,
    /// Text nodes in header and footer parts.
    pub header_footer_nodes: usize,
    /// Nodes whose text was changed by the matcher.
    pub changed_nodes: usize,
    /// Wall-clock time for open + convert + save.
    pub total_duration_ms: u64,
}

impl ConversionStats {
    /// Every node visited in this run.
    pub fn total_nodes(&self) -> usize {
        self.body_nodes + self.nested_nodes + self.header_footer_nodes
    }
}
