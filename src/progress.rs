//! Progress-callback trait for per-node conversion events.
//!
//! Inject an [`Arc<dyn ConversionProgressCallback>`] via
//! [`crate::config::ConversionConfigBuilder::progress_callback`] to receive
//! events as the orchestrator rewrites each text node of a document.
//!
//! # Example
//!
//! ```rust
//! use wg2pinyin::{ConversionProgressCallback, ConversionConfig};
//! use std::sync::{Arc, atomic::{AtomicUsize, Ordering}};
//!
//! struct ChangedCounter {
//!     changed: AtomicUsize,
//! }
//!
//! impl ConversionProgressCallback for ChangedCounter {
//!     fn on_node_converted(&self, _index: usize, _total: usize, changed: bool) {
//!         if changed {
//!             self.changed.fetch_add(1, Ordering::SeqCst);
//!         }
//!     }
//! }
//!
//! let counter = Arc::new(ChangedCounter { changed: AtomicUsize::new(0) });
//!
//! let config = ConversionConfig::builder()
//!     .progress_callback(counter as Arc<dyn ConversionProgressCallback>)
//!     .build()
//!     .unwrap();
//! ```

use std::sync::Arc;

/// Called by the orchestrator as it processes each text node.
///
/// All methods have default no-op implementations so callers only override
/// what they care about. Conversion is single-threaded, but the trait is
/// `Send + Sync` so one callback can be shared by converters on several
/// threads.
pub trait ConversionProgressCallback: Send + Sync {
    /// Called once after the document has been walked, before any node is
    /// rewritten.
    fn on_conversion_start(&self, total_nodes: usize) {
        let _ = total_nodes;
    }

    /// Called after each node's text has been passed through the matcher.
    ///
    /// # Arguments
    /// * `index`  : 1-indexed position in document order
    /// * `total`  : total nodes in this run
    /// * `changed`: whether the text differs from the original
    fn on_node_converted(&self, index: usize, total: usize, changed: bool) {
        let _ = (index, total, changed);
    }

    /// Called once after every node has been visited and the output saved.
    fn on_conversion_complete(&self, total_nodes: usize, changed_nodes: usize) {
        let _ = (total_nodes, changed_nodes);
    }
}

/// A no-op implementation for callers that don't need progress events.
pub struct NoopProgressCallback;

impl ConversionProgressCallback for NoopProgressCallback {}

/// Convenience alias matching the type stored in [`crate::config::ConversionConfig`].
pub type ProgressCallback = Arc<dyn ConversionProgressCallback>;
