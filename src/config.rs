//! Configuration types for Wade-Giles to Pinyin conversion.
//!
//! All conversion behaviour is controlled through [`ConversionConfig`], built
//! via its [`ConversionConfigBuilder`]. The lexicon is not part
//! of the config: it is an immutable table set owned by
//! [`crate::convert::Converter`] and can be shared between runs.

use crate::error::Wg2PyError;
use crate::progress::ProgressCallback;
use std::fmt;

/// Default suffix inserted before the extension of a derived output path.
pub const DEFAULT_OUTPUT_SUFFIX: &str = "_pinyin";

/// Default limit on text-box nesting.
pub const DEFAULT_MAX_CONTAINER_DEPTH: usize = 16;

/// Configuration for a conversion run.
///
/// Built via [`ConversionConfig::builder()`] or using
/// [`ConversionConfig::default()`].
///
/// # Example
/// ```rust
/// use wg2pinyin::ConversionConfig;
///
/// let config = ConversionConfig::builder()
///     .aggressive(true)
///     .output_suffix("_py")
///     .build()
///     .unwrap();
/// assert!(config.aggressive);
/// ```
#[derive(Clone)]
pub struct ConversionConfig {
    /// Convert words in the English exclusion list even when lowercase. Default: false.
    ///
    /// Lowercase "to", "no", "lung", "tang" and friends are far more often
    /// English than Chinese. Capitalised occurrences are converted either way.
    pub aggressive: bool,

    /// Suffix inserted before the extension when no destination is given.
    /// Default: `"_pinyin"` (`report.docx` → `report_pinyin.docx`).
    pub output_suffix: String,

    /// Also convert text in header and footer parts. Default: false.
    pub include_headers_footers: bool,

    /// Maximum nesting of text boxes inside text boxes. Default: 16.
    ///
    /// Documents beyond the limit are rejected rather than partially converted.
    pub max_container_depth: usize,

    /// Optional per-node progress events.
    pub progress_callback: Option<ProgressCallback>,
}

impl Default for ConversionConfig {
    fn default() -> Self {
        Self {
            aggressive: false,
            output_suffix: DEFAULT_OUTPUT_SUFFIX.to_string(),
            include_headers_footers: false,
            max_container_depth: DEFAULT_MAX_CONTAINER_DEPTH,
            progress_callback: None,
        }
    }
}

impl fmt::Debug for ConversionConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConversionConfig")
            .field("aggressive", &self.aggressive)
            .field("output_suffix", &self.output_suffix)
            .field("include_headers_footers", &self.include_headers_footers)
            .field("max_container_depth", &self.max_container_depth)
            .field(
                "progress_callback",
                &self
                    .progress_callback
                    .as_ref()
                    .map(|_| "<dyn ConversionProgressCallback>"),
            )
            .finish()
    }
}

impl ConversionConfig {
    /// Create a new builder for `ConversionConfig`.
    pub fn builder() -> ConversionConfigBuilder {
        ConversionConfigBuilder {
            config: Self::default(),
        }
    }
}

/// Builder for [`ConversionConfig`].
#[derive(Debug)]
pub struct ConversionConfigBuilder {
    config: ConversionConfig,
}

impl ConversionConfigBuilder {
    pub fn aggressive(mut self, v: bool) -> Self {
        self.config.aggressive = v;
        self
    }

    pub fn output_suffix(mut self, suffix: impl Into<String>) -> Self {
        self.config.output_suffix = suffix.into();
        self
    }

    pub fn include_headers_footers(mut self, v: bool) -> Self {
        self.config.include_headers_footers = v;
        self
    }

    pub fn max_container_depth(mut self, depth: usize) -> Self {
        self.config.max_container_depth = depth;
        self
    }

    pub fn progress_callback(mut self, cb: ProgressCallback) -> Self {
        self.config.progress_callback = Some(cb);
        self
    }

    /// Build the configuration, validating constraints.
    pub fn build(self) -> Result<ConversionConfig, Wg2PyError> {
        let c = &self.config;
        if c.output_suffix.is_empty() {
            return Err(Wg2PyError::InvalidConfig(
                "Output suffix must not be empty".into(),
            ));
        }
        if c.output_suffix.contains(['/', '\\']) {
            return Err(Wg2PyError::InvalidConfig(format!(
                "Output suffix must not contain a path separator, got '{}'",
                c.output_suffix
            )));
        }
        if c.max_container_depth == 0 {
            return Err(Wg2PyError::InvalidConfig(
                "Container depth limit must be ≥ 1".into(),
            ));
        }
        Ok(self.config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::progress::NoopProgressCallback;
    use std::sync::Arc;

    #[test]
    fn defaults() {
        let c = ConversionConfig::default();
        assert!(!c.aggressive);
        assert_eq!(c.output_suffix, "_pinyin");
        assert!(!c.include_headers_footers);
        assert_eq!(c.max_container_depth, 16);
        assert!(c.progress_callback.is_none());
    }

    #[test]
    fn builder_sets_fields() {
        let c = ConversionConfig::builder()
            .aggressive(true)
            .output_suffix("-py")
            .include_headers_footers(true)
            .max_container_depth(3)
            .progress_callback(Arc::new(NoopProgressCallback))
            .build()
            .unwrap();
        assert!(c.aggressive);
        assert_eq!(c.output_suffix, "-py");
        assert!(c.include_headers_footers);
        assert_eq!(c.max_container_depth, 3);
        assert!(c.progress_callback.is_some());
    }

    #[test]
    fn empty_suffix_rejected() {
        let err = ConversionConfig::builder().output_suffix("").build().unwrap_err();
        assert!(matches!(err, Wg2PyError::InvalidConfig(_)));
    }

    #[test]
    fn separator_in_suffix_rejected() {
        let err = ConversionConfig::builder()
            .output_suffix("out/x")
            .build()
            .unwrap_err();
        assert!(err.to_string().contains("path separator"));
    }

    #[test]
    fn zero_depth_rejected() {
        assert!(ConversionConfig::builder()
            .max_container_depth(0)
            .build()
            .is_err());
    }

    #[test]
    fn debug_hides_callback() {
        let c = ConversionConfig::builder()
            .progress_callback(Arc::new(NoopProgressCallback))
            .build()
            .unwrap();
        let s = format!("{c:?}");
        assert!(s.contains("<dyn ConversionProgressCallback>"));
    }
}
