//! Immutable conversion tables.
//!
//! A [`Lexicon`] bundles every table the matcher consults: the syllable map,
//! the whole-word postal map, the English exclusion set, the context-sensitive
//! set and the PDF-artifact rules. It is validated once in
//! [`LexiconBuilder::build`] and read-only afterwards, so one instance can be
//! shared (behind an `Arc`) by any number of conversion runs.
//!
//! [`Lexicon::standard`] builds the tables shipped in [`tables`]; tests and
//! embedders can assemble smaller or alternative lexicons through
//! [`Lexicon::builder`].

pub mod tables;

use crate::error::Wg2PyError;
use std::collections::{HashMap, HashSet};
use tracing::debug;

/// A systematic PDF-extraction corruption where `ü` comes out as `ii`.
///
/// The rule fires only on a whole token made of `cluster + "ii" + final`,
/// for one of the listed finals, so English words such as "skiing" or
/// "Hawaii" are never touched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArtifactRule {
    cluster: String,
    finals: Vec<String>,
}

impl ArtifactRule {
    pub fn new<I, S>(cluster: impl Into<String>, finals: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            cluster: cluster.into(),
            finals: finals.into_iter().map(Into::into).collect(),
        }
    }

    /// The initial consonant cluster, e.g. `"ch'"` or `"hs"`.
    pub fn cluster(&self) -> &str {
        &self.cluster
    }

    /// Byte offset of the corrupted `ii` when `key` matches this rule.
    ///
    /// `key` must already be lowercased with normalised apostrophes.
    pub fn locate(&self, key: &str) -> Option<usize> {
        let rest = key.strip_prefix(self.cluster.as_str())?;
        let fin = rest.strip_prefix("ii")?;
        self.finals
            .iter()
            .any(|f| f == fin)
            .then_some(self.cluster.len())
    }

    /// The syllables this rule produces once `ii` is read as `ü`.
    pub fn normalised_forms(&self) -> impl Iterator<Item = String> + '_ {
        self.finals
            .iter()
            .map(move |f| format!("{}ü{}", self.cluster, f))
    }
}

/// The validated, read-only table set used by the token matcher.
#[derive(Debug, Clone)]
pub struct Lexicon {
    syllables: HashMap<String, String>,
    postal: HashMap<String, String>,
    exclusions: HashSet<String>,
    context_sensitive: HashSet<String>,
    artifact_rules: Vec<ArtifactRule>,
}

impl Lexicon {
    /// Build the standard Wade-Giles tables.
    pub fn standard() -> Result<Self, Wg2PyError> {
        Self::builder()
            .syllables(tables::SYLLABLES.iter().copied())
            .variants(tables::VARIANTS.iter().copied())
            .postal_names(tables::POSTAL.iter().copied())
            .exclusions(tables::ENGLISH_EXCLUSIONS.iter().copied())
            .context_sensitive(tables::CONTEXT_SENSITIVE.iter().copied())
            .artifact_rules(
                tables::ARTIFACT_RULES
                    .iter()
                    .map(|(cluster, finals)| ArtifactRule::new(*cluster, finals.iter().copied())),
            )
            .build()
    }

    /// Start an empty lexicon.
    pub fn builder() -> LexiconBuilder {
        LexiconBuilder::default()
    }

    /// Pinyin for a syllable key.
    pub fn syllable(&self, key: &str) -> Option<&str> {
        self.syllables.get(key).map(String::as_str)
    }

    /// Modern name for a postal-romanization key.
    pub fn postal(&self, key: &str) -> Option<&str> {
        self.postal.get(key).map(String::as_str)
    }

    pub fn is_excluded(&self, key: &str) -> bool {
        self.exclusions.contains(key)
    }

    pub fn is_context_sensitive(&self, key: &str) -> bool {
        self.context_sensitive.contains(key)
    }

    pub fn artifact_rules(&self) -> &[ArtifactRule] {
        &self.artifact_rules
    }

    pub fn syllable_count(&self) -> usize {
        self.syllables.len()
    }

    pub fn postal_count(&self) -> usize {
        self.postal.len()
    }
}

/// Builder for [`Lexicon`]. Tables are validated together in [`build`](Self::build).
#[derive(Debug, Default)]
pub struct LexiconBuilder {
    syllables: Vec<(String, String)>,
    variants: Vec<(String, String)>,
    postal: Vec<(String, String)>,
    exclusions: Vec<String>,
    context_sensitive: Vec<String>,
    artifact_rules: Vec<ArtifactRule>,
    require_idempotent: bool,
}

impl LexiconBuilder {
    pub fn syllable(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.syllables.push((key.into(), value.into()));
        self
    }

    pub fn syllables<I, K, V>(mut self, entries: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        self.syllables
            .extend(entries.into_iter().map(|(k, v)| (k.into(), v.into())));
        self
    }

    /// Alternative spellings; merged only for keys the syllable table lacks.
    pub fn variants<I, K, V>(mut self, entries: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        self.variants
            .extend(entries.into_iter().map(|(k, v)| (k.into(), v.into())));
        self
    }

    pub fn postal_name(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.postal.push((key.into(), value.into()));
        self
    }

    pub fn postal_names<I, K, V>(mut self, entries: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        self.postal
            .extend(entries.into_iter().map(|(k, v)| (k.into(), v.into())));
        self
    }

    pub fn exclusions<I, S>(mut self, words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.exclusions.extend(words.into_iter().map(Into::into));
        self
    }

    pub fn context_sensitive<I, S>(mut self, words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.context_sensitive
            .extend(words.into_iter().map(Into::into));
        self
    }

    pub fn artifact_rule(mut self, rule: ArtifactRule) -> Self {
        self.artifact_rules.push(rule);
        self
    }

    pub fn artifact_rules(mut self, rules: impl IntoIterator<Item = ArtifactRule>) -> Self {
        self.artifact_rules.extend(rules);
        self
    }

    /// Reject entries whose value is itself a key with a different conversion.
    ///
    /// With this set, converting already-converted text is always a no-op.
    pub fn require_idempotent(mut self, v: bool) -> Self {
        self.require_idempotent = v;
        self
    }

    /// Validate every table and freeze them into a [`Lexicon`].
    pub fn build(self) -> Result<Lexicon, Wg2PyError> {
        let mut syllables = collect_unique("syllable", self.syllables)?;

        let mut variant_keys = HashSet::new();
        for (key, value) in self.variants {
            validate_entry("variant", &key, &value)?;
            if !variant_keys.insert(key.clone()) {
                return Err(Wg2PyError::DuplicateKey {
                    table: "variant",
                    key,
                });
            }
            syllables.entry(key).or_insert(value);
        }

        let postal = collect_unique("postal", self.postal)?;
        for (key, value) in &postal {
            if let Some(existing) = syllables.get(key) {
                if existing != value {
                    return Err(Wg2PyError::ConflictingKey {
                        key: key.clone(),
                        first: existing.clone(),
                        second: value.clone(),
                    });
                }
            }
        }

        let exclusions = collect_words("exclusion", self.exclusions, &syllables)?;
        let context_sensitive =
            collect_words("context-sensitive", self.context_sensitive, &syllables)?;

        for rule in &self.artifact_rules {
            for form in rule.normalised_forms() {
                if !syllables.contains_key(&form) {
                    return Err(Wg2PyError::InvalidEntry {
                        table: "artifact",
                        key: format!("{}ii", rule.cluster()),
                        reason: format!("normalises to '{form}', which is not a syllable"),
                    });
                }
            }
        }

        if self.require_idempotent {
            for (key, value) in syllables.iter().chain(postal.iter()) {
                if key == value {
                    continue;
                }
                let chained = syllables.get(value).or_else(|| postal.get(value));
                if chained.is_some_and(|next| next != value) {
                    return Err(Wg2PyError::NonIdempotentEntry {
                        key: key.clone(),
                        value: value.clone(),
                    });
                }
            }
        }

        debug!(
            "Lexicon built: {} syllables, {} postal names, {} exclusions",
            syllables.len(),
            postal.len(),
            exclusions.len()
        );

        Ok(Lexicon {
            syllables,
            postal,
            exclusions,
            context_sensitive,
            artifact_rules: self.artifact_rules,
        })
    }
}

fn collect_unique(
    table: &'static str,
    entries: Vec<(String, String)>,
) -> Result<HashMap<String, String>, Wg2PyError> {
    let mut map = HashMap::with_capacity(entries.len());
    for (key, value) in entries {
        validate_entry(table, &key, &value)?;
        if map.contains_key(&key) {
            return Err(Wg2PyError::DuplicateKey { table, key });
        }
        map.insert(key, value);
    }
    Ok(map)
}

fn collect_words(
    table: &'static str,
    words: Vec<String>,
    syllables: &HashMap<String, String>,
) -> Result<HashSet<String>, Wg2PyError> {
    let mut set = HashSet::with_capacity(words.len());
    for word in words {
        if !syllables.contains_key(&word) {
            return Err(Wg2PyError::InvalidEntry {
                table,
                key: word,
                reason: "not a syllable key".into(),
            });
        }
        if !set.insert(word.clone()) {
            return Err(Wg2PyError::DuplicateKey { table, key: word });
        }
    }
    Ok(set)
}

fn validate_entry(table: &'static str, key: &str, value: &str) -> Result<(), Wg2PyError> {
    let invalid = |reason: &str| Wg2PyError::InvalidEntry {
        table,
        key: key.to_string(),
        reason: reason.to_string(),
    };

    if key.is_empty() {
        return Err(invalid("empty key"));
    }
    if value.is_empty() {
        return Err(invalid("empty value"));
    }
    if !key
        .chars()
        .all(|c| c.is_ascii_lowercase() || c == 'ü' || c == '\'')
    {
        return Err(invalid("keys are lowercase letters, 'ü' and apostrophes"));
    }
    // An apostrophe marks aspiration of the consonant before it.
    let bytes = key.as_bytes();
    for (i, b) in bytes.iter().enumerate() {
        if *b == b'\'' && (i == 0 || i + 1 == bytes.len() || bytes[i - 1] == b'\'') {
            return Err(invalid("apostrophe must sit between letters"));
        }
    }
    if value.chars().any(|c| c.is_uppercase() || c.is_whitespace()) {
        return Err(invalid("values are lowercase without whitespace"));
    }
    Ok(())
}
