//! Token-level Wade-Giles to Pinyin conversion of a plain string.
//!
//! ## Pass order
//!
//! 1. **Artifact repair**: `ii` → `ü` where an [`ArtifactRule`] matches.
//! 2. **Scanning**: words and hyphen groups (see [`tokenize`]).
//! 3. **Compounds**: the longest run of hyphen-joined syllables inside a group
//!    that reads as a given name is merged without hyphens (`Tse-tung` →
//!    `Zedong`).
//! 4. **Single tokens**: postal names first, then syllables, subject to the
//!    exclusion and context-sensitive policy unless `aggressive` is set.
//!
//! Everything that is not part of a converted token is copied through
//! verbatim, so whitespace, punctuation and digits never move.
//!
//! [`ArtifactRule`]: crate::lexicon::ArtifactRule

pub mod case;
pub mod normalize;
pub mod tokenize;

use crate::lexicon::Lexicon;
use case::CasePattern;
use normalize::{lookup_key, split_possessive};

/// Converts strings against a borrowed [`Lexicon`].
///
/// Holds no state between calls; construct one per run or per thread.
#[derive(Debug, Clone, Copy)]
pub struct TokenMatcher<'a> {
    lexicon: &'a Lexicon,
}

/// One scanned word, split into the part looked up and any possessive tail.
#[derive(Debug)]
struct Token<'t> {
    source: &'t str,
    suffix: &'t str,
    key: String,
    case: CasePattern,
}

impl<'t> Token<'t> {
    fn new(source: &'t str, lexicon: &Lexicon) -> Self {
        let key = lookup_key(source);
        if lexicon.syllable(&key).is_none() && lexicon.postal(&key).is_none() {
            if let Some((stem, suffix)) = split_possessive(source) {
                return Self {
                    source,
                    suffix,
                    key: lookup_key(stem),
                    case: CasePattern::of(stem),
                };
            }
        }
        Self {
            source,
            suffix: "",
            key,
            case: CasePattern::of(source),
        }
    }

    fn render(&self, target: &str) -> String {
        let mut out = self.case.apply(target);
        out.push_str(self.suffix);
        out
    }
}

impl<'a> TokenMatcher<'a> {
    pub fn new(lexicon: &'a Lexicon) -> Self {
        Self { lexicon }
    }

    /// Convert every recognised Wade-Giles token in `text`.
    ///
    /// With `aggressive` set, the English exclusion and context-sensitive
    /// policies are bypassed.
    pub fn convert(&self, text: &str, aggressive: bool) -> String {
        if text.is_empty() {
            return String::new();
        }
        let repaired = normalize::repair_artifacts(text, self.lexicon);
        let text = repaired.as_ref();

        let mut out = String::with_capacity(text.len() + text.len() / 8);
        let mut cursor = 0;
        for group in tokenize::groups(text) {
            let tokens: Vec<Token<'_>> = group
                .iter()
                .map(|range| Token::new(&text[range.clone()], self.lexicon))
                .collect();

            let mut i = 0;
            while i < tokens.len() {
                out.push_str(&text[cursor..group[i].start]);
                match self.compound_len(&tokens[i..], aggressive) {
                    Some(len) => {
                        for token in &tokens[i..i + len] {
                            self.push_compound_member(&mut out, token);
                        }
                        cursor = group[i + len - 1].end;
                        i += len;
                    }
                    None => {
                        self.push_single(&mut out, &tokens[i], aggressive);
                        cursor = group[i].end;
                        i += 1;
                    }
                }
            }
        }
        out.push_str(&text[cursor..]);
        out
    }

    /// Length of the longest compound starting at `tokens[0]`, if any.
    fn compound_len(&self, tokens: &[Token<'_>], aggressive: bool) -> Option<usize> {
        let run = tokens
            .iter()
            .take_while(|t| self.lexicon.syllable(&t.key).is_some())
            .count();
        (2..=run)
            .rev()
            .find(|&len| self.is_compound(&tokens[..len], aggressive))
    }

    fn is_compound(&self, span: &[Token<'_>], aggressive: bool) -> bool {
        if span.iter().any(|t| t.case.has_uppercase()) {
            return true;
        }
        let respelled = span
            .iter()
            .any(|t| self.lexicon.syllable(&t.key) != Some(t.key.as_str()));
        let excluded = !aggressive && span.iter().any(|t| self.lexicon.is_excluded(&t.key));
        respelled && !excluded
    }

    fn push_compound_member(&self, out: &mut String, token: &Token<'_>) {
        match self.lexicon.syllable(&token.key) {
            Some(target) => out.push_str(&token.render(target)),
            None => out.push_str(token.source),
        }
    }

    fn push_single(&self, out: &mut String, token: &Token<'_>, aggressive: bool) {
        if let Some(target) = self.lexicon.postal(&token.key) {
            out.push_str(&token.render(target));
            return;
        }
        let Some(target) = self.lexicon.syllable(&token.key) else {
            out.push_str(token.source);
            return;
        };
        if !aggressive {
            let english = self.lexicon.is_context_sensitive(&token.key)
                || (self.lexicon.is_excluded(&token.key) && !token.case.has_uppercase());
            if english {
                out.push_str(token.source);
                return;
            }
        }
        out.push_str(&token.render(target));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn convert(text: &str) -> String {
        let lex = Lexicon::standard().unwrap();
        TokenMatcher::new(&lex).convert(text, false)
    }

    fn convert_aggressive(text: &str) -> String {
        let lex = Lexicon::standard().unwrap();
        TokenMatcher::new(&lex).convert(text, true)
    }

    #[test]
    fn aspirated_syllable_in_every_case() {
        assert_eq!(convert("Ch'ing"), "Qing");
        assert_eq!(convert("ch'ing"), "qing");
        assert_eq!(convert("CH'ING"), "QING");
        assert_eq!(convert("Ch’ing"), "Qing");
    }

    #[test]
    fn lowercase_english_words_are_kept() {
        assert_eq!(convert("to market"), "to market");
        assert_eq!(convert("the tang of lemon"), "the tang of lemon");
    }

    #[test]
    fn capitalised_excluded_word_is_converted() {
        assert_eq!(convert("Sung Dynasty"), "Song Dynasty");
        assert_eq!(convert("T'ang"), "Tang");
    }

    #[test]
    fn aggressive_bypasses_exclusions() {
        assert_eq!(convert_aggressive("to"), "duo");
        assert_eq!(convert_aggressive("i"), "yi");
    }

    #[test]
    fn context_sensitive_words_need_aggressive() {
        assert_eq!(convert("I saw a man"), "I saw a man");
        assert_eq!(convert("O"), "O");
    }

    #[test]
    fn compound_given_name() {
        assert_eq!(convert("Mao Tse-tung"), "Mao Zedong");
        assert_eq!(convert("Teng Hsiao-p'ing"), "Deng Xiaoping");
        assert_eq!(convert("TSE-TUNG"), "ZEDONG");
    }

    #[test]
    fn english_hyphenation_is_untouched() {
        assert_eq!(convert("well-known"), "well-known");
        assert_eq!(convert("a so-so result"), "a so-so result");
    }

    #[test]
    fn postal_names() {
        assert_eq!(convert("Peking"), "Beijing");
        assert_eq!(convert("peking"), "beijing");
        assert_eq!(convert("Flights to Canton."), "Flights to Guangzhou.");
    }

    #[test]
    fn artifact_repair_feeds_lookup() {
        assert_eq!(convert("chii"), "ju");
        assert_eq!(convert("ch'ii"), "qu");
        assert_eq!(convert("Hsiieh"), "Xue");
    }

    #[test]
    fn umlaut_forms() {
        assert_eq!(convert("Hsü"), "Xu");
        assert_eq!(convert("hsu\u{308}eh"), "xue");
        assert_eq!(convert("Hsueh"), "Xue");
    }

    #[test]
    fn possessive_keeps_suffix() {
        assert_eq!(convert("Chou's army"), "Zhou's army");
        assert_eq!(convert("Peking’s walls"), "Beijing’s walls");
    }

    #[test]
    fn artifact_repair_sees_through_possessive() {
        assert_eq!(convert("Hsiieh's book"), "Xue's book");
        assert_eq!(convert("Chii's"), "Ju's");
    }

    #[test]
    fn punctuation_and_spacing_preserved() {
        assert_eq!(
            convert("  (Ch'ing, 1644–1912)\tand  Ming."),
            "  (Qing, 1644–1912)\tand  Ming."
        );
    }

    #[test]
    fn unknown_words_pass_through() {
        assert_eq!(convert("Hello, world!"), "Hello, world!");
        assert_eq!(convert(""), "");
        assert_eq!(convert("skiing in Hawaii"), "skiing in Hawaii");
    }

    #[test]
    fn split_possessive_requires_stem() {
        assert_eq!(split_possessive("Mao's"), Some(("Mao", "'s")));
        assert_eq!(split_possessive("'s"), None);
        assert_eq!(split_possessive("mass"), None);
    }
}
