//! Lookup-key normalisation and the PDF-artifact repair pass.

use super::tokenize;
use crate::lexicon::Lexicon;
use std::borrow::Cow;

/// Characters used in the wild as the Wade-Giles aspiration mark.
pub const APOSTROPHES: [char; 7] = [
    '\'', '\u{2019}', '\u{2018}', '`', '\u{00B4}', '\u{02BC}', '\u{02BB}',
];

const COMBINING_DIAERESIS: char = '\u{0308}';

pub fn is_apostrophe(c: char) -> bool {
    APOSTROPHES.contains(&c)
}

/// The lexicon key for a token: lowercase, ASCII apostrophe, composed `ü`.
pub fn lookup_key(token: &str) -> String {
    let mut key = String::with_capacity(token.len());
    let mut chars = token.chars().peekable();
    while let Some(c) = chars.next() {
        if is_apostrophe(c) {
            key.push('\'');
        } else if matches!(c, 'u' | 'U') && chars.peek() == Some(&COMBINING_DIAERESIS) {
            chars.next();
            key.push('ü');
        } else {
            key.extend(c.to_lowercase());
        }
    }
    key
}

/// Rewrite PDF-extraction `ii` back to `ü` in every word an [`ArtifactRule`]
/// matches. Runs before any lexicon lookup.
///
/// [`ArtifactRule`]: crate::lexicon::ArtifactRule
pub fn repair_artifacts<'a>(text: &'a str, lexicon: &Lexicon) -> Cow<'a, str> {
    if lexicon.artifact_rules().is_empty() || !has_double_i(text) {
        return Cow::Borrowed(text);
    }

    let mut out = String::with_capacity(text.len());
    let mut cursor = 0;
    for range in tokenize::words(text) {
        let word = &text[range.clone()];
        let key = lookup_key(word);
        // A possessive tail hides the final: `Hsiieh's` is located on `hsiieh`.
        let stem_key = split_possessive(word).map(|(stem, _)| lookup_key(stem));
        let Some(rule) = lexicon.artifact_rules().iter().find(|rule| {
            rule.locate(&key).is_some()
                || stem_key.as_deref().is_some_and(|k| rule.locate(k).is_some())
        }) else {
            continue;
        };

        // The cluster is ASCII plus at most one apostrophe, so its char count
        // is the same in the key and the source word.
        let skip = rule.cluster().chars().count();
        let mut tail = word.char_indices().skip(skip);
        let (Some((at, first)), Some((_, second))) = (tail.next(), tail.next()) else {
            continue;
        };

        out.push_str(&text[cursor..range.start + at]);
        out.push(if first.is_uppercase() { 'Ü' } else { 'ü' });
        cursor = range.start + at + first.len_utf8() + second.len_utf8();
    }

    if cursor == 0 {
        return Cow::Borrowed(text);
    }
    out.push_str(&text[cursor..]);
    Cow::Owned(out)
}

/// `("Mao", "'s")` for `"Mao's"`; `None` when there is no possessive tail.
pub fn split_possessive(word: &str) -> Option<(&str, &str)> {
    let mut rev = word.char_indices().rev();
    let (_, s) = rev.next()?;
    let (at, apostrophe) = rev.next()?;
    (matches!(s, 's' | 'S') && is_apostrophe(apostrophe) && at > 0)
        .then(|| word.split_at(at))
}

fn has_double_i(text: &str) -> bool {
    text.as_bytes()
        .windows(2)
        .any(|w| w[0].eq_ignore_ascii_case(&b'i') && w[1].eq_ignore_ascii_case(&b'i'))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lexicon() -> Lexicon {
        Lexicon::standard().unwrap()
    }

    #[test]
    fn key_normalises_apostrophes_and_case() {
        assert_eq!(lookup_key("Ch’ing"), "ch'ing");
        assert_eq!(lookup_key("T`ANG"), "t'ang");
        assert_eq!(lookup_key("HSU\u{308}"), "hsü");
        assert_eq!(lookup_key("Lü"), "lü");
    }

    #[test]
    fn repairs_consonant_cluster_artifacts() {
        let lex = lexicon();
        assert_eq!(repair_artifacts("chii", &lex), "chü");
        assert_eq!(repair_artifacts("Ch'iian", &lex), "Ch'üan");
        assert_eq!(repair_artifacts("HSIIEH", &lex), "HSÜEH");
        assert_eq!(repair_artifacts("Yiin and lii", &lex), "Yün and lü");
    }

    #[test]
    fn repairs_artifacts_before_possessive_tail() {
        let lex = lexicon();
        assert_eq!(repair_artifacts("Hsiieh's book", &lex), "Hsüeh's book");
        assert_eq!(repair_artifacts("LII’S", &lex), "LÜ’S");
        assert_eq!(repair_artifacts("skiing's", &lex), "skiing's");
    }

    #[test]
    fn leaves_english_double_i_alone() {
        let lex = lexicon();
        assert!(matches!(
            repair_artifacts("skiing in Hawaii", &lex),
            Cow::Borrowed(_)
        ));
        // "niin" is not a listed final for n.
        assert_eq!(repair_artifacts("niin", &lex), "niin");
    }

    #[test]
    fn text_without_double_i_is_borrowed() {
        let lex = lexicon();
        assert!(matches!(repair_artifacts("Mao Tse-tung", &lex), Cow::Borrowed(_)));
    }
}
