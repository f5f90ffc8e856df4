//! Word and hyphen-group scanning.
//!
//! A word is a maximal run of letters (combining marks included) with
//! internal apostrophes, so aspirated syllables like `ch'a` stay whole. Words
//! separated by exactly one hyphen character form a group; groups are where
//! compound given names such as `Tse-tung` can be recognised.

use super::normalize::is_apostrophe;
use std::ops::Range;

/// Characters that join the syllables of a compound name.
pub const HYPHENS: [char; 3] = ['-', '\u{2010}', '\u{2011}'];

fn is_letter(c: char) -> bool {
    c.is_alphabetic() || ('\u{0300}'..='\u{036F}').contains(&c)
}

/// Byte ranges of every word in `text`, left to right.
pub fn words(text: &str) -> Vec<Range<usize>> {
    let mut out = Vec::new();
    let mut start: Option<usize> = None;
    let mut chars = text.char_indices().peekable();

    while let Some((i, c)) = chars.next() {
        if is_letter(c) {
            start.get_or_insert(i);
            continue;
        }
        if let Some(s) = start {
            if is_apostrophe(c) && chars.peek().is_some_and(|&(_, next)| is_letter(next)) {
                continue;
            }
            out.push(s..i);
            start = None;
        }
    }
    if let Some(s) = start {
        out.push(s..text.len());
    }
    out
}

/// Words of `text` grouped by single-hyphen joins.
///
/// Every word belongs to exactly one group; a word with no hyphenated
/// neighbour is a group of one.
pub fn groups(text: &str) -> Vec<Vec<Range<usize>>> {
    let mut out: Vec<Vec<Range<usize>>> = Vec::new();
    for word in words(text) {
        let joined = out
            .last()
            .and_then(|group| group.last())
            .is_some_and(|prev| is_single_hyphen(&text[prev.end..word.start]));
        match out.last_mut() {
            Some(group) if joined => group.push(word),
            _ => out.push(vec![word]),
        }
    }
    out
}

fn is_single_hyphen(gap: &str) -> bool {
    let mut chars = gap.chars();
    matches!((chars.next(), chars.next()), (Some(c), None) if HYPHENS.contains(&c))
}
