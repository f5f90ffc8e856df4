//! Case projection from a source token onto its replacement.

/// The capitalisation shape of a token, judged on its letters only.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CasePattern {
    /// No uppercase letters.
    Lower,
    /// First letter uppercase, every other letter lowercase.
    Capitalized,
    /// Every letter uppercase (two or more letters).
    Upper,
    /// Anything else, e.g. "mcChing".
    Mixed,
}

impl CasePattern {
    pub fn of(token: &str) -> Self {
        let mut letters = token.chars().filter(|c| c.is_alphabetic());
        let Some(first) = letters.next() else {
            return CasePattern::Lower;
        };
        let mut rest_upper = 0usize;
        let mut rest_lower = 0usize;
        for c in letters {
            if c.is_uppercase() {
                rest_upper += 1;
            } else {
                rest_lower += 1;
            }
        }

        match (first.is_uppercase(), rest_upper, rest_lower) {
            (false, 0, _) => CasePattern::Lower,
            (true, 0, _) => CasePattern::Capitalized,
            (true, _, 0) => CasePattern::Upper,
            _ => CasePattern::Mixed,
        }
    }

    /// True when the token contains at least one uppercase letter.
    pub fn has_uppercase(self) -> bool {
        self != CasePattern::Lower
    }

    /// Rewrite `target` (lowercase Pinyin) in this pattern.
    pub fn apply(self, target: &str) -> String {
        match self {
            CasePattern::Capitalized => {
                let mut chars = target.chars();
                match chars.next() {
                    Some(first) => first
                        .to_uppercase()
                        .chain(chars.flat_map(char::to_lowercase))
                        .collect(),
                    None => String::new(),
                }
            }
            CasePattern::Upper => target.to_uppercase(),
            CasePattern::Lower | CasePattern::Mixed => target.to_lowercase(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn detects_patterns() {
        assert_eq!(CasePattern::of("ch'ing"), CasePattern::Lower);
        assert_eq!(CasePattern::of("Ch'ing"), CasePattern::Capitalized);
        assert_eq!(CasePattern::of("CH'ING"), CasePattern::Upper);
        assert_eq!(CasePattern::of("cH'ing"), CasePattern::Mixed);
        assert_eq!(CasePattern::of("I"), CasePattern::Capitalized);
        assert_eq!(CasePattern::of("HSÜ"), CasePattern::Upper);
    }

    #[test]
    fn projects_onto_replacement() {
        assert_eq!(CasePattern::Capitalized.apply("qing"), "Qing");
        assert_eq!(CasePattern::Upper.apply("qing"), "QING");
        assert_eq!(CasePattern::Lower.apply("qing"), "qing");
        assert_eq!(CasePattern::Mixed.apply("qing"), "qing");
        assert_eq!(CasePattern::Upper.apply("lü"), "LÜ");
    }

    #[test]
    fn empty_target() {
        assert_eq!(CasePattern::Capitalized.apply(""), "");
    }
}
