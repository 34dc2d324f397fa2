use crate::traits::Matcher;

/// Default penalty added to the fuzziness term for every query character
/// that cannot be found in the candidate.
pub const DEFAULT_FUZZ: f64 = 0.5;

const CONSECUTIVE_SCORE: f64 = 0.7;
const SCATTERED_SCORE: f64 = 0.1;
const ACRONYM_BONUS: f64 = 0.8;
const CASE_BONUS: f64 = 0.1;
const PREFIX_BONUS: f64 = 0.15;
const PREFIX_BONUS_CEILING: f64 = 0.85;

/// Scores how well `query` approximately occurs inside `candidate`.
///
/// Query characters are consumed greedily and in order: each one is searched
/// case-insensitively in the part of `candidate` after the previous match, and
/// a candidate character is never used twice. Matches directly at the cursor
/// score higher than scattered ones, a scattered match right after a space
/// earns an acronym bonus, and an exact-case match earns a small bonus.
/// Every unmatched query character adds `fuzz` to the divisor.
///
/// The result is `0.0` when either string is empty and `1.0` for identical
/// strings. The score is not clamped, so callers must not assume it stays
/// at or below `1.0`.
///
/// ```rust
/// use grover::{fuzzy_score, DEFAULT_FUZZ};
///
/// assert_eq!(fuzzy_score("readme", "readme", DEFAULT_FUZZ), 1.0);
/// assert_eq!(fuzzy_score("", "readme", DEFAULT_FUZZ), 0.0);
/// assert!(fuzzy_score("rm", "readme", DEFAULT_FUZZ) < 0.5);
/// ```
pub fn fuzzy_score(query: &str, candidate: &str, fuzz: f64) -> f64 {
    if query.is_empty() || candidate.is_empty() {
        return 0.0;
    }

    if query == candidate {
        return 1.0;
    }

    let query: Vec<char> = query.chars().collect();
    let candidate: Vec<char> = candidate.chars().collect();
    let folded: Vec<char> = candidate.iter().copied().map(fold).collect();

    let mut fuzziness = 1.0;
    let mut cursor = 0;
    let mut total = 0.0;

    for &c in &query {
        let needle = fold(c);
        let Some(offset) = folded[cursor..].iter().position(|&h| h == needle) else {
            fuzziness += fuzz;
            continue;
        };

        let at = cursor + offset;
        let mut score = if offset == 0 {
            CONSECUTIVE_SCORE
        } else if candidate[at - 1] == ' ' {
            SCATTERED_SCORE + ACRONYM_BONUS
        } else {
            SCATTERED_SCORE
        };

        if candidate[at] == c {
            score += CASE_BONUS;
        }

        total += score;
        cursor = at + 1;
    }

    let mut confidence =
        0.5 * (total / query.len() as f64 + total / candidate.len() as f64) / fuzziness;

    if fold(query[0]) == folded[0] && confidence < PREFIX_BONUS_CEILING {
        confidence += PREFIX_BONUS;
    }

    confidence
}

/// Single-char lowercase mapping used for position searches.
fn fold(c: char) -> char {
    c.to_lowercase().next().unwrap_or(c)
}

/// The default [`Matcher`], backed by [`fuzzy_score`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FuzzyMatcher {
    fuzz: f64,
}

impl FuzzyMatcher {
    /// Create a matcher with the given mismatch penalty. Sensible values lie
    /// between `0.0` and `1.0`.
    pub fn new(fuzz: f64) -> Self {
        Self { fuzz }
    }

    /// The mismatch penalty this matcher applies.
    pub fn fuzz(&self) -> f64 {
        self.fuzz
    }
}

impl Default for FuzzyMatcher {
    fn default() -> Self {
        Self::new(DEFAULT_FUZZ)
    }
}

impl Matcher for FuzzyMatcher {
    fn score(&self, query: &str, candidate: &str) -> f64 {
        fuzzy_score(query, candidate, self.fuzz)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn identical_strings_score_one() {
        for q in ["a", "doc", "Makefile", "with space.txt"] {
            assert_eq!(fuzzy_score(q, q, DEFAULT_FUZZ), 1.0);
        }
    }

    #[test]
    fn empty_inputs_score_zero() {
        assert_eq!(fuzzy_score("", "readme", DEFAULT_FUZZ), 0.0);
        assert_eq!(fuzzy_score("readme", "", DEFAULT_FUZZ), 0.0);
        assert_eq!(fuzzy_score("", "", DEFAULT_FUZZ), 0.0);
    }

    #[test]
    fn consecutive_prefix_is_pinned() {
        // 3 * (0.7 + 0.1) = 2.4; 0.5 * (2.4/3 + 2.4/12) = 0.5; + 0.15 prefix
        let score = fuzzy_score("doc", "document.txt", DEFAULT_FUZZ);
        assert!(approx(score, 0.65), "got {score}");
    }

    #[test]
    fn scattered_match_scores_low() {
        // r: 0.8, m: 0.1 + 0.1 = 0.2; 0.5 * (1.0/2 + 1.0/6) + 0.15
        let score = fuzzy_score("rm", "readme", DEFAULT_FUZZ);
        assert!(score > 0.0);
        assert!(score < 0.5);
        assert!(approx(score, 0.5 * (0.5 + 1.0 / 6.0) + 0.15), "got {score}");
    }

    #[test]
    fn case_bonus_is_case_sensitive() {
        let mixed = fuzzy_score("abc", "ABC", DEFAULT_FUZZ);
        let exact = fuzzy_score("abc", "abc", DEFAULT_FUZZ);
        assert!(mixed < exact);
        assert!(approx(mixed, 0.85), "got {mixed}");
    }

    #[test]
    fn acronym_bonus_after_space() {
        let acronym = fuzzy_score("mf", "my file", DEFAULT_FUZZ);
        let plain = fuzzy_score("mf", "myxfile", DEFAULT_FUZZ);
        assert!(acronym > plain);
        // m: 0.8, f: 0.1 + 0.8 + 0.1 = 1.0; 0.5 * (1.8/2 + 1.8/7) + 0.15
        assert!(approx(acronym, 0.5 * (0.9 + 1.8 / 7.0) + 0.15), "got {acronym}");
    }

    #[test]
    fn unmatched_characters_raise_fuzziness() {
        // z is missing: total 0.8, fuzziness 1.5
        let score = fuzzy_score("dz", "doc", DEFAULT_FUZZ);
        assert!(approx(score, 0.5 * (0.8 / 2.0 + 0.8 / 3.0) / 1.5 + 0.15), "got {score}");

        let strict = fuzzy_score("dz", "doc", 1.0);
        assert!(strict < score);
    }

    #[test]
    fn order_is_preserved() {
        // "ba" cannot reuse or rewind: b at 1, then a must come after it
        let forward = fuzzy_score("ab", "ab_", DEFAULT_FUZZ);
        let backward = fuzzy_score("ba", "ab_", DEFAULT_FUZZ);
        assert!(forward > backward);
    }

    #[test]
    fn fuzzy_matcher_uses_configured_penalty() {
        let lenient = FuzzyMatcher::new(0.0);
        let default = FuzzyMatcher::default();
        assert_eq!(default.fuzz(), DEFAULT_FUZZ);
        assert!(lenient.score("dzz", "doc") > default.score("dzz", "doc"));
    }
}
