//! # Fuzzy matching
//!
//! ## Overview
//!
//! This module ranks keyword candidates against the word being typed. A
//! candidate matches when the query's characters appear in it as an in-order
//! subsequence; everything else is excluded. Matches are scored so that
//! prefix matches beat substring matches, which beat scattered subsequences,
//! with candidate length and first-match position breaking ties inside each
//! tier.
//!
//! [fuzzy_search] is a pure function: the same candidates and query always
//! produce the same ordered output, and equal scores keep the candidates'
//! first-seen order.
use unicode_segmentation::UnicodeSegmentation;

/// A keyword candidate scored against a query word.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ScoredMatch {
    /// The candidate text.
    pub text: String,

    /// The match score; higher ranks earlier.
    pub score: i64,
}

// Score tiers. Tier bonuses dwarf the per-character penalties so that a
// weaker tier can never outrank a stronger one on length alone.
const PREFIX_BONUS: i64 = 100_000;
const SUBSTRING_BONUS: i64 = 50_000;
const SUBWORD_END_BONUS: i64 = 10_000;
const LENGTH_PENALTY: i64 = 100;

/// Where the first query grapheme matches inside the candidate, if the whole
/// query appears as an in-order subsequence.
fn subsequence_start(candidate: &str, query: &str) -> Option<usize> {
    let mut wanted = query.graphemes(true);

    let mut next = match wanted.next() {
        Some(g) => g,
        None => return Some(0),
    };

    let mut first = None;

    for (idx, g) in candidate.graphemes(true).enumerate() {
        if g != next {
            continue;
        }

        if first.is_none() {
            first = Some(idx);
        }

        match wanted.next() {
            Some(g) => next = g,
            None => return first,
        }
    }

    return None;
}

/// Whether the candidate continues with a fresh sub-word after a matched
/// prefix of `len` characters: either it ends there, or a camelCase or
/// punctuation boundary starts.
fn subword_ends_at(candidate: &str, len: usize) -> bool {
    match candidate.chars().nth(len) {
        None => true,
        Some(c) => c.is_uppercase() || !c.is_alphanumeric(),
    }
}

fn score(candidate: &str, query: &str) -> Option<i64> {
    let first = subsequence_start(candidate, query)?;
    let mut score = 0;

    if candidate.starts_with(query) {
        score += PREFIX_BONUS;

        if subword_ends_at(candidate, query.chars().count()) {
            score += SUBWORD_END_BONUS;
        }
    } else if candidate.contains(query) {
        score += SUBSTRING_BONUS;
    }

    let clen = candidate.graphemes(true).count() as i64;
    let qlen = query.graphemes(true).count() as i64;

    score -= (clen - qlen).abs() * LENGTH_PENALTY;
    score -= first as i64;

    Some(score)
}

/// Rank `candidates` against `query`, excluding candidates that do not
/// contain the query as an in-order subsequence.
///
/// The result is sorted by descending score; equal scores preserve the
/// candidates' first-seen order. An empty candidate set yields an empty list.
/// Callers are expected to have already rejected empty queries.
pub fn fuzzy_search(candidates: &[String], query: &str) -> Vec<ScoredMatch> {
    let mut scored: Vec<ScoredMatch> = candidates
        .iter()
        .filter_map(|candidate| {
            let score = score(candidate, query)?;

            Some(ScoredMatch { text: candidate.clone(), score })
        })
        .collect();

    scored.sort_by(|a, b| b.score.cmp(&a.score));

    return scored;
}

#[cfg(test)]
mod tests {
    use super::*;

    fn texts(matches: &[ScoredMatch]) -> Vec<String> {
        matches.iter().map(|m| m.text.clone()).collect()
    }

    #[test]
    fn test_subsequence_law() {
        let candidates = strs!["forEach", "floor", "blur", "const"];

        // "for" appears in-order in "forEach" and "floor", but not in the rest.
        let res = fuzzy_search(&candidates, "for");
        assert_eq!(texts(&res), strs!["forEach", "floor"]);

        let res = fuzzy_search(&candidates, "zz");
        assert_eq!(res, vec![]);
    }

    #[test]
    fn test_ranking_law() {
        let candidates = strs!["forEach", "for", "format"];

        // Exact match beats prefix-at-a-subword-boundary beats plain prefix.
        let res = fuzzy_search(&candidates, "for");
        assert_eq!(texts(&res), strs!["for", "forEach", "format"]);
    }

    #[test]
    fn test_substring_beats_subsequence() {
        let candidates = strs!["xfory", "fxxoxxr"];

        let res = fuzzy_search(&candidates, "for");
        assert_eq!(texts(&res), strs!["xfory", "fxxoxxr"]);
    }

    #[test]
    fn test_shorter_candidate_ranks_earlier() {
        let candidates = strs!["functional", "function"];

        let res = fuzzy_search(&candidates, "func");
        assert_eq!(texts(&res), strs!["function", "functional"]);
    }

    #[test]
    fn test_stable_for_equal_scores() {
        // Same length, same first-match position, same tier: first-seen order.
        let candidates = strs!["abcx", "abcy"];

        let res = fuzzy_search(&candidates, "abc");
        assert_eq!(texts(&res), strs!["abcx", "abcy"]);
        assert_eq!(res[0].score, res[1].score);
    }

    #[test]
    fn test_pure_and_deterministic() {
        let candidates = strs!["switch", "while", "with", "window"];

        let once = fuzzy_search(&candidates, "wi");
        let twice = fuzzy_search(&candidates, "wi");
        assert_eq!(once, twice);
    }

    #[test]
    fn test_empty_candidates() {
        assert_eq!(fuzzy_search(&[], "for"), vec![]);
    }
}
