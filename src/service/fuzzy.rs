//! Fuzzy ranking of display names for autocomplete and free-text lookups.
//!
//! Input and candidates go through the same [`normalize`] step. A candidate's score is the
//! best of three signals:
//! - containment of the normalized query, scoring between [`CONTAINED_SCORE`] and 1.0 by
//!   how much of the candidate the query covers, so an exact match outranks a longer name
//!   that merely contains it
//! - Jaro-Winkler similarity of the whole strings
//! - normalized Levenshtein similarity of the query against each same-length window of the
//!   candidate, which rewards typos inside a longer name
//!
//! Candidates below [`MIN_SCORE`] are dropped. Equal scores are ordered by the original
//! candidate name so identical inputs always produce identical output.

use unicode_normalization::{char::is_combining_mark, UnicodeNormalization};

/// Discord accepts at most this many autocomplete choices.
pub const MAX_SUGGESTIONS: usize = 10;

pub const MIN_SCORE: f64 = 0.6;

/// Floor of the score of a candidate that contains the query.
pub const CONTAINED_SCORE: f64 = 0.9;

/// Shorter queries only resolve through [`best`] on an exact name match.
const MIN_RESOLVE_LEN: usize = 2;

/// Lowercases, strips diacritics, spells out `&` and removes everything that is not
/// alphanumeric.
pub fn normalize(input: &str) -> String {
    input
        .nfkd()
        .filter(|c| !is_combining_mark(*c))
        .flat_map(char::to_lowercase)
        .fold(String::with_capacity(input.len()), |mut out, c| {
            if c == '&' {
                out.push_str("and");
            } else if c.is_alphanumeric() {
                out.push(c);
            }
            out
        })
}

/// Similarity of two normalized strings in `0.0..=1.0`.
pub fn score(query: &str, candidate: &str) -> f64 {
    if query.is_empty() || candidate.is_empty() {
        return 0.0;
    }
    let query_len = query.chars().count();
    let chars: Vec<char> = candidate.chars().collect();

    if candidate.contains(query) {
        let coverage = query_len as f64 / chars.len() as f64;
        return CONTAINED_SCORE + (1.0 - CONTAINED_SCORE) * coverage;
    }

    let whole = strsim::jaro_winkler(query, candidate);

    let windowed = if chars.len() <= query_len {
        strsim::normalized_levenshtein(query, candidate)
    } else {
        chars
            .windows(query_len)
            .map(|window| {
                let window: String = window.iter().collect();
                strsim::normalized_levenshtein(query, &window)
            })
            .fold(0.0, f64::max)
    };

    whole.max(windowed)
}

/// Ranks candidates against a query.
///
/// An empty (or fully stripped) query lists candidates alphabetically by name.
///
/// # Arguments
/// - `query` - Raw user input
/// - `candidates` - Items to rank
/// - `name` - Display name of a candidate
/// - `limit` - Maximum number of results, capped at [`MAX_SUGGESTIONS`]
pub fn rank<T, I, F>(query: &str, candidates: I, name: F, limit: usize) -> Vec<T>
where
    I: IntoIterator<Item = T>,
    F: Fn(&T) -> &str,
{
    let limit = limit.min(MAX_SUGGESTIONS);
    let query = normalize(query);

    let mut scored: Vec<(f64, T)> = candidates
        .into_iter()
        .filter_map(|candidate| {
            if query.is_empty() {
                return Some((0.0, candidate));
            }
            let similarity = score(&query, &normalize(name(&candidate)));
            (similarity >= MIN_SCORE).then_some((similarity, candidate))
        })
        .collect();

    scored.sort_by(|(a_score, a), (b_score, b)| {
        b_score
            .total_cmp(a_score)
            .then_with(|| name(a).cmp(name(b)))
    });
    scored.truncate(limit);

    scored.into_iter().map(|(_, candidate)| candidate).collect()
}

/// Returns the single best match, if any candidate clears [`MIN_SCORE`].
///
/// A query shorter than two characters after normalization only matches a candidate whose
/// whole name normalizes to it.
pub fn best<T, I, F>(query: &str, candidates: I, name: F) -> Option<T>
where
    I: IntoIterator<Item = T>,
    F: Fn(&T) -> &str,
{
    let normalized = normalize(query);
    if normalized.is_empty() {
        return None;
    }
    if normalized.chars().count() < MIN_RESOLVE_LEN {
        return candidates
            .into_iter()
            .find(|candidate| normalize(name(candidate)) == normalized);
    }
    rank(query, candidates, name, 1).into_iter().next()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalizes_case_accents_and_ampersand() {
        assert_eq!(normalize("Pokémon & Friends!"), "pokemonandfriends");
        assert_eq!(normalize("  R.E.N-egade "), "renegade");
        assert_eq!(normalize("!!!"), "");
    }

    #[test]
    fn typo_ranks_matching_outfits_first() {
        let candidates = ["Glider Gamma", "Outfit Beta", "Outfit Alpha"];

        let ranked = rank("outift", candidates, |c| *c, MAX_SUGGESTIONS);

        assert!(ranked[..2].contains(&"Outfit Alpha"));
        assert!(ranked[..2].contains(&"Outfit Beta"));
        if let Some(position) = ranked.iter().position(|c| *c == "Glider Gamma") {
            assert!(position >= 2);
        }
    }

    #[test]
    fn caps_results_at_ten() {
        let candidates: Vec<String> = (0..1000).map(|i| format!("Outfit {i:04}")).collect();

        let ranked = rank("outfit", candidates.iter(), |c| c.as_str(), 50);

        assert_eq!(ranked.len(), MAX_SUGGESTIONS);
        // Every name contains the query with equal coverage, so ties fall back to name order.
        assert_eq!(ranked[0], "Outfit 0000");
        assert_eq!(ranked[9], "Outfit 0009");
    }

    #[test]
    fn empty_query_lists_alphabetically() {
        let ranked = rank("", ["Bow", "Axe", "Cape"], |c| *c, MAX_SUGGESTIONS);
        assert_eq!(ranked, ["Axe", "Bow", "Cape"]);
    }

    #[test]
    fn empty_candidates_yield_nothing() {
        let ranked = rank("axe", Vec::<&str>::new(), |c| *c, MAX_SUGGESTIONS);
        assert!(ranked.is_empty());
        assert_eq!(best("axe", ["Zzzzzzzz"], |c| *c), None);
    }

    #[test]
    fn exact_name_outranks_containing_name() {
        let candidates = ["Dark Rex", "Rex", "Rex Rider"];

        let ranked = rank("Rex", candidates, |c| *c, MAX_SUGGESTIONS);

        assert_eq!(ranked, ["Rex", "Dark Rex", "Rex Rider"]);
        assert_eq!(best("rex", candidates, |c| *c), Some("Rex"));
        assert!(score("rex", "rex") > score("rex", "darkrex"));
    }

    #[test]
    fn single_character_resolves_only_exactly() {
        assert_eq!(best("a", ["Zoey", "Mako", "Raven"], |c| *c), None);
        assert_eq!(best("A", ["Zoey", "A", "Raven"], |c| *c), Some("A"));
    }

    #[test]
    fn ranking_is_deterministic() {
        let candidates = ["Raven", "Ravage", "Rave Rider", "Raptor"];
        let first = rank("rav", candidates, |c| *c, MAX_SUGGESTIONS);
        let second = rank("rav", candidates, |c| *c, MAX_SUGGESTIONS);
        assert_eq!(first, second);
    }
}
