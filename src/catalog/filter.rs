//! Search filter over the accumulated collection.
//!
//! The visible subset is recomputed from scratch whenever the collection or the
//! search term changes. Matching is a case-insensitive substring test on the
//! record name; an empty term keeps everything.

use crate::domain::Pokemon;

/// Returns the records whose name contains `term`, ignoring case, in
/// collection order.
///
/// # Example
///
/// ```
/// use zpokedex::catalog::filter;
/// use zpokedex::domain::Pokemon;
///
/// let collection = vec![Pokemon::new(25, "Pikachu"), Pokemon::new(1, "bulbasaur")];
/// let visible = filter(&collection, "PIKA");
/// assert_eq!(visible.len(), 1);
/// assert_eq!(visible[0].name, "Pikachu");
/// ```
#[must_use]
pub fn filter<'a>(collection: &'a [Pokemon], term: &str) -> Vec<&'a Pokemon> {
    filter_indices(collection, term)
        .into_iter()
        .map(|i| &collection[i])
        .collect()
}

/// Same as [`filter`] but yields positions into `collection`.
#[must_use]
pub fn filter_indices(collection: &[Pokemon], term: &str) -> Vec<usize> {
    let _span = tracing::debug_span!(
        "filter_collection",
        total = collection.len(),
        term_len = term.len()
    )
    .entered();

    if term.is_empty() {
        return (0..collection.len()).collect();
    }

    let needle = term.to_lowercase();
    let indices: Vec<usize> = collection
        .iter()
        .enumerate()
        .filter(|(_, pokemon)| pokemon.name.to_lowercase().contains(&needle))
        .map(|(i, _)| i)
        .collect();

    tracing::debug!(visible = indices.len(), "filter applied");
    indices
}

/// Character range `(start, end)` of the first case-insensitive occurrence of
/// `term` in `name`, used for match highlighting.
///
/// Names whose lowercase form has a different length (such as `İ`) get no
/// range, since offsets would not map back onto `name`.
///
/// # Example
///
/// ```
/// use zpokedex::catalog::filter::match_range;
///
/// assert_eq!(match_range("Charmander", "MAN"), Some((4, 7)));
/// assert_eq!(match_range("Charmander", ""), None);
/// ```
#[must_use]
pub fn match_range(name: &str, term: &str) -> Option<(usize, usize)> {
    if term.is_empty() {
        return None;
    }
    let haystack = name.to_lowercase();
    if haystack.chars().count() != name.chars().count() {
        return None;
    }
    let needle = term.to_lowercase();
    let byte_start = haystack.find(&needle)?;
    let start = haystack[..byte_start].chars().count();
    Some((start, start + needle.chars().count()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(records: &[&Pokemon]) -> Vec<String> {
        records.iter().map(|p| p.name.clone()).collect()
    }

    fn collection() -> Vec<Pokemon> {
        ["pikachu", "Pidgey", "raichu", "pikipek", "PIDGEOTTO", "spinda"]
            .iter()
            .enumerate()
            .map(|(i, name)| Pokemon::new(u32::try_from(i).unwrap() + 1, *name))
            .collect()
    }

    #[test]
    fn empty_term_is_identity() {
        let c = collection();
        let visible = filter(&c, "");
        assert_eq!(visible, c.iter().collect::<Vec<_>>());
    }

    #[test]
    fn matching_ignores_case() {
        let c = vec![Pokemon::new(25, "Pikachu")];
        assert_eq!(names(&filter(&c, "PIKA")), vec!["Pikachu"]);
        assert_eq!(names(&filter(&c, "chu")), vec!["Pikachu"]);
    }

    #[test]
    fn result_is_an_ordered_subsequence() {
        let c = collection();
        assert_eq!(names(&filter(&c, "pi")), vec!["pikachu", "Pidgey", "pikipek", "PIDGEOTTO", "spinda"]);
        assert_eq!(filter_indices(&c, "chu"), vec![0, 2]);
    }

    #[test]
    fn narrowing_the_term_composes() {
        let c = collection();
        let wide: Vec<Pokemon> = filter(&c, "pi").into_iter().cloned().collect();
        let narrowed = filter(&wide, "pik");
        let direct = filter(&c, "pik");
        assert_eq!(names(&narrowed), names(&direct));
    }

    #[test]
    fn match_range_skips_names_that_change_length_when_lowercased() {
        assert_eq!(match_range("İab", "ab"), None);
    }

    #[test]
    fn no_match_yields_empty() {
        assert!(filter(&collection(), "mewtwo").is_empty());
    }

    #[test]
    fn match_range_is_in_characters() {
        assert_eq!(match_range("Flabébé", "bé"), Some((3, 5)));
        assert_eq!(match_range("pikachu", "zz"), None);
    }
}
