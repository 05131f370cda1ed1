// ── Table sort comparators ──
//
// Pure, direction-aware orderings for every sortable table in the
// platform. The direction flag is applied by negating the comparator
// result, never by reversing the sorted array: reversing would also
// reverse the ID tiebreak for rows whose primary keys compare equal.
//
// String comparison is collation-based (root collation order), so
// accented characters sort adjacent to their base letter instead of
// after the ASCII range.

use std::cmp::Ordering;
use std::sync::OnceLock;

use icu_collator::{Collator, CollatorOptions};
use icu_locid::Locale;

/// A sortable key: either a numeric ID or an opaque string ID.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SortKey {
    Num(i64),
    Text(String),
}

impl From<i64> for SortKey {
    fn from(n: i64) -> Self {
        Self::Num(n)
    }
}

impl From<String> for SortKey {
    fn from(s: String) -> Self {
        Self::Text(s)
    }
}

impl From<&str> for SortKey {
    fn from(s: &str) -> Self {
        Self::Text(s.to_owned())
    }
}

fn collator() -> &'static Collator {
    static COLLATOR: OnceLock<Collator> = OnceLock::new();
    COLLATOR.get_or_init(|| {
        Collator::try_new(&Locale::UND.into(), CollatorOptions::new())
            .expect("root collation data is compiled in")
    })
}

/// Collation-aware string comparison.
fn collate(a: &str, b: &str) -> Ordering {
    collator().compare(a, b)
}

/// Parse an ID string into a number, or `-1` if it has no leading integer.
///
/// Matches `parseInt` semantics: leading whitespace and sign are accepted,
/// parsing stops at the first non-digit. The `-1` sentinel makes an
/// unparsable ID indistinguishable from a literal `-1`; callers that need
/// to keep non-numeric IDs intact use [`normalize_id`] instead.
pub fn parse_id_to_number(raw: &str) -> i64 {
    let trimmed = raw.trim_start();
    let (sign, digits) = match trimmed.strip_prefix('-') {
        Some(rest) => (-1, rest),
        None => (1, trimmed.strip_prefix('+').unwrap_or(trimmed)),
    };
    let leading: String = digits.chars().take_while(char::is_ascii_digit).collect();
    leading.parse::<i64>().map_or(-1, |n| sign * n)
}

/// Coerce a string key to a number when -- and only when -- it is a single
/// ASCII digit. Multi-digit numeric strings ("10", "42") stay strings and
/// compare lexically; see the sort tests pinning that behavior.
pub fn normalize_id(key: &SortKey) -> SortKey {
    match key {
        SortKey::Num(n) => SortKey::Num(*n),
        SortKey::Text(s) if is_single_digit(s) => SortKey::Num(parse_id_to_number(s)),
        SortKey::Text(s) => SortKey::Text(s.clone()),
    }
}

fn is_single_digit(s: &str) -> bool {
    s.len() == 1 && s.as_bytes()[0].is_ascii_digit()
}

/// Compare two IDs without a direction, normalizing single-digit strings.
///
/// Mixed-type comparisons fall back to collating the number's decimal
/// form against the string. The two mixed arms are deliberately not
/// mirror images: text-vs-num collates the swapped operands and negates.
pub fn compare_ids_unordered(a: &SortKey, b: &SortKey) -> Ordering {
    let a = normalize_id(a);
    let b = normalize_id(b);

    match (a, b) {
        (SortKey::Num(x), SortKey::Num(y)) => x.cmp(&y),
        (SortKey::Num(x), SortKey::Text(y)) => collate(&x.to_string(), &y),
        (SortKey::Text(x), SortKey::Num(y)) => collate(&y.to_string(), &x).reverse(),
        (SortKey::Text(x), SortKey::Text(y)) => collate(&x, &y),
    }
}

/// Compare two IDs with a direction. Equal stays equal regardless of
/// direction; a non-equal result is negated for descending order.
pub fn compare_ids(a: &SortKey, b: &SortKey, ascending: bool) -> Ordering {
    let result = compare_ids_unordered(a, b);
    if ascending || result == Ordering::Equal {
        result
    } else {
        result.reverse()
    }
}

/// Compare two display strings case-insensitively with collation order,
/// tie-breaking on the row IDs for a deterministic total order.
///
/// Missing values compare as the empty string. The tiebreak result is
/// negated together with the primary result for descending order.
pub fn compare_localized_strings(
    a: Option<&str>,
    b: Option<&str>,
    id_a: &SortKey,
    id_b: &SortKey,
    ascending: bool,
) -> Ordering {
    let a = a.unwrap_or("");
    let b = b.unwrap_or("");

    let mut result = collate(&a.to_lowercase(), &b.to_lowercase());
    if result == Ordering::Equal {
        result = compare_ids_unordered(id_a, id_b);
    }

    if ascending { result } else { result.reverse() }
}

/// Compare two timestamps (epoch milliseconds), tie-breaking on the row
/// IDs, negating the combined result for descending order.
pub fn compare_timestamps(
    a: i64,
    b: i64,
    id_a: &SortKey,
    id_b: &SortKey,
    ascending: bool,
) -> Ordering {
    let mut result = a.cmp(&b);
    if result == Ordering::Equal {
        result = compare_ids_unordered(id_a, id_b);
    }

    if ascending { result } else { result.reverse() }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    // ── parse_id_to_number ──────────────────────────────────────────

    #[test]
    fn parses_leading_integer() {
        assert_eq!(parse_id_to_number("42"), 42);
        assert_eq!(parse_id_to_number("42abc"), 42);
        assert_eq!(parse_id_to_number("  7 "), 7);
        assert_eq!(parse_id_to_number("-3"), -3);
    }

    #[test]
    fn unparsable_input_yields_sentinel() {
        assert_eq!(parse_id_to_number(""), -1);
        assert_eq!(parse_id_to_number("abc"), -1);
        assert_eq!(parse_id_to_number("x9"), -1);
    }

    // ── normalize_id ────────────────────────────────────────────────

    #[test]
    fn single_digit_string_becomes_number() {
        assert_eq!(normalize_id(&SortKey::from("7")), SortKey::Num(7));
        assert_eq!(normalize_id(&SortKey::from("0")), SortKey::Num(0));
    }

    #[test]
    fn multi_digit_string_stays_text() {
        assert_eq!(normalize_id(&SortKey::from("10")), SortKey::from("10"));
        assert_eq!(normalize_id(&SortKey::from("42")), SortKey::from("42"));
    }

    #[test]
    fn empty_and_non_numeric_strings_stay_text() {
        assert_eq!(normalize_id(&SortKey::from("")), SortKey::from(""));
        assert_eq!(normalize_id(&SortKey::from("a")), SortKey::from("a"));
    }

    #[test]
    fn numbers_pass_through() {
        assert_eq!(normalize_id(&SortKey::Num(123)), SortKey::Num(123));
    }

    // ── compare_ids_unordered ───────────────────────────────────────

    #[test]
    fn numeric_ids_compare_numerically() {
        assert_eq!(
            compare_ids_unordered(&SortKey::Num(2), &SortKey::Num(10)),
            Ordering::Less
        );
        assert_eq!(
            compare_ids_unordered(&SortKey::Num(5), &SortKey::Num(5)),
            Ordering::Equal
        );
    }

    #[test]
    fn single_digit_strings_compare_numerically() {
        assert_eq!(
            compare_ids_unordered(&SortKey::from("2"), &SortKey::from("5")),
            Ordering::Less
        );
        assert_eq!(
            compare_ids_unordered(&SortKey::from("9"), &SortKey::Num(9)),
            Ordering::Equal
        );
    }

    #[test]
    fn multi_digit_strings_fall_back_to_lexical_order() {
        // "2" is normalized to 2, "10" stays a string; the mixed-type
        // fallback collates "2" vs "10", where "10" sorts first. This pins
        // the single-digit-only normalization quirk.
        assert_eq!(
            compare_ids_unordered(&SortKey::from("2"), &SortKey::from("10")),
            Ordering::Greater
        );
        assert_eq!(
            compare_ids_unordered(&SortKey::from("10"), &SortKey::from("9")),
            Ordering::Less
        );
    }

    #[test]
    fn mixed_type_arms_are_consistent() {
        let n = SortKey::Num(2);
        let t = SortKey::from("10");
        let forward = compare_ids_unordered(&n, &t);
        let backward = compare_ids_unordered(&t, &n);
        assert_eq!(forward, backward.reverse());
    }

    #[test]
    fn equal_ids_stay_equal_in_both_directions() {
        let a = SortKey::from("7");
        let b = SortKey::Num(7);
        assert_eq!(compare_ids(&a, &b, true), Ordering::Equal);
        assert_eq!(compare_ids(&a, &b, false), Ordering::Equal);
    }

    #[test]
    fn direction_negates_non_equal_results() {
        let a = SortKey::Num(1);
        let b = SortKey::Num(2);
        assert_eq!(
            compare_ids(&a, &b, true),
            compare_ids(&a, &b, false).reverse()
        );
    }

    // ── compare_localized_strings ───────────────────────────────────

    #[test]
    fn accents_sort_adjacent_to_base_letter() {
        let id = SortKey::Num(0);
        let mut names = vec!["zebra", "émile", "emil", "anna"];
        names.sort_by(|a, b| compare_localized_strings(Some(*a), Some(*b), &id, &id, true));
        assert_eq!(names, vec!["anna", "emil", "émile", "zebra"]);
    }

    #[test]
    fn comparison_is_case_insensitive() {
        let id_a = SortKey::Num(1);
        let id_b = SortKey::Num(2);
        // Equal after lowercasing, so the ID tiebreak decides.
        assert_eq!(
            compare_localized_strings(Some("Alpha"), Some("alpha"), &id_a, &id_b, true),
            Ordering::Less
        );
    }

    #[test]
    fn missing_values_compare_as_empty() {
        let id_a = SortKey::Num(1);
        let id_b = SortKey::Num(2);
        assert_eq!(
            compare_localized_strings(None, Some(""), &id_a, &id_b, true),
            Ordering::Less
        );
        assert_eq!(
            compare_localized_strings(None, Some("a"), &id_a, &id_b, true),
            Ordering::Less
        );
    }

    #[test]
    fn descending_negates_the_tiebreak_too() {
        let id_a = SortKey::Num(1);
        let id_b = SortKey::Num(2);
        assert_eq!(
            compare_localized_strings(Some("same"), Some("same"), &id_a, &id_b, false),
            Ordering::Greater
        );
    }

    #[test]
    fn stable_order_for_equal_names_survives_direction_flip() {
        // Sorting descending must not scramble rows with equal primary
        // keys: the tiebreak is negated with the comparator, which keeps
        // the relative order deterministic (just reversed).
        let rows = [("same", 3), ("same", 1), ("same", 2)];

        let mut asc = rows;
        asc.sort_by(|x, y| {
            compare_localized_strings(
                Some(x.0),
                Some(y.0),
                &SortKey::Num(x.1),
                &SortKey::Num(y.1),
                true,
            )
        });
        let mut desc = rows;
        desc.sort_by(|x, y| {
            compare_localized_strings(
                Some(x.0),
                Some(y.0),
                &SortKey::Num(x.1),
                &SortKey::Num(y.1),
                false,
            )
        });

        let asc_ids: Vec<i64> = asc.iter().map(|r| r.1).collect();
        let desc_ids: Vec<i64> = desc.iter().map(|r| r.1).collect();
        assert_eq!(asc_ids, vec![1, 2, 3]);
        assert_eq!(desc_ids, vec![3, 2, 1]);
    }

    // ── compare_timestamps ──────────────────────────────────────────

    #[test]
    fn timestamps_compare_numerically_with_tiebreak() {
        let id_a = SortKey::Num(1);
        let id_b = SortKey::Num(2);
        assert_eq!(
            compare_timestamps(1_000, 2_000, &id_a, &id_b, true),
            Ordering::Less
        );
        assert_eq!(
            compare_timestamps(1_000, 1_000, &id_a, &id_b, true),
            Ordering::Less
        );
        assert_eq!(
            compare_timestamps(1_000, 1_000, &id_a, &id_b, false),
            Ordering::Greater
        );
    }
}
