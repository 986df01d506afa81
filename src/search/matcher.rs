//! Match predicate / 匹配判定
//!
//! A flattened record matches when any of its tokens contains any non-empty
//! criterion value as a substring. Fields are scanned in a fixed priority
//! order so the common identifiers (email, username) short-circuit early.

use super::criteria::SearchCriteria;

/// Decide whether a flattened record satisfies the criteria / 判断记录是否满足条件
///
/// Empty criterion values are skipped. Substring containment with an empty
/// needle is trivially true, so without the guard an empty form would match
/// every record in the data folder.
pub fn matches(tokens: &[String], criteria: &SearchCriteria) -> bool {
    for value in criteria.priority_values() {
        if value.is_empty() {
            continue;
        }
        if tokens.iter().any(|token| token.contains(value)) {
            return true;
        }
    }
    false
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::search::criteria::RawCriteria;

    fn tokens(values: &[&str]) -> Vec<String> {
        values.iter().map(|v| v.to_string()).collect()
    }

    fn criteria_with(f: impl FnOnce(&mut RawCriteria)) -> SearchCriteria {
        let mut raw = RawCriteria::default();
        f(&mut raw);
        SearchCriteria::normalize(&raw)
    }

    #[test]
    fn test_empty_criteria_never_match() {
        let criteria = SearchCriteria::normalize(&RawCriteria::default());
        assert!(!matches(&tokens(&["john", "doe", "john@x.com"]), &criteria));
        assert!(!matches(&tokens(&[""]), &criteria));
        assert!(!matches(&[], &criteria));
    }

    #[test]
    fn test_substring_match() {
        let criteria = criteria_with(|raw| raw.email = "jane@example.com".to_string());
        assert!(matches(&tokens(&["id=7", "jane@example.com"]), &criteria));
        assert!(matches(&tokens(&["prefix jane@example.com suffix"]), &criteria));
        assert!(!matches(&tokens(&["john@example.com"]), &criteria));
    }

    #[test]
    fn test_case_insensitive_via_normalization() {
        let upper = criteria_with(|raw| raw.email = "Jane@Example.com".to_string());
        let lower = criteria_with(|raw| raw.email = "jane@example.com".to_string());
        let record = tokens(&["jane@example.com"]);
        assert_eq!(matches(&record, &upper), matches(&record, &lower));
        assert!(matches(&record, &upper));
    }

    #[test]
    fn test_full_name_composite() {
        let criteria = criteria_with(|raw| {
            raw.first_name = "Ann".to_string();
            raw.last_name = "Lee".to_string();
        });
        // The token contains neither part near a word boundary, only the
        // concatenated form.
        assert!(matches(&tokens(&["customer: ann lee (vip)"]), &criteria));
    }

    #[test]
    fn test_disjunction_is_order_independent() {
        let record = tokens(&["jdoe", "oregon"]);
        let criteria = criteria_with(|raw| {
            raw.username = "jdoe".to_string();
            raw.state = "Oregon".to_string();
            raw.email = "nobody@nowhere".to_string();
        });

        // Evaluating fields in any order yields the same verdict as the
        // priority scan, because the predicate is a pure disjunction.
        let mut values = criteria.priority_values().to_vec();
        let expected = matches(&record, &criteria);
        for rotation in 0..values.len() {
            values.rotate_left(1);
            let any = values
                .iter()
                .filter(|v| !v.is_empty())
                .any(|v| record.iter().any(|t| t.contains(*v)));
            assert_eq!(any, expected, "rotation {}", rotation);
        }
        assert!(expected);
    }
}
