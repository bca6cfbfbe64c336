use crate::criteria::FilterCriteria;
use crate::model::Record;
use tracing::trace;

/// Narrow `records` to those satisfying every active constraint in `criteria`.
///
/// Stages run in a fixed order and each one only removes records, so the
/// result is always a subsequence of the input in its original order:
/// 1. category, exact match
/// 2. difficulty, exact match, for records that have one
/// 3. search term, case-insensitive substring of any searchable field
pub fn filter<'a, T: Record>(records: &'a [T], criteria: &FilterCriteria) -> Vec<&'a T> {
    let mut filtered: Vec<&T> = records.iter().collect();

    if !criteria.category.is_all() {
        filtered.retain(|record| criteria.category.admits(record.category()));
    }

    if !criteria.difficulty.is_all() {
        filtered.retain(|record| {
            record
                .difficulty()
                .map_or(true, |d| criteria.difficulty.admits(d.as_str()))
        });
    }

    if !criteria.search_term.is_empty() {
        let term = criteria.search_term.to_lowercase();
        filtered.retain(|record| matches_term(*record, &term));
    }

    trace!(
        "Filtered {} {} down to {}",
        records.len(),
        T::KIND.plural(),
        filtered.len()
    );

    filtered
}

/// True when the already lower-cased `term` occurs in any searchable field.
pub fn matches_term<T: Record>(record: &T, term: &str) -> bool {
    record
        .search_fields()
        .any(|field| field.to_lowercase().contains(term))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Command;

    fn cmd(id: &str, title: &str, category: &str) -> Command {
        Command {
            id: id.to_string(),
            title: title.to_string(),
            command: String::new(),
            description: String::new(),
            category: category.to_string(),
            examples: vec![],
            options: vec![],
        }
    }

    #[test]
    fn test_matches_term_substring_of_unrelated_word() {
        let record = cmd("a", "Read the dialogue", "Docs");
        assert!(matches_term(&record, "log"));
        assert!(!matches_term(&record, "logs"));
    }

    #[test]
    fn test_whitespace_term_is_not_trimmed() {
        let records = vec![cmd("a", "nospace", "X"), cmd("b", "has space", "X")];
        let criteria = FilterCriteria::new().with_search_term(" ");
        let result = filter(&records, &criteria);
        assert_eq!(result.len(), 1);
        assert_eq!(result[0].id, "b");
    }

    #[test]
    fn test_difficulty_choice_ignored_for_commands() {
        let records = vec![cmd("a", "one", "X"), cmd("b", "two", "Y")];
        let criteria = FilterCriteria::new().with_difficulty("Advanced");
        assert_eq!(filter(&records, &criteria).len(), 2);
    }
}
