//! Collection exclusion rules

use std::collections::BTreeSet;

/// Split a comma-separated list, trimming entries and dropping empty ones.
///
/// Blank input yields an empty list.
pub fn split_csv(input: &str) -> Vec<String> {
    if input.trim().is_empty() {
        return Vec::new();
    }
    input
        .split(',')
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .map(String::from)
        .collect()
}

/// Set of collection names that a backup skips.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExcludeSet {
    names: BTreeSet<String>,
}

impl ExcludeSet {
    /// Build from a `--exclude` value such as `"users, logs"`.
    pub fn from_csv(input: &str) -> Self {
        split_csv(input).into_iter().collect()
    }

    /// Exact, case-sensitive match on the collection name.
    pub fn contains(&self, collection: &str) -> bool {
        self.names.contains(collection)
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }
}

impl FromIterator<String> for ExcludeSet {
    fn from_iter<I: IntoIterator<Item = String>>(iter: I) -> Self {
        Self {
            names: iter.into_iter().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("", vec![])]
    #[case("   ", vec![])]
    #[case("users", vec!["users"])]
    #[case("users,logs", vec!["users", "logs"])]
    #[case(" users , logs ,", vec!["users", "logs"])]
    #[case(",,a,,", vec!["a"])]
    fn given_csv_when_split_then_trims_and_drops_empty(
        #[case] input: &str,
        #[case] expected: Vec<&str>,
    ) {
        assert_eq!(split_csv(input), expected);
    }

    #[test]
    fn given_duplicate_names_when_building_set_then_deduplicates() {
        let set = ExcludeSet::from_csv("logs,users,logs");
        assert_eq!(set.len(), 2);
        assert!(set.contains("logs"));
        assert!(set.contains("users"));
    }

    #[test]
    fn given_set_when_checking_other_case_then_does_not_match() {
        let set = ExcludeSet::from_csv("Users");
        assert!(!set.contains("users"));
        assert!(set.contains("Users"));
    }

    #[test]
    fn given_blank_input_when_building_set_then_is_empty() {
        assert!(ExcludeSet::from_csv("  ").is_empty());
    }
}
