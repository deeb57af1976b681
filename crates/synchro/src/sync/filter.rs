//! Include/exclude name filtering.
//!
//! Repository and branch names are filtered by two comma-separated lists
//! of regular expressions. A name passes when it matches at least one
//! include pattern (or no include list is given) and matches none of the
//! exclude patterns.

use regex::Regex;

/// Compiled include/exclude patterns for repository or branch names.
#[derive(Debug, Clone, Default)]
pub struct NameFilter {
    include: Vec<Regex>,
    exclude: Vec<Regex>,
}

impl NameFilter {
    /// Compile a filter from comma-separated pattern lists.
    ///
    /// Empty entries (and `None` lists) are skipped, so `"a,,b"` compiles
    /// two patterns.
    pub fn new(include: Option<&str>, exclude: Option<&str>) -> Result<Self, regex::Error> {
        Ok(Self {
            include: compile_list(include)?,
            exclude: compile_list(exclude)?,
        })
    }

    /// Whether a name passes the filter.
    #[must_use]
    pub fn matches(&self, name: &str) -> bool {
        if !self.include.is_empty() && !self.include.iter().any(|re| re.is_match(name)) {
            return false;
        }
        !self.exclude.iter().any(|re| re.is_match(name))
    }

    /// Keep the names passing the filter, preserving order.
    #[must_use]
    pub fn apply(&self, names: Vec<String>) -> Vec<String> {
        names.into_iter().filter(|n| self.matches(n)).collect()
    }
}

fn compile_list(patterns: Option<&str>) -> Result<Vec<Regex>, regex::Error> {
    patterns
        .unwrap_or_default()
        .split(',')
        .map(str::trim)
        .filter(|p| !p.is_empty())
        .map(Regex::new)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_patterns_passes_everything() {
        let filter = NameFilter::new(None, None).expect("compile");
        assert!(filter.matches("anything"));
        assert!(filter.matches("with.dot"));
    }

    #[test]
    fn include_list_requires_a_match() {
        let filter = NameFilter::new(Some("spring-petclinic,other"), None).expect("compile");
        assert!(filter.matches("spring-petclinic"));
        assert!(filter.matches("other"));
        assert!(!filter.matches("unrelated"));
    }

    #[test]
    fn exclude_wins_over_include() {
        let filter = NameFilter::new(Some("repo.*"), Some("repo-old")).expect("compile");
        assert!(filter.matches("repo-new"));
        assert!(!filter.matches("repo-old"));
    }

    #[test]
    fn dot_exclude_drops_dotted_names() {
        // The CLI default exclude pattern.
        let filter = NameFilter::new(None, Some(r"\.")).expect("compile");
        assert!(filter.matches("plain-repo"));
        assert!(!filter.matches("my.github.io"));
    }

    #[test]
    fn patterns_match_anywhere_in_the_name() {
        let filter = NameFilter::new(Some("petclinic"), None).expect("compile");
        assert!(filter.matches("spring-petclinic"));
    }

    #[test]
    fn empty_entries_are_skipped() {
        let filter = NameFilter::new(Some("a,,b"), Some(",")).expect("compile");
        assert!(filter.matches("a"));
        assert!(filter.matches("b"));
        assert!(!filter.matches("c"));
    }

    #[test]
    fn invalid_pattern_is_an_error() {
        assert!(NameFilter::new(Some("("), None).is_err());
        assert!(NameFilter::new(None, Some("[")).is_err());
    }

    #[test]
    fn apply_preserves_order() {
        let filter = NameFilter::new(Some("keep"), None).expect("compile");
        let names = vec![
            "keep-1".to_string(),
            "drop".to_string(),
            "keep-2".to_string(),
        ];
        assert_eq!(
            filter.apply(names),
            vec!["keep-1".to_string(), "keep-2".to_string()]
        );
    }
}
