//! Content-search tier.

use super::terms::extract_query_terms;
use super::SearchBackend;
use crate::domain::{ExcludeSet, FileEntry};
use crate::search::{CaseMode, LiteralSearch, SearchRequest};
use std::collections::HashSet;
use std::path::Path;

/// Files whose content contains any query term, case-insensitively, in the
/// order the search utility reports them.
pub struct ContentSearchBackend<'a> {
    search: &'a dyn LiteralSearch,
}

impl<'a> ContentSearchBackend<'a> {
    pub fn new(search: &'a dyn LiteralSearch) -> Self {
        Self { search }
    }
}

impl SearchBackend for ContentSearchBackend<'_> {
    fn name(&self) -> &'static str {
        "content-search"
    }

    fn is_available(&self) -> bool {
        self.search.is_available()
    }

    fn select(
        &self,
        query: &str,
        root: &Path,
        max_files: usize,
        excludes: &ExcludeSet,
    ) -> Option<Vec<FileEntry>> {
        let terms = extract_query_terms(query);
        if terms.is_empty() {
            return None;
        }

        let request =
            SearchRequest { root, patterns: &terms, excludes, case: CaseMode::Insensitive };
        let paths = match self.search.matching_files(&request) {
            Ok(paths) => paths,
            Err(err) => {
                tracing::debug!("Content search via {} failed: {}", self.search.name(), err);
                return None;
            }
        };

        let mut seen = HashSet::new();
        let selected = paths
            .into_iter()
            .filter(|p| !excludes.excludes(p))
            .filter(|p| seen.insert(p.clone()))
            .take(max_files)
            .collect();
        Some(selected)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::search::{SearchError, SearchHit};
    use std::cell::RefCell;

    struct StubSearch {
        files: Vec<&'static str>,
        seen_patterns: RefCell<Vec<String>>,
    }

    impl LiteralSearch for StubSearch {
        fn name(&self) -> &str {
            "stub"
        }

        fn is_available(&self) -> bool {
            true
        }

        fn matching_files(&self, request: &SearchRequest<'_>) -> Result<Vec<String>, SearchError> {
            assert_eq!(request.case, CaseMode::Insensitive);
            self.seen_patterns.borrow_mut().extend(request.patterns.iter().cloned());
            Ok(self.files.iter().map(|s| s.to_string()).collect())
        }

        fn matching_lines(
            &self,
            _: &SearchRequest<'_>,
            _: usize,
        ) -> Result<Vec<SearchHit>, SearchError> {
            Ok(Vec::new())
        }
    }

    #[test]
    fn test_dedupes_preserving_order_and_truncates() {
        let stub = StubSearch {
            files: vec!["src/b.py", "src/a.py", "src/b.py", "node_modules/x.js", "src/c.py"],
            seen_patterns: RefCell::new(Vec::new()),
        };
        let backend = ContentSearchBackend::new(&stub);

        let paths = backend
            .select("Where is the Database pool?", Path::new("."), 2, &ExcludeSet::default())
            .expect("paths");
        assert_eq!(paths, vec!["src/b.py", "src/a.py"]);
        assert_eq!(*stub.seen_patterns.borrow(), vec!["database", "pool"]);
    }

    #[test]
    fn test_search_failure_defers_to_next_tier() {
        struct Broken;
        impl LiteralSearch for Broken {
            fn name(&self) -> &str {
                "broken"
            }
            fn is_available(&self) -> bool {
                true
            }
            fn matching_files(&self, _: &SearchRequest<'_>) -> Result<Vec<String>, SearchError> {
                Err(SearchError::Failed { message: "boom".to_string() })
            }
            fn matching_lines(
                &self,
                _: &SearchRequest<'_>,
                _: usize,
            ) -> Result<Vec<SearchHit>, SearchError> {
                Err(SearchError::Failed { message: "boom".to_string() })
            }
        }

        let backend = ContentSearchBackend::new(&Broken);
        assert!(backend.select("database", Path::new("."), 5, &ExcludeSet::default()).is_none());
    }
}
