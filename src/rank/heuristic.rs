//! Filename/path heuristic tier.

use super::terms::path_tokens;
use super::SearchBackend;
use crate::domain::{ExcludeSet, FileEntry, RankedCandidate};
use crate::scan::RepoWalker;
use std::path::Path;

const FILENAME_WEIGHT: u32 = 2;
const PATH_WEIGHT: u32 = 1;

/// Scores every non-excluded file by query tokens found in its name or path.
pub struct PathHeuristicBackend;

/// Per token: +2 when it occurs in the file name, otherwise +1 when it occurs
/// elsewhere in the relative path. A token never earns both.
pub fn score_path(rel_path: &str, tokens: &[String]) -> u32 {
    let lowered = rel_path.to_lowercase();
    let file_name = lowered.rsplit('/').next().unwrap_or(lowered.as_str());
    tokens
        .iter()
        .map(|token| {
            if file_name.contains(token.as_str()) {
                FILENAME_WEIGHT
            } else if lowered.contains(token.as_str()) {
                PATH_WEIGHT
            } else {
                0
            }
        })
        .sum()
}

impl SearchBackend for PathHeuristicBackend {
    fn name(&self) -> &'static str {
        "path-heuristic"
    }

    fn select(
        &self,
        query: &str,
        root: &Path,
        max_files: usize,
        excludes: &ExcludeSet,
    ) -> Option<Vec<FileEntry>> {
        let tokens = path_tokens(query);
        if tokens.is_empty() {
            return Some(Vec::new());
        }

        let walker = RepoWalker::new(root, excludes.clone());
        let mut candidates: Vec<RankedCandidate> = walker
            .files()
            .filter_map(|path| {
                let score = score_path(&path, &tokens);
                (score > 0).then_some(RankedCandidate { score, path })
            })
            .collect();
        candidates.sort();

        Some(candidates.into_iter().take(max_files).map(|c| c.path).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn tokens(query: &str) -> Vec<String> {
        path_tokens(query)
    }

    #[test]
    fn test_filename_match_outweighs_directory_match() {
        assert_eq!(score_path("src/database.py", &tokens("database")), 2);
        assert_eq!(score_path("database/models.py", &tokens("database")), 1);
        assert_eq!(score_path("database/database.py", &tokens("database")), 2);
        assert_eq!(score_path("src/auth.py", &tokens("database")), 0);
    }

    #[test]
    fn test_tokens_accumulate() {
        assert_eq!(score_path("api/auth/login.py", &tokens("api login")), 3);
        assert_eq!(score_path("src/Auth.py", &tokens("AUTH")), 2);
    }

    #[test]
    fn test_ranks_filename_match_first() {
        let tmp = TempDir::new().unwrap();
        let root = tmp.path();
        fs::create_dir_all(root.join("src")).unwrap();
        fs::create_dir_all(root.join("database")).unwrap();
        fs::write(root.join("src/database.py"), "x=1").unwrap();
        fs::write(root.join("src/auth.py"), "x=2").unwrap();
        fs::write(root.join("database/readme.md"), "docs").unwrap();
        fs::write(root.join("README.md"), "hello").unwrap();

        let paths = PathHeuristicBackend
            .select("database", root, 10, &ExcludeSet::default())
            .expect("paths");
        assert_eq!(paths, vec!["src/database.py", "database/readme.md"]);
    }

    #[test]
    fn test_ties_break_by_path() {
        let tmp = TempDir::new().unwrap();
        let root = tmp.path();
        fs::write(root.join("b_config.py"), "").unwrap();
        fs::write(root.join("a_config.py"), "").unwrap();

        let paths = PathHeuristicBackend
            .select("config", root, 10, &ExcludeSet::default())
            .expect("paths");
        assert_eq!(paths, vec!["a_config.py", "b_config.py"]);
    }

    #[test]
    fn test_excluded_files_never_scored() {
        let tmp = TempDir::new().unwrap();
        let root = tmp.path();
        fs::create_dir_all(root.join("vendor")).unwrap();
        fs::write(root.join("vendor/database.py"), "").unwrap();

        let paths = PathHeuristicBackend
            .select("database", root, 10, &ExcludeSet::with_extra(["vendor"]))
            .expect("paths");
        assert!(paths.is_empty());
    }
}
