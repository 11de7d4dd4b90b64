//! `.gitignore`-style exclusion rules for the listing

use anyhow::{Context, Result};
use glob::Pattern;
use std::fs;
use std::path::Path;

/// Always hidden, before any `.gitignore` entries
pub const DEFAULT_IGNORES: [&str; 6] = [
    ".git",
    "__pycache__",
    ".vscode",
    "*.pyc",
    ".DS_Store",
    "Thumbs.db",
];

/// Hosting files hidden after the `.gitignore` entries
pub const TRAILING_IGNORES: [&str; 2] = ["_headers", ".gitignore"];

#[derive(Debug, Clone)]
enum Rule {
    /// `dir/*`: the directory and everything under it
    Subtree(String),

    /// Exact name or relative path, optionally also a glob
    Name { text: String, glob: Option<Pattern> },
}

/// Ordered set of ignore rules
#[derive(Debug, Clone, Default)]
pub struct IgnoreRules {
    rules: Vec<Rule>,
}

impl IgnoreRules {
    /// Build rules from raw pattern lines
    pub fn new<I, S>(patterns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let rules = patterns
            .into_iter()
            .map(|p| parse_rule(p.as_ref()))
            .collect();
        Self { rules }
    }

    /// Defaults, then `<root>/.gitignore` (if any), then the hosting files
    pub fn for_root(root: &Path) -> Result<Self> {
        let mut patterns: Vec<String> = DEFAULT_IGNORES.iter().map(|s| s.to_string()).collect();

        let gitignore = root.join(".gitignore");
        if gitignore.is_file() {
            let text = fs::read_to_string(&gitignore)
                .with_context(|| format!("Failed to read {}", gitignore.display()))?;
            let before = patterns.len();
            patterns.extend(
                text.lines()
                    .map(str::trim)
                    .filter(|l| !l.is_empty() && !l.starts_with('#'))
                    .map(str::to_string),
            );
            log::debug!(
                "Loaded {} pattern(s) from {}",
                patterns.len() - before,
                gitignore.display()
            );
        }

        patterns.extend(TRAILING_IGNORES.iter().map(|s| s.to_string()));
        Ok(Self::new(patterns))
    }

    /// Check a `/`-separated path relative to the listing root
    pub fn is_ignored(&self, rel_path: &str) -> bool {
        let name = rel_path.rsplit('/').next().unwrap_or(rel_path);

        self.rules.iter().any(|rule| match rule {
            Rule::Subtree(dir) => {
                rel_path == dir
                    || rel_path
                        .strip_prefix(dir.as_str())
                        .is_some_and(|rest| rest.starts_with('/'))
            }
            Rule::Name { text, glob } => {
                rel_path == text
                    || name == text
                    || glob
                        .as_ref()
                        .is_some_and(|g| g.matches(rel_path) || g.matches(name))
            }
        })
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

fn parse_rule(pattern: &str) -> Rule {
    let clean = pattern.trim_end_matches('/');

    if let Some(dir) = clean.strip_suffix("/*") {
        return Rule::Subtree(dir.to_string());
    }

    let glob = match Pattern::new(clean) {
        Ok(glob) => Some(glob),
        Err(e) => {
            log::warn!("Ignoring invalid pattern {:?}: {}", pattern, e);
            None
        }
    };
    Rule::Name {
        text: clean.to_string(),
        glob,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_exact_and_name_match() {
        let rules = IgnoreRules::new(["build.py", "docs/draft.md"]);
        assert!(rules.is_ignored("build.py"));
        assert!(rules.is_ignored("nested/build.py"));
        assert!(rules.is_ignored("docs/draft.md"));
        assert!(!rules.is_ignored("draft.md"));
    }

    #[test]
    fn test_glob_match() {
        let rules = IgnoreRules::new(["*.pyc", "audio/*.tmp"]);
        assert!(rules.is_ignored("a/b/c.pyc"));
        assert!(rules.is_ignored("audio/x.tmp"));
        assert!(!rules.is_ignored("a/c.py"));
    }

    #[test]
    fn test_subtree_rule() {
        let rules = IgnoreRules::new(["raw/*"]);
        assert!(rules.is_ignored("raw"));
        assert!(rules.is_ignored("raw/a.wav"));
        assert!(rules.is_ignored("raw/deep/b.wav"));
        assert!(!rules.is_ignored("rawhide"));
        assert!(!rules.is_ignored("other/raw"));
    }

    #[test]
    fn test_trailing_slash_stripped() {
        let rules = IgnoreRules::new(["node_modules/"]);
        assert!(rules.is_ignored("node_modules"));
        assert!(rules.is_ignored("web/node_modules"));
    }

    #[test]
    fn test_for_root_reads_gitignore() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join(".gitignore"), "# comment\n\nsecret.txt\n  drafts/*  \n").unwrap();

        let rules = IgnoreRules::for_root(dir.path()).unwrap();
        assert_eq!(rules.len(), DEFAULT_IGNORES.len() + 2 + TRAILING_IGNORES.len());
        assert!(rules.is_ignored("secret.txt"));
        assert!(rules.is_ignored("drafts/x.md"));
        assert!(rules.is_ignored(".gitignore"));
        assert!(rules.is_ignored("_headers"));
        assert!(rules.is_ignored(".git"));
        assert!(!rules.is_ignored("data.json"));
    }

    #[test]
    fn test_for_root_without_gitignore() {
        let dir = TempDir::new().unwrap();
        let rules = IgnoreRules::for_root(dir.path()).unwrap();
        assert_eq!(rules.len(), DEFAULT_IGNORES.len() + TRAILING_IGNORES.len());
    }
}
