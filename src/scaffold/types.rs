use serde::{Deserialize, Serialize};

/// One generated file, relative to the working root
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileEntry {
    pub path: String,
    pub content: String,
}

impl FileEntry {
    pub fn new(path: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            content: content.into(),
        }
    }

    /// Path with any leading `./` segments removed
    pub fn normalized_path(&self) -> &str {
        normalize_path(&self.path)
    }
}

/// Strips leading `./` segments
///
/// Dot-files keep their name: `./.gitignore` becomes `.gitignore`.
pub fn normalize_path(path: &str) -> &str {
    let mut path = path.trim();
    while let Some(rest) = path.strip_prefix("./") {
        path = rest.trim_start_matches('/');
    }
    path
}

/// Plan text plus the files implementing it
///
/// Paths are unique: when the model emits the same path twice the later content wins, at
/// the position of the first occurrence.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScaffoldResult {
    pub plan: String,
    pub files: Vec<FileEntry>,
}

impl ScaffoldResult {
    pub fn new(plan: impl Into<String>, files: Vec<FileEntry>) -> Self {
        let mut unique: Vec<FileEntry> = Vec::with_capacity(files.len());
        for file in files {
            let path = file.normalized_path().to_string();
            let entry = FileEntry::new(path, file.content);
            match unique.iter_mut().find(|existing| existing.path == entry.path) {
                Some(existing) => existing.content = entry.content,
                None => unique.push(entry),
            }
        }

        Self {
            plan: plan.into(),
            files: unique,
        }
    }

    /// True when the model produced no files and the fallback scaffold should be used
    pub fn needs_fallback(&self) -> bool {
        self.files.is_empty()
    }

    pub fn paths(&self) -> Vec<&str> {
        self.files.iter().map(|f| f.path.as_str()).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_path() {
        assert_eq!(normalize_path("./a.py"), "a.py");
        assert_eq!(normalize_path("././app/main.py"), "app/main.py");
        assert_eq!(normalize_path("./.gitignore"), ".gitignore");
        assert_eq!(normalize_path(".env.example"), ".env.example");
        assert_eq!(normalize_path("app/main.py"), "app/main.py");
    }

    #[test]
    fn test_duplicate_paths_last_write_wins() {
        let result = ScaffoldResult::new(
            "plan",
            vec![
                FileEntry::new("./a.py", "one"),
                FileEntry::new("b.py", "two"),
                FileEntry::new("a.py", "three"),
            ],
        );

        assert_eq!(result.paths(), vec!["a.py", "b.py"]);
        assert_eq!(result.files[0].content, "three");
    }

    #[test]
    fn test_empty_files_need_fallback() {
        assert!(ScaffoldResult::new("x", vec![]).needs_fallback());
        assert!(!ScaffoldResult::new("x", vec![FileEntry::new("a", "")]).needs_fallback());
    }
}
