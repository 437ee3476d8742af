use crate::core::errors::Result;
use ignore::WalkBuilder;
use std::path::{Path, PathBuf};

const RUBY_EXTENSIONS: &[&str] = &["rb", "rake", "gemspec", "ru"];
const RUBY_FILE_NAMES: &[&str] = &["Rakefile", "Gemfile", "Guardfile", "Capfile"];

pub struct FileWalker {
    root: PathBuf,
    ignore_patterns: Vec<glob::Pattern>,
}

impl FileWalker {
    pub fn new(root: PathBuf) -> Self {
        Self {
            root,
            ignore_patterns: vec![],
        }
    }

    pub fn with_ignore_patterns(mut self, patterns: &[String]) -> Result<Self> {
        self.ignore_patterns = patterns
            .iter()
            .map(|p| glob::Pattern::new(p))
            .collect::<std::result::Result<_, _>>()?;
        Ok(self)
    }

    pub fn walk(&self) -> Result<Vec<PathBuf>> {
        if self.root.is_file() {
            return Ok(vec![self.root.clone()]);
        }

        let mut files = Vec::new();
        let walker = WalkBuilder::new(&self.root)
            .hidden(false)
            .git_ignore(true)
            .build();

        for entry in walker {
            let entry = entry?;
            let path = entry.path();

            if path.is_file() && self.should_process(path) {
                files.push(path.to_path_buf());
            }
        }

        files.sort();
        Ok(files)
    }

    fn should_process(&self, path: &Path) -> bool {
        if !is_ruby_file(path) {
            return false;
        }

        let relative = path.strip_prefix(&self.root).unwrap_or(path);
        !self
            .ignore_patterns
            .iter()
            .any(|pattern| pattern.matches_path(relative) || pattern.matches_path(path))
    }
}

pub fn is_ruby_file(path: &Path) -> bool {
    let by_extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| RUBY_EXTENSIONS.contains(&ext));
    let by_name = path
        .file_name()
        .and_then(|name| name.to_str())
        .is_some_and(|name| RUBY_FILE_NAMES.contains(&name));
    by_extension || by_name
}

pub fn find_ruby_files(root: &Path, ignore_patterns: &[String]) -> Result<Vec<PathBuf>> {
    FileWalker::new(root.to_path_buf())
        .with_ignore_patterns(ignore_patterns)?
        .walk()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn touch(root: &Path, relative: &str) {
        let path = root.join(relative);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, "").unwrap();
    }

    #[test]
    fn test_walk_selects_ruby_files() {
        let dir = TempDir::new().unwrap();
        touch(dir.path(), "lib/widget.rb");
        touch(dir.path(), "lib/tasks/build.rake");
        touch(dir.path(), "Rakefile");
        touch(dir.path(), "README.md");
        touch(dir.path(), "src/main.rs");

        let files = find_ruby_files(dir.path(), &[]).unwrap();
        let names: Vec<_> = files
            .iter()
            .map(|p| p.strip_prefix(dir.path()).unwrap().to_path_buf())
            .collect();

        assert_eq!(
            names,
            vec![
                PathBuf::from("Rakefile"),
                PathBuf::from("lib/tasks/build.rake"),
                PathBuf::from("lib/widget.rb"),
            ]
        );
    }

    #[test]
    fn test_walk_applies_ignore_patterns() {
        let dir = TempDir::new().unwrap();
        touch(dir.path(), "lib/widget.rb");
        touch(dir.path(), "vendor/bundle/gem.rb");

        let files = find_ruby_files(dir.path(), &["vendor/**".to_string()]).unwrap();

        assert_eq!(files, vec![dir.path().join("lib/widget.rb")]);
    }

    #[test]
    fn test_single_file_root() {
        let dir = TempDir::new().unwrap();
        touch(dir.path(), "one.rb");

        let files = find_ruby_files(&dir.path().join("one.rb"), &[]).unwrap();
        assert_eq!(files.len(), 1);
    }

    #[test]
    fn test_invalid_pattern_is_an_error() {
        let dir = TempDir::new().unwrap();
        assert!(find_ruby_files(dir.path(), &["[".to_string()]).is_err());
    }
}
