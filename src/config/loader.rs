use std::fs;
use std::io::{BufReader, Read};
use std::path::{Path, PathBuf};

use super::core::EnumguardConfig;
use super::validation::validate_config;
use crate::core::errors::{Error, Result};

pub const CONFIG_FILE_NAME: &str = ".enumguard.toml";

/// Pure function to read config file contents
pub(crate) fn read_config_file(path: &Path) -> std::result::Result<String, std::io::Error> {
    let file = fs::File::open(path)?;
    let mut reader = BufReader::new(file);
    let mut contents = String::new();
    reader.read_to_string(&mut contents)?;
    Ok(contents)
}

/// Pure function to parse and validate config from TOML string
pub fn parse_and_validate_config(contents: &str) -> Result<EnumguardConfig> {
    let config = toml::from_str::<EnumguardConfig>(contents)?;
    validate_config(&config)?;
    Ok(config)
}

/// Load an explicitly requested config file; any failure is an error
pub fn load_config_from(path: &Path) -> Result<EnumguardConfig> {
    let contents = read_config_file(path)
        .map_err(|e| Error::file_system("Failed to read config file", path, e))?;

    parse_and_validate_config(&contents).map_err(|e| match e {
        Error::Configuration(message) => {
            Error::configuration(format!("{}: {}", path.display(), message))
        }
        other => Error::configuration(format!("{}: {}", path.display(), other)),
    })
}

/// Pure function to try loading config from a specific path
pub(crate) fn try_load_config_from_path(config_path: &Path) -> Option<EnumguardConfig> {
    let contents = match read_config_file(config_path) {
        Ok(contents) => contents,
        Err(e) => {
            handle_read_error(config_path, &e);
            return None;
        }
    };

    match parse_and_validate_config(&contents) {
        Ok(config) => {
            log::debug!("Loaded config from {}", config_path.display());
            Some(config)
        }
        Err(e) => {
            log::warn!(
                "Ignoring {}: {}. Using defaults.",
                config_path.display(),
                e
            );
            None
        }
    }
}

/// Handle file read errors with appropriate logging
pub(crate) fn handle_read_error(config_path: &Path, error: &std::io::Error) {
    // Only log actual errors, not "file not found"
    if error.kind() != std::io::ErrorKind::NotFound {
        log::warn!(
            "Failed to read config file {}: {}",
            config_path.display(),
            error
        );
    }
}

/// Pure function to generate directory ancestors up to a depth limit
pub fn directory_ancestors(start: PathBuf, max_depth: usize) -> impl Iterator<Item = PathBuf> {
    std::iter::successors(Some(start), |dir| {
        let mut parent = dir.clone();
        if parent.pop() {
            Some(parent)
        } else {
            None
        }
    })
    .take(max_depth)
}

/// Search `start` and its ancestors for `.enumguard.toml`
pub fn discover_config(start: &Path) -> EnumguardConfig {
    const MAX_TRAVERSAL_DEPTH: usize = 10;

    directory_ancestors(start.to_path_buf(), MAX_TRAVERSAL_DEPTH)
        .map(|dir| dir.join(CONFIG_FILE_NAME))
        .find_map(|path| try_load_config_from_path(&path))
        .unwrap_or_else(|| {
            log::debug!(
                "No config found after checking {} directories. Using default config.",
                MAX_TRAVERSAL_DEPTH
            );
            EnumguardConfig::default()
        })
}

/// Load configuration from the current directory upward
pub fn load_config() -> EnumguardConfig {
    match std::env::current_dir() {
        Ok(dir) => discover_config(&dir),
        Err(e) => {
            log::warn!(
                "Failed to get current directory: {}. Using default config.",
                e
            );
            EnumguardConfig::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ForwardingPolicy;
    use indoc::indoc;
    use tempfile::TempDir;

    #[test]
    fn test_parse_full_config() {
        let config = parse_and_validate_config(indoc! {r#"
            [rule]
            enabled = true
            conversion_methods = ["to_enum"]
            forwarding_policy = "flag"

            [ignore]
            patterns = ["vendor/**"]

            [output]
            default_format = "json"
        "#})
        .unwrap();

        assert_eq!(config.rule.conversion_methods, vec!["to_enum".to_string()]);
        assert_eq!(config.rule.forwarding_policy, ForwardingPolicy::Flag);
        assert_eq!(config.ignore_patterns(), vec!["vendor/**".to_string()]);
        assert_eq!(config.default_format(), Some("json"));
    }

    #[test]
    fn test_empty_config_uses_defaults() {
        let config = parse_and_validate_config("").unwrap();
        assert_eq!(config, EnumguardConfig::default());
        assert!(config.rule.enabled);
        assert_eq!(config.rule.forwarding_policy, ForwardingPolicy::Skip);
        assert_eq!(
            config.rule.conversion_methods,
            vec!["to_enum".to_string(), "enum_for".to_string()]
        );
    }

    #[test]
    fn test_unknown_policy_is_rejected() {
        let result = parse_and_validate_config("[rule]\nforwarding_policy = \"maybe\"\n");
        assert!(matches!(result, Err(Error::Toml(_))));
    }

    #[test]
    fn test_load_config_from_missing_file_fails() {
        let dir = TempDir::new().unwrap();
        let result = load_config_from(&dir.path().join("nope.toml"));
        assert!(matches!(result, Err(Error::FileSystem { .. })));
    }

    #[test]
    fn test_discover_config_in_ancestor() {
        let dir = TempDir::new().unwrap();
        let nested = dir.path().join("lib").join("widgets");
        fs::create_dir_all(&nested).unwrap();
        fs::write(
            dir.path().join(CONFIG_FILE_NAME),
            "[rule]\nforwarding_policy = \"accept\"\n",
        )
        .unwrap();

        let config = discover_config(&nested);
        assert_eq!(config.rule.forwarding_policy, ForwardingPolicy::Accept);
    }

    #[test]
    fn test_invalid_discovered_config_falls_back_to_defaults() {
        let dir = TempDir::new().unwrap();
        fs::write(
            dir.path().join(CONFIG_FILE_NAME),
            "[rule]\nconversion_methods = []\n",
        )
        .unwrap();

        // An empty method list fails validation
        let config = try_load_config_from_path(&dir.path().join(CONFIG_FILE_NAME));
        assert!(config.is_none());
    }

    #[test]
    fn test_directory_ancestors_respects_depth() {
        let dirs: Vec<_> = directory_ancestors(PathBuf::from("/a/b/c/d"), 2).collect();
        assert_eq!(dirs, vec![PathBuf::from("/a/b/c/d"), PathBuf::from("/a/b/c")]);
    }
}
