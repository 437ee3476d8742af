use crate::config::CONFIG_FILE_NAME;
use crate::io;
use anyhow::Result;
use std::path::Path;

pub const DEFAULT_CONFIG: &str = r#"# enumguard configuration

[rule]
enabled = true
# Methods that turn the current method into an enumerator
conversion_methods = ["to_enum", "enum_for"]
# How to treat methods and calls that forward with `...`: skip, flag or accept
forwarding_policy = "skip"

[ignore]
patterns = [
    "vendor/**",
    "tmp/**",
    "node_modules/**",
]

[output]
default_format = "terminal"
"#;

pub fn init_config(force: bool) -> Result<()> {
    init_config_in(Path::new("."), force)
}

pub fn init_config_in(dir: &Path, force: bool) -> Result<()> {
    let config_path = dir.join(CONFIG_FILE_NAME);

    if config_path.exists() && !force {
        anyhow::bail!("Configuration file already exists. Use --force to overwrite.");
    }

    io::write_file(&config_path, DEFAULT_CONFIG)?;
    println!("Created {} configuration file", CONFIG_FILE_NAME);

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{parse_and_validate_config, EnumguardConfig};
    use tempfile::TempDir;

    #[test]
    fn test_default_config_parses_to_defaults_plus_ignores() {
        let config = parse_and_validate_config(DEFAULT_CONFIG).unwrap();
        assert_eq!(config.rule, EnumguardConfig::default().rule);
        assert_eq!(config.ignore_patterns().len(), 3);
    }

    #[test]
    fn test_init_refuses_to_overwrite_without_force() {
        let dir = TempDir::new().unwrap();
        init_config_in(dir.path(), false).unwrap();
        assert!(init_config_in(dir.path(), false).is_err());
        assert!(init_config_in(dir.path(), true).is_ok());
    }
}
