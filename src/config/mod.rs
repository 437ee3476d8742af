//! Configuration loaded from `.enumguard.toml`.

mod core;
mod loader;
pub mod validation;

pub use self::core::{
    default_conversion_methods, EnumguardConfig, ForwardingPolicy, IgnoreConfig, OutputConfig,
    RuleConfig,
};
pub use loader::{
    directory_ancestors, discover_config, load_config, load_config_from,
    parse_and_validate_config, CONFIG_FILE_NAME,
};
pub use validation::validate_config;
