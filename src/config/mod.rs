/// Seed group definitions
pub mod groups;

/// Settings loading from config.toml and the environment
pub mod settings;

pub use groups::GroupSeed;
pub use settings::{
    AppConfig, load_app_configuration, load_config, load_config_or_default, parse_config,
};
