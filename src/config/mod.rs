//! Config module.
//! Provides configuration types, default paths and XML loading.

pub mod paths;
pub mod types;
pub mod xml;

pub use paths::{default_config_path, default_log_path, path_has_symlink_ancestor};
pub use types::{Config, LogLevel};
pub use xml::{create_template_config, load_config, load_config_from_xml_path};

/// Environment variable naming an explicit config file.
pub const CONFIG_ENV: &str = "EDMV_CONFIG";

/// Editor arguments that select side-by-side compare mode (vim/nvim).
pub const DEFAULT_DIFF_ARGS: &str = "-d";

pub const DEFAULT_MISMATCH_DELAY: std::time::Duration = std::time::Duration::from_secs(3);
