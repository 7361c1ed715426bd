//! Configuration management for devhelper.
//!
//! # Configuration File Format
//!
//! Configuration is stored in TOML format. The search order is:
//! 1. `./devhelper.toml` (project-local)
//! 2. `~/.config/devhelper/config.toml` (XDG config)
//!
//! An explicit `--config` path replaces the search. Command-line flags
//! override file values.
//!
//! # Example Configuration
//!
//! ```toml
//! system_prompt = "You help with this Rust workspace."
//! max_tool_rounds = 16
//! read_only = false
//!
//! [provider]
//! model = "gpt-4"
//! base_url = "https://api.openai.com/v1"
//! api_key_env = "OPENAI_API_KEY"
//! timeout_secs = 60
//! max_tokens = 4096
//!
//! [logging]
//! level = "warn"
//! log_requests = false
//! ```

mod file;
mod types;

pub use file::{from_path, from_str, load, load_from, search_paths, xdg_config_dir};
pub use types::{DevHelperConfig, ProviderSettings};
