//! Configuration loading for rollcall
//!
//! Two documents are read here:
//!
//! - `rollcall.toml` application settings, merged from several sources
//!   (highest priority first):
//!   1. `ROLLCALL_*` environment variables
//!   2. `--config <path>` specified file
//!   3. Project root: `./rollcall.toml` or `./.rollcall.toml`
//!   4. Global: `$XDG_CONFIG_HOME/rollcall/config.toml`
//!   5. Default values
//! - `orch-config.yaml`, the orchestration configuration the planner runs on

mod file_config;
mod loader;
mod orchestration;

pub use file_config::{
    DEFAULT_EXCLUDED_PATTERNS, DEFAULT_FALLBACK_CRITICAL_AGENTS, FileConfig, FileDiscoveryConfig,
    FileOutputConfig, FilePathsConfig, FilePolicyConfig,
};
pub use loader::ConfigLoader;
pub use orchestration::{YamlInvocationConfigSource, parse_orchestration};
