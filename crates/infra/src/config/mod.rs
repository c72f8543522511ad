//! Configuration loading
//!
//! Builds a [`ResponsysConfig`](responsys_domain::ResponsysConfig) from
//! environment variables or a config file.

pub mod loader;

pub use loader::{load, load_dotenv, load_from_env, load_from_file, probe_config_paths};
