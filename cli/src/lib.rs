//! CLI utilities for chainspeak.
//!
//! Configuration contexts (kubectl style) and result output.

pub mod config;
pub mod output;

pub use config::{Backend, Config, ConfigError, Context, ResolvedContext, load_config};
pub use output::{Output, OutputFormat};
