//! Configuration management for the CLI.
//!
//! Configuration is stored in ~/.chainspeak/{app_name}/config.yaml and holds
//! named contexts, one of which may be current.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Default base configuration directory name.
pub const DEFAULT_BASE_DIR: &str = ".chainspeak";
/// Default configuration filename.
pub const DEFAULT_CONFIG_FILE: &str = "config.yaml";

/// RPC endpoint used when a context does not name one.
pub const PROVIDER_URL_ENV: &str = "BASE_PROVIDER_URL";
/// Private key imported as the `default` wallet when a context has none.
pub const PRIVATE_KEY_ENV: &str = "WALLET_PRIVATE_KEY";

#[derive(Error, Debug, PartialEq, Eq)]
pub enum ConfigError {
    #[error("context '{0}' not found")]
    ContextNotFound(String),

    #[error("environment variable {0} is not set")]
    MissingEnv(String),

    #[error("unterminated ${{ in \"{0}\"")]
    UnterminatedVar(String),

    #[error("invalid {field}: {value}")]
    InvalidValue { field: &'static str, value: String },
}

/// CLI configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Application name (not serialized).
    #[serde(skip)]
    pub app_name: String,

    /// Name of the currently active context.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub current_context: String,

    /// Map of context name to context configuration.
    #[serde(default, skip_serializing_if = "HashMap::is_empty")]
    pub contexts: HashMap<String, Context>,

    #[serde(skip)]
    config_path: PathBuf,
}

/// Which chain client a context talks to.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Backend {
    /// In-process simulated ledger.
    #[default]
    Mock,
    /// A JSON-RPC node.
    Rpc,
}

impl std::fmt::Display for Backend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Backend::Mock => "mock",
            Backend::Rpc => "rpc",
        })
    }
}

/// A single chain context.
///
/// String fields may reference the environment as `$VAR` or `${VAR}`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Context {
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub name: String,

    #[serde(default)]
    pub backend: Backend,

    /// JSON-RPC endpoint (rpc backend).
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub rpc_url: String,

    /// Chain id override; derived from the endpoint when zero.
    #[serde(default, skip_serializing_if = "is_zero")]
    pub chain_id: u64,

    /// Hex private key imported as the `default` wallet.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub private_key: String,

    /// Fallback gas price in wei.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub gas_price: String,

    /// Starting balance for new mock accounts, in ether.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub mock_balance: String,

    /// RPC request timeout in seconds.
    #[serde(default, skip_serializing_if = "is_zero")]
    pub timeout: u64,
}

fn is_zero(n: &u64) -> bool {
    *n == 0
}

/// A context with environment references expanded and fallbacks applied.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResolvedContext {
    pub backend: Backend,
    pub rpc_url: Option<String>,
    pub chain_id: Option<u64>,
    pub private_key: Option<String>,
    pub gas_price: Option<u128>,
    pub mock_balance: Option<String>,
    pub timeout: Option<Duration>,
}

impl Config {
    /// Gets the default config directory.
    pub fn default_config_dir(app_name: &str) -> Option<PathBuf> {
        dirs::home_dir().map(|home| home.join(DEFAULT_BASE_DIR).join(app_name))
    }

    /// Gets the default config file path.
    pub fn default_config_path(app_name: &str) -> Option<PathBuf> {
        Self::default_config_dir(app_name).map(|dir| dir.join(DEFAULT_CONFIG_FILE))
    }

    pub fn path(&self) -> &Path {
        &self.config_path
    }

    /// Saves the configuration to disk.
    pub fn save(&self) -> anyhow::Result<()> {
        let content = serde_yaml::to_string(self)?;
        std::fs::write(&self.config_path, content)?;
        Ok(())
    }

    /// Adds or replaces a context. The first context added becomes current.
    pub fn add_context(&mut self, name: &str, mut ctx: Context) -> anyhow::Result<()> {
        ctx.name = name.to_string();
        self.contexts.insert(name.to_string(), ctx);
        if self.current_context.is_empty() {
            self.current_context = name.to_string();
        }
        self.save()
    }

    pub fn delete_context(&mut self, name: &str) -> anyhow::Result<()> {
        if self.contexts.remove(name).is_none() {
            return Err(ConfigError::ContextNotFound(name.to_string()).into());
        }
        if self.current_context == name {
            self.current_context.clear();
        }
        self.save()
    }

    pub fn use_context(&mut self, name: &str) -> anyhow::Result<()> {
        if !self.contexts.contains_key(name) {
            return Err(ConfigError::ContextNotFound(name.to_string()).into());
        }
        self.current_context = name.to_string();
        self.save()
    }

    pub fn get_context(&self, name: &str) -> Option<&Context> {
        self.contexts.get(name)
    }

    pub fn get_current_context(&self) -> Option<&Context> {
        if self.current_context.is_empty() {
            return None;
        }
        self.contexts.get(&self.current_context)
    }

    /// Resolves the context by name, or current context if name is empty.
    pub fn resolve_context(&self, name: Option<&str>) -> Option<&Context> {
        match name {
            Some(n) if !n.is_empty() => self.get_context(n),
            _ => self.get_current_context(),
        }
    }

    /// Context names in sorted order.
    pub fn list_contexts(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.contexts.keys().map(|s| s.as_str()).collect();
        names.sort_unstable();
        names
    }
}

impl Context {
    /// The context used when none is configured: an rpc backend when the
    /// provider variable is set, the mock ledger otherwise.
    pub fn ambient() -> Self {
        Self::ambient_with(env_lookup)
    }

    pub fn ambient_with(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let backend = match lookup(PROVIDER_URL_ENV) {
            Some(url) if !url.is_empty() => Backend::Rpc,
            _ => Backend::Mock,
        };
        Self {
            name: "(environment)".into(),
            backend,
            ..Default::default()
        }
    }

    /// Expands environment references and applies environment fallbacks.
    pub fn resolve(&self) -> Result<ResolvedContext, ConfigError> {
        self.resolve_with(env_lookup)
    }

    pub fn resolve_with(
        &self,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<ResolvedContext, ConfigError> {
        let field = |raw: &str, fallback: Option<&str>| -> Result<Option<String>, ConfigError> {
            let value = expand_with(raw, &lookup)?;
            if !value.is_empty() {
                return Ok(Some(value));
            }
            Ok(fallback.and_then(&lookup).filter(|v| !v.is_empty()))
        };

        let gas_price = match field(&self.gas_price, None)? {
            Some(v) => Some(v.parse::<u128>().map_err(|_| ConfigError::InvalidValue {
                field: "gas_price",
                value: v,
            })?),
            None => None,
        };

        Ok(ResolvedContext {
            backend: self.backend,
            rpc_url: field(&self.rpc_url, Some(PROVIDER_URL_ENV))?,
            chain_id: (self.chain_id != 0).then_some(self.chain_id),
            private_key: field(&self.private_key, Some(PRIVATE_KEY_ENV))?,
            gas_price,
            mock_balance: field(&self.mock_balance, None)?,
            timeout: (self.timeout != 0).then(|| Duration::from_secs(self.timeout)),
        })
    }
}

fn env_lookup(name: &str) -> Option<String> {
    std::env::var(name).ok()
}

/// Expands `$VAR` and `${VAR}` from the process environment.
pub fn expand_env(input: &str) -> Result<String, ConfigError> {
    expand_with(input, env_lookup)
}

/// Expands `$VAR` and `${VAR}` using `lookup`. A `$` not followed by a
/// variable name is kept literally.
pub fn expand_with(
    input: &str,
    lookup: impl Fn(&str) -> Option<String>,
) -> Result<String, ConfigError> {
    let mut out = String::with_capacity(input.len());
    let mut rest = input;
    while let Some(pos) = rest.find('$') {
        out.push_str(&rest[..pos]);
        let after = &rest[pos + 1..];

        let (name, consumed) = if let Some(braced) = after.strip_prefix('{') {
            let end = braced
                .find('}')
                .ok_or_else(|| ConfigError::UnterminatedVar(input.to_string()))?;
            (&braced[..end], end + 2)
        } else {
            let end = after
                .find(|c: char| !(c.is_ascii_alphanumeric() || c == '_'))
                .unwrap_or(after.len());
            (&after[..end], end)
        };

        if name.is_empty() {
            out.push('$');
            rest = after;
            continue;
        }
        let value = lookup(name).ok_or_else(|| ConfigError::MissingEnv(name.to_string()))?;
        out.push_str(&value);
        rest = &after[consumed..];
    }
    out.push_str(rest);
    Ok(out)
}

/// Loads configuration for the specified app, creating an empty file if none
/// exists.
pub fn load_config(app_name: &str, custom_path: Option<&str>) -> anyhow::Result<Config> {
    let config_path = match custom_path {
        Some(p) => PathBuf::from(p),
        None => Config::default_config_path(app_name)
            .ok_or_else(|| anyhow::anyhow!("cannot determine config path"))?,
    };

    if let Some(parent) = config_path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    let mut cfg = if config_path.exists() {
        let content = std::fs::read_to_string(&config_path)?;
        serde_yaml::from_str(&content)?
    } else {
        let cfg = Config::default();
        std::fs::write(&config_path, serde_yaml::to_string(&cfg)?)?;
        cfg
    };

    cfg.app_name = app_name.to_string();
    cfg.config_path = config_path;
    Ok(cfg)
}

/// Masks a secret for display, keeping the first and last four characters.
pub fn mask_secret(secret: &str) -> String {
    let chars: Vec<char> = secret.chars().collect();
    if chars.len() <= 8 {
        return "*".repeat(chars.len());
    }
    let head: String = chars[..4].iter().collect();
    let tail: String = chars[chars.len() - 4..].iter().collect();
    format!("{head}{}{tail}", "*".repeat(chars.len() - 8))
}
