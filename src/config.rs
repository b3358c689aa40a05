use std::path::{Path, PathBuf};

use anyhow::Context;
use serde::Deserialize;

pub const DEFAULT_LISTEN_ADDR: &str = "127.0.0.1:12345";
pub const DEFAULT_MAX_BODY_SIZE: u64 = 10 * 1024 * 1024;
pub const DEFAULT_CHUNK_SIZE: usize = 4096;

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub server: ServerConfig,
    pub limits: Limits,
    pub static_files: Vec<StaticFile>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub listen_addr: String,
    /// Answer methods other than GET and POST with 405 instead of
    /// silently sending nothing.
    pub reject_unknown_methods: bool,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Limits {
    /// Largest `Content-Length` a request may declare, in bytes.
    pub max_body_size: u64,
    /// Largest single read while receiving a body.
    pub chunk_size: usize,
}

/// A file the demo handler serves verbatim at a fixed route.
#[derive(Debug, Clone, Deserialize)]
pub struct StaticFile {
    pub route: String,
    pub path: PathBuf,
    #[serde(default = "default_content_type")]
    pub content_type: String,
}

fn default_content_type() -> String {
    "application/octet-stream".to_string()
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            listen_addr: DEFAULT_LISTEN_ADDR.to_string(),
            reject_unknown_methods: false,
        }
    }
}

impl Default for Limits {
    fn default() -> Self {
        Self {
            max_body_size: DEFAULT_MAX_BODY_SIZE,
            chunk_size: DEFAULT_CHUNK_SIZE,
        }
    }
}

impl Limits {
    pub fn validate(&self) -> anyhow::Result<()> {
        if self.chunk_size == 0 {
            anyhow::bail!("limits.chunk_size must be greater than zero");
        }
        if usize::try_from(self.max_body_size).is_err() {
            anyhow::bail!(
                "limits.max_body_size must not exceed {} on this platform",
                usize::MAX
            );
        }
        Ok(())
    }
}

impl Config {
    /// Builds the configuration from defaults, the YAML file named by the
    /// `CONFIG` environment variable, and a `LISTEN` override.
    pub fn load() -> anyhow::Result<Self> {
        let mut cfg = match std::env::var_os("CONFIG") {
            Some(path) => Self::from_file(Path::new(&path))?,
            None => Self::default(),
        };

        if let Ok(addr) = std::env::var("LISTEN") {
            cfg.server.listen_addr = addr;
        }

        Ok(cfg)
    }

    pub fn from_file(path: &Path) -> anyhow::Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("reading config file {}", path.display()))?;
        Self::from_yaml(&text)
            .with_context(|| format!("parsing config file {}", path.display()))
    }

    pub fn from_yaml(text: &str) -> anyhow::Result<Self> {
        let cfg: Config = serde_yaml::from_str(text)?;
        cfg.limits.validate()?;
        Ok(cfg)
    }
}
