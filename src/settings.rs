use std::collections::HashMap;
use std::fmt;
use std::path::Path;

use anyhow::{Context, Result};
use config::{Config, Environment, File};
use serde::Deserialize;

pub const CONFIG_FILE: &str = "pagegen.toml";
pub const ENV_PREFIX: &str = "PAGEGEN";

const DEFAULT_API_BASE: &str = "https://api.openai.com/v1";
const DEFAULT_PROJECT: &str = "pesmasterplus";

/// Process-wide settings, read once at startup and handed to each stage.
#[derive(Clone, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub openai_api_key: String,
    pub vercel_token: String,
    /// Base of an OpenAI-compatible API, without the `/chat/completions` suffix.
    pub api_base: String,
    /// Overrides the per-template default model.
    pub model: Option<String>,
    pub max_tokens: u32,
    pub temperature: f32,
    /// Project name used by `deploy` when `--project` is not given.
    pub project: String,
    pub vercel_bin: String,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            openai_api_key: String::new(),
            vercel_token: String::new(),
            api_base: DEFAULT_API_BASE.to_string(),
            model: None,
            max_tokens: 1200,
            temperature: 0.7,
            project: DEFAULT_PROJECT.to_string(),
            vercel_bin: "vercel".to_string(),
        }
    }
}

// Credentials never reach the logs.
impl fmt::Debug for Settings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Settings")
            .field("openai_api_key", &redact(&self.openai_api_key))
            .field("vercel_token", &redact(&self.vercel_token))
            .field("api_base", &self.api_base)
            .field("model", &self.model)
            .field("max_tokens", &self.max_tokens)
            .field("temperature", &self.temperature)
            .field("project", &self.project)
            .field("vercel_bin", &self.vercel_bin)
            .finish()
    }
}

fn redact(secret: &str) -> &'static str {
    if secret.is_empty() {
        "<unset>"
    } else {
        "<redacted>"
    }
}

impl Settings {
    /// Load `.env`, then layer defaults < `pagegen.toml` < `PAGEGEN_*` < credential variables.
    pub fn load() -> Result<Settings> {
        let _ = dotenvy::dotenv();
        let vars: HashMap<String, String> = std::env::vars().collect();
        Settings::from_sources(vars, Some(Path::new(CONFIG_FILE)))
    }

    pub fn from_sources(vars: HashMap<String, String>, file: Option<&Path>) -> Result<Settings> {
        let mut builder = Config::builder();
        if let Some(path) = file {
            builder = builder.add_source(File::from(path).required(false));
        }

        let openai_api_key = vars.get("OPENAI_API_KEY").cloned();
        let vercel_token = vars.get("VERCEL_TOKEN").cloned();

        let settings = builder
            .add_source(Environment::with_prefix(ENV_PREFIX).source(Some(vars)))
            .set_override_option("openai_api_key", openai_api_key)?
            .set_override_option("vercel_token", vercel_token)?
            .build()
            .context("Failed to read configuration")?;

        settings
            .try_deserialize()
            .context("Invalid configuration value")
    }
}
