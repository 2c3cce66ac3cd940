use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

pub const CONFIG_FILE: &str = "fillang.toml";

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub locales_dir: PathBuf,
    pub reference: String,
    pub extension: String,
    pub dry_run: bool,
    /// Locale stem to language code, for when the leading segment is not enough.
    pub languages: BTreeMap<String, String>,
    pub translator: TranslatorConfig,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Provider {
    Google,
    OpenAi,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TranslatorConfig {
    pub provider: Provider,
    pub source_language: String,
    pub endpoint: Option<String>,
    pub timeout_secs: Option<u64>,
    pub model: String,
    pub api_key: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            locales_dir: PathBuf::from("src/locales"),
            reference: "en-US.json".to_string(),
            extension: "json".to_string(),
            dry_run: false,
            languages: BTreeMap::new(),
            translator: TranslatorConfig::default(),
        }
    }
}

impl Default for TranslatorConfig {
    fn default() -> Self {
        Self {
            provider: Provider::Google,
            source_language: "en".to_string(),
            endpoint: None,
            timeout_secs: None,
            model: "gpt-4o-mini".to_string(),
            api_key: None,
        }
    }
}

impl Config {
    pub fn reference_path(&self) -> PathBuf {
        self.locales_dir.join(&self.reference)
    }
}

pub fn load_config() -> Result<Config> {
    load_config_from(Path::new(CONFIG_FILE))
}

pub fn load_config_from(path: &Path) -> Result<Config> {
    if !path.exists() {
        return Ok(Config::default());
    }
    let contents = fs::read_to_string(path)
        .with_context(|| format!("Reading config file {:?}", path))?;
    let cfg: Config = toml::from_str(&contents)
        .with_context(|| format!("Parsing config file {:?}", path))?;
    Ok(cfg)
}
