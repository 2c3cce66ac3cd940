use crate::config::{Config, Provider, load_config};
use crate::errors::TranslationError;
use crate::fill::{self, RunOptions};
use crate::google::GoogleTranslator;
use crate::openai_client::OpenAiTranslator;
use crate::translator::Translator;
use anyhow::{Context, Result, anyhow};
use clap::Parser;
use std::env;
use std::io;
use std::time::Duration;
use tracing::info;

/// Everything is read from fillang.toml and the environment.
#[derive(Parser, Debug)]
#[command(
    name = "fillang",
    version,
    about = "Fill missing locale keys by machine-translating the reference file",
    long_about = "Fill missing locale keys by machine-translating the reference file.\n\n\
                  Settings come from ./fillang.toml; \
                  OPENAI_API_KEY is read from the environment or .env."
)]
pub struct Cli {}

/// The configured translation service.
pub enum Service {
    Google(GoogleTranslator),
    OpenAi(OpenAiTranslator),
}

impl Translator for Service {
    async fn translate(&self, text: &str, language: &str) -> Result<String, TranslationError> {
        match self {
            Service::Google(t) => t.translate(text, language).await,
            Service::OpenAi(t) => t.translate(text, language).await,
        }
    }
}

pub fn build_service(cfg: &Config) -> Result<Service> {
    let tc = &cfg.translator;
    let timeout = tc.timeout_secs.map(Duration::from_secs);
    match tc.provider {
        Provider::Google => {
            let t = GoogleTranslator::new(tc.endpoint.clone(), tc.source_language.clone(), timeout)
                .context("Building Google translation client")?;
            Ok(Service::Google(t))
        }
        Provider::OpenAi => {
            let api_key = env::var("OPENAI_API_KEY")
                .ok()
                .or(tc.api_key.clone())
                .unwrap_or_default();
            if api_key.is_empty() {
                return Err(anyhow!("OPENAI_API_KEY not set and no key in config"));
            }
            let t = OpenAiTranslator::new(
                api_key,
                tc.model.clone(),
                tc.source_language.clone(),
                tc.endpoint.clone(),
                timeout,
            )
            .context("Building OpenAI client")?;
            Ok(Service::OpenAi(t))
        }
    }
}

pub async fn handle_fill() -> Result<()> {
    let cfg = load_config()?;
    // Before the first translation call so a bad provider setup fails fast
    let service = build_service(&cfg)?;

    let reference_path = cfg.reference_path();
    let targets =
        fill::discover_targets(&cfg.locales_dir, &cfg.reference, &cfg.extension, &cfg.languages)
            .with_context(|| format!("Listing locale files in {:?}", cfg.locales_dir))?;
    info!(
        dir = ?cfg.locales_dir,
        targets = targets.len(),
        provider = ?cfg.translator.provider,
        "Starting"
    );

    let options = RunOptions { dry_run: cfg.dry_run };
    let mut stdout = io::stdout().lock();
    let summary = fill::run(&reference_path, targets, &service, options, &mut stdout).await?;

    info!(
        files_updated = summary.files_updated,
        keys_added = summary.keys_added,
        fallbacks = summary.fallbacks,
        "Done"
    );
    Ok(())
}
