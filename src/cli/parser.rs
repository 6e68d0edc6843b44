use reqwest::Url;

use super::reader;
use crate::error::{Error, Result};
use crate::model::Strategy;

pub const SOURCE_TOKEN_ENV: &str = "GITHUB_TOKEN";
pub const DESTINATION_TOKEN_ENV: &str = "GITEA_TOKEN";

/// Fully resolved run configuration, passed by reference into the engine.
#[derive(Clone, PartialEq)]
pub struct Settings {
    pub source_account: String,
    pub source_token: String,
    /// `None` means the public GitHub API.
    pub source_api_url: Option<String>,
    pub destination_url: String,
    pub destination_owner: String,
    pub destination_token: String,
    pub strategy: Strategy,
    pub sync_on_conflict: bool,
    pub sync_after_batch: bool,
    pub mirror_interval: Option<String>,
    pub concurrency: usize,
}

impl Settings {
    /// Conflict syncs only make sense for mirrors.
    pub fn syncs_on_conflict(&self) -> bool {
        self.strategy.is_mirror() && self.sync_on_conflict
    }

    pub fn syncs_after_batch(&self) -> bool {
        self.strategy.is_mirror() && self.sync_after_batch
    }
}

impl std::fmt::Debug for Settings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Settings")
            .field("source_account", &self.source_account)
            .field("source_api_url", &self.source_api_url)
            .field("destination_url", &self.destination_url)
            .field("destination_owner", &self.destination_owner)
            .field("strategy", &self.strategy)
            .field("sync_on_conflict", &self.sync_on_conflict)
            .field("sync_after_batch", &self.sync_after_batch)
            .field("mirror_interval", &self.mirror_interval)
            .field("concurrency", &self.concurrency)
            .finish_non_exhaustive()
    }
}

/// Resolve token fallbacks through `env` and validate every field.
pub fn parse_config<F>(config: reader::Config, env: F) -> Result<Settings>
where
    F: Fn(&str) -> Option<String>,
{
    let source_account = required("source.account", config.source.account)?;
    let destination_owner = required("destination.owner", config.destination.owner)?;

    let source_token = resolve_token(
        "source.token",
        config.source.token,
        SOURCE_TOKEN_ENV,
        &env,
    )?;
    let destination_token = resolve_token(
        "destination.token",
        config.destination.token,
        DESTINATION_TOKEN_ENV,
        &env,
    )?;

    let destination_url = parse_url("destination.url", &config.destination.url)?;
    let source_api_url = match config.source.api_url {
        Some(url) => Some(parse_url("source.api_url", &url)?),
        None => None,
    };

    let concurrency = config.concurrency.unwrap_or(1);
    if concurrency == 0 {
        return Err(Error::Config("concurrency must be at least 1".to_string()));
    }

    Ok(Settings {
        source_account,
        source_token,
        source_api_url,
        destination_url,
        destination_owner,
        destination_token,
        strategy: config.strategy,
        sync_on_conflict: config.sync_on_conflict,
        sync_after_batch: config.sync_after_batch,
        mirror_interval: config
            .mirror_interval
            .map(|interval| interval.trim().to_string())
            .filter(|interval| !interval.is_empty()),
        concurrency,
    })
}

fn required(field: &str, value: String) -> Result<String> {
    let value = value.trim().to_string();
    if value.is_empty() {
        return Err(Error::Config(format!("`{}` must not be empty", field)));
    }
    Ok(value)
}

fn resolve_token<F>(field: &str, value: Option<String>, env_key: &str, env: &F) -> Result<String>
where
    F: Fn(&str) -> Option<String>,
{
    value
        .map(|token| token.trim().to_string())
        .filter(|token| !token.is_empty())
        .or_else(|| env(env_key).map(|token| token.trim().to_string()))
        .filter(|token| !token.is_empty())
        .ok_or_else(|| {
            Error::Config(format!(
                "`{}` is not set and {} is empty",
                field, env_key
            ))
        })
}

/// Absolute http(s) URL, returned without a trailing slash.
fn parse_url(field: &str, value: &str) -> Result<String> {
    let url = Url::parse(value.trim())
        .map_err(|error| Error::Config(format!("`{}` is not a valid URL: {}", field, error)))?;

    if !matches!(url.scheme(), "http" | "https") || url.host_str().is_none() {
        return Err(Error::Config(format!(
            "`{}` must be an http(s) URL, got `{}`",
            field, value
        )));
    }

    Ok(url.as_str().trim_end_matches('/').to_string())
}
