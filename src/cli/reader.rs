use serde::Deserialize;

use super::common::{DestinationSection, SourceSection};
use crate::error::{Error, Result};
use crate::model::Strategy;

/// The configuration file as written, before fallbacks and validation.
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct Config {
    pub source: SourceSection,
    pub destination: DestinationSection,
    #[serde(default)]
    pub strategy: Strategy,
    #[serde(default)]
    pub sync_on_conflict: bool,
    #[serde(default)]
    pub sync_after_batch: bool,
    #[serde(default)]
    pub mirror_interval: Option<String>,
    #[serde(default)]
    pub concurrency: Option<usize>,
}

pub fn read_config(config: &str) -> Result<Config> {
    serde_yaml::from_str(config).map_err(|error| Error::Config(error.to_string()))
}
