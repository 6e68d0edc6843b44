use async_trait::async_trait;
use reqwest::Url;
use serde::Deserialize;

use crate::error::{Error, Result};
use crate::model::{MigrationOutcome, MigrationRequest, RepositoryDescriptor};

/// Read side: the account whose repositories get mirrored.
#[async_trait]
pub trait SourceProvider: Send + Sync {
    /// Every repository owned by `account`, in listing order.
    async fn list_repositories(&self, account: &str) -> Result<Vec<RepositoryDescriptor>>;

    /// Head commit of `branch`, `Ok(None)` when the branch does not exist.
    async fn branch_head(&self, full_name: &str, branch: &str) -> Result<Option<String>>;
}

/// Write side: the forge receiving mirrors or clones.
#[async_trait]
pub trait DestinationProvider: Send + Sync {
    /// Never fails on an HTTP status, the status is part of the outcome.
    async fn migrate(&self, request: &MigrationRequest) -> MigrationOutcome;

    async fn mirror_sync(&self, owner: &str, name: &str) -> Result<()>;

    async fn branch_head(&self, owner: &str, name: &str, branch: &str) -> Result<Option<String>>;

    async fn default_branch(&self, owner: &str, name: &str) -> Result<Option<String>>;
}

/// Branch lookup response. Forges disagree on the commit field name.
#[derive(Debug, Default, Deserialize)]
pub struct BranchPayload {
    #[serde(default)]
    pub commit: Option<CommitPayload>,
}

#[derive(Debug, Default, Deserialize)]
pub struct CommitPayload {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub sha: Option<String>,
}

impl BranchPayload {
    /// `commit.id` if present, otherwise `commit.sha`.
    pub fn head_commit(self) -> Option<String> {
        let commit = self.commit?;
        commit
            .id
            .filter(|id| !id.is_empty())
            .or_else(|| commit.sha.filter(|sha| !sha.is_empty()))
    }
}

/// Base URL of a provider API. Any path it carries is kept by [`endpoint`].
pub fn parse_base_url(value: &str) -> Result<Url> {
    let url = Url::parse(value)
        .map_err(|error| Error::Config(format!("`{}` is not a valid URL: {}", value, error)))?;
    if url.cannot_be_a_base() {
        return Err(Error::Config(format!("`{}` cannot carry an API path", value)));
    }
    Ok(url)
}

/// `base` followed by `segments`, each segment percent-encoded on its own.
pub fn endpoint(base: &Url, segments: &[&str]) -> Url {
    let mut url = base.clone();
    if let Ok(mut path) = url.path_segments_mut() {
        path.pop_if_empty().extend(segments);
    }
    url
}
