use std::collections::HashSet;
use std::sync::Arc;

use async_trait::async_trait;
use octocrab::Octocrab;
use reqwest::Url;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{extract_message, Error, Result};
use crate::model::RepositoryDescriptor;
use crate::provider::{endpoint, parse_base_url, BranchPayload, SourceProvider};

/// Page size requested from the listing endpoint.
pub const PAGE_SIZE: usize = 100;

const DEFAULT_BASE_URL: &str = "https://api.github.com";

/// GitHub as the source of repositories.
#[derive(Clone)]
pub struct GithubProvider {
    instance: Arc<Octocrab>,
    base_url: Url,
}

#[derive(Serialize)]
struct ListParams {
    visibility: &'static str,
    per_page: usize,
    page: u32,
}

#[derive(Debug, Deserialize)]
struct SourceRepo {
    name: String,
    full_name: String,
    owner: SourceOwner,
    #[serde(default)]
    private: bool,
    clone_url: String,
    #[serde(default)]
    default_branch: Option<String>,
}

#[derive(Debug, Deserialize)]
struct SourceOwner {
    login: String,
}

impl From<SourceRepo> for RepositoryDescriptor {
    fn from(repo: SourceRepo) -> Self {
        RepositoryDescriptor {
            name: repo.name,
            full_name: repo.full_name,
            owner: repo.owner.login,
            is_private: repo.private,
            clone_address: repo.clone_url,
            default_branch: repo.default_branch.filter(|branch| !branch.is_empty()),
        }
    }
}

fn map_octocrab_error(error: octocrab::Error) -> Error {
    match error {
        octocrab::Error::Http { source, .. } => Error::Network(source),
        other => Error::Source(other),
    }
}

impl GithubProvider {
    /// Build an authenticated client; `base_url` overrides `https://api.github.com`.
    ///
    /// A GitHub Enterprise base such as `https://ghe.example.com/api/v3` keeps
    /// its path, every route is appended below it.
    pub fn configure_provider(token: &str, base_url: Option<&str>) -> Result<Self> {
        let base_url = parse_base_url(base_url.unwrap_or(DEFAULT_BASE_URL))?;
        let instance = Octocrab::builder()
            .personal_token(token.to_string())
            .build()
            .map_err(map_octocrab_error)?;

        Ok(GithubProvider {
            instance: Arc::new(instance),
            base_url,
        })
    }

    async fn get<P: Serialize + ?Sized>(
        &self,
        segments: &[&str],
        params: Option<&P>,
    ) -> Result<reqwest::Response> {
        let url = endpoint(&self.base_url, segments);
        self.instance
            ._get(url, params)
            .await
            .map_err(map_octocrab_error)
    }

    async fn list_page(&self, page: u32) -> Result<Vec<SourceRepo>> {
        let params = ListParams {
            visibility: "all",
            per_page: PAGE_SIZE,
            page,
        };
        let response = self.get(&["user", "repos"], Some(&params)).await?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let message = extract_message(&body).unwrap_or_else(|| status.to_string());
            return Err(Error::from_status(status.as_u16(), message));
        }

        let body = response.bytes().await?;
        Ok(serde_json::from_slice(&body)?)
    }
}

#[async_trait]
impl SourceProvider for GithubProvider {
    async fn list_repositories(&self, account: &str) -> Result<Vec<RepositoryDescriptor>> {
        let mut repositories: Vec<RepositoryDescriptor> = Vec::new();
        let mut seen = HashSet::new();
        let mut page = 1u32;

        loop {
            let items = self.list_page(page).await?;
            let fetched = items.len();
            debug!(page, fetched, "fetched source listing page");

            if fetched == 0 {
                break;
            }

            for repo in items {
                if !repo.owner.login.eq_ignore_ascii_case(account) {
                    debug!(repo = %repo.full_name, "skipping repository not owned by account");
                    continue;
                }
                if seen.insert(repo.full_name.clone()) {
                    repositories.push(repo.into());
                }
            }

            if fetched < PAGE_SIZE {
                break;
            }
            page += 1;
        }

        Ok(repositories)
    }

    async fn branch_head(&self, full_name: &str, branch: &str) -> Result<Option<String>> {
        let mut segments = vec!["repos"];
        segments.extend(full_name.split('/'));
        segments.extend(["branches", branch]);
        let response = self.get(&segments, None::<&()>).await?;
        let status = response.status();
        if status.as_u16() == 404 {
            return Ok(None);
        }
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let message = extract_message(&body).unwrap_or_else(|| status.to_string());
            return Err(Error::from_status(status.as_u16(), message));
        }

        let body = response.bytes().await?;
        let payload: BranchPayload = serde_json::from_slice(&body)?;
        Ok(payload.head_commit())
    }
}
