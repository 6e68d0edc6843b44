use async_trait::async_trait;
use reqwest::{Client, Method, RequestBuilder, Response, StatusCode, Url};
use serde::Deserialize;
use tracing::{debug, warn};

use crate::error::{extract_message, Error, Result};
use crate::model::{MigrationOutcome, MigrationRequest};
use crate::provider::{endpoint, parse_base_url, BranchPayload, DestinationProvider};

/// A Gitea compatible forge (Gitea, Forgejo, Codeberg) receiving the mirrors.
#[derive(Clone)]
pub struct GiteaProvider {
    client: Client,
    base_url: Url,
    token: String,
}

#[derive(Debug, Deserialize)]
struct DestinationRepo {
    #[serde(default)]
    default_branch: Option<String>,
}

impl GiteaProvider {
    pub fn configure_provider(host: &str, token: &str) -> Result<Self> {
        let client = Client::builder()
            .user_agent(concat!("mirrorsync/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Self::with_client(client, host, token)
    }

    pub fn with_client(client: Client, host: &str, token: &str) -> Result<Self> {
        Ok(GiteaProvider {
            client,
            base_url: parse_base_url(host)?,
            token: token.to_string(),
        })
    }

    pub fn host(&self) -> &str {
        self.base_url.as_str().trim_end_matches('/')
    }

    /// `segments` go below `{host}/api/v1`, each one percent-encoded.
    fn request(&self, method: Method, segments: &[&str]) -> RequestBuilder {
        let mut path = vec!["api", "v1"];
        path.extend_from_slice(segments);
        self.client
            .request(method, endpoint(&self.base_url, &path))
            .header("Accept", "application/json")
            .header("Authorization", format!("token {}", self.token))
    }

    async fn error_from(response: Response) -> Error {
        let status = response.status();
        let body = response.text().await.unwrap_or_default();
        let message = extract_message(&body).unwrap_or_else(|| status.to_string());
        Error::from_status(status.as_u16(), message)
    }

    /// GET returning `Ok(None)` on 404.
    async fn get_optional<T: serde::de::DeserializeOwned>(
        &self,
        segments: &[&str],
    ) -> Result<Option<T>> {
        let response = self.request(Method::GET, segments).send().await?;
        match response.status() {
            StatusCode::NOT_FOUND => Ok(None),
            status if status.is_success() => {
                let body = response.bytes().await?;
                Ok(Some(serde_json::from_slice(&body)?))
            }
            _ => Err(Self::error_from(response).await),
        }
    }
}

#[async_trait]
impl DestinationProvider for GiteaProvider {
    async fn migrate(&self, request: &MigrationRequest) -> MigrationOutcome {
        let response = match self
            .request(Method::POST, &["repos", "migrate"])
            .json(request)
            .send()
            .await
        {
            Ok(response) => response,
            Err(error) => {
                warn!(repo = %request.repo_name, %error, "migrate request did not complete");
                return MigrationOutcome::transport_failure(error.to_string());
            }
        };

        let status = response.status().as_u16();
        let message = match status {
            201 | 409 => None,
            _ => extract_message(&response.text().await.unwrap_or_default()),
        };
        debug!(repo = %request.repo_name, status, "migrate answered");

        MigrationOutcome::from_response(status, message)
    }

    async fn mirror_sync(&self, owner: &str, name: &str) -> Result<()> {
        let response = self
            .request(Method::POST, &["repos", owner, name, "mirror-sync"])
            .send()
            .await?;
        if response.status() == StatusCode::OK {
            return Ok(());
        }
        Err(Self::error_from(response).await)
    }

    async fn branch_head(&self, owner: &str, name: &str, branch: &str) -> Result<Option<String>> {
        let payload: Option<BranchPayload> = self
            .get_optional(&["repos", owner, name, "branches", branch])
            .await?;
        Ok(payload.and_then(BranchPayload::head_commit))
    }

    async fn default_branch(&self, owner: &str, name: &str) -> Result<Option<String>> {
        let repo: Option<DestinationRepo> = self.get_optional(&["repos", owner, name]).await?;
        Ok(repo
            .and_then(|repo| repo.default_branch)
            .filter(|branch| !branch.is_empty()))
    }
}
