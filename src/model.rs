use serde::Serialize;

/// A repository owned by the source account.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RepositoryDescriptor {
    pub name: String,
    /// `owner/name`, used to address the repository on the source API.
    pub full_name: String,
    pub owner: String,
    pub is_private: bool,
    pub clone_address: String,
    /// Absent for empty repositories.
    pub default_branch: Option<String>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Strategy {
    /// Destination keeps pulling from the source.
    Mirror,
    /// One-time import.
    Clone,
}

impl Strategy {
    pub fn is_mirror(self) -> bool {
        matches!(self, Strategy::Mirror)
    }
}

impl Default for Strategy {
    fn default() -> Self {
        Strategy::Mirror
    }
}

impl std::str::FromStr for Strategy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "mirror" => Ok(Strategy::Mirror),
            "clone" => Ok(Strategy::Clone),
            other => Err(format!("unknown strategy `{}`, expected mirror or clone", other)),
        }
    }
}

/// Body of `POST /repos/migrate`.
#[derive(Clone, Serialize, PartialEq, Eq)]
pub struct MigrationRequest {
    pub clone_addr: String,
    pub repo_owner: String,
    pub repo_name: String,
    pub mirror: bool,
    pub private: bool,
    pub auth_username: String,
    pub auth_password: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mirror_interval: Option<String>,
}

impl MigrationRequest {
    pub fn new(
        descriptor: &RepositoryDescriptor,
        destination_owner: &str,
        strategy: Strategy,
        source_account: &str,
        source_token: &str,
        mirror_interval: Option<&str>,
    ) -> Self {
        let mirror = strategy.is_mirror();
        MigrationRequest {
            clone_addr: descriptor.clone_address.clone(),
            repo_owner: destination_owner.to_string(),
            repo_name: descriptor.name.clone(),
            mirror,
            private: descriptor.is_private,
            auth_username: source_account.to_string(),
            auth_password: source_token.to_string(),
            mirror_interval: mirror_interval
                .filter(|_| mirror)
                .map(|interval| interval.to_string()),
        }
    }
}

impl std::fmt::Debug for MigrationRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MigrationRequest")
            .field("clone_addr", &self.clone_addr)
            .field("repo_owner", &self.repo_owner)
            .field("repo_name", &self.repo_name)
            .field("mirror", &self.mirror)
            .field("private", &self.private)
            .field("auth_username", &self.auth_username)
            .field("auth_password", &"<redacted>")
            .field("mirror_interval", &self.mirror_interval)
            .finish()
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MigrationStatus {
    Created,
    AlreadyExists,
    Failed,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MigrationOutcome {
    pub status: MigrationStatus,
    /// `None` when the request never got an HTTP answer.
    pub http_status: Option<u16>,
    pub message: Option<String>,
}

impl MigrationOutcome {
    /// Classify a migrate response. 409 is the idempotency signal, not a failure.
    pub fn from_response(http_status: u16, message: Option<String>) -> Self {
        let status = match http_status {
            201 => MigrationStatus::Created,
            409 => MigrationStatus::AlreadyExists,
            _ => MigrationStatus::Failed,
        };
        MigrationOutcome {
            status,
            http_status: Some(http_status),
            message: match status {
                MigrationStatus::Failed => message,
                _ => None,
            },
        }
    }

    pub fn transport_failure(message: String) -> Self {
        MigrationOutcome {
            status: MigrationStatus::Failed,
            http_status: None,
            message: Some(message),
        }
    }

    /// Whether the repository takes part in the end-of-batch sync pass.
    pub fn is_synced_after_batch(&self) -> bool {
        matches!(
            self.status,
            MigrationStatus::Created | MigrationStatus::AlreadyExists
        )
    }
}

/// Result of forcing a mirror pull.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SyncOutcome {
    Synced,
    Failed {
        http_status: Option<u16>,
        message: String,
    },
}

impl SyncOutcome {
    pub fn is_synced(&self) -> bool {
        matches!(self, SyncOutcome::Synced)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum VerificationStatus {
    Verified,
    Mismatch,
    Skipped,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct VerificationResult {
    pub status: VerificationStatus,
    /// Branch the heads were compared on; `None` when nothing was compared.
    pub branch: Option<String>,
    pub source_head: Option<String>,
    pub destination_head: Option<String>,
}

impl VerificationResult {
    pub fn skipped(branch: Option<String>) -> Self {
        VerificationResult {
            status: VerificationStatus::Skipped,
            branch,
            source_head: None,
            destination_head: None,
        }
    }

    /// Compare two heads on `branch`; a missing side means nothing can be said.
    pub fn compare(
        branch: &str,
        source_head: Option<String>,
        destination_head: Option<String>,
    ) -> Self {
        let status = match (&source_head, &destination_head) {
            (Some(source), Some(destination)) if source == destination => {
                VerificationStatus::Verified
            }
            (Some(_), Some(_)) => VerificationStatus::Mismatch,
            _ => VerificationStatus::Skipped,
        };
        VerificationResult {
            status,
            branch: Some(branch.to_string()),
            source_head,
            destination_head,
        }
    }
}
