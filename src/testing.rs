//! In-memory providers recording every call, for engine unit tests.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;

use crate::cli::Settings;
use crate::error::{Error, Result};
use crate::model::{MigrationOutcome, MigrationRequest, RepositoryDescriptor, Strategy};
use crate::provider::{DestinationProvider, SourceProvider};

pub fn settings() -> Settings {
    Settings {
        source_account: "alice".to_string(),
        source_token: "ghp_token".to_string(),
        source_api_url: None,
        destination_url: "https://gitea.example.com".to_string(),
        destination_owner: "alice".to_string(),
        destination_token: "gitea_token".to_string(),
        strategy: Strategy::Mirror,
        sync_on_conflict: false,
        sync_after_batch: false,
        mirror_interval: None,
        concurrency: 1,
    }
}

pub fn repository(name: &str, default_branch: Option<&str>) -> RepositoryDescriptor {
    RepositoryDescriptor {
        name: name.to_string(),
        full_name: format!("alice/{}", name),
        owner: "alice".to_string(),
        is_private: false,
        clone_address: format!("https://github.com/alice/{}.git", name),
        default_branch: default_branch.map(|branch| branch.to_string()),
    }
}

#[derive(Default)]
pub struct StubSource {
    pub repositories: Vec<RepositoryDescriptor>,
    /// `(full_name, branch)` to head commit.
    pub heads: HashMap<(String, String), String>,
    pub reject_listing: bool,
    pub calls: Mutex<Vec<String>>,
}

impl StubSource {
    pub fn with_head(mut self, full_name: &str, branch: &str, head: &str) -> Self {
        self.heads
            .insert((full_name.to_string(), branch.to_string()), head.to_string());
        self
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl SourceProvider for StubSource {
    async fn list_repositories(&self, account: &str) -> Result<Vec<RepositoryDescriptor>> {
        self.calls.lock().unwrap().push(format!("list {}", account));
        if self.reject_listing {
            return Err(Error::Auth("Bad credentials".to_string()));
        }
        Ok(self.repositories.clone())
    }

    async fn branch_head(&self, full_name: &str, branch: &str) -> Result<Option<String>> {
        self.calls
            .lock()
            .unwrap()
            .push(format!("source head {} {}", full_name, branch));
        Ok(self
            .heads
            .get(&(full_name.to_string(), branch.to_string()))
            .cloned())
    }
}

#[derive(Default)]
pub struct StubDestination {
    /// Migrate status per repository name, 201 when absent.
    pub migrate_status: HashMap<String, u16>,
    /// Mirror sync status per repository name, 200 when absent.
    pub sync_status: HashMap<String, u16>,
    /// `(name, branch)` to head commit.
    pub heads: HashMap<(String, String), String>,
    /// Branches whose lookup errors instead of answering.
    pub broken_branches: Vec<(String, String)>,
    pub default_branches: HashMap<String, String>,
    pub calls: Mutex<Vec<String>>,
}

impl StubDestination {
    pub fn with_head(mut self, name: &str, branch: &str, head: &str) -> Self {
        self.heads
            .insert((name.to_string(), branch.to_string()), head.to_string());
        self
    }

    pub fn with_default_branch(mut self, name: &str, branch: &str) -> Self {
        self.default_branches
            .insert(name.to_string(), branch.to_string());
        self
    }

    pub fn with_migrate_status(mut self, name: &str, status: u16) -> Self {
        self.migrate_status.insert(name.to_string(), status);
        self
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    pub fn requests(&self, prefix: &str) -> usize {
        self.calls()
            .iter()
            .filter(|call| call.starts_with(prefix))
            .count()
    }
}

#[async_trait]
impl DestinationProvider for StubDestination {
    async fn migrate(&self, request: &MigrationRequest) -> MigrationOutcome {
        self.calls
            .lock()
            .unwrap()
            .push(format!("migrate {}", request.repo_name));
        let status = self
            .migrate_status
            .get(&request.repo_name)
            .copied()
            .unwrap_or(201);
        MigrationOutcome::from_response(status, Some(format!("status {}", status)))
    }

    async fn mirror_sync(&self, _owner: &str, name: &str) -> Result<()> {
        self.calls.lock().unwrap().push(format!("sync {}", name));
        match self.sync_status.get(name).copied().unwrap_or(200) {
            200 => Ok(()),
            status => Err(Error::from_status(status, "sync refused".to_string())),
        }
    }

    async fn branch_head(&self, _owner: &str, name: &str, branch: &str) -> Result<Option<String>> {
        self.calls
            .lock()
            .unwrap()
            .push(format!("destination head {} {}", name, branch));
        let key = (name.to_string(), branch.to_string());
        if self.broken_branches.contains(&key) {
            return Err(Error::Api {
                status: 500,
                message: "internal error".to_string(),
            });
        }
        Ok(self.heads.get(&key).cloned())
    }

    async fn default_branch(&self, _owner: &str, name: &str) -> Result<Option<String>> {
        self.calls
            .lock()
            .unwrap()
            .push(format!("destination default {}", name));
        Ok(self.default_branches.get(name).cloned())
    }
}
