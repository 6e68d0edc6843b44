use tracing::{info, warn};

use crate::cli::Settings;
use crate::model::{MigrationOutcome, MigrationRequest, RepositoryDescriptor, SyncOutcome};
use crate::provider::DestinationProvider;

/// Issues one create-or-acknowledge migration per repository.
pub struct MigrationRequester<'a> {
    settings: &'a Settings,
    destination: &'a dyn DestinationProvider,
}

impl<'a> MigrationRequester<'a> {
    pub fn new(settings: &'a Settings, destination: &'a dyn DestinationProvider) -> Self {
        MigrationRequester {
            settings,
            destination,
        }
    }

    pub async fn request(&self, descriptor: &RepositoryDescriptor) -> MigrationOutcome {
        let request = MigrationRequest::new(
            descriptor,
            &self.settings.destination_owner,
            self.settings.strategy,
            &self.settings.source_account,
            &self.settings.source_token,
            self.settings.mirror_interval.as_deref(),
        );

        let outcome = self.destination.migrate(&request).await;
        info!(
            repo = %descriptor.full_name,
            status = ?outcome.status,
            http_status = ?outcome.http_status,
            "migration requested"
        );
        outcome
    }
}

/// Forces an immediate mirror pull on the destination.
pub struct SyncTrigger<'a> {
    destination: &'a dyn DestinationProvider,
}

impl<'a> SyncTrigger<'a> {
    pub fn new(destination: &'a dyn DestinationProvider) -> Self {
        SyncTrigger { destination }
    }

    pub async fn sync(&self, owner: &str, name: &str) -> SyncOutcome {
        match self.destination.mirror_sync(owner, name).await {
            Ok(()) => {
                info!(%owner, repo = %name, "mirror sync triggered");
                SyncOutcome::Synced
            }
            Err(error) => {
                warn!(%owner, repo = %name, %error, "mirror sync failed");
                SyncOutcome::Failed {
                    http_status: error.status(),
                    message: error.to_string(),
                }
            }
        }
    }
}
