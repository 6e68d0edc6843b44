use futures::stream::{self, StreamExt};
use tracing::{info, warn};

use crate::cli::Settings;
use crate::error::Result;
use crate::migrate::{MigrationRequester, SyncTrigger};
use crate::model::{MigrationStatus, RepositoryDescriptor, VerificationStatus};
use crate::progress::{emit, ProgressCallback, ReconcileProgress};
use crate::provider::{DestinationProvider, SourceProvider};
use crate::report::{BatchSyncRecord, RepositoryRecord, RunReport};
use crate::verify::ConsistencyVerifier;

/// Sequences listing, migration, syncs and verification for one run.
///
/// Only the listing can fail the run. Anything that goes wrong for a single
/// repository ends up in that repository's record and the loop moves on.
pub struct ReconciliationDriver<'a> {
    settings: &'a Settings,
    source: &'a dyn SourceProvider,
    destination: &'a dyn DestinationProvider,
}

impl<'a> ReconciliationDriver<'a> {
    pub fn new(
        settings: &'a Settings,
        source: &'a dyn SourceProvider,
        destination: &'a dyn DestinationProvider,
    ) -> Self {
        ReconciliationDriver {
            settings,
            source,
            destination,
        }
    }

    pub async fn run(&self, on_progress: Option<&ProgressCallback>) -> Result<RunReport> {
        let account = &self.settings.source_account;
        let repositories = self.source.list_repositories(account).await?;
        info!(%account, total = repositories.len(), "listed source repositories");
        emit(
            on_progress,
            ReconcileProgress::Listed {
                account: account.clone(),
                total: repositories.len(),
            },
        );

        let mut report = RunReport::default();
        if repositories.is_empty() {
            return Ok(report);
        }

        // `buffered` yields in listing order whatever the completion order.
        let mut records = stream::iter(repositories)
            .map(|repository| self.reconcile(repository))
            .buffered(self.settings.concurrency.max(1));

        while let Some(record) = records.next().await {
            emit(on_progress, ReconcileProgress::Reconciled(record.clone()));
            report.repositories.push(record);
        }

        if self.settings.syncs_after_batch() {
            report.batch_syncs = self.sync_batch(&report.repositories, on_progress).await;
        }

        Ok(report)
    }

    /// migrate, then the conflict sync if it applies, then verify.
    pub async fn reconcile(&self, repository: RepositoryDescriptor) -> RepositoryRecord {
        let owner = &self.settings.destination_owner;

        let migration = MigrationRequester::new(self.settings, self.destination)
            .request(&repository)
            .await;

        let conflict_sync = if migration.status == MigrationStatus::AlreadyExists
            && self.settings.syncs_on_conflict()
        {
            Some(
                SyncTrigger::new(self.destination)
                    .sync(owner, &repository.name)
                    .await,
            )
        } else {
            None
        };

        let verification = ConsistencyVerifier::new(self.source, self.destination)
            .verify(
                &repository.full_name,
                owner,
                &repository.name,
                repository.default_branch.as_deref(),
            )
            .await;
        if verification.status == VerificationStatus::Mismatch {
            warn!(
                repo = %repository.full_name,
                branch = ?verification.branch,
                source_head = ?verification.source_head,
                destination_head = ?verification.destination_head,
                "destination head differs from source"
            );
        }

        RepositoryRecord {
            repository,
            migration,
            conflict_sync,
            verification,
        }
    }

    async fn sync_batch(
        &self,
        records: &[RepositoryRecord],
        on_progress: Option<&ProgressCallback>,
    ) -> Vec<BatchSyncRecord> {
        let eligible: Vec<&RepositoryRecord> = records
            .iter()
            .filter(|record| record.migration.is_synced_after_batch())
            .collect();
        emit(
            on_progress,
            ReconcileProgress::BatchSyncStarted {
                total: eligible.len(),
            },
        );

        let trigger = SyncTrigger::new(self.destination);
        let mut synced = Vec::with_capacity(eligible.len());
        for record in eligible {
            let name = record.repository.name.clone();
            let outcome = trigger.sync(&self.settings.destination_owner, &name).await;
            let batch_record = BatchSyncRecord { name, outcome };
            emit(on_progress, ReconcileProgress::BatchSynced(batch_record.clone()));
            synced.push(batch_record);
        }
        synced
    }
}
