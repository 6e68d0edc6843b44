use tracing::{debug, warn};

use crate::model::VerificationResult;
use crate::provider::{DestinationProvider, SourceProvider};

/// Compares source and destination head commits of a repository's default branch.
///
/// When the destination does not know the source's default branch at all, the
/// comparison is re-anchored on the destination's own default branch. Forges
/// may rename the default branch on import, and comparing on a name that only
/// exists on one side would report a false mismatch.
pub struct ConsistencyVerifier<'a> {
    source: &'a dyn SourceProvider,
    destination: &'a dyn DestinationProvider,
}

impl<'a> ConsistencyVerifier<'a> {
    pub fn new(source: &'a dyn SourceProvider, destination: &'a dyn DestinationProvider) -> Self {
        ConsistencyVerifier {
            source,
            destination,
        }
    }

    pub async fn verify(
        &self,
        source_full_name: &str,
        destination_owner: &str,
        destination_name: &str,
        source_default_branch: Option<&str>,
    ) -> VerificationResult {
        let branch = match source_default_branch {
            Some(branch) => branch,
            None => return VerificationResult::skipped(None),
        };

        let source_head = self.source_head(source_full_name, branch).await;
        let destination_head = self
            .destination_head(destination_owner, destination_name, branch)
            .await;

        if destination_head.is_none() {
            if let Some(result) = self
                .verify_on_destination_default(
                    source_full_name,
                    destination_owner,
                    destination_name,
                    branch,
                )
                .await
            {
                return result;
            }
        }

        VerificationResult::compare(branch, source_head, destination_head)
    }

    /// `None` when the fallback does not apply or one of its heads is unknown.
    async fn verify_on_destination_default(
        &self,
        source_full_name: &str,
        destination_owner: &str,
        destination_name: &str,
        branch: &str,
    ) -> Option<VerificationResult> {
        let fallback = match self
            .destination
            .default_branch(destination_owner, destination_name)
            .await
        {
            Ok(fallback) => fallback?,
            Err(error) => {
                warn!(repo = %destination_name, %error, "could not read destination default branch");
                return None;
            }
        };
        if fallback == branch {
            return None;
        }

        debug!(
            repo = %destination_name,
            source_branch = %branch,
            destination_branch = %fallback,
            "falling back to destination default branch"
        );
        let source_head = self.source_head(source_full_name, &fallback).await?;
        let destination_head = self
            .destination_head(destination_owner, destination_name, &fallback)
            .await?;

        Some(VerificationResult::compare(
            &fallback,
            Some(source_head),
            Some(destination_head),
        ))
    }

    async fn source_head(&self, full_name: &str, branch: &str) -> Option<String> {
        match self.source.branch_head(full_name, branch).await {
            Ok(head) => head,
            Err(error) => {
                warn!(repo = %full_name, %branch, %error, "source branch lookup failed");
                None
            }
        }
    }

    async fn destination_head(&self, owner: &str, name: &str, branch: &str) -> Option<String> {
        match self.destination.branch_head(owner, name, branch).await {
            Ok(head) => head,
            Err(error) => {
                warn!(repo = %name, %branch, %error, "destination branch lookup failed");
                None
            }
        }
    }
}
