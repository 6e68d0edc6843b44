use colored::Colorize;

use crate::model::{
    MigrationOutcome, MigrationStatus, RepositoryDescriptor, SyncOutcome, VerificationResult,
    VerificationStatus,
};
use crate::progress::ReconcileProgress;

/// Everything that happened to one repository during a run.
#[derive(Clone, Debug)]
pub struct RepositoryRecord {
    pub repository: RepositoryDescriptor,
    pub migration: MigrationOutcome,
    /// Set when the repository already existed and a conflict sync was fired.
    pub conflict_sync: Option<SyncOutcome>,
    pub verification: VerificationResult,
}

#[derive(Clone, Debug)]
pub struct BatchSyncRecord {
    pub name: String,
    pub outcome: SyncOutcome,
}

#[derive(Clone, Debug, Default)]
pub struct RunReport {
    pub repositories: Vec<RepositoryRecord>,
    pub batch_syncs: Vec<BatchSyncRecord>,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Summary {
    pub created: usize,
    pub already_existed: usize,
    pub failed: usize,
    pub verified: usize,
    pub mismatched: usize,
    pub skipped: usize,
    pub batch_synced: usize,
    pub batch_sync_failed: usize,
}

impl RunReport {
    pub fn summary(&self) -> Summary {
        let mut summary = Summary::default();
        for record in &self.repositories {
            match record.migration.status {
                MigrationStatus::Created => summary.created += 1,
                MigrationStatus::AlreadyExists => summary.already_existed += 1,
                MigrationStatus::Failed => summary.failed += 1,
            }
            match record.verification.status {
                VerificationStatus::Verified => summary.verified += 1,
                VerificationStatus::Mismatch => summary.mismatched += 1,
                VerificationStatus::Skipped => summary.skipped += 1,
            }
        }
        for sync in &self.batch_syncs {
            if sync.outcome.is_synced() {
                summary.batch_synced += 1;
            } else {
                summary.batch_sync_failed += 1;
            }
        }
        summary
    }

    pub fn is_empty(&self) -> bool {
        self.repositories.is_empty()
    }
}

pub fn migration_line(record: &RepositoryRecord) -> String {
    let name = &record.repository.name;
    match record.migration.status {
        MigrationStatus::Created => format!("{} {}", "created".green(), name),
        MigrationStatus::AlreadyExists => {
            format!("{} {}", "already exists".yellow(), name)
        }
        MigrationStatus::Failed => {
            let status = record
                .migration
                .http_status
                .map(|s| format!("HTTP {}", s))
                .unwrap_or_else(|| "no response".to_string());
            match &record.migration.message {
                Some(message) => format!("{} {} ({}: {})", "failed".red(), name, status, message),
                None => format!("{} {} ({})", "failed".red(), name, status),
            }
        }
    }
}

pub fn sync_line(name: &str, outcome: &SyncOutcome) -> String {
    match outcome {
        SyncOutcome::Synced => format!("{} {}", "synced".green(), name),
        SyncOutcome::Failed { message, .. } => {
            format!("{} {} ({})", "sync failed".red(), name, message)
        }
    }
}

/// `None` for a repository without a default branch, there was nothing to verify.
pub fn verification_line(record: &RepositoryRecord) -> Option<String> {
    let name = &record.repository.name;
    let verification = &record.verification;
    let branch = verification.branch.as_deref()?;
    let line = match verification.status {
        VerificationStatus::Verified => format!(
            "{} {}@{} {}",
            "verified".green(),
            name,
            branch,
            short(verification.source_head.as_deref())
        ),
        VerificationStatus::Mismatch => format!(
            "{} {}@{} source {} destination {}",
            "MISMATCH".red().bold(),
            name,
            branch,
            short(verification.source_head.as_deref()),
            short(verification.destination_head.as_deref())
        ),
        VerificationStatus::Skipped => format!(
            "{} {}@{} (head commit unavailable)",
            "not verified".yellow(),
            name,
            branch
        ),
    };
    Some(line)
}

fn short(head: Option<&str>) -> &str {
    match head {
        Some(head) => head.get(..12).unwrap_or(head),
        None => "?",
    }
}

/// Console printer used by the binary.
pub fn print_progress(event: ReconcileProgress) {
    match event {
        ReconcileProgress::Listed { account, total } => {
            if total == 0 {
                println!("No repositories found for {}", account);
            } else {
                println!("Found {} repositories for {}", total, account);
            }
        }
        ReconcileProgress::Reconciled(record) => {
            println!("{}", migration_line(&record));
            if let Some(outcome) = &record.conflict_sync {
                println!("  {}", sync_line(&record.repository.name, outcome));
            }
            if let Some(line) = verification_line(&record) {
                println!("  {}", line);
            }
        }
        ReconcileProgress::BatchSyncStarted { total } => {
            println!("Syncing {} mirrors", total);
        }
        ReconcileProgress::BatchSynced(record) => {
            println!("{}", sync_line(&record.name, &record.outcome));
        }
    }
}

pub fn print_summary(report: &RunReport) {
    let summary = report.summary();
    println!(
        "{} created, {} already existed, {} failed",
        summary.created, summary.already_existed, summary.failed
    );
    let mismatched = format!("{} mismatched", summary.mismatched);
    println!(
        "{} verified, {}, {} not verified",
        summary.verified,
        if summary.mismatched > 0 {
            mismatched.red().bold().to_string()
        } else {
            mismatched
        },
        summary.skipped
    );
    if !report.batch_syncs.is_empty() {
        println!(
            "{} mirrors synced, {} sync failures",
            summary.batch_synced, summary.batch_sync_failed
        );
    }
}
