//! Progress events emitted while a run is reconciled.

use crate::report::{BatchSyncRecord, RepositoryRecord};

#[derive(Debug, Clone)]
#[non_exhaustive]
pub enum ReconcileProgress {
    /// The source listing finished.
    Listed {
        account: String,
        total: usize,
    },

    /// One repository went through migrate, conflict sync and verification.
    Reconciled(RepositoryRecord),

    /// The end-of-batch sync pass is starting.
    BatchSyncStarted {
        total: usize,
    },

    /// One repository of the end-of-batch sync pass was triggered.
    BatchSynced(BatchSyncRecord),
}

pub type ProgressCallback = Box<dyn Fn(ReconcileProgress) + Send + Sync>;

#[inline]
pub fn emit(on_progress: Option<&ProgressCallback>, event: ReconcileProgress) {
    if let Some(cb) = on_progress {
        cb(event);
    }
}
