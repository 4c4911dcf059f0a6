//! In-memory registry of live analysis jobs
//!
//! The registry is the only structure shared between the operation boundary
//! (status polls) and the background workers that drive analyses. Reads take
//! a shared lock and never block each other; writes are serialized through
//! the exclusive lock, so a reader always sees either none or all of a
//! result write.

use crate::analyzer::AnalysisReport;
use crate::job::JobStatus;
use std::collections::HashMap;
use std::sync::RwLock;

/// Identifier of an analysis job, assigned at submission from the durable
/// record's row id and stable for the job's lifetime.
pub type JobId = i64;

/// One in-flight or completed analysis
#[derive(Debug, Clone)]
pub struct Job {
    pub id: JobId,

    /// The page to analyze; immutable once the job starts
    pub url: String,

    pub status: JobStatus,

    /// Analysis results; None until the job reaches Done
    pub report: Option<AnalysisReport>,
}

/// Shared map of live jobs keyed by job id
///
/// A single registry instance is owned by the analysis service and handed to
/// background workers as an `Arc`; there is no process-wide global. None of
/// the registry operations fail: unknown ids and illegal transitions are
/// reported through return values and logs, never through errors.
#[derive(Debug, Default)]
pub struct JobRegistry {
    jobs: RwLock<HashMap<JobId, Job>>,
}

impl JobRegistry {
    /// Creates an empty registry
    pub fn new() -> Self {
        Self {
            jobs: RwLock::new(HashMap::new()),
        }
    }

    /// Registers a job in Queued state and returns its snapshot
    ///
    /// Submitting an id that is already present replaces the previous entry:
    /// a re-run starts a fresh Queued -> Running cycle against the same
    /// persisted record and does not inherit the prior run's in-memory
    /// history.
    pub fn submit(&self, id: JobId, url: &str) -> Job {
        let job = Job {
            id,
            url: url.to_string(),
            status: JobStatus::Queued,
            report: None,
        };

        let mut jobs = self.jobs.write().unwrap();
        if jobs.insert(id, job.clone()).is_some() {
            tracing::debug!("Replaced existing registry entry for job {}", id);
        }
        job
    }

    /// Returns a point-in-time snapshot of a job, or None for unknown ids
    pub fn get(&self, id: JobId) -> Option<Job> {
        let jobs = self.jobs.read().unwrap();
        jobs.get(&id).cloned()
    }

    /// Applies a status transition
    ///
    /// Only legal forward transitions are applied; anything else is refused
    /// and logged. Returns true if the transition was applied.
    pub fn transition(&self, id: JobId, next: JobStatus) -> bool {
        let mut jobs = self.jobs.write().unwrap();
        let Some(job) = jobs.get_mut(&id) else {
            tracing::debug!("Ignoring transition for unknown job {}", id);
            return false;
        };

        if !job.status.can_transition_to(next) {
            tracing::warn!(
                "Refusing illegal transition {} -> {} for job {}",
                job.status,
                next,
                id
            );
            return false;
        }

        tracing::debug!("Job {}: {} -> {}", id, job.status, next);
        job.status = next;
        true
    }

    /// Stores the analysis results for a job
    ///
    /// All result fields become visible in one step. Terminal jobs are
    /// immutable, so a report arriving after Done/Error is discarded.
    pub fn set_report(&self, id: JobId, report: AnalysisReport) {
        let mut jobs = self.jobs.write().unwrap();
        let Some(job) = jobs.get_mut(&id) else {
            tracing::debug!("Ignoring report for unknown job {}", id);
            return;
        };

        if job.status.is_terminal() {
            tracing::warn!("Discarding report for already-finalized job {}", id);
            return;
        }

        job.report = Some(report);
    }

    /// Number of jobs currently tracked (all states, including terminal)
    pub fn len(&self) -> usize {
        self.jobs.read().unwrap().len()
    }

    /// Returns true if no jobs are tracked
    pub fn is_empty(&self) -> bool {
        self.jobs.read().unwrap().is_empty()
    }
}
