//! Analysis service - operation surface and background pipeline
//!
//! The service owns the pieces every analysis needs: the configuration, the
//! live job registry, the durable record store, and the shared HTTP client.
//! It is constructed explicitly and handed to whoever needs it; there is no
//! ambient global state.
//!
//! Each submitted URL becomes one background task driving the pipeline:
//! Queued -> Running -> analyze (fetch, parse, verify with the probe pool's
//! completion barrier) -> finalize (Done or Error) -> persist the final
//! state back to the record store.

use crate::analyzer::{self, build_http_client};
use crate::config::Config;
use crate::job::{Job, JobId, JobRegistry, JobStatus};
use crate::storage::{open_store, AnalysisRecord, RecordStore};
use crate::{PagelensError, Result};
use chrono::Utc;
use reqwest::Client;
use std::path::Path;
use std::sync::{Arc, Mutex};

/// Shared handle to the record store
///
/// Store access is brief and scoped; the lock is never held across an await
/// point.
pub type SharedStore = Arc<Mutex<dyn RecordStore + Send>>;

/// The analysis service
pub struct AnalysisService {
    config: Arc<Config>,
    registry: Arc<JobRegistry>,
    store: SharedStore,
    client: Client,
}

impl AnalysisService {
    /// Creates a service over an existing record store
    pub fn new(config: Config, store: SharedStore) -> Result<Self> {
        let client = build_http_client(&config.fetch)?;
        Ok(Self {
            config: Arc::new(config),
            registry: Arc::new(JobRegistry::new()),
            store,
            client,
        })
    }

    /// Creates a service, opening the SQLite store from the configuration
    pub fn open(config: Config) -> Result<Self> {
        let store = open_store(Path::new(&config.storage.database_path))?;
        Self::new(config, Arc::new(Mutex::new(store)))
    }

    /// The live job registry (shared with status pollers)
    pub fn registry(&self) -> Arc<JobRegistry> {
        Arc::clone(&self.registry)
    }

    /// Submits a URL for analysis
    ///
    /// Creates the durable record and the live job, spawns the background
    /// pipeline, and returns immediately with the created record. The URL is
    /// validated by the pipeline, so a malformed URL surfaces as a job in
    /// Error state rather than a submission failure.
    pub fn submit(&self, url: &str) -> Result<AnalysisRecord> {
        let mut record = AnalysisRecord::queued(url, Utc::now());
        let id = {
            let mut store = self.store.lock().unwrap();
            store.create(&record)?
        };
        record.id = id;

        self.registry.submit(id, url);
        tracing::info!("Submitted analysis job {} for {}", id, url);

        self.spawn_pipeline(id, url.to_string());
        Ok(record)
    }

    /// Re-queues analysis for an already-persisted record
    ///
    /// The new job shares the record's identifier but none of the prior
    /// run's in-memory state.
    pub fn rerun(&self, id: i64) -> Result<AnalysisRecord> {
        let record = {
            let store = self.store.lock().unwrap();
            store.find_by_id(id).map_err(|e| match e {
                crate::storage::StoreError::NotFound(id) => PagelensError::RecordNotFound(id),
                other => PagelensError::Store(other),
            })?
        };

        self.registry.submit(id, &record.url);
        tracing::info!("Re-running analysis job {} for {}", id, record.url);

        self.spawn_pipeline(id, record.url.clone());
        Ok(record)
    }

    /// Returns a point-in-time snapshot of a live job
    ///
    /// Unknown ids signal NotFound, even when a durable record exists: only
    /// jobs submitted or re-run during this process's lifetime are live.
    pub fn job_status(&self, id: JobId) -> Result<Job> {
        self.registry.get(id).ok_or(PagelensError::JobNotFound(id))
    }

    /// Returns all persisted records, newest first
    pub fn records(&self) -> Result<Vec<AnalysisRecord>> {
        let store = self.store.lock().unwrap();
        Ok(store.find_all()?)
    }

    /// Deletes a persisted record
    pub fn delete(&self, id: i64) -> Result<()> {
        let mut store = self.store.lock().unwrap();
        store.delete(id).map_err(|e| match e {
            crate::storage::StoreError::NotFound(id) => PagelensError::RecordNotFound(id),
            other => PagelensError::Store(other),
        })
    }

    /// Spawns the background pipeline task for a job
    fn spawn_pipeline(&self, id: JobId, url: String) {
        let config = Arc::clone(&self.config);
        let registry = Arc::clone(&self.registry);
        let store = Arc::clone(&self.store);
        let client = self.client.clone();

        tokio::spawn(async move {
            run_pipeline(id, url, config, registry, store, client).await;
        });
    }
}

/// Drives one job from Queued to its terminal state
async fn run_pipeline(
    id: JobId,
    url: String,
    config: Arc<Config>,
    registry: Arc<JobRegistry>,
    store: SharedStore,
    client: Client,
) {
    registry.transition(id, JobStatus::Running);

    match analyzer::analyze(&client, &url, &config.verifier).await {
        Ok(report) => {
            finalize(id, JobStatus::Done, Some(report), &registry, &store);
        }
        Err(e) => {
            tracing::warn!("Job {}: analysis failed: {}", id, e);
            finalize(id, JobStatus::Error, None, &registry, &store);
        }
    }
}

/// Finalizes a job and persists its completed state
///
/// The registry is updated first (report before status, so a Done job is
/// never visible without its results), then the durable record is loaded
/// and updated exactly once. A persistence failure is reported to the
/// operator log and leaves the job-visible state untouched.
fn finalize(
    id: JobId,
    status: JobStatus,
    report: Option<analyzer::AnalysisReport>,
    registry: &JobRegistry,
    store: &SharedStore,
) {
    if let Some(ref report) = report {
        registry.set_report(id, report.clone());
    }
    registry.transition(id, status);
    tracing::info!("Job {} finalized as {}", id, status);

    let mut store = store.lock().unwrap();
    let mut record = match store.find_by_id(id) {
        Ok(record) => record,
        Err(e) => {
            tracing::error!("Job {}: failed to load record for final write: {}", id, e);
            return;
        }
    };

    record.status = status.label().to_string();
    if let Some(report) = report {
        record.title = report.title;
        record.html_version = report.html_version.label().to_string();
        record.internal_links = report.internal_links;
        record.external_links = report.external_links;
        record.login_form = report.login_form;
        record.broken_links = report.broken_links;
    }

    if let Err(e) = store.update(&record) {
        tracing::error!("Job {}: failed to persist final state: {}", id, e);
    }
}
