//! # Geometry Analysis
//!
//! The quote engine does not read CAD files. Geometry comes from an external
//! analysis service that works asynchronously: a file is submitted, a job is
//! created, and the result arrives later by webhook or is collected by
//! polling.
//!
//! This module provides the seams for that collaborator:
//!
//! - [`GeometryAnalyzer`] - the service itself, as a trait
//! - [`MockAnalyzer`] - a deterministic stand-in returning blueprint geometry
//! - [`JobStore`] - keyed job-status records with an explicit lifecycle:
//!   created on submit, written on webhook, read on poll, evicted by age
//!
//! ## Example
//!
//! ```rust
//! use quote_core::analysis::{AnalysisRequest, JobStatus, JobStore, MockAnalyzer};
//!
//! let mut jobs = JobStore::new();
//! let request = AnalysisRequest::new("housing.step").unwrap();
//! let id = jobs.run(&MockAnalyzer::default(), request);
//!
//! match jobs.poll(&id) {
//!     Some(JobStatus::Completed { geometry }) => assert!(geometry.volume > 0.0),
//!     other => panic!("unexpected status: {other:?}"),
//! }
//! ```

use std::collections::HashMap;
use std::path::Path;

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::errors::{QuoteError, QuoteResult};
use crate::geometry::Geometry;

/// CAD formats the analysis service accepts (lower-case extensions)
pub const SUPPORTED_EXTENSIONS: [&str; 8] = ["step", "stp", "iges", "igs", "stl", "obj", "x_t", "sldprt"];

/// A file submitted for analysis.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalysisRequest {
    pub file_name: String,
    /// Lower-cased extension, one of [`SUPPORTED_EXTENSIONS`]
    pub file_extension: String,
}

impl AnalysisRequest {
    /// Build a request, rejecting file types the service cannot analyze.
    pub fn new(file_name: impl Into<String>) -> QuoteResult<Self> {
        let file_name = file_name.into();
        let extension = Path::new(&file_name)
            .extension()
            .map(|e| e.to_string_lossy().to_lowercase())
            .unwrap_or_default();

        if !SUPPORTED_EXTENSIONS.contains(&extension.as_str()) {
            return Err(QuoteError::invalid_input(
                "file_name",
                &file_name,
                format!("Unsupported CAD format; expected one of {}", SUPPORTED_EXTENSIONS.join(", ")),
            ));
        }

        Ok(AnalysisRequest {
            file_name,
            file_extension: extension,
        })
    }
}

/// The external CAD analysis service.
pub trait GeometryAnalyzer {
    /// Analyze one file. Errors are reported as
    /// [`QuoteError::AnalysisFailed`] by convention.
    fn analyze(&self, request: &AnalysisRequest) -> QuoteResult<Geometry>;
}

/// Blueprint analyzer: always answers with the same geometry (or the same
/// failure), tagged [`crate::geometry::Accuracy::Mocked`] by default.
#[derive(Debug, Clone)]
pub struct MockAnalyzer {
    geometry: Geometry,
    failure: Option<String>,
}

impl MockAnalyzer {
    /// Answer every request with `geometry`.
    pub fn with_geometry(geometry: Geometry) -> Self {
        MockAnalyzer {
            geometry,
            failure: None,
        }
    }

    /// Fail every request with `reason`.
    pub fn failing(reason: impl Into<String>) -> Self {
        MockAnalyzer {
            geometry: Geometry::placeholder(),
            failure: Some(reason.into()),
        }
    }
}

impl Default for MockAnalyzer {
    fn default() -> Self {
        MockAnalyzer::with_geometry(Geometry::placeholder())
    }
}

impl GeometryAnalyzer for MockAnalyzer {
    fn analyze(&self, request: &AnalysisRequest) -> QuoteResult<Geometry> {
        match &self.failure {
            Some(reason) => Err(QuoteError::analysis_failed(&request.file_name, reason)),
            None => Ok(self.geometry.clone()),
        }
    }
}

/// Identifier of an analysis job.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct JobId(pub Uuid);

impl JobId {
    pub fn new() -> Self {
        JobId(Uuid::new_v4())
    }
}

impl Default for JobId {
    fn default() -> Self {
        JobId::new()
    }
}

impl std::fmt::Display for JobId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Where a job is in its lifecycle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum JobStatus {
    /// Submitted, no result yet
    Pending,
    /// Analysis produced geometry
    Completed { geometry: Geometry },
    /// Analysis failed
    Failed { reason: String },
}

impl JobStatus {
    pub fn is_finished(&self) -> bool {
        !matches!(self, JobStatus::Pending)
    }
}

/// One job and its bookkeeping.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JobRecord {
    pub request: AnalysisRequest,
    pub status: JobStatus,
    pub submitted_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Keyed store of analysis jobs.
///
/// The store is an ordinary owned value: whoever receives webhooks and
/// whoever polls must share it explicitly. A finished job cannot be written
/// again; a late duplicate webhook is rejected rather than overwriting the
/// first result.
#[derive(Debug, Clone, Default)]
pub struct JobStore {
    jobs: HashMap<JobId, JobRecord>,
}

impl JobStore {
    pub fn new() -> Self {
        JobStore::default()
    }

    /// Create a pending job for `request`.
    pub fn submit(&mut self, request: AnalysisRequest) -> JobId {
        let id = JobId::new();
        let now = Utc::now();
        info!(job = %id, file = %request.file_name, "Submitted geometry analysis");
        self.jobs.insert(
            id,
            JobRecord {
                request,
                status: JobStatus::Pending,
                submitted_at: now,
                updated_at: now,
            },
        );
        id
    }

    /// Webhook write: the job produced geometry.
    ///
    /// Geometry that fails validation is recorded as a failure, and the
    /// validation error is returned.
    pub fn complete(&mut self, id: &JobId, geometry: Geometry) -> QuoteResult<()> {
        match geometry.validate() {
            Ok(()) => self.finish(id, JobStatus::Completed { geometry }),
            Err(e) => {
                self.finish(id, JobStatus::Failed { reason: e.to_string() })?;
                Err(e)
            }
        }
    }

    /// Webhook write: the job failed.
    pub fn fail(&mut self, id: &JobId, reason: impl Into<String>) -> QuoteResult<()> {
        self.finish(id, JobStatus::Failed { reason: reason.into() })
    }

    fn finish(&mut self, id: &JobId, status: JobStatus) -> QuoteResult<()> {
        let record = self.jobs.get_mut(id).ok_or_else(|| QuoteError::job_not_found(id))?;
        if record.status.is_finished() {
            return Err(QuoteError::invalid_input(
                "job_id",
                id.to_string(),
                "Job already has a result",
            ));
        }
        match &status {
            JobStatus::Failed { reason } => warn!(job = %id, %reason, "Geometry analysis failed"),
            _ => debug!(job = %id, "Geometry analysis completed"),
        }
        record.status = status;
        record.updated_at = Utc::now();
        Ok(())
    }

    /// Poll read: current status, or `None` for unknown (or evicted) jobs.
    pub fn poll(&self, id: &JobId) -> Option<&JobStatus> {
        self.jobs.get(id).map(|r| &r.status)
    }

    pub fn record(&self, id: &JobId) -> Option<&JobRecord> {
        self.jobs.get(id)
    }

    /// Submit `request` and resolve it immediately with `analyzer`.
    pub fn run(&mut self, analyzer: &dyn GeometryAnalyzer, request: AnalysisRequest) -> JobId {
        let id = self.submit(request.clone());
        // Neither write can hit an unknown or finished job here; a validation
        // failure is already recorded as the job's status.
        let _ = match analyzer.analyze(&request) {
            Ok(geometry) => self.complete(&id, geometry),
            Err(e) => self.fail(&id, e.to_string()),
        };
        id
    }

    /// Drop jobs not updated within `ttl` of `now`. Returns how many were evicted.
    pub fn evict_older_than(&mut self, ttl: Duration, now: DateTime<Utc>) -> usize {
        let before = self.jobs.len();
        self.jobs.retain(|_, record| now - record.updated_at <= ttl);
        let evicted = before - self.jobs.len();
        if evicted > 0 {
            debug!(evicted, remaining = self.jobs.len(), "Evicted analysis jobs");
        }
        evicted
    }

    pub fn len(&self) -> usize {
        self.jobs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.jobs.is_empty()
    }
}
