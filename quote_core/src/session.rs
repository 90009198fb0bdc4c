//! # Quote Session
//!
//! Host-side state for one quoting screen: the current upload, the geometry
//! it produced, the customer's parameters and the resulting breakdown.
//!
//! The session enforces the sequencing rules around the asynchronous
//! analysis service:
//!
//! - Starting a new upload supersedes the previous one. A late result for a
//!   superseded job is discarded, never merged.
//! - A failed analysis does not leave the screen empty; the placeholder
//!   geometry is quoted instead and marked [`Accuracy::Mocked`].
//! - Each upload resolves once. A repeated result for the same job, or a
//!   result arriving after geometry was entered by hand, is ignored.
//! - Every change to geometry or parameters recomputes the breakdown from
//!   scratch.
//!
//! [`Accuracy::Mocked`]: crate::geometry::Accuracy::Mocked

use tracing::{debug, warn};

use crate::analysis::{JobId, JobStatus, JobStore};
use crate::calculations::quote::{try_calculate, ColorOption, CostBreakdown, ProcessParameters};
use crate::catalog_config::CatalogConfig;
use crate::errors::{QuoteError, QuoteResult};
use crate::geometry::Geometry;
use crate::history::SavedQuote;

/// The upload currently being quoted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Upload {
    pub file_name: String,
    pub job_id: JobId,
}

/// Result of handing an analysis outcome to the session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnalysisOutcome {
    /// Geometry from the analyzer was applied
    Applied,
    /// Analysis failed; placeholder geometry was applied instead
    SubstitutedPlaceholder,
    /// The job belongs to a superseded upload and was ignored
    Stale,
    /// The job has no result yet
    Pending,
    /// The current upload already has its geometry; nothing changed
    AlreadyResolved,
}

/// Where the session's current geometry came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GeometrySource {
    /// Reported by the analysis service
    Analysis,
    /// Placeholder quoted after the analysis failed
    Placeholder,
    /// Entered directly by the user
    Entered,
}

/// One quoting session.
#[derive(Debug, Clone)]
pub struct QuoteSession {
    catalogs: CatalogConfig,
    upload: Option<Upload>,
    geometry: Option<Geometry>,
    source: Option<GeometrySource>,
    parameters: ProcessParameters,
    breakdown: Option<CostBreakdown>,
}

impl QuoteSession {
    pub fn new(catalogs: CatalogConfig) -> Self {
        let parameters = ProcessParameters::new(catalogs.materials.first().name.clone(), 1000, 1);
        QuoteSession {
            catalogs,
            upload: None,
            geometry: None,
            source: None,
            parameters,
            breakdown: None,
        }
    }

    pub fn catalogs(&self) -> &CatalogConfig {
        &self.catalogs
    }

    pub fn upload(&self) -> Option<&Upload> {
        self.upload.as_ref()
    }

    pub fn geometry(&self) -> Option<&Geometry> {
        self.geometry.as_ref()
    }

    pub fn geometry_source(&self) -> Option<GeometrySource> {
        self.source
    }

    pub fn parameters(&self) -> &ProcessParameters {
        &self.parameters
    }

    /// Latest breakdown, `None` while there is nothing computable to quote.
    pub fn breakdown(&self) -> Option<&CostBreakdown> {
        self.breakdown.as_ref()
    }

    /// Start quoting a new file whose analysis runs as `job_id`. Geometry
    /// from any earlier upload is cleared.
    pub fn begin_upload(&mut self, file_name: impl Into<String>, job_id: JobId) {
        let upload = Upload {
            file_name: file_name.into(),
            job_id,
        };
        if let Some(previous) = &self.upload {
            debug!(superseded = %previous.job_id, current = %job_id, "New upload supersedes previous");
        }
        self.upload = Some(upload);
        self.geometry = None;
        self.source = None;
        self.recompute();
    }

    /// Apply the result of analysis job `job_id`.
    pub fn apply_analysis(&mut self, job_id: JobId, result: QuoteResult<Geometry>) -> AnalysisOutcome {
        if !self.is_current(job_id) {
            debug!(job = %job_id, "Discarding result for superseded upload");
            return AnalysisOutcome::Stale;
        }
        if let Some(source) = self.source {
            debug!(job = %job_id, ?source, "Upload already resolved, ignoring result");
            return AnalysisOutcome::AlreadyResolved;
        }

        let outcome = match result.and_then(|g| g.validate().map(|_| g)) {
            Ok(geometry) => {
                self.geometry = Some(geometry);
                self.source = Some(GeometrySource::Analysis);
                AnalysisOutcome::Applied
            }
            Err(e) => {
                warn!(job = %job_id, error = %e, "Analysis unusable, quoting placeholder geometry");
                self.geometry = Some(Geometry::placeholder());
                self.source = Some(GeometrySource::Placeholder);
                AnalysisOutcome::SubstitutedPlaceholder
            }
        };
        self.recompute();
        outcome
    }

    /// Poll `jobs` for the current upload and apply its result if finished.
    pub fn poll(&mut self, jobs: &JobStore) -> AnalysisOutcome {
        let Some(job_id) = self.upload.as_ref().map(|u| u.job_id) else {
            return AnalysisOutcome::Stale;
        };
        if self.source.is_some() {
            return AnalysisOutcome::AlreadyResolved;
        }
        match jobs.poll(&job_id) {
            Some(JobStatus::Pending) => AnalysisOutcome::Pending,
            Some(JobStatus::Completed { geometry }) => self.apply_analysis(job_id, Ok(geometry.clone())),
            Some(JobStatus::Failed { reason }) => {
                let file_name = self.upload.as_ref().map(|u| u.file_name.clone()).unwrap_or_default();
                self.apply_analysis(job_id, Err(QuoteError::analysis_failed(file_name, reason)))
            }
            None => self.apply_analysis(job_id, Err(QuoteError::job_not_found(job_id))),
        }
    }

    /// Quote geometry entered directly. It takes precedence over any
    /// analysis still running for the current upload.
    pub fn set_geometry(&mut self, geometry: Geometry) {
        self.geometry = Some(geometry);
        self.source = Some(GeometrySource::Entered);
        self.recompute();
    }

    pub fn set_parameters(&mut self, parameters: ProcessParameters) {
        self.parameters = parameters;
        self.recompute();
    }

    pub fn set_material(&mut self, material_id: impl Into<String>) {
        self.parameters.material_id = material_id.into();
        self.recompute();
    }

    pub fn set_quantity(&mut self, quantity: u32) {
        self.parameters.quantity = quantity;
        self.recompute();
    }

    pub fn set_cavities(&mut self, cavities: u32) {
        self.parameters.cavities = cavities;
        self.recompute();
    }

    pub fn set_color(&mut self, color: ColorOption) {
        self.parameters.color = color;
        self.recompute();
    }

    /// Why there is no breakdown, if there is none.
    pub fn explain(&self) -> Option<QuoteError> {
        let geometry = match &self.geometry {
            Some(g) => g,
            None => return Some(QuoteError::not_computable("no geometry yet")),
        };
        self.compute(geometry).err()
    }

    /// Freeze the current quote for saving. `None` without a breakdown.
    pub fn snapshot(&self) -> Option<SavedQuote> {
        let geometry = self.geometry.clone()?;
        let breakdown = self.breakdown.clone()?;
        let file_name = self
            .upload
            .as_ref()
            .map(|u| u.file_name.clone())
            .unwrap_or_else(|| "manual-entry".to_string());
        let material_name = self.catalogs.materials.resolve(&self.parameters.material_id).name.clone();
        Some(SavedQuote::new(
            file_name,
            geometry,
            self.parameters.clone(),
            breakdown,
            material_name,
        ))
    }

    fn is_current(&self, job_id: JobId) -> bool {
        self.upload.as_ref().is_some_and(|u| u.job_id == job_id)
    }

    fn compute(&self, geometry: &Geometry) -> QuoteResult<CostBreakdown> {
        try_calculate(
            geometry,
            &self.parameters,
            &self.catalogs.materials,
            &self.catalogs.machines,
        )
    }

    fn recompute(&mut self) {
        self.breakdown = self.geometry.as_ref().and_then(|g| self.compute(g).ok());
    }
}

impl Default for QuoteSession {
    fn default() -> Self {
        QuoteSession::new(CatalogConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::{AnalysisRequest, MockAnalyzer};
    use crate::geometry::{Accuracy, Dimensions};

    fn part() -> Geometry {
        Geometry::new(40.0, Dimensions::new(120.0, 80.0, 30.0), 2.5, Accuracy::High)
    }

    #[test]
    fn test_no_breakdown_before_geometry() {
        let session = QuoteSession::default();
        assert!(session.breakdown().is_none());
        assert!(session.explain().is_some());
        assert!(session.snapshot().is_none());
    }

    #[test]
    fn test_applies_current_analysis() {
        let mut session = QuoteSession::default();
        let job = JobId::new();
        session.begin_upload("lid.stl", job);
        assert_eq!(session.apply_analysis(job, Ok(part())), AnalysisOutcome::Applied);
        assert_eq!(session.geometry(), Some(&part()));
        assert!(session.breakdown().is_some());
    }

    #[test]
    fn test_stale_result_is_discarded() {
        let mut session = QuoteSession::default();
        let first = JobId::new();
        let second = JobId::new();
        session.begin_upload("v1.stl", first);
        session.begin_upload("v2.stl", second);

        assert_eq!(session.apply_analysis(first, Ok(part())), AnalysisOutcome::Stale);
        assert!(session.geometry().is_none());
        assert!(session.breakdown().is_none());
    }

    #[test]
    fn test_failure_substitutes_placeholder() {
        let mut session = QuoteSession::default();
        let job = JobId::new();
        session.begin_upload("bracket.step", job);
        let outcome = session.apply_analysis(job, Err(QuoteError::analysis_failed("bracket.step", "timeout")));
        assert_eq!(outcome, AnalysisOutcome::SubstitutedPlaceholder);
        assert_eq!(session.geometry().unwrap().accuracy, Accuracy::Mocked);
        assert_eq!(session.geometry_source(), Some(GeometrySource::Placeholder));
        assert!(session.breakdown().is_some());
    }

    #[test]
    fn test_parameter_changes_recompute() {
        let mut session = QuoteSession::default();
        session.set_geometry(part());
        let before = session.breakdown().unwrap().total_per_part;

        session.set_quantity(10_000);
        let after = session.breakdown().unwrap().total_per_part;
        assert!(after < before);

        session.set_cavities(0);
        assert!(session.breakdown().is_none());
        assert_eq!(session.explain().unwrap().error_code(), "NOT_COMPUTABLE");

        session.set_cavities(2);
        session.set_color(ColorOption::Black);
        session.set_material("PP");
        assert!(session.breakdown().is_some());
    }

    #[test]
    fn test_poll_job_store() {
        let mut jobs = JobStore::new();
        let mut session = QuoteSession::default();
        let request = AnalysisRequest::new("cover.step").unwrap();
        let id = jobs.submit(request.clone());
        session.begin_upload(request.file_name.clone(), id);

        assert_eq!(session.poll(&jobs), AnalysisOutcome::Pending);
        jobs.complete(&id, part()).unwrap();
        assert_eq!(session.poll(&jobs), AnalysisOutcome::Applied);
        assert_eq!(session.geometry(), Some(&part()));
        assert_eq!(session.geometry_source(), Some(GeometrySource::Analysis));
        assert_eq!(session.poll(&jobs), AnalysisOutcome::AlreadyResolved);
    }

    #[test]
    fn test_repeated_result_for_same_job_is_ignored() {
        let mut session = QuoteSession::default();
        let job = JobId::new();
        session.begin_upload("lid.stl", job);
        assert_eq!(session.apply_analysis(job, Ok(part())), AnalysisOutcome::Applied);
        let first_quote = session.breakdown().cloned();

        let mut bigger = part();
        bigger.volume = 400.0;
        assert_eq!(session.apply_analysis(job, Ok(bigger)), AnalysisOutcome::AlreadyResolved);
        assert_eq!(session.geometry().unwrap().volume, 40.0);
        assert_eq!(session.breakdown().cloned(), first_quote);

        let failure = Err(QuoteError::analysis_failed("lid.stl", "late failure"));
        assert_eq!(session.apply_analysis(job, failure), AnalysisOutcome::AlreadyResolved);
        assert_eq!(session.geometry_source(), Some(GeometrySource::Analysis));
    }

    #[test]
    fn test_entered_geometry_wins_over_pending_analysis() {
        let mut jobs = JobStore::new();
        let mut session = QuoteSession::default();
        let request = AnalysisRequest::new("cover.step").unwrap();
        let id = jobs.submit(request.clone());
        session.begin_upload(request.file_name.clone(), id);
        session.set_geometry(part());
        assert_eq!(session.geometry_source(), Some(GeometrySource::Entered));

        let mut analyzed = part();
        analyzed.volume = 400.0;
        jobs.complete(&id, analyzed).unwrap();
        assert_eq!(session.poll(&jobs), AnalysisOutcome::AlreadyResolved);
        assert_eq!(session.geometry(), Some(&part()));
        assert_eq!(session.geometry_source(), Some(GeometrySource::Entered));
    }

    #[test]
    fn test_new_upload_clears_source() {
        let mut session = QuoteSession::default();
        session.set_geometry(part());
        session.begin_upload("next.step", JobId::new());
        assert!(session.geometry_source().is_none());
        assert!(session.geometry().is_none());
    }

    #[test]
    fn test_poll_failed_job() {
        let mut jobs = JobStore::new();
        let mut session = QuoteSession::default();
        let request = AnalysisRequest::new("cover.igs").unwrap();
        let id = jobs.run(&MockAnalyzer::failing("mesh not watertight"), request);
        session.begin_upload("cover.igs", id);
        assert_eq!(session.poll(&jobs), AnalysisOutcome::SubstitutedPlaceholder);
    }

    #[test]
    fn test_snapshot_records_resolved_material() {
        let mut session = QuoteSession::default();
        session.begin_upload("knob.stp", JobId::new());
        session.set_geometry(part());
        session.set_material("Vibranium");

        let saved = session.snapshot().unwrap();
        assert_eq!(saved.file_name, "knob.stp");
        assert_eq!(saved.file_extension, "stp");
        assert_eq!(saved.material_name, "ABS");
        assert_eq!(saved.parameters.material_id, "Vibranium");
        assert_eq!(&saved.breakdown, session.breakdown().unwrap());
    }
}
