use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use chrono::Utc;
use tracing::debug;

use super::bureau::{BureauClient, BureauError, BureauRequestMeta};
use super::domain::{ApplicantInput, ApplicantRecord, DecisionId, DecisionStatus};
use super::intake::{IntakeDefaults, IntakeError, RecordBuilder};
use super::repository::{DecisionRecord, DecisionRepository, RepositoryError};
use super::scoring::{ScoringConfig, ScoringConfigError, ScoringEngine};
use crate::workflows::directory::EmployerDirectory;

/// Progress of one request through the orchestrator. `FetchingBureau` is
/// the only state that leaves the process; everything else is local compute.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum DecisionState {
    Validating,
    FetchingBureau,
    Scoring,
    Done,
    Failed,
}

impl DecisionState {
    const fn label(self) -> &'static str {
        match self {
            DecisionState::Validating => "validating",
            DecisionState::FetchingBureau => "fetching_bureau",
            DecisionState::Scoring => "scoring",
            DecisionState::Done => "done",
            DecisionState::Failed => "failed",
        }
    }
}

static DECISION_SEQUENCE: AtomicU64 = AtomicU64::new(1);

fn next_decision_id() -> DecisionId {
    let id = DECISION_SEQUENCE.fetch_add(1, Ordering::Relaxed);
    DecisionId(format!("dec-{id:06}"))
}

/// Orchestrator sequencing intake, the bureau fetch, scoring, and
/// persistence for each inbound application.
pub struct DecisionService<B, R> {
    builder: RecordBuilder,
    bureau: Arc<B>,
    repository: Arc<R>,
    engine: Arc<ScoringEngine>,
}

impl<B, R> DecisionService<B, R>
where
    B: BureauClient + 'static,
    R: DecisionRepository + 'static,
{
    pub fn new(
        directory: Arc<EmployerDirectory>,
        bureau: Arc<B>,
        repository: Arc<R>,
        config: ScoringConfig,
    ) -> Result<Self, ScoringConfigError> {
        Self::with_defaults(directory, bureau, repository, config, IntakeDefaults::default())
    }

    pub fn with_defaults(
        directory: Arc<EmployerDirectory>,
        bureau: Arc<B>,
        repository: Arc<R>,
        config: ScoringConfig,
        defaults: IntakeDefaults,
    ) -> Result<Self, ScoringConfigError> {
        let engine = Arc::new(ScoringEngine::new(config)?);
        let builder = RecordBuilder::new(defaults, directory);
        Ok(Self {
            builder,
            bureau,
            repository,
            engine,
        })
    }

    /// Run one application through the full decision pipeline and persist
    /// the outcome. A failed bureau fetch fails the whole request; the
    /// engine never scores against partial data.
    pub fn decide(&self, input: ApplicantInput) -> Result<DecisionRecord, DecisionServiceError> {
        debug!(state = DecisionState::Validating.label(), "decision started");
        let applicant = self.builder.build(input)?;

        let decision_id = next_decision_id();
        let meta = self.bureau_meta(&applicant);

        debug!(
            state = DecisionState::FetchingBureau.label(),
            decision_id = %decision_id,
            "requesting bureau report"
        );
        let report = match self.bureau.fetch_report(&applicant.identity_number, &meta) {
            Ok(report) => report,
            Err(source) => {
                debug!(
                    state = DecisionState::Failed.label(),
                    decision_id = %decision_id,
                    "bureau fetch failed"
                );
                let record = DecisionRecord {
                    decision_id: decision_id.clone(),
                    applicant,
                    bureau: None,
                    result: None,
                    status: DecisionStatus::Failed,
                    decided_at: Utc::now(),
                };
                self.repository.insert(record)?;
                return Err(DecisionServiceError::Bureau {
                    decision_id,
                    source,
                });
            }
        };

        debug!(
            state = DecisionState::Scoring.label(),
            decision_id = %decision_id,
            "scoring applicant"
        );
        let result = self.engine.score(&applicant, &report);

        let record = DecisionRecord {
            decision_id: decision_id.clone(),
            applicant,
            bureau: Some(report),
            result: Some(result),
            status: DecisionStatus::Scored,
            decided_at: Utc::now(),
        };
        let stored = self.repository.insert(record)?;

        debug!(
            state = DecisionState::Done.label(),
            decision_id = %decision_id,
            "decision complete"
        );
        Ok(stored)
    }

    /// Fetch a stored decision for API responses.
    pub fn get(&self, decision_id: &DecisionId) -> Result<DecisionRecord, DecisionServiceError> {
        let record = self
            .repository
            .fetch(decision_id)?
            .ok_or(RepositoryError::NotFound)?;
        Ok(record)
    }

    fn bureau_meta(&self, applicant: &ApplicantRecord) -> BureauRequestMeta {
        BureauRequestMeta {
            reference: self.builder.defaults().bureau_reference.clone(),
            first_name: applicant.first_name.clone(),
            last_name: applicant.last_name.clone(),
        }
    }
}

/// Error raised by the decision orchestrator.
#[derive(Debug, thiserror::Error)]
pub enum DecisionServiceError {
    #[error(transparent)]
    Intake(#[from] IntakeError),
    #[error("could not complete credit check")]
    Bureau {
        decision_id: DecisionId,
        #[source]
        source: BureauError,
    },
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}
