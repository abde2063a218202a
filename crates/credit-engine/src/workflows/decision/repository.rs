use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::domain::{
    ApplicantRecord, BureauReport, CreditExposure, DecisionId, DecisionStatus,
    EmploymentHistoryEntry, FactorContribution, FactorKey, ScoreResult,
};

/// Stored outcome of one orchestrated decision: the canonical applicant
/// snapshot, the bureau file it was scored against, and the engine result.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DecisionRecord {
    pub decision_id: DecisionId,
    pub applicant: ApplicantRecord,
    pub bureau: Option<BureauReport>,
    pub result: Option<ScoreResult>,
    pub status: DecisionStatus,
    pub decided_at: DateTime<Utc>,
}

impl DecisionRecord {
    /// Shape the record for API responses. Applicant identity fields stay
    /// internal; callers get the score, the breakdown, and the bureau
    /// aggregates the original request was scored against.
    pub fn view(&self) -> DecisionView {
        DecisionView {
            decision_id: self.decision_id.clone(),
            status: self.status.label(),
            normalized_score: self.result.as_ref().map(|result| result.normalized_score),
            recommendation: self
                .result
                .as_ref()
                .map(|result| result.recommendation.label()),
            reason_codes: self
                .result
                .as_ref()
                .map(|result| result.reason_codes.clone())
                .unwrap_or_default(),
            breakdown: self.result.as_ref().map(|result| result.breakdown.clone()),
            credit_exposure: self.bureau.as_ref().map(|bureau| bureau.exposure),
            employment_history: self
                .bureau
                .as_ref()
                .map(|bureau| bureau.employment_history.clone())
                .unwrap_or_default(),
            decided_at: self.decided_at,
        }
    }
}

/// Storage abstraction so the orchestrator can be exercised in isolation;
/// persisting decisions durably is the host's concern.
pub trait DecisionRepository: Send + Sync {
    fn insert(&self, record: DecisionRecord) -> Result<DecisionRecord, RepositoryError>;
    fn fetch(&self, id: &DecisionId) -> Result<Option<DecisionRecord>, RepositoryError>;
}

/// Error enumeration for repository failures.
#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("decision already recorded")]
    Conflict,
    #[error("decision not found")]
    NotFound,
    #[error("repository unavailable: {0}")]
    Unavailable(String),
}

/// Sanitized representation of a stored decision.
#[derive(Debug, Clone, Serialize)]
pub struct DecisionView {
    pub decision_id: DecisionId,
    pub status: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub normalized_score: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub recommendation: Option<&'static str>,
    pub reason_codes: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub breakdown: Option<BTreeMap<FactorKey, FactorContribution>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub credit_exposure: Option<CreditExposure>,
    pub employment_history: Vec<EmploymentHistoryEntry>,
    pub decided_at: DateTime<Utc>,
}
