//! Credit decision workflow: applicant intake, bureau retrieval, factor
//! scoring, and decision persistence.

pub(crate) mod bureau;
pub mod contract;
pub mod domain;
pub(crate) mod intake;
pub mod repository;
pub mod router;
pub(crate) mod scoring;
pub mod service;

#[cfg(test)]
mod tests;

pub use bureau::{BureauClient, BureauError, BureauRequestMeta};
pub use contract::ContractType;
pub use domain::{
    AdverseListing, ApplicantInput, ApplicantRecord, BureauReport, CreditExposure, DecisionId,
    DecisionStatus, DeviceSignals, EmploymentHistoryEntry, EmploymentSector, FactorContribution,
    FactorKey, ScoreResult,
};
pub use intake::{FieldViolation, IntakeDefaults, IntakeError, RecordBuilder};
pub use repository::{DecisionRecord, DecisionRepository, DecisionView, RepositoryError};
pub use router::decision_router;
pub use scoring::{
    FactorWeights, ProvisionalSignals, Recommendation, ScoringConfig, ScoringConfigError,
    ScoringEngine, SupplementalSignals,
};
pub use service::{DecisionService, DecisionServiceError};
