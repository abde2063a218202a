mod config;
mod factors;
mod policy;

pub use config::{FactorWeights, ScoringConfig, ScoringConfigError};
pub use policy::Recommendation;

use std::collections::BTreeMap;
use std::sync::Arc;

use super::domain::{ApplicantRecord, BureauReport, ScoreResult};

/// Source of the signals that are still fixed placeholders pending real
/// integrations (borrower repayment history, retrieval confidence). Kept
/// behind a trait so a live data source can replace the provisional values
/// without touching the aggregator.
pub trait SupplementalSignals: Send + Sync {
    /// Normalized percent plus an audit detail line for the repayment
    /// history factor.
    fn repayment_history(&self, is_new_borrower: bool) -> (f64, String);

    /// Normalized percent plus an audit detail line for the external
    /// retrieval-confidence factor.
    fn retrieval_confidence(&self) -> (f64, String);
}

/// Placeholder signal source: new borrowers get provisional full credit,
/// returning borrowers a neutral 50 until the repayment ledger integration
/// lands; retrieval confidence is pinned at 100.
pub struct ProvisionalSignals;

impl SupplementalSignals for ProvisionalSignals {
    fn repayment_history(&self, is_new_borrower: bool) -> (f64, String) {
        if is_new_borrower {
            (
                100.0,
                "new borrower; provisional full credit".to_string(),
            )
        } else {
            (
                50.0,
                "returning borrower; neutral credit pending repayment ledger".to_string(),
            )
        }
    }

    fn retrieval_confidence(&self) -> (f64, String) {
        (100.0, "retrieval integration pending; full credit".to_string())
    }
}

/// Stateless engine applying the configured weights to an applicant record
/// and bureau report.
pub struct ScoringEngine {
    config: ScoringConfig,
    signals: Arc<dyn SupplementalSignals>,
}

impl std::fmt::Debug for ScoringEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ScoringEngine")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl ScoringEngine {
    /// Build an engine, verifying the weight table sums to the configured
    /// total. This is the startup self-check; `score` never re-validates.
    pub fn new(config: ScoringConfig) -> Result<Self, ScoringConfigError> {
        Self::with_signals(config, Arc::new(ProvisionalSignals))
    }

    pub fn with_signals(
        config: ScoringConfig,
        signals: Arc<dyn SupplementalSignals>,
    ) -> Result<Self, ScoringConfigError> {
        config.validate()?;
        Ok(Self { config, signals })
    }

    pub fn config(&self) -> &ScoringConfig {
        &self.config
    }

    /// Score one applicant. Deterministic: the calculators run and sum in
    /// the fixed `FactorKey::ordered()` sequence.
    pub fn score(&self, applicant: &ApplicantRecord, bureau: &BureauReport) -> ScoreResult {
        let contributions =
            factors::evaluate_all(applicant, bureau, &self.config, self.signals.as_ref());

        let raw_score_sum: f64 = contributions
            .iter()
            .map(|factor| factor.contribution_percent)
            .sum();

        let normalized_score = if self.config.total_weight > 0.0 {
            (raw_score_sum / self.config.total_weight * 100.0).clamp(0.0, 100.0)
        } else {
            0.0
        };

        let recommendation = policy::decide_band(normalized_score, &self.config);
        let reason_codes = policy::reason_codes(applicant, bureau);

        let mut breakdown = BTreeMap::new();
        for factor in contributions {
            breakdown.insert(factor.key, factor);
        }

        ScoreResult {
            breakdown,
            raw_score_sum,
            normalized_score,
            recommendation,
            reason_codes,
        }
    }
}
