use serde::{Deserialize, Serialize};

use super::super::domain::FactorKey;

const WEIGHT_SUM_EPSILON: f64 = 1e-6;

/// Policy parameters for the scoring engine. The weight distribution and
/// recommendation cut-offs are business dials, not engineering constants;
/// hosts construct this from their own policy source.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoringConfig {
    pub weights: FactorWeights,
    /// The configured weight budget the eleven factors must add up to.
    pub total_weight: f64,
    /// Bounds used to normalize the bureau score onto 0-100.
    pub credit_score_floor: f64,
    pub credit_score_ceiling: f64,
    /// Months of tenure that earn full employment-tenure credit.
    pub tenure_full_credit_months: f64,
    /// Percent granted when no revolving limit is reported.
    pub utilization_neutral_percent: f64,
    /// Normalized-score cut-offs for the recommendation bands.
    pub approve_cutoff: f64,
    pub refer_cutoff: f64,
}

/// Fixed weight of each factor, in percent of `total_weight`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FactorWeights {
    pub credit_score: f64,
    pub credit_utilization: f64,
    pub adverse_listings: f64,
    pub debt_to_income: f64,
    pub employment_tenure: f64,
    pub contract_type: f64,
    pub employer_category: f64,
    pub income_stability: f64,
    pub repayment_history: f64,
    pub retrieval_confidence: f64,
    pub device_signals: f64,
}

impl FactorWeights {
    pub fn for_key(&self, key: FactorKey) -> f64 {
        match key {
            FactorKey::CreditScore => self.credit_score,
            FactorKey::CreditUtilization => self.credit_utilization,
            FactorKey::AdverseListings => self.adverse_listings,
            FactorKey::DebtToIncome => self.debt_to_income,
            FactorKey::EmploymentTenure => self.employment_tenure,
            FactorKey::ContractType => self.contract_type,
            FactorKey::EmployerCategory => self.employer_category,
            FactorKey::IncomeStability => self.income_stability,
            FactorKey::RepaymentHistory => self.repayment_history,
            FactorKey::RetrievalConfidence => self.retrieval_confidence,
            FactorKey::DeviceSignals => self.device_signals,
        }
    }

    /// Sum in the fixed factor order.
    pub fn sum(&self) -> f64 {
        FactorKey::ordered()
            .iter()
            .map(|&key| self.for_key(key))
            .sum()
    }
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            weights: FactorWeights {
                credit_score: 20.0,
                credit_utilization: 10.0,
                adverse_listings: 10.0,
                debt_to_income: 15.0,
                employment_tenure: 10.0,
                contract_type: 10.0,
                employer_category: 10.0,
                income_stability: 5.0,
                repayment_history: 5.0,
                retrieval_confidence: 3.0,
                device_signals: 2.0,
            },
            total_weight: 100.0,
            credit_score_floor: 300.0,
            credit_score_ceiling: 850.0,
            tenure_full_credit_months: 24.0,
            utilization_neutral_percent: 50.0,
            approve_cutoff: 70.0,
            refer_cutoff: 45.0,
        }
    }
}

/// Startup self-check failures for a scoring configuration.
#[derive(Debug, thiserror::Error)]
pub enum ScoringConfigError {
    #[error("factor weights sum to {actual:.4} but total_weight is {expected:.4}")]
    WeightMismatch { actual: f64, expected: f64 },
    #[error("credit score bounds are degenerate (floor {floor}, ceiling {ceiling})")]
    DegenerateScoreBounds { floor: f64, ceiling: f64 },
    #[error("recommendation cut-offs out of order (approve {approve}, refer {refer})")]
    BandOrder { approve: f64, refer: f64 },
}

impl ScoringConfig {
    pub fn validate(&self) -> Result<(), ScoringConfigError> {
        let actual = self.weights.sum();
        if (actual - self.total_weight).abs() > WEIGHT_SUM_EPSILON {
            return Err(ScoringConfigError::WeightMismatch {
                actual,
                expected: self.total_weight,
            });
        }

        if self.credit_score_ceiling <= self.credit_score_floor {
            return Err(ScoringConfigError::DegenerateScoreBounds {
                floor: self.credit_score_floor,
                ceiling: self.credit_score_ceiling,
            });
        }

        if self.approve_cutoff <= self.refer_cutoff {
            return Err(ScoringConfigError::BandOrder {
                approve: self.approve_cutoff,
                refer: self.refer_cutoff,
            });
        }

        Ok(())
    }
}
