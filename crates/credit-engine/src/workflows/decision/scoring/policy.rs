use serde::{Deserialize, Serialize};

use super::super::domain::{ApplicantRecord, BureauReport};
use super::config::ScoringConfig;

/// Business-facing reason thresholds. These re-check the raw inputs, never
/// the weighted contributions, so the explanations stay interpretable.
const LOW_CREDIT_SCORE_BELOW: f64 = 580.0;
const HIGH_UTILIZATION_ABOVE_PERCENT: f64 = 75.0;
const HIGH_DTI_ABOVE_PERCENT: f64 = 50.0;
const SHORT_TENURE_BELOW_MONTHS: f64 = 6.0;

/// Recommendation band derived from the normalized score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Recommendation {
    Approve,
    Refer,
    Decline,
}

impl Recommendation {
    pub const fn label(self) -> &'static str {
        match self {
            Recommendation::Approve => "approve",
            Recommendation::Refer => "refer",
            Recommendation::Decline => "decline",
        }
    }
}

pub(crate) fn decide_band(normalized_score: f64, config: &ScoringConfig) -> Recommendation {
    if normalized_score >= config.approve_cutoff {
        Recommendation::Approve
    } else if normalized_score >= config.refer_cutoff {
        Recommendation::Refer
    } else {
        Recommendation::Decline
    }
}

/// Generate the ordered adverse-signal explanations. Purely explanatory;
/// the numeric score is never derived from these.
pub(crate) fn reason_codes(applicant: &ApplicantRecord, bureau: &BureauReport) -> Vec<String> {
    let mut reasons = Vec::new();

    if bureau.credit_score < LOW_CREDIT_SCORE_BELOW {
        reasons.push("Low credit score".to_string());
    }

    let limit = bureau.exposure.revolving_limits;
    if limit > 0.0 {
        let utilization_percent = bureau.exposure.revolving_balance / limit * 100.0;
        if utilization_percent > HIGH_UTILIZATION_ABOVE_PERCENT {
            reasons.push("High credit utilization".to_string());
        }
    }

    if !bureau.adverse_listings.is_empty() {
        reasons.push("Adverse listings present".to_string());
    }

    if applicant.net_monthly_income > 0.0 {
        let dti_percent =
            bureau.exposure.total_monthly_installments / applicant.net_monthly_income * 100.0;
        if dti_percent > HIGH_DTI_ABOVE_PERCENT {
            reasons.push("High debt-to-income ratio".to_string());
        }
    }

    if applicant.months_in_current_job < SHORT_TENURE_BELOW_MONTHS {
        reasons.push("Short employment tenure".to_string());
    }

    reasons
}
