use serde::{Deserialize, Serialize};

use super::{normalize_employer_name, EmployerDirectory};
use crate::workflows::decision::domain::EmploymentSector;

const SUBSTRING_MATCH_MIN_CHARS: usize = 3;

/// Trust tier assigned to an employer during intake.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EmployerTier {
    Government,
    Listed,
    HighRiskManual,
    NotFound,
}

impl EmployerTier {
    /// Percent of full trust granted to this tier by the employer-category
    /// factor.
    pub const fn trust_percent(self) -> f64 {
        match self {
            EmployerTier::Government => 100.0,
            EmployerTier::Listed => 80.0,
            EmployerTier::HighRiskManual => 50.0,
            EmployerTier::NotFound => 0.0,
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            EmployerTier::Government => "government",
            EmployerTier::Listed => "listed",
            EmployerTier::HighRiskManual => "high_risk_manual",
            EmployerTier::NotFound => "not_found",
        }
    }
}

/// Outcome of classifying an employer name against the directory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmployerMatch {
    pub tier: EmployerTier,
    pub matched_name: Option<String>,
}

pub(crate) fn classify(
    directory: &EmployerDirectory,
    sector: EmploymentSector,
    employer_name: &str,
) -> EmployerMatch {
    let supplied = !employer_name.trim().is_empty();

    if sector == EmploymentSector::Government {
        let tier = if supplied {
            EmployerTier::Government
        } else {
            EmployerTier::NotFound
        };
        return EmployerMatch {
            tier,
            matched_name: None,
        };
    }

    let normalized = normalize_employer_name(employer_name);
    if normalized.is_empty() {
        return EmployerMatch {
            tier: if supplied {
                EmployerTier::HighRiskManual
            } else {
                EmployerTier::NotFound
            },
            matched_name: None,
        };
    }

    if let Some(entry) = directory.exact(&normalized) {
        return EmployerMatch {
            tier: EmployerTier::Listed,
            matched_name: Some(entry.display_name.clone()),
        };
    }

    if normalized.len() >= SUBSTRING_MATCH_MIN_CHARS {
        if let Some(entry) = directory
            .entries()
            .iter()
            .find(|entry| entry.normalized_name.contains(&normalized))
        {
            return EmployerMatch {
                tier: EmployerTier::Listed,
                matched_name: Some(entry.display_name.clone()),
            };
        }
    }

    EmployerMatch {
        tier: EmployerTier::HighRiskManual,
        matched_name: None,
    }
}
