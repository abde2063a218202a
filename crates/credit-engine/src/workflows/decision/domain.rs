use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::contract::ContractType;
use super::scoring::Recommendation;
use crate::workflows::directory::EmployerMatch;

/// Identifier wrapper for scored decisions; doubles as the correlation id
/// surfaced to callers on upstream failures.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DecisionId(pub String);

impl std::fmt::Display for DecisionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Raw request payload as submitted by the caller. Everything is optional
/// here; the record builder collects every violation in a single pass.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ApplicantInput {
    #[serde(default)]
    pub identity_number: Option<String>,
    #[serde(default)]
    pub first_name: Option<String>,
    #[serde(default)]
    pub last_name: Option<String>,
    #[serde(default)]
    pub annual_income: Option<f64>,
    #[serde(default)]
    pub annual_expenses: Option<f64>,
    #[serde(default)]
    pub months_in_current_job: Option<f64>,
    #[serde(default)]
    pub contract_type: Option<String>,
    #[serde(default)]
    pub employment_sector: Option<String>,
    #[serde(default)]
    pub employer_name: Option<String>,
    #[serde(default)]
    pub is_new_borrower: Option<bool>,
    #[serde(default)]
    pub device: DeviceSignals,
}

/// Client device metadata captured alongside the application.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeviceSignals {
    #[serde(default)]
    pub ip: Option<String>,
    #[serde(default)]
    pub user_agent: Option<String>,
}

impl DeviceSignals {
    pub fn captured(&self) -> u32 {
        let mut captured = 0;
        if self.ip.as_deref().is_some_and(|ip| !ip.trim().is_empty()) {
            captured += 1;
        }
        if self
            .user_agent
            .as_deref()
            .is_some_and(|ua| !ua.trim().is_empty())
        {
            captured += 1;
        }
        captured
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EmploymentSector {
    Government,
    Private,
}

impl EmploymentSector {
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_uppercase().as_str() {
            "GOVERNMENT" => Some(Self::Government),
            "PRIVATE" => Some(Self::Private),
            _ => None,
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            EmploymentSector::Government => "GOVERNMENT",
            EmploymentSector::Private => "PRIVATE",
        }
    }
}

/// Canonical, fully validated applicant snapshot. Built once per request
/// and immutable afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApplicantRecord {
    pub identity_number: String,
    pub first_name: String,
    pub last_name: String,
    pub gross_annual_income: f64,
    pub annual_expenses: f64,
    pub net_monthly_income: f64,
    pub months_in_current_job: f64,
    pub contract_type: ContractType,
    pub employment_sector: EmploymentSector,
    pub employer_name: String,
    pub employer_match: EmployerMatch,
    pub is_new_borrower: bool,
    pub device: DeviceSignals,
}

/// Externally supplied credit report. Every field is optional on the wire;
/// absent values default to zero/empty rather than failing the request.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BureauReport {
    #[serde(default)]
    pub credit_score: f64,
    #[serde(default)]
    pub exposure: CreditExposure,
    #[serde(default)]
    pub adverse_listings: Vec<AdverseListing>,
    #[serde(default)]
    pub employment_history: Vec<EmploymentHistoryEntry>,
}

/// Account exposure aggregates from the bureau file.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct CreditExposure {
    #[serde(default)]
    pub total_balance: f64,
    #[serde(default)]
    pub total_limits: f64,
    #[serde(default)]
    pub revolving_balance: f64,
    #[serde(default)]
    pub revolving_limits: f64,
    #[serde(default)]
    pub total_monthly_installments: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AdverseListing {
    pub listing_type: String,
    #[serde(default)]
    pub amount: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmploymentHistoryEntry {
    pub employer_name: String,
    #[serde(default)]
    pub occupation: Option<String>,
    #[serde(default)]
    pub last_updated: Option<chrono::NaiveDate>,
}

/// The eleven scored risk dimensions, in their fixed evaluation order.
/// Summation follows this order so identical inputs reproduce identical
/// results bit-for-bit.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum FactorKey {
    CreditScore,
    CreditUtilization,
    AdverseListings,
    DebtToIncome,
    EmploymentTenure,
    ContractType,
    EmployerCategory,
    IncomeStability,
    RepaymentHistory,
    RetrievalConfidence,
    DeviceSignals,
}

impl FactorKey {
    pub const fn ordered() -> [Self; 11] {
        [
            Self::CreditScore,
            Self::CreditUtilization,
            Self::AdverseListings,
            Self::DebtToIncome,
            Self::EmploymentTenure,
            Self::ContractType,
            Self::EmployerCategory,
            Self::IncomeStability,
            Self::RepaymentHistory,
            Self::RetrievalConfidence,
            Self::DeviceSignals,
        ]
    }

    pub const fn label(self) -> &'static str {
        match self {
            FactorKey::CreditScore => "Credit Score",
            FactorKey::CreditUtilization => "Credit Utilization",
            FactorKey::AdverseListings => "Adverse Listings",
            FactorKey::DebtToIncome => "Debt-to-Income Ratio",
            FactorKey::EmploymentTenure => "Employment Tenure",
            FactorKey::ContractType => "Contract Type",
            FactorKey::EmployerCategory => "Employer Category",
            FactorKey::IncomeStability => "Income Stability",
            FactorKey::RepaymentHistory => "Repayment History",
            FactorKey::RetrievalConfidence => "Retrieval Confidence",
            FactorKey::DeviceSignals => "Device / IP Confidence",
        }
    }
}

/// Discrete contribution of one factor, kept alongside the inputs that
/// produced it so decisions stay auditable.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FactorContribution {
    pub key: FactorKey,
    pub raw_value: f64,
    pub normalized_percent: f64,
    pub weight_percent: f64,
    pub contribution_percent: f64,
    pub detail: String,
}

/// Engine output for a single applicant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreResult {
    pub breakdown: BTreeMap<FactorKey, FactorContribution>,
    pub raw_score_sum: f64,
    pub normalized_score: f64,
    pub recommendation: Recommendation,
    pub reason_codes: Vec<String>,
}

/// Terminal state of a stored decision.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DecisionStatus {
    Scored,
    Failed,
}

impl DecisionStatus {
    pub const fn label(self) -> &'static str {
        match self {
            DecisionStatus::Scored => "scored",
            DecisionStatus::Failed => "failed",
        }
    }
}
