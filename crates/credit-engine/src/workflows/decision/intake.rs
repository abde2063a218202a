use std::sync::Arc;

use serde::Serialize;

use super::contract::ContractType;
use super::domain::{ApplicantInput, ApplicantRecord, EmploymentSector};
use crate::workflows::directory::EmployerDirectory;

/// A single field-level validation failure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldViolation {
    pub field: &'static str,
    pub message: String,
}

impl FieldViolation {
    fn new(field: &'static str, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }
}

/// Errors raised while building the canonical applicant record.
#[derive(Debug, thiserror::Error)]
pub enum IntakeError {
    #[error("applicant input failed validation on {} field(s)", .0.len())]
    Validation(Vec<FieldViolation>),
    #[error("net monthly income must be positive (derived {net_monthly_income:.2})")]
    NonPositiveIncome { net_monthly_income: f64 },
}

/// Deterministic intake defaults sourced from configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IntakeDefaults {
    /// Digit count of the jurisdictional identity-number scheme.
    pub identity_number_length: usize,
    /// Reference tag attached to outbound bureau enquiries.
    pub bureau_reference: String,
}

impl Default for IntakeDefaults {
    fn default() -> Self {
        Self {
            identity_number_length: 13,
            bureau_reference: "creditcheck".to_string(),
        }
    }
}

/// Builds immutable `ApplicantRecord`s out of raw request payloads,
/// reporting every violation in one pass so callers can fix all issues in a
/// single round trip.
#[derive(Debug, Clone)]
pub struct RecordBuilder {
    defaults: IntakeDefaults,
    directory: Arc<EmployerDirectory>,
}

impl RecordBuilder {
    pub fn new(defaults: IntakeDefaults, directory: Arc<EmployerDirectory>) -> Self {
        Self {
            defaults,
            directory,
        }
    }

    pub fn defaults(&self) -> &IntakeDefaults {
        &self.defaults
    }

    pub fn build(&self, input: ApplicantInput) -> Result<ApplicantRecord, IntakeError> {
        let mut violations = Vec::new();

        let identity_number = trimmed(&input.identity_number);
        match identity_number.as_deref() {
            None => violations.push(FieldViolation::new(
                "identity_number",
                "identity number is required",
            )),
            Some(identity) => {
                let expected = self.defaults.identity_number_length;
                if identity.len() != expected || !identity.chars().all(|c| c.is_ascii_digit()) {
                    violations.push(FieldViolation::new(
                        "identity_number",
                        format!("identity number must contain exactly {expected} digits"),
                    ));
                }
            }
        }

        let first_name = trimmed(&input.first_name);
        if first_name.is_none() {
            violations.push(FieldViolation::new("first_name", "first name is required"));
        }

        let last_name = trimmed(&input.last_name);
        if last_name.is_none() {
            violations.push(FieldViolation::new("last_name", "last name is required"));
        }

        let annual_income = match input.annual_income {
            Some(value) if value.is_finite() && value > 0.0 => Some(value),
            _ => {
                violations.push(FieldViolation::new(
                    "annual_income",
                    "annual income must be a positive amount",
                ));
                None
            }
        };

        let annual_expenses = match input.annual_expenses {
            Some(value) if value.is_finite() && value >= 0.0 => Some(value),
            _ => {
                violations.push(FieldViolation::new(
                    "annual_expenses",
                    "annual expenses must be zero or a positive amount",
                ));
                None
            }
        };

        let months_in_current_job = match input.months_in_current_job {
            Some(value) if value.is_finite() && value >= 0.0 => Some(value),
            _ => {
                violations.push(FieldViolation::new(
                    "months_in_current_job",
                    "months in current job must be zero or a positive number",
                ));
                None
            }
        };

        let contract_type = match trimmed(&input.contract_type) {
            Some(raw) => Some(ContractType::canonicalize(&raw)),
            None => {
                violations.push(FieldViolation::new(
                    "contract_type",
                    "a contract type must be selected",
                ));
                None
            }
        };

        let employment_sector = match trimmed(&input.employment_sector) {
            Some(raw) => match EmploymentSector::parse(&raw) {
                Some(sector) => Some(sector),
                None => {
                    violations.push(FieldViolation::new(
                        "employment_sector",
                        "employment sector must be GOVERNMENT or PRIVATE",
                    ));
                    None
                }
            },
            None => {
                violations.push(FieldViolation::new(
                    "employment_sector",
                    "an employment sector must be selected",
                ));
                None
            }
        };

        let employer_name = trimmed(&input.employer_name);
        if employer_name.is_none() {
            violations.push(FieldViolation::new(
                "employer_name",
                "an employer name is required for the selected sector",
            ));
        }

        let is_new_borrower = match input.is_new_borrower {
            Some(value) => Some(value),
            None => {
                violations.push(FieldViolation::new(
                    "is_new_borrower",
                    "specify whether the applicant is a new borrower",
                ));
                None
            }
        };

        if !violations.is_empty() {
            return Err(IntakeError::Validation(violations));
        }

        // All unwraps below are backed by the violation pass above.
        let gross_annual_income = annual_income.unwrap_or_default();
        let annual_expenses = annual_expenses.unwrap_or_default();
        let net_monthly_income = (gross_annual_income - annual_expenses) / 12.0;
        if net_monthly_income <= 0.0 {
            return Err(IntakeError::NonPositiveIncome { net_monthly_income });
        }

        let employment_sector = employment_sector.unwrap_or(EmploymentSector::Private);
        let employer_name = employer_name.unwrap_or_default();
        let employer_match = self.directory.classify(employment_sector, &employer_name);

        Ok(ApplicantRecord {
            identity_number: identity_number.unwrap_or_default(),
            first_name: first_name.unwrap_or_default(),
            last_name: last_name.unwrap_or_default(),
            gross_annual_income,
            annual_expenses,
            net_monthly_income,
            months_in_current_job: months_in_current_job.unwrap_or_default(),
            contract_type: contract_type.unwrap_or(ContractType::UnemployedOrUnknown),
            employment_sector,
            employer_name,
            employer_match,
            is_new_borrower: is_new_borrower.unwrap_or_default(),
            device: input.device,
        })
    }
}

fn trimmed(value: &Option<String>) -> Option<String> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}
