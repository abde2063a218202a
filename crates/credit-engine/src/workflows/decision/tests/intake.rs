use super::common::*;
use crate::workflows::decision::contract::ContractType;
use crate::workflows::decision::domain::{ApplicantInput, EmploymentSector};
use crate::workflows::decision::intake::IntakeError;
use crate::workflows::directory::EmployerTier;

#[test]
fn empty_input_reports_every_violation_at_once() {
    let error = record_builder()
        .build(ApplicantInput::default())
        .expect_err("empty input rejected");

    let violations = match error {
        IntakeError::Validation(violations) => violations,
        other => panic!("expected validation error, got {other:?}"),
    };

    let fields: Vec<&str> = violations.iter().map(|v| v.field).collect();
    for expected in [
        "identity_number",
        "first_name",
        "last_name",
        "annual_income",
        "annual_expenses",
        "months_in_current_job",
        "contract_type",
        "employment_sector",
        "employer_name",
        "is_new_borrower",
    ] {
        assert!(fields.contains(&expected), "missing violation for {expected}");
    }
}

#[test]
fn identity_number_must_be_thirteen_digits() {
    let mut input = strong_input();
    input.identity_number = Some("9001015009A87".to_string());

    let error = record_builder().build(input).expect_err("rejected");
    match error {
        IntakeError::Validation(violations) => {
            assert_eq!(violations.len(), 1);
            assert_eq!(violations[0].field, "identity_number");
            assert!(violations[0].message.contains("13 digits"));
        }
        other => panic!("expected validation error, got {other:?}"),
    }
}

#[test]
fn missing_employer_name_never_reaches_scoring() {
    let mut input = strong_input();
    input.employment_sector = Some("PRIVATE".to_string());
    input.employer_name = Some("   ".to_string());

    let error = record_builder().build(input).expect_err("rejected");
    match error {
        IntakeError::Validation(violations) => {
            assert_eq!(violations.len(), 1);
            assert_eq!(violations[0].field, "employer_name");
        }
        other => panic!("expected validation error, got {other:?}"),
    }
}

#[test]
fn expenses_matching_income_fail_the_net_income_gate() {
    let mut input = strong_input();
    input.annual_income = Some(180_000.0);
    input.annual_expenses = Some(180_000.0);

    let error = record_builder().build(input).expect_err("rejected");
    match error {
        IntakeError::NonPositiveIncome { net_monthly_income } => {
            assert!(net_monthly_income <= 0.0);
        }
        other => panic!("expected non-positive income error, got {other:?}"),
    }
}

#[test]
fn valid_input_builds_the_canonical_record() {
    let record = strong_record();

    assert_eq!(record.net_monthly_income, 25_000.0);
    assert_eq!(record.contract_type, ContractType::Permanent);
    assert_eq!(record.employment_sector, EmploymentSector::Government);
    assert_eq!(record.employer_match.tier, EmployerTier::Government);
    assert!(!record.is_new_borrower);
}

#[test]
fn private_employer_is_classified_through_the_directory() {
    let mut input = strong_input();
    input.employment_sector = Some("PRIVATE".to_string());
    input.employer_name = Some("acme & co".to_string());

    let record = record_builder().build(input).expect("valid input");
    assert_eq!(record.employer_match.tier, EmployerTier::Listed);
    assert_eq!(
        record.employer_match.matched_name.as_deref(),
        Some("Acme & Co.")
    );
}

#[test]
fn free_text_contract_descriptions_are_canonicalized() {
    let mut input = strong_input();
    input.contract_type = Some("full-time".to_string());

    let record = record_builder().build(input).expect("valid input");
    assert_eq!(record.contract_type, ContractType::Permanent);
}
