use std::collections::HashMap;
use std::io::Cursor;
use std::sync::{Arc, Mutex};

use axum::response::Response;
use serde_json::Value;

use crate::workflows::decision::bureau::{BureauClient, BureauError, BureauRequestMeta};
use crate::workflows::decision::domain::{
    AdverseListing, ApplicantInput, ApplicantRecord, BureauReport, CreditExposure, DecisionId,
    DeviceSignals, EmploymentHistoryEntry,
};
use crate::workflows::decision::intake::{IntakeDefaults, RecordBuilder};
use crate::workflows::decision::repository::{
    DecisionRecord, DecisionRepository, RepositoryError,
};
use crate::workflows::decision::scoring::{ScoringConfig, ScoringEngine};
use crate::workflows::decision::service::DecisionService;
use crate::workflows::directory::EmployerDirectory;

pub(super) const DIRECTORY_CSV: &str = "name;tel;email;website\n\
Acme & Co.;+27 11 555 0100;info@acme.example;https://acme.example\n\
Karoo Mining Group;+27 21 555 0142;contact@karoo.example;\n\
Umbrella Holdings;;;\n";

pub(super) fn directory() -> Arc<EmployerDirectory> {
    Arc::new(EmployerDirectory::from_reader(Cursor::new(DIRECTORY_CSV)).expect("directory loads"))
}

pub(super) fn scoring_config() -> ScoringConfig {
    ScoringConfig::default()
}

pub(super) fn scoring_engine() -> ScoringEngine {
    ScoringEngine::new(scoring_config()).expect("weights balance")
}

pub(super) fn record_builder() -> RecordBuilder {
    RecordBuilder::new(IntakeDefaults::default(), directory())
}

/// Government-sector applicant with a healthy affordability profile.
pub(super) fn strong_input() -> ApplicantInput {
    ApplicantInput {
        identity_number: Some("9001015009087".to_string()),
        first_name: Some("Naledi".to_string()),
        last_name: Some("Dlamini".to_string()),
        annual_income: Some(480_000.0),
        annual_expenses: Some(180_000.0),
        months_in_current_job: Some(36.0),
        contract_type: Some("PERMANENT".to_string()),
        employment_sector: Some("GOVERNMENT".to_string()),
        employer_name: Some("National Treasury".to_string()),
        is_new_borrower: Some(false),
        device: DeviceSignals {
            ip: Some("196.25.1.10".to_string()),
            user_agent: Some("Mozilla/5.0".to_string()),
        },
    }
}

/// Private-sector applicant with a stretched budget and no device capture.
pub(super) fn weak_input() -> ApplicantInput {
    ApplicantInput {
        identity_number: Some("8507155012083".to_string()),
        first_name: Some("Thabo".to_string()),
        last_name: Some("Nkosi".to_string()),
        annual_income: Some(240_000.0),
        annual_expenses: Some(180_000.0),
        months_in_current_job: Some(2.0),
        contract_type: Some("CONTRACTOR".to_string()),
        employment_sector: Some("PRIVATE".to_string()),
        employer_name: Some("Sole Trader Plumbing".to_string()),
        is_new_borrower: Some(false),
        device: DeviceSignals::default(),
    }
}

pub(super) fn strong_record() -> ApplicantRecord {
    record_builder().build(strong_input()).expect("valid input")
}

pub(super) fn weak_record() -> ApplicantRecord {
    record_builder().build(weak_input()).expect("valid input")
}

/// Bureau file matching the strong applicant: fair score, zero utilization,
/// clean listings, and a 20% DTI against the derived net income of 25 000.
pub(super) fn strong_report() -> BureauReport {
    BureauReport {
        credit_score: 620.0,
        exposure: CreditExposure {
            total_balance: 45_000.0,
            total_limits: 120_000.0,
            revolving_balance: 0.0,
            revolving_limits: 40_000.0,
            total_monthly_installments: 5_000.0,
        },
        adverse_listings: Vec::new(),
        employment_history: vec![EmploymentHistoryEntry {
            employer_name: "National Treasury".to_string(),
            occupation: Some("Analyst".to_string()),
            last_updated: None,
        }],
    }
}

/// Bureau file tripping all five reason-code thresholds against the weak
/// applicant (net income 5 000 -> installments at 60% DTI).
pub(super) fn weak_report() -> BureauReport {
    BureauReport {
        credit_score: 500.0,
        exposure: CreditExposure {
            total_balance: 80_000.0,
            total_limits: 90_000.0,
            revolving_balance: 36_000.0,
            revolving_limits: 40_000.0,
            total_monthly_installments: 3_000.0,
        },
        adverse_listings: vec![
            AdverseListing {
                listing_type: "default".to_string(),
                amount: Some(12_500.0),
            },
            AdverseListing {
                listing_type: "judgement".to_string(),
                amount: None,
            },
        ],
        employment_history: Vec::new(),
    }
}

#[derive(Default, Clone)]
pub(super) struct MemoryRepository {
    pub(super) records: Arc<Mutex<HashMap<DecisionId, DecisionRecord>>>,
}

impl DecisionRepository for MemoryRepository {
    fn insert(&self, record: DecisionRecord) -> Result<DecisionRecord, RepositoryError> {
        let mut guard = self.records.lock().expect("repository mutex poisoned");
        if guard.contains_key(&record.decision_id) {
            return Err(RepositoryError::Conflict);
        }
        guard.insert(record.decision_id.clone(), record.clone());
        Ok(record)
    }

    fn fetch(&self, id: &DecisionId) -> Result<Option<DecisionRecord>, RepositoryError> {
        let guard = self.records.lock().expect("repository mutex poisoned");
        Ok(guard.get(id).cloned())
    }
}

pub(super) struct UnavailableRepository;

impl DecisionRepository for UnavailableRepository {
    fn insert(&self, _record: DecisionRecord) -> Result<DecisionRecord, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn fetch(&self, _id: &DecisionId) -> Result<Option<DecisionRecord>, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }
}

/// Bureau stub handing back a fixed report.
#[derive(Clone)]
pub(super) struct StaticBureau {
    pub(super) report: BureauReport,
}

impl BureauClient for StaticBureau {
    fn fetch_report(
        &self,
        _identity_number: &str,
        _meta: &BureauRequestMeta,
    ) -> Result<BureauReport, BureauError> {
        Ok(self.report.clone())
    }
}

/// Bureau stub simulating an outage.
pub(super) struct FailingBureau;

impl BureauClient for FailingBureau {
    fn fetch_report(
        &self,
        _identity_number: &str,
        _meta: &BureauRequestMeta,
    ) -> Result<BureauReport, BureauError> {
        Err(BureauError::Unreachable("connection refused".to_string()))
    }
}

pub(super) fn build_service() -> (
    DecisionService<StaticBureau, MemoryRepository>,
    Arc<MemoryRepository>,
) {
    let repository = Arc::new(MemoryRepository::default());
    let bureau = Arc::new(StaticBureau {
        report: strong_report(),
    });
    let service = DecisionService::new(directory(), bureau, repository.clone(), scoring_config())
        .expect("service builds");
    (service, repository)
}

pub(super) fn build_failing_service() -> (
    DecisionService<FailingBureau, MemoryRepository>,
    Arc<MemoryRepository>,
) {
    let repository = Arc::new(MemoryRepository::default());
    let service = DecisionService::new(
        directory(),
        Arc::new(FailingBureau),
        repository.clone(),
        scoring_config(),
    )
    .expect("service builds");
    (service, repository)
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}
