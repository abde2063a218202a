use metrics_exporter_prometheus::PrometheusHandle;
use std::collections::HashMap;
use std::sync::atomic::AtomicBool;
use std::sync::{Arc, Mutex};

use credit_engine::workflows::decision::{
    BureauClient, BureauError, BureauReport, BureauRequestMeta, CreditExposure, DecisionId,
    DecisionRecord, DecisionRepository, RepositoryError, ScoringConfig,
};

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

#[derive(Default, Clone)]
pub(crate) struct InMemoryDecisionRepository {
    records: Arc<Mutex<HashMap<DecisionId, DecisionRecord>>>,
}

impl DecisionRepository for InMemoryDecisionRepository {
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

/// Stand-in bureau client returning a fixed report. The live bureau
/// integration is wired in by deployment; local serve and demo runs use
/// this fixture.
#[derive(Clone)]
pub(crate) struct FixtureBureauClient {
    report: BureauReport,
}

impl FixtureBureauClient {
    pub(crate) fn new(report: BureauReport) -> Self {
        Self { report }
    }
}

impl BureauClient for FixtureBureauClient {
    fn fetch_report(
        &self,
        _identity_number: &str,
        _meta: &BureauRequestMeta,
    ) -> Result<BureauReport, BureauError> {
        Ok(self.report.clone())
    }
}

pub(crate) fn default_scoring_config() -> ScoringConfig {
    ScoringConfig::default()
}

/// Representative bureau file used by the fixture client.
pub(crate) fn fixture_bureau_report() -> BureauReport {
    BureauReport {
        credit_score: 655.0,
        exposure: CreditExposure {
            total_balance: 62_000.0,
            total_limits: 180_000.0,
            revolving_balance: 12_000.0,
            revolving_limits: 60_000.0,
            total_monthly_installments: 6_200.0,
        },
        adverse_listings: Vec::new(),
        employment_history: Vec::new(),
    }
}
