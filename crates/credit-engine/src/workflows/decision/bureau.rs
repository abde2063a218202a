use super::domain::BureauReport;

/// Applicant metadata forwarded with a bureau enquiry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BureauRequestMeta {
    pub reference: String,
    pub first_name: String,
    pub last_name: String,
}

/// Failure modes of the external bureau collaborator. None of these are
/// recoverable inside the engine; retry policy belongs to the caller.
#[derive(Debug, thiserror::Error)]
pub enum BureauError {
    #[error("bureau service unreachable: {0}")]
    Unreachable(String),
    #[error("bureau request timed out after {0} ms")]
    Timeout(u64),
    #[error("no bureau file found for the applicant")]
    NotFound,
    #[error("bureau returned error status {status}")]
    Status { status: u16 },
}

/// External credit-report collaborator. The decision orchestrator issues a
/// single blocking call per request and never retries.
pub trait BureauClient: Send + Sync {
    fn fetch_report(
        &self,
        identity_number: &str,
        meta: &BureauRequestMeta,
    ) -> Result<BureauReport, BureauError>;
}
