use crate::infra::{
    default_scoring_config, fixture_bureau_report, FixtureBureauClient,
    InMemoryDecisionRepository,
};
use clap::Args;
use credit_engine::config::AppConfig;
use credit_engine::error::AppError;
use credit_engine::workflows::decision::{
    ApplicantInput, CreditExposure, DecisionService, DeviceSignals, FactorKey, ScoreResult,
};
use credit_engine::workflows::directory::EmployerDirectory;
use std::io::Cursor;
use std::path::PathBuf;
use std::sync::Arc;

/// Built-in directory slice so the demo works without reference data on
/// disk; `serve` always loads the configured file instead.
const DEMO_DIRECTORY_CSV: &str = "name;tel;email;website\n\
Acme & Co.;+27 11 555 0100;info@acme.example;https://acme.example\n\
Karoo Mining Group;+27 21 555 0142;contact@karoo.example;\n\
Umbrella Holdings;;;\n";

#[derive(Args, Debug, Default)]
pub(crate) struct DemoArgs {
    /// Score a distressed applicant profile instead of the healthy one
    #[arg(long)]
    pub(crate) distressed: bool,
    /// Use an employer directory file instead of the built-in sample
    #[arg(long)]
    pub(crate) directory: Option<PathBuf>,
}

#[derive(Args, Debug)]
pub(crate) struct ClassifyArgs {
    /// Employer name to classify
    pub(crate) name: String,
    /// Employment sector (GOVERNMENT or PRIVATE)
    #[arg(long, default_value = "PRIVATE")]
    pub(crate) sector: String,
    /// Employer directory file (defaults to the configured path)
    #[arg(long)]
    pub(crate) directory: Option<PathBuf>,
}

pub(crate) fn run_employer_classify(args: ClassifyArgs) -> Result<(), AppError> {
    let ClassifyArgs {
        name,
        sector,
        directory,
    } = args;

    let path = match directory {
        Some(path) => path,
        None => AppConfig::load()?.engine.directory_path,
    };
    let directory = EmployerDirectory::from_path(&path)?;

    let sector = credit_engine::workflows::decision::EmploymentSector::parse(&sector)
        .unwrap_or(credit_engine::workflows::decision::EmploymentSector::Private);
    let outcome = directory.classify(sector, &name);

    println!("Employer classification");
    println!("- directory: {} ({} entries)", path.display(), directory.len());
    println!("- sector: {}", sector.label());
    println!(
        "- tier: {} ({:.0}% trust)",
        outcome.tier.label(),
        outcome.tier.trust_percent()
    );
    match outcome.matched_name {
        Some(matched) => println!("- matched entry: {matched}"),
        None => println!("- matched entry: none"),
    }

    Ok(())
}

pub(crate) fn run_demo(args: DemoArgs) -> Result<(), AppError> {
    let DemoArgs {
        distressed,
        directory,
    } = args;

    let directory = match directory {
        Some(path) => Arc::new(EmployerDirectory::from_path(path)?),
        None => Arc::new(
            EmployerDirectory::from_reader(Cursor::new(DEMO_DIRECTORY_CSV))
                .expect("built-in demo directory is valid"),
        ),
    };

    let report = if distressed {
        distressed_bureau_report()
    } else {
        fixture_bureau_report()
    };

    let service = DecisionService::new(
        directory,
        Arc::new(FixtureBureauClient::new(report)),
        Arc::new(InMemoryDecisionRepository::default()),
        default_scoring_config(),
    )?;

    let input = if distressed {
        distressed_applicant()
    } else {
        healthy_applicant()
    };

    println!("Credit decision demo");
    println!(
        "Applicant: {} {} ({} sector, {})",
        input.first_name.as_deref().unwrap_or("-"),
        input.last_name.as_deref().unwrap_or("-"),
        input.employment_sector.as_deref().unwrap_or("-"),
        input.employer_name.as_deref().unwrap_or("-"),
    );

    let record = match service.decide(input) {
        Ok(record) => record,
        Err(err) => {
            println!("  Decision rejected: {err}");
            return Ok(());
        }
    };

    if let Some(result) = &record.result {
        render_breakdown(result);
    }

    if let Some(bureau) = &record.bureau {
        render_exposure(&bureau.exposure);
    }

    println!(
        "\nStored as {} at {} (status {})",
        record.decision_id, record.decided_at, record.status.label()
    );

    Ok(())
}

fn render_breakdown(result: &ScoreResult) {
    println!("\nFactor breakdown");
    for key in FactorKey::ordered() {
        if let Some(factor) = result.breakdown.get(&key) {
            println!(
                "- {}: {:.1}% of {:.0}% weight -> {:.2}% ({})",
                key.label(),
                factor.normalized_percent,
                factor.weight_percent,
                factor.contribution_percent,
                factor.detail
            );
        }
    }

    println!(
        "\nEngine output: {:.1} / 100 -> {}",
        result.normalized_score,
        result.recommendation.label()
    );

    if result.reason_codes.is_empty() {
        println!("Reason codes: none");
    } else {
        println!("Reason codes:");
        for reason in &result.reason_codes {
            println!("- {reason}");
        }
    }
}

fn render_exposure(exposure: &CreditExposure) {
    println!("\nBureau exposure");
    println!(
        "- revolving {:.0} / {:.0} | total {:.0} / {:.0} | installments {:.0}/month",
        exposure.revolving_balance,
        exposure.revolving_limits,
        exposure.total_balance,
        exposure.total_limits,
        exposure.total_monthly_installments
    );
}

fn healthy_applicant() -> ApplicantInput {
    ApplicantInput {
        identity_number: Some("9001015009087".to_string()),
        first_name: Some("Naledi".to_string()),
        last_name: Some("Dlamini".to_string()),
        annual_income: Some(480_000.0),
        annual_expenses: Some(180_000.0),
        months_in_current_job: Some(36.0),
        contract_type: Some("PERMANENT".to_string()),
        employment_sector: Some("PRIVATE".to_string()),
        employer_name: Some("Acme & Co.".to_string()),
        is_new_borrower: Some(true),
        device: DeviceSignals {
            ip: Some("196.25.1.10".to_string()),
            user_agent: Some("demo-cli/1.0".to_string()),
        },
    }
}

fn distressed_applicant() -> ApplicantInput {
    ApplicantInput {
        identity_number: Some("8507155012083".to_string()),
        first_name: Some("Thabo".to_string()),
        last_name: Some("Nkosi".to_string()),
        annual_income: Some(240_000.0),
        annual_expenses: Some(180_000.0),
        months_in_current_job: Some(2.0),
        contract_type: Some("CONTRACTOR".to_string()),
        employment_sector: Some("PRIVATE".to_string()),
        employer_name: Some("Corner Cafe".to_string()),
        is_new_borrower: Some(false),
        device: DeviceSignals::default(),
    }
}

fn distressed_bureau_report() -> credit_engine::workflows::decision::BureauReport {
    use credit_engine::workflows::decision::{AdverseListing, BureauReport};

    BureauReport {
        credit_score: 505.0,
        exposure: CreditExposure {
            total_balance: 88_000.0,
            total_limits: 95_000.0,
            revolving_balance: 36_000.0,
            revolving_limits: 40_000.0,
            total_monthly_installments: 3_200.0,
        },
        adverse_listings: vec![AdverseListing {
            listing_type: "default".to_string(),
            amount: Some(7_400.0),
        }],
        employment_history: Vec::new(),
    }
}
