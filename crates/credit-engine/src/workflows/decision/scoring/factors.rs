//! The eleven factor calculators. Each is a pure function of its inputs:
//! no shared state, and missing or non-finite numeric input degrades to a
//! zero/neutral contribution instead of failing the request.

use super::super::contract::ContractType;
use super::super::domain::{
    ApplicantRecord, BureauReport, CreditExposure, DeviceSignals, FactorContribution, FactorKey,
};
use super::config::ScoringConfig;
use super::SupplementalSignals;
use crate::workflows::directory::EmployerMatch;

const DEVICE_REQUIRED_SIGNALS: u32 = 2;

/// Evaluate every factor in the fixed `FactorKey::ordered()` sequence.
pub(crate) fn evaluate_all(
    applicant: &ApplicantRecord,
    bureau: &BureauReport,
    config: &ScoringConfig,
    signals: &dyn SupplementalSignals,
) -> Vec<FactorContribution> {
    FactorKey::ordered()
        .iter()
        .map(|&key| {
            let weight = config.weights.for_key(key);
            match key {
                FactorKey::CreditScore => credit_score(bureau.credit_score, config, weight),
                FactorKey::CreditUtilization => {
                    credit_utilization(&bureau.exposure, config, weight)
                }
                FactorKey::AdverseListings => adverse_listings(bureau.adverse_listings.len(), weight),
                FactorKey::DebtToIncome => debt_to_income(
                    bureau.exposure.total_monthly_installments,
                    applicant.net_monthly_income,
                    weight,
                ),
                FactorKey::EmploymentTenure => {
                    employment_tenure(applicant.months_in_current_job, config, weight)
                }
                FactorKey::ContractType => contract_type(&applicant.contract_type, weight),
                FactorKey::EmployerCategory => employer_category(&applicant.employer_match, weight),
                FactorKey::IncomeStability => income_stability(
                    applicant.gross_annual_income,
                    applicant.annual_expenses,
                    weight,
                ),
                FactorKey::RepaymentHistory => {
                    repayment_history(applicant.is_new_borrower, signals, weight)
                }
                FactorKey::RetrievalConfidence => retrieval_confidence(signals, weight),
                FactorKey::DeviceSignals => device_signals(&applicant.device, weight),
            }
        })
        .collect()
}

fn credit_score(score: f64, config: &ScoringConfig, weight: f64) -> FactorContribution {
    let score = finite_or_zero(score);
    let span = config.credit_score_ceiling - config.credit_score_floor;
    let normalized = clamp_percent((score - config.credit_score_floor) / span * 100.0);
    contribution(
        FactorKey::CreditScore,
        score,
        normalized,
        weight,
        format!("bureau score {score:.0} against bounds {:.0}-{:.0}",
            config.credit_score_floor, config.credit_score_ceiling),
    )
}

fn credit_utilization(
    exposure: &CreditExposure,
    config: &ScoringConfig,
    weight: f64,
) -> FactorContribution {
    let balance = finite_or_zero(exposure.revolving_balance);
    let limit = finite_or_zero(exposure.revolving_limits);

    if limit <= 0.0 {
        return contribution(
            FactorKey::CreditUtilization,
            0.0,
            config.utilization_neutral_percent,
            weight,
            "no revolving limit reported; neutral credit granted".to_string(),
        );
    }

    let ratio_percent = balance / limit * 100.0;
    let normalized = clamp_percent(100.0 - ratio_percent);
    contribution(
        FactorKey::CreditUtilization,
        ratio_percent,
        normalized,
        weight,
        format!("revolving balance {balance:.0} against limit {limit:.0} ({ratio_percent:.1}% utilized)"),
    )
}

fn adverse_listings(count: usize, weight: f64) -> FactorContribution {
    let normalized = match count {
        0 => 100.0,
        1 => 50.0,
        2 => 25.0,
        _ => 0.0,
    };
    contribution(
        FactorKey::AdverseListings,
        count as f64,
        normalized,
        weight,
        format!("{count} adverse listing(s) on file"),
    )
}

fn debt_to_income(monthly_debt: f64, monthly_income: f64, weight: f64) -> FactorContribution {
    let debt = finite_or_zero(monthly_debt);
    let income = finite_or_zero(monthly_income);

    if income <= 0.0 {
        return contribution(
            FactorKey::DebtToIncome,
            0.0,
            0.0,
            weight,
            "no positive monthly income available".to_string(),
        );
    }

    let dti_percent = debt / income * 100.0;
    let normalized = clamp_percent(100.0 - dti_percent);
    contribution(
        FactorKey::DebtToIncome,
        dti_percent,
        normalized,
        weight,
        format!("monthly installments {debt:.0} against income {income:.0} ({dti_percent:.1}% DTI)"),
    )
}

fn employment_tenure(months: f64, config: &ScoringConfig, weight: f64) -> FactorContribution {
    let months = finite_or_zero(months).max(0.0);
    let full_credit = config.tenure_full_credit_months.max(1.0);
    let normalized = clamp_percent(months / full_credit * 100.0);
    contribution(
        FactorKey::EmploymentTenure,
        months,
        normalized,
        weight,
        format!("{months:.0} month(s) at current employer"),
    )
}

fn contract_type(contract: &ContractType, weight: f64) -> FactorContribution {
    let normalized = match contract {
        ContractType::Permanent => 100.0,
        ContractType::PermanentOnProbation => 75.0,
        ContractType::FixedTerm12Plus => 80.0,
        ContractType::FixedTermLt12 => 60.0,
        ContractType::SelfEmployed12Plus => 70.0,
        ContractType::PartTime => 40.0,
        ContractType::UnemployedOrUnknown | ContractType::Other(_) => 0.0,
    };
    contribution(
        FactorKey::ContractType,
        normalized,
        normalized,
        weight,
        contract.label().to_string(),
    )
}

fn employer_category(employer_match: &EmployerMatch, weight: f64) -> FactorContribution {
    let normalized = employer_match.tier.trust_percent();
    let detail = match &employer_match.matched_name {
        Some(name) => format!("{} tier; matched {name}", employer_match.tier.label()),
        None => format!("{} tier", employer_match.tier.label()),
    };
    contribution(FactorKey::EmployerCategory, normalized, normalized, weight, detail)
}

fn income_stability(annual_income: f64, annual_expenses: f64, weight: f64) -> FactorContribution {
    let income = finite_or_zero(annual_income);
    let expenses = finite_or_zero(annual_expenses);

    if income <= 0.0 {
        return contribution(
            FactorKey::IncomeStability,
            0.0,
            0.0,
            weight,
            "no positive annual income declared".to_string(),
        );
    }

    let expense_ratio = (expenses / income * 100.0).max(0.0);
    let (normalized, reason) = if expense_ratio <= 40.0 {
        (100.0, "expenses comfortably covered by income")
    } else if expense_ratio <= 65.0 {
        (70.0, "moderate expense load against income")
    } else if expense_ratio <= 85.0 {
        (45.0, "thin margin between income and expenses")
    } else {
        (20.0, "expenses consume nearly all declared income")
    };

    contribution(
        FactorKey::IncomeStability,
        expense_ratio,
        normalized,
        weight,
        format!("{reason} ({expense_ratio:.0}% of income spent)"),
    )
}

fn repayment_history(
    is_new_borrower: bool,
    signals: &dyn SupplementalSignals,
    weight: f64,
) -> FactorContribution {
    let (normalized, detail) = signals.repayment_history(is_new_borrower);
    contribution(
        FactorKey::RepaymentHistory,
        if is_new_borrower { 1.0 } else { 0.0 },
        clamp_percent(normalized),
        weight,
        detail,
    )
}

fn retrieval_confidence(signals: &dyn SupplementalSignals, weight: f64) -> FactorContribution {
    let (normalized, detail) = signals.retrieval_confidence();
    let normalized = clamp_percent(normalized);
    contribution(
        FactorKey::RetrievalConfidence,
        normalized,
        normalized,
        weight,
        detail,
    )
}

fn device_signals(device: &DeviceSignals, weight: f64) -> FactorContribution {
    let captured = device.captured().min(DEVICE_REQUIRED_SIGNALS);
    let normalized = captured as f64 / DEVICE_REQUIRED_SIGNALS as f64 * 100.0;
    contribution(
        FactorKey::DeviceSignals,
        captured as f64,
        normalized,
        weight,
        format!("{captured}/{DEVICE_REQUIRED_SIGNALS} device signals captured"),
    )
}

fn contribution(
    key: FactorKey,
    raw_value: f64,
    normalized_percent: f64,
    weight_percent: f64,
    detail: String,
) -> FactorContribution {
    FactorContribution {
        key,
        raw_value,
        normalized_percent,
        weight_percent,
        contribution_percent: normalized_percent * weight_percent / 100.0,
        detail,
    }
}

fn finite_or_zero(value: f64) -> f64 {
    if value.is_finite() {
        value
    } else {
        0.0
    }
}

fn clamp_percent(value: f64) -> f64 {
    if !value.is_finite() {
        return 0.0;
    }
    value.clamp(0.0, 100.0)
}
