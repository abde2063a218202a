use serde::de::Deserializer;
use serde::ser::Serializer;
use serde::{Deserialize, Serialize};

/// Canonical employment contract classification.
///
/// `canonicalize` is total: recognized aliases resolve to one of the seven
/// canonical variants and anything else survives as `Other`, which scores a
/// zero contribution downstream.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ContractType {
    Permanent,
    PermanentOnProbation,
    FixedTerm12Plus,
    FixedTermLt12,
    SelfEmployed12Plus,
    PartTime,
    UnemployedOrUnknown,
    Other(String),
}

impl ContractType {
    /// Resolve a free-text contract description to its canonical variant.
    pub fn canonicalize(raw: &str) -> Self {
        let token = normalize_token(raw);
        match token.as_str() {
            "" | "UNEMPLOYED" | "UNKNOWN" | "UNEMPLOYED_OR_UNKNOWN" => Self::UnemployedOrUnknown,
            "PERMANENT" | "PERMANENT_EMPLOYEE" | "FULL_TIME" => Self::Permanent,
            "PROBATION" | "PERMANENT_ON_PROBATION" => Self::PermanentOnProbation,
            "FIXED_TERM_12_PLUS" | "FIXED_TERM_12_MONTHS" | "FIXED_TERM_12_MONTHS_PLUS" => {
                Self::FixedTerm12Plus
            }
            "FIXED_TERM"
            | "FIXED_TERM_LT_12"
            | "FIXED_TERM_LT_12_MONTHS"
            | "FIXED_TERM_UNDER_12"
            | "FIXED_TERM_UNDER_12_MONTHS"
            | "CONTRACTOR" => Self::FixedTermLt12,
            "SELF_EMPLOYED" | "SELF_EMPLOYED_12_PLUS" | "SELF_EMPLOYED_12_MONTHS_PLUS" => {
                Self::SelfEmployed12Plus
            }
            "PART_TIME" | "PARTTIME" | "PART_TIME_EMPLOYEE" => Self::PartTime,
            _ => Self::Other(token),
        }
    }

    pub fn as_token(&self) -> &str {
        match self {
            ContractType::Permanent => "PERMANENT",
            ContractType::PermanentOnProbation => "PERMANENT_ON_PROBATION",
            ContractType::FixedTerm12Plus => "FIXED_TERM_12_PLUS",
            ContractType::FixedTermLt12 => "FIXED_TERM_LT_12",
            ContractType::SelfEmployed12Plus => "SELF_EMPLOYED_12_PLUS",
            ContractType::PartTime => "PART_TIME",
            ContractType::UnemployedOrUnknown => "UNEMPLOYED_OR_UNKNOWN",
            ContractType::Other(token) => token,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ContractType::Permanent => "Permanent",
            ContractType::PermanentOnProbation => "Permanent (probation)",
            ContractType::FixedTerm12Plus => "Fixed term, 12 months or more",
            ContractType::FixedTermLt12 => "Fixed term, under 12 months",
            ContractType::SelfEmployed12Plus => "Self-employed, 12+ months trading",
            ContractType::PartTime => "Part-time",
            ContractType::UnemployedOrUnknown => "Unemployed / unknown",
            ContractType::Other(_) => "Unrecognized contract",
        }
    }
}

/// Uppercase, squash runs of non-alphanumerics into `_`, trim the ends.
fn normalize_token(raw: &str) -> String {
    let mut token = String::with_capacity(raw.len());
    let mut pending_separator = false;
    for c in raw.trim().chars() {
        if c.is_ascii_alphanumeric() {
            if pending_separator && !token.is_empty() {
                token.push('_');
            }
            pending_separator = false;
            token.push(c.to_ascii_uppercase());
        } else {
            pending_separator = true;
        }
    }
    token
}

impl Serialize for ContractType {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_token())
    }
}

impl<'de> Deserialize<'de> for ContractType {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Ok(Self::canonicalize(&raw))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn recognized_aliases_resolve_to_canonical_variants() {
        assert_eq!(ContractType::canonicalize("full-time"), ContractType::Permanent);
        assert_eq!(
            ContractType::canonicalize("Permanent employee"),
            ContractType::Permanent
        );
        assert_eq!(
            ContractType::canonicalize("probation"),
            ContractType::PermanentOnProbation
        );
        assert_eq!(
            ContractType::canonicalize("fixed term (12 months+)"),
            ContractType::FixedTerm12Plus
        );
        assert_eq!(
            ContractType::canonicalize("contractor"),
            ContractType::FixedTermLt12
        );
        assert_eq!(
            ContractType::canonicalize("self employed"),
            ContractType::SelfEmployed12Plus
        );
        assert_eq!(ContractType::canonicalize("PartTime"), ContractType::PartTime);
        assert_eq!(
            ContractType::canonicalize("unknown"),
            ContractType::UnemployedOrUnknown
        );
    }

    #[test]
    fn normalization_is_total_over_arbitrary_input() {
        assert_eq!(
            ContractType::canonicalize("  gig -- worker!! "),
            ContractType::Other("GIG_WORKER".to_string())
        );
        assert_eq!(
            ContractType::canonicalize("???"),
            ContractType::UnemployedOrUnknown
        );
    }

    #[test]
    fn serde_round_trips_through_the_token_form() {
        let json = serde_json::to_string(&ContractType::FixedTermLt12).expect("serialize");
        assert_eq!(json, "\"FIXED_TERM_LT_12\"");

        let parsed: ContractType = serde_json::from_str("\"Fixed Term\"").expect("deserialize");
        assert_eq!(parsed, ContractType::FixedTermLt12);

        let unknown: ContractType = serde_json::from_str("\"ZERO_HOURS\"").expect("deserialize");
        assert_eq!(unknown, ContractType::Other("ZERO_HOURS".to_string()));
    }
}
