//! Listed-employer reference directory.
//!
//! The directory is loaded once at startup from a semicolon-delimited table
//! (`name;tel;email;website`, one header line) and treated as immutable for
//! the life of the process. Concurrent scoring requests read it without
//! locking; a refresh builds a whole new table and swaps the `Arc` owning it.

mod matcher;
mod normalizer;
mod parser;

use std::collections::HashMap;
use std::io::Read;
use std::path::Path;

use serde::Serialize;

pub use matcher::{EmployerMatch, EmployerTier};
pub(crate) use normalizer::normalize_employer_name;

use crate::workflows::decision::domain::EmploymentSector;

/// A single row of the listed-employer table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EmployerDirectoryEntry {
    pub display_name: String,
    pub normalized_name: String,
    pub tel: Option<String>,
    pub email: Option<String>,
    pub website: Option<String>,
}

/// Immutable lookup table over the listed-employer reference data.
///
/// Holds an exact-match index keyed by normalized name plus the entry list
/// used for substring containment matching.
#[derive(Debug, Clone)]
pub struct EmployerDirectory {
    entries: Vec<EmployerDirectoryEntry>,
    index: HashMap<String, usize>,
}

#[derive(Debug, thiserror::Error)]
pub enum DirectoryLoadError {
    #[error("failed to read employer directory: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid employer directory data: {0}")]
    Csv(#[from] csv::Error),
    #[error("employer directory contained no usable rows")]
    Empty,
}

impl EmployerDirectory {
    /// Load the directory from a file on disk. Loading is side-effect-free,
    /// so a failed startup load can simply be retried.
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, DirectoryLoadError> {
        let file = std::fs::File::open(path)?;
        Self::from_reader(file)
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<Self, DirectoryLoadError> {
        let mut entries = Vec::new();
        let mut index = HashMap::new();

        for row in parser::parse_rows(reader)? {
            let normalized = normalize_employer_name(&row.name);
            if row.name.is_empty() || normalized.is_empty() || index.contains_key(&normalized) {
                continue;
            }

            index.insert(normalized.clone(), entries.len());
            entries.push(EmployerDirectoryEntry {
                display_name: row.name,
                normalized_name: normalized,
                tel: row.tel,
                email: row.email,
                website: row.website,
            });
        }

        if entries.is_empty() {
            return Err(DirectoryLoadError::Empty);
        }

        Ok(Self { entries, index })
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn entries(&self) -> &[EmployerDirectoryEntry] {
        &self.entries
    }

    fn exact(&self, normalized: &str) -> Option<&EmployerDirectoryEntry> {
        self.index.get(normalized).map(|&slot| &self.entries[slot])
    }

    /// Classify an employer name into a trust tier for the given sector.
    pub fn classify(&self, sector: EmploymentSector, employer_name: &str) -> EmployerMatch {
        matcher::classify(self, sector, employer_name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    const SAMPLE: &str = "name;tel;email;website\n\
Acme & Co.;+27 11 555 0100;info@acme.example;https://acme.example\n\
Umbrella Holdings;;;\n\
;;;\n\
ACME AND CO;+27 11 555 0199;;\n\
Karoo Mining Group;+27 21 555 0142;contact@karoo.example;\n";

    #[test]
    fn load_skips_blank_and_duplicate_rows() {
        let directory = EmployerDirectory::from_reader(Cursor::new(SAMPLE)).expect("loads");
        assert_eq!(directory.len(), 3);
        assert_eq!(directory.entries()[0].display_name, "Acme & Co.");
        assert_eq!(directory.entries()[0].normalized_name, "ACME AND CO");
    }

    #[test]
    fn ampersand_and_punctuation_share_a_lookup_key() {
        assert_eq!(
            normalize_employer_name("Acme & Co."),
            normalize_employer_name("ACME AND CO")
        );
    }

    #[test]
    fn load_fails_closed_on_empty_table() {
        let error = EmployerDirectory::from_reader(Cursor::new("name;tel;email;website\n;;;\n"))
            .expect_err("no usable rows");
        assert!(matches!(error, DirectoryLoadError::Empty));
    }

    #[test]
    fn from_path_propagates_io_errors() {
        let error = EmployerDirectory::from_path("./does-not-exist.csv").expect_err("io error");
        assert!(matches!(error, DirectoryLoadError::Io(_)));
    }

    #[test]
    fn exact_match_classifies_as_listed() {
        let directory = EmployerDirectory::from_reader(Cursor::new(SAMPLE)).expect("loads");
        let matched = directory.classify(EmploymentSector::Private, "acme & co");
        assert_eq!(matched.tier, EmployerTier::Listed);
        assert_eq!(matched.matched_name.as_deref(), Some("Acme & Co."));
    }

    #[test]
    fn substring_match_requires_three_characters() {
        let directory = EmployerDirectory::from_reader(Cursor::new(SAMPLE)).expect("loads");

        let matched = directory.classify(EmploymentSector::Private, "Karoo");
        assert_eq!(matched.tier, EmployerTier::Listed);
        assert_eq!(matched.matched_name.as_deref(), Some("Karoo Mining Group"));

        let short = directory.classify(EmploymentSector::Private, "Ka");
        assert_eq!(short.tier, EmployerTier::HighRiskManual);
    }

    #[test]
    fn government_sector_skips_the_lookup() {
        let directory = EmployerDirectory::from_reader(Cursor::new(SAMPLE)).expect("loads");
        let matched = directory.classify(EmploymentSector::Government, "Department of Health");
        assert_eq!(matched.tier, EmployerTier::Government);
        assert!(matched.matched_name.is_none());
    }

    #[test]
    fn unmatched_private_employer_defaults_to_manual_review_tier() {
        let directory = EmployerDirectory::from_reader(Cursor::new(SAMPLE)).expect("loads");
        let matched = directory.classify(EmploymentSector::Private, "Sole Trader Plumbing");
        assert_eq!(matched.tier, EmployerTier::HighRiskManual);
        assert!(matched.matched_name.is_none());
    }

    #[test]
    fn missing_name_yields_not_found() {
        let directory = EmployerDirectory::from_reader(Cursor::new(SAMPLE)).expect("loads");
        let matched = directory.classify(EmploymentSector::Private, "   ");
        assert_eq!(matched.tier, EmployerTier::NotFound);
    }
}
