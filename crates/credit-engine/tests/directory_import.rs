//! Integration specifications for loading and querying the listed-employer
//! directory.

use std::io::Cursor;

use credit_engine::workflows::decision::EmploymentSector;
use credit_engine::workflows::directory::{DirectoryLoadError, EmployerDirectory, EmployerTier};

const CSV: &str = "name;tel;email;website\n\
Acme & Co.;+27 11 555 0100;info@acme.example;https://acme.example\n\
Umbrella Holdings;;;\n\
umbrella holdings;;duplicate@umbrella.example;\n\
;;;\n\
Karoo Mining Group;+27 21 555 0142;contact@karoo.example;\n";

#[test]
fn loader_deduplicates_on_the_normalized_name() {
    let directory = EmployerDirectory::from_reader(Cursor::new(CSV)).expect("loads");
    assert_eq!(directory.len(), 3);

    let umbrella = directory
        .entries()
        .iter()
        .find(|entry| entry.normalized_name == "UMBRELLA HOLDINGS")
        .expect("entry kept");
    // First spelling wins; the duplicate row is dropped wholesale.
    assert_eq!(umbrella.display_name, "Umbrella Holdings");
    assert!(umbrella.email.is_none());
}

#[test]
fn punctuation_variants_resolve_to_the_same_entry() {
    let directory = EmployerDirectory::from_reader(Cursor::new(CSV)).expect("loads");

    let quoted = directory.classify(EmploymentSector::Private, "Acme & Co.");
    let spelled = directory.classify(EmploymentSector::Private, "ACME AND CO");

    assert_eq!(quoted.tier, EmployerTier::Listed);
    assert_eq!(quoted, spelled);
}

#[test]
fn partial_names_match_by_containment() {
    let directory = EmployerDirectory::from_reader(Cursor::new(CSV)).expect("loads");

    let matched = directory.classify(EmploymentSector::Private, "karoo mining");
    assert_eq!(matched.tier, EmployerTier::Listed);
    assert_eq!(matched.matched_name.as_deref(), Some("Karoo Mining Group"));
}

#[test]
fn an_empty_table_refuses_to_load() {
    let error = EmployerDirectory::from_reader(Cursor::new("name;tel;email;website\n"))
        .expect_err("fail closed");
    assert!(matches!(error, DirectoryLoadError::Empty));
}

#[test]
fn classification_tiers_cover_the_full_ladder() {
    let directory = EmployerDirectory::from_reader(Cursor::new(CSV)).expect("loads");

    assert_eq!(
        directory
            .classify(EmploymentSector::Government, "Department of Home Affairs")
            .tier,
        EmployerTier::Government
    );
    assert_eq!(
        directory
            .classify(EmploymentSector::Private, "Umbrella Holdings")
            .tier,
        EmployerTier::Listed
    );
    assert_eq!(
        directory
            .classify(EmploymentSector::Private, "Corner Cafe")
            .tier,
        EmployerTier::HighRiskManual
    );
    assert_eq!(
        directory.classify(EmploymentSector::Private, "").tier,
        EmployerTier::NotFound
    );
}
