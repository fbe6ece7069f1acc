use std::path::Path;

use cistrings::parse::orbital_space::parse_orbital_space;
use cistrings::{CoreOrdering, RequiredLists, StringListError, StringLists, StringListsConfig};

#[test]
fn test_parse_c2v() {
    let fp = Path::new("tests/orbital_spaces/c2v_valid.csv");
    let space = parse_orbital_space(&fp.to_path_buf()).unwrap();
    assert_eq!(space.nirrep, 4);
    assert_eq!(space.cmopi, vec![2, 1, 1, 2]);
    assert_eq!(space.core_mo, vec![0, 3]);
    assert_eq!(space.cmo_to_mo, vec![1, 2, 4, 5, 6, 7]);
}

#[test]
fn test_parsed_space_builds_lists() {
    let fp = Path::new("tests/orbital_spaces/c2v_valid.csv");
    let space = parse_orbital_space(&fp.to_path_buf()).unwrap();
    let mut config = StringListsConfig::new(RequiredLists::OneSubstitution);
    config.core_ordering = CoreOrdering::Global;
    let lists = StringLists::new(config, &space.cmopi, &space.core_mo, &space.cmo_to_mo, 2, 2).unwrap();
    assert_eq!(lists.ncmo(), 6);
    assert_eq!(lists.nas(), 15);
    assert_eq!(lists.fomo_to_mo(), &[0, 3]);
    assert_eq!(lists.frame().core_parity(), &[true, true, false, false, false, false]);
}

#[test]
fn test_no_symmetry() {
    let fp = Path::new("tests/orbital_spaces/no_symmetry.csv");
    let space = parse_orbital_space(&fp.to_path_buf()).unwrap();
    assert_eq!(space.nirrep, 1);
    assert_eq!(space.cmopi, vec![4]);
    assert!(space.core_mo.is_empty());
}

#[test]
fn test_int_parse_error() {
    let fp = Path::new("tests/orbital_spaces/int_parse_error.csv");
    match parse_orbital_space(&fp.to_path_buf()) {
        Ok(_) => panic!("Should have errored."),
        Err(_) => println!("Error as expected."),
    }
}

#[test]
fn test_csv_parse_error() {
    let fp = Path::new("tests/orbital_spaces/csv_parse_error.csv");
    match parse_orbital_space(&fp.to_path_buf()) {
        Ok(_) => panic!("Should have errored."),
        Err(_) => println!("Error as expected."),
    }
}

#[test]
fn test_unknown_kind() {
    let fp = Path::new("tests/orbital_spaces/unknown_kind.csv");
    let err = parse_orbital_space(&fp.to_path_buf()).unwrap_err();
    assert!(err.details.contains("valence"));
}

#[test]
fn test_duplicate_orbital() {
    let fp = Path::new("tests/orbital_spaces/duplicate_orbital.csv");
    assert!(parse_orbital_space(&fp.to_path_buf()).is_err());
}

#[test]
fn test_not_pitzer_is_invalid_configuration() {
    let fp = Path::new("tests/orbital_spaces/not_pitzer.csv");
    let err: StringListError = parse_orbital_space(&fp.to_path_buf()).unwrap_err().into();
    assert!(matches!(err, StringListError::InvalidConfiguration { .. }));
}

#[test]
fn test_missing_file() {
    let fp = Path::new("tests/orbital_spaces/does_not_exist.csv");
    assert!(parse_orbital_space(&fp.to_path_buf()).is_err());
}
