//! End-to-end tests: catalog file on disk → load_catalog → queries.
//!
//! No mocks. Uses tempfiles so the std file front end is exercised exactly
//! as the CLI uses it.

use std::fs;
use std::path::PathBuf;

use catalog::{
    filter_by_category, find_by_title, list_all, list_by_category, load_catalog, search, Category,
    LoadError, MAX_BOOKS,
};
use tempfile::TempDir;

const LIBRARY: &str = "\
Titolo;Autore;Anno;Prezzo;Categoria
Dune;Frank Herbert;1965;15.50;Scienza
Il nome della rosa;Umberto Eco;1980;12.00;Romanzo
Cosmos;Carl Sagan;1980;18.90;Science
Lezioni americane;Italo Calvino;1988;10.00;Saggistica
Senza prezzo;Anonimo;1999;gratis;Scienza
Storia dell'arte;Ernst Gombrich;1950;35.00;Arte
Senza categoria;Qualcuno;2001;5.00
";

fn write_catalog(dir: &TempDir, contents: &str) -> PathBuf {
    let path = dir.path().join("libreria.csv");
    fs::write(&path, contents).unwrap();
    path
}

#[test]
fn e2e_loads_every_row_in_file_order() {
    let tmp = TempDir::new().unwrap();
    let path = write_catalog(&tmp, LIBRARY);

    let report = load_catalog(&path).unwrap();
    assert_eq!(report.count(), 7);
    assert!(!report.truncated());

    let titles: Vec<_> = list_all(&report.catalog).map(|b| b.title.as_str()).collect();
    assert_eq!(titles[0], "Dune");
    assert_eq!(titles[6], "Senza categoria");
}

#[test]
fn e2e_degraded_rows_are_kept_with_defaults() {
    let tmp = TempDir::new().unwrap();
    let path = write_catalog(&tmp, LIBRARY);
    let report = load_catalog(&path).unwrap();

    let unpriced = search(&report.catalog, "senza prezzo").unwrap();
    assert_eq!(unpriced.price, 0.0);
    assert_eq!(unpriced.category, Category::Science);

    let uncategorised = search(&report.catalog, "Senza categoria").unwrap();
    assert_eq!(uncategorised.category, Category::Narrative);

    assert_eq!(report.degraded, 2);
}

#[test]
fn e2e_search_is_case_insensitive() {
    let tmp = TempDir::new().unwrap();
    let path = write_catalog(&tmp, LIBRARY);
    let catalog = load_catalog(&path).unwrap().into_catalog();

    assert_eq!(find_by_title(&catalog, "dune"), Some(0));
    assert_eq!(find_by_title(&catalog, "IL NOME DELLA ROSA"), Some(1));
    assert_eq!(find_by_title(&catalog, "Neuromancer"), None);
}

#[test]
fn e2e_category_filter_skips_unpriced_records() {
    let tmp = TempDir::new().unwrap();
    let path = write_catalog(&tmp, LIBRARY);
    let catalog = load_catalog(&path).unwrap().into_catalog();

    let science: Vec<_> = filter_by_category(&catalog, Category::Science)
        .map(|b| b.title.as_str())
        .collect();
    assert_eq!(science, ["Dune", "Cosmos"]);

    assert_eq!(list_by_category(&catalog, "SAGGISTICA").count(), 1);
    assert_eq!(list_by_category(&catalog, "arte").count(), 1);
    assert_eq!(list_by_category(&catalog, "nonsense").count(), 1);
}

#[test]
fn e2e_oversized_file_stores_first_capacity_rows() {
    let tmp = TempDir::new().unwrap();
    let mut contents = String::from("T;A;Y;P;C\n");
    for i in 0..(MAX_BOOKS + 25) {
        contents.push_str(&format!("Volume {i};Author {i};1900;2.50;Arte\n"));
    }
    let path = write_catalog(&tmp, &contents);

    let report = load_catalog(&path).unwrap();
    assert_eq!(report.count(), MAX_BOOKS);
    assert_eq!(report.dropped, 25);
    assert_eq!(report.catalog.get(0).unwrap().title.as_str(), "Volume 0");
    assert_eq!(
        report.catalog.get(MAX_BOOKS - 1).unwrap().title.as_str(),
        format!("Volume {}", MAX_BOOKS - 1)
    );
    assert_eq!(find_by_title(&report.catalog, &format!("Volume {MAX_BOOKS}")), None);
}

#[test]
fn e2e_missing_file_reports_open_error() {
    let tmp = TempDir::new().unwrap();
    let err = load_catalog(tmp.path().join("absent.csv")).unwrap_err();
    assert!(matches!(err, LoadError::Open { .. }));
}

#[test]
fn e2e_reload_builds_fresh_catalog() {
    let tmp = TempDir::new().unwrap();
    let path = write_catalog(&tmp, LIBRARY);
    let first = load_catalog(&path).unwrap().into_catalog();

    fs::write(&path, "T;A;Y;P;C\nSolo;Uno;2020;1.00;Arte\n").unwrap();
    let second = load_catalog(&path).unwrap().into_catalog();

    assert_eq!(first.len(), 7);
    assert_eq!(second.len(), 1);
}
