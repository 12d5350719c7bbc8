//! Import a fetcher export from disk into a SQLite store.

use std::io::Write;

use folio_common::{PaperStatus, PaperStore};
use folio_db::{Database, PaperRepository};
use folio_ingestion::{ingest_from, FileSource, IngestError};

const EXPORT: &str = r#"
- title: "Minimum Wages and Employment"
  authors: ["Card, David", "Krueger, Alan"]
  abstract: "A case study of the fast-food industry."
  journal: "American Economic Review"
  doi: "10.0000/mw"
  source: openalex
- title: "Voting Technology"
  authors: "Smith, Anne"
  venue: "NBER Working Paper w12345"
  url: "https://www.nber.org/papers/w12345"
  source: nber
- title: ""
  authors: "Ghost"
"#;

fn export_file(content: &str, suffix: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::Builder::new().suffix(suffix).tempfile().unwrap();
    file.write_all(content.as_bytes()).unwrap();
    file
}

#[test]
fn test_yaml_export_lands_in_pool() {
    let dir = tempfile::tempdir().unwrap();
    let repo = PaperRepository::new(Database::open(dir.path().join("papers.db")).unwrap());
    let file = export_file(EXPORT, ".yaml");
    let source = FileSource::new(file.path()).unwrap();

    let summary = ingest_from(&source, &repo, &["minimum wage".to_string()]).unwrap();
    assert_eq!(summary.found, 3);
    assert_eq!(summary.inserted, 2);
    assert_eq!(summary.skipped, 1);

    let pool = repo.list_unpicked().unwrap();
    assert_eq!(pool.len(), 2);
    assert_eq!(pool[0].title, "Minimum Wages and Employment");
    assert_eq!(pool[0].authors, "Card, David, Krueger, Alan");
    assert_eq!(pool[0].venue.as_deref(), Some("American Economic Review"));
    assert!(pool[0].keyword_relevant);
    assert!(!pool[1].keyword_relevant);
    assert!(pool.iter().all(|p| p.status == PaperStatus::Unpicked));

    let again = ingest_from(&source, &repo, &[]).unwrap();
    assert_eq!(again.inserted, 0);
    assert_eq!(again.duplicates, 2);
}

#[test]
fn test_malformed_json_is_reported() {
    let repo = PaperRepository::new(Database::open_in_memory().unwrap());
    let file = export_file("{ not json", ".json");
    let source = FileSource::new(file.path()).unwrap();
    assert!(matches!(ingest_from(&source, &repo, &[]), Err(IngestError::Json(_))));
    assert_eq!(repo.count().unwrap(), 0);
}
