mod common;

use carte_core::loader::LOAD_FAILURE_NOTICE;
use carte_core::prelude::*;
use common::{RecordingMap, RecordingSurface};
use std::path::PathBuf;

fn temp_path(name: &str) -> PathBuf {
    std::env::temp_dir().join(format!("carte-core-{}-{name}", std::process::id()))
}

#[test]
fn reads_plain_file() {
    let path = temp_path("plain.csv");
    std::fs::write(&path, common::csv(&["Lyon,45.76,4.83,Jean,Dupont,Acme,"])).unwrap();

    let rows = load_rows(&DataSource::File(path.clone()), &CarteConfig::default()).unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].field("Entreprise"), "Acme");

    std::fs::remove_file(path).ok();
}

#[cfg(feature = "compact")]
#[test]
fn reads_gzip_file() {
    use flate2::{write::GzEncoder, Compression};
    use std::io::Write;

    let path = temp_path("packed.csv.gz");
    let mut encoder = GzEncoder::new(Vec::new(), Compression::default());
    encoder
        .write_all(common::csv(&["Lyon,45.76,4.83,Jean,Dupont,Acme,"]).as_bytes())
        .unwrap();
    std::fs::write(&path, encoder.finish().unwrap()).unwrap();

    let rows = load_rows(&DataSource::File(path.clone()), &CarteConfig::default()).unwrap();
    assert_eq!(rows.len(), 1);

    std::fs::remove_file(path).ok();
}

#[test]
fn failed_load_reports_and_yields_empty_map() {
    let mut session = MapSession::new(CarteConfig::default(), RecordingMap::default());
    let mut surface = RecordingSurface::default();

    let report = session
        .load(&DataSource::File("/no/such/data.csv".into()), &mut surface)
        .unwrap();

    assert_eq!(surface.notices, [LOAD_FAILURE_NOTICE]);
    assert_eq!(report.cities, 0);
    assert!(session.cities().is_empty());
    assert_eq!(session.widget().marker_count(), 0);
}

#[test]
fn load_rows_or_report_passes_rows_through() {
    let mut surface = RecordingSurface::default();
    let rows = load_rows_or_report(
        &DataSource::Text(common::csv(&["Lyon,45.76,4.83,Jean,Dupont,Acme,"])),
        &CarteConfig::default(),
        &mut surface,
    );
    assert_eq!(rows.len(), 1);
    assert!(surface.notices.is_empty());
}

#[test]
fn latin1_line_is_dropped_not_the_file() {
    let path = temp_path("latin1.csv");
    let mut bytes = common::csv(&["Paris,48.85,2.35,Ada,Martin,Acme,"]).into_bytes();
    bytes.extend_from_slice(b"Orl\xe9ans,47.9,1.9,Luc,Petit,Globex,\n");
    bytes.extend_from_slice(b"Lyon,45.76,4.83,Jean,Dupont,Initech,\n");
    std::fs::write(&path, bytes).unwrap();

    let mut surface = RecordingSurface::default();
    let rows = load_rows_or_report(
        &DataSource::File(path.clone()),
        &CarteConfig::default(),
        &mut surface,
    );

    assert!(surface.notices.is_empty());
    let cities: Vec<&str> = rows.iter().map(|r| r.field("Ville_Nettoyee")).collect();
    assert_eq!(cities, ["Paris", "Lyon"]);

    std::fs::remove_file(path).ok();
}
