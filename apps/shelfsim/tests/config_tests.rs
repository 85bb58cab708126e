//! Integration tests for loading TOML configuration files.

#![allow(clippy::unwrap_used, clippy::panic)]

use shelfsim::config_file::{config_to_toml, load_config};
use shelfsim_core::{AutoApprove, Catalog, NullSink, Scheduler, ShelfError, SimConfig};
use std::io::Write;
use tempfile::NamedTempFile;

/// Write `contents` to a fresh temporary file.
fn write_config(contents: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(contents.as_bytes()).unwrap();
    file.flush().unwrap();
    file
}

#[test]
fn test_no_path_loads_default_store() {
    let config = load_config(None).unwrap();
    assert_eq!(config, SimConfig::default());
}

#[test]
fn test_dumped_config_loads_back() {
    let file = write_config(&config_to_toml(&SimConfig::default()).unwrap());

    let config = load_config(Some(file.path())).unwrap();

    assert_eq!(config, SimConfig::default());
}

#[test]
fn test_short_week_runs_end_to_end() {
    let file = write_config(
        r#"
        [inventory]
        low_stock_threshold = 5
        restock_target = 30

        [week]
        delivery_days = ["Wed"]
        clearance_day = "Wed"
        surge_rates = { Thu = 0.5 }

        [[week.days]]
        name = "Wed"
        traffic = 1.0

        [[week.days]]
        name = "Thu"
        traffic = 0.5
        "#,
    );

    let config = load_config(Some(file.path())).unwrap();
    assert_eq!(config.week.days.len(), 2);
    assert_eq!(config.surge_rate("Thu"), Some(0.5));

    let catalog = Catalog::seeded(&config, 3).unwrap();
    let mut scheduler = Scheduler::new(config, catalog, 3).unwrap();
    let report = scheduler
        .run_week(&mut NullSink, &mut AutoApprove(true))
        .unwrap();
    assert_eq!(report.days.len(), 2);
    assert_eq!(report.deliveries.len(), 1);
    assert_eq!(report.surges.len(), 1);
    assert!(report.surges[0].approved);
}

#[test]
fn test_unknown_day_reference_is_rejected() {
    let file = write_config(
        r#"
        [week]
        delivery_days = ["Funday"]
        "#,
    );

    let err = load_config(Some(file.path())).unwrap_err();

    assert!(matches!(err, ShelfError::InvalidConfig(_)));
}

#[test]
fn test_malformed_toml_is_a_serialization_error() {
    let file = write_config("[inventory\nlow_stock_threshold = ");

    let err = load_config(Some(file.path())).unwrap_err();

    assert!(matches!(err, ShelfError::Serialization(_)));
}

#[test]
fn test_missing_file_and_directory_are_io_errors() {
    let dir = tempfile::tempdir().unwrap();

    let missing = load_config(Some(&dir.path().join("absent.toml"))).unwrap_err();
    assert!(matches!(missing, ShelfError::Io(_)));

    let directory = load_config(Some(dir.path())).unwrap_err();
    assert!(matches!(directory, ShelfError::Io(_)));
}
