//! Integration tests for journal startup.

use callbook_app::{AppConfig, Args, Database, Error};
use callbook_core::MigrationError;
use clap::Parser;
use rusqlite::Connection;

fn config(dir: &tempfile::TempDir) -> AppConfig {
    AppConfig::new(dir.path().join("data")).with_database_file("journal.db")
}

#[test]
fn test_first_start_creates_directory_and_schema() {
    let dir = tempfile::tempdir().unwrap();
    let config = config(&dir);

    let db = Database::open(&config).unwrap();
    assert!(config.database_path().exists());
    assert_eq!(db.path(), Some(config.database_path().as_path()));
    assert_eq!(db.migration_report().tables_created.len(), 10);
    assert_eq!(
        db.type_names().unwrap(),
        ["FUTURES", "NIFTY 100", "NIFTY 200", "NIFTY 50", "NIFTY 500"]
    );
}

#[test]
fn test_restart_is_noop_and_does_not_reseed() {
    let dir = tempfile::tempdir().unwrap();
    let config = config(&dir);

    drop(Database::open(&config).unwrap());
    let db = Database::open(&config).unwrap();

    assert!(db.migration_report().is_noop());
    assert_eq!(db.type_names().unwrap().len(), 5);
}

#[test]
fn test_legacy_database_is_upgraded_in_place() {
    let dir = tempfile::tempdir().unwrap();
    let config = config(&dir);
    std::fs::create_dir_all(&config.data_dir).unwrap();

    {
        let conn = Connection::open(config.database_path()).unwrap();
        conn.execute_batch(
            "CREATE TABLE DailyRemarks (DRId TEXT NOT NULL PRIMARY KEY, CRId TEXT NOT NULL, RemarkDate TEXT NOT NULL);
             INSERT INTO DailyRemarks VALUES ('r1', 'c1', '2024-05-06T00:00:00');",
        )
        .unwrap();
    }

    let db = Database::open(&config).unwrap();
    let report = db.migration_report();
    assert_eq!(report.tables_created.len(), 9);
    assert_eq!(
        report
            .columns_added
            .iter()
            .filter(|(table, _)| table == "DailyRemarks")
            .count(),
        5
    );

    let (position, check_date, remarks, is_checked): (i64, String, Option<String>, bool) = db
        .connection()
        .query_row(
            "SELECT Position, CheckDate, Remarks, IsChecked FROM DailyRemarks WHERE DRId = 'r1'",
            [],
            |row| Ok((row.get(0)?, row.get(1)?, row.get(2)?, row.get(3)?)),
        )
        .unwrap();
    assert_eq!(position, 0);
    assert_eq!(check_date, "0001-01-01T00:00:00");
    assert_eq!(remarks, None);
    assert!(!is_checked);
}

#[test]
fn test_settings_file_feeds_config() {
    let dir = tempfile::tempdir().unwrap();
    let settings = dir.path().join("appsettings.json");
    std::fs::write(
        &settings,
        r#"{"Database": {"File": "stocks.db"}, "Types": ["BANK NIFTY"]}"#,
    )
    .unwrap();

    let data_dir = dir.path().join("data");
    let args = Args::parse_from([
        "callbook",
        "--data-dir",
        data_dir.to_str().unwrap(),
        "--settings",
        settings.to_str().unwrap(),
    ]);
    let config = args.into_config().unwrap();
    assert_eq!(config.database_path(), data_dir.join("stocks.db"));

    let db = Database::open(&config).unwrap();
    assert_eq!(db.type_names().unwrap(), ["BANK NIFTY"]);
}

#[test]
fn test_missing_settings_file_is_config_error() {
    let args = Args::parse_from(["callbook", "--settings", "/nonexistent/appsettings.json"]);
    assert!(matches!(args.into_config(), Err(Error::Config(_))));
}

#[test]
fn test_failed_reconciliation_is_fatal() {
    let dir = tempfile::tempdir().unwrap();
    let config = config(&dir).with_atomic_migrations();
    std::fs::create_dir_all(&config.data_dir).unwrap();

    {
        let conn = Connection::open(config.database_path()).unwrap();
        conn.execute_batch("CREATE VIEW MonthlyResults AS SELECT 1 AS MResultId")
            .unwrap();
    }

    let err = Database::open(&config).err().unwrap();
    assert!(matches!(
        err,
        Error::Core(callbook_core::Error::Migration(MigrationError::DdlExecution { .. }))
    ));

    let conn = Connection::open(config.database_path()).unwrap();
    let tables: i64 = conn
        .query_row(
            "SELECT COUNT(*) FROM sqlite_master WHERE type = 'table'",
            [],
            |row| row.get(0),
        )
        .unwrap();
    assert_eq!(tables, 0);
}
