//! Callbook - stock call journal.

use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use callbook_app::{Args, Database};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "callbook=info,callbook_app=info,callbook_core=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!(version = env!("CARGO_PKG_VERSION"), "starting callbook");

    let args = Args::parse();
    let config = args.into_config()?;

    tracing::info!(
        database = %config.database_path().display(),
        atomic = config.migration.atomic,
        dry_run = config.migration.dry_run,
        "configuration loaded"
    );

    let database = match Database::open(&config) {
        Ok(database) => database,
        Err(e) => {
            tracing::error!(error = %e, "database initialization failed");
            return Err(e.into());
        }
    };

    let report = database.migration_report();
    if config.migration.dry_run {
        for statement in &report.statements {
            println!("{statement};");
        }
    }

    tracing::info!(
        tables = database.registry().len(),
        tables_created = report.tables_created.len(),
        columns_added = report.columns_added.len(),
        "database ready"
    );

    Ok(())
}
