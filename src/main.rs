use growth_engine::config::{LoggingSettings, Settings};
use growth_engine::models::{CurveSet, Sex};
use growth_engine::services::{AlertStore, AssessmentService, MemoryAlertStore, PostgresAlertStore};
use growth_engine::{GrowthEngine, ReferenceTable};
use std::io::Write;
use std::sync::Arc;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

fn init_logging(logging: &LoggingSettings) {
    // RUST_LOG wins over the configured level
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&logging.level));

    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_level(true)
        .with_writer(std::io::stderr);

    if logging.format == "pretty" {
        subscriber.pretty().init();
    } else {
        subscriber.json().init();
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load .env file if present
    dotenv::dotenv().ok();

    let settings = match Settings::load() {
        Ok(settings) => settings,
        Err(e) => {
            init_logging(&LoggingSettings::default());
            error!("Failed to load configuration: {}", e);
            return Err(e.into());
        }
    };

    init_logging(&settings.logging);
    info!("Starting growth engine...");

    let engine = GrowthEngine::new(
        ReferenceTable::who_weight_for_age(),
        settings.engine.out_of_range,
    );
    info!("Engine initialized (out-of-range policy: {:?})", engine.policy());

    let store: Arc<dyn AlertStore> = match &settings.database {
        Some(db) => {
            let postgres = PostgresAlertStore::from_settings(db).await.map_err(|e| {
                error!("Failed to connect to PostgreSQL: {}", e);
                e
            })?;
            info!("PostgreSQL alert store initialized");
            Arc::new(postgres)
        }
        None => {
            info!("No database configured, keeping alerts in memory");
            Arc::new(MemoryAlertStore::new())
        }
    };

    let service = AssessmentService::new(engine, store);
    let stats = service.stats().await?;
    info!(
        "Alert store: {} total, {} critical, {} warning, {} unacknowledged",
        stats.total, stats.critical, stats.warning, stats.unacknowledged
    );

    // Export reference curves for the charting layer
    let max_age = settings.engine.max_curve_age_months;
    let curves: Vec<CurveSet> = [Sex::Male, Sex::Female]
        .into_iter()
        .map(|sex| CurveSet {
            sex,
            max_age_months: max_age,
            points: service.engine().curves(sex, max_age),
        })
        .collect();

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    serde_json::to_writer_pretty(&mut out, &curves)?;
    writeln!(out)?;

    info!("Exported curves for 0-{} months", max_age);
    Ok(())
}
