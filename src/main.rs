use clap::Parser;
use guest_loader::core::ConfigProvider;
use guest_loader::utils::{logger, validation::Validate};
use guest_loader::{CliConfig, GuestPipeline, InsertEngine, LoaderError, SqlxStore};

fn exit_with(e: &LoaderError) -> ! {
    tracing::error!(
        "Insert failed: {} (Category: {:?}, Severity: {:?})",
        e,
        e.category(),
        e.severity()
    );
    tracing::error!("Recovery suggestion: {}", e.recovery_suggestion());
    eprintln!("{}", e.user_friendly_message());
    std::process::exit(e.exit_code());
}

#[tokio::main]
async fn main() {
    let config = CliConfig::parse();

    logger::init_cli_logger(config.verbose, config.log_format);
    tracing::info!("Starting guest-loader");

    // 驗證配置
    if let Err(e) = config.validate() {
        exit_with(&e);
    }

    let url = config.database_url().unwrap_or_else(|e| exit_with(&e));
    let engine = InsertEngine::new(GuestPipeline::new(SqlxStore::new(url), config));

    match engine.run().await {
        Ok(report) => {
            tracing::debug!("Statement: {}", report.statement);
            println!("Records inserted successfully.");
            println!("{} rows inserted into {}", report.rows_inserted, report.table);
        }
        Err(e) => exit_with(&e),
    }
}
