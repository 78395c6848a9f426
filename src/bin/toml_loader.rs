use clap::Parser;
use guest_loader::core::ConfigProvider;
use guest_loader::utils::logger::{self, LogFormat};
use guest_loader::utils::validation::Validate;
use guest_loader::{GuestPipeline, InsertEngine, SqlxStore, TomlConfig};

#[derive(Parser)]
#[command(name = "toml-loader")]
#[command(about = "Insert guest records described in a TOML configuration file")]
struct Args {
    /// Path to TOML configuration file
    #[arg(short, long, default_value = "guests.toml")]
    config: String,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,

    /// Override the log format from the config file
    #[arg(long, value_enum)]
    log_format: Option<LogFormat>,

    /// Override the transactional setting from the config file
    #[arg(long)]
    transactional: Option<bool>,

    /// Show the statement and rows without connecting
    #[arg(long)]
    dry_run: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    // 載入 TOML 配置
    let mut config = match TomlConfig::from_file(&args.config) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("ERROR: Failed to load config file '{}': {}", args.config, e);
            eprintln!("Make sure the file exists and is valid TOML");
            std::process::exit(e.exit_code());
        }
    };

    logger::init_cli_logger(
        args.verbose || config.verbose(),
        args.log_format.unwrap_or_else(|| config.log_format()),
    );
    tracing::info!("Loaded configuration from {}", args.config);

    if let Some(transactional) = args.transactional {
        config.insert.transactional = transactional;
        tracing::info!("Transactional mode overridden to: {}", transactional);
    }

    if let Err(e) = config.validate() {
        tracing::error!("Configuration validation failed: {}", e);
        tracing::error!("Suggestion: {}", e.recovery_suggestion());
        eprintln!("{}", e.user_friendly_message());
        std::process::exit(e.exit_code());
    }

    let store = SqlxStore::new(config.database_url()?);
    let pipeline = GuestPipeline::new(store, config);

    if args.dry_run {
        for line in pipeline.dry_run().await? {
            println!("{}", line);
        }
        return Ok(());
    }

    match InsertEngine::new(pipeline).run().await {
        Ok(report) => {
            println!("Records inserted successfully.");
            println!("{} rows inserted into {}", report.rows_inserted, report.table);
        }
        Err(e) => {
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
    }

    Ok(())
}
