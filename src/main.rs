use clap::Parser;
use docs_scraper::utils::error::ErrorSeverity;
use docs_scraper::utils::{logger, validation::Validate};
use docs_scraper::{run, CliConfig, ScrapeError};

fn exit_code(e: &ScrapeError) -> i32 {
    match e.severity() {
        ErrorSeverity::Low => 0,
        ErrorSeverity::Medium => 2,
        ErrorSeverity::High => 1,
        ErrorSeverity::Critical => 3,
    }
}

fn report_failure(e: &ScrapeError) {
    tracing::error!(
        "❌ Parser failed: {} (Category: {:?}, Severity: {:?})",
        e,
        e.category(),
        e.severity()
    );
    tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());
    eprintln!("❌ {}", e.user_friendly_message());
    eprintln!("💡 {}", e.recovery_suggestion());
}

#[tokio::main]
async fn main() {
    let cli = CliConfig::parse();

    // 初始化日誌
    if cli.json_logs {
        logger::init_json_logger();
    } else {
        logger::init_cli_logger(cli.verbose, &cli.log_dir());
    }

    tracing::info!("Parser started");
    tracing::debug!("Command line arguments: {:?}", cli);

    // 驗證配置
    if let Err(e) = cli.validate() {
        report_failure(&e);
        std::process::exit(1);
    }

    let mode = cli.mode;
    let result = match cli.into_run_config() {
        Ok(config) => run(&config).await,
        Err(e) => Err(e),
    };

    match result {
        Ok(outcome) => {
            if let Some(path) = outcome.results_file {
                println!("📁 Results saved to: {}", path.display());
            }
            tracing::info!("Parser finished mode {}", mode);
        }
        Err(e) => {
            report_failure(&e);
            let code = exit_code(&e);
            if code > 0 {
                std::process::exit(code);
            }
        }
    }
}
