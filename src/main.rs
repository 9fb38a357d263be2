use anyhow::Context;
use clap::Parser;
use small_courses::utils::error::ErrorSeverity;
use small_courses::utils::{logger, validation::Validate};
use small_courses::{ApiServer, CliConfig, Settings};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = CliConfig::parse();

    // 載入配置 (TOML + 命令列覆蓋)
    let settings = match Settings::resolve(&cli) {
        Ok(settings) => settings,
        Err(e) => {
            eprintln!("❌ Failed to load configuration: {}", e.user_friendly_message());
            eprintln!("💡 {}", e.recovery_suggestion());
            std::process::exit(1);
        }
    };

    // 初始化日誌
    if settings.json_logs() {
        logger::init_json_logger(settings.verbose);
    } else {
        logger::init_cli_logger(settings.verbose);
    }

    tracing::info!("Starting small-courses API");
    if settings.verbose {
        tracing::debug!("Resolved settings: {:?}", settings);
    }

    // 驗證配置
    if let Err(e) = settings.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
        eprintln!("❌ {}", e.user_friendly_message());
        std::process::exit(1);
    }

    let server = ApiServer::open(settings.clone())
        .with_context(|| format!("failed to open database '{}'", settings.database_path))?;

    if let Err(e) = server.run().await {
        tracing::error!(
            "❌ Server failed: {} (Category: {:?}, Severity: {:?})",
            e,
            e.category(),
            e.severity()
        );
        tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());
        eprintln!("❌ {}", e.user_friendly_message());

        // 根據錯誤嚴重程度決定退出碼
        let exit_code = match e.severity() {
            ErrorSeverity::Low | ErrorSeverity::Medium => 2,
            ErrorSeverity::High => 1,
            ErrorSeverity::Critical => 3,
        };
        std::process::exit(exit_code);
    }

    Ok(())
}
