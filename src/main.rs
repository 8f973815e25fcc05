use clap::Parser;
use measure_client::app::session::run_session;
use measure_client::config::cli::{Action, LogFormat};
use measure_client::utils::logger;
use measure_client::{CliConfig, ConversionClient, HttpMeasurementService, TerminalRenderer};
use std::sync::Arc;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = CliConfig::parse();

    // 先解析設定，TOML 裡的 log level 要在初始化日誌前拿到
    let resolved = cli.resolve();
    let log_level = resolved.as_ref().ok().and_then(|c| c.log_level.clone());
    match cli.log_format {
        LogFormat::Compact => logger::init_cli_logger(cli.verbose, log_level.as_deref()),
        LogFormat::Json => logger::init_json_logger(cli.verbose, log_level.as_deref()),
    }

    let config = match resolved {
        Ok(config) => config,
        Err(e) => {
            tracing::error!("❌ Configuration validation failed: {} ({:?})", e, e.kind());
            eprintln!("❌ {}", e);
            std::process::exit(2);
        }
    };
    tracing::debug!("Service config: {:?}", config);

    let service = HttpMeasurementService::new(&config)?;
    tracing::info!("Using measurement service at {}", service.base_url());

    let client = ConversionClient::new(service, TerminalRenderer::stdout());

    let succeeded = match cli.action {
        Action::Convert { input } => client.convert(&input).await.is_ok(),
        Action::History => client.show_history().await.is_ok(),
        Action::Interactive => {
            let stdin = tokio::io::BufReader::new(tokio::io::stdin());
            run_session(Arc::new(client), stdin).await?;
            true
        }
    };

    // 錯誤已經顯示在結果區，這裡只反映在 exit code
    if !succeeded {
        std::process::exit(1);
    }

    Ok(())
}
