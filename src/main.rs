use clap::Parser;
use elmkit::utils::{logger, validation::Validate};
use elmkit::{CliConfig, FilePipeline, LocalStorage, RenderEngine, RenderSettings, TomlConfig};

fn load_toml(path: Option<&str>) -> elmkit::Result<TomlConfig> {
    match path {
        Some(path) => {
            let config = TomlConfig::from_file(path)?;
            config.validate()?;
            Ok(config)
        }
        None => Ok(TomlConfig::default()),
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = CliConfig::parse();

    // 設定檔要先讀，日誌等級可能來自其中
    let toml = load_toml(cli.config.as_deref());
    let (log_level, json_logs) = match &toml {
        Ok(config) => (config.log_level().map(str::to_string), config.json_logs()),
        Err(_) => (None, false),
    };

    if cli.json_logs || json_logs {
        logger::init_json_logger(log_level.as_deref());
    } else {
        logger::init_cli_logger(cli.verbose, log_level.as_deref());
    }

    tracing::info!("Starting elmkit v{}", elmkit::VERSION);

    let toml = match toml {
        Ok(config) => config,
        Err(e) => {
            tracing::error!("Failed to load config: {}", e);
            eprintln!("❌ {}", e.user_friendly_message());
            eprintln!("💡 {}", e.recovery_suggestion());
            std::process::exit(e.exit_code());
        }
    };

    let mut settings = RenderSettings::from_toml(&toml);
    let resolved = cli
        .apply_to(&mut settings)
        .and_then(|_| settings.validate());
    if let Err(e) = resolved {
        tracing::error!("Configuration validation failed: {}", e);
        tracing::error!("Suggestion: {}", e.recovery_suggestion());
        eprintln!("❌ {}", e.user_friendly_message());
        std::process::exit(e.exit_code());
    }

    tracing::debug!("Resolved settings: {:?}", settings);

    let pipeline = FilePipeline::new(LocalStorage::new("."), settings);
    let engine = RenderEngine::new(pipeline);

    match engine.run().await {
        Ok(output_path) => {
            println!("✅ Payload written to: {}", output_path);
        }
        Err(e) => {
            tracing::error!(
                "Render failed: {} (Category: {:?}, Severity: {:?})",
                e,
                e.category(),
                e.severity()
            );
            eprintln!("❌ {}", e.user_friendly_message());
            eprintln!("💡 {}", e.recovery_suggestion());

            let exit_code = e.exit_code();
            if exit_code > 0 {
                std::process::exit(exit_code);
            }
        }
    }

    Ok(())
}
