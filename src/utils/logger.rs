use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// 沒有 `RUST_LOG` 時使用的過濾規則
fn fallback_directives(verbose: bool, level: Option<&str>) -> String {
    match (verbose, level) {
        (true, _) => "elmkit=debug,info".to_string(),
        (false, Some(level)) => format!("elmkit={}", level),
        (false, None) => "elmkit=info".to_string(),
    }
}

fn default_filter(verbose: bool, level: Option<&str>) -> EnvFilter {
    EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(fallback_directives(verbose, level)))
}

/// CLI 用的精簡輸出；`level` 來自 TOML `[logging]`，`RUST_LOG` 優先
pub fn init_cli_logger(verbose: bool, level: Option<&str>) {
    tracing_subscriber::registry()
        .with(default_filter(verbose, level))
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_thread_ids(false)
                .with_file(false)
                .with_line_number(false)
                .with_writer(std::io::stderr)
                .compact(),
        )
        .init();
}

pub fn init_json_logger(level: Option<&str>) {
    tracing_subscriber::registry()
        .with(default_filter(false, level))
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_thread_ids(false)
                .with_file(false)
                .with_line_number(false)
                .with_writer(std::io::stderr)
                .json(), // 機器可讀格式，方便日誌收集
        )
        .init();
}
