use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// RUST_LOG 優先，否則使用預設過濾
fn env_filter(default_directives: &str) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_directives))
}

/// `binder-check` 終端輸出
pub fn init_cli_logger(verbose: bool) {
    let directives = if verbose { "binder_engine=debug,info" } else { "binder_engine=info" };

    tracing_subscriber::registry()
        .with(env_filter(directives))
        .with(fmt::layer().with_target(false).compact())
        .init();
}

/// JSON 格式輸出，方便集中式日誌收集
pub fn init_json_logger(level: &str) {
    tracing_subscriber::registry()
        .with(env_filter(&format!("binder_engine={}", level)))
        .with(fmt::layer().json().with_current_span(false))
        .init();
}
