use binder_engine::adapters::{FixtureFileRecords, HttpFileRecords, InMemoryCache};
use binder_engine::core::basic_validator::BasicBinderValidator;
use binder_engine::domain::ports::{FileRecordsProvider, TranscriptProvider};
use binder_engine::utils::error::ErrorSeverity;
use binder_engine::utils::{logger, validation::Validate};
use binder_engine::{
    Binder, BinderFactory, BinderProcessor, CliConfig, EngineConfig, ProcessorDependencies,
    RequestContext,
};
use clap::Parser;
use std::sync::Arc;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = CliConfig::parse();

    let config = match &cli.config {
        Some(path) => EngineConfig::from_file(path)?,
        None => EngineConfig::default(),
    };

    // 初始化日誌
    if config.logging.json {
        logger::init_json_logger(&config.logging.level);
    } else {
        logger::init_cli_logger(cli.verbose);
    }
    tracing::info!("Starting binder-check");

    if let Err(e) = config.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        eprintln!("❌ {}", e);
        std::process::exit(1);
    }

    let (file_records, transcripts): (Arc<dyn FileRecordsProvider>, Arc<dyn TranscriptProvider>) =
        match (&cli.fixture, &config.file_records) {
            (Some(path), _) => {
                let fixture = Arc::new(FixtureFileRecords::from_file(path)?);
                (fixture.clone() as Arc<dyn FileRecordsProvider>, fixture as Arc<dyn TranscriptProvider>)
            }
            (None, Some(file_records)) => {
                let client = Arc::new(HttpFileRecords::from_config(file_records)?);
                (client.clone() as Arc<dyn FileRecordsProvider>, client as Arc<dyn TranscriptProvider>)
            }
            (None, None) => {
                anyhow::bail!("either --fixture or a [file_records] config section is required")
            }
        };

    let deps = ProcessorDependencies {
        file_records,
        transcripts,
        cache: Arc::new(InMemoryCache::new()),
        validator: Arc::new(BasicBinderValidator::new()),
        config: Arc::new(config),
    };

    let binder: Binder = serde_json::from_str(&std::fs::read_to_string(&cli.binder)?)?;
    let ctx = match &cli.route_id {
        Some(route_id) => RequestContext::edit(cli.acting_user(), route_id.clone()),
        None => RequestContext::create(cli.acting_user()),
    };

    match run(BinderFactory::new(deps), binder, &ctx).await {
        Ok(true) => Ok(()),
        Ok(false) => std::process::exit(2),
        Err(e) => {
            tracing::error!("❌ Binder check failed: {} (Severity: {:?})", e, e.severity());
            eprintln!("❌ {}", e);
            if e.is_retryable() {
                eprintln!("💡 The file records service may be temporarily unavailable, try again later");
            }

            let exit_code = match e.severity() {
                ErrorSeverity::Low => 0,
                ErrorSeverity::Medium => 3,
                ErrorSeverity::High => 1,
                ErrorSeverity::Critical => 4,
            };
            std::process::exit(exit_code);
        }
    }
}

/// 依序執行各階段，第一個失敗即停止
async fn run(factory: BinderFactory, binder: Binder, ctx: &RequestContext) -> binder_engine::Result<bool> {
    let mut processor = factory.create(binder)?;
    tracing::info!("Using {:?} processor", processor.kind());

    processor.pre_process(ctx).await?;

    let mut result = processor.validate(ctx).await?;
    if result.succeeded() {
        result = processor.process(ctx).await?;
    }

    println!("{}", serde_json::to_string_pretty(processor.binder())?);
    if result.succeeded() {
        println!("✅ Binder is valid");
    } else {
        for error in result.errors() {
            println!("❌ {}", error);
        }
    }
    Ok(result.succeeded())
}
