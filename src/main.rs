use clap::Parser;
use startup_diag::utils::{logger, validation::Validate};
use startup_diag::{
    CliConfig, DiagConfig, EventSink, JsonLinesSink, ManifestModule, ModuleStartupTypeLocator,
    ResolutionLogExporter, ServiceResolutionEvent, ServiceResolutionLogChannel, StartupTypeLocator,
    TracingSink,
};
use tokio::sync::oneshot;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = CliConfig::parse();

    let mut config = match &cli.config {
        Some(path) => match DiagConfig::from_file(path) {
            Ok(config) => config,
            Err(e) => {
                eprintln!("❌ Failed to load config file '{}': {}", path, e);
                eprintln!("💡 {}", e.recovery_suggestion());
                std::process::exit(1);
            }
        },
        None => DiagConfig::default(),
    };

    // 初始化日誌
    if cli.json_logs || config.logging.json {
        logger::init_json_logger(cli.verbose, config.log_level());
    } else {
        logger::init_cli_logger(cli.verbose, config.log_level());
    }

    tracing::info!("Starting startup-diag");
    if cli.verbose {
        tracing::debug!("CLI config: {:?}", cli);
    }

    // 命令列覆蓋設定
    if !cli.allow.is_empty() {
        config.resolution_log.allowed_prefixes = cli.allow.clone();
        tracing::info!("🔧 Allow-list overridden to: {:?}", cli.allow);
    }

    if let Err(e) = config.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
        eprintln!("❌ {}", e.user_friendly_message());
        std::process::exit(1);
    }

    let modules: Vec<ManifestModule> = config.modules.iter().map(ManifestModule::from_config).collect();
    let locator = ModuleStartupTypeLocator::new(modules);
    let startup_types = locator.get_startup_types()?;
    tracing::info!(
        "🔍 Found {} startup type(s) in {} module(s)",
        startup_types.len(),
        locator.module_count()
    );
    for startup_type in startup_types {
        println!("startup type: {}", startup_type);
    }

    let channel = ServiceResolutionLogChannel::new(&config.resolution_log);
    let summary = match &cli.output {
        Some(path) => {
            let sink = JsonLinesSink::open(path).await?;
            tracing::info!("📁 Writing events to {}", sink.path().display());
            record_events(&channel, sink, &cli).await?
        }
        None => record_events(&channel, TracingSink, &cli).await?,
    };

    println!(
        "✅ {} event(s) exported, {} failed",
        summary.exported, summary.failed
    );
    Ok(())
}

async fn record_events<S>(
    channel: &ServiceResolutionLogChannel,
    sink: S,
    cli: &CliConfig,
) -> anyhow::Result<startup_diag::ExportSummary>
where
    S: EventSink + 'static,
{
    let (shutdown_tx, shutdown_rx) = oneshot::channel::<()>();
    let exporter = ResolutionLogExporter::new(sink);
    let stream = channel.log_stream();
    let handle = tokio::spawn(async move {
        exporter
            .run(stream, async {
                let _ = shutdown_rx.await;
            })
            .await
    });

    for name in &cli.pre_activation_events {
        channel.send(ServiceResolutionEvent::new(name.as_str()).with_field("phase", "placeholder"));
    }

    channel.activate();

    for name in &cli.events {
        channel.send(ServiceResolutionEvent::new(name.as_str()).with_field("phase", "specialized"));
    }

    let _ = shutdown_tx.send(());
    Ok(handle.await?)
}
