use clap::Parser;
use std::sync::Arc;
use tedx_pass::utils::{logger, validation::Validate};
use tedx_pass::{
    AppConfig, Cli, Command, HttpRegistrationClient, LocalStorage, MemoryRegistrationStore,
    PassError, PassExporter, RegistrationFlow,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut config = AppConfig::load(cli.config.as_deref())?;
    cli.apply_overrides(&mut config);

    // 初始化日誌
    if matches!(cli.command, Command::Serve { .. }) && config.server.json_logs {
        logger::init_json_logger();
    } else {
        logger::init_cli_logger(cli.verbose);
    }

    tracing::info!("Starting tedx-pass");
    if cli.verbose {
        tracing::debug!("Config: {:?}", config);
    }

    // 驗證配置
    if let Err(e) = config.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        eprintln!("❌ {}", e.user_friendly_message());
        std::process::exit(1);
    }

    let result = match &cli.command {
        Command::Serve { .. } => {
            let store = Arc::new(MemoryRegistrationStore::new());
            tedx_pass::server::serve(&config.server.bind, store).await
        }
        Command::Register {
            name,
            email,
            snapshot,
            ..
        } => register(&config, name, email, *snapshot).await,
    };

    if let Err(e) = result {
        tracing::error!("❌ {}", e);
        eprintln!("❌ {}", e.user_friendly_message());
        std::process::exit(2);
    }

    Ok(())
}

async fn register(config: &AppConfig, name: &str, email: &str, snapshot: bool) -> Result<(), PassError> {
    let api = HttpRegistrationClient::new(&config.client)?;
    tracing::debug!("Registering against {}", api.register_url());

    let storage = LocalStorage::new(config.export.output_dir.clone());
    let exporter = PassExporter::from_config(storage.clone(), &config.event, &config.export)?;
    let flow = RegistrationFlow::new(api, exporter, config.event.clone())
        .with_pattern_seed(config.export.pattern_seed);

    let result = flow.run(name, email).await?;

    for notice in &result.notices {
        println!("{}", notice);
    }
    println!("🎫 Pass ID: {}", result.record.pass_id);
    println!("📁 Pass saved to: {}", result.exported.location);

    if snapshot {
        let png = tedx_pass::render::encode_png(&result.exported.snapshot)?;
        let file_name = result.exported.file_name.replace(".pdf", ".png");
        let path = tedx_pass::domain::DocumentSink::write_file(&storage, &file_name, &png).await?;
        println!("🖼  Snapshot saved to: {}", path);
    }

    Ok(())
}
