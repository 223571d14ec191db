use std::sync::Arc;

use actix_web::{web, App, HttpServer};
use anyhow::{bail, Context};
use clap::Parser;
use env_logger::Env;
use log::{error, info};

use clash_subconverter::interfaces::{convert_subscription_text, SubscriptionConverter};
use clash_subconverter::settings::init_settings;
use clash_subconverter::web_handlers::interfaces;
use clash_subconverter::Settings;

/// Convert proxy subscriptions into a complete Clash configuration
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to the configuration file
    #[arg(short, long, value_name = "FILE")]
    config: Option<String>,

    /// Listen address (e.g., 127.0.0.1 or 0.0.0.0)
    #[arg(short, long, value_name = "ADDRESS")]
    address: Option<String>,

    /// Listen port
    #[arg(short, long, value_name = "PORT")]
    port: Option<u16>,

    /// Subscription URL to convert directly instead of starting the server
    #[arg(long, value_name = "URL", conflicts_with = "file")]
    url: Option<String>,

    /// Local subscription file to convert directly instead of starting the server
    #[arg(long, value_name = "PATH")]
    file: Option<String>,

    /// Output file path for a direct conversion (must be used with --url or --file)
    #[arg(short, long, value_name = "OUTPUT_FILE")]
    output: Option<String>,
}

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let one_shot = args.url.is_some() || args.file.is_some();
    if one_shot != args.output.is_some() {
        bail!("--url or --file and -o/--output must be used together");
    }

    init_settings(args.config.as_deref().unwrap_or("")).context("failed to load settings")?;

    // Initialize the logger
    let log_level = Settings::current().log_level.clone();
    env_logger::init_from_env(Env::default().default_filter_or(log_level));

    if let Some(output_file) = args.output {
        let yaml = match (args.url, args.file) {
            (Some(url), _) => {
                info!("Processing subscription from URL: {} to file: {}", url, output_file);
                let result = SubscriptionConverter::from_settings().convert_url(&url).await;
                match result.data {
                    Some(data) if result.success => data,
                    _ => bail!("conversion failed: {}", result.message.unwrap_or_default()),
                }
            }
            (None, Some(path)) => {
                info!("Processing subscription from file: {} to file: {}", path, output_file);
                let text = std::fs::read_to_string(&path)
                    .with_context(|| format!("failed to read {}", path))?;
                convert_subscription_text(&text)?
            }
            (None, None) => bail!("-o/--output requires --url or --file"),
        };

        std::fs::write(&output_file, yaml)
            .with_context(|| format!("failed to write {}", output_file))?;
        info!("Successfully wrote configuration to {}", output_file);
        return Ok(());
    }

    let listen_address = {
        let mut settings_guard = Settings::current_mut();
        let settings = Arc::make_mut(&mut *settings_guard);

        // Override settings with command line arguments if provided
        if let Some(address) = args.address {
            settings.listen_address = address;
        }
        if let Some(port) = args.port {
            settings.listen_port = port;
        }
        if settings.listen_address.trim().is_empty() {
            error!("Empty listen_address in settings, defaulting to 127.0.0.1");
            settings.listen_address = "127.0.0.1".to_string();
        }
        settings.bind_address()
    };

    let max_concur_threads = Settings::current().max_concur_threads;

    info!("clash-subconverter starting on {}", listen_address);

    HttpServer::new(|| {
        App::new()
            .configure(interfaces::config)
            // For health check
            .route(
                "/",
                web::get().to(|| async { "clash-subconverter is running!" }),
            )
    })
    .bind(&listen_address)
    .with_context(|| format!("failed to bind {}", listen_address))?
    .workers(max_concur_threads)
    .run()
    .await?;

    Ok(())
}
