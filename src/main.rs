use clap::Parser;
use portal_probe::config::Config;
use portal_probe::credentials::compact_mac;
use portal_probe::{AggregateResult, CategoryResult, DeviceCredentials, PortalClient};
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "portal-probe")]
#[command(about = "Query a set-top-box media portal for account and catalog metadata")]
#[command(version)]
struct Cli {
    /// Path to configuration file
    #[arg(short, long, default_value = "config.toml")]
    config: PathBuf,

    /// Portal host, e.g. portal.example.com:8080
    #[arg(long)]
    host: Option<String>,

    /// Device MAC address, e.g. 00:1A:79:12:34:56
    #[arg(long)]
    mac: Option<String>,

    /// Print the result as JSON
    #[arg(long)]
    json: bool,

    /// Only derive and print the device credentials
    #[arg(long)]
    credentials_only: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Load configuration
    let config = Config::load(&cli.config).unwrap_or_else(|e| {
        eprintln!("Warning: Failed to load config from {:?}: {}", cli.config, e);
        eprintln!("Using default configuration");
        Config::default()
    });

    // Logs go to stderr, the report to stdout
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(&config.logging.level)),
        )
        .with_writer(std::io::stderr)
        .init();

    info!("portal-probe v{}", env!("CARGO_PKG_VERSION"));

    let mac = cli
        .mac
        .or_else(|| config.portal.mac.clone())
        .ok_or_else(|| anyhow::anyhow!("no MAC address given (use --mac or [portal].mac)"))?;

    if cli.credentials_only {
        let credentials = DeviceCredentials::derive(&mac);
        if cli.json {
            let mut value = serde_json::to_value(&credentials)?;
            value["mac"] = mac.clone().into();
            value["signature"] = credentials.signature(&mac).into();
            println!("{}", serde_json::to_string_pretty(&value)?);
        } else {
            print_credentials(&mac, &credentials);
        }
        return Ok(());
    }

    let host = cli
        .host
        .or_else(|| config.portal.host.clone())
        .ok_or_else(|| anyhow::anyhow!("no portal host given (use --host or [portal].host)"))?;

    let client = PortalClient::new(&config.portal)?;
    let result = client.aggregate(&host, &mac).await;

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&result)?);
    } else {
        print_report(&result);
    }

    Ok(())
}

fn print_credentials(mac: &str, credentials: &DeviceCredentials) {
    println!("MAC:            {}", mac);
    println!("MAC (compact):  {}", compact_mac(mac));
    println!("Serial number:  {}", credentials.serial_number);
    println!("Serial (short): {}", credentials.serial_number_short);
    println!("Device ID:      {}", credentials.device_id);
    println!("Signature:      {}", credentials.signature(mac));
}

fn print_report(result: &AggregateResult) {
    println!("Portal: {}", result.host);
    print_credentials(&result.mac, &result.credentials);

    for (category, slot) in result.iter() {
        println!();
        println!("== {} ==", category.label());
        match slot {
            CategoryResult::Ok { data } => println!("{}", data),
            CategoryResult::Failed { error } => println!("Error: {}", error),
        }
    }

    println!();
    if result.has_error {
        println!(
            "{} of 4 categories failed (checked {})",
            result.failure_count(),
            result.fetched_at.format("%Y-%m-%d %H:%M:%S UTC")
        );
    } else {
        println!(
            "All categories retrieved (checked {})",
            result.fetched_at.format("%Y-%m-%d %H:%M:%S UTC")
        );
    }
}
