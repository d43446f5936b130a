use anyhow::Result;
use clap::Parser;
use netbox_sd::config::{
    Config, DiscoveryConfig, DiscoveryMode, NetboxConfig, OutputTarget, DEFAULT_CUSTOM_FIELD,
    DEFAULT_PORT,
};
use netbox_sd::netbox::NetboxClient;
use netbox_sd::{discovery, output};
use secrecy::SecretString;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Base URL of the NetBox instance
    url: String,

    /// NetBox API token
    token: String,

    /// Output file path, or `-` for stdout
    output: String,

    /// Default scrape port for generated targets
    #[arg(long, env = "NETBOX_SD_PORT", default_value_t = DEFAULT_PORT)]
    port: u16,

    /// Custom field holding the embedded label payload
    #[arg(long, env = "NETBOX_SD_CUSTOM_FIELD", default_value = DEFAULT_CUSTOM_FIELD)]
    custom_field: String,

    /// Which inventory collections to discover
    #[arg(long, env = "NETBOX_SD_DISCOVERY", value_enum, default_value = "device")]
    discovery: DiscoveryMode,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    // Logs go to stderr: stdout is reserved for the document in `-` mode.
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let args = Args::parse();

    info!("Starting netbox-sd v{}", env!("CARGO_PKG_VERSION"));

    let config = Config {
        netbox: NetboxConfig::new(&args.url, SecretString::from(args.token))?,
        discovery: DiscoveryConfig {
            mode: args.discovery,
            port: args.port,
            custom_field: args.custom_field,
        },
        output: OutputTarget::from_arg(&args.output),
    };

    if let Err(e) = run(&config).await {
        error!("Discovery failed: {}", e);
        std::process::exit(1);
    }

    Ok(())
}

async fn run(config: &Config) -> netbox_sd::error::Result<()> {
    let client = NetboxClient::new(&config.netbox)?;

    let groups = match config.discovery.mode {
        DiscoveryMode::Device => discovery::discover_devices(&client, &config.discovery).await?,
        DiscoveryMode::Circuit => discovery::discover_circuits(&client, &config.discovery).await?,
    };

    info!("Discovered {} target groups", groups.len());
    output::write_targets(&groups, &config.output)
}
