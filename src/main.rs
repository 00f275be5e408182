use anyhow::Result;
use clap::Parser;
use hostmap_dns::{host_table, Config, HostTable, Overrides, Shared};
use is_terminal::IsTerminal;
use std::net::IpAddr;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::signal;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "hostmap-dns", version)]
#[command(about = "Answer DNS A queries from a file of hostname=ip mappings")]
struct Cli {
    /// JSON config file path
    #[arg(short = 'c', long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Port for the DNS server (default: 53)
    #[arg(short = 'p', long)]
    port: Option<u16>,

    /// Time-To-Live for DNS records in seconds (default: 60)
    #[arg(short = 't', long)]
    ttl: Option<u32>,

    /// File containing hostname=ip mappings
    #[arg(short = 'f', long, value_name = "FILE")]
    file: Option<PathBuf>,

    /// Address to listen on (default: 0.0.0.0)
    #[arg(short = 'b', long)]
    bind: Option<IpAddr>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    tracing_init();

    let config = config_init(cli)?;
    let host_table = HostTable::try_from_file(&config.hosts_file).await?;
    let host_count = host_table.len();
    let host_table = host_table.into_shared();

    let dns_server = hostmap_dns::dns::new(config.clone(), host_table.clone()).await?;
    tracing::info!(
        "DNS listening on UDP {} with TTL {}, serving {host_count} hostnames",
        dns_server.local_addr()?,
        config.ttl
    );
    let dns_handle = tokio::spawn(dns_server.block_until_done());

    tokio::select! {
        _ = signal::ctrl_c() => {
            tracing::info!("quitting from signal");
        },
        res = dns_handle => {
            res?;
        }
        Err(err) = reload_on_hangup(config.clone(), host_table.clone()) => {
            return Err(err);
        }
    }
    tracing::info!("goodbye");
    Ok(())
}

fn tracing_init() {
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_ansi(std::io::stdout().is_terminal()))
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "hostmap_dns=info".into()),
        )
        .init();
}

fn config_init(cli: Cli) -> Result<Shared> {
    let overrides = Overrides {
        bind: cli.bind,
        port: cli.port,
        ttl: cli.ttl,
        hosts_file: cli.file,
    };
    if let Some(config_file) = &cli.config {
        tracing::debug!("loading config from {}", config_file.display());
    }
    let config = Config::load(cli.config.as_deref(), overrides)?;
    Ok(Arc::new(config))
}

#[cfg(unix)]
async fn reload_on_hangup(config: Shared, table: host_table::Shared) -> Result<()> {
    use tokio::signal::unix::{signal, SignalKind};

    let mut hangup = signal(SignalKind::hangup())?;
    while hangup.recv().await.is_some() {
        match host_table::reload(&table, &config.hosts_file).await {
            Ok(count) => tracing::info!(
                "reloaded {count} hostnames from {}",
                config.hosts_file.display()
            ),
            Err(err) => tracing::error!("reload failed, keeping previous hostnames: {err}"),
        }
    }
    Ok(())
}

#[cfg(not(unix))]
async fn reload_on_hangup(_config: Shared, _table: host_table::Shared) -> Result<()> {
    std::future::pending().await
}
