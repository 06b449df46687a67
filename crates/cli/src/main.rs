use clap::Parser;
use pod_dns_domain::CliOverrides;
use pod_dns_infrastructure::dns::server::DnsServerHandler;
use std::net::{IpAddr, SocketAddr};
use std::time::Duration;
use tracing::info;

mod bootstrap;
mod di;
mod server;

#[derive(Parser)]
#[command(name = "pod-dns")]
#[command(version)]
#[command(about = "pod-dns - DNS responder that resolves names inside a pod the way the client machine would")]
struct Cli {
    /// Configuration file path
    #[arg(short = 'c', long, value_name = "FILE")]
    config: Option<String>,

    /// DNS server port
    #[arg(short = 'd', long)]
    dns_port: Option<u16>,

    /// Bind address
    #[arg(short = 'b', long)]
    bind: Option<String>,

    /// Nameserver the client side supplies; enables tunnel mode
    #[arg(long, env = "TELEPRESENCE_NAMESERVER", value_name = "IP[:PORT]")]
    tunnel_nameserver: Option<String>,

    /// Comma-separated names always sent to cluster DNS
    #[arg(long, env = "TELEPRESENCE_LOCAL_NAMES")]
    local_names: Option<String>,

    /// Namespace of this pod
    #[arg(long, env = "TELEPRESENCE_CONTAINER_NAMESPACE")]
    namespace: Option<String>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long)]
    log_level: Option<String>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let cli_overrides = CliOverrides {
        dns_port: cli.dns_port,
        bind_address: cli.bind.clone(),
        tunnel_nameserver: cli.tunnel_nameserver.clone(),
        namespace: cli.namespace.clone(),
        local_names: cli.local_names.clone(),
        log_level: cli.log_level.clone(),
    };

    let config = bootstrap::load_config(cli.config.as_deref(), cli_overrides)?;

    bootstrap::init_logging(&config);

    info!("Starting pod-dns v{}", env!("CARGO_PKG_VERSION"));

    let dns_services = di::DnsServices::new(&config)?;
    info!(namespace = %dns_services.namespace, "Pod namespace resolved");

    let bind_ip: IpAddr = config.server.bind_address.parse()?;
    let dns_addr = SocketAddr::new(bind_ip, config.server.dns_port);
    let dns_handler = DnsServerHandler::new(dns_services.use_case);

    server::start_dns_server(
        dns_addr,
        dns_handler,
        Duration::from_secs(config.server.tcp_timeout_secs),
    )
    .await?;

    info!("Server shutdown complete");
    Ok(())
}
