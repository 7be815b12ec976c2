use std::net::{IpAddr, SocketAddr};

use clap::Parser;
use log::info;

use localgate::{hello, LocalGateway, LocalServer, ServerConfig};

#[derive(Parser)]
#[command(name = "localgate")]
#[command(about = "Serve the hello application through the local gateway", long_about = None)]
struct Cli {
    /// Address to bind to.
    #[arg(long, default_value = "127.0.0.1")]
    host: IpAddr,

    #[arg(short, long, default_value_t = 8000)]
    port: u16,

    /// Connections served at once before answering 503.
    #[arg(long, default_value_t = 1024)]
    max_connections: usize,

    /// Largest request accepted, in bytes.
    #[arg(long, default_value_t = 8192)]
    read_buffer_size: usize,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    let config = ServerConfig {
        addr: SocketAddr::new(cli.host, cli.port),
        max_connections: cli.max_connections,
        read_buffer_size: cli.read_buffer_size,
    };

    let gateway = LocalGateway::new(hello::app()?);
    info!("Starting local gateway for {}", gateway.app().name());

    LocalServer::new(config, gateway).start().await?;

    Ok(())
}
