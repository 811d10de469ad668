use anyhow::Result;
use clap::Parser;
use fcl_algo::SolverKind;
use fcl_server::{serve_with_config, FclConfig};
use std::{net::SocketAddr, path::PathBuf};

#[derive(Parser)]
#[command(author, version, about = "Serve facility location optimisation over HTTP", long_about = None)]
struct Opt {
    /// TOML configuration file
    #[arg(long)]
    config: Option<PathBuf>,
    /// Address to bind (overrides the config file)
    #[arg(long)]
    addr: Option<SocketAddr>,
    /// Location table CSV (overrides the config file)
    #[arg(long)]
    locations: Option<PathBuf>,
    /// Solver backend (overrides the config file)
    #[arg(long)]
    solver: Option<SolverKind>,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    let opts = Opt::parse();
    let mut config = FclConfig::load_or_default(opts.config.as_deref())?;
    if let Some(addr) = opts.addr {
        config.server.addr = addr;
    }
    if let Some(locations) = opts.locations {
        config.data.locations = locations;
    }
    if let Some(solver) = opts.solver {
        config.solver.backend = solver;
    }

    serve_with_config(config).await
}
