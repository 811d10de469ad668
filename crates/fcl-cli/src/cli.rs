use clap::{Parser, Subcommand, ValueHint};
use fcl_algo::SolverKind;
use std::net::SocketAddr;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(author, version, about = "Capacitated facility location optimiser", long_about = None)]
pub struct Cli {
    /// Set the logging level (RUST_LOG takes precedence)
    #[arg(long, default_value = "info", global = true)]
    pub log_level: tracing::Level,

    /// TOML configuration file
    #[arg(long, global = true, value_hint = ValueHint::FilePath)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Solve one request and print the response JSON
    #[command(allow_negative_numbers = true)]
    Optimize {
        /// Location table CSV (defaults to the configured table)
        #[arg(long, value_hint = ValueHint::FilePath)]
        locations: Option<PathBuf>,
        /// Number of customers to sample
        #[arg(long)]
        customers: i64,
        /// Number of facility candidates to sample
        #[arg(long)]
        candidates: i64,
        /// Number of facilities to open
        #[arg(short)]
        k: i64,
        /// Solver backend
        #[arg(long)]
        solver: Option<SolverKind>,
        /// Seed for opening costs and demands
        #[arg(long)]
        seed: Option<u64>,
        /// Also write the map PNG to this file
        #[arg(long, value_hint = ValueHint::FilePath)]
        map_out: Option<PathBuf>,
        /// Print a text summary to stderr
        #[arg(long)]
        summary: bool,
    },
    /// Run the HTTP service
    Serve {
        /// Address to bind
        #[arg(long)]
        addr: Option<SocketAddr>,
        /// Location table CSV
        #[arg(long, value_hint = ValueHint::FilePath)]
        locations: Option<PathBuf>,
        /// Solver backend
        #[arg(long)]
        solver: Option<SolverKind>,
    },
    /// List solver backends and whether they can run here
    Solvers,
}
