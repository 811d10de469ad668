//! # fcl-cli: Command Line Front End
//!
//! `fcl optimize` solves a single request offline and prints the same JSON
//! the HTTP service returns. `fcl serve` runs the service. `fcl solvers`
//! reports which backends can run on this machine.
//!
//! Logs go to stderr so stdout stays machine-readable.

pub mod cli;

use anyhow::{Context, Result};
use cli::{Cli, Commands};
use fcl_algo::{optimize, SolverKind};
use fcl_core::ProblemSize;
use fcl_server::{serve_with_config, FclConfig, OptimizeResponse};
use fcl_viz::{png_to_base64, render_map_png, MapScene, PlottersMapRenderer};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::fs;
use std::io::{self, Write};
use tracing::info;

pub fn run(cli: Cli) -> Result<()> {
    let config = FclConfig::load_or_default(cli.config.as_deref())
        .context("loading configuration")?;

    match cli.command {
        Commands::Optimize {
            locations,
            customers,
            candidates,
            k,
            solver,
            seed,
            map_out,
            summary,
        } => {
            let path = locations.unwrap_or_else(|| config.data.locations.clone());
            let table = fcl_io::load_locations(&path)
                .with_context(|| format!("loading locations from {}", path.display()))?;
            let size = ProblemSize::new(customers, candidates, k)?;
            let backend = solver.unwrap_or(config.solver.backend).build_backend();
            let mut rng = match seed.or(config.sampling.value_seed) {
                Some(seed) => StdRng::seed_from_u64(seed),
                None => StdRng::from_entropy(),
            };

            let outcome = optimize(
                &table,
                size,
                &config.sampling.params,
                backend.as_ref(),
                &mut rng,
            )?;
            info!(
                "{} solved in {:.2?}",
                outcome.backend, outcome.solve_time
            );
            if summary {
                eprint!("{}", outcome.solution.summary(&outcome.instance));
            }

            // One render feeds both the file and the response body
            let png = if map_out.is_some() || config.map.enabled {
                let renderer = PlottersMapRenderer::new(config.map.width, config.map.height);
                let scene = MapScene::from_solution(&outcome.instance, &outcome.solution);
                render_map_png(&renderer, &scene)
            } else {
                None
            };
            if let Some(out) = &map_out {
                let bytes = png
                    .as_deref()
                    .context("map rendering failed and no placeholder could be drawn")?;
                fs::write(out, bytes).with_context(|| format!("writing {}", out.display()))?;
                info!("map written to {}", out.display());
            }
            let map_base64 = if config.map.enabled {
                png.as_deref().map(png_to_base64)
            } else {
                None
            };

            let response = OptimizeResponse::from_outcome(&outcome, map_base64);
            let mut stdout = io::stdout().lock();
            serde_json::to_writer_pretty(&mut stdout, &response)?;
            writeln!(stdout)?;
            Ok(())
        }
        Commands::Serve {
            addr,
            locations,
            solver,
        } => {
            let mut config = config;
            if let Some(addr) = addr {
                config.server.addr = addr;
            }
            if let Some(locations) = locations {
                config.data.locations = locations;
            }
            if let Some(solver) = solver {
                config.solver.backend = solver;
            }
            let runtime = tokio::runtime::Runtime::new()?;
            runtime.block_on(serve_with_config(config))
        }
        Commands::Solvers => {
            let mut stdout = io::stdout().lock();
            for kind in SolverKind::all() {
                let backend = kind.build_backend();
                let status = if backend.is_available() {
                    "available"
                } else {
                    "unavailable"
                };
                let default = if *kind == config.solver.backend {
                    " (default)"
                } else {
                    ""
                };
                writeln!(stdout, "{:<10}{status}{default}", kind.as_str())?;
            }
            Ok(())
        }
    }
}
