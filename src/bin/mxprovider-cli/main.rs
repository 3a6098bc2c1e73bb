mod args;
mod enrich;
mod lookup;

use anyhow::{Context, Result, anyhow};
use mxprovider_lib::SystemResolver;
use tracing_subscriber::EnvFilter;

use crate::args::{Cli, Commands};

fn init_tracing(level: &str) -> Result<()> {
    let filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => EnvFilter::try_new(level)
            .with_context(|| format!("invalid --log-level '{level}'"))?,
    };
    // stdout carries CSV output
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|err| anyhow!("install tracing subscriber: {err}"))
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(&cli.log_level)?;

    let options = cli.lookup_options();
    let rules = cli.provider_rules();
    let resolver =
        SystemResolver::from_system_conf(&options).context("initialize DNS resolver")?;

    match cli.cmd {
        Commands::Enrich { input, out } => {
            enrich::run(&input, out.as_deref(), &resolver, &rules, &options).await
        }
        Commands::Lookup { domain } => {
            lookup::run(&domain, &resolver, &rules, &options).await;
            Ok(())
        }
        #[cfg(feature = "with-server")]
        Commands::Serve { bind, port } => {
            use std::net::SocketAddr;
            use std::sync::Arc;

            use mxprovider_lib::server::{self, AppState};

            let state = AppState::new(Arc::new(resolver), rules, options);
            server::serve(SocketAddr::new(bind, port), state)
                .await
                .context("run HTTP server")
        }
    }
}
