#[cfg(feature = "with-server")]
use std::net::IpAddr;

use clap::{Parser, Subcommand};
use mxprovider_lib::{LookupOptions, ProviderRule, ProviderRules};

#[derive(Parser)]
#[command(name = "mxprovider-cli", version)]
#[command(about = "Resolve MX hosts of an email list and infer the hosting provider")]
pub struct Cli {
    #[command(subcommand)]
    pub cmd: Commands,

    /// timeout of a single MX lookup (ms)
    #[arg(long = "timeout-ms", default_value_t = 2_000, global = true)]
    pub timeout_ms: u64,

    /// maximum number of MX lookups in flight
    #[arg(long, default_value_t = 128, global = true)]
    pub concurrency: usize,

    /// extra provider rule `pattern=label`, checked after the built-in ones (repeatable)
    #[arg(long = "rule", global = true)]
    pub rules: Vec<ProviderRule>,

    /// log level (RUST_LOG takes precedence)
    #[arg(long, default_value = "info", global = true)]
    pub log_level: String,
}

#[derive(Subcommand)]
pub enum Commands {
    /// enrich a CSV file with `mx` and `emailprovider` columns
    Enrich {
        /// input CSV path, `-` for stdin
        input: String,
        /// write the result to this file instead of stdout
        #[arg(long)]
        out: Option<String>,
    },
    /// resolve and classify a single domain
    Lookup { domain: String },
    /// serve the upload form and `/upload` endpoint (feature `with-server`)
    #[cfg(feature = "with-server")]
    Serve {
        #[arg(long, default_value = "0.0.0.0")]
        bind: IpAddr,
        #[arg(long, env = "PORT", default_value_t = 3000)]
        port: u16,
    },
}

impl Cli {
    pub fn parse() -> Self {
        <Self as Parser>::parse()
    }

    pub fn lookup_options(&self) -> LookupOptions {
        LookupOptions {
            timeout_ms: self.timeout_ms,
            concurrency: self.concurrency,
        }
    }

    pub fn provider_rules(&self) -> ProviderRules {
        let mut rules = ProviderRules::default();
        rules.extend(self.rules.iter().cloned());
        rules
    }
}
