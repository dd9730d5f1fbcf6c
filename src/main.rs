//! pathway: resolve request paths against a route table.
//!
//! ```text
//!     routes.toml ──▶ config (load, validate) ──▶ Router<Invocations>
//!                                                     │
//!     METHOD PATH ──▶ Request ────────────────────────┤
//!                                                     ▼
//!                          lexer → matcher → router (→ sub-routers)
//!                                                     │
//!     stdout ◀── JSON { invocations, parameters } ◀───┘
//! ```

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use serde::Serialize;

use pathway::config::{build_router, load_config, Invocation, Invocations};
use pathway::observability::init_logging;
use pathway::{Method, Parameters, Request, Router};

#[derive(Parser)]
#[command(name = "pathway")]
#[command(about = "Resolve request paths against a typed route table", long_about = None)]
struct Cli {
    /// Route table file.
    #[arg(short, long, default_value = "routes.toml")]
    config: PathBuf,

    /// Log filter; overrides the configured level.
    #[arg(short, long)]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate and compile the route table, then print it
    Check,
    /// Dispatch one request and print the controller targets it reaches
    Resolve {
        /// Request method, e.g. GET
        method: String,
        /// Request path, e.g. /user/21
        path: String,
    },
}

#[derive(Serialize)]
struct Resolution<'a> {
    method: &'a str,
    path: &'a str,
    invocations: &'a [Invocation],
    parameters: &'a Parameters,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let config = load_config(&cli.config)?;
    let level = cli
        .log_level
        .as_deref()
        .unwrap_or(&config.observability.log_level);
    init_logging(level)?;

    tracing::info!(
        config = %cli.config.display(),
        routes = config.routes.len(),
        "Configuration loaded"
    );

    let router = build_router(&config)?;

    match cli.command {
        Commands::Check => {
            print_tree(&router, 0);
            tracing::info!("Route table is valid");
        }
        Commands::Resolve { method, path } => {
            let method: Method = method.parse()?;
            let mut request = Request::new(path, method);
            let mut invocations: Invocations = Vec::new();

            let parameters = router
                .run(&mut request, &mut invocations)
                .inspect_err(|err| tracing::error!(error = %err, "Dispatch failed"))?;

            let resolution = Resolution {
                method: method.as_str(),
                path: request.path(),
                invocations: &invocations,
                parameters: &parameters,
            };
            println!("{}", serde_json::to_string_pretty(&resolution)?);
        }
    }

    Ok(())
}

fn print_tree(router: &Router<Invocations>, depth: usize) {
    for route in router.routes() {
        let mut methods: Vec<&str> = route.methods().map(|m| m.as_str()).collect();
        methods.sort_unstable();
        println!(
            "{:indent$}{} {} [{}]",
            "",
            route.name(),
            route.template(),
            methods.join(", "),
            indent = depth * 2
        );
        if let Some(sub_router) = route.sub_router() {
            print_tree(sub_router, depth + 1);
        }
    }
}
