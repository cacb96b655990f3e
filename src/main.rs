//! Route matcher CLI.
//!
//! Compiles a TOML route file, persists the compiled cache and answers
//! `(method, path)` queries against it.
//!
//! ```text
//! route-matcher --config routes.toml compile --out routes.cache.json
//! route-matcher --config routes.toml match /users/42 --method GET
//! route-matcher --config routes.toml routes
//! route-matcher --config routes.toml watch   # reads "METHOD PATH" lines
//! ```

use std::io::BufRead;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::sync::Arc;

use arc_swap::ArcSwap;
use clap::{Parser, Subcommand};

use route_matcher::cache::{create_matcher, save_routes};
use route_matcher::config::watcher::{rebuild_matcher, ConfigWatcher};
use route_matcher::config::{load_config, RouterConfig};
use route_matcher::observability::logging::init_logging;
use route_matcher::routing::{CompiledPath, MatchResult, Matcher, RouteTable};

#[derive(Parser)]
#[command(name = "route-matcher")]
#[command(about = "Compile path-pattern routes and match requests against them", long_about = None)]
struct Cli {
    /// Route file.
    #[arg(short, long, default_value = "routes.toml")]
    config: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Compile the route file and write the compiled cache
    Compile {
        /// Output file (defaults to `cache.path` from the route file)
        #[arg(short, long)]
        out: Option<PathBuf>,
    },
    /// Match a single request
    Match {
        path: String,

        /// Request method; empty accepts any method
        #[arg(short, long, default_value = "")]
        method: String,

        /// Ignore `cache.path` and compile from the route file
        #[arg(long)]
        no_cache: bool,
    },
    /// List compiled routes in match order
    Routes,
    /// Reload on route file changes and match "METHOD PATH" lines from stdin
    Watch,
}

fn main() -> Result<ExitCode, Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let config = load_config(&cli.config)?;

    init_logging(&config.observability.log_level);
    tracing::debug!(config = %cli.config.display(), "route-matcher starting");

    match cli.command {
        Commands::Compile { out } => {
            let out = out
                .or_else(|| config.cache.path.as_ref().map(PathBuf::from))
                .ok_or("no output file: pass --out or set cache.path")?;
            let mut table = RouteTable::from_config(&config);
            save_routes(&out, table.compile()?)?;
            println!("compiled {} routes into {}", table.len(), out.display());
            Ok(ExitCode::SUCCESS)
        }
        Commands::Match {
            path,
            method,
            no_cache,
        } => {
            let cache = config
                .cache
                .path
                .as_deref()
                .filter(|_| !no_cache)
                .map(Path::new);
            let mut table = create_matcher::<String, _>(cache, |table| {
                table.register_config(&config);
            })?;
            let result = table.match_route(&path, &method)?;
            println!("{}", serde_json::to_string_pretty(&result)?);
            Ok(exit_code(&result))
        }
        Commands::Routes => {
            let mut table = RouteTable::from_config(&config);
            for route in table.compile()? {
                let methods: Vec<&str> = route.methods.iter().collect();
                let methods = if methods.is_empty() {
                    "*".to_string()
                } else {
                    methods.join(",")
                };
                match &route.matcher {
                    CompiledPath::Literal => {
                        println!("{:<12} {:<40} {}", methods, route.path, route.target)
                    }
                    CompiledPath::Pattern(pattern) => println!(
                        "{:<12} {:<40} {} ({})",
                        methods,
                        route.path,
                        route.target,
                        pattern.as_str()
                    ),
                }
            }
            Ok(ExitCode::SUCCESS)
        }
        Commands::Watch => watch(&cli.config, &config),
    }
}

fn watch(path: &Path, config: &RouterConfig) -> Result<ExitCode, Box<dyn std::error::Error>> {
    let initial: Matcher<String> = match rebuild_matcher(path) {
        Ok(matcher) => matcher,
        Err(e) => {
            tracing::warn!("Initial rebuild failed: {}. Using loaded configuration.", e);
            RouteTable::from_config(config).freeze()?
        }
    };
    let shared = Arc::new(ArcSwap::from_pointee(initial));
    let _watcher = ConfigWatcher::new(path, shared.clone()).run()?;

    for line in std::io::stdin().lock().lines() {
        let line = line?;
        let Some((method, request_path)) = parse_query(&line) else {
            continue;
        };

        let matcher = shared.load();
        let result = matcher.match_route(request_path, method);
        println!("{}", serde_json::to_string(&result)?);
    }

    Ok(ExitCode::SUCCESS)
}

/// Split a `METHOD PATH` or bare `PATH` line; a bare path matches any method.
fn parse_query(line: &str) -> Option<(&str, &str)> {
    let mut parts = line.split_whitespace();
    match (parts.next(), parts.next()) {
        (Some(method), Some(request_path)) => Some((method, request_path)),
        (Some(request_path), None) => Some(("", request_path)),
        _ => None,
    }
}

fn exit_code<T>(result: &MatchResult<'_, T>) -> ExitCode {
    match result {
        MatchResult::Found { .. } => ExitCode::SUCCESS,
        MatchResult::NotFound => ExitCode::from(1),
        MatchResult::NotAllowed { .. } => ExitCode::from(2),
    }
}
