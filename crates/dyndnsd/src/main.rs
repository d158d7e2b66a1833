// # dyndnsd - Dynamic DNS Daemon
//
// This daemon is a THIN integration layer. All resolution, change detection,
// and reconciliation logic lives in dyndns-core; the resolver and updater
// implementations live in their own crates and self-register through
// `register()` functions. The daemon only:
//
// 1. Loads and validates the JSON configuration file
// 2. Initializes tracing and the tokio runtime
// 3. Registers the built-in resolver and updater types
// 4. Spawns one task per configured worker
// 5. Coordinates shutdown on SIGTERM/SIGINT
//
// ## Configuration
//
// The configuration file path comes from the first CLI argument, falling
// back to the `DYNDNS_CONFIG` environment variable:
//
// ```bash
// dyndnsd /etc/dyndns/config.json
// # or
// export DYNDNS_CONFIG=/etc/dyndns/config.json
// dyndnsd
// ```
//
// ```json
// {
//   "log_level": "info",
//   "workers": [
//     {
//       "interval_secs": 300,
//       "resolvers": [
//         { "type": "web", "config": { "ipv4_url": "https://api.ipify.org" } }
//       ],
//       "updaters": [
//         {
//           "type": "cloudflare",
//           "config": { "api_token": "..." },
//           "update_records": [
//             { "family": "v4", "hostname": "home.example.com" }
//           ]
//         }
//       ]
//     }
//   ]
// }
// ```

use std::env;
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use tracing::{Level, error, info};
use tracing_subscriber::FmtSubscriber;

use dyndns_core::{AppConfig, Registry, Worker};

#[cfg(unix)]
use tokio::signal::unix::{SignalKind, signal};

/// Exit codes for different termination scenarios
///
/// These codes follow systemd conventions:
/// - 0: Clean shutdown
/// - 1: Configuration or startup error
/// - 2: Runtime error (unexpected)
#[derive(Debug, Clone, Copy)]
enum DaemonExitCode {
    /// Clean shutdown (normal exit)
    CleanShutdown = 0,
    /// Configuration error or startup failure
    ConfigError = 1,
    /// Runtime error (unexpected failure)
    RuntimeError = 2,
}

impl From<DaemonExitCode> for ExitCode {
    fn from(code: DaemonExitCode) -> Self {
        ExitCode::from(code as u8)
    }
}

/// Resolve the configuration file path from the CLI or the environment
fn config_path() -> Result<PathBuf> {
    if let Some(arg) = env::args().nth(1) {
        return Ok(PathBuf::from(arg));
    }
    if let Ok(var) = env::var("DYNDNS_CONFIG") {
        return Ok(PathBuf::from(var));
    }
    anyhow::bail!(
        "No configuration file given. \
        Pass a path as the first argument or set DYNDNS_CONFIG."
    )
}

/// Load and validate the configuration file
fn load_config(path: &PathBuf) -> Result<AppConfig> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file {}", path.display()))?;
    let config: AppConfig = serde_json::from_str(&raw)
        .with_context(|| format!("Failed to parse config file {}", path.display()))?;
    config.validate()?;
    Ok(config)
}

fn main() -> ExitCode {
    let path = match config_path() {
        Ok(path) => path,
        Err(e) => {
            eprintln!("Configuration error: {}", e);
            return DaemonExitCode::ConfigError.into();
        }
    };

    let config = match load_config(&path) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Configuration error: {:#}", e);
            return DaemonExitCode::ConfigError.into();
        }
    };

    // Initialize tracing
    let log_level = match config.log_level.to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        other => {
            eprintln!("Configuration error: unknown log level '{}'", other);
            return DaemonExitCode::ConfigError.into();
        }
    };

    let subscriber = FmtSubscriber::builder().with_max_level(log_level).finish();
    if let Err(e) = tracing::subscriber::set_global_default(subscriber) {
        eprintln!("Failed to set tracing subscriber: {}", e);
        return DaemonExitCode::ConfigError.into();
    }

    info!("Starting dyndnsd");
    info!(
        "Configuration loaded from {}: {} worker(s)",
        path.display(),
        config.workers.len()
    );

    // Enter tokio runtime
    let rt = match tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
    {
        Ok(runtime) => runtime,
        Err(e) => {
            error!("Failed to create tokio runtime: {}", e);
            return DaemonExitCode::RuntimeError.into();
        }
    };

    let result = rt.block_on(async {
        match run_daemon(config).await {
            Ok(()) => DaemonExitCode::CleanShutdown,
            Err(e) => {
                error!("Daemon error: {:#}", e);
                DaemonExitCode::RuntimeError
            }
        }
    });

    result.into()
}

/// Build the registry with every compiled-in resolver and updater type
fn build_registry() -> Registry {
    let registry = Registry::new();

    #[cfg(feature = "web")]
    {
        info!("Registering web resolver");
        dyndns_resolver_web::register(&registry);
    }

    #[cfg(feature = "cloudflare")]
    {
        info!("Registering Cloudflare updater");
        dyndns_updater_cloudflare::register(&registry);
    }

    registry
}

/// Run every configured worker until a shutdown signal arrives
async fn run_daemon(config: AppConfig) -> Result<()> {
    let registry = build_registry();

    // All workers are constructed before any is started, so a bad worker
    // config fails the whole daemon instead of a partial fleet coming up.
    let mut workers = Vec::with_capacity(config.workers.len());
    for (index, worker_config) in config.workers.into_iter().enumerate() {
        let worker = Worker::new(worker_config, &registry)
            .with_context(|| format!("Failed to build worker #{}", index + 1))?;
        workers.push(worker);
    }

    let mut handles = Vec::with_capacity(workers.len());
    let mut shutdown_senders = Vec::with_capacity(workers.len());
    for (index, mut worker) in workers.into_iter().enumerate() {
        let (tx, rx) = tokio::sync::oneshot::channel();
        shutdown_senders.push(tx);
        handles.push(tokio::spawn(async move {
            info!("Worker #{} starting", index + 1);
            worker.run_until(rx).await
        }));
    }

    let signal_name = wait_for_shutdown().await?;
    info!("Received {}, shutting down workers", signal_name);

    for tx in shutdown_senders {
        // A worker that already exited has dropped its receiver.
        let _ = tx.send(());
    }
    for handle in handles {
        match handle.await {
            Ok(Ok(())) => {}
            Ok(Err(e)) => error!("Worker finished with error: {}", e),
            Err(e) => error!("Worker task panicked: {}", e),
        }
    }

    info!("Shutdown complete");
    Ok(())
}

/// Wait for SIGTERM or SIGINT
#[cfg(unix)]
async fn wait_for_shutdown() -> Result<&'static str> {
    let mut sigterm = signal(SignalKind::terminate())
        .map_err(|e| anyhow::anyhow!("Failed to setup SIGTERM handler: {}", e))?;
    let mut sigint = signal(SignalKind::interrupt())
        .map_err(|e| anyhow::anyhow!("Failed to setup SIGINT handler: {}", e))?;

    Ok(tokio::select! {
        _ = sigterm.recv() => "SIGTERM",
        _ = sigint.recv() => "SIGINT",
    })
}

/// Wait for CTRL-C (non-Unix fallback)
#[cfg(not(unix))]
async fn wait_for_shutdown() -> Result<&'static str> {
    tokio::signal::ctrl_c()
        .await
        .map_err(|e| anyhow::anyhow!("Failed to wait for CTRL-C: {}", e))?;
    Ok("SIGINT")
}
