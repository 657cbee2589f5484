//! Runtime control utils.
//!
//! parleyd runs on a single-threaded tokio runtime.  The main task binds the listening socket,
//! then accepts connections until SIGINT or SIGTERM is received (Ctrl-C elsewhere).  Each
//! connection is handled by its own task, and they all share the same `State`.
//!
//! # The configuration file
//!
//! The port and the password come from the command line, the rest from an optional
//! configuration file.  Its path is read from the `PARLEYD_CONFIG` environment variable.  When
//! the variable is not set, `parleyd.conf` is read if it exists in the working directory, and
//! the defaults are used otherwise.

use crate::{net, Config, Registry, State};
use std::net::SocketAddr;
use std::{env, io, path, process};
use tokio::{runtime as rt, time};

const CONFIG_VAR: &str = "PARLEYD_CONFIG";
const DEFAULT_CONFIG_FILE: &str = "parleyd.conf";

/// Time given to connections to send their last messages on shutdown, in milliseconds.
const SHUTDOWN_GRACE: u64 = 200;

/// Reads the configuration file, exits the program on failure.
fn load_config() -> Config {
    let config_path = match env::var_os(CONFIG_VAR) {
        Some(config_path) => path::PathBuf::from(config_path),
        None => {
            let config_path = path::PathBuf::from(DEFAULT_CONFIG_FILE);
            if !config_path.exists() {
                log::info!("No configuration file, using defaults");
                return Config::default();
            }
            config_path
        }
    };

    log::info!("Loading configuration from {:?}", config_path.display());
    Config::from_file(&config_path).unwrap_or_else(|err| {
        log::error!("Failed to read {:?}: {}", config_path.display(), err);
        process::exit(1);
    })
}

fn create_runtime() -> rt::Runtime {
    rt::Builder::new_current_thread()
        .enable_all()
        .build()
        .unwrap_or_else(|err| {
            log::error!("Failed to start the tokio runtime: {}", err);
            process::exit(1);
        })
}

/// Loads the configuration, then runs the server until it is asked to stop.
pub fn load_config_and_run(port: u16, password: String) {
    let mut cfg = load_config();
    cfg.port = port;
    cfg.state.password = password;

    let runtime = create_runtime();
    runtime.block_on(run(cfg));
}

pub async fn run(cfg: Config) {
    let address = SocketAddr::new(cfg.bind_address, cfg.port);
    let listener = tokio::net::TcpListener::bind(address).await.unwrap_or_else(|err| {
        log::error!("Failed to listen to {}: {}", address, err);
        process::exit(1);
    });
    log::info!("Listening on {} for plain-text connections...", address);

    let shared = State::new(cfg.state, Registry::standard());

    tokio::select! {
        _ = net::listen(listener, shared.clone(), cfg.framing) => {}
        _ = stop_signal() => {}
    }

    shared.stop().await;
    time::sleep(time::Duration::from_millis(SHUTDOWN_GRACE)).await;
    log::info!("Bye");
}

fn signal_fail<T>(err: io::Error) -> T {
    log::error!("Cannot listen for signals: {}", err);
    process::exit(1);
}

#[cfg(unix)]
async fn stop_signal() {
    use tokio::signal::unix;

    let mut interrupt = unix::signal(unix::SignalKind::interrupt()).unwrap_or_else(signal_fail);
    let mut terminate = unix::signal(unix::SignalKind::terminate()).unwrap_or_else(signal_fail);

    tokio::select! {
        _ = interrupt.recv() => log::info!("Received SIGINT, shutting down"),
        _ = terminate.recv() => log::info!("Received SIGTERM, shutting down"),
    }
}

#[cfg(not(unix))]
async fn stop_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        signal_fail::<()>(err);
    }
    log::info!("Received Ctrl-C, shutting down");
}
