//! parleyd, a small single-server IRC daemon.
//!
//! # Usage
//!
//! ```console
//! parleyd <port> <password>
//! ```
//!
//! Clients must send `PASS <password>` before they can register.  Other settings come from an
//! optional configuration file, see the `config` module.
//!
//! During development: `cargo run -- 6667 secret`

#![forbid(unsafe_code)]
#![warn(clippy::all, rust_2018_idioms)]
#![allow(clippy::shadow_unrelated, clippy::use_self)]

#[macro_use]
mod lines;

pub use crate::config::Config;
pub use crate::state::{Registry, State};

mod channel;
mod client;
pub mod config;
mod control;
mod net;
mod state;
mod util;

/// The beginning of everything
pub fn start(port: u16, password: String) {
    control::load_config_and_run(port, password);
}
