//! Configuration parsing and structures.
//!
//! The server password and the port are given on the command line.  Everything else comes from an
//! optional file of `key value` lines:
//!
//! ```text
//! # Address the listener binds to.
//! bind_address 0.0.0.0
//! domain irc.example.org
//! bot_password hunter2
//! motd_file /etc/parleyd/motd.txt
//! recv_buffer_size 4096
//! buffer_overflow clear
//! topiclen 300
//! kicklen 300
//! ```

use self::parser::Parser;
use std::ops::Range;
use std::{fmt, io, net, path};

mod parser;

#[derive(Debug)]
pub enum Error {
    Io(io::Error),
    Format(Parser, Option<usize>, Range<usize>, String),
}

impl From<io::Error> for Error {
    fn from(val: io::Error) -> Self { Self::Io(val) }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(err) => err.fmt(f),
            Self::Format(parser, lineno, col, msg) => {
                writeln!(f, "{}", msg)?;
                if let Some(lineno) = lineno {
                    writeln!(f, "     |")?;
                    parser.lines().enumerate()
                        .skip_while(|(lno, _)| lno + 3 < *lineno)
                        .take_while(|(lno, _)| lno <= lineno)
                        .try_for_each(|(lno, line)| writeln!(f, "{:4} | {}", lno + 1, line))?;
                    let start = col.start + 1;
                    let len = col.end - col.start;
                    writeln!(f, "     |{0:1$}{2:^<3$}", ' ', start, '^', len)?;
                }
                Ok(())
            }
        }
    }
}

impl std::error::Error for Error {}

pub type Result<T> = std::result::Result<T, Error>;

/// What to do with a connection whose receive buffer is full and holds no complete line.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OverflowPolicy {
    /// Discard the buffered bytes and keep the connection.
    Clear,

    /// Close the connection.
    Close,
}

impl Default for OverflowPolicy {
    fn default() -> Self { Self::Clear }
}

impl fmt::Display for OverflowPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Clear => write!(f, "clear"),
            Self::Close => write!(f, "close"),
        }
    }
}

/// Settings for `State`.
#[derive(Clone, Debug, Default)]
pub struct State {
    pub domain: String,

    /// The password given with PASS by regular clients.
    pub password: String,

    /// The password given with PASS by bots, if bots are allowed.
    pub bot_password: Option<String>,

    /// Path to the message of the day.  The built-in banner is used when `None`.
    pub motd_file: Option<String>,

    pub kicklen: usize,
    pub topiclen: usize,
}

/// Settings for the connections.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Framing {
    /// Maximum number of bytes buffered while waiting for the end of a line.
    pub recv_buffer_size: usize,
    pub overflow: OverflowPolicy,
}

impl Default for Framing {
    fn default() -> Self {
        Self {
            recv_buffer_size: 4096,
            overflow: OverflowPolicy::Clear,
        }
    }
}

/// The whole configuration.
#[derive(Clone, Debug)]
pub struct Config {
    pub bind_address: net::IpAddr,
    pub port: u16,
    pub framing: Framing,
    pub state: State,
}

impl State {
    pub fn sample() -> Self {
        Self {
            domain: "server".to_owned(),
            password: "secret".to_owned(),
            bot_password: None,
            motd_file: None,
            kicklen: 300,
            topiclen: 300,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            bind_address: net::IpAddr::from([0, 0, 0, 0]),
            port: 6667,
            framing: Framing::default(),
            state: State::sample(),
        }
    }
}

impl Config {
    /// Reads the configuration file at the given path.
    pub fn from_file<P>(path: P) -> Result<Self>
        where P: AsRef<path::Path>
    {
        Self::from_parser(Parser::read(path)?)
    }

    /// Reads the configuration from the contents of a file.
    pub fn from_contents(contents: &str) -> Result<Self> {
        Self::from_parser(Parser::parse(contents)?)
    }

    fn from_parser(parser: Parser) -> Result<Self> {
        let mut res = Self::default();

        parser
            .unique_setting("bind_address",     false, |value| res.bind_address = value)?
            .unique_setting("domain",           false, |value| res.state.domain = value)?
            .unique_setting("bot_password",     false, |value| res.state.bot_password = Some(value))?
            .unique_setting("motd_file",        false, |value| res.state.motd_file = Some(value))?
            .unique_setting("recv_buffer_size", false, |value| res.framing.recv_buffer_size = value)?
            .unique_setting("buffer_overflow",  false, |value| res.framing.overflow = value)?
            .unique_setting("kicklen",          false, |value| res.state.kicklen = value)?
            .unique_setting("topiclen",         false, |value| res.state.topiclen = value)?
            .check_unknown_settings()?;

        res.validate();
        Ok(res)
    }

    fn validate(&mut self) {
        let def = Self::default();

        if self.framing.recv_buffer_size == 0 {
            self.framing.recv_buffer_size = def.framing.recv_buffer_size;
        }
        if self.state.kicklen == 0 { self.state.kicklen = def.state.kicklen; }
        if self.state.topiclen == 0 { self.state.topiclen = def.state.topiclen; }
    }
}

// mod tests
