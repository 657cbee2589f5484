//! Shared state and API to handle incoming commands.
//!
//! This module is split in several files:
//!
//! - `mod.rs`: public API of the server state, dispatch and send utilities
//! - `registry.rs`: the table that maps commands to their handlers
//! - `rfc2812.rs`: handlers for messages defined in the RFC 2812
//! - `capabilities.rs`: handler for the CAP command

use crate::channel::{Channel, MemberModes};
use crate::client::{Client, MessageQueue, MessageQueueItem};
use crate::{config, lines, util};
use parleyd_tokens::{mode, rpl, Buffer, Command, Message, MessageBuffer, ReplyBuffer};
use slab::Slab;
use std::collections::HashMap;
use std::sync::Arc;
use std::{fs, io, net};
use tokio::sync::Mutex;

pub use registry::Registry;

mod capabilities;
mod registry;
mod rfc2812;
#[cfg(test)]
mod tests;

#[macro_export]
macro_rules! server_version(() => {concat!(env!("CARGO_PKG_NAME"), "-", env!("CARGO_PKG_VERSION"))});

type ChannelMap = HashMap<String, Channel>;
type ClientMap = Slab<Client>;
pub(crate) type HandlerResult = Result<(), ()>;

/// What a handler knows about the command it is handling.
pub(crate) struct CommandContext<'a> {
    /// The id of the client that issued the command.
    pub id: usize,

    /// Replies meant for this client.  Sent after the handler returns.
    pub rb: &'a mut ReplyBuffer,
}

/// State of the IRC server.
///
/// This is used by parleyd to maintain a consistent state of the network.  Note that this is just
/// an `Arc` to the real data, so it's cheap to clone and clones share the same data.
///
/// Every call locks the whole state, so one line is fully processed before the next one is.
///
/// # Example
///
/// ```rust
/// # use parleyd::{config, Registry, State};
/// # use parleyd_tokens::Message;
/// # tokio::runtime::Builder::new_current_thread().build().unwrap().block_on(async {
/// let state = State::new(config::State::sample(), Registry::standard());
///
/// // The state uses a MPSC queue and pushes the messages meant to be sent
/// // to the client onto the queue.
/// let client_addr = std::net::SocketAddr::from(([127, 0, 0, 1], 12345));
/// let (msg_queue, mut outgoing_msgs) = tokio::sync::mpsc::unbounded_channel();
/// let id = state.peer_joined(client_addr, msg_queue).await;
///
/// for line in &["PASS secret", "NICK alice", "USER alice 0 * :Alice"] {
///     let msg = Message::parse(line).unwrap();
///     state.handle_message(id, msg).await.unwrap();
/// }
///
/// // Outgoing messages implement `AsRef<str>`.  One of them can hold several IRC messages.
/// let msg = outgoing_msgs.recv().await.unwrap();
/// let msg: &str = msg.as_ref();
/// assert_eq!(msg.split("\r\n").next().unwrap(),
///            ":server 001 alice :Welcome to the Internet Relay Network alice!alice@localhost");
/// # });
/// ```
#[derive(Clone)]
pub struct State(Arc<Mutex<StateInner>>);

impl State {
    /// Initialize the IRC state from the given configuration and command handlers.
    pub fn new(config: config::State, registry: Registry) -> Self {
        let inner = StateInner::new(config, registry);
        Self(Arc::new(Mutex::new(inner)))
    }

    /// Adds a new connection to the state and returns its id.
    ///
    /// The queue is used to push messages back to the peer.
    pub async fn peer_joined(&self, addr: net::SocketAddr, queue: MessageQueue) -> usize {
        self.0.lock().await.peer_joined(addr, queue)
    }

    /// Removes the given connection from the state, with an optional error.
    ///
    /// If the peer has quit unexpectedly, `err` should be set to `Some` and reflect the cause of
    /// the quit, so that other peers can be correctly informed.
    pub async fn peer_quit(&self, id: usize, err: Option<io::Error>) {
        self.0.lock().await.peer_quit(id, err);
    }

    /// Updates the state according to the given message from the given client.
    ///
    /// Returns `Err(())` when the connection must be closed.
    pub async fn handle_message(&self, id: usize, msg: Message<'_>) -> Result<(), ()> {
        self.0.lock().await.handle_message(id, msg)
    }

    /// Sends ERROR to every client, then drops all clients and channels.
    pub async fn stop(&self) {
        self.0.lock().await.stop();
    }
}

/// The actual shared data (state) of the IRC server.
pub(crate) struct StateInner {
    /// The domain of the server.  This string is used as a prefix for replies sent to clients.
    domain: String,

    /// Clients need to issue a PASS command with this password to register.
    password: String,

    /// Password that authenticates bots.
    bot_password: Option<String>,

    clients: ClientMap,
    channels: ChannelMap,

    /// The formatted time when this instance is created.  It is sent to the client when they
    /// register (in a "003 RPL_CREATED" reply).
    created_at: String,

    /// The message of the day.  `None` when the configured file could not be read.
    motd: Option<String>,

    kicklen: usize,
    topiclen: usize,

    registry: Registry,
}

impl StateInner {
    pub fn new(config: config::State, registry: Registry) -> Self {
        let motd = match config.motd_file {
            None => Some(lines::DEFAULT_MOTD.to_owned()),
            Some(file) => match fs::read_to_string(&file) {
                Ok(motd) => Some(motd),
                Err(err) => {
                    log::warn!("Failed to read {:?}: {}", file, err);
                    None
                }
            },
        };
        Self {
            domain: config.domain,
            password: config.password,
            bot_password: config.bot_password,
            clients: Slab::new(),
            channels: HashMap::new(),
            created_at: util::time_str(),
            motd,
            kicklen: config.kicklen,
            topiclen: config.topiclen,
            registry,
        }
    }

    pub fn peer_joined(&mut self, addr: net::SocketAddr, queue: MessageQueue) -> usize {
        let id = self.clients.insert(Client::new(queue, addr));
        log::info!("{}: Connected from {}", id, addr);
        id
    }

    pub fn peer_quit(&mut self, id: usize, err: Option<io::Error>) {
        if !self.clients.contains(id) {
            return;
        }
        let client = self.clients.remove(id);
        let reason = match err {
            Some(err) => err.to_string(),
            None => lines::CONNECTION_RESET.to_owned(),
        };
        log::info!("{}: Disconnected from {} ({})", id, client.addr, reason);
        if !client.has_quit() {
            let msg = quit_message(&client, &reason);
            self.remove_client(id, msg);
        }
    }

    /// This function is called by `peer_quit` and `cmd_quit` to do the cleanup needed when a
    /// client leaves:
    ///
    /// - send the QUIT message to all registered clients,
    /// - remove the client from each channel it was in,
    /// - remove empty channels.
    ///
    /// The client itself is only removed from `clients` by `peer_quit`.
    fn remove_client(&mut self, id: usize, quit: Option<MessageQueueItem>) {
        if let Some(msg) = quit {
            self.broadcast(&msg, Some(id));
        }
        self.remove_from_all_channels(id);
    }

    pub fn handle_message(&mut self, id: usize, msg: Message<'_>) -> HandlerResult {
        let client = match self.clients.get(id) {
            Some(client) if !client.has_quit() => client,
            _ => return Err(()),
        };
        let mut rb = ReplyBuffer::new(&self.domain, client.nick());

        let known = msg.command.ok().and_then(|cmd| Some((cmd, self.registry.get(cmd)?)));
        let (command, handler) = match known {
            Some(known) => known,
            None => {
                let unknown = match msg.command {
                    Ok(cmd) => cmd.as_str(),
                    Err(unknown) => unknown,
                };
                log::debug!("{}: Unknown command {:?}", id, unknown);
                rb.reply(rpl::ERR_UNKNOWNCOMMAND)
                    .param(unknown)
                    .trailing_param(lines::UNKNOWN_COMMAND);
                client.send(rb);
                return Ok(());
            }
        };

        if !client.can_issue_command(command) {
            log::debug!("{}: {} before registration", id, command);
            rb.reply(rpl::ERR_NOTREGISTERED).trailing_param(lines::NOT_REGISTERED);
            client.send(rb);
            return Ok(());
        }

        if !msg.has_enough_params() {
            match command {
                Command::Whois => {
                    rb.reply(rpl::ERR_NONICKNAMEGIVEN).trailing_param(lines::NO_NICKNAME_GIVEN);
                }
                Command::PrivMsg | Command::Notice if msg.num_params == 0 => {
                    rb.reply(rpl::ERR_NORECIPIENT)
                        .fmt_trailing_param(lines_no_recipient!(command));
                }
                Command::PrivMsg | Command::Notice => {
                    rb.reply(rpl::ERR_NOTEXTTOSEND).trailing_param(lines::NO_TEXT_TO_SEND);
                }
                _ => {
                    rb.reply(rpl::ERR_NEEDMOREPARAMS)
                        .param(command.as_str())
                        .trailing_param(lines::NEED_MORE_PARAMS);
                }
            }
            client.send(rb);
            return Ok(());
        }

        let params = msg.params();
        log::debug!("{}: {} {:?}", id, command, params);
        let _ = handler(self, CommandContext { id, rb: &mut rb }, params);

        let client = match self.clients.get(id) {
            Some(client) => client,
            None => return Err(()),
        };
        if !rb.is_empty() {
            client.send(rb);
        }
        if client.has_quit() {
            return Err(());
        }
        Ok(())
    }

    pub fn stop(&mut self) {
        log::info!("Closing {} connection(s)", self.clients.len());
        for (_, client) in &self.clients {
            client.send_error(lines::SHUTTING_DOWN);
        }
        self.clients.clear();
        self.channels.clear();
    }

    /// Completes the registration of the client if it has given PASS, NICK and USER, and sends
    /// the welcome burst.  Bots then join every channel.
    fn try_register(&mut self, id: usize, rb: &mut ReplyBuffer) {
        let client = &mut self.clients[id];
        if !client.complete_registration() {
            return;
        }
        log::info!("{}: Registered as {:?}", id, client.full_name());
        let is_bot = client.is_bot;

        self.write_welcome(rb, self.clients[id].full_name());
        if is_bot {
            let channels: Vec<String> = self.channels.keys().cloned().collect();
            for name in channels {
                self.join_channel(id, rb, &name);
            }
        }
    }
}

/// The QUIT message other clients receive when `client` leaves, or `None` if they never knew
/// about it.
fn quit_message(client: &Client, reason: &str) -> Option<MessageQueueItem> {
    if !client.is_registered() {
        return None;
    }
    let mut response = Buffer::new();
    response.message(client.full_name(), Command::Quit).trailing_param(reason);
    Some(MessageQueueItem::from(response))
}

/// The registered client that holds the given nickname.
fn registered_client<'a>(clients: &'a ClientMap, nick: &str) -> Option<(usize, &'a Client)> {
    clients.iter()
        .find(|(_, client)| client.is_registered() && !client.has_quit() && client.has_nick(nick))
}

/// Returns `Ok(channel)` when `name` is an existing channel name.  Otherwise returns `Err(())` and
/// writes an error for the client.
fn find_channel<'a>(id: usize, rb: &mut ReplyBuffer, channels: &'a ChannelMap,
                    name: &str) -> Result<&'a Channel, ()>
{
    match channels.get(name) {
        Some(channel) => Ok(channel),
        None => {
            log::debug!("{}:     no such channel", id);
            rb.reply(rpl::ERR_NOSUCHCHANNEL).param(name).trailing_param(lines::NO_SUCH_CHANNEL);
            Err(())
        }
    }
}

/// Returns `Ok(member_modes)` when the client identified by `id` is in the given `channel`.
/// Otherwise returns `Err(())` and writes an error for the client.
///
/// `channel_name` is needed for the error reply.
fn find_member(id: usize, rb: &mut ReplyBuffer, channel: &Channel,
               channel_name: &str) -> Result<MemberModes, ()>
{
    match channel.members.get(&id) {
        Some(modes) => Ok(*modes),
        None => {
            log::debug!("{}:     not on channel", id);
            rb.reply(rpl::ERR_NOTONCHANNEL)
                .param(channel_name)
                .trailing_param(lines::NOT_ON_CHANNEL);
            Err(())
        }
    }
}

/// Returns `Ok((id, client))` when the client identified by the nickname `nick` is connected and
/// registered.  Otherwise returns `Err(())` and writes an error for the client.
fn find_nick<'a>(id: usize, rb: &mut ReplyBuffer, clients: &'a ClientMap,
                 nick: &str) -> Result<(usize, &'a Client), ()>
{
    match registered_client(clients, nick) {
        Some(found) => Ok(found),
        None => {
            log::debug!("{}:     nick doesn't exist", id);
            rb.reply(rpl::ERR_NOSUCHNICK).param(nick).trailing_param(lines::NO_SUCH_NICK);
            Err(())
        }
    }
}

// Send utilities
impl StateInner {
    /// Sends the given message to the given client.
    fn send(&self, id: usize, msg: MessageQueueItem) {
        if let Some(client) = self.clients.get(id) {
            client.send(msg);
        }
    }

    /// Sends the given message to all registered clients but `exclude`.
    fn broadcast(&self, msg: &MessageQueueItem, exclude: Option<usize>) {
        for (id, client) in &self.clients {
            if Some(id) == exclude || !client.is_registered() || client.has_quit() {
                continue;
            }
            client.send(msg.clone());
        }
    }

    /// Sends the given message to all members of the given channel but `exclude`.
    fn broadcast_to_channel(&self, channel_name: &str, msg: &MessageQueueItem,
                            exclude: Option<usize>)
    {
        if let Some(channel) = self.channels.get(channel_name) {
            for &member in channel.members.keys() {
                if Some(member) != exclude {
                    self.send(member, msg.clone());
                }
            }
        }
    }

    /// Sends a message from the given client to all members of the channel.  The copy of the
    /// client goes to `rb`, after the replies already there.
    fn broadcast_from<F>(&self, id: usize, rb: &mut ReplyBuffer, channel_name: &str,
                         command: Command, build: F)
        where F: Fn(MessageBuffer<'_>)
    {
        let prefix = self.clients[id].full_name();
        let mut response = Buffer::new();
        build(response.message(prefix, command));
        self.broadcast_to_channel(channel_name, &MessageQueueItem::from(response), Some(id));
        build(rb.message(prefix, command));
    }

    /// The id of the client that holds the given nickname, registered or not.
    fn client_by_nick(&self, nick: &str) -> Option<usize> {
        self.clients.iter()
            .find(|(_, client)| !client.has_quit() && client.has_nick(nick))
            .map(|(id, _)| id)
    }

    fn remove_from_all_channels(&mut self, id: usize) {
        self.channels.retain(|name, channel| {
            channel.remove_member(id);
            if channel.members.is_empty() {
                log::debug!("{}:     channel {} is now empty", id, name);
                return false;
            }
            true
        });
    }

    fn remove_channel_if_empty(&mut self, channel_name: &str) {
        if self.channels.get(channel_name).map_or(false, |channel| channel.members.is_empty()) {
            self.channels.remove(channel_name);
        }
    }

    /// Adds the client to the channel, creating it if needed, and tells everyone about it.
    fn join_channel(&mut self, id: usize, rb: &mut ReplyBuffer, channel_name: &str) {
        let channel = self.channels.entry(channel_name.to_owned()).or_default();
        channel.invited.remove(self.clients[id].nick());
        channel.add_member(id);

        self.broadcast_from(id, rb, channel_name, Command::Join, |msg| {
            msg.param(channel_name);
        });
        self.write_topic(rb, channel_name);
        self.write_names(rb, channel_name);
    }

    fn write_motd(&self, rb: &mut ReplyBuffer) {
        if let Some(ref motd) = self.motd {
            rb.reply(rpl::MOTDSTART).fmt_trailing_param(lines_motd_start!(&self.domain));
            for line in motd.lines() {
                let mut msg = rb.reply(rpl::MOTD);
                let trailing = msg.raw_trailing_param();
                trailing.push_str("- ");
                trailing.push_str(line);
            }
            rb.reply(rpl::ENDOFMOTD).trailing_param(lines::END_OF_MOTD);
        } else {
            rb.reply(rpl::ERR_NOMOTD).trailing_param(lines::NO_MOTD);
        }
    }

    /// Writes the list of nicknames in the channel `channel_name`.
    fn write_names(&self, rb: &mut ReplyBuffer, channel_name: &str) {
        if let Some(channel) = self.channels.get(channel_name) {
            if !channel.members.is_empty() {
                let mut message = rb.reply(rpl::NAMREPLY).param("=").param(channel_name);
                let trailing = message.raw_trailing_param();
                for (&member, modes) in &channel.members {
                    if let Some(client) = self.clients.get(member) {
                        if let Some(s) = modes.symbol() { trailing.push(s); }
                        trailing.push_str(client.nick());
                        trailing.push(' ');
                    }
                }
                trailing.pop();  // Remove last space
            }
            rb.reply(rpl::ENDOFNAMES).param(channel_name).trailing_param(lines::END_OF_NAMES);
        }
    }

    /// Writes the topic of the channel `channel_name`.
    fn write_topic(&self, rb: &mut ReplyBuffer, channel_name: &str) {
        let topic = self.channels.get(channel_name).and_then(|channel| channel.topic.as_ref());
        if let Some(topic) = topic {
            rb.reply(rpl::TOPIC).param(channel_name).trailing_param(topic);
        } else {
            rb.reply(rpl::NOTOPIC).param(channel_name).trailing_param(lines::NO_TOPIC);
        }
    }

    /// Writes welcome messages.  Called when a client has completed its registration.
    fn write_welcome(&self, rb: &mut ReplyBuffer, name: &str) {
        rb.reply(rpl::WELCOME).fmt_trailing_param(lines_welcome!(name));
        rb.reply(rpl::YOURHOST)
            .fmt_trailing_param(lines_your_host!(&self.domain, server_version!()));
        rb.reply(rpl::CREATED).fmt_trailing_param(lines_created!(&self.created_at));
        rb.reply(rpl::MYINFO)
            .param(&self.domain)
            .param(server_version!())
            .param(mode::CHAN_MODES);
        self.write_motd(rb);
    }
}
