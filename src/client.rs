//! Client management and connection state.

use parleyd_tokens::{Buffer, Command, ReplyBuffer};
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::sync::mpsc;

/// Host shown in the prefix of every client.
pub const HOST: &str = "localhost";

/// A message in the queue of a client.
///
/// The content is reference-counted, so that a message broadcast to a whole channel is only built
/// once.
#[derive(Clone, Debug)]
pub struct MessageQueueItem(Arc<str>);

impl From<String> for MessageQueueItem {
    fn from(val: String) -> Self {
        Self(Arc::from(val))
    }
}

impl From<Buffer> for MessageQueueItem {
    fn from(response: Buffer) -> Self {
        Self(Arc::from(response.build()))
    }
}

impl From<ReplyBuffer> for MessageQueueItem {
    fn from(response: ReplyBuffer) -> Self {
        Self(Arc::from(response.build()))
    }
}

impl AsRef<str> for MessageQueueItem {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl AsRef<[u8]> for MessageQueueItem {
    fn as_ref(&self) -> &[u8] {
        self.0.as_bytes()
    }
}

pub type MessageQueue = mpsc::UnboundedSender<MessageQueueItem>;

/// Client data.
pub struct Client {
    /// The queue of messages to be sent to the client.
    ///
    /// This is the write end of a mpsc channel of messages.  It is unbounded, meaning sending
    /// messages to this channel do not block.  Dropping the client closes the channel, which ends
    /// the connection.
    queue: MessageQueue,

    /// The address of the peer, for logging purposes.
    pub addr: SocketAddr,

    /// Whether the client has given a correct PASS.
    pub authenticated: bool,

    /// Whether the client has given the bot password.
    pub is_bot: bool,

    /// Whether the welcome burst has been sent.  Set once the client is authenticated and has a
    /// nickname and a username.
    registered: bool,

    /// Whether the client has sent QUIT.  The connection task removes it from the state.
    quit: bool,

    nick: String,
    user: String,
    real: String,
    full_name: String,
}

impl Client {
    /// Initialize the data for a new client, given its message queue.
    ///
    /// The nickname, the username and the realname are empty, and `nick()` returns `"*"`.
    pub fn new(queue: MessageQueue, addr: SocketAddr) -> Self {
        Self {
            queue,
            addr,
            authenticated: false,
            is_bot: false,
            registered: false,
            quit: false,
            nick: String::new(),
            user: String::new(),
            real: String::new(),
            full_name: String::from("*"),
        }
    }

    /// Add a message to the client message queue.
    ///
    /// Use this function to send messages to the client.  Messages sent to a client whose
    /// connection is being closed are dropped.
    pub fn send<M>(&self, msg: M)
        where M: Into<MessageQueueItem>
    {
        let _ = self.queue.send(msg.into());
    }

    /// Queues `ERROR :Closing link (<reason>)`.
    pub fn send_error(&self, reason: &str) {
        let mut response = Buffer::new();
        response.message("", Command::Error)
            .fmt_trailing_param(lines_closing_link!(reason));
        self.send(response);
    }

    /// Whether the client can issue the given command before its registration is complete.
    pub fn can_issue_command(&self, cmd: Command) -> bool {
        self.registered || matches!(cmd, Command::Pass | Command::Nick | Command::User
                                       | Command::Cap | Command::Ping | Command::Quit)
    }

    pub fn is_registered(&self) -> bool {
        self.registered
    }

    /// Marks the client as registered if it has just fulfilled the requirements.
    ///
    /// Returns true only once, when the registration is completed.
    pub fn complete_registration(&mut self) -> bool {
        if self.registered || !self.authenticated || self.nick.is_empty() || self.user.is_empty() {
            return false;
        }
        self.registered = true;
        true
    }

    pub fn has_quit(&self) -> bool {
        self.quit
    }

    pub fn set_quit(&mut self) {
        self.quit = true;
    }

    /// The nickname of the client, or `"*"` if it has none yet.
    pub fn nick(&self) -> &str {
        if self.nick.is_empty() {
            "*"
        } else {
            &self.nick
        }
    }

    /// Whether the client has the given nickname.
    pub fn has_nick(&self, nick: &str) -> bool {
        !self.nick.is_empty() && self.nick == nick
    }

    /// Change the nickname of the client.
    pub fn set_nick(&mut self, nick: &str) {
        self.nick.clear();
        self.nick.push_str(nick);
        self.update_full_name();
    }

    pub fn user(&self) -> &str {
        &self.user
    }

    pub fn has_user(&self) -> bool {
        !self.user.is_empty()
    }

    pub fn real(&self) -> &str {
        &self.real
    }

    /// Change the username and the realname of the client.
    pub fn set_user_real(&mut self, user: &str, real: &str) {
        self.user.clear();
        self.user.push_str(user);
        self.real.clear();
        self.real.push_str(real);
        self.update_full_name();
    }

    /// The prefix of the messages this client sends: `nick!user@localhost`, or just the nickname
    /// while the username is unknown.
    pub fn full_name(&self) -> &str {
        &self.full_name
    }

    fn update_full_name(&mut self) {
        let nick = if self.nick.is_empty() { "*" } else { &self.nick };
        self.full_name.clear();
        self.full_name.push_str(nick);
        if !self.user.is_empty() {
            self.full_name.push('!');
            self.full_name.push_str(&self.user);
            self.full_name.push('@');
            self.full_name.push_str(HOST);
        }
    }
}

// mod tests
