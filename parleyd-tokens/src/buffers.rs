use crate::{Command, MESSAGE_LENGTH};
use std::cell::RefCell;
use std::fmt;

/// Helper to build an IRC message.
///
/// Use with `Buffer::message` and `ReplyBuffer::message`.
pub struct MessageBuffer<'a> {
    buf: &'a mut String,
}

impl<'a> MessageBuffer<'a> {
    fn with_prefix<C>(buf: &'a mut String, prefix: &str, command: C) -> Self
    where
        C: Into<Command>,
    {
        if !prefix.is_empty() {
            buf.push(':');
            buf.push_str(prefix);
            buf.push(' ');
        }
        buf.push_str(command.into().as_str());
        MessageBuffer { buf }
    }

    /// Appends a parameter to the message.
    ///
    /// The parameter is trimmed before insertion.  If `param` is whitespace, it is not appended.
    ///
    /// **Note**: It is up to the caller to make sure there is no remaning whitespace or newline in
    /// the parameter.
    ///
    /// # Example
    ///
    /// ```rust
    /// # use parleyd_tokens::{Command, Buffer};
    /// let mut response = Buffer::new();
    ///
    /// response.message("alice!alice@localhost", Command::Part)
    ///     .param("")
    ///     .param("  #hall ");
    ///
    /// assert_eq!(&response.build(), ":alice!alice@localhost PART #hall\r\n");
    /// ```
    pub fn param(self, param: &str) -> Self {
        let param = param.trim();
        if param.is_empty() {
            return self;
        }
        self.buf.push(' ');
        self.buf.push_str(param);
        self
    }

    /// Formats, then appends a parameter to the message.
    ///
    /// The parameter is **NOT** trimmed before insertion, is appended even if it's empty.  Use
    /// `MessageBuffer::param` to append strings, especially untrusted ones.
    ///
    /// # Example
    ///
    /// ```rust
    /// # use parleyd_tokens::{Buffer, rpl};
    /// let mut response = Buffer::new();
    ///
    /// response.message("server", rpl::LIST)
    ///     .param("alice")
    ///     .param("#hall")
    ///     .fmt_param(42);
    ///
    /// assert_eq!(&response.build(), ":server 322 alice #hall 42\r\n");
    /// ```
    pub fn fmt_param<T>(self, param: T) -> Self
    where
        T: fmt::Display,
    {
        use std::fmt::Write as _;

        self.buf.push(' ');
        let _ = write!(self.buf, "{}", param);
        self
    }

    /// Appends the traililng parameter to the message and consumes the buffer.
    ///
    /// Contrary to `MessageBuffer::param`, the parameter is not trimmed before insertion.  Even if
    /// `param` is just whitespace, it is appended.
    ///
    /// **Note**: It is up to the caller to make sure there is no newline in the parameter.
    ///
    /// # Example
    ///
    /// ```rust
    /// # use parleyd_tokens::{Command, Buffer};
    /// let mut response = Buffer::new();
    ///
    /// response.message("alice!alice@localhost", Command::Quit)
    ///     .trailing_param("Quit: long quit message");
    ///
    /// assert_eq!(&response.build(), ":alice!alice@localhost QUIT :Quit: long quit message\r\n");
    /// ```
    pub fn trailing_param(self, param: &str) {
        self.buf.push(' ');
        self.buf.push(':');
        self.buf.push_str(param);
    }

    /// Formats, then appends the trailing parameter to the message and consumes the buffer.
    ///
    /// # Example
    ///
    /// ```rust
    /// # use parleyd_tokens::{Buffer, rpl};
    /// let mut response = Buffer::new();
    ///
    /// response.message("server", rpl::WELCOME)
    ///     .param("alice")
    ///     .fmt_trailing_param(format_args!("Welcome, {}", "alice"));
    ///
    /// assert_eq!(&response.build(), ":server 001 alice :Welcome, alice\r\n");
    /// ```
    pub fn fmt_trailing_param<T>(self, param: T)
    where
        T: fmt::Display,
    {
        use std::fmt::Write as _;

        self.buf.push(' ');
        self.buf.push(':');
        let _ = write!(self.buf, "{}", param);
    }

    /// Returns a buffer the caller can use to append characters to an IRC message.
    ///
    /// # Example
    ///
    /// ```rust
    /// # use parleyd_tokens::{Command, Buffer};
    /// let mut response = Buffer::new();
    /// {
    ///     let mut msg = response.message("alice!alice@localhost", Command::Mode)
    ///         .param("#hall");
    ///     let param = msg.raw_param();
    ///     param.push('+');
    ///     param.push('i');
    ///     param.push('t');
    /// }
    ///
    /// assert_eq!(&response.build(), ":alice!alice@localhost MODE #hall +it\r\n");
    /// ```
    pub fn raw_param(&mut self) -> &mut String {
        self.buf.push(' ');
        self.buf
    }

    /// Returns a buffer the caller can use to append characters to the trailing parameter of an
    /// IRC message.
    ///
    /// # Example
    ///
    /// ```rust
    /// # use parleyd_tokens::{Buffer, rpl};
    /// let mut response = Buffer::new();
    /// {
    ///     let mut msg = response.message("server", rpl::NAMREPLY)
    ///         .param("alice")
    ///         .param("=")
    ///         .param("#hall");
    ///     let param = msg.raw_trailing_param();
    ///     param.push_str("@alice");
    ///     param.push(' ');
    ///     param.push_str("bob");
    /// }
    ///
    /// assert_eq!(&response.build(), ":server 353 alice = #hall :@alice bob\r\n");
    /// ```
    pub fn raw_trailing_param(&mut self) -> &mut String {
        self.buf.push(' ');
        self.buf.push(':');
        self.buf
    }
}

impl Drop for MessageBuffer<'_> {
    /// Auto-magically append "\r\n" when the `MessageBuffer` is dropped.
    fn drop(&mut self) {
        self.buf.push('\r');
        self.buf.push('\n');
    }
}

/// Helper to build IRC messages.
///
/// The `Buffer` is used to ease the creation of strings representing valid IRC messages.  If you
/// mainly need to send replies, `ReplyBuffer` might be a better fit for you.
///
/// # Example
///
/// ```rust
/// # use parleyd_tokens::{Command, Buffer, rpl};
/// let mut response = Buffer::new();
///
/// response.message("alice!alice@localhost", Command::Topic)
///     .param("#hall")
///     .trailing_param("Welcome to new users!");
/// response.message("server", rpl::TOPIC)
///     .param("bob")
///     .param("#hall")
///     .trailing_param("Welcome to new users!");
///
/// let result = response.build();
/// assert_eq!(&result, ":alice!alice@localhost TOPIC #hall :Welcome to new users!\r\n\
/// :server 332 bob #hall :Welcome to new users!\r\n");
/// ```
///
/// # On allocation
///
/// Allocation only occurs on `Buffer::message` calls.  These functions reseve `MESSAGE_LENGTH`
/// prior to writing on the internal buffer.
#[derive(Debug, Default)]
pub struct Buffer {
    buf: String,
}

impl Buffer {
    /// Creates a `Buffer`.  Does not allocate.
    pub fn new() -> Self {
        Self { buf: String::new() }
    }

    /// Whether the buffer is empty.
    ///
    /// # Example
    ///
    /// ```rust
    /// # use parleyd_tokens::{Command, Buffer};
    /// let empty = Buffer::new();
    /// let mut not_empty = Buffer::new();
    ///
    /// not_empty.message("server", Command::Motd);
    ///
    /// assert_eq!(empty.is_empty(), true);
    /// assert_eq!(not_empty.is_empty(), false);
    /// ```
    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    /// Appends an IRC message with a prefix to the buffer.
    ///
    /// If the given `prefix` is empty, no prefix is added.  This function may allocate to reserve
    /// space for the message.
    ///
    /// # Example
    ///
    /// ```rust
    /// # use parleyd_tokens::{Command, Buffer};
    /// let mut response = Buffer::new();
    ///
    /// response.message("", Command::Error).trailing_param("Closing link (bye)");
    ///
    /// assert_eq!(&response.build(), "ERROR :Closing link (bye)\r\n");
    /// ```
    pub fn message<C>(&mut self, prefix: &str, command: C) -> MessageBuffer<'_>
    where
        C: Into<Command>,
    {
        self.buf.reserve(MESSAGE_LENGTH);
        MessageBuffer::with_prefix(&mut self.buf, prefix, command)
    }

    /// Consumes the `Buffer` and returns the underlying `String`.
    pub fn build(self) -> String {
        self.buf
    }
}

thread_local! {
    static DOMAIN: RefCell<String> = RefCell::new(String::new());
    static NICKNAME: RefCell<String> = RefCell::new(String::new());
}

/// An helper to build responses meant for clients.
///
/// While `Buffer` is able to build any kind of IRC message, `ReplyBuffer` allows for easy creation
/// of IRC replies: messages that have the domain of the server as prefix, and the nickname of the
/// client as first parameter.
///
/// # Example
///
/// ```rust
/// # use parleyd_tokens::{Command, ReplyBuffer, rpl};
/// let mut response = ReplyBuffer::new("server", "alice");
///
/// // Normal message, same API as `Buffer`.
/// response.message("alice!alice@localhost", Command::Topic)
///     .param("#hall")
///     .trailing_param("Welcome to new users!");
///
/// // A reply.  It adds ":server" and "alice" automatically.
/// response.reply(rpl::TOPIC)
///     .param("#hall")
///     .trailing_param("Welcome to new users!");
///
/// let result = response.build();
/// assert_eq!(&result, ":alice!alice@localhost TOPIC #hall :Welcome to new users!\r\n\
/// :server 332 alice #hall :Welcome to new users!\r\n");
/// ```
///
/// # Usage note
///
/// This buffer uses thread-local storage to store the domain and the nickname, to reduce the
/// number of allocations.  Therefore, the user must not make two `ReplyBuffer`s at the same time
/// on the same thread, otherwise nicknames and domains will be mixed.
#[derive(Debug)]
pub struct ReplyBuffer {
    buf: Buffer,
}

impl ReplyBuffer {
    /// Creates a new `ReplyBuffer` and initialize the thread-local storage with the given domain
    /// and nickname.
    pub fn new(domain: &str, nickname: &str) -> Self {
        DOMAIN.with(|s| {
            let mut s = s.borrow_mut();
            s.clear();
            s.push_str(domain);
        });
        let mut res = Self { buf: Buffer::new() };
        res.set_nick(nickname);
        res
    }

    /// Whether the buffer has messages in it or not.
    ///
    /// # Example
    ///
    /// ```rust
    /// # use parleyd_tokens::{ReplyBuffer, rpl};
    /// let empty = ReplyBuffer::new("server", "alice");
    /// let mut not_empty = ReplyBuffer::new("server", "alice");
    ///
    /// not_empty.reply(rpl::ERR_NOMOTD);
    ///
    /// assert_eq!(empty.is_empty(), true);
    /// assert_eq!(not_empty.is_empty(), false);
    /// ```
    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    /// Changes the nickname.
    ///
    /// Internally, it changes the thread-local storage associated with the nickname.
    pub fn set_nick(&mut self, nickname: &str) {
        NICKNAME.with(|n| {
            let mut n = n.borrow_mut();
            n.clear();
            n.push_str(nickname);
        });
    }

    /// Appends a reply to the buffer.
    ///
    /// This will push the domain, the reply and the nickname of the client, and then return the
    /// resulting `MessageBuffer`.
    ///
    /// # Example
    ///
    /// ```rust
    /// # use parleyd_tokens::{ReplyBuffer, rpl};
    /// let mut response = ReplyBuffer::new("server", "*");
    ///
    /// response.reply(rpl::ERR_NOTREGISTERED).trailing_param("You have not registered");
    ///
    /// assert_eq!(&response.build(), ":server 451 * :You have not registered\r\n");
    /// ```
    pub fn reply<C>(&mut self, r: C) -> MessageBuffer<'_>
    where
        C: Into<Command>,
    {
        let msg = self.prefixed_message(r);
        NICKNAME.with(|s| msg.param(&s.borrow()))
    }

    /// Appends a command to the buffer, with the domain prefix, but without the nickname parameter.
    ///
    /// # Example
    ///
    /// ```rust
    /// # use parleyd_tokens::{Command, ReplyBuffer};
    /// let mut response = ReplyBuffer::new("server", "alice");
    ///
    /// response.prefixed_message(Command::Pong).param("server").trailing_param("token");
    ///
    /// assert_eq!(&response.build(), ":server PONG server :token\r\n");
    /// ```
    pub fn prefixed_message<C>(&mut self, command: C) -> MessageBuffer<'_>
    where
        C: Into<Command>,
    {
        DOMAIN.with(move |s| self.buf.message(&s.borrow(), command))
    }

    /// Appends a prefixed message like you would do with a `Buffer`.
    ///
    /// If the given `prefix` is empty, no prefix is added.  This function may allocate to reserve
    /// space for the message.
    pub fn message<C>(&mut self, prefix: &str, command: C) -> MessageBuffer<'_>
    where
        C: Into<Command>,
    {
        self.buf.message(prefix, command)
    }

    /// Consumes the buffer and returns the underlying `String`.
    pub fn build(self) -> String {
        self.buf.build()
    }
}
