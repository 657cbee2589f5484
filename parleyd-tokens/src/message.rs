use crate::Command;

/// The recommended length of a message.
///
/// `Message::parse` can parse messages longer than that.  It is used by `Buffer` to avoid multiple
/// allocations when building the same message.
pub const MESSAGE_LENGTH: usize = 512;

/// The number of elements in `Message::params`.
pub const PARAMS_LENGTH: usize = 15;

/// Returns `(word, rest)` where `word` is the first word of the given string and `rest` is the
/// substring starting at the first character of the second word.
///
/// Word boundaries here are spaces only.
fn parse_word(s: &str) -> (&str, &str) {
    let mut split = s.trim_start().splitn(2, ' ');
    (split.next().unwrap_or(""), split.next().unwrap_or("").trim_start())
}

/// Drops the IRCv3 tags of a message, if any.  parleyd does not support message tags.
fn skip_tags(buf: &str) -> &str {
    if buf.starts_with('@') {
        parse_word(buf).1
    } else {
        buf
    }
}

/// If the given string starts with a prefix, returns `(Some(prefix), rest)` where `rest` starts
/// from the first word after the prefix.
///
/// Otherwise returns `(None, rest)` where `rest` is the substring starting from the first word of
/// the given string.
fn parse_prefix(buf: &str) -> (Option<&str>, &str) {
    if let Some(stripped) = buf.strip_prefix(':') {
        let (prefix, rest) = parse_word(stripped);
        (Some(prefix), rest)
    } else {
        (None, buf.trim_start())
    }
}

/// Parses the first word of the string the same way as `parse_word`, and then tries to parse it as
/// a command.
///
/// On success, it returns `(Ok(command), rest)`.  On failure, when the command is not a variant of
/// `Command`, it returns `(Err(unknown_command), rest)`.
fn parse_command(buf: &str) -> (Result<Command, &str>, &str) {
    let (command_string, rest) = parse_word(buf);
    (Command::parse(command_string).ok_or(command_string), rest)
}

/// An IRC message.
///
/// See `Message::parse` for documentation on how to read IRC messages, and `Buffer` for
/// how to create messages.
///
/// See the RFC 2812 for a complete description of IRC messages:
/// <https://tools.ietf.org/html/rfc2812.html#section-2.3>.
#[derive(Clone, Debug)]
pub struct Message<'a> {
    /// The prefix of the message.
    ///
    /// Clients are not supposed to send one.  parleyd parses it so that it can be skipped.
    pub prefix: Option<&'a str>,

    /// The command of the message.
    ///
    /// It can either be a valid command in the form of `Ok(Command::_)`, or a simple string.
    /// `Message::parse` sets this field to `Err(_)` if the command is not a variant of `Command`.
    pub command: Result<Command, &'a str>,

    /// The number of parameters, and the number of valid elements in `Message::params`.
    pub num_params: usize,

    /// The actual parameters of the message.
    ///
    /// Only the `num_params` first elements are valid.  Other elements are empty strings.
    pub params: [&'a str; PARAMS_LENGTH],
}

impl<'a> Message<'a> {
    /// Parses a string and returns information about the IRC message.
    ///
    /// Parameters are separated by spaces, until one of them starts with `:`.  The rest of the
    /// line after this colon is the last parameter, spaces included.  When the line has more than
    /// `PARAMS_LENGTH` parameters, the last one holds the rest of the line.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use parleyd_tokens::{Command, Message};
    /// let privmsg = Message::parse("PRIVMSG #foo :hello world\r\n").unwrap();
    ///
    /// assert_eq!(privmsg.prefix, None);
    /// assert_eq!(privmsg.command, Ok(Command::PrivMsg));
    /// assert_eq!(privmsg.num_params, 2);
    /// assert_eq!(privmsg.params[0], "#foo");
    /// assert_eq!(privmsg.params[1], "hello world");
    /// ```
    ///
    /// If the command is unknown, it is stored as `Err(command_string)`, where `command_string` is
    /// taken from the input string:
    ///
    /// ```rust
    /// # use parleyd_tokens::{Command, Message};
    /// let unknown = Message::parse("Typo arg1\r\n").unwrap();
    ///
    /// assert_eq!(unknown.command, Err("Typo"));
    /// assert_eq!(unknown.num_params, 1);
    /// assert_eq!(unknown.params[0], "arg1");
    /// ```
    ///
    /// # Return value
    ///
    /// Returns `Some(msg)` when the message has a command, `None` otherwise.
    ///
    /// ```rust
    /// # use parleyd_tokens::Message;
    /// let empty = Message::parse("  \r \n \t ");
    /// let no_command = Message::parse(":prefix");
    ///
    /// assert!(empty.is_none());
    /// assert!(no_command.is_none());
    /// ```
    pub fn parse(s: &'a str) -> Option<Message<'a>> {
        let mut buf = s.trim_start().trim_end_matches(|c| c == '\r' || c == '\n');
        if buf.is_empty() || buf.contains('\0') {
            return None;
        }

        buf = skip_tags(buf);
        let (prefix, rest) = parse_prefix(buf);
        buf = rest;
        let (command, rest) = parse_command(buf);
        buf = rest;

        if let Err("") = command {
            return None;
        }

        let mut params = [""; PARAMS_LENGTH];
        let mut num_params = 0;
        while num_params < PARAMS_LENGTH {
            if buf.is_empty() {
                break;
            }
            if let Some(trailing) = buf.strip_prefix(':') {
                params[num_params] = trailing;
                buf = "";
            } else if num_params == PARAMS_LENGTH - 1 {
                params[num_params] = buf;
                buf = "";
            } else {
                let (word, rest) = parse_word(buf);
                params[num_params] = word;
                buf = rest;
            }
            num_params += 1;
        }

        Some(Message {
            prefix,
            command,
            num_params,
            params,
        })
    }

    /// Returns true if the message has enough parameters for its command.
    ///
    /// # Example
    ///
    /// ```rust
    /// # use parleyd_tokens::Message;
    /// let join = Message::parse("JOIN #hello there").unwrap();
    /// assert_eq!(join.has_enough_params(), true);
    ///
    /// let join = Message::parse("JOIN :").unwrap();
    /// assert_eq!(join.has_enough_params(), true);
    ///
    /// let join = Message::parse("JOIN").unwrap();
    /// assert_eq!(join.has_enough_params(), false);
    /// ```
    pub fn has_enough_params(&self) -> bool {
        match self.command {
            Ok(cmd) => cmd.required_params() <= self.num_params,
            Err(_) => false,
        }
    }

    /// The valid parameters of the message.
    pub fn params(&self) -> &[&'a str] {
        &self.params[..self.num_params]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_word() {
        assert_eq!(parse_word(""), ("", ""));
        assert_eq!(parse_word("a"), ("a", ""));
        assert_eq!(parse_word("a b"), ("a", "b"));
        assert_eq!(parse_word("a  b c"), ("a", "b c"));
        assert_eq!(parse_word("a "), ("a", ""));
    }

    #[test]
    fn test_parse_params() {
        let msg = Message::parse("USER alice 0 * :Alice Liddell").unwrap();
        assert_eq!(msg.command, Ok(Command::User));
        assert_eq!(msg.params(), &["alice", "0", "*", "Alice Liddell"]);

        let msg = Message::parse("MODE #a +kl key 10").unwrap();
        assert_eq!(msg.params(), &["#a", "+kl", "key", "10"]);

        let msg = Message::parse("PRIVMSG #a :  spaces : and colons  ").unwrap();
        assert_eq!(msg.params(), &["#a", "  spaces : and colons  "]);

        let msg = Message::parse("PRIVMSG #foo :hello world  \r\n").unwrap();
        assert_eq!(msg.params(), &["#foo", "hello world  "]);

        let msg = Message::parse("NICK alice  ").unwrap();
        assert_eq!(msg.params(), &["alice"]);

        let msg = Message::parse("TOPIC #a :").unwrap();
        assert_eq!(msg.params(), &["#a", ""]);

        let msg = Message::parse("quit").unwrap();
        assert_eq!(msg.command, Ok(Command::Quit));
        assert_eq!(msg.num_params, 0);
    }

    #[test]
    fn test_parse_prefix_and_tags() {
        let msg = Message::parse(":alice!alice@localhost PING token").unwrap();
        assert_eq!(msg.prefix, Some("alice!alice@localhost"));
        assert_eq!(msg.command, Ok(Command::Ping));
        assert_eq!(msg.params(), &["token"]);

        let msg = Message::parse("@label=1 PONG :token").unwrap();
        assert_eq!(msg.prefix, None);
        assert_eq!(msg.command, Ok(Command::Pong));
        assert_eq!(msg.params(), &["token"]);

        assert!(Message::parse("@label=1").is_none());
        assert!(Message::parse("NICK a\0b").is_none());
    }

    #[test]
    fn test_parse_too_many_params() {
        let msg = Message::parse("WHO 1 2 3 4 5 6 7 8 9 10 11 12 13 14 15 16 :17").unwrap();
        assert_eq!(msg.num_params, PARAMS_LENGTH);
        assert_eq!(msg.params[13], "14");
        assert_eq!(msg.params[14], "15 16 :17");
    }
} // mod tests
