use super::{CommandContext, HandlerResult, StateInner};
use parleyd_tokens::Command;
use std::collections::HashMap;

/// The signature shared by all command handlers.
///
/// Parameters are the ones of the message, and there are at least as many as the command
/// requires.
pub(crate) type Handler = fn(&mut StateInner, CommandContext<'_>, &[&str]) -> HandlerResult;

/// Maps commands to their handlers.
///
/// Commands without a handler are answered with ERR_UNKNOWNCOMMAND.
#[derive(Clone, Default)]
pub struct Registry {
    handlers: HashMap<Command, Handler>,
}

impl Registry {
    /// A registry that knows no command.
    pub fn empty() -> Self {
        Self::default()
    }

    /// A registry with every command parleyd implements.
    pub fn standard() -> Self {
        let mut res = Self::empty();
        res.insert(Command::Cap, StateInner::cmd_cap);
        res.insert(Command::Invite, StateInner::cmd_invite);
        res.insert(Command::Join, StateInner::cmd_join);
        res.insert(Command::Kick, StateInner::cmd_kick);
        res.insert(Command::List, StateInner::cmd_list);
        res.insert(Command::Mode, StateInner::cmd_mode);
        res.insert(Command::Motd, StateInner::cmd_motd);
        res.insert(Command::Nick, StateInner::cmd_nick);
        res.insert(Command::Notice, StateInner::cmd_notice);
        res.insert(Command::Part, StateInner::cmd_part);
        res.insert(Command::Pass, StateInner::cmd_pass);
        res.insert(Command::Ping, StateInner::cmd_ping);
        res.insert(Command::Pong, StateInner::cmd_pong);
        res.insert(Command::PrivMsg, StateInner::cmd_privmsg);
        res.insert(Command::Quit, StateInner::cmd_quit);
        res.insert(Command::Topic, StateInner::cmd_topic);
        res.insert(Command::User, StateInner::cmd_user);
        res.insert(Command::Who, StateInner::cmd_who);
        res.insert(Command::Whois, StateInner::cmd_whois);
        res
    }

    pub(crate) fn insert(&mut self, command: Command, handler: Handler) {
        self.handlers.insert(command, handler);
    }

    /// Forgets about the given command.  Returns whether it was known.
    pub fn remove(&mut self, command: Command) -> bool {
        self.handlers.remove(&command).is_some()
    }

    pub fn contains(&self, command: Command) -> bool {
        self.handlers.contains_key(&command)
    }

    pub(crate) fn get(&self, command: Command) -> Option<Handler> {
        self.handlers.get(&command).copied()
    }
}

// mod tests
