//! RFC2812 implementation
//!
//! <https://tools.ietf.org/html/rfc2812.html>

use super::{find_channel, find_member, find_nick, quit_message, registered_client};
use super::{CommandContext, HandlerResult as Result};
use crate::channel::ModeKey;
use crate::client::{Client, MessageQueueItem, HOST};
use crate::{lines, util};
use parleyd_tokens::{mode, rpl, Buffer, Command, ReplyBuffer};
use std::collections::HashSet;

/// Returns the file name of a `\x01DCC SEND <file> <ip> <port>\x01` request.
fn dcc_send_file(text: &str) -> Option<&str> {
    let request = text.strip_prefix("\x01DCC SEND ")?;
    request.trim_end_matches('\x01').split(' ').next().filter(|file| !file.is_empty())
}

// Command handlers
impl super::StateInner {
    // INVITE

    pub fn cmd_invite(&mut self, ctx: CommandContext<'_>, params: &[&str]) -> Result {
        let (target_nick, channel_name) = (params[0], params[1]);
        let (target_id, target) = find_nick(ctx.id, ctx.rb, &self.clients, target_nick)?;
        let channel = find_channel(ctx.id, ctx.rb, &self.channels, channel_name)?;
        let modes = find_member(ctx.id, ctx.rb, channel, channel_name)?;

        if channel.invite_only && !modes.operator {
            log::debug!("{}:     not operator", ctx.id);
            ctx.rb.reply(rpl::ERR_CHANOPRIVSNEEDED)
                .param(channel_name)
                .trailing_param(lines::CHAN_O_PRIVS_NEEDED);
            return Err(());
        }
        if channel.is_member(target_id) {
            log::debug!("{}:     already on channel", ctx.id);
            ctx.rb.reply(rpl::ERR_USERONCHANNEL)
                .param(target_nick)
                .param(channel_name)
                .trailing_param(lines::USER_ON_CHANNEL);
            return Err(());
        }

        let mut invite = Buffer::new();
        invite.message(self.clients[ctx.id].full_name(), Command::Invite)
            .param(target_nick)
            .trailing_param(channel_name);
        target.send(invite);
        ctx.rb.reply(rpl::INVITING).param(target_nick).param(channel_name);

        if let Some(channel) = self.channels.get_mut(channel_name) {
            channel.invited.insert(target_nick.to_owned());
        }
        Ok(())
    }

    // JOIN

    pub fn cmd_join(&mut self, ctx: CommandContext<'_>, params: &[&str]) -> Result {
        if params[0] == "0" {
            return self.cmd_part_all(ctx);
        }

        let mut keys = params.get(1).map_or("", |keys| *keys).split(',');
        for channel_name in params[0].split(',') {
            let key = keys.next().unwrap_or("");
            if channel_name.is_empty() {
                continue;
            }
            let _ = self.join_one(ctx.id, ctx.rb, channel_name, key);
        }
        Ok(())
    }

    fn join_one(&mut self, id: usize, rb: &mut ReplyBuffer, channel_name: &str, key: &str) -> Result {
        if !util::is_valid_channel_name(channel_name) {
            log::debug!("{}:     invalid channel name {:?}", id, channel_name);
            rb.reply(rpl::ERR_NOSUCHCHANNEL)
                .param(channel_name)
                .trailing_param(lines::NO_SUCH_CHANNEL);
            return Err(());
        }

        if let Some(channel) = self.channels.get(channel_name) {
            let client = &self.clients[id];
            if channel.is_member(id) {
                log::debug!("{}:     already in {}", id, channel_name);
                rb.reply(rpl::ERR_USERONCHANNEL)
                    .param(client.nick())
                    .param(channel_name)
                    .trailing_param(lines::USER_ON_CHANNEL);
                return Err(());
            }
            if channel.invite_only && !channel.is_invited(client.nick()) {
                log::debug!("{}:     {} is invite-only", id, channel_name);
                rb.reply(rpl::ERR_INVITEONLYCHAN)
                    .param(channel_name)
                    .trailing_param(lines::INVITE_ONLY_CHAN);
                return Err(());
            }
            if channel.key.as_ref().map_or(false, |channel_key| channel_key != key) {
                log::debug!("{}:     bad key for {}", id, channel_name);
                rb.reply(rpl::ERR_BADCHANKEY)
                    .param(channel_name)
                    .trailing_param(lines::BAD_CHAN_KEY);
                return Err(());
            }
            if channel.is_full() && !client.is_bot {
                log::debug!("{}:     {} is full", id, channel_name);
                rb.reply(rpl::ERR_CHANNELISFULL)
                    .param(channel_name)
                    .trailing_param(lines::CHANNEL_IS_FULL);
                return Err(());
            }
        }

        self.join_channel(id, rb, channel_name);
        Ok(())
    }

    // KICK

    pub fn cmd_kick(&mut self, ctx: CommandContext<'_>, params: &[&str]) -> Result {
        let (channel_name, targets) = (params[0], params[1]);
        let channel = find_channel(ctx.id, ctx.rb, &self.channels, channel_name)?;
        let modes = find_member(ctx.id, ctx.rb, channel, channel_name)?;
        if !modes.operator {
            log::debug!("{}:     not operator", ctx.id);
            ctx.rb.reply(rpl::ERR_CHANOPRIVSNEEDED)
                .param(channel_name)
                .trailing_param(lines::CHAN_O_PRIVS_NEEDED);
            return Err(());
        }

        let reason = match params.get(2) {
            Some(reason) if !reason.is_empty() => *reason,
            _ => self.clients[ctx.id].nick(),
        };
        let reason = util::truncate(reason, self.kicklen).to_owned();
        for target in targets.split(',').filter(|target| !target.is_empty()) {
            let _ = self.kick_one(ctx.id, ctx.rb, channel_name, target, &reason);
        }
        self.remove_channel_if_empty(channel_name);
        Ok(())
    }

    fn kick_one(&mut self, id: usize, rb: &mut ReplyBuffer, channel_name: &str, target: &str,
                reason: &str) -> Result
    {
        let (target_id, _) = find_nick(id, rb, &self.clients, target)?;
        let channel = find_channel(id, rb, &self.channels, channel_name)?;
        if !channel.is_member(target_id) {
            log::debug!("{}:     {} not on channel", id, target);
            rb.reply(rpl::ERR_USERNOTINCHANNEL)
                .param(target)
                .param(channel_name)
                .trailing_param(lines::USER_NOT_IN_CHANNEL);
            return Err(());
        }

        self.broadcast_from(id, rb, channel_name, Command::Kick, |msg| {
            msg.param(channel_name).param(target).trailing_param(reason);
        });
        if let Some(channel) = self.channels.get_mut(channel_name) {
            channel.remove_member(target_id);
        }
        Ok(())
    }

    // LIST

    pub fn cmd_list(&mut self, ctx: CommandContext<'_>, params: &[&str]) -> Result {
        ctx.rb.reply(rpl::LISTSTART).param("Channel").trailing_param(lines::LIST_START);
        match params.first().filter(|targets| !targets.is_empty()) {
            None => {
                for (name, channel) in &self.channels {
                    channel.list_entry(ctx.rb.reply(rpl::LIST).param(name));
                }
            }
            Some(targets) => {
                for name in targets.split(',') {
                    if let Some(channel) = self.channels.get(name) {
                        channel.list_entry(ctx.rb.reply(rpl::LIST).param(name));
                    }
                }
            }
        }
        ctx.rb.reply(rpl::LISTEND).trailing_param(lines::END_OF_LIST);
        Ok(())
    }

    // MODE

    pub fn cmd_mode(&mut self, ctx: CommandContext<'_>, params: &[&str]) -> Result {
        let target = params[0];
        let channel = find_channel(ctx.id, ctx.rb, &self.channels, target)?;
        if params.len() < 2 {
            channel.modes(ctx.rb.reply(rpl::CHANNELMODEIS).param(target));
            return Ok(());
        }
        let modes = find_member(ctx.id, ctx.rb, channel, target)?;
        if !modes.operator {
            log::debug!("{}:     not operator", ctx.id);
            ctx.rb.reply(rpl::ERR_CHANOPRIVSNEEDED)
                .param(target)
                .trailing_param(lines::CHAN_O_PRIVS_NEEDED);
            return Err(());
        }

        let before = channel.mode_snapshot();
        let mut touched = Vec::new();
        let clients = &self.clients;
        let channel = match self.channels.get_mut(target) {
            Some(channel) => channel,
            None => return Err(()),
        };
        for change in mode::channel_query(params[1], &params[2..]) {
            let change = match change {
                Ok(change) => change,
                Err(mode::Error::Unknown(letter, _)) => {
                    ctx.rb.reply(rpl::ERR_UNKNOWNMODE)
                        .fmt_param(letter)
                        .trailing_param(lines::UNKNOWN_MODE);
                    continue;
                }
                Err(mode::Error::MissingParam(letter, value)) => {
                    ctx.rb.reply(rpl::ERR_NEEDMOREPARAMS)
                        .param(Command::Mode.as_str())
                        .fmt_param(format_args!("{}{}", if value {'+'} else {'-'}, letter))
                        .trailing_param(lines::NEED_MORE_PARAMS);
                    continue;
                }
            };
            let id_of = |nick: &str| registered_client(clients, nick).map(|(id, _)| id);
            match channel.apply_mode_change(change, id_of) {
                Ok(Some(key)) => {
                    log::debug!("{}:     applied {:?}", ctx.id, change);
                    if !touched.contains(&key) {
                        touched.push(key);
                    }
                }
                Ok(None) => {}
                Err(rpl::ERR_NOSUCHNICK) => {
                    ctx.rb.reply(rpl::ERR_NOSUCHNICK)
                        .param(change.param().unwrap_or(""))
                        .trailing_param(lines::NO_SUCH_NICK);
                }
                Err(rpl::ERR_USERNOTINCHANNEL) => {
                    ctx.rb.reply(rpl::ERR_USERNOTINCHANNEL)
                        .param(change.param().unwrap_or(""))
                        .param(target)
                        .trailing_param(lines::USER_NOT_IN_CHANNEL);
                }
                Err(rpl::ERR_INVALIDMODEPARAM) => {
                    ctx.rb.reply(rpl::ERR_INVALIDMODEPARAM)
                        .param(target)
                        .param("l")
                        .param(change.param().unwrap_or(""))
                        .trailing_param(lines::INVALID_LIMIT);
                }
                Err(_) => {}
            }
        }

        let mut applied_modes = String::new();
        let mut applied_params = Vec::new();
        let mut sign = None;
        for (value, key) in channel.changed_modes(&before, &touched) {
            if sign != Some(value) {
                applied_modes.push(if value {'+'} else {'-'});
                sign = Some(value);
            }
            match key {
                ModeKey::InviteOnly => applied_modes.push('i'),
                ModeKey::TopicRestricted => applied_modes.push('t'),
                ModeKey::Key => {
                    applied_modes.push('k');
                    if let Some(ref key) = channel.key {
                        applied_params.push(key.clone());
                    }
                }
                ModeKey::UserLimit => {
                    applied_modes.push('l');
                    if let Some(user_limit) = channel.user_limit {
                        applied_params.push(user_limit.to_string());
                    }
                }
                ModeKey::Operator(member) => {
                    applied_modes.push('o');
                    if let Some(client) = clients.get(member) {
                        applied_params.push(client.nick().to_owned());
                    }
                }
            }
        }
        if applied_modes.is_empty() {
            return Ok(());
        }

        self.broadcast_from(ctx.id, ctx.rb, target, Command::Mode, |msg| {
            let mut msg = msg.param(target).param(&applied_modes);
            for param in &applied_params {
                msg = msg.param(param);
            }
        });
        Ok(())
    }

    // MOTD

    pub fn cmd_motd(&mut self, ctx: CommandContext<'_>, _params: &[&str]) -> Result {
        self.write_motd(ctx.rb);
        Ok(())
    }

    // NICK

    pub fn cmd_nick(&mut self, ctx: CommandContext<'_>, params: &[&str]) -> Result {
        let nick = params.first().copied().unwrap_or("");
        if nick.is_empty() {
            ctx.rb.reply(rpl::ERR_NONICKNAMEGIVEN).trailing_param(lines::NO_NICKNAME_GIVEN);
            return Err(());
        }
        if !util::is_valid_nickname(nick) {
            log::debug!("{}:     invalid nickname", ctx.id);
            ctx.rb.reply(rpl::ERR_ERRONEUSNICKNAME)
                .param(nick)
                .trailing_param(lines::ERRONEOUS_NICKNAME);
            return Err(());
        }
        match self.client_by_nick(nick) {
            Some(other) if other != ctx.id => {
                log::debug!("{}:     nickname in use", ctx.id);
                ctx.rb.reply(rpl::ERR_NICKNAMEINUSE)
                    .param(nick)
                    .trailing_param(lines::NICKNAME_IN_USE);
                return Err(());
            }
            Some(_) => return Ok(()),
            None => {}
        }

        let client = &mut self.clients[ctx.id];
        let old_name = client.full_name().to_owned();
        client.set_nick(nick);
        ctx.rb.set_nick(nick);

        if !client.is_registered() {
            self.try_register(ctx.id, ctx.rb);
            return Ok(());
        }

        log::debug!("{}:     {:?} is now {:?}", ctx.id, old_name, nick);
        ctx.rb.message(&old_name, Command::Nick).param(nick);
        let mut response = Buffer::new();
        response.message(&old_name, Command::Nick).param(nick);
        let msg = MessageQueueItem::from(response);

        let mut notified = HashSet::new();
        notified.insert(ctx.id);
        for channel in self.channels.values().filter(|channel| channel.is_member(ctx.id)) {
            for &member in channel.members.keys() {
                if notified.insert(member) {
                    self.send(member, msg.clone());
                }
            }
        }
        Ok(())
    }

    // NOTICE

    pub fn cmd_notice(&mut self, ctx: CommandContext<'_>, params: &[&str]) -> Result {
        self.send_text(ctx, Command::Notice, params[0], params[1])
    }

    // PART

    pub fn cmd_part(&mut self, ctx: CommandContext<'_>, params: &[&str]) -> Result {
        let reason = params.get(1).copied().filter(|reason| !reason.is_empty());
        for channel_name in params[0].split(',').filter(|name| !name.is_empty()) {
            let _ = self.part_one(ctx.id, ctx.rb, channel_name, reason);
        }
        Ok(())
    }

    fn part_one(&mut self, id: usize, rb: &mut ReplyBuffer, channel_name: &str,
                reason: Option<&str>) -> Result
    {
        let channel = find_channel(id, rb, &self.channels, channel_name)?;
        find_member(id, rb, channel, channel_name)?;

        self.broadcast_from(id, rb, channel_name, Command::Part, |msg| {
            let msg = msg.param(channel_name);
            if let Some(reason) = reason {
                msg.trailing_param(reason);
            }
        });
        if let Some(channel) = self.channels.get_mut(channel_name) {
            channel.remove_member(id);
        }
        self.remove_channel_if_empty(channel_name);
        Ok(())
    }

    /// JOIN 0
    fn cmd_part_all(&mut self, ctx: CommandContext<'_>) -> Result {
        for (channel_name, channel) in &self.channels {
            if channel.is_member(ctx.id) {
                self.broadcast_from(ctx.id, ctx.rb, channel_name, Command::Part, |msg| {
                    msg.param(channel_name);
                });
            }
        }
        self.remove_from_all_channels(ctx.id);
        Ok(())
    }

    // PASS

    pub fn cmd_pass(&mut self, ctx: CommandContext<'_>, params: &[&str]) -> Result {
        let password = params[0];
        let client = &mut self.clients[ctx.id];
        if client.authenticated {
            ctx.rb.reply(rpl::ERR_ALREADYREGISTRED).trailing_param(lines::ALREADY_REGISTERED);
            return Err(());
        }

        if password == self.password {
            client.authenticated = true;
        } else if self.bot_password.as_deref() == Some(password) {
            log::info!("{}: Authenticated as a bot", ctx.id);
            client.authenticated = true;
            client.is_bot = true;
        } else {
            log::debug!("{}:     wrong password", ctx.id);
            ctx.rb.reply(rpl::ERR_PASSWDMISMATCH).trailing_param(lines::PASSWORD_MISMATCH);
            return Err(());
        }

        self.try_register(ctx.id, ctx.rb);
        Ok(())
    }

    // PING

    pub fn cmd_ping(&mut self, ctx: CommandContext<'_>, params: &[&str]) -> Result {
        let token = match params.first() {
            Some(token) if !token.is_empty() => token,
            _ => {
                ctx.rb.reply(rpl::ERR_NOORIGIN).trailing_param(lines::NO_ORIGIN);
                return Err(());
            }
        };
        ctx.rb.prefixed_message(Command::Pong).param(&self.domain).trailing_param(token);
        Ok(())
    }

    // PONG

    pub fn cmd_pong(&mut self, _ctx: CommandContext<'_>, _params: &[&str]) -> Result {
        Ok(())
    }

    // PRIVMSG

    pub fn cmd_privmsg(&mut self, ctx: CommandContext<'_>, params: &[&str]) -> Result {
        self.send_text(ctx, Command::PrivMsg, params[0], params[1])
    }

    /// Handles both PRIVMSG and NOTICE.  Errors are not reported for NOTICE.
    fn send_text(&mut self, ctx: CommandContext<'_>, command: Command, targets: &str,
                 text: &str) -> Result
    {
        if text.is_empty() {
            ctx.rb.reply(rpl::ERR_NOTEXTTOSEND).trailing_param(lines::NO_TEXT_TO_SEND);
            return Err(());
        }
        for target in targets.split(',').filter(|target| !target.is_empty()) {
            let _ = self.send_text_one(ctx.id, ctx.rb, command, target, text);
        }
        Ok(())
    }

    fn send_text_one(&self, id: usize, rb: &mut ReplyBuffer, command: Command, target: &str,
                     text: &str) -> Result
    {
        let is_notice = command == Command::Notice;
        let client = &self.clients[id];

        if util::is_channel_name(target) {
            let channel = match self.channels.get(target) {
                Some(channel) => channel,
                None => {
                    if !is_notice {
                        rb.reply(rpl::ERR_NOSUCHCHANNEL)
                            .param(target)
                            .trailing_param(lines::NO_SUCH_CHANNEL);
                    }
                    return Err(());
                }
            };
            if !channel.is_member(id) {
                log::debug!("{}:     not on channel", id);
                if !is_notice {
                    rb.reply(rpl::ERR_CANNOTSENDTOCHAN)
                        .param(target)
                        .trailing_param(lines::CANNOT_SEND_TO_CHAN);
                }
                return Err(());
            }
            let mut response = Buffer::new();
            response.message(client.full_name(), command).param(target).trailing_param(text);
            self.broadcast_to_channel(target, &MessageQueueItem::from(response), Some(id));
            return Ok(());
        }

        let recipient = match registered_client(&self.clients, target) {
            Some((_, recipient)) => recipient,
            None => {
                if !is_notice {
                    rb.reply(rpl::ERR_NOSUCHNICK).param(target).trailing_param(lines::NO_SUCH_NICK);
                }
                return Err(());
            }
        };
        let mut response = Buffer::new();
        response.message(client.full_name(), command).param(target).trailing_param(text);
        if let (Command::PrivMsg, Some(file)) = (command, dcc_send_file(text)) {
            log::debug!("{}:     file offer {:?}", id, file);
            response.message(&self.domain, Command::Notice)
                .param(target)
                .fmt_trailing_param(lines_file_offer!(client.nick(), file));
        }
        recipient.send(response);
        Ok(())
    }

    // QUIT

    pub fn cmd_quit(&mut self, ctx: CommandContext<'_>, params: &[&str]) -> Result {
        let reason = params.first().copied().filter(|reason| !reason.is_empty());
        let client = &mut self.clients[ctx.id];
        client.send_error(reason.unwrap_or(lines::QUIT));
        client.set_quit();
        log::info!("{}: Quit ({})", ctx.id, reason.unwrap_or(lines::QUIT));

        let msg = match reason {
            Some(reason) => quit_message(client, &lines_quit!(reason).to_string()),
            None => quit_message(client, lines::QUIT),
        };
        self.remove_client(ctx.id, msg);
        Ok(())
    }

    // TOPIC

    pub fn cmd_topic(&mut self, ctx: CommandContext<'_>, params: &[&str]) -> Result {
        let channel_name = params[0];
        let channel = find_channel(ctx.id, ctx.rb, &self.channels, channel_name)?;
        let is_operator = find_member(ctx.id, ctx.rb, channel, channel_name)?.operator;
        let topic = match params.get(1) {
            Some(topic) => *topic,
            None => {
                self.write_topic(ctx.rb, channel_name);
                return Ok(());
            }
        };

        if channel.topic_restricted && !is_operator {
            log::debug!("{}:     not operator", ctx.id);
            ctx.rb.reply(rpl::ERR_CHANOPRIVSNEEDED)
                .param(channel_name)
                .trailing_param(lines::CHAN_O_PRIVS_NEEDED);
            return Err(());
        }

        let topic = util::truncate(topic, self.topiclen);
        self.broadcast_from(ctx.id, ctx.rb, channel_name, Command::Topic, |msg| {
            msg.param(channel_name).trailing_param(topic);
        });
        if let Some(channel) = self.channels.get_mut(channel_name) {
            channel.topic = if topic.is_empty() { None } else { Some(topic.to_owned()) };
        }
        Ok(())
    }

    // USER

    pub fn cmd_user(&mut self, ctx: CommandContext<'_>, params: &[&str]) -> Result {
        let client = &mut self.clients[ctx.id];
        if client.has_user() {
            ctx.rb.reply(rpl::ERR_ALREADYREGISTRED).trailing_param(lines::ALREADY_REGISTERED);
            return Err(());
        }
        let (user, real) = (params[0], params[3]);
        if user.is_empty() {
            ctx.rb.reply(rpl::ERR_NEEDMOREPARAMS)
                .param(Command::User.as_str())
                .trailing_param(lines::NEED_MORE_PARAMS);
            return Err(());
        }

        client.set_user_real(user, real);
        self.try_register(ctx.id, ctx.rb);
        Ok(())
    }

    // WHO

    pub fn cmd_who(&mut self, ctx: CommandContext<'_>, params: &[&str]) -> Result {
        let mask = params.first().copied().unwrap_or("");
        match mask {
            "" | "*" | "0" => {
                for (_, client) in &self.clients {
                    if client.is_registered() && !client.has_quit() {
                        self.write_who(ctx.rb, "*", client, None);
                    }
                }
            }
            channel_name if util::is_channel_name(channel_name) => {
                if let Some(channel) = self.channels.get(channel_name) {
                    for (&member, modes) in &channel.members {
                        if let Some(client) = self.clients.get(member) {
                            self.write_who(ctx.rb, channel_name, client, modes.symbol());
                        }
                    }
                }
            }
            nick => {
                if let Some((_, client)) = registered_client(&self.clients, nick) {
                    self.write_who(ctx.rb, "*", client, None);
                }
            }
        }
        ctx.rb.reply(rpl::ENDOFWHO)
            .param(if mask.is_empty() { "*" } else { mask })
            .trailing_param(lines::END_OF_WHO);
        Ok(())
    }

    fn write_who(&self, rb: &mut ReplyBuffer, channel_name: &str, client: &Client,
                 symbol: Option<char>)
    {
        let mut msg = rb.reply(rpl::WHOREPLY)
            .param(channel_name)
            .param(client.user())
            .param(HOST)
            .param(&self.domain)
            .param(client.nick());
        {
            let flags = msg.raw_param();
            flags.push('H');
            if let Some(symbol) = symbol {
                flags.push(symbol);
            }
        }
        msg.fmt_trailing_param(format_args!("0 {}", client.real()));
    }

    // WHOIS

    pub fn cmd_whois(&mut self, ctx: CommandContext<'_>, params: &[&str]) -> Result {
        let (target_id, target) = find_nick(ctx.id, ctx.rb, &self.clients, params[0])?;

        ctx.rb.reply(rpl::WHOISUSER)
            .param(target.nick())
            .param(target.user())
            .param(HOST)
            .param("*")
            .trailing_param(target.real());

        let mut channels = self.channels.iter()
            .filter(|(_, channel)| channel.is_member(target_id))
            .peekable();
        if channels.peek().is_some() {
            let mut msg = ctx.rb.reply(rpl::WHOISCHANNELS).param(target.nick());
            let trailing = msg.raw_trailing_param();
            for (name, channel) in channels {
                if channel.is_operator(target_id) {
                    trailing.push('@');
                }
                trailing.push_str(name);
                trailing.push(' ');
            }
            trailing.pop();
        }

        ctx.rb.reply(rpl::ENDOFWHOIS)
            .param(target.nick())
            .trailing_param(lines::END_OF_WHOIS);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dcc_send_file() {
        assert_eq!(dcc_send_file("\x01DCC SEND notes.txt 2130706433 5000 42\x01"), Some("notes.txt"));
        assert_eq!(dcc_send_file("\x01DCC SEND notes.txt\x01"), Some("notes.txt"));
        assert_eq!(dcc_send_file("\x01DCC SEND \x01"), None);
        assert_eq!(dcc_send_file("\x01ACTION waves\x01"), None);
        assert_eq!(dcc_send_file("DCC SEND notes.txt"), None);
    }
} // mod tests
