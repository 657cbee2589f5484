use parleyd_tokens::{mode, rpl, MessageBuffer};
use std::collections::{HashMap, HashSet};

/// Modes applied to clients on a per-channel basis.
///
/// https://tools.ietf.org/html/rfc2811.html#section-4.1
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct MemberModes {
    pub operator: bool,
}

impl MemberModes {
    pub fn symbol(&self) -> Option<char> {
        if self.operator {
            Some('@')
        } else {
            None
        }
    }
}

/// Identifies one mode of a channel, or the operator status of one of its members.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ModeKey {
    InviteOnly,
    TopicRestricted,
    Key,
    UserLimit,
    Operator(usize),
}

/// The modes of a channel at a given time.  Used to compute the net effect of a MODE command.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ModeSnapshot {
    invite_only: bool,
    topic_restricted: bool,
    key: Option<String>,
    user_limit: Option<usize>,
    operators: HashSet<usize>,
}

/// Channel data.
#[derive(Debug)]
pub struct Channel {
    /// Set of channel members, identified by their client id, and associated with their channel
    /// mode.
    pub members: HashMap<usize, MemberModes>,

    /// The topic.
    pub topic: Option<String>,

    pub user_limit: Option<usize>,
    pub key: Option<String>,

    /// Nicknames that may join once while the channel is invite-only.
    pub invited: HashSet<String>,

    // Modes: https://tools.ietf.org/html/rfc2811.html#section-4.2
    pub invite_only: bool,
    pub topic_restricted: bool,
}

impl Default for Channel {
    fn default() -> Self {
        Self::new()
    }
}

impl Channel {
    /// Creates a channel with the 't' mode set.
    pub fn new() -> Channel {
        Channel {
            members: HashMap::new(),
            topic: None,
            user_limit: None,
            key: None,
            invited: HashSet::new(),
            invite_only: false,
            topic_restricted: true,
        }
    }

    /// Adds a member with the default mode.  The first member of a channel is its operator.
    pub fn add_member(&mut self, id: usize) {
        let modes = MemberModes {
            operator: self.members.is_empty(),
        };
        self.members.insert(id, modes);
    }

    /// Removes a member.  Returns whether it was in the channel.
    pub fn remove_member(&mut self, id: usize) -> bool {
        self.members.remove(&id).is_some()
    }

    pub fn is_member(&self, id: usize) -> bool {
        self.members.contains_key(&id)
    }

    pub fn is_operator(&self, id: usize) -> bool {
        self.members.get(&id).map_or(false, |modes| modes.operator)
    }

    pub fn is_full(&self) -> bool {
        self.user_limit.map_or(false, |limit| limit <= self.members.len())
    }

    pub fn is_invited(&self, nick: &str) -> bool {
        self.invited.contains(nick)
    }

    pub fn list_entry(&self, msg: MessageBuffer<'_>) {
        msg.fmt_param(self.members.len())
            .trailing_param(self.topic.as_deref().unwrap_or(""));
    }

    /// Writes the channel modes, followed by the key and the user limit.
    pub fn modes(&self, mut out: MessageBuffer<'_>) {
        let modes = out.raw_param();
        modes.push('+');
        if self.invite_only { modes.push('i'); }
        if self.topic_restricted { modes.push('t'); }
        if self.key.is_some() { modes.push('k'); }
        if self.user_limit.is_some() { modes.push('l'); }
        if let Some(ref key) = self.key {
            out = out.param(key);
        }
        if let Some(user_limit) = self.user_limit {
            out.fmt_param(user_limit);
        }
    }

    /// Applies a change of the channel modes.
    ///
    /// Returns `Ok(Some(key))` when the change has modified the channel, `Ok(None)` when it was a
    /// no-op, and `Err(reply)` with the error to send back otherwise.  `id_of` resolves the
    /// nickname of `+o` and `-o` changes.
    pub fn apply_mode_change<F>(&mut self, change: mode::ChannelChange<'_>,
                                id_of: F) -> Result<Option<ModeKey>, &'static str>
        where F: Fn(&str) -> Option<usize>
    {
        use mode::ChannelChange::*;
        let (applied, key) = match change {
            InviteOnly(value) => {
                let applied = self.invite_only != value;
                self.invite_only = value;
                (applied, ModeKey::InviteOnly)
            }
            TopicRestricted(value) => {
                let applied = self.topic_restricted != value;
                self.topic_restricted = value;
                (applied, ModeKey::TopicRestricted)
            }
            Key(Some(key)) => {
                let applied = self.key.as_deref() != Some(key);
                self.key = Some(key.to_owned());
                (applied, ModeKey::Key)
            }
            Key(None) => (self.key.take().is_some(), ModeKey::Key),
            UserLimit(Some(s)) => {
                let limit = match s.parse::<usize>() {
                    Ok(limit) if 0 < limit => limit,
                    _ => return Err(rpl::ERR_INVALIDMODEPARAM),
                };
                let applied = self.user_limit != Some(limit);
                self.user_limit = Some(limit);
                (applied, ModeKey::UserLimit)
            }
            UserLimit(None) => (self.user_limit.take().is_some(), ModeKey::UserLimit),
            ChangeOperator(value, nick) => {
                let id = id_of(nick).ok_or(rpl::ERR_NOSUCHNICK)?;
                let modes = self.members.get_mut(&id).ok_or(rpl::ERR_USERNOTINCHANNEL)?;
                let applied = modes.operator != value;
                modes.operator = value;
                (applied, ModeKey::Operator(id))
            }
        };
        Ok(if applied { Some(key) } else { None })
    }

    pub fn mode_snapshot(&self) -> ModeSnapshot {
        ModeSnapshot {
            invite_only: self.invite_only,
            topic_restricted: self.topic_restricted,
            key: self.key.clone(),
            user_limit: self.user_limit,
            operators: self.members.iter()
                .filter(|(_, modes)| modes.operator)
                .map(|(id, _)| *id)
                .collect(),
        }
    }

    /// Returns, in order, the modes among `touched` that differ from `before`, each with whether
    /// it is now set.
    pub fn changed_modes(&self, before: &ModeSnapshot, touched: &[ModeKey]) -> Vec<(bool, ModeKey)> {
        touched.iter()
            .filter_map(|&key| {
                let (changed, now) = match key {
                    ModeKey::InviteOnly => (before.invite_only != self.invite_only,
                                            self.invite_only),
                    ModeKey::TopicRestricted => (before.topic_restricted != self.topic_restricted,
                                                 self.topic_restricted),
                    ModeKey::Key => (before.key != self.key, self.key.is_some()),
                    ModeKey::UserLimit => (before.user_limit != self.user_limit,
                                           self.user_limit.is_some()),
                    ModeKey::Operator(id) => (before.operators.contains(&id) != self.is_operator(id),
                                              self.is_operator(id)),
                };
                if changed { Some((now, key)) } else { None }
            })
            .collect()
    }
}

// mod tests
