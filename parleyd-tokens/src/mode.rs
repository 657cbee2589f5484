//! Mode parsing and validation

use std::str;

/// Channel modes supported by parleyd.  Advertised in welcome messages.
pub const CHAN_MODES: &str = "iklot";

/// Iterator over the modes of a string.
struct SimpleQuery<'a> {
    modes: str::Chars<'a>,
    value: bool,
}

impl<'a> SimpleQuery<'a> {
    pub fn new(modes: &'a str) -> Self {
        Self {
            modes: modes.chars(),
            value: true,
        }
    }
}

impl Iterator for SimpleQuery<'_> {
    type Item = (bool, char);

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            match self.modes.next()? {
                '+' => self.value = true,
                '-' => self.value = false,
                c => return Some((self.value, c)),
            }
        }
    }
}

/// `channel_query` related errors.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Error {
    /// One of the modes in the query is unknown.
    Unknown(char, bool),

    /// A mode is missing its required parameter.
    MissingParam(char, bool),
}

/// Alias to std's Result using this module's Error.
pub type Result<T> = std::result::Result<T, Error>;

/// Item of a channel mode query.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ChannelChange<'a> {
    InviteOnly(bool),
    TopicRestricted(bool),
    Key(Option<&'a str>),
    UserLimit(Option<&'a str>),
    ChangeOperator(bool, &'a str),
}

impl ChannelChange<'_> {
    /// Whether this change is enabling or disabling a mode.
    pub fn value(&self) -> bool {
        use ChannelChange::*;
        match self {
            InviteOnly(v) | TopicRestricted(v) | ChangeOperator(v, _) => *v,
            Key(k) => k.is_some(),
            UserLimit(l) => l.is_some(),
        }
    }

    /// The letter of this mode change.
    pub fn symbol(&self) -> char {
        use ChannelChange::*;
        match self {
            InviteOnly(_) => 'i',
            TopicRestricted(_) => 't',
            Key(_) => 'k',
            UserLimit(_) => 'l',
            ChangeOperator(_, _) => 'o',
        }
    }

    /// The parameter of this mode change.
    pub fn param(&self) -> Option<&str> {
        use ChannelChange::*;
        match self {
            Key(p) | UserLimit(p) => *p,
            ChangeOperator(_, p) => Some(p),
            _ => None,
        }
    }
}

/// An iterator over the changes of a MODE query.
///
/// Parameters are consumed in order by `+k`, `+l`, `+o` and `-o`.  `-k` and `-l` take no
/// parameter.
///
/// # Example
///
/// ```rust
/// # use parleyd_tokens::mode::{self, Error, ChannelChange};
/// let mut query = mode::channel_query("-olX+kik", &["admin", "secret_key"]);
///
/// assert_eq!(query.next(), Some(Ok(ChannelChange::ChangeOperator(false, "admin"))));
/// assert_eq!(query.next(), Some(Ok(ChannelChange::UserLimit(None))));
/// assert_eq!(query.next(), Some(Err(Error::Unknown('X', false))));
/// assert_eq!(query.next(), Some(Ok(ChannelChange::Key(Some("secret_key")))));
/// assert_eq!(query.next(), Some(Ok(ChannelChange::InviteOnly(true))));
/// assert_eq!(query.next(), Some(Err(Error::MissingParam('k', true))));
/// assert_eq!(query.next(), None);
/// ```
pub fn channel_query<'a, I, S>(
    modes: &'a str,
    params: I,
) -> impl Iterator<Item = Result<ChannelChange<'a>>>
where
    I: IntoIterator<Item = &'a S> + 'a,
    S: AsRef<str> + 'a + ?Sized,
{
    let mut params = params
        .into_iter()
        .map(|p| p.as_ref())
        .filter(|p| !p.is_empty());
    SimpleQuery::new(modes).map(move |(value, mode)| {
        use ChannelChange::*;
        match mode {
            'i' => Ok(InviteOnly(value)),
            't' => Ok(TopicRestricted(value)),
            'k' if value => params
                .next()
                .map(|param| Key(Some(param)))
                .ok_or(Error::MissingParam('k', value)),
            'k' => Ok(Key(None)),
            'l' if value => params
                .next()
                .map(|param| UserLimit(Some(param)))
                .ok_or(Error::MissingParam('l', value)),
            'l' => Ok(UserLimit(None)),
            'o' => params
                .next()
                .map(|param| ChangeOperator(value, param))
                .ok_or(Error::MissingParam('o', value)),
            other => Err(Error::Unknown(other, value)),
        }
    })
}

// mod tests
