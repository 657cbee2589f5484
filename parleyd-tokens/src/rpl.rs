//! The list of IRC replies parleyd sends.
//!
//! Each reply must have the client's nick (or `*` before the client has one) as first parameter.
//!
//! Sources:
//!
//! - <https://tools.ietf.org/html/rfc2812.html#section-5>
//! - <https://modern.ircdocs.horse/#numerics>

pub const WELCOME: &str   = "001";  // :Welcome message
pub const YOURHOST: &str  = "002";  // :Your host is...
pub const CREATED: &str   = "003";  // :This server was created...
pub const MYINFO: &str    = "004";  // <servername> <version> <umodes> <chan modes>

pub const WHOISUSER: &str     = "311";  // <nick> <user> <host> * :<realname>
pub const ENDOFWHO: &str      = "315";  // <name> :End of WHO list
pub const ENDOFWHOIS: &str    = "318";  // <nick> :End of WHOIS list
pub const WHOISCHANNELS: &str = "319";  // <nick> :*( (@) <channel> " " )
pub const LISTSTART: &str     = "321";  // Channel :Users  Name
pub const LIST: &str          = "322";  // <channel> <# of visible members> <topic>
pub const LISTEND: &str       = "323";  // :End of list
pub const CHANNELMODEIS: &str = "324";  // <channel> <modes> <mode params>
pub const NOTOPIC: &str       = "331";  // <channel> :No topic set
pub const TOPIC: &str         = "332";  // <channel> <topic>
pub const INVITING: &str      = "341";  // <nick> <channel>
pub const WHOREPLY: &str      = "352";  // <channel> <user> <host> <server> <nick> "H" ["@"] :<hop count> <realname>
pub const NAMREPLY: &str      = "353";  // = <channel> :1*(@/ /user)
pub const ENDOFNAMES: &str    = "366";  // <channel> :End of names list
pub const MOTD: &str          = "372";  // :- <text>
pub const MOTDSTART: &str     = "375";  // :- <servername> Message of the day -
pub const ENDOFMOTD: &str     = "376";  // :End of MOTD command

pub const ERR_NOSUCHNICK: &str       = "401";  // <nick> :No such nick
pub const ERR_NOSUCHCHANNEL: &str    = "403";  // <channel> :No such channel
pub const ERR_CANNOTSENDTOCHAN: &str = "404";  // <channel> :Cannot send to channel
pub const ERR_NOORIGIN: &str         = "409";  // :No origin specified
pub const ERR_INVALIDCAPCMD: &str    = "410";  // <command> :Invalid CAP command
pub const ERR_NORECIPIENT: &str      = "411";  // :No recipient given (<command>)
pub const ERR_NOTEXTTOSEND: &str     = "412";  // :No text to send
pub const ERR_UNKNOWNCOMMAND: &str   = "421";  // <command> :Unknown command
pub const ERR_NOMOTD: &str           = "422";  // :MOTD file missing
pub const ERR_NONICKNAMEGIVEN: &str  = "431";  // :No nickname given
pub const ERR_ERRONEUSNICKNAME: &str = "432";  // <nick> :Erroneous nickname
pub const ERR_NICKNAMEINUSE: &str    = "433";  // <nick> :Nickname in use
pub const ERR_USERNOTINCHANNEL: &str = "441";  // <nick> <channel> :They aren't on that channel
pub const ERR_NOTONCHANNEL: &str     = "442";  // <channel> :You're not on that channel
pub const ERR_USERONCHANNEL: &str    = "443";  // <user> <channel> :is already on channel
pub const ERR_NOTREGISTERED: &str    = "451";  // :You have not registered
pub const ERR_NEEDMOREPARAMS: &str   = "461";  // <command> :Not enough parameters
pub const ERR_ALREADYREGISTRED: &str = "462";  // :You may not reregister
pub const ERR_PASSWDMISMATCH: &str   = "464";  // :Password incorrect
pub const ERR_KEYSET: &str           = "467";  // <channel> :Channel key already set
pub const ERR_CHANNELISFULL: &str    = "471";  // <channel> :Cannot join channel (+l)
pub const ERR_UNKNOWNMODE: &str      = "472";  // <char> :is unknown mode char to me
pub const ERR_INVITEONLYCHAN: &str   = "473";  // <channel> :Cannot join channel (+i)
pub const ERR_BADCHANKEY: &str       = "475";  // <channel> :Cannot join channel (+k)
pub const ERR_CHANOPRIVSNEEDED: &str = "482";  // <channel> :You're not channel operator

pub const ERR_INVALIDMODEPARAM: &str = "696";  // <target> <mode char> <param> :<description>
