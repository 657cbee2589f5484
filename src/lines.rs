//
// Network messages
//

pub const CONNECTION_RESET: &str = "Connection reset by peer";

pub const SHUTTING_DOWN: &str = "server shutting down";

pub const INPUT_TOO_LONG: &str = "Input line too long";

#[macro_export]
macro_rules! lines_closing_link {
    ( $reason:expr ) => {
        format_args!("Closing link ({})", $reason)
    };
}

#[macro_export]
macro_rules! lines_quit {
    ( $reason:expr ) => {
        format_args!("Quit: {}", $reason)
    };
}

pub const QUIT: &str = "Quit";

#[macro_export]
macro_rules! lines_file_offer {
    ( $sender:expr, $file:expr ) => {
        format_args!("\x02File Transfer Offer\x02 - {} wants to send you: \x02{}\x02", $sender, $file)
    };
}

//
// IRC replies
//

pub const ALREADY_REGISTERED: &str = "You may not reregister";

pub const BAD_CHAN_KEY: &str = "Cannot join channel (+k)";

pub const CANNOT_SEND_TO_CHAN: &str = "Cannot send to channel";

pub const CHAN_O_PRIVS_NEEDED: &str = "You're not channel operator";

pub const CHANNEL_IS_FULL: &str = "Cannot join channel (+l)";

pub const END_OF_LIST: &str = "End of /LIST";

pub const END_OF_MOTD: &str = "End of MOTD command.";

pub const END_OF_NAMES: &str = "End of /NAMES list.";

pub const END_OF_WHO: &str = "End of WHO list";

pub const END_OF_WHOIS: &str = "End of WHOIS list";

pub const ERRONEOUS_NICKNAME: &str = "Erroneous nickname";

pub const INVALID_CAP_COMMAND: &str = "Invalid CAP command";

pub const INVALID_LIMIT: &str = "Invalid limit";

pub const INVITE_ONLY_CHAN: &str = "Cannot join channel (+i)";


pub const LIST_START: &str = "Users  Name";

pub const NEED_MORE_PARAMS: &str = "Not enough parameters";

pub const NICKNAME_IN_USE: &str = "Nickname is already in use";

pub const NO_MOTD: &str = "MOTD File is missing";

pub const NO_NICKNAME_GIVEN: &str = "No nickname given";

pub const NO_ORIGIN: &str = "No origin specified";

pub const NO_TEXT_TO_SEND: &str = "No text to send";

pub const NO_TOPIC: &str = "No topic is set";

pub const NO_SUCH_NICK: &str = "No such nick";

pub const NO_SUCH_CHANNEL: &str = "No such channel";

pub const NOT_ON_CHANNEL: &str = "You're not on that channel";

pub const NOT_REGISTERED: &str = "You have not registered";

pub const PASSWORD_MISMATCH: &str = "Password incorrect!";

pub const UNKNOWN_COMMAND: &str = "Unknown command";

pub const UNKNOWN_MODE: &str = "is unknown mode char to me";

pub const USER_NOT_IN_CHANNEL: &str = "They aren't on that channel";

pub const USER_ON_CHANNEL: &str = "is already on channel";

#[macro_export]
macro_rules! lines_no_recipient {
    ( $command:expr ) => {
        format_args!("No recipient given ({})", $command)
    };
}

//
// Welcome messages
//

#[macro_export]
macro_rules! lines_welcome {
    ( $name:expr ) => {
        format_args!("Welcome to the Internet Relay Network {}", $name)
    };
}

#[macro_export]
macro_rules! lines_your_host {
    ( $host:expr, $version:expr ) => {
        format_args!("Your host is {}, running version {}", $host, $version)
    };
}

#[macro_export]
macro_rules! lines_created {
    ( $since:expr ) => {
        format_args!("This server was created {}", $since)
    };
}

#[macro_export]
macro_rules! lines_motd_start {
    ( $domain:expr ) => {
        format_args!("- {} Message of the day -", $domain)
    };
}

/// Sent when no MOTD file is configured.
pub const DEFAULT_MOTD: &str = "\
Welcome aboard!
This server speaks a practical subset of IRC:
  JOIN, PART, TOPIC, INVITE, KICK and MODE (+itkol) for channels,
  PRIVMSG and NOTICE for talking, WHO, WHOIS and LIST to look around.
Be nice to each other.";
