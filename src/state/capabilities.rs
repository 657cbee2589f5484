//! Handler for the CAP command
//!
//! parleyd supports no capability.  It answers CAP so that clients that start with `CAP LS` can
//! proceed with the registration.
//!
//! Link to the capabilities specification: <https://ircv3.net/specs/core/capability-negotiation>

use super::{CommandContext, HandlerResult as Result};
use crate::lines;
use parleyd_tokens::{rpl, Command};

impl super::StateInner {
    pub fn cmd_cap(&mut self, ctx: CommandContext<'_>, params: &[&str]) -> Result {
        let nick = self.clients[ctx.id].nick();
        let subcommand = params[0].to_ascii_uppercase();
        match subcommand.as_str() {
            "END" => Ok(()),
            "LS" | "LIST" => {
                ctx.rb.prefixed_message(Command::Cap)
                    .param(nick)
                    .param(&subcommand)
                    .trailing_param("");
                Ok(())
            }
            "REQ" => {
                let capabilities = params.get(1).copied().unwrap_or("");
                log::debug!("{}:     refusing capabilities {:?}", ctx.id, capabilities);
                ctx.rb.prefixed_message(Command::Cap)
                    .param(nick)
                    .param("NAK")
                    .trailing_param(capabilities);
                Ok(())
            }
            _ => {
                log::debug!("{}:     bad CAP subcommand {:?}", ctx.id, params[0]);
                ctx.rb.reply(rpl::ERR_INVALIDCAPCMD)
                    .param(params[0])
                    .trailing_param(lines::INVALID_CAP_COMMAND);
                Err(())
            }
        }
    }
}
