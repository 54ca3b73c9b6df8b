//! Operator command tokens
//!
//! Commands travel as single UTF-8 datagrams. The device, not the ground
//! station, is the authority on validity, so parsing is total: tokens outside
//! the known set are carried through verbatim as [`Command::Raw`].

use std::fmt;

/// One outbound command
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    LedOn,
    LedOff,
    DeploySolar,
    RetractSolar,
    AutoSolar,
    Ping,
    /// Unrecognized token, forwarded as-is
    Raw(String),
}

impl Command {
    /// Parse a token (never fails)
    pub fn parse(token: &str) -> Self {
        match token {
            "LED_ON" => Command::LedOn,
            "LED_OFF" => Command::LedOff,
            "DEPLOY_SOLAR" => Command::DeploySolar,
            "RETRACT_SOLAR" => Command::RetractSolar,
            "AUTO_SOLAR" => Command::AutoSolar,
            "PING" => Command::Ping,
            other => Command::Raw(other.to_string()),
        }
    }

    /// Wire token for this command
    pub fn token(&self) -> &str {
        match self {
            Command::LedOn => "LED_ON",
            Command::LedOff => "LED_OFF",
            Command::DeploySolar => "DEPLOY_SOLAR",
            Command::RetractSolar => "RETRACT_SOLAR",
            Command::AutoSolar => "AUTO_SOLAR",
            Command::Ping => "PING",
            Command::Raw(token) => token,
        }
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.token())
    }
}
