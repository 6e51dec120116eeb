//! Execution mode for operations that touch cloud resources
//!
//! - `auto`: the tool calls the cloud and control-plane APIs itself
//! - `manual`: the tool prints the equivalent commands for the user to run

use std::fmt;
use std::str::FromStr;
use thiserror::Error;

pub const MODES: [&str; 2] = ["auto", "manual"];

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Invalid mode. Allowed values are [{}]", MODES.join(" "))]
pub struct ModeError(pub String);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Mode {
    #[default]
    Auto,
    Manual,
}

impl Mode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Mode::Auto => "auto",
            Mode::Manual => "manual",
        }
    }
}

impl FromStr for Mode {
    type Err = ModeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "auto" => Ok(Mode::Auto),
            "manual" => Ok(Mode::Manual),
            other => Err(ModeError(other.to_string())),
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_known_modes() {
        assert_eq!("auto".parse::<Mode>(), Ok(Mode::Auto));
        assert_eq!("manual".parse::<Mode>(), Ok(Mode::Manual));
    }

    #[test]
    fn test_parse_unknown_mode_lists_allowed_values() {
        let err = "hosted".parse::<Mode>().unwrap_err();
        assert_eq!(
            err.to_string(),
            "Invalid mode. Allowed values are [auto manual]"
        );
    }

    #[test]
    fn test_default_is_auto() {
        assert_eq!(Mode::default(), Mode::Auto);
        assert_eq!(Mode::default().to_string(), MODES[0]);
    }
}
