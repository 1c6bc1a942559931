use config::ConfigError;
use serde::Deserialize;
use serde::Serialize;

use crate::constants::DEFAULT_MAX_LISTED_INVOCATIONS;
use crate::Error;
use crate::Result;

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct DiagnosticsConfig {
    /// Invocations listed in a verification failure before the rest is summarised
    #[serde(default = "default_max_listed_invocations")]
    pub max_listed_invocations: usize,

    /// Prefix listed invocations with their global sequence number
    #[serde(default = "default_show_sequence_numbers")]
    pub show_sequence_numbers: bool,
}

impl Default for DiagnosticsConfig {
    fn default() -> Self {
        Self {
            max_listed_invocations: default_max_listed_invocations(),
            show_sequence_numbers: default_show_sequence_numbers(),
        }
    }
}

impl DiagnosticsConfig {
    pub(super) fn validate(&self) -> Result<()> {
        if self.max_listed_invocations == 0 {
            return Err(Error::Config(ConfigError::Message(
                "max_listed_invocations must be greater than 0".into(),
            )));
        }
        Ok(())
    }
}

fn default_max_listed_invocations() -> usize {
    DEFAULT_MAX_LISTED_INVOCATIONS
}
fn default_show_sequence_numbers() -> bool {
    true
}
