//! Engine-wide configuration.
//!
//! Settings are layered with the [`config`] crate:
//! 1. Default values (hardcoded)
//! 2. In-memory TOML overrides (`with_override_str`)
//!
//! The process-wide configuration is swapped atomically and every mock takes a
//! snapshot of it when it is created, so changing it never affects existing
//! mocks. Nothing is read from files or environment variables.

mod diagnostics;
mod stubbing;
pub use diagnostics::*;
pub use stubbing::*;


//---
use std::fmt::Debug;
use std::sync::Arc;

use arc_swap::ArcSwap;
use config::Config;
use config::File;
use config::FileFormat;
use lazy_static::lazy_static;
use serde::Deserialize;
use serde::Serialize;
use tracing::debug;

use crate::Result;

#[derive(Serialize, Deserialize, Clone, Default, PartialEq)]
pub struct EngineConfig {
    /// Defaults applied when configuring and answering unstubbed calls
    #[serde(default)]
    pub stubbing: StubbingConfig,

    /// Rendering of verification failures
    #[serde(default)]
    pub diagnostics: DiagnosticsConfig,
}

impl Debug for EngineConfig {
    fn fmt(
        &self,
        f: &mut std::fmt::Formatter<'_>,
    ) -> std::fmt::Result {
        f.debug_struct("EngineConfig")
            .field("stubbing", &self.stubbing)
            .field("diagnostics", &self.diagnostics)
            .finish()
    }
}

impl EngineConfig {
    /// Loads the type defaults without validation.
    ///
    /// # Example
    /// ```ignore
    /// let cfg = EngineConfig::new()?
    ///     .with_override_str("[stubbing]\ndefault_answer = \"smart_nulls\"")?
    ///     .validate()?;
    /// ```
    pub fn new() -> Result<Self> {
        let config: Self = Config::builder()
            .add_source(Config::try_from(&Self::default())?)
            .build()?
            .try_deserialize()?;
        Ok(config) // No validation - deferred to validate()
    }

    /// Merges a TOML fragment over the current values without validation.
    pub fn with_override_str(
        &self,
        toml: &str,
    ) -> Result<Self> {
        let config: Self = Config::builder()
            .add_source(Config::try_from(self)?)
            .add_source(File::from_str(toml, FileFormat::Toml))
            .build()?
            .try_deserialize()?;
        Ok(config)
    }

    /// Validates the configuration and returns the validated instance.
    pub fn validate(self) -> Result<Self> {
        self.diagnostics.validate()?;
        Ok(self)
    }
}

lazy_static! {
    static ref GLOBAL_CONFIG: ArcSwap<EngineConfig> = ArcSwap::from_pointee(EngineConfig::default());
}

/// Configuration new mocks are created with.
pub fn global_config() -> Arc<EngineConfig> {
    GLOBAL_CONFIG.load_full()
}

/// Validates and installs `config` as the process-wide configuration.
pub fn set_global_config(config: EngineConfig) -> Result<()> {
    let config = config.validate()?;
    debug!("install global engine config: {:?}", config);
    GLOBAL_CONFIG.store(Arc::new(config));
    Ok(())
}

pub fn reset_global_config() {
    GLOBAL_CONFIG.store(Arc::new(EngineConfig::default()));
}
