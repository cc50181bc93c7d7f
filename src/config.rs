//! Probe settings.
//!
//! Settings are layered, later sources winning:
//!
//! 1. built-in defaults
//! 2. an optional settings file (`--config`)
//! 3. `RECWATCH_*` environment variables, e.g. `RECWATCH_API_KEY`
//! 4. values given on the command line
//!
//! The data-source [`Mode`] is chosen on the command line only.

use std::path::{Path, PathBuf};

use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;

use recwatch_adapters::api::{PdnsApiAdapter, DEFAULT_PORT};
use recwatch_adapters::control::RecControlAdapter;
use recwatch_adapters::AdapterError;

use crate::data::{Policy, Thresholds};
use crate::probe::Probe;
use crate::source::{SnapshotStore, Source};

/// Prefix of the environment variables read as settings.
pub const ENV_PREFIX: &str = "RECWATCH";

/// Where the counters are collected from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Mode {
    /// The Recursor's HTTP API on the given host.
    Api { host: String },
    /// `rec_control`, optionally pointed at a socket directory.
    Control { socket_dir: Option<String> },
    /// Fixed test data.
    Test,
}

impl Default for Mode {
    fn default() -> Self {
        Mode::Control { socket_dir: None }
    }
}

/// Resolved settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Settings {
    pub api_port: u16,
    pub api_key: String,
    /// Recursor virtual configuration; also selects the snapshot record.
    pub config_name: String,
    /// Warning threshold in queries per second, 0 to disable.
    pub warning: u64,
    /// Critical threshold in queries per second, 0 to disable.
    pub critical: u64,
    /// Directory holding the snapshot records.
    pub scratch: PathBuf,
    pub perfdata: bool,
    pub skip_security: bool,
}

/// Values given explicitly on the command line.
///
/// `None` (or `false` for the flags) leaves the lower layers in charge.
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub api_port: Option<u16>,
    pub api_key: Option<String>,
    pub config_name: Option<String>,
    pub warning: Option<u64>,
    pub critical: Option<u64>,
    pub scratch: Option<PathBuf>,
    pub perfdata: bool,
    pub skip_security: bool,
}

impl Settings {
    /// Resolve settings from every layer.
    pub fn load(file: Option<&Path>, overrides: &Overrides) -> Result<Self, ConfigError> {
        Self::load_with(file, Environment::with_prefix(ENV_PREFIX), overrides)
    }

    fn load_with(
        file: Option<&Path>,
        environment: Environment,
        overrides: &Overrides,
    ) -> Result<Self, ConfigError> {
        let mut builder = Config::builder()
            .set_default("api_port", u64::from(DEFAULT_PORT))?
            .set_default("api_key", "")?
            .set_default("config_name", "")?
            .set_default("warning", 0u64)?
            .set_default("critical", 0u64)?
            .set_default("scratch", path_value(&std::env::temp_dir()))?
            .set_default("perfdata", false)?
            .set_default("skip_security", false)?;

        if let Some(path) = file {
            builder = builder.add_source(File::from(path));
        }

        builder
            .add_source(environment)
            .set_override_option("api_port", overrides.api_port.map(u64::from))?
            .set_override_option("api_key", overrides.api_key.clone())?
            .set_override_option("config_name", overrides.config_name.clone())?
            .set_override_option("warning", overrides.warning)?
            .set_override_option("critical", overrides.critical)?
            .set_override_option("scratch", overrides.scratch.as_deref().map(path_value))?
            .set_override_option("perfdata", overrides.perfdata.then_some(true))?
            .set_override_option("skip_security", overrides.skip_security.then_some(true))?
            .build()?
            .try_deserialize()
    }

    /// Judgment policy.
    pub fn policy(&self) -> Policy {
        Policy {
            thresholds: Thresholds {
                warning: self.warning,
                critical: self.critical,
            },
            skip_security: self.skip_security,
            perfdata: self.perfdata,
        }
    }

    /// Snapshot store for the configured Recursor.
    pub fn store(&self) -> SnapshotStore {
        SnapshotStore::new(&self.scratch, Some(&self.config_name))
    }

    /// Counter source for a mode.
    pub fn source(&self, mode: &Mode) -> Result<Source, AdapterError> {
        let source = match mode {
            Mode::Api { host } => Source::Api(
                PdnsApiAdapter::builder()
                    .host(host.clone())
                    .port(self.api_port)
                    .api_key(self.api_key.clone())
                    .build()?,
            ),
            Mode::Control { socket_dir } => {
                let mut builder = RecControlAdapter::builder().config_name(self.config_name.clone());
                if let Some(dir) = socket_dir {
                    builder = builder.socket_dir(dir.clone());
                }
                Source::Control(builder.build())
            }
            Mode::Test => Source::fake(),
        };
        Ok(source)
    }

    /// A probe ready to run.
    pub fn probe(&self, mode: &Mode) -> Result<Probe, AdapterError> {
        Ok(Probe::new(self.source(mode)?, self.store(), self.policy()))
    }
}

fn path_value(path: &Path) -> String {
    path.to_string_lossy().into_owned()
}
