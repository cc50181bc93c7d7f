//! `rec_control` adapter using the Recursor's control socket.
//!
//! This adapter shells out to `rec_control get-all`, which talks to the
//! running Recursor over its control socket and prints every statistic as a
//! `name value` line.
//!
//! ## Example
//!
//! ```rust,no_run
//! use recwatch_adapters::control::RecControlAdapter;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let adapter = RecControlAdapter::builder()
//!         .socket_dir("/var/run/pdns-recursor")
//!         .config_name("edge")
//!         .build();
//!
//!     let snapshot = adapter.collect().await?;
//!     println!("questions: {:?}", snapshot.get("questions"));
//!     Ok(())
//! }
//! ```

use std::io;
use std::process::Stdio;

use tokio::process::Command;
use tracing::debug;

use recwatch_types::CounterSnapshot;

use crate::normalize::normalize_text;
use crate::AdapterError;

/// Name of the control program looked up on `PATH`.
pub const DEFAULT_PROGRAM: &str = "rec_control";

/// Collects statistics by running `rec_control get-all`.
#[derive(Debug, Clone)]
pub struct RecControlAdapter {
    program: String,
    socket_dir: Option<String>,
    config_name: Option<String>,
}

impl RecControlAdapter {
    /// Create a new builder for configuring the adapter.
    pub fn builder() -> RecControlAdapterBuilder {
        RecControlAdapterBuilder::default()
    }

    /// Collect a snapshot of the watched counters.
    pub async fn collect(&self) -> Result<CounterSnapshot, AdapterError> {
        let output = self.execute("get-all").await?;
        Ok(normalize_text(&output))
    }

    /// Run a control command and return its output.
    ///
    /// Standard error is appended to standard output, so a failing command
    /// reports whatever it printed on either stream.
    pub async fn execute(&self, cmd: &str) -> Result<String, AdapterError> {
        let args = self.args(cmd);
        debug!(program = %self.program, ?args, "running control command");

        let output = Command::new(&self.program)
            .args(&args)
            .stdin(Stdio::null())
            .output()
            .await
            .map_err(|e| match e.kind() {
                io::ErrorKind::NotFound => AdapterError::CommandNotFound(self.program.clone()),
                _ => AdapterError::Io(e.to_string()),
            })?;

        let mut combined = String::from_utf8_lossy(&output.stdout).into_owned();
        combined.push_str(&String::from_utf8_lossy(&output.stderr));

        if !output.status.success() {
            let message = combined.trim();
            return Err(AdapterError::CommandFailed(if message.is_empty() {
                format!("'{}' failed ({})", self.program, output.status)
            } else {
                message.to_string()
            }));
        }

        Ok(combined)
    }

    fn args(&self, cmd: &str) -> Vec<String> {
        let mut args = Vec::with_capacity(3);
        if let Some(dir) = self.socket_dir.as_deref().filter(|d| !d.is_empty()) {
            args.push(format!("--socket-dir={}", dir));
        }
        if let Some(name) = self.config_name.as_deref().filter(|n| !n.is_empty()) {
            args.push(format!("--config-name={}", name));
        }
        args.push(cmd.to_string());
        args
    }
}

/// Builder for RecControlAdapter.
#[derive(Debug, Default)]
pub struct RecControlAdapterBuilder {
    program: Option<String>,
    socket_dir: Option<String>,
    config_name: Option<String>,
}

impl RecControlAdapterBuilder {
    /// Override the control program (default: `rec_control` on `PATH`).
    pub fn program(mut self, program: impl Into<String>) -> Self {
        self.program = Some(program.into());
        self
    }

    /// Directory holding the Recursor's control socket.
    pub fn socket_dir(mut self, dir: impl Into<String>) -> Self {
        self.socket_dir = Some(dir.into());
        self
    }

    /// Name of the Recursor virtual configuration.
    pub fn config_name(mut self, name: impl Into<String>) -> Self {
        self.config_name = Some(name.into());
        self
    }

    /// Build the adapter.
    pub fn build(self) -> RecControlAdapter {
        RecControlAdapter {
            program: self.program.unwrap_or_else(|| DEFAULT_PROGRAM.to_string()),
            socket_dir: self.socket_dir,
            config_name: self.config_name,
        }
    }
}
