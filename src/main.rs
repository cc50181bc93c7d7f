use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use recwatch::{output, Mode, Overrides, Settings, Verdict};

#[derive(Parser, Debug)]
#[command(name = "check_pdns_rec", version)]
#[command(about = "Monitoring plugin for the PowerDNS Recursor")]
#[command(
    long_about = "Monitoring plugin for the PowerDNS Recursor.\n\n\
    A non-zero exit code is generated if the number of DNS queries per second \
    exceeds the warning or critical threshold, or if the Recursor reports a \
    security problem."
)]
struct Args {
    /// PowerDNS API host (queries the HTTP API instead of rec_control)
    #[arg(short = 'A', long, conflicts_with_all = ["test", "socket_dir"])]
    api_host: Option<String>,

    /// Use fixed test data instead of a live Recursor
    #[arg(short = 'T', long, conflicts_with_all = ["api_host", "socket_dir"])]
    test: bool,

    /// Directory holding the Recursor's control socket
    #[arg(short = 'S', long, conflicts_with_all = ["api_host", "test"])]
    socket_dir: Option<String>,

    /// PowerDNS API port [default: 8082]
    #[arg(short = 'P', long)]
    api_port: Option<u16>,

    /// PowerDNS API key
    #[arg(short = 'k', long)]
    api_key: Option<String>,

    /// Name of the Recursor virtual configuration
    #[arg(short = 'n', long)]
    config_name: Option<String>,

    /// Warning threshold in queries per second, 0 to disable [default: 0]
    #[arg(short, long)]
    warning: Option<u64>,

    /// Critical threshold in queries per second, 0 to disable [default: 0]
    #[arg(short, long)]
    critical: Option<u64>,

    /// Scratch directory for the previous measurement [default: system temp dir]
    #[arg(short, long)]
    scratch: Option<PathBuf>,

    /// Print performance data
    #[arg(short, long)]
    perfdata: bool,

    /// Ignore the Recursor's security status
    #[arg(long = "skipsecurity")]
    skip_security: bool,

    /// Settings file
    #[arg(long)]
    config: Option<PathBuf>,
}

impl Args {
    fn mode(&self) -> Mode {
        if self.test {
            Mode::Test
        } else if let Some(host) = self.api_host.as_deref().filter(|h| !h.is_empty()) {
            Mode::Api {
                host: host.to_string(),
            }
        } else {
            Mode::Control {
                socket_dir: self.socket_dir.clone(),
            }
        }
    }

    fn overrides(&self) -> Overrides {
        Overrides {
            api_port: self.api_port,
            api_key: self.api_key.clone(),
            config_name: self.config_name.clone(),
            warning: self.warning,
            critical: self.critical,
            scratch: self.scratch.clone(),
            perfdata: self.perfdata,
            skip_security: self.skip_security,
        }
    }
}

fn main() {
    let args = Args::parse();

    // stdout carries only the plugin line
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let verdict = run(&args).unwrap_or_else(|e| Verdict::unknown(format!("{:#}", e)));

    println!("{}", output::render(&verdict));
    std::process::exit(verdict.exit_code());
}

/// Set up and run one probe.
fn run(args: &Args) -> Result<Verdict> {
    let settings = Settings::load(args.config.as_deref(), &args.overrides())
        .context("Invalid settings")?;
    tracing::debug!(mode = ?args.mode(), config_name = %settings.config_name, "settings resolved");

    let probe = settings.probe(&args.mode())?;

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;

    Ok(runtime.block_on(probe.run()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_mode_is_control() {
        let args = Args::parse_from(["check_pdns_rec"]);
        assert_eq!(args.mode(), Mode::Control { socket_dir: None });
    }

    #[test]
    fn test_modes() {
        let args = Args::parse_from(["check_pdns_rec", "-A", "127.0.0.1", "-P", "8443"]);
        assert_eq!(
            args.mode(),
            Mode::Api {
                host: "127.0.0.1".to_string()
            }
        );
        assert_eq!(args.overrides().api_port, Some(8443));

        let args = Args::parse_from(["check_pdns_rec", "-S", "/var/run/pdns-recursor"]);
        assert_eq!(
            args.mode(),
            Mode::Control {
                socket_dir: Some("/var/run/pdns-recursor".to_string())
            }
        );

        let args = Args::parse_from(["check_pdns_rec", "-T"]);
        assert_eq!(args.mode(), Mode::Test);
    }

    #[test]
    fn test_empty_api_host_falls_back_to_control() {
        let args = Args::parse_from(["check_pdns_rec", "-A", ""]);
        assert_eq!(args.mode(), Mode::Control { socket_dir: None });
    }

    #[test]
    fn test_modes_are_exclusive() {
        assert!(Args::try_parse_from(["check_pdns_rec", "-A", "localhost", "-T"]).is_err());
        assert!(Args::try_parse_from(["check_pdns_rec", "-T", "-S", "/tmp"]).is_err());
        assert!(Args::try_parse_from(["check_pdns_rec", "-A", "localhost", "-S", "/tmp"]).is_err());
    }

    #[test]
    fn test_flags() {
        let args = Args::parse_from([
            "check_pdns_rec",
            "-w",
            "1000",
            "-c",
            "5000",
            "-p",
            "--skipsecurity",
            "-n",
            "edge",
        ]);
        let overrides = args.overrides();

        assert_eq!(overrides.warning, Some(1000));
        assert_eq!(overrides.critical, Some(5000));
        assert!(overrides.perfdata);
        assert!(overrides.skip_security);
        assert_eq!(overrides.config_name.as_deref(), Some("edge"));
    }

    #[test]
    fn test_bad_settings_file_is_an_error() {
        let args = Args::parse_from(["check_pdns_rec", "-T", "--config", "/nonexistent/recwatch.toml"]);
        let err = run(&args).unwrap_err();
        assert!(format!("{:#}", err).starts_with("Invalid settings"));
    }

    #[test]
    fn test_test_mode_run() {
        let dir = tempfile::TempDir::new().unwrap();
        let scratch = dir.path().to_string_lossy().into_owned();
        let args = Args::parse_from(["check_pdns_rec", "-T", "-s", scratch.as_str()]);

        let verdict = run(&args).unwrap();
        assert_eq!(
            output::render(&verdict),
            "OK - PowerDNS running. Queries: 0/s."
        );
    }
}
