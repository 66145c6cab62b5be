//! Launching setup-osrm.sh
//!
//! The script runs with the caller's standard streams so its prompts and
//! colour output reach the terminal unchanged.

use std::ffi::OsStr;
use std::process::{ExitStatus, Stdio};

use log::debug;
use serde::Serialize;
use tokio::process::{Child, Command};

use crate::core::error::{Error, Result};
use crate::core::script::ScriptConfig;
use crate::core::signals::SignalForwarder;

/// Prefix printed by `setup-osrm.sh --version`
pub const VERSION_PREFIX: &str = "OSRM Map Setup Script ";

/// Returned by the version probe when the script cannot report one
pub const UNKNOWN_VERSION: &str = "unknown";

/// Result of a script run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SetupOutcome {
    /// `true` when the script exited with code 0
    pub success: bool,

    /// Exit code of the script; `128 + signo` when it was killed by a signal
    pub code: i32,
}

impl SetupOutcome {
    pub fn from_status(status: ExitStatus) -> Self {
        let code = exit_code(status);
        Self {
            success: code == 0,
            code,
        }
    }
}

fn exit_code(status: ExitStatus) -> i32 {
    if let Some(code) = status.code() {
        return code;
    }

    #[cfg(unix)]
    {
        use std::os::unix::process::ExitStatusExt;
        if let Some(signal) = status.signal() {
            return 128 + signal;
        }
    }

    1
}

/// Runs the setup script with a given configuration
pub struct Runner {
    config: ScriptConfig,
}

impl Default for Runner {
    fn default() -> Self {
        Self::new()
    }
}

impl Runner {
    /// Create a runner with the default script location
    pub fn new() -> Self {
        Self {
            config: ScriptConfig::default(),
        }
    }

    /// Create a runner with custom configuration
    pub fn with_config(config: ScriptConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ScriptConfig {
        &self.config
    }

    /// Run the script with `args` and wait for it to exit
    pub async fn run<I, S>(&self, args: I) -> Result<SetupOutcome>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<OsStr>,
    {
        let mut child = self.spawn(args)?;
        let status = child.wait().await?;
        Ok(SetupOutcome::from_status(status))
    }

    /// Run the script in the foreground, relaying SIGINT and SIGTERM to it
    ///
    /// Returns only once the script itself has exited.
    pub async fn run_interactive<I, S>(&self, args: I) -> Result<SetupOutcome>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<OsStr>,
    {
        self.ensure_script()?;

        let forwarder = SignalForwarder::install()?;
        let child = self.spawn(args)?;
        let status = forwarder.wait(child).await?;
        Ok(SetupOutcome::from_status(status))
    }

    /// Ask the script for its version, or [`UNKNOWN_VERSION`] if it cannot tell
    pub async fn version(&self) -> String {
        match self.probe_version().await {
            Ok(version) => version,
            Err(e) => {
                debug!("Version probe failed: {e}");
                UNKNOWN_VERSION.to_string()
            }
        }
    }

    async fn probe_version(&self) -> Result<String> {
        self.ensure_script()?;

        let mut cmd = self.command();
        cmd.arg("--version").stdin(Stdio::null());

        let output = cmd.output().await.map_err(|e| self.launch_error(e))?;
        if !output.status.success() {
            return Err(Error::LaunchFailed(format!(
                "--version exited with {}",
                output.status
            )));
        }

        let stdout = String::from_utf8_lossy(&output.stdout);
        Ok(stdout.trim().replacen(VERSION_PREFIX, "", 1))
    }

    fn ensure_script(&self) -> Result<()> {
        if self.config.script_path.is_file() {
            Ok(())
        } else {
            Err(Error::ScriptNotFound(self.config.script_path.clone()))
        }
    }

    /// Base command: interpreter, script path and environment
    fn command(&self) -> Command {
        let mut cmd = Command::new(&self.config.interpreter);
        cmd.arg(&self.config.script_path);

        if self.config.force_color {
            cmd.env("FORCE_COLOR", "1");
        }

        if let Some(term) = &self.config.fallback_term {
            if std::env::var_os("TERM").map_or(true, |t| t.is_empty()) {
                cmd.env("TERM", term);
            }
        }

        cmd
    }

    fn spawn<I, S>(&self, args: I) -> Result<Child>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<OsStr>,
    {
        self.ensure_script()?;

        let mut cmd = self.command();
        cmd.args(args)
            .stdin(Stdio::inherit())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit());

        debug!("Spawning {:?}", cmd.as_std());
        cmd.spawn().map_err(|e| self.launch_error(e))
    }

    fn launch_error(&self, err: std::io::Error) -> Error {
        if err.kind() == std::io::ErrorKind::NotFound {
            Error::InterpreterNotFound(self.config.interpreter.clone())
        } else {
            Error::LaunchFailed(err.to_string())
        }
    }
}
