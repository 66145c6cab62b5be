//! Signal forwarding to the setup script
//!
//! Handlers are installed before the child is spawned, so an interrupt that
//! arrives early is still routed to the child instead of terminating us.

use std::process::ExitStatus;

use log::debug;
use tokio::process::Child;

use crate::core::error::Result;

/// Forwards SIGINT and SIGTERM to a child until it exits
#[cfg(unix)]
pub struct SignalForwarder {
    interrupt: tokio::signal::unix::Signal,
    terminate: tokio::signal::unix::Signal,
}

#[cfg(unix)]
impl SignalForwarder {
    /// Install the handlers; from here on SIGINT/SIGTERM no longer terminate this process
    pub fn install() -> Result<Self> {
        use tokio::signal::unix::{signal, SignalKind};

        Ok(Self {
            interrupt: signal(SignalKind::interrupt())?,
            terminate: signal(SignalKind::terminate())?,
        })
    }

    /// Wait for the child to exit, relaying every received signal to it
    pub async fn wait(mut self, mut child: Child) -> Result<ExitStatus> {
        // The pid stays reserved until wait() reaps the child.
        let pid = child.id();

        loop {
            tokio::select! {
                status = child.wait() => return Ok(status?),
                Some(()) = self.interrupt.recv() => forward(pid, libc::SIGINT),
                Some(()) = self.terminate.recv() => forward(pid, libc::SIGTERM),
            }
        }
    }
}

#[cfg(unix)]
fn forward(pid: Option<u32>, signal: libc::c_int) {
    let Some(pid) = pid else {
        debug!("Setup script already reaped, dropping signal {signal}");
        return;
    };

    debug!("Forwarding signal {signal} to setup script (pid {pid})");
    let rc = unsafe { libc::kill(pid as libc::pid_t, signal) };
    if rc != 0 {
        log::warn!(
            "Failed to forward signal {signal} to pid {pid}: {}",
            std::io::Error::last_os_error()
        );
    }
}

/// Keeps Ctrl-C from ending this process while the child runs
///
/// The console delivers Ctrl-C to every process attached to it, so the child
/// already sees the interrupt.
#[cfg(not(unix))]
pub struct SignalForwarder;

#[cfg(not(unix))]
impl SignalForwarder {
    pub fn install() -> Result<Self> {
        Ok(Self)
    }

    pub async fn wait(self, mut child: Child) -> Result<ExitStatus> {
        loop {
            tokio::select! {
                status = child.wait() => return Ok(status?),
                res = tokio::signal::ctrl_c() => {
                    res?;
                    debug!("Ctrl-C received, waiting for setup script to exit");
                }
            }
        }
    }
}
