//! # osrm-setup Library
//!
//! Programmatic API around `setup-osrm.sh`, the script that downloads
//! OpenStreetMap extracts and prepares them for the OSRM routing engine, plus
//! a small client for the OSRM HTTP API.
//!
//! The script runs with the caller's standard streams, so its output and
//! prompts appear as if it had been started directly.
//!
//! ## Basic Usage
//!
//! ```rust,no_run
//! use osrm_setup::{SetupOptions, ProcessOptions};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     // Full pipeline: download, process, health check
//!     let outcome = osrm_setup::setup(&SetupOptions {
//!         regions: vec!["europe/monaco".to_string()],
//!         dir: Some("/data/osrm".into()),
//!         ..Default::default()
//!     })
//!     .await?;
//!     println!("success: {}, exit code: {}", outcome.success, outcome.code);
//!
//!     // Download only
//!     osrm_setup::download(["germany"], Some("/data/osrm".into())).await?;
//!
//!     // Process extracts that are already on disk
//!     osrm_setup::process(["germany"], ProcessOptions::default()).await?;
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Probes
//!
//! ```rust,no_run
//! # #[tokio::main]
//! # async fn main() {
//! println!("script version: {}", osrm_setup::get_version().await);
//!
//! let deps = osrm_setup::check_dependencies();
//! if !deps.missing().is_empty() {
//!     eprintln!("missing tools: {:?}", deps.missing());
//! }
//! # }
//! ```

use std::path::PathBuf;

// Re-export core types that users might need
pub use crate::core::error::{Error, Result};
pub use crate::core::options::{build_args, ProcessOptions, SetupOptions};
pub use crate::core::runner::{SetupOutcome, UNKNOWN_VERSION, VERSION_PREFIX};
pub use crate::core::script::{SCRIPT_ENV_VAR, SCRIPT_NAME};

// Internal modules
mod core;

pub mod client;

pub use client::OsrmClient;

/// Run setup-osrm.sh with the given options
///
/// Resolves once the script has exited. A non-zero exit is reported through
/// [`SetupOutcome`], not as an error; errors mean the script could not be
/// started at all.
///
/// # Examples
/// ```rust,no_run
/// # #[tokio::main]
/// # async fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let options: osrm_setup::SetupOptions =
///     serde_json::from_str(r#"{"dir": "/data", "skipDownload": true}"#)?;
/// let outcome = osrm_setup::setup(&options).await?;
/// assert!(outcome.success);
/// # Ok(())
/// # }
/// ```
pub async fn setup(options: &SetupOptions) -> Result<SetupOutcome> {
    let runner = crate::core::Runner::new();
    runner.run(build_args(options)).await
}

/// Download map data only (no processing, no health check)
pub async fn download<I, S>(regions: I, dir: Option<PathBuf>) -> Result<SetupOutcome>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    setup(&crate::core::download_options(regions, dir)).await
}

/// Process existing map data (no download, no health check)
pub async fn process<I, S>(regions: I, options: ProcessOptions) -> Result<SetupOutcome>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    setup(&crate::core::process_options(regions, options)).await
}

/// Version reported by `setup-osrm.sh --version`, or `"unknown"`
pub async fn get_version() -> String {
    crate::core::Runner::new().version().await
}

/// Check which external tools the setup script needs are on PATH
pub fn check_dependencies() -> Dependencies {
    Dependencies::detect()
}

/// Location of setup-osrm.sh used by the top-level functions
pub fn script_path() -> PathBuf {
    crate::core::default_script_path()
}

/// Advanced API: run the script with a custom interpreter or location
///
/// # Examples
/// ```rust,no_run
/// use osrm_setup::{Runner, ScriptConfig};
///
/// # #[tokio::main]
/// # async fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let runner = Runner::with_config(ScriptConfig::with_script("/opt/osrm/setup-osrm.sh"));
/// let outcome = runner.run(["--dir", "/data", "europe/monaco"]).await?;
/// std::process::exit(outcome.code);
/// # }
/// ```
pub use crate::core::{Dependencies, Runner, ScriptConfig};
