//! Core library modules for osrm-setup
//!
//! This module contains the internal implementation details of the osrm-setup library.

pub mod deps;
pub mod error;
pub mod options;
pub mod runner;
pub mod script;
pub mod signals;

// Re-export main types for internal use
pub use deps::Dependencies;
pub use options::{download_options, process_options};
pub use runner::Runner;
pub use script::{default_script_path, ScriptConfig};
