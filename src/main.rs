//! # osrm-setup CLI
//!
//! Command-line wrapper for setup-osrm.sh.
//! Every argument is passed through untouched; the exit code is the script's.

use std::ffi::OsString;

use log::debug;
use osrm_setup::{Error, Runner, ScriptConfig};

/// Terminal type assumed when the environment sets none
const FALLBACK_TERM: &str = "xterm-256color";

/// Arguments for setup-osrm.sh
///
/// Nothing is parsed here, `--help`, `--version` and a leading `--` all
/// belong to the script.
fn script_args<I>(argv: I) -> Vec<OsString>
where
    I: IntoIterator<Item = OsString>,
{
    argv.into_iter().skip(1).collect()
}

#[tokio::main]
async fn main() {
    let args = script_args(std::env::args_os());

    // Initialize logging to stderr
    env_logger::Builder::from_default_env()
        .target(env_logger::Target::Stderr)
        .init();

    let config = ScriptConfig {
        fallback_term: Some(FALLBACK_TERM.to_string()),
        ..Default::default()
    };
    debug!("Using setup script {}", config.script_path.display());

    let runner = Runner::with_config(config);
    match runner.run_interactive(&args).await {
        Ok(outcome) => std::process::exit(outcome.code),
        Err(e) => {
            report_error(&e);
            std::process::exit(1);
        }
    }
}

fn report_error(error: &Error) {
    eprintln!("❌ Error: {error}");
    if let Error::InterpreterNotFound(interpreter) = error {
        eprintln!("Please ensure {interpreter} is installed and available in your PATH");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Vec<OsString> {
        let argv = std::iter::once("osrm-setup").chain(args.iter().copied());
        script_args(argv.map(OsString::from))
    }

    #[test]
    fn test_arguments_pass_through_verbatim() {
        assert_eq!(
            parse(&["--dir", "/data", "--skip-download", "europe/monaco"]),
            vec!["--dir", "/data", "--skip-download", "europe/monaco"]
        );
    }

    #[test]
    fn test_help_and_version_belong_to_the_script() {
        assert_eq!(parse(&["--help"]), vec!["--help"]);
        assert_eq!(parse(&["--version"]), vec!["--version"]);
        assert_eq!(parse(&["-h", "-V"]), vec!["-h", "-V"]);
    }

    #[test]
    fn test_leading_double_dash_is_kept() {
        assert_eq!(parse(&["--", "germany"]), vec!["--", "germany"]);
        assert_eq!(parse(&["--", "--"]), vec!["--", "--"]);
    }

    #[test]
    fn test_no_arguments() {
        assert!(parse(&[]).is_empty());
    }
}
