//! Library usage example
//!
//! Reports the script version and the tools it needs, then downloads and
//! processes the regions given on the command line.
//!
//! ```sh
//! cargo run --example setup -- europe/monaco
//! ```

use std::path::PathBuf;

use osrm_setup::{ProcessOptions, SetupOutcome};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_default_env()
        .target(env_logger::Target::Stderr)
        .init();

    let regions: Vec<String> = std::env::args().skip(1).collect();
    let dir: Option<PathBuf> = std::env::var_os("OSRM_DATA_DIR").map(Into::into);

    println!("Script:  {}", osrm_setup::script_path().display());
    println!("Version: {}", osrm_setup::get_version().await);

    let deps = osrm_setup::check_dependencies();
    println!("Dependencies: {}", serde_json::to_string(&deps)?);
    let missing = deps.missing();
    if !missing.is_empty() {
        anyhow::bail!("missing required tools: {}", missing.join(", "));
    }

    let outcome = osrm_setup::download(regions.clone(), dir.clone()).await?;
    report("download", outcome);
    if !outcome.success {
        std::process::exit(outcome.code);
    }

    let outcome = osrm_setup::process(
        regions,
        ProcessOptions {
            dir,
            profile: Some("car".to_string()),
        },
    )
    .await?;
    report("process", outcome);
    std::process::exit(outcome.code);
}

fn report(phase: &str, outcome: SetupOutcome) {
    if outcome.success {
        println!("✅ {phase} finished");
    } else {
        eprintln!("❌ {phase} failed with exit code {}", outcome.code);
    }
}
