//! Setup script location and launch configuration

use std::path::{Path, PathBuf};

/// File name of the bundled setup script
pub const SCRIPT_NAME: &str = "setup-osrm.sh";

/// Environment variable overriding the script location
pub const SCRIPT_ENV_VAR: &str = "OSRM_SETUP_SCRIPT";

/// Configuration for launching the setup script
#[derive(Debug, Clone, PartialEq)]
pub struct ScriptConfig {
    /// Interpreter used to run the script
    pub interpreter: String,

    /// Path to setup-osrm.sh
    pub script_path: PathBuf,

    /// Export FORCE_COLOR=1 to the script
    pub force_color: bool,

    /// TERM value exported when the parent environment has none
    pub fallback_term: Option<String>,
}

impl Default for ScriptConfig {
    fn default() -> Self {
        Self {
            interpreter: "bash".to_string(),
            script_path: default_script_path(),
            force_color: true,
            fallback_term: None,
        }
    }
}

impl ScriptConfig {
    /// Configuration for a script at an explicit path
    pub fn with_script(script_path: impl Into<PathBuf>) -> Self {
        Self {
            script_path: script_path.into(),
            ..Default::default()
        }
    }
}

/// Resolve the default location of setup-osrm.sh
///
/// `OSRM_SETUP_SCRIPT` wins when set. Otherwise the script is looked up next to
/// the running executable, then one directory above it.
pub fn default_script_path() -> PathBuf {
    let exe_dir = std::env::current_exe()
        .ok()
        .and_then(|exe| exe.parent().map(Path::to_path_buf));

    resolve_script_path(std::env::var_os(SCRIPT_ENV_VAR).map(PathBuf::from), exe_dir.as_deref())
}

fn resolve_script_path(env_override: Option<PathBuf>, exe_dir: Option<&Path>) -> PathBuf {
    if let Some(path) = env_override.filter(|p| !p.as_os_str().is_empty()) {
        return path;
    }

    let Some(exe_dir) = exe_dir else {
        return PathBuf::from(SCRIPT_NAME);
    };

    let beside = exe_dir.join(SCRIPT_NAME);
    if beside.is_file() {
        return beside;
    }

    if let Some(parent) = exe_dir.parent() {
        let above = parent.join(SCRIPT_NAME);
        if above.is_file() {
            return above;
        }
    }

    beside
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_env_override_wins() {
        let dir = tempdir().unwrap();
        std::fs::write(dir.path().join(SCRIPT_NAME), "").unwrap();

        let resolved = resolve_script_path(Some(PathBuf::from("/custom/setup.sh")), Some(dir.path()));
        assert_eq!(resolved, PathBuf::from("/custom/setup.sh"));
    }

    #[test]
    fn test_empty_env_override_is_ignored() {
        let dir = tempdir().unwrap();
        let resolved = resolve_script_path(Some(PathBuf::new()), Some(dir.path()));
        assert_eq!(resolved, dir.path().join(SCRIPT_NAME));
    }

    #[test]
    fn test_script_beside_executable() {
        let dir = tempdir().unwrap();
        let bin = dir.path().join("bin");
        std::fs::create_dir(&bin).unwrap();
        std::fs::write(bin.join(SCRIPT_NAME), "").unwrap();
        std::fs::write(dir.path().join(SCRIPT_NAME), "").unwrap();

        assert_eq!(resolve_script_path(None, Some(&bin)), bin.join(SCRIPT_NAME));
    }

    #[test]
    fn test_script_above_executable() {
        let dir = tempdir().unwrap();
        let bin = dir.path().join("bin");
        std::fs::create_dir(&bin).unwrap();
        std::fs::write(dir.path().join(SCRIPT_NAME), "").unwrap();

        assert_eq!(resolve_script_path(None, Some(&bin)), dir.path().join(SCRIPT_NAME));
    }

    #[test]
    fn test_missing_script_reports_beside_path() {
        let dir = tempdir().unwrap();
        let bin = dir.path().join("bin");
        std::fs::create_dir(&bin).unwrap();

        assert_eq!(resolve_script_path(None, Some(&bin)), bin.join(SCRIPT_NAME));
    }

    #[test]
    fn test_default_config() {
        let config = ScriptConfig::with_script("/tmp/setup-osrm.sh");
        assert_eq!(config.interpreter, "bash");
        assert_eq!(config.script_path, PathBuf::from("/tmp/setup-osrm.sh"));
        assert!(config.force_color);
        assert_eq!(config.fallback_term, None);
    }
}
