//! Detection of the external tools setup-osrm.sh relies on

use std::env;
use std::path::Path;

use serde::Serialize;

/// Presence of the tools the setup script shells out to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Dependencies {
    pub bash: bool,
    pub docker: bool,
    pub curl: bool,
    pub wget: bool,
}

impl Dependencies {
    /// Probe PATH for every tool
    pub fn detect() -> Self {
        Self {
            bash: command_exists("bash"),
            docker: command_exists("docker"),
            curl: command_exists("curl"),
            wget: command_exists("wget"),
        }
    }

    /// Names of the tools that were not found
    pub fn missing(&self) -> Vec<&'static str> {
        [
            ("bash", self.bash),
            ("docker", self.docker),
            ("curl", self.curl),
            ("wget", self.wget),
        ]
        .into_iter()
        .filter(|(_, present)| !present)
        .map(|(name, _)| name)
        .collect()
    }
}

/// Whether `command` resolves to a file, either as a path or through PATH
pub fn command_exists(command: &str) -> bool {
    if command.trim().is_empty() {
        return false;
    }

    let command_path = Path::new(command);
    if command_path.components().count() > 1 {
        return command_path.is_file();
    }

    let Some(path_var) = env::var_os("PATH") else {
        return false;
    };

    // Windows may omit the extension, so PATHEXT is tried as well.
    #[cfg(windows)]
    let exts: Vec<String> = if command_path.extension().is_some() {
        Vec::new()
    } else {
        env::var_os("PATHEXT")
            .unwrap_or_else(|| ".EXE;.CMD;.BAT;.COM".into())
            .to_string_lossy()
            .split(';')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string)
            .collect()
    };
    #[cfg(not(windows))]
    let exts: Vec<String> = Vec::new();

    env::split_paths(&path_var).any(|dir| {
        dir.join(command).is_file()
            || exts
                .iter()
                .any(|ext| dir.join(format!("{command}{ext}")).is_file())
    })
}
