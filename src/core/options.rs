//! Setup options and their mapping to setup-osrm.sh flags
//!
//! The mapping is deterministic and order preserving: directory, profile,
//! skip flags, then the free-form region tokens.

use std::ffi::OsString;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Options accepted by [`crate::setup`]
///
/// Field names deserialize from camelCase so the same record can be loaded
/// from a JSON config file (`{"dir": "/data", "skipDownload": true}`).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SetupOptions {
    /// Regions or countries to download, e.g. `germany`, `europe/monaco`
    pub regions: Vec<String>,

    /// Output directory for the extracts and OSRM files
    pub dir: Option<PathBuf>,

    /// OSRM profile (car, bicycle, foot); the script defaults to car
    pub profile: Option<String>,

    /// Skip the download phase
    pub skip_download: bool,

    /// Skip the OSRM processing phase
    pub skip_processing: bool,

    /// Skip the post-processing health check
    pub skip_health_check: bool,
}

/// Options accepted by [`crate::process`]
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ProcessOptions {
    /// Directory containing the `.osm.pbf` files
    pub dir: Option<PathBuf>,

    /// OSRM profile
    pub profile: Option<String>,
}

/// Build the script argument list for a set of options
///
/// Paths are passed as-is, so a non-UTF-8 `dir` reaches the script unchanged.
pub fn build_args(options: &SetupOptions) -> Vec<OsString> {
    let mut args: Vec<OsString> = Vec::new();

    if let Some(dir) = options.dir.as_ref().filter(|d| !d.as_os_str().is_empty()) {
        args.push("--dir".into());
        args.push(dir.into());
    }

    if let Some(profile) = options.profile.as_ref().filter(|p| !p.is_empty()) {
        args.push("--profile".into());
        args.push(profile.into());
    }

    if options.skip_download {
        args.push("--skip-download".into());
    }

    if options.skip_processing {
        args.push("--skip-processing".into());
    }

    if options.skip_health_check {
        args.push("--skip-health-check".into());
    }

    args.extend(options.regions.iter().map(OsString::from));

    args
}

/// Options for a download-only run
pub fn download_options<I, S>(regions: I, dir: Option<PathBuf>) -> SetupOptions
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    SetupOptions {
        regions: regions.into_iter().map(Into::into).collect(),
        dir,
        skip_processing: true,
        skip_health_check: true,
        ..Default::default()
    }
}

/// Options for a process-only run over already downloaded extracts
pub fn process_options<I, S>(regions: I, options: ProcessOptions) -> SetupOptions
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    SetupOptions {
        regions: regions.into_iter().map(Into::into).collect(),
        dir: options.dir,
        profile: options.profile,
        skip_download: true,
        skip_health_check: true,
        ..Default::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_options_produce_no_args() {
        assert!(build_args(&SetupOptions::default()).is_empty());
    }

    #[test]
    fn test_dir_and_skip_download() {
        let options = SetupOptions {
            dir: Some(PathBuf::from("/data")),
            skip_download: true,
            ..Default::default()
        };
        assert_eq!(build_args(&options), vec!["--dir", "/data", "--skip-download"]);
    }

    #[test]
    fn test_full_option_order() {
        let options = SetupOptions {
            regions: vec!["germany".to_string(), "europe/monaco".to_string()],
            dir: Some(PathBuf::from("/srv/osrm")),
            profile: Some("bicycle".to_string()),
            skip_download: true,
            skip_processing: true,
            skip_health_check: true,
        };
        assert_eq!(
            build_args(&options),
            vec![
                "--dir",
                "/srv/osrm",
                "--profile",
                "bicycle",
                "--skip-download",
                "--skip-processing",
                "--skip-health-check",
                "germany",
                "europe/monaco",
            ]
        );
    }

    #[test]
    fn test_every_flag_combination() {
        for mask in 0u8..32 {
            let options = SetupOptions {
                regions: vec!["france".to_string()],
                dir: (mask & 1 != 0).then(|| PathBuf::from("/d")),
                profile: (mask & 2 != 0).then(|| "foot".to_string()),
                skip_download: mask & 4 != 0,
                skip_processing: mask & 8 != 0,
                skip_health_check: mask & 16 != 0,
            };

            let mut expected: Vec<&str> = Vec::new();
            if mask & 1 != 0 {
                expected.extend(["--dir", "/d"]);
            }
            if mask & 2 != 0 {
                expected.extend(["--profile", "foot"]);
            }
            if mask & 4 != 0 {
                expected.push("--skip-download");
            }
            if mask & 8 != 0 {
                expected.push("--skip-processing");
            }
            if mask & 16 != 0 {
                expected.push("--skip-health-check");
            }
            expected.push("france");

            assert_eq!(build_args(&options), expected, "mask {mask:#07b}");
        }
    }

    #[test]
    fn test_empty_dir_and_profile_are_ignored() {
        let options = SetupOptions {
            dir: Some(PathBuf::new()),
            profile: Some(String::new()),
            ..Default::default()
        };
        assert!(build_args(&options).is_empty());
    }

    #[test]
    fn test_regions_are_not_flagged() {
        let options = SetupOptions {
            regions: vec!["--looks-like-a-flag".to_string(), "spain".to_string()],
            ..Default::default()
        };
        assert_eq!(build_args(&options), vec!["--looks-like-a-flag", "spain"]);
    }

    #[cfg(unix)]
    #[test]
    fn test_non_utf8_dir_is_preserved() {
        use std::os::unix::ffi::OsStrExt;

        let raw = std::ffi::OsStr::from_bytes(b"/data/m\xfcnchen");
        let options = SetupOptions {
            dir: Some(PathBuf::from(raw)),
            ..Default::default()
        };
        let args = build_args(&options);
        assert_eq!(args.len(), 2);
        assert_eq!(args[1].as_bytes(), b"/data/m\xfcnchen");
    }

    #[test]
    fn test_download_preset() {
        let options = download_options(["germany"], Some(PathBuf::from("/data")));
        assert!(!options.skip_download);
        assert!(options.skip_processing);
        assert!(options.skip_health_check);
        assert_eq!(
            build_args(&options),
            vec!["--dir", "/data", "--skip-processing", "--skip-health-check", "germany"]
        );

        let options = download_options(Vec::<String>::new(), None);
        assert_eq!(build_args(&options), vec!["--skip-processing", "--skip-health-check"]);
    }

    #[test]
    fn test_process_preset() {
        let options = process_options(
            ["belgium", "netherlands"],
            ProcessOptions {
                dir: None,
                profile: Some("car".to_string()),
            },
        );
        assert!(options.skip_download);
        assert!(!options.skip_processing);
        assert!(options.skip_health_check);
        assert_eq!(
            build_args(&options),
            vec![
                "--profile",
                "car",
                "--skip-download",
                "--skip-health-check",
                "belgium",
                "netherlands",
            ]
        );
    }

    #[test]
    fn test_options_from_camel_case_json() {
        let options: SetupOptions =
            serde_json::from_str(r#"{"dir": "/data", "skipDownload": true}"#).unwrap();
        assert_eq!(build_args(&options), vec!["--dir", "/data", "--skip-download"]);

        let options: SetupOptions = serde_json::from_str(
            r#"{"regions": ["monaco"], "profile": "foot", "skipHealthCheck": true}"#,
        )
        .unwrap();
        assert_eq!(
            build_args(&options),
            vec!["--profile", "foot", "--skip-health-check", "monaco"]
        );
    }
}
