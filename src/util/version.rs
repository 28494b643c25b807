use semver::Version;
use thiserror::Error;

pub const APP_NAME: &str = "Price Calculator";
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");
pub const GIT_TAG: Option<&str> = option_env!("GIT_TAG");

#[derive(Error, Debug)]
#[error("invalid version format: {0}")]
pub struct InvalidVersion(String);

fn parse_version_str(input: &str) -> Result<Version, InvalidVersion> {
    let trimmed = input.trim_start_matches(|ch| ch == 'v' || ch == 'V');
    Version::parse(trimmed).map_err(|err| InvalidVersion(err.to_string()))
}

/// Version of this build, preferring the git tag captured by `build.rs`.
pub fn current_version() -> Result<Version, InvalidVersion> {
    if let Some(tag) = GIT_TAG {
        if let Ok(version) = parse_version_str(tag) {
            return Ok(version);
        }
    }

    parse_version_str(APP_VERSION)
}

pub fn version_label() -> String {
    match current_version() {
        Ok(version) => format!("v{version}"),
        Err(_) => format!("v{APP_VERSION}"),
    }
}
