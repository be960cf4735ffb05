use anyhow::{Context, Result};
use clap::Args;
use home::home_dir;
use log::debug;
use mfa_session::session::MfaSession;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

mod check;
mod refresh;

pub use check::CheckArgs;
pub use refresh::RefreshArgs;

const APP_NAME: &str = "mfa-session";

/// Persisted defaults, overridden by command line flags.
#[derive(Serialize, Deserialize, Debug)]
#[serde(default)]
struct Settings {
    #[serde(skip_serializing_if = "Option::is_none")]
    device: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    region: Option<String>,
    profile: String,
    duration_seconds: i32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            device: None,
            region: None,
            profile: "temp".to_string(),
            duration_seconds: 900,
        }
    }
}

impl Settings {
    fn load() -> Result<Self> {
        let settings: Settings = confy::load(APP_NAME, None)?;
        debug!("loaded settings: {settings:?}");
        Ok(settings)
    }
}

#[derive(Args)]
struct StoreArgs {
    /// Path to aws credentials file (default: ~/.aws/credentials)
    #[arg(long, env = "AWS_SHARED_CREDENTIALS_FILE")]
    credentials: Option<PathBuf>,

    /// Path to aws config file (default: ~/.aws/config)
    #[arg(long, env = "AWS_CONFIG_FILE")]
    config: Option<PathBuf>,

    /// Profile to hold the temporary credentials (default: temp)
    #[arg(long, short = 'p')]
    profile: Option<String>,
}

impl StoreArgs {
    fn session(self, settings: &Settings, duration: Option<i32>) -> Result<MfaSession> {
        let aws_dir = || -> Result<PathBuf> {
            let home = home_dir().context("home directory must be set")?;
            Ok(home.join(Path::new(".aws")))
        };
        let credentials = match self.credentials {
            Some(path) => path,
            None => aws_dir()?.join("credentials"),
        };
        let config = match self.config {
            Some(path) => path,
            None => aws_dir()?.join("config"),
        };
        let session = MfaSession::new(
            credentials,
            config,
            self.profile.unwrap_or_else(|| settings.profile.clone()),
            duration.unwrap_or(settings.duration_seconds),
        )?;
        Ok(session)
    }
}
