use chrono::{DateTime, Utc};
use log::{debug, info};
use std::path::{Path, PathBuf};

use crate::{
    aws::sts::{CredentialBundle, RequestSessionToken, SessionTokenRequest},
    expiry::is_valid,
    profile::{find_section, find_value, merge_section, render_section, TOKEN_EXPIRATION},
    store::{read_lines, write_lines},
    Error, Result,
};

pub const MFA_SERIAL: &str = "mfa_serial";
pub const REGION: &str = "region";

/// MFA device and the region to exchange its codes in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Device {
    pub serial_number: String,
    pub region: String,
}

#[derive(Debug)]
pub enum Outcome {
    /// Cached credentials are still usable; nothing was written.
    StillValid { expiration: String },
    Refreshed(CredentialBundle),
}

pub struct MfaSession {
    credentials_path: PathBuf,
    config_path: PathBuf,
    profile: String,
    duration_seconds: i32,
}

impl MfaSession {
    pub fn new(
        credentials_path: impl Into<PathBuf>,
        config_path: impl Into<PathBuf>,
        profile: impl Into<String>,
        duration_seconds: i32,
    ) -> Result<Self> {
        if duration_seconds <= 0 {
            return Err(Error::InvalidDuration(duration_seconds));
        }
        let profile = profile.into();
        if profile.is_empty() || profile.contains(|c: char| matches!(c, ']' | '\n' | '\r')) {
            return Err(Error::InvalidProfile(profile));
        }
        Ok(Self {
            credentials_path: credentials_path.into(),
            config_path: config_path.into(),
            profile,
            duration_seconds,
        })
    }

    pub fn profile(&self) -> &str {
        &self.profile
    }

    pub fn credentials_path(&self) -> &Path {
        &self.credentials_path
    }

    /// Resolves the device, reading the config store only for values that
    /// were not given explicitly.
    pub fn device(&self, serial_number: Option<String>, region: Option<String>) -> Result<Device> {
        if let (Some(serial_number), Some(region)) = (&serial_number, &region) {
            return Ok(Device {
                serial_number: serial_number.clone(),
                region: region.clone(),
            });
        }
        let lines = read_lines(&self.config_path)?;
        let require = |key: &str| match find_value(&lines, key) {
            Some(value) if !value.is_empty() => Ok(value),
            _ => Err(Error::Configuration {
                key: key.to_string(),
                path: self.config_path.clone(),
            }),
        };
        Ok(Device {
            serial_number: serial_number.map_or_else(|| require(MFA_SERIAL), Ok)?,
            region: region.map_or_else(|| require(REGION), Ok)?,
        })
    }

    /// Expiration stored in the profile section, if the section and key exist.
    pub fn cached_expiration(&self) -> Result<Option<String>> {
        let lines = read_lines(&self.credentials_path)?;
        Ok(find_section(&lines, &self.profile)
            .and_then(|range| find_value(&lines[range], TOKEN_EXPIRATION)))
    }

    /// Cached expiration of the profile when it is still valid at `now`.
    pub fn check_session_expiry(&self, now: DateTime<Utc>) -> Result<Option<String>> {
        let expiration = self.cached_expiration()?;
        if is_valid(expiration.as_deref(), now)? {
            Ok(expiration)
        } else {
            Ok(None)
        }
    }

    /// Obtains fresh credentials unless the cached ones are still valid at
    /// `now` (and `force` is unset).
    ///
    /// `token_code` is only called once a new session is needed. The store
    /// is written only after the exchange succeeds.
    pub async fn refresh<R, F>(
        &self,
        device: &Device,
        requester: &R,
        token_code: F,
        now: DateTime<Utc>,
        force: bool,
    ) -> Result<Outcome>
    where
        R: RequestSessionToken + ?Sized,
        F: FnOnce() -> Result<String>,
    {
        if !force {
            if let Some(expiration) = self.cached_expiration()? {
                if is_valid(Some(&expiration), now)? {
                    return Ok(Outcome::StillValid { expiration });
                }
                debug!("[{}] expired at {expiration}", self.profile);
            }
        }

        let request = SessionTokenRequest {
            duration_seconds: self.duration_seconds,
            serial_number: device.serial_number.clone(),
            token_code: token_code()?,
        };
        let bundle = requester.request_session_token(request).await?;
        self.store_credentials(&bundle)?;
        Ok(Outcome::Refreshed(bundle))
    }

    pub fn store_credentials(&self, bundle: &CredentialBundle) -> Result<()> {
        let lines = read_lines(&self.credentials_path)?;
        let section = render_section(&self.profile, bundle);
        let merged = merge_section(lines, &self.profile, &section);
        write_lines(&self.credentials_path, &merged)?;
        info!(
            "stored [{}] credentials in {:?}",
            self.profile, self.credentials_path
        );
        Ok(())
    }
}
