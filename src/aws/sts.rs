use async_trait::async_trait;
use aws_config::SdkConfig;
use aws_sdk_sts::error::DisplayErrorContext;
use chrono::{DateTime, Utc};
use log::{debug, info};
use std::{fmt, time::SystemTime};

use crate::{Error, Result};

/// Temporary credentials returned by a session token exchange.
#[derive(Clone, PartialEq, Eq)]
pub struct CredentialBundle {
    pub access_key_id: String,
    pub secret_access_key: String,
    pub session_token: String,
    pub expiration: DateTime<Utc>,
}

impl fmt::Debug for CredentialBundle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CredentialBundle")
            .field("access_key_id", &self.access_key_id)
            .field("secret_access_key", &"** redacted **")
            .field("session_token", &"** redacted **")
            .field("expiration", &self.expiration)
            .finish()
    }
}

#[derive(Debug, Clone)]
pub struct SessionTokenRequest {
    pub duration_seconds: i32,
    pub serial_number: String,
    pub token_code: String,
}

/// Exchanges an MFA token code for temporary credentials.
#[async_trait]
pub trait RequestSessionToken: Send + Sync {
    async fn request_session_token(&self, request: SessionTokenRequest)
        -> Result<CredentialBundle>;
}

/// `GetSessionToken` against AWS STS.
pub struct StsRequester {
    client: aws_sdk_sts::Client,
}

impl StsRequester {
    pub fn new(sdk_config: &SdkConfig) -> Self {
        Self {
            client: aws_sdk_sts::Client::new(sdk_config),
        }
    }
}

#[async_trait]
impl RequestSessionToken for StsRequester {
    async fn request_session_token(
        &self,
        request: SessionTokenRequest,
    ) -> Result<CredentialBundle> {
        debug!(
            "requesting {}s session for {}",
            request.duration_seconds, request.serial_number
        );
        let token = self
            .client
            .get_session_token()
            .duration_seconds(request.duration_seconds)
            .serial_number(request.serial_number)
            .token_code(request.token_code)
            .send()
            .await
            .map_err(|e| Error::Authentication(DisplayErrorContext(e).to_string()))?;

        let missing = |field: &str| Error::Authentication(format!("no {field} in response"));
        let cred = token.credentials().ok_or_else(|| missing("credentials"))?;
        let expiry: SystemTime = cred
            .expiration()
            .ok_or_else(|| missing("expiration"))?
            .clone()
            .try_into()
            .map_err(|_| missing("representable expiration"))?;

        let bundle = CredentialBundle {
            access_key_id: cred
                .access_key_id()
                .ok_or_else(|| missing("access_key_id"))?
                .to_string(),
            secret_access_key: cred
                .secret_access_key()
                .ok_or_else(|| missing("secret_access_key"))?
                .to_string(),
            session_token: cred
                .session_token()
                .ok_or_else(|| missing("session_token"))?
                .to_string(),
            expiration: expiry.into(),
        };
        info!("obtained session credentials expiring at {}", bundle.expiration);
        Ok(bundle)
    }
}
