use anyhow::Result;
use atty::Stream;
use chrono::Utc;
use clap::Args;
use mfa_session::{
    aws::{sdk_config, sts::StsRequester},
    expiry::format_expiration,
    session::Outcome,
    Error,
};
use std::io::{self, Write};

use super::{Settings, StoreArgs};

#[derive(Args)]
pub struct RefreshArgs {
    /// Multi-factor OTP token (default: prompt on stdin)
    token: Option<String>,

    /// Device serial arn (default: use from configuration)
    #[arg(long, short = 'd')]
    device: Option<String>,

    /// Region for the STS call (default: use from configuration)
    #[arg(long, short = 'r')]
    region: Option<String>,

    /// Duration in seconds that temporary credentials should remain valid
    #[arg(long)]
    duration: Option<i32>,

    /// Profile with the long-term credentials (default: provider chain)
    #[arg(long)]
    source_profile: Option<String>,

    /// Request new credentials even if the current ones are still valid
    #[arg(long, short = 'f')]
    force: bool,

    #[command(flatten)]
    store: StoreArgs,
}

impl RefreshArgs {
    pub async fn main(self) -> Result<()> {
        let settings = Settings::load()?;
        let session = self.store.session(&settings, self.duration)?;
        let device = session.device(
            self.device.or(settings.device),
            self.region.or(settings.region),
        )?;

        let sdk_config = sdk_config(&device.region, self.source_profile.as_deref()).await;
        let requester = StsRequester::new(&sdk_config);

        let token = self.token;
        let serial_number = device.serial_number.clone();
        let outcome = session
            .refresh(
                &device,
                &requester,
                || match token {
                    Some(token) => Ok(token),
                    None => prompt_token_code(&serial_number),
                },
                Utc::now(),
                self.force,
            )
            .await?;

        match outcome {
            Outcome::StillValid { expiration } => println!(
                "credentials for [{}] are still valid until {expiration}",
                session.profile()
            ),
            Outcome::Refreshed(bundle) => println!(
                "wrote [{}] credentials valid until {}",
                session.profile(),
                format_expiration(&bundle.expiration)
            ),
        }
        Ok(())
    }
}

fn prompt_token_code(serial_number: &str) -> mfa_session::Result<String> {
    if atty::is(Stream::Stdin) {
        eprint!("Please enter your MFA code for {serial_number}: ");
        io::stderr().flush().map_err(Error::Input)?;
    }
    let mut input = String::new();
    io::stdin().read_line(&mut input).map_err(Error::Input)?;
    Ok(input.trim_end().to_string())
}
