use anyhow::{bail, Result};
use chrono::Utc;
use clap::Args;

use super::{Settings, StoreArgs};

#[derive(Args)]
pub struct CheckArgs {
    #[command(flatten)]
    store: StoreArgs,
}

impl CheckArgs {
    pub async fn main(self) -> Result<()> {
        let settings = Settings::load()?;
        let session = self.store.session(&settings, None)?;

        match session.check_session_expiry(Utc::now())? {
            Some(expiration) => println!("[{}] valid until {expiration}", session.profile()),
            None => bail!(
                "no session in [{}] or it has expired; use `refresh` to create a new one",
                session.profile()
            ),
        }
        Ok(())
    }
}
