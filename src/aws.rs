use aws_config::SdkConfig;
use aws_types::region::Region;

pub mod sts;

/// SDK configuration for the session token exchange.
///
/// Long-term credentials come from the default provider chain, or from
/// `source_profile` when one is given.
pub async fn sdk_config(region: &str, source_profile: Option<&str>) -> SdkConfig {
    let loader = aws_config::from_env().region(Region::new(region.to_string()));
    match source_profile {
        Some(profile) => loader.profile_name(profile).load().await,
        None => loader.load().await,
    }
}
