pub mod aws;
pub mod error;
pub mod expiry;
pub mod profile;
pub mod session;
pub mod store;

pub use error::{Error, Result};
