//! Set-top-box portal probe
//!
//! Derives the identifiers a middleware portal expects from a device's
//! MAC address and queries the portal for account info, live TV genres,
//! VOD categories and series categories in one concurrent sweep.

pub mod config;
pub mod credentials;
pub mod error;
pub mod portal;

pub use credentials::DeviceCredentials;
pub use error::PortalError;
pub use portal::aggregate::aggregate;
pub use portal::types::{AggregateResult, CategoryResult, Payload};
pub use portal::{Category, PortalClient, PortalQuery};
